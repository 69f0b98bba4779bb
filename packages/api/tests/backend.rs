//! Exercises the client against an in-process axum backend.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api::{
    surat, users, ApiClient, ApiError, ErrorCategory, MemoryTokenStore, SessionContext, TokenStore,
};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{
    Attachment, DeleteConfirmation, ListAction, ListController, SubmitOutcome, SuratField,
    SuratWizard, UserAccount,
};

/// One received multipart part: `(name, file name, byte length)`.
type ReceivedPart = (String, Option<String>, usize);

#[derive(Clone, Default)]
struct Backend {
    hits: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// An address nothing listens on.
async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn session_user() -> Value {
    json!({"id": 1, "name": "Admin TU", "email": "admin@bappeda.go.id", "role": "admin"})
}

fn auth_router() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "rahasia" {
                    Json(json!({"token": "good", "user": session_user()})).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Email atau password salah"})))
                        .into_response()
                }
            }),
        )
        .route(
            "/api/auth/me",
            get(|headers: HeaderMap| async move {
                match bearer(&headers).as_deref() {
                    Some("good") => Json(json!({"user": session_user()})).into_response(),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token tidak valid"})))
                        .into_response(),
                }
            }),
        )
        .route("/api/auth/logout", post(|| async { StatusCode::NO_CONTENT }))
}

#[tokio::test]
async fn test_server_error_carries_body_message() {
    let router = Router::new().route(
        "/api/surat-masuk",
        get(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": "Nomor surat sudah terdaftar"})),
            )
        }),
    );
    let client = ApiClient::new(serve(router).await);

    let err = surat::list_surat_masuk(&client).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ServerError);
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.user_message(), "Nomor surat sudah terdaftar");
}

#[tokio::test]
async fn test_unreachable_backend_is_no_response() {
    let client = ApiClient::new(format!("http://{}/api", dead_addr().await));
    let err = surat::list_surat_masuk(&client).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NoResponse);
}

#[tokio::test]
async fn test_malformed_base_url_is_client_error() {
    let client = ApiClient::new("not a url");
    let err = users::list_users(&client).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ClientError);
}

#[tokio::test]
async fn test_bearer_token_and_wrapped_list() {
    let router = Router::new().route(
        "/api/admin/users",
        get(|headers: HeaderMap| async move {
            if bearer(&headers).as_deref() != Some("good") {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            Json(json!({"users": [
                {"id": 1, "name": "Ani", "email": "ani@bappeda.go.id", "role": "staff"},
                {"id": 2, "name": "", "email": "kabid@bappeda.go.id", "role": "user", "bidang": "Ekonomi"}
            ]}))
            .into_response()
        }),
    );
    let client = ApiClient::new(serve(router).await);

    let err = users::list_users(&client).await.unwrap_err();
    assert!(err.is_unauthorized());

    client.set_token(Some("good".to_string()));
    let list: Vec<UserAccount> = users::list_users(&client).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].display_name(), "kabid@bappeda.go.id");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let base = serve(auth_router()).await;
    let tokens = MemoryTokenStore::new();
    let session = SessionContext::new(ApiClient::new(&base), Arc::new(tokens.clone()));

    assert_eq!(session.init().await, Ok(None));

    let err = session.login("admin@bappeda.go.id", "salah").await.unwrap_err();
    assert_eq!(err.user_message(), "Email atau password salah");
    assert!(session.client().token().is_none());

    let user = session.login(" Admin@Bappeda.go.id ", "rahasia").await.unwrap();
    assert_eq!(user.role(), Some(store::Role::Admin));
    assert_eq!(tokens.load().as_deref(), Some("good"));

    // A fresh context picks the stored token up again
    let restored = SessionContext::new(ApiClient::new(&base), Arc::new(tokens.clone()));
    let user = restored.init().await.unwrap().unwrap();
    assert_eq!(user.email, "admin@bappeda.go.id");

    restored.teardown().await;
    assert!(tokens.load().is_none());
    assert!(restored.client().token().is_none());
}

#[tokio::test]
async fn test_rejected_token_is_cleared_but_outage_keeps_it() {
    let base = serve(auth_router()).await;
    let tokens = MemoryTokenStore::with_token("stale");
    let session = SessionContext::new(ApiClient::new(&base), Arc::new(tokens.clone()));
    assert_eq!(session.init().await, Ok(None));
    assert!(tokens.load().is_none());

    let tokens = MemoryTokenStore::with_token("good");
    let offline = SessionContext::new(
        ApiClient::new(format!("http://{}/api", dead_addr().await)),
        Arc::new(tokens.clone()),
    );
    let err = offline.init().await.unwrap_err();
    assert!(matches!(err, ApiError::NoResponse(_)));
    assert_eq!(tokens.load().as_deref(), Some("good"));
}

async fn record_parts(State(backend): State<Backend>, mut multipart: Multipart) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        parts.push((name, file_name, bytes.len()));
    }
    *backend.parts.lock().unwrap() = parts;
    Json(json!({"message": "Surat berhasil ditambahkan", "id": 7}))
}

#[tokio::test]
async fn test_wizard_submits_one_multipart_request() {
    let backend = Backend::default();
    let router = Router::new()
        .route("/api/surat-masuk", post(record_parts))
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .with_state(backend.clone());
    let client = ApiClient::new(serve(router).await);

    let mut wizard = SuratWizard::default();
    wizard.set_field(SuratField::AsalInstansi, "Dinas A");
    wizard.set_field(SuratField::NomorSurat, "1/X/2024");
    wizard.set_field(SuratField::TujuanJabatan, "Sekretaris");
    wizard.set_field(SuratField::Keterangan, "Undangan rapat");
    wizard.advance().unwrap();
    let report = wizard
        .add_photos(
            vec![Attachment::new("scan.jpg", "image/jpeg", vec![0xFF; 2 * 1024 * 1024])],
            |f| format!("blob:{}", f.name),
        )
        .unwrap();
    assert_eq!(report.accepted, 1);
    wizard.advance().unwrap();
    wizard.set_field(SuratField::Perihal, "Rapat");
    wizard.set_field(SuratField::DisposisiKepada, "Sekretaris");
    wizard.set_field(SuratField::Sifat, "Segera");
    wizard.advance().unwrap();

    let payload = wizard.begin_submit().unwrap();
    let result = surat::create_surat_masuk(&client, &payload).await;
    assert!(result.is_ok());
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);

    let parts = backend.parts.lock().unwrap().clone();
    let text: Vec<_> = parts.iter().filter(|(_, file, _)| file.is_none()).collect();
    let files: Vec<_> = parts.iter().filter(|(_, file, _)| file.is_some()).collect();
    assert_eq!(text.len(), 9);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, surat::PHOTO_FIELD);
    assert_eq!(files[0].1.as_deref(), Some("scan.jpg"));
    assert_eq!(files[0].2, 2 * 1024 * 1024);

    let outcome = wizard.finish_submit(result.map(|_| ()).map_err(|e| e.user_message()));
    match outcome {
        SubmitOutcome::Completed {
            redirect,
            toast,
            released_previews,
        } => {
            assert_eq!(redirect, "/admin");
            assert_eq!(toast, "Surat berhasil ditambahkan");
            assert_eq!(released_previews, vec!["blob:scan.jpg".to_string()]);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(wizard.attachments().is_empty());
}

#[tokio::test]
async fn test_failed_submit_keeps_wizard_state() {
    let router = Router::new()
        .route(
            "/api/surat-masuk",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"message": "Foto tidak valid"}))) }),
        )
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024));
    let client = ApiClient::new(serve(router).await);

    let mut wizard = SuratWizard::default();
    wizard.set_field(SuratField::AsalInstansi, "Dinas A");
    wizard.set_field(SuratField::NomorSurat, "2/X/2024");
    wizard.set_field(SuratField::TujuanJabatan, "Sekretaris");
    wizard.advance().unwrap();
    wizard
        .add_photos(vec![Attachment::new("a.png", "image/png", vec![1; 64])], |f| f.name.clone())
        .unwrap();
    wizard.advance().unwrap();
    wizard.set_field(SuratField::Perihal, "Rapat");
    wizard.set_field(SuratField::DisposisiKepada, "Sekretaris");
    wizard.set_field(SuratField::Sifat, "Biasa");
    wizard.advance().unwrap();

    let payload = wizard.begin_submit().unwrap();
    let result = surat::create_surat_masuk(&client, &payload).await;
    let outcome = wizard.finish_submit(result.map(|_| ()).map_err(|e| e.user_message()));

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Foto tidak valid".to_string()
        }
    );
    assert_eq!(wizard.step(), store::WizardStep::Review);
    assert_eq!(wizard.form().nomor_surat, "2/X/2024");
    assert_eq!(wizard.attachments().len(), 1);
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn test_delete_only_after_confirmation() {
    let backend = Backend::default();
    let router = Router::new()
        .route(
            "/api/admin/users/{id}",
            delete(|State(backend): State<Backend>, Path(_id): Path<i64>| async move {
                backend.hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::NO_CONTENT
            }),
        )
        .with_state(backend.clone());
    let client = ApiClient::new(serve(router).await);

    let mut list: ListController<UserAccount> = ListController::new(10);
    list.apply(ListAction::Replace(vec![UserAccount {
        id: 4,
        name: "Dewi".to_string(),
        email: "dewi@bappeda.go.id".to_string(),
        role: "staff".to_string(),
        jabatan: None,
        bidang: None,
    }]));

    let mut confirm = DeleteConfirmation::default();
    confirm.request(4);
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
    confirm.cancel();
    assert_eq!(confirm.confirm(), None);
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);

    confirm.request(4);
    let id = confirm.confirm().unwrap();
    users::delete_user(&client, id).await.unwrap();
    list.apply(ListAction::Remove(id));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);
    assert!(list.records().is_empty());
}

#[tokio::test]
async fn test_pdf_download_reports_progress() {
    const SIZE: usize = 300 * 1024;
    let router = Router::new().route(
        "/api/surat/{id}/pdf",
        get(|Path(id): Path<i64>| async move {
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"disposisi-{id}.pdf\""),
                    ),
                ],
                vec![b'%'; SIZE],
            )
        }),
    );
    let client = ApiClient::new(serve(router).await);

    let mut seen = Vec::new();
    let download = surat::download_pdf(&client, 12, |p| seen.push(p)).await.unwrap();

    assert_eq!(download.filename, "disposisi-12.pdf");
    assert_eq!(download.content_type, "application/pdf");
    assert_eq!(download.bytes.len(), SIZE);
    assert_eq!(seen.first().map(|p| p.received), Some(0));
    let last = seen.last().unwrap();
    assert_eq!(last.received, SIZE as u64);
    assert_eq!(last.percent(), Some(100));
}
