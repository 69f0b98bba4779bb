use dioxus::prelude::*;

use api::{default_token_store, ApiClient, ApiSettings, SessionContext};
use store::{ClientConfig, RecordId, Role};
use ui::components::ToastProvider;
use ui::AuthProvider;
use views::{
    AdminAcara, AdminDashboard, AdminLayout, AdminNotifikasi, AdminSurat, AdminSuratBaru,
    AdminSuratKeluar, AdminTamu, AdminUsers, KabidDashboard, KabidLayout, KabidNotifikasi,
    KabidSurat, Login, NotFound, SekretarisDashboard, SekretarisLayout, SekretarisNotifikasi,
    SekretarisSurat, StaffDashboard, StaffLayout, StaffNotifikasi, StaffSurat, Unauthorized,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/unauthorized")]
    Unauthorized {},

    #[layout(AdminLayout)]
        #[route("/admin")]
        AdminDashboard {},
        #[route("/admin/surat")]
        AdminSurat {},
        #[route("/admin/surat/baru")]
        AdminSuratBaru {},
        #[route("/admin/surat-keluar")]
        AdminSuratKeluar {},
        #[route("/admin/users")]
        AdminUsers {},
        #[route("/admin/acara")]
        AdminAcara {},
        #[route("/admin/acara/:id/tamu")]
        AdminTamu { id: RecordId },
        #[route("/admin/notifikasi")]
        AdminNotifikasi {},
    #[end_layout]

    #[layout(SekretarisLayout)]
        #[route("/sekretaris")]
        SekretarisDashboard {},
        #[route("/sekretaris/surat")]
        SekretarisSurat {},
        #[route("/sekretaris/notifikasi")]
        SekretarisNotifikasi {},
    #[end_layout]

    #[layout(StaffLayout)]
        #[route("/staff")]
        StaffDashboard {},
        #[route("/staff/surat")]
        StaffSurat {},
        #[route("/staff/notifikasi")]
        StaffNotifikasi {},
    #[end_layout]

    #[layout(KabidLayout)]
        #[route("/")]
        KabidDashboard {},
        #[route("/surat")]
        KabidSurat {},
        #[route("/notifikasi")]
        KabidNotifikasi {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Landing page after sign-in.
    fn home(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminDashboard {},
            Role::Sekretaris => Route::SekretarisDashboard {},
            Role::Kabid => Route::KabidDashboard {},
            Role::Staff => Route::StaffDashboard {},
        }
    }

    /// The role's letter list, where notifications about a letter lead.
    fn surat_list(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminSurat {},
            Role::Sekretaris => Route::SekretarisSurat {},
            Role::Kabid => Route::KabidSurat {},
            Role::Staff => Route::StaffSurat {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Client knobs compiled into the bundle.
const CLIENT_CONFIG: &str = include_str!("../disposisi.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn client_config() -> ClientConfig {
    ClientConfig::from_toml(CLIENT_CONFIG).unwrap_or_else(|e| {
        tracing::warn!("invalid {}: {}, using defaults", ClientConfig::filename(), e);
        ClientConfig::default()
    })
}

fn build_session() -> Result<SessionContext, String> {
    let settings = ApiSettings::load().map_err(|e| e.to_string())?;
    let client = ApiClient::new(settings.api_url.clone());
    tracing::info!("using backend at {}", settings.api_url);
    Ok(SessionContext::new(client, default_token_store(&settings.token_key)))
}

#[component]
fn App() -> Element {
    use_context_provider(client_config);
    let session = use_hook(build_session);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match session {
            Ok(session) => rsx! {
                ToastProvider {
                    AuthProvider {
                        session,
                        Router::<Route> {}
                    }
                }
            },
            Err(message) => rsx! {
                div {
                    class: "status-page",
                    h1 { "Konfigurasi tidak valid" }
                    p { "{message}" }
                }
            },
        }
    }
}
