use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::timer::sleep;

/// Current server time, fetched once and then advanced locally every second.
#[component]
pub fn ServerClock() -> Element {
    let client = use_client();
    let mut offset = use_signal(|| None::<chrono::Duration>);
    let mut now = use_signal(Utc::now);

    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            match api::dashboard::server_time(&client).await {
                Ok(server) => offset.set(Some(server - Utc::now())),
                Err(e) => tracing::warn!("server time unavailable: {}", e),
            }
        }
    });

    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            now.set(Utc::now());
        }
    });

    let Some(offset) = offset() else {
        return rsx! {};
    };
    let shown: DateTime<Local> = (now() + offset).with_timezone(&Local);

    rsx! {
        span {
            class: "server-clock",
            title: "Waktu server",
            {shown.format("%d/%m/%Y %H:%M:%S").to_string()}
        }
    }
}
