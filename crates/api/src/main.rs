use billhub_api::app::{DevHandles, build_in_memory_app};
use billhub_core::CustomerId;
use billhub_portal::PortalConfig;

/// Dev PDF stub handed out until a real report backend is wired in.
const DEV_REPORT_BYTES: &[u8] = b"%PDF-1.4\n%billhub dev report\n%%EOF\n";

#[tokio::main]
async fn main() {
    billhub_observability::init();

    let config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let (app, handles) = build_in_memory_app(config, DEV_REPORT_BYTES.to_vec());
    seed_sessions_from_env(&handles);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// `BILLHUB_SESSION_TOKENS` holds comma-separated `token:customer-uuid`
/// pairs. Malformed entries are skipped with a warning.
fn seed_sessions_from_env(handles: &DevHandles) {
    let Ok(raw) = std::env::var("BILLHUB_SESSION_TOKENS") else {
        tracing::warn!("BILLHUB_SESSION_TOKENS not set; no sessions available");
        return;
    };

    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((token, customer)) = pair.split_once(':') else {
            tracing::warn!(pair, "skipping malformed session pair");
            continue;
        };
        match customer.trim().parse::<CustomerId>() {
            Ok(customer) => handles.sessions.insert(token.trim(), customer),
            Err(e) => tracing::warn!(pair, "skipping session pair: {e}"),
        }
    }
}
