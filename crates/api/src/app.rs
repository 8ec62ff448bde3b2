use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use billhub_core::InvoiceId;
use billhub_invoices::Invoice;
use billhub_portal::{
    InvoiceExportService, InvoiceQueryService, Page, PortalConfig, parse_page,
};
use billhub_store::{FixedReportRenderer, InMemoryInvoiceStore, InvoiceStore, ReportRenderer};

use crate::context::CustomerContext;
use crate::middleware::AuthState;
use crate::session::{InMemorySessionStore, SessionStore};
use errors::{json_error, portal_error_to_response};

pub mod errors;

type DynStore = Arc<dyn InvoiceStore>;
type DynRenderer = Arc<dyn ReportRenderer>;

#[derive(Clone)]
pub struct AppServices {
    query: Arc<InvoiceQueryService<DynStore>>,
    export: Arc<InvoiceExportService<DynStore, DynRenderer>>,
}

impl AppServices {
    pub fn new(store: DynStore, renderer: DynRenderer, config: PortalConfig) -> Self {
        Self {
            query: Arc::new(InvoiceQueryService::new(store.clone(), config.clone())),
            export: Arc::new(InvoiceExportService::new(store, renderer, config)),
        }
    }
}

/// Handles to the in-memory backends, for seeding from dev wiring and tests.
pub struct DevHandles {
    pub store: Arc<InMemoryInvoiceStore>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// Assemble the router: invoice routes behind session auth, plus /health.
pub fn build_app(services: AppServices, sessions: Arc<dyn SessionStore>) -> Router {
    let auth_state = AuthState { sessions };

    // Protected routes: require a valid session token.
    let protected = Router::new()
        .route("/invoices", get(list_invoices))
        .route("/invoices/:id", get(get_invoice))
        .route("/invoices/:id/print", get(print_invoice))
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            crate::middleware::auth_middleware,
        ));

    Router::new().route("/health", get(health)).merge(protected)
}

/// In-memory wiring (dev/test): empty invoice store, empty session
/// table, a renderer that always produces `report_bytes`.
pub fn build_in_memory_app(config: PortalConfig, report_bytes: Vec<u8>) -> (Router, DevHandles) {
    let store = Arc::new(InMemoryInvoiceStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let renderer: DynRenderer = Arc::new(FixedReportRenderer::new(report_bytes));

    let dyn_store: DynStore = store.clone();
    let dyn_sessions: Arc<dyn SessionStore> = sessions.clone();
    let services = AppServices::new(dyn_store, renderer, config);
    let app = build_app(services, dyn_sessions);

    (app, DevHandles { store, sessions })
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<String>,
}

async fn list_invoices(
    Extension(services): Extension<AppServices>,
    Extension(customer): Extension<CustomerContext>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let page = parse_page(params.page.as_deref());

    match services
        .query
        .list_invoices(Some(customer.customer_id()), page)
    {
        Ok(page) => Json(page_to_json(&page)).into_response(),
        Err(e) => portal_error_to_response(e),
    }
}

async fn get_invoice(
    Extension(services): Extension<AppServices>,
    Extension(customer): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match id.parse::<InvoiceId>() {
        Ok(id) => id,
        Err(e) => return portal_error_to_response(e),
    };

    match services
        .export
        .get_invoice_detail(Some(customer.customer_id()), id)
    {
        Ok(invoice) => Json(invoice_to_json(&invoice)).into_response(),
        Err(e) => portal_error_to_response(e),
    }
}

async fn print_invoice(
    Extension(services): Extension<AppServices>,
    Extension(customer): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match id.parse::<InvoiceId>() {
        Ok(id) => id,
        Err(e) => return portal_error_to_response(e),
    };

    let artifact = match services
        .export
        .print_invoice(Some(customer.customer_id()), id)
    {
        Ok(artifact) => artifact,
        Err(e) => return portal_error_to_response(e),
    };

    // Spool to disk and serve the download from the file; the guard
    // removes it once the bytes are read back.
    let spooled = match artifact.spool() {
        Ok(spooled) => spooled,
        Err(e) => {
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "spool_error",
                e.to_string(),
            );
        }
    };
    tracing::debug!(path = %spooled.path().display(), "spooled invoice report");

    let body = match tokio::fs::read(spooled.path()).await {
        Ok(body) => body,
        Err(e) => {
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "spool_error",
                e.to_string(),
            );
        }
    };
    drop(spooled);

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn page_to_json(page: &Page) -> serde_json::Value {
    serde_json::json!({
        "items": page.items.iter().map(invoice_to_json).collect::<Vec<_>>(),
        "total": page.total,
        "page": page.page,
        "page_size": page.page_size,
        "total_pages": page.total_pages(),
    })
}

fn invoice_to_json(invoice: &Invoice) -> serde_json::Value {
    serde_json::json!({
        "id": invoice.id.to_string(),
        "number": invoice.number,
        "reference": invoice.reference,
        "description": invoice.description,
        "invoice_date": invoice.invoice_date.to_string(),
        "create_date": invoice.create_date.to_rfc3339(),
        "state": invoice.state.as_str(),
        "type": invoice.kind.as_str(),
        "untaxed_amount": invoice.untaxed_amount,
        "tax_amount": invoice.tax_amount,
        "total_amount": invoice.total_amount,
    })
}
