use billhub_api::app::{DevHandles, build_in_memory_app};
use billhub_core::{CustomerId, InvoiceId};
use billhub_invoices::{Invoice, InvoiceKind, InvoiceState};
use billhub_portal::PortalConfig;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::StatusCode;

const REPORT_BYTES: &[u8] = b"%PDF-1.7\n%test report\n%%EOF\n";

struct TestServer {
    base_url: String,
    handles: DevHandles,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let (app, handles) = build_in_memory_app(PortalConfig::default(), REPORT_BYTES.to_vec());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handles,
            handle,
        }
    }

    fn login(&self, token: &str) -> CustomerId {
        let customer = CustomerId::new();
        self.handles.sessions.insert(token, customer);
        customer
    }

    fn seed(&self, invoice: Invoice) {
        self.handles.store.insert(invoice).unwrap();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn invoice(party: CustomerId, number: &str, day: u32, state: InvoiceState) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        number: number.to_string(),
        reference: None,
        description: None,
        invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(u64::from(day)))
            .unwrap(),
        create_date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        state,
        kind: InvoiceKind::Out,
        party,
        untaxed_amount: 10_000,
        tax_amount: 2_100,
        total_amount: 12_100,
    }
}

#[tokio::test]
async fn invoice_routes_require_a_session() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/invoices", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/invoices", srv.base_url))
        .bearer_auth("no-such-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_paginates_and_stays_within_the_session_customer() {
    let srv = TestServer::spawn().await;
    let mine = srv.login("tok-mine");
    let theirs = srv.login("tok-theirs");

    for day in 0..25 {
        srv.seed(invoice(mine, &format!("2024-{day:05}"), day, InvoiceState::Posted));
    }
    srv.seed(invoice(theirs, "2024-90001", 3, InvoiceState::Posted));

    let client = reqwest::Client::new();
    let mut seen = Vec::new();
    for (page, expected) in [("1", 20usize), ("2", 5), ("3", 0)] {
        let res = client
            .get(format!("{}/invoices?page={page}", srv.base_url))
            .bearer_auth("tok-mine")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = res.json().await.unwrap();
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), expected);
        assert_eq!(body["total"].as_u64().unwrap(), 25);
        assert_eq!(body["total_pages"].as_u64().unwrap(), 2);
        seen.extend(items.iter().map(|i| i["id"].as_str().unwrap().to_string()));
    }

    // Pages are disjoint and the foreign invoice never appears.
    assert_eq!(seen.len(), 25);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn garbage_page_parameter_serves_the_first_page() {
    let srv = TestServer::spawn().await;
    let mine = srv.login("tok-mine");
    srv.seed(invoice(mine, "2024-00001", 1, InvoiceState::Posted));

    let client = reqwest::Client::new();
    for page in ["abc", "0", "-2"] {
        let res = client
            .get(format!("{}/invoices?page={page}", srv.base_url))
            .bearer_auth("tok-mine")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["page"].as_u64().unwrap(), 1);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn foreign_and_missing_invoices_both_answer_404() {
    let srv = TestServer::spawn().await;
    let _mine = srv.login("tok-mine");
    let theirs = srv.login("tok-theirs");

    let foreign = invoice(theirs, "2024-70001", 1, InvoiceState::Posted);
    let foreign_id = foreign.id;
    srv.seed(foreign);

    let client = reqwest::Client::new();
    for id in [foreign_id.to_string(), InvoiceId::new().to_string()] {
        let res = client
            .get(format!("{}/invoices/{id}", srv.base_url))
            .bearer_auth("tok-mine")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"].as_str().unwrap(), "not_found");
    }
}

#[tokio::test]
async fn malformed_invoice_id_answers_400() {
    let srv = TestServer::spawn().await;
    let _mine = srv.login("tok-mine");

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/invoices/not-a-uuid", srv.base_url))
        .bearer_auth("tok-mine")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"].as_str().unwrap(), "invalid_id");
}

#[tokio::test]
async fn detail_projects_the_portal_fields() {
    let srv = TestServer::spawn().await;
    let mine = srv.login("tok-mine");

    let mut inv = invoice(mine, "2024-00042", 2, InvoiceState::Paid);
    inv.reference = Some("PO-77".to_string());
    let id = inv.id;
    srv.seed(inv);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/invoices/{id}", srv.base_url))
        .bearer_auth("tok-mine")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["number"].as_str().unwrap(), "2024-00042");
    assert_eq!(body["reference"].as_str().unwrap(), "PO-77");
    assert_eq!(body["state"].as_str().unwrap(), "paid");
    assert_eq!(body["type"].as_str().unwrap(), "out");
    assert_eq!(body["total_amount"].as_i64().unwrap(), 12_100);
    assert!(body.get("party").is_none());
}

#[tokio::test]
async fn paid_invoice_downloads_as_pdf_attachment() {
    let srv = TestServer::spawn().await;
    let mine = srv.login("tok-mine");

    let inv = invoice(mine, "2024-00123/A", 2, InvoiceState::Paid);
    let id = inv.id;
    srv.seed(inv);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/invoices/{id}/print", srv.base_url))
        .bearer_auth("tok-mine")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        res.headers()["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"invoice-2024-00123-a.pdf\""
    );

    let bytes = res.bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), REPORT_BYTES);
}

#[tokio::test]
async fn draft_invoice_is_not_printable() {
    let srv = TestServer::spawn().await;
    let mine = srv.login("tok-mine");

    let inv = invoice(mine, "2024-00200", 2, InvoiceState::Draft);
    let id = inv.id;
    srv.seed(inv);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/invoices/{id}/print", srv.base_url))
        .bearer_auth("tok-mine")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
