use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::checklists::handlers;
use crate::features::checklists::services::ChecklistService;

/// Create routes for the checklist form
pub fn routes(service: Arc<ChecklistService>) -> Router {
    Router::new()
        .route("/api/checklists/template", get(handlers::get_template))
        .route("/api/checklists", post(handlers::submit_checklist))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryRecordStore;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::atomic::Ordering;

    fn server(store: Arc<MemoryRecordStore>) -> TestServer {
        let service = Arc::new(ChecklistService::new(store));
        TestServer::new(routes(service)).unwrap()
    }

    fn body() -> Value {
        json!({
            "site": {
                "nomorUrut": "1",
                "namaSite": "PT PROTELINDO",
                "alamatSite": "Jl. Merdeka No. 5, Bandung",
                "lat": "-6.9175",
                "lng": "107.6191",
                "tanggalChecklist": "2025-01-15",
                "lokasi": "P"
            }
        })
    }

    #[tokio::test]
    async fn test_submit_returns_created() {
        let store = Arc::new(MemoryRecordStore::new());
        let server = server(store.clone());

        let response = server.post("/api/checklists").json(&body()).await;

        response.assert_status(StatusCode::CREATED);
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 13);
        assert_eq!(json["data"]["site"]["namaSite"], "PT PROTELINDO");
        assert_eq!(store.stored_sites().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_non_numeric_longitude_is_bad_request() {
        let store = Arc::new(MemoryRecordStore::new());
        let server = server(store.clone());
        let mut payload = body();
        payload["site"]["lng"] = json!("timur");

        let response = server.post("/api/checklists").json(&payload).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json["message"], "Longitude harus berupa angka");
        assert_eq!(store.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_site_rejection_is_bad_gateway() {
        let store = Arc::new(MemoryRecordStore::new());
        store.fail_site_insert.store(true, Ordering::SeqCst);
        let server = server(store);

        let response = server.post("/api/checklists").json(&body()).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_template_lists_thirteen_rows() {
        let server = server(Arc::new(MemoryRecordStore::new()));

        let response = server.get("/api/checklists/template").await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"].as_array().unwrap().len(), 13);
        assert_eq!(json["data"][2]["spesifikasi"], "OBL, Taman, Penerangan BTS");
    }
}
