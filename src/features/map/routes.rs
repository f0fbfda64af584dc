use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::map::handlers;
use crate::features::map::services::MapService;

/// Create routes for map sessions
pub fn routes(service: Arc<MapService>) -> Router {
    Router::new()
        .route("/api/map/sessions", post(handlers::create_session))
        .route(
            "/api/map/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route(
            "/api/map/sessions/{id}/refresh",
            post(handlers::refresh_session),
        )
        .route(
            "/api/map/sessions/{id}/selection",
            put(handlers::select_site),
        )
        .route("/api/map/sessions/{id}/map.svg", get(handlers::render_map))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sites::models::Coordinate;
    use crate::shared::test_helpers::{sample_site, MemoryRecordStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let store = MemoryRecordStore::with_sites(vec![
            sample_site(1, 20, Coordinate::new(-6.2088, 106.8456)),
            sample_site(2, 10, Coordinate::new(-7.2575, 112.7521)),
        ]);
        let service = Arc::new(MapService::new(Arc::new(store), 10));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let server = server();

        let created = server.post("/api/map/sessions").await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let site_id = body["data"]["sites"][0]["id"].clone();
        assert_eq!(body["data"]["markers"].as_array().unwrap().len(), 2);

        let selected = server
            .put(&format!("/api/map/sessions/{}/selection", id))
            .json(&json!({ "siteId": site_id }))
            .await;
        selected.assert_status_ok();
        let body: Value = selected.json();
        assert_eq!(body["data"]["selected"]["id"], site_id);

        let svg = server
            .get(&format!("/api/map/sessions/{}/map.svg", id))
            .await;
        svg.assert_status_ok();
        assert_eq!(svg.header("content-type"), "image/svg+xml");
        assert!(svg.text().contains("#06b6d4"));

        server
            .delete(&format!("/api/map/sessions/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/map/sessions/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_selecting_unknown_site_is_not_found() {
        let server = server();
        let body: Value = server.post("/api/map/sessions").await.json();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let response = server
            .put(&format!("/api/map/sessions/{}/selection", id))
            .json(&json!({ "siteId": "00000000-0000-0000-0000-000000000000" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_zero_width_session_has_no_map() {
        let server = server();

        let response = server
            .post("/api/map/sessions")
            .add_query_param("width", 0)
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"]["mapAvailable"], false);
        assert_eq!(body["data"]["mapMessage"], "Peta tidak dapat ditampilkan");
        assert_eq!(body["data"]["sites"].as_array().unwrap().len(), 2);
    }
}
