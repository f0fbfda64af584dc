use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use crate::features::proxy::handlers;
use crate::features::proxy::services::ProxyService;

/// Create the pass-through routes.
///
/// Static `/api/...` routes registered by other features take precedence
/// over the `{resource}` segment.
pub fn routes(service: Arc<ProxyService>) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/supabase/test", get(handlers::test_connection))
        .route(
            "/api/{resource}",
            get(handlers::list_rows).post(handlers::create_rows),
        )
        .route(
            "/api/{resource}/{id}",
            get(handlers::get_row)
                .put(handlers::update_row)
                .delete(handlers::delete_row),
        )
        .with_state(service)
}
