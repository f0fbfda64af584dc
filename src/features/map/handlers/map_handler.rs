use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::map::dtos::{MapRefreshDto, MapSessionDto, SelectSiteDto, ViewportQuery};
use crate::features::map::services::MapService;
use crate::shared::types::ApiResponse;

/// Open a map view and load the sites
#[utoipa::path(
    post,
    path = "/api/map/sessions",
    params(ViewportQuery),
    responses(
        (status = 201, description = "Map session created", body = ApiResponse<MapSessionDto>),
    ),
    tag = "map"
)]
pub async fn create_session(
    State(service): State<Arc<MapService>>,
    Query(query): Query<ViewportQuery>,
) -> Result<(StatusCode, Json<ApiResponse<MapSessionDto>>)> {
    let session = service.create(query.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(session), None, None)),
    ))
}

/// Get the current state of a map view
#[utoipa::path(
    get,
    path = "/api/map/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Map session ID")
    ),
    responses(
        (status = 200, description = "Map session", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn get_session(
    State(service): State<Arc<MapService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Reload sites and update markers incrementally
#[utoipa::path(
    post,
    path = "/api/map/sessions/{id}/refresh",
    params(
        ("id" = Uuid, Path, description = "Map session ID")
    ),
    responses(
        (status = 200, description = "Markers synchronised", body = ApiResponse<MapRefreshDto>),
        (status = 404, description = "Map session not found"),
        (status = 502, description = "Data service unavailable")
    ),
    tag = "map"
)]
pub async fn refresh_session(
    State(service): State<Arc<MapService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapRefreshDto>>> {
    let refreshed = service.refresh(id).await?;
    Ok(Json(ApiResponse::success(Some(refreshed), None, None)))
}

/// Select a site (list or marker click) or clear the selection
#[utoipa::path(
    put,
    path = "/api/map/sessions/{id}/selection",
    params(
        ("id" = Uuid, Path, description = "Map session ID")
    ),
    request_body = SelectSiteDto,
    responses(
        (status = 200, description = "Selection updated", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Session or site not found")
    ),
    tag = "map"
)]
pub async fn select_site(
    State(service): State<Arc<MapService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SelectSiteDto>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.select(id, dto.site_id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Render the map as SVG
#[utoipa::path(
    get,
    path = "/api/map/sessions/{id}/map.svg",
    params(
        ("id" = Uuid, Path, description = "Map session ID")
    ),
    responses(
        (status = 200, description = "SVG document", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn render_map(
    State(service): State<Arc<MapService>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let svg = service.render_svg(id).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Close a map view
#[utoipa::path(
    delete,
    path = "/api/map/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Map session ID")
    ),
    responses(
        (status = 200, description = "Map session closed"),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn delete_session(
    State(service): State<Arc<MapService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Map session closed".to_string()),
        None,
    )))
}
