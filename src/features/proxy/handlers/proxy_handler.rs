use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::proxy::dtos::{
    ConnectionStatusDto, PingResponseDto, ResourceListQuery, ResourceRecord, ResourceRows,
};
use crate::features::proxy::resource::Resource;
use crate::features::proxy::services::ProxyService;
use crate::shared::types::{ApiResponse, Meta};

/// Liveness ping
#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Configured ping message", body = PingResponseDto),
    ),
    tag = "proxy"
)]
pub async fn ping(State(service): State<Arc<ProxyService>>) -> Json<PingResponseDto> {
    Json(PingResponseDto {
        message: service.ping_message().to_string(),
    })
}

/// Check connectivity to the data service
#[utoipa::path(
    get,
    path = "/api/supabase/test",
    responses(
        (status = 200, description = "Connection successful", body = ApiResponse<ConnectionStatusDto>),
        (status = 502, description = "Data service unreachable")
    ),
    tag = "proxy"
)]
pub async fn test_connection(
    State(service): State<Arc<ProxyService>>,
) -> Result<Json<ApiResponse<ConnectionStatusDto>>> {
    service.test_connection().await?;
    Ok(Json(ApiResponse::success(
        Some(ConnectionStatusDto {
            tables_available: true,
        }),
        Some("Supabase connection successful!".to_string()),
        None,
    )))
}

/// List rows of an allow-listed table
#[utoipa::path(
    get,
    path = "/api/{resource}",
    params(
        ("resource" = String, Path, description = "`sites` or `checklist_items`"),
        ResourceListQuery
    ),
    responses(
        (status = 200, description = "Rows", body = ApiResponse<ResourceRows>),
        (status = 404, description = "Unknown resource"),
        (status = 502, description = "Data service error")
    ),
    tag = "proxy"
)]
pub async fn list_rows(
    State(service): State<Arc<ProxyService>>,
    Path(resource): Path<String>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<ApiResponse<ResourceRows>>> {
    let resource: Resource = resource.parse()?;
    let rows = service.list(resource, query).await?;
    let total = rows.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(rows),
        None,
        Some(Meta { total }),
    )))
}

/// Insert rows into an allow-listed table
///
/// `checklist_items` accepts a single object or an array.
#[utoipa::path(
    post,
    path = "/api/{resource}",
    params(
        ("resource" = String, Path, description = "`sites` or `checklist_items`")
    ),
    responses(
        (status = 201, description = "Rows created", body = ApiResponse<ResourceRows>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown resource"),
        (status = 502, description = "Data service error")
    ),
    tag = "proxy"
)]
pub async fn create_rows(
    State(service): State<Arc<ProxyService>>,
    Path(resource): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<ApiResponse<ResourceRows>>)> {
    let resource: Resource = resource.parse()?;
    let rows = service.create(resource, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(rows), None, None)),
    ))
}

/// Fetch one row by id
#[utoipa::path(
    get,
    path = "/api/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "`sites` only"),
        ("id" = Uuid, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "Row", body = ApiResponse<ResourceRecord>),
        (status = 400, description = "Resource has no single-row read"),
        (status = 404, description = "Unknown resource or row"),
        (status = 502, description = "Data service error")
    ),
    tag = "proxy"
)]
pub async fn get_row(
    State(service): State<Arc<ProxyService>>,
    Path((resource, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ResourceRecord>>> {
    let resource: Resource = resource.parse()?;
    let record = service.get(resource, id).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

/// Update one row by id
#[utoipa::path(
    put,
    path = "/api/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "`sites` or `checklist_items`"),
        ("id" = Uuid, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "Row updated", body = ApiResponse<ResourceRecord>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown resource or row"),
        (status = 502, description = "Data service error")
    ),
    tag = "proxy"
)]
pub async fn update_row(
    State(service): State<Arc<ProxyService>>,
    Path((resource, id)): Path<(String, Uuid)>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<ApiResponse<ResourceRecord>>> {
    let resource: Resource = resource.parse()?;
    let record = service.update(resource, id, body).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

/// Delete one row by id
#[utoipa::path(
    delete,
    path = "/api/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "`sites` or `checklist_items`"),
        ("id" = Uuid, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "Row deleted"),
        (status = 404, description = "Unknown resource"),
        (status = 502, description = "Data service error")
    ),
    tag = "proxy"
)]
pub async fn delete_row(
    State(service): State<Arc<ProxyService>>,
    Path((resource, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    let resource: Resource = resource.parse()?;
    service.delete(resource, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Data deleted successfully".to_string()),
        None,
    )))
}
