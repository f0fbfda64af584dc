use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::checklists::dtos::{
    ChecklistSubmissionDto, ChecklistTemplateRowDto, SubmitChecklistDto,
};
use crate::features::checklists::services::ChecklistService;
use crate::shared::constants::MSG_SUBMIT_SUCCESS;
use crate::shared::types::ApiResponse;

/// Get the fixed 13-line checklist template
#[utoipa::path(
    get,
    path = "/api/checklists/template",
    responses(
        (status = 200, description = "Checklist template", body = ApiResponse<Vec<ChecklistTemplateRowDto>>),
    ),
    tag = "checklists"
)]
pub async fn get_template(
    State(service): State<Arc<ChecklistService>>,
) -> Json<ApiResponse<Vec<ChecklistTemplateRowDto>>> {
    Json(ApiResponse::success(Some(service.template()), None, None))
}

/// Submit a site together with its checklist
///
/// Creates the site first, then all 13 checklist items in one batch. If the
/// items are rejected the site is deleted again and 502 is returned.
#[utoipa::path(
    post,
    path = "/api/checklists",
    request_body = SubmitChecklistDto,
    responses(
        (status = 201, description = "Checklist saved", body = ApiResponse<ChecklistSubmissionDto>),
        (status = 400, description = "Missing or non-numeric site fields"),
        (status = 502, description = "Data service rejected the write")
    ),
    tag = "checklists"
)]
pub async fn submit_checklist(
    State(service): State<Arc<ChecklistService>>,
    AppJson(dto): AppJson<SubmitChecklistDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChecklistSubmissionDto>>)> {
    let submission = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(submission),
            Some(MSG_SUBMIT_SUCCESS.to_string()),
            None,
        )),
    ))
}
