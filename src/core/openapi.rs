use utoipa::{Modify, OpenApi};

use crate::features::checklists::{
    dtos as checklists_dtos, handlers as checklists_handlers, models as checklists_models,
};
use crate::features::dashboard::{
    aggregator::ConditionStats, dtos as dashboard_dtos, handlers as dashboard_handlers,
};
use crate::features::map::{
    dtos as map_dtos, handlers as map_handlers, markers as map_markers,
};
use crate::features::proxy::{dtos as proxy_dtos, handlers as proxy_handlers};
use crate::features::sites::{dtos as sites_dtos, models as sites_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Checklists
        checklists_handlers::get_template,
        checklists_handlers::submit_checklist,
        // Dashboard
        dashboard_handlers::get_summary,
        // Map
        map_handlers::create_session,
        map_handlers::get_session,
        map_handlers::refresh_session,
        map_handlers::select_site,
        map_handlers::render_map,
        map_handlers::delete_session,
        // Pass-through
        proxy_handlers::ping,
        proxy_handlers::test_connection,
        proxy_handlers::list_rows,
        proxy_handlers::create_rows,
        proxy_handlers::get_row,
        proxy_handlers::update_row,
        proxy_handlers::delete_row,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Sites
            sites_models::Coordinate,
            sites_models::LocationCategory,
            sites_dtos::SiteResponseDto,
            sites_dtos::CreateSiteDto,
            sites_dtos::UpdateSiteDto,
            // Checklists
            checklists_models::Condition,
            checklists_dtos::ChecklistItemResponseDto,
            checklists_dtos::CreateChecklistItemDto,
            checklists_dtos::UpdateChecklistItemDto,
            checklists_dtos::ChecklistTemplateRowDto,
            checklists_dtos::SiteFormDto,
            checklists_dtos::ChecklistRowInputDto,
            checklists_dtos::SubmitChecklistDto,
            checklists_dtos::ChecklistSubmissionDto,
            ApiResponse<Vec<checklists_dtos::ChecklistTemplateRowDto>>,
            ApiResponse<checklists_dtos::ChecklistSubmissionDto>,
            // Dashboard
            ConditionStats,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Map
            map_markers::MarkerStyle,
            map_markers::SyncReport,
            map_dtos::MarkerDto,
            map_dtos::MapSessionDto,
            map_dtos::SelectSiteDto,
            map_dtos::MapRefreshDto,
            ApiResponse<map_dtos::MapSessionDto>,
            ApiResponse<map_dtos::MapRefreshDto>,
            // Pass-through
            proxy_dtos::PingResponseDto,
            proxy_dtos::ConnectionStatusDto,
            proxy_dtos::ResourceRows,
            proxy_dtos::ResourceRecord,
            ApiResponse<proxy_dtos::ConnectionStatusDto>,
            ApiResponse<proxy_dtos::ResourceRows>,
            ApiResponse<proxy_dtos::ResourceRecord>,
        )
    ),
    tags(
        (name = "checklists", description = "Site inspection form and checklist template"),
        (name = "dashboard", description = "Condition statistics and recent sites"),
        (name = "map", description = "Map views with site markers and selection"),
        (name = "proxy", description = "Pass-through access to the sites and checklist_items tables"),
    ),
    info(
        title = "Monitorin BTS API",
        version = "0.1.0",
        description = "API documentation for Monitorin BTS",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
