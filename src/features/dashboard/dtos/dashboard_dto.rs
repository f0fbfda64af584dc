use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::dashboard::aggregator::ConditionStats;
use crate::features::sites::dtos::SiteResponseDto;

/// Condition statistics plus the most recently recorded sites
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub stats: ConditionStats,
    pub recent_sites: Vec<SiteResponseDto>,
}
