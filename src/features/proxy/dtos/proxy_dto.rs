use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::checklists::dtos::ChecklistItemResponseDto;
use crate::features::sites::dtos::SiteResponseDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponseDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatusDto {
    pub tables_available: bool,
}

/// Filters for `GET /api/{resource}`; each applies to its own resource only
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListQuery {
    /// `sites` only: exact sequence number
    pub nomor_urut: Option<String>,
    /// `checklist_items` only: owning site
    pub site_id: Option<Uuid>,
    /// `sites` only: maximum number of rows
    pub limit: Option<usize>,
}

/// Rows of one resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ResourceRows {
    Sites(Vec<SiteResponseDto>),
    ChecklistItems(Vec<ChecklistItemResponseDto>),
}

impl ResourceRows {
    pub fn len(&self) -> usize {
        match self {
            ResourceRows::Sites(rows) => rows.len(),
            ResourceRows::ChecklistItems(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single row of one resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ResourceRecord {
    Site(SiteResponseDto),
    ChecklistItem(ChecklistItemResponseDto),
}

/// Request body that may be a single object or an array of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}
