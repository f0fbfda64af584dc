use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Inspection outcome of one checklist line (kolom `kondisi`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    #[default]
    #[serde(rename = "baik")]
    Good,
    #[serde(rename = "sedang")]
    Medium,
    #[serde(rename = "buruk")]
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Good => "baik",
            Condition::Medium => "sedang",
            Condition::Poor => "buruk",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inspection line, as stored in the `checklist_items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub site_id: Uuid,
    pub nomor_item: i32,
    pub material: String,
    #[serde(default)]
    pub spesifikasi: Option<String>,
    pub kondisi: Condition,
    #[serde(default)]
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `checklist_items`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChecklistItem {
    pub site_id: Uuid,
    pub nomor_item: i32,
    pub material: String,
    pub spesifikasi: String,
    pub kondisi: Condition,
    pub keterangan: String,
}

/// Partial update payload for `checklist_items`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChecklistItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spesifikasi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kondisi: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

impl ChecklistItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ChecklistItemUpdate::default()
    }
}

/// Projection used by the dashboard (`select=kondisi`)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConditionRow {
    pub kondisi: Condition,
}
