use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::checklists::form::{SiteFields, SubmittedChecklist};
use crate::features::checklists::models::{
    ChecklistItem, ChecklistItemUpdate, Condition, NewChecklistItem,
};
use crate::features::checklists::template::ChecklistTemplateEntry;
use crate::features::sites::dtos::SiteResponseDto;
use crate::features::sites::models::LocationCategory;
use crate::shared::types::string_or_number;

// ============================================================================
// Items
// ============================================================================

/// Query parameters for listing checklist items
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemQuery {
    /// Only items belonging to this site
    pub site_id: Option<Uuid>,
}

/// Response DTO for a checklist item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemResponseDto {
    pub id: Uuid,
    pub site_id: Uuid,
    pub nomor_item: i32,
    pub material: String,
    pub spesifikasi: Option<String>,
    pub kondisi: Condition,
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ChecklistItem> for ChecklistItemResponseDto {
    fn from(item: ChecklistItem) -> Self {
        Self {
            id: item.id,
            site_id: item.site_id,
            nomor_item: item.nomor_item,
            material: item.material,
            spesifikasi: item.spesifikasi,
            kondisi: item.kondisi,
            keterangan: item.keterangan,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Request DTO for creating a checklist item directly
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistItemDto {
    pub site_id: Uuid,

    #[validate(range(min = 1, max = 13, message = "Nomor item harus antara 1 dan 13"))]
    pub nomor_item: i32,

    #[validate(length(min = 1, message = "Material wajib diisi"))]
    pub material: String,

    #[serde(default)]
    pub spesifikasi: String,

    #[serde(default)]
    pub kondisi: Condition,

    #[serde(default)]
    pub keterangan: String,
}

impl From<CreateChecklistItemDto> for NewChecklistItem {
    fn from(dto: CreateChecklistItemDto) -> Self {
        Self {
            site_id: dto.site_id,
            nomor_item: dto.nomor_item,
            material: dto.material,
            spesifikasi: dto.spesifikasi,
            kondisi: dto.kondisi,
            keterangan: dto.keterangan,
        }
    }
}

/// Request DTO for updating a checklist item
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItemDto {
    #[validate(length(min = 1, message = "Material tidak boleh kosong"))]
    pub material: Option<String>,
    pub spesifikasi: Option<String>,
    pub kondisi: Option<Condition>,
    pub keterangan: Option<String>,
}

impl From<UpdateChecklistItemDto> for ChecklistItemUpdate {
    fn from(dto: UpdateChecklistItemDto) -> Self {
        Self {
            material: dto.material,
            spesifikasi: dto.spesifikasi,
            kondisi: dto.kondisi,
            keterangan: dto.keterangan,
        }
    }
}

// ============================================================================
// Form
// ============================================================================

/// One read-only template line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTemplateRowDto {
    pub nomor: i32,
    pub material: String,
    pub spesifikasi: String,
    pub kondisi: Condition,
}

impl From<&ChecklistTemplateEntry> for ChecklistTemplateRowDto {
    fn from(entry: &ChecklistTemplateEntry) -> Self {
        Self {
            nomor: entry.nomor,
            material: entry.material.to_string(),
            spesifikasi: entry.spesifikasi.to_string(),
            kondisi: Condition::default(),
        }
    }
}

/// Site part of a form submission. Numeric fields may be sent as text or
/// numbers; they are parsed by the form controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteFormDto {
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "7")]
    pub nomor_urut: String,

    #[serde(default)]
    pub nama_site: String,

    #[serde(default)]
    pub alamat_site: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "-6.2088")]
    pub lat: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "106.8456")]
    pub lng: String,

    /// Defaults to today
    pub tanggal_checklist: Option<NaiveDate>,

    #[serde(default)]
    pub lokasi: LocationCategory,
}

impl From<SiteFormDto> for SiteFields {
    fn from(dto: SiteFormDto) -> Self {
        let defaults = SiteFields::default();
        Self {
            nomor_urut: dto.nomor_urut,
            nama_site: dto.nama_site,
            alamat_site: dto.alamat_site,
            lat: dto.lat,
            lng: dto.lng,
            tanggal_checklist: dto.tanggal_checklist.unwrap_or(defaults.tanggal_checklist),
            lokasi: dto.lokasi,
        }
    }
}

/// Annotation for one template row, addressed by its number (1..=13)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRowInputDto {
    pub nomor_item: i32,
    pub kondisi: Option<Condition>,
    pub keterangan: Option<String>,
}

/// Full form submission: site fields plus optional row annotations.
/// Rows that are not mentioned keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitChecklistDto {
    pub site: SiteFormDto,

    #[serde(default)]
    pub items: Vec<ChecklistRowInputDto>,
}

/// Result of a successful form submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSubmissionDto {
    pub site: SiteResponseDto,
    pub items: Vec<ChecklistItemResponseDto>,
}

impl From<SubmittedChecklist> for ChecklistSubmissionDto {
    fn from(submitted: SubmittedChecklist) -> Self {
        Self {
            site: submitted.site.into(),
            items: submitted.items.into_iter().map(Into::into).collect(),
        }
    }
}
