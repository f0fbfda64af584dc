use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::sites::models::{Coordinate, LocationCategory, NewSite, Site, SiteUpdate};

/// Query parameters for listing sites
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SiteListQuery {
    /// Exact match on the sequence number (e.g. `7`); empty returns all
    #[param(example = "7")]
    pub nomor_urut: Option<String>,

    /// Maximum number of sites, newest first
    pub limit: Option<usize>,
}

/// Response DTO for a site
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponseDto {
    pub id: Uuid,
    pub nomor_urut: i64,
    pub nama_site: String,
    pub alamat_site: String,
    pub koordinat_site: Coordinate,
    pub tanggal_checklist: NaiveDate,
    pub lokasi: LocationCategory,
    /// Google Maps link for the site coordinate
    pub maps_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Site> for SiteResponseDto {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            nomor_urut: site.nomor_urut,
            maps_url: site.koordinat_site.maps_url(),
            nama_site: site.nama_site,
            alamat_site: site.alamat_site,
            koordinat_site: site.koordinat_site,
            tanggal_checklist: site.tanggal_checklist,
            lokasi: site.lokasi,
            created_at: site.created_at,
            updated_at: site.updated_at,
        }
    }
}

impl From<&Site> for SiteResponseDto {
    fn from(site: &Site) -> Self {
        site.clone().into()
    }
}

/// Request DTO for creating a site
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteDto {
    pub nomor_urut: i64,

    #[validate(length(min = 1, max = 255, message = "Nama site wajib diisi (maks. 255 karakter)"))]
    pub nama_site: String,

    #[validate(length(min = 1, message = "Alamat site wajib diisi"))]
    pub alamat_site: String,

    pub koordinat_site: Coordinate,

    pub tanggal_checklist: NaiveDate,

    #[serde(default)]
    pub lokasi: LocationCategory,
}

impl From<CreateSiteDto> for NewSite {
    fn from(dto: CreateSiteDto) -> Self {
        Self {
            nomor_urut: dto.nomor_urut,
            nama_site: dto.nama_site,
            alamat_site: dto.alamat_site,
            koordinat_site: dto.koordinat_site,
            tanggal_checklist: dto.tanggal_checklist,
            lokasi: dto.lokasi,
        }
    }
}

/// Request DTO for updating a site; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteDto {
    pub nomor_urut: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Nama site tidak boleh kosong"))]
    pub nama_site: Option<String>,

    #[validate(length(min = 1, message = "Alamat site tidak boleh kosong"))]
    pub alamat_site: Option<String>,

    pub koordinat_site: Option<Coordinate>,

    pub tanggal_checklist: Option<NaiveDate>,

    pub lokasi: Option<LocationCategory>,
}

impl From<UpdateSiteDto> for SiteUpdate {
    fn from(dto: UpdateSiteDto) -> Self {
        Self {
            nomor_urut: dto.nomor_urut,
            nama_site: dto.nama_site,
            alamat_site: dto.alamat_site,
            koordinat_site: dto.koordinat_site,
            tanggal_checklist: dto.tanggal_checklist,
            lokasi: dto.lokasi,
        }
    }
}
