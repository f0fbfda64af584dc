use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Geographic position stored in `sites.koordinat_site` as `{lat, lng}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Only finiteness is checked; there is no range validation.
    pub fn ensure_finite(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Koordinat harus berupa angka yang valid".to_string(),
            ))
        }
    }

    /// Link-out to Google Maps for "Lihat Lokasi"
    pub fn maps_url(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.lat, self.lng)
    }
}

/// Placement context of a site (kolom `lokasi`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LocationCategory {
    #[default]
    P,
    K,
    S,
    PK,
    JU,
    JL,
    JT,
}

impl LocationCategory {
    pub const ALL: [LocationCategory; 7] = [
        LocationCategory::P,
        LocationCategory::K,
        LocationCategory::S,
        LocationCategory::PK,
        LocationCategory::JU,
        LocationCategory::JL,
        LocationCategory::JT,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::P => "P",
            LocationCategory::K => "K",
            LocationCategory::S => "S",
            LocationCategory::PK => "PK",
            LocationCategory::JU => "JU",
            LocationCategory::JL => "JL",
            LocationCategory::JT => "JT",
        }
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        LocationCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Lokasi tidak dikenal: {}", s)))
    }
}

/// A recorded tower site, as stored in the `sites` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub nomor_urut: i64,
    pub nama_site: String,
    pub alamat_site: String,
    pub koordinat_site: Coordinate,
    pub tanggal_checklist: NaiveDate,
    pub lokasi: LocationCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `sites`; id and timestamps are assigned by the service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSite {
    pub nomor_urut: i64,
    pub nama_site: String,
    pub alamat_site: String,
    pub koordinat_site: Coordinate,
    pub tanggal_checklist: NaiveDate,
    pub lokasi: LocationCategory,
}

/// Partial update payload for `sites`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_urut: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub koordinat_site: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_checklist: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lokasi: Option<LocationCategory>,
}

impl SiteUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SiteUpdate::default()
    }
}
