use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::map::markers::{Marker, MarkerStyle, SyncReport};
use crate::features::map::session::{MapPanel, MapSession};
use crate::features::map::svg::Viewport;
use crate::features::sites::dtos::SiteResponseDto;

/// Size of the map drawing area for a new session
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ViewportQuery {
    /// Width in SVG units (default 1200)
    pub width: Option<u32>,
    /// Height in SVG units (default 500)
    pub height: Option<u32>,
}

impl From<ViewportQuery> for Viewport {
    fn from(query: ViewportQuery) -> Self {
        let defaults = Viewport::default();
        Self {
            width: query.width.unwrap_or(defaults.width),
            height: query.height.unwrap_or(defaults.height),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDto {
    pub site_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub style: MarkerStyle,
}

impl From<&Marker> for MarkerDto {
    fn from(marker: &Marker) -> Self {
        Self {
            site_id: marker.site_id,
            lat: marker.position.lat,
            lng: marker.position.lng,
            label: marker.label.clone(),
            style: marker.style,
        }
    }
}

/// Current state of a map page view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapSessionDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub map_available: bool,
    /// Empty-state text when the map panel cannot be shown
    pub map_message: Option<String>,
    pub sites: Vec<SiteResponseDto>,
    pub markers: Vec<MarkerDto>,
    pub selected: Option<SiteResponseDto>,
    /// Set when the last site fetch failed
    pub load_error: Option<String>,
}

impl From<&MapSession> for MapSessionDto {
    fn from(session: &MapSession) -> Self {
        let (markers, map_message): (Vec<MarkerDto>, Option<String>) = match session.panel() {
            MapPanel::Ready(layer) => (
                layer.surface().markers().iter().map(Into::into).collect(),
                None,
            ),
            MapPanel::Unavailable(message) => (Vec::new(), Some(message.clone())),
        };
        let directory = session.directory();

        Self {
            id: session.id,
            created_at: session.created_at,
            map_available: session.is_map_available(),
            map_message,
            sites: directory.sites().iter().map(Into::into).collect(),
            markers,
            selected: directory.selected().map(Into::into),
            load_error: directory.last_error().map(str::to_string),
        }
    }
}

/// Select a site, or clear the selection with `null`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectSiteDto {
    pub site_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapRefreshDto {
    pub report: SyncReport,
    pub session: MapSessionDto,
}
