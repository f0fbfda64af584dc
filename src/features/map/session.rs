use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::map::error::MapError;
use crate::features::map::markers::{MarkerLayer, SyncReport};
use crate::features::map::svg::{render_empty_state, SvgSurface, Viewport};
use crate::features::sites::models::Site;
use crate::features::sites::SiteDirectory;
use crate::modules::supabase::RecordStore;
use crate::shared::constants::{MSG_MAP_UNAVAILABLE, MSG_NO_SITES};

/// Map panel state. Once unavailable it stays that way for the session.
#[derive(Debug)]
pub enum MapPanel {
    Ready(MarkerLayer<SvgSurface>),
    Unavailable(String),
}

/// One map page view: a site list with selection plus its marker layer
#[derive(Debug)]
pub struct MapSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    directory: SiteDirectory,
    panel: MapPanel,
    viewport: Viewport,
}

impl MapSession {
    pub fn new(viewport: Viewport) -> Self {
        let panel = match SvgSurface::new(viewport) {
            Ok(surface) => MapPanel::Ready(MarkerLayer::new(surface)),
            Err(e) => {
                tracing::warn!("Map surface could not be initialised: {}", e);
                MapPanel::Unavailable(MSG_MAP_UNAVAILABLE.to_string())
            }
        };

        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            directory: SiteDirectory::new(),
            panel,
            viewport,
        }
    }

    pub fn directory(&self) -> &SiteDirectory {
        &self.directory
    }

    pub fn panel(&self) -> &MapPanel {
        &self.panel
    }

    pub fn is_map_available(&self) -> bool {
        matches!(self.panel, MapPanel::Ready(_))
    }

    /// Reloads the site list and diffs the markers against it.
    ///
    /// When the fetch fails the previous list and markers stay as they were.
    pub async fn refresh(&mut self, store: &dyn RecordStore) -> Result<SyncReport> {
        self.directory.load(store).await?;

        Ok(match &mut self.panel {
            MapPanel::Ready(layer) => layer.sync(self.directory.sites()),
            MapPanel::Unavailable(_) => SyncReport::default(),
        })
    }

    /// Selection shared by list clicks and marker clicks
    pub fn select(&mut self, site_id: Option<Uuid>) -> std::result::Result<Option<&Site>, MapError> {
        if let Some(id) = site_id {
            if self.directory.get(id).is_none() {
                return Err(MapError::UnknownSite(id));
            }
        }
        if let MapPanel::Ready(layer) = &mut self.panel {
            layer.select(site_id)?;
        }
        Ok(self.directory.select(site_id)?)
    }

    pub fn render_svg(&self) -> String {
        match &self.panel {
            MapPanel::Unavailable(message) => render_empty_state(self.viewport, message),
            MapPanel::Ready(_) if self.directory.is_empty() => {
                render_empty_state(self.viewport, MSG_NO_SITES)
            }
            MapPanel::Ready(layer) => layer.surface().render(),
        }
    }
}
