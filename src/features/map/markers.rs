//! Map Marker Synchronizer.
//!
//! Keeps exactly one marker per site on a [`MapSurface`]. Collection
//! changes are applied as a diff and selection changes restyle at most two
//! markers, so a surface never has to be rebuilt.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::map::error::MapError;
use crate::features::sites::models::{Coordinate, Site};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    #[default]
    Default,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub site_id: Uuid,
    pub position: Coordinate,
    pub label: String,
    pub style: MarkerStyle,
}

/// Something markers can be drawn on
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker);

    fn remove_marker(&mut self, site_id: Uuid);

    fn move_marker(&mut self, site_id: Uuid, position: Coordinate);

    fn relabel_marker(&mut self, site_id: Uuid, label: &str);

    fn set_marker_style(&mut self, site_id: Uuid, style: MarkerStyle);
}

/// What one [`MarkerLayer::sync`] did to the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub relabeled: usize,
    pub kept: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Placement {
    position: Coordinate,
    label: String,
}

/// Marker bookkeeping on top of a surface
#[derive(Debug)]
pub struct MarkerLayer<S> {
    surface: S,
    placed: HashMap<Uuid, Placement>,
    selected: Option<Uuid>,
}

impl<S: MapSurface> MarkerLayer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            placed: HashMap::new(),
            selected: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// Brings the surface in line with `sites`.
    ///
    /// Markers of departed sites are removed, new sites get a marker and
    /// surviving markers are only moved or relabeled when their site changed.
    /// A selection whose site departed is dropped.
    pub fn sync(&mut self, sites: &[Site]) -> SyncReport {
        let mut report = SyncReport::default();

        let departed: Vec<Uuid> = self
            .placed
            .keys()
            .filter(|id| !sites.iter().any(|site| site.id == **id))
            .copied()
            .collect();
        for id in departed {
            self.placed.remove(&id);
            self.surface.remove_marker(id);
            report.removed += 1;
            if self.selected == Some(id) {
                self.selected = None;
            }
        }

        for site in sites {
            match self.placed.get_mut(&site.id) {
                None => {
                    self.surface.add_marker(Marker {
                        site_id: site.id,
                        position: site.koordinat_site,
                        label: site.nama_site.clone(),
                        style: MarkerStyle::Default,
                    });
                    self.placed.insert(
                        site.id,
                        Placement {
                            position: site.koordinat_site,
                            label: site.nama_site.clone(),
                        },
                    );
                    report.added += 1;
                }
                Some(placement) => {
                    let mut touched = false;
                    if placement.position != site.koordinat_site {
                        placement.position = site.koordinat_site;
                        self.surface.move_marker(site.id, site.koordinat_site);
                        report.moved += 1;
                        touched = true;
                    }
                    if placement.label != site.nama_site {
                        placement.label = site.nama_site.clone();
                        self.surface.relabel_marker(site.id, &site.nama_site);
                        report.relabeled += 1;
                        touched = true;
                    }
                    if !touched {
                        report.kept += 1;
                    }
                }
            }
        }

        tracing::debug!(
            "Markers synced: added={}, removed={}, moved={}, relabeled={}, kept={}",
            report.added,
            report.removed,
            report.moved,
            report.relabeled,
            report.kept
        );
        report
    }

    /// Moves the highlight to `site_id`, or clears it with `None`.
    ///
    /// Only the previously and newly selected markers are restyled.
    pub fn select(&mut self, site_id: Option<Uuid>) -> Result<(), MapError> {
        if let Some(id) = site_id {
            if !self.placed.contains_key(&id) {
                return Err(MapError::UnknownSite(id));
            }
        }
        if site_id == self.selected {
            return Ok(());
        }

        if let Some(previous) = self.selected.take() {
            self.surface.set_marker_style(previous, MarkerStyle::Default);
        }
        if let Some(id) = site_id {
            self.surface.set_marker_style(id, MarkerStyle::Selected);
        }
        self.selected = site_id;
        Ok(())
    }
}
