use thiserror::Error;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::sites::models::Site;
use crate::modules::supabase::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Site {0} is not in the current list")]
    UnknownSite(Uuid),
}

/// In-memory list of sites with single-selection state.
///
/// The selection always refers to a site of the last loaded collection, or
/// is empty.
#[derive(Debug, Default)]
pub struct SiteDirectory {
    sites: Vec<Site>,
    selected: Option<Uuid>,
    last_error: Option<String>,
}

impl SiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection with a fresh fetch.
    ///
    /// On failure the previous collection is kept and the error is recorded
    /// in [`SiteDirectory::last_error`]. No retry.
    pub async fn load(&mut self, store: &dyn RecordStore) -> Result<()> {
        match store.list_sites(None).await {
            Ok(sites) => {
                self.replace(sites);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching sites: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Installs `sites` ordered newest first and drops a selection whose
    /// site is gone.
    pub fn replace(&mut self, mut sites: Vec<Site>) {
        sites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.sites = sites;

        if let Some(id) = self.selected {
            if self.get(id).is_none() {
                tracing::debug!("Selected site {} no longer present, clearing selection", id);
                self.selected = None;
            }
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Exact match on the string form of `nomor_urut`; an empty query
    /// returns everything. Duplicated numbers all match.
    pub fn filter_by_sequence_number(&self, query: &str) -> Vec<&Site> {
        if query.is_empty() {
            return self.sites.iter().collect();
        }

        self.sites
            .iter()
            .filter(|site| site.nomor_urut.to_string() == query)
            .collect()
    }

    /// Sets (or with `None`, clears) the selected site.
    pub fn select(&mut self, id: Option<Uuid>) -> std::result::Result<Option<&Site>, DirectoryError> {
        match id {
            None => {
                self.selected = None;
                Ok(None)
            }
            Some(id) => {
                let index = self
                    .sites
                    .iter()
                    .position(|site| site.id == id)
                    .ok_or(DirectoryError::UnknownSite(id))?;
                self.selected = Some(id);
                Ok(self.sites.get(index))
            }
        }
    }

    pub fn selected(&self) -> Option<&Site> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
