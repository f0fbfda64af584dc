use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::sites::directory::SiteDirectory;
use crate::features::sites::dtos::{CreateSiteDto, SiteListQuery, SiteResponseDto, UpdateSiteDto};
use crate::features::sites::models::SiteUpdate;
use crate::modules::supabase::RecordStore;

/// Service for the `sites` resource
pub struct SiteService {
    store: Arc<dyn RecordStore>,
}

impl SiteService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// List sites newest first, optionally filtered by sequence number
    pub async fn list(&self, query: &SiteListQuery) -> Result<Vec<SiteResponseDto>> {
        let mut directory = SiteDirectory::new();
        directory.load(self.store.as_ref()).await?;

        let filter = query.nomor_urut.as_deref().unwrap_or_default();
        let sites = directory.filter_by_sequence_number(filter);
        let limit = query.limit.unwrap_or(sites.len());

        Ok(sites.into_iter().take(limit).map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<SiteResponseDto> {
        self.store
            .get_site(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Site {} not found", id)))
    }

    pub async fn create(&self, dto: CreateSiteDto) -> Result<SiteResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        dto.koordinat_site.ensure_finite()?;

        let site = self.store.insert_site(&dto.into()).await?;
        Ok(site.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateSiteDto) -> Result<SiteResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(coordinate) = &dto.koordinat_site {
            coordinate.ensure_finite()?;
        }

        let patch: SiteUpdate = dto.into();
        if patch.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let site = self.store.update_site(id, &patch).await?;
        tracing::info!("Site updated: id={}", site.id);
        Ok(site.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_site(id).await
    }
}
