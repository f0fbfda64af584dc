use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::checklists::dtos::{
    ChecklistItemQuery, ChecklistItemResponseDto, ChecklistSubmissionDto, ChecklistTemplateRowDto,
    CreateChecklistItemDto, SubmitChecklistDto, UpdateChecklistItemDto,
};
use crate::features::checklists::form::{ChecklistForm, RowField};
use crate::features::checklists::models::{ChecklistItemUpdate, NewChecklistItem};
use crate::features::checklists::template::CHECKLIST_TEMPLATE;
use crate::modules::supabase::RecordStore;

/// Service for checklist submissions and the `checklist_items` resource
pub struct ChecklistService {
    store: Arc<dyn RecordStore>,
}

impl ChecklistService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn template(&self) -> Vec<ChecklistTemplateRowDto> {
        CHECKLIST_TEMPLATE.iter().map(Into::into).collect()
    }

    /// Runs one form submission: validate, create the site, create its items
    pub async fn submit(&self, dto: SubmitChecklistDto) -> Result<ChecklistSubmissionDto> {
        let mut form = ChecklistForm::new();
        form.site = dto.site.into();

        for row in dto.items {
            let index = usize::try_from(row.nomor_item)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| {
                    AppError::Validation(format!("Nomor item tidak dikenal: {}", row.nomor_item))
                })?;
            if let Some(kondisi) = row.kondisi {
                form.set_row_field(index, RowField::Condition(kondisi))
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
            if let Some(keterangan) = row.keterangan {
                form.set_row_field(index, RowField::Remark(keterangan))
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
        }

        let submitted = form.submit(self.store.as_ref()).await?;
        tracing::info!(
            "Checklist submitted: site_id={}, items={}",
            submitted.site.id,
            submitted.items.len()
        );
        Ok(submitted.into())
    }

    pub async fn list_items(&self, query: &ChecklistItemQuery) -> Result<Vec<ChecklistItemResponseDto>> {
        let items = self.store.list_checklist_items(query.site_id).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Inserts the given items as one batch
    pub async fn create_items(
        &self,
        dtos: Vec<CreateChecklistItemDto>,
    ) -> Result<Vec<ChecklistItemResponseDto>> {
        if dtos.is_empty() {
            return Err(AppError::BadRequest("No checklist items given".to_string()));
        }
        for dto in &dtos {
            dto.validate()
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let items: Vec<NewChecklistItem> = dtos.into_iter().map(Into::into).collect();
        let created = self.store.insert_checklist_items(&items).await?;
        Ok(created.into_iter().map(Into::into).collect())
    }

    pub async fn update_item(
        &self,
        id: Uuid,
        dto: UpdateChecklistItemDto,
    ) -> Result<ChecklistItemResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let patch: ChecklistItemUpdate = dto.into();
        if patch.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let item = self.store.update_checklist_item(id, &patch).await?;
        Ok(item.into())
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<()> {
        self.store.delete_checklist_item(id).await
    }
}
