//! Data-entry form: site fields plus the 13-row equipment checklist.
//!
//! Template fields (`nomor`, `material`, `spesifikasi`) come from
//! [`CHECKLIST_TEMPLATE`] and cannot be edited; each row only carries a
//! mutable [`ChecklistAnnotation`] joined to the template by index.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::checklists::models::{ChecklistItem, Condition, NewChecklistItem};
use crate::features::checklists::template::{
    ChecklistTemplateEntry, CHECKLIST_LEN, CHECKLIST_TEMPLATE,
};
use crate::features::sites::models::{Coordinate, LocationCategory, NewSite, Site};
use crate::modules::supabase::RecordStore;
use crate::shared::constants::{
    FORM_RESET_DELAY, MSG_REQUIRED_SITE_FIELDS, MSG_SUBMIT_FAILED, MSG_SUBMIT_SUCCESS,
};
use crate::shared::validation::{parse_decimal, parse_integer};

/// Site part of the form, kept as typed so validation can tell empty and
/// malformed input apart.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFields {
    pub nomor_urut: String,
    pub nama_site: String,
    pub alamat_site: String,
    pub lat: String,
    pub lng: String,
    pub tanggal_checklist: NaiveDate,
    pub lokasi: LocationCategory,
}

impl Default for SiteFields {
    fn default() -> Self {
        Self {
            nomor_urut: String::new(),
            nama_site: String::new(),
            alamat_site: String::new(),
            lat: String::new(),
            lng: String::new(),
            tanggal_checklist: Utc::now().date_naive(),
            lokasi: LocationCategory::default(),
        }
    }
}

/// User-editable part of a checklist row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistAnnotation {
    pub condition: Condition,
    pub remark: String,
}

/// A template entry joined with its annotation
#[derive(Debug, Clone, Copy)]
pub struct ChecklistRow<'a> {
    pub template: &'static ChecklistTemplateEntry,
    pub annotation: &'a ChecklistAnnotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowField {
    Condition(Condition),
    Remark(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Checklist row {index} is out of range (0..{len})")]
    RowOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("Site could not be created: {0}")]
    SiteRejected(AppError),

    /// The site exists but its checklist does not. `rolled_back` tells
    /// whether the compensating delete of the site succeeded.
    #[error("Checklist items for site {site_id} could not be created (rolled back: {rolled_back}): {source}")]
    ItemsRejected {
        site_id: Uuid,
        rolled_back: bool,
        source: AppError,
    },
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(msg) => AppError::Validation(msg),
            SubmitError::SiteRejected(source) => source,
            partial @ SubmitError::ItemsRejected { .. } => {
                AppError::PartialWrite(partial.to_string())
            }
        }
    }
}

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct SubmittedChecklist {
    pub site: Site,
    pub items: Vec<ChecklistItem>,
}

/// Form controller: `Idle → Submitting → Success | Failed`
#[derive(Debug)]
pub struct ChecklistForm {
    pub site: SiteFields,
    annotations: [ChecklistAnnotation; CHECKLIST_LEN],
    status: FormStatus,
}

impl Default for ChecklistForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecklistForm {
    pub fn new() -> Self {
        Self {
            site: SiteFields::default(),
            annotations: Default::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Banner text for the current status, if any
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Success { message } | FormStatus::Failed { message } => Some(message),
            FormStatus::Idle | FormStatus::Submitting => None,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = ChecklistRow<'_>> {
        CHECKLIST_TEMPLATE
            .iter()
            .zip(self.annotations.iter())
            .map(|(template, annotation)| ChecklistRow {
                template,
                annotation,
            })
    }

    pub fn row(&self, index: usize) -> Result<ChecklistRow<'_>, FormError> {
        let annotation = self.annotations.get(index).ok_or(FormError::RowOutOfRange {
            index,
            len: CHECKLIST_LEN,
        })?;
        Ok(ChecklistRow {
            template: &CHECKLIST_TEMPLATE[index],
            annotation,
        })
    }

    pub fn set_row_field(&mut self, index: usize, field: RowField) -> Result<(), FormError> {
        let annotation = self
            .annotations
            .get_mut(index)
            .ok_or(FormError::RowOutOfRange {
                index,
                len: CHECKLIST_LEN,
            })?;

        match field {
            RowField::Condition(condition) => annotation.condition = condition,
            RowField::Remark(remark) => annotation.remark = remark,
        }
        Ok(())
    }

    /// Back to template defaults and `Idle`
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Checks required fields and parses the numeric ones
    fn parse_site(&self) -> Result<NewSite, String> {
        let fields = &self.site;
        let required = [
            &fields.nomor_urut,
            &fields.nama_site,
            &fields.alamat_site,
            &fields.lat,
            &fields.lng,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(MSG_REQUIRED_SITE_FIELDS.to_string());
        }

        let nomor_urut = parse_integer(&fields.nomor_urut)
            .ok_or_else(|| "Nomor urut harus berupa angka".to_string())?;
        let lat =
            parse_decimal(&fields.lat).ok_or_else(|| "Latitude harus berupa angka".to_string())?;
        let lng =
            parse_decimal(&fields.lng).ok_or_else(|| "Longitude harus berupa angka".to_string())?;

        Ok(NewSite {
            nomor_urut,
            nama_site: fields.nama_site.trim().to_string(),
            alamat_site: fields.alamat_site.trim().to_string(),
            koordinat_site: Coordinate::new(lat, lng),
            tanggal_checklist: fields.tanggal_checklist,
            lokasi: fields.lokasi,
        })
    }

    fn checklist_payload(&self, site_id: Uuid) -> Vec<NewChecklistItem> {
        self.rows()
            .map(|row| NewChecklistItem {
                site_id,
                nomor_item: row.template.nomor,
                material: row.template.material.to_string(),
                spesifikasi: row.template.spesifikasi.to_string(),
                kondisi: row.annotation.condition,
                keterangan: row.annotation.remark.clone(),
            })
            .collect()
    }

    fn fail(&mut self, message: &str) {
        self.status = FormStatus::Failed {
            message: message.to_string(),
        };
    }

    /// Creates the site, then its 13 checklist items in one batch.
    ///
    /// Entered data is kept on failure. If the items cannot be stored the
    /// freshly created site is deleted again.
    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
    ) -> Result<SubmittedChecklist, SubmitError> {
        let new_site = match self.parse_site() {
            Ok(site) => site,
            Err(message) => {
                self.fail(&message);
                return Err(SubmitError::Validation(message));
            }
        };

        self.status = FormStatus::Submitting;

        let site = match store.insert_site(&new_site).await {
            Ok(site) => site,
            Err(e) => {
                tracing::error!("Error submitting form (site): {}", e);
                self.fail(MSG_SUBMIT_FAILED);
                return Err(SubmitError::SiteRejected(e));
            }
        };

        let payload = self.checklist_payload(site.id);
        let items = match store.insert_checklist_items(&payload).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    "Error submitting form (checklist items for site {}): {}",
                    site.id,
                    e
                );
                let rolled_back = match store.delete_site(site.id).await {
                    Ok(()) => true,
                    Err(delete_err) => {
                        tracing::error!(
                            "Failed to roll back site {} after checklist error: {}",
                            site.id,
                            delete_err
                        );
                        false
                    }
                };
                self.fail(MSG_SUBMIT_FAILED);
                return Err(SubmitError::ItemsRejected {
                    site_id: site.id,
                    rolled_back,
                    source: e,
                });
            }
        };

        self.status = FormStatus::Success {
            message: MSG_SUBMIT_SUCCESS.to_string(),
        };
        Ok(SubmittedChecklist { site, items })
    }

    /// After a success, waits [`FORM_RESET_DELAY`] and resets the form.
    /// Does nothing in any other state.
    pub async fn settle(&mut self) {
        if !matches!(self.status, FormStatus::Success { .. }) {
            return;
        }
        tokio::time::sleep(FORM_RESET_DELAY).await;
        if matches!(self.status, FormStatus::Success { .. }) {
            self.reset();
        }
    }
}
