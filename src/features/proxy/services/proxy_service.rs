use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::dtos::{
    ChecklistItemQuery, CreateChecklistItemDto, UpdateChecklistItemDto,
};
use crate::features::checklists::ChecklistService;
use crate::features::proxy::dtos::{OneOrMany, ResourceListQuery, ResourceRecord, ResourceRows};
use crate::features::proxy::resource::Resource;
use crate::features::sites::dtos::{CreateSiteDto, SiteListQuery, UpdateSiteDto};
use crate::features::sites::SiteService;
use crate::modules::supabase::RecordStore;

/// Typed pass-through over the allow-listed tables
pub struct ProxyService {
    store: Arc<dyn RecordStore>,
    sites: SiteService,
    checklists: ChecklistService,
    ping_message: String,
}

fn parse_body<T: DeserializeOwned>(resource: Resource, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} payload: {}", resource, e)))
}

impl ProxyService {
    pub fn new(store: Arc<dyn RecordStore>, ping_message: impl Into<String>) -> Self {
        Self {
            sites: SiteService::new(store.clone()),
            checklists: ChecklistService::new(store.clone()),
            store,
            ping_message: ping_message.into(),
        }
    }

    pub fn ping_message(&self) -> &str {
        &self.ping_message
    }

    pub async fn test_connection(&self) -> Result<()> {
        self.store.ping().await.inspect_err(|e| {
            tracing::error!("Supabase connectivity check failed: {}", e);
        })
    }

    pub async fn list(&self, resource: Resource, query: ResourceListQuery) -> Result<ResourceRows> {
        match resource {
            Resource::Sites => {
                let query = SiteListQuery {
                    nomor_urut: query.nomor_urut,
                    limit: query.limit,
                };
                Ok(ResourceRows::Sites(self.sites.list(&query).await?))
            }
            Resource::ChecklistItems => {
                let query = ChecklistItemQuery {
                    site_id: query.site_id,
                };
                Ok(ResourceRows::ChecklistItems(
                    self.checklists.list_items(&query).await?,
                ))
            }
        }
    }

    /// Creates one site, or one or more checklist items in a single batch
    pub async fn create(&self, resource: Resource, body: Value) -> Result<ResourceRows> {
        let rows = match resource {
            Resource::Sites => {
                let dto: CreateSiteDto = parse_body(resource, body)?;
                ResourceRows::Sites(vec![self.sites.create(dto).await?])
            }
            Resource::ChecklistItems => {
                let dtos: OneOrMany<CreateChecklistItemDto> = parse_body(resource, body)?;
                ResourceRows::ChecklistItems(self.checklists.create_items(dtos.into()).await?)
            }
        };

        tracing::info!("Created {} row(s) in {}", rows.len(), resource);
        Ok(rows)
    }

    /// Single-row reads exist for `sites` only
    pub async fn get(&self, resource: Resource, id: Uuid) -> Result<ResourceRecord> {
        match resource {
            Resource::Sites => Ok(ResourceRecord::Site(self.sites.get(id).await?)),
            Resource::ChecklistItems => Err(AppError::BadRequest(format!(
                "Single-row reads are not supported for {}",
                resource
            ))),
        }
    }

    pub async fn update(&self, resource: Resource, id: Uuid, body: Value) -> Result<ResourceRecord> {
        match resource {
            Resource::Sites => {
                let dto: UpdateSiteDto = parse_body(resource, body)?;
                Ok(ResourceRecord::Site(self.sites.update(id, dto).await?))
            }
            Resource::ChecklistItems => {
                let dto: UpdateChecklistItemDto = parse_body(resource, body)?;
                Ok(ResourceRecord::ChecklistItem(
                    self.checklists.update_item(id, dto).await?,
                ))
            }
        }
    }

    pub async fn delete(&self, resource: Resource, id: Uuid) -> Result<()> {
        match resource {
            Resource::Sites => self.sites.delete(id).await?,
            Resource::ChecklistItems => self.checklists.delete_item(id).await?,
        }

        tracing::info!("Deleted {} from {}", id, resource);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sites::models::Coordinate;
    use crate::shared::test_helpers::{sample_site, MemoryRecordStore};
    use serde_json::json;

    fn service_with(store: Arc<MemoryRecordStore>) -> ProxyService {
        ProxyService::new(store, "pong")
    }

    #[tokio::test]
    async fn test_list_sites_applies_sequence_filter() {
        let coordinate = Coordinate::new(-6.2, 106.8);
        let store = Arc::new(MemoryRecordStore::with_sites(vec![
            sample_site(7, 30, coordinate),
            sample_site(8, 20, coordinate),
            sample_site(7, 10, coordinate),
        ]));
        let service = service_with(store);

        let rows = service
            .list(
                Resource::Sites,
                ResourceListQuery {
                    nomor_urut: Some("7".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        match rows {
            ResourceRows::Sites(sites) => {
                assert_eq!(sites.len(), 2);
                assert!(sites.iter().all(|s| s.nomor_urut == 7));
            }
            other => panic!("unexpected rows: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_checklist_items_accepts_array() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = service_with(store.clone());
        let site_id = Uuid::new_v4();

        let rows = service
            .create(
                Resource::ChecklistItems,
                json!([
                    { "siteId": site_id, "nomorItem": 1, "material": "Busbar" },
                    { "siteId": site_id, "nomorItem": 2, "material": "Cadwel di tiap kaki tower", "kondisi": "sedang" }
                ]),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(store.item_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_create_site_rejects_malformed_body() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = service_with(store.clone());

        let err = service
            .create(Resource::Sites, json!({ "namaSite": "PT X" }))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_site_changes_named_fields() {
        let site = sample_site(1, 0, Coordinate::new(-6.2, 106.8));
        let id = site.id;
        let store = Arc::new(MemoryRecordStore::with_sites(vec![site]));
        let service = service_with(store.clone());

        let record = service
            .update(Resource::Sites, id, json!({ "namaSite": "PT BARU" }))
            .await
            .unwrap();

        assert!(matches!(record, ResourceRecord::Site(ref s) if s.nama_site == "PT BARU"));
        assert_eq!(store.stored_sites()[0].nama_site, "PT BARU");
    }
}
