use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::models::{
    ChecklistItem, ChecklistItemUpdate, Condition, ConditionRow, NewChecklistItem,
};
use crate::features::sites::models::{NewSite, Site, SiteUpdate};
use crate::modules::supabase::PostgrestClient;

pub const SITES_TABLE: &str = "sites";
pub const CHECKLIST_ITEMS_TABLE: &str = "checklist_items";

/// Typed access to the `sites` and `checklist_items` tables
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Sites ordered by `created_at` descending
    async fn list_sites(&self, limit: Option<usize>) -> Result<Vec<Site>>;

    async fn get_site(&self, id: Uuid) -> Result<Option<Site>>;

    async fn insert_site(&self, site: &NewSite) -> Result<Site>;

    async fn update_site(&self, id: Uuid, patch: &SiteUpdate) -> Result<Site>;

    async fn delete_site(&self, id: Uuid) -> Result<()>;

    /// Items of one site ordered by `nomor_item`, or every item newest first
    async fn list_checklist_items(&self, site_id: Option<Uuid>) -> Result<Vec<ChecklistItem>>;

    /// `kondisi` of every checklist item
    async fn list_conditions(&self) -> Result<Vec<Condition>>;

    /// Inserts the whole batch in one request
    async fn insert_checklist_items(
        &self,
        items: &[NewChecklistItem],
    ) -> Result<Vec<ChecklistItem>>;

    async fn update_checklist_item(
        &self,
        id: Uuid,
        patch: &ChecklistItemUpdate,
    ) -> Result<ChecklistItem>;

    async fn delete_checklist_item(&self, id: Uuid) -> Result<()>;

    /// Connectivity check against the data service
    async fn ping(&self) -> Result<()>;
}

/// [`RecordStore`] backed by Supabase PostgREST
pub struct SupabaseRecordStore {
    client: PostgrestClient,
}

impl SupabaseRecordStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

fn first_row<T>(rows: Vec<T>, table: &str, id: Option<Uuid>) -> Result<T> {
    rows.into_iter().next().ok_or_else(|| match id {
        Some(id) => AppError::NotFound(format!("Record {} not found in {}", id, table)),
        None => AppError::ExternalServiceError(format!("Data service returned no rows for {}", table)),
    })
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn list_sites(&self, limit: Option<usize>) -> Result<Vec<Site>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        self.client.select(SITES_TABLE, &query).await
    }

    async fn get_site(&self, id: Uuid) -> Result<Option<Site>> {
        let rows: Vec<Site> = self
            .client
            .select(
                SITES_TABLE,
                &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn insert_site(&self, site: &NewSite) -> Result<Site> {
        let rows = self.client.insert(SITES_TABLE, std::slice::from_ref(site)).await?;
        let site: Site = first_row(rows, SITES_TABLE, None)?;

        tracing::info!("Site created: id={}, nomor_urut={}", site.id, site.nomor_urut);
        Ok(site)
    }

    async fn update_site(&self, id: Uuid, patch: &SiteUpdate) -> Result<Site> {
        let rows = self.client.update(SITES_TABLE, id, patch).await?;
        first_row(rows, SITES_TABLE, Some(id))
    }

    async fn delete_site(&self, id: Uuid) -> Result<()> {
        self.client.delete(SITES_TABLE, id).await?;
        tracing::info!("Site deleted: id={}", id);
        Ok(())
    }

    async fn list_checklist_items(&self, site_id: Option<Uuid>) -> Result<Vec<ChecklistItem>> {
        let mut query = vec![("select", "*".to_string())];
        match site_id {
            Some(site_id) => {
                query.push(("site_id", format!("eq.{}", site_id)));
                query.push(("order", "nomor_item.asc".to_string()));
            }
            None => query.push(("order", "created_at.desc".to_string())),
        }

        self.client.select(CHECKLIST_ITEMS_TABLE, &query).await
    }

    async fn list_conditions(&self) -> Result<Vec<Condition>> {
        let rows: Vec<ConditionRow> = self
            .client
            .select(CHECKLIST_ITEMS_TABLE, &[("select", "kondisi".to_string())])
            .await?;

        Ok(rows.into_iter().map(|row| row.kondisi).collect())
    }

    async fn insert_checklist_items(
        &self,
        items: &[NewChecklistItem],
    ) -> Result<Vec<ChecklistItem>> {
        let rows: Vec<ChecklistItem> = self.client.insert(CHECKLIST_ITEMS_TABLE, items).await?;
        tracing::info!("Checklist items created: count={}", rows.len());
        Ok(rows)
    }

    async fn update_checklist_item(
        &self,
        id: Uuid,
        patch: &ChecklistItemUpdate,
    ) -> Result<ChecklistItem> {
        let rows = self.client.update(CHECKLIST_ITEMS_TABLE, id, patch).await?;
        first_row(rows, CHECKLIST_ITEMS_TABLE, Some(id))
    }

    async fn delete_checklist_item(&self, id: Uuid) -> Result<()> {
        self.client.delete(CHECKLIST_ITEMS_TABLE, id).await
    }

    async fn ping(&self) -> Result<()> {
        let _: Vec<serde_json::Value> = self
            .client
            .select(
                SITES_TABLE,
                &[("select", "id".to_string()), ("limit", "1".to_string())],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sites::models::{Coordinate, LocationCategory};
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SITE_ID: &str = "0b6f7c1e-3a52-4d0e-9a55-7d1f1f0e2c11";

    async fn setup() -> (MockServer, SupabaseRecordStore) {
        let server = MockServer::start().await;
        let client = PostgrestClient::from_reqwest(&server.uri(), "anon-key", reqwest::Client::new());
        (server, SupabaseRecordStore::new(client))
    }

    fn site_row() -> serde_json::Value {
        json!({
            "id": SITE_ID,
            "nomor_urut": 7,
            "nama_site": "PT PROTELINDO",
            "alamat_site": "Jl. Sudirman No. 1",
            "koordinat_site": { "lat": -6.2088, "lng": 106.8456 },
            "tanggal_checklist": "2025-01-15",
            "lokasi": "P",
            "created_at": "2025-01-15T08:30:00+00:00",
            "updated_at": "2025-01-15T08:30:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_list_sites_orders_by_created_at_and_sends_keys() {
        let (server, store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .and(query_param("select", "*"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "5"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([site_row()])))
            .mount(&server)
            .await;

        let sites = store.list_sites(Some(5)).await.unwrap();

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].nama_site, "PT PROTELINDO");
    }

    #[tokio::test]
    async fn test_insert_site_posts_array_and_returns_created_row() {
        let (server, store) = setup().await;

        let new_site = NewSite {
            nomor_urut: 7,
            nama_site: "PT PROTELINDO".to_string(),
            alamat_site: "Jl. Sudirman No. 1".to_string(),
            koordinat_site: Coordinate::new(-6.2088, 106.8456),
            tanggal_checklist: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            lokasi: LocationCategory::P,
        };

        Mock::given(method("POST"))
            .and(path("/rest/v1/sites"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([{
                "nomor_urut": 7,
                "nama_site": "PT PROTELINDO",
                "alamat_site": "Jl. Sudirman No. 1",
                "koordinat_site": { "lat": -6.2088, "lng": 106.8456 },
                "tanggal_checklist": "2025-01-15",
                "lokasi": "P"
            }])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([site_row()])))
            .expect(1)
            .mount(&server)
            .await;

        let site = store.insert_site(&new_site).await.unwrap();

        assert_eq!(site.id.to_string(), SITE_ID);
    }

    #[tokio::test]
    async fn test_service_error_message_is_passed_through() {
        let (server, store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/checklist_items"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid API key",
                "code": "PGRST301",
                "details": null,
                "hint": null
            })))
            .mount(&server)
            .await;

        let err = store.list_conditions().await.unwrap_err();

        match err {
            AppError::ExternalServiceError(msg) => assert_eq!(msg, "Invalid API key"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_conditions_selects_only_kondisi() {
        let (server, store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/checklist_items"))
            .and(query_param("select", "kondisi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "kondisi": "baik" },
                { "kondisi": "buruk" }
            ])))
            .mount(&server)
            .await;

        let conditions = store.list_conditions().await.unwrap();

        assert_eq!(conditions, vec![Condition::Good, Condition::Poor]);
    }

    #[tokio::test]
    async fn test_update_with_no_matching_row_is_not_found() {
        let (server, store) = setup().await;
        let id = Uuid::new_v4();

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/sites"))
            .and(query_param("id", format!("eq.{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let patch = SiteUpdate {
            nama_site: Some("Baru".to_string()),
            ..Default::default()
        };
        let err = store.update_site(id, &patch).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_site_filters_by_id() {
        let (server, store) = setup().await;
        let id = Uuid::new_v4();

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/sites"))
            .and(query_param("id", format!("eq.{}", id)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store.delete_site(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_reports_unreachable_service() {
        let (server, store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = store.ping().await.unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
