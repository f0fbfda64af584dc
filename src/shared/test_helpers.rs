#[cfg(test)]
pub use memory::{sample_site, MemoryRecordStore};

#[cfg(test)]
mod memory {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use fake::faker::address::en::StreetName;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;
    use uuid::Uuid;

    use crate::core::error::{AppError, Result};
    use crate::features::checklists::models::{
        ChecklistItem, ChecklistItemUpdate, Condition, NewChecklistItem,
    };
    use crate::features::sites::models::{Coordinate, LocationCategory, NewSite, Site, SiteUpdate};
    use crate::modules::supabase::RecordStore;

    fn base_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_736_900_000, 0).unwrap()
    }

    /// Site with random name/address; `age` orders sites by `created_at`
    /// (higher age = older).
    pub fn sample_site(nomor_urut: i64, age: i64, coordinate: Coordinate) -> Site {
        let created_at = base_time() - Duration::minutes(age);
        Site {
            id: Uuid::new_v4(),
            nomor_urut,
            nama_site: CompanyName().fake(),
            alamat_site: StreetName().fake(),
            koordinat_site: coordinate,
            tanggal_checklist: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            lokasi: LocationCategory::P,
            created_at,
            updated_at: Some(created_at),
        }
    }

    #[derive(Default)]
    struct Tables {
        sites: Vec<Site>,
        items: Vec<ChecklistItem>,
        site_inserts: Vec<NewSite>,
        item_batches: Vec<Vec<NewChecklistItem>>,
        deleted_sites: Vec<Uuid>,
        reads: usize,
    }

    /// In-memory [`RecordStore`] that records every call
    #[derive(Default)]
    pub struct MemoryRecordStore {
        tables: Mutex<Tables>,
        pub fail_reads: AtomicBool,
        pub fail_site_insert: AtomicBool,
        pub fail_item_insert: AtomicBool,
        pub fail_delete: AtomicBool,
        /// Latency of `list_sites`, in milliseconds of tokio time
        pub read_delay_ms: AtomicU64,
    }

    fn service_down() -> AppError {
        AppError::ExternalServiceError("service unavailable".to_string())
    }

    impl MemoryRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_sites(sites: Vec<Site>) -> Self {
            let store = Self::default();
            store.tables.lock().unwrap().sites = sites;
            store
        }

        pub fn with_conditions(conditions: &[Condition]) -> Self {
            let store = Self::default();
            let site_id = Uuid::new_v4();
            store.tables.lock().unwrap().items = conditions
                .iter()
                .enumerate()
                .map(|(i, kondisi)| ChecklistItem {
                    id: Uuid::new_v4(),
                    site_id,
                    nomor_item: (i % 13) as i32 + 1,
                    material: "Tower".to_string(),
                    spesifikasi: None,
                    kondisi: *kondisi,
                    keterangan: None,
                    created_at: base_time(),
                    updated_at: None,
                })
                .collect();
            store
        }

        pub fn set_sites(&self, sites: Vec<Site>) {
            self.tables.lock().unwrap().sites = sites;
        }

        pub fn site_inserts(&self) -> Vec<NewSite> {
            self.tables.lock().unwrap().site_inserts.clone()
        }

        pub fn item_batches(&self) -> Vec<Vec<NewChecklistItem>> {
            self.tables.lock().unwrap().item_batches.clone()
        }

        pub fn deleted_sites(&self) -> Vec<Uuid> {
            self.tables.lock().unwrap().deleted_sites.clone()
        }

        pub fn stored_sites(&self) -> Vec<Site> {
            self.tables.lock().unwrap().sites.clone()
        }

        pub fn reads(&self) -> usize {
            self.tables.lock().unwrap().reads
        }

        /// Total number of calls that would have reached the remote service
        pub fn remote_calls(&self) -> usize {
            let tables = self.tables.lock().unwrap();
            tables.reads
                + tables.site_inserts.len()
                + tables.item_batches.len()
                + tables.deleted_sites.len()
        }

        fn read_guard(&self) -> Result<std::sync::MutexGuard<'_, Tables>> {
            let mut tables = self.tables.lock().unwrap();
            tables.reads += 1;
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(service_down());
            }
            Ok(tables)
        }
    }

    #[async_trait]
    impl RecordStore for MemoryRecordStore {
        async fn list_sites(&self, limit: Option<usize>) -> Result<Vec<Site>> {
            let delay = self.read_delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            }
            let tables = self.read_guard()?;
            let mut sites = tables.sites.clone();
            sites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(limit) = limit {
                sites.truncate(limit);
            }
            Ok(sites)
        }

        async fn get_site(&self, id: Uuid) -> Result<Option<Site>> {
            let tables = self.read_guard()?;
            Ok(tables.sites.iter().find(|s| s.id == id).cloned())
        }

        async fn insert_site(&self, site: &NewSite) -> Result<Site> {
            let mut tables = self.tables.lock().unwrap();
            tables.site_inserts.push(site.clone());
            if self.fail_site_insert.load(Ordering::SeqCst) {
                return Err(service_down());
            }

            let created_at = base_time() + Duration::seconds(tables.sites.len() as i64 + 1);
            let stored = Site {
                id: Uuid::new_v4(),
                nomor_urut: site.nomor_urut,
                nama_site: site.nama_site.clone(),
                alamat_site: site.alamat_site.clone(),
                koordinat_site: site.koordinat_site,
                tanggal_checklist: site.tanggal_checklist,
                lokasi: site.lokasi,
                created_at,
                updated_at: Some(created_at),
            };
            tables.sites.push(stored.clone());
            Ok(stored)
        }

        async fn update_site(&self, id: Uuid, patch: &SiteUpdate) -> Result<Site> {
            let mut tables = self.tables.lock().unwrap();
            let site = tables
                .sites
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Record {} not found in sites", id)))?;

            if let Some(v) = patch.nomor_urut {
                site.nomor_urut = v;
            }
            if let Some(v) = &patch.nama_site {
                site.nama_site = v.clone();
            }
            if let Some(v) = &patch.alamat_site {
                site.alamat_site = v.clone();
            }
            if let Some(v) = patch.koordinat_site {
                site.koordinat_site = v;
            }
            if let Some(v) = patch.tanggal_checklist {
                site.tanggal_checklist = v;
            }
            if let Some(v) = patch.lokasi {
                site.lokasi = v;
            }
            Ok(site.clone())
        }

        async fn delete_site(&self, id: Uuid) -> Result<()> {
            let mut tables = self.tables.lock().unwrap();
            tables.deleted_sites.push(id);
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(service_down());
            }
            tables.sites.retain(|s| s.id != id);
            tables.items.retain(|i| i.site_id != id);
            Ok(())
        }

        async fn list_checklist_items(&self, site_id: Option<Uuid>) -> Result<Vec<ChecklistItem>> {
            let tables = self.read_guard()?;
            let mut items: Vec<ChecklistItem> = tables
                .items
                .iter()
                .filter(|i| site_id.map_or(true, |id| i.site_id == id))
                .cloned()
                .collect();
            items.sort_by_key(|i| i.nomor_item);
            Ok(items)
        }

        async fn list_conditions(&self) -> Result<Vec<Condition>> {
            let tables = self.read_guard()?;
            Ok(tables.items.iter().map(|i| i.kondisi).collect())
        }

        async fn insert_checklist_items(
            &self,
            items: &[NewChecklistItem],
        ) -> Result<Vec<ChecklistItem>> {
            let mut tables = self.tables.lock().unwrap();
            tables.item_batches.push(items.to_vec());
            if self.fail_item_insert.load(Ordering::SeqCst) {
                return Err(service_down());
            }

            let created: Vec<ChecklistItem> = items
                .iter()
                .map(|item| ChecklistItem {
                    id: Uuid::new_v4(),
                    site_id: item.site_id,
                    nomor_item: item.nomor_item,
                    material: item.material.clone(),
                    spesifikasi: Some(item.spesifikasi.clone()),
                    kondisi: item.kondisi,
                    keterangan: Some(item.keterangan.clone()),
                    created_at: base_time(),
                    updated_at: None,
                })
                .collect();
            tables.items.extend(created.iter().cloned());
            Ok(created)
        }

        async fn update_checklist_item(
            &self,
            id: Uuid,
            patch: &ChecklistItemUpdate,
        ) -> Result<ChecklistItem> {
            let mut tables = self.tables.lock().unwrap();
            let item = tables.items.iter_mut().find(|i| i.id == id).ok_or_else(|| {
                AppError::NotFound(format!("Record {} not found in checklist_items", id))
            })?;

            if let Some(v) = &patch.material {
                item.material = v.clone();
            }
            if let Some(v) = &patch.spesifikasi {
                item.spesifikasi = Some(v.clone());
            }
            if let Some(v) = patch.kondisi {
                item.kondisi = v;
            }
            if let Some(v) = &patch.keterangan {
                item.keterangan = Some(v.clone());
            }
            Ok(item.clone())
        }

        async fn delete_checklist_item(&self, id: Uuid) -> Result<()> {
            self.tables.lock().unwrap().items.retain(|i| i.id != id);
            Ok(())
        }

        async fn ping(&self) -> Result<()> {
            self.read_guard().map(|_| ())
        }
    }
}
