use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::aggregator::ConditionStats;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::modules::supabase::RecordStore;
use crate::shared::constants::DASHBOARD_RECENT_SITES;

/// Service for the public dashboard
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Condition counts over all checklist items and the newest sites.
    ///
    /// Both reads are issued concurrently.
    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let (conditions, recent) = tokio::try_join!(
            self.store.list_conditions(),
            self.store.list_sites(Some(DASHBOARD_RECENT_SITES)),
        )
        .inspect_err(|e| tracing::error!("Error fetching dashboard data: {}", e))?;

        Ok(DashboardSummaryDto {
            stats: conditions.into_iter().collect::<ConditionStats>(),
            recent_sites: recent.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::checklists::models::Condition;
    use crate::features::sites::models::Coordinate;
    use crate::shared::test_helpers::{sample_site, MemoryRecordStore};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_summary_counts_conditions() {
        let mut conditions = vec![Condition::Good; 6];
        conditions.extend([Condition::Medium; 3]);
        conditions.push(Condition::Poor);
        let service = DashboardService::new(Arc::new(MemoryRecordStore::with_conditions(
            &conditions,
        )));

        let summary = service.get_summary().await.unwrap();

        assert_eq!(summary.stats.total, 10);
        assert_eq!(summary.stats.good, 6);
        assert_eq!(summary.stats.medium, 3);
        assert_eq!(summary.stats.poor, 1);
        assert!(summary.recent_sites.is_empty());
    }

    #[tokio::test]
    async fn test_summary_keeps_five_newest_sites() {
        let coordinate = Coordinate::new(-6.9, 107.6);
        let sites: Vec<_> = (1..=7)
            .map(|n| sample_site(n, n * 10, coordinate))
            .collect();
        let service = DashboardService::new(Arc::new(MemoryRecordStore::with_sites(sites)));

        let summary = service.get_summary().await.unwrap();

        let numbers: Vec<i64> = summary.recent_sites.iter().map(|s| s.nomor_urut).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_summary_propagates_store_failure() {
        let store = MemoryRecordStore::new();
        store.fail_reads.store(true, Ordering::SeqCst);
        let service = DashboardService::new(Arc::new(store));

        let err = service.get_summary().await.unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
