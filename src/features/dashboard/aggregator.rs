//! Condition Aggregator: per-category counts of checklist item conditions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::checklists::models::Condition;

/// Counts per condition; `total == good + medium + poor` always holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionStats {
    pub total: usize,
    #[serde(rename = "baik")]
    pub good: usize,
    #[serde(rename = "sedang")]
    pub medium: usize,
    #[serde(rename = "buruk")]
    pub poor: usize,
}

impl ConditionStats {
    pub fn tally<'a, I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = &'a Condition>,
    {
        conditions.into_iter().copied().collect()
    }

    fn record(&mut self, condition: Condition) {
        self.total += 1;
        match condition {
            Condition::Good => self.good += 1,
            Condition::Medium => self.medium += 1,
            Condition::Poor => self.poor += 1,
        }
    }
}

impl FromIterator<Condition> for ConditionStats {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut stats = ConditionStats::default();
        for condition in iter {
            stats.record(condition);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tally_counts_each_category() {
        let mut conditions = vec![Condition::Good; 6];
        conditions.extend([Condition::Medium; 3]);
        conditions.push(Condition::Poor);

        let stats = ConditionStats::tally(&conditions);

        assert_eq!(
            stats,
            ConditionStats {
                total: 10,
                good: 6,
                medium: 3,
                poor: 1
            }
        );
    }

    #[test]
    fn test_tally_empty_is_all_zero() {
        assert_eq!(ConditionStats::tally(&[]), ConditionStats::default());
    }

    #[test]
    fn test_tally_is_order_independent() {
        let forward = [Condition::Poor, Condition::Good, Condition::Medium, Condition::Good];
        let mut reversed = forward;
        reversed.reverse();

        let stats = ConditionStats::tally(&forward);

        assert_eq!(stats, ConditionStats::tally(&reversed));
        assert_eq!(stats.total, stats.good + stats.medium + stats.poor);
    }

    #[test]
    fn test_stats_serialize_with_condition_names() {
        let stats: ConditionStats = [Condition::Good, Condition::Poor].into_iter().collect();

        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({ "total": 2, "baik": 1, "sedang": 0, "buruk": 1 })
        );
    }
}
