// DoseWatch - core/history.rs
//
// Execution history views: the "last N executions" strip and summary counts.

use crate::core::model::{ExecutionStatus, ReminderExecution};

/// The most recent `limit` settled executions, most recent first.
///
/// Pending executions are dropped. Executions are ordered by `executed_at`
/// with a stable sort, so records sharing a timestamp keep their recorded
/// order before the list is reversed.
pub fn recent_executions(
    executions: &[ReminderExecution],
    limit: usize,
) -> Vec<&ReminderExecution> {
    let mut settled: Vec<&ReminderExecution> = executions
        .iter()
        .filter(|e| e.status.is_settled())
        .collect();
    settled.sort_by_key(|e| e.executed_at);

    let skip = settled.len().saturating_sub(limit);
    settled.into_iter().skip(skip).rev().collect()
}

/// Aggregate counts over a reminder's execution history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExecutionStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    pub total_retries: u32,
    pub total_minutes: u32,
}

impl ExecutionStats {
    pub fn from_executions(executions: &[ReminderExecution]) -> Self {
        let mut stats = Self::default();
        for e in executions {
            stats.total += 1;
            match e.status {
                ExecutionStatus::Success => stats.succeeded += 1,
                ExecutionStatus::Failed => stats.failed += 1,
                ExecutionStatus::Pending => stats.pending += 1,
            }
            stats.total_retries = stats.total_retries.saturating_add(e.retries);
            stats.total_minutes = stats.total_minutes.saturating_add(e.duration_minutes);
        }
        stats
    }

    /// Success share of settled executions in percent; `None` if nothing settled.
    pub fn success_rate(&self) -> Option<f32> {
        let settled = self.succeeded + self.failed;
        if settled == 0 {
            None
        } else {
            Some(self.succeeded as f32 / settled as f32 * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{minute_format, DeliveryChannel};

    fn make_exec(id: u32, at: &str, status: ExecutionStatus) -> ReminderExecution {
        ReminderExecution {
            id,
            executed_at: minute_format::parse(at).unwrap(),
            status,
            method: DeliveryChannel::Chat,
            retries: id % 3,
            duration_minutes: 2,
        }
    }

    #[test]
    fn test_never_more_than_limit_most_recent_first() {
        let execs: Vec<_> = (1..=8)
            .map(|i| {
                make_exec(
                    i,
                    &format!("2024-11-{:02} 08:00", 10 + i),
                    ExecutionStatus::Success,
                )
            })
            .collect();
        let recent = recent_executions(&execs, 5);
        let ids: Vec<u32> = recent.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_pending_entries_are_excluded() {
        let execs = vec![
            make_exec(1, "2024-11-22 08:00", ExecutionStatus::Success),
            make_exec(2, "2024-11-22 16:00", ExecutionStatus::Pending),
            make_exec(3, "2024-11-23 00:00", ExecutionStatus::Failed),
        ];
        let ids: Vec<u32> = recent_executions(&execs, 5).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_time() {
        let execs = vec![
            make_exec(1, "2024-11-23 00:00", ExecutionStatus::Failed),
            make_exec(2, "2024-11-22 08:00", ExecutionStatus::Success),
            make_exec(3, "2024-11-22 16:00", ExecutionStatus::Success),
        ];
        let ids: Vec<u32> = recent_executions(&execs, 2).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_history() {
        assert!(recent_executions(&[], 5).is_empty());
        assert_eq!(ExecutionStats::from_executions(&[]).success_rate(), None);
    }

    #[test]
    fn test_stats_counts() {
        let execs = vec![
            make_exec(1, "2024-11-22 08:00", ExecutionStatus::Success),
            make_exec(2, "2024-11-22 16:00", ExecutionStatus::Success),
            make_exec(3, "2024-11-23 00:00", ExecutionStatus::Failed),
            make_exec(4, "2024-11-23 08:00", ExecutionStatus::Pending),
        ];
        let stats = ExecutionStats::from_executions(&execs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_retries, 1 + 2 + 0 + 1);
        assert_eq!(stats.total_minutes, 8);
        let rate = stats.success_rate().unwrap();
        assert!((rate - 66.666_67).abs() < 0.01);
    }
}
