use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::domain::{EnrichedIssueRecord, IssueStatus};

/// Value accepted by every criterion to mean "no constraint".
pub const ANY: &str = "all";

/// Dashboard filter; absent or `"all"` criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl IssueFilter {
    pub fn is_unconstrained(&self) -> bool {
        [&self.ward, &self.category, &self.priority, &self.status]
            .into_iter()
            .all(|criterion| active(criterion).is_none())
    }

    pub fn matches(&self, record: &EnrichedIssueRecord) -> bool {
        let issue = &record.issue;
        accepts(&self.ward, &issue.ward)
            && accepts(&self.category, &issue.category)
            && accepts(&self.priority, issue.priority.as_str())
            && accepts(&self.status, issue.status.as_str())
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|value| *value != ANY)
}

fn accepts(criterion: &Option<String>, value: &str) -> bool {
    active(criterion).map_or(true, |wanted| wanted == value)
}

/// Records satisfying every active criterion, in their original order.
pub fn filter(
    records: &[EnrichedIssueRecord],
    criteria: &IssueFilter,
) -> Vec<EnrichedIssueRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Headline counters shown above the issue lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved_today: usize,
}

/// Counters evaluated against the local calendar day at the moment of the call.
pub fn compute_stats(records: &[EnrichedIssueRecord]) -> IssueStats {
    compute_stats_at(records, Local::now())
}

/// Counters with an explicit clock; "today" is `now`'s calendar day in its own zone.
pub fn compute_stats_at<Tz: TimeZone>(
    records: &[EnrichedIssueRecord],
    now: DateTime<Tz>,
) -> IssueStats {
    let zone = now.timezone();
    let today = now.date_naive();

    records
        .iter()
        .fold(IssueStats::default(), |mut stats, record| {
            stats.total += 1;
            match record.issue.status {
                IssueStatus::Pending => stats.open += 1,
                IssueStatus::InProgress => stats.in_progress += 1,
                IssueStatus::Resolved => {
                    let reported_on = record.issue.reported_at.with_timezone(&zone).date_naive();
                    if reported_on == today {
                        stats.resolved_today += 1;
                    }
                }
                IssueStatus::Verified => {}
            }
            stats
        })
}

/// Highest urgency first; equal scores keep their input order.
pub fn prioritized(records: &[EnrichedIssueRecord]) -> Vec<EnrichedIssueRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|left, right| right.urgency_score.cmp(&left.urgency_score));
    ordered
}

/// Newest reports first, truncated to `limit`.
pub fn most_recent(records: &[EnrichedIssueRecord], limit: usize) -> Vec<EnrichedIssueRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|left, right| right.issue.reported_at.cmp(&left.issue.reported_at));
    ordered.truncate(limit);
    ordered
}

/// Workload for one department across a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentLoadEntry {
    pub department_id: String,
    pub department_name: String,
    pub open: usize,
    pub total: usize,
}

/// Per-department counts, busiest first; ties keep first-seen order.
pub fn department_load(records: &[EnrichedIssueRecord]) -> Vec<DepartmentLoadEntry> {
    let mut entries: Vec<DepartmentLoadEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let position = *positions.entry(record.department_id()).or_insert_with(|| {
            entries.push(DepartmentLoadEntry {
                department_id: record.department_id().to_string(),
                department_name: record.department_name().to_string(),
                open: 0,
                total: 0,
            });
            entries.len() - 1
        });

        let entry = &mut entries[position];
        entry.total += 1;
        if matches!(
            record.issue.status,
            IssueStatus::Pending | IssueStatus::InProgress
        ) {
            entry.open += 1;
        }
    }

    entries.sort_by(|left, right| right.total.cmp(&left.total));
    entries
}
