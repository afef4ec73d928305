use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for reported issues (e.g. `CIV-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(pub String);

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Priority tier declared by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn ordered() -> [Priority; 4] {
        [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ]
    }

    /// Table key used by the catalog lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state tracked by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Verified,
}

impl IssueStatus {
    pub fn ordered() -> [IssueStatus; 4] {
        [
            IssueStatus::Pending,
            IssueStatus::InProgress,
            IssueStatus::Resolved,
            IssueStatus::Verified,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "pending",
            IssueStatus::InProgress => "in-progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Verified => "verified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Verified => "Verified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// The scoring inputs of a report: everything classification and urgency read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAttributes {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub priority: Priority,
    pub upvotes: u32,
}

/// A citizen report as submitted, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    pub id: IssueId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub ward: String,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub status: IssueStatus,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: u32,
}

impl RawIssue {
    pub fn attributes(&self) -> IssueAttributes {
        IssueAttributes {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            location: self.location.clone(),
            priority: self.priority,
            upvotes: self.upvotes,
        }
    }
}

/// Outcome of routing an issue to a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub department_id: String,
    pub department_name: String,
    pub confidence: u8,
    pub reasoning: Vec<String>,
    pub matched_keywords: Vec<String>,
}

impl ClassificationResult {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Coarse bucket the dashboards colour confidence by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Good,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            85..=u8::MAX => ConfidenceBand::High,
            70..=84 => ConfidenceBand::Good,
            50..=69 => ConfidenceBand::Moderate,
            _ => ConfidenceBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High Confidence",
            ConfidenceBand::Good => "Good Confidence",
            ConfidenceBand::Moderate => "Moderate Confidence",
            ConfidenceBand::Low => "Low Confidence",
        }
    }
}

/// A report together with everything the engine derived from it.
///
/// Records are never updated in place; enriching again yields a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedIssueRecord {
    #[serde(flatten)]
    pub issue: RawIssue,
    pub classification: ClassificationResult,
    pub urgency_score: u8,
    pub assigned_caseworker: String,
    pub estimated_resolution: String,
}

impl EnrichedIssueRecord {
    pub fn department_id(&self) -> &str {
        &self.classification.department_id
    }

    pub fn department_name(&self) -> &str {
        &self.classification.department_name
    }

    pub fn confidence(&self) -> u8 {
        self.classification.confidence
    }
}
