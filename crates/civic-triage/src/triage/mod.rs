//! Civic issue triage: department routing, urgency scoring, caseworker assignment and
//! resolution estimates over a shared, read-only [`Catalog`].

pub mod assignment;
pub mod catalog;
pub mod classifier;
pub mod domain;
pub mod enricher;
pub mod intake;
pub mod query;
pub mod resolution;
pub mod router;
pub mod urgency;

#[cfg(test)]
mod tests;

pub use assignment::{AssignmentStrategy, CaseworkerAssigner, RandomSelection, RoundRobin};
pub use catalog::{Catalog, CatalogDefinition, CatalogError};
pub use classifier::{DepartmentClassifier, DepartmentScore};
pub use domain::{
    ClassificationResult, ConfidenceBand, EnrichedIssueRecord, IssueAttributes, IssueId,
    IssueStatus, Priority, RawIssue,
};
pub use enricher::RecordEnricher;
pub use intake::{IntakeError, IssueCsvImporter};
pub use query::{
    compute_stats, compute_stats_at, department_load, filter, most_recent, prioritized,
    DepartmentLoadEntry, IssueFilter, IssueStats,
};
pub use resolution::ResolutionEstimator;
pub use router::{triage_router, BatchEnrichRequest, BatchEnrichResponse};
pub use urgency::UrgencyScorer;
