use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use tracing::debug;

use super::assignment::{
    strategy_from_config, AssignmentStrategy, CaseworkerAssigner, RoundRobin,
};
use super::catalog::{Catalog, CatalogError};
use super::classifier::DepartmentClassifier;
use super::domain::{ClassificationResult, EnrichedIssueRecord, RawIssue};
use super::resolution::ResolutionEstimator;
use super::urgency::UrgencyScorer;
use crate::config::TriageConfig;

/// Single entry point that turns raw reports into enriched records.
pub struct RecordEnricher {
    catalog: Arc<Catalog>,
    classifier: DepartmentClassifier,
    scorer: UrgencyScorer,
    assigner: CaseworkerAssigner,
    estimator: ResolutionEstimator,
}

impl RecordEnricher {
    pub fn new(catalog: Arc<Catalog>, strategy: Arc<dyn AssignmentStrategy>) -> Self {
        Self {
            classifier: DepartmentClassifier::new(catalog.clone()),
            scorer: UrgencyScorer::new(catalog.clone()),
            assigner: CaseworkerAssigner::new(catalog.clone(), strategy),
            estimator: ResolutionEstimator::new(catalog.clone()),
            catalog,
        }
    }

    /// Standard catalog with round-robin caseworker assignment.
    pub fn standard() -> Result<Self, CatalogError> {
        let catalog = Arc::new(Catalog::standard()?);
        Ok(Self::new(catalog, Arc::new(RoundRobin::default())))
    }

    /// Load the configured catalog (or the standard one) and assignment strategy.
    pub fn from_config(config: &TriageConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::standard()?,
        };
        Ok(Self::new(Arc::new(catalog), strategy_from_config(config)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &DepartmentClassifier {
        &self.classifier
    }

    pub fn scorer(&self) -> &UrgencyScorer {
        &self.scorer
    }

    pub fn estimator(&self) -> &ResolutionEstimator {
        &self.estimator
    }

    pub fn enrich(&self, issue: &RawIssue) -> EnrichedIssueRecord {
        let (classification, urgency_score) = self.score(issue);
        self.finish(issue, classification, urgency_score)
    }

    /// Enrich many reports, preserving input order.
    ///
    /// Classification and urgency scoring fan out across worker threads; caseworker
    /// assignment then runs in input order so round-robin results match `enrich` in a loop.
    pub fn enrich_batch(&self, issues: &[RawIssue]) -> Vec<EnrichedIssueRecord> {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let scored = self.score_parallel(issues, workers);

        issues
            .iter()
            .zip(scored)
            .map(|(issue, (classification, urgency_score))| {
                self.finish(issue, classification, urgency_score)
            })
            .collect()
    }

    fn score(&self, issue: &RawIssue) -> (ClassificationResult, u8) {
        let classification = self.classifier.classify(
            &issue.title,
            &issue.description,
            &issue.category,
            &issue.location,
        );
        let urgency_score = self.scorer.score(&issue.attributes());
        (classification, urgency_score)
    }

    fn score_parallel(
        &self,
        issues: &[RawIssue],
        workers: usize,
    ) -> Vec<(ClassificationResult, u8)> {
        if workers <= 1 || issues.len() <= 1 {
            return issues.iter().map(|issue| self.score(issue)).collect();
        }

        let chunk_size = issues.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = issues
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|issue| self.score(issue))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(scored) => scored,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        })
    }

    fn finish(
        &self,
        issue: &RawIssue,
        classification: ClassificationResult,
        urgency_score: u8,
    ) -> EnrichedIssueRecord {
        let department_id = classification.department_id.as_str();
        let assigned_caseworker = self.assigner.assign(department_id);
        let estimated_resolution = self
            .estimator
            .estimate(department_id, issue.priority.as_str());

        debug!(
            issue = %issue.id,
            department = department_id,
            confidence = classification.confidence,
            urgency = urgency_score,
            caseworker = %assigned_caseworker,
            "issue enriched"
        );

        EnrichedIssueRecord {
            issue: issue.clone(),
            classification,
            urgency_score,
            assigned_caseworker,
            estimated_resolution,
        }
    }
}
