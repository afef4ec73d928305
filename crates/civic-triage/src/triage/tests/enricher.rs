use std::sync::Arc;

use super::common::*;
use crate::config::{AssignmentMode, TriageConfig};
use crate::triage::assignment::RandomSelection;
use crate::triage::domain::{IssueStatus, Priority, RawIssue};
use crate::triage::enricher::RecordEnricher;

#[test]
fn water_main_burst_is_routed_to_utilities() {
    let enricher = enricher();

    let record = enricher.enrich(&water_main_burst());

    assert_eq!(record.department_id(), "water-utilities");
    assert_eq!(record.department_name(), "Water & Utilities");
    assert_eq!(record.confidence(), 11);
    assert_eq!(record.urgency_score, 100);
    assert_eq!(record.assigned_caseworker, "James Wilson");
    assert_eq!(record.estimated_resolution, "Within 2 hours");
    assert_eq!(record.issue, water_main_burst());
}

#[test]
fn repeated_enrichment_only_moves_the_caseworker() {
    let enricher = enricher();
    let issue = water_main_burst();

    let first = enricher.enrich(&issue);
    let second = enricher.enrich(&issue);
    let third = enricher.enrich(&issue);
    let fourth = enricher.enrich(&issue);

    assert_eq!(first.classification, second.classification);
    assert_eq!(first.urgency_score, second.urgency_score);
    assert_eq!(first.estimated_resolution, second.estimated_resolution);
    assert_eq!(
        [
            first.assigned_caseworker.as_str(),
            second.assigned_caseworker.as_str(),
            third.assigned_caseworker.as_str(),
            fourth.assigned_caseworker.as_str(),
        ],
        ["James Wilson", "Sarah Martinez", "Mike Chen", "James Wilson"]
    );
}

#[test]
fn school_crossing_goes_to_transportation() {
    let record = enricher().enrich(&school_crossing_light());

    assert_eq!(record.department_id(), "transportation");
    assert_eq!(record.confidence(), 5);
    assert_eq!(record.urgency_score, 100);
    assert_eq!(record.assigned_caseworker, "Maria Rodriguez");
    assert_eq!(record.estimated_resolution, "Within 8 hours");
    assert_eq!(record.issue.status, IssueStatus::InProgress);
}

#[test]
fn garbage_overflow_goes_to_sanitation() {
    let record = enricher().enrich(&park_garbage_overflow());

    assert_eq!(record.department_id(), "sanitation");
    assert_eq!(record.urgency_score, 63);
    assert_eq!(record.assigned_caseworker, "Lisa Park");
    assert_eq!(record.estimated_resolution, "Within 2 days");
}

fn many_issues(count: usize) -> Vec<RawIssue> {
    let templates = sample_issues();
    (0..count)
        .map(|index| {
            let mut issue = templates[index % templates.len()].clone();
            issue.id.0 = format!("CIV-{index:04}");
            issue.upvotes = (index % 40) as u32;
            issue.priority = Priority::ordered()[index % 4];
            issue
        })
        .collect()
}

#[test]
fn batch_matches_sequential_enrichment() {
    let issues = many_issues(57);

    let batch = enricher().enrich_batch(&issues);
    let sequential_enricher = enricher();
    let sequential: Vec<_> = issues
        .iter()
        .map(|issue| sequential_enricher.enrich(issue))
        .collect();

    assert_eq!(batch, sequential);
}

#[test]
fn batch_preserves_input_order_and_bounds() {
    let issues = many_issues(23);

    let records = enricher().enrich_batch(&issues);

    assert_eq!(records.len(), issues.len());
    for (record, issue) in records.iter().zip(&issues) {
        assert_eq!(record.issue.id, issue.id);
        assert!(record.urgency_score <= 100);
        assert!(record.confidence() <= 100);
        assert!(!record.assigned_caseworker.is_empty());
    }
}

#[test]
fn empty_batch_yields_no_records() {
    assert!(enricher().enrich_batch(&[]).is_empty());
}

#[test]
fn seeded_random_assignment_stays_within_the_pool() {
    let catalog = catalog();
    let enricher = RecordEnricher::new(catalog.clone(), Arc::new(RandomSelection::seeded(11)));
    let pool = catalog.officer_pool("water-utilities").to_vec();

    for _ in 0..10 {
        let record = enricher.enrich(&water_main_burst());
        assert!(pool.contains(&record.assigned_caseworker));
    }
}

#[test]
fn from_config_uses_standard_catalog_by_default() {
    let config = TriageConfig {
        assignment: AssignmentMode::Random,
        assignment_seed: Some(5),
        ..TriageConfig::default()
    };

    let enricher = RecordEnricher::from_config(&config).expect("standard catalog");

    assert_eq!(enricher.catalog().departments().len(), 9);
}

#[test]
fn from_config_reports_missing_catalog_file() {
    let config = TriageConfig {
        catalog_path: Some("/nonexistent/civic-catalog.json".into()),
        ..TriageConfig::default()
    };

    assert!(RecordEnricher::from_config(&config).is_err());
}
