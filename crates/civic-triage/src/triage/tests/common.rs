use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::triage::catalog::{Catalog, CatalogDefinition, DepartmentDefinition};
use crate::triage::domain::{IssueId, IssueStatus, Priority, RawIssue};
use crate::triage::enricher::RecordEnricher;

pub(super) fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard().expect("standard catalog is valid"))
}

pub(super) fn enricher() -> RecordEnricher {
    RecordEnricher::standard().expect("standard enricher builds")
}

pub(super) fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 18, 0, 0)
        .single()
        .expect("valid reference time")
}

pub(super) fn issue(id: &str, title: &str, description: &str, category: &str) -> RawIssue {
    RawIssue {
        id: IssueId(id.to_string()),
        title: title.to_string(),
        description: description.to_string(),
        location: String::new(),
        ward: "ward-1".to_string(),
        category: category.to_string(),
        priority: Priority::Medium,
        status: IssueStatus::Pending,
        reported_by: "City Resident".to_string(),
        reported_at: reference_time() - Duration::hours(1),
        upvotes: 0,
    }
}

pub(super) fn water_main_burst() -> RawIssue {
    RawIssue {
        location: "Medical District, Main St & Hospital Ave".to_string(),
        priority: Priority::Critical,
        upvotes: 34,
        reported_by: "Emergency Services".to_string(),
        ..issue(
            "CIV-001",
            "Water main burst near hospital",
            "Major water line rupture causing flooding near emergency services. Multiple vehicles affected.",
            "utilities",
        )
    }
}

pub(super) fn school_crossing_light() -> RawIssue {
    RawIssue {
        location: "School Zone, Oak Ave & Pine St".to_string(),
        ward: "ward-2".to_string(),
        priority: Priority::High,
        status: IssueStatus::InProgress,
        upvotes: 28,
        ..issue(
            "CIV-045",
            "Traffic light malfunction at school crossing",
            "Traffic signal not working properly during school hours, creating safety hazard for children.",
            "traffic",
        )
    }
}

pub(super) fn downtown_pothole() -> RawIssue {
    RawIssue {
        location: "Downtown, 5th Street & Broadway".to_string(),
        priority: Priority::High,
        upvotes: 22,
        ..issue(
            "CIV-089",
            "Large pothole damaging vehicles",
            "Deep pothole on main thoroughfare causing tire damage to multiple vehicles.",
            "infrastructure",
        )
    }
}

pub(super) fn park_garbage_overflow() -> RawIssue {
    RawIssue {
        location: "Central Park, Main Entrance".to_string(),
        ward: "ward-3".to_string(),
        status: IssueStatus::Resolved,
        upvotes: 15,
        reported_at: reference_time() - Duration::hours(8),
        ..issue(
            "CIV-123",
            "Garbage overflow at park entrance",
            "Multiple trash bins overflowing, creating unsanitary conditions near children's playground.",
            "sanitation",
        )
    }
}

pub(super) fn sample_issues() -> Vec<RawIssue> {
    vec![
        water_main_burst(),
        school_crossing_light(),
        downtown_pothole(),
        park_garbage_overflow(),
    ]
}

/// Two-department rule set with neutral weighting, for tie and fallback cases.
pub(super) fn neutral_catalog() -> Arc<Catalog> {
    let department = |id: &str, keywords: &[&str]| DepartmentDefinition {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        urgency_multiplier: 1.0,
    };

    let definition = CatalogDefinition {
        departments: vec![
            department("general", &["repair"]),
            department("roads", &["pothole", "repair"]),
        ],
        location_multipliers: Vec::new(),
        priority_base_scores: BTreeMap::new(),
        category_multipliers: BTreeMap::new(),
        officer_pools: BTreeMap::new(),
        resolution_hours: BTreeMap::new(),
        urgent_keywords: Vec::new(),
    };

    Arc::new(Catalog::from_definition(definition).expect("neutral catalog is valid"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
