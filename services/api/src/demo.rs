use crate::infra::build_enricher;
use chrono::{DateTime, Duration, Local, Utc};
use civic_triage::config::TriageConfig;
use civic_triage::error::AppError;
use civic_triage::triage::{
    compute_stats, department_load, filter, most_recent, prioritized, BatchEnrichResponse,
    Catalog, EnrichedIssueRecord, IssueCsvImporter, IssueFilter, IssueId, IssueStatus, Priority,
    RawIssue,
};
use clap::Args;
use std::path::PathBuf;

const RECENT_ACTIVITY: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the enriched sample set as JSON instead of a dashboard summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EnrichArgs {
    /// CSV export of raw issue reports
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Only include issues from this ward ("all" for every ward)
    #[arg(long)]
    pub(crate) ward: Option<String>,
    /// Only include issues in this category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Only include issues with this priority (critical, high, medium, low)
    #[arg(long)]
    pub(crate) priority: Option<String>,
    /// Only include issues with this status (pending, in-progress, resolved, verified)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Emit JSON instead of a dashboard summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print the built-in rule set even when TRIAGE_CATALOG_PATH is set.
    #[arg(long)]
    pub(crate) standard: bool,
}

pub(crate) fn run_enrich(args: EnrichArgs, config: &TriageConfig) -> Result<(), AppError> {
    let EnrichArgs {
        input,
        ward,
        category,
        priority,
        status,
        json,
    } = args;

    let issues = IssueCsvImporter::from_path(&input)?;
    let enricher = build_enricher(config)?;
    let records = enricher.enrich_batch(&issues);
    let criteria = IssueFilter {
        ward,
        category,
        priority,
        status,
    };

    if json {
        print_json(&records, &criteria)
    } else {
        println!(
            "Enriched {} issue(s) from {}",
            records.len(),
            input.display()
        );
        render_dashboard(&records, &criteria);
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs, config: &TriageConfig) -> Result<(), AppError> {
    let enricher = build_enricher(config)?;
    let records = enricher.enrich_batch(&sample_issues(Utc::now()));
    let criteria = IssueFilter::default();

    if args.json {
        return print_json(&records, &criteria);
    }

    println!("Civic issue triage demo");
    render_dashboard(&records, &criteria);

    println!("\nRecent activity");
    for record in most_recent(&records, RECENT_ACTIVITY) {
        let reported = record.issue.reported_at.with_timezone(&Local);
        println!(
            "  - {} [{}] {} | reported {} by {}",
            record.issue.id,
            record.issue.status.label(),
            record.issue.title,
            reported.format("%Y-%m-%d %H:%M"),
            record.issue.reported_by
        );
    }

    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs, config: &TriageConfig) -> Result<(), AppError> {
    let catalog = match (&config.catalog_path, args.standard) {
        (Some(path), false) => Catalog::from_path(path)?,
        _ => Catalog::standard()?,
    };
    let rendered = serde_json::to_string_pretty(catalog.definition())?;
    println!("{rendered}");
    Ok(())
}

fn print_json(records: &[EnrichedIssueRecord], criteria: &IssueFilter) -> Result<(), AppError> {
    let selected = filter(records, criteria);
    let response = BatchEnrichResponse {
        stats: compute_stats(&selected),
        department_load: department_load(&selected),
        records: prioritized(&selected),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn render_dashboard(records: &[EnrichedIssueRecord], criteria: &IssueFilter) {
    let selected = filter(records, criteria);
    if !criteria.is_unconstrained() {
        println!("Filter matched {} of {} issue(s)", selected.len(), records.len());
    }

    let stats = compute_stats(&selected);
    println!(
        "\nTotal {} | open {} | in progress {} | resolved today {}",
        stats.total, stats.open, stats.in_progress, stats.resolved_today
    );

    println!("\nPriority queue");
    if selected.is_empty() {
        println!("  (no issues)");
    }
    for record in prioritized(&selected) {
        let classification = &record.classification;
        println!(
            "  - [{:>3}] {} {} ({})",
            record.urgency_score,
            record.issue.id,
            record.issue.title,
            record.issue.priority.as_str()
        );
        println!(
            "        {} | {}% {} | {} | {}",
            classification.department_name,
            classification.confidence,
            classification.confidence_band().label(),
            record.assigned_caseworker,
            record.estimated_resolution
        );
        if let Some(reason) = classification.reasoning.first() {
            println!("        {reason}");
        }
    }

    let load = department_load(&selected);
    if !load.is_empty() {
        println!("\nDepartment load");
        for entry in load {
            println!(
                "  - {}: {} open / {} total",
                entry.department_name, entry.open, entry.total
            );
        }
    }
}

fn reported(now: DateTime<Utc>, minutes_ago: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes_ago)
}

/// The issue set the municipal dashboards were prototyped against, timed relative to `now`.
pub(crate) fn sample_issues(now: DateTime<Utc>) -> Vec<RawIssue> {
    let issue = |id: &str, title: &str, description: &str, location: &str| RawIssue {
        id: IssueId(id.to_string()),
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        ward: String::new(),
        category: String::new(),
        priority: Priority::Medium,
        status: IssueStatus::Pending,
        reported_by: String::new(),
        reported_at: now,
        upvotes: 0,
    };

    vec![
        RawIssue {
            ward: "ward-1".to_string(),
            category: "utilities".to_string(),
            priority: Priority::Critical,
            reported_by: "Emergency Services".to_string(),
            reported_at: reported(now, 15),
            upvotes: 34,
            ..issue(
                "CIV-001",
                "Water main burst near hospital",
                "Major water line rupture causing flooding near emergency services. Multiple vehicles affected.",
                "Medical District, Main St & Hospital Ave",
            )
        },
        RawIssue {
            ward: "ward-2".to_string(),
            category: "traffic".to_string(),
            priority: Priority::High,
            status: IssueStatus::InProgress,
            reported_by: "School Principal".to_string(),
            reported_at: reported(now, 2 * 60),
            upvotes: 28,
            ..issue(
                "CIV-045",
                "Traffic light malfunction at school crossing",
                "Traffic signal not working properly during school hours, creating safety hazard for children.",
                "School Zone, Oak Ave & Pine St",
            )
        },
        RawIssue {
            ward: "ward-1".to_string(),
            category: "infrastructure".to_string(),
            priority: Priority::High,
            reported_by: "City Resident".to_string(),
            reported_at: reported(now, 4 * 60),
            upvotes: 22,
            ..issue(
                "CIV-089",
                "Large pothole damaging vehicles",
                "Deep pothole on main thoroughfare causing tire damage to multiple vehicles.",
                "Downtown, 5th Street & Broadway",
            )
        },
        RawIssue {
            ward: "ward-3".to_string(),
            category: "sanitation".to_string(),
            status: IssueStatus::Resolved,
            reported_by: "Park Visitor".to_string(),
            reported_at: reported(now, 8 * 60),
            upvotes: 15,
            ..issue(
                "CIV-123",
                "Garbage overflow at park entrance",
                "Multiple trash bins overflowing, creating unsanitary conditions near children's playground.",
                "Central Park, Main Entrance",
            )
        },
        RawIssue {
            ward: "ward-3".to_string(),
            category: "utilities".to_string(),
            reported_by: "Business Owner".to_string(),
            reported_at: reported(now, 6 * 60),
            upvotes: 12,
            ..issue(
                "CIV-156",
                "Broken streetlight in commercial area",
                "Street lighting not working, affecting visibility and security in busy commercial zone.",
                "Business District, Pine St & Commerce Ave",
            )
        },
        RawIssue {
            ward: "ward-4".to_string(),
            category: "sanitation".to_string(),
            reported_by: "Resident Association".to_string(),
            reported_at: reported(now, 24 * 60),
            upvotes: 18,
            ..issue(
                "CIV-167",
                "Missed garbage collection for 3 days",
                "Residential area has not had garbage pickup for 3 consecutive days, waste accumulating.",
                "Residential Area, Elm St",
            )
        },
        RawIssue {
            ward: "ward-1".to_string(),
            category: "public-safety".to_string(),
            priority: Priority::Low,
            reported_by: "City Employee".to_string(),
            reported_at: reported(now, 2 * 24 * 60),
            upvotes: 7,
            ..issue(
                "CIV-178",
                "Graffiti on public building",
                "Vandalism affecting the appearance of city hall exterior walls.",
                "City Hall, Center St",
            )
        },
        RawIssue {
            ward: "ward-2".to_string(),
            category: "infrastructure".to_string(),
            priority: Priority::Low,
            status: IssueStatus::InProgress,
            reported_by: "Park User".to_string(),
            reported_at: reported(now, 3 * 24 * 60),
            upvotes: 4,
            ..issue(
                "CIV-182",
                "Park bench damage needs repair",
                "Broken bench slats creating safety hazard and reducing park amenities.",
                "Riverside Park, Bench Area 3",
            )
        },
        RawIssue {
            ward: "ward-4".to_string(),
            category: "infrastructure".to_string(),
            priority: Priority::High,
            reported_by: "Mall Security".to_string(),
            reported_at: reported(now, 60),
            upvotes: 9,
            ..issue(
                "CIV-190",
                "Sidewalk crack creating trip hazard",
                "Large crack in sidewalk near shopping center causing pedestrian safety concern.",
                "Shopping District, Mall Entrance",
            )
        },
        RawIssue {
            ward: "ward-3".to_string(),
            category: "infrastructure".to_string(),
            status: IssueStatus::Resolved,
            reported_by: "Dog Owner".to_string(),
            reported_at: reported(now, 5 * 60),
            upvotes: 6,
            ..issue(
                "CIV-195",
                "Dog park fence damaged",
                "Section of dog park fencing is broken, potential safety issue for pets.",
                "Community Park, Dog Run Area",
            )
        },
    ]
}
