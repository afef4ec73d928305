use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{IssueId, IssueStatus, Priority, RawIssue};

/// Reads raw issue reports from a CSV export.
///
/// Expected header: `id,title,description,location,ward,category,priority,status,
/// reported_by,reported_at,upvotes`. Blank `status` means pending and blank `upvotes` zero.
pub struct IssueCsvImporter;

impl IssueCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawIssue>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawIssue>, IntakeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut issues = Vec::new();

        for (index, record) in csv_reader.deserialize::<IssueRow>().enumerate() {
            // header is line 1
            let line = index + 2;
            issues.push(record?.into_issue(line)?);
        }

        Ok(issues)
    }
}

#[derive(Debug, Deserialize)]
struct IssueRow {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    ward: String,
    #[serde(default)]
    category: String,
    priority: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default)]
    reported_by: String,
    reported_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    upvotes: Option<String>,
}

impl IssueRow {
    fn into_issue(self, line: usize) -> Result<RawIssue, IntakeError> {
        let priority = Priority::parse(&self.priority).ok_or_else(|| IntakeError::InvalidField {
            line,
            field: "priority",
            value: self.priority.clone(),
        })?;

        let status = match self.status.as_deref() {
            Some(raw) => IssueStatus::parse(raw).ok_or_else(|| IntakeError::InvalidField {
                line,
                field: "status",
                value: raw.to_string(),
            })?,
            None => IssueStatus::Pending,
        };

        let reported_at =
            parse_timestamp(&self.reported_at).ok_or_else(|| IntakeError::InvalidField {
                line,
                field: "reported_at",
                value: self.reported_at.clone(),
            })?;

        let upvotes = match self.upvotes.as_deref() {
            Some(raw) => raw.parse::<u32>().map_err(|_| IntakeError::InvalidField {
                line,
                field: "upvotes",
                value: raw.to_string(),
            })?,
            None => 0,
        };

        Ok(RawIssue {
            id: IssueId(self.id),
            title: self.title,
            description: self.description,
            location: self.location,
            ward: self.ward,
            category: self.category,
            priority,
            status,
            reported_by: self.reported_by,
            reported_at,
            upvotes,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Failure to turn a CSV export into raw issues.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read issue export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid issue CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "id,title,description,location,ward,category,priority,status,reported_by,reported_at,upvotes\n";

    #[test]
    fn parse_timestamp_supports_rfc3339_and_dates() {
        let rfc = parse_timestamp("2025-09-24T10:00:00+02:00").expect("rfc3339");
        assert_eq!(rfc.to_rfc3339(), "2025-09-24T08:00:00+00:00");

        let date = parse_timestamp("2025-09-30").expect("plain date");
        assert_eq!(date.to_rfc3339(), "2025-09-30T00:00:00+00:00");

        assert!(parse_timestamp("  ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn reads_rows_with_defaults_for_blank_fields() {
        let csv = format!(
            "{HEADER}CIV-001, Water main burst ,Flooding,Medical District,ward-1,utilities,critical,,Emergency Services,2025-09-24T10:00:00Z,\n"
        );
        let issues = IssueCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.id, IssueId("CIV-001".to_string()));
        assert_eq!(issue.title, "Water main burst");
        assert_eq!(issue.priority, Priority::Critical);
        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(issue.upvotes, 0);
    }

    #[test]
    fn reports_the_offending_line() {
        let csv = format!(
            "{HEADER}CIV-001,Pothole,,Downtown,ward-1,infrastructure,high,pending,Resident,2025-09-24,3\n\
CIV-002,Graffiti,,Downtown,ward-1,public-safety,whenever,pending,Resident,2025-09-24,1\n"
        );
        let err = IssueCsvImporter::from_reader(Cursor::new(csv)).expect_err("bad priority");

        match err {
            IntakeError::InvalidField { line, field, value } => {
                assert_eq!(line, 3);
                assert_eq!(field, "priority");
                assert_eq!(value, "whenever");
            }
            other => panic!("expected invalid field, got {other:?}"),
        }
    }
}
