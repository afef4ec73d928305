use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use super::domain::{EnrichedIssueRecord, RawIssue};
use super::enricher::RecordEnricher;
use super::query::{self, DepartmentLoadEntry, IssueFilter, IssueStats};

/// Router exposing enrichment and dashboard queries over JSON.
pub fn triage_router(enricher: Arc<RecordEnricher>) -> Router {
    Router::new()
        .route("/api/v1/issues/enrich", post(enrich_handler))
        .route("/api/v1/issues/batch", post(batch_handler))
        .with_state(enricher)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchEnrichRequest {
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub filter: IssueFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEnrichResponse {
    /// Filtered records, most urgent first.
    pub records: Vec<EnrichedIssueRecord>,
    pub stats: IssueStats,
    pub department_load: Vec<DepartmentLoadEntry>,
}

pub(crate) async fn enrich_handler(
    State(enricher): State<Arc<RecordEnricher>>,
    Json(issue): Json<RawIssue>,
) -> Json<EnrichedIssueRecord> {
    Json(enricher.enrich(&issue))
}

pub(crate) async fn batch_handler(
    State(enricher): State<Arc<RecordEnricher>>,
    Json(request): Json<BatchEnrichRequest>,
) -> Response {
    let BatchEnrichRequest { issues, filter } = request;
    let submitted = issues.len();

    let enriched = tokio::task::spawn_blocking(move || enricher.enrich_batch(&issues)).await;

    match enriched {
        Ok(records) => {
            let selected = query::filter(&records, &filter);
            let response = BatchEnrichResponse {
                stats: query::compute_stats(&selected),
                department_load: query::department_load(&selected),
                records: query::prioritized(&selected),
            };
            info!(
                submitted,
                returned = response.records.len(),
                "batch enrichment complete"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            error!(%err, "batch enrichment worker failed");
            let payload = json!({ "error": "batch enrichment failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
