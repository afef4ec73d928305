use civic_triage::config::TriageConfig;
use civic_triage::error::AppError;
use civic_triage::triage::RecordEnricher;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_enricher(config: &TriageConfig) -> Result<Arc<RecordEnricher>, AppError> {
    let enricher = RecordEnricher::from_config(config)?;
    info!(
        departments = enricher.catalog().departments().len(),
        catalog = config
            .catalog_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "standard".to_string()),
        assignment = ?config.assignment,
        "triage engine initialised"
    );
    Ok(Arc::new(enricher))
}
