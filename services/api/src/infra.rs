use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use civicwatch::config::CatalogConfig;
use civicwatch::workflows::accountability::{CatalogError, EvaluationData};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve the question catalog: an externally supplied JSON file when
/// configured, the built-in bank otherwise.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<EvaluationData, CatalogError> {
    match &config.path {
        Some(path) => EvaluationData::from_path(path),
        None => Ok(EvaluationData::builtin()),
    }
}
