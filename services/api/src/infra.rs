use metrics_exporter_prometheus::PrometheusHandle;
use nutri::nutriscore::NutriscoreEngine;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// State handed to the scoring handlers.
#[derive(Clone, Copy, Default)]
pub(crate) struct ScoringState {
    pub(crate) engine: NutriscoreEngine,
}
