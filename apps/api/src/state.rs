use std::sync::Arc;

use crate::config::Config;
use crate::fitment::catalog::Catalog;
use crate::fitment::scoring::FitmentScorer;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validated at startup, read-only afterwards.
    pub catalog: Arc<Catalog>,
    /// Pluggable fitment scorer. Default: WeightedFitmentScorer.
    pub fit_scorer: Arc<dyn FitmentScorer>,
    pub store: Arc<dyn Store>,
}
