use std::sync::Arc;

use crate::config::Config;
use crate::screening::engine::Screener;
use crate::screening::tables::ScreeningTables;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable screener. Default: the keyword `ScreeningEngine`.
    pub screener: Arc<dyn Screener>,
    /// Tables the screener was built with, served read-only.
    pub tables: Arc<ScreeningTables>,
}
