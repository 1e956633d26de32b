//! Application state for the dose API

use std::path::PathBuf;
use std::sync::Arc;

use dose_schedule::{Clock, JsonFileStore, SystemClock};

pub struct AppState {
    pub store: JsonFileStore,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self::with_clock(settings_path, Arc::new(SystemClock))
    }

    pub fn with_clock(settings_path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let store = JsonFileStore::new(settings_path);
        tracing::info!("Using schedule file: {}", store.path().display());
        Self { store, clock }
    }
}
