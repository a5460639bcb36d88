mod engine;

pub use engine::{BoardSnapshot, Engine, EngineCommand, EngineEvent, EngineHandle};

use anyhow::Context as _;
use flowdeck_domain::SettingsStore;
use std::sync::Arc;

/// Opens the sqlite settings store at the default location
/// (`FLOWDECK_ROOT`, falling back to `~/.flowdeck`).
pub fn default_settings_store() -> anyhow::Result<Arc<dyn SettingsStore>> {
    let db_path = flowdeck_backend::default_db_path()?;
    let store =
        flowdeck_backend::SqliteStore::new(db_path).context("failed to init settings store")?;
    Ok(Arc::new(store))
}
