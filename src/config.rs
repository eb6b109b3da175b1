use serde::Deserialize;

use crate::error::IndexError;

/// Process-wide settings, loaded once at startup and read-only after.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage_root: String,
}

impl Settings {
    /// Environment settings (FJSON_ prefix), overridden by explicit CLI values.
    /// An empty storage root is fatal before any I/O happens.
    pub fn load(cli_root: Option<String>) -> Result<Settings, IndexError> {
        let mut settings: Settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("FJSON"))
            .build()?
            .try_deserialize()?;

        if let Some(root) = cli_root {
            settings.storage_root = root;
        }
        if settings.storage_root.is_empty() {
            return Err(IndexError::StorageNotConfigured);
        }
        Ok(settings)
    }
}
