use finanhogar_core::config::EngineConfig;
use tracing::debug;

use super::file::read_document;

/// Engine configuration from `--config`, or the built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config: EngineConfig = read_document(path)?;
    config.validate()?;
    debug!(path, "engine configuration loaded");
    Ok(config)
}
