//! Override configuration loading.
//!
//! This module loads the special-case employee override table from a YAML
//! file. See `config/overrides.yaml` for the shipped table.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::OverrideConfig;

/// Loads and validates the override table from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the override file (e.g. "config/overrides.yaml")
///
/// # Returns
///
/// Returns the validated [`OverrideConfig`] on success, or an error if the
/// file is missing, is not valid YAML, or contains an override descriptor
/// that fails validation.
///
/// # Example
///
/// ```no_run
/// use payroll_recon::config::load_overrides;
///
/// let overrides = load_overrides("config/overrides.yaml")?;
/// assert!(overrides.for_employee(693133).is_some());
/// # Ok::<(), payroll_recon::error::EngineError>(())
/// ```
pub fn load_overrides<P: AsRef<Path>>(path: P) -> EngineResult<OverrideConfig> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    let config: OverrideConfig =
        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

    config.validate()?;

    tracing::debug!(
        overrides = config.overrides.len(),
        "loaded employee override table"
    );

    Ok(config)
}
