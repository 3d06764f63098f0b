//! JSON configuration loading.
use crate::error::{ComboError, Result};
use crate::params::ComboParams;
use std::fs;
use std::path::Path;

pub fn parse_params(json: &str) -> Result<ComboParams> {
    let params: ComboParams = serde_json::from_str(json)
        .map_err(|e| ComboError::Config(format!("Failed to parse params: {e}")))?;
    params.validate()?;
    Ok(params)
}

pub fn load_config(path: &Path) -> Result<ComboParams> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ComboError::Config(format!("Failed to read config {}: {e}", path.display())))?;
    let params: ComboParams = serde_json::from_str(&contents)
        .map_err(|e| ComboError::Config(format!("Failed to parse config {}: {e}", path.display())))?;
    params.validate()?;
    Ok(params)
}
