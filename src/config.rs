use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    animation::params::{AnimationTiming, FlourishStyle},
    foundation::core::Canvas,
    foundation::error::{AutographError, AutographResult},
    session::ReentryPolicy,
};

/// Settings for a signature pad and its exports, loadable from JSON.
///
/// Every field is optional in the file; missing fields take the defaults below.
///
/// ```json
/// { "canvas": { "width": 800, "height": 300 }, "fonts_dir": "fonts", "reentry": "ignore_while_busy" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignatureConfig {
    pub canvas: Canvas,
    /// Directory scanned for `*.ttf` / `*.otf` files.
    pub fonts_dir: Option<PathBuf>,
    /// Family drawn when the selected one is not loaded.
    pub fallback_family: Option<String>,
    pub timing: AnimationTiming,
    pub flourish: FlourishStyle,
    pub reentry: ReentryPolicy,
    /// Fixed RNG seed for reproducible styles.
    pub seed: Option<u64>,
}

impl SignatureConfig {
    pub fn from_reader<R: Read>(reader: R) -> AutographResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| AutographError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> AutographResult<Self> {
        let f = File::open(path).map_err(|e| {
            AutographError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> AutographResult<()> {
        self.canvas
            .validate()
            .map_err(|e| AutographError::config(format!("canvas: {e}")))?;
        self.timing
            .validate()
            .map_err(|e| AutographError::config(format!("timing: {e}")))?;
        self.flourish
            .validate()
            .map_err(|e| AutographError::config(format!("flourish: {e}")))?;
        if let Some(f) = &self.fallback_family
            && f.trim().is_empty()
        {
            return Err(AutographError::config("fallback_family must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
