use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{SceneError, SceneResult};
use crate::persist::store::RecordKind;

/// Engine-wide tuning knobs.
///
/// Every field has a default, so an empty JSON object (`{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Safety timeout after which a content-bearing element is treated as ready.
    pub readiness_timeout_ms: u64,
    /// Directional reset threshold, as a multiple of the viewport height.
    pub reset_viewport_factor: f64,
    /// Offset applied on both axes to duplicated elements.
    pub duplicate_offset: f64,
    /// Maximum number of undo checkpoints kept.
    pub history_limit: usize,
    /// Record kind queried first on load (the other one is the fallback).
    pub primary_kind: RecordKind,
    /// Entrance duration used when a layer's animation omits it.
    pub default_entrance_duration_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            readiness_timeout_ms: 3_000,
            reset_viewport_factor: 1.5,
            duplicate_offset: 20.0,
            history_limit: 100,
            primary_kind: RecordKind::Template,
            default_entrance_duration_ms: 800,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would make the runtime misbehave.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.reset_viewport_factor.is_finite() || self.reset_viewport_factor <= 0.0 {
            return Err(SceneError::validation(
                "resetViewportFactor must be finite and > 0",
            ));
        }
        if !self.duplicate_offset.is_finite() {
            return Err(SceneError::validation("duplicateOffset must be finite"));
        }
        if self.history_limit == 0 {
            return Err(SceneError::validation("historyLimit must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
