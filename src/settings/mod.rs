use std::path::Path;

use crate::{
    foundation::error::{CdgError, CdgResult},
    instruction::model::VerticalScrollSource,
};

/// Host-selected player behaviour, typically read from a JSON file.
///
/// Missing fields take their defaults, so `{}` is a valid settings document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerSettings {
    /// Which payload field drives vertical whole-tile scrolling.
    pub vertical_scroll: VerticalScrollSource,
    /// Subtracted from every audio sync position (ms) to compensate for
    /// latency in the audio path.
    pub sync_offset_ms: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            vertical_scroll: VerticalScrollSource::VerticalField,
            sync_offset_ms: 0.0,
        }
    }
}

impl PlayerSettings {
    pub fn from_json_str(s: &str) -> CdgResult<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| CdgError::settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CdgResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| CdgError::settings(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> CdgResult<()> {
        if !self.sync_offset_ms.is_finite() {
            return Err(CdgError::settings("sync_offset_ms must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/settings.rs"]
mod tests;
