use serde::{Deserialize, Serialize};

/// Window opacity used when no settings file exists yet.
pub const DEFAULT_OPACITY: f32 = 0.80;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Whole-window opacity of the image window. The slider keeps this within
    /// `[0.10, 0.95]`; the store itself does not clamp.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing, empty or unparsable file silently
    /// yields the defaults; the two failure cases are indistinguishable to
    /// callers.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, path, "settings file is malformed; using defaults");
                Self::default()
            }
        }
    }

    /// Serialize the whole state and overwrite the file at `path`. The write
    /// is destructive; a partial write is recovered on the next `load` by
    /// falling back to defaults.
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
