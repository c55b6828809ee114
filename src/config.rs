use serde::Deserialize;

use crate::error::ModuleLoadError;

pub const DEFAULT_CANVAS_ID: &str = "rootCanvas";

/// Startup options supplied by the host page, usually as a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizerConfig {
    /// Id of the canvas element the module draws into.
    pub canvas_id: String,
    pub log_level: String,
    /// Images `texture_test` loads, in request order.
    pub textures: Vec<String>,
    /// Value for `img.crossOrigin`, if images come from another origin.
    pub cross_origin: Option<String>,
    /// Keep the canvas backing store sized to its client box on resize.
    pub sync_canvas_size: bool,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            log_level: "info".to_string(),
            textures: vec!["./snout_stuff.png".to_string(), "./sniff.jpeg".to_string()],
            cross_origin: None,
            sync_canvas_size: true,
        }
    }
}

impl OrganizerConfig {
    pub fn from_json(text: &str) -> Result<Self, ModuleLoadError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ModuleLoadError::Config(e.to_string()))?;
        config.level()?;
        Ok(config)
    }

    pub fn level(&self) -> Result<log::Level, ModuleLoadError> {
        self.log_level
            .parse()
            .map_err(|_| ModuleLoadError::Config(format!("unknown log level: {}", self.log_level)))
    }
}
