use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::color::parse_color;
use crate::error::ConfigError;
use crate::export::ExportConfig;
use crate::surface::DEFAULT_BRUSH_SIZE;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Startup settings for the host. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub initial_color: String,
    /// Logical units, converted by the surface density
    pub initial_brush_size: f32,
    /// Color specs shown as palette buttons
    pub palette: Vec<String>,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_color: "#000000".to_owned(),
            initial_brush_size: DEFAULT_BRUSH_SIZE,
            palette: [
                "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FFA500", "#8B4513",
                "#FFC0CB", "#FFFFFF",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults if it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        parse_color(&self.initial_color)?;
        for spec in &self.palette {
            parse_color(spec)?;
        }
        if !(self.initial_brush_size.is_finite() && self.initial_brush_size > 0.0) {
            return Err(ConfigError::InvalidBrushSize(self.initial_brush_size));
        }
        Ok(())
    }
}
