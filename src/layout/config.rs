//! Configuration for the layout compiler

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a layout configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Fixed constants and defaults used during layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Height of the x-axis band added to tracks that render an axis
    pub axis_height: f64,

    /// Height of the title band
    pub title_height: f64,

    /// Height of the subtitle band
    pub subtitle_height: f64,

    /// Margin between the title band and the first track
    pub title_margin: f64,

    /// Default spacing between sibling views
    pub view_spacing: f64,

    /// Padding added around a circular view when deriving its total radius
    pub circular_padding: f64,

    /// Default fraction of the total radius left empty at the center of a
    /// circular view
    pub center_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            axis_height: 30.0,
            title_height: 24.0,
            subtitle_height: 20.0,
            title_margin: 12.0,
            view_spacing: 10.0,
            circular_padding: 0.0,
            center_radius: 0.3,
        }
    }
}

/// TOML structure for deserializing partial configuration overrides
#[derive(Deserialize)]
struct TomlConfig {
    axis_height: Option<f64>,
    title_height: Option<f64>,
    subtitle_height: Option<f64>,
    title_margin: Option<f64>,
    view_spacing: Option<f64>,
    circular_padding: Option<f64>,
    center_radius: Option<f64>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file; omitted keys keep their
    /// default values
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            axis_height: parsed.axis_height.unwrap_or(defaults.axis_height),
            title_height: parsed.title_height.unwrap_or(defaults.title_height),
            subtitle_height: parsed.subtitle_height.unwrap_or(defaults.subtitle_height),
            title_margin: parsed.title_margin.unwrap_or(defaults.title_margin),
            view_spacing: parsed.view_spacing.unwrap_or(defaults.view_spacing),
            circular_padding: parsed.circular_padding.unwrap_or(defaults.circular_padding),
            center_radius: parsed.center_radius.unwrap_or(defaults.center_radius),
        })
    }

    /// Set the default spacing between sibling views
    pub fn with_view_spacing(mut self, spacing: f64) -> Self {
        self.view_spacing = spacing;
        self
    }

    /// Set the x-axis band height
    pub fn with_axis_height(mut self, height: f64) -> Self {
        self.axis_height = height;
        self
    }

    /// Set the circular view padding
    pub fn with_circular_padding(mut self, padding: f64) -> Self {
        self.circular_padding = padding;
        self
    }

    /// Set the default center-radius fraction for circular views
    pub fn with_center_radius(mut self, fraction: f64) -> Self {
        self.center_radius = fraction;
        self
    }
}
