use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BACKGROUND: &str = "#ffffff";
const CORNER_RADIUS: f32 = 10.0;
const TITLE: &str = "💖 Supporters";
const TITLE_COLOR: &str = "#1f2328";
const TITLE_FONT_FAMILY: &str = "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
const TITLE_FONT_SIZE: f32 = 24.0;
const TITLE_FONT_WEIGHT: u16 = 600;
const NAME_COLOR: &str = "#57606a";
const NAME_FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
const NAME_FONT_SIZE: f32 = 11.0;
const FONT_IMPORT_URL: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@600&display=swap";
const HOVER_SCALE: f32 = 1.1;
const TRANSITION_SECS: f32 = 0.2;

/// Visual settings of the document shell. Grid geometry lives in
/// [`crate::layout`] and is not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,

    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_title_color")]
    pub title_color: String,
    #[serde(default = "default_title_font_family")]
    pub title_font_family: String,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f32,
    #[serde(default = "default_title_font_weight")]
    pub title_font_weight: u16,

    #[serde(default = "default_name_color")]
    pub name_color: String,
    #[serde(default = "default_name_font_family")]
    pub name_font_family: String,
    #[serde(default = "default_name_font_size")]
    pub name_font_size: f32,

    /// Stylesheet `@import`ed by linked documents only.
    #[serde(default = "default_font_import_url")]
    pub font_import_url: String,

    #[serde(default = "default_hover_scale")]
    pub hover_scale: f32,
    #[serde(default = "default_transition_secs")]
    pub transition_secs: f32,
}

fn default_background() -> String {
    BACKGROUND.to_string()
}
fn default_corner_radius() -> f32 {
    CORNER_RADIUS
}
fn default_title() -> String {
    TITLE.to_string()
}
fn default_title_color() -> String {
    TITLE_COLOR.to_string()
}
fn default_title_font_family() -> String {
    TITLE_FONT_FAMILY.to_string()
}
fn default_title_font_size() -> f32 {
    TITLE_FONT_SIZE
}
fn default_title_font_weight() -> u16 {
    TITLE_FONT_WEIGHT
}
fn default_name_color() -> String {
    NAME_COLOR.to_string()
}
fn default_name_font_family() -> String {
    NAME_FONT_FAMILY.to_string()
}
fn default_name_font_size() -> f32 {
    NAME_FONT_SIZE
}
fn default_font_import_url() -> String {
    FONT_IMPORT_URL.to_string()
}
fn default_hover_scale() -> f32 {
    HOVER_SCALE
}
fn default_transition_secs() -> f32 {
    TRANSITION_SECS
}

impl Default for Style {
    fn default() -> Self {
        Style {
            background_color: default_background(),
            corner_radius: CORNER_RADIUS,
            title: default_title(),
            title_color: default_title_color(),
            title_font_family: default_title_font_family(),
            title_font_size: TITLE_FONT_SIZE,
            title_font_weight: TITLE_FONT_WEIGHT,
            name_color: default_name_color(),
            name_font_family: default_name_font_family(),
            name_font_size: NAME_FONT_SIZE,
            font_import_url: default_font_import_url(),
            hover_scale: HOVER_SCALE,
            transition_secs: TRANSITION_SECS,
        }
    }
}

impl Style {
    pub fn from_toml(content: &str) -> Result<Self> {
        let style: Style =
            toml::from_str(content).map_err(|e| Error::Style(format!("TOML: {}", e)))?;
        style.validated()
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let style: Style =
            serde_yaml::from_str(content).map_err(|e| Error::Style(format!("YAML: {}", e)))?;
        style.validated()
    }

    /// Loads a style override file. TOML is tried first, then YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let style: Style = match toml::from_str(&content) {
            Ok(style) => style,
            Err(toml_err) => serde_yaml::from_str(&content).map_err(|yaml_err| {
                Error::Style(format!("TOML: {}; YAML: {}", toml_err, yaml_err))
            })?,
        };
        style.validated()
    }

    /// Rejects numbers that would print as `NaN`, `inf` or a negative size in the CSS.
    fn validated(self) -> Result<Self> {
        let checks = [
            ("hover_scale", self.hover_scale, false),
            ("title_font_size", self.title_font_size, false),
            ("name_font_size", self.name_font_size, false),
            ("transition_secs", self.transition_secs, true),
            ("corner_radius", self.corner_radius, true),
        ];

        for (field, value, zero_ok) in checks {
            let in_range = if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !value.is_finite() || !in_range {
                return Err(Error::Style(format!("{} out of range: {}", field, value)));
            }
        }
        Ok(self)
    }
}
