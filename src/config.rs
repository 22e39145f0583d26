//! Batch configuration.
//!
//! Handles loading, validating, and merging `shotframe.toml`. The stock
//! defaults reproduce the listing set shipped with the extension, so running
//! without any config file renders the four store images.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "screenshots"
//! output_dir = "screenshots/store-listing"
//! background = [45, 55, 72]
//!
//! [decoration]
//! corner_radius = 12
//! shadow_offset = 15
//! shadow_blur = 30.0
//! shadow_opacity = 180
//!
//! [layout]
//! padding = 60
//! shrink = 0.98
//! caption_width = 340
//! caption_inset = 20
//! gap = 40
//!
//! [captions]
//! title_subtitle_gap = 10
//! text_shadow_offset = 2
//!
//! [captions.title]
//! size = 72.0
//! line_height = 85
//! color = [255, 255, 255]
//! shadow_alpha = 150
//!
//! [captions.subtitle]
//! size = 42.0
//! line_height = 55
//! color = [200, 200, 200]
//! shadow_alpha = 100
//!
//! [fonts]
//! title = ["bahnschrift.ttf", "segoeui.ttf", "arial.ttf"]
//! subtitle = ["seguili.ttf", "segoeuii.ttf", "ariali.ttf"]
//! search_dirs = ["fonts", "C:\\Windows\\Fonts", "/usr/share/fonts", ...]
//!
//! [[images]]
//! source = "Screenshot 2025-12-25 215031.png"
//! output = "1-popup-dark.png"
//! caption = { title = "Dark Theme", subtitle = "..." }
//! side = "right"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key-by-key over the stock defaults; arrays (including `[[images]]`)
//! replace the stock value wholesale.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{OUTPUT_HEIGHT, OUTPUT_WIDTH};
use crate::types::{BatchEntry, Caption, CaptionSide};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "shotframe.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// An sRGB color as `[r, g, b]`.
pub type Color = [u8; 3];

/// Top-level configuration loaded from `shotframe.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory screenshots are read from.
    pub input_dir: String,
    /// Directory listing images are written to. Created if absent.
    pub output_dir: String,
    /// Base color of the gradient background; also the flatten color.
    pub background: Color,
    pub decoration: DecorationConfig,
    pub layout: LayoutConfig,
    pub captions: CaptionConfig,
    pub fonts: FontsConfig,
    /// The batch table, processed in order.
    pub images: Vec<BatchEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: "screenshots".to_string(),
            output_dir: "screenshots/store-listing".to_string(),
            background: [45, 55, 72],
            decoration: DecorationConfig::default(),
            layout: LayoutConfig::default(),
            captions: CaptionConfig::default(),
            fonts: FontsConfig::default(),
            images: stock_images(),
        }
    }
}

/// Rounded corners and drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecorationConfig {
    pub corner_radius: u32,
    /// Shadow displacement; the decorated image grows by twice this per axis.
    pub shadow_offset: u32,
    /// Gaussian sigma applied to the shadow layer.
    pub shadow_blur: f32,
    pub shadow_opacity: u8,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            corner_radius: 12,
            shadow_offset: 15,
            shadow_blur: 30.0,
            shadow_opacity: 180,
        }
    }
}

/// Screenshot placement and caption column geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Margin kept clear on every canvas edge.
    pub padding: u32,
    /// Multiplier applied to the fit scale, in `(0, 1]`.
    pub shrink: f32,
    /// Width reserved for a side caption column.
    pub caption_width: u32,
    /// Subtracted from `caption_width` to get the wrap width.
    pub caption_inset: u32,
    /// Space between screenshot and caption.
    pub gap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 60,
            shrink: 0.98,
            caption_width: 340,
            caption_inset: 20,
            gap: 40,
        }
    }
}

/// Typography for one caption role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextStyleConfig {
    /// Font size in pixels.
    pub size: f32,
    pub line_height: u32,
    pub color: Color,
    /// Alpha of the dark copy drawn behind each line.
    pub shadow_alpha: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    pub title: TextStyleConfig,
    pub subtitle: TextStyleConfig,
    pub title_subtitle_gap: u32,
    pub text_shadow_offset: i32,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            title: TextStyleConfig {
                size: 72.0,
                line_height: 85,
                color: [255, 255, 255],
                shadow_alpha: 150,
            },
            subtitle: TextStyleConfig {
                size: 42.0,
                line_height: 55,
                color: [200, 200, 200],
                shadow_alpha: 100,
            },
            title_subtitle_gap: 10,
            text_shadow_offset: 2,
        }
    }
}

/// Font candidates, tried in order; the built-in face is the last resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    pub title: Vec<String>,
    pub subtitle: Vec<String>,
    /// Directories walked recursively for candidate file names.
    /// A leading `~/` expands to `$HOME`.
    pub search_dirs: Vec<String>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            title: vec![
                "bahnschrift.ttf".to_string(),
                "segoeui.ttf".to_string(),
                "arial.ttf".to_string(),
            ],
            subtitle: vec![
                "seguili.ttf".to_string(),
                "segoeuii.ttf".to_string(),
                "ariali.ttf".to_string(),
            ],
            search_dirs: vec![
                "fonts".to_string(),
                "C:\\Windows\\Fonts".to_string(),
                "/usr/share/fonts".to_string(),
                "/usr/local/share/fonts".to_string(),
                "/Library/Fonts".to_string(),
                "/System/Library/Fonts".to_string(),
                "~/.fonts".to_string(),
            ],
        }
    }
}

/// The listing set for the extension's store page.
fn stock_images() -> Vec<BatchEntry> {
    [
        (
            "Screenshot 2025-12-25 215031.png",
            "1-popup-dark.png",
            "Dark Theme",
            "Manage search engines with a sleek dark interface",
        ),
        (
            "Screenshot 2025-12-25 215243.png",
            "2-popup-light.png",
            "Light Theme",
            "Automatic theme switching to match your preferences",
        ),
        (
            "Screenshot 2025-12-25 220054.png",
            "3-context-menu-single.png",
            "Quick Search",
            "Right-click selected text to search instantly",
        ),
        (
            "Screenshot 2025-12-25 220209.png",
            "4-context-menu-multiple.png",
            "Multiple Engines",
            "Choose from all your enabled search engines",
        ),
    ]
    .into_iter()
    .map(|(source, output, title, subtitle)| BatchEntry {
        source: source.to_string(),
        output: output.to_string(),
        caption: Some(Caption::titled(title, subtitle)),
        side: CaptionSide::Right,
    })
    .collect()
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.shrink > 0.0 && layout.shrink <= 1.0) {
            return Err(ConfigError::Validation(
                "layout.shrink must be in (0, 1]".into(),
            ));
        }
        if layout.caption_inset >= layout.caption_width {
            return Err(ConfigError::Validation(
                "layout.caption_inset must be smaller than layout.caption_width".into(),
            ));
        }
        let no_room = || {
            ConfigError::Validation(format!(
                "layout leaves no room for the screenshot on a {}x{} canvas",
                OUTPUT_WIDTH, OUTPUT_HEIGHT
            ))
        };
        let both_pads = layout.padding.checked_mul(2).ok_or_else(no_room)?;
        let side_reserve = both_pads
            .checked_add(layout.caption_width)
            .and_then(|w| w.checked_add(layout.gap))
            .ok_or_else(no_room)?;
        if side_reserve >= OUTPUT_WIDTH || both_pads >= OUTPUT_HEIGHT {
            return Err(no_room());
        }
        let shadow_margin = self.decoration.shadow_offset.checked_mul(2);
        if shadow_margin.is_none_or(|m| m >= OUTPUT_WIDTH.min(OUTPUT_HEIGHT)) {
            return Err(ConfigError::Validation(format!(
                "decoration.shadow_offset must be less than {}",
                OUTPUT_WIDTH.min(OUTPUT_HEIGHT) / 2
            )));
        }
        if !self.decoration.shadow_blur.is_finite() || self.decoration.shadow_blur < 0.0 {
            return Err(ConfigError::Validation(
                "decoration.shadow_blur must be a non-negative number".into(),
            ));
        }
        for (name, style) in [
            ("title", &self.captions.title),
            ("subtitle", &self.captions.subtitle),
        ] {
            if style.size <= 0.0 || !style.size.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "captions.{name}.size must be positive"
                )));
            }
            if style.line_height == 0 {
                return Err(ConfigError::Validation(format!(
                    "captions.{name}.line_height must be positive"
                )));
            }
        }
        let mut outputs = HashSet::new();
        for entry in &self.images {
            if entry.source.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "images.source must not be empty".into(),
                ));
            }
            let is_png = Path::new(&entry.output)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if !is_png {
                return Err(ConfigError::Validation(format!(
                    "images.output must be a .png file: {}",
                    entry.output
                )));
            }
            if !outputs.insert(entry.output.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate images.output: {}",
                    entry.output
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// A missing file is not an error: the stock defaults are returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `shotframe.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# shotframe configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory screenshots are read from.
input_dir = "screenshots"

# Directory listing images are written to (created if missing).
output_dir = "screenshots/store-listing"

# Base color of the vertical gradient, as [r, g, b]. The bottom row is
# 20% brighter than the top row.
background = [45, 55, 72]

# ---------------------------------------------------------------------------
# Screenshot decoration
# ---------------------------------------------------------------------------
[decoration]
corner_radius = 12
# The drop shadow grows the screenshot by twice the offset on each axis.
shadow_offset = 15
# Gaussian blur sigma for the shadow.
shadow_blur = 30.0
shadow_opacity = 180

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Margin kept clear on each canvas edge.
padding = 60
# Fraction of the available space the screenshot fills, in (0, 1].
shrink = 0.98
# Width of the caption column beside the screenshot.
caption_width = 340
# Caption text wraps at caption_width - caption_inset.
caption_inset = 20
# Space between screenshot and caption.
gap = 40

# ---------------------------------------------------------------------------
# Caption typography
# ---------------------------------------------------------------------------
[captions]
title_subtitle_gap = 10
# Offset of the dark copy drawn behind each line of text.
text_shadow_offset = 2

[captions.title]
size = 72.0
line_height = 85
color = [255, 255, 255]
shadow_alpha = 150

[captions.subtitle]
size = 42.0
line_height = 55
color = [200, 200, 200]
shadow_alpha = 100

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
# Candidates are tried in order. If none is found in search_dirs, a built-in
# face is used.
[fonts]
title = ["bahnschrift.ttf", "segoeui.ttf", "arial.ttf"]
subtitle = ["seguili.ttf", "segoeuii.ttf", "ariali.ttf"]
search_dirs = [
    "fonts",
    "C:\\Windows\\Fonts",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "~/.fonts",
]

# ---------------------------------------------------------------------------
# Batch table
# ---------------------------------------------------------------------------
# caption is either a string or { title = "...", subtitle = "..." }.
# side is "right" (default), "left" or "below".
[[images]]
source = "Screenshot 2025-12-25 215031.png"
output = "1-popup-dark.png"
caption = { title = "Dark Theme", subtitle = "Manage search engines with a sleek dark interface" }
side = "right"

[[images]]
source = "Screenshot 2025-12-25 215243.png"
output = "2-popup-light.png"
caption = { title = "Light Theme", subtitle = "Automatic theme switching to match your preferences" }
side = "right"

[[images]]
source = "Screenshot 2025-12-25 220054.png"
output = "3-context-menu-single.png"
caption = { title = "Quick Search", subtitle = "Right-click selected text to search instantly" }
side = "right"

[[images]]
source = "Screenshot 2025-12-25 220209.png"
output = "4-context-menu-multiple.png"
caption = { title = "Multiple Engines", subtitle = "Choose from all your enabled search engines" }
side = "right"
"##
}
