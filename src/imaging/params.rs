//! Resolved rendering parameters.
//!
//! [`Style`] is what the compositing functions consume. It is built from the
//! user-facing [`Config`](crate::config::Config) and carries typed pixel
//! colors instead of raw `[r, g, b]` arrays.
//!
//! ## Types
//!
//! - [`Style`]: canvas size, background, decoration, layout and caption typography.
//! - [`TextStyle`]: font size, line height, and the foreground/shadow colors of one caption role.

use crate::config::{Config, DecorationConfig, LayoutConfig, TextStyleConfig};
use crate::types::CaptionSide;
use image::Rgba;

/// Store listing width in pixels.
pub const OUTPUT_WIDTH: u32 = 1280;
/// Store listing height in pixels.
pub const OUTPUT_HEIGHT: u32 = 800;

/// Typography for one caption role (title or subtitle).
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub line_height: u32,
    pub color: Rgba<u8>,
    /// Color of the offset copy drawn behind each line.
    pub shadow: Rgba<u8>,
}

impl TextStyle {
    fn from_config(config: &TextStyleConfig) -> Self {
        let [r, g, b] = config.color;
        Self {
            size: config.size,
            line_height: config.line_height,
            color: Rgba([r, g, b, 255]),
            shadow: Rgba([0, 0, 0, config.shadow_alpha]),
        }
    }
}

/// Everything needed to render one listing image, apart from the fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Output canvas (width, height).
    pub canvas: (u32, u32),
    pub background: [u8; 3],
    pub decoration: DecorationConfig,
    pub layout: LayoutConfig,
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub title_subtitle_gap: u32,
    pub text_shadow_offset: i32,
}

impl Style {
    pub fn from_config(config: &Config) -> Self {
        Self {
            canvas: (OUTPUT_WIDTH, OUTPUT_HEIGHT),
            background: config.background,
            decoration: config.decoration.clone(),
            layout: config.layout.clone(),
            title: TextStyle::from_config(&config.captions.title),
            subtitle: TextStyle::from_config(&config.captions.subtitle),
            title_subtitle_gap: config.captions.title_subtitle_gap,
            text_shadow_offset: config.captions.text_shadow_offset,
        }
    }

    /// Pixel width captions wrap at.
    ///
    /// Side captions wrap inside the caption column; captions below the
    /// screenshot span the padded canvas width.
    pub fn wrap_width(&self, side: CaptionSide) -> u32 {
        let column = match side {
            CaptionSide::Left | CaptionSide::Right => self.layout.caption_width,
            CaptionSide::Below => {
                let both_pads = self.layout.padding.saturating_mul(2);
                self.canvas.0.saturating_sub(both_pads)
            }
        };
        column.saturating_sub(self.layout.caption_inset)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
