//! Pure calculation functions for layout and text wrapping.
//!
//! All functions here are pure and testable without any I/O or images. Text
//! width comes in through the [`TextMeasure`] trait so wrapping can be tested
//! with a fixed-advance measure instead of a real font.

use crate::config::LayoutConfig;
use crate::types::CaptionSide;

/// How much brighter the bottom row of the background is than the top.
pub const GRADIENT_LIFT: f64 = 0.2;

/// Anything that can report the rendered pixel width of a line of text.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> u32;
}

/// Color of background row `y` on a canvas of `height` rows.
///
/// Each channel is linearly interpolated from `base` toward `base * 1.2`,
/// truncated and saturated at 255.
///
/// # Examples
/// ```
/// # use shotframe::imaging::calculations::gradient_row_color;
/// assert_eq!(gradient_row_color([100, 50, 0], 0, 800), [100, 50, 0]);
/// assert_eq!(gradient_row_color([100, 50, 0], 400, 800), [110, 55, 0]);
/// ```
pub fn gradient_row_color(base: [u8; 3], y: u32, height: u32) -> [u8; 3] {
    let ratio = if height == 0 {
        0.0
    } else {
        y as f64 / height as f64
    };
    base.map(|c| {
        let c = c as f64;
        (c + c * GRADIENT_LIFT * ratio).min(255.0) as u8
    })
}

/// Uniform scale that fits `content` inside `available`, times `shrink`.
pub fn fit_scale(content: (u32, u32), available: (u32, u32), shrink: f32) -> f64 {
    let (cw, ch) = (content.0.max(1) as f64, content.1.max(1) as f64);
    let (aw, ah) = (available.0 as f64, available.1 as f64);
    (aw / cw).min(ah / ch) * shrink as f64
}

/// Apply a scale factor, truncating to whole pixels (never below 1).
pub fn scale_dimensions(dims: (u32, u32), scale: f64) -> (u32, u32) {
    (
        ((dims.0 as f64 * scale) as u32).max(1),
        ((dims.1 as f64 * scale) as u32).max(1),
    )
}

/// Offset that centers `inner` within `outer`, flooring like integer division.
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64).div_euclid(2)
}

/// Greedy word wrap.
///
/// Words are appended to the current line until the joined line would measure
/// wider than `max_width`; the line then breaks before that word. A word that
/// is too wide on its own still gets a line to itself, unmodified.
pub fn wrap_words(text: &str, max_width: u32, measure: &impl TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        if measure.text_width(&current.join(" ")) > max_width {
            if current.len() > 1 {
                current.pop();
                lines.push(current.join(" "));
                current = vec![word];
            } else {
                lines.push(word.to_string());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

/// Title and subtitle after wrapping, with line metrics for stacking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedCaption {
    pub title: Vec<String>,
    pub subtitle: Vec<String>,
    pub title_line_height: u32,
    pub subtitle_line_height: u32,
    /// Space between the last title line and the first subtitle line.
    pub gap: u32,
}

impl WrappedCaption {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.subtitle.is_empty()
    }

    fn title_height(&self) -> u32 {
        self.title.len() as u32 * self.title_line_height
    }

    /// Total height of the stacked line block.
    pub fn height(&self) -> u32 {
        if self.subtitle.is_empty() {
            self.title_height()
        } else {
            self.title_height() + self.gap + self.subtitle.len() as u32 * self.subtitle_line_height
        }
    }

    /// Offset of the first subtitle line from the block top.
    pub fn subtitle_offset(&self) -> u32 {
        self.title_height() + self.gap
    }
}

/// Where the caption block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionSlot {
    /// Left edge of the caption column.
    pub x: i64,
    /// Top of the line block.
    pub y: i64,
    pub width: u32,
    /// Center each line horizontally within the column.
    pub centered: bool,
}

/// Screenshot size and placement, plus the caption slot if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: f64,
    pub shot_x: i64,
    pub shot_y: i64,
    pub shot_size: (u32, u32),
    pub caption: Option<CaptionSlot>,
}

/// Compute scale and placement for a decorated screenshot.
///
/// `decorated` is the shadow-wrapped size; scaling is computed against it so
/// the placed image is always inside the padded area. `caption` is the side
/// and the height of the wrapped caption block.
pub fn plan_layout(
    canvas: (u32, u32),
    decorated: (u32, u32),
    params: &LayoutConfig,
    caption: Option<(CaptionSide, u32)>,
) -> Layout {
    let (canvas_w, canvas_h) = canvas;
    let padded_w = canvas_w.saturating_sub(params.padding.saturating_mul(2));
    let padded_h = canvas_h.saturating_sub(params.padding.saturating_mul(2));

    let (reserved_w, reserved_h) = match caption {
        Some((CaptionSide::Left | CaptionSide::Right, _)) => {
            (params.caption_width.saturating_add(params.gap), 0)
        }
        // Leave at least one row for the screenshot
        Some((CaptionSide::Below, block_height)) => (
            0,
            block_height.saturating_add(params.gap).min(padded_h.saturating_sub(1)),
        ),
        None => (0, 0),
    };

    let available = (
        padded_w.saturating_sub(reserved_w).max(1),
        padded_h.saturating_sub(reserved_h).max(1),
    );
    let scale = fit_scale(decorated, available, params.shrink);
    let shot_size @ (shot_w, shot_h) = scale_dimensions(decorated, scale);

    match caption {
        None => Layout {
            scale,
            shot_x: center_offset(canvas_w, shot_w),
            shot_y: center_offset(canvas_h, shot_h),
            shot_size,
            caption: None,
        },
        Some((side @ (CaptionSide::Left | CaptionSide::Right), block_height)) => {
            let combo_x = center_offset(canvas_w, shot_w.saturating_add(reserved_w));
            let (shot_x, caption_x) = if side == CaptionSide::Right {
                (combo_x, combo_x + shot_w as i64 + params.gap as i64)
            } else {
                (combo_x + reserved_w as i64, combo_x)
            };
            Layout {
                scale,
                shot_x,
                shot_y: center_offset(canvas_h, shot_h),
                shot_size,
                caption: Some(CaptionSlot {
                    x: caption_x,
                    y: center_offset(canvas_h, block_height),
                    width: params.caption_width,
                    centered: false,
                }),
            }
        }
        Some((CaptionSide::Below, _)) => {
            let combo_y = center_offset(canvas_h, shot_h.saturating_add(reserved_h));
            Layout {
                scale,
                shot_x: center_offset(canvas_w, shot_w),
                shot_y: combo_y,
                shot_size,
                caption: Some(CaptionSlot {
                    x: params.padding as i64,
                    y: combo_y + shot_h as i64 + params.gap as i64,
                    width: padded_w,
                    centered: true,
                }),
            }
        }
    }
}
