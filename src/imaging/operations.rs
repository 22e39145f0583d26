//! High-level listing operations.
//!
//! These functions combine layout calculations with rasterization: decorate
//! the screenshot, plan the layout, composite, draw captions, flatten.

use super::calculations::{
    CaptionSlot, TextMeasure, WrappedCaption, center_offset, plan_layout, wrap_words,
};
use super::decorate::{add_shadow, flatten, gradient_background, resize, round_corners};
use super::error::ComposeError;
use super::fonts::FontSet;
use super::params::Style;
use crate::types::{Caption, CaptionSide};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage, imageops};
use std::path::Path;

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Load and decode a screenshot, sniffing the format from its content.
pub fn load_screenshot(path: &Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Write an RGB image as PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Wrap title and subtitle independently against `wrap_width`.
pub fn wrap_caption(
    caption: &Caption,
    fonts: &FontSet,
    style: &Style,
    wrap_width: u32,
) -> WrappedCaption {
    WrappedCaption {
        title: wrap_words(caption.title(), wrap_width, &fonts.title),
        subtitle: wrap_words(caption.subtitle(), wrap_width, &fonts.subtitle),
        title_line_height: style.title.line_height,
        subtitle_line_height: style.subtitle.line_height,
        gap: style.title_subtitle_gap,
    }
}

/// Render one listing image.
///
/// The screenshot gets rounded corners and a drop shadow, is scaled to fit
/// the canvas (minus padding and any caption reservation), and is
/// composited onto the gradient background. Caption lines are drawn twice:
/// a dark offset copy, then the foreground. The result is flattened to RGB.
pub fn compose_listing(
    screenshot: &DynamicImage,
    caption: Option<&Caption>,
    side: CaptionSide,
    fonts: &FontSet,
    style: &Style,
) -> RgbImage {
    let decoration = &style.decoration;
    let mut shot = screenshot.to_rgba8();
    round_corners(&mut shot, decoration.corner_radius);
    let decorated = add_shadow(
        &shot,
        decoration.shadow_offset,
        decoration.shadow_blur,
        decoration.shadow_opacity,
    );

    let wrapped = caption
        .map(|c| wrap_caption(c, fonts, style, style.wrap_width(side)))
        .filter(|w| !w.is_empty());

    let layout = plan_layout(
        style.canvas,
        decorated.dimensions(),
        &style.layout,
        wrapped.as_ref().map(|w| (side, w.height())),
    );

    let (canvas_w, canvas_h) = style.canvas;
    let mut canvas = gradient_background(canvas_w, canvas_h, style.background);
    let (shot_w, shot_h) = layout.shot_size;
    let placed = resize(&decorated, shot_w, shot_h);
    imageops::overlay(&mut canvas, &placed, layout.shot_x, layout.shot_y);

    if let (Some(wrapped), Some(slot)) = (&wrapped, layout.caption) {
        draw_caption(&mut canvas, wrapped, slot, fonts, style);
    }

    flatten(&canvas, style.background)
}

fn draw_caption(
    canvas: &mut RgbaImage,
    wrapped: &WrappedCaption,
    slot: CaptionSlot,
    fonts: &FontSet,
    style: &Style,
) {
    let title_lines = wrapped.title.iter().enumerate().map(|(i, line)| {
        let y = slot.y + (i as u32 * wrapped.title_line_height) as i64;
        (&fonts.title, &style.title, y, line)
    });
    let subtitle_top = slot.y + wrapped.subtitle_offset() as i64;
    let subtitle_lines = wrapped.subtitle.iter().enumerate().map(|(i, line)| {
        let y = subtitle_top + (i as u32 * wrapped.subtitle_line_height) as i64;
        (&fonts.subtitle, &style.subtitle, y, line)
    });

    let shadow = style.text_shadow_offset as i64;
    for (face, text_style, y, line) in title_lines.chain(subtitle_lines) {
        let x = if slot.centered {
            slot.x + center_offset(slot.width, face.text_width(line))
        } else {
            slot.x
        };
        face.draw(canvas, x + shadow, y + shadow, text_style.shadow, line);
        face.draw(canvas, x, y, text_style.color, line);
    }
}

/// Load `source`, render the listing, and write it to `output` as PNG.
pub fn create_listing_image(
    source: &Path,
    output: &Path,
    caption: Option<&Caption>,
    side: CaptionSide,
    fonts: &FontSet,
    style: &Style,
) -> Result<()> {
    let screenshot = load_screenshot(source)?;
    let listing = compose_listing(&screenshot, caption, side, fonts, style);
    save_png(&listing, output)
}
