//! Raster helpers: gradient background, rounded corners, drop shadow, flatten.

use super::calculations::gradient_row_color;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

/// Opaque vertical gradient from `base` (top) to roughly `base * 1.2` (bottom).
pub fn gradient_background(width: u32, height: u32, base: [u8; 3]) -> RgbaImage {
    let rows: Vec<[u8; 3]> = (0..height)
        .map(|y| gradient_row_color(base, y, height))
        .collect();
    RgbaImage::from_fn(width, height, |_, y| {
        let [r, g, b] = rows[y as usize];
        Rgba([r, g, b, 255])
    })
}

/// 8-bit mask of a filled rounded rectangle covering the whole image.
///
/// The radius is clamped to half the shorter side.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let r = radius.min(width / 2).min(height / 2);
    let fill = Luma([255u8]);

    if r == 0 {
        if width > 0 && height > 0 {
            draw_filled_rect_mut(&mut mask, Rect::at(0, 0).of_size(width, height), fill);
        }
        return mask;
    }

    // Horizontal and vertical bands, then a disc in each corner
    if width > 2 * r {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(r as i32, 0).of_size(width - 2 * r, height),
            fill,
        );
    }
    if height > 2 * r {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(0, r as i32).of_size(width, height - 2 * r),
            fill,
        );
    }
    let (r, right, bottom) = (r as i32, width as i32 - 1 - r as i32, height as i32 - 1 - r as i32);
    for center in [(r, r), (right, r), (r, bottom), (right, bottom)] {
        draw_filled_circle_mut(&mut mask, center, r, fill);
    }
    mask
}

/// Clip the image's corners to `radius` by multiplying a rounded mask into alpha.
pub fn round_corners(image: &mut RgbaImage, radius: u32) {
    let mask = rounded_mask(image.width(), image.height(), radius);
    for (pixel, coverage) in image.pixels_mut().zip(mask.pixels()) {
        pixel[3] = (pixel[3] as u16 * coverage[0] as u16 / 255) as u8;
    }
}

/// Wrap the image in a blurred drop shadow.
///
/// The result is `2 * offset` larger on each axis. The shadow is a black
/// rectangle at `(offset, offset)` the size of the source, blurred with
/// `sigma`; the source is composited on top at the same position.
pub fn add_shadow(image: &RgbaImage, offset: u32, sigma: f32, opacity: u8) -> RgbaImage {
    let (width, height) = image.dimensions();
    let margin = offset.saturating_mul(2);
    let mut shadow = RgbaImage::new(
        width.saturating_add(margin),
        height.saturating_add(margin),
    );
    if width > 0 && height > 0 {
        draw_filled_rect_mut(
            &mut shadow,
            Rect::at(offset as i32, offset as i32).of_size(width, height),
            Rgba([0, 0, 0, opacity]),
        );
    }

    let mut wrapped = if sigma > 0.0 {
        imageops::blur(&shadow, sigma)
    } else {
        shadow
    };
    imageops::overlay(&mut wrapped, image, offset as i64, offset as i64);
    wrapped
}

/// Lanczos3 resize to exact dimensions.
pub fn resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Composite the canvas over an opaque `background` and drop the alpha channel.
pub fn flatten(canvas: &RgbaImage, background: [u8; 3]) -> RgbImage {
    let [r, g, b] = background;
    let mut base = RgbaImage::from_pixel(canvas.width(), canvas.height(), Rgba([r, g, b, 255]));
    imageops::overlay(&mut base, canvas, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
