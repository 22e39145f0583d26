//! Listing image compositing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (PNG, JPEG, WebP, TIFF) |
//! | **Gradient background** | per-row fill, [`calculations::gradient_row_color`] |
//! | **Rounded corners** | `imageproc` filled rect + circles into an alpha mask |
//! | **Drop shadow** | `image::imageops::blur` + `overlay` |
//! | **Resize** | `image::imageops::resize` with `Lanczos3` |
//! | **Captions** | `rusttype` layout + coverage blending |
//! | **Encode** | PNG via `image` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for layout math and word wrap (unit testable)
//! - **Parameters**: [`Style`], the resolved rendering parameters
//! - **Decorate**: Raster helpers (gradient, corners, shadow, flatten)
//! - **Fonts**: Font resolution with built-in fallback, text measure and draw
//! - **Operations**: High-level functions combining layout + rasterization

pub mod calculations;
pub mod decorate;
mod error;
pub mod fonts;
pub mod operations;
mod params;

pub use calculations::{Layout, TextMeasure, WrappedCaption, plan_layout, wrap_words};
pub use error::ComposeError;
pub use fonts::{FontFace, FontSet, FontSource};
pub use operations::{compose_listing, create_listing_image, load_screenshot, save_png};
pub use params::{OUTPUT_HEIGHT, OUTPUT_WIDTH, Style, TextStyle};
