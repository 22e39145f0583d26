//! Caption fonts: resolution, measurement, drawing.
//!
//! Candidates are matched by file name (case-insensitive) against every file
//! under the configured search directories. The first candidate that exists
//! and parses wins. When nothing matches, the embedded DejaVu faces are used,
//! so resolution never fails because a font is missing.

use super::calculations::TextMeasure;
use super::error::ComposeError;
use super::params::Style;
use crate::config::FontsConfig;
use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_TITLE: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");
const BUILTIN_SUBTITLE: &[u8] = include_bytes!("../../assets/DejaVuSans-Oblique.ttf");

/// Which caption line a face is for; selects the built-in fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Subtitle,
}

/// Where a loaded face came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

/// A parsed font at a fixed pixel size.
pub struct FontFace {
    font: Font<'static>,
    size: f32,
    source: FontSource,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("size", &self.size)
            .field("source", &self.source)
            .finish()
    }
}

impl FontFace {
    pub fn from_file(path: &Path, size: f32) -> Result<Self, ComposeError> {
        let bytes = std::fs::read(path)?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| {
            ComposeError::Font(format!("Failed to parse font {}", path.display()))
        })?;
        Ok(Self {
            font,
            size,
            source: FontSource::File(path.to_path_buf()),
        })
    }

    pub fn builtin(role: FontRole, size: f32) -> Result<Self, ComposeError> {
        let data = match role {
            FontRole::Title => BUILTIN_TITLE,
            FontRole::Subtitle => BUILTIN_SUBTITLE,
        };
        let font = Font::try_from_bytes(data)
            .ok_or_else(|| ComposeError::Font(format!("Built-in {role:?} font is corrupt")))?;
        Ok(Self {
            font,
            size,
            source: FontSource::Builtin,
        })
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Draw `text` with its top-left at `(x, y)`, blending by glyph coverage.
    ///
    /// Pixels outside the canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, text: &str) {
        let scale = Scale::uniform(self.size);
        let v_metrics = self.font.v_metrics(scale);
        let origin = point(x as f32, y as f32 + v_metrics.ascent);
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);

        for glyph in self.font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
    }
}

impl TextMeasure for FontFace {
    /// Width of the union of the glyphs' pixel bounding boxes.
    fn text_width(&self, text: &str) -> u32 {
        let scale = Scale::uniform(self.size);
        let v_metrics = self.font.v_metrics(scale);
        let mut span: Option<(i32, i32)> = None;
        for glyph in self.font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                span = Some(match span {
                    Some((min_x, max_x)) => (min_x.min(bb.min.x), max_x.max(bb.max.x)),
                    None => (bb.min.x, bb.max.x),
                });
            }
        }
        span.map_or(0, |(min_x, max_x)| (max_x - min_x).max(0) as u32)
    }
}

/// Source-over blend of `color` scaled by `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let v = (color[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Title and subtitle faces at their configured sizes.
#[derive(Debug)]
pub struct FontSet {
    pub title: FontFace,
    pub subtitle: FontFace,
}

impl FontSet {
    /// Built-in faces only; output does not depend on installed fonts.
    pub fn builtin(style: &Style) -> Result<Self, ComposeError> {
        Ok(Self {
            title: FontFace::builtin(FontRole::Title, style.title.size)?,
            subtitle: FontFace::builtin(FontRole::Subtitle, style.subtitle.size)?,
        })
    }

    /// Resolve both roles from the candidate lists, falling back to built-ins.
    pub fn resolve(config: &FontsConfig, style: &Style) -> Result<Self, ComposeError> {
        let index = index_font_files(&search_dirs(&config.search_dirs));
        Ok(Self {
            title: resolve_face(&index, &config.title, FontRole::Title, style.title.size)?,
            subtitle: resolve_face(
                &index,
                &config.subtitle,
                FontRole::Subtitle,
                style.subtitle.size,
            )?,
        })
    }
}

/// Expand `~/` and drop directories that don't exist.
fn search_dirs(dirs: &[String]) -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    dirs.iter()
        .filter_map(|dir| match (dir.strip_prefix("~/"), &home) {
            (Some(rest), Some(home)) => Some(home.join(rest)),
            (Some(_), None) => None,
            (None, _) => Some(PathBuf::from(dir)),
        })
        .filter(|dir| dir.is_dir())
        .collect()
}

/// Every regular file under `dirs`, in directory order then sorted walk order.
fn index_font_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    dirs.iter()
        .flat_map(|dir| {
            WalkDir::new(dir)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
        })
        .collect()
}

/// Paths in `index` whose file name matches `candidate`, ignoring case.
fn matching_paths<'a>(
    index: &'a [PathBuf],
    candidate: &'a str,
) -> impl Iterator<Item = &'a PathBuf> {
    index.iter().filter(move |path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(candidate))
    })
}

fn resolve_face(
    index: &[PathBuf],
    candidates: &[String],
    role: FontRole,
    size: f32,
) -> Result<FontFace, ComposeError> {
    for candidate in candidates {
        for path in matching_paths(index, candidate) {
            match FontFace::from_file(path, size) {
                Ok(face) => {
                    log::debug!("{role:?} font: {}", path.display());
                    return Ok(face);
                }
                Err(e) => log::debug!("Skipping font {}: {e}", path.display()),
            }
        }
    }
    log::debug!("{role:?} font: built-in");
    FontFace::builtin(role, size)
}
