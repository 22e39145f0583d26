//! # Shotframe
//!
//! Batch generator for browser-extension store listing images. Each raw
//! screenshot becomes a 1280x800 PNG: a vertical gradient background, the
//! screenshot scaled to fit with rounded corners and a soft drop shadow, and
//! an optional title/subtitle caption beside or below it.
//!
//! # Pipeline
//!
//! ```text
//! shotframe.toml ─► Config ─► Style + FontSet
//!                                   │
//! screenshots/*.png ──► decorate ──► layout ──► composite ──► captions ──► PNG
//! ```
//!
//! Everything between decoding and encoding is a pure function of the
//! screenshot, the caption, and the [`imaging::Style`], so identical inputs
//! always produce byte-identical files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `shotframe.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Batch table entries: captions and caption placement |
//! | [`imaging`] | Layout math, decoration, font resolution, compositing |
//! | [`batch`] | Ordered batch driver with skip-on-missing semantics |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fonts Always Resolve
//!
//! Captions prefer the system fonts named in the config but the binary
//! embeds DejaVu faces, so a machine without any of the configured fonts
//! still renders readable captions rather than failing.
//!
//! ## Scaling Includes The Shadow
//!
//! The fit scale is computed against the decorated screenshot (shadow
//! margin included), which keeps the whole decoration inside the canvas
//! for screenshots of any size.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod types;
