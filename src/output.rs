//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Processing: screenshots/Screenshot 2025-12-25 215031.png
//! Created: screenshots/store-listing/1-popup-dark.png
//! [WARN  shotframe::batch] Source not found, skipping: screenshots/Screenshot 2025-12-25 215243.png
//!
//! All store listing images created in screenshots/store-listing/
//!     Created: 1, skipped: 1
//!     Dimensions: 1280x800 (Chrome Web Store recommended)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 found    Screenshot 2025-12-25 215031.png → 1-popup-dark.png
//! 002 missing  Screenshot 2025-12-25 215243.png → 2-popup-light.png
//!
//! 1 of 2 sources found
//! ```

use crate::batch::{BatchEvent, BatchReport, SourceStatus};
use crate::imaging::{FontSet, FontSource, OUTPUT_HEIGHT, OUTPUT_WIDTH};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Build
// ============================================================================

pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started { source } => vec![format!("Processing: {}", source.display())],
        BatchEvent::Created { output } => vec![format!("Created: {}", output.display())],
        // Already reported by the warning logged in `run_batch`
        BatchEvent::Skipped { .. } => Vec::new(),
    }
}

/// Summary printed after a batch completes.
pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "All store listing images created in {}/",
            report.output_dir.display()
        ),
        format!(
            "    Created: {}, skipped: {}",
            report.created.len(),
            report.skipped.len()
        ),
        format!(
            "    Dimensions: {}x{} (Chrome Web Store recommended)",
            OUTPUT_WIDTH, OUTPUT_HEIGHT
        ),
    ]
}

pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}

/// Which font each caption role resolved to.
pub fn format_fonts(fonts: &FontSet) -> Vec<String> {
    let describe = |source: &FontSource| match source {
        FontSource::File(path) => path.display().to_string(),
        FontSource::Builtin => "built-in".to_string(),
    };
    vec![
        format!("Title font: {}", describe(fonts.title.source())),
        format!("Subtitle font: {}", describe(fonts.subtitle.source())),
    ]
}

pub fn print_fonts(fonts: &FontSet) {
    for line in format_fonts(fonts) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(statuses: &[SourceStatus]) -> Vec<String> {
    let mut lines: Vec<String> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let state = if status.exists { "found  " } else { "missing" };
            format!(
                "{} {}  {} → {}",
                format_index(i + 1),
                state,
                file_name(&status.source),
                file_name(&status.output)
            )
        })
        .collect();

    let found = statuses.iter().filter(|s| s.exists).count();
    lines.push(String::new());
    lines.push(format!("{} of {} sources found", found, statuses.len()));
    lines
}

pub fn print_check_output(statuses: &[SourceStatus]) {
    for line in format_check_output(statuses) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
