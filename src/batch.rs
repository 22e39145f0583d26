//! Batch driver.
//!
//! Walks the configured image table in order and renders one listing image
//! per entry. Entries whose source screenshot is missing are skipped with a
//! warning; any other failure stops the batch.
//!
//! ## Output Structure
//!
//! ```text
//! screenshots/
//! ├── Screenshot 2025-12-25 215031.png
//! ├── ...
//! └── store-listing/
//!     ├── 1-popup-dark.png          # 1280x800 RGB
//!     ├── 2-popup-light.png
//!     ├── 3-context-menu-single.png
//!     └── 4-context-menu-multiple.png
//! ```
//!
//! Progress is reported through an optional [`BatchEvent`] channel so the
//! CLI can print while the batch runs.

use crate::config::Config;
use crate::imaging::{ComposeError, FontSet, Style, create_listing_image};
use crate::types::BatchEntry;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to create {output} from {source_path}: {error}")]
    Compose {
        source_path: PathBuf,
        output: PathBuf,
        #[source]
        error: ComposeError,
    },
}

/// Progress notifications emitted while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// About to render `source`.
    Started { source: PathBuf },
    /// `output` was written.
    Created { output: PathBuf },
    /// `source` is not an existing file; the entry was skipped.
    Skipped { source: PathBuf },
}

/// What a batch run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Presence of one entry's source screenshot, as reported by [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub source: PathBuf,
    pub output: PathBuf,
    pub exists: bool,
}

fn entry_paths(entry: &BatchEntry, input_dir: &Path, output_dir: &Path) -> (PathBuf, PathBuf) {
    (input_dir.join(&entry.source), output_dir.join(&entry.output))
}

fn emit(events: &Option<Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        // A dropped receiver only loses progress output
        let _ = tx.send(event);
    }
}

/// Render every entry of `config.images`.
///
/// Creates the output directory if needed. Entries are processed strictly
/// in table order, one at a time.
pub fn run_batch(
    config: &Config,
    fonts: &FontSet,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    let style = Style::from_config(config);
    let input_dir = Path::new(&config.input_dir);
    let output_dir = Path::new(&config.output_dir);
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };

    for entry in &config.images {
        let (source, output) = entry_paths(entry, input_dir, output_dir);
        if !source.is_file() {
            log::warn!("Source not found, skipping: {}", source.display());
            emit(&events, BatchEvent::Skipped {
                source: source.clone(),
            });
            report.skipped.push(source);
            continue;
        }

        emit(&events, BatchEvent::Started {
            source: source.clone(),
        });
        log::debug!("{} -> {}", source.display(), output.display());
        create_listing_image(
            &source,
            &output,
            entry.visible_caption(),
            entry.side,
            fonts,
            &style,
        )
        .map_err(|error| BatchError::Compose {
            source_path: source.clone(),
            output: output.clone(),
            error,
        })?;
        emit(&events, BatchEvent::Created {
            output: output.clone(),
        });
        report.created.push(output);
    }

    Ok(report)
}

/// Report which sources exist without rendering or writing anything.
pub fn check(config: &Config) -> Vec<SourceStatus> {
    let input_dir = Path::new(&config.input_dir);
    let output_dir = Path::new(&config.output_dir);
    config
        .images
        .iter()
        .map(|entry| {
            let (source, output) = entry_paths(entry, input_dir, output_dir);
            let exists = source.is_file();
            SourceStatus {
                source,
                output,
                exists,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Caption, CaptionSide};
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn entry(source: &str, output: &str, title: &str) -> BatchEntry {
        BatchEntry {
            source: source.to_string(),
            output: output.to_string(),
            caption: Some(Caption::titled(title, "")),
            side: CaptionSide::Right,
        }
    }

    fn write_screenshot(path: &Path) {
        RgbImage::from_pixel(64, 40, Rgb([30, 90, 160]))
            .save(path)
            .unwrap();
    }

    fn setup(entries: Vec<BatchEntry>) -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            input_dir: tmp.path().join("in").to_string_lossy().into_owned(),
            output_dir: tmp.path().join("out/listing").to_string_lossy().into_owned(),
            images: entries,
            ..Config::default()
        };
        std::fs::create_dir_all(&config.input_dir).unwrap();
        (tmp, config)
    }

    fn fonts(config: &Config) -> FontSet {
        FontSet::builtin(&Style::from_config(config)).unwrap()
    }

    #[test]
    fn missing_sources_are_skipped() {
        let (_tmp, config) = setup(vec![
            entry("a.png", "1-a.png", "First"),
            entry("missing.png", "2-missing.png", "Second"),
            entry("b.png", "3-b.png", "Third"),
        ]);
        let input = Path::new(&config.input_dir);
        write_screenshot(&input.join("a.png"));
        write_screenshot(&input.join("b.png"));

        let report = run_batch(&config, &fonts(&config), None).unwrap();

        let out = Path::new(&config.output_dir);
        assert_eq!(report.created, vec![out.join("1-a.png"), out.join("3-b.png")]);
        assert_eq!(report.skipped, vec![input.join("missing.png")]);
        assert!(out.join("1-a.png").exists());
        assert!(!out.join("2-missing.png").exists());
    }

    #[test]
    fn directory_source_is_skipped_like_a_missing_one() {
        let (_tmp, config) = setup(vec![
            entry("folder.png", "1-folder.png", "Folder"),
            entry("a.png", "2-a.png", "Here"),
        ]);
        let input = Path::new(&config.input_dir);
        std::fs::create_dir_all(input.join("folder.png")).unwrap();
        write_screenshot(&input.join("a.png"));

        let report = run_batch(&config, &fonts(&config), None).unwrap();
        assert_eq!(report.skipped, vec![input.join("folder.png")]);
        assert_eq!(report.created.len(), 1);
        assert_eq!(
            check(&config).iter().map(|s| s.exists).collect::<Vec<_>>(),
            vec![false, true]
        );
    }

    #[test]
    fn creates_nested_output_dir() {
        let (_tmp, config) = setup(vec![]);
        let report = run_batch(&config, &fonts(&config), None).unwrap();
        assert!(Path::new(&config.output_dir).is_dir());
        assert!(report.created.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn events_follow_table_order() {
        let (_tmp, config) = setup(vec![
            entry("gone.png", "1-gone.png", "Gone"),
            entry("a.png", "2-a.png", "Here"),
        ]);
        let input = Path::new(&config.input_dir);
        write_screenshot(&input.join("a.png"));

        let (tx, rx) = std::sync::mpsc::channel();
        run_batch(&config, &fonts(&config), Some(tx)).unwrap();
        let events: Vec<BatchEvent> = rx.iter().collect();

        let out = Path::new(&config.output_dir);
        assert_eq!(
            events,
            vec![
                BatchEvent::Skipped {
                    source: input.join("gone.png")
                },
                BatchEvent::Started {
                    source: input.join("a.png")
                },
                BatchEvent::Created {
                    output: out.join("2-a.png")
                },
            ]
        );
    }

    #[test]
    fn corrupt_source_aborts_batch() {
        let (_tmp, config) = setup(vec![
            entry("bad.png", "1-bad.png", "Bad"),
            entry("a.png", "2-a.png", "Never reached"),
        ]);
        let input = Path::new(&config.input_dir);
        std::fs::write(input.join("bad.png"), b"not a png").unwrap();
        write_screenshot(&input.join("a.png"));

        let err = run_batch(&config, &fonts(&config), None).unwrap_err();
        match err {
            BatchError::Compose { source_path, .. } => {
                assert_eq!(source_path, input.join("bad.png"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!Path::new(&config.output_dir).join("2-a.png").exists());
    }

    #[test]
    fn outputs_are_store_sized_rgb() {
        let (_tmp, config) = setup(vec![entry("a.png", "1-a.png", "Dark Theme")]);
        write_screenshot(&Path::new(&config.input_dir).join("a.png"));
        let report = run_batch(&config, &fonts(&config), None).unwrap();

        let written = image::open(&report.created[0]).unwrap();
        assert_eq!((written.width(), written.height()), (1280, 800));
        assert_eq!(written.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn check_reports_presence_without_writing() {
        let (_tmp, config) = setup(vec![
            entry("a.png", "1-a.png", "A"),
            entry("b.png", "2-b.png", "B"),
        ]);
        write_screenshot(&Path::new(&config.input_dir).join("a.png"));

        let statuses = check(&config);
        assert_eq!(
            statuses.iter().map(|s| s.exists).collect::<Vec<_>>(),
            vec![true, false]
        );
        assert_eq!(statuses[1].output, Path::new(&config.output_dir).join("2-b.png"));
        assert!(!Path::new(&config.output_dir).exists());
    }
}
