//! Log output of a batch run. Kept in its own test binary because the
//! `log` facade accepts a single global logger per process.

use image::{Rgba, RgbaImage};
use log::{Level, LevelFilter, Log, Metadata, Record};
use shotframe::batch::run_batch;
use shotframe::config::resolve_config;
use shotframe::imaging::{FontSet, Style};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("shotframe") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn one_missing_source_logs_exactly_one_warning() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let tmp = TempDir::new().unwrap();
    let mut config = resolve_config(None).unwrap();
    config.input_dir = tmp.path().join("in").to_string_lossy().into_owned();
    config.output_dir = tmp.path().join("out").to_string_lossy().into_owned();
    std::fs::create_dir_all(&config.input_dir).unwrap();

    let missing = config.images[2].source.clone();
    for entry in config.images.iter().filter(|e| e.source != missing) {
        RgbaImage::from_pixel(120, 90, Rgba([50, 60, 90, 255]))
            .save(Path::new(&config.input_dir).join(&entry.source))
            .unwrap();
    }

    let fonts = FontSet::builtin(&Style::from_config(&config)).unwrap();
    let report = run_batch(&config, &fonts, None).unwrap();
    assert_eq!(report.created.len(), 3);

    let records = LOGGER.records.lock().unwrap();
    let warnings: Vec<&String> = records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message)
        .collect();
    assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
    assert!(warnings[0].contains(&missing));
}
