//! End-to-end batch runs against the stock image table.

use image::{Rgba, RgbaImage};
use shotframe::batch::run_batch;
use shotframe::config::{Config, resolve_config};
use shotframe::imaging::{FontSet, Style};
use std::path::Path;
use tempfile::TempDir;

/// Stock config redirected into a temp dir, with all but the second
/// screenshot present.
fn stock_batch_with_one_missing() -> (TempDir, Config) {
    let tmp = TempDir::new().unwrap();
    let mut config = resolve_config(None).unwrap();
    config.input_dir = tmp.path().join("screenshots").to_string_lossy().into_owned();
    config.output_dir = tmp
        .path()
        .join("screenshots/store-listing")
        .to_string_lossy()
        .into_owned();

    std::fs::create_dir_all(&config.input_dir).unwrap();
    for (i, entry) in config.images.iter().enumerate() {
        if i == 1 {
            continue;
        }
        // Small popup-like screenshots of varying shape
        let (w, h) = [(160, 240), (160, 240), (300, 120), (200, 200)][i];
        let shade = 40 + 30 * i as u8;
        RgbaImage::from_pixel(w, h, Rgba([shade, shade, 80, 255]))
            .save(Path::new(&config.input_dir).join(&entry.source))
            .unwrap();
    }
    (tmp, config)
}

fn fonts_for(config: &Config) -> FontSet {
    FontSet::builtin(&Style::from_config(config)).unwrap()
}

#[test]
fn stock_table_renders_present_screenshots() {
    let (_tmp, config) = stock_batch_with_one_missing();
    let report = run_batch(&config, &fonts_for(&config), None).unwrap();

    assert_eq!(report.created.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(
        report.skipped[0]
            .to_string_lossy()
            .ends_with("Screenshot 2025-12-25 215243.png")
    );

    let names: Vec<String> = report
        .created
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "1-popup-dark.png",
            "3-context-menu-single.png",
            "4-context-menu-multiple.png"
        ]
    );

    for path in &report.created {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (1280, 800));
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }
    assert!(
        !Path::new(&config.output_dir)
            .join("2-popup-light.png")
            .exists()
    );
}

#[test]
fn rerun_is_byte_identical() {
    let (_tmp, config) = stock_batch_with_one_missing();
    let fonts = fonts_for(&config);

    let first = run_batch(&config, &fonts, None).unwrap();
    let before: Vec<Vec<u8>> = first
        .created
        .iter()
        .map(|p| std::fs::read(p).unwrap())
        .collect();

    let second = run_batch(&config, &fonts, None).unwrap();
    let after: Vec<Vec<u8>> = second
        .created
        .iter()
        .map(|p| std::fs::read(p).unwrap())
        .collect();

    assert_eq!(first.created, second.created);
    assert_eq!(before, after);
}

#[test]
fn config_file_overrides_table_and_side() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    std::fs::create_dir_all(&input).unwrap();
    RgbaImage::from_pixel(200, 120, Rgba([20, 20, 20, 255]))
        .save(input.join("shot.png"))
        .unwrap();

    let config_path = tmp.path().join("shotframe.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
input_dir = "{}"
output_dir = "{}"

[[images]]
source = "shot.png"
output = "below.png"
caption = "Below the screenshot"
side = "below"
"#,
            input.display().to_string().replace('\\', "/"),
            output.display().to_string().replace('\\', "/"),
        ),
    )
    .unwrap();

    let config = shotframe::config::load_config(&config_path).unwrap();
    assert_eq!(config.images.len(), 1);
    let report = run_batch(&config, &fonts_for(&config), None).unwrap();
    assert_eq!(report.created, vec![output.join("below.png")]);

    // Caption text sits under the screenshot, so the lower band gets bright pixels
    let img = image::open(output.join("below.png")).unwrap().to_rgb8();
    let bright_rows: Vec<u32> = img
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 200 && p[1] > 200 && p[2] > 200)
        .map(|(_, y, _)| y)
        .collect();
    assert!(!bright_rows.is_empty());
    assert!(bright_rows.iter().all(|&y| y > 400));
}
