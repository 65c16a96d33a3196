//! End-to-end file upscaling with the built-in models

mod common;

use common::pattern;
use tiled_upscale::{ModelId, NoProgress, UpscaleConfig, UpscaleMode};

#[test]
fn test_upscale_file_writes_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    pattern(40, 30).save(&input).unwrap();

    let mut config = UpscaleConfig::new(&input, 2.0, 0.0);
    config.model = ModelId::Lanczos2x;

    let output = tiled_upscale::upscale_file(&config, &NoProgress).unwrap();

    assert_eq!(output, dir.path().join("tiny_upscaled.png"));
    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (80, 60));
}

#[test]
fn test_upscale_file_single_mode_with_stitching_and_debug() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("out").with_extension("png");
    pattern(70, 50).save(&input).unwrap();

    let mut config = UpscaleConfig::new(&input, 1.5, 0.1);
    config.output = Some(output.clone());
    config.mode = UpscaleMode::Single;
    config.debug = true;
    config.debug_dir = dir.path().to_path_buf();

    let written = tiled_upscale::upscale_file(&config, &NoProgress).unwrap();

    assert_eq!(written, output);
    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (105, 75));
}

#[test]
fn test_upscale_file_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = UpscaleConfig::new(dir.path().join("missing.png"), 2.0, 0.0);

    let err = tiled_upscale::upscale_file(&config, &NoProgress).unwrap_err();
    assert_eq!(err.category(), "config");
    assert!(err.to_string().starts_with("Configuration error: Input file does not exist"));
}

#[test]
fn test_upscale_file_rejects_bad_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    pattern(20, 20).save(&input).unwrap();

    let config = UpscaleConfig::new(&input, 2.0, 1.0);
    let err = tiled_upscale::upscale_file(&config, &NoProgress).unwrap_err();
    assert_eq!(err.category(), "config");
    assert_eq!(
        err.to_string(),
        "Configuration error: Stitch overlap fraction must be in [0, 1) (got 1)"
    );
}
