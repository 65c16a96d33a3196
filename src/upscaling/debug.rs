// Debug renderings of merge passes: provenance map and tile/seam overlay.

use std::path::PathBuf;

use chrono::{Local, NaiveTime};
use tile_geom::MergeSolution;
use tracing::info;

use crate::error::{UpscaleError, UpscaleResult};

/// `HHMMSS_<width>x<height>_<n>tiles`
pub fn debug_slug(time: NaiveTime, width: u32, height: u32, n_tiles: usize) -> String {
    format!("{}_{}x{}_{}tiles", time.format("%H%M%S"), width, height, n_tiles)
}

/// Writes `debug_<slug>_pixel_sources.png` and `debug_<slug>_stitches.png`.
#[derive(Clone, Debug)]
pub struct DebugWriter {
    dir: PathBuf,
}

impl DebugWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save both renderings of `solution`; returns the two paths written.
    pub fn write(&self, solution: &MergeSolution) -> UpscaleResult<[PathBuf; 2]> {
        let slug = debug_slug(
            Local::now().time(),
            solution.image.width(),
            solution.image.height(),
            solution.n_tiles(),
        );
        let sources = self.dir.join(format!("debug_{}_pixel_sources.png", slug));
        let stitches = self.dir.join(format!("debug_{}_stitches.png", slug));

        solution
            .pixel_sources_image()
            .save(&sources)
            .map_err(|e| UpscaleError::image("saving debug image", Some(sources.display().to_string()), e))?;
        solution
            .overlay_default()
            .save(&stitches)
            .map_err(|e| UpscaleError::image("saving debug image", Some(stitches.display().to_string()), e))?;

        info!(path = %sources.display(), "wrote debug provenance map");
        info!(path = %stitches.display(), "wrote debug overlay");
        Ok([sources, stitches])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tile_geom::{MergeStrategy, Tile};

    #[test]
    fn test_debug_slug_format() {
        let time = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(debug_slug(time, 1024, 768, 12), "090507_1024x768_12tiles");
    }

    #[test]
    fn test_write_creates_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let tiles = vec![
            Tile::new(RgbImage::from_pixel(8, 8, Rgb([200, 0, 0])), 0, 0),
            Tile::new(RgbImage::from_pixel(8, 8, Rgb([0, 200, 0])), 8, 0),
        ];
        let solution = MergeStrategy::Paste.merger().merge(&tiles).unwrap();

        let [sources, stitches] = DebugWriter::new(dir.path()).write(&solution).unwrap();

        let name = sources.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("debug_") && name.ends_with("_16x8_2tiles_pixel_sources.png"));
        assert_eq!(image::open(&sources).unwrap().to_luma8().dimensions(), (16, 8));
        assert_eq!(image::open(&stitches).unwrap().to_rgb8().dimensions(), (16, 8));
    }
}
