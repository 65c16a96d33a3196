
use image::RgbImage;
use tile_geom::{resample, ResampleFilter, Tile};

use super::tile_upscaler::TileUpscaler;
use super::{target_size, ImageUpscaler};
use crate::error::UpscaleResult;
use crate::progress::{NoProgress, PassInfo, ProgressReporter};

/// Upscales by running the model once per pass on the whole image.
///
/// The input is first resampled to the nearest admissible tile size
/// (preferring larger), then upscaled while both sides are below target, then
/// resampled to the exact target. Targets whose intermediate sizes exceed the
/// model's maximum tile fail with `UnsupportedTileSize`.
pub struct SingleTileUpscaler<'a> {
    model: &'a dyn TileUpscaler,
    filter: ResampleFilter,
    progress: &'a dyn ProgressReporter,
}

impl<'a> SingleTileUpscaler<'a> {
    pub fn new(model: &'a dyn TileUpscaler) -> Self {
        Self {
            model,
            filter: ResampleFilter::default(),
            progress: &NoProgress,
        }
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    fn resample(&self, image: &RgbImage, width: u32, height: u32) -> UpscaleResult<RgbImage> {
        self.progress.resampled(image.dimensions(), (width, height));
        Ok(resample(image, width, height, self.filter)?)
    }
}

impl ImageUpscaler for SingleTileUpscaler<'_> {
    fn upscale(&self, image: &RgbImage, scale: f64, prompt: &str) -> UpscaleResult<RgbImage> {
        let (tw, th) = target_size(image.width(), image.height(), scale)?;
        if scale <= 1.0 {
            return self.resample(image, tw, th);
        }

        let (w, h) = image.dimensions();
        let mut work = if self.model.is_tile_size_supported(w, h) {
            image.clone()
        } else {
            let (nw, nh) = self.model.nearest_supported_tile_size(w, h, true);
            self.resample(image, nw, nh)?
        };

        let factor = self.model.scale_factor();
        while work.width() < tw && work.height() < th {
            let pass = PassInfo {
                from: work.dimensions(),
                to: (work.width() * factor, work.height() * factor),
                n_tiles: 1,
            };
            self.progress.pass_started(&pass);
            work = self.model.upscale(&Tile::new(work, 0, 0), prompt)?.image;
            self.progress.tile_finished(1, 1);
            self.progress.pass_finished(&pass);
        }

        if work.dimensions() != (tw, th) {
            work = self.resample(&work, tw, th)?;
        }
        Ok(work)
    }
}
