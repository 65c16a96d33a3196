//! # Model Registry
//!
//! The closed set of tile upscalers this binary can run. Each [`ModelId`] maps
//! to a name, an atomic scale factor, and the tile geometry the model accepts.
//!
//! | Model | Factor | Tile sides |
//! |-------|--------|------------|
//! | `lanczos_4x` | 4 | 16..=256, step 4 |
//! | `lanczos_2x` | 2 | 16..=512, step 8 |
//!
//! Both models are resampling-based references; a learned model plugs in by
//! implementing [`TileUpscaler`] directly.

use std::fmt;

use image::RgbImage;
use tile_geom::{resample, DimSpec, ResampleFilter};
use tracing::trace;

use super::tile_upscaler::TileUpscaler;
use crate::error::{UpscaleError, UpscaleResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelId {
    #[default]
    #[value(name = "lanczos_4x")]
    Lanczos4x,
    #[value(name = "lanczos_2x")]
    Lanczos2x,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Lanczos4x, ModelId::Lanczos2x];

    pub fn name(self) -> &'static str {
        match self {
            ModelId::Lanczos4x => "lanczos_4x",
            ModelId::Lanczos2x => "lanczos_2x",
        }
    }

    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.name()).collect()
    }

    /// Look a model up by its command-line name.
    pub fn from_name(name: &str) -> UpscaleResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| UpscaleError::unsupported_model(name, Self::supported_names()))
    }

    /// Build the model. Construction is cheap; callers build once and borrow.
    pub fn load(self) -> UpscaleResult<Box<dyn TileUpscaler>> {
        let model = match self {
            ModelId::Lanczos4x => ResamplingUpscaler::new(self.name(), 4, DimSpec::new(16, 256, 4)?),
            ModelId::Lanczos2x => ResamplingUpscaler::new(self.name(), 2, DimSpec::new(16, 512, 8)?),
        };
        Ok(Box::new(model))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tile upscaler backed by plain resampling.
#[derive(Clone, Debug)]
pub struct ResamplingUpscaler {
    name: &'static str,
    factor: u32,
    width_spec: DimSpec,
    height_spec: DimSpec,
    filter: ResampleFilter,
}

impl ResamplingUpscaler {
    /// Square tile geometry (`spec` for both sides) with a Lanczos3 filter.
    pub fn new(name: &'static str, factor: u32, spec: DimSpec) -> Self {
        Self {
            name,
            factor,
            width_spec: spec,
            height_spec: spec,
            filter: ResampleFilter::Lanczos3,
        }
    }
}

impl TileUpscaler for ResamplingUpscaler {
    fn name(&self) -> &str {
        self.name
    }

    fn scale_factor(&self) -> u32 {
        self.factor
    }

    fn tile_width_spec(&self) -> DimSpec {
        self.width_spec
    }

    fn tile_height_spec(&self) -> DimSpec {
        self.height_spec
    }

    fn upscale_image(&self, image: &RgbImage, _prompt: &str) -> UpscaleResult<RgbImage> {
        let (w, h) = (image.width() * self.factor, image.height() * self.factor);
        trace!(model = self.name, from_w = image.width(), from_h = image.height(), w, h, "upscale tile");
        Ok(resample(image, w, h, self.filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_from_name() {
        assert_eq!(ModelId::from_name("lanczos_4x").unwrap(), ModelId::Lanczos4x);
        assert_eq!(ModelId::from_name("lanczos_2x").unwrap(), ModelId::Lanczos2x);

        let err = ModelId::from_name("sd2_4x").unwrap_err();
        assert_eq!(err.category(), "unsupported_model");
        assert!(err.to_string().contains("lanczos_4x, lanczos_2x"));
    }

    #[test]
    fn test_loaded_geometry() {
        let model = ModelId::Lanczos4x.load().unwrap();
        assert_eq!(model.name(), "lanczos_4x");
        assert_eq!(model.scale_factor(), 4);
        assert_eq!(model.tile_width_spec(), DimSpec::new(16, 256, 4).unwrap());
        assert!(model.is_tile_size_supported(256, 16));
        assert!(!model.is_tile_size_supported(258, 16));

        let model = ModelId::Lanczos2x.load().unwrap();
        assert_eq!(model.scale_factor(), 2);
        assert!(model.is_tile_size_supported(512, 504));
    }

    #[test]
    fn test_upscale_tile_by_factor() {
        let model = ModelId::Lanczos2x.load().unwrap();
        let tile = tile_geom::Tile::new(RgbImage::from_pixel(16, 24, Rgb([9, 9, 9])), 16, 0);
        let out = model.upscale(&tile, "a prompt").unwrap();
        assert_eq!((out.width(), out.height()), (32, 48));
        assert_eq!((out.left, out.top), (32, 0));
    }
}
