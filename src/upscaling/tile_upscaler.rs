//! # Tile Upscaler Capability
//!
//! A tile upscaler multiplies both sides of an image by a fixed integer
//! factor, but only accepts inputs whose sides are admissible under its pair of
//! [`DimSpec`]s. Everything the orchestrators know about a model goes through
//! this trait.

use image::RgbImage;
use tile_geom::{DimSpec, Tile};

use crate::error::{UpscaleError, UpscaleResult};

pub trait TileUpscaler: Send + Sync {
    /// Model name as used on the command line
    fn name(&self) -> &str;

    /// Integer factor applied to both sides per call
    fn scale_factor(&self) -> u32;

    fn tile_width_spec(&self) -> DimSpec;

    fn tile_height_spec(&self) -> DimSpec;

    /// Upscale one admissible image by exactly [`scale_factor`](Self::scale_factor).
    /// The prompt is passed through untouched.
    fn upscale_image(&self, image: &RgbImage, prompt: &str) -> UpscaleResult<RgbImage>;

    fn is_tile_size_supported(&self, width: u32, height: u32) -> bool {
        self.tile_width_spec().is_valid(width) && self.tile_height_spec().is_valid(height)
    }

    /// Closest admissible tile size; rounds up when `larger_if_possible`,
    /// down otherwise. Admissible sizes are returned unchanged.
    fn nearest_supported_tile_size(&self, width: u32, height: u32, larger_if_possible: bool) -> (u32, u32) {
        let (ws, hs) = (self.tile_width_spec(), self.tile_height_spec());
        if larger_if_possible {
            (ws.round_up(width), hs.round_up(height))
        } else {
            (ws.round_down(width), hs.round_down(height))
        }
    }

    /// Upscale a positioned tile: validates the input size, checks the model
    /// output, and maps the position onto the upscaled canvas.
    fn upscale(&self, tile: &Tile, prompt: &str) -> UpscaleResult<Tile> {
        if !self.is_tile_size_supported(tile.width(), tile.height()) {
            return Err(UpscaleError::unsupported_tile_size(self.name(), tile.width(), tile.height())
                .with_recovery_suggestion(format!(
                    "Tile sides must satisfy {} (width) and {} (height)",
                    self.tile_width_spec(),
                    self.tile_height_spec()
                )));
        }

        let factor = self.scale_factor();
        let image = self.upscale_image(&tile.image, prompt)?;
        let expected = (tile.width() * factor, tile.height() * factor);
        if image.dimensions() != expected {
            return Err(UpscaleError::model(
                self.name(),
                format!(
                    "returned {}x{} for a {}x{} tile, expected {}x{}",
                    image.width(),
                    image.height(),
                    tile.width(),
                    tile.height(),
                    expected.0,
                    expected.1
                ),
            ));
        }

        Ok(Tile::new(image, tile.left * factor, tile.top * factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{imageops, Rgb};

    /// Nearest-neighbour model with a configurable (possibly wrong) output factor.
    struct Blocky {
        factor: u32,
        output_factor: u32,
    }

    impl TileUpscaler for Blocky {
        fn name(&self) -> &str {
            "blocky"
        }

        fn scale_factor(&self) -> u32 {
            self.factor
        }

        fn tile_width_spec(&self) -> DimSpec {
            DimSpec::new(8, 64, 4).unwrap()
        }

        fn tile_height_spec(&self) -> DimSpec {
            DimSpec::new(8, 32, 8).unwrap()
        }

        fn upscale_image(&self, image: &RgbImage, _prompt: &str) -> UpscaleResult<RgbImage> {
            let (w, h) = image.dimensions();
            Ok(imageops::resize(
                image,
                w * self.output_factor,
                h * self.output_factor,
                imageops::FilterType::Nearest,
            ))
        }
    }

    #[test]
    fn test_nearest_supported_tile_size() {
        let model = Blocky { factor: 2, output_factor: 2 };
        assert_eq!(model.nearest_supported_tile_size(10, 10, true), (12, 16));
        assert_eq!(model.nearest_supported_tile_size(10, 10, false), (8, 8));
        assert_eq!(model.nearest_supported_tile_size(100, 100, true), (64, 32));
        assert_eq!(model.nearest_supported_tile_size(12, 16, false), (12, 16));
    }

    #[test]
    fn test_upscale_remaps_position() {
        let model = Blocky { factor: 2, output_factor: 2 };
        let tile = Tile::new(RgbImage::from_pixel(12, 16, Rgb([1, 2, 3])), 5, 7);
        let out = model.upscale(&tile, "").unwrap();
        assert_eq!((out.width(), out.height()), (24, 32));
        assert_eq!((out.left, out.top), (10, 14));
    }

    #[test]
    fn test_upscale_rejects_unsupported_size() {
        let model = Blocky { factor: 2, output_factor: 2 };
        let tile = Tile::new(RgbImage::new(10, 16), 0, 0);
        let err = model.upscale(&tile, "").unwrap_err();
        assert_eq!(err.category(), "unsupported_tile_size");
    }

    #[test]
    fn test_upscale_rejects_wrong_output_size() {
        let model = Blocky { factor: 2, output_factor: 3 };
        let tile = Tile::new(RgbImage::new(8, 8), 0, 0);
        let err = model.upscale(&tile, "").unwrap_err();
        assert_eq!(err.category(), "model");
    }
}
