// SPDX-License-Identifier: MIT
//! # 2-D Tile Splitting
//!
//! Cuts an image into a grid of equally sized, possibly overlapping tiles whose
//! edge lengths are admissible for a tile upscaler.
//!
//! ## Grid Construction
//!
//! The horizontal and vertical axes are partitioned independently with
//! [`split_in_overlapping_intervals`]; the grid is their Cartesian product.
//! Tiles are emitted column by column (`left` outer, `top` inner). That order is
//! the merge index of each tile, so it also defines pixel provenance and the
//! order in which progress is reported.

use image::{imageops, RgbImage};
use tracing::debug;

use crate::dim_spec::DimSpec;
use crate::error::GeomResult;
use crate::interval::{split_in_overlapping_intervals, IntervalSplitSolution};
use crate::tile::{Tile, TileRange};

/// Splits images into tiles that satisfy a pair of dimension specs.
#[derive(Clone, Copy, Debug)]
pub struct TileSplitter {
    /// Admissible tile widths
    pub tile_width_spec: DimSpec,
    /// Admissible tile heights
    pub tile_height_spec: DimSpec,
    /// Minimum overlap between neighbouring tiles, as a fraction of tile size
    pub overlap_fraction: f64,
}

impl TileSplitter {
    pub fn new(tile_width_spec: DimSpec, tile_height_spec: DimSpec, overlap_fraction: f64) -> Self {
        Self {
            tile_width_spec,
            tile_height_spec,
            overlap_fraction,
        }
    }

    /// Compute tile geometry for an image of the given size.
    ///
    /// # Arguments
    /// * `width`, `height` - Image dimensions
    ///
    /// # Returns
    /// Tile ranges in merge order
    ///
    /// # Errors
    /// Propagates `InfeasiblePartition` / `InvalidArgument` from either axis.
    pub fn plan(&self, width: u32, height: u32) -> GeomResult<Vec<TileRange>> {
        let (hor, vert) = self.solve(width, height)?;
        Ok(grid(&hor, &vert))
    }

    /// Split image in tiles that cover the entire image.
    pub fn split_image(&self, image: &RgbImage) -> GeomResult<Vec<Tile>> {
        let ranges = self.plan(image.width(), image.height())?;
        Ok(ranges.into_iter().map(|r| crop_tile(image, r)).collect())
    }

    fn solve(&self, width: u32, height: u32) -> GeomResult<(IntervalSplitSolution, IntervalSplitSolution)> {
        let hor = split_in_overlapping_intervals(width, &self.tile_width_spec, self.overlap_fraction)?;
        let vert = split_in_overlapping_intervals(height, &self.tile_height_spec, self.overlap_fraction)?;
        debug!(
            width,
            height,
            tile_width = hor.size,
            tile_height = vert.size,
            cols = hor.count(),
            rows = vert.count(),
            "tile grid resolved"
        );
        Ok((hor, vert))
    }
}

/// Cartesian product of horizontal and vertical starts, `left` outer.
fn grid(hor: &IntervalSplitSolution, vert: &IntervalSplitSolution) -> Vec<TileRange> {
    let mut ranges = Vec::with_capacity(hor.count() * vert.count());
    for &left in &hor.starts {
        for &top in &vert.starts {
            ranges.push(TileRange::new(left, top, hor.size, vert.size));
        }
    }
    ranges
}

/// Copy one tile's pixels out of the source image.
fn crop_tile(image: &RgbImage, range: TileRange) -> Tile {
    let pixels = imageops::crop_imm(image, range.left, range.top, range.width, range.height).to_image();
    Tile::new(pixels, range.left, range.top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn splitter(max: u32, overlap: f64) -> TileSplitter {
        let spec = DimSpec::new(2, max, 2).unwrap();
        TileSplitter::new(spec, spec, overlap)
    }

    #[test]
    fn test_single_tile_when_image_fits() {
        let ranges = splitter(300, 0.0).plan(256, 256).unwrap();
        assert_eq!(ranges, vec![TileRange::new(0, 0, 256, 256)]);
    }

    #[test]
    fn test_grid_order_is_column_major() {
        let ranges = splitter(200, 0.1).plan(256, 256).unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!((ranges[0].left, ranges[0].top), (0, 0));
        assert_eq!(ranges[1].left, 0);
        assert!(ranges[1].top > 0);
        assert!(ranges[2].left > 0);
        assert_eq!(ranges[2].top, 0);
    }

    #[test]
    fn test_split_image_crops_pixels() {
        let image = RgbImage::from_fn(100, 60, |x, y| Rgb([x as u8, y as u8, 7]));
        let spec_w = DimSpec::new(16, 64, 4).unwrap();
        let spec_h = DimSpec::new(16, 64, 4).unwrap();
        let tiles = TileSplitter::new(spec_w, spec_h, 0.0).split_image(&image).unwrap();
        for tile in &tiles {
            assert!(spec_w.is_valid(tile.width()));
            assert!(spec_h.is_valid(tile.height()));
            assert!(tile.right() < 100 && tile.bottom() < 60);
            assert_eq!(tile.image.get_pixel(0, 0), image.get_pixel(tile.left, tile.top));
        }
    }

    #[test]
    fn test_rectangular_specs_split_independently() {
        let spec_w = DimSpec::new(16, 200, 4).unwrap();
        let spec_h = DimSpec::new(16, 100, 4).unwrap();
        let ranges = TileSplitter::new(spec_w, spec_h, 0.1).plan(256, 256).unwrap();
        let cols = ranges.iter().filter(|r| r.top == 0).count();
        let rows = ranges.iter().filter(|r| r.left == 0).count();
        assert_eq!(cols * rows, ranges.len());
        assert!(rows > cols);
    }
}
