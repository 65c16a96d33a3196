// SPDX-License-Identifier: MIT
//! Merge result with per-pixel provenance and debug renderings.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

use crate::tile::TileRange;

/// Per-pixel index of the tile that produced the merged pixel.
pub type PixelSources = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Outcome of a [`TileMerger::merge`](crate::merge::TileMerger::merge) call.
#[derive(Clone, Debug)]
pub struct MergeSolution {
    /// Merged image
    pub image: RgbImage,
    /// Ranges of the source tiles, in merge order
    pub tile_ranges: Vec<TileRange>,
    /// Source tile index per pixel, same size as `image`
    pub pixel_sources: PixelSources,
}

impl MergeSolution {
    pub fn n_tiles(&self) -> usize {
        self.tile_ranges.len()
    }

    /// Source index of the pixel at `(x, y)`.
    pub fn source_at(&self, x: u32, y: u32) -> u16 {
        self.pixel_sources.get_pixel(x, y).0[0]
    }

    /// Grayscale rendering of the provenance grid: tile `i` maps to
    /// `c1 * i + c1 / 2` with `c1 = floor(255 / n_tiles)`.
    pub fn pixel_sources_image(&self) -> GrayImage {
        let c1 = 255 / self.n_tiles().max(1) as u32;
        let c0 = c1 / 2;
        GrayImage::from_fn(self.pixel_sources.width(), self.pixel_sources.height(), |x, y| {
            let index = u32::from(self.source_at(x, y));
            Luma([(c1 * index + c0).min(255) as u8])
        })
    }

    /// Copy of the merged image with tile borders and/or seams drawn on top.
    ///
    /// Tile borders are drawn on a checkerboard so overlapping borders stay
    /// distinguishable; seams are pixels whose provenance differs from their
    /// right or bottom neighbour.
    pub fn overlay_image(&self, tile_range_color: Option<Rgb<u8>>, seam_color: Option<Rgb<u8>>) -> RgbImage {
        let mut img = self.image.clone();
        let (w, h) = img.dimensions();

        if let Some(color) = tile_range_color {
            for range in &self.tile_ranges {
                for y in range.top..=range.bottom().min(h - 1) {
                    for x in range.left..=range.right().min(w - 1) {
                        let on_border = y == range.top || y == range.bottom() || x == range.left || x == range.right();
                        if on_border && (x + y) % 2 == 0 {
                            img.put_pixel(x, y, color);
                        }
                    }
                }
            }
        }

        if let Some(color) = seam_color {
            for y in 0..h {
                for x in 0..w {
                    let here = self.source_at(x, y);
                    let below = y + 1 < h && self.source_at(x, y + 1) != here;
                    let right = x + 1 < w && self.source_at(x + 1, y) != here;
                    if below || right {
                        img.put_pixel(x, y, color);
                    }
                }
            }
        }

        img
    }

    /// Default overlay: green tile borders, white seams.
    pub fn overlay_default(&self) -> RgbImage {
        self.overlay_image(Some(Rgb([0, 255, 0])), Some(Rgb([255, 255, 255])))
    }
}
