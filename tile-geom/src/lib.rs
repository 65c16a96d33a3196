// SPDX-License-Identifier: MIT
//! # tile-geom: Tile Geometry and Reassembly for Tiled Upscaling
//!
//! This crate holds the model-agnostic half of a tile-based upscaler: how to cut
//! an image into tiles whose sizes a model accepts, and how to put the
//! (upscaled) tiles back together without visible seams.
//!
//! ## Key Components
//!
//! - [`dim_spec`]: Admissible tile sizes (`min..=max` in steps of `multiplier`)
//! - [`interval`]: Partition of a 1-D length into equal, evenly spaced, overlapping intervals
//! - [`tile`]: Tiles and their rectangles on the canvas
//! - [`splitter`]: 2-D tiling as the product of two 1-D partitions
//! - [`merge`]: Paste and seam-aware stitch mergers with per-pixel provenance
//! - [`resample`]: SIMD resampling via fast_image_resize for working-image resizes
//!
//! ## Guarantees
//!
//! - **Full coverage**: every split covers every pixel of its image
//! - **Bounded overlap**: neighbouring tiles overlap by at least the requested fraction
//! - **Exact reassembly**: splitting and merging an image without upscaling reproduces it
//! - **Provenance**: every merged pixel records the tile it was taken from
//!
//! ## Usage Example
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use tile_geom::{DimSpec, MergeStrategy, TileSplitter};
//!
//! let image = RgbImage::from_pixel(100, 60, Rgb([10, 20, 30]));
//! let spec = DimSpec::new(16, 64, 4).unwrap();
//! let splitter = TileSplitter::new(spec, spec, 0.2);
//!
//! let tiles = splitter.split_image(&image).unwrap();
//! let solution = MergeStrategy::for_overlap(0.2).merger().merge(&tiles).unwrap();
//! assert_eq!(solution.image, image);
//! ```

pub mod dim_spec;
pub mod error;
pub mod interval;
pub mod merge;
pub mod resample;
pub mod splitter;
pub mod tile;

pub use dim_spec::DimSpec;
pub use error::{GeomError, GeomResult};
pub use interval::{split_in_overlapping_intervals, IntervalSplitSolution};
pub use merge::{MergeSolution, MergeStrategy, TileMerger};
pub use resample::{resample, resample_rgb, ResampleFilter};
pub use splitter::TileSplitter;
pub use tile::{Tile, TileRange};
