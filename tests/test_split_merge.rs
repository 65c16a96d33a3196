//! Split and merge round trips through the public tile_geom API

mod common;

use common::pattern;
use image::{Rgb, RgbImage};
use tile_geom::{split_in_overlapping_intervals, DimSpec, MergeStrategy, Tile, TileMerger, TileSplitter};
use tile_geom::merge::{DpSeamFinder, PasteMerger, SeamCost, StitchMerger};

#[test]
fn test_paste_round_trip_is_identical() {
    let image = pattern(256, 256);
    let spec = DimSpec::new(2, 300, 2).unwrap();
    let tiles = TileSplitter::new(spec, spec, 0.0).split_image(&image).unwrap();

    let solution = PasteMerger.merge(&tiles).unwrap();

    assert_eq!(solution.image, image);
    assert_eq!(solution.n_tiles(), tiles.len());
}

#[test]
fn test_paste_round_trip_many_tiles() {
    let image = pattern(300, 170);
    let spec = DimSpec::new(16, 64, 4).unwrap();
    let tiles = TileSplitter::new(spec, spec, 0.0).split_image(&image).unwrap();
    assert!(tiles.len() > 4);

    let solution = MergeStrategy::Paste.merger().merge(&tiles).unwrap();
    assert_eq!(solution.image, image);
}

#[test]
fn test_stitch_round_trip_is_identical() {
    let image = pattern(300, 170);
    let spec = DimSpec::new(16, 96, 4).unwrap();

    for cost in [SeamCost::Color, SeamCost::ColorGrad] {
        let tiles = TileSplitter::new(spec, spec, 0.2).split_image(&image).unwrap();
        let solution = StitchMerger::new(DpSeamFinder::new(cost)).merge(&tiles).unwrap();

        assert_eq!(solution.image.dimensions(), image.dimensions());
        assert_eq!(solution.image, image);
    }
}

#[test]
fn test_stitch_without_overlap_matches_paste() {
    // 2x2 grid of abutting tiles with unrelated content
    let colors = [[200, 10, 10], [10, 200, 10], [10, 10, 200], [120, 120, 0]];
    let tiles: Vec<Tile> = [(0, 0), (0, 12), (16, 0), (16, 12)]
        .into_iter()
        .zip(colors)
        .map(|((left, top), c)| Tile::new(RgbImage::from_pixel(16, 12, Rgb(c)), left, top))
        .collect();

    let stitched = StitchMerger::new(DpSeamFinder::default()).merge(&tiles).unwrap();
    let pasted = PasteMerger.merge(&tiles).unwrap();

    assert_eq!(stitched.image.dimensions(), (32, 24));
    assert_eq!(stitched.image, pasted.image);
    assert_eq!(stitched.pixel_sources, pasted.pixel_sources);
}

#[test]
fn test_provenance_points_at_covering_tile() {
    let image = pattern(200, 120);
    let spec = DimSpec::new(16, 80, 8).unwrap();
    let tiles = TileSplitter::new(spec, spec, 0.25).split_image(&image).unwrap();

    let solution = MergeStrategy::Stitch.merger().merge(&tiles).unwrap();

    for y in 0..120 {
        for x in 0..200 {
            let source = solution.source_at(x, y) as usize;
            assert!(source < tiles.len());
            assert!(solution.tile_ranges[source].contains(x, y), "({}, {}) from {}", x, y, source);
        }
    }
}

#[test]
fn test_partition_properties_over_lengths() {
    let specs = [
        DimSpec::new(16, 256, 4).unwrap(),
        DimSpec::new(24, 240, 6).unwrap(),
        DimSpec::new(32, 48, 2).unwrap(),
    ];
    for spec in specs {
        for overlap in [0.0, 0.1, 0.25] {
            for length in spec.min_value()..=700 {
                let Ok(sol) = split_in_overlapping_intervals(length, &spec, overlap) else {
                    continue;
                };
                assert!(spec.is_valid(sol.size));
                assert_eq!(sol.starts[0], 0);
                assert_eq!(sol.starts[sol.count() - 1] + sol.size, length);

                let min_overlap = (f64::from(sol.size) * overlap).ceil() as u32;
                for pair in sol.starts.windows(2) {
                    assert!(pair[0] + sol.size >= pair[1] + min_overlap, "{} {:?} {}", length, sol, overlap);
                }
            }
        }
    }
}

#[test]
fn test_partition_below_min_is_infeasible() {
    let spec = DimSpec::new(32, 256, 4).unwrap();
    assert!(split_in_overlapping_intervals(20, &spec, 0.0).is_err());
}
