//! Common test utilities for the upscaling tests
//!
//! Provides a deterministic fake tile upscaler and a progress recorder so the
//! orchestrators can be checked without a real model.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgb, RgbImage};
use tile_geom::DimSpec;
use tiled_upscale::{PassInfo, ProgressReporter, TileUpscaler, UpscaleResult};

/// Pixel-replicating tile upscaler: factor 4, tiles 16..=256 step 4.
///
/// Replication commutes with cropping at tile boundaries, so a correctly
/// merged tile pass equals [`replicate`] of the whole image.
pub struct CountingUpscaler {
    pub factor: u32,
    pub spec: DimSpec,
    pub calls: AtomicUsize,
    pub sizes: Mutex<Vec<(u32, u32)>>,
}

impl CountingUpscaler {
    pub fn new() -> Self {
        Self::with_geometry(4, DimSpec::new(16, 256, 4).unwrap())
    }

    pub fn with_geometry(factor: u32, spec: DimSpec) -> Self {
        Self {
            factor,
            spec,
            calls: AtomicUsize::new(0),
            sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TileUpscaler for CountingUpscaler {
    fn name(&self) -> &str {
        "counting"
    }

    fn scale_factor(&self) -> u32 {
        self.factor
    }

    fn tile_width_spec(&self) -> DimSpec {
        self.spec
    }

    fn tile_height_spec(&self) -> DimSpec {
        self.spec
    }

    fn upscale_image(&self, image: &RgbImage, _prompt: &str) -> UpscaleResult<RgbImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sizes.lock().unwrap().push(image.dimensions());
        Ok(replicate(image, self.factor))
    }
}

/// Nearest-neighbour upscale by an integer factor.
pub fn replicate(image: &RgbImage, factor: u32) -> RgbImage {
    RgbImage::from_fn(image.width() * factor, image.height() * factor, |x, y| {
        *image.get_pixel(x / factor, y / factor)
    })
}

/// Image with a distinct colour per pixel (modulo 256 per channel).
pub fn pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 3 % 256) as u8])
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pass(PassInfo),
    Resample((u32, u32), (u32, u32)),
}

/// Records pass and resample events in order.
#[derive(Default)]
pub struct Recorder {
    pub events: Mutex<Vec<Event>>,
    pub tiles_done: AtomicUsize,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn passes(&self) -> Vec<PassInfo> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Pass(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn resamples(&self) -> Vec<((u32, u32), (u32, u32))> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Resample(from, to) => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for Recorder {
    fn pass_started(&self, pass: &PassInfo) {
        self.events.lock().unwrap().push(Event::Pass(*pass));
    }

    fn tile_finished(&self, _done: usize, _total: usize) {
        self.tiles_done.fetch_add(1, Ordering::SeqCst);
    }

    fn resampled(&self, from: (u32, u32), to: (u32, u32)) {
        self.events.lock().unwrap().push(Event::Resample(from, to));
    }
}
