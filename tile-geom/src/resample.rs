// SPDX-License-Identifier: MIT
// CPU resampler built on fast_image_resize (SIMD-accelerated).
// RGB8 in → RGB8 out; used for every non-model resize of the working image.

use std::cell::RefCell;

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x3;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

use crate::error::{GeomError, GeomResult};

thread_local! {
    // one scratch resizer per thread, rayon workers included
    static RESIZER: RefCell<Resizer> = RefCell::new(Resizer::new());
}

/// Resampling filter for working-image resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    Mitchell,
    /// Closest to PIL's LANCZOS; the default
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    fn algorithm(self) -> ResizeAlg {
        match self {
            ResampleFilter::Nearest => ResizeAlg::Nearest,
            ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResampleFilter::Mitchell => ResizeAlg::Convolution(FilterType::Mitchell),
            ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Resize `src` to exactly `width x height`.
/// Returns a copy when the size already matches.
pub fn resample_rgb(
    resizer: &mut Resizer,
    src: &RgbImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> GeomResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(GeomError::InvalidArgument {
            name: "resample size",
            value: format!("{}x{}", width, height),
        });
    }
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }

    let src_view = TypedImageRef::<U8x3>::from_buffer(src.width(), src.height(), src.as_raw())?;

    let mut dst = vec![0u8; width as usize * height as usize * 3];
    {
        let mut dst_view = TypedImage::<U8x3>::from_buffer(width, height, &mut dst)?;
        let opts = ResizeOptions::new().resize_alg(filter.algorithm()).use_alpha(false);
        resizer.resize_typed::<U8x3>(&src_view, &mut dst_view, &opts)?;
    }

    // length is exactly width * height * 3
    RgbImage::from_raw(width, height, dst).ok_or(GeomError::InvalidArgument {
        name: "resample buffer",
        value: format!("{}x{}", width, height),
    })
}

/// [`resample_rgb`] with the calling thread's resizer.
pub fn resample(src: &RgbImage, width: u32, height: u32, filter: ResampleFilter) -> GeomResult<RgbImage> {
    RESIZER.with_borrow_mut(|resizer| resample_rgb(resizer, src, width, height, filter))
}
