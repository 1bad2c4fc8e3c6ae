//! Pixel-resampling backends for the resize step.
//!
//! The resize step never implements interpolation kernels itself; it talks
//! to a [`Resampler`] so the transform logic stays testable independent of
//! any specific imaging backend. The default backend delegates to the
//! `image` crate.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use ndarray::{Array3, ArrayView3, s};

use crate::core::{PreprocError, PreprocResult};
use crate::processors::types::Interpolation;

/// A pixel-resampling backend.
///
/// Implementations operate on height-width-channels arrays and must return
/// an image of exactly `(target_height, target_width)` with the channel
/// count preserved. The target width comes first in the argument list,
/// matching the convention of pixel-resize backends.
pub trait Resampler: Send + Sync + std::fmt::Debug {
    /// Resizes a height-width-channels image to the target resolution
    /// using the given interpolation mode.
    fn resize(
        &self,
        image: ArrayView3<'_, f32>,
        target_width: u32,
        target_height: u32,
        interpolation: Interpolation,
    ) -> PreprocResult<Array3<f32>>;
}

/// The default resampling backend, built on `image::imageops`.
///
/// Each channel is resized independently as a `Luma<f32>` plane, which
/// keeps the backend agnostic to the channel count. The `image` crate
/// clamps float samples to `[0, 1]`, so planes are mapped into that range
/// before resampling and mapped back afterwards; data already in `[0, 1]`
/// goes through the identity mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneResampler;

impl PlaneResampler {
    fn filter(interpolation: Interpolation) -> FilterType {
        match interpolation {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Cubic => FilterType::CatmullRom,
            Interpolation::Gaussian => FilterType::Gaussian,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl Resampler for PlaneResampler {
    fn resize(
        &self,
        image: ArrayView3<'_, f32>,
        target_width: u32,
        target_height: u32,
        interpolation: Interpolation,
    ) -> PreprocResult<Array3<f32>> {
        let (src_h, src_w, channels) = image.dim();
        if src_h == 0 || src_w == 0 || channels == 0 {
            return Err(PreprocError::invalid_input(format!(
                "cannot resize an image with empty dimensions ({src_h}, {src_w}, {channels})"
            )));
        }

        let filter = Self::filter(interpolation);
        let mut out = Array3::zeros((target_height as usize, target_width as usize, channels));

        for c in 0..channels {
            let plane = image.slice(s![.., .., c]);

            // Affine map into [0, 1]; the filters are linear, so mapping
            // back afterwards recovers the original value range.
            let (lo, hi) = plane.iter().fold((0.0f32, 1.0f32), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
            let span = hi - lo;

            let data: Vec<f32> = plane.iter().map(|&v| (v - lo) / span).collect();
            let buffer: ImageBuffer<Luma<f32>, Vec<f32>> =
                ImageBuffer::from_raw(src_w as u32, src_h as u32, data).ok_or_else(|| {
                    PreprocError::invalid_input(format!(
                        "plane buffer does not match image dimensions ({src_h}, {src_w})"
                    ))
                })?;

            let resized = imageops::resize(&buffer, target_width, target_height, filter);
            for (x, y, pixel) in resized.enumerate_pixels() {
                out[[y as usize, x as usize, c]] = pixel.0[0] * span + lo;
            }
        }

        Ok(out)
    }
}
