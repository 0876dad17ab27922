/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::area_u8::AreaResampler;
use crate::bicubic_u8::BicubicResampler;
use crate::bilinear_float::BilinearFloatResampler;
use crate::bilinear_u8::BilinearU8Resampler;
use crate::nearest_sampler::NearestResampler;
use crate::params::{PixelType, ResizeMethod, ResizeParams};
use crate::resize_error::{ResizeBufferMismatch, ResizeError, try_vec};
use crate::resize_sample::{ResizeSample, reinterpret, reinterpret_mut};
use crate::resize_tier::ResizeTier;
use crate::threading_policy::ThreadingPolicy;
use crate::ImageSize;
use log::debug;
use rayon::prelude::*;
use std::ops::Range;

/// Runtime configuration of a [Resizer]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ResizerOptions {
    /// Widest tier to try, `None` picks [ResizeTier::detect]
    pub tier: Option<ResizeTier>,
    pub threading_policy: ThreadingPolicy,
}

/// Row buffers of one band
#[derive(Clone, Default)]
struct RowScratch {
    ints: Vec<i32>,
    floats: Vec<f32>,
}

impl RowScratch {
    fn new(layout: (usize, usize)) -> Result<RowScratch, ResizeError> {
        Ok(RowScratch {
            ints: try_vec![0i32; layout.0],
            floats: try_vec![0f32; layout.1],
        })
    }
}

#[derive(Clone)]
enum Engine {
    Nearest(NearestResampler),
    Area(AreaResampler),
    BilinearU8(BilinearU8Resampler),
    BilinearU16(BilinearFloatResampler<u16>),
    BilinearF32(BilinearFloatResampler<f32>),
    Bicubic(BicubicResampler),
}

impl Engine {
    fn new(params: &ResizeParams, tier: ResizeTier) -> Result<Engine, ResizeError> {
        Ok(match (params.method, params.pixel_type) {
            (ResizeMethod::Nearest | ResizeMethod::NearestPytorch, _) => {
                Engine::Nearest(NearestResampler::new(params, tier)?)
            }
            (ResizeMethod::Area | ResizeMethod::AreaFast, PixelType::U8) => {
                Engine::Area(AreaResampler::new(params, tier)?)
            }
            (ResizeMethod::Bilinear, PixelType::U8) => {
                Engine::BilinearU8(BilinearU8Resampler::new(params, tier)?)
            }
            (
                ResizeMethod::Bilinear | ResizeMethod::BilinearCaffe | ResizeMethod::BilinearPytorch,
                PixelType::U16,
            ) => Engine::BilinearU16(BilinearFloatResampler::new(params, tier)?),
            (
                ResizeMethod::Bilinear | ResizeMethod::BilinearCaffe | ResizeMethod::BilinearPytorch,
                PixelType::F32,
            ) => Engine::BilinearF32(BilinearFloatResampler::new(params, tier)?),
            (ResizeMethod::Bicubic, PixelType::U8) => {
                Engine::Bicubic(BicubicResampler::new(params, tier)?)
            }
            (method, pixel_type) => {
                return Err(ResizeError::UnsupportedMethod { method, pixel_type });
            }
        })
    }

    fn tier(&self) -> ResizeTier {
        match self {
            Engine::Nearest(k) => k.tier(),
            Engine::Area(k) => k.tier(),
            Engine::BilinearU8(k) => k.tier(),
            Engine::BilinearU16(k) => k.tier(),
            Engine::BilinearF32(k) => k.tier(),
            Engine::Bicubic(k) => k.tier(),
        }
    }

    /// `i32` and `f32` scratch lengths
    fn scratch_layout(&self) -> (usize, usize) {
        match self {
            Engine::Nearest(_) => (0, 0),
            Engine::Area(k) => (k.scratch_len(), 0),
            Engine::BilinearU8(k) => (k.scratch_len(), 0),
            Engine::BilinearU16(k) => (0, k.scratch_len()),
            Engine::BilinearF32(k) => (0, k.scratch_len()),
            Engine::Bicubic(k) => (k.scratch_len(), 0),
        }
    }

    fn resample_rows<T: ResizeSample>(
        &self,
        scratch: &mut RowScratch,
        src: &[T],
        src_stride: usize,
        dst: &mut [T],
        dst_stride: usize,
        rows: Range<usize>,
    ) {
        macro_rules! typed {
            ($kernel: expr, $scratch: expr, $sample: ty) => {{
                let (Some(src), Some(dst)) = (
                    reinterpret::<T, $sample>(src),
                    reinterpret_mut::<T, $sample>(dst),
                ) else {
                    unreachable!("sample type is checked before dispatch");
                };
                $kernel.resample_rows($scratch, src, src_stride, dst, dst_stride, rows)
            }};
        }
        match self {
            Engine::Nearest(k) => k.resample_rows(src, src_stride, dst, dst_stride, rows),
            Engine::Area(k) => typed!(k, &mut scratch.ints, u8),
            Engine::BilinearU8(k) => typed!(k, &mut scratch.ints, u8),
            Engine::BilinearU16(k) => typed!(k, &mut scratch.floats, u16),
            Engine::BilinearF32(k) => typed!(k, &mut scratch.floats, f32),
            Engine::Bicubic(k) => typed!(k, &mut scratch.ints, u8),
        }
    }
}

/// Checks stride and length of an image buffer, returns the used length
fn check_image<T>(
    image: &[T],
    stride: usize,
    size: ImageSize,
    channels: usize,
) -> Result<usize, ResizeError> {
    let row_len = size.width * channels;
    if stride < row_len {
        return Err(ResizeError::InvalidStride(row_len, stride));
    }
    let expected = (size.height - 1)
        .checked_mul(stride)
        .and_then(|x| x.checked_add(row_len))
        .unwrap_or(usize::MAX);
    if image.len() < expected {
        return Err(ResizeError::BufferMismatch(ResizeBufferMismatch {
            expected,
            width: size.width,
            height: size.height,
            stride,
            slice_len: image.len(),
        }));
    }
    Ok(expected)
}

/// Resamples images of one fixed geometry.
///
/// Index and weight tables are built once in [Resizer::new] and shared by
/// clones, row buffers are owned by every clone.
///
/// # Example
///
/// ```
/// use pic_resample::{ImageSize, PixelType, ResizeMethod, ResizeParams, Resizer};
///
/// let params = ResizeParams::new(
///     ImageSize::new(4, 4),
///     ImageSize::new(2, 2),
///     1,
///     PixelType::U8,
///     ResizeMethod::Nearest,
/// );
/// let mut resizer = Resizer::new(params).unwrap();
/// let src = [0u8, 85, 170, 255].repeat(4);
/// let mut dst = [0u8; 4];
/// resizer.run(&src, 4, &mut dst, 2).unwrap();
/// assert_eq!(dst, [85, 255, 85, 255]);
/// ```
#[derive(Clone)]
pub struct Resizer {
    params: ResizeParams,
    threading_policy: ThreadingPolicy,
    engine: Engine,
    scratch: RowScratch,
}

impl Resizer {
    /// Resizer on the widest detected tier without threading
    pub fn new(params: ResizeParams) -> Result<Resizer, ResizeError> {
        Resizer::with_options(params, ResizerOptions::default())
    }

    pub fn with_options(
        params: ResizeParams,
        options: ResizerOptions,
    ) -> Result<Resizer, ResizeError> {
        params.validate()?;
        let requested = options.tier.unwrap_or_else(ResizeTier::detect);
        let engine = Engine::new(&params, requested)?;
        let scratch = RowScratch::new(engine.scratch_layout())?;
        debug!(
            "resizer: {:?} {:?} {}x{} -> {}x{}, {} channels on {:?}",
            params.method,
            params.pixel_type,
            params.src_size.width,
            params.src_size.height,
            params.dst_size.width,
            params.dst_size.height,
            params.channels,
            engine.tier()
        );
        Ok(Resizer {
            params,
            threading_policy: options.threading_policy,
            engine,
            scratch,
        })
    }

    pub fn params(&self) -> &ResizeParams {
        &self.params
    }

    /// Tier the kernels were resolved for
    pub fn tier(&self) -> ResizeTier {
        self.engine.tier()
    }

    pub fn threading_policy(&self) -> ThreadingPolicy {
        self.threading_policy
    }

    pub fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        self.threading_policy = threading_policy;
    }

    /// Resamples `src` into `dst`.
    ///
    /// Strides are in samples of `T` and may include padding, the last row
    /// needs no padding. Samples outside the destination rectangle are left
    /// untouched.
    pub fn run<T: ResizeSample>(
        &mut self,
        src: &[T],
        src_stride: usize,
        dst: &mut [T],
        dst_stride: usize,
    ) -> Result<(), ResizeError> {
        let params = self.params;
        if T::PIXEL_TYPE != params.pixel_type {
            return Err(ResizeError::PixelTypeMismatch {
                expected: params.pixel_type,
                received: T::PIXEL_TYPE,
            });
        }
        check_image(src, src_stride, params.src_size, params.channels)?;
        let dst_len = check_image(dst, dst_stride, params.dst_size, params.channels)?;
        let dst = &mut dst[..dst_len];
        let height = params.dst_size.height;

        let pool = self.threading_policy.get_pool(params.dst_size);
        let Some(pool) = pool else {
            self.engine
                .resample_rows(&mut self.scratch, src, src_stride, dst, dst_stride, 0..height);
            return Ok(());
        };

        let band_rows = height.div_ceil(pool.current_num_threads().max(1));
        let engine = &self.engine;
        let layout = engine.scratch_layout();
        pool.install(|| {
            dst.par_chunks_mut(band_rows * dst_stride)
                .enumerate()
                .try_for_each(|(band, dst)| {
                    let start = band * band_rows;
                    let rows = start..(start + band_rows).min(height);
                    let mut scratch = RowScratch::new(layout)?;
                    engine.resample_rows(&mut scratch, src, src_stride, dst, dst_stride, rows);
                    Ok(())
                })
        })
    }
}
