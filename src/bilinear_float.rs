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
use crate::axis_table::{LinearAxis, LinearConvention};
use crate::mixed_storage::MixedStorage;
use crate::params::ResizeParams;
use crate::resize_error::{ResizeError, try_vec};
use crate::resize_tier::ResizeTier;
use crate::row_slots::RowSlots;
use crate::support::image_row;
use log::trace;
use num_traits::AsPrimitive;
use std::ops::Range;
use std::sync::Arc;

/// Horizontal taps of one destination row, expanded per element
#[derive(Copy, Clone)]
pub(crate) struct LinearRow<'a> {
    /// Element offset of the first tap
    pub(crate) index: &'a [usize],
    pub(crate) w0: &'a [f32],
    pub(crate) w1: &'a [f32],
    /// Element distance to the second tap
    pub(crate) span: usize,
}

impl<'a> LinearRow<'a> {
    /// Taps from element `from` to the end of the row
    #[inline]
    pub(crate) fn tail(&self, from: usize) -> LinearRow<'a> {
        LinearRow {
            index: &self.index[from..],
            w0: &self.w0[from..],
            w1: &self.w1[from..],
            span: self.span,
        }
    }
}

pub(crate) type InterpolateRowHandler<T> = fn(src: &[T], taps: &LinearRow<'_>, dst: &mut [f32]);
pub(crate) type BlendRowsHandler<T> =
    fn(row0: &[f32], row1: &[f32], weights: [f32; 2], dst: &mut [T]);
pub(crate) type SparseRowHandler<T> =
    fn(src0: &[T], src1: &[T], taps: &LinearRow<'_>, weights: [f32; 2], dst: &mut [T]);

pub(crate) fn interpolate_row<T: MixedStorage>(src: &[T], taps: &LinearRow<'_>, dst: &mut [f32]) {
    for (((dst, &x), &w0), &w1) in dst
        .iter_mut()
        .zip(taps.index.iter())
        .zip(taps.w0.iter())
        .zip(taps.w1.iter())
    {
        let a: f32 = src[x].as_();
        let b: f32 = src[x + taps.span].as_();
        *dst = a * w0 + b * w1;
    }
}

pub(crate) fn blend_rows<T: MixedStorage>(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [T],
) {
    for ((dst, &a), &b) in dst.iter_mut().zip(row0.iter()).zip(row1.iter()) {
        *dst = T::from_mixed(a * weights[0] + b * weights[1]);
    }
}

pub(crate) fn sparse_row<T: MixedStorage>(
    src0: &[T],
    src1: &[T],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [T],
) {
    for (((dst, &x), &w0), &w1) in dst
        .iter_mut()
        .zip(taps.index.iter())
        .zip(taps.w0.iter())
        .zip(taps.w1.iter())
    {
        let (a0, b0): (f32, f32) = (src0[x].as_(), src0[x + taps.span].as_());
        let (a1, b1): (f32, f32) = (src1[x].as_(), src1[x + taps.span].as_());
        let r0 = a0 * w0 + b0 * w1;
        let r1 = a1 * w0 + b1 * w1;
        *dst = T::from_mixed(r0 * weights[0] + r1 * weights[1]);
    }
}

pub(crate) struct BilinearFloatHandlers<T> {
    interpolate_row: InterpolateRowHandler<T>,
    blend_rows: BlendRowsHandler<T>,
    sparse_row: SparseRowHandler<T>,
}

impl<T> Clone for BilinearFloatHandlers<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BilinearFloatHandlers<T> {}

impl<T: MixedStorage> BilinearFloatHandlers<T> {
    fn scalar() -> Self {
        BilinearFloatHandlers {
            interpolate_row: interpolate_row::<T>,
            blend_rows: blend_rows::<T>,
            sparse_row: sparse_row::<T>,
        }
    }
}

/// Samples interpolated with float weights
pub(crate) trait LinearFloatSample: MixedStorage {
    /// Kernels of `tier`, vector horizontal passes exist for 4 channels only
    fn handlers(tier: ResizeTier, channels: usize) -> BilinearFloatHandlers<Self>;
}

impl LinearFloatSample for f32 {
    #[allow(unused_variables)]
    fn handlers(tier: ResizeTier, channels: usize) -> BilinearFloatHandlers<f32> {
        let scalar = BilinearFloatHandlers::<f32>::scalar();
        match tier {
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
            ResizeTier::Avx2 => BilinearFloatHandlers {
                interpolate_row: if channels == 4 {
                    crate::avx2::interpolate_row_rgba_f32_avx2
                } else {
                    scalar.interpolate_row
                },
                blend_rows: crate::avx2::blend_rows_f32_avx2,
                sparse_row: if channels == 4 {
                    crate::avx2::sparse_row_rgba_f32_avx2
                } else {
                    scalar.sparse_row
                },
            },
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ResizeTier::Sse41 => BilinearFloatHandlers {
                interpolate_row: if channels == 4 {
                    crate::sse::interpolate_row_rgba_f32_sse
                } else {
                    scalar.interpolate_row
                },
                blend_rows: crate::sse::blend_rows_f32_sse,
                sparse_row: if channels == 4 {
                    crate::sse::sparse_row_rgba_f32_sse
                } else {
                    scalar.sparse_row
                },
            },
            _ => scalar,
        }
    }
}

impl LinearFloatSample for u16 {
    #[allow(unused_variables)]
    fn handlers(tier: ResizeTier, channels: usize) -> BilinearFloatHandlers<u16> {
        let scalar = BilinearFloatHandlers::<u16>::scalar();
        match tier {
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
            ResizeTier::Avx2 => BilinearFloatHandlers {
                interpolate_row: if channels == 4 {
                    crate::avx2::interpolate_row_rgba_u16_avx2
                } else {
                    scalar.interpolate_row
                },
                blend_rows: crate::avx2::blend_rows_u16_avx2,
                sparse_row: if channels == 4 {
                    crate::avx2::sparse_row_rgba_u16_avx2
                } else {
                    scalar.sparse_row
                },
            },
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ResizeTier::Sse41 => BilinearFloatHandlers {
                interpolate_row: if channels == 4 {
                    crate::sse::interpolate_row_rgba_u16_sse
                } else {
                    scalar.interpolate_row
                },
                blend_rows: crate::sse::blend_rows_u16_sse,
                sparse_row: if channels == 4 {
                    crate::sse::sparse_row_rgba_u16_sse
                } else {
                    scalar.sparse_row
                },
            },
            _ => scalar,
        }
    }
}

struct BilinearFloatTables {
    x_index: Vec<usize>,
    x_w0: Vec<f32>,
    x_w1: Vec<f32>,
    y: LinearAxis<f32>,
}

/// Two tap interpolation of `u16` and `f32` images with float weights
#[derive(Clone)]
pub(crate) struct BilinearFloatResampler<T> {
    src_row_len: usize,
    dst_row_len: usize,
    x_span: usize,
    /// Every destination row is computed straight from two source rows
    sparse: bool,
    tables: Arc<BilinearFloatTables>,
    tier: ResizeTier,
    handlers: BilinearFloatHandlers<T>,
}

impl<T: LinearFloatSample> BilinearFloatResampler<T> {
    pub(crate) fn new(params: &ResizeParams, requested: ResizeTier) -> Result<Self, ResizeError> {
        let sparse = params.dst_size.height * 2 <= params.src_size.height;
        Self::with_strategy(params, requested, sparse)
    }

    fn with_strategy(
        params: &ResizeParams,
        requested: ResizeTier,
        sparse: bool,
    ) -> Result<Self, ResizeError> {
        let (src, dst) = (params.src_size, params.dst_size);
        let channels = params.channels;
        let convention = LinearConvention::for_method(params.method);
        let x = LinearAxis::float(src.width, dst.width, convention)?;
        let y = LinearAxis::float(src.height, dst.height, convention)?;

        let dst_row_len = params.dst_row_len();
        let mut x_index = try_vec![0usize; dst_row_len];
        let mut x_w0 = try_vec![0f32; dst_row_len];
        let mut x_w1 = try_vec![0f32; dst_row_len];
        for (i, (&index, &weights)) in x.index.iter().zip(x.weights.iter()).enumerate() {
            for c in 0..channels {
                x_index[i * channels + c] = index * channels + c;
                x_w0[i * channels + c] = weights[0];
                x_w1[i * channels + c] = weights[1];
            }
        }

        trace!(
            "bilinear float: {} rows",
            if sparse { "sparse" } else { "dense" }
        );
        let tier = ResizeTier::select(requested, "bilinear float", |tier| {
            dst_row_len >= tier.register_bytes() / 2
        });

        Ok(BilinearFloatResampler {
            src_row_len: params.src_row_len(),
            dst_row_len,
            x_span: x.span * channels,
            sparse,
            tables: Arc::new(BilinearFloatTables {
                x_index,
                x_w0,
                x_w1,
                y,
            }),
            tier,
            handlers: T::handlers(tier, channels),
        })
    }

    pub(crate) fn tier(&self) -> ResizeTier {
        self.tier
    }

    /// `f32` scratch, two interpolated rows for the dense strategy
    pub(crate) fn scratch_len(&self) -> usize {
        if self.sparse { 0 } else { self.dst_row_len * 2 }
    }

    pub(crate) fn resample_rows(
        &self,
        scratch: &mut [f32],
        src: &[T],
        src_stride: usize,
        dst: &mut [T],
        dst_stride: usize,
        rows: Range<usize>,
    ) {
        let tables = self.tables.as_ref();
        let y = &tables.y;
        let taps = LinearRow {
            index: &tables.x_index,
            w0: &tables.x_w0,
            w1: &tables.x_w1,
            span: self.x_span,
        };
        let src_row = |row: usize| image_row(src, src_stride, row, self.src_row_len);

        if self.sparse {
            for (i, dy) in rows.enumerate() {
                let sy = y.index[dy];
                let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_len];
                (self.handlers.sparse_row)(
                    src_row(sy),
                    src_row(sy + y.span),
                    &taps,
                    y.weights[dy],
                    dst_row,
                );
            }
            return;
        }

        let mut slots = RowSlots::<f32, 2>::new(scratch, self.dst_row_len);
        let mut prev = -2isize;
        for (i, dy) in rows.enumerate() {
            let sy = y.index[dy];
            let reuse = sy as isize - prev;
            if reuse == 1 {
                slots.swap(0, 1);
                (self.handlers.interpolate_row)(src_row(sy + y.span), &taps, slots.get_mut(1));
            } else if reuse != 0 {
                (self.handlers.interpolate_row)(src_row(sy), &taps, slots.get_mut(0));
                (self.handlers.interpolate_row)(src_row(sy + y.span), &taps, slots.get_mut(1));
            }
            prev = sy as isize;

            let [row0, row1] = slots.rows();
            let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_len];
            (self.handlers.blend_rows)(row0, row1, y.weights[dy], dst_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;
    use crate::params::{PixelType, ResizeMethod};

    fn run<T: LinearFloatSample>(
        resampler: &BilinearFloatResampler<T>,
        params: &ResizeParams,
        src: &[T],
    ) -> Vec<T> {
        let dst_stride = params.dst_row_len();
        let mut dst = vec![T::default(); dst_stride * params.dst_size.height];
        let mut scratch = vec![0f32; resampler.scratch_len()];
        resampler.resample_rows(
            &mut scratch,
            src,
            params.src_row_len(),
            &mut dst,
            dst_stride,
            0..params.dst_size.height,
        );
        dst
    }

    fn pattern_u16(len: usize) -> Vec<u16> {
        (0..len).map(|x| ((x * 7919 + x / 3) % 65536) as u16).collect()
    }

    fn pattern_f32(len: usize) -> Vec<f32> {
        (0..len).map(|x| ((x * 37) % 101) as f32 / 7f32 - 3f32).collect()
    }

    const METHODS: [ResizeMethod; 3] = [
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
    ];

    fn geometry() -> Vec<(ImageSize, ImageSize)> {
        let mut out = Vec::new();
        for dst_width in [3usize, 7, 8, 9, 15, 16, 17, 33] {
            for (src_width, src_height, dst_height) in
                [(dst_width + 4, 9usize, 5usize), (dst_width / 2 + 1, 4, 9), (64, 20, 6)]
            {
                out.push((
                    ImageSize::new(src_width, src_height),
                    ImageSize::new(dst_width, dst_height),
                ));
            }
        }
        out
    }

    #[test]
    fn tiers_agree_u16() {
        for channels in 1..=4 {
            for method in METHODS {
                for (src, dst) in geometry() {
                    let params = ResizeParams::new(src, dst, channels, PixelType::U16, method);
                    let image = pattern_u16(params.src_row_len() * src.height);
                    let reference =
                        BilinearFloatResampler::<u16>::new(&params, ResizeTier::Scalar).unwrap();
                    let expected = run(&reference, &params, &image);
                    for tier in ResizeTier::available() {
                        let resampler = BilinearFloatResampler::<u16>::new(&params, tier).unwrap();
                        assert_eq!(run(&resampler, &params, &image), expected, "{tier:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn tiers_agree_f32() {
        for channels in 1..=4 {
            for method in METHODS {
                for (src, dst) in geometry() {
                    let params = ResizeParams::new(src, dst, channels, PixelType::F32, method);
                    let image = pattern_f32(params.src_row_len() * src.height);
                    let reference =
                        BilinearFloatResampler::<f32>::new(&params, ResizeTier::Scalar).unwrap();
                    let expected = run(&reference, &params, &image);
                    for tier in ResizeTier::available() {
                        let resampler = BilinearFloatResampler::<f32>::new(&params, tier).unwrap();
                        let out = run(&resampler, &params, &image);
                        assert!(
                            out.iter().zip(expected.iter()).all(|(a, b)| a.to_bits() == b.to_bits()),
                            "{tier:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sparse_matches_dense() {
        for channels in [1usize, 3, 4] {
            let params = ResizeParams::new(
                ImageSize::new(37, 40),
                ImageSize::new(19, 9),
                channels,
                PixelType::U16,
                ResizeMethod::Bilinear,
            );
            let image = pattern_u16(params.src_row_len() * 40);
            for tier in ResizeTier::available() {
                let sparse =
                    BilinearFloatResampler::<u16>::with_strategy(&params, tier, true).unwrap();
                let dense =
                    BilinearFloatResampler::<u16>::with_strategy(&params, tier, false).unwrap();
                assert_eq!(run(&sparse, &params, &image), run(&dense, &params, &image));
            }
        }
    }

    #[test]
    fn identity_is_exact() {
        let params = ResizeParams::new(
            ImageSize::new(13, 6),
            ImageSize::new(13, 6),
            4,
            PixelType::F32,
            ResizeMethod::Bilinear,
        );
        let image = pattern_f32(params.src_row_len() * 6);
        for tier in ResizeTier::available() {
            let resampler = BilinearFloatResampler::<f32>::new(&params, tier).unwrap();
            assert_eq!(run(&resampler, &params, &image), image);
        }
    }

    #[test]
    fn align_corners_keeps_corners() {
        let params = ResizeParams::new(
            ImageSize::new(5, 5),
            ImageSize::new(9, 9),
            1,
            PixelType::U16,
            ResizeMethod::BilinearCaffe,
        );
        let image = pattern_u16(25);
        let resampler = BilinearFloatResampler::<u16>::new(&params, ResizeTier::Scalar).unwrap();
        let out = run(&resampler, &params, &image);
        assert_eq!(out[0], image[0]);
        assert_eq!(out[8], image[4]);
        assert_eq!(out[80], image[24]);
        assert_eq!(out[2], image[1]);
    }
}
