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
use crate::axis_table::CubicAxis;
use crate::params::ResizeParams;
use crate::resize_error::{ResizeError, try_vec};
use crate::resize_tier::ResizeTier;
use crate::row_slots::{RowSlots, cubic_slot};
use crate::support::{BICUBIC_ROUND, BICUBIC_SHIFT, image_row};
use log::trace;
use std::ops::Range;
use std::sync::Arc;

/// Vertical four row blend of horizontally interpolated rows
pub(crate) type CubicBlendHandler = fn(rows: [&[i32]; 4], weights: [i32; 4], dst: &mut [u8]);
/// Full 4×4 interpolation of one destination row straight from source rows
pub(crate) type CubicSparseHandler = fn(
    rows: [&[u8]; 4],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    y_weights: [i32; 4],
    dst: &mut [u8],
);

#[inline(always)]
fn quantize(sum: i32) -> u8 {
    ((sum + BICUBIC_ROUND) >> BICUBIC_SHIFT).clamp(0, 255) as u8
}

fn cubic_interpolate_row<const N: usize>(
    src: &[u8],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    dst: &mut [i32],
) {
    for ((dst, taps), weights) in dst
        .chunks_exact_mut(N)
        .zip(x_taps.iter())
        .zip(x_weights.iter())
    {
        for (c, dst) in dst.iter_mut().enumerate() {
            *dst = src[taps[0] + c] as i32 * weights[0]
                + src[taps[1] + c] as i32 * weights[1]
                + src[taps[2] + c] as i32 * weights[2]
                + src[taps[3] + c] as i32 * weights[3];
        }
    }
}

pub(crate) fn cubic_blend_rows(rows: [&[i32]; 4], weights: [i32; 4], dst: &mut [u8]) {
    for (i, dst) in dst.iter_mut().enumerate() {
        *dst = quantize(
            rows[0][i] * weights[0]
                + rows[1][i] * weights[1]
                + rows[2][i] * weights[2]
                + rows[3][i] * weights[3],
        );
    }
}

fn cubic_sparse_row_impl<const N: usize>(
    rows: [&[u8]; 4],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    y_weights: [i32; 4],
    dst: &mut [u8],
) {
    for ((dst, taps), weights) in dst
        .chunks_exact_mut(N)
        .zip(x_taps.iter())
        .zip(x_weights.iter())
    {
        for (c, dst) in dst.iter_mut().enumerate() {
            let mut sum = 0i32;
            for (row, &wy) in rows.iter().zip(y_weights.iter()) {
                let h = row[taps[0] + c] as i32 * weights[0]
                    + row[taps[1] + c] as i32 * weights[1]
                    + row[taps[2] + c] as i32 * weights[2]
                    + row[taps[3] + c] as i32 * weights[3];
                sum += h * wy;
            }
            *dst = quantize(sum);
        }
    }
}

pub(crate) fn cubic_sparse_row(
    rows: [&[u8]; 4],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    y_weights: [i32; 4],
    dst: &mut [u8],
) {
    let channels = dst.len() / x_taps.len().max(1);
    match channels {
        1 => cubic_sparse_row_impl::<1>(rows, x_taps, x_weights, y_weights, dst),
        2 => cubic_sparse_row_impl::<2>(rows, x_taps, x_weights, y_weights, dst),
        3 => cubic_sparse_row_impl::<3>(rows, x_taps, x_weights, y_weights, dst),
        4 => cubic_sparse_row_impl::<4>(rows, x_taps, x_weights, y_weights, dst),
        _ => unreachable!("channels are validated on construction"),
    }
}

#[derive(Copy, Clone)]
struct BicubicHandlers {
    blend_rows: CubicBlendHandler,
    sparse_row: CubicSparseHandler,
}

impl BicubicHandlers {
    #[allow(unused_variables)]
    fn for_tier(tier: ResizeTier, channels: usize) -> BicubicHandlers {
        match tier {
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
            ResizeTier::Avx2 => BicubicHandlers {
                blend_rows: crate::avx2::cubic_blend_rows_avx2,
                sparse_row: if channels == 4 {
                    crate::sse::cubic_sparse_row_rgba_sse
                } else {
                    cubic_sparse_row
                },
            },
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ResizeTier::Sse41 => BicubicHandlers {
                blend_rows: crate::sse::cubic_blend_rows_sse,
                sparse_row: if channels == 4 {
                    crate::sse::cubic_sparse_row_rgba_sse
                } else {
                    cubic_sparse_row
                },
            },
            _ => BicubicHandlers {
                blend_rows: cubic_blend_rows,
                sparse_row: cubic_sparse_row,
            },
        }
    }
}

struct BicubicTables {
    /// Element offsets of the four horizontal taps of every destination pixel
    x_taps: Vec<[usize; 4]>,
    x_weights: Vec<[i32; 4]>,
    y: CubicAxis,
}

/// Catmull-Rom interpolation of 8-bit images
#[derive(Clone)]
pub(crate) struct BicubicResampler {
    channels: usize,
    src_height: usize,
    src_row_len: usize,
    dst_row_len: usize,
    /// Every destination row is computed straight from four source rows
    sparse: bool,
    tables: Arc<BicubicTables>,
    tier: ResizeTier,
    handlers: BicubicHandlers,
}

impl BicubicResampler {
    pub(crate) fn new(params: &ResizeParams, requested: ResizeTier) -> Result<Self, ResizeError> {
        let sparse = params.dst_size.height * 3 <= params.src_size.height;
        Self::with_strategy(params, requested, sparse)
    }

    fn with_strategy(
        params: &ResizeParams,
        requested: ResizeTier,
        sparse: bool,
    ) -> Result<Self, ResizeError> {
        let (src, dst) = (params.src_size, params.dst_size);
        let channels = params.channels;
        let x = CubicAxis::new(src.width, dst.width)?;
        let y = CubicAxis::new(src.height, dst.height)?;
        let mut x_taps = try_vec![[0usize; 4]; dst.width];
        for (dst, taps) in x_taps.iter_mut().zip(x.taps.iter()) {
            *dst = taps.map(|tap| tap * channels);
        }

        trace!("bicubic: {} rows", if sparse { "sparse" } else { "dense" });
        let dst_row_len = params.dst_row_len();
        let tier = ResizeTier::select(requested, "bicubic", |tier| {
            dst_row_len >= tier.register_bytes()
        });

        Ok(BicubicResampler {
            channels,
            src_height: src.height,
            src_row_len: params.src_row_len(),
            dst_row_len,
            sparse,
            tables: Arc::new(BicubicTables {
                x_taps,
                x_weights: x.weights,
                y,
            }),
            tier,
            handlers: BicubicHandlers::for_tier(tier, channels),
        })
    }

    pub(crate) fn tier(&self) -> ResizeTier {
        self.tier
    }

    /// Four interpolated rows for the dense strategy
    pub(crate) fn scratch_len(&self) -> usize {
        if self.sparse { 0 } else { self.dst_row_len * 4 }
    }

    fn interpolate_row(&self, src: &[u8], dst: &mut [i32]) {
        let tables = self.tables.as_ref();
        let (taps, weights) = (&tables.x_taps, &tables.x_weights);
        match self.channels {
            1 => cubic_interpolate_row::<1>(src, taps, weights, dst),
            2 => cubic_interpolate_row::<2>(src, taps, weights, dst),
            3 => cubic_interpolate_row::<3>(src, taps, weights, dst),
            4 => cubic_interpolate_row::<4>(src, taps, weights, dst),
            _ => unreachable!("channels are validated on construction"),
        }
    }

    pub(crate) fn resample_rows(
        &self,
        scratch: &mut [i32],
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
        rows: Range<usize>,
    ) {
        let tables = self.tables.as_ref();
        let y = &tables.y;
        let src_row = |row: usize| image_row(src, src_stride, row, self.src_row_len);

        if self.sparse {
            for (i, dy) in rows.enumerate() {
                let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_len];
                (self.handlers.sparse_row)(
                    y.taps[dy].map(src_row),
                    &tables.x_taps,
                    &tables.x_weights,
                    y.weights[dy],
                    dst_row,
                );
            }
            return;
        }

        let last_row = self.src_height as isize - 1;
        let mut slots = RowSlots::<i32, 4>::new(scratch, self.dst_row_len);
        // First virtual row not interpolated yet
        let mut next = isize::MIN;
        for (i, dy) in rows.enumerate() {
            let sy = y.index[dy] as isize;
            for row in (sy - 1).max(next)..sy + 3 {
                let clamped = row.clamp(0, last_row) as usize;
                self.interpolate_row(src_row(clamped), slots.get_mut(cubic_slot(row)));
            }
            next = sy + 3;

            let ring = slots.rows();
            let window = [
                ring[cubic_slot(sy - 1)],
                ring[cubic_slot(sy)],
                ring[cubic_slot(sy + 1)],
                ring[cubic_slot(sy + 2)],
            ];
            let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_len];
            (self.handlers.blend_rows)(window, y.weights[dy], dst_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;
    use crate::params::{PixelType, ResizeMethod};

    fn bicubic_params(src: ImageSize, dst: ImageSize, channels: usize) -> ResizeParams {
        ResizeParams::new(src, dst, channels, PixelType::U8, ResizeMethod::Bicubic)
    }

    fn run(resampler: &BicubicResampler, params: &ResizeParams, src: &[u8]) -> Vec<u8> {
        let dst_stride = params.dst_row_len();
        let mut dst = vec![0u8; dst_stride * params.dst_size.height];
        let mut scratch = vec![0i32; resampler.scratch_len()];
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

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|x| ((x * 97 + x / 5) % 256) as u8).collect()
    }

    #[test]
    fn identity_is_exact() {
        let params = bicubic_params(ImageSize::new(21, 9), ImageSize::new(21, 9), 4);
        let src = pattern(params.src_row_len() * 9);
        for tier in ResizeTier::available() {
            let resampler = BicubicResampler::new(&params, tier).unwrap();
            assert_eq!(run(&resampler, &params, &src), src);
        }
    }

    #[test]
    fn constant_color_is_preserved() {
        for channels in 1..=4 {
            let params = bicubic_params(ImageSize::new(17, 31), ImageSize::new(40, 9), channels);
            let color = [3u8, 250, 128, 77];
            let src = color[..channels].repeat(17 * 31);
            for tier in ResizeTier::available() {
                let resampler = BicubicResampler::new(&params, tier).unwrap();
                assert_eq!(
                    run(&resampler, &params, &src),
                    color[..channels].repeat(40 * 9)
                );
            }
        }
    }

    #[test]
    fn tiers_agree() {
        for channels in 1..=4 {
            for dst_width in [5usize, 15, 16, 17, 31, 32, 33] {
                for src_width in [dst_width / 2 + 1, dst_width * 3 + 2] {
                    for (src_height, dst_height) in [(7usize, 12usize), (30, 8), (2, 5)] {
                        let params = bicubic_params(
                            ImageSize::new(src_width, src_height),
                            ImageSize::new(dst_width, dst_height),
                            channels,
                        );
                        let src = pattern(params.src_row_len() * src_height);
                        let reference =
                            BicubicResampler::new(&params, ResizeTier::Scalar).unwrap();
                        let expected = run(&reference, &params, &src);
                        for tier in ResizeTier::available() {
                            let resampler = BicubicResampler::new(&params, tier).unwrap();
                            assert_eq!(run(&resampler, &params, &src), expected, "{tier:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn sparse_matches_dense() {
        for channels in 1..=4 {
            for (src, dst) in [((40usize, 33usize), (13usize, 11usize)), ((9, 4), (20, 17))] {
                let params = bicubic_params(
                    ImageSize::new(src.0, src.1),
                    ImageSize::new(dst.0, dst.1),
                    channels,
                );
                let image = pattern(params.src_row_len() * src.1);
                for tier in ResizeTier::available() {
                    let sparse = BicubicResampler::with_strategy(&params, tier, true).unwrap();
                    let dense = BicubicResampler::with_strategy(&params, tier, false).unwrap();
                    assert_eq!(run(&sparse, &params, &image), run(&dense, &params, &image));
                }
            }
        }
    }

    #[test]
    fn single_pixel_fills_destination() {
        let params = bicubic_params(ImageSize::new(1, 1), ImageSize::new(4, 3), 2);
        for tier in ResizeTier::available() {
            let resampler = BicubicResampler::new(&params, tier).unwrap();
            assert_eq!(run(&resampler, &params, &[42, 201]), [42u8, 201].repeat(12));
        }
    }

    #[test]
    fn single_column_replicates_edges() {
        let params = bicubic_params(ImageSize::new(1, 5), ImageSize::new(3, 9), 2);
        let image = [10u8, 250, 60, 200, 0, 90, 140, 30, 220, 5];
        let resampler = BicubicResampler::new(&params, ResizeTier::Scalar).unwrap();
        let out = run(&resampler, &params, &image);
        for row in out.chunks_exact(6) {
            assert_eq!(&row[0..2], &row[2..4]);
            assert_eq!(&row[0..2], &row[4..6]);
        }
        assert_eq!(&out[0..2], &image[0..2]);
        assert_eq!(&out[48..50], &image[8..10]);
    }

    #[test]
    fn two_pixel_rows_stay_between_neighbours() {
        let params = bicubic_params(ImageSize::new(2, 1), ImageSize::new(7, 7), 2);
        let image = [20u8, 230, 180, 5];
        let resampler = BicubicResampler::new(&params, ResizeTier::Scalar).unwrap();
        let out = run(&resampler, &params, &image);
        let first = &out[..14];
        for row in out.chunks_exact(14) {
            assert_eq!(row, first);
        }
        assert_eq!(&first[0..2], &image[0..2]);
        assert_eq!(&first[12..14], &image[2..4]);
        for px in first.chunks_exact(2) {
            assert!((20..=180).contains(&px[0]), "{px:?}");
            assert!((5..=230).contains(&px[1]), "{px:?}");
        }
    }

    #[test]
    fn flat_borders_are_reproduced() {
        let params = bicubic_params(ImageSize::new(8, 8), ImageSize::new(16, 16), 1);
        let mut image = vec![77u8; 64];
        for y in 3..5 {
            for x in 3..5 {
                image[y * 8 + x] = 200;
            }
        }
        let edge = [0usize, 1, 2, 13, 14, 15];
        for tier in ResizeTier::available() {
            let resampler = BicubicResampler::new(&params, tier).unwrap();
            let out = run(&resampler, &params, &image);
            for &y in edge.iter() {
                for &x in edge.iter() {
                    assert_eq!(out[y * 16 + x], 77, "{tier:?} at {x},{y}");
                }
            }
        }
    }
}
