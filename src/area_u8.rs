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
use crate::axis_table::AreaAxis;
use crate::params::{ResizeMethod, ResizeParams};
use crate::resize_error::ResizeError;
use crate::resize_tier::ResizeTier;
use crate::support::{AREA_RANGE, AREA_SHIFT};
use log::trace;
use std::ops::Range;
use std::sync::Arc;

/// Weighted set or accumulation of one source row into the `i32` row buffer
pub(crate) type AreaRowU8Handler = fn(src: &[u8], weight: i32, dst: &mut [i32], accumulate: bool);
/// Same as [AreaRowU8Handler] for pre-summed 2×2 rows
pub(crate) type AreaRowI32Handler =
    fn(src: &[i32], weight: i32, dst: &mut [i32], accumulate: bool);

pub(crate) fn area_row_u8(src: &[u8], weight: i32, dst: &mut [i32], accumulate: bool) {
    if accumulate {
        for (dst, &src) in dst.iter_mut().zip(src.iter()) {
            *dst += src as i32 * weight;
        }
    } else {
        for (dst, &src) in dst.iter_mut().zip(src.iter()) {
            *dst = src as i32 * weight;
        }
    }
}

pub(crate) fn area_row_i32(src: &[i32], weight: i32, dst: &mut [i32], accumulate: bool) {
    if accumulate {
        for (dst, &src) in dst.iter_mut().zip(src.iter()) {
            *dst += src * weight;
        }
    } else {
        for (dst, &src) in dst.iter_mut().zip(src.iter()) {
            *dst = src * weight;
        }
    }
}

#[derive(Copy, Clone)]
struct AreaHandlers {
    row_u8: AreaRowU8Handler,
    row_i32: AreaRowI32Handler,
}

impl AreaHandlers {
    fn for_tier(tier: ResizeTier) -> AreaHandlers {
        match tier {
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
            ResizeTier::Avx2 => AreaHandlers {
                row_u8: crate::avx2::area_row_u8_avx2,
                row_i32: crate::avx2::area_row_i32_avx2,
            },
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ResizeTier::Sse41 => AreaHandlers {
                row_u8: crate::sse::area_row_u8_sse,
                row_i32: crate::sse::area_row_i32_sse,
            },
            _ => AreaHandlers {
                row_u8: area_row_u8,
                row_i32: area_row_i32,
            },
        }
    }
}

/// Source pixels averaged before the box filter
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum AreaFold {
    Single,
    /// 2×2 blocks summed, odd edges duplicated
    Pairs,
}

/// Whether summing source pairs keeps every pixel weight of the 1×1 path.
///
/// Holds when each cell spans `2 * m` source pixels with `m` a power of two
/// no larger than the half range, so both tables are exact integers.
fn pairs_are_exact(src: usize, dst: usize) -> bool {
    if src % (2 * dst) != 0 {
        return false;
    }
    let m = src / (2 * dst);
    m.is_power_of_two() && m <= (AREA_RANGE / 2) as usize
}

struct AreaTables {
    x: AreaAxis,
    y: AreaAxis,
}

/// Coverage weighted box averaging of 8-bit images
#[derive(Clone)]
pub(crate) struct AreaResampler {
    channels: usize,
    src_width: usize,
    src_height: usize,
    /// Width of the rows fed to the row pass, halved for 2×2
    row_width: usize,
    dst_width: usize,
    fold: AreaFold,
    round: i32,
    shift: i32,
    tables: Arc<AreaTables>,
    tier: ResizeTier,
    handlers: AreaHandlers,
}

impl AreaResampler {
    pub(crate) fn new(params: &ResizeParams, requested: ResizeTier) -> Result<Self, ResizeError> {
        let (src, dst) = (params.src_size, params.dst_size);
        let pairs = params.method == ResizeMethod::AreaFast
            || (pairs_are_exact(src.width, dst.width) && pairs_are_exact(src.height, dst.height));
        if pairs {
            Self::with_fold(params, requested, AreaFold::Pairs, AREA_RANGE / 2, AREA_SHIFT)
        } else {
            Self::with_fold(params, requested, AreaFold::Single, AREA_RANGE, AREA_SHIFT)
        }
    }

    fn with_fold(
        params: &ResizeParams,
        requested: ResizeTier,
        fold: AreaFold,
        range: i32,
        shift: i32,
    ) -> Result<Self, ResizeError> {
        let (src, dst) = (params.src_size, params.dst_size);
        let (row_width, row_height) = match fold {
            AreaFold::Single => (src.width, src.height),
            AreaFold::Pairs => (src.width.div_ceil(2), src.height.div_ceil(2)),
        };
        trace!("area: {fold:?} fold, {row_width}x{row_height} rows");
        let row_len = row_width * params.channels;
        let tier = ResizeTier::select(requested, "area", |tier| {
            row_len >= tier.register_bytes()
        });
        Ok(AreaResampler {
            channels: params.channels,
            src_width: src.width,
            src_height: src.height,
            row_width,
            dst_width: dst.width,
            fold,
            round: 1 << (shift - 1),
            shift,
            tables: Arc::new(AreaTables {
                x: AreaAxis::new(row_width, dst.width, range)?,
                y: AreaAxis::new(row_height, dst.height, range)?,
            }),
            tier,
            handlers: AreaHandlers::for_tier(tier),
        })
    }

    pub(crate) fn tier(&self) -> ResizeTier {
        self.tier
    }

    /// `i32` scratch needed by [AreaResampler::resample_rows]
    pub(crate) fn scratch_len(&self) -> usize {
        let row_len = self.row_width * self.channels;
        match self.fold {
            AreaFold::Single => row_len,
            AreaFold::Pairs => row_len * 2,
        }
    }

    /// Sums the 2×2 blocks of half-size row `row` into `dst`
    fn sum_pairs(&self, src: &[u8], src_stride: usize, row: usize, dst: &mut [i32]) {
        let channels = self.channels;
        let src_row_len = self.src_width * channels;
        let r0 = 2 * row;
        let r1 = (2 * row + 1).min(self.src_height - 1);
        let row0 = &src[r0 * src_stride..r0 * src_stride + src_row_len];
        let row1 = &src[r1 * src_stride..r1 * src_stride + src_row_len];
        for (x, dst) in dst.chunks_exact_mut(channels).enumerate() {
            let x0 = 2 * x * channels;
            let x1 = (2 * x + 1).min(self.src_width - 1) * channels;
            for (c, dst) in dst.iter_mut().enumerate() {
                *dst = row0[x0 + c] as i32
                    + row0[x1 + c] as i32
                    + row1[x0 + c] as i32
                    + row1[x1 + c] as i32;
            }
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
        let row_len = self.row_width * self.channels;
        let dst_row_len = self.dst_width * self.channels;
        let (row, pair_row) = scratch.split_at_mut(row_len);
        let tables = self.tables.as_ref();

        for (i, dy) in rows.enumerate() {
            let (first, weights) = tables.y.cell(dy);
            for (k, &weight) in weights.iter().enumerate() {
                let sy = first + k;
                match self.fold {
                    AreaFold::Single => {
                        let src_row = &src[sy * src_stride..sy * src_stride + row_len];
                        (self.handlers.row_u8)(src_row, weight, row, k != 0);
                    }
                    AreaFold::Pairs => {
                        self.sum_pairs(src, src_stride, sy, &mut pair_row[..row_len]);
                        (self.handlers.row_i32)(&pair_row[..row_len], weight, row, k != 0);
                    }
                }
            }
            let dst_row = &mut dst[i * dst_stride..i * dst_stride + dst_row_len];
            match self.channels {
                1 => self.column_pass::<1>(row, dst_row),
                2 => self.column_pass::<2>(row, dst_row),
                3 => self.column_pass::<3>(row, dst_row),
                4 => self.column_pass::<4>(row, dst_row),
                _ => unreachable!("channels are validated on construction"),
            }
        }
    }

    fn column_pass<const N: usize>(&self, row: &[i32], dst: &mut [u8]) {
        let x = &self.tables.x;
        for (d, dst) in dst.chunks_exact_mut(N).enumerate() {
            let (first, weights) = x.cell(d);
            let mut sums = [self.round; N];
            for (k, &weight) in weights.iter().enumerate() {
                let px = &row[(first + k) * N..(first + k + 1) * N];
                for (sum, &v) in sums.iter_mut().zip(px.iter()) {
                    *sum += v * weight;
                }
            }
            for (dst, sum) in dst.iter_mut().zip(sums) {
                *dst = (sum >> self.shift).clamp(0, 255) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;
    use crate::params::{PixelType, ResizeMethod};

    fn area_params(src: ImageSize, dst: ImageSize, channels: usize) -> ResizeParams {
        ResizeParams::new(src, dst, channels, PixelType::U8, ResizeMethod::Area)
    }

    fn run(resampler: &AreaResampler, params: &ResizeParams, src: &[u8]) -> Vec<u8> {
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
        (0..len).map(|x| ((x * 37 + x / 7) % 256) as u8).collect()
    }

    #[test]
    fn averages_pairs() {
        let params = area_params(ImageSize::new(4, 1), ImageSize::new(2, 1), 1);
        let resampler = AreaResampler::new(&params, ResizeTier::Scalar).unwrap();
        assert_eq!(run(&resampler, &params, &[10, 20, 30, 40]), vec![15, 35]);
    }

    #[test]
    fn constant_color_is_preserved() {
        for (src, dst) in [((13, 7), (5, 3)), ((40, 40), (9, 11)), ((7, 5), (7, 5)), ((3, 9), (2, 4))] {
            for channels in 1..=4 {
                let params = area_params(
                    ImageSize::new(src.0, src.1),
                    ImageSize::new(dst.0, dst.1),
                    channels,
                );
                let color = [17u8, 200, 93, 255];
                let image = color[..channels].repeat(src.0 * src.1);
                for tier in ResizeTier::available() {
                    let resampler = AreaResampler::new(&params, tier).unwrap();
                    let out = run(&resampler, &params, &image);
                    assert_eq!(out, color[..channels].repeat(dst.0 * dst.1));
                }
            }
        }
    }

    #[test]
    fn tiers_agree() {
        for channels in 1..=4 {
            for dst_width in [7usize, 15, 16, 17, 31, 32, 33] {
                for src_width in [dst_width * 2 + 1, dst_width * 3 / 2 + 1, 64] {
                    let params = area_params(
                        ImageSize::new(src_width, 11),
                        ImageSize::new(dst_width, 4),
                        channels,
                    );
                    let src = pattern(params.src_row_len() * 11);
                    let reference = AreaResampler::new(&params, ResizeTier::Scalar).unwrap();
                    let expected = run(&reference, &params, &src);
                    for tier in ResizeTier::available() {
                        let resampler = AreaResampler::new(&params, tier).unwrap();
                        assert_eq!(run(&resampler, &params, &src), expected, "{tier:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn pair_fold_matches_single_on_averaged_image() {
        let (width, height, channels) = (23usize, 17usize, 3usize);
        let small = pattern(width * height * channels);
        let mut doubled = vec![0u8; width * 2 * height * 2 * channels];
        for y in 0..height * 2 {
            for x in 0..width * 2 {
                let s = ((y / 2) * width + x / 2) * channels;
                let d = (y * width * 2 + x) * channels;
                doubled[d..d + channels].copy_from_slice(&small[s..s + channels]);
            }
        }
        let dst = ImageSize::new(9, 7);
        let pairs_params = area_params(ImageSize::new(width * 2, height * 2), dst, channels);
        let pairs = AreaResampler::with_fold(
            &pairs_params,
            ResizeTier::Scalar,
            AreaFold::Pairs,
            AREA_RANGE / 2,
            AREA_SHIFT,
        )
        .unwrap();

        let single_params = area_params(ImageSize::new(width, height), dst, channels);
        let single = AreaResampler::with_fold(
            &single_params,
            ResizeTier::Scalar,
            AreaFold::Single,
            AREA_RANGE / 2,
            AREA_SHIFT - 2,
        )
        .unwrap();
        assert_eq!(
            run(&pairs, &pairs_params, &doubled),
            run(&single, &single_params, &small)
        );
    }

    #[test]
    fn pair_fold_is_chosen_only_when_exact() {
        assert!(pairs_are_exact(4, 2));
        assert!(pairs_are_exact(16, 2));
        assert!(!pairs_are_exact(5, 2));
        assert!(!pairs_are_exact(6, 2));
        assert!(!pairs_are_exact(12, 2));
        assert!(!pairs_are_exact(2, 2));

        let odd = area_params(ImageSize::new(5, 4), ImageSize::new(2, 2), 1);
        let resampler = AreaResampler::new(&odd, ResizeTier::Scalar).unwrap();
        assert_eq!(resampler.fold, AreaFold::Single);
        let rows = [0u8, 0, 0, 255, 255].repeat(4);
        assert_eq!(run(&resampler, &odd, &rows), vec![0, 204, 0, 204]);
    }

    #[test]
    fn pair_fold_matches_single_on_even_decimation() {
        for (src, dst) in [((8, 6), (4, 3)), ((32, 16), (8, 2)), ((24, 20), (6, 10))] {
            for channels in 1..=4 {
                let params = area_params(
                    ImageSize::new(src.0, src.1),
                    ImageSize::new(dst.0, dst.1),
                    channels,
                );
                let image = pattern(params.src_row_len() * src.1);
                let single = AreaResampler::with_fold(
                    &params,
                    ResizeTier::Scalar,
                    AreaFold::Single,
                    AREA_RANGE,
                    AREA_SHIFT,
                )
                .unwrap();
                let expected = run(&single, &params, &image);
                for tier in ResizeTier::available() {
                    let pairs = AreaResampler::new(&params, tier).unwrap();
                    assert_eq!(pairs.fold, AreaFold::Pairs);
                    assert_eq!(run(&pairs, &params, &image), expected, "{tier:?}");
                }
            }
        }
    }

    #[test]
    fn area_fast_always_folds() {
        let params = ResizeParams::new(
            ImageSize::new(5, 5),
            ImageSize::new(2, 2),
            1,
            PixelType::U8,
            ResizeMethod::AreaFast,
        );
        let resampler = AreaResampler::new(&params, ResizeTier::Scalar).unwrap();
        assert_eq!(resampler.fold, AreaFold::Pairs);
        assert_eq!(run(&resampler, &params, &[100u8; 25]), vec![100u8; 4]);

        // 2×2 blocks 0, 40, 80, 120 averaged two by two along each axis
        let mut image = vec![0u8; 64];
        for y in 0..8 {
            for x in 0..8 {
                image[y * 8 + x] = ((y / 4) * 80 + (x / 4) * 40) as u8;
            }
        }
        let params = ResizeParams::new(
            ImageSize::new(8, 8),
            ImageSize::new(2, 2),
            1,
            PixelType::U8,
            ResizeMethod::AreaFast,
        );
        let resampler = AreaResampler::new(&params, ResizeTier::Scalar).unwrap();
        assert_eq!(run(&resampler, &params, &image), vec![0, 40, 80, 120]);
    }
}
