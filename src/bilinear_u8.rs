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
use crate::params::ResizeParams;
use crate::resize_error::ResizeError;
use crate::resize_tier::ResizeTier;
use crate::row_slots::RowSlots;
use crate::shuffle_block::{BLOCK_BYTES, ZERO_LANE};
use crate::support::{BILINEAR_ROUND, BILINEAR_SHIFT, image_row};
use log::trace;
use std::ops::Range;
use std::sync::Arc;

/// Outputs produced by one [GrayBlock]
pub(crate) const GRAY_BLOCK_PIXELS: usize = 8;

/// Horizontal interpolation of up to 8 single channel pixels out of one
/// 16-byte source window: `dst[i] = src[shuffle[2i]] * weights[2i] + src[shuffle[2i + 1]] * weights[2i + 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct GrayBlock {
    pub(crate) src_offset: usize,
    pub(crate) dst_offset: usize,
    pub(crate) len: usize,
    pub(crate) shuffle: [u8; BLOCK_BYTES],
    pub(crate) weights: [i8; BLOCK_BYTES],
}

impl GrayBlock {
    #[cfg(test)]
    fn apply(&self, src: &[u8], dst: &mut [i32]) {
        let window = &src[self.src_offset..self.src_offset + BLOCK_BYTES];
        for (i, dst) in dst[self.dst_offset..self.dst_offset + self.len]
            .iter_mut()
            .enumerate()
        {
            let a = window[self.shuffle[2 * i] as usize] as i32;
            let b = window[self.shuffle[2 * i + 1] as usize] as i32;
            *dst = a * self.weights[2 * i] as i32 + b * self.weights[2 * i + 1] as i32;
        }
    }
}

/// Builds gray gather blocks, `None` if any block spans more than one window
fn gray_blocks(
    x_index: &[usize],
    x_weights: &[[i32; 2]],
    span: usize,
    src_width: usize,
) -> Option<Vec<GrayBlock>> {
    if src_width < BLOCK_BYTES || x_index.len() < GRAY_BLOCK_PIXELS {
        return None;
    }
    let mut blocks = Vec::with_capacity(x_index.len().div_ceil(GRAY_BLOCK_PIXELS));
    for (b, (index, weights)) in x_index
        .chunks(GRAY_BLOCK_PIXELS)
        .zip(x_weights.chunks(GRAY_BLOCK_PIXELS))
        .enumerate()
    {
        let lo = index[0];
        let hi = index[index.len() - 1] + span;
        if hi - lo >= BLOCK_BYTES {
            return None;
        }
        let window = lo.min(src_width - BLOCK_BYTES);
        let mut shuffle = [ZERO_LANE; BLOCK_BYTES];
        let mut block_weights = [0i8; BLOCK_BYTES];
        for (i, (&x, w)) in index.iter().zip(weights.iter()).enumerate() {
            shuffle[2 * i] = (x - window) as u8;
            shuffle[2 * i + 1] = (x + span - window) as u8;
            block_weights[2 * i] = w[0] as i8;
            block_weights[2 * i + 1] = w[1] as i8;
        }
        blocks.push(GrayBlock {
            src_offset: window,
            dst_offset: b * GRAY_BLOCK_PIXELS,
            len: index.len(),
            shuffle,
            weights: block_weights,
        });
    }
    Some(blocks)
}

/// Horizontal pass through gray blocks
pub(crate) type GrayRowHandler = fn(src: &[u8], blocks: &[GrayBlock], dst: &mut [i32]);
/// Vertical blend of two interpolated rows into bytes
pub(crate) type BlendRowsU8Handler =
    fn(row0: &[i32], row1: &[i32], weights: [i32; 2], dst: &mut [u8]);

/// `dst[i] = src[x] * w0 + src[x + span] * w1` with element offsets
fn interpolate_row_u8(
    src: &[u8],
    x_index: &[usize],
    x_weights: &[[i32; 2]],
    span: usize,
    dst: &mut [i32],
) {
    for ((dst, &x), w) in dst.iter_mut().zip(x_index.iter()).zip(x_weights.iter()) {
        *dst = src[x] as i32 * w[0] + src[x + span] as i32 * w[1];
    }
}

pub(crate) fn blend_rows_u8(row0: &[i32], row1: &[i32], weights: [i32; 2], dst: &mut [u8]) {
    for ((dst, &a), &b) in dst.iter_mut().zip(row0.iter()).zip(row1.iter()) {
        *dst = ((a * weights[0] + b * weights[1] + BILINEAR_ROUND) >> BILINEAR_SHIFT).clamp(0, 255)
            as u8;
    }
}

#[derive(Copy, Clone)]
struct BilinearU8Handlers {
    blend_rows: BlendRowsU8Handler,
    gray_row: Option<GrayRowHandler>,
}

impl BilinearU8Handlers {
    fn for_tier(tier: ResizeTier) -> BilinearU8Handlers {
        match tier {
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
            ResizeTier::Avx2 => BilinearU8Handlers {
                blend_rows: crate::avx2::blend_rows_u8_avx2,
                gray_row: Some(crate::sse::gray_row_sse),
            },
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ResizeTier::Sse41 => BilinearU8Handlers {
                blend_rows: crate::sse::blend_rows_u8_sse,
                gray_row: Some(crate::sse::gray_row_sse),
            },
            _ => BilinearU8Handlers {
                blend_rows: blend_rows_u8,
                gray_row: None,
            },
        }
    }
}

struct BilinearU8Tables {
    /// Element offset of the first tap of every destination element
    x_index: Vec<usize>,
    x_weights: Vec<[i32; 2]>,
    y: LinearAxis<i32>,
    gray_blocks: Option<Vec<GrayBlock>>,
}

/// Two tap interpolation of 8-bit images with 4-bit weights
#[derive(Clone)]
pub(crate) struct BilinearU8Resampler {
    src_row_len: usize,
    dst_row_len: usize,
    /// Element distance between the two horizontal taps
    x_span: usize,
    tables: Arc<BilinearU8Tables>,
    tier: ResizeTier,
    handlers: BilinearU8Handlers,
}

impl BilinearU8Resampler {
    pub(crate) fn new(params: &ResizeParams, requested: ResizeTier) -> Result<Self, ResizeError> {
        let (src, dst) = (params.src_size, params.dst_size);
        let channels = params.channels;
        let convention = LinearConvention::for_method(params.method);
        let x = LinearAxis::fixed_point(src.width, dst.width, convention)?;
        let y = LinearAxis::fixed_point(src.height, dst.height, convention)?;

        let dst_row_len = params.dst_row_len();
        let mut x_index = Vec::new();
        x_index
            .try_reserve_exact(dst_row_len)
            .map_err(|_| ResizeError::OutOfMemory(dst_row_len))?;
        let mut x_weights = Vec::new();
        x_weights
            .try_reserve_exact(dst_row_len)
            .map_err(|_| ResizeError::OutOfMemory(dst_row_len))?;
        for (&index, &weights) in x.index.iter().zip(x.weights.iter()) {
            for c in 0..channels {
                x_index.push(index * channels + c);
                x_weights.push(weights);
            }
        }
        let x_span = x.span * channels;

        let tier = ResizeTier::select(requested, "bilinear u8", |tier| {
            dst_row_len >= tier.register_bytes()
        });
        let handlers = BilinearU8Handlers::for_tier(tier);
        let gray_blocks = match handlers.gray_row {
            Some(_) if channels == 1 => gray_blocks(&x_index, &x_weights, x_span, src.width),
            _ => None,
        };
        if let Some(blocks) = &gray_blocks {
            trace!("bilinear u8: gray fast path with {} blocks", blocks.len());
        }

        Ok(BilinearU8Resampler {
            src_row_len: params.src_row_len(),
            dst_row_len,
            x_span,
            tables: Arc::new(BilinearU8Tables {
                x_index,
                x_weights,
                y,
                gray_blocks,
            }),
            tier,
            handlers,
        })
    }

    pub(crate) fn tier(&self) -> ResizeTier {
        self.tier
    }

    /// Two interpolated rows
    pub(crate) fn scratch_len(&self) -> usize {
        self.dst_row_len * 2
    }

    fn interpolate_row(&self, src: &[u8], dst: &mut [i32]) {
        let tables = self.tables.as_ref();
        match (&tables.gray_blocks, self.handlers.gray_row) {
            (Some(blocks), Some(gray_row)) => gray_row(src, blocks, dst),
            _ => interpolate_row_u8(src, &tables.x_index, &tables.x_weights, self.x_span, dst),
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
        let y = &self.tables.y;
        let src_row = |row: usize| image_row(src, src_stride, row, self.src_row_len);
        let mut slots = RowSlots::<i32, 2>::new(scratch, self.dst_row_len);
        let mut prev = -2isize;

        for (i, dy) in rows.enumerate() {
            let sy = y.index[dy];
            let reuse = sy as isize - prev;
            if reuse == 1 {
                slots.swap(0, 1);
                self.interpolate_row(src_row(sy + y.span), slots.get_mut(1));
            } else if reuse != 0 {
                self.interpolate_row(src_row(sy), slots.get_mut(0));
                self.interpolate_row(src_row(sy + y.span), slots.get_mut(1));
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

    fn bilinear_params(src: ImageSize, dst: ImageSize, channels: usize) -> ResizeParams {
        ResizeParams::new(src, dst, channels, PixelType::U8, ResizeMethod::Bilinear)
    }

    fn run(resampler: &BilinearU8Resampler, params: &ResizeParams, src: &[u8]) -> Vec<u8> {
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
        (0..len).map(|x| ((x * 59 + x / 13) % 256) as u8).collect()
    }

    #[test]
    fn identity_is_exact() {
        let params = bilinear_params(ImageSize::new(19, 7), ImageSize::new(19, 7), 3);
        let src = pattern(params.src_row_len() * 7);
        for tier in ResizeTier::available() {
            let resampler = BilinearU8Resampler::new(&params, tier).unwrap();
            assert_eq!(run(&resampler, &params, &src), src);
        }
    }

    #[test]
    fn ramp_is_interpolated() {
        let params = bilinear_params(ImageSize::new(16, 2), ImageSize::new(24, 3), 1);
        let src = (0..32).map(|x| ((x % 16) * 16) as u8).collect::<Vec<_>>();
        let resampler = BilinearU8Resampler::new(&params, ResizeTier::Scalar).unwrap();
        let out = run(&resampler, &params, &src);
        for (d, &v) in out[..24].iter().enumerate() {
            let position = ((d as f32 + 0.5) * 16f32 / 24f32 - 0.5).clamp(0f32, 15f32);
            let ideal = position * 16f32;
            assert!((v as f32 - ideal).abs() <= 1f32, "{d}: {v} vs {ideal}");
        }
        assert_eq!(&out[..24], &out[24..48]);
    }

    #[test]
    fn upscaled_corners_keep_source_corners() {
        for channels in 1..=4 {
            for (src, dst) in [((5usize, 4usize), (13usize, 11usize)), ((9, 3), (40, 7))] {
                let params =
                    bilinear_params(ImageSize::new(src.0, src.1), ImageSize::new(dst.0, dst.1), channels);
                let image = pattern(params.src_row_len() * src.1);
                let src_px = |x: usize, y: usize| {
                    let at = (y * src.0 + x) * channels;
                    image[at..at + channels].to_vec()
                };
                for tier in ResizeTier::available() {
                    let resampler = BilinearU8Resampler::new(&params, tier).unwrap();
                    let out = run(&resampler, &params, &image);
                    let dst_px = |x: usize, y: usize| {
                        let at = (y * dst.0 + x) * channels;
                        out[at..at + channels].to_vec()
                    };
                    assert_eq!(dst_px(0, 0), src_px(0, 0), "{tier:?}");
                    assert_eq!(dst_px(dst.0 - 1, 0), src_px(src.0 - 1, 0), "{tier:?}");
                    assert_eq!(dst_px(0, dst.1 - 1), src_px(0, src.1 - 1), "{tier:?}");
                    assert_eq!(
                        dst_px(dst.0 - 1, dst.1 - 1),
                        src_px(src.0 - 1, src.1 - 1),
                        "{tier:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn gray_blocks_match_plain_interpolation() {
        for (src_width, dst_width) in [(40usize, 37usize), (16, 9), (33, 64), (100, 90)] {
            let x = LinearAxis::fixed_point(src_width, dst_width, LinearConvention::HalfPixel)
                .unwrap();
            let Some(blocks) = gray_blocks(&x.index, &x.weights, x.span, src_width) else {
                continue;
            };
            let src = pattern(src_width);
            let mut expected = vec![0i32; dst_width];
            interpolate_row_u8(&src, &x.index, &x.weights, x.span, &mut expected);
            let mut out = vec![0i32; dst_width];
            for block in blocks.iter() {
                block.apply(&src, &mut out);
            }
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn tiers_agree() {
        for channels in 1..=4 {
            for dst_width in [7usize, 15, 16, 17, 31, 32, 33] {
                for src_width in [dst_width / 2 + 1, dst_width + 5, 70] {
                    for (src_height, dst_height) in [(9usize, 5usize), (5, 9), (1, 3)] {
                        let params = bilinear_params(
                            ImageSize::new(src_width, src_height),
                            ImageSize::new(dst_width, dst_height),
                            channels,
                        );
                        let src = pattern(params.src_row_len() * src_height);
                        let reference =
                            BilinearU8Resampler::new(&params, ResizeTier::Scalar).unwrap();
                        let expected = run(&reference, &params, &src);
                        for tier in ResizeTier::available() {
                            let resampler = BilinearU8Resampler::new(&params, tier).unwrap();
                            assert_eq!(
                                run(&resampler, &params, &src),
                                expected,
                                "{tier:?} {channels} {src_width}->{dst_width}"
                            );
                        }
                    }
                }
            }
        }
    }
}
