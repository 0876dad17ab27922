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
use crate::axis_table::nearest_axis;
use crate::params::{ResizeMethod, ResizeParams};
use crate::resize_error::ResizeError;
use crate::resize_sample::{ResizeSample, as_bytes, as_bytes_mut};
use crate::resize_tier::ResizeTier;
use crate::shuffle_block::{ShuffleBlock, nearest_blocks};
use log::trace;
use std::ops::Range;
use std::sync::Arc;

/// Copies one destination row, `x_offsets` and rows are in bytes
pub(crate) type NearestRowHandler =
    fn(src: &[u8], x_offsets: &[usize], pixel_size: usize, blocks: &[ShuffleBlock], dst: &mut [u8]);

pub(crate) fn nearest_row(
    src: &[u8],
    x_offsets: &[usize],
    pixel_size: usize,
    _: &[ShuffleBlock],
    dst: &mut [u8],
) {
    for (dst, &x) in dst.chunks_exact_mut(pixel_size).zip(x_offsets.iter()) {
        dst.copy_from_slice(&src[x..x + pixel_size]);
    }
}

fn row_handler(tier: ResizeTier) -> NearestRowHandler {
    match tier {
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        ResizeTier::Sse41 => crate::sse::nearest_row_sse,
        _ => nearest_row,
    }
}

struct NearestTables {
    x_offsets: Vec<usize>,
    y_index: Vec<usize>,
    blocks: Vec<ShuffleBlock>,
}

/// Pixel copy through index tables, works on raw bytes of any sample type
#[derive(Clone)]
pub(crate) struct NearestResampler {
    pixel_size: usize,
    src_row_bytes: usize,
    dst_row_bytes: usize,
    /// Source is a single pixel
    constant: bool,
    tables: Arc<NearestTables>,
    tier: ResizeTier,
    handler: NearestRowHandler,
}

impl NearestResampler {
    pub(crate) fn new(params: &ResizeParams, requested: ResizeTier) -> Result<Self, ResizeError> {
        let pytorch = params.method == ResizeMethod::NearestPytorch;
        let pixel_size = params.pixel_size();
        let (src_size, dst_size) = (params.src_size, params.dst_size);
        let mut x_offsets = nearest_axis(src_size.width, dst_size.width, pytorch)?;
        x_offsets.iter_mut().for_each(|x| *x *= pixel_size);
        let y_index = nearest_axis(src_size.height, dst_size.height, pytorch)?;
        let src_row_bytes = src_size.width * pixel_size;
        let constant = src_size.width == 1 && src_size.height == 1;

        let blocks = if requested > ResizeTier::Scalar && !constant {
            nearest_blocks(&x_offsets, pixel_size, src_row_bytes)
        } else {
            None
        };
        // Shuffles are 16 bytes wide on every vector tier.
        let tier = ResizeTier::select(requested, "nearest", |tier| {
            tier == ResizeTier::Sse41 && blocks.is_some()
        });
        let blocks = match (tier, blocks) {
            (ResizeTier::Scalar, _) | (_, None) => Vec::new(),
            (_, Some(blocks)) => {
                trace!(
                    "nearest: {} shuffle blocks for {} pixels",
                    blocks.len(),
                    dst_size.width
                );
                blocks
            }
        };

        Ok(NearestResampler {
            pixel_size,
            src_row_bytes,
            dst_row_bytes: dst_size.width * pixel_size,
            constant,
            tables: Arc::new(NearestTables {
                x_offsets,
                y_index,
                blocks,
            }),
            tier,
            handler: row_handler(tier),
        })
    }

    pub(crate) fn tier(&self) -> ResizeTier {
        self.tier
    }

    /// `dst` starts at destination row `rows.start`, strides are in samples
    pub(crate) fn resample_rows<T: ResizeSample>(
        &self,
        src: &[T],
        src_stride: usize,
        dst: &mut [T],
        dst_stride: usize,
        rows: Range<usize>,
    ) {
        let sample_size = T::PIXEL_TYPE.size();
        let (src, dst) = (as_bytes(src), as_bytes_mut(dst));
        let (src_stride, dst_stride) = (src_stride * sample_size, dst_stride * sample_size);

        if self.constant {
            let pixel = &src[..self.pixel_size];
            for i in 0..rows.len() {
                let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_bytes];
                for dst in dst_row.chunks_exact_mut(self.pixel_size) {
                    dst.copy_from_slice(pixel);
                }
            }
            return;
        }

        let tables = self.tables.as_ref();
        for (i, &sy) in tables.y_index[rows].iter().enumerate() {
            let src_row = &src[sy * src_stride..sy * src_stride + self.src_row_bytes];
            let dst_row = &mut dst[i * dst_stride..i * dst_stride + self.dst_row_bytes];
            (self.handler)(
                src_row,
                &tables.x_offsets,
                self.pixel_size,
                &tables.blocks,
                dst_row,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;
    use crate::params::PixelType;

    fn run<T: ResizeSample>(
        resampler: &NearestResampler,
        params: &ResizeParams,
        src: &[T],
    ) -> Vec<T> {
        let dst_stride = params.dst_row_len();
        let mut dst = vec![T::default(); dst_stride * params.dst_size.height];
        resampler.resample_rows(
            src,
            params.src_row_len(),
            &mut dst,
            dst_stride,
            0..params.dst_size.height,
        );
        dst
    }

    #[test]
    fn picks_cell_centers() {
        let params = ResizeParams::new(
            ImageSize::new(4, 4),
            ImageSize::new(2, 2),
            1,
            PixelType::U8,
            ResizeMethod::Nearest,
        );
        let src = (0..16).map(|x| ((x % 4) * 85) as u8).collect::<Vec<_>>();
        let resampler = NearestResampler::new(&params, ResizeTier::Scalar).unwrap();
        assert_eq!(run(&resampler, &params, &src), vec![85, 255, 85, 255]);
    }

    #[test]
    fn single_pixel_is_replicated() {
        let params = ResizeParams::new(
            ImageSize::new(1, 1),
            ImageSize::new(5, 3),
            3,
            PixelType::U16,
            ResizeMethod::Nearest,
        );
        let resampler = NearestResampler::new(&params, ResizeTier::detect()).unwrap();
        let dst = run(&resampler, &params, &[7u16, 8, 9]);
        assert!(dst.chunks_exact(3).all(|x| x == [7, 8, 9]));
    }

    #[test]
    fn tiers_agree() {
        for channels in 1..=4 {
            for pixel_type in [PixelType::U8, PixelType::U16, PixelType::F32] {
                for dst_width in [15usize, 16, 17, 31, 32, 33, 70] {
                    // Byte view of the same pixels.
                    let params = ResizeParams::new(
                        ImageSize::new(97, 9),
                        ImageSize::new(dst_width, 5),
                        channels * pixel_type.size(),
                        PixelType::U8,
                        ResizeMethod::Nearest,
                    );
                    let src = (0..params.src_row_len() * 9)
                        .map(|x| (x * 13 % 256) as u8)
                        .collect::<Vec<_>>();
                    let reference = NearestResampler::new(&params, ResizeTier::Scalar).unwrap();
                    let expected = run(&reference, &params, &src);
                    for tier in ResizeTier::available() {
                        let resampler = NearestResampler::new(&params, tier).unwrap();
                        assert_eq!(run(&resampler, &params, &src), expected, "{tier:?}");
                    }
                }
            }
        }
    }
}
