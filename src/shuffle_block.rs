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
/// Bytes gathered by one 16-byte shuffle
pub(crate) const BLOCK_BYTES: usize = 16;

/// Lane index producing a zero byte in `pshufb`
pub(crate) const ZERO_LANE: u8 = 0x80;

/// Gathers `len` destination bytes starting at `dst_offset` out of the
/// 16-byte source window at `src_offset`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ShuffleBlock {
    pub(crate) src_offset: usize,
    pub(crate) dst_offset: usize,
    pub(crate) len: usize,
    pub(crate) shuffle: [u8; BLOCK_BYTES],
}

impl ShuffleBlock {
    /// Reference gather, the vector kernels must match it byte for byte
    #[cfg(test)]
    pub(crate) fn apply(&self, src: &[u8], dst: &mut [u8]) {
        let window = &src[self.src_offset..self.src_offset + BLOCK_BYTES];
        for (dst, &lane) in dst[self.dst_offset..self.dst_offset + self.len]
            .iter_mut()
            .zip(self.shuffle.iter())
        {
            *dst = window[lane as usize];
        }
    }
}

/// Builds nearest neighbour gather blocks for one row.
///
/// `x_offsets` are byte offsets of the source pixel of each destination pixel.
/// Each block takes as many whole pixels as fit one 16-byte window, windows
/// near the end of the row are moved left so they never read past it.
/// Returns `None` when the row is narrower than a window or the blocks would
/// average less than two pixels each.
pub(crate) fn nearest_blocks(
    x_offsets: &[usize],
    pixel_size: usize,
    src_row_bytes: usize,
) -> Option<Vec<ShuffleBlock>> {
    if src_row_bytes < BLOCK_BYTES || pixel_size > BLOCK_BYTES || x_offsets.is_empty() {
        return None;
    }
    let mut blocks = Vec::new();
    let mut dx = 0usize;
    while dx < x_offsets.len() {
        let start = x_offsets[dx];
        let mut count = 0usize;
        while dx + count < x_offsets.len() && (count + 1) * pixel_size <= BLOCK_BYTES {
            let offset = x_offsets[dx + count];
            if offset < start || offset + pixel_size - start > BLOCK_BYTES {
                break;
            }
            count += 1;
        }
        let window = start.min(src_row_bytes - BLOCK_BYTES);
        let mut shuffle = [ZERO_LANE; BLOCK_BYTES];
        for (i, lanes) in shuffle
            .chunks_exact_mut(pixel_size)
            .take(count)
            .enumerate()
        {
            let base = x_offsets[dx + i] - window;
            for (b, lane) in lanes.iter_mut().enumerate() {
                *lane = (base + b) as u8;
            }
        }
        blocks.push(ShuffleBlock {
            src_offset: window,
            dst_offset: dx * pixel_size,
            len: count * pixel_size,
            shuffle,
        });
        dx += count;
    }
    if blocks.len() * 2 > x_offsets.len() {
        return None;
    }
    Some(blocks)
}
