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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::shuffle_block::{BLOCK_BYTES, ShuffleBlock};
use crate::sse::utils::_mm_store_partial_si128;

pub(crate) fn nearest_row_sse(
    src: &[u8],
    _: &[usize],
    _: usize,
    blocks: &[ShuffleBlock],
    dst: &mut [u8],
) {
    unsafe {
        nearest_row_sse_impl(src, blocks, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn nearest_row_sse_impl(src: &[u8], blocks: &[ShuffleBlock], dst: &mut [u8]) {
    unsafe {
        let dst_len = dst.len();
        for block in blocks.iter() {
            let window = &src[block.src_offset..block.src_offset + BLOCK_BYTES];
            let v = _mm_loadu_si128(window.as_ptr() as *const __m128i);
            let shuffle = _mm_loadu_si128(block.shuffle.as_ptr() as *const __m128i);
            let gathered = _mm_shuffle_epi8(v, shuffle);
            if block.dst_offset + BLOCK_BYTES <= dst_len {
                // Bytes past `len` are rewritten by the next block.
                _mm_storeu_si128(
                    dst.get_unchecked_mut(block.dst_offset..).as_mut_ptr() as *mut __m128i,
                    gathered,
                );
            } else {
                _mm_store_partial_si128(
                    &mut dst[block.dst_offset..block.dst_offset + block.len],
                    gathered,
                );
            }
        }
    }
}
