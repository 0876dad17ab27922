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

use crate::bilinear_u8::{GRAY_BLOCK_PIXELS, GrayBlock, blend_rows_u8};
use crate::shuffle_block::BLOCK_BYTES;
use crate::sse::utils::_mm_pack_i32x16_u8;
use crate::support::{BILINEAR_ROUND, BILINEAR_SHIFT};

pub(crate) fn gray_row_sse(src: &[u8], blocks: &[GrayBlock], dst: &mut [i32]) {
    unsafe {
        gray_row_sse_impl(src, blocks, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn gray_row_sse_impl(src: &[u8], blocks: &[GrayBlock], dst: &mut [i32]) {
    unsafe {
        for block in blocks.iter() {
            let window = &src[block.src_offset..block.src_offset + BLOCK_BYTES];
            let px = _mm_loadu_si128(window.as_ptr() as *const __m128i);
            let shuffle = _mm_loadu_si128(block.shuffle.as_ptr() as *const __m128i);
            let weights = _mm_loadu_si128(block.weights.as_ptr() as *const __m128i);
            // Pairs of taps times pairs of weights, exact in 16 bits.
            let products = _mm_maddubs_epi16(_mm_shuffle_epi8(px, shuffle), weights);
            let lo = _mm_cvtepi16_epi32(products);
            let hi = _mm_cvtepi16_epi32(_mm_srli_si128::<8>(products));
            let dst = &mut dst[block.dst_offset..block.dst_offset + block.len];
            if block.len == GRAY_BLOCK_PIXELS {
                _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, lo);
                _mm_storeu_si128(dst.get_unchecked_mut(4..).as_mut_ptr() as *mut __m128i, hi);
            } else {
                let mut tmp = [0i32; GRAY_BLOCK_PIXELS];
                _mm_storeu_si128(tmp.as_mut_ptr() as *mut __m128i, lo);
                _mm_storeu_si128(tmp.get_unchecked_mut(4..).as_mut_ptr() as *mut __m128i, hi);
                let len = dst.len();
                dst.copy_from_slice(&tmp[..len]);
            }
        }
    }
}

pub(crate) fn blend_rows_u8_sse(row0: &[i32], row1: &[i32], weights: [i32; 2], dst: &mut [u8]) {
    unsafe {
        blend_rows_u8_sse_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn blend_rows_u8_sse_impl(row0: &[i32], row1: &[i32], weights: [i32; 2], dst: &mut [u8]) {
    unsafe {
        let len = dst.len();
        let w0 = _mm_set1_epi32(weights[0]);
        let w1 = _mm_set1_epi32(weights[1]);
        let rnd = _mm_set1_epi32(BILINEAR_ROUND);
        let mut x = 0usize;

        while x + 16 <= len {
            let mut lanes = [_mm_setzero_si128(); 4];
            for (i, lane) in lanes.iter_mut().enumerate() {
                let a = _mm_loadu_si128(row0.get_unchecked(x + i * 4..).as_ptr() as *const __m128i);
                let b = _mm_loadu_si128(row1.get_unchecked(x + i * 4..).as_ptr() as *const __m128i);
                let sum = _mm_add_epi32(
                    _mm_add_epi32(_mm_mullo_epi32(a, w0), _mm_mullo_epi32(b, w1)),
                    rnd,
                );
                *lane = _mm_srai_epi32::<BILINEAR_SHIFT>(sum);
            }
            let packed = _mm_pack_i32x16_u8(lanes[0], lanes[1], lanes[2], lanes[3]);
            _mm_storeu_si128(dst.get_unchecked_mut(x..).as_mut_ptr() as *mut __m128i, packed);
            x += 16;
        }

        if x < len {
            blend_rows_u8(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}
