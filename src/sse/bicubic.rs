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

use crate::bicubic_u8::cubic_blend_rows;
use crate::sse::utils::{_mm_load_u32_si128, _mm_pack_i32x16_u8, _mm_store_u32_si128};
use crate::support::{BICUBIC_ROUND, BICUBIC_SHIFT};

pub(crate) fn cubic_blend_rows_sse(rows: [&[i32]; 4], weights: [i32; 4], dst: &mut [u8]) {
    unsafe {
        cubic_blend_rows_sse_impl(rows, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn cubic_blend_rows_sse_impl(rows: [&[i32]; 4], weights: [i32; 4], dst: &mut [u8]) {
    unsafe {
        let len = dst.len();
        let w = weights.map(|x| _mm_set1_epi32(x));
        let rnd = _mm_set1_epi32(BICUBIC_ROUND);
        let mut x = 0usize;

        while x + 16 <= len {
            let mut lanes = [_mm_setzero_si128(); 4];
            for (i, lane) in lanes.iter_mut().enumerate() {
                let mut sum = rnd;
                for (row, &w) in rows.iter().zip(w.iter()) {
                    let v =
                        _mm_loadu_si128(row.get_unchecked(x + i * 4..).as_ptr() as *const __m128i);
                    sum = _mm_add_epi32(sum, _mm_mullo_epi32(v, w));
                }
                *lane = _mm_srai_epi32::<BICUBIC_SHIFT>(sum);
            }
            let packed = _mm_pack_i32x16_u8(lanes[0], lanes[1], lanes[2], lanes[3]);
            _mm_storeu_si128(dst.get_unchecked_mut(x..).as_mut_ptr() as *mut __m128i, packed);
            x += 16;
        }

        if x < len {
            cubic_blend_rows(rows.map(|row| &row[x..len]), weights, &mut dst[x..]);
        }
    }
}

pub(crate) fn cubic_sparse_row_rgba_sse(
    rows: [&[u8]; 4],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    y_weights: [i32; 4],
    dst: &mut [u8],
) {
    unsafe {
        cubic_sparse_row_rgba_sse_impl(rows, x_taps, x_weights, y_weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn cubic_sparse_row_rgba_sse_impl(
    rows: [&[u8]; 4],
    x_taps: &[[usize; 4]],
    x_weights: &[[i32; 4]],
    y_weights: [i32; 4],
    dst: &mut [u8],
) {
    unsafe {
        let wy = y_weights.map(|x| _mm_set1_epi32(x));
        let rnd = _mm_set1_epi32(BICUBIC_ROUND);
        for ((dst, taps), weights) in dst
            .chunks_exact_mut(4)
            .zip(x_taps.iter())
            .zip(x_weights.iter())
        {
            let wx = weights.map(|x| _mm_set1_epi32(x));
            let mut sum = rnd;
            for (row, &wy) in rows.iter().zip(wy.iter()) {
                let mut h = _mm_setzero_si128();
                for (&tap, &wx) in taps.iter().zip(wx.iter()) {
                    let px = _mm_cvtepu8_epi32(_mm_load_u32_si128(row[tap..tap + 4].as_ptr()));
                    h = _mm_add_epi32(h, _mm_mullo_epi32(px, wx));
                }
                sum = _mm_add_epi32(sum, _mm_mullo_epi32(h, wy));
            }
            let v = _mm_srai_epi32::<BICUBIC_SHIFT>(sum);
            let packed = _mm_packus_epi16(_mm_packs_epi32(v, v), _mm_setzero_si128());
            _mm_store_u32_si128(dst, packed);
        }
    }
}
