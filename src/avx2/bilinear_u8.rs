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

use crate::avx2::utils::_mm256_pack_i32x32_u8;
use crate::sse::blend_rows_u8_sse;
use crate::support::{BILINEAR_ROUND, BILINEAR_SHIFT};

pub(crate) fn blend_rows_u8_avx2(row0: &[i32], row1: &[i32], weights: [i32; 2], dst: &mut [u8]) {
    unsafe {
        blend_rows_u8_avx2_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn blend_rows_u8_avx2_impl(
    row0: &[i32],
    row1: &[i32],
    weights: [i32; 2],
    dst: &mut [u8],
) {
    unsafe {
        let len = dst.len();
        let w0 = _mm256_set1_epi32(weights[0]);
        let w1 = _mm256_set1_epi32(weights[1]);
        let rnd = _mm256_set1_epi32(BILINEAR_ROUND);
        let mut x = 0usize;

        while x + 32 <= len {
            let mut lanes = [_mm256_setzero_si256(); 4];
            for (i, lane) in lanes.iter_mut().enumerate() {
                let a = _mm256_loadu_si256(
                    row0.get_unchecked(x + i * 8..).as_ptr() as *const __m256i
                );
                let b = _mm256_loadu_si256(
                    row1.get_unchecked(x + i * 8..).as_ptr() as *const __m256i
                );
                let sum = _mm256_add_epi32(
                    _mm256_add_epi32(_mm256_mullo_epi32(a, w0), _mm256_mullo_epi32(b, w1)),
                    rnd,
                );
                *lane = _mm256_srai_epi32::<BILINEAR_SHIFT>(sum);
            }
            let packed = _mm256_pack_i32x32_u8(lanes[0], lanes[1], lanes[2], lanes[3]);
            _mm256_storeu_si256(dst.get_unchecked_mut(x..).as_mut_ptr() as *mut __m256i, packed);
            x += 32;
        }

        if x < len {
            blend_rows_u8_sse(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}
