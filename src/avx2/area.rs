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

use crate::sse::{area_row_i32_sse, area_row_u8_sse};

pub(crate) fn area_row_u8_avx2(src: &[u8], weight: i32, dst: &mut [i32], accumulate: bool) {
    unsafe {
        if accumulate {
            area_row_u8_avx2_impl::<true>(src, weight, dst);
        } else {
            area_row_u8_avx2_impl::<false>(src, weight, dst);
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn area_row_u8_avx2_impl<const ACCUMULATE: bool>(
    src: &[u8],
    weight: i32,
    dst: &mut [i32],
) {
    unsafe {
        let len = src.len().min(dst.len());
        let v_weight = _mm256_set1_epi32(weight);
        let mut x = 0usize;

        while x + 32 <= len {
            for i in [0usize, 8, 16, 24] {
                let px = _mm_loadl_epi64(src.get_unchecked(x + i..).as_ptr() as *const __m128i);
                let ptr = dst.get_unchecked_mut(x + i..).as_mut_ptr() as *mut __m256i;
                let mut v = _mm256_mullo_epi32(_mm256_cvtepu8_epi32(px), v_weight);
                if ACCUMULATE {
                    v = _mm256_add_epi32(_mm256_loadu_si256(ptr), v);
                }
                _mm256_storeu_si256(ptr, v);
            }
            x += 32;
        }

        if x < len {
            area_row_u8_sse(&src[x..len], weight, &mut dst[x..len], ACCUMULATE);
        }
    }
}

pub(crate) fn area_row_i32_avx2(src: &[i32], weight: i32, dst: &mut [i32], accumulate: bool) {
    unsafe {
        if accumulate {
            area_row_i32_avx2_impl::<true>(src, weight, dst);
        } else {
            area_row_i32_avx2_impl::<false>(src, weight, dst);
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn area_row_i32_avx2_impl<const ACCUMULATE: bool>(
    src: &[i32],
    weight: i32,
    dst: &mut [i32],
) {
    unsafe {
        let len = src.len().min(dst.len());
        let v_weight = _mm256_set1_epi32(weight);
        let mut x = 0usize;

        while x + 16 <= len {
            for i in [0usize, 8] {
                let s = _mm256_loadu_si256(src.get_unchecked(x + i..).as_ptr() as *const __m256i);
                let ptr = dst.get_unchecked_mut(x + i..).as_mut_ptr() as *mut __m256i;
                let mut v = _mm256_mullo_epi32(s, v_weight);
                if ACCUMULATE {
                    v = _mm256_add_epi32(_mm256_loadu_si256(ptr), v);
                }
                _mm256_storeu_si256(ptr, v);
            }
            x += 16;
        }

        if x < len {
            area_row_i32_sse(&src[x..len], weight, &mut dst[x..len], ACCUMULATE);
        }
    }
}
