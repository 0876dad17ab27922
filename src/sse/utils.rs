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

/// Stores the first `dst.len()` bytes of `v`, at most 16
#[inline(always)]
pub(crate) unsafe fn _mm_store_partial_si128(dst: &mut [u8], v: __m128i) {
    unsafe {
        let mut tmp = [0u8; 16];
        _mm_storeu_si128(tmp.as_mut_ptr() as *mut __m128i, v);
        let count = dst.len().min(16);
        dst[..count].copy_from_slice(&tmp[..count]);
    }
}

/// Loads 4 bytes into the low lane
#[inline(always)]
pub(crate) unsafe fn _mm_load_u32_si128(ptr: *const u8) -> __m128i {
    unsafe { _mm_cvtsi32_si128((ptr as *const i32).read_unaligned()) }
}

/// Stores the low 4 bytes
#[inline(always)]
pub(crate) unsafe fn _mm_store_u32_si128(dst: &mut [u8], v: __m128i) {
    unsafe {
        dst[..4].copy_from_slice(&_mm_cvtsi128_si32(v).to_ne_bytes());
    }
}

/// Narrows 16 `i32` lanes into 16 bytes with signed then unsigned saturation
#[inline(always)]
pub(crate) unsafe fn _mm_pack_i32x16_u8(
    a: __m128i,
    b: __m128i,
    c: __m128i,
    d: __m128i,
) -> __m128i {
    unsafe { _mm_packus_epi16(_mm_packs_epi32(a, b), _mm_packs_epi32(c, d)) }
}

/// Loads 4 `u16` and widens them to `f32`
#[inline(always)]
pub(crate) unsafe fn _mm_load_u16x4_ps(ptr: *const u16) -> __m128 {
    unsafe { _mm_cvtepi32_ps(_mm_cvtepu16_epi32(_mm_loadl_epi64(ptr as *const __m128i))) }
}

/// Adds one half, truncates and packs 8 floats into saturated `u16`
#[inline(always)]
pub(crate) unsafe fn _mm_round_pack_ps_u16(a: __m128, b: __m128) -> __m128i {
    unsafe {
        let half = _mm_set1_ps(0.5f32);
        _mm_packus_epi32(
            _mm_cvttps_epi32(_mm_add_ps(a, half)),
            _mm_cvttps_epi32(_mm_add_ps(b, half)),
        )
    }
}
