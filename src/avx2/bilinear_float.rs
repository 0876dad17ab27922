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

use crate::avx2::utils::{_mm256_combine_ps, _mm256_round_pack_ps_u16};
use crate::bilinear_float::LinearRow;
use crate::sse::{
    _mm_load_u16x4_ps, blend_rows_f32_sse, blend_rows_u16_sse, interpolate_row_rgba_f32_sse,
    interpolate_row_rgba_u16_sse, sparse_row_rgba_f32_sse, sparse_row_rgba_u16_sse,
};

#[inline(always)]
unsafe fn lerp_ps(a: __m256, b: __m256, w0: __m256, w1: __m256) -> __m256 {
    unsafe { _mm256_add_ps(_mm256_mul_ps(a, w0), _mm256_mul_ps(b, w1)) }
}

/// Two RGBA `f32` pixels starting at element offsets `x0` and `x1`
#[inline(always)]
unsafe fn load_pair_f32(src: &[f32], x0: usize, x1: usize) -> __m256 {
    unsafe {
        _mm256_combine_ps(
            _mm_loadu_ps(src[x0..x0 + 4].as_ptr()),
            _mm_loadu_ps(src[x1..x1 + 4].as_ptr()),
        )
    }
}

/// Two RGBA `u16` pixels widened to `f32`
#[inline(always)]
unsafe fn load_pair_u16(src: &[u16], x0: usize, x1: usize) -> __m256 {
    unsafe {
        _mm256_combine_ps(
            _mm_load_u16x4_ps(src[x0..x0 + 4].as_ptr()),
            _mm_load_u16x4_ps(src[x1..x1 + 4].as_ptr()),
        )
    }
}

pub(crate) fn interpolate_row_rgba_f32_avx2(src: &[f32], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        interpolate_row_rgba_f32_avx2_impl(src, taps, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn interpolate_row_rgba_f32_avx2_impl(
    src: &[f32],
    taps: &LinearRow<'_>,
    dst: &mut [f32],
) {
    unsafe {
        let len = dst.len();
        let s = taps.span;
        let mut e = 0usize;
        while e + 8 <= len {
            let (x0, x1) = (taps.index[e], taps.index[e + 4]);
            let a = load_pair_f32(src, x0, x1);
            let b = load_pair_f32(src, x0 + s, x1 + s);
            let w0 = _mm256_loadu_ps(taps.w0[e..e + 8].as_ptr());
            let w1 = _mm256_loadu_ps(taps.w1[e..e + 8].as_ptr());
            _mm256_storeu_ps(dst[e..e + 8].as_mut_ptr(), lerp_ps(a, b, w0, w1));
            e += 8;
        }
        if e < len {
            interpolate_row_rgba_f32_sse(src, &taps.tail(e), &mut dst[e..]);
        }
    }
}

pub(crate) fn interpolate_row_rgba_u16_avx2(src: &[u16], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        interpolate_row_rgba_u16_avx2_impl(src, taps, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn interpolate_row_rgba_u16_avx2_impl(
    src: &[u16],
    taps: &LinearRow<'_>,
    dst: &mut [f32],
) {
    unsafe {
        let len = dst.len();
        let s = taps.span;
        let mut e = 0usize;
        while e + 8 <= len {
            let (x0, x1) = (taps.index[e], taps.index[e + 4]);
            let a = load_pair_u16(src, x0, x1);
            let b = load_pair_u16(src, x0 + s, x1 + s);
            let w0 = _mm256_loadu_ps(taps.w0[e..e + 8].as_ptr());
            let w1 = _mm256_loadu_ps(taps.w1[e..e + 8].as_ptr());
            _mm256_storeu_ps(dst[e..e + 8].as_mut_ptr(), lerp_ps(a, b, w0, w1));
            e += 8;
        }
        if e < len {
            interpolate_row_rgba_u16_sse(src, &taps.tail(e), &mut dst[e..]);
        }
    }
}

pub(crate) fn blend_rows_f32_avx2(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        blend_rows_f32_avx2_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn blend_rows_f32_avx2_impl(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm256_set1_ps(weights[0]);
        let v1 = _mm256_set1_ps(weights[1]);
        let mut x = 0usize;

        while x + 8 <= len {
            let a = _mm256_loadu_ps(row0.get_unchecked(x..).as_ptr());
            let b = _mm256_loadu_ps(row1.get_unchecked(x..).as_ptr());
            _mm256_storeu_ps(dst.get_unchecked_mut(x..).as_mut_ptr(), lerp_ps(a, b, v0, v1));
            x += 8;
        }

        if x < len {
            blend_rows_f32_sse(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}

pub(crate) fn blend_rows_u16_avx2(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        blend_rows_u16_avx2_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn blend_rows_u16_avx2_impl(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm256_set1_ps(weights[0]);
        let v1 = _mm256_set1_ps(weights[1]);
        let mut x = 0usize;

        while x + 16 <= len {
            let a0 = _mm256_loadu_ps(row0.get_unchecked(x..).as_ptr());
            let b0 = _mm256_loadu_ps(row1.get_unchecked(x..).as_ptr());
            let a1 = _mm256_loadu_ps(row0.get_unchecked(x + 8..).as_ptr());
            let b1 = _mm256_loadu_ps(row1.get_unchecked(x + 8..).as_ptr());
            let packed =
                _mm256_round_pack_ps_u16(lerp_ps(a0, b0, v0, v1), lerp_ps(a1, b1, v0, v1));
            _mm256_storeu_si256(
                dst.get_unchecked_mut(x..).as_mut_ptr() as *mut __m256i,
                packed,
            );
            x += 16;
        }

        if x < len {
            blend_rows_u16_sse(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}

pub(crate) fn sparse_row_rgba_f32_avx2(
    src0: &[f32],
    src1: &[f32],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        sparse_row_rgba_f32_avx2_impl(src0, src1, taps, weights, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn sparse_row_rgba_f32_avx2_impl(
    src0: &[f32],
    src1: &[f32],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm256_set1_ps(weights[0]);
        let v1 = _mm256_set1_ps(weights[1]);
        let s = taps.span;
        let mut e = 0usize;
        while e + 8 <= len {
            let (x0, x1) = (taps.index[e], taps.index[e + 4]);
            let w0 = _mm256_loadu_ps(taps.w0[e..e + 8].as_ptr());
            let w1 = _mm256_loadu_ps(taps.w1[e..e + 8].as_ptr());
            let r0 = lerp_ps(
                load_pair_f32(src0, x0, x1),
                load_pair_f32(src0, x0 + s, x1 + s),
                w0,
                w1,
            );
            let r1 = lerp_ps(
                load_pair_f32(src1, x0, x1),
                load_pair_f32(src1, x0 + s, x1 + s),
                w0,
                w1,
            );
            _mm256_storeu_ps(dst[e..e + 8].as_mut_ptr(), lerp_ps(r0, r1, v0, v1));
            e += 8;
        }
        if e < len {
            sparse_row_rgba_f32_sse(src0, src1, &taps.tail(e), weights, &mut dst[e..]);
        }
    }
}

pub(crate) fn sparse_row_rgba_u16_avx2(
    src0: &[u16],
    src1: &[u16],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        sparse_row_rgba_u16_avx2_impl(src0, src1, taps, weights, dst);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn sparse_row_rgba_u16_avx2_impl(
    src0: &[u16],
    src1: &[u16],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm256_set1_ps(weights[0]);
        let v1 = _mm256_set1_ps(weights[1]);
        let s = taps.span;
        let mut e = 0usize;
        while e + 16 <= len {
            let mut halves = [_mm256_setzero_ps(); 2];
            for (h, half) in halves.iter_mut().enumerate() {
                let e = e + h * 8;
                let (x0, x1) = (taps.index[e], taps.index[e + 4]);
                let w0 = _mm256_loadu_ps(taps.w0[e..e + 8].as_ptr());
                let w1 = _mm256_loadu_ps(taps.w1[e..e + 8].as_ptr());
                let r0 = lerp_ps(
                    load_pair_u16(src0, x0, x1),
                    load_pair_u16(src0, x0 + s, x1 + s),
                    w0,
                    w1,
                );
                let r1 = lerp_ps(
                    load_pair_u16(src1, x0, x1),
                    load_pair_u16(src1, x0 + s, x1 + s),
                    w0,
                    w1,
                );
                *half = lerp_ps(r0, r1, v0, v1);
            }
            let packed = _mm256_round_pack_ps_u16(halves[0], halves[1]);
            _mm256_storeu_si256(dst[e..e + 16].as_mut_ptr() as *mut __m256i, packed);
            e += 16;
        }
        if e < len {
            sparse_row_rgba_u16_sse(src0, src1, &taps.tail(e), weights, &mut dst[e..]);
        }
    }
}
