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

use crate::bilinear_float::{LinearRow, blend_rows};
use crate::sse::utils::{_mm_load_u16x4_ps, _mm_round_pack_ps_u16};

#[inline(always)]
unsafe fn lerp_ps(a: __m128, b: __m128, w0: __m128, w1: __m128) -> __m128 {
    unsafe { _mm_add_ps(_mm_mul_ps(a, w0), _mm_mul_ps(b, w1)) }
}

pub(crate) fn interpolate_row_rgba_f32_sse(src: &[f32], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        interpolate_row_rgba_f32_sse_impl(src, taps, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn interpolate_row_rgba_f32_sse_impl(src: &[f32], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        for (i, dst) in dst.chunks_exact_mut(4).enumerate() {
            let e = i * 4;
            let x = taps.index[e];
            let a = _mm_loadu_ps(src[x..x + 4].as_ptr());
            let b = _mm_loadu_ps(src[x + taps.span..x + taps.span + 4].as_ptr());
            let w0 = _mm_loadu_ps(taps.w0[e..e + 4].as_ptr());
            let w1 = _mm_loadu_ps(taps.w1[e..e + 4].as_ptr());
            _mm_storeu_ps(dst.as_mut_ptr(), lerp_ps(a, b, w0, w1));
        }
    }
}

pub(crate) fn interpolate_row_rgba_u16_sse(src: &[u16], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        interpolate_row_rgba_u16_sse_impl(src, taps, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn interpolate_row_rgba_u16_sse_impl(src: &[u16], taps: &LinearRow<'_>, dst: &mut [f32]) {
    unsafe {
        for (i, dst) in dst.chunks_exact_mut(4).enumerate() {
            let e = i * 4;
            let x = taps.index[e];
            let a = _mm_load_u16x4_ps(src[x..x + 4].as_ptr());
            let b = _mm_load_u16x4_ps(src[x + taps.span..x + taps.span + 4].as_ptr());
            let w0 = _mm_loadu_ps(taps.w0[e..e + 4].as_ptr());
            let w1 = _mm_loadu_ps(taps.w1[e..e + 4].as_ptr());
            _mm_storeu_ps(dst.as_mut_ptr(), lerp_ps(a, b, w0, w1));
        }
    }
}

pub(crate) fn blend_rows_f32_sse(row0: &[f32], row1: &[f32], weights: [f32; 2], dst: &mut [f32]) {
    unsafe {
        blend_rows_f32_sse_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn blend_rows_f32_sse_impl(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm_set1_ps(weights[0]);
        let v1 = _mm_set1_ps(weights[1]);
        let mut x = 0usize;

        while x + 4 <= len {
            let a = _mm_loadu_ps(row0.get_unchecked(x..).as_ptr());
            let b = _mm_loadu_ps(row1.get_unchecked(x..).as_ptr());
            _mm_storeu_ps(dst.get_unchecked_mut(x..).as_mut_ptr(), lerp_ps(a, b, v0, v1));
            x += 4;
        }

        if x < len {
            blend_rows(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}

pub(crate) fn blend_rows_u16_sse(row0: &[f32], row1: &[f32], weights: [f32; 2], dst: &mut [u16]) {
    unsafe {
        blend_rows_u16_sse_impl(row0, row1, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn blend_rows_u16_sse_impl(
    row0: &[f32],
    row1: &[f32],
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        let len = dst.len();
        let v0 = _mm_set1_ps(weights[0]);
        let v1 = _mm_set1_ps(weights[1]);
        let mut x = 0usize;

        while x + 8 <= len {
            let a0 = _mm_loadu_ps(row0.get_unchecked(x..).as_ptr());
            let b0 = _mm_loadu_ps(row1.get_unchecked(x..).as_ptr());
            let a1 = _mm_loadu_ps(row0.get_unchecked(x + 4..).as_ptr());
            let b1 = _mm_loadu_ps(row1.get_unchecked(x + 4..).as_ptr());
            let packed = _mm_round_pack_ps_u16(lerp_ps(a0, b0, v0, v1), lerp_ps(a1, b1, v0, v1));
            _mm_storeu_si128(
                dst.get_unchecked_mut(x..).as_mut_ptr() as *mut __m128i,
                packed,
            );
            x += 8;
        }

        if x < len {
            blend_rows(&row0[x..len], &row1[x..len], weights, &mut dst[x..]);
        }
    }
}

pub(crate) fn sparse_row_rgba_f32_sse(
    src0: &[f32],
    src1: &[f32],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        sparse_row_rgba_f32_sse_impl(src0, src1, taps, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn sparse_row_rgba_f32_sse_impl(
    src0: &[f32],
    src1: &[f32],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [f32],
) {
    unsafe {
        let v0 = _mm_set1_ps(weights[0]);
        let v1 = _mm_set1_ps(weights[1]);
        let s = taps.span;
        for (i, dst) in dst.chunks_exact_mut(4).enumerate() {
            let e = i * 4;
            let x = taps.index[e];
            let w0 = _mm_loadu_ps(taps.w0[e..e + 4].as_ptr());
            let w1 = _mm_loadu_ps(taps.w1[e..e + 4].as_ptr());
            let r0 = lerp_ps(
                _mm_loadu_ps(src0[x..x + 4].as_ptr()),
                _mm_loadu_ps(src0[x + s..x + s + 4].as_ptr()),
                w0,
                w1,
            );
            let r1 = lerp_ps(
                _mm_loadu_ps(src1[x..x + 4].as_ptr()),
                _mm_loadu_ps(src1[x + s..x + s + 4].as_ptr()),
                w0,
                w1,
            );
            _mm_storeu_ps(dst.as_mut_ptr(), lerp_ps(r0, r1, v0, v1));
        }
    }
}

pub(crate) fn sparse_row_rgba_u16_sse(
    src0: &[u16],
    src1: &[u16],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        sparse_row_rgba_u16_sse_impl(src0, src1, taps, weights, dst);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn sparse_row_rgba_u16_sse_impl(
    src0: &[u16],
    src1: &[u16],
    taps: &LinearRow<'_>,
    weights: [f32; 2],
    dst: &mut [u16],
) {
    unsafe {
        let v0 = _mm_set1_ps(weights[0]);
        let v1 = _mm_set1_ps(weights[1]);
        let s = taps.span;
        for (i, dst) in dst.chunks_exact_mut(4).enumerate() {
            let e = i * 4;
            let x = taps.index[e];
            let w0 = _mm_loadu_ps(taps.w0[e..e + 4].as_ptr());
            let w1 = _mm_loadu_ps(taps.w1[e..e + 4].as_ptr());
            let r0 = lerp_ps(
                _mm_load_u16x4_ps(src0[x..x + 4].as_ptr()),
                _mm_load_u16x4_ps(src0[x + s..x + s + 4].as_ptr()),
                w0,
                w1,
            );
            let r1 = lerp_ps(
                _mm_load_u16x4_ps(src1[x..x + 4].as_ptr()),
                _mm_load_u16x4_ps(src1[x + s..x + s + 4].as_ptr()),
                w0,
                w1,
            );
            let v = lerp_ps(r0, r1, v0, v1);
            let packed = _mm_round_pack_ps_u16(v, v);
            _mm_storel_epi64(dst.as_mut_ptr() as *mut __m128i, packed);
        }
    }
}
