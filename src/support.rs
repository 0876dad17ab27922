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
/// Fractional bits of a bilinear byte weight
pub(crate) const LINEAR_SHIFT: i32 = 4;
pub(crate) const LINEAR_RANGE: i32 = 1 << LINEAR_SHIFT;
/// Horizontal and vertical weights multiplied together
pub(crate) const BILINEAR_SHIFT: i32 = LINEAR_SHIFT * 2;
pub(crate) const BILINEAR_ROUND: i32 = 1 << (BILINEAR_SHIFT - 1);

pub(crate) const BICUBIC_RANGE: i32 = 64;
pub(crate) const BICUBIC_SHIFT: i32 = 12;
pub(crate) const BICUBIC_ROUND: i32 = 1 << (BICUBIC_SHIFT - 1);

pub(crate) const AREA_RANGE: i32 = 1 << 11;
pub(crate) const AREA_SHIFT: i32 = 22;

/// Row `row` of a strided image, `len` samples long
#[inline(always)]
pub(crate) fn image_row<T>(image: &[T], stride: usize, row: usize, len: usize) -> &[T] {
    &image[row * stride..row * stride + len]
}
