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
use crate::params::PixelType;
use std::any::TypeId;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for f32 {}
}

/// Channel sample accepted by [crate::Resizer::run]
pub trait ResizeSample: Copy + Default + Send + Sync + 'static + private::Sealed {
    const PIXEL_TYPE: PixelType;
}

impl ResizeSample for u8 {
    const PIXEL_TYPE: PixelType = PixelType::U8;
}

impl ResizeSample for u16 {
    const PIXEL_TYPE: PixelType = PixelType::U16;
}

impl ResizeSample for f32 {
    const PIXEL_TYPE: PixelType = PixelType::F32;
}

/// Views `slice` as `[U]` when `T` and `U` are the same type
#[inline]
pub(crate) fn reinterpret<T: ResizeSample, U: ResizeSample>(slice: &[T]) -> Option<&[U]> {
    if TypeId::of::<T>() == TypeId::of::<U>() {
        // Same type, only the static type changes.
        Some(unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const U, slice.len()) })
    } else {
        None
    }
}

/// Mutable counterpart of [reinterpret]
#[inline]
pub(crate) fn reinterpret_mut<T: ResizeSample, U: ResizeSample>(
    slice: &mut [T],
) -> Option<&mut [U]> {
    if TypeId::of::<T>() == TypeId::of::<U>() {
        Some(unsafe { std::slice::from_raw_parts_mut(slice.as_mut_ptr() as *mut U, slice.len()) })
    } else {
        None
    }
}

/// Raw bytes of a sample slice, samples have no padding or invalid bit patterns
#[inline]
pub(crate) fn as_bytes<T: ResizeSample>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice))
    }
}

/// Mutable raw bytes, every byte pattern is a valid `u8`, `u16` or `f32`
#[inline]
pub(crate) fn as_bytes_mut<T: ResizeSample>(slice: &mut [T]) -> &mut [u8] {
    unsafe {
        std::slice::from_raw_parts_mut(slice.as_mut_ptr() as *mut u8, std::mem::size_of_val(slice))
    }
}
