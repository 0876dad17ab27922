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
#![deny(deprecated)]
#![allow(clippy::too_many_arguments)]
//! Two-dimensional resampling of interleaved images.
//!
//! Nearest, bilinear, bicubic and area methods over `u8`, `u16` and `f32`
//! samples with 1 to 4 channels. Every method has a scalar kernel and, on x86,
//! SSE4.1 and AVX2 kernels producing bit-identical output.
mod area_u8;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
mod avx2;
mod axis_table;
mod bicubic_u8;
mod bilinear_float;
mod bilinear_u8;
mod image_size;
mod mixed_storage;
mod nearest_sampler;
mod params;
mod resize_error;
mod resize_sample;
mod resize_tier;
mod resizer;
mod row_slots;
mod shuffle_block;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;
mod support;
mod threading_policy;

pub use image_size::ImageSize;
pub use params::{PixelType, ResizeMethod, ResizeParams};
pub use resize_error::{ResizeBufferMismatch, ResizeError};
pub use resize_sample::ResizeSample;
pub use resize_tier::ResizeTier;
pub use resizer::{Resizer, ResizerOptions};
pub use threading_policy::ThreadingPolicy;
