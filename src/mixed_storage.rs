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
use num_traits::AsPrimitive;

/// Sample type of the float-weight bilinear pipeline
pub(crate) trait MixedStorage: Copy + Default + Send + Sync + 'static + AsPrimitive<f32> {
    /// Converts an interpolated accumulator back into a sample
    fn from_mixed(value: f32) -> Self;
}

impl MixedStorage for f32 {
    #[inline(always)]
    fn from_mixed(value: f32) -> Self {
        value
    }
}

impl MixedStorage for u16 {
    /// Adds one half and truncates, saturating into `0..=65535`.
    #[inline(always)]
    fn from_mixed(value: f32) -> Self {
        (value + 0.5f32) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_rounds_half_up_and_saturates() {
        assert_eq!(u16::from_mixed(1.49), 1);
        assert_eq!(u16::from_mixed(1.5), 2);
        assert_eq!(u16::from_mixed(-3.0), 0);
        assert_eq!(u16::from_mixed(70000.0), u16::MAX);
    }

    #[test]
    fn f32_is_passthrough() {
        assert_eq!(f32::from_mixed(0.125), 0.125);
    }
}
