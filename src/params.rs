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
use crate::ImageSize;
use crate::resize_error::ResizeError;

/// Largest supported width or height, keeps exact integer table math inside `u64`
pub(crate) const MAX_DIMENSION: usize = 1 << 24;

/// Sample storage of a single channel
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelType {
    U8,
    U16,
    F32,
}

impl PixelType {
    /// Size of one channel sample in bytes
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            PixelType::U8 => 1,
            PixelType::U16 => 2,
            PixelType::F32 => 4,
        }
    }
}

/// Resampling algorithm
///
/// `BilinearCaffe` samples with aligned corners, `BilinearPytorch` and
/// `NearestPytorch` map destination pixel `d` to source position `d * src / dst`
/// without the half pixel offset. Both bilinear conventions use float weights
/// and are available for [PixelType::U16] and [PixelType::F32] only.
///
/// `AreaFast` always sums 2×2 source blocks before averaging, which is meant for
/// images previously upscaled by two. Odd edges are duplicated, so the result
/// is approximate for other sources. `Area` folds only where it stays exact.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ResizeMethod {
    Nearest,
    NearestPytorch,
    #[default]
    Bilinear,
    BilinearCaffe,
    BilinearPytorch,
    Bicubic,
    Area,
    AreaFast,
}

impl ResizeMethod {
    /// Checks if the method has a kernel for the given sample type
    pub const fn supports(self, pixel_type: PixelType) -> bool {
        match self {
            ResizeMethod::Nearest | ResizeMethod::NearestPytorch | ResizeMethod::Bilinear => true,
            ResizeMethod::BilinearCaffe | ResizeMethod::BilinearPytorch => {
                matches!(pixel_type, PixelType::U16 | PixelType::F32)
            }
            ResizeMethod::Bicubic | ResizeMethod::Area | ResizeMethod::AreaFast => {
                matches!(pixel_type, PixelType::U8)
            }
        }
    }
}

/// Immutable description of one resize operation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ResizeParams {
    pub src_size: ImageSize,
    pub dst_size: ImageSize,
    /// Interleaved channels, 1..=4
    pub channels: usize,
    pub pixel_type: PixelType,
    pub method: ResizeMethod,
}

impl ResizeParams {
    pub fn new(
        src_size: ImageSize,
        dst_size: ImageSize,
        channels: usize,
        pixel_type: PixelType,
        method: ResizeMethod,
    ) -> ResizeParams {
        ResizeParams {
            src_size,
            dst_size,
            channels,
            pixel_type,
            method,
        }
    }

    /// Bytes per pixel
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.channels * self.pixel_type.size()
    }

    /// Samples in one source row without padding
    #[inline]
    pub(crate) fn src_row_len(&self) -> usize {
        self.src_size.width * self.channels
    }

    /// Samples in one destination row without padding
    #[inline]
    pub(crate) fn dst_row_len(&self) -> usize {
        self.dst_size.width * self.channels
    }

    pub(crate) fn validate(&self) -> Result<(), ResizeError> {
        if self.src_size.has_zero() || self.dst_size.has_zero() {
            return Err(ResizeError::ZeroImageDimensions);
        }
        if !(1..=4).contains(&self.channels) {
            return Err(ResizeError::UnsupportedChannels(self.channels));
        }
        let fits = |size: ImageSize| {
            size.width < MAX_DIMENSION
                && size.height < MAX_DIMENSION
                && size
                    .area()
                    .and_then(|x| x.checked_mul(self.pixel_size()))
                    .is_some()
        };
        if !fits(self.src_size) {
            return Err(ResizeError::SourceImageIsTooLarge);
        }
        if !fits(self.dst_size) {
            return Err(ResizeError::DestinationImageIsTooLarge);
        }
        if !self.method.supports(self.pixel_type) {
            return Err(ResizeError::UnsupportedMethod {
                method: self.method,
                pixel_type: self.pixel_type,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(method: ResizeMethod, pixel_type: PixelType) -> ResizeParams {
        ResizeParams::new(
            ImageSize::new(8, 8),
            ImageSize::new(4, 4),
            3,
            pixel_type,
            method,
        )
    }

    #[test]
    fn pixel_size_accounts_for_sample_width() {
        assert_eq!(params(ResizeMethod::Nearest, PixelType::U8).pixel_size(), 3);
        assert_eq!(params(ResizeMethod::Nearest, PixelType::U16).pixel_size(), 6);
        assert_eq!(params(ResizeMethod::Nearest, PixelType::F32).pixel_size(), 12);
    }

    #[test]
    fn method_matrix() {
        assert!(params(ResizeMethod::Area, PixelType::U8).validate().is_ok());
        assert!(params(ResizeMethod::Bicubic, PixelType::U8).validate().is_ok());
        assert!(params(ResizeMethod::Bilinear, PixelType::F32).validate().is_ok());
        assert!(params(ResizeMethod::BilinearCaffe, PixelType::U16).validate().is_ok());
        assert_eq!(
            params(ResizeMethod::Area, PixelType::U16).validate(),
            Err(ResizeError::UnsupportedMethod {
                method: ResizeMethod::Area,
                pixel_type: PixelType::U16
            })
        );
        assert!(params(ResizeMethod::BilinearPytorch, PixelType::U8).validate().is_err());
        assert!(params(ResizeMethod::Bicubic, PixelType::F32).validate().is_err());
        assert!(params(ResizeMethod::AreaFast, PixelType::U8).validate().is_ok());
        assert!(params(ResizeMethod::AreaFast, PixelType::F32).validate().is_err());
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut p = params(ResizeMethod::Nearest, PixelType::U8);
        p.dst_size = ImageSize::new(0, 3);
        assert_eq!(p.validate(), Err(ResizeError::ZeroImageDimensions));
        let mut p = params(ResizeMethod::Nearest, PixelType::U8);
        p.channels = 5;
        assert_eq!(p.validate(), Err(ResizeError::UnsupportedChannels(5)));
        let mut p = params(ResizeMethod::Nearest, PixelType::U8);
        p.src_size = ImageSize::new(MAX_DIMENSION, 1);
        assert_eq!(p.validate(), Err(ResizeError::SourceImageIsTooLarge));
    }
}
