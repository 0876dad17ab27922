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
use log::debug;

/// Instruction set level used by resampling kernels
///
/// Tiers are ordered from the narrowest to the widest, every wider tier
/// processes full registers itself and hands the remaining tail of a row to
/// the next narrower one. Output never depends on the tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResizeTier {
    Scalar,
    /// x86 SSE4.1, 16-byte registers
    Sse41,
    /// x86 AVX2, 32-byte registers
    Avx2,
}

impl ResizeTier {
    /// Register width in bytes
    pub const fn register_bytes(self) -> usize {
        match self {
            ResizeTier::Scalar => 1,
            ResizeTier::Sse41 => 16,
            ResizeTier::Avx2 => 32,
        }
    }

    /// Next tier towards [ResizeTier::Scalar]
    pub const fn narrower(self) -> Option<ResizeTier> {
        match self {
            ResizeTier::Scalar => None,
            ResizeTier::Sse41 => Some(ResizeTier::Scalar),
            ResizeTier::Avx2 => Some(ResizeTier::Sse41),
        }
    }

    /// Checks if the tier is compiled in and supported by the running CPU
    pub fn is_available(self) -> bool {
        match self {
            ResizeTier::Scalar => true,
            ResizeTier::Sse41 => {
                #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
                {
                    std::arch::is_x86_feature_detected!("sse4.1")
                }
                #[cfg(not(all(
                    any(target_arch = "x86_64", target_arch = "x86"),
                    feature = "sse"
                )))]
                {
                    false
                }
            }
            ResizeTier::Avx2 => {
                #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "avx"))]
                {
                    std::arch::is_x86_feature_detected!("avx2")
                        && std::arch::is_x86_feature_detected!("sse4.1")
                }
                #[cfg(not(all(
                    any(target_arch = "x86_64", target_arch = "x86"),
                    feature = "avx"
                )))]
                {
                    false
                }
            }
        }
    }

    /// Widest tier usable on this machine
    pub fn detect() -> ResizeTier {
        [ResizeTier::Avx2, ResizeTier::Sse41]
            .into_iter()
            .find(|x| x.is_available())
            .unwrap_or(ResizeTier::Scalar)
    }

    /// Every usable tier, narrowest first
    pub fn available() -> Vec<ResizeTier> {
        [ResizeTier::Scalar, ResizeTier::Sse41, ResizeTier::Avx2]
            .into_iter()
            .filter(|x| x.is_available())
            .collect()
    }

    /// Walks down from `requested` until a tier is available and the kernel accepts it.
    pub(crate) fn select(
        requested: ResizeTier,
        kernel: &str,
        accepts: impl Fn(ResizeTier) -> bool,
    ) -> ResizeTier {
        let mut tier = requested;
        loop {
            if tier == ResizeTier::Scalar {
                debug!("{kernel}: using {tier:?}");
                return tier;
            }
            if tier.is_available() && accepts(tier) {
                debug!("{kernel}: using {tier:?}");
                return tier;
            }
            debug!("{kernel}: {tier:?} rejected, falling through");
            tier = tier.narrower().unwrap_or(ResizeTier::Scalar);
        }
    }
}
