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
//! Per-axis source indices and fixed-point weights.
//!
//! Tables are built once per resizer for each axis and only read afterwards.

use crate::params::ResizeMethod;
use crate::resize_error::{ResizeError, try_vec};
use crate::support::{BICUBIC_RANGE, LINEAR_RANGE};

/// Nearest source pixel for every destination pixel
pub(crate) fn nearest_axis(
    src: usize,
    dst: usize,
    pytorch: bool,
) -> Result<Vec<usize>, ResizeError> {
    let mut index = try_vec![0usize; dst];
    let (src_u, dst_u) = (src as u64, dst as u64);
    for (d, dst) in index.iter_mut().enumerate() {
        let d = d as u64;
        let position = if pytorch {
            (d * src_u) / dst_u
        } else {
            ((2 * d + 1) * src_u) / (2 * dst_u)
        };
        *dst = (position as usize).min(src - 1);
    }
    Ok(index)
}

/// Mapping of destination coordinates into source space for two and four tap filters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LinearConvention {
    /// Pixel centers aligned, `(d + 0.5) * scale - 0.5`
    HalfPixel,
    /// First and last pixels aligned, `d * (src - 1) / (dst - 1)`
    AlignCorners,
    /// `d * scale`
    Asymmetric,
}

impl LinearConvention {
    pub(crate) fn for_method(method: ResizeMethod) -> LinearConvention {
        match method {
            ResizeMethod::BilinearCaffe => LinearConvention::AlignCorners,
            ResizeMethod::BilinearPytorch => LinearConvention::Asymmetric,
            _ => LinearConvention::HalfPixel,
        }
    }
}

/// First tap and fraction towards the second tap, both clamped to the source
fn linear_positions(
    src: usize,
    dst: usize,
    convention: LinearConvention,
) -> Result<Vec<(usize, f32)>, ResizeError> {
    let mut positions = try_vec![(0usize, 0f32); dst];
    if src == 1 {
        return Ok(positions);
    }
    let scale = match convention {
        LinearConvention::HalfPixel | LinearConvention::Asymmetric => src as f32 / dst as f32,
        LinearConvention::AlignCorners if dst > 1 => (src - 1) as f32 / (dst - 1) as f32,
        LinearConvention::AlignCorners => 0f32,
    };
    let last = src as isize - 2;
    for (d, dst) in positions.iter_mut().enumerate() {
        let position = match convention {
            LinearConvention::HalfPixel => (d as f32 + 0.5f32) * scale - 0.5f32,
            _ => d as f32 * scale,
        };
        let floor = position.floor();
        let mut fraction = position - floor;
        let mut index = floor as isize;
        if index < 0 {
            index = 0;
            fraction = 0f32;
        }
        if index > last {
            index = last;
            fraction = 1f32;
        }
        *dst = (index as usize, fraction);
    }
    Ok(positions)
}

/// Two tap table, `span` is the distance to the second tap in pixels
#[derive(Debug, Clone)]
pub(crate) struct LinearAxis<W> {
    pub(crate) index: Vec<usize>,
    pub(crate) weights: Vec<[W; 2]>,
    pub(crate) span: usize,
}

impl LinearAxis<i32> {
    /// Weights sum to [LINEAR_RANGE]
    pub(crate) fn fixed_point(
        src: usize,
        dst: usize,
        convention: LinearConvention,
    ) -> Result<Self, ResizeError> {
        let positions = linear_positions(src, dst, convention)?;
        let mut index = try_vec![0usize; dst];
        let mut weights = try_vec![[0i32; 2]; dst];
        for ((&(x, fraction), index), weight) in positions
            .iter()
            .zip(index.iter_mut())
            .zip(weights.iter_mut())
        {
            let w1 = (fraction * LINEAR_RANGE as f32 + 0.5f32) as i32;
            *index = x;
            *weight = [LINEAR_RANGE - w1, w1];
        }
        Ok(LinearAxis {
            index,
            weights,
            span: usize::from(src > 1),
        })
    }
}

impl LinearAxis<f32> {
    /// Weights are `(1 - frac, frac)`
    pub(crate) fn float(
        src: usize,
        dst: usize,
        convention: LinearConvention,
    ) -> Result<Self, ResizeError> {
        let positions = linear_positions(src, dst, convention)?;
        let mut index = try_vec![0usize; dst];
        let mut weights = try_vec![[0f32; 2]; dst];
        for ((&(x, fraction), index), weight) in positions
            .iter()
            .zip(index.iter_mut())
            .zip(weights.iter_mut())
        {
            *index = x;
            *weight = [1f32 - fraction, fraction];
        }
        Ok(LinearAxis {
            index,
            weights,
            span: usize::from(src > 1),
        })
    }
}

/// Four tap Catmull-Rom table
#[derive(Debug, Clone)]
pub(crate) struct CubicAxis {
    /// Second of the four taps before clamping
    pub(crate) index: Vec<usize>,
    /// Tap positions clamped into the source
    pub(crate) taps: Vec<[usize; 4]>,
    /// Weights summing to [BICUBIC_RANGE]
    pub(crate) weights: Vec<[i32; 4]>,
}

impl CubicAxis {
    pub(crate) fn new(src: usize, dst: usize) -> Result<Self, ResizeError> {
        let positions = linear_positions(src, dst, LinearConvention::HalfPixel)?;
        let mut index = try_vec![0usize; dst];
        let mut taps = try_vec![[0usize; 4]; dst];
        let mut weights = try_vec![[0i32; 4]; dst];
        let last = src - 1;
        for (d, &(x, fraction)) in positions.iter().enumerate() {
            index[d] = x;
            taps[d] = [
                x.saturating_sub(1),
                x,
                (x + 1).min(last),
                (x + 2).min(last),
            ];
            weights[d] = catmull_rom_weights(fraction);
        }
        Ok(CubicAxis {
            index,
            taps,
            weights,
        })
    }
}

fn catmull_rom_weights(d: f32) -> [i32; 4] {
    let d2 = d * d;
    let d3 = d2 * d;
    let range = BICUBIC_RANGE as f32;
    let quantize = |x: f32| (x * range).round() as i32;
    let w0 = quantize((-d + 2f32 * d2 - d3) * 0.5f32);
    let w2 = quantize((d + 4f32 * d2 - 3f32 * d3) * 0.5f32);
    let w3 = quantize((d3 - d2) * 0.5f32);
    [w0, BICUBIC_RANGE - w0 - w2 - w3, w2, w3]
}

/// Box filter table, every destination cell covers `src / dst` source pixels.
#[derive(Debug, Clone)]
pub(crate) struct AreaAxis {
    /// First source pixel of each cell, `dst + 1` entries ending with `src`
    pub(crate) index: Vec<usize>,
    offsets: Vec<usize>,
    weights: Vec<i32>,
}

impl AreaAxis {
    /// Coverage weights in units of `range`.
    ///
    /// Positions are measured in source pixels times `dst`, so cell `d` spans
    /// `[d * src, (d + 1) * src)` and source pixel `k` spans `[k * dst, (k + 1) * dst)`.
    /// The cumulative weight `round(range * x / src)` is exact at cell borders,
    /// hence every cell sums to `range`.
    pub(crate) fn new(src: usize, dst: usize, range: i32) -> Result<Self, ResizeError> {
        let (src_u, dst_u, range_u) = (src as u64, dst as u64, range as u64);
        let cumulative = |x: u64| ((2 * range_u * x + src_u) / (2 * src_u)) as i32;
        let mut index = try_vec![0usize; dst + 1];
        let mut offsets = try_vec![0usize; dst + 1];
        let mut weights = Vec::new();
        weights
            .try_reserve_exact(src + dst)
            .map_err(|_| ResizeError::OutOfMemory(src + dst))?;
        for d in 0..dst as u64 {
            let cell_start = d * src_u;
            let cell_end = cell_start + src_u;
            let first = cell_start / dst_u;
            let end = cell_end.div_ceil(dst_u);
            index[d as usize] = first as usize;
            for k in first..end {
                let lo = (k * dst_u).max(cell_start);
                let hi = ((k + 1) * dst_u).min(cell_end);
                weights.push(cumulative(hi) - cumulative(lo));
            }
            offsets[d as usize + 1] = weights.len();
        }
        index[dst] = src;
        Ok(AreaAxis {
            index,
            offsets,
            weights,
        })
    }

    /// First source pixel and the weights of consecutive source pixels of cell `d`
    #[inline(always)]
    pub(crate) fn cell(&self, d: usize) -> (usize, &[i32]) {
        (
            self.index[d],
            &self.weights[self.offsets[d]..self.offsets[d + 1]],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::AREA_RANGE;

    #[test]
    fn nearest_picks_cell_centers() {
        assert_eq!(nearest_axis(4, 2, false).unwrap(), vec![1, 3]);
        assert_eq!(nearest_axis(4, 2, true).unwrap(), vec![0, 2]);
        assert_eq!(nearest_axis(3, 7, false).unwrap(), vec![0, 0, 1, 1, 1, 2, 2]);
        assert_eq!(nearest_axis(1, 5, false).unwrap(), vec![0; 5]);
        let index = nearest_axis(1000, 333, false).unwrap();
        assert!(index.iter().all(|&x| x < 1000));
        assert!(index.windows(2).all(|x| x[0] <= x[1]));
    }

    #[test]
    fn linear_weights_sum_to_range() {
        for (src, dst) in [(10, 3), (3, 10), (7, 7), (1, 5), (5, 1), (640, 480)] {
            for convention in [
                LinearConvention::HalfPixel,
                LinearConvention::AlignCorners,
                LinearConvention::Asymmetric,
            ] {
                let axis = LinearAxis::fixed_point(src, dst, convention).unwrap();
                for (&index, weights) in axis.index.iter().zip(axis.weights.iter()) {
                    assert_eq!(weights[0] + weights[1], LINEAR_RANGE);
                    assert!(weights[0] >= 0 && weights[1] >= 0);
                    assert!(index + axis.span < src);
                }
                let axis = LinearAxis::float(src, dst, convention).unwrap();
                for weights in axis.weights.iter() {
                    assert!((weights[0] + weights[1] - 1f32).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn linear_edges_are_clamped() {
        let axis = LinearAxis::fixed_point(4, 8, LinearConvention::HalfPixel).unwrap();
        assert_eq!(axis.index[0], 0);
        assert_eq!(axis.weights[0], [LINEAR_RANGE, 0]);
        assert_eq!(axis.index[7], 2);
        assert_eq!(axis.weights[7], [0, LINEAR_RANGE]);
        let single = LinearAxis::fixed_point(1, 4, LinearConvention::HalfPixel).unwrap();
        assert_eq!(single.span, 0);
        assert!(single.weights.iter().all(|x| *x == [LINEAR_RANGE, 0]));
    }

    #[test]
    fn align_corners_hits_both_ends() {
        let axis = LinearAxis::float(5, 9, LinearConvention::AlignCorners).unwrap();
        assert_eq!(axis.index[0], 0);
        assert_eq!(axis.weights[0], [1f32, 0f32]);
        assert_eq!(axis.index[8], 3);
        assert_eq!(axis.weights[8], [0f32, 1f32]);
        assert_eq!(axis.index[2], 1);
        assert_eq!(axis.weights[2], [1f32, 0f32]);
    }

    #[test]
    fn cubic_weights_sum_to_range() {
        for (src, dst) in [(10, 3), (3, 10), (1, 4), (2, 9), (1920, 1080)] {
            let axis = CubicAxis::new(src, dst).unwrap();
            for (taps, weights) in axis.taps.iter().zip(axis.weights.iter()) {
                assert_eq!(weights.iter().sum::<i32>(), BICUBIC_RANGE);
                assert!(taps.iter().all(|&x| x < src));
            }
        }
        assert_eq!(catmull_rom_weights(0f32), [0, BICUBIC_RANGE, 0, 0]);
        assert_eq!(catmull_rom_weights(1f32), [0, 0, BICUBIC_RANGE, 0]);
        assert_eq!(catmull_rom_weights(0.5f32), [-4, 36, 36, -4]);
    }

    #[test]
    fn area_cells_sum_to_range() {
        for (src, dst) in [(10, 3), (7, 7), (5, 1), (1000, 999), (3, 2), (17, 5)] {
            let axis = AreaAxis::new(src, dst, AREA_RANGE).unwrap();
            assert_eq!(axis.index[dst], src);
            for d in 0..dst {
                let (first, weights) = axis.cell(d);
                assert_eq!(weights.iter().sum::<i32>(), AREA_RANGE);
                assert!(weights.iter().all(|&x| x >= 0));
                assert!(first + weights.len() <= src);
            }
        }
    }

    #[test]
    fn area_partial_rows() {
        let axis = AreaAxis::new(3, 2, 2048).unwrap();
        let (first, weights) = axis.cell(0);
        assert_eq!(first, 0);
        assert_eq!(weights, &[1365, 683]);
        let (first, weights) = axis.cell(1);
        assert_eq!(first, 1);
        assert_eq!(weights, &[683, 1365]);
    }
}
