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
/// `N` scratch rows carved out of one allocation
pub(crate) struct RowSlots<'a, T, const N: usize> {
    rows: [&'a mut [T]; N],
}

impl<'a, T, const N: usize> RowSlots<'a, T, N> {
    /// Splits `buffer` into `N` rows of `row_len`, rows past the end are empty.
    pub(crate) fn new(buffer: &'a mut [T], row_len: usize) -> Self {
        let mut chunks = buffer.chunks_exact_mut(row_len.max(1));
        let rows = std::array::from_fn(|_| chunks.next().unwrap_or_default());
        RowSlots { rows }
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, slot: usize) -> &mut [T] {
        &mut *self.rows[slot]
    }

    #[inline(always)]
    pub(crate) fn rows(&self) -> [&[T]; N] {
        std::array::from_fn(|i| &*self.rows[i])
    }

    /// Exchanges two rows without touching their content
    #[inline(always)]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }
}

/// Slot of the 4 row ring holding source row `row`, rows start at `-1`
#[inline(always)]
pub(crate) const fn cubic_slot(row: isize) -> usize {
    ((row + 1) & 3) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_exchanges_rows() {
        let mut buffer = vec![0i32; 6];
        let mut slots = RowSlots::<i32, 2>::new(&mut buffer, 3);
        slots.get_mut(0).fill(1);
        slots.get_mut(1).fill(2);
        slots.swap(0, 1);
        let [a, b] = slots.rows();
        assert_eq!(a, &[2, 2, 2]);
        assert_eq!(b, &[1, 1, 1]);
    }

    #[test]
    fn cubic_ring() {
        assert_eq!(cubic_slot(-1), 0);
        assert_eq!(cubic_slot(2), 3);
        assert_eq!(cubic_slot(3), 0);
        assert_eq!(cubic_slot(10), 3);
    }
}
