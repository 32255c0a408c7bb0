//! ## Register storage
//! One byte per register, `M = 2^P` registers, all used.
//!
//! Alongside the ranks the storage keeps two derived values which are updated on
//! every register increase:
//! - number of registers still set to 0 (needed by linear counting).
//! - harmonic sum `Σ 2^-rank` of all registers (needed by the raw estimate).
//!
//! Ranks never exceed 31, so every term `2^-rank` and every partial sum of at most
//! `2^16` such terms is exactly representable in `f64` and the running sum never
//! drifts from a full recomputation.

use std::mem::size_of_val;

#[derive(Clone, PartialEq)]
pub(crate) struct Registers {
    /// Register ranks
    ranks: Box<[u8]>,
    /// Number of registers set to 0
    zeros: usize,
    /// Harmonic sum of registers
    sum: f64,
}

impl Registers {
    /// Create `m` zeroed registers
    #[inline]
    pub(crate) fn new(m: usize) -> Self {
        Self {
            ranks: vec![0u8; m].into_boxed_slice(),
            zeros: m,
            sum: m as f64,
        }
    }

    /// Create registers from existing ranks, recomputing derived values
    pub(crate) fn from_ranks(ranks: Box<[u8]>) -> Self {
        let zeros = ranks.iter().filter(|&&r| r == 0).count();
        let sum = ranks.iter().map(|&r| inverse_pow2(r)).sum();
        Self { ranks, zeros, sum }
    }

    /// Raise register `idx` to `new_rank` unless it already holds a larger rank
    #[inline]
    pub(crate) fn update(&mut self, idx: usize, new_rank: u8) {
        let old_rank = self.ranks[idx];
        if new_rank > old_rank {
            self.ranks[idx] = new_rank;
            self.zeros -= usize::from(old_rank == 0);
            self.sum += inverse_pow2(new_rank) - inverse_pow2(old_rank);
        }
    }

    /// Raise every register to the matching register of `rhs`
    #[inline]
    pub(crate) fn merge(&mut self, rhs: &Registers) {
        for (idx, &rhs_rank) in rhs.ranks.iter().enumerate() {
            self.update(idx, rhs_rank);
        }
    }

    /// Reset every register to 0
    pub(crate) fn clear(&mut self) {
        self.ranks.fill(0);
        self.zeros = self.ranks.len();
        self.sum = self.ranks.len() as f64;
    }

    #[inline]
    pub(crate) fn ranks(&self) -> &[u8] {
        &self.ranks
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub(crate) fn zeros(&self) -> usize {
        self.zeros
    }

    #[inline]
    pub(crate) fn harmonic_sum(&self) -> f64 {
        self.sum
    }

    /// Heap memory occupied by register ranks
    #[inline]
    pub(crate) fn heap_size(&self) -> usize {
        size_of_val(&*self.ranks)
    }
}

/// Return `2^-rank`
#[inline]
fn inverse_pow2(rank: u8) -> f64 {
    1.0 / ((1u64 << rank) as f64)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_derived_values_exact() {
        let mut regs = Registers::new(16);
        regs.update(3, 5);
        regs.update(3, 2);
        regs.update(7, 31);
        regs.update(15, 1);

        assert_eq!(regs.ranks()[3], 5);
        assert_eq!(regs.zeros(), 13);

        let recomputed = Registers::from_ranks(regs.ranks().into());
        assert_eq!(regs.zeros(), recomputed.zeros());
        assert_eq!(regs.harmonic_sum(), recomputed.harmonic_sum());
        assert!(regs == recomputed);
    }

    #[test]
    fn test_merge_takes_register_wise_max() {
        let mut lhs = Registers::from_ranks(vec![0, 3, 1, 7].into_boxed_slice());
        let rhs = Registers::from_ranks(vec![2, 1, 0, 9].into_boxed_slice());
        lhs.merge(&rhs);

        assert_eq!(lhs.ranks(), &[2, 3, 1, 9]);
        assert_eq!(lhs.zeros(), 0);
        assert!(lhs == Registers::from_ranks(vec![2, 3, 1, 9].into_boxed_slice()));
    }

    #[test]
    fn test_clear() {
        let mut regs = Registers::from_ranks(vec![4, 0, 2, 1].into_boxed_slice());
        regs.clear();
        assert!(regs == Registers::new(4));
        assert_eq!(regs.heap_size(), 4);
    }
}
