//! HyperLogLog estimator allows to estimate number of distinct elements
//! in the stream or dataset and is defined with runtime `precision` and `seed`:
//! - `precision`: in [2..16] range, defines number of hash bits used
//!   for register indices, giving `M = 2^precision` registers.
//! - `seed`: Murmur3 seed, defaults to [`DEFAULT_SEED`].
//!
//! # Data-structure design rationale
//!
//! ## Memory footprint
//! One byte per register, `2^precision` bytes in total, allocated once at construction.
//! Inserting elements never allocates.
//!
//! ## Low latency
//! Number of zero registers and registers' harmonic sum are stored and updated
//! as registers grow, so `cardinality` is a constant time operation.
//!
//! ## Accuracy
//! Expected relative error is `1.04 / sqrt(M)`:
//! - precision = 10: 1.04 / sqrt(2^10) = 3.25%
//! - precision = 12: 1.04 / sqrt(2^12) = 1.62%
//! - precision = 14: 1.04 / sqrt(2^14) = 0.81%
//! - precision = 16: 1.04 / sqrt(2^16) = 0.41%
//!
//! Estimation follows the original HyperLogLog paper with linear counting for
//! small cardinalities and the 32-bit hash space correction for large ones.
//!
//! Original HyperLogLog paper:
//! http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf
//!
//! # Concurrency
//! All operations are synchronous and lock free. Inserting needs `&mut self`, so
//! concurrent ingestion is done either by sharding (one estimator per worker, merged
//! afterwards) or by wrapping the estimator into a mutex.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use tracing::{debug, warn};

use crate::error::{HllError, Result};
use crate::hash::{decode_hash, murmur3_x86_32};
use crate::registers::Registers;

/// Default Murmur3 seed
pub const DEFAULT_SEED: u32 = 314;
/// Precision used by `HyperLogLog::default()`
pub const DEFAULT_PRECISION: u8 = 12;
/// Smallest supported precision (4 registers)
pub const MIN_PRECISION: u8 = 2;
/// Largest supported precision (65536 registers)
pub const MAX_PRECISION: u8 = 16;

/// Size of 32-bit hash space
const TWO_32: f64 = 4_294_967_296.0;

#[derive(Clone, PartialEq)]
pub struct HyperLogLog {
    /// Number of hash bits used for register index
    precision: u8,
    /// Murmur3 seed
    seed: u32,
    /// Register ranks with zero count and harmonic sum
    registers: Registers,
}

impl HyperLogLog {
    /// Creates new instance of `HyperLogLog` with default seed
    #[inline]
    pub fn new(precision: u8) -> Result<Self> {
        Self::with_seed(precision, DEFAULT_SEED)
    }

    /// Creates new instance of `HyperLogLog` with given seed
    pub fn with_seed(precision: u8, seed: u32) -> Result<Self> {
        validate_precision(precision)?;
        debug!(precision, seed, "created hyperloglog estimator");
        Ok(Self {
            precision,
            seed,
            registers: Registers::new(1 << precision),
        })
    }

    /// Build estimator from decoded parts. Caller guarantees valid precision,
    /// matching register count and ranks within range.
    pub(crate) fn from_parts(precision: u8, seed: u32, ranks: Box<[u8]>) -> Self {
        Self {
            precision,
            seed,
            registers: Registers::from_ranks(ranks),
        }
    }

    /// Insert element bytes into `HyperLogLog`
    #[inline]
    pub fn add<T: AsRef<[u8]> + ?Sized>(&mut self, item: &T) {
        let hash = murmur3_x86_32(item.as_ref(), self.seed);
        self.add_hash(hash);
    }

    /// Insert precomputed 32-bit hash into `HyperLogLog`
    #[inline]
    pub fn add_hash(&mut self, hash: u32) {
        let (idx, rank) = decode_hash(hash, self.precision);
        self.registers.update(idx, rank);
    }

    /// Return cardinality estimate
    pub fn cardinality(&self) -> f64 {
        let m = self.registers.len() as f64;
        let mut estimate = alpha(self.registers.len()) * m * m / self.registers.harmonic_sum();

        if estimate <= 2.5 * m {
            let zeros = self.registers.zeros();
            if zeros > 0 {
                estimate = linear_counting(m, zeros as f64);
            }
        }

        if estimate > TWO_32 / 30.0 {
            // Hash space is saturated and correction is undefined.
            if estimate >= TWO_32 {
                return f64::INFINITY;
            }
            estimate = -TWO_32 * (1.0 - estimate / TWO_32).ln();
        }

        estimate
    }

    /// Merge `rhs` into `self` taking register-wise maximum.
    ///
    /// Both estimators must share precision and seed, otherwise
    /// [`HllError::IncompatibleMerge`] is returned and neither estimator is modified.
    pub fn merge(&mut self, rhs: &Self) -> Result<()> {
        self.check_compatible(rhs)?;
        self.registers.merge(&rhs.registers);
        debug!(precision = self.precision, seed = self.seed, "merged hyperloglog estimators");
        Ok(())
    }

    /// Return new estimator equal to union of `self` and `rhs`
    pub fn merged(&self, rhs: &Self) -> Result<Self> {
        let mut union = self.clone();
        union.merge(rhs)?;
        Ok(union)
    }

    /// Reset all registers to zero
    pub fn clear(&mut self) {
        self.registers.clear();
    }

    /// Return read-only view of registers
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.registers.ranks()
    }

    /// Return number of registers
    #[inline]
    pub fn size(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Return whether no element was inserted since construction or last `clear`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers.zeros() == self.registers.len()
    }

    /// Return expected relative error of estimates
    pub fn standard_error(&self) -> f64 {
        1.04 / (self.registers.len() as f64).sqrt()
    }

    /// Return memory size of `HyperLogLog`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.heap_size()
    }

    fn check_compatible(&self, rhs: &Self) -> Result<()> {
        if self.precision == rhs.precision && self.seed == rhs.seed {
            return Ok(());
        }
        warn!(
            lhs_precision = self.precision,
            rhs_precision = rhs.precision,
            lhs_seed = self.seed,
            rhs_seed = rhs.seed,
            "rejected merge of incompatible hyperloglog estimators"
        );
        Err(HllError::IncompatibleMerge {
            lhs_precision: self.precision,
            rhs_precision: rhs.precision,
            lhs_seed: self.seed,
            rhs_seed: rhs.seed,
        })
    }
}

impl Default for HyperLogLog {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            seed: DEFAULT_SEED,
            registers: Registers::new(1 << DEFAULT_PRECISION),
        }
    }
}

impl<T: AsRef<[u8]>> Extend<T> for HyperLogLog {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(&item);
        }
    }
}

impl Debug for HyperLogLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, seed: {}, estimate: {:.0}, size: {} }}",
            self.precision,
            self.seed,
            self.cardinality(),
            self.size_of()
        )
    }
}

/// Return error unless `precision` is in supported range
#[inline]
pub(crate) fn validate_precision(precision: u8) -> Result<()> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(HllError::InvalidArgument { precision })
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Linear counting estimate for `m` registers with `zeros` empty ones
#[inline]
fn linear_counting(m: f64, zeros: f64) -> f64 {
    m * (m / zeros).ln()
}
