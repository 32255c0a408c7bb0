//! `hll-sketch` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset in an efficient manner.
//!
//! This library implements seeded HyperLogLog over Murmur3 32-bit hashes, using `2^precision`
//! one-byte registers and the classic small-range and large-range bias corrections.
//!
//! ```
//! use hll_sketch::HyperLogLog;
//!
//! let mut visitors = HyperLogLog::new(12)?;
//! visitors.add("alice");
//! visitors.add("bob");
//! visitors.add("alice");
//! assert_eq!(visitors.cardinality().round(), 2.0);
//! # Ok::<(), hll_sketch::HllError>(())
//! ```
mod codec;
pub mod error;
pub mod estimator;
mod hash;
mod registers;
#[cfg(feature = "with_serde")]
mod serde;

pub use codec::HEADER_LEN;
pub use error::{HllError, Result};
pub use estimator::{HyperLogLog, DEFAULT_PRECISION, DEFAULT_SEED, MAX_PRECISION, MIN_PRECISION};
pub use hash::murmur3_x86_32;
