//! # Register dump
//!
//! Byte-exact layout of a `HyperLogLog` used for storage and exchange:
//! - byte 0        - precision `P`
//! - bytes 1..5    - seed (`u32`, little-endian)
//! - bytes 5..     - `2^P` registers, one byte each
//!
//! Framing and versioning of the dump are left to the caller.

use tracing::warn;

use crate::error::{HllError, Result};
use crate::estimator::{validate_precision, HyperLogLog};
use crate::hash::max_rank;

/// Number of bytes preceding registers in the dump
pub const HEADER_LEN: usize = 5;

impl HyperLogLog {
    /// Encode `HyperLogLog` into register dump
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.size());
        bytes.push(self.precision());
        bytes.extend_from_slice(&self.seed().to_le_bytes());
        bytes.extend_from_slice(self.registers());
        bytes
    }

    /// Decode `HyperLogLog` from register dump
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes).inspect_err(|e| warn!(len = bytes.len(), "failed to decode register dump: {}", e))
    }
}

fn decode(bytes: &[u8]) -> Result<HyperLogLog> {
    let (header, registers) = bytes
        .split_first_chunk::<HEADER_LEN>()
        .ok_or_else(|| invalid(format!("expected at least {} bytes, got {}", HEADER_LEN, bytes.len())))?;

    let precision = header[0];
    validate_precision(precision)?;
    let seed = u32::from_le_bytes([header[1], header[2], header[3], header[4]]);

    let m = 1usize << precision;
    if registers.len() != m {
        return Err(invalid(format!(
            "precision {} requires {} registers, got {}",
            precision,
            m,
            registers.len()
        )));
    }

    let max_rank = max_rank(precision);
    if let Some(idx) = registers.iter().position(|&r| r > max_rank) {
        return Err(invalid(format!(
            "register {} holds rank {} above maximum {}",
            idx, registers[idx], max_rank
        )));
    }

    Ok(HyperLogLog::from_parts(precision, seed, registers.into()))
}

fn invalid(reason: String) -> HllError {
    HllError::InvalidEncoding(reason)
}
