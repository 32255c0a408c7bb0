//! # Serde module for HyperLogLog
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `HyperLogLog`. It uses `serde`'s custom serialization and deserialization mechanisms.
//!
//! During serialization the estimator is converted into a tuple `(precision, seed, registers)`,
//! the same fields and order as the register dump. Cached zero count and harmonic sum are
//! not serialized and are recomputed on deserialization.
//!
//! Deserialization runs the same validation as [`HyperLogLog::from_bytes`], so precision,
//! register count and register ranks of untrusted input are checked before use.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::codec::HEADER_LEN;
use crate::estimator::HyperLogLog;

impl Serialize for HyperLogLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.precision())?;
        tup.serialize_element(&self.seed())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for HyperLogLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (precision, seed, registers): (u8, u32, Vec<u8>) =
            Deserialize::deserialize(deserializer)?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + registers.len());
        bytes.push(precision);
        bytes.extend_from_slice(&seed.to_le_bytes());
        bytes.extend_from_slice(&registers);

        HyperLogLog::from_bytes(&bytes).map_err(|e| Error::custom(e.to_string()))
    }
}
