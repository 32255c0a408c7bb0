//! Element hashing and the split of a 32-bit hash into register index and rank.
//!
//! The top `P` bits of the hash select one of `2^P` registers, the remaining `32 - P`
//! bits are left-aligned and their leading zero count gives the geometric rank:
//!
//! ```text
//!  31           32-P 31-P                     0
//! +----------------+---------------------------+
//! | register index |        rank field         |
//! +----------------+---------------------------+
//! ```

use std::io::Cursor;

use murmur3::murmur3_32;

/// Width of the hash fed into registers
pub(crate) const HASH_BITS: u32 = 32;

/// Hash raw element bytes with seeded Murmur3 (x86, 32-bit variant).
#[inline]
pub fn murmur3_x86_32(bytes: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(bytes);
    // Reading from an in-memory cursor never returns an I/O error.
    murmur3_32(&mut cursor, seed).expect("in-memory read is infallible")
}

/// Return register index and rank encoded in hash `h` for given `precision`.
#[inline]
pub(crate) fn decode_hash(h: u32, precision: u8) -> (usize, u8) {
    let p = u32::from(precision);
    let idx = (h >> (HASH_BITS - p)) as usize;
    // Shifting out index bits leaves zeros at the bottom, so the leading zero count
    // has to be capped at the width of the rank field.
    let rank = (h << p).leading_zeros().min(HASH_BITS - p) + 1;
    (idx, rank as u8)
}

/// Largest rank a register can hold for given `precision`.
#[inline]
pub(crate) fn max_rank(precision: u8) -> u8 {
    (HASH_BITS - u32::from(precision) + 1) as u8
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"", 0 => 0x0000_0000; "empty input zero seed")]
    #[test_case(b"", 1 => 0x514e_28b7; "empty input seed one")]
    #[test_case(b"hello", 0 => 0x248b_fa47; "short input")]
    #[test_case(b"Hello, world!", 1234 => 0xfaf6_cdb3; "seeded input with tail")]
    #[test_case(b"The quick brown fox jumps over the lazy dog", 0 => 0x2e4f_f723; "long input")]
    fn test_murmur3_reference_vectors(bytes: &[u8], seed: u32) -> u32 {
        murmur3_x86_32(bytes, seed)
    }

    #[test]
    fn test_murmur3_seed_changes_hash() {
        assert_ne!(murmur3_x86_32(b"hello", 0), murmur3_x86_32(b"hello", 314));
    }

    #[test_case(0xffff_ffff, 4 => (15, 1); "all ones")]
    #[test_case(0x0000_0000, 4 => (0, 29); "all zeros saturates rank")]
    #[test_case(0x0800_0000, 4 => (0, 1); "first rank bit set")]
    #[test_case(0x0400_0000, 4 => (0, 2); "second rank bit set")]
    #[test_case(0x1000_0001, 4 => (1, 28); "only lowest bit set")]
    #[test_case(0xc000_0000, 2 => (3, 31); "lowest precision all zero rank field")]
    #[test_case(0x0000_8000, 16 => (0, 1); "highest precision first rank bit")]
    #[test_case(0xffff_0000, 16 => (65535, 17); "highest precision all zero rank field")]
    fn test_decode_hash(h: u32, precision: u8) -> (usize, u8) {
        decode_hash(h, precision)
    }

    #[test]
    fn test_rank_never_exceeds_max_rank() {
        for precision in 2..=16 {
            for h in [0u32, 1, 0x8000_0000, 0xffff_ffff, 0x0001_0000] {
                let (idx, rank) = decode_hash(h, precision);
                assert!(idx < 1 << precision);
                assert!(rank >= 1 && rank <= max_rank(precision));
            }
        }
    }
}
