#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use dhat::HeapStats;
use hll_sketch::{HyperLogLog, HEADER_LEN};

#[test]
fn test_allocations() {
    let _profiler = dhat::Profiler::builder().testing().build();

    // first construction and merge register logging callsites
    let mut warm_up = HyperLogLog::new(4).unwrap();
    warm_up.merge(&HyperLogLog::new(4).unwrap()).unwrap();
    drop(warm_up);

    for precision in [2u8, 10, 16] {
        let m = 1u64 << precision;

        let before = HeapStats::get();
        let mut hll = HyperLogLog::new(precision).unwrap();
        let after_new = HeapStats::get();
        // registers are the only heap allocation
        dhat::assert_eq!(after_new.total_blocks - before.total_blocks, 1);
        dhat::assert_eq!(after_new.total_bytes - before.total_bytes, m);

        for i in 0..100_000u64 {
            hll.add(&i.to_le_bytes());
        }
        let _ = hll.cardinality();
        let after_add = HeapStats::get();
        dhat::assert_eq!(after_add.total_blocks, after_new.total_blocks);

        let other = hll.clone();
        hll.merge(&other).unwrap();
        let after_merge = HeapStats::get();
        dhat::assert_eq!(after_merge.total_blocks - after_add.total_blocks, 1);
        dhat::assert_eq!(after_merge.total_bytes - after_add.total_bytes, m);

        let bytes = hll.to_bytes();
        let after_encode = HeapStats::get();
        dhat::assert_eq!(bytes.len() as u64, HEADER_LEN as u64 + m);
        dhat::assert_eq!(after_encode.total_bytes - after_merge.total_bytes, HEADER_LEN as u64 + m);
    }
}
