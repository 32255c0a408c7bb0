#![no_main]

use hll_sketch::HyperLogLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = HyperLogLog::from_bytes(data) {
        assert_eq!(estimator.to_bytes(), data);
        estimator.add(b"1");
        assert!(estimator.cardinality() > 0.0);
    }
});
