#![no_main]

use hll_sketch::HyperLogLog;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let precision = 2 + (data[0] % 15);
    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut estimator1 = HyperLogLog::new(precision).unwrap();
    for chunk in first_half.chunks(4) {
        estimator1.add(chunk);
        assert!(estimator1.cardinality() > 0.0);
    }

    let mut estimator2 = HyperLogLog::new(precision).unwrap();
    for chunk in second_half.chunks(4) {
        estimator2.add(chunk);
        assert!(estimator2.cardinality() > 0.0);
    }

    let mut union = HyperLogLog::new(precision).unwrap();
    for chunk in first_half.chunks(4).chain(second_half.chunks(4)) {
        union.add(chunk);
    }

    estimator1.merge(&estimator2).unwrap();
    assert_eq!(estimator1, union);
});
