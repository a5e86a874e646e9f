//! Benchmarks for Equihash verification and target checks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ehverify_core::{check_target, verify};

/// Equihash(96, 5) solution for a zero header and zero nonce
const EH96_5_SOLUTION: &str = "02beb4cb02663bcc4218f24039bc6d02884c78a73be12bf96587e6c7e6ae17f1\
                               620003b90396a73e56cc93924eb9f6fa85b89a22dda86392e78ec0f942cf8746\
                               92edd535";

/// Equihash(150, 5) solution for a zero header and zero nonce
const EH150_5_SOLUTION: &str = "02b4de833dae43e640833145b64200c8276ccb063cabb24c4346131276add1c3\
                                d32ea23a53b8d51f1509d89a1633412dc68b5d9a03502d63e05a14dfadeeca1a\
                                3f8928db249de38cb92053b1c00906cbacf83103e35a760389d1320c1bb7b45e\
                                e4c50fae615451b2";

fn bench_verify(c: &mut Criterion) {
    let header = [0u8; 32];
    let nonce = [0u8; 8];
    let solution = hex::decode(EH96_5_SOLUTION).unwrap();
    let mainnet = hex::decode(EH150_5_SOLUTION).unwrap();

    c.bench_function("verify_96_5_valid", |b| {
        b.iter(|| verify(black_box(&header), black_box(&nonce), black_box(&solution), 96, 5))
    });
    c.bench_function("verify_150_5_valid", |b| {
        b.iter(|| verify(black_box(&header), black_box(&nonce), black_box(&mainnet), 150, 5))
    });
}

fn bench_verify_200_9_reject(c: &mut Criterion) {
    // Distinct indices force leaf expansion for all 512 entries before round 1 fails.
    let header = [0u8; 32];
    let nonce = [0u8; 8];
    let indices: Vec<u32> = (0..512).map(|i| i * 7).collect();
    let params = ehverify_core::Params::lookup(200, 9).unwrap();
    let solution = ehverify_core::minimal_from_indices(&params, &indices).unwrap();

    c.bench_function("verify_200_9_reject", |b| {
        b.iter(|| verify(black_box(&header), black_box(&nonce), black_box(&solution), 200, 9))
    });
}

fn bench_check_target(c: &mut Criterion) {
    let buffer = [0xABu8; 104];

    c.bench_function("check_target", |b| {
        b.iter(|| check_target(black_box(&buffer), black_box(0x1f12_3456)))
    });
}

criterion_group!(benches, bench_verify, bench_verify_200_9_reject, bench_check_target);
criterion_main!(benches);
