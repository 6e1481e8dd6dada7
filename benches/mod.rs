use criterion::{criterion_group, criterion_main};


use conversion::register_benchmarks as register_conversion_benchmarks;
use ladder::register_benchmarks as register_ladder_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_ladder_benchmarks,
    register_conversion_benchmarks,
);

criterion_main!(benches);
