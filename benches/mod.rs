use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    codec::bench_encode_connect,
    codec::bench_encode_publish,
    codec::bench_decode_publish,
    codec::bench_decode_register
);
criterion_main!(benches);
