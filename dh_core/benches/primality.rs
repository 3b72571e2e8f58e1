// Benchmarks for the Miller-Rabin test and prime generation.
//
// A fixed seed keeps the candidates identical between runs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dh_core::{DEFAULT_ROUNDS, SearchConfig, generate_prime, is_probable_prime};

fn bench_is_probable_prime(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut group = c.benchmark_group("miller_rabin/is_probable_prime");

    for bits in [256u64, 512, 1024] {
        let prime = generate_prime(bits, &SearchConfig::default(), &mut rng)
            .expect("prime generation failed");
        group.bench_with_input(BenchmarkId::from_parameter(bits), &prime, |b, n| {
            b.iter(|| is_probable_prime(n, DEFAULT_ROUNDS, &mut rng));
        });
    }
    group.finish();
}

fn bench_reject_composite(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    // product of two Mersenne primes
    let composite = BigUint::parse_bytes(b"170141183460469231731687303715884105727", 10)
        .expect("valid literal")
        * BigUint::from(2_147_483_647u32);

    c.bench_function("miller_rabin/reject_composite", |b| {
        b.iter(|| is_probable_prime(&composite, DEFAULT_ROUNDS, &mut rng));
    });
}

fn bench_generate_prime(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let config = SearchConfig::default();

    c.bench_function("miller_rabin/generate_prime_256", |b| {
        b.iter(|| generate_prime(256, &config, &mut rng));
    });
}

criterion_group!(
    benches,
    bench_is_probable_prime,
    bench_reject_composite,
    bench_generate_prime
);
criterion_main!(benches);
