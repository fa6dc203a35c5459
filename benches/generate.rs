use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vitalsynth::generate;

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_one_year", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| generate(black_box("2025-01-01"), black_box("2025-12-31"), &mut rng).unwrap())
    });

    let mut rng = StdRng::seed_from_u64(2);
    let dataset = generate("2025-01-01", "2025-12-31", &mut rng).unwrap();
    c.bench_function("daily_summaries_one_year", |b| {
        b.iter(|| black_box(&dataset).daily_summaries())
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
