use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isostars::{isolated, KdTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_POINTS: usize = 100_000;

fn random_stars(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(73);
    (0..n).map(|_| [rng.r#gen(), rng.r#gen()]).collect()
}

fn benchmark_build(c: &mut Criterion) {
    let stars = random_stars(NUM_POINTS);

    c.bench_function(&format!("build_{}_points", NUM_POINTS), |b| {
        b.iter(|| KdTree::build(black_box(&stars)))
    });
}

fn benchmark_nearest(c: &mut Criterion) {
    let stars = random_stars(NUM_POINTS);
    let tree = KdTree::build(&stars).unwrap();

    for k in [1, 2, 16] {
        c.bench_function(&format!("nearest_k{}_{}_points", k, NUM_POINTS), |b| {
            let mut i = 0;
            b.iter(|| {
                // Cycle through the stored points as queries
                i = (i + 7919) % NUM_POINTS;
                black_box(tree.nearest(&stars[i], k))
            })
        });
    }
}

fn benchmark_isolated(c: &mut Criterion) {
    let stars = random_stars(NUM_POINTS);

    c.bench_function(&format!("isolated_{}_points", NUM_POINTS), |b| {
        b.iter(|| isolated(black_box(&stars), 0.01))
    });
}

criterion_group!(benches, benchmark_build, benchmark_nearest, benchmark_isolated);
criterion_main!(benches);
