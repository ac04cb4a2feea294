use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use isostars::{Isolation, KdTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N_POINTS: usize = 1_000_000;

fn benchmark_parallelism(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(73);
    let mut stars: Vec<[f64; 2]> = (0..N_POINTS).map(|_| [rng.r#gen(), rng.r#gen()]).collect();
    stars[N_POINTS / 2] = [54.0, 12.8];
    let tree = KdTree::build(&stars).unwrap();

    let mut group = c.benchmark_group(format!("parallelism_{}k", N_POINTS / 1000));
    group.sample_size(10);

    let max_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
    let mut cores_list = Vec::new();
    let mut cores = 1;
    while cores <= max_cores {
        cores_list.push(cores);
        cores *= 2;
    }
    if cores_list.last().is_some_and(|&last| last < max_cores) {
        cores_list.push(max_cores);
    }

    for &num_threads in &cores_list {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("isolated", num_threads), &num_threads, |b, _| {
            b.iter(|| pool.install(|| Isolation::new(3.0).find(&tree).unwrap()))
        });
    }

    group.bench_function("sequential", |b| {
        b.iter(|| Isolation::new(3.0).parallel(false).find(&tree).unwrap())
    });
    group.finish();
}

criterion_group!(benches, benchmark_parallelism);
criterion_main!(benches);
