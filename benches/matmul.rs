//! Sequential vs column-parallel matrix multiplication.
//!
//! # Usage:
//! ```bash
//! # Run all matrix multiplication benchmarks
//! cargo bench --bench matmul
//!
//! # Run one size only
//! cargo bench --bench matmul -- matmul_256x256
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rand::prelude::*;

use mmm::{par_matmul, seq_matmul};

fn random_matrix(n: usize, rng: &mut StdRng) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |_| rng.random_range(-1.0..1.0))
}

/// One group per size: the sequential engine, then the parallel engine at
/// several worker counts.
fn bench_matmul_by_size(c: &mut Criterion) {
    for n in [64, 128, 256] {
        let mut group = c.benchmark_group(format!("matmul_{n}x{n}"));
        group.sample_size(20);

        let mut rng = StdRng::seed_from_u64(42);
        let a = random_matrix(n, &mut rng);
        let b = random_matrix(n, &mut rng);
        let mut out = Array2::<f64>::zeros((n, n));

        group.bench_function("sequential", |bench| {
            bench.iter(|| {
                seq_matmul(black_box(a.view()), black_box(b.view()), out.view_mut());
                black_box(&out);
            });
        });

        for threads in [2, 4, 8] {
            group.bench_function(format!("parallel_{threads}"), |bench| {
                bench.iter(|| {
                    par_matmul(
                        black_box(a.view()),
                        black_box(b.view()),
                        out.view_mut(),
                        threads,
                    )
                    .unwrap();
                    black_box(&out);
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_matmul_by_size);
criterion_main!(benches);
