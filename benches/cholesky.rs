#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qfixed::format::{DynFormat, OvfMode, RndMode};
use qfixed::linalg::{qpotrf, PotrfOutcome};
use qfixed::matrix::Matrix;
use qfixed::policy::PotrfArgs;
use std::hint::black_box;

fn fmt() -> DynFormat {
    DynFormat::try_new(8, 16, true, RndMode::Tcpl, OvfMode::SatTcpl).expect("bench format must be valid")
}

/// A diagonally-dominant (hence positive-definite) `N x N` matrix, so every
/// benchmarked factorization runs qpotrf's full pivot loop instead of
/// bailing out early on `NotPositiveDefinite`.
fn spd_matrix<const N: usize>(format: DynFormat) -> Matrix<N, N> {
    Matrix::from_fn(format, |r, c| {
        let raw = if r == c { (N as i32 + 4) << 8 } else { 1i32 << 6 };
        qfixed::DynFixed::new(raw, format)
    })
}

fn bench_cholesky(c: &mut Criterion) {
    let mut group = c.benchmark_group("qpotrf");
    let format = fmt();
    let args = PotrfArgs::default();

    macro_rules! run {
        ($n:literal) => {{
            let a = spd_matrix::<$n>(format);
            group.throughput(Throughput::Elements(($n * $n * $n / 6) as u64));
            group.bench_with_input(BenchmarkId::from_parameter($n), &$n, |bch, _| {
                bch.iter(|| {
                    let outcome = qpotrf(&a, format, &args);
                    black_box(match outcome {
                        PotrfOutcome::Factored(l) => l,
                        PotrfOutcome::NotPositiveDefinite { .. } => {
                            panic!("benchmark matrix must stay positive-definite")
                        }
                    })
                });
            });
        }};
    }

    run!(4);
    run!(8);
    run!(16);
    group.finish();
}

criterion_group!(benches, bench_cholesky);
criterion_main!(benches);
