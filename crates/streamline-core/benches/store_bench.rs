use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};
use streamline_core::TimeSeries;

fn gen_series(n: usize) -> TimeSeries {
    let s = TimeSeries::new();
    for i in 0..n {
        // simple waveform with drift
        let v = (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001);
        s.append(i as i64 * 10, v);
    }
    s
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for &n in &[10_000usize, 100_000usize] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &n, |b, &n| {
            b.iter(|| black_box(gen_series(n)));
        });
    }
    group.finish();
}

fn bench_drop_old_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_old_data");
    for &n in &[10_000usize, 100_000usize] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_half")), &n, |b, &n| {
            b.iter_batched(
                || gen_series(n),
                |s| black_box(s.drop_old_data(n as i64 * 5, 2)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_reset_bounds(c: &mut Criterion) {
    let s = gen_series(100_000);
    c.bench_function("reset_bounds_n100000", |b| b.iter(|| s.reset_bounds()));
}

criterion_group!(benches, bench_append, bench_drop_old_data, bench_reset_bounds);
criterion_main!(benches);
