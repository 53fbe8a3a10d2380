use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stockline_core::series::parse_date;
use stockline_core::{LinearScale, Scale, TimeScale};

fn bench_linear_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_ticks");
    for &(lo, hi) in &[(152.37f64, 188.12f64), (0.013, 0.019), (-4.0e6, 9.5e7)] {
        let scale = LinearScale::new([lo, hi], [605.0, 0.0]);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{lo}..{hi}")), &scale, |b, s| {
            b.iter(|| black_box(s.ticks(black_box(10))));
        });
    }
    group.finish();
}

fn bench_time_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_ticks");
    let start = parse_date("2010-01-04").expect("fixed date");
    for &days in &[7i64, 90, 365, 3_650] {
        let scale = TimeScale::new([start, start + Duration::days(days)], [0.0, 979.0]);
        group.bench_with_input(BenchmarkId::from_parameter(format!("d{days}")), &scale, |b, s| {
            b.iter(|| black_box(s.ticks(black_box(10))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_linear_ticks, bench_time_ticks);
criterion_main!(benches);
