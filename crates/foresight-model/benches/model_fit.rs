use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use foresight_model::{MetricProfile, TimeSeriesModel};
use foresight_types::{MetricName, MetricSeries};

fn noisy_ramp(days: usize) -> MetricSeries {
    let mut rng = StdRng::seed_from_u64(7);
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let values: Vec<f64> = (0..days)
        .map(|d| 10.0 + 0.2 * d as f64 + if d % 7 >= 5 { 4.0 } else { 0.0 } + rng.gen_range(-0.5..0.5))
        .collect();
    MetricSeries::from_daily_values(start, &values).expect("valid series")
}

fn bench_train_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_fit");
    for days in [30usize, 90, 365] {
        let series = noisy_ramp(days);
        group.bench_with_input(BenchmarkId::new("train_predict", days), &series, |b, series| {
            b.iter(|| {
                let mut model = TimeSeriesModel::new(
                    MetricName::daily_agent_load(),
                    MetricProfile::daily_agent_load(),
                );
                model.train(black_box(series)).expect("train");
                black_box(model.predict(7).expect("predict"))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_train_predict);
criterion_main!(benches);
