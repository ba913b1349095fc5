use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_engine::{FeatureConfig, FeatureEngineeringPipeline, SpectralFeatureExtractor};
use sensor_table::{ChannelSet, Schema, SensorTable};

fn signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (i as f64 * 0.3).sin() + 0.25 * (i as f64 * 1.7).cos())
        .collect()
}

fn bench_spectral_series(c: &mut Criterion) {
    let values = signal(2_000);
    let mut group = c.benchmark_group("spectral_series");
    for window in [50usize, 100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            let mut extractor = SpectralFeatureExtractor::new(window).unwrap();
            b.iter(|| extractor.compute(black_box(&values)));
        });
    }
    group.finish();
}

fn bench_feature_pipeline(c: &mut Criterion) {
    let n = 2_000;
    let time: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let table = SensorTable::new("Time", time)
        .and_then(|t| t.with_column("accel_x", signal(n)))
        .and_then(|t| t.with_column("accel_y", signal(n)))
        .unwrap();
    let channels = ChannelSet::all(&table);

    let pipeline =
        FeatureEngineeringPipeline::new(FeatureConfig::default(), Schema::default()).unwrap();
    c.bench_function("feature_pipeline_default", |b| {
        b.iter(|| pipeline.run(black_box(&table), &channels).unwrap())
    });
}

criterion_group!(benches, bench_spectral_series, bench_feature_pipeline);
criterion_main!(benches);
