use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal_chart::chart::BirthData;
use natal_chart::ephemeris::FixtureEphemeris;
use natal_chart::service::NatalChartService;
use natal_chart::western::house_of;

const SAMPLE_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_chart.json");

fn bench_house_of(c: &mut Criterion) {
    let cusps = [
        200.5, 229.3, 260.1, 293.7, 326.4, 355.2, 20.5, 49.3, 80.1, 113.7, 146.4, 175.2,
    ];

    c.bench_function("house_of", |b| {
        b.iter(|| house_of(black_box(190.0), black_box(&cusps)))
    });
}

fn bench_natal_chart(c: &mut Criterion) {
    let fixture = FixtureEphemeris::from_path(SAMPLE_FIXTURE).expect("sample fixture");
    let service = NatalChartService::new(fixture);
    let birth = BirthData::new("2025-05-15T04:06:36Z", 40.7128, -74.006);

    c.bench_function("natal_chart_two_systems", |b| {
        b.iter(|| service.calculate(black_box(&birth), &["placidus", "whole_sign"]))
    });
}

criterion_group!(benches, bench_house_of, bench_natal_chart);
criterion_main!(benches);
