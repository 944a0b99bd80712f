use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal_chart::aspects::AspectCalculator;
use natal_chart::chart::PlanetPlacement;
use natal_chart::ephemeris::Body;
use natal_chart::western::SignPosition;

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(243.5)))
    });
}

fn bench_detect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let planets: Vec<PlanetPlacement> = Body::ALL
        .iter()
        .enumerate()
        .map(|(i, &planet)| {
            let pos = SignPosition::from_longitude(i as f64 * 37.3);
            PlanetPlacement {
                planet,
                sign: pos.sign,
                degree: pos.degree,
                house: 1,
                speed: 1.0,
                retrograde: false,
            }
        })
        .collect();

    c.bench_function("detect_aspects", |b| {
        b.iter(|| calculator.detect(black_box(&planets)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_detect);
criterion_main!(benches);
