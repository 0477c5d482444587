use binplot::api::{ChartSeries, ChartSeriesConfig, ErrorOverlayConfig};
use binplot::core::{BinErrorOption, LinearScale, Viewport};
use binplot::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0)
        .and_then(|scale| scale.with_pixel_span(0.0, 1920.0))
        .expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(4_321.123).expect("to pixel");
            let _ = scale.pixel_to_domain(px).expect("from pixel");
        })
    });
}

fn bench_poisson_fill_10k(c: &mut Criterion) {
    let data: Vec<f64> = (0..10_000).map(|i| f64::from(i % 50)).collect();
    let config = ChartSeriesConfig::new("bench", "bench", data.len(), 0.0, 100.0)
        .with_bin_error_option(BinErrorOption::Poisson)
        .with_errors(ErrorOverlayConfig::asymmetric(None, None));
    let mut series = ChartSeries::new(config).expect("series");

    c.bench_function("poisson_fill_10k", |b| {
        b.iter(|| {
            series.fill(black_box(&data)).expect("fill");
        })
    });
}

fn bench_draw_frame_2k(c: &mut Criterion) {
    let data: Vec<f64> = (0..2_000).map(|i| 100.0 + f64::from(i % 17)).collect();
    let config = ChartSeriesConfig::new("bench", "bench", data.len(), 0.0, 2_000.0)
        .with_data(data)
        .with_bin_error_option(BinErrorOption::Normal)
        .with_errors(ErrorOverlayConfig::symmetric(None));
    let mut series = ChartSeries::new(config).expect("series");
    let mut renderer = NullRenderer::default();
    let viewport = Viewport::new(1600, 900);

    c.bench_function("draw_frame_2k", |b| {
        b.iter(|| {
            series
                .draw(&mut renderer, black_box(viewport), "HIST P", "SAME E1")
                .expect("draw");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_poisson_fill_10k,
    bench_draw_frame_2k
);
criterion_main!(benches);
