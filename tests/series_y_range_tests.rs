use approx::assert_relative_eq;
use binplot::api::{ChartSeries, ChartSeriesConfig};

fn four_bin_series() -> ChartSeries {
    ChartSeries::new(ChartSeriesConfig::new("range", "", 4, 0.0, 4.0)).expect("series")
}

#[test]
fn auto_y_high_is_one_point_two_times_max() {
    let mut series = four_bin_series();
    assert_eq!(series.y_range(), (0.0, None));

    series.fill(&[1.0, 2.0, 10.0, 3.0]).expect("fill");
    let (low, high) = series.y_range();
    assert_eq!(low, 0.0);
    assert_relative_eq!(high.expect("auto high"), 12.0, epsilon = 1e-12);
    assert!(series.is_y_auto());
}

#[test]
fn auto_y_high_follows_each_fill() {
    let mut series = four_bin_series();
    series.fill(&[1.0, 2.0, 10.0, 3.0]).expect("fill");
    series.fill(&[1.0, 20.0, 1.0, 1.0]).expect("refill");
    assert_relative_eq!(series.y_range().1.expect("auto high"), 24.0, epsilon = 1e-12);
}

#[test]
fn explicit_y_high_survives_larger_fills_until_reset() {
    let mut series = four_bin_series();
    series.fill(&[1.0, 2.0, 10.0, 3.0]).expect("fill");

    series.set_y_range(0.0, Some(5.0)).expect("explicit range");
    assert_eq!(series.y_range(), (0.0, Some(5.0)));

    series.fill(&[50.0, 60.0, 70.0, 80.0]).expect("larger fill");
    assert_eq!(series.y_range(), (0.0, Some(5.0)));
    assert!(!series.is_y_auto());

    series.set_y_range(0.0, None).expect("reset to auto");
    series.fill(&[1.0, 2.0, 10.0, 3.0]).expect("fill after reset");
    assert_relative_eq!(series.y_range().1.expect("auto high"), 12.0, epsilon = 1e-12);
}

#[test]
fn explicit_range_from_config_applies_before_any_fill() {
    let series = ChartSeries::new(
        ChartSeriesConfig::new("range", "", 4, 0.0, 4.0).with_y_range(-1.0, Some(3.0)),
    )
    .expect("series");
    assert_eq!(series.y_range(), (-1.0, Some(3.0)));
    assert_eq!(series.primary().y_axis_range(), Some((-1.0, 3.0)));
}

#[test]
fn scaled_contents_drive_auto_range() {
    let series = ChartSeries::new(
        ChartSeriesConfig::new("range", "", 2, 0.0, 2.0)
            .with_scale(10.0)
            .with_data(vec![1.0, 2.0]),
    )
    .expect("series");
    assert_relative_eq!(series.y_range().1.expect("auto high"), 24.0, epsilon = 1e-12);
}

#[test]
fn set_y_range_rejects_inverted_or_non_finite_bounds() {
    let mut series = four_bin_series();
    assert!(series.set_y_range(5.0, Some(1.0)).expect_err("inverted").is_configuration());
    assert!(series.set_y_range(f64::NAN, None).expect_err("nan").is_configuration());
    assert!(
        series
            .set_y_range(0.0, Some(f64::INFINITY))
            .expect_err("infinite")
            .is_configuration()
    );
    assert_eq!(series.y_range(), (0.0, None));
}
