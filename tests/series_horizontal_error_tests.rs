use approx::assert_relative_eq;
use binplot::PrecedenceWarning;
use binplot::api::{ChartSeries, ChartSeriesConfig, ErrorOverlayConfig};

fn series_with(suppress: bool) -> ChartSeries {
    ChartSeries::new(
        ChartSeriesConfig::new("h", "", 4, 0.0, 8.0)
            .with_data(vec![1.0, 2.0, 3.0, 4.0])
            .with_errors(
                ErrorOverlayConfig::asymmetric(Some(vec![0.5; 4]), Some(vec![0.25; 4]))
                    .with_suppress_x_errors(suppress),
            ),
    )
    .expect("series")
}

#[test]
fn suppression_zeroes_horizontal_errors() {
    let series = series_with(true);
    assert!(series.x_errors_suppressed().expect("overlay"));
    for point in series.error_overlay().expect("overlay").points() {
        assert_eq!(point.ex_low, 0.0);
        assert_eq!(point.ex_high, 0.0);
    }
}

#[test]
fn without_suppression_horizontal_errors_span_half_a_bin() {
    let series = series_with(false);
    assert!(!series.x_errors_suppressed().expect("overlay"));
    for point in series.error_overlay().expect("overlay").points() {
        assert_relative_eq!(point.ex_low, 1.0);
        assert_relative_eq!(point.ex_high, 1.0);
    }
}

#[test]
fn explicit_arrays_override_suppression_with_warning() {
    let mut series = series_with(true);
    let high = [0.4, 0.4, 0.4, 0.4];
    let low = [0.2, 0.2, 0.2, 0.2];
    series
        .set_horizontal_errors_asymmetric(Some(&high), Some(&low))
        .expect("horizontal errors");

    assert!(!series.x_errors_suppressed().expect("overlay"));
    assert_eq!(
        series.warnings(),
        &[PrecedenceWarning::HorizontalErrorsOverrideSuppression]
    );
    let point = series.error_overlay().expect("overlay").point(3).expect("point");
    assert_relative_eq!(point.ex_high, 0.4);
    assert_relative_eq!(point.ex_low, 0.2);
}

#[test]
fn explicit_arrays_without_suppression_apply_silently() {
    let mut series = series_with(false);
    series
        .set_horizontal_errors_asymmetric(Some(&[0.3; 4]), Some(&[0.1; 4]))
        .expect("horizontal errors");
    assert!(series.warnings().is_empty());
    let point = series.error_overlay().expect("overlay").point(0).expect("point");
    assert_relative_eq!(point.ex_high, 0.3);
    assert_relative_eq!(point.ex_low, 0.1);
}

#[test]
fn no_arrays_reapplies_the_suppression_policy() {
    let mut series = series_with(true);
    series
        .set_horizontal_errors_asymmetric(None, None)
        .expect("horizontal errors");
    assert!(series.warnings().is_empty());
    let point = series.error_overlay().expect("overlay").point(0).expect("point");
    assert_eq!(point.ex_high, 0.0);

    let mut series = series_with(false);
    series
        .set_horizontal_errors_asymmetric(None, None)
        .expect("horizontal errors");
    let point = series.error_overlay().expect("overlay").point(0).expect("point");
    assert_relative_eq!(point.ex_high, 1.0);
}

#[test]
fn a_single_horizontal_array_is_rejected() {
    let mut series = series_with(true);
    let err = series
        .set_horizontal_errors_asymmetric(Some(&[0.3; 4]), None)
        .expect_err("one array");
    assert!(err.is_configuration());
    assert!(series.x_errors_suppressed().expect("overlay"));
}

#[test]
fn horizontal_arrays_are_length_checked() {
    let mut series = series_with(false);
    let err = series
        .set_horizontal_errors_asymmetric(Some(&[0.3; 3]), Some(&[0.1; 3]))
        .expect_err("length mismatch");
    assert!(err.is_configuration());
}

#[test]
fn symmetric_overlay_accepts_only_matching_horizontal_arrays() {
    let mut series = ChartSeries::new(
        ChartSeriesConfig::new("h", "", 4, 0.0, 8.0)
            .with_data(vec![1.0, 2.0, 3.0, 4.0])
            .with_errors(ErrorOverlayConfig::symmetric(Some(vec![0.5; 4]))),
    )
    .expect("series");

    let err = series
        .set_horizontal_errors_asymmetric(Some(&[0.4; 4]), Some(&[0.2; 4]))
        .expect_err("unequal arrays on symmetric overlay");
    assert!(err.is_configuration());
    assert!(series.x_errors_suppressed().expect("overlay"));
    assert!(series.warnings().is_empty());
    let point = series.error_overlay().expect("overlay").point(0).expect("point");
    assert_eq!(point.ex_high, 0.0);

    series
        .set_horizontal_errors_asymmetric(Some(&[0.3; 4]), Some(&[0.3; 4]))
        .expect("matching arrays");
    let point = series.error_overlay().expect("overlay").point(0).expect("point");
    assert_relative_eq!(point.ex_low, 0.3);
    assert_relative_eq!(point.ex_high, 0.3);
    assert_eq!(
        series.warnings(),
        &[PrecedenceWarning::HorizontalErrorsOverrideSuppression]
    );
}

#[test]
fn horizontal_errors_require_an_overlay() {
    let mut series =
        ChartSeries::new(ChartSeriesConfig::new("h", "", 4, 0.0, 8.0)).expect("series");
    assert!(series.set_horizontal_errors_asymmetric(None, None).is_err());
}
