use approx::assert_relative_eq;
use topic_lens::core::{
    AxisLabelLocale, ChartGeometry, ChartViewport, ForecastDataPoint, PathCommand,
    compute_geometry, compute_geometry_with_locale,
};
use topic_lens::{ErrorKind, LensError};

fn series(values: &[f64]) -> Vec<ForecastDataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ForecastDataPoint::new(format!("P{index}"), *value))
        .collect()
}

#[test]
fn empty_series_yields_no_data_geometry() {
    let geometry = compute_geometry(&[], ChartViewport::default()).expect("geometry");
    assert!(geometry.is_no_data());
    assert!(geometry.as_plot().is_none());
    assert_eq!(geometry.viewport(), ChartViewport::default());
}

#[test]
fn invalid_viewport_is_rejected_even_without_data() {
    for viewport in [
        ChartViewport::new(0.0, 320.0, 50.0),
        ChartViewport::new(600.0, -1.0, 50.0),
        ChartViewport::new(600.0, 320.0, 200.0),
        ChartViewport::new(600.0, 320.0, f64::INFINITY),
    ] {
        let err = compute_geometry(&[], viewport).expect_err("invalid viewport");
        assert!(matches!(err, LensError::InvalidViewport { .. }));
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}

#[test]
fn single_point_sits_at_horizontal_center_without_path() {
    let points = vec![ForecastDataPoint::new("t", 5.0)];
    let geometry = compute_geometry(&points, ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    assert_eq!(plot.points.len(), 1);
    assert_relative_eq!(plot.points[0].x, 300.0);
    // Flat padding for 5.0 is max(1.0, 10.0) = 10, so 5 sits mid-range.
    assert_relative_eq!(plot.points[0].y, 160.0);
    assert!(plot.path.is_empty());
    assert_eq!(plot.path.to_svg_data(), "");
    assert_eq!(plot.time_labels.len(), 1);
    assert_eq!(plot.time_labels[0].label, "t");
}

#[test]
fn flat_series_is_padded_to_a_non_degenerate_range() {
    let geometry = compute_geometry(&series(&[10.0, 10.0, 10.0]), ChartViewport::default())
        .expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    assert_relative_eq!(plot.value_range.min, 0.0);
    assert_relative_eq!(plot.value_range.max, 20.0);
    for point in &plot.points {
        assert!(point.y.is_finite());
        assert_relative_eq!(point.y, 160.0);
    }
    assert_relative_eq!(plot.value_ticks[0].y, 270.0);
    assert_relative_eq!(plot.value_ticks[4].y, 50.0);
}

#[test]
fn large_flat_series_pads_by_a_fifth_of_its_magnitude() {
    let geometry = compute_geometry(&series(&[-2_000.0, -2_000.0]), ChartViewport::default())
        .expect("geometry");
    let plot = geometry.as_plot().expect("plot");
    assert_relative_eq!(plot.value_range.min, -2_400.0);
    assert_relative_eq!(plot.value_range.max, -1_600.0);
}

#[test]
fn points_spread_across_plot_and_invert_y() {
    let geometry =
        compute_geometry(&series(&[0.0, 50.0, 100.0]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    // Range 0..100 padded to -10..110 across y 270..50.
    let xs: Vec<f64> = plot.points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![50.0, 300.0, 550.0]);

    let span_px = 220.0;
    assert_relative_eq!(plot.points[0].y, 270.0 - 10.0 / 120.0 * span_px, epsilon = 1e-9);
    assert_relative_eq!(plot.points[1].y, 160.0, epsilon = 1e-9);
    assert_relative_eq!(plot.points[2].y, 50.0 + 10.0 / 120.0 * span_px, epsilon = 1e-9);
    assert!(plot.points[2].y < plot.points[0].y);
}

#[test]
fn path_moves_then_lines_through_every_point_in_order() {
    let geometry =
        compute_geometry(&series(&[3.0, 1.0, 2.0, 5.0]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");
    let commands = plot.path.commands();

    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], PathCommand::MoveTo { .. }));
    for (command, point) in commands.iter().zip(&plot.points).skip(1) {
        match command {
            PathCommand::LineTo { x, y } => {
                assert_eq!(*x, point.x);
                assert_eq!(*y, point.y);
            }
            PathCommand::MoveTo { .. } => panic!("only the first command moves"),
        }
    }
    assert!(plot.path.to_svg_data().starts_with("M 50,"));
}

#[test]
fn value_ticks_are_five_evenly_spaced_labels() {
    let geometry =
        compute_geometry(&series(&[0.0, 100.0]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    let values: Vec<f64> = plot.value_ticks.iter().map(|tick| tick.value).collect();
    assert_eq!(values, vec![-10.0, 20.0, 50.0, 80.0, 110.0]);
    let labels: Vec<&str> = plot.value_ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["-10", "20", "50", "80", "110"]);
    assert_relative_eq!(plot.value_ticks[0].y, 270.0);
    assert_relative_eq!(plot.value_ticks[2].y, 160.0);
    assert_relative_eq!(plot.value_ticks[4].y, 50.0);
}

#[test]
fn tick_labels_round_to_two_digits_with_grouping() {
    let geometry =
        compute_geometry(&series(&[1_000.0, 2_000.333]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");
    // Padded range 899.9667..2100.3663; the top tick rounds to two digits.
    assert_eq!(plot.value_ticks[4].label, "2,100.37");
    assert_eq!(plot.value_ticks[0].label, "899.97");

    let spanish = compute_geometry_with_locale(
        &series(&[10_000.0, 20_000.0]),
        ChartViewport::default(),
        AxisLabelLocale::EsEs,
    )
    .expect("geometry");
    let plot = spanish.as_plot().expect("plot");
    assert_eq!(plot.value_ticks[0].label, "9000");
    assert_eq!(plot.value_ticks[4].label, "21.000");
}

#[test]
fn every_point_is_labelled_up_to_twelve() {
    let geometry = compute_geometry(&series(&[1.0; 12]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");
    let indices: Vec<usize> = plot.time_labels.iter().map(|label| label.index).collect();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());
}

#[test]
fn twenty_four_points_label_every_other_plus_last() {
    let values: Vec<f64> = (0..24).map(f64::from).collect();
    let geometry = compute_geometry(&series(&values), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    let indices: Vec<usize> = plot.time_labels.iter().map(|label| label.index).collect();
    let mut expected: Vec<usize> = (0..24).step_by(2).collect();
    expected.push(23);
    assert_eq!(indices, expected);

    let last = plot.time_labels.last().expect("last label");
    assert_eq!(last.label, "P23");
    assert_relative_eq!(last.x, 550.0);
}

#[test]
fn non_finite_values_are_rejected() {
    let err = compute_geometry(&series(&[1.0, f64::NAN]), ChartViewport::default())
        .expect_err("nan value");
    assert!(matches!(err, LensError::InvalidData(_)));
}

#[test]
fn custom_viewport_moves_the_plot_area() {
    let viewport = ChartViewport::new(1_000.0, 500.0, 20.0);
    let geometry = compute_geometry(&series(&[1.0, 2.0]), viewport).expect("geometry");
    let ChartGeometry::Plot(plot) = geometry else {
        panic!("expected plot geometry");
    };
    assert_relative_eq!(plot.bounds.left, 20.0);
    assert_relative_eq!(plot.bounds.right, 980.0);
    assert_relative_eq!(plot.bounds.bottom, 480.0);
    assert_relative_eq!(plot.points[0].x, 20.0);
    assert_relative_eq!(plot.points[1].x, 980.0);
}

#[test]
fn extreme_magnitudes_keep_finite_ticks_and_positions() {
    let geometry =
        compute_geometry(&series(&[-1e308, 1e308]), ChartViewport::default()).expect("geometry");
    let plot = geometry.as_plot().expect("plot");

    assert!(plot.value_range.min.is_finite() && plot.value_range.max.is_finite());
    assert!(plot.points[0].y > plot.points[1].y);
    for point in &plot.points {
        assert!(point.y > 50.0 && point.y < 270.0);
    }
    for tick in &plot.value_ticks {
        assert!(tick.value.is_finite());
        assert_ne!(tick.label, "NaN");
    }
    assert_relative_eq!(plot.value_ticks[0].y, 270.0);
    assert_relative_eq!(plot.value_ticks[2].y, 160.0);
    assert_relative_eq!(plot.value_ticks[4].y, 50.0);
}
