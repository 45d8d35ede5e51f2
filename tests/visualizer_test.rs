//! Visualizer Contract Tests
//!
//! Exercises the public façade end to end against recording, SVG and PNG backends:
//! projection order, heatmap shape, one histogram per numeric column, hue/legend rules
//! and lookup failures.
//!
//! Run: cargo test --test visualizer_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use proptest::prelude::*;
use tempfile::TempDir;

use trueno_dataviz::data::ColumnData;
use trueno_dataviz::prelude::*;
use trueno_dataviz::stats::pearson;

fn employees() -> Dataset {
    Dataset::new()
        .with_column("age", vec![25_i64, 30, 35])
        .and_then(|d| d.with_column("salary", vec![50_000.0, 60_000.0, 75_000.0]))
        .and_then(|d| d.with_column("dept", vec!["A", "A", "B"]))
        .unwrap()
}

fn staff() -> Dataset {
    Dataset::new()
        .with_column("dept", vec!["Sales", "Eng", "Eng", "Sales", "Eng", "Sales", "Eng", "Sales"])
        .and_then(|d| d.with_column("remote", vec![true, false, true, true, false, false, true, false]))
        .and_then(|d| d.with_column("tenure", vec![1_i64, 3, 5, 2, 8, 4, 6, 7]))
        .and_then(|d| d.with_column("salary", vec![48.0, 72.0, 81.0, 52.0, 95.0, 58.0, 88.0, 61.0]))
        .unwrap()
}

fn recorder(df: &Dataset) -> DataVisualizer<RecordingBackend> {
    DataVisualizer::new(df, RecordingBackend::new())
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn projection_keeps_numeric_columns_in_order() {
    let viz = recorder(&staff());
    assert_eq!(viz.numeric_projection().names(), &["tenure".to_string(), "salary".to_string()]);
}

#[test]
fn projection_is_a_snapshot() {
    let df = employees();
    let viz = recorder(&df);
    let grown = df.with_column("bonus", vec![1.0, 2.0, 3.0]).unwrap();

    assert_eq!(viz.numeric_projection().len(), 2);
    assert_eq!(grown.ncols(), 4);
}

// ============================================================================
// Heatmap
// ============================================================================

#[test]
fn heatmap_over_employee_example() {
    let df = employees();
    let mut viz = recorder(&df);
    let m = viz.create_heatmap(&df).unwrap();

    assert_eq!(m.names(), &["age".to_string(), "salary".to_string()]);
    assert_relative_eq!(m.get(0, 0).unwrap(), 1.0);
    assert_relative_eq!(m.get(1, 1).unwrap(), 1.0);
    let expected = pearson(&[25.0, 30.0, 35.0], &[50_000.0, 60_000.0, 75_000.0]);
    assert_relative_eq!(m.get(0, 1).unwrap(), expected, epsilon = 1e-12);
    assert_relative_eq!(expected, 0.993_399, epsilon = 1e-5);
    assert_eq!(viz.backend().of_kind(ChartKind::Heatmap).count(), 1);
}

#[test]
fn heatmap_of_dataset_without_numbers_is_empty() {
    let df = Dataset::new().with_column("dept", vec!["A", "B"]).unwrap();
    let mut viz = recorder(&df);
    let m = viz.create_heatmap(&df).unwrap();

    assert!(m.is_empty());
    assert!(viz.backend().is_empty(), "nothing should be rendered for an empty projection");
}

#[test]
fn heatmap_svg_carries_annotations() {
    let df = employees();
    let mut viz = DataVisualizer::new(&df, SvgBackend::new());
    viz.create_heatmap(&df).unwrap();

    let svg = &viz.backend().documents()[0];
    assert!(svg.contains("Correlation Matrix"));
    assert!(svg.contains(">1.00<"));
    assert!(svg.contains(">0.99<"));
}

#[test]
fn heatmap_does_not_depend_on_units() {
    let df = Dataset::new()
        .with_column("a", vec![1e-6, 2e-6, 3e-6])
        .and_then(|d| d.with_column("b", vec![3e-6, 2e-6, 1e-6]))
        .unwrap();
    let mut viz = recorder(&df);
    let m = viz.create_heatmap(&df).unwrap();

    assert_relative_eq!(m.get(0, 1).unwrap(), -1.0, epsilon = 1e-12);
}

#[test]
fn heatmap_leaves_constant_pairs_undefined() {
    let df = Dataset::new()
        .with_column("age", vec![25_i64, 30, 35])
        .and_then(|d| d.with_column("grade", vec![4.0, 4.0, 4.0]))
        .unwrap();
    let mut viz = DataVisualizer::new(&df, SvgBackend::new());
    let m = viz.create_heatmap(&df).unwrap();

    assert!(m.get_by_name("age", "grade").unwrap().is_nan());
    assert_eq!(m.get_by_name("grade", "grade"), Some(1.0));
    let svg = &viz.backend().documents()[0];
    assert!(!svg.contains(">NaN<"));
    assert!(!svg.contains(">0.00<"));
}

// ============================================================================
// Histograms
// ============================================================================

#[test]
fn histplot_renders_once_per_numeric_column() {
    let df = staff();
    let mut viz = recorder(&df);
    viz.create_histplot(&df).unwrap();

    let kinds: Vec<ChartKind> = viz.backend().figures().iter().map(Figure::kind).collect();
    assert_eq!(kinds, [ChartKind::Histogram, ChartKind::Histogram]);
    assert_eq!(viz.backend().figures()[1].title, "Distribution of salary");
    assert_eq!(viz.backend().figures()[1].x_label, "salary");
}

#[test]
fn histplot_of_dataset_without_numbers_renders_nothing() {
    let df = Dataset::new().with_column("remote", vec![true, false]).unwrap();
    let mut viz = recorder(&df);
    viz.create_histplot(&df).unwrap();
    assert!(viz.backend().is_empty());
}

#[test]
fn histplot_carries_density_curve() {
    let df = staff();
    let mut viz = recorder(&df);
    viz.create_histplot(&df).unwrap();

    match &viz.backend().figures()[0].chart {
        Chart::Histogram(h) => {
            let density = h.density.as_ref().unwrap();
            assert_relative_eq!(density.integral(), 1.0, epsilon = 1e-2);
            assert_eq!(h.bins.as_ref().unwrap().total(), 8);
        }
        other => panic!("expected a histogram, got {}", other.kind()),
    }
}

// ============================================================================
// Categorical charts and hue
// ============================================================================

#[test]
fn barplot_of_employee_example() {
    let df = employees();
    let mut viz = recorder(&df);
    viz.create_barplot(&df, &ChartRequest::new("dept", "salary", "T")).unwrap();

    let fig = viz.backend().last().unwrap();
    assert_eq!(fig.title, "T");
    assert!(fig.legend.is_none());
    assert_eq!(viz.backend().len(), 1);
}

#[test]
fn no_hue_never_attaches_legend() {
    let df = staff();
    let mut viz = recorder(&df);
    let request = ChartRequest::new("dept", "salary", "Salary").hue_labels(["ignored"]);
    viz.create_barplot(&df, &request).unwrap();
    viz.create_boxplot(&df, &request).unwrap();
    viz.create_violinplot(&df, &request).unwrap();
    viz.create_scatterplot(&df, &ChartRequest::new("tenure", "salary", "Salary")).unwrap();

    assert_eq!(viz.backend().len(), 4);
    assert!(viz.backend().figures().iter().all(|f| f.legend.is_none()));
}

#[test]
fn hue_without_labels_groups_silently() {
    let df = staff();
    let mut viz = recorder(&df);
    viz.create_violinplot(&df, &ChartRequest::new("dept", "salary", "S").hue("remote")).unwrap();

    let fig = viz.backend().last().unwrap();
    assert!(fig.legend.is_none());
    match &fig.chart {
        Chart::Violin(v) => {
            assert_eq!(v.hue_levels.as_deref(), Some(&["true".to_string(), "false".to_string()][..]));
            assert_eq!(v.group_count(), 2);
        }
        other => panic!("expected a violin plot, got {}", other.kind()),
    }
}

#[test]
fn hue_with_labels_attaches_legend_in_order() {
    let df = staff();
    let mut viz = recorder(&df);
    let request = ChartRequest::new("tenure", "salary", "S").hue("dept").hue_labels(["Sales team", "Engineering"]);
    viz.create_scatterplot(&df, &request).unwrap();

    let legend = viz.backend().last().unwrap().legend.clone().unwrap();
    assert_eq!(legend.labels, ["Sales team", "Engineering"]);
    assert_eq!(legend.colors.len(), 2);
    assert_eq!(legend.position, LegendPosition::UpperRight);
}

#[test]
fn hue_label_count_must_match_levels() {
    let df = staff();
    let mut viz = recorder(&df);
    let request = ChartRequest::new("dept", "salary", "S").hue("dept").hue_labels(["a", "b", "c"]);
    let err = viz.create_barplot(&df, &request).unwrap_err();
    assert!(matches!(err, Error::HueLabelMismatch { labels: 3, categories: 2 }), "got {err}");
}

#[test]
fn missing_column_is_a_lookup_failure() {
    let df = staff();
    let mut viz = DataVisualizer::new(&df, NullBackend);
    for request in [ChartRequest::new("nope", "salary", "T"), ChartRequest::new("dept", "nope", "T")] {
        assert!(matches!(viz.create_barplot(&df, &request), Err(Error::ColumnNotFound { .. })));
        assert!(matches!(viz.create_boxplot(&df, &request), Err(Error::ColumnNotFound { .. })));
        assert!(matches!(viz.create_violinplot(&df, &request), Err(Error::ColumnNotFound { .. })));
        assert!(matches!(viz.create_scatterplot(&df, &request), Err(Error::ColumnNotFound { .. })));
    }
}

#[test]
fn scatter_of_timestamps_draws_every_point() {
    let df = Dataset::new()
        .with_column("t", vec![1.7e9, 1.7e9 + 5.0, 1.7e9 + 10.0])
        .and_then(|d| d.with_column("v", vec![1.0, 2.0, 3.0]))
        .unwrap();
    let mut viz = DataVisualizer::new(&df, SvgBackend::new());
    viz.create_scatterplot(&df, &ChartRequest::new("t", "v", "Over time")).unwrap();

    let svg = &viz.backend().documents()[0];
    assert_eq!(svg.matches("<circle").count(), 3);
}

#[test]
fn scatter_of_tiny_values_draws_every_point() {
    let df = Dataset::new()
        .with_column("x", vec![1e-8, 2e-8, 3e-8])
        .and_then(|d| d.with_column("y", vec![3e-8, 1e-8, 2e-8]))
        .unwrap();
    let mut viz = DataVisualizer::new(&df, SvgBackend::new());
    viz.create_scatterplot(&df, &ChartRequest::new("x", "y", "Tiny")).unwrap();

    assert_eq!(viz.backend().documents()[0].matches("<circle").count(), 3);
}

// ============================================================================
// Backends
// ============================================================================

#[test]
fn svg_backend_writes_every_chart() {
    let dir = TempDir::new().unwrap();
    let df = staff();
    let mut viz = DataVisualizer::new(&df, SvgBackend::new().output_dir(dir.path()));

    viz.create_heatmap(&df).unwrap();
    viz.create_histplot(&df).unwrap();
    let request = ChartRequest::new("dept", "salary", "Salary by dept").hue("remote").hue_labels(["remote", "office"]);
    viz.create_barplot(&df, &request).unwrap();
    viz.create_boxplot(&df, &request).unwrap();
    viz.create_violinplot(&df, &request).unwrap();
    viz.create_scatterplot(&df, &ChartRequest::new("tenure", "salary", "Tenure")).unwrap();

    let written = viz.backend().written();
    assert_eq!(written.len(), 7);
    assert!(written.iter().all(|p| p.exists()));
    let bar = std::fs::read_to_string(&written[3]).unwrap();
    assert!(bar.contains("Salary by dept"));
    assert!(bar.contains("office"));
}

#[test]
fn png_backend_uses_configured_dpi() {
    let dir = TempDir::new().unwrap();
    let df = employees();
    let config = VisualizerConfig::default().dpi(20);
    let mut viz = DataVisualizer::new(&df, PngBackend::new(dir.path())).with_config(config);
    viz.create_histplot(&df).unwrap();

    let written = viz.backend().written();
    assert_eq!(written.len(), 2);
    let bytes = std::fs::read(&written[0]).unwrap();
    // IHDR width and height follow the 8-byte signature and chunk header
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    assert_eq!(width, 40);
}

#[test]
fn borrowed_backend_stays_with_caller() {
    let df = employees();
    let mut recorder = RecordingBackend::new();
    {
        let mut viz = DataVisualizer::new(&df, &mut recorder);
        viz.create_histplot(&df).unwrap();
    }
    assert_eq!(recorder.len(), 2);
}

// ============================================================================
// Properties
// ============================================================================

fn numeric_column() -> impl Strategy<Value = ColumnData> {
    prop_oneof![
        prop::collection::vec(-1000_i64..1000, 6).prop_map(ColumnData::Int),
        prop::collection::vec(-1e3..1e3_f64, 6).prop_map(ColumnData::Float),
    ]
}

fn any_column() -> impl Strategy<Value = ColumnData> {
    prop_oneof![
        numeric_column(),
        prop::collection::vec(any::<bool>(), 6).prop_map(ColumnData::Bool),
        prop::collection::vec("[a-c]", 6).prop_map(ColumnData::Categorical),
    ]
}

fn dataset_of(columns: Vec<ColumnData>) -> Dataset {
    columns.into_iter().enumerate().fold(Dataset::new(), |df, (i, data)| df.with_column(format!("c{i}"), data).unwrap())
}

proptest! {
    #[test]
    fn prop_projection_matches_numeric_columns(columns in prop::collection::vec(any_column(), 0..6)) {
        let expected: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.data_type().is_numeric())
            .map(|(i, _)| format!("c{i}"))
            .collect();
        let df = dataset_of(columns);
        let viz = DataVisualizer::new(&df, NullBackend);
        prop_assert_eq!(viz.numeric_projection().names(), expected.as_slice());
    }

    #[test]
    fn prop_heatmap_is_square_symmetric_unit_diagonal(columns in prop::collection::vec(numeric_column(), 1..5)) {
        let k = columns.len();
        let df = dataset_of(columns);
        let mut viz = DataVisualizer::new(&df, NullBackend);
        let m = viz.create_heatmap(&df).unwrap();

        prop_assert_eq!(m.len(), k);
        prop_assert!(m.is_symmetric(1e-12));
        for i in 0..k {
            prop_assert!((m.get(i, i).unwrap() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_histplot_renders_once_per_numeric_column(columns in prop::collection::vec(any_column(), 0..6)) {
        let numeric = columns.iter().filter(|c| c.data_type().is_numeric()).count();
        let df = dataset_of(columns);
        let mut viz = DataVisualizer::new(&df, RecordingBackend::new());
        viz.create_histplot(&df).unwrap();
        prop_assert_eq!(viz.backend().len(), numeric);
    }
}
