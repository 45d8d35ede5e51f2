//! Employee Report Example
//!
//! Renders every chart type for a small employee dataset: a correlation heatmap
//! (printed and drawn in the terminal), per-column histograms, and bar, scatter, box and
//! violin plots grouped by department. SVG files land in `employee_report/`.
//!
//! Run with: `RUST_LOG=info cargo run --example employee_report`

use trueno_dataviz::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Employee Report Example");
    println!("=======================\n");

    // Step 1: Build the dataset
    println!("Step 1: Building dataset...");
    let df = employees()?;
    println!("  {} rows, columns {:?}", df.nrows(), df.column_names());

    // Step 2: Correlation heatmap in the terminal
    println!("\nStep 2: Correlation heatmap...");
    let terminal = TerminalBackend::stdout().mode(TerminalMode::UnicodeHalfBlock).width(60);
    let mut viz = DataVisualizer::new(&df, terminal);
    let corr = viz.create_heatmap(&df)?;

    print!("{:>8}", "");
    for name in corr.names() {
        print!("{name:>8}");
    }
    println!();
    for (i, name) in corr.names().iter().enumerate() {
        print!("{name:>8}");
        for value in corr.row(i).unwrap_or_default() {
            print!("{value:>8.2}");
        }
        println!();
    }
    for (a, b, r) in corr.strongest_pairs(3) {
        println!("  {a} ~ {b}: {r:+.3}");
    }

    // Step 3: Every chart as SVG
    println!("\nStep 3: Writing SVG charts...");
    let config = VisualizerConfig::default().legend_title("Department");
    let mut viz = DataVisualizer::new(&df, SvgBackend::new().output_dir("employee_report")).with_config(config);

    viz.create_histplot(&df)?;
    let by_dept = ChartRequest::new("dept", "salary", "Salary by department");
    viz.create_barplot(&df, &by_dept)?;
    viz.create_boxplot(&df, &by_dept)?;

    let grouped = ChartRequest::new("remote", "salary", "Salary by remote status")
        .hue("dept")
        .hue_labels(["Engineering", "Sales", "Operations"]);
    viz.create_violinplot(&df, &grouped)?;
    viz.create_scatterplot(&df, &ChartRequest::new("age", "salary", "Salary vs age").hue("dept").hue_labels(["Engineering", "Sales", "Operations"]))?;

    for path in viz.backend().written() {
        println!("  Saved to: {}", path.display());
    }

    println!("\nReport successfully generated!");
    Ok(())
}

/// A dozen employees across three departments.
fn employees() -> Result<Dataset> {
    Dataset::new()
        .with_column("age", vec![25_i64, 31, 35, 42, 28, 39, 45, 51, 23, 33, 37, 48])?
        .with_column(
            "salary",
            vec![52_000.0, 61_000.0, 75_000.0, 88_000.0, 48_000.0, 66_000.0, 71_000.0, 93_000.0, 41_000.0, 58_000.0, 63_000.0, 79_000.0],
        )?
        .with_column("tenure", vec![1.5, 4.0, 6.5, 12.0, 2.0, 8.0, 10.5, 20.0, 0.5, 5.0, 7.0, 15.0])?
        .with_column(
            "dept",
            vec!["Eng", "Eng", "Eng", "Eng", "Sales", "Sales", "Sales", "Sales", "Ops", "Ops", "Ops", "Ops"],
        )?
        .with_column("remote", vec![true, false, true, false, false, true, false, true, true, false, true, false])
}
