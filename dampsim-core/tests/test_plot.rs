//! Tests for the PNG trajectory plot

use dampsim_core::{Integrator, PlotSink, PngPlot};
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("dampsim-{}-{}.png", name, std::process::id()));
    path
}

#[test]
fn test_png_written_and_overwritten() {
    let path = scratch_path("overwrite");
    let _ = std::fs::remove_file(&path);
    let mut plot = PngPlot::new(&path).with_size(800, 240);
    let integrator = Integrator::default();

    let first = integrator.simulate(3.0, 0.0).unwrap();
    plot.write(&first, 3.0).expect("first plot");
    assert!(path.exists());

    let second = integrator.simulate(-1.0, 0.0).unwrap();
    plot.write(&second, -1.0).expect("second plot");
    let bytes = std::fs::read(&path).expect("plot file readable");
    assert_eq!(&bytes[1..4], b"PNG");

    // default size, as the binary uses it
    let mut full = PngPlot::new(&path);
    full.write(&second, -1.0).expect("default-size plot");
    assert!(path.exists());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unwritable_path_is_an_error() {
    let mut path = scratch_path("missing-dir");
    path.set_extension("");
    path.push("nested");
    path.push("graphs.png");
    let mut plot = PngPlot::new(&path).with_size(400, 200);
    let trajectory = Integrator::default().simulate(1.0, 0.0).unwrap();

    let err = plot.write(&trajectory, 1.0).unwrap_err();
    assert!(err.to_string().contains("graphs.png"));
}
