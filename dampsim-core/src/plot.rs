//! Static plot of a finished trajectory
//!
//! Position against time on the left, the phase portrait (position against
//! velocity) on the right, written as one PNG that each run overwrites.
//! Both panels carry a frame and their zero axes but no labels.

use crate::trajectory::Trajectory;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to draw plot to {}: {}", .path.display(), .message)]
    Drawing { path: PathBuf, message: String },
}

/// Receives every trajectory the session produces
pub trait PlotSink {
    fn write(&mut self, trajectory: &Trajectory, displacement: f64) -> Result<(), PlotError>;
}

/// Discards trajectories
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlot;

impl PlotSink for NoPlot {
    fn write(&mut self, _trajectory: &Trajectory, _displacement: f64) -> Result<(), PlotError> {
        Ok(())
    }
}

/// Renders trajectories to a PNG at a fixed path
#[derive(Debug, Clone)]
pub struct PngPlot {
    path: PathBuf,
    size: (u32, u32),
}

impl PngPlot {
    pub const DEFAULT_PATH: &'static str = "graphs.png";
    pub const DEFAULT_SIZE: (u32, u32) = (2000, 400);

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: Self::DEFAULT_SIZE,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn drawing_error(&self, err: impl std::fmt::Display) -> PlotError {
        PlotError::Drawing {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl Default for PngPlot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl PlotSink for PngPlot {
    fn write(&mut self, trajectory: &Trajectory, displacement: f64) -> Result<(), PlotError> {
        let drawn = panic::catch_unwind(AssertUnwindSafe(|| {
            render_png(&self.path, self.size, trajectory).map_err(|e| e.to_string())
        }));
        match drawn {
            Ok(Ok(())) => {}
            Ok(Err(message)) => return Err(self.drawing_error(message)),
            Err(_) => return Err(self.drawing_error("plot backend panicked")),
        }
        debug!(
            path = %self.path.display(),
            displacement,
            "plot written"
        );
        Ok(())
    }
}

/// Padded (min, max) of a series, never degenerate
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = 0.05 * (hi - lo).abs().max(1e-9);
    (lo - pad, hi + pad)
}

/// Frame the plotting area and draw the zero axes that fall inside it
fn draw_frame<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x: (f64, f64),
    y: (f64, f64),
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let border = [(x.0, y.0), (x.1, y.0), (x.1, y.1), (x.0, y.1), (x.0, y.0)];
    chart.draw_series(LineSeries::new(border, &BLACK))?;
    let axis = RGBColor(160, 160, 160);
    if y.0 < 0.0 && y.1 > 0.0 {
        chart.draw_series(LineSeries::new([(x.0, 0.0), (x.1, 0.0)], &axis))?;
    }
    if x.0 < 0.0 && x.1 > 0.0 {
        chart.draw_series(LineSeries::new([(0.0, y.0), (0.0, y.1)], &axis))?;
    }
    Ok(())
}

// No text is drawn: plotters is built without a font backend.
fn render_png(
    path: &Path,
    size: (u32, u32),
    trajectory: &Trajectory,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally((size.0 / 2) as i32);

    let t_end = trajectory.time_at(trajectory.last_index()).max(trajectory.dt());
    let (x_lo, x_hi) = bounds(trajectory.iter().map(|s| s.position));
    let (v_lo, v_hi) = bounds(trajectory.iter().map(|s| s.velocity));

    let mut chart = ChartBuilder::on(&left)
        .margin(20)
        .build_cartesian_2d(0.0..t_end, x_lo..x_hi)?;
    draw_frame(&mut chart, (0.0, t_end), (x_lo, x_hi))?;
    chart.draw_series(LineSeries::new(trajectory.position_series(), &BLACK))?;

    let mut phase = ChartBuilder::on(&right)
        .margin(20)
        .build_cartesian_2d(x_lo..x_hi, v_lo..v_hi)?;
    draw_frame(&mut phase, (x_lo, x_hi), (v_lo, v_hi))?;
    phase.draw_series(LineSeries::new(trajectory.phase_series(), &BLACK))?;

    root.present()?;
    Ok(())
}
