//! Test helper utilities for dampsim tests

use crate::plot::{PlotError, PlotSink};
use crate::trajectory::{StateSample, Trajectory};
use std::cell::RefCell;
use std::rc::Rc;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Build a trajectory with constant position and the given velocities
pub fn trajectory_from_velocities(velocities: &[f64], dt: f64) -> Trajectory {
    let samples = velocities
        .iter()
        .map(|&v| StateSample::new(1.0, v))
        .collect();
    Trajectory::from_samples(samples, dt)
}

/// Trajectory of `len` samples whose first negligible velocity is at `settle_at`
///
/// Every other sample moves at unit speed.
pub fn trajectory_settling_at(len: usize, settle_at: usize) -> Trajectory {
    let velocities: Vec<f64> = (0..len)
        .map(|k| if k == settle_at { 1e-6 } else { 1.0 })
        .collect();
    trajectory_from_velocities(&velocities, 0.01)
}

/// Trajectory of `len` samples that never drops below the settle threshold
pub fn trajectory_never_settling(len: usize) -> Trajectory {
    trajectory_from_velocities(&vec![1.0; len], 0.01)
}

/// Analytic position of the underdamped oscillator released from rest at `x0`
pub fn underdamped_position(x0: f64, zeta: f64, omega: f64, t: f64) -> f64 {
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let decay = (-zeta * omega * t).exp();
    x0 * decay * ((omega_d * t).cos() + zeta * omega / omega_d * (omega_d * t).sin())
}

/// Plot sink that remembers every trajectory it was handed
#[derive(Debug, Default, Clone)]
pub struct RecordingPlot {
    pub writes: Rc<RefCell<Vec<(Trajectory, f64)>>>,
}

impl RecordingPlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl PlotSink for RecordingPlot {
    fn write(&mut self, trajectory: &Trajectory, displacement: f64) -> Result<(), PlotError> {
        self.writes
            .borrow_mut()
            .push((trajectory.clone(), displacement));
        Ok(())
    }
}

/// Plot sink that always fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingPlot;

impl PlotSink for FailingPlot {
    fn write(&mut self, _trajectory: &Trajectory, _displacement: f64) -> Result<(), PlotError> {
        Err(PlotError::Drawing {
            path: "unwritable.png".into(),
            message: "refused".to_string(),
        })
    }
}
