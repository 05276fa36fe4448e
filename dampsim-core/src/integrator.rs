use crate::params::{OscillatorParameters, SimulationConfig};
use crate::trajectory::{StateSample, Trajectory};
use glam::{DMat2, DVec2};
use tracing::{debug, info};

/// Fixed-step update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// x[k+1] = x[k] + dt * A x[k]
    #[default]
    ForwardEuler,
    /// Classic fourth-order Runge-Kutta with the same dt
    Rk4,
}

/// Integrates x' = A x for the damped oscillator over a fixed horizon
#[derive(Debug, Clone)]
pub struct Integrator {
    params: OscillatorParameters,
    config: SimulationConfig,
    method: Method,
    system: DMat2,
}

impl Integrator {
    pub fn new(params: OscillatorParameters, config: SimulationConfig) -> Self {
        Self::with_method(params, config, Method::default())
    }

    pub fn with_method(params: OscillatorParameters, config: SimulationConfig, method: Method) -> Self {
        Self {
            params,
            config,
            method,
            system: params.system_matrix(),
        }
    }

    pub fn params(&self) -> &OscillatorParameters {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Run one simulation from the given initial condition
    ///
    /// Returns `None` when `displacement` is zero: a mass released at
    /// equilibrium has nothing to simulate. Otherwise the trajectory holds
    /// exactly `config.steps()` samples, the first being the initial
    /// condition itself.
    pub fn simulate(&self, displacement: f64, velocity: f64) -> Option<Trajectory> {
        if displacement == 0.0 {
            info!("no displacement, nothing to simulate");
            return None;
        }

        let n = self.config.steps();
        let dt = self.config.dt();
        let mut samples = Vec::with_capacity(n);
        let mut x = DVec2::new(displacement, velocity);
        samples.push(StateSample::from(x));

        for _ in 1..n {
            x = self.step(x, dt);
            samples.push(StateSample::from(x));
        }

        debug!(
            steps = n,
            method = ?self.method,
            final_position = x.x,
            final_velocity = x.y,
            "trajectory integrated"
        );

        Some(Trajectory::from_samples(samples, dt))
    }

    /// Advance a state by one step of size `dt`
    pub fn step(&self, x: DVec2, dt: f64) -> DVec2 {
        let a = self.system;
        match self.method {
            Method::ForwardEuler => x + dt * (a * x),
            Method::Rk4 => {
                let k1 = a * x;
                let k2 = a * (x + 0.5 * dt * k1);
                let k3 = a * (x + 0.5 * dt * k2);
                let k4 = a * (x + dt * k3);
                x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
            }
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(OscillatorParameters::default(), SimulationConfig::default())
    }
}
