//! Tests for the fixed-step oscillator integrator

use dampsim_core::tests::test_helpers::{approx_eq, underdamped_position};
use dampsim_core::{Integrator, Method, OscillatorParameters, SimulationConfig};
use glam::DVec2;

#[test]
fn test_trajectory_length_and_initial_sample() {
    let integrator = Integrator::default();
    let n = SimulationConfig::default().steps();
    assert_eq!(n, 1000);

    for d in [3.0, -2.5, 0.02, 7.0] {
        let trajectory = integrator.simulate(d, 0.0).expect("nonzero displacement");
        assert_eq!(trajectory.len(), n);
        assert_eq!(trajectory.initial().position, d);
        assert_eq!(trajectory.initial().velocity, 0.0);
    }
}

#[test]
fn test_zero_displacement_is_empty() {
    let integrator = Integrator::default();
    for v in [0.0, 1.0, -4.0, 1e6] {
        assert!(integrator.simulate(0.0, v).is_none(), "simulate(0, {}) should be empty", v);
    }
    assert!(integrator.simulate(-0.0, 0.0).is_none());
}

#[test]
fn test_nonzero_initial_velocity_is_kept() {
    let integrator = Integrator::default();
    let trajectory = integrator.simulate(1.0, 2.0).unwrap();
    assert_eq!(trajectory.initial().velocity, 2.0);
}

#[test]
fn test_first_euler_step() {
    let params = OscillatorParameters::default();
    let integrator = Integrator::default();
    let trajectory = integrator.simulate(3.0, 0.0).unwrap();

    let w = params.natural_frequency();
    let dt = SimulationConfig::default().dt();
    // x1 = x0 + dt * (v0, -w^2 x0 - 2 z w v0)
    let expected_velocity = dt * (-w * w * 3.0);
    let s1 = trajectory.sample(1);
    assert!(approx_eq(s1.position, 3.0, 1e-15));
    assert!(approx_eq(s1.velocity, expected_velocity, 1e-12));
}

#[test]
fn test_steps_follow_update_rule() {
    let integrator = Integrator::default();
    let trajectory = integrator.simulate(1.5, -0.5).unwrap();
    let dt = trajectory.dt();

    for k in [0, 1, 100, 998] {
        let next = integrator.step(trajectory.sample(k).to_vec(), dt);
        assert_eq!(next, trajectory.sample(k + 1).to_vec());
    }
}

#[test]
fn test_system_matrix() {
    let params = OscillatorParameters::new(0.5, 2.0).unwrap();
    let a = params.system_matrix();
    let x = DVec2::new(1.0, 1.0);
    // (v, -w^2 x - 2 z w v) = (1, -4 - 2)
    assert_eq!(a * x, DVec2::new(1.0, -6.0));
}

#[test]
fn test_determinism() {
    let integrator = Integrator::default();
    let first = integrator.simulate(3.0, 0.0).unwrap();
    let second = integrator.simulate(3.0, 0.0).unwrap();
    assert_eq!(first, second, "same inputs should give bit-identical trajectories");

    let rk4 = Integrator::with_method(
        OscillatorParameters::default(),
        SimulationConfig::default(),
        Method::Rk4,
    );
    assert_eq!(rk4.simulate(-2.0, 0.5), rk4.simulate(-2.0, 0.5));
}

#[test]
fn test_amplitude_decays() {
    let integrator = Integrator::default();
    for d in [3.0, -3.0, 0.5, 6.0] {
        let trajectory = integrator.simulate(d, 0.0).unwrap();
        assert!(
            trajectory.last().position.abs() < trajectory.initial().position.abs(),
            "final position {} should be smaller than initial {}",
            trajectory.last().position,
            d
        );
    }
}

#[test]
fn test_undamped_euler_gains_energy() {
    // forward Euler is unstable for a pure oscillator; nothing catches it
    let params = OscillatorParameters::new(0.0, 2.0 * std::f64::consts::PI).unwrap();
    let integrator = Integrator::new(params, SimulationConfig::default());
    let trajectory = integrator.simulate(1.0, 0.0).unwrap();
    let peak = trajectory
        .iter()
        .skip(900)
        .map(|s| s.position.abs())
        .fold(0.0, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn test_rk4_tracks_analytic_solution() {
    let params = OscillatorParameters::default();
    let config = SimulationConfig::default();
    let euler = Integrator::with_method(params, config, Method::ForwardEuler);
    let rk4 = Integrator::with_method(params, config, Method::Rk4);

    let d = 2.0;
    let euler_traj = euler.simulate(d, 0.0).unwrap();
    let rk4_traj = rk4.simulate(d, 0.0).unwrap();
    assert_eq!(rk4_traj.len(), euler_traj.len());

    let k = 100;
    let exact = underdamped_position(
        d,
        params.damping_ratio(),
        params.natural_frequency(),
        rk4_traj.time_at(k),
    );
    let euler_err = (euler_traj.sample(k).position - exact).abs();
    let rk4_err = (rk4_traj.sample(k).position - exact).abs();

    assert!(rk4_err < 1e-4, "rk4 error {} too large", rk4_err);
    assert!(rk4_err < euler_err);
}

#[test]
fn test_custom_horizon_step_count() {
    let config = SimulationConfig::new(0.1, 2.0).unwrap();
    let integrator = Integrator::new(OscillatorParameters::default(), config);
    assert_eq!(integrator.simulate(1.0, 0.0).unwrap().len(), config.steps());

    let single = SimulationConfig::new(0.5, 0.5).unwrap();
    let integrator = Integrator::new(OscillatorParameters::default(), single);
    let trajectory = integrator.simulate(1.0, 0.0).unwrap();
    assert_eq!(trajectory.len(), 1);
    assert_eq!(trajectory.last().position, 1.0);
}
