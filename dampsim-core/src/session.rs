use crate::integrator::Integrator;
use crate::params::PlaybackConfig;
use crate::playback::{Advance, PlaybackController, PlaybackState};
use crate::plot::{NoPlot, PlotSink};
use crate::trajectory::{StateSample, Trajectory};
use tracing::{info, warn};

/// Everything one interactive run needs, owned in one place
///
/// The front end feeds pointer events and ticks in, and reads the render
/// position and mode flags back out between ticks.
pub struct SimulationSession {
    integrator: Integrator,
    playback: PlaybackConfig,
    controller: PlaybackController,
    trajectory: Option<Trajectory>,
    plot: Box<dyn PlotSink>,
    /// Where the mass sits when no sample is being played
    resting_displacement: f64,
}

impl SimulationSession {
    pub fn new(integrator: Integrator, playback: PlaybackConfig) -> Self {
        Self {
            integrator,
            playback,
            controller: PlaybackController::new(playback.settle_threshold()),
            trajectory: None,
            plot: Box::new(NoPlot),
            resting_displacement: 0.0,
        }
    }

    pub fn with_plot(mut self, plot: impl PlotSink + 'static) -> Self {
        self.plot = Box::new(plot);
        self
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn playback_config(&self) -> &PlaybackConfig {
        &self.playback
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn cursor(&self) -> usize {
        self.controller.cursor()
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn is_settled(&self) -> bool {
        self.controller.is_settled()
    }

    pub fn is_editing(&self) -> bool {
        self.controller.is_editing()
    }

    pub fn is_terminated(&self) -> bool {
        self.controller.is_terminated()
    }

    /// Displacement of the mass from equilibrium, in simulation units
    pub fn current_displacement(&self) -> f64 {
        match (&self.trajectory, self.controller.state()) {
            (Some(trajectory), PlaybackState::Running | PlaybackState::Settled(_)) => {
                trajectory.sample(self.controller.cursor()).position
            }
            _ => self.resting_displacement,
        }
    }

    /// Horizontal offset of the mass in display units
    pub fn current_render_position(&self) -> f64 {
        self.current_displacement() * self.playback.display_scale()
    }

    /// Sample under the cursor while a run is being shown
    pub fn current_sample(&self) -> Option<StateSample> {
        match self.controller.state() {
            PlaybackState::Running | PlaybackState::Settled(_) => self
                .trajectory
                .as_ref()
                .map(|t| t.sample(self.controller.cursor())),
            _ => None,
        }
    }

    /// Pointer grabbed the mass
    pub fn on_drag_start(&mut self) -> bool {
        let displacement = self.current_displacement();
        let started = self.controller.begin_edit();
        if started {
            self.resting_displacement = displacement;
        }
        started
    }

    /// Pointer moved the mass to `displacement` while dragging
    pub fn on_drag(&mut self, displacement: f64) {
        if self.controller.is_editing() {
            self.resting_displacement = displacement;
        }
    }

    /// Pointer let go: simulate from the committed condition and start playback
    ///
    /// Returns true if a run started. Ignored unless the mass is being
    /// dragged.
    pub fn on_release_initial_condition(&mut self, displacement: f64, velocity: f64) -> bool {
        if !self.controller.is_editing() {
            return false;
        }
        self.resting_displacement = displacement;
        info!(displacement, velocity, "initial condition");

        let trajectory = self.integrator.simulate(displacement, velocity);
        if let Some(ref trajectory) = trajectory {
            if let Err(e) = self.plot.write(trajectory, displacement) {
                warn!("{}", e);
            }
        }

        self.controller.commit(trajectory.as_ref());
        if trajectory.is_some() {
            self.trajectory = trajectory;
        }
        self.controller.is_running()
    }

    /// One rendering tick; returns the sample to draw, if any
    pub fn on_tick(&mut self) -> Option<StateSample> {
        let trajectory = self.trajectory.as_ref()?;
        if self.controller.is_settled() {
            // the mass stays where the run left it
            self.resting_displacement = trajectory.sample(self.controller.cursor()).position;
        }
        match self.controller.advance(trajectory) {
            Advance::Sample(sample) => Some(sample),
            Advance::Exhausted | Advance::Inactive => None,
        }
    }

    /// Stop for good, leaving the mass where it was last shown
    pub fn quit(&mut self) {
        self.resting_displacement = self.current_displacement();
        self.controller.quit();
    }
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::new(Integrator::default(), PlaybackConfig::default())
    }
}
