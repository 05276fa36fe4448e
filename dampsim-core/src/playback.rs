//! Playback state machine
//!
//! The controller owns the cursor into the current trajectory and moves it
//! one index per call to [`PlaybackController::advance`]. It never holds the
//! trajectory itself; the caller lends it on every tick.

use crate::trajectory::{StateSample, Trajectory};
use tracing::{debug, info};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleReason {
    /// The freshly advanced sample had negligible velocity
    NegligibleVelocity,
    /// The cursor reached the final sample
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// The user is dragging the mass
    Editing,
    Running,
    Settled(SettleReason),
    /// Quit was requested; no further transitions
    Terminated,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// The cursor moved and this sample should be rendered
    Sample(StateSample),
    /// Running, but the cursor was already on the last sample
    Exhausted,
    /// Not running; the renderer shows the resting mass
    Inactive,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    cursor: usize,
    settle_threshold: f64,
}

impl PlaybackController {
    pub fn new(settle_threshold: f64) -> Self {
        Self {
            state: PlaybackState::Idle,
            cursor: 0,
            settle_threshold,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, PlaybackState::Settled(_))
    }

    pub fn is_editing(&self) -> bool {
        self.state == PlaybackState::Editing
    }

    pub fn is_terminated(&self) -> bool {
        self.state == PlaybackState::Terminated
    }

    /// Enter `Editing` from `Idle` or `Settled`. Returns false if ignored.
    pub fn begin_edit(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle | PlaybackState::Settled(_) => {
                self.state = PlaybackState::Editing;
                self.cursor = 0;
                true
            }
            _ => false,
        }
    }

    /// Leave `Editing` with the result of the release
    ///
    /// `Some` starts a run at cursor 0; `None` (nothing was simulated) falls
    /// back to `Idle`. Ignored outside `Editing`.
    pub fn commit(&mut self, trajectory: Option<&Trajectory>) -> bool {
        if self.state != PlaybackState::Editing {
            return false;
        }
        self.cursor = 0;
        match trajectory {
            Some(trajectory) => {
                debug!(samples = trajectory.len(), "playback started");
                self.state = PlaybackState::Running;
            }
            None => {
                self.state = PlaybackState::Idle;
            }
        }
        true
    }

    /// One tick of playback against `trajectory`
    ///
    /// While running this moves the cursor by one and returns the new sample,
    /// settling on the same tick if that sample is at rest or is the last
    /// one. A settled controller drops back to `Idle` on its next tick.
    pub fn advance(&mut self, trajectory: &Trajectory) -> Advance {
        match self.state {
            PlaybackState::Running => {}
            PlaybackState::Settled(_) => {
                self.state = PlaybackState::Idle;
                self.cursor = 0;
                return Advance::Inactive;
            }
            _ => return Advance::Inactive,
        }

        let last = trajectory.last_index();
        if self.cursor >= last {
            info!(step = self.cursor, "trajectory exhausted");
            self.state = PlaybackState::Settled(SettleReason::Exhausted);
            return Advance::Exhausted;
        }

        self.cursor += 1;
        let sample = trajectory.sample(self.cursor);

        if sample.velocity.abs() < self.settle_threshold {
            info!(step = self.cursor, "negligible velocity reached, terminating");
            self.state = PlaybackState::Settled(SettleReason::NegligibleVelocity);
        } else if self.cursor == last {
            info!(step = self.cursor, "trajectory exhausted");
            self.state = PlaybackState::Settled(SettleReason::Exhausted);
        }

        Advance::Sample(sample)
    }

    /// Move to `Terminated` from any state
    pub fn quit(&mut self) {
        self.state = PlaybackState::Terminated;
        self.cursor = 0;
    }
}
