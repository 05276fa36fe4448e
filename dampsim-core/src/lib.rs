pub mod integrator;
pub mod params;
pub mod playback;
pub mod plot;
pub mod session;
pub mod trajectory;

pub use integrator::{Integrator, Method};
pub use params::{ConfigError, OscillatorParameters, PlaybackConfig, SimulationConfig};
pub use playback::{Advance, PlaybackController, PlaybackState, SettleReason};
pub use plot::{NoPlot, PlotError, PlotSink, PngPlot};
pub use session::SimulationSession;
pub use trajectory::{StateSample, Trajectory};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
