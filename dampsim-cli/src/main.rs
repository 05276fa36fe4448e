mod spring_app;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dampsim_core::{
    Integrator, Method, OscillatorParameters, PlaybackConfig, PngPlot, SimulationConfig,
    SimulationSession,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dampsim")]
#[command(about = "Interactive damped harmonic oscillator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive window (default)
    Window {
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Release the mass once without a display and report the outcome
    Run {
        /// Initial displacement from equilibrium, in simulation units
        #[arg(short, long, allow_hyphen_values = true)]
        displacement: f64,

        /// Initial velocity
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        velocity: f64,

        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Euler,
    Rk4,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Euler => Method::ForwardEuler,
            MethodArg::Rk4 => Method::Rk4,
        }
    }
}

/// Overrides shared by every subcommand
#[derive(Args, Clone)]
struct SimArgs {
    /// Damping ratio
    #[arg(long, default_value_t = OscillatorParameters::DEFAULT_DAMPING_RATIO)]
    damping_ratio: f64,

    /// Natural frequency in rad/s
    #[arg(long, default_value_t = OscillatorParameters::DEFAULT_NATURAL_FREQUENCY)]
    natural_frequency: f64,

    /// Integration time step
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_DT)]
    dt: f64,

    /// Simulated time per release
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_HORIZON)]
    horizon: f64,

    /// Update rule
    #[arg(long, value_enum, default_value_t = MethodArg::Euler)]
    method: MethodArg,

    /// Where the trajectory plot is written on each release
    #[arg(long, default_value = PngPlot::DEFAULT_PATH)]
    plot: PathBuf,

    /// Skip writing the plot image
    #[arg(long)]
    no_plot: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            damping_ratio: OscillatorParameters::DEFAULT_DAMPING_RATIO,
            natural_frequency: OscillatorParameters::DEFAULT_NATURAL_FREQUENCY,
            dt: SimulationConfig::DEFAULT_DT,
            horizon: SimulationConfig::DEFAULT_HORIZON,
            method: MethodArg::Euler,
            plot: PathBuf::from(PngPlot::DEFAULT_PATH),
            no_plot: false,
        }
    }
}

impl SimArgs {
    fn build_session(&self) -> Result<SimulationSession, Box<dyn std::error::Error>> {
        let params = OscillatorParameters::new(self.damping_ratio, self.natural_frequency)?;
        let config = SimulationConfig::new(self.dt, self.horizon)?;
        let integrator = Integrator::with_method(params, config, self.method.into());
        let session = SimulationSession::new(integrator, PlaybackConfig::default());
        if self.no_plot {
            Ok(session)
        } else {
            Ok(session.with_plot(PngPlot::new(&self.plot)))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Window { sim }) => run_window(&sim),
        Some(Commands::Run {
            displacement,
            velocity,
            sim,
        }) => run_headless(displacement, velocity, &sim),
        None => run_window(&SimArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_window(sim: &SimArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = sim.build_session()?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1350.0, 900.0])
            .with_title("dampsim"),
        ..Default::default()
    };
    eframe::run_native(
        "dampsim",
        options,
        Box::new(|_cc| Ok(Box::new(spring_app::SpringApp::new(session)))),
    )?;
    Ok(())
}

fn run_headless(
    displacement: f64,
    velocity: f64,
    sim: &SimArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = sim.build_session()?;
    session.on_drag_start();
    if !session.on_release_initial_condition(displacement, velocity) {
        println!("nothing to simulate");
        return Ok(());
    }

    let mut ticks = 0usize;
    while session.is_running() {
        session.on_tick();
        ticks += 1;
    }

    let state = session.state();
    let sample = session.current_sample();
    println!("state = {:?}", state);
    println!("ticks = {}", ticks);
    if let (Some(sample), Some(trajectory)) = (sample, session.trajectory()) {
        println!("time = {:.2}", trajectory.time_at(session.cursor()));
        println!("position = {:.6}", sample.position);
        println!("velocity = {:.6}", sample.velocity);
    }
    if !sim.no_plot {
        println!("plot = {}", sim.plot.display());
    }

    Ok(())
}
