//! Interactive mass-spring-damper window
//!
//! Drag the mass sideways and let go to release it. The session plays the
//! resulting trajectory back one sample per tick while the bottom panel
//! plots position and velocity against time.

use dampsim_core::{PlaybackState, SettleReason, SimulationSession};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};
use std::time::{Duration, Instant};

/// Playback ticks per second
const TICK_RATE: f64 = 60.0;
/// Upper bound on ticks replayed in one frame after a stall
const MAX_TICKS_PER_FRAME: u32 = 4;

// Scene layout in display units
const SCENE_WIDTH: f32 = 900.0;
const SCENE_HEIGHT: f32 = 600.0;
const WALL_X: f32 = 300.0;
const MASS_ZERO: f32 = 600.0;
const MASS_SIZE: f32 = 50.0;

const WALL_COLOR: egui::Color32 = egui::Color32::from_rgb(254, 0, 0);
const ORIGIN_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 200);
const SPRING_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 200, 200);
/// Mass can be grabbed
const IDLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
/// Mass is being simulated
const RUNNING_COLOR: egui::Color32 = egui::Color32::from_rgb(75, 0, 130);

/// Maps scene coordinates onto the canvas, preserving aspect ratio
struct SceneTransform {
    origin: egui::Pos2,
    scale: f32,
}

impl SceneTransform {
    fn fit(rect: egui::Rect) -> Self {
        let scale = (rect.width() / SCENE_WIDTH).min(rect.height() / SCENE_HEIGHT);
        Self {
            origin: rect.min,
            scale,
        }
    }

    fn to_screen(&self, x: f32, y: f32) -> egui::Pos2 {
        self.origin + egui::vec2(x * self.scale, y * self.scale)
    }

    fn to_scene_x(&self, screen_x: f32) -> f32 {
        (screen_x - self.origin.x) / self.scale
    }

    fn rect(&self, min_x: f32, min_y: f32, width: f32, height: f32) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(min_x, min_y),
            self.to_screen(min_x + width, min_y + height),
        )
    }
}

pub struct SpringApp {
    session: SimulationSession,
    last_frame: Instant,
    tick_debt: Duration,
    /// Pointer offset from the left edge of the mass when grabbed
    grab_offset: f32,
    /// Displacement the mass is dragged to, committed on release
    drag_displacement: f64,
}

impl SpringApp {
    pub fn new(session: SimulationSession) -> Self {
        Self {
            session,
            last_frame: Instant::now(),
            tick_debt: Duration::ZERO,
            grab_offset: 0.0,
            drag_displacement: 0.0,
        }
    }

    fn tick_interval() -> Duration {
        Duration::from_secs_f64(1.0 / TICK_RATE)
    }

    /// Run as many fixed-rate ticks as real time calls for
    fn advance_clock(&mut self) {
        let now = Instant::now();
        self.tick_debt += now - self.last_frame;
        self.last_frame = now;

        let interval = Self::tick_interval();
        let mut ticks = 0;
        while self.tick_debt >= interval && ticks < MAX_TICKS_PER_FRAME {
            self.session.on_tick();
            self.tick_debt -= interval;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.tick_debt = Duration::ZERO;
        }
    }

    fn status_text(&self) -> String {
        match self.session.state() {
            PlaybackState::Idle => "Drag the mass and let go".to_string(),
            PlaybackState::Editing => format!("Displacement: {:.2}", self.drag_displacement),
            PlaybackState::Running => "Simulating".to_string(),
            PlaybackState::Settled(SettleReason::NegligibleVelocity) => {
                "Negligible velocity reached".to_string()
            }
            PlaybackState::Settled(SettleReason::Exhausted) => "End of trajectory".to_string(),
            PlaybackState::Terminated => "Stopped".to_string(),
        }
    }

    fn draw_scene(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let transform = SceneTransform::fit(rect);
        let scale = self.session.playback_config().display_scale();

        let mass_x = MASS_ZERO + self.session.current_render_position() as f32;
        let mid_y = SCENE_HEIGHT / 2.0;
        let mass_rect = transform.rect(mass_x, mid_y - MASS_SIZE / 2.0, MASS_SIZE, MASS_SIZE);

        let response = ui.interact(mass_rect, egui::Id::new("mass"), egui::Sense::drag());
        if response.drag_started() && self.session.on_drag_start() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.grab_offset = transform.to_scene_x(pointer.x) - mass_x;
            }
            self.drag_displacement = self.session.current_displacement();
        }
        if response.dragged() && self.session.is_editing() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let new_mass_x = transform.to_scene_x(pointer.x) - self.grab_offset;
                self.drag_displacement = f64::from(new_mass_x - MASS_ZERO) / scale;
                self.session.on_drag(self.drag_displacement);
            }
        }
        if response.drag_stopped() && self.session.is_editing() {
            self.session
                .on_release_initial_condition(self.drag_displacement, 0.0);
        }

        // the mass may have moved while handling the pointer
        let mass_x = MASS_ZERO + self.session.current_render_position() as f32;
        let mass_rect = transform.rect(mass_x, mid_y - MASS_SIZE / 2.0, MASS_SIZE, MASS_SIZE);

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
        painter.line_segment(
            [
                transform.to_screen(MASS_ZERO, 0.0),
                transform.to_screen(MASS_ZERO, SCENE_HEIGHT),
            ],
            egui::Stroke::new(1.0, ORIGIN_COLOR),
        );
        painter.line_segment(
            [
                transform.to_screen(WALL_X, mid_y),
                transform.to_screen(mass_x, mid_y),
            ],
            egui::Stroke::new(5.0 * transform.scale, SPRING_COLOR),
        );
        painter.rect_filled(transform.rect(0.0, 0.0, WALL_X, SCENE_HEIGHT), 0.0, WALL_COLOR);

        let mass_color = if self.session.is_running() {
            RUNNING_COLOR
        } else {
            IDLE_COLOR
        };
        painter.rect_filled(mass_rect, 0.0, mass_color);
    }

    fn draw_plot(&self, ui: &mut egui::Ui) {
        let Some(trajectory) = self.session.trajectory() else {
            ui.label("No run yet");
            return;
        };

        let position: PlotPoints = trajectory.position_series().map(|(t, x)| [t, x]).collect();
        let velocity: PlotPoints = trajectory.velocity_series().map(|(t, v)| [t, v]).collect();

        Plot::new("trajectory")
            .legend(Legend::default())
            .x_axis_label("Time [s]")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(position).name("position"));
                plot_ui.line(Line::new(velocity).name("velocity"));
                if self.session.current_sample().is_some() {
                    plot_ui.vline(VLine::new(trajectory.time_at(self.session.cursor())));
                }
            });
    }
}

impl eframe::App for SpringApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session.quit();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.advance_clock();

        // Top bar with status
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status_text());
                ui.separator();
                if let Some(trajectory) = self.session.trajectory() {
                    ui.label(format!(
                        "Step: {} / {}",
                        self.session.cursor(),
                        trajectory.last_index()
                    ));
                }
                if let Some(sample) = self.session.current_sample() {
                    ui.separator();
                    ui.label(format!(
                        "x = {:+.3}  v = {:+.3}",
                        sample.position, sample.velocity
                    ));
                }
            });
        });

        // Companion plot
        egui::TopBottomPanel::bottom("plot")
            .resizable(true)
            .default_height(260.0)
            .show(ctx, |ui| self.draw_plot(ui));

        // Main canvas area
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.draw_scene(ui));

        // Keep ticking until the settled run has dropped back to idle
        if self.session.is_running() || self.session.is_settled() {
            ctx.request_repaint_after(Self::tick_interval());
        } else {
            // avoid a burst of stale ticks when the next run starts
            self.tick_debt = Duration::ZERO;
        }
    }
}
