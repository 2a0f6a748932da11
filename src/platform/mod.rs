//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (variable frame delta -> fixed simulation ticks)
//! - Presentation (basket, star markers, score/timer sinks, end overlay)

pub mod headless;

pub use headless::RecordingPresenter;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::format_clock;
use crate::sim::{GameController, GameEvent, StarKind, TickInput, tick};

/// The presentation surface the controller drives.
///
/// Positions are viewport-relative. Star markers are addressed by star id;
/// removing a marker that is already gone must be a no-op.
pub trait Presenter {
    fn place_basket(&mut self, x: f32);
    fn spawn_star_marker(&mut self, id: u32, kind: StarKind);
    fn place_star_marker(&mut self, id: u32, x: f32, y: f32);
    /// Start the shrink/fade/flash collect transition
    fn flash_star_marker(&mut self, id: u32);
    fn remove_star_marker(&mut self, id: u32);
    fn show_score(&mut self, score: u64);
    /// `text` is already formatted as `M:SS`
    fn show_clock(&mut self, text: &str);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}

/// Push everything that changed since the last frame to the presenter:
/// drained events first, then current positions of falling stars.
/// Returns the drained events so callers can log or play audio for them.
pub fn present<P: Presenter + ?Sized>(
    controller: &mut GameController,
    presenter: &mut P,
) -> Vec<GameEvent> {
    let events = controller.drain_events();
    for event in &events {
        match *event {
            GameEvent::SessionStarted { .. } | GameEvent::StarMissed { .. } => {}
            GameEvent::ClockChanged { time_remaining } => {
                presenter.show_clock(&format_clock(time_remaining));
            }
            GameEvent::ScoreChanged { score } => presenter.show_score(score),
            GameEvent::StarSpawned { id, kind } => presenter.spawn_star_marker(id, kind),
            GameEvent::StarCollected { id, .. } => presenter.flash_star_marker(id),
            GameEvent::StarRemoved { id } => presenter.remove_star_marker(id),
            GameEvent::BasketMoved { x } => presenter.place_basket(x),
            GameEvent::SessionEnded { final_score } => presenter.show_game_over(final_score),
            GameEvent::OverlayHidden => presenter.hide_game_over(),
        }
    }

    for star in controller.stars().iter().filter(|s| s.is_falling()) {
        presenter.place_star_marker(star.id, star.x, star.y);
    }

    events
}

/// Log a simulation event at the level the frontends use
pub fn log_event(event: &GameEvent) {
    match event {
        GameEvent::SessionStarted { time_remaining } => {
            log::info!("Session started ({} left)", format_clock(*time_remaining));
        }
        GameEvent::SessionEnded { final_score } => {
            log::info!("Session ended, final score {}", final_score);
        }
        GameEvent::OverlayHidden => log::info!("Session restarted"),
        GameEvent::StarSpawned { id, kind } => log::trace!("Star {} spawned ({:?})", id, kind),
        GameEvent::StarCollected { id, points, .. } => {
            log::debug!("Star {} collected (+{})", id, points);
        }
        GameEvent::StarMissed { id } => log::debug!("Star {} missed", id),
        _ => {}
    }
}

/// Converts variable frame deltas into fixed simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `dt` seconds cover (capped at `MAX_SUBSTEPS`).
    /// Returns the number of ticks run.
    pub fn advance(&mut self, controller: &mut GameController, input: &mut TickInput, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.25);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(controller, input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pointer_x = None;
            input.nudge = 0;
            input.restart = false;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Drop any carried-over partial tick
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
