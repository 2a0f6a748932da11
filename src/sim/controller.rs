//! The game controller
//!
//! Owns the session, the basket, the live star set and the session periodics.
//! Every mutation goes through a method here; `tick` only orchestrates.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::hits_basket_top;
use super::state::{
    Basket, GameEvent, GamePhase, GameSession, SessionStats, Star, StarKind, StarState, Viewport,
};
use super::timer::SessionTimers;
use crate::config::GameConfig;
use crate::consts::{SIM_DT, TICK_HZ};

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub time_remaining: u32,
    pub stats: SessionStats,
}

pub struct GameController {
    config: GameConfig,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    session: GameSession,
    basket: Basket,
    viewport: Viewport,
    /// Basket top measured by the frontend; `None` uses the config margin
    measured_basket_top: Option<f32>,
    /// Live stars, in spawn (id) order
    stars: Vec<Star>,
    /// `None` whenever no session is running
    timers: Option<SessionTimers>,
    events: Vec<GameEvent>,
    /// Simulation ticks of the current session
    time_ticks: u64,
    next_id: u32,
}

impl GameController {
    /// Create an idle controller; call `start_session` to begin play
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let mut basket = Basket {
            x: 0.0,
            width: config.basket_width,
            height: config.basket_height,
            top: 0.0,
        };
        basket.recenter(viewport.width);

        let mut controller = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            session: GameSession::default(),
            basket,
            viewport,
            measured_basket_top: None,
            stars: Vec::new(),
            timers: None,
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        };
        controller.layout_basket();
        controller
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Returns true while any session periodic is armed
    pub fn has_active_timers(&self) -> bool {
        self.timers.is_some()
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            phase: self.phase,
            score: self.session.score,
            time_remaining: self.session.time_remaining,
            stats: self.session.stats,
        }
    }

    // === Layout ===

    /// Apply a newly measured playfield. Before the first session the basket
    /// is centered on it; afterwards it is kept inside it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.layout_basket();
        let x = if self.phase == GamePhase::Idle {
            self.viewport.width / 2.0
        } else {
            self.basket.x
        };
        self.place_basket(x);
    }

    /// Apply the basket's measured box. `top` is relative to the playfield top.
    pub fn set_basket_rect(&mut self, top: f32, width: f32, height: f32) {
        if self.measured_basket_top == Some(top)
            && width == self.basket.width
            && height == self.basket.height
        {
            return;
        }
        self.measured_basket_top = Some(top);
        self.basket.width = width;
        self.basket.height = height;
        self.layout_basket();
        self.place_basket(self.basket.x);
    }

    fn layout_basket(&mut self) {
        self.basket.top = self.measured_basket_top.unwrap_or(
            self.viewport.height - self.config.basket_bottom_margin - self.basket.height,
        );
    }

    /// Clamp a viewport-relative center into the playfield and report moves
    fn place_basket(&mut self, local_x: f32) {
        let before = self.basket.x;
        self.basket.clamp_to(local_x, self.viewport.width);
        if self.basket.x != before {
            self.events.push(GameEvent::BasketMoved { x: self.basket.x });
        }
    }

    // === Session lifecycle ===

    /// Reset the session and arm the clock and both spawners
    pub fn start_session(&mut self) {
        self.clear_session();

        self.session = GameSession {
            score: 0,
            time_remaining: self.config.session_seconds,
            running: true,
            stats: SessionStats::default(),
        };
        self.timers = Some(SessionTimers::new(
            TICK_HZ,
            self.config.normal_spawn_ticks(),
            self.config.big_spawn_ticks(),
        ));
        self.time_ticks = 0;
        self.phase = GamePhase::Running;

        self.events.push(GameEvent::SessionStarted {
            time_remaining: self.session.time_remaining,
        });
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.events.push(GameEvent::ClockChanged {
            time_remaining: self.session.time_remaining,
        });
        self.events.push(GameEvent::BasketMoved { x: self.basket.x });
    }

    /// Stop the session: cancel periodics, drop every star, report the final score
    pub fn end_session(&mut self) {
        if !self.session.running {
            return;
        }
        self.clear_session();
        self.phase = GamePhase::Ended;
        self.events.push(GameEvent::SessionEnded {
            final_score: self.session.score,
        });
    }

    /// Hide the end overlay, re-center the basket and start a fresh session.
    /// A session still running is torn down first without an end report.
    pub fn restart_session(&mut self) {
        self.clear_session();
        self.events.push(GameEvent::OverlayHidden);
        self.basket.recenter(self.viewport.width);
        self.start_session();
    }

    /// Cancel all periodics and force-remove all live stars
    fn clear_session(&mut self) {
        self.session.running = false;
        self.timers = None;
        for star in self.stars.drain(..) {
            self.events.push(GameEvent::StarRemoved { id: star.id });
        }
    }

    // === Stars ===

    /// Spawn a star at a random column with a random fall duration
    pub fn spawn_star(&mut self, kind: StarKind) -> u32 {
        let max_x = (self.viewport.width - self.config.star_size).max(0.0);
        let x = self.rng.random_range(0.0..=max_x);
        let (min_d, max_d) = self.config.fall_duration.ordered();
        let fall_duration = self.rng.random_range(min_d..=max_d);
        self.spawn_star_at(kind, x, fall_duration)
    }

    /// Spawn a star at a known column and fall duration
    pub fn spawn_star_at(&mut self, kind: StarKind, x: f32, fall_duration: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let size = self.config.star_size;
        let max_x = (self.viewport.width - size).max(0.0);
        let points = match kind {
            StarKind::Normal => self.config.normal_points,
            StarKind::Big => self.config.big_points,
        };

        self.stars.push(Star {
            id,
            kind,
            x: x.clamp(0.0, max_x),
            y: -size,
            size,
            points,
            fall_duration: fall_duration.max(SIM_DT),
            elapsed_ticks: 0,
            state: StarState::Falling,
        });
        self.session.stats.spawned += 1;
        self.events.push(GameEvent::StarSpawned { id, kind });
        id
    }

    /// Per-frame pass over the live set: advance falls, resolve catches and
    /// misses, count down collect flashes, then drop finished stars.
    pub fn update_stars(&mut self) {
        let basket = self.basket.bounds();
        let tolerance = self.config.collision_tolerance;
        let viewport_height = self.viewport.height;

        for i in 0..self.stars.len() {
            match self.stars[i].state {
                StarState::Falling => {
                    let star = &mut self.stars[i];
                    star.elapsed_ticks += 1;
                    star.update_position(viewport_height, SIM_DT);

                    if hits_basket_top(&star.bounds(), &basket, tolerance) {
                        self.collect_star(i);
                    } else if star.y > viewport_height || star.progress(SIM_DT) >= 1.0 {
                        star.state = StarState::Missed;
                        self.session.stats.missed += 1;
                        let id = star.id;
                        self.events.push(GameEvent::StarMissed { id });
                    }
                }
                StarState::Collected { flash_ticks } => {
                    self.stars[i].state = StarState::Collected {
                        flash_ticks: flash_ticks.saturating_sub(1),
                    };
                }
                StarState::Missed => {}
            }
        }

        self.remove_finished_stars();
    }

    /// Award the star's points and start its collect flash
    fn collect_star(&mut self, index: usize) {
        let flash_ticks = self.config.collect_flash_ticks();
        let star = &mut self.stars[index];
        if !star.is_falling() {
            return;
        }
        star.state = StarState::Collected { flash_ticks };
        let (id, kind, points) = (star.id, star.kind, star.points);

        self.session.score += points;
        match kind {
            StarKind::Normal => self.session.stats.normal_collected += 1,
            StarKind::Big => self.session.stats.big_collected += 1,
        }
        self.events
            .push(GameEvent::StarCollected { id, kind, points });
        self.events.push(GameEvent::ScoreChanged {
            score: self.session.score,
        });
    }

    /// The single removal path for stars that finished on their own
    fn remove_finished_stars(&mut self) {
        let events = &mut self.events;
        self.stars.retain(|star| {
            if star.is_finished() {
                events.push(GameEvent::StarRemoved { id: star.id });
                false
            } else {
                true
            }
        });
    }

    // === Clock ===

    /// Advance the session periodics by one tick
    pub fn update_timers(&mut self) {
        let Some(timers) = self.timers.as_mut() else {
            return;
        };
        self.time_ticks += 1;
        let fired = timers.advance();

        if fired.clock {
            self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
            self.events.push(GameEvent::ClockChanged {
                time_remaining: self.session.time_remaining,
            });
            if self.session.time_remaining == 0 {
                self.end_session();
                return;
            }
        }
        if fired.normal_spawn {
            self.spawn_star(StarKind::Normal);
        }
        if fired.big_spawn {
            self.spawn_star(StarKind::Big);
        }
    }

    // === Basket ===

    /// Move the basket center to an absolute (client) x coordinate.
    /// Ignored unless a session is running.
    pub fn move_basket(&mut self, client_x: f32) {
        if !self.session.running {
            return;
        }
        let local_x = self.viewport.to_local_x(client_x);
        self.place_basket(local_x);
    }

    /// Nudge the basket by whole key steps (negative = left)
    pub fn nudge_basket(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        let center = self.viewport.left + self.basket.x;
        self.move_basket(center + steps as f32 * self.config.key_step);
    }

    /// Absolute x that would put the basket under the next catchable star
    pub fn autopilot_target(&self) -> Option<f32> {
        let rim = self.basket.top + self.config.collision_tolerance;
        self.stars
            .iter()
            .filter(|s| s.is_falling() && s.bounds().bottom() <= rim)
            .max_by(|a, b| {
                a.bounds()
                    .bottom()
                    .partial_cmp(&b.bounds().bottom())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| self.viewport.left + s.bounds().center().x)
    }
}
