//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, first session not started yet
    Idle,
    /// Clock running, stars spawning
    Running,
    /// Time ran out; waiting for restart
    Ended,
}

/// Star kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarKind {
    Normal,
    Big,
}

/// Lifecycle of a single star. Only `Falling` stars are polled; only terminal
/// states are drained from the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarState {
    Falling,
    /// Caught; playing the collect flash for the remaining ticks
    Collected { flash_ticks: u32 },
    /// Fell past the viewport or finished its fall uncaught
    Missed,
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub id: u32,
    pub kind: StarKind,
    /// Left edge, viewport-relative
    pub x: f32,
    /// Top edge, viewport-relative (negative while entering from above)
    pub y: f32,
    /// Edge length of the square bounding box
    pub size: f32,
    pub points: u64,
    pub fall_duration: f32,
    /// Ticks spent falling
    pub elapsed_ticks: u32,
    pub state: StarState,
}

impl Star {
    /// Fraction of the fall completed, in [0, 1]
    pub fn progress(&self, dt: f32) -> f32 {
        (self.elapsed_ticks as f32 * dt / self.fall_duration).min(1.0)
    }

    /// Move along the fall path for the current progress
    pub fn update_position(&mut self, viewport_height: f32, dt: f32) {
        let travel = viewport_height + self.size;
        self.y = -self.size + self.progress(dt) * travel;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::new(self.x, self.y), Vec2::splat(self.size))
    }

    pub fn is_falling(&self) -> bool {
        self.state == StarState::Falling
    }

    /// Returns true once the star can be removed from the live set
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            StarState::Missed | StarState::Collected { flash_ticks: 0 }
        )
    }
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Horizontal center, viewport-relative
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Top surface, viewport-relative
    pub top: f32,
}

impl Basket {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_width()
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_width()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::new(self.left(), self.top),
            Vec2::new(self.width, self.height),
        )
    }

    /// Center the basket in a viewport of the given width
    pub fn recenter(&mut self, viewport_width: f32) {
        self.x = viewport_width / 2.0;
    }

    /// Set the center, keeping the full basket inside `[0, viewport_width]`.
    /// A basket wider than the viewport is pinned to its center.
    pub fn clamp_to(&mut self, x: f32, viewport_width: f32) {
        let min_x = self.half_width();
        let max_x = viewport_width - self.half_width();
        self.x = if max_x < min_x {
            viewport_width / 2.0
        } else {
            x.clamp(min_x, max_x)
        };
    }
}

/// Playfield in client (page) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Convert an absolute horizontal coordinate to viewport-relative
    #[inline]
    pub fn to_local_x(&self, client_x: f32) -> f32 {
        client_x - self.left
    }
}

/// Per-session scoring data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    /// Whole seconds left on the clock
    pub time_remaining: u32,
    pub running: bool,
    pub stats: SessionStats,
}

/// Tallies kept alongside the score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub normal_collected: u32,
    pub big_collected: u32,
    pub missed: u32,
    pub spawned: u32,
}

/// Something the presentation layer needs to react to.
/// Drained once per frame by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { time_remaining: u32 },
    ClockChanged { time_remaining: u32 },
    ScoreChanged { score: u64 },
    StarSpawned { id: u32, kind: StarKind },
    StarCollected { id: u32, kind: StarKind, points: u64 },
    StarMissed { id: u32 },
    /// Star left the live set; emitted exactly once per star
    StarRemoved { id: u32 },
    BasketMoved { x: f32 },
    SessionEnded { final_score: u64 },
    /// End overlay should be hidden (restart)
    OverlayHidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket() -> Basket {
        Basket {
            x: 400.0,
            width: 100.0,
            height: 60.0,
            top: 520.0,
        }
    }

    #[test]
    fn test_basket_clamp() {
        let mut b = basket();
        b.clamp_to(-1000.0, 800.0);
        assert_eq!(b.x, 50.0);
        b.clamp_to(1e9, 800.0);
        assert_eq!(b.x, 750.0);
        b.clamp_to(321.5, 800.0);
        assert_eq!(b.x, 321.5);
    }

    #[test]
    fn test_basket_wider_than_viewport() {
        let mut b = basket();
        b.clamp_to(10.0, 60.0);
        assert_eq!(b.x, 30.0);
    }

    #[test]
    fn test_star_fall_path() {
        let mut star = Star {
            id: 1,
            kind: StarKind::Normal,
            x: 0.0,
            y: 0.0,
            size: 50.0,
            points: 10,
            fall_duration: 2.0,
            elapsed_ticks: 0,
            state: StarState::Falling,
        };
        let dt = 0.02;
        star.update_position(600.0, dt);
        assert_eq!(star.y, -50.0);

        star.elapsed_ticks = 50; // 1s of 2s
        star.update_position(600.0, dt);
        assert!((star.y - 275.0).abs() < 0.01);

        star.elapsed_ticks = 500;
        assert_eq!(star.progress(dt), 1.0);
    }

    #[test]
    fn test_star_finished_states() {
        let mut star = Star {
            id: 1,
            kind: StarKind::Big,
            x: 0.0,
            y: 0.0,
            size: 50.0,
            points: 50,
            fall_duration: 2.0,
            elapsed_ticks: 0,
            state: StarState::Falling,
        };
        assert!(!star.is_finished());
        star.state = StarState::Collected { flash_ticks: 3 };
        assert!(!star.is_finished());
        star.state = StarState::Collected { flash_ticks: 0 };
        assert!(star.is_finished());
        star.state = StarState::Missed;
        assert!(star.is_finished());
    }
}
