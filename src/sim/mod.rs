//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by star ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, hits_basket_top};
pub use controller::{GameController, SessionSummary};
pub use state::{
    Basket, GameEvent, GamePhase, GameSession, SessionStats, Star, StarKind, StarState, Viewport,
};
pub use tick::{TickInput, tick};
pub use timer::{Interval, SessionTimers};
