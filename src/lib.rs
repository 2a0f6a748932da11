//! Star Collector - a timed arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collision, scoring, session lifecycle)
//! - `config`: Data-driven game constants loaded from JSON
//! - `platform`: Presentation surface abstraction and frame clock
//! - `settings`: Player preferences (audio, reduced motion)
//! - `audio`: Sound cues for game events, played through Web Audio on wasm

pub mod audio;
pub mod config;
pub mod platform;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (collision polling at 50 Hz)
    pub const TICK_HZ: u32 = 50;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session length (2 minutes)
    pub const SESSION_SECONDS: u32 = 120;
    /// Seconds between normal star spawns
    pub const NORMAL_SPAWN_INTERVAL: f32 = 1.0;
    /// Seconds between big star spawns
    pub const BIG_SPAWN_INTERVAL: f32 = 5.0;

    /// Fall duration range (seconds), shared by both star kinds
    pub const FALL_DURATION_MIN: f32 = 1.5;
    pub const FALL_DURATION_MAX: f32 = 3.0;

    pub const NORMAL_STAR_POINTS: u64 = 10;
    pub const BIG_STAR_POINTS: u64 = 50;

    /// Star marker edge length (square bounding box)
    pub const STAR_SIZE: f32 = 50.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 60.0;
    /// Gap between basket bottom and viewport bottom
    pub const BASKET_BOTTOM_MARGIN: f32 = 20.0;

    /// How far past the basket top a star's underside may be and still count as a catch
    pub const COLLISION_TOLERANCE: f32 = 15.0;
    /// Horizontal step for one arrow key press
    pub const KEY_STEP: f32 = 20.0;
    /// Collect feedback duration (shrink/fade/flash)
    pub const COLLECT_FLASH_SECS: f32 = 0.3;

    /// Viewport used until the frontend measures the real one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs * consts::TICK_HZ as f32).round() as u32).max(1)
}

/// Format remaining seconds as `M:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(119), "1:59");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 50);
        assert_eq!(secs_to_ticks(5.0), 250);
        assert_eq!(secs_to_ticks(0.3), 15);
        assert_eq!(secs_to_ticks(0.0), 1);
    }
}
