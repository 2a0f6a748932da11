//! Data-driven game constants
//!
//! Every field falls back to the value in `consts`, so a config file only needs
//! the keys it wants to override.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::consts::*;
use crate::secs_to_ticks;

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    /// Range with `min <= max` guaranteed
    pub fn ordered(&self) -> (f32, f32) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Session length in whole seconds
    pub session_seconds: u32,
    /// Seconds between normal star spawns
    pub normal_spawn_interval: f32,
    /// Seconds between big star spawns
    pub big_spawn_interval: f32,
    /// Fall duration range in seconds (both kinds)
    pub fall_duration: Range,
    pub normal_points: u64,
    pub big_points: u64,
    pub star_size: f32,
    pub basket_width: f32,
    pub basket_height: f32,
    pub basket_bottom_margin: f32,
    pub collision_tolerance: f32,
    pub key_step: f32,
    /// Collect feedback duration in seconds
    pub collect_flash: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_seconds: SESSION_SECONDS,
            normal_spawn_interval: NORMAL_SPAWN_INTERVAL,
            big_spawn_interval: BIG_SPAWN_INTERVAL,
            fall_duration: Range {
                min: FALL_DURATION_MIN,
                max: FALL_DURATION_MAX,
            },
            normal_points: NORMAL_STAR_POINTS,
            big_points: BIG_STAR_POINTS,
            star_size: STAR_SIZE,
            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_bottom_margin: BASKET_BOTTOM_MARGIN,
            collision_tolerance: COLLISION_TOLERANCE,
            key_step: KEY_STEP,
            collect_flash: COLLECT_FLASH_SECS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("parse config JSON: {e}"))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_json(&data)
    }

    /// Load a config file, falling back to defaults and returning the failure message
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Ticks between normal star spawns
    pub fn normal_spawn_ticks(&self) -> u32 {
        secs_to_ticks(self.normal_spawn_interval)
    }

    /// Ticks between big star spawns
    pub fn big_spawn_ticks(&self) -> u32 {
        secs_to_ticks(self.big_spawn_interval)
    }

    /// Ticks the collect flash lasts before the star is removed
    pub fn collect_flash_ticks(&self) -> u32 {
        secs_to_ticks(self.collect_flash)
    }

    /// Validate the configuration returning a list of human-readable warnings.
    /// Suspicious values are not hard errors; log each one at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.session_seconds == 0 {
            w.push("session_seconds is 0; sessions end on the first clock tick".into());
        }
        if self.normal_spawn_interval <= 0.0 || self.big_spawn_interval <= 0.0 {
            w.push("spawn intervals must be > 0 (clamped to one tick)".into());
        }
        if self.fall_duration.min > self.fall_duration.max {
            w.push(format!(
                "fall_duration min ({}) > max ({}); range is swapped",
                self.fall_duration.min, self.fall_duration.max
            ));
        }
        if self.fall_duration.min <= 0.0 {
            w.push(format!(
                "fall_duration.min {} must be > 0",
                self.fall_duration.min
            ));
        }
        if self.star_size <= 0.0 {
            w.push("star_size must be > 0".into());
        }
        if self.basket_width <= 0.0 || self.basket_height <= 0.0 {
            w.push("basket dimensions must be > 0".into());
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            w.push("viewport dimensions must be > 0".into());
        }
        if self.basket_width > self.viewport_width {
            w.push(format!(
                "basket_width {} wider than viewport {}; basket pinned to center",
                self.basket_width, self.viewport_width
            ));
        }
        if self.star_size > self.viewport_width {
            w.push("star_size wider than viewport; stars always spawn at x = 0".into());
        }
        if self.collision_tolerance < 0.0 {
            w.push("collision_tolerance negative; no star can ever be caught".into());
        }
        // A star moving further than the tolerance in one tick can skip the catch window
        let fastest_step = (self.viewport_height + self.star_size)
            / (self.fall_duration.ordered().0.max(f32::EPSILON) * TICK_HZ as f32);
        if self.collision_tolerance >= 0.0 && fastest_step > self.collision_tolerance {
            w.push(format!(
                "fastest star moves {fastest_step:.1} per tick, more than collision_tolerance {}; catches may be missed",
                self.collision_tolerance
            ));
        }
        if self.normal_points == 0 && self.big_points == 0 {
            w.push("all point values are 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.normal_spawn_ticks(), 50);
        assert_eq!(cfg.big_spawn_ticks(), 250);
        assert_eq!(cfg.collect_flash_ticks(), 15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{ "session_seconds": 30, "big_points": 100 }"#).unwrap();
        assert_eq!(cfg.session_seconds, 30);
        assert_eq!(cfg.big_points, 100);
        assert_eq!(cfg.normal_points, NORMAL_STAR_POINTS);
        assert_eq!(cfg.fall_duration, GameConfig::default().fall_duration);
    }

    #[test]
    fn bad_json_reports_error() {
        let err = GameConfig::from_json("{ session_seconds: ").unwrap_err();
        assert!(err.starts_with("parse config JSON"));
    }

    #[test]
    fn validate_detects_warnings() {
        let bad = GameConfig {
            session_seconds: 0,
            fall_duration: Range { min: 3.0, max: 0.0 },
            star_size: -1.0,
            basket_width: 2000.0,
            collision_tolerance: -5.0,
            normal_points: 0,
            big_points: 0,
            ..Default::default()
        };
        let warnings = bad.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("session_seconds is 0"));
        assert!(joined.contains("range is swapped"));
        assert!(joined.contains("star_size must be > 0"));
        assert!(joined.contains("wider than viewport"));
        assert!(joined.contains("collision_tolerance negative"));
        assert!(joined.contains("all point values are 0"));
    }

    #[test]
    fn validate_flags_tunneling_speed() {
        let cfg = GameConfig {
            viewport_height: 4000.0,
            ..Default::default()
        };
        assert!(cfg.validate().join(" ").contains("catches may be missed"));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.json");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn load_or_default_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "viewport_width": 640.0, "key_step": 40.0 }"#)
            .unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert!(err.is_none());
        assert_eq!(cfg.viewport_width, 640.0);
        assert_eq!(cfg.key_step, 40.0);
    }

    #[test]
    fn range_ordered() {
        assert_eq!(Range { min: 2.0, max: 1.0 }.ordered(), (1.0, 2.0));
        assert_eq!(Range { min: 1.0, max: 2.0 }.ordered(), (1.0, 2.0));
    }
}
