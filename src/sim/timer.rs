//! Tick-counted periodic timers

use serde::{Deserialize, Serialize};

/// Fires once every `period` ticks, starting one full period after arming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    period: u32,
    elapsed: u32,
}

impl Interval {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    /// Advance one tick; returns true when the period completes
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}

/// The three session-level periodics. Armed and cancelled as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimers {
    pub clock: Interval,
    pub normal_spawn: Interval,
    pub big_spawn: Interval,
}

/// What fired on a given tick, in firing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub clock: bool,
    pub normal_spawn: bool,
    pub big_spawn: bool,
}

impl SessionTimers {
    pub fn new(clock_ticks: u32, normal_spawn_ticks: u32, big_spawn_ticks: u32) -> Self {
        Self {
            clock: Interval::new(clock_ticks),
            normal_spawn: Interval::new(normal_spawn_ticks),
            big_spawn: Interval::new(big_spawn_ticks),
        }
    }

    pub fn advance(&mut self) -> Fired {
        Fired {
            clock: self.clock.advance(),
            normal_spawn: self.normal_spawn.advance(),
            big_spawn: self.big_spawn.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_every_period() {
        let mut iv = Interval::new(3);
        let fires: Vec<bool> = (0..7).map(|_| iv.advance()).collect();
        assert_eq!(fires, [false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_zero_period_clamped() {
        let mut iv = Interval::new(0);
        assert_eq!(iv.period(), 1);
        assert!(iv.advance());
        assert!(iv.advance());
    }

    #[test]
    fn test_session_timers_align() {
        let mut timers = SessionTimers::new(50, 50, 250);
        let mut clock = 0;
        let mut normal = 0;
        let mut big = 0;
        for _ in 0..500 {
            let fired = timers.advance();
            clock += fired.clock as u32;
            normal += fired.normal_spawn as u32;
            big += fired.big_spawn as u32;
        }
        assert_eq!((clock, normal, big), (10, 10, 2));
    }
}
