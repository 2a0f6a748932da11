//! In-memory presenter for native runs and tests

use std::collections::BTreeMap;

use super::Presenter;
use crate::sim::StarKind;

/// A star marker as the presenter last saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: StarKind,
    pub x: f32,
    pub y: f32,
    pub flashing: bool,
}

/// Records what a real surface would display
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub basket_x: Option<f32>,
    pub markers: BTreeMap<u32, Marker>,
    pub score_text: String,
    pub clock_text: String,
    /// Final score shown on the end overlay, `None` while hidden
    pub game_over: Option<u64>,
    /// Removal requests for markers that no longer existed
    pub stale_removals: u32,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for RecordingPresenter {
    fn place_basket(&mut self, x: f32) {
        self.basket_x = Some(x);
    }

    fn spawn_star_marker(&mut self, id: u32, kind: StarKind) {
        self.markers.insert(
            id,
            Marker {
                kind,
                x: 0.0,
                y: 0.0,
                flashing: false,
            },
        );
    }

    fn place_star_marker(&mut self, id: u32, x: f32, y: f32) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.x = x;
            marker.y = y;
        }
    }

    fn flash_star_marker(&mut self, id: u32) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.flashing = true;
        }
    }

    fn remove_star_marker(&mut self, id: u32) {
        if self.markers.remove(&id).is_none() {
            self.stale_removals += 1;
        }
    }

    fn show_score(&mut self, score: u64) {
        self.score_text = score.to_string();
    }

    fn show_clock(&mut self, text: &str) {
        self.clock_text = text.to_string();
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.game_over = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::present;
    use crate::sim::{GameController, TickInput, tick};

    #[test]
    fn test_present_mirrors_controller() {
        let mut c = GameController::new(GameConfig::default(), 11);
        let mut p = RecordingPresenter::new();
        c.start_session();
        present(&mut c, &mut p);
        assert_eq!(p.score_text, "0");
        assert_eq!(p.clock_text, "2:00");

        for _ in 0..120 {
            tick(&mut c, &TickInput::default());
            present(&mut c, &mut p);
        }
        assert_eq!(p.clock_text, "1:58");
        assert_eq!(p.markers.len(), c.stars().len());
        for star in c.stars().iter().filter(|s| s.is_falling()) {
            assert_eq!(p.markers[&star.id].y, star.y);
        }
        assert_eq!(p.stale_removals, 0);
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut p = RecordingPresenter::new();
        p.spawn_star_marker(1, StarKind::Normal);
        p.remove_star_marker(1);
        p.remove_star_marker(1);
        assert!(p.markers.is_empty());
        assert_eq!(p.stale_removals, 1);
    }
}
