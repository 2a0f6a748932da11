//! Collision detection between falling stars and the basket
//!
//! Only the basket's top surface catches: a star counts when its horizontal
//! center is over the basket and its underside has just reached the rim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

/// Check whether a star's underside touches the basket's top surface.
///
/// The star's bottom edge must be at or below the basket top, and no more than
/// `tolerance` past it. Deeper overlap is not a catch.
pub fn hits_basket_top(star: &Rect, basket: &Rect, tolerance: f32) -> bool {
    let center_x = star.center().x;
    let bottom = star.bottom();
    let rim = basket.top();

    center_x >= basket.left()
        && center_x <= basket.right()
        && bottom >= rim
        && bottom <= rim + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket() -> Rect {
        // 100 wide centered at 400, top at 520
        Rect::new(Vec2::new(350.0, 520.0), Vec2::new(100.0, 60.0))
    }

    fn star_at(x: f32, bottom: f32) -> Rect {
        Rect::new(Vec2::new(x, bottom - 50.0), Vec2::splat(50.0))
    }

    #[test]
    fn test_touching_rim_hits() {
        assert!(hits_basket_top(&star_at(375.0, 520.0), &basket(), 15.0));
        assert!(hits_basket_top(&star_at(375.0, 535.0), &basket(), 15.0));
    }

    #[test]
    fn test_above_rim_misses() {
        assert!(!hits_basket_top(&star_at(375.0, 519.9), &basket(), 15.0));
    }

    #[test]
    fn test_deep_overlap_is_not_a_catch() {
        assert!(!hits_basket_top(&star_at(375.0, 536.0), &basket(), 15.0));
    }

    #[test]
    fn test_horizontal_center_decides() {
        // Center exactly on the left edge (350)
        assert!(hits_basket_top(&star_at(325.0, 525.0), &basket(), 15.0));
        // Star overlaps the basket, but its center is outside
        assert!(!hits_basket_top(&star_at(324.0, 525.0), &basket(), 15.0));
        // Center exactly on the right edge (450)
        assert!(hits_basket_top(&star_at(425.0, 525.0), &basket(), 15.0));
        assert!(!hits_basket_top(&star_at(426.0, 525.0), &basket(), 15.0));
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }
}
