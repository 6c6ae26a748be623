//! Axis-aligned collision tests for the side-scroller
//!
//! Maze-mode collisions are grid-cell equality and live with the maze state;
//! everything continuous goes through the AABB tests here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. Top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Standard AABB overlap test. Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// The avatar's leading edge has cleared the obstacle's trailing edge.
///
/// Drives scoring; independent of any collision result.
pub fn has_passed(avatar: &Aabb, obstacle_trailing_x: f32) -> bool {
    avatar.pos.x > obstacle_trailing_x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_miss_horizontal() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap_miss_vertical() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(0.0, 30.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_has_passed() {
        let avatar = Aabb::new(100.0, 50.0, 60.0, 40.0);
        assert!(!has_passed(&avatar, 120.0));
        assert!(!has_passed(&avatar, 100.0));
        assert!(has_passed(&avatar, 99.0));
    }
}
