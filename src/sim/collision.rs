//! Collision detection against the target point
//!
//! A ghost has reached the target once its center is within
//! `collision_distance` of the target center.

use glam::Vec2;

use super::ghost::GhostId;
use super::registry::GhostRegistry;
use crate::distance;

/// Check if a point is close enough to the target to count as a hit
pub fn reached_target(pos: Vec2, target: Vec2, collision_distance: f32) -> bool {
    distance(pos, target) <= collision_distance
}

/// Ghosts touching the target, in spawn order
pub fn detect(registry: &GhostRegistry, target: Vec2, collision_distance: f32) -> Vec<GhostId> {
    registry
        .iter()
        .filter(|g| reached_target(g.pos, target, collision_distance))
        .map(|g| g.id)
        .collect()
}

/// Health bar fill for a life count, clamped to [0, 1]
pub fn health_fraction(lives: i32, max_lives: i32) -> f32 {
    if max_lives <= 0 {
        return 0.0;
    }
    (lives as f32 / max_lives as f32).clamp(0.0, 1.0)
}
