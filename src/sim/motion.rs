//! Motion engine
//!
//! Moves every ghost along its straight path to the target. Positions are a
//! function of elapsed travel time, so the frame rate never changes where a
//! ghost ends up.

use glam::Vec2;

use super::registry::GhostRegistry;

/// Advance all ghosts to clock time `now`
pub fn advance_all(registry: &mut GhostRegistry, now: u64, target: Vec2, duration_ms: u64) {
    for ghost in registry.iter_mut() {
        debug_assert!(ghost.is_active(), "moving destroyed ghost {}", ghost.id);
        ghost.advance_to(now, target, duration_ms);
    }
}

/// Skip motion up to `now` without moving anything (frozen while paused)
pub fn hold_all(registry: &mut GhostRegistry, now: u64) {
    for ghost in registry.iter_mut() {
        ghost.moved_until = now;
    }
}
