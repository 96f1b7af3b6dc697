//! Active ghost registry
//!
//! Ordered by spawn. Removal always destroys the ghost, which cancels its
//! timer, so nothing left behind can end the game.

use super::ghost::{Ghost, GhostId};

#[derive(Debug, Clone)]
pub struct GhostRegistry {
    ghosts: Vec<Ghost>,
    next_id: u32,
}

impl Default for GhostRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GhostRegistry {
    pub fn new() -> Self {
        Self {
            ghosts: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new ghost id
    pub fn next_ghost_id(&mut self) -> GhostId {
        let id = GhostId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, ghost: Ghost) {
        assert!(ghost.is_active(), "inserted ghost {} is not active", ghost.id);
        debug_assert!(self.get(ghost.id).is_none(), "duplicate ghost {}", ghost.id);
        self.ghosts.push(ghost);
    }

    /// Remove and destroy a ghost. `None` if it was already gone.
    pub fn remove(&mut self, id: GhostId, now: u64) -> Option<Ghost> {
        let idx = self.ghosts.iter().position(|g| g.id == id)?;
        let mut ghost = self.ghosts.remove(idx);
        ghost.destroy(now);
        Some(ghost)
    }

    /// Destroy everything, returning how many ghosts were removed
    pub fn clear(&mut self, now: u64) -> usize {
        let count = self.ghosts.len();
        for ghost in &mut self.ghosts {
            ghost.destroy(now);
        }
        self.ghosts.clear();
        count
    }

    pub fn get(&self, id: GhostId) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.id == id)
    }

    pub fn get_mut(&mut self, id: GhostId) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|g| g.id == id)
    }

    pub fn contains(&self, id: GhostId) -> bool {
        self.get(id).is_some()
    }

    /// Ghosts in spawn order
    pub fn iter(&self) -> impl Iterator<Item = &Ghost> {
        self.ghosts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ghost> {
        self.ghosts.iter_mut()
    }

    pub fn ids(&self) -> Vec<GhostId> {
        self.ghosts.iter().map(|g| g.id).collect()
    }

    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    /// Every registered ghost is active and its timer has not fired
    pub fn check_invariants(&self) {
        for ghost in &self.ghosts {
            assert!(ghost.is_active(), "inactive ghost {} in registry", ghost.id);
            assert!(
                !matches!(ghost.timer().state(), super::timer::TimerState::Fired),
                "ghost {} outlived its fired timer",
                ghost.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ghost::SpawnSide;
    use glam::Vec2;

    fn spawn(reg: &mut GhostRegistry, word: &str) -> GhostId {
        let id = reg.next_ghost_id();
        reg.insert(Ghost::new(
            id,
            word.to_string(),
            SpawnSide::Right,
            Vec2::new(800.0, 10.0),
            0,
            8000,
        ));
        id
    }

    #[test]
    fn test_insert_keeps_spawn_order() {
        let mut reg = GhostRegistry::new();
        let a = spawn(&mut reg, "a");
        let b = spawn(&mut reg, "b");
        let c = spawn(&mut reg, "c");
        assert_eq!(reg.ids(), vec![a, b, c]);

        reg.remove(b, 10);
        assert_eq!(reg.ids(), vec![a, c]);
    }

    #[test]
    fn test_remove_cancels_timer() {
        let mut reg = GhostRegistry::new();
        let id = spawn(&mut reg, "boo");
        let removed = reg.remove(id, 100).unwrap();
        assert!(!removed.is_active());
        assert!(!removed.timer().is_running());
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut reg = GhostRegistry::new();
        let id = spawn(&mut reg, "boo");
        assert!(reg.remove(id, 1).is_some());
        assert!(reg.remove(id, 2).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_duplicate_words_keep_distinct_ids() {
        let mut reg = GhostRegistry::new();
        let a = spawn(&mut reg, "boo");
        let b = spawn(&mut reg, "boo");
        assert_ne!(a, b);
        reg.remove(a, 5);
        assert!(reg.contains(b));
        assert!(reg.get(b).unwrap().timer().is_running());
    }

    #[test]
    fn test_clear() {
        let mut reg = GhostRegistry::new();
        spawn(&mut reg, "a");
        spawn(&mut reg, "b");
        assert_eq!(reg.clear(0), 2);
        assert!(reg.is_empty());
        reg.check_invariants();
    }

    #[test]
    #[should_panic(expected = "inactive ghost")]
    fn test_invariants_reject_inactive_ghost() {
        let mut reg = GhostRegistry::new();
        let id = spawn(&mut reg, "boo");
        if let Some(ghost) = reg.get_mut(id) {
            ghost.destroy(10);
        }
        reg.check_invariants();
    }

    #[test]
    #[should_panic(expected = "outlived its fired timer")]
    fn test_invariants_reject_fired_timer() {
        let mut reg = GhostRegistry::new();
        let id = spawn(&mut reg, "boo");
        if let Some(ghost) = reg.get_mut(id) {
            assert!(ghost.timer_mut().poll(8000));
        }
        reg.check_invariants();
    }
}
