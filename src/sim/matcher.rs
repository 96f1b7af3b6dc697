//! Input matching
//!
//! Submitted text removes at most one ghost: the oldest whose word matches,
//! ignoring case and surrounding whitespace.

use super::ghost::GhostId;
use super::registry::GhostRegistry;

/// Strip the whitespace that submit keys (Enter/Space) leave behind
pub fn normalize_input(text: &str) -> &str {
    text.trim()
}

/// Find the oldest ghost whose word matches `text`
pub fn find_match(registry: &GhostRegistry, text: &str) -> Option<GhostId> {
    let text = normalize_input(text);
    if text.is_empty() {
        return None;
    }
    registry.iter().find(|g| g.matches(text)).map(|g| g.id)
}
