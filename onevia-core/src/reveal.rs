//! One-shot reveal bookkeeping for scroll-triggered entrance animations.
//!
//! The browser side reports intersection changes by element index; the
//! tracker decides whether that change reveals the element. An element is
//! revealed at most once and is no longer observed afterwards.
use std::collections::BTreeSet;

/// Fraction of an element that must be in view before it is revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Mark the element visible and stop observing it.
    Reveal,
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: BTreeSet<usize>,
    revealed: BTreeSet<usize>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`. Returns `false` when it was already revealed.
    pub fn observe(&mut self, id: usize) -> bool {
        if self.revealed.contains(&id) {
            return false;
        }
        self.observed.insert(id)
    }

    /// Handle an intersection change for `id`.
    pub fn on_intersection(&mut self, id: usize, is_intersecting: bool) -> RevealAction {
        if !is_intersecting || !self.observed.remove(&id) {
            return RevealAction::Ignore;
        }
        self.revealed.insert(id);
        RevealAction::Reveal
    }

    /// Reveal every observed element at once, for browsers without an
    /// intersection API. Returns the ids to mark visible.
    pub fn reveal_all(&mut self) -> Vec<usize> {
        let ids: Vec<usize> = std::mem::take(&mut self.observed).into_iter().collect();
        self.revealed.extend(ids.iter().copied());
        ids
    }

    #[must_use]
    pub fn is_revealed(&self, id: usize) -> bool {
        self.revealed.contains(&id)
    }

    /// Number of elements still waiting to be revealed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}
