//! Readiness gate for itinerary generation.
//!
//! The engine never checks readiness itself; the presentation layer asks
//! for a [`Readiness`] snapshot and decides when to offer the itinerary.

use serde::Serialize;

use super::PreferenceSet;

/// Number of learned preferences required before an itinerary is offered.
pub const DEFAULT_READINESS_THRESHOLD: usize = 4;

/// Snapshot of progress toward the readiness threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readiness {
    /// Preferences collected so far.
    pub collected: usize,
    /// Preferences required.
    pub required: usize,
}

impl Readiness {
    /// Creates a snapshot from raw counts.
    pub fn new(collected: usize, required: usize) -> Self {
        Self { collected, required }
    }

    /// Measures a preference set against a threshold.
    pub fn of(preferences: &PreferenceSet, required: usize) -> Self {
        Self::new(preferences.len(), required)
    }

    /// True once at least `required` preferences are known.
    pub fn is_ready(&self) -> bool {
        self.collected >= self.required
    }

    /// Preferences still missing, zero once ready.
    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs_of_size(n: usize) -> PreferenceSet {
        let mut prefs = PreferenceSet::new();
        for i in 0..n {
            prefs.insert(format!("key_{i}"), "value");
        }
        prefs
    }

    #[test]
    fn below_threshold_is_not_ready() {
        let readiness = Readiness::of(&prefs_of_size(3), DEFAULT_READINESS_THRESHOLD);
        assert!(!readiness.is_ready());
        assert_eq!(readiness.remaining(), 1);
    }

    #[test]
    fn at_threshold_is_ready() {
        let readiness = Readiness::of(&prefs_of_size(4), DEFAULT_READINESS_THRESHOLD);
        assert!(readiness.is_ready());
        assert_eq!(readiness.remaining(), 0);
    }

    #[test]
    fn above_threshold_stays_ready() {
        let readiness = Readiness::of(&prefs_of_size(5), DEFAULT_READINESS_THRESHOLD);
        assert!(readiness.is_ready());
        assert_eq!(readiness.remaining(), 0);
    }

    #[test]
    fn empty_set_reports_full_remaining() {
        let readiness = Readiness::of(&PreferenceSet::new(), 4);
        assert_eq!(readiness, Readiness::new(0, 4));
        assert_eq!(readiness.remaining(), 4);
    }
}
