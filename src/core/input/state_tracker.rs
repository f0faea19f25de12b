//=========================================================================
// State Tracker
//=========================================================================
//
// Raw key state tracking with per-frame edge sets.
//
// Architecture:
//   key_down / key_up → HashSet (keys held) + edge sets → query
//
// Frame lifecycle: key events → queries → clear() → next batch
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame edges (keys that went
/// down or up since the last [`clear`](Self::clear)).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Edges (reset each frame via clear()) ----------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Records a key transition to DOWN.
    ///
    /// Only the first `key_down` while the key is held produces an edge;
    /// key-repeat events are absorbed.
    pub(super) fn key_down(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed_this_frame.insert(key);
        }
    }

    /// Records a key transition to UP.
    ///
    /// Releasing a key that was never held produces no edge.
    pub(super) fn key_up(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_released_this_frame.insert(key);
        }
    }

    /// Releases every held key, recording a release edge for each.
    pub(super) fn release_all(&mut self) {
        self.keys_released_this_frame.extend(self.keys_down.drain());
    }

    /// Clears frame edges (pressed/released), keeping held keys.
    pub(super) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Returns an iterator over all keys pressed this frame.
    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_frame.iter()
    }

    /// Returns an iterator over all keys released this frame.
    pub fn keys_released(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_released_this_frame.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Transition Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        // Frame 1: key down
        tracker.key_down(KeyCode::KeyA);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));
        tracker.clear();

        // Frame 2: still held
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));
        tracker.clear();

        // Frame 3: released
        tracker.key_up(KeyCode::KeyA);
        assert!(!tracker.is_key_down(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn key_down_persists_across_frames() {
        let mut tracker = StateTracker::new();
        tracker.key_down(KeyCode::KeyW);

        for _ in 0..10 {
            tracker.clear();
            assert!(tracker.is_key_down(KeyCode::KeyW), "Key should remain down");
        }
    }

    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut tracker = StateTracker::new();

        tracker.key_down(KeyCode::KeyA);
        tracker.key_up(KeyCode::KeyA);

        assert!(tracker.is_key_pressed(KeyCode::KeyA), "Should register press");
        assert!(tracker.is_key_released(KeyCode::KeyA), "Should register release");
        assert!(!tracker.is_key_down(KeyCode::KeyA), "Should end up not down");
    }

    #[test]
    fn repress_within_frame_keeps_both_edges_and_holds() {
        let mut tracker = StateTracker::new();

        tracker.key_down(KeyCode::KeyA);
        tracker.key_up(KeyCode::KeyA);
        tracker.key_down(KeyCode::KeyA);

        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn repeated_key_down_does_not_refire_after_clear() {
        let mut tracker = StateTracker::new();

        tracker.key_down(KeyCode::KeyA);
        tracker.clear();
        tracker.key_down(KeyCode::KeyA);

        assert!(!tracker.is_key_pressed(KeyCode::KeyA), "Repeat should not trigger");
        assert!(tracker.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();
        tracker.key_up(KeyCode::KeyZ);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    //=====================================================================
    // release_all() Tests
    //=====================================================================

    #[test]
    fn release_all_emits_release_edges() {
        let mut tracker = StateTracker::new();
        tracker.key_down(KeyCode::KeyA);
        tracker.key_down(KeyCode::Space);
        tracker.clear();

        tracker.release_all();

        assert!(tracker.is_key_released(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::Space));
        assert_eq!(tracker.keys_down().count(), 0);
    }

    //=====================================================================
    // Iterator Tests
    //=====================================================================

    #[test]
    fn keys_pressed_iterator() {
        let mut tracker = StateTracker::new();
        tracker.key_down(KeyCode::KeyA);
        tracker.key_down(KeyCode::KeyB);

        let pressed: Vec<_> = tracker.keys_pressed().copied().collect();
        assert_eq!(pressed.len(), 2);
        assert!(pressed.contains(&KeyCode::KeyA));
        assert!(pressed.contains(&KeyCode::KeyB));
    }

    #[test]
    fn clear_resets_edges_but_preserves_held_keys() {
        let mut tracker = StateTracker::new();
        tracker.key_down(KeyCode::KeyA);
        tracker.key_down(KeyCode::KeyB);
        tracker.key_up(KeyCode::KeyB);

        tracker.clear();

        assert_eq!(tracker.keys_pressed().count(), 0);
        assert_eq!(tracker.keys_released().count(), 0);
        assert!(tracker.is_key_down(KeyCode::KeyA));
    }
}
