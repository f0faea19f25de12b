//=========================================================================
// Input Registry
//=========================================================================
//
// Raw key state plus named action bindings with edge-triggered queries,
// and the pointer state widgets hit-test against.
//
// Architecture:
//   InputEvent → InputRegistry
//                  ├─ StateTracker   (held / just pressed / just released)
//                  ├─ ActionMapper   (action name → key set)
//                  └─ pointer        (cursor position, held buttons)
//
// Frame lifecycle:
//   key_down / key_up (arrival order) → queries → input_update() → next batch
//
// Symbolic names ("left", "a", "f1", "!") resolve through NAMED_KEYS.
// Unknown names are an error; unbound actions are simply inactive.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod key_map;
mod action_mapper;
mod shortcut;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton};
pub use key_map::NAMED_KEYS;
pub use shortcut::{Shortcut, ShortcutMap};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Point;
use action_mapper::ActionMapper;
use key_map::resolve;

//=== InputError ==========================================================

/// Failures raised by symbolic key lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The name is not in [`NAMED_KEYS`]; usually a typo in a binding.
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

//=== InputRegistry =======================================================

/// Per-application input state: raw keys and named actions.
///
/// One registry is owned by the [`GlobalContext`](crate::core::globals::GlobalContext)
/// and threaded to whatever needs input queries; there is no global table.
///
/// # Examples
///
/// ```
/// use vertex_engine::core::input::{InputRegistry, KeyCode};
///
/// let mut input = InputRegistry::new();
/// input.bind("jump", "space").unwrap();
///
/// input.key_down(KeyCode::Space);
/// assert!(input.is_action_just_pressed("jump"));
///
/// input.input_update();
/// assert!(!input.is_action_just_pressed("jump"));
/// assert!(input.is_action_pressed("jump"));
/// ```
#[derive(Debug, Default)]
pub struct InputRegistry {
    state: StateTracker,
    actions: ActionMapper,
    /// `None` until the first pointer motion.
    cursor: Option<Point>,
    buttons: HashSet<MouseButton>,
}

impl InputRegistry {
    /// Creates a registry with no keys held and no actions bound.
    pub fn new() -> Self {
        Self {
            state: StateTracker::new(),
            actions: ActionMapper::new(),
            cursor: None,
            buttons: HashSet::new(),
        }
    }

    //=====================================================================
    // Bindings
    //=====================================================================

    /// Binds the key named `key` to `action`.
    ///
    /// Binding a key that is already bound is a no-op.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] if `key` is not a symbolic key name.
    pub fn bind(&mut self, action: &str, key: &str) -> Result<(), InputError> {
        let code = resolve(key)?;
        self.bind_key(action, code);
        Ok(())
    }

    /// Binds a raw key to `action`.
    pub fn bind_key(&mut self, action: &str, key: KeyCode) {
        if self.actions.bind(action, key) {
            debug!("Bound {} to action {:?}", key, action);
        }
    }

    /// Removes bindings from `action`.
    ///
    /// With `Some(key)`, only that key is removed and the action stays
    /// registered (possibly with no keys). With `None`, the action and all
    /// of its keys are removed. Unbinding an unknown action is a no-op.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] if `key` is not a symbolic key name.
    pub fn unbind(&mut self, action: &str, key: Option<&str>) -> Result<(), InputError> {
        match key {
            Some(name) => {
                let code = resolve(name)?;
                self.actions.unbind_key(action, code);
                debug!("Unbound {} from action {:?}", code, action);
            }
            None => {
                self.actions.unbind_all(action);
                debug!("Unbound action {:?}", action);
            }
        }
        Ok(())
    }

    /// Returns the keys currently bound to `action`.
    pub fn bound_keys(&self, action: &str) -> impl Iterator<Item = KeyCode> + '_ {
        self.actions.keys(action).copied()
    }

    /// Returns `true` if `action` is registered (even with no keys).
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Returns every action `key` currently serves.
    pub fn actions_for(&self, key: KeyCode) -> impl Iterator<Item = &str> {
        self.actions.actions_for(key)
    }

    //=====================================================================
    // Raw Event Ingestion
    //=====================================================================

    /// Records a raw key press. Key-repeat does not re-fire the edge.
    pub fn key_down(&mut self, key: KeyCode) {
        trace!("key_down {:?}", key);
        self.state.key_down(key);
    }

    /// Records a raw key release. Releasing an unheld key does nothing.
    pub fn key_up(&mut self, key: KeyCode) {
        trace!("key_up {:?}", key);
        self.state.key_up(key);
    }

    /// Records the pointer position. Fractional pixels round down.
    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some(Point::new(x.floor() as i32, y.floor() as i32));
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        trace!("mouse_down {:?}", button);
        self.buttons.insert(button);
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        trace!("mouse_up {:?}", button);
        self.buttons.remove(&button);
    }

    /// Applies the key and pointer events of a batch in arrival order.
    ///
    /// Window events are ignored.
    pub fn frame_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::KeyDown(key) => self.key_down(key),
                InputEvent::KeyUp(key) => self.key_up(key),
                InputEvent::MouseButtonDown(button) => self.mouse_down(button),
                InputEvent::MouseButtonUp(button) => self.mouse_up(button),
                InputEvent::MouseMoved { x, y } => self.mouse_moved(x, y),
                InputEvent::Resized { .. } | InputEvent::FocusLost | InputEvent::Unidentified => {}
            }
        }
    }

    /// Releases every held key and mouse button, producing key release
    /// edges.
    ///
    /// Used when the window loses focus and further key-up events would
    /// never arrive.
    pub fn release_all(&mut self) {
        debug!("Releasing all held keys");
        self.state.release_all();
        self.buttons.clear();
    }

    /// Clears the just-pressed and just-released sets.
    ///
    /// Call exactly once per frame, after game logic has read the edges and
    /// before the next batch of raw events is applied.
    pub fn input_update(&mut self) {
        self.state.clear();
    }

    //=====================================================================
    // Symbolic Key Queries
    //=====================================================================

    /// Returns `true` while the named key is held.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] if `key` is not a symbolic key name.
    pub fn is_pressed(&self, key: &str) -> Result<bool, InputError> {
        resolve(key).map(|code| self.state.is_key_down(code))
    }

    /// Returns `true` if the named key went down this frame.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] if `key` is not a symbolic key name.
    pub fn is_just_pressed(&self, key: &str) -> Result<bool, InputError> {
        resolve(key).map(|code| self.state.is_key_pressed(code))
    }

    /// Returns `true` if the named key went up this frame.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] if `key` is not a symbolic key name.
    pub fn is_released(&self, key: &str) -> Result<bool, InputError> {
        resolve(key).map(|code| self.state.is_key_released(code))
    }

    //--- Raw Key Queries --------------------------------------------------

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.state.is_key_down(key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.state.is_key_pressed(key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.state.is_key_released(key)
    }

    /// Returns the raw state tracker.
    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    //--- Pointer Queries --------------------------------------------------

    /// Last known pointer position in window pixels.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    //=====================================================================
    // Action Queries
    //=====================================================================

    /// Returns `true` if any key bound to `action` is held.
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.actions.any(action, |key| self.state.is_key_down(key))
    }

    /// Returns `true` if any key bound to `action` went down this frame.
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.actions.any(action, |key| self.state.is_key_pressed(key))
    }

    /// Returns `true` if any key bound to `action` went up this frame.
    pub fn is_action_released(&self, action: &str) -> bool {
        self.actions.any(action, |key| self.state.is_key_released(key))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(bindings: &[(&str, &str)]) -> InputRegistry {
        let mut input = InputRegistry::new();
        for (action, key) in bindings {
            input.bind(action, key).unwrap();
        }
        input
    }

    //=====================================================================
    // Edge Semantics
    //=====================================================================

    #[test]
    fn just_pressed_decays_after_input_update() {
        let mut input = InputRegistry::new();

        input.key_down(KeyCode::KeyA);
        assert!(input.is_just_pressed("a").unwrap());

        input.input_update();
        assert!(!input.is_just_pressed("a").unwrap());
        assert!(input.is_pressed("a").unwrap());

        input.key_up(KeyCode::KeyA);
        assert!(!input.is_pressed("a").unwrap());
        assert!(input.is_released("a").unwrap());
    }

    #[test]
    fn key_repeat_does_not_refire() {
        let mut input = InputRegistry::new();

        input.key_down(KeyCode::Space);
        input.key_down(KeyCode::Space);
        assert!(input.is_key_just_pressed(KeyCode::Space));
        assert_eq!(input.state().keys_pressed().count(), 1);

        input.input_update();
        input.key_down(KeyCode::Space);
        assert!(!input.is_key_just_pressed(KeyCode::Space));
    }

    #[test]
    fn press_and_release_in_one_frame_are_both_observable() {
        let mut input = InputRegistry::new();

        input.frame_events(&[
            InputEvent::KeyDown(KeyCode::KeyQ),
            InputEvent::KeyUp(KeyCode::KeyQ),
        ]);

        assert!(input.is_key_just_pressed(KeyCode::KeyQ));
        assert!(input.is_key_released(KeyCode::KeyQ));
        assert!(!input.is_key_pressed(KeyCode::KeyQ));
    }

    #[test]
    fn frame_events_tracks_pointer_apart_from_keys() {
        let mut input = InputRegistry::new();
        assert_eq!(input.cursor(), None);

        input.frame_events(&[
            InputEvent::MouseMoved { x: 12.7, y: 3.2 },
            InputEvent::MouseButtonDown(MouseButton::Left),
            InputEvent::FocusLost,
        ]);

        assert_eq!(input.state().keys_down().count(), 0);
        assert_eq!(input.cursor(), Some(Point::new(12, 3)));
        assert!(input.is_mouse_pressed(MouseButton::Left));

        input.frame_events(&[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert!(!input.is_mouse_pressed(MouseButton::Left));
    }

    #[test]
    fn release_all_drops_held_buttons_but_keeps_cursor() {
        let mut input = InputRegistry::new();
        input.mouse_moved(5.0, 6.0);
        input.mouse_down(MouseButton::Right);

        input.release_all();

        assert!(!input.is_mouse_pressed(MouseButton::Right));
        assert_eq!(input.cursor(), Some(Point::new(5, 6)));
    }

    #[test]
    fn release_all_clears_held_keys_with_edges() {
        let mut input = registry_with(&[("fire", "ctrl")]);
        input.key_down(KeyCode::Control);
        input.input_update();

        input.release_all();

        assert!(!input.is_action_pressed("fire"));
        assert!(input.is_action_released("fire"));
    }

    //=====================================================================
    // Symbolic Lookups
    //=====================================================================

    #[test]
    fn unknown_key_name_is_an_error() {
        let input = InputRegistry::new();
        let expected = Err(InputError::UnknownKey("lefty".to_owned()));

        assert_eq!(input.is_pressed("lefty"), expected);
        assert_eq!(input.is_just_pressed("lefty"), expected);
        assert_eq!(input.is_released("lefty"), expected);
    }

    #[test]
    fn bind_rejects_unknown_key_name() {
        let mut input = InputRegistry::new();
        let result = input.bind("jump", "spacebar");

        assert_eq!(result, Err(InputError::UnknownKey("spacebar".to_owned())));
        assert!(!input.has_action("jump"));
    }

    #[test]
    fn error_message_names_the_key() {
        let err = InputError::UnknownKey("lefty".to_owned());
        assert_eq!(err.to_string(), "unknown key name: \"lefty\"");
    }

    //=====================================================================
    // Actions
    //=====================================================================

    #[test]
    fn action_is_active_if_any_key_is() {
        let mut input = registry_with(&[("jump", "space"), ("jump", "up")]);

        input.key_down(KeyCode::Space);
        assert!(input.is_action_pressed("jump"));

        input.key_up(KeyCode::Space);
        assert!(!input.is_action_pressed("jump"));
    }

    #[test]
    fn unbound_action_is_never_active() {
        let mut input = InputRegistry::new();
        input.key_down(KeyCode::Space);

        assert!(!input.is_action_pressed("jump"));
        assert!(!input.is_action_just_pressed("jump"));
        assert!(!input.is_action_released("jump"));
    }

    #[test]
    fn bind_is_idempotent() {
        let mut input = registry_with(&[("jump", "space"), ("jump", "space")]);
        assert_eq!(input.bound_keys("jump").count(), 1);

        input.bind_key("jump", KeyCode::Space);
        assert_eq!(input.bound_keys("jump").count(), 1);
    }

    #[test]
    fn key_can_serve_several_actions() {
        let mut input = registry_with(&[("jump", "space"), ("confirm", "space")]);
        input.key_down(KeyCode::Space);

        assert!(input.is_action_pressed("jump"));
        assert!(input.is_action_pressed("confirm"));
        assert_eq!(input.actions_for(KeyCode::Space).count(), 2);
    }

    #[test]
    fn unbind_one_key_keeps_the_rest() {
        let mut input = registry_with(&[("move", "left"), ("move", "right")]);

        input.unbind("move", Some("left")).unwrap();

        assert!(input.has_action("move"));
        assert_eq!(input.bound_keys("move").collect::<Vec<_>>(), vec![KeyCode::ArrowRight]);

        input.key_down(KeyCode::ArrowLeft);
        assert!(!input.is_action_pressed("move"));
        input.key_down(KeyCode::ArrowRight);
        assert!(input.is_action_pressed("move"));
    }

    #[test]
    fn unbind_whole_action_disables_all_predicates() {
        let mut input = registry_with(&[("move", "left"), ("move", "right")]);
        input.key_down(KeyCode::ArrowRight);

        input.unbind("move", None).unwrap();

        assert!(!input.has_action("move"));
        assert!(!input.is_action_pressed("move"));
        assert!(!input.is_action_just_pressed("move"));

        input.key_up(KeyCode::ArrowRight);
        assert!(!input.is_action_released("move"));
    }

    #[test]
    fn unbind_with_unknown_key_name_is_an_error() {
        let mut input = registry_with(&[("move", "left")]);
        let result = input.unbind("move", Some("sideways"));

        assert_eq!(result, Err(InputError::UnknownKey("sideways".to_owned())));
        assert_eq!(input.bound_keys("move").count(), 1);
    }

    #[test]
    fn unbind_unknown_action_is_noop() {
        let mut input = InputRegistry::new();
        assert!(input.unbind("ghost", None).is_ok());
        assert!(input.unbind("ghost", Some("a")).is_ok());
    }

    //=====================================================================
    // Scenario
    //=====================================================================

    #[test]
    fn fire_on_ctrl_across_frames() {
        let mut input = registry_with(&[("fire", "ctrl")]);

        // Frame 1
        input.key_down(KeyCode::Control);
        assert!(input.is_action_just_pressed("fire"));
        input.input_update();

        // Frame 2: no new events
        assert!(!input.is_action_just_pressed("fire"));
        assert!(input.is_action_pressed("fire"));

        // Frame 3
        input.key_up(KeyCode::Control);
        assert!(input.is_action_released("fire"));
        assert!(!input.is_action_pressed("fire"));
    }
}
