//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps application-defined action names to sets of raw keys.
//
// Architecture:
//   action name → HashMap → HashSet<KeyCode>
//
// One action may bind several keys and one key may serve several actions.
// An action is "active" when ANY of its keys satisfies the query.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== ActionMapper ========================================================

/// Action name → key set bindings.
#[derive(Debug, Default)]
pub(crate) struct ActionMapper {
    bindings: HashMap<String, HashSet<KeyCode>>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Binding API ------------------------------------------------------

    /// Adds `key` to the keys bound to `action` (set semantics).
    ///
    /// Returns `true` if the key was not already bound.
    pub(crate) fn bind(&mut self, action: &str, key: KeyCode) -> bool {
        self.bindings
            .entry(action.to_owned())
            .or_default()
            .insert(key)
    }

    /// Removes a single key from `action`, keeping the action registered.
    pub(crate) fn unbind_key(&mut self, action: &str, key: KeyCode) {
        if let Some(keys) = self.bindings.get_mut(action) {
            keys.remove(&key);
        }
    }

    /// Removes `action` and all of its keys.
    pub(crate) fn unbind_all(&mut self, action: &str) {
        self.bindings.remove(action);
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the keys bound to `action` (empty if unbound).
    pub(crate) fn keys(&self, action: &str) -> impl Iterator<Item = &KeyCode> {
        self.bindings.get(action).into_iter().flatten()
    }

    /// Returns `true` if `action` is registered, even with no keys.
    pub(crate) fn contains(&self, action: &str) -> bool {
        self.bindings.contains_key(action)
    }

    /// Returns `true` if any key bound to `action` satisfies `predicate`.
    pub(crate) fn any(&self, action: &str, predicate: impl Fn(KeyCode) -> bool) -> bool {
        self.keys(action).any(|&key| predicate(key))
    }

    /// Returns every action name `key` is bound to.
    pub(crate) fn actions_for(&self, key: KeyCode) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(move |(_, keys)| keys.contains(&key))
            .map(|(action, _)| action.as_str())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_keys(mapper: &ActionMapper, action: &str) -> Vec<KeyCode> {
        let mut keys: Vec<_> = mapper.keys(action).copied().collect();
        keys.sort();
        keys
    }

    //=====================================================================
    // Binding Tests
    //=====================================================================

    #[test]
    fn bind_is_idempotent() {
        let mut mapper = ActionMapper::new();

        assert!(mapper.bind("jump", KeyCode::Space));
        assert!(!mapper.bind("jump", KeyCode::Space));

        assert_eq!(sorted_keys(&mapper, "jump"), vec![KeyCode::Space]);
    }

    #[test]
    fn action_can_bind_multiple_keys() {
        let mut mapper = ActionMapper::new();
        mapper.bind("jump", KeyCode::Space);
        mapper.bind("jump", KeyCode::ArrowUp);

        assert_eq!(sorted_keys(&mapper, "jump"), vec![KeyCode::ArrowUp, KeyCode::Space]);
    }

    #[test]
    fn key_can_serve_multiple_actions() {
        let mut mapper = ActionMapper::new();
        mapper.bind("jump", KeyCode::Space);
        mapper.bind("confirm", KeyCode::Space);

        let mut actions: Vec<_> = mapper.actions_for(KeyCode::Space).collect();
        actions.sort();
        assert_eq!(actions, vec!["confirm", "jump"]);
    }

    //=====================================================================
    // Unbind Tests
    //=====================================================================

    #[test]
    fn unbind_key_keeps_action_registered() {
        let mut mapper = ActionMapper::new();
        mapper.bind("move", KeyCode::ArrowLeft);

        mapper.unbind_key("move", KeyCode::ArrowLeft);

        assert!(mapper.contains("move"));
        assert_eq!(mapper.keys("move").count(), 0);
    }

    #[test]
    fn unbind_all_removes_action() {
        let mut mapper = ActionMapper::new();
        mapper.bind("move", KeyCode::ArrowLeft);
        mapper.bind("move", KeyCode::ArrowRight);

        mapper.unbind_all("move");

        assert!(!mapper.contains("move"));
    }

    #[test]
    fn unbind_unknown_action_is_noop() {
        let mut mapper = ActionMapper::new();
        mapper.unbind_key("ghost", KeyCode::KeyA);
        mapper.unbind_all("ghost");
        assert!(!mapper.contains("ghost"));
    }

    //=====================================================================
    // Query Tests
    //=====================================================================

    #[test]
    fn any_is_false_for_unbound_action() {
        let mapper = ActionMapper::new();
        assert!(!mapper.any("fire", |_| true));
    }

    #[test]
    fn any_matches_if_one_key_matches() {
        let mut mapper = ActionMapper::new();
        mapper.bind("jump", KeyCode::Space);
        mapper.bind("jump", KeyCode::ArrowUp);

        assert!(mapper.any("jump", |key| key == KeyCode::ArrowUp));
        assert!(!mapper.any("jump", |key| key == KeyCode::KeyZ));
    }
}
