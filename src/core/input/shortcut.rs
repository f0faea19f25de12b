//=========================================================================
// Shortcuts
//=========================================================================
//
// Key combinations ("ctrl+s", "shift+f1") bound to callbacks.
//
// A shortcut fires on the frame its combination completes: every key is
// held and at least one of them went down this frame. Holding the whole
// combination does not fire it again.
//
// The frame driver dispatches the map once per tick, after the batch of
// raw events and before scene update.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::key_map::resolve;
use super::{InputError, InputRegistry, KeyCode};
use crate::core::globals::GlobalContext;

//=== Shortcut ============================================================

/// A parsed key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    keys: Vec<KeyCode>,
}

impl Shortcut {
    /// Parses `+`-separated symbolic key names. Names are case-insensitive
    /// and the `+` key itself is written as an empty part (`"ctrl++"`).
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownKey`] for an empty sequence or an unknown name.
    pub fn parse(sequence: &str) -> Result<Self, InputError> {
        let mut keys = Vec::new();
        let mut rest = sequence.trim();

        while !rest.is_empty() {
            let (name, tail) = match rest.strip_prefix('+') {
                Some(tail) => ("+", tail.strip_prefix('+').unwrap_or(tail)),
                None => rest.split_once('+').unwrap_or((rest, "")),
            };

            let code = resolve(&name.trim().to_ascii_lowercase())?;
            if !keys.contains(&code) {
                keys.push(code);
            }
            rest = tail;
        }

        if keys.is_empty() {
            return Err(InputError::UnknownKey(sequence.to_owned()));
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Returns `true` on the frame the combination completes.
    pub fn is_triggered(&self, input: &InputRegistry) -> bool {
        self.keys.iter().all(|&key| input.is_key_pressed(key))
            && self.keys.iter().any(|&key| input.is_key_just_pressed(key))
    }
}

//=== ShortcutMap =========================================================

pub type ShortcutCallback = Box<dyn FnMut(&mut GlobalContext) + Send>;

/// Shortcuts in binding order, each with its callback.
#[derive(Default)]
pub struct ShortcutMap {
    entries: Vec<(Shortcut, ShortcutCallback)>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `sequence` to `callback`. A sequence may be bound more than
    /// once; every callback runs, in binding order.
    ///
    /// # Errors
    ///
    /// See [`Shortcut::parse`].
    pub fn bind<F>(&mut self, sequence: &str, callback: F) -> Result<(), InputError>
    where
        F: FnMut(&mut GlobalContext) + Send + 'static,
    {
        let shortcut = Shortcut::parse(sequence)?;
        debug!("Bound shortcut {:?} -> {:?}", sequence, shortcut.keys());
        self.entries.push((shortcut, Box::new(callback)));
        Ok(())
    }

    /// Removes every callback bound to `sequence`; returns how many.
    ///
    /// # Errors
    ///
    /// See [`Shortcut::parse`].
    pub fn unbind(&mut self, sequence: &str) -> Result<usize, InputError> {
        let shortcut = Shortcut::parse(sequence)?;
        let before = self.entries.len();
        self.entries.retain(|(bound, _)| *bound != shortcut);
        Ok(before - self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the callback of every shortcut completed this frame.
    ///
    /// Returns the number of callbacks run.
    pub fn dispatch(&mut self, ctx: &mut GlobalContext) -> usize {
        let mut fired = 0;
        for (shortcut, callback) in &mut self.entries {
            if shortcut.is_triggered(&ctx.input) {
                trace!("Shortcut {:?} fired", shortcut.keys());
                callback(ctx);
                fired += 1;
            }
        }
        fired
    }
}

impl fmt::Debug for ShortcutMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(shortcut, _)| shortcut.keys()))
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter(map: &mut ShortcutMap, sequence: &str) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        map.bind(sequence, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        count
    }

    //=====================================================================
    // Parsing
    //=====================================================================

    #[test]
    fn parse_combination() {
        let shortcut = Shortcut::parse("Ctrl+S").unwrap();
        assert_eq!(shortcut.keys(), &[KeyCode::Control, KeyCode::KeyS]);
    }

    #[test]
    fn parse_plus_key() {
        assert_eq!(Shortcut::parse("ctrl++").unwrap().keys(), &[KeyCode::Control, KeyCode::Plus]);
        assert_eq!(Shortcut::parse("+").unwrap().keys(), &[KeyCode::Plus]);
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert_eq!(
            Shortcut::parse("ctrl+banana"),
            Err(InputError::UnknownKey("banana".to_owned()))
        );
        assert_eq!(Shortcut::parse("  "), Err(InputError::UnknownKey("  ".to_owned())));
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    #[test]
    fn fires_once_when_combination_completes() {
        let mut map = ShortcutMap::new();
        let saves = counter(&mut map, "ctrl+s");
        let mut ctx = GlobalContext::new();

        // Frame 1: modifier alone
        ctx.input.key_down(KeyCode::Control);
        map.dispatch(&mut ctx);
        ctx.input.input_update();
        assert_eq!(saves.load(Ordering::SeqCst), 0);

        // Frame 2: combination completes
        ctx.input.key_down(KeyCode::KeyS);
        assert_eq!(map.dispatch(&mut ctx), 1);
        ctx.input.input_update();

        // Frame 3: still held, no repeat
        assert_eq!(map.dispatch(&mut ctx), 0);
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unbind_removes_callbacks() {
        let mut map = ShortcutMap::new();
        counter(&mut map, "ctrl+s");
        counter(&mut map, "Ctrl+S");
        counter(&mut map, "f5");

        assert_eq!(map.unbind("ctrl+s"), Ok(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn callback_can_request_scene_change() {
        struct Help;
        impl crate::core::scene::Scene for Help {}

        let mut map = ShortcutMap::new();
        map.bind("f1", |ctx| ctx.change_scene(Box::new(Help))).unwrap();
        let mut ctx = GlobalContext::new();

        ctx.input.key_down(KeyCode::F1);
        map.dispatch(&mut ctx);

        assert_eq!(ctx.scene_transitions.len(), 1);
    }
}
