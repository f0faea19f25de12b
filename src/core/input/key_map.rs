//=========================================================================
// Key Name Table
//=========================================================================
//
// Static mapping from human-readable key names to raw `KeyCode`s.
//
// Architecture:
//   "left" / "a" / "f1" / "!" → NAMED_KEYS → KeyCode
//
// The table is enumerated exhaustively at compile time. Uniqueness of
// names and codes is checked by the unit tests below.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::InputError;

//=== NAMED_KEYS ==========================================================

/// Every symbolic key name accepted by the input registry.
pub const NAMED_KEYS: &[(&str, KeyCode)] = &[
    //--- Arrows -----------------------------------------------------------
    ("left", KeyCode::ArrowLeft),
    ("right", KeyCode::ArrowRight),
    ("up", KeyCode::ArrowUp),
    ("down", KeyCode::ArrowDown),

    //--- Actions ----------------------------------------------------------
    ("space", KeyCode::Space),
    ("enter", KeyCode::Enter),
    ("escape", KeyCode::Escape),
    ("tab", KeyCode::Tab),
    ("shift", KeyCode::Shift),
    ("ctrl", KeyCode::Control),
    ("alt", KeyCode::Alt),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),

    //--- Letters ----------------------------------------------------------
    ("a", KeyCode::KeyA), ("b", KeyCode::KeyB), ("c", KeyCode::KeyC),
    ("d", KeyCode::KeyD), ("e", KeyCode::KeyE), ("f", KeyCode::KeyF),
    ("g", KeyCode::KeyG), ("h", KeyCode::KeyH), ("i", KeyCode::KeyI),
    ("j", KeyCode::KeyJ), ("k", KeyCode::KeyK), ("l", KeyCode::KeyL),
    ("m", KeyCode::KeyM), ("n", KeyCode::KeyN), ("o", KeyCode::KeyO),
    ("p", KeyCode::KeyP), ("q", KeyCode::KeyQ), ("r", KeyCode::KeyR),
    ("s", KeyCode::KeyS), ("t", KeyCode::KeyT), ("u", KeyCode::KeyU),
    ("v", KeyCode::KeyV), ("w", KeyCode::KeyW), ("x", KeyCode::KeyX),
    ("y", KeyCode::KeyY), ("z", KeyCode::KeyZ),

    //--- Digits -----------------------------------------------------------
    ("0", KeyCode::Digit0), ("1", KeyCode::Digit1), ("2", KeyCode::Digit2),
    ("3", KeyCode::Digit3), ("4", KeyCode::Digit4), ("5", KeyCode::Digit5),
    ("6", KeyCode::Digit6), ("7", KeyCode::Digit7), ("8", KeyCode::Digit8),
    ("9", KeyCode::Digit9),

    //--- Function Keys ----------------------------------------------------
    ("f1", KeyCode::F1), ("f2", KeyCode::F2), ("f3", KeyCode::F3),
    ("f4", KeyCode::F4), ("f5", KeyCode::F5), ("f6", KeyCode::F6),
    ("f7", KeyCode::F7), ("f8", KeyCode::F8), ("f9", KeyCode::F9),
    ("f10", KeyCode::F10), ("f11", KeyCode::F11), ("f12", KeyCode::F12),

    //--- Punctuation ------------------------------------------------------
    ("`", KeyCode::Backquote),
    ("-", KeyCode::Minus),
    ("=", KeyCode::Equal),
    ("[", KeyCode::BracketLeft),
    ("]", KeyCode::BracketRight),
    ("\\", KeyCode::Backslash),
    (";", KeyCode::Semicolon),
    ("'", KeyCode::Apostrophe),
    (",", KeyCode::Comma),
    (".", KeyCode::Period),
    ("/", KeyCode::Slash),

    //--- Shifted Punctuation ----------------------------------------------
    ("!", KeyCode::Exclam),
    ("@", KeyCode::At),
    ("#", KeyCode::NumberSign),
    ("$", KeyCode::Dollar),
    ("%", KeyCode::Percent),
    ("^", KeyCode::AsciiCircum),
    ("&", KeyCode::Ampersand),
    ("*", KeyCode::Asterisk),
    ("(", KeyCode::ParenLeft),
    (")", KeyCode::ParenRight),
    ("_", KeyCode::Underscore),
    ("+", KeyCode::Plus),
    ("{", KeyCode::BraceLeft),
    ("}", KeyCode::BraceRight),
    ("|", KeyCode::Bar),
    (":", KeyCode::Colon),
    ("\"", KeyCode::QuoteDbl),
    ("<", KeyCode::Less),
    (">", KeyCode::Greater),
    ("?", KeyCode::Question),
];

//=== Lookups =============================================================

impl KeyCode {
    /// Resolves a symbolic key name (`"left"`, `"a"`, `"f1"`, `"!"`).
    ///
    /// Names are matched exactly; they are all lower case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_KEYS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, code)| code)
    }

    /// Returns the symbolic name of this key, if it has one.
    pub fn name(self) -> Option<&'static str> {
        NAMED_KEYS
            .iter()
            .find(|(_, code)| *code == self)
            .map(|&(name, _)| name)
    }
}

/// Resolves a symbolic name, failing with [`InputError::UnknownKey`].
pub(crate) fn resolve(name: &str) -> Result<KeyCode, InputError> {
    KeyCode::from_name(name).ok_or_else(|| InputError::UnknownKey(name.to_owned()))
}

//--- Trait Implementations -----------------------------------------------

impl FromStr for KeyCode {
    type Err = InputError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        resolve(name)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    //=====================================================================
    // Table Integrity
    //=====================================================================

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = NAMED_KEYS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), NAMED_KEYS.len());
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = NAMED_KEYS.iter().map(|(_, code)| *code).collect();
        assert_eq!(codes.len(), NAMED_KEYS.len());
    }

    #[test]
    fn every_entry_round_trips() {
        for &(name, code) in NAMED_KEYS {
            assert_eq!(KeyCode::from_name(name), Some(code), "lookup of {:?}", name);
            assert_eq!(code.name(), Some(name), "reverse lookup of {:?}", code);
        }
    }

    #[test]
    fn unidentified_is_never_named() {
        assert_eq!(KeyCode::Unidentified.name(), None);
    }

    //=====================================================================
    // Coverage
    //=====================================================================

    #[test]
    fn covers_letters_digits_and_function_keys() {
        for c in 'a'..='z' {
            assert!(KeyCode::from_name(&c.to_string()).is_some(), "letter {}", c);
        }
        for d in 0..=9 {
            assert!(KeyCode::from_name(&d.to_string()).is_some(), "digit {}", d);
        }
        for f in 1..=12 {
            assert!(KeyCode::from_name(&format!("f{}", f)).is_some(), "f{}", f);
        }
    }

    #[test]
    fn covers_every_symbol_the_platform_reports() {
        for symbol in "`-=[]\\;',./!@#$%^&*()_+{}|:\"<>?".chars() {
            let by_name = KeyCode::from_name(&symbol.to_string());
            assert!(by_name.is_some(), "symbol {:?}", symbol);
            assert_eq!(by_name, KeyCode::from_symbol(symbol));
        }
    }

    #[test]
    fn action_keys_resolve() {
        assert_eq!(KeyCode::from_name("ctrl"), Some(KeyCode::Control));
        assert_eq!(KeyCode::from_name("enter"), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_name("left"), Some(KeyCode::ArrowLeft));
    }

    //=====================================================================
    // Errors & Formatting
    //=====================================================================

    #[test]
    fn unknown_name_is_an_error() {
        let err = "spacebar".parse::<KeyCode>().unwrap_err();
        assert_eq!(err, InputError::UnknownKey("spacebar".to_owned()));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(KeyCode::from_name("A"), None);
        assert_eq!(KeyCode::from_name("F1"), None);
    }

    #[test]
    fn display_prefers_symbolic_name() {
        assert_eq!(KeyCode::ArrowUp.to_string(), "up");
        assert_eq!(KeyCode::Unidentified.to_string(), "Unidentified");
    }
}
