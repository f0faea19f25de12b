//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// a unified, engine-friendly format consumed by the input registry and
// dispatched through the active scene's widget tree.
//
// Responsibilities:
// - Represent keyboard and mouse inputs in a stable, portable way
// - Provide the raw key identifier space (`KeyCode`) that symbolic key
//   names resolve to
// - Carry window-level notifications the frame driver reacts to
//   (resize, focus loss)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    FrameDriver ──► InputRegistry (key_down / key_up)
//         └────────► SceneManager::handle_event (widget fan-out)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Raw key identifier.
///
/// Every key reachable through the symbolic name table
/// (see [`NAMED_KEYS`](super::key_map::NAMED_KEYS)) has a variant here.
/// Shifted punctuation has its own codes (`Exclam`, `At`, ...) because the
/// platform reports the produced symbol for those keys.
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    //--- Modifier Keys ----------------------------------------------------

    /// Either shift key.
    Shift,

    /// Either control key.
    Control,

    /// Either alt key (Option on macOS).
    Alt,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    //--- Punctuation ------------------------------------------------------

    Backquote,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,

    //--- Shifted Punctuation ----------------------------------------------

    Exclam,
    At,
    NumberSign,
    Dollar,
    Percent,
    AsciiCircum,
    Ampersand,
    Asterisk,
    ParenLeft,
    ParenRight,
    Underscore,
    Plus,
    BraceLeft,
    BraceRight,
    Bar,
    Colon,
    QuoteDbl,
    Less,
    Greater,
    Question,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    /// Maps a produced punctuation character to its key code.
    ///
    /// Used by the platform layer for symbols that only exist as the
    /// shifted output of another physical key (`!`, `@`, `{`, ...).
    /// Letters, digits and whitespace return `None`; those are mapped from
    /// the physical key instead.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        use KeyCode::*;
        let code = match symbol {
            '`' => Backquote,
            '-' => Minus,
            '=' => Equal,
            '[' => BracketLeft,
            ']' => BracketRight,
            '\\' => Backslash,
            ';' => Semicolon,
            '\'' => Apostrophe,
            ',' => Comma,
            '.' => Period,
            '/' => Slash,
            '!' => Exclam,
            '@' => At,
            '#' => NumberSign,
            '$' => Dollar,
            '%' => Percent,
            '^' => AsciiCircum,
            '&' => Ampersand,
            '*' => Asterisk,
            '(' => ParenLeft,
            ')' => ParenRight,
            '_' => Underscore,
            '+' => Plus,
            '{' => BraceLeft,
            '}' => BraceRight,
            '|' => Bar,
            ':' => Colon,
            '"' => QuoteDbl,
            '<' => Less,
            '>' => Greater,
            '?' => Question,
            _ => return None,
        };
        Some(code)
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Key events feed the [`InputRegistry`](super::InputRegistry); every event
/// is also dispatched to the active scene through `handle_event`.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: Discrete keyboard transitions (key-repeat arrives as
///   repeated `KeyDown`)
/// - **MouseButtonDown/MouseButtonUp**: Discrete mouse button events
/// - **MouseMoved**: Cursor position in window space (pixels, top-left origin)
/// - **Resized**: New inner window size
/// - **FocusLost**: The window stopped receiving keyboard input
/// - **Unidentified**: Unknown/unsupported events (ignored by the registry)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    MouseMoved { x: f32, y: f32 },
    Resized { width: u32, height: u32 },
    FocusLost,
    Unidentified,
}

impl InputEvent {
    /// Returns the key carried by a `KeyDown`/`KeyUp` event.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            _ => None,
        }
    }

    /// Returns `true` for discrete events whose order is significant.
    ///
    /// Continuous events (`MouseMoved`, `Resized`) may be coalesced by the
    /// platform buffer; discrete ones never are.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::MouseMoved { .. } | Self::Resized { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
