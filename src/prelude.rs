//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use vertex_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::core::frame::FrameDriver;
pub use crate::engine::{Engine, EngineBuilder};

// Global context
pub use crate::core::globals::GlobalContext;

// Input system
pub use crate::core::input::{
    InputError, InputEvent, InputRegistry, KeyCode, MouseButton, Shortcut, ShortcutMap,
};

// Scene system
pub use crate::core::scene::{Scene, SceneManager, SceneRoot};

// Widget system
pub use crate::core::widget::{
    Button, Container, NodeCx, OptionGroup, Panel, Slider, VisibilityPolicy, Widget, WidgetError,
    WidgetId, WidgetTree,
};

// Rendering and geometry
pub use crate::core::geometry::{Point, Rect, Size};
pub use crate::core::surface::{Color, FrameBuffer, Surface};
