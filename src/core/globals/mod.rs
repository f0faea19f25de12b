//=========================================================================
// Global Engine State
//=========================================================================
//
// Context (shared data) threaded through every scene and widget call.
//
// Architecture:
//   FrameDriver owns: SceneManager + GlobalContext
//   GlobalContext:    InputRegistry + TransitionQueue + focus/screen
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
