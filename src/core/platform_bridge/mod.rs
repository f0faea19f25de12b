//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the window layer (winit) with the logic thread.
//
// This module defines the contract between the platform implementation
// and the frame driver, so the window backend can change without
// touching scene or input code.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection and batching
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::PlatformError;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
