//=========================================================================
// Engine Error
//=========================================================================
//
// Crate-level error aggregating the failures of every subsystem.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputError;
use crate::core::platform_bridge::PlatformError;
use crate::core::widget::WidgetError;

//=== Error ===============================================================

/// Any error the engine can surface to an application.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The logic thread panicked; the window has already closed.
    #[error("core logic thread panicked")]
    CoreThreadPanicked,
}

//=========================================================================
// Unit Tests
//=========================================================================
