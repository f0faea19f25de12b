//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns at most one active scene and sequences its lifecycle.
//
// States: Empty | Active(scene)
//
// A replaced scene is deactivated and handed back to the caller, never
// destroyed here, so it can be kept and re-activated later.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneTransition};
use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::surface::Surface;

//=== SceneManager ========================================================

/// Drives the single active [`Scene`].
///
/// Per-frame calls while empty are silent no-ops: an application may tick
/// before its first scene is installed.
#[derive(Default)]
pub struct SceneManager {
    current: Option<Box<dyn Scene>>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager.
    pub fn new() -> Self {
        Self { current: None }
    }

    //--- State ------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Name of the active scene.
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|scene| scene.name())
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.current.as_deref_mut()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Activates `scene`, returning the previously active one.
    ///
    /// Order: previous `on_exit`, previous `hide`, then `show` and
    /// `on_enter` on `scene`. The previous scene is fully deactivated before
    /// the new one is entered.
    pub fn set_scene(
        &mut self,
        scene: Box<dyn Scene>,
        ctx: &mut GlobalContext,
    ) -> Option<Box<dyn Scene>> {
        let previous = self.deactivate(ctx);

        debug!("Entering scene {}", scene.name());
        let scene = self.current.insert(scene);
        scene.show();
        scene.on_enter(ctx);

        previous
    }

    /// Deactivates the active scene (if any), leaving the manager empty.
    pub fn clear(&mut self, ctx: &mut GlobalContext) -> Option<Box<dyn Scene>> {
        self.deactivate(ctx)
    }

    fn deactivate(&mut self, ctx: &mut GlobalContext) -> Option<Box<dyn Scene>> {
        let mut scene = self.current.take()?;

        debug!("Exiting scene {}", scene.name());
        scene.on_exit(ctx);
        scene.hide();
        ctx.release_focus(scene.name());

        Some(scene)
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every queued transition in FIFO order.
    ///
    /// Should be called at the tick boundary after update and draw.
    /// Returns the scenes that were deactivated.
    pub fn process_transitions(&mut self, ctx: &mut GlobalContext) -> Vec<Box<dyn Scene>> {
        let mut replaced = Vec::new();

        for transition in ctx.scene_transitions.take() {
            trace!("Applying transition {:?}", transition);
            let previous = match transition {
                SceneTransition::Set(scene) => self.set_scene(scene, ctx),
                SceneTransition::Clear => self.clear(ctx),
            };
            replaced.extend(previous);
        }

        replaced
    }

    //--- Frame Dispatch ---------------------------------------------------

    pub fn update(&mut self, ctx: &mut GlobalContext) {
        if let Some(scene) = self.current.as_mut() {
            scene.update(ctx);
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) {
        if let Some(scene) = self.current.as_mut() {
            scene.draw(surface);
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext) {
        if let Some(scene) = self.current.as_mut() {
            scene.handle_event(event, ctx);
        }
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("current", &self.current_name())
            .finish()
    }
}

//=== Tests ===============================================================
