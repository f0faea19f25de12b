//=========================================================================
// Scene System
//=========================================================================
//
// One full application mode (menu, gameplay, ...) and the manager that
// keeps at most one of them active.
//
// Architecture:
//   SceneManager
//     └─ current: Option<Box<dyn Scene>>
//                   └─ root_mut() → SceneRoot (optional widget tree)
//
// Flow:
//   set_scene(): old.on_exit → old.hide → new.show → new.on_enter
//   tick:        handle_event* → update → draw → process_transitions
//
//=========================================================================

//=== Module Declarations =================================================

mod root;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use root::SceneRoot;
pub use scene_manager::SceneManager;
pub use transition_queue::{SceneTransition, TransitionQueue};

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::surface::Surface;

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and per-frame logic.
///
/// Every method has a default, so an empty `impl` is a valid (inert)
/// scene. Unlike widgets, `update` and `draw` do nothing by default: a
/// scene that composes widgets in a [`SceneRoot`] forwards to it
/// explicitly.
///
/// ```rust
/// # use vertex_engine::prelude::*;
/// struct Title {
///     root: SceneRoot,
/// }
///
/// impl Scene for Title {
///     fn update(&mut self, ctx: &mut GlobalContext) {
///         if ctx.input.is_action_just_pressed("start") {
///             // ctx.change_scene(Box::new(Gameplay::new()));
///         }
///         self.root.update(ctx);
///     }
///
///     fn draw(&mut self, surface: &mut dyn Surface) {
///         self.root.draw(surface);
///     }
///
///     fn root_mut(&mut self) -> Option<&mut SceneRoot> {
///         Some(&mut self.root)
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Identifies the scene in logs and for input focus.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once each time the scene becomes active.
    ///
    /// Default implementation requests input focus for this scene.
    fn on_enter(&mut self, ctx: &mut GlobalContext) {
        ctx.request_focus(self.name());
    }

    /// Called once each time the scene is deactivated.
    fn on_exit(&mut self, _ctx: &mut GlobalContext) {}

    /// Makes the scene's widgets visible. Runs before `on_enter`.
    fn show(&mut self) {
        if let Some(root) = self.root_mut() {
            root.show();
        }
    }

    /// Hides the scene's widgets. Runs after `on_exit`.
    fn hide(&mut self) {
        if let Some(root) = self.root_mut() {
            root.hide();
        }
    }

    /// Called every tick while active.
    fn update(&mut self, _ctx: &mut GlobalContext) {}

    /// Called every tick while active, after `update`.
    fn draw(&mut self, _surface: &mut dyn Surface) {}

    /// Called for every input event while active.
    ///
    /// Default implementation forwards to the scene's widgets.
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext) {
        if let Some(root) = self.root_mut() {
            root.handle_event(event, ctx);
        }
    }

    /// The scene's composed widgets, if it has any.
    fn root_mut(&mut self) -> Option<&mut SceneRoot> {
        None
    }
}
