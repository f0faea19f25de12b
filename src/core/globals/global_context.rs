//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container passed to scenes and widgets on every call.
//
// Contains state data that scenes read/write:
// - input: Input registry (raw keys + named actions)
// - scene_transitions: Command queue for scene changes
// - focus / screen size / frame counter
// - previous_scene: the scene most recently replaced by a deferred swap
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size;
use crate::core::input::InputRegistry;
use crate::core::scene::{Scene, SceneTransition, TransitionQueue};
use crate::core::widget::VisibilityPolicy;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes never store the context; it is handed to each lifecycle and
/// frame method, which keeps scenes testable with an isolated instance.
///
/// # Available Data
///
/// - `input`: Key state and action bindings
/// - `scene_transitions`: Queue for requesting scene changes
/// - focus, screen size and frame number through accessor methods
/// - the last scene replaced at a tick boundary, through
///   [`take_previous_scene`](Self::take_previous_scene)
pub struct GlobalContext {
    /// Raw key state and named action bindings.
    pub input: InputRegistry,

    /// Transition queue for scene changes.
    ///
    /// Scenes queue transitions here (usually through
    /// [`change_scene`](Self::change_scene)). The scene manager processes
    /// this queue at tick boundaries.
    pub scene_transitions: TransitionQueue,

    focus: Option<&'static str>,
    screen: Size,
    visibility_policy: VisibilityPolicy,
    frame: u64,
    previous_scene: Option<Box<dyn Scene>>,
}

impl GlobalContext {
    /// Default screen size before the window reports its own.
    pub const DEFAULT_SCREEN: Size = Size::new(800, 600);

    /// Creates a new context with empty state.
    pub fn new() -> Self {
        Self {
            input: InputRegistry::new(),
            scene_transitions: TransitionQueue::new(),
            focus: None,
            screen: Self::DEFAULT_SCREEN,
            visibility_policy: VisibilityPolicy::default(),
            frame: 0,
            previous_scene: None,
        }
    }

    pub(crate) fn with_screen_size(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    pub(crate) fn with_visibility_policy(mut self, policy: VisibilityPolicy) -> Self {
        self.visibility_policy = policy;
        self
    }

    //--- Input Focus ------------------------------------------------------

    /// Gives input focus to the named scene.
    pub fn request_focus(&mut self, scene: &'static str) {
        if self.focus != Some(scene) {
            debug!("Input focus -> {}", scene);
            self.focus = Some(scene);
        }
    }

    /// Scene currently holding input focus.
    pub fn focused_scene(&self) -> Option<&'static str> {
        self.focus
    }

    /// Drops focus if `scene` holds it.
    pub(crate) fn release_focus(&mut self, scene: &'static str) {
        if self.focus == Some(scene) {
            self.focus = None;
        }
    }

    //--- Scene Requests ---------------------------------------------------

    /// Requests a switch to `scene` at the end of the current tick.
    pub fn change_scene(&mut self, scene: Box<dyn Scene>) {
        debug!("Scene change requested: {}", scene.name());
        self.scene_transitions.push(SceneTransition::Set(scene));
    }

    /// Requests that the active scene be deactivated at the end of the tick.
    pub fn clear_scene(&mut self) {
        debug!("Scene clear requested");
        self.scene_transitions.push(SceneTransition::Clear);
    }

    /// Takes the scene that the last deferred swap replaced.
    ///
    /// Only the most recent one is kept; an older one still waiting here
    /// is dropped when a newer swap happens. Hand it back to
    /// [`change_scene`](Self::change_scene) to return to it with its
    /// state intact.
    pub fn take_previous_scene(&mut self) -> Option<Box<dyn Scene>> {
        self.previous_scene.take()
    }

    pub(crate) fn store_previous_scene(&mut self, scene: Box<dyn Scene>) {
        if let Some(dropped) = self.previous_scene.replace(scene) {
            debug!("Dropping unclaimed scene {}", dropped.name());
        }
    }

    //--- Screen -----------------------------------------------------------

    /// Current drawable size in pixels.
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub(crate) fn resize(&mut self, screen: Size) {
        self.screen = screen;
    }

    /// Policy applied by every widget tree that has no override of its own.
    pub fn visibility_policy(&self) -> VisibilityPolicy {
        self.visibility_policy
    }

    //--- Frame Counter ----------------------------------------------------

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

impl std::fmt::Debug for GlobalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalContext")
            .field("input", &self.input)
            .field("scene_transitions", &self.scene_transitions)
            .field("focus", &self.focus)
            .field("screen", &self.screen)
            .field("visibility_policy", &self.visibility_policy)
            .field("frame", &self.frame)
            .field("previous_scene", &self.previous_scene.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Menu;
    impl Scene for Menu {}

    #[test]
    fn defaults() {
        let ctx = GlobalContext::new();
        assert_eq!(ctx.screen_size(), Size::new(800, 600));
        assert_eq!(ctx.focused_scene(), None);
        assert_eq!(ctx.frame(), 0);
        assert_eq!(ctx.visibility_policy(), VisibilityPolicy::DrawOnly);
    }

    #[test]
    fn release_focus_only_affects_holder() {
        let mut ctx = GlobalContext::new();
        ctx.request_focus("menu");

        ctx.release_focus("game");
        assert_eq!(ctx.focused_scene(), Some("menu"));

        ctx.release_focus("menu");
        assert_eq!(ctx.focused_scene(), None);
    }

    #[test]
    fn scene_requests_are_queued() {
        let mut ctx = GlobalContext::new();

        ctx.change_scene(Box::new(Menu));
        ctx.clear_scene();

        assert_eq!(ctx.scene_transitions.len(), 2);
    }

    struct Pause;
    impl Scene for Pause {}

    #[test]
    fn previous_scene_slot_keeps_latest() {
        let mut ctx = GlobalContext::new();
        assert!(ctx.take_previous_scene().is_none());

        ctx.store_previous_scene(Box::new(Menu));
        ctx.store_previous_scene(Box::new(Pause));

        let previous = ctx.take_previous_scene().unwrap();
        assert_eq!(previous.name(), std::any::type_name::<Pause>());
        assert!(ctx.take_previous_scene().is_none());
    }
}
