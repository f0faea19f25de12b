//=========================================================================
// Frame Driver
//=========================================================================
//
// Runs one frame of the scene/input core.
//
// Tick order:
//   1. Apply input events (registry first, then scene dispatch)
//   2. Fire completed shortcuts, then SceneManager::update
//   3. InputRegistry::input_update (edge clear)
//   4. Clear surface to background, SceneManager::draw
//   5. Apply scene transitions queued during the frame; the last scene
//      they replaced waits in GlobalContext::take_previous_scene
//
// The orchestrator ticks the driver on the logic thread; tests tick it
// directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::geometry::Size;
use super::globals::GlobalContext;
use super::input::{InputEvent, InputRegistry, ShortcutMap};
use super::scene::{Scene, SceneManager};
use super::surface::{Color, Surface};
use super::widget::VisibilityPolicy;

//=== FrameDriver =========================================================

/// Owns the scene manager and context and advances them one tick at a time.
#[derive(Debug)]
pub struct FrameDriver {
    pub scenes: SceneManager,
    pub context: GlobalContext,
    pub shortcuts: ShortcutMap,
    background: Color,
}

impl FrameDriver {
    /// Default clear colour.
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(50, 50, 100);

    pub fn new(screen: Size, background: Color) -> Self {
        Self {
            scenes: SceneManager::new(),
            context: GlobalContext::new().with_screen_size(screen),
            shortcuts: ShortcutMap::new(),
            background,
        }
    }

    pub(crate) fn with_visibility_policy(mut self, policy: VisibilityPolicy) -> Self {
        self.context = self.context.with_visibility_policy(policy);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn input(&mut self) -> &mut InputRegistry {
        &mut self.context.input
    }

    /// Activates `scene` immediately, returning the previous one.
    pub fn set_scene(&mut self, scene: Box<dyn Scene>) -> Option<Box<dyn Scene>> {
        self.scenes.set_scene(scene, &mut self.context)
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one frame over `batches` (applied in order) and draws to `surface`.
    pub fn tick(&mut self, batches: &[Vec<InputEvent>], surface: &mut dyn Surface) {
        // 1. Input
        for event in batches.iter().flatten() {
            self.apply_event(event, surface);
        }

        // 2. Logic
        self.shortcuts.dispatch(&mut self.context);
        self.scenes.update(&mut self.context);

        // 3. Edges observed; clear them before the next batch
        self.context.input.input_update();

        // 4. Render
        surface.clear(self.background);
        self.scenes.draw(surface);

        // 5. Deferred scene changes
        let mut replaced = self.scenes.process_transitions(&mut self.context);
        if !replaced.is_empty() {
            debug!("Frame {}: {} scene(s) deactivated", self.context.frame(), replaced.len());
        }
        if let Some(last) = replaced.pop() {
            self.context.store_previous_scene(last);
        }

        self.context.advance_frame();
    }

    fn apply_event(&mut self, event: &InputEvent, surface: &mut dyn Surface) {
        trace!("Frame {}: {:?}", self.context.frame(), event);

        match *event {
            InputEvent::KeyDown(key) => self.context.input.key_down(key),
            InputEvent::KeyUp(key) => self.context.input.key_up(key),
            InputEvent::MouseButtonDown(button) => self.context.input.mouse_down(button),
            InputEvent::MouseButtonUp(button) => self.context.input.mouse_up(button),
            InputEvent::MouseMoved { x, y } => self.context.input.mouse_moved(x, y),
            InputEvent::FocusLost => self.context.input.release_all(),
            InputEvent::Resized { width, height } => {
                let size = Size::new(width, height);
                debug!("Screen resized to {}x{}", width, height);
                self.context.resize(size);
                surface.resize(size);
            }
            InputEvent::Unidentified => {}
        }

        self.scenes.handle_event(event, &mut self.context);
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(GlobalContext::DEFAULT_SCREEN, Self::DEFAULT_BACKGROUND)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
