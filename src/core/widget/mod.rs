//=========================================================================
// Widget System
//=========================================================================
//
// Retained-mode widget tree with hierarchical positioning and recursive
// update / draw / event dispatch.
//
// Architecture:
//   WidgetTree (arena)
//     └─ Node ─► Box<dyn Widget>
//                  update / draw / handle_event (NodeCx gives tree access)
//
// Built-ins: Container and Panel here, pointer controls (Button, Slider,
// OptionGroup) in `controls`.
//
// Default widget behaviour forwards to every child in insertion order.
// A widget that overrides a method must call the matching `NodeCx`
// forwarding method itself if its children should still run.
//
//=========================================================================

//=== Module Declarations =================================================

mod controls;
mod tree;

//=== Public API ==========================================================

pub use controls::{Button, OptionGroup, Slider};
pub use tree::{WidgetId, WidgetTree};

//=== External Dependencies ===============================================

use std::any::Any;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Rect};
use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::surface::{Color, Surface};

//=== WidgetError =========================================================

/// Invalid tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The id refers to a node that was removed (or never existed).
    #[error("widget node {0:?} does not exist")]
    MissingNode(WidgetId),

    /// The attach would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CyclicAttach { parent: WidgetId, child: WidgetId },
}

//=== VisibilityPolicy ====================================================

/// What a hidden node suppresses.
///
/// Set once for the whole application through the engine builder; a
/// [`WidgetTree`] built with [`WidgetTree::with_policy`] overrides it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityPolicy {
    /// Hidden nodes skip drawing only; they still update and see events.
    #[default]
    DrawOnly,

    /// Hidden nodes skip drawing, updating and event handling.
    SuppressAll,
}

//=== Widget Trait ========================================================

/// Downcasting support for boxed widgets.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node's behaviour.
///
/// Every method has a default that forwards to the node's children, so a
/// grouping widget needs no code at all:
///
/// ```
/// use vertex_engine::core::widget::Widget;
///
/// struct Group;
/// impl Widget for Group {}
/// ```
pub trait Widget: AsAny + Send {
    /// Per-frame logic.
    fn update(&mut self, cx: &mut NodeCx<'_>, ctx: &mut GlobalContext) {
        cx.update_children(ctx);
    }

    /// Rendering. Later children paint over earlier ones.
    fn draw(&mut self, cx: &mut NodeCx<'_>, surface: &mut dyn Surface) {
        cx.draw_children(surface);
    }

    /// Input. Every child sees every event; there is no stop-propagation.
    fn handle_event(&mut self, cx: &mut NodeCx<'_>, event: &InputEvent, ctx: &mut GlobalContext) {
        cx.handle_event_children(event, ctx);
    }
}

//=== NodeCx ==============================================================

/// The tree as seen from the node currently being dispatched.
pub struct NodeCx<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl<'a> NodeCx<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, id: WidgetId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn tree(&self) -> &WidgetTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut *self.tree
    }

    pub fn global_position(&self) -> Point {
        self.tree.global_position(self.id).unwrap_or_default()
    }

    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.id).unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.tree.is_visible(self.id)
    }

    //--- Forwarding -------------------------------------------------------

    pub fn update_children(&mut self, ctx: &mut GlobalContext) {
        for child in self.tree.children(self.id).to_vec() {
            self.tree.update(child, ctx);
        }
    }

    pub fn draw_children(&mut self, surface: &mut dyn Surface) {
        for child in self.tree.children(self.id).to_vec() {
            self.tree.draw(child, surface);
        }
    }

    pub fn handle_event_children(&mut self, event: &InputEvent, ctx: &mut GlobalContext) {
        for child in self.tree.children(self.id).to_vec() {
            self.tree.handle_event(child, event, ctx);
        }
    }
}

//=== Built-in Widgets ====================================================

/// Grouping node with only the default (forwarding) behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl Widget for Container {}

/// Solid rectangle filling the node's bounds, drawn beneath its children.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    pub color: Color,
}

impl Panel {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Widget for Panel {
    fn draw(&mut self, cx: &mut NodeCx<'_>, surface: &mut dyn Surface) {
        surface.fill_rect(cx.bounds(), self.color);
        cx.draw_children(surface);
    }
}
