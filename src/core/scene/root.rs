//=========================================================================
// Scene Root
//=========================================================================
//
// A widget tree plus the container node a scene hangs its widgets on.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::surface::Surface;
use crate::core::widget::{Container, VisibilityPolicy, Widget, WidgetError, WidgetId, WidgetTree};

//=== SceneRoot ===========================================================

/// Owns a scene's widgets. The root container sits at the origin, so its
/// direct children's local positions are screen positions.
#[derive(Debug)]
pub struct SceneRoot {
    tree: WidgetTree,
    root: WidgetId,
}

impl SceneRoot {
    /// A root whose tree follows the context's visibility policy.
    pub fn new() -> Self {
        Self::from_tree(WidgetTree::new())
    }

    /// A root whose tree always uses `policy`.
    pub fn with_policy(policy: VisibilityPolicy) -> Self {
        Self::from_tree(WidgetTree::with_policy(policy))
    }

    fn from_tree(mut tree: WidgetTree) -> Self {
        let root = tree.insert(Container, Point::ORIGIN, Size::default());
        Self { tree, root }
    }

    /// Id of the root container.
    pub fn id(&self) -> WidgetId {
        self.root
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Inserts `widget` and attaches it as the root's last child.
    pub fn add<W: Widget>(&mut self, widget: W, position: Point, size: Size) -> Result<WidgetId, WidgetError> {
        let id = self.tree.insert(widget, position, size);
        self.tree.add_child(self.root, id)?;
        Ok(id)
    }

    /// Destroys `id` and its subtree, returning the number of nodes removed.
    ///
    /// The root container is kept; asking to remove it removes nothing.
    pub fn remove(&mut self, id: WidgetId) -> Result<usize, WidgetError> {
        if id == self.root {
            warn!("Refusing to remove the root container of a scene");
            return Ok(0);
        }
        self.tree.remove(id)
    }

    //--- Dispatch ---------------------------------------------------------

    pub fn update(&mut self, ctx: &mut GlobalContext) {
        self.tree.update(self.root, ctx);
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) {
        self.tree.draw(self.root, surface);
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut GlobalContext) {
        self.tree.handle_event(self.root, event, ctx);
    }

    //--- Visibility -------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.tree.is_visible(self.root)
    }

    pub fn show(&mut self) {
        if let Err(e) = self.tree.show(self.root) {
            warn!("Cannot show scene root: {}", e);
        }
    }

    pub fn hide(&mut self) {
        if let Err(e) = self.tree.hide(self.root) {
            warn!("Cannot hide scene root: {}", e);
        }
    }
}

impl Default for SceneRoot {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
