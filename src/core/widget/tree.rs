//=========================================================================
// Widget Tree
//=========================================================================
//
// Arena of widget nodes with parent/child links stored as keys.
//
// Architecture:
//   SlotMap<WidgetId, Node>
//     Node { widget, position, size, visible, parent, children }
//
// Parents own their children: removing a node removes its subtree. The
// parent key is a back-reference used only for position resolution.
//
// Dispatch takes the widget out of its node for the duration of the call,
// so a widget can freely mutate the tree (including its own children)
// through `NodeCx` without aliasing itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use slotmap::{new_key_type, SlotMap};

//=== Internal Dependencies ===============================================

use super::{NodeCx, VisibilityPolicy, Widget, WidgetError};
use crate::core::geometry::{Point, Rect, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::surface::Surface;

//=== WidgetId ============================================================

new_key_type! {
    /// Stable handle to a node in a [`WidgetTree`].
    pub struct WidgetId;
}

//=== Node ================================================================

struct Node {
    /// `None` only while the widget is being dispatched.
    widget: Option<Box<dyn Widget>>,
    position: Point,
    size: Size,
    visible: bool,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

//=== WidgetTree ==========================================================

/// Retained-mode widget hierarchy.
///
/// # Examples
///
/// ```
/// use vertex_engine::core::geometry::{Point, Size};
/// use vertex_engine::core::widget::{Container, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let root = tree.insert(Container, Point::new(10, 20), Size::default());
/// let child = tree.insert(Container, Point::new(5, 5), Size::default());
/// let leaf = tree.insert(Container, Point::new(1, 1), Size::default());
///
/// tree.add_child(root, child).unwrap();
/// tree.add_child(child, leaf).unwrap();
///
/// assert_eq!(tree.global_position(leaf), Some(Point::new(16, 26)));
/// ```
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    /// `None` follows [`GlobalContext::visibility_policy`].
    policy: Option<VisibilityPolicy>,
}

impl WidgetTree {
    /// Creates a tree that uses the context's visibility policy.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            policy: None,
        }
    }

    /// Creates a tree that uses `policy` whatever the context says.
    pub fn with_policy(policy: VisibilityPolicy) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            policy: Some(policy),
        }
    }

    /// The tree's own policy, or `None` when it follows the context.
    pub fn policy(&self) -> Option<VisibilityPolicy> {
        self.policy
    }

    /// Overrides the context's policy; `None` goes back to following it.
    pub fn set_policy(&mut self, policy: Option<VisibilityPolicy>) {
        self.policy = policy;
    }

    //=====================================================================
    // Node Lifecycle
    //=====================================================================

    /// Inserts a detached node and returns its id.
    pub fn insert<W: Widget>(&mut self, widget: W, position: Point, size: Size) -> WidgetId {
        self.insert_boxed(Box::new(widget), position, size)
    }

    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>, position: Point, size: Size) -> WidgetId {
        self.nodes.insert(Node {
            widget: Some(widget),
            position,
            size,
            visible: true,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Appends `child` to `parent`'s children.
    ///
    /// A child already attached elsewhere is moved: it is first removed from
    /// its old parent's child list. Re-adding to the same parent moves it to
    /// the end (top of the paint order).
    ///
    /// # Errors
    ///
    /// - [`WidgetError::MissingNode`] if either id is stale.
    /// - [`WidgetError::CyclicAttach`] if `child` is `parent` or one of its
    ///   ancestors.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), WidgetError> {
        self.require(parent)?;
        self.require(child)?;

        if parent == child || self.is_ancestor(child, parent) {
            return Err(WidgetError::CyclicAttach { parent, child });
        }

        self.unlink(child);

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }

        trace!("Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Detaches `id` from its parent, making it a root. The subtree survives.
    pub fn detach(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.require(id)?;
        self.unlink(id);
        Ok(())
    }

    /// Destroys `id` and its entire subtree.
    ///
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, id: WidgetId) -> Result<usize, WidgetError> {
        self.require(id)?;
        self.unlink(id);

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                removed += 1;
            }
        }

        trace!("Removed {:?} ({} nodes)", id, removed);
        Ok(removed)
    }

    fn unlink(&mut self, id: WidgetId) {
        let Some(old_parent) = self.nodes.get_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(old_parent) {
            parent.children.retain(|&c| c != id);
        }
    }

    fn require(&self, id: WidgetId) -> Result<(), WidgetError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(WidgetError::MissingNode(id))
        }
    }

    //=====================================================================
    // Structure Queries
    //=====================================================================

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id)?.parent
    }

    /// Children in paint order; empty for stale ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    //=====================================================================
    // Geometry & Visibility
    //=====================================================================

    pub fn position(&self, id: WidgetId) -> Option<Point> {
        self.nodes.get(id).map(|node| node.position)
    }

    pub fn set_position(&mut self, id: WidgetId, position: Point) -> Result<(), WidgetError> {
        let node = self.nodes.get_mut(id).ok_or(WidgetError::MissingNode(id))?;
        node.position = position;
        Ok(())
    }

    pub fn size(&self, id: WidgetId) -> Option<Size> {
        self.nodes.get(id).map(|node| node.size)
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) -> Result<(), WidgetError> {
        let node = self.nodes.get_mut(id).ok_or(WidgetError::MissingNode(id))?;
        node.size = size;
        Ok(())
    }

    /// Local position plus the local positions of every ancestor.
    pub fn global_position(&self, id: WidgetId) -> Option<Point> {
        let node = self.nodes.get(id)?;
        let mut position = node.position;
        let mut current = node.parent;

        while let Some(parent) = current {
            let Some(parent_node) = self.nodes.get(parent) else {
                break;
            };
            position = position + parent_node.position;
            current = parent_node.parent;
        }

        Some(position)
    }

    /// Screen-space rectangle covered by the node.
    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        Some(Rect::new(self.global_position(id)?, self.size(id)?))
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.visible)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), WidgetError> {
        let node = self.nodes.get_mut(id).ok_or(WidgetError::MissingNode(id))?;
        node.visible = visible;
        Ok(())
    }

    pub fn show(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.set_visible(id, true)
    }

    pub fn hide(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.set_visible(id, false)
    }

    //=====================================================================
    // Widget Access
    //=====================================================================

    /// Borrows the node's widget as `T`.
    ///
    /// `None` if the id is stale, the widget is another type, or the widget
    /// is currently being dispatched.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let widget: &dyn Widget = self.nodes.get(id)?.widget.as_deref()?;
        widget.as_any().downcast_ref::<T>()
    }

    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget: &mut dyn Widget = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        widget.as_any_mut().downcast_mut::<T>()
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    /// Runs `id`'s `update`. Hidden nodes are skipped only under
    /// [`VisibilityPolicy::SuppressAll`].
    pub fn update(&mut self, id: WidgetId, ctx: &mut GlobalContext) {
        if !self.runs_logic(id, ctx) {
            return;
        }
        self.with_widget(id, |widget, cx| widget.update(cx, ctx));
    }

    /// Runs `id`'s `draw`. Hidden nodes (and therefore their subtrees) are
    /// never drawn.
    pub fn draw(&mut self, id: WidgetId, surface: &mut dyn Surface) {
        if !self.is_visible(id) {
            return;
        }
        self.with_widget(id, |widget, cx| widget.draw(cx, surface));
    }

    /// Runs `id`'s `handle_event`. Hidden nodes are skipped only under
    /// [`VisibilityPolicy::SuppressAll`].
    pub fn handle_event(&mut self, id: WidgetId, event: &InputEvent, ctx: &mut GlobalContext) {
        if !self.runs_logic(id, ctx) {
            return;
        }
        self.with_widget(id, |widget, cx| widget.handle_event(cx, event, ctx));
    }

    fn runs_logic(&self, id: WidgetId, ctx: &GlobalContext) -> bool {
        match self.policy.unwrap_or(ctx.visibility_policy()) {
            VisibilityPolicy::DrawOnly => self.contains(id),
            VisibilityPolicy::SuppressAll => self.is_visible(id),
        }
    }

    /// Takes the widget out of its node for one call and puts it back.
    ///
    /// Returns `None` if the node is gone or its widget is already out
    /// (re-entrant dispatch into a node on the current call path).
    fn with_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut NodeCx<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.nodes.get_mut(id)?.widget.take()?;

        let result = {
            let mut cx = NodeCx::new(self, id);
            f(widget.as_mut(), &mut cx)
        };

        // The widget may have removed its own node.
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Some(result)
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("policy", &self.policy)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
