//=========================================================================
// Controls
//=========================================================================
//
// Pointer-driven widgets: Button, Slider, OptionGroup.
//
// Hit-testing uses the registry's cursor against the node's screen
// bounds. The frame driver records pointer events in the registry before
// dispatching them, so the cursor is current when a widget sees the event.
// Only the left button interacts.
//
// Every control forwards to its children after handling an event itself,
// and draws itself beneath them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{NodeCx, Widget};
use crate::core::geometry::{Point, Rect, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::{InputEvent, MouseButton};
use crate::core::surface::{Color, Surface};

//=== Helpers =============================================================

type ClickCallback = Box<dyn FnMut(&mut GlobalContext) + Send>;
type ValueCallback = Box<dyn FnMut(f32, &mut GlobalContext) + Send>;
type SelectCallback = Box<dyn FnMut(&str, &mut GlobalContext) + Send>;

fn cursor_in(bounds: Rect, ctx: &GlobalContext) -> Option<Point> {
    ctx.input.cursor().filter(|&p| bounds.contains(p))
}

const IDLE: Color = Color::rgb(200, 200, 200);
const HOVER: Color = Color::rgb(230, 230, 230);
const ACTIVE: Color = Color::rgb(180, 180, 180);

//=== Button ==============================================================

/// Clickable rectangle.
///
/// A click is a left press and release that both land on the button. A
/// toggle button also flips its toggled state on each click.
///
/// ```
/// use vertex_engine::prelude::*;
///
/// let mut root = SceneRoot::new();
/// root.add(
///     Button::new().on_click(|ctx| ctx.clear_scene()),
///     Point::new(20, 20),
///     Button::DEFAULT_SIZE,
/// )
/// .unwrap();
/// ```
pub struct Button {
    pub color: Color,
    pub hover_color: Color,
    pub active_color: Color,
    /// A disabled button ignores the pointer.
    pub enabled: bool,
    toggle: bool,
    toggled: bool,
    hovered: bool,
    active: bool,
    on_click: Option<ClickCallback>,
}

impl Button {
    pub const DEFAULT_SIZE: Size = Size::new(200, 60);

    pub fn new() -> Self {
        Self {
            color: IDLE,
            hover_color: HOVER,
            active_color: ACTIVE,
            enabled: true,
            toggle: false,
            toggled: false,
            hovered: false,
            active: false,
            on_click: None,
        }
    }

    /// A button that stays down between clicks.
    pub fn toggle() -> Self {
        Self { toggle: true, ..Self::new() }
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut GlobalContext) + Send + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// `true` between a press on the button and the release.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    fn current_color(&self) -> Color {
        if self.active || self.toggled {
            self.active_color
        } else if self.hovered {
            self.hover_color
        } else {
            self.color
        }
    }

    fn click(&mut self, ctx: &mut GlobalContext) {
        if self.toggle {
            self.toggled = !self.toggled;
        }
        trace!("Button clicked (toggled: {})", self.toggled);
        if let Some(callback) = self.on_click.as_mut() {
            callback(ctx);
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Button {
    fn draw(&mut self, cx: &mut NodeCx<'_>, surface: &mut dyn Surface) {
        surface.fill_rect(cx.bounds(), self.current_color());
        cx.draw_children(surface);
    }

    fn handle_event(&mut self, cx: &mut NodeCx<'_>, event: &InputEvent, ctx: &mut GlobalContext) {
        if self.enabled {
            let over = cursor_in(cx.bounds(), ctx).is_some();
            match *event {
                InputEvent::MouseMoved { .. } => self.hovered = over,
                InputEvent::MouseButtonDown(MouseButton::Left) => {
                    self.hovered = over;
                    self.active = over;
                }
                InputEvent::MouseButtonUp(MouseButton::Left) => {
                    if self.active && over {
                        self.click(ctx);
                    }
                    self.active = false;
                }
                _ => {}
            }
        }
        cx.handle_event_children(event, ctx);
    }
}

//=== Slider ==============================================================

/// Horizontal slider over `[min, max]`.
///
/// Pressing on the track jumps the knob to the cursor and starts a drag;
/// the drag follows the cursor (clamped to the track) until release, even
/// outside the widget.
pub struct Slider {
    pub track_color: Color,
    pub knob_color: Color,
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
    on_change: Option<ValueCallback>,
}

impl Slider {
    pub const DEFAULT_SIZE: Size = Size::new(300, 20);
    pub const KNOB_WIDTH: u32 = 10;

    /// Starts at the midpoint of the range.
    ///
    /// # Panics
    ///
    /// Panics unless `min < max`.
    pub fn new(min: f32, max: f32) -> Self {
        assert!(min < max, "Slider range must be increasing, got {}..{}", min, max);
        Self {
            track_color: IDLE,
            knob_color: ACTIVE,
            min,
            max,
            value: min + (max - min) / 2.0,
            dragging: false,
            on_change: None,
        }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32, &mut GlobalContext) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the value (clamped to the range) without notifying.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn ratio(&self) -> f32 {
        (self.value - self.min) / (self.max - self.min)
    }

    fn drag_to(&mut self, x: i32, track: Rect, ctx: &mut GlobalContext) {
        if track.size.width == 0 {
            return;
        }
        let width = track.size.width as i64;
        let offset = (x as i64 - track.origin.x as i64).clamp(0, width);
        let value = self.min + offset as f32 / width as f32 * (self.max - self.min);

        if value != self.value {
            self.value = value;
            if let Some(callback) = self.on_change.as_mut() {
                callback(value, ctx);
            }
        }
    }
}

impl Widget for Slider {
    fn draw(&mut self, cx: &mut NodeCx<'_>, surface: &mut dyn Surface) {
        let track = cx.bounds();
        surface.fill_rect(track, self.track_color);

        let center = track.origin.x as f32 + self.ratio() * track.size.width as f32;
        let knob = Point::new(center as i32, track.origin.y) - Point::new(Self::KNOB_WIDTH as i32 / 2, 0);
        surface.fill_rect(Rect::new(knob, Size::new(Self::KNOB_WIDTH, track.size.height)), self.knob_color);

        cx.draw_children(surface);
    }

    fn handle_event(&mut self, cx: &mut NodeCx<'_>, event: &InputEvent, ctx: &mut GlobalContext) {
        let track = cx.bounds();
        match *event {
            InputEvent::MouseButtonDown(MouseButton::Left) => {
                if let Some(cursor) = cursor_in(track, ctx) {
                    self.dragging = true;
                    self.drag_to(cursor.x, track, ctx);
                }
            }
            InputEvent::MouseButtonUp(MouseButton::Left) => self.dragging = false,
            InputEvent::MouseMoved { .. } if self.dragging => {
                if let Some(cursor) = ctx.input.cursor() {
                    self.drag_to(cursor.x, track, ctx);
                }
            }
            // A drag never ends if the release happens while unfocused.
            InputEvent::FocusLost => self.dragging = false,
            _ => {}
        }
        cx.handle_event_children(event, ctx);
    }
}

//=== OptionGroup =========================================================

/// A row of mutually exclusive options laid out left to right in equal
/// segments.
///
/// Clicking an option selects it and deselects the rest; clicking the
/// selected option deselects it. Every click notifies with the clicked
/// option's label.
pub struct OptionGroup {
    pub color: Color,
    pub selected_color: Color,
    options: Vec<String>,
    selected: Option<usize>,
    on_select: Option<SelectCallback>,
}

impl OptionGroup {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color: IDLE,
            selected_color: ACTIVE,
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
            on_select: None,
        }
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &mut GlobalContext) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].as_str())
    }

    /// Selects `index` without notifying. Out-of-range indices deselect.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.options.len());
    }

    /// Screen rectangle of option `index` within `bounds`.
    fn segment(&self, bounds: Rect, index: usize) -> Rect {
        let count = self.options.len().max(1) as i64;
        let width = bounds.size.width as i64;
        let left = width * index as i64 / count;
        let right = width * (index as i64 + 1) / count;
        Rect::new(
            bounds.origin + Point::new(left as i32, 0),
            Size::new((right - left) as u32, bounds.size.height),
        )
    }

    fn option_at(&self, bounds: Rect, point: Point) -> Option<usize> {
        (0..self.options.len()).find(|&i| self.segment(bounds, i).contains(point))
    }
}

impl Widget for OptionGroup {
    fn draw(&mut self, cx: &mut NodeCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        for index in 0..self.options.len() {
            let color = if self.selected == Some(index) { self.selected_color } else { self.color };
            surface.fill_rect(self.segment(bounds, index), color);
        }
        cx.draw_children(surface);
    }

    fn handle_event(&mut self, cx: &mut NodeCx<'_>, event: &InputEvent, ctx: &mut GlobalContext) {
        if let InputEvent::MouseButtonDown(MouseButton::Left) = event {
            let bounds = cx.bounds();
            if let Some(index) = cursor_in(bounds, ctx).and_then(|p| self.option_at(bounds, p)) {
                self.selected = if self.selected == Some(index) { None } else { Some(index) };
                trace!("Option {:?} clicked", self.options[index]);
                if let Some(callback) = self.on_select.as_mut() {
                    callback(&self.options[index], ctx);
                }
            }
        }
        cx.handle_event_children(event, ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
