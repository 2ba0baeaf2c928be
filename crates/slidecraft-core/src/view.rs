//! Component view: the gesture transform controller of one component.
//!
//! The view translates pointer and delta-handle events into attribute
//! updates, snapshots state in a [`GestureSession`] at gesture start and
//! turns the session into at most one undo command at gesture stop. It keeps
//! a [`ViewSurface`] (the rendered state of the element) in sync with the
//! model through attribute listeners registered at construction.
//!
//! ## Modifier behaviors
//!
//! | Modifier      | Drag        | Rotate     | Scale             | Press    |
//! |---------------|-------------|------------|-------------------|----------|
//! | **Shift**     | Grid snap   | π/8 steps  | Independent axes  |          |
//! | **Ctrl/Meta** |             |            |                   | Deselect |

use crate::commands::{ComponentCommand, UndoHistory};
use crate::component::{Attribute, Attributes, Axis, Component, ComponentId};
use crate::config::EditorConfig;
use crate::events::{ComponentEvent, EventKind, Listener, SubscriptionId};
use crate::gesture::{
    GestureSession, ScaleDim, SkewAxis, angle_from, drag_target, rotation_target, scale_target,
    skew_target,
};
use crate::input::{Modifiers, MouseButton};
use crate::layout::ElementLayout;
use crate::transform;
use crate::zorder::ZIndexSource;
use kurbo::{Point, Size, Vec2};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Class of every component element.
pub const COMPONENT_CLASS: &str = "component";
/// Class present while the component is selected.
pub const SELECTED_CLASS: &str = "selected";
/// Class present while the component is being dragged.
pub const DRAGGED_CLASS: &str = "dragged";

/// Rendered state of a component element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSurface {
    pub left: f64,
    pub top: f64,
    /// Outer box size; unset until an original size is known.
    pub size: Option<Size>,
    pub z_index: u64,
    pub classes: Vec<String>,
    /// Outer element transform (rotation).
    pub transform: String,
    /// Scale layer transform.
    pub scale_transform: String,
    /// Content layer transform (skews).
    pub content_transform: String,
    /// Content layer class attribute.
    pub content_class: String,
    /// CSS text colour.
    pub color: Option<String>,
    /// Values shown in the x/y coordinate inputs.
    pub x_input: String,
    pub y_input: String,
    pub rendered: bool,
    /// Set when the model asked the view to detach.
    pub detached: bool,
}

impl Default for ViewSurface {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            size: None,
            z_index: 0,
            classes: vec![COMPONENT_CLASS.to_string()],
            transform: String::new(),
            scale_transform: String::new(),
            content_transform: String::new(),
            content_class: content_class(""),
            color: None,
            x_input: String::new(),
            y_input: String::new(),
            rendered: false,
            detached: false,
        }
    }
}

impl ViewSurface {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn apply_transform(&mut self, attrs: &Attributes, orig_size: Option<Size>) {
        let composed = transform::compose(attrs, orig_size);
        self.content_transform = composed.content;
        self.scale_transform = composed.scale_layer;
        self.transform = composed.outer;
        if composed.box_size.is_some() {
            self.size = composed.box_size;
        }
    }

    fn set_left(&mut self, x: f64) {
        self.left = x;
        self.x_input = x.to_string();
    }

    fn set_top(&mut self, y: f64) {
        self.top = y;
        self.y_input = y.to_string();
    }
}

fn content_class(custom: &str) -> String {
    format!("content {}", custom).trim_end().to_string()
}

fn css_color(color: Option<&str>) -> Option<String> {
    color.map(|hex| format!("#{}", hex.trim_start_matches('#')))
}

/// Gesture controller and rendered state of one component.
pub struct ComponentView {
    component_id: ComponentId,
    config: EditorConfig,
    surface: Rc<RefCell<ViewSurface>>,
    orig_size: Rc<Cell<Option<Size>>>,
    subscriptions: Vec<SubscriptionId>,
    session: Option<GestureSession>,
    pending_move: Option<ComponentCommand>,
    z_index: Rc<dyn ZIndexSource>,
    /// Whether pointer drags move the component.
    pub allow_dragging: bool,
}

impl std::fmt::Debug for ComponentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentView")
            .field("component_id", &self.component_id)
            .field("session", &self.session)
            .field("orig_size", &self.orig_size.get())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl ComponentView {
    /// Create a view for `component`, registering its listeners and taking
    /// the next z-index.
    pub fn new(
        component: &mut Component,
        z_index: Rc<dyn ZIndexSource>,
        config: EditorConfig,
    ) -> Self {
        let surface = Rc::new(RefCell::new(ViewSurface {
            z_index: z_index.next(),
            ..ViewSurface::default()
        }));
        let orig_size = Rc::new(Cell::new(None));
        let mut view = Self {
            component_id: component.id(),
            config,
            surface,
            orig_size,
            subscriptions: Vec::new(),
            session: None,
            pending_move: None,
            z_index,
            allow_dragging: true,
        };
        view.register_listeners(component);
        view
    }

    fn register_listeners(&mut self, component: &mut Component) {
        let mut listen = |kind: EventKind, listener: Listener| {
            self.subscriptions.push(component.subscribe(kind, listener));
        };

        let surface = self.surface.clone();
        listen(
            EventKind::Change(Attribute::Selected),
            Box::new(move |attrs: &Attributes, _: ComponentEvent| {
                surface.borrow_mut().toggle_class(SELECTED_CLASS, attrs.selected);
            }),
        );

        let surface = self.surface.clone();
        listen(
            EventKind::Change(Attribute::Color),
            Box::new(move |attrs: &Attributes, _: ComponentEvent| {
                surface.borrow_mut().color = css_color(attrs.color.as_deref());
            }),
        );

        let surface = self.surface.clone();
        listen(
            EventKind::Unrender,
            Box::new(move |_: &Attributes, _: ComponentEvent| surface.borrow_mut().detached = true),
        );

        let refresh_kinds = std::iter::once(EventKind::Rerender)
            .chain(Attribute::TRANSFORMS.into_iter().map(EventKind::Change));
        for kind in refresh_kinds {
            let surface = self.surface.clone();
            let orig_size = self.orig_size.clone();
            listen(
                kind,
                Box::new(move |attrs: &Attributes, _: ComponentEvent| {
                    surface.borrow_mut().apply_transform(attrs, orig_size.get());
                }),
            );
        }

        let surface = self.surface.clone();
        listen(
            EventKind::Change(Attribute::X),
            Box::new(move |attrs: &Attributes, _: ComponentEvent| surface.borrow_mut().set_left(attrs.x)),
        );

        let surface = self.surface.clone();
        listen(
            EventKind::Change(Attribute::Y),
            Box::new(move |attrs: &Attributes, _: ComponentEvent| surface.borrow_mut().set_top(attrs.y)),
        );

        let surface = self.surface.clone();
        listen(
            EventKind::Change(Attribute::CustomClasses),
            Box::new(move |attrs: &Attributes, _: ComponentEvent| {
                surface.borrow_mut().content_class = content_class(&attrs.custom_classes);
            }),
        );
    }

    /// Deregister every listener. The view is inert afterwards.
    pub fn dispose(&mut self, component: &mut Component) {
        for id in self.subscriptions.drain(..) {
            component.unsubscribe(id);
        }
        self.session = None;
        self.pending_move = None;
        log::debug!("Disposed view of component {}", self.component_id);
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    /// Snapshot of the rendered state.
    pub fn surface(&self) -> ViewSurface {
        self.surface.borrow().clone()
    }

    /// Original rendered size, once captured.
    pub fn orig_size(&self) -> Option<Size> {
        self.orig_size.get()
    }

    /// The gesture in progress, if any.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.session, Some(GestureSession::Drag { .. }))
    }

    /// Render the element from the model's current attributes.
    pub fn render(&mut self, component: &Component, layout: &dyn ElementLayout) -> ViewSurface {
        let attrs = component.attributes();
        self.capture_orig_size(layout.rendered_size());
        {
            let mut surface = self.surface.borrow_mut();
            surface.content_class = content_class(&attrs.custom_classes);
            surface.toggle_class(SELECTED_CLASS, attrs.selected);
            surface.color = css_color(attrs.color.as_deref());
            surface.set_left(attrs.x);
            surface.set_top(attrs.y);
            surface.rendered = true;
            surface.detached = false;
        }
        self.refresh_transform(component);
        self.surface()
    }

    /// Recompose the layered transforms. Idempotent.
    pub fn refresh_transform(&self, component: &Component) {
        self.surface
            .borrow_mut()
            .apply_transform(component.attributes(), self.orig_size.get());
    }

    fn capture_orig_size(&self, size: Size) -> Option<Size> {
        if self.orig_size.get().is_none() && size.width > 0.0 && size.height > 0.0 {
            self.orig_size.set(Some(size));
        }
        self.orig_size.get()
    }

    fn begin(&mut self, session: GestureSession) -> bool {
        if let Some(active) = &self.session {
            log::warn!(
                "Ignoring {} start on component {}: {} gesture in progress",
                session.kind(),
                self.component_id,
                active.kind()
            );
            return false;
        }
        log::debug!("{} start on component {}", session.kind(), self.component_id);
        self.session = Some(session);
        true
    }

    fn raise(&self) {
        let z = self.z_index.next();
        self.surface.borrow_mut().z_index = z;
    }

    /// Primary-button press: select and bring to front.
    ///
    /// Returns false for other buttons. Starting the drag of the selection
    /// is up to the caller, which broadcasts it to every selected component.
    pub fn mouse_down(&mut self, component: &mut Component, button: MouseButton, modifiers: &Modifiers) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.select(component, modifiers);
        self.raise();
        true
    }

    /// Select the component, or deselect it when ctrl/meta is held and it
    /// is already selected.
    pub fn select(&mut self, component: &mut Component, modifiers: &Modifiers) {
        let selected = !(modifiers.toggles_selection() && component.is_selected());
        component.set_selected(selected);
    }

    /// Click: bring to front.
    pub fn clicked(&mut self) {
        self.raise();
    }

    /// Start dragging from `pointer` (page coordinates).
    pub fn drag_start(&mut self, component: &Component, pointer: Point, layout: &dyn ElementLayout) -> bool {
        let started = self.begin(GestureSession::Drag {
            start_position: component.position(),
            start_pointer: pointer,
            drag_scale: layout.drag_scale(),
        });
        if started {
            self.surface.borrow_mut().add_class(DRAGGED_CLASS);
        }
        started
    }

    pub fn drag(&mut self, component: &mut Component, pointer: Point, modifiers: &Modifiers) {
        if !self.allow_dragging {
            return;
        }
        let Some(GestureSession::Drag {
            start_position,
            start_pointer,
            drag_scale,
        }) = self.session
        else {
            return;
        };
        let grid = modifiers.snap().then_some(self.config.grid_size);
        let target = drag_target(start_position, start_pointer, pointer, drag_scale, grid);
        component.set_int(Attribute::X, target.x);
        component.set_int(Attribute::Y, target.y);
    }

    /// Finish a drag. A move command is kept as pending only when both axes
    /// moved; collect it with [`ComponentView::take_pending_move`].
    pub fn drag_stop(&mut self, component: &Component) {
        self.pending_move = None;
        let Some(GestureSession::Drag { start_position, .. }) = self.session else {
            return;
        };
        self.session = None;
        self.surface.borrow_mut().remove_class(DRAGGED_CLASS);

        let end = component.position();
        if start_position.x != end.x && start_position.y != end.y {
            self.pending_move = Some(ComponentCommand::move_from(start_position, component));
        }
        log::debug!("drag stop on component {}", self.component_id);
    }

    /// Take the move command recorded by the last drag stop.
    pub fn take_pending_move(&mut self) -> Option<ComponentCommand> {
        self.pending_move.take()
    }

    /// Set one axis from text typed into a coordinate input.
    ///
    /// The whole trimmed input must parse as a number. Text with a numeric
    /// prefix such as `12abc` is ignored rather than read as `12`.
    pub fn manual_move(&mut self, component: &mut Component, axis: Axis, input: &str) -> bool {
        match input.trim().parse::<f64>() {
            Ok(value) => component.set_int(axis.attribute(), value),
            Err(_) => {
                log::warn!("Ignoring non-numeric {} input {:?}", axis.attribute(), input);
                false
            }
        }
    }

    /// Center the component on one axis of its container.
    pub fn center(
        &mut self,
        component: &mut Component,
        axis: Axis,
        container: Size,
        element: Size,
        history: &mut dyn UndoHistory,
    ) {
        let start = component.position();
        let target = axis.extent(container) / 2.0 - axis.extent(element) / 2.0;
        if component.set_int(axis.attribute(), target) {
            history.push(ComponentCommand::move_from(start, component));
        }
    }

    /// Start rotating around the element's bounding-box centre.
    pub fn rotate_start(&mut self, component: &Component, pointer: Point, layout: &dyn ElementLayout) -> bool {
        let origin = layout.bounding_center();
        self.begin(GestureSession::Rotate {
            initial: component.rotate(),
            origin,
            offset: angle_from(origin, pointer),
        })
    }

    pub fn rotate(&mut self, component: &mut Component, pointer: Point, modifiers: &Modifiers) {
        let Some(GestureSession::Rotate { initial, origin, offset }) = self.session else {
            return;
        };
        let steps = modifiers.snap().then_some(self.config.angle_steps);
        let angle = rotation_target(initial, offset, angle_from(origin, pointer), steps);
        component.set_float(Attribute::Rotate, angle);
    }

    pub fn rotate_stop(&mut self, component: &Component, history: &mut dyn UndoHistory) {
        let Some(GestureSession::Rotate { initial, .. }) = self.session else {
            return;
        };
        self.session = None;
        if component.rotate() != initial {
            history.push(ComponentCommand::rotate_from(initial, component));
        }
    }

    pub fn skew_start(&mut self, component: &Component, axis: SkewAxis) -> bool {
        let initial = component.attributes().number(axis.attribute()).unwrap_or(0.0);
        self.begin(GestureSession::Skew { axis, initial })
    }

    /// `delta` is the handle's offset from its own drag start.
    pub fn skew(&mut self, component: &mut Component, axis: SkewAxis, delta: Vec2) {
        let Some(GestureSession::Skew { axis: active, initial }) = self.session else {
            return;
        };
        if active != axis {
            return;
        }
        let angle = skew_target(initial, axis.along(delta), self.config.skew_sensitivity);
        component.set_float(axis.attribute(), angle);
    }

    pub fn skew_stop(&mut self, component: &Component, axis: SkewAxis, history: &mut dyn UndoHistory) {
        let Some(GestureSession::Skew { axis: active, initial }) = self.session else {
            return;
        };
        if active != axis {
            return;
        }
        self.session = None;
        let (current, cmd) = match axis {
            SkewAxis::X => (component.skew_x(), ComponentCommand::skew_x_from(initial, component)),
            SkewAxis::Y => (component.skew_y(), ComponentCommand::skew_y_from(initial, component)),
        };
        if current != initial {
            history.push(cmd);
        }
    }

    pub fn scale_start(&mut self, component: &Component, layout: &dyn ElementLayout) -> bool {
        let initial = component.scale();
        let orig_size = self.capture_orig_size(layout.rendered_size());
        let dim = ScaleDim::new(initial, orig_size.unwrap_or(Size::ZERO), component.rotate());
        self.begin(GestureSession::Scale {
            initial,
            drag_scale: layout.drag_scale(),
            orig_size,
            dim,
        })
    }

    /// `delta` is the handle's offset from its own drag start. Shift unlocks
    /// the aspect ratio.
    pub fn scale(&mut self, component: &mut Component, delta: Vec2, modifiers: &Modifiers) {
        let Some(GestureSession::Scale {
            initial,
            orig_size,
            dim,
            ..
        }) = self.session
        else {
            return;
        };
        component.set_scale(scale_target(initial, dim, orig_size, delta, modifiers.snap()));
    }

    pub fn scale_stop(&mut self, component: &Component, history: &mut dyn UndoHistory) {
        let Some(GestureSession::Scale { initial, .. }) = self.session else {
            return;
        };
        self.session = None;
        let scale = component.scale();
        if scale.x != initial.x || scale.y != initial.y {
            history.push(ComponentCommand::scale_from(initial, component));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandList;
    use crate::component::Scale;
    use crate::layout::StaticLayout;
    use crate::zorder::ZTracker;
    use std::f64::consts::FRAC_PI_4;

    fn setup(component: &mut Component) -> ComponentView {
        ComponentView::new(component, Rc::new(ZTracker::new()), EditorConfig::default())
    }

    fn layout() -> StaticLayout {
        StaticLayout::new(Point::new(0.0, 0.0), Size::new(100.0, 50.0))
    }

    #[test]
    fn test_render_captures_orig_size() {
        let mut component = Component::at(10.0, 20.0);
        component.set_custom_classes("title");
        let mut view = setup(&mut component);

        let surface = view.render(&component, &layout());
        assert!(surface.rendered);
        assert_eq!(surface.left, 10.0);
        assert_eq!(surface.top, 20.0);
        assert_eq!(surface.size, Some(Size::new(100.0, 50.0)));
        assert_eq!(surface.content_class, "content title");
        assert_eq!(surface.transform, "rotate(0rad)");
        assert_eq!(surface.scale_transform, "scale(1,1)");

        // A later, larger render does not replace the original size.
        view.render(&component, &StaticLayout::new(Point::ZERO, Size::new(300.0, 300.0)));
        assert_eq!(view.orig_size(), Some(Size::new(100.0, 50.0)));
    }

    #[test]
    fn test_zero_size_is_not_captured() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        view.render(&component, &StaticLayout::default());
        assert_eq!(view.orig_size(), None);
        assert_eq!(view.surface().size, None);
    }

    #[test]
    fn test_listeners_follow_model() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        view.render(&component, &layout());

        component.set_selected(true);
        component.set_float(Attribute::SkewX, 0.5);
        component.set_int(Attribute::X, 42.0);
        component.set_color(Some("ff0000".to_string()));

        let surface = view.surface();
        assert!(surface.has_class(SELECTED_CLASS));
        assert_eq!(surface.content_transform, "skewX(0.5rad) ");
        assert_eq!(surface.left, 42.0);
        assert_eq!(surface.x_input, "42");
        assert_eq!(surface.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_color_with_hash_is_not_doubled() {
        let mut component = Component::new();
        let view = setup(&mut component);

        component.set_color(Some("#00ff00".to_string()));
        assert_eq!(view.surface().color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_dispose_removes_all_listeners() {
        let mut component = Component::new();
        let before = component.listener_count();
        let mut view = setup(&mut component);
        assert!(component.listener_count() > before);

        view.dispose(&mut component);
        assert_eq!(component.listener_count(), before);

        component.set_int(Attribute::X, 99.0);
        assert_eq!(view.surface().left, 0.0);
    }

    #[test]
    fn test_drag_records_pending_move() {
        let mut component = Component::at(10.0, 10.0);
        let mut view = setup(&mut component);

        assert!(view.drag_start(&component, Point::new(200.0, 200.0), &layout()));
        assert!(view.surface().has_class(DRAGGED_CLASS));
        view.drag(&mut component, Point::new(215.0, 195.0), &Modifiers::default());
        view.drag_stop(&component);

        assert_eq!(component.position(), Point::new(25.0, 5.0));
        assert!(!view.surface().has_class(DRAGGED_CLASS));
        let cmd = view.take_pending_move().unwrap();
        assert_eq!(
            cmd,
            ComponentCommand::Move {
                id: component.id(),
                from: Point::new(10.0, 10.0),
                to: Point::new(25.0, 5.0),
            }
        );
        assert!(view.take_pending_move().is_none());
    }

    #[test]
    fn test_single_axis_drag_records_nothing() {
        let mut component = Component::at(10.0, 10.0);
        let mut view = setup(&mut component);

        view.drag_start(&component, Point::ZERO, &layout());
        view.drag(&mut component, Point::new(30.0, 0.0), &Modifiers::default());
        view.drag_stop(&component);

        assert_eq!(component.position(), Point::new(40.0, 10.0));
        assert!(view.take_pending_move().is_none());
    }

    #[test]
    fn test_drag_disabled() {
        let mut component = Component::at(10.0, 10.0);
        let mut view = setup(&mut component);
        view.allow_dragging = false;

        view.drag_start(&component, Point::ZERO, &layout());
        view.drag(&mut component, Point::new(30.0, 30.0), &Modifiers::default());
        view.drag_stop(&component);
        assert_eq!(component.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_with_zoom_and_snap() {
        let mut component = Component::at(0.0, 0.0);
        let mut view = setup(&mut component);
        let zoomed = layout().with_parent_transform("matrix(0.5, 0, 0, 0.5, 0, 0)");

        view.drag_start(&component, Point::ZERO, &zoomed);
        view.drag(&mut component, Point::new(25.0, 10.0), &Modifiers::default());
        assert_eq!(component.position(), Point::new(50.0, 20.0));

        view.drag(&mut component, Point::new(25.0, 10.0), &Modifiers::shift());
        assert_eq!(component.position(), Point::new(40.0, 20.0));
    }

    #[test]
    fn test_skew_x_quarter() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();

        view.skew_start(&component, SkewAxis::X);
        view.skew(&mut component, SkewAxis::X, Vec2::new(22.0, 5.0));
        view.skew_stop(&component, SkewAxis::X, &mut history);

        assert!((component.skew_x() - FRAC_PI_4).abs() < 1e-12);
        assert_eq!(component.skew_y(), 0.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|c| c.label()), Some("Skew X"));
    }

    #[test]
    fn test_skew_y_uses_vertical_delta() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();

        view.skew_start(&component, SkewAxis::Y);
        // Events for the other handle are ignored.
        view.skew(&mut component, SkewAxis::X, Vec2::new(22.0, 0.0));
        view.skew(&mut component, SkewAxis::Y, Vec2::new(100.0, -22.0));
        view.skew_stop(&component, SkewAxis::Y, &mut history);

        assert!((component.skew_y() + FRAC_PI_4).abs() < 1e-12);
        assert_eq!(component.skew_x(), 0.0);
        assert_eq!(history.last().map(|c| c.label()), Some("Skew Y"));
    }

    #[test]
    fn test_rotate_records_command() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();
        let around = StaticLayout::new(Point::new(50.0, 75.0), Size::new(100.0, 50.0));

        view.rotate_start(&component, Point::new(150.0, 100.0), &around);
        view.rotate(&mut component, Point::new(100.0, 150.0), &Modifiers::default());
        view.rotate_stop(&component, &mut history);

        assert!((component.rotate() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(view.surface().transform, format!("rotate({}rad)", component.rotate()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_scale_gesture() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();
        view.render(&component, &layout());

        view.scale_start(&component, &layout());
        view.scale(&mut component, Vec2::new(100.0, 0.0), &Modifiers::default());
        view.scale_stop(&component, &mut history);

        assert_eq!(component.scale(), Scale::derived(2.0, 2.0, Some(Size::new(100.0, 50.0))));
        let surface = view.surface();
        assert_eq!(surface.size, Some(Size::new(200.0, 100.0)));
        assert_eq!(surface.scale_transform, "scale(2,2)");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_noop_gestures_record_nothing() {
        let mut component = Component::at(5.0, 5.0);
        let mut view = setup(&mut component);
        let mut history = CommandList::new();

        view.rotate_start(&component, Point::new(10.0, 0.0), &layout());
        view.rotate_stop(&component, &mut history);
        view.scale_start(&component, &layout());
        view.scale(&mut component, Vec2::ZERO, &Modifiers::default());
        view.scale_stop(&component, &mut history);
        view.skew_start(&component, SkewAxis::X);
        view.skew_stop(&component, SkewAxis::X, &mut history);
        view.drag_start(&component, Point::ZERO, &layout());
        view.drag_stop(&component);

        assert!(history.is_empty());
        assert!(view.take_pending_move().is_none());
    }

    #[test]
    fn test_overlapping_gesture_is_rejected() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();

        assert!(view.rotate_start(&component, Point::new(10.0, 0.0), &layout()));
        assert!(!view.scale_start(&component, &layout()));
        view.scale(&mut component, Vec2::new(50.0, 50.0), &Modifiers::default());
        view.scale_stop(&component, &mut history);

        assert_eq!(component.scale(), Scale::identity());
        assert!(view.session().is_some());
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let mut history = CommandList::new();
        view.rotate_stop(&component, &mut history);
        view.scale_stop(&component, &mut history);
        view.skew_stop(&component, SkewAxis::Y, &mut history);
        view.drag_stop(&component);
        assert!(history.is_empty());
    }

    #[test]
    fn test_select_and_deselect() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        let z0 = view.surface().z_index;
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };

        assert!(view.mouse_down(&mut component, MouseButton::Left, &ctrl));
        assert!(component.is_selected());
        let z1 = view.surface().z_index;
        assert!(z1 > z0);

        view.mouse_down(&mut component, MouseButton::Left, &ctrl);
        assert!(!component.is_selected());

        assert!(!view.mouse_down(&mut component, MouseButton::Right, &Modifiers::default()));
        assert!(!component.is_selected());

        view.clicked();
        assert!(view.surface().z_index > z1);
    }

    #[test]
    fn test_manual_move_and_center() {
        let mut component = Component::at(10.0, 10.0);
        let mut view = setup(&mut component);
        let mut history = CommandList::new();

        assert!(view.manual_move(&mut component, Axis::X, " 64 "));
        assert!(!view.manual_move(&mut component, Axis::Y, "abc"));
        assert!(!view.manual_move(&mut component, Axis::Y, "12abc"));
        assert_eq!(component.position(), Point::new(64.0, 10.0));

        let container = Size::new(1024.0, 768.0);
        let element = Size::new(101.0, 50.0);
        view.center(&mut component, Axis::X, container, element, &mut history);
        assert_eq!(component.x(), 461.0);
        assert_eq!(history.len(), 1);

        view.center(&mut component, Axis::X, container, element, &mut history);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_unrender_marks_detached() {
        let mut component = Component::new();
        let mut view = setup(&mut component);
        view.render(&component, &layout());
        component.unrender();
        assert!(view.surface().detached);
    }
}
