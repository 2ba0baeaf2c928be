//! Slide: the components on one slide, their views and the undo history.
//!
//! The slide routes pointer input to views. A press on one component starts
//! a drag of the whole selection, and releasing the pointer folds every
//! per-component move into a single combined history step.

use crate::commands::{CommandList, CommandResult, ComponentCommand, ComponentStore, UndoHistory};
use crate::component::{Axis, Component, ComponentId};
use crate::config::EditorConfig;
use crate::gesture::SkewAxis;
use crate::input::{DeltaDrag, DeltaHandle, Modifiers, MouseButton};
use crate::layout::ElementLayout;
use crate::view::{ComponentView, ViewSurface};
use crate::zorder::{ZIndexSource, ZTracker};
use kurbo::{Point, Size};
use std::collections::HashMap;
use std::rc::Rc;

/// Label of the history step produced by a selection drag.
pub const MOVE_LABEL: &str = "Move";

/// Components in insertion order.
#[derive(Debug, Default)]
struct Components(Vec<Component>);

impl Components {
    fn get(&self, id: ComponentId) -> Option<&Component> {
        self.0.iter().find(|c| c.id() == id)
    }

    fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.0.iter_mut().find(|c| c.id() == id)
    }

    fn remove(&mut self, id: ComponentId) -> Option<Component> {
        let idx = self.0.iter().position(|c| c.id() == id)?;
        Some(self.0.remove(idx))
    }
}

impl ComponentStore for Components {
    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.get_mut(id)
    }
}

/// A slide of components with one view each.
pub struct Slide {
    components: Components,
    views: HashMap<ComponentId, ComponentView>,
    z_index: Rc<dyn ZIndexSource>,
    config: EditorConfig,
    history: CommandList,
}

impl std::fmt::Debug for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slide")
            .field("components", &self.components.0.len())
            .field("history", &self.history.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Slide {
    /// Create an empty slide stacking on the process-wide z-index counter.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_z_index(config, Rc::new(ZTracker::global()))
    }

    /// Create an empty slide with its own z-index source.
    pub fn with_z_index(config: EditorConfig, z_index: Rc<dyn ZIndexSource>) -> Self {
        let history = CommandList::with_depth(config.max_undo_history);
        Self {
            components: Components::default(),
            views: HashMap::new(),
            z_index,
            config,
            history,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Add a component and create its view.
    pub fn add(&mut self, mut component: Component) -> ComponentId {
        let id = component.id();
        let view = ComponentView::new(&mut component, self.z_index.clone(), self.config.clone());
        self.components.0.push(component);
        self.views.insert(id, view);
        log::debug!("Added component {}", id);
        id
    }

    /// Remove components, detaching and disposing their views. History steps
    /// touching a removed component are dropped with it.
    pub fn remove(&mut self, ids: &[ComponentId]) -> Vec<Component> {
        let mut removed = Vec::new();
        for &id in ids {
            self.unrender(id);
            if let Some(component) = self.components.remove(id) {
                log::debug!("Removed component {}", id);
                self.history.forget(id);
                removed.push(component);
            }
        }
        removed
    }

    /// The remove button of a component was clicked.
    pub fn remove_clicked(&mut self, id: ComponentId) -> Option<Component> {
        self.remove(&[id]).pop()
    }

    /// Detach the view of a component. The component stays on the slide.
    pub fn unrender(&mut self, id: ComponentId) {
        let Some(component) = self.components.get_mut(id) else {
            return;
        };
        component.unrender();
        if let Some(mut view) = self.views.remove(&id) {
            view.dispose(component);
        }
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub fn view(&self, id: ComponentId) -> Option<&ComponentView> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: ComponentId) -> Option<&mut ComponentView> {
        self.views.get_mut(&id)
    }

    /// Component ids in insertion order.
    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.0.iter().map(|c| c.id()).collect()
    }

    /// Selected component ids in insertion order.
    pub fn selected_ids(&self) -> Vec<ComponentId> {
        self.components
            .0
            .iter()
            .filter(|c| c.is_selected())
            .map(|c| c.id())
            .collect()
    }

    pub fn history(&self) -> &CommandList {
        &self.history
    }

    /// Render the view of a component.
    pub fn render(&mut self, id: ComponentId, layout: &dyn ElementLayout) -> Option<ViewSurface> {
        let component = self.components.get(id)?;
        let view = self.views.get_mut(&id)?;
        Some(view.render(component, layout))
    }

    /// Enable or disable pointer dragging of one component.
    pub fn set_allow_dragging(&mut self, id: ComponentId, allow: bool) {
        if let Some(view) = self.views.get_mut(&id) {
            view.allow_dragging = allow;
        }
    }

    /// Press on a component: select it, bring it to front and start
    /// dragging every selected component from `pointer`.
    ///
    /// The container zoom is read from `layout` and applies to the whole
    /// selection.
    pub fn mouse_down(
        &mut self,
        id: ComponentId,
        button: MouseButton,
        modifiers: &Modifiers,
        pointer: Point,
        layout: &dyn ElementLayout,
    ) -> bool {
        let (Some(component), Some(view)) = (self.components.get_mut(id), self.views.get_mut(&id)) else {
            log::warn!("Press on unknown component {}", id);
            return false;
        };
        if !view.mouse_down(component, button, modifiers) {
            return false;
        }
        for selected in self.selected_ids() {
            if let (Some(component), Some(view)) =
                (self.components.get(selected), self.views.get_mut(&selected))
            {
                view.drag_start(component, pointer, layout);
            }
        }
        true
    }

    /// Pointer moved: drag every selected component.
    pub fn mouse_move(&mut self, pointer: Point, modifiers: &Modifiers) {
        for id in self.selected_ids() {
            if let (Some(component), Some(view)) = (self.components.get_mut(id), self.views.get_mut(&id)) {
                view.drag(component, pointer, modifiers);
            }
        }
    }

    /// Pointer released: stop dragging and push one combined move command
    /// when any selected component moved. Returns whether a step was pushed.
    pub fn mouse_up(&mut self) -> bool {
        let mut commands = Vec::new();
        for id in self.selected_ids() {
            if let (Some(component), Some(view)) = (self.components.get(id), self.views.get_mut(&id)) {
                view.drag_stop(component);
                commands.extend(view.take_pending_move());
            }
        }
        if commands.is_empty() {
            return false;
        }
        self.history.push(ComponentCommand::combined(commands, MOVE_LABEL));
        true
    }

    /// Click on a component: bring it to front.
    pub fn clicked(&mut self, id: ComponentId) {
        if let Some(view) = self.views.get_mut(&id) {
            view.clicked();
        }
    }

    /// Route a delta-drag handle event to the component's view.
    pub fn delta_drag(
        &mut self,
        id: ComponentId,
        handle: DeltaHandle,
        event: DeltaDrag,
        modifiers: &Modifiers,
        layout: &dyn ElementLayout,
    ) {
        let (Some(component), Some(view)) = (self.components.get_mut(id), self.views.get_mut(&id)) else {
            log::warn!("{} handle event for unknown component {}", handle.name(), id);
            return;
        };
        let history = &mut self.history;

        match handle {
            DeltaHandle::SkewX | DeltaHandle::SkewY => {
                let axis = if handle == DeltaHandle::SkewX { SkewAxis::X } else { SkewAxis::Y };
                match event {
                    DeltaDrag::Start { .. } => {
                        view.skew_start(component, axis);
                    }
                    DeltaDrag::Move { delta, .. } => view.skew(component, axis, delta),
                    DeltaDrag::Stop => view.skew_stop(component, axis, history),
                }
            }
            DeltaHandle::Rotate => match event {
                DeltaDrag::Start { position } => {
                    view.rotate_start(component, position, layout);
                }
                DeltaDrag::Move { position, .. } => view.rotate(component, position, modifiers),
                DeltaDrag::Stop => view.rotate_stop(component, history),
            },
            DeltaHandle::Scale => match event {
                DeltaDrag::Start { .. } => {
                    view.scale_start(component, layout);
                }
                DeltaDrag::Move { delta, .. } => view.scale(component, delta, modifiers),
                DeltaDrag::Stop => view.scale_stop(component, history),
            },
        }
    }

    /// Set one position axis from coordinate input text.
    pub fn manual_move(&mut self, id: ComponentId, axis: Axis, input: &str) -> bool {
        match (self.components.get_mut(id), self.views.get_mut(&id)) {
            (Some(component), Some(view)) => view.manual_move(component, axis, input),
            _ => false,
        }
    }

    /// Center a component on one axis of a container of size `container`.
    ///
    /// The element extent is the rendered box of the component.
    pub fn center(&mut self, id: ComponentId, axis: Axis, container: Size) {
        let (Some(component), Some(view)) = (self.components.get_mut(id), self.views.get_mut(&id)) else {
            return;
        };
        let element = view
            .surface()
            .size
            .or(view.orig_size())
            .unwrap_or(Size::ZERO);
        view.center(component, axis, container, element, &mut self.history);
    }

    /// Undo the last history step. Returns its label.
    pub fn undo(&mut self) -> CommandResult<Option<String>> {
        self.history.undo(&mut self.components)
    }

    /// Redo the last undone step. Returns its label.
    pub fn redo(&mut self) -> CommandResult<Option<String>> {
        self.history.redo(&mut self.components)
    }
}

impl ComponentStore for Slide {
    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }
}
