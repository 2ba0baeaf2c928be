//! Undoable component commands and the history they are pushed to.
//!
//! A gesture produces at most one command. Multi-select drags wrap the
//! per-component move commands into a single [`ComponentCommand::Combined`]
//! so one undo step reverts the whole gesture.

use crate::component::{Attribute, Component, ComponentId, Scale};
use kurbo::Point;
use thiserror::Error;

/// Maximum number of undo steps kept by [`CommandList`].
pub const MAX_UNDO_HISTORY: usize = 50;

/// Command errors.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Component not found: {0}")]
    MissingComponent(ComponentId),
}

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Lookup of components by id, used to apply commands.
pub trait ComponentStore {
    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component>;
}

/// Receiver of finished commands.
pub trait UndoHistory {
    fn push(&mut self, command: ComponentCommand);
}

/// A reversible change to one or more components.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentCommand {
    Move { id: ComponentId, from: Point, to: Point },
    Rotate { id: ComponentId, from: f64, to: f64 },
    SkewX { id: ComponentId, from: f64, to: f64 },
    SkewY { id: ComponentId, from: f64, to: f64 },
    Scale { id: ComponentId, from: Scale, to: Scale },
    /// Several commands undone and redone as one step.
    Combined { label: String, commands: Vec<ComponentCommand> },
}

impl ComponentCommand {
    /// Position change from `start` to the component's current position.
    pub fn move_from(start: Point, component: &Component) -> Self {
        Self::Move {
            id: component.id(),
            from: start,
            to: component.position(),
        }
    }

    pub fn rotate_from(start: f64, component: &Component) -> Self {
        Self::Rotate {
            id: component.id(),
            from: start,
            to: component.rotate(),
        }
    }

    pub fn skew_x_from(start: f64, component: &Component) -> Self {
        Self::SkewX {
            id: component.id(),
            from: start,
            to: component.skew_x(),
        }
    }

    pub fn skew_y_from(start: f64, component: &Component) -> Self {
        Self::SkewY {
            id: component.id(),
            from: start,
            to: component.skew_y(),
        }
    }

    pub fn scale_from(start: Scale, component: &Component) -> Self {
        Self::Scale {
            id: component.id(),
            from: start,
            to: component.scale(),
        }
    }

    /// Wrap an ordered list of commands under one label.
    pub fn combined(commands: Vec<ComponentCommand>, label: impl Into<String>) -> Self {
        Self::Combined {
            label: label.into(),
            commands,
        }
    }

    /// Human-readable label shown in history menus.
    pub fn label(&self) -> &str {
        match self {
            Self::Move { .. } => "Move",
            Self::Rotate { .. } => "Rotate",
            Self::SkewX { .. } => "Skew X",
            Self::SkewY { .. } => "Skew Y",
            Self::Scale { .. } => "Scale",
            Self::Combined { label, .. } => label,
        }
    }

    /// Every component this command touches, in application order.
    pub fn component_ids(&self) -> Vec<ComponentId> {
        match self {
            Self::Move { id, .. }
            | Self::Rotate { id, .. }
            | Self::SkewX { id, .. }
            | Self::SkewY { id, .. }
            | Self::Scale { id, .. } => vec![*id],
            Self::Combined { commands, .. } => {
                commands.iter().flat_map(|cmd| cmd.component_ids()).collect()
            }
        }
    }

    /// This command with every step touching `id` dropped. None when nothing
    /// is left.
    pub fn without(self, id: ComponentId) -> Option<Self> {
        match self {
            Self::Combined { label, commands } => {
                let commands: Vec<_> = commands.into_iter().filter_map(|cmd| cmd.without(id)).collect();
                if commands.is_empty() {
                    None
                } else {
                    Some(Self::Combined { label, commands })
                }
            }
            cmd => (!cmd.component_ids().contains(&id)).then_some(cmd),
        }
    }

    /// Restore the state before the command.
    pub fn undo(&self, store: &mut dyn ComponentStore) -> CommandResult<()> {
        self.ensure_targets(store)?;
        self.apply(store, false);
        Ok(())
    }

    /// Re-apply the command.
    pub fn redo(&self, store: &mut dyn ComponentStore) -> CommandResult<()> {
        self.ensure_targets(store)?;
        self.apply(store, true);
        Ok(())
    }

    fn ensure_targets(&self, store: &mut dyn ComponentStore) -> CommandResult<()> {
        for id in self.component_ids() {
            if store.component_mut(id).is_none() {
                return Err(CommandError::MissingComponent(id));
            }
        }
        Ok(())
    }

    fn apply(&self, store: &mut dyn ComponentStore, forward: bool) {
        match self {
            Self::Move { id, from, to } => {
                if let Some(component) = store.component_mut(*id) {
                    let target = pick(forward, *from, *to);
                    component.set_int(Attribute::X, target.x);
                    component.set_int(Attribute::Y, target.y);
                }
            }
            Self::Rotate { id, from, to } => {
                if let Some(component) = store.component_mut(*id) {
                    component.set_float(Attribute::Rotate, pick(forward, *from, *to));
                }
            }
            Self::SkewX { id, from, to } => {
                if let Some(component) = store.component_mut(*id) {
                    component.set_float(Attribute::SkewX, pick(forward, *from, *to));
                }
            }
            Self::SkewY { id, from, to } => {
                if let Some(component) = store.component_mut(*id) {
                    component.set_float(Attribute::SkewY, pick(forward, *from, *to));
                }
            }
            Self::Scale { id, from, to } => {
                if let Some(component) = store.component_mut(*id) {
                    component.set_scale(pick(forward, *from, *to));
                }
            }
            Self::Combined { commands, .. } => {
                if forward {
                    for cmd in commands {
                        cmd.apply(store, true);
                    }
                } else {
                    for cmd in commands.iter().rev() {
                        cmd.apply(store, false);
                    }
                }
            }
        }
    }
}

fn pick<T>(forward: bool, from: T, to: T) -> T {
    if forward { to } else { from }
}

/// Bounded undo/redo stack of component commands.
#[derive(Debug, Clone)]
pub struct CommandList {
    undo_stack: Vec<ComponentCommand>,
    redo_stack: Vec<ComponentCommand>,
    max_depth: usize,
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandList {
    /// Create a history with the default depth.
    pub fn new() -> Self {
        Self::with_depth(MAX_UNDO_HISTORY)
    }

    /// Create a history keeping at most `max_depth` undo steps.
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Undo the last command. Returns its label, or None if nothing to undo.
    pub fn undo(&mut self, store: &mut dyn ComponentStore) -> CommandResult<Option<String>> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = cmd.undo(store) {
            self.undo_stack.push(cmd);
            return Err(e);
        }
        let label = cmd.label().to_string();
        self.redo_stack.push(cmd);
        Ok(Some(label))
    }

    /// Redo the last undone command.
    pub fn redo(&mut self, store: &mut dyn ComponentStore) -> CommandResult<Option<String>> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = cmd.redo(store) {
            self.redo_stack.push(cmd);
            return Err(e);
        }
        let label = cmd.label().to_string();
        self.undo_stack.push(cmd);
        Ok(Some(label))
    }

    /// Drop every step touching `id` from both stacks.
    pub fn forget(&mut self, id: ComponentId) {
        for stack in [&mut self.undo_stack, &mut self.redo_stack] {
            let kept: Vec<_> = std::mem::take(stack)
                .into_iter()
                .filter_map(|cmd| cmd.without(id))
                .collect();
            *stack = kept;
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable steps.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// The most recent undoable command.
    pub fn last(&self) -> Option<&ComponentCommand> {
        self.undo_stack.last()
    }

    /// Undoable commands, oldest first.
    pub fn commands(&self) -> &[ComponentCommand] {
        &self.undo_stack
    }
}

impl UndoHistory for CommandList {
    fn push(&mut self, command: ComponentCommand) {
        log::debug!("History push: {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }
}
