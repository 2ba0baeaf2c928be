//! Gesture scripts: a JSON description of a slide and the input to replay
//! against it.
//!
//! ```json
//! {
//!   "stage": { "offset": { "x": 0, "y": 0 }, "transform": "matrix(0.5, 0, 0, 0.5, 0, 0)" },
//!   "components": [ { "name": "title", "x": 10, "y": 10, "size": { "width": 100, "height": 50 } } ],
//!   "steps": [
//!     { "action": "pointer_down", "target": "title", "pointer": { "x": 300, "y": 300 } },
//!     { "action": "pointer_move", "pointer": { "x": 330, "y": 290 } },
//!     { "action": "pointer_up" }
//!   ]
//! }
//! ```

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use slidecraft_core::{
    Attributes, Axis, CommandError, Component, ComponentId, ConfigError, DeltaDrag, DeltaHandle,
    EditorConfig, Modifiers, MouseButton, Slide, StaticLayout, ZTracker,
};
use slidecraft_core::transform;
use slidecraft_render::{MarkupRenderer, RenderContext, Renderer, RendererError};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Duplicate component name: {0}")]
    DuplicateComponent(String),
    #[error("History error: {0}")]
    Command(#[from] CommandError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// The container the slide is shown in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    /// Page offset of the slide origin.
    pub offset: Point,
    /// Computed transform of the container, carrying its zoom.
    pub transform: Option<String>,
}

/// A component placed by the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    /// Untransformed rendered size of the element.
    pub size: Size,
    #[serde(default)]
    pub html: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// One input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    PointerDown {
        target: String,
        pointer: Point,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        pointer: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp,
    Click {
        target: String,
    },
    /// A full delta-drag on one handle: start at the first pointer position,
    /// one move per entry, then stop.
    Handle {
        target: String,
        handle: DeltaHandle,
        path: Vec<Point>,
        #[serde(default)]
        modifiers: Modifiers,
    },
    ManualMove {
        target: String,
        axis: Axis,
        value: String,
    },
    Center {
        target: String,
        axis: Axis,
        container: Size,
    },
    Style {
        target: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        classes: Option<String>,
    },
    Remove {
        target: String,
    },
    Undo,
    Redo,
}

/// A complete gesture script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: Option<EditorConfig>,
    pub stage: Stage,
    pub components: Vec<ComponentSpec>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ScriptResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }
}

/// Final state of one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDump {
    pub name: String,
    pub attributes: Attributes,
    pub z_index: Option<u64>,
    /// Transformed box corners, clockwise from the top-left.
    pub outline: Option<[Point; 4]>,
}

/// Final state of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateDump {
    pub components: Vec<ComponentDump>,
    /// Labels of the undoable steps, oldest first.
    pub history: Vec<String>,
    pub can_redo: bool,
}

struct Placed {
    name: String,
    id: ComponentId,
    size: Size,
    html: String,
}

/// A slide driven by script steps.
pub struct Replay {
    slide: Slide,
    stage: Stage,
    placed: Vec<Placed>,
}

impl Replay {
    /// Build the slide described by `script` and render every component.
    pub fn new(script: &Script, config: EditorConfig) -> ScriptResult<Self> {
        let mut replay = Self {
            slide: Slide::with_z_index(config, Rc::new(ZTracker::new())),
            stage: script.stage.clone(),
            placed: Vec::new(),
        };
        for spec in &script.components {
            if replay.placed.iter().any(|p| p.name == spec.name) {
                return Err(ScriptError::DuplicateComponent(spec.name.clone()));
            }
            let id = replay.slide.add(Component::with_attributes(spec.attributes.clone()));
            replay.placed.push(Placed {
                name: spec.name.clone(),
                id,
                size: spec.size,
                html: spec.html.clone(),
            });
            let layout = replay.layout(id)?;
            replay.slide.render(id, &layout);
        }
        Ok(replay)
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    fn id(&self, name: &str) -> ScriptResult<ComponentId> {
        self.placed
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or_else(|| ScriptError::UnknownComponent(name.to_string()))
    }

    /// Layout of a component as placed on the stage right now.
    fn layout(&self, id: ComponentId) -> ScriptResult<StaticLayout> {
        let placed = self
            .placed
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ScriptError::UnknownComponent(id.to_string()))?;
        let position = self
            .slide
            .component(id)
            .map(|c| c.position())
            .unwrap_or(Point::ZERO);
        let mut layout = StaticLayout::new(self.stage.offset + position.to_vec2(), placed.size);
        layout.parent_transform = self.stage.transform.clone();
        Ok(layout)
    }

    /// Run every step in order.
    pub fn run(&mut self, steps: &[Step]) -> ScriptResult<()> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &Step) -> ScriptResult<()> {
        log::debug!("Step: {:?}", step);
        match step {
            Step::PointerDown {
                target,
                pointer,
                button,
                modifiers,
            } => {
                let id = self.id(target)?;
                let layout = self.layout(id)?;
                self.slide.mouse_down(id, *button, modifiers, *pointer, &layout);
            }
            Step::PointerMove { pointer, modifiers } => self.slide.mouse_move(*pointer, modifiers),
            Step::PointerUp => {
                self.slide.mouse_up();
            }
            Step::Click { target } => {
                let id = self.id(target)?;
                self.slide.clicked(id);
            }
            Step::Handle {
                target,
                handle,
                path,
                modifiers,
            } => {
                let id = self.id(target)?;
                let layout = self.layout(id)?;
                let start = path.first().copied().unwrap_or(Point::ZERO);
                self.slide
                    .delta_drag(id, *handle, DeltaDrag::Start { position: start }, modifiers, &layout);
                for &position in path {
                    let delta: Vec2 = position - start;
                    self.slide
                        .delta_drag(id, *handle, DeltaDrag::Move { position, delta }, modifiers, &layout);
                }
                self.slide.delta_drag(id, *handle, DeltaDrag::Stop, modifiers, &layout);
            }
            Step::ManualMove { target, axis, value } => {
                let id = self.id(target)?;
                self.slide.manual_move(id, *axis, value);
            }
            Step::Center {
                target,
                axis,
                container,
            } => {
                let id = self.id(target)?;
                self.slide.center(id, *axis, *container);
            }
            Step::Style {
                target,
                color,
                classes,
            } => {
                let id = self.id(target)?;
                if let Some(component) = self.slide.component_mut(id) {
                    if color.is_some() {
                        component.set_color(color.clone());
                    }
                    if let Some(classes) = classes {
                        component.set_custom_classes(classes.as_str());
                    }
                }
            }
            Step::Remove { target } => {
                let id = self.id(target)?;
                self.slide.remove_clicked(id);
                self.placed.retain(|p| p.id != id);
            }
            Step::Undo => {
                if let Some(label) = self.slide.undo()? {
                    log::info!("Undo {}", label);
                }
            }
            Step::Redo => {
                if let Some(label) = self.slide.redo()? {
                    log::info!("Redo {}", label);
                }
            }
        }
        Ok(())
    }

    /// Markup of every rendered component, in insertion order.
    pub fn markup(&self) -> ScriptResult<String> {
        let mut renderer = MarkupRenderer::new();
        for placed in &self.placed {
            let Some(view) = self.slide.view(placed.id) else {
                continue;
            };
            let surface = view.surface();
            renderer.render_component(&RenderContext::new(&surface).with_inner_html(&placed.html))?;
        }
        Ok(renderer.finish())
    }

    /// Attributes, stacking and outlines of every component plus the history.
    pub fn dump(&self) -> StateDump {
        let components = self
            .placed
            .iter()
            .filter_map(|placed| {
                let component = self.slide.component(placed.id)?;
                let view = self.slide.view(placed.id);
                let box_size = view.and_then(|v| v.surface().size);
                Some(ComponentDump {
                    name: placed.name.clone(),
                    attributes: component.attributes().clone(),
                    z_index: view.map(|v| v.surface().z_index),
                    outline: box_size.map(|size| transform::outline(component.attributes(), size)),
                })
            })
            .collect();
        let history = self.slide.history();
        StateDump {
            components,
            history: history.commands().iter().map(|c| c.label().to_string()).collect(),
            can_redo: history.can_redo(),
        }
    }
}

/// Replay a script and return its final state.
pub fn replay(script: &Script, config: EditorConfig) -> ScriptResult<Replay> {
    let mut replay = Replay::new(script, config)?;
    replay.run(&script.steps)?;
    log::info!("Replayed {} steps", script.steps.len());
    Ok(replay)
}
