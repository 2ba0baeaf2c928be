//! HTML markup renderer.
//!
//! Emits the nested element structure gestures operate on:
//!
//! ```text
//! div.component           rotate, position, box size, z-index
//! └─ div.content-scale    scale
//!    └─ div.content       skews, custom classes
//! span[data-delta]        one per handle
//! ```

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use slidecraft_core::view::ViewSurface;
use std::fmt::Write;

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn check_class(class: &str) -> RenderResult<()> {
    let valid = !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RendererError::InvalidClass(class.to_string()))
    }
}

/// Validate every whitespace-separated class in `classes`.
fn check_classes(classes: &str) -> RenderResult<()> {
    classes.split_whitespace().try_for_each(check_class)
}

/// Accept `#rgb` and `#rrggbb`.
fn check_color(color: &str) -> RenderResult<()> {
    let digits = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(RendererError::InvalidColor(color.to_string()))
    }
}

fn outer_style(surface: &ViewSurface) -> RenderResult<String> {
    let mut style = format!("left: {}px; top: {}px;", surface.left, surface.top);
    if let Some(size) = surface.size {
        let _ = write!(style, " width: {}px; height: {}px;", size.width, size.height);
    }
    let _ = write!(style, " z-index: {};", surface.z_index);
    if !surface.transform.is_empty() {
        let _ = write!(style, " transform: {};", surface.transform);
    }
    if let Some(color) = &surface.color {
        check_color(color)?;
        let _ = write!(style, " color: {};", color);
    }
    Ok(style)
}

/// Renderer producing an HTML fragment per component.
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    output: String,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup rendered so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the rendered markup, leaving the renderer empty.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Renderer for MarkupRenderer {
    fn render_component(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let surface = ctx.surface;
        for class in &surface.classes {
            check_class(class)?;
        }
        check_classes(&surface.content_class)?;
        let style = outer_style(surface)?;

        let mut html = String::new();
        let _ = writeln!(
            html,
            r#"<div class="{}" style="{}">"#,
            surface.classes.join(" "),
            escape_attr(&style)
        );
        let _ = writeln!(
            html,
            r#"  <div class="content-scale" style="transform: {}">"#,
            escape_attr(&surface.scale_transform)
        );
        let _ = writeln!(
            html,
            r#"    <div class="{}" style="transform: {}">{}</div>"#,
            surface.content_class,
            escape_attr(surface.content_transform.trim_end()),
            ctx.inner_html
        );
        html.push_str("  </div>\n");
        for handle in ctx.handles {
            let _ = writeln!(
                html,
                r#"  <span data-delta="{0}" class="{0}"></span>"#,
                handle.name()
            );
        }
        if ctx.position_inputs {
            for (option, value) in [("x", &surface.x_input), ("y", &surface.y_input)] {
                let _ = writeln!(
                    html,
                    r#"  <input type="text" data-option="{}" value="{}">"#,
                    option,
                    escape_attr(value)
                );
            }
        }
        if ctx.remove_button {
            html.push_str("  <button class=\"removeBtn\">&times;</button>\n");
        }
        html.push_str("</div>\n");

        log::trace!("Rendered component markup ({} bytes)", html.len());
        self.output.push_str(&html);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use slidecraft_core::input::DeltaHandle;

    fn surface() -> ViewSurface {
        ViewSurface {
            left: 10.0,
            top: 20.0,
            size: Some(Size::new(100.0, 50.0)),
            z_index: 3,
            classes: vec!["component".to_string(), "selected".to_string()],
            transform: "rotate(0.5rad)".to_string(),
            scale_transform: "scale(2,2)".to_string(),
            content_transform: "skewX(0.25rad) ".to_string(),
            content_class: "content title".to_string(),
            color: Some("#ff0000".to_string()),
            x_input: "10".to_string(),
            y_input: "20".to_string(),
            rendered: true,
            detached: false,
        }
    }

    #[test]
    fn test_render_structure() {
        let surface = surface();
        let mut renderer = MarkupRenderer::new();
        renderer
            .render_component(&RenderContext::new(&surface).with_inner_html("<p>Hi</p>"))
            .unwrap();
        let html = renderer.finish();

        assert!(html.starts_with(r#"<div class="component selected" style="left: 10px; top: 20px; width: 100px; height: 50px; z-index: 3; transform: rotate(0.5rad); color: #ff0000;">"#));
        assert!(html.contains(r#"<div class="content-scale" style="transform: scale(2,2)">"#));
        assert!(html.contains(r#"<div class="content title" style="transform: skewX(0.25rad)"><p>Hi</p></div>"#));
        for handle in DeltaHandle::ALL {
            assert!(html.contains(&format!(r#"data-delta="{}""#, handle.name())));
        }
        assert!(html.contains(r#"data-option="y" value="20""#));
        assert!(html.contains("removeBtn"));
        assert!(renderer.output().is_empty());
    }

    #[test]
    fn test_optional_parts() {
        let surface = ViewSurface {
            size: None,
            color: None,
            ..surface()
        };
        let mut renderer = MarkupRenderer::new();
        let ctx = RenderContext::new(&surface)
            .with_handles(&[DeltaHandle::Rotate])
            .with_position_inputs(false)
            .with_remove_button(false);
        renderer.render_component(&ctx).unwrap();
        let html = renderer.output();

        assert!(!html.contains("width:"));
        assert!(!html.contains("color:"));
        assert!(!html.contains("data-option"));
        assert!(!html.contains("removeBtn"));
        assert!(!html.contains(r#"data-delta="scale""#));
        assert!(html.contains(r#"data-delta="rotate""#));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let bad_class = ViewSurface {
            content_class: "content x\"onclick".to_string(),
            ..surface()
        };
        let mut renderer = MarkupRenderer::new();
        assert!(matches!(
            renderer.render_component(&RenderContext::new(&bad_class)),
            Err(RendererError::InvalidClass(_))
        ));

        let bad_color = ViewSurface {
            color: Some("#12345g".to_string()),
            ..surface()
        };
        assert_eq!(
            renderer.render_component(&RenderContext::new(&bad_color)),
            Err(RendererError::InvalidColor("#12345g".to_string()))
        );
        assert!(renderer.output().is_empty());
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b<c>&"#), "a&quot;b&lt;c&gt;&amp;");
    }
}
