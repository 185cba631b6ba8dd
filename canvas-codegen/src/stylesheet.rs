//! Stylesheet generation.
//!
//! ```text
//! .container { ... }          canvas block (active size, background)
//! .element-1 { ... }          one block per element, desktop style
//! .element-2 { ... }
//! @media (max-width: 1024px)  tablet, only if it has overrides
//!   .element-2 { ... }        full merged declaration set
//! @media (max-width: 768px)   mobile, only if it has overrides
//! ```
//!
//! Media blocks redeclare every property of an overridden element rather than
//! only the changed ones, so no block relies on inheriting from another.

use std::fmt::Write;

use canvas_core::{
    effective_style, Breakpoint, ButtonVariant, CanvasConfig, Element, ElementKind, ElementStore,
    Style,
};
use serde::{Deserialize, Serialize};

use crate::markup::{element_class, CONTAINER_CLASS};

/// Border width used for outline buttons that have none set.
const OUTLINE_BORDER_WIDTH: f32 = 2.0;

/// Stylesheet generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylesheetOptions {
    /// Emit media blocks for breakpoints that have overrides.
    pub include_breakpoints: bool,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        Self {
            include_breakpoints: true,
        }
    }
}

/// Declarations for one element under a resolved style, in emission order.
#[must_use]
pub fn declarations(element: &Element, style: &Style) -> Vec<(&'static str, String)> {
    let mut decls = vec![
        ("position", "absolute".to_string()),
        ("left", px(style.x)),
        ("top", px(style.y)),
        ("width", px(style.width)),
        ("height", px(style.height)),
    ];
    if style.rotation > 0.0 {
        decls.push(("transform", format!("rotate({}deg)", style.rotation)));
    }

    let outline = element.kind == ElementKind::Button && element.variant == ButtonVariant::Outline;
    if outline {
        let width = if style.border_width > 0.0 {
            style.border_width
        } else {
            OUTLINE_BORDER_WIDTH
        };
        decls.push(("border", format!("{} solid {}", px(width), style.border_color)));
    } else if style.border_width > 0.0 {
        decls.push((
            "border",
            format!("{} solid {}", px(style.border_width), style.border_color),
        ));
    }

    if element.kind == ElementKind::Circle {
        decls.push(("border-radius", "50%".to_string()));
    } else if style.border_radius > 0.0 {
        decls.push(("border-radius", px(style.border_radius)));
    }

    if outline {
        decls.push(("background-color", "transparent".to_string()));
    } else if element.kind != ElementKind::Paragraph || style.background_color != "transparent" {
        decls.push(("background-color", style.background_color.clone()));
    }

    if element.kind.is_textual() {
        decls.push(("color", style.color.clone()));
        decls.push(("font-size", px(style.font_size)));
    }
    decls
}

fn px(value: f32) -> String {
    format!("{value}px")
}

fn write_block(out: &mut String, indent: &str, selector: &str, decls: &[(&str, String)]) {
    let _ = writeln!(out, "{indent}.{selector} {{");
    for (property, value) in decls {
        let _ = writeln!(out, "{indent}  {property}: {value};");
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Generate the stylesheet for `store` on `canvas`.
///
/// Output is a pure function of its inputs.
#[must_use]
pub fn generate_stylesheet(
    store: &ElementStore,
    canvas: &CanvasConfig,
    options: &StylesheetOptions,
) -> String {
    let mut css = String::with_capacity(256 * (store.len() + 1));
    let (width, height) = canvas.size();
    write_block(
        &mut css,
        "",
        CONTAINER_CLASS,
        &[
            ("position", "relative".to_string()),
            ("width", px(width)),
            ("height", px(height)),
            ("background-color", canvas.background.clone()),
            ("overflow", "hidden".to_string()),
        ],
    );

    for element in store.elements() {
        css.push('\n');
        write_block(
            &mut css,
            "",
            &element_class(element),
            &declarations(element, &element.style),
        );
    }

    if options.include_breakpoints {
        let overrides = store.overrides();
        for breakpoint in Breakpoint::ALL {
            let Some(max_width) = breakpoint.media_max_width() else {
                continue;
            };
            if !overrides.has_entries(breakpoint) {
                continue;
            }
            let _ = writeln!(css, "\n@media (max-width: {max_width}px) {{");
            let mut first = true;
            for element in store.elements() {
                if overrides.get(breakpoint, element.id).is_none() {
                    continue;
                }
                if !first {
                    css.push('\n');
                }
                first = false;
                let style = effective_style(element, overrides, breakpoint);
                write_block(
                    &mut css,
                    "  ",
                    &element_class(element),
                    &declarations(element, &style),
                );
            }
            css.push_str("}\n");
        }
    }

    css
}
