//! Markup generation.
//!
//! One node per element, in creation order, inside a single container. Every
//! node carries an `element-<id>` class that the stylesheet targets; the
//! markup itself holds no geometry.

use std::fmt::Write;

use canvas_core::{Element, ElementKind, ElementStore};

/// Class name of the canvas container node.
pub const CONTAINER_CLASS: &str = "container";

/// The identifier class for an element.
#[must_use]
pub fn element_class(element: &Element) -> String {
    format!("element-{}", element.id)
}

/// Generate the markup for every element in `store`.
#[must_use]
pub fn generate_markup(store: &ElementStore) -> String {
    if store.is_empty() {
        return format!("<div class=\"{CONTAINER_CLASS}\">\n  <!-- Drop shapes here -->\n</div>");
    }

    let mut html = String::with_capacity(64 * (store.len() + 1));
    let _ = writeln!(html, "<div class=\"{CONTAINER_CLASS}\">");
    for element in store.elements() {
        html.push_str("  ");
        render_node(&mut html, element);
        html.push('\n');
    }
    html.push_str("</div>");
    html
}

fn render_node(out: &mut String, element: &Element) {
    let class = element_class(element);
    match element.kind {
        ElementKind::Paragraph => {
            let _ = write!(out, "<p class=\"{class}\">{}</p>", text_content(&element.content));
        }
        ElementKind::Input => {
            let _ = write!(
                out,
                "<input class=\"{class}\" type=\"text\" placeholder=\"{}\">",
                escape_html(&element.content)
            );
        }
        ElementKind::Button => {
            let _ = write!(
                out,
                "<button class=\"{class} btn-{}\">{}</button>",
                element.variant.as_str(),
                text_content(&element.content)
            );
        }
        ElementKind::Rectangle | ElementKind::Square | ElementKind::Circle => {
            let _ = write!(out, "<div class=\"{class} shape-{}\"></div>", element.kind);
        }
    }
}

/// Escaped text with line breaks preserved.
fn text_content(content: &str) -> String {
    escape_html(content).replace('\n', "<br>")
}

/// Escape text for use in element content or a quoted attribute.
#[must_use]
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_core::{ButtonVariant, PropertyEdit, Point, Workspace};

    #[test]
    fn test_empty_store() {
        let workspace = Workspace::new();
        let html = generate_markup(workspace.store());
        assert!(html.starts_with("<div class=\"container\">"));
        assert!(html.contains("<!-- Drop shapes here -->"));
    }

    #[test]
    fn test_nodes_per_kind() {
        let mut workspace = Workspace::new();
        let p = workspace.drop_shape(ElementKind::Paragraph, Point::new(100.0, 100.0));
        workspace.drop_shape(ElementKind::Input, Point::new(100.0, 200.0));
        let b = workspace.drop_shape(ElementKind::Button, Point::new(100.0, 300.0));
        workspace.drop_shape(ElementKind::Circle, Point::new(100.0, 400.0));
        workspace
            .apply_edit(b, PropertyEdit::Variant(ButtonVariant::Outline))
            .expect("variant");
        workspace
            .apply_edit(p, PropertyEdit::Content("a < b\nc".to_string()))
            .expect("content");

        let html = generate_markup(workspace.store());
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines[1], "  <p class=\"element-1\">a &lt; b<br>c</p>");
        assert_eq!(
            lines[2],
            "  <input class=\"element-2\" type=\"text\" placeholder=\"Enter text...\">"
        );
        assert_eq!(lines[3], "  <button class=\"element-3 btn-outline\">Button</button>");
        assert_eq!(lines[4], "  <div class=\"element-4 shape-circle\"></div>");
        assert_eq!(lines[5], "</div>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("\"Tom\" & 'Jerry'"), "&quot;Tom&quot; &amp; &#39;Jerry&#39;");
    }
}
