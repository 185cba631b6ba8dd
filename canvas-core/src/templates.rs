//! Built-in element templates.
//!
//! A template is a fixed list of element records in base coordinates. Their
//! ids are placeholders; insertion assigns fresh ones.

use crate::element::{ButtonVariant, Element, ElementId, ElementKind};
use crate::workspace::Workspace;

/// A named group of elements that can be inserted in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Stable identifier, e.g. `blue-night`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Palette category.
    pub category: &'static str,
    /// Elements in insertion order.
    pub elements: Vec<Element>,
}

fn el(kind: ElementKind, x: f32, y: f32, width: f32, height: f32) -> Element {
    Element::new(ElementId::new(0), kind).with_rect(x, y, width, height)
}

fn blue_night() -> Template {
    // Text-style links: a secondary button with no fill.
    let nav_link = |x: f32, label: &str| {
        el(ElementKind::Button, x, 10.0, 100.0, 40.0)
            .with_content(label)
            .with_fill("transparent")
            .with_color("#ffffff")
            .with_variant(ButtonVariant::Secondary)
    };
    Template {
        id: "blue-night",
        name: "Blue Night",
        category: "Navbars",
        elements: vec![
            el(ElementKind::Rectangle, 0.0, 0.0, 1200.0, 60.0)
                .with_fill("#1a1a2e")
                .with_radius(0.0)
                .with_locked(true),
            el(ElementKind::Paragraph, 40.0, 15.0, 150.0, 30.0)
                .with_content("BrandName")
                .with_color("#ffffff")
                .with_font_size(24.0),
            nav_link(800.0, "Home"),
            nav_link(910.0, "About"),
            el(ElementKind::Button, 1020.0, 10.0, 120.0, 40.0)
                .with_content("Contact")
                .with_fill("#4ecca3")
                .with_color("#1a1a2e"),
        ],
    }
}

fn modern_hero() -> Template {
    Template {
        id: "modern-hero",
        name: "Modern Hero",
        category: "Heroes",
        elements: vec![
            el(ElementKind::Rectangle, 0.0, 0.0, 1200.0, 600.0)
                .with_fill("#2d3748")
                .with_radius(0.0)
                .with_locked(true),
            el(ElementKind::Paragraph, 100.0, 150.0, 600.0, 30.0)
                .with_content("Launch Your Idea")
                .with_color("#63b3ed")
                .with_font_size(16.0),
            el(ElementKind::Paragraph, 100.0, 190.0, 700.0, 120.0)
                .with_content("Build faster with\nready-made blocks.")
                .with_color("#ffffff")
                .with_font_size(64.0),
            el(ElementKind::Paragraph, 100.0, 330.0, 600.0, 60.0)
                .with_content(
                    "Drag, drop, and customize. Create stunning layouts in minutes without writing code.",
                )
                .with_color("#a0aec0")
                .with_font_size(20.0),
            el(ElementKind::Button, 100.0, 420.0, 180.0, 56.0)
                .with_content("Get Started")
                .with_fill("#4299e1")
                .with_color("#ffffff")
                .with_radius(8.0)
                .with_font_size(18.0),
            el(ElementKind::Button, 300.0, 420.0, 180.0, 56.0)
                .with_content("Learn More")
                .with_fill("transparent")
                .with_color("#a0aec0")
                .with_variant(ButtonVariant::Outline)
                .with_radius(8.0)
                .with_font_size(18.0)
                .with_border(2.0, "#4a5568"),
        ],
    }
}

fn simple_login() -> Template {
    let field = |y: f32, placeholder: &str| {
        el(ElementKind::Input, 440.0, y, 320.0, 45.0)
            .with_content(placeholder)
            .with_fill("#f7fafc")
            .with_color("#2d3748")
            .with_border(1.0, "#cbd5e0")
            .with_font_size(16.0)
    };
    Template {
        id: "simple-login",
        name: "Simple Login",
        category: "Login Forms",
        elements: vec![
            el(ElementKind::Rectangle, 400.0, 200.0, 400.0, 350.0)
                .with_fill("#ffffff")
                .with_radius(12.0)
                .with_border(1.0, "#e2e8f0"),
            el(ElementKind::Paragraph, 440.0, 230.0, 320.0, 40.0)
                .with_content("Welcome Back")
                .with_color("#1a202c")
                .with_font_size(28.0),
            field(290.0, "Email Address"),
            field(350.0, "Password"),
            el(ElementKind::Button, 440.0, 430.0, 320.0, 50.0)
                .with_content("Sign In")
                .with_fill("#3182ce")
                .with_color("#ffffff")
                .with_font_size(16.0)
                .with_radius(6.0),
            el(ElementKind::Paragraph, 440.0, 500.0, 320.0, 20.0)
                .with_content("Forgot password?")
                .with_color("#718096")
                .with_font_size(14.0),
        ],
    }
}

/// All built-in templates.
#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    vec![blue_night(), modern_hero(), simple_login()]
}

/// Look up a built-in template by id (case-insensitive).
#[must_use]
pub fn find_template(id: &str) -> Option<Template> {
    builtin_templates()
        .into_iter()
        .find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

impl Workspace {
    /// Append a template's elements with fresh ids.
    ///
    /// Creation order and locked flags are kept; the selection is cleared.
    pub fn insert_template(&mut self, template: &Template) -> Vec<ElementId> {
        let ids: Vec<ElementId> = template
            .elements
            .iter()
            .map(|element| self.store.insert(element.clone()))
            .collect();
        self.selection = None;
        self.has_local_changes = true;
        tracing::debug!(template = template.id, count = ids.len(), "template inserted");
        ids
    }
}
