//! Code Generation Tests
//!
//! Whole-workspace generation through the public API:
//! - Determinism
//! - Custom canvas size in the container block
//! - Templates through markup and stylesheet

use canvas_codegen::{generate_markup, generate_stylesheet, DocumentExporter, StylesheetOptions};
use canvas_core::{
    find_template, Breakpoint, ElementKind, Point, StylePatch, SnapshotStore, Workspace,
};

fn busy_workspace() -> Workspace {
    let mut workspace = Workspace::new();
    let template = find_template("modern-hero").expect("template");
    workspace.insert_template(&template);
    let circle = workspace.drop_shape(ElementKind::Circle, Point::new(900.0, 300.0));
    workspace.set_breakpoint(Breakpoint::Mobile);
    workspace
        .write_style(circle, &StylePatch::position(20.0, 20.0))
        .expect("mobile");
    workspace.set_breakpoint(Breakpoint::Tablet);
    workspace
        .write_style(
            circle,
            &StylePatch {
                background_color: Some("#123456".to_string()),
                ..StylePatch::default()
            },
        )
        .expect("tablet");
    workspace.set_breakpoint(Breakpoint::Desktop);
    workspace
}

#[test]
fn test_generation_is_deterministic() {
    let workspace = busy_workspace();
    let options = StylesheetOptions::default();

    let css_a = generate_stylesheet(workspace.store(), workspace.canvas(), &options);
    let css_b = generate_stylesheet(workspace.store(), workspace.canvas(), &options);
    assert_eq!(css_a, css_b);

    let html_a = generate_markup(workspace.store());
    let html_b = generate_markup(workspace.store());
    assert_eq!(html_a, html_b);
}

#[test]
fn test_generation_survives_snapshot_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::with_data_dir(dir.path()).expect("store");
    let workspace = busy_workspace();
    store.save(&workspace.snapshot()).expect("save");
    let restored = store.load_or_default();

    let exporter = DocumentExporter::with_defaults();
    assert_eq!(
        exporter.render(workspace.store(), workspace.canvas()),
        exporter.render(restored.store(), restored.canvas())
    );
}

#[test]
fn test_custom_width_in_container_block() {
    let mut workspace = Workspace::new();
    workspace.drop_shape(ElementKind::Square, Point::new(100.0, 100.0));
    workspace.canvas_mut().set_custom_size_input("900", "");

    let doc = DocumentExporter::with_defaults().render(workspace.store(), workspace.canvas());
    let container = &doc[doc.find(".container {").expect("container block")..];
    let container = &container[..container.find('}').expect("block end")];
    assert!(container.contains("width: 900px;"));
    assert!(container.contains("height: 800px;"));
}

#[test]
fn test_tablet_block_precedes_mobile() {
    let workspace = busy_workspace();
    let css = generate_stylesheet(
        workspace.store(),
        workspace.canvas(),
        &StylesheetOptions::default(),
    );
    let tablet = css.find("@media (max-width: 1024px)").expect("tablet");
    let mobile = css.find("@media (max-width: 768px)").expect("mobile");
    assert!(tablet < mobile);

    let tablet_block = &css[tablet..mobile];
    assert!(tablet_block.contains("background-color: #123456;"));
    assert!(tablet_block.contains("border-radius: 50%;"));
    let mobile_block = &css[mobile..];
    assert!(mobile_block.contains("left: 20px;"));
    assert!(mobile_block.contains("background-color: #3498db;"));
}

#[test]
fn test_template_markup_order() {
    let workspace = busy_workspace();
    let html = generate_markup(workspace.store());
    let eyebrow = html.find("Launch Your Idea").expect("eyebrow");
    let headline = html.find("Build faster with<br>ready-made blocks.").expect("headline");
    let cta = html.find("btn-outline\">Learn More").expect("outline cta");
    assert!(eyebrow < headline && headline < cta);
    assert!(html.contains("<div class=\"element-7 shape-circle\"></div>"));
}
