//! # DropCanvas CLI
//!
//! Command-line front end for a DropCanvas workspace.
//!
//! Each invocation loads the local snapshot, applies one command, saves the
//! snapshot if anything changed, and prints the result. `--breakpoint` only
//! applies to the invocation it is passed to; without it edits go to desktop.
//!
//! Numeric flags are read as text. Malformed values fall back to the current
//! value instead of failing the command.
//!
//! ## Usage
//!
//! ```bash
//! dropcanvas place circle 300 140
//! dropcanvas --breakpoint tablet move 1 -- -40 0
//! dropcanvas stylesheet --no-breakpoints
//! dropcanvas export --out design.html
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use canvas_codegen::{
    generate_markup, generate_stylesheet, DocumentExporter, ExportConfig, StylesheetOptions,
    DEFAULT_EXPORT_FILE,
};
use canvas_core::{
    builtin_templates, find_template, Breakpoint, ButtonVariant, ElementId, ElementKind, Point,
    PropertyEdit, ResizeHandle, SnapshotStore, StylePatch, Workspace,
};
use clap::{Parser, Subcommand};

/// Command-line arguments for dropcanvas.
#[derive(Debug, Clone, Parser)]
#[command(name = "dropcanvas")]
#[command(about = "Drag-and-drop layout designer: edit the workspace and generate HTML/CSS")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding the workspace snapshot
    #[arg(long, env = "DROPCANVAS_DATA_DIR", default_value = ".dropcanvas", global = true)]
    pub data_dir: PathBuf,

    /// Breakpoint that edits apply to (desktop, tablet, mobile)
    #[arg(long, env = "DROPCANVAS_BREAKPOINT", global = true)]
    pub breakpoint: Option<Breakpoint>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Workspace commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Drop a new element centered on a canvas point
    Place {
        /// Element type (rectangle, square, circle, paragraph, input, button)
        shape: ElementKind,
        /// Center x
        #[arg(allow_hyphen_values = true)]
        x: String,
        /// Center y
        #[arg(allow_hyphen_values = true)]
        y: String,
    },
    /// Drag an element by a pointer delta (snapping applies)
    Move {
        /// Element id
        id: ElementId,
        /// Horizontal pointer delta
        #[arg(allow_hyphen_values = true)]
        dx: String,
        /// Vertical pointer delta
        #[arg(allow_hyphen_values = true)]
        dy: String,
    },
    /// Drag one of an element's resize handles
    Resize {
        /// Element id
        id: ElementId,
        /// Handle (n, ne, e, se, s, sw, w, nw)
        handle: ResizeHandle,
        /// Horizontal pointer delta
        #[arg(allow_hyphen_values = true)]
        dx: String,
        /// Vertical pointer delta
        #[arg(allow_hyphen_values = true)]
        dy: String,
    },
    /// Edit an element's style and attributes
    Style(StyleArgs),
    /// Lock an element against edits
    Lock {
        /// Element id
        id: ElementId,
    },
    /// Unlock an element
    Unlock {
        /// Element id
        id: ElementId,
    },
    /// Delete an element
    Delete {
        /// Element id
        id: ElementId,
    },
    /// Insert a built-in template, or list them when no name is given
    Template {
        /// Template id
        name: Option<String>,
    },
    /// Change canvas settings
    Canvas(CanvasArgs),
    /// List elements with their effective geometry
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the generated markup
    Markup,
    /// Print the generated stylesheet
    Stylesheet {
        /// Leave out per-breakpoint media blocks
        #[arg(long)]
        no_breakpoints: bool,
    },
    /// Write a standalone HTML document
    Export {
        /// Output file
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        out: PathBuf,
        /// Document title
        #[arg(long)]
        title: Option<String>,
        /// Leave out per-breakpoint media blocks
        #[arg(long)]
        no_breakpoints: bool,
    },
    /// Remove every element and reset ids
    Clear,
}

/// Arguments for `style`.
#[derive(Debug, Clone, clap::Args)]
pub struct StyleArgs {
    /// Element id
    pub id: ElementId,
    /// Left position
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<String>,
    /// Top position
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<String>,
    /// Width (malformed or non-positive keeps the current width)
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,
    /// Height (malformed or non-positive keeps the current height)
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,
    /// Fill color
    #[arg(long)]
    pub fill: Option<String>,
    /// Text color
    #[arg(long)]
    pub color: Option<String>,
    /// Border color
    #[arg(long)]
    pub border_color: Option<String>,
    /// Border width (malformed or negative keeps the current width)
    #[arg(long, allow_hyphen_values = true)]
    pub border_width: Option<String>,
    /// Corner radius (malformed or negative keeps the current radius)
    #[arg(long, allow_hyphen_values = true)]
    pub radius: Option<String>,
    /// Font size (malformed or non-positive keeps the current size)
    #[arg(long, allow_hyphen_values = true)]
    pub font_size: Option<String>,
    /// Rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub rotation: Option<String>,
    /// Text content, placeholder or label
    #[arg(long)]
    pub content: Option<String>,
    /// Button variant (primary, secondary, outline)
    #[arg(long)]
    pub variant: Option<ButtonVariant>,
    /// Enable or disable edge-midpoint resize handles
    #[arg(long)]
    pub eight_joints: Option<bool>,
}

/// Arguments for `canvas`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CanvasArgs {
    /// Custom canvas width
    #[arg(long)]
    pub width: Option<String>,
    /// Custom canvas height
    #[arg(long)]
    pub height: Option<String>,
    /// Drop the custom size and follow the breakpoint default
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub clear_size: bool,
    /// Background color
    #[arg(long)]
    pub background: Option<String>,
    /// Zoom factor (clamped to 0.25..=2; malformed keeps the current zoom)
    #[arg(long)]
    pub zoom: Option<String>,
    /// Alignment assist on or off
    #[arg(long)]
    pub assist: Option<bool>,
}

/// Parse a numeric argument, falling back to `default` when malformed.
#[must_use]
pub fn parse_number(input: &str, default: f32) -> f32 {
    match input.trim().trim_end_matches("px").trim().parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(input, default, "malformed number, using default");
            default
        }
    }
}

/// Load the workspace, run one command and save if it changed anything.
///
/// # Errors
///
/// Returns an error if the data directory cannot be used, the command fails,
/// or the snapshot cannot be written.
pub fn run(args: &CliArgs) -> anyhow::Result<String> {
    let snapshots = SnapshotStore::with_data_dir(&args.data_dir)
        .with_context(|| format!("opening data directory {}", args.data_dir.display()))?;
    let mut workspace = snapshots.load_or_default();

    workspace.set_breakpoint(args.breakpoint.unwrap_or_default());

    let output = execute(&mut workspace, &args.command)?;

    if snapshots
        .save_if_changed(&mut workspace)
        .with_context(|| format!("saving {}", snapshots.path().display()))?
    {
        tracing::info!(path = %snapshots.path().display(), "workspace saved");
    }
    Ok(output)
}

/// Apply one command to a workspace and return the text to print.
///
/// # Errors
///
/// Returns an error for unknown elements or templates and failed exports.
#[allow(clippy::too_many_lines)]
pub fn execute(workspace: &mut Workspace, command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Place { shape, x, y } => {
            let (width, height) = workspace.canvas().size();
            let at = Point::new(parse_number(x, width / 2.0), parse_number(y, height / 2.0));
            let id = workspace.drop_shape(*shape, at);
            Ok(format!("placed {shape} {id}"))
        }
        Command::Move { id, dx, dy } => {
            require(workspace, *id)?;
            if !workspace.begin_drag(*id, Point::new(0.0, 0.0)) {
                tracing::warn!(%id, "move ignored");
                return Ok(format!("element {id} is locked; nothing moved"));
            }
            workspace.pointer_move(Point::new(parse_number(dx, 0.0), parse_number(dy, 0.0)));
            let snapped = workspace.guides().len();
            workspace.pointer_release();
            Ok(format!("{}{}", describe(workspace, *id), snap_note(snapped)))
        }
        Command::Resize { id, handle, dx, dy } => {
            require(workspace, *id)?;
            if !workspace.begin_resize(*id, *handle, Point::new(0.0, 0.0)) {
                tracing::warn!(%id, %handle, "resize ignored");
                return Ok(format!(
                    "element {id} is locked or handle {handle} needs eight-joint mode; nothing resized"
                ));
            }
            workspace.pointer_move(Point::new(parse_number(dx, 0.0), parse_number(dy, 0.0)));
            workspace.pointer_release();
            Ok(describe(workspace, *id))
        }
        Command::Style(style) => apply_style(workspace, style),
        Command::Lock { id } => {
            workspace.apply_edit(*id, PropertyEdit::Locked(true))?;
            Ok(format!("locked {id}"))
        }
        Command::Unlock { id } => {
            workspace.apply_edit(*id, PropertyEdit::Locked(false))?;
            Ok(format!("unlocked {id}"))
        }
        Command::Delete { id } => {
            match workspace.delete(*id)? {
                Some(removed) => Ok(format!("deleted {} {id}", removed.kind)),
                None => {
                    tracing::warn!(%id, "delete ignored");
                    Ok(format!("element {id} is locked; nothing deleted"))
                }
            }
        }
        Command::Template { name: None } => {
            let mut out = String::new();
            for template in builtin_templates() {
                let _ = writeln!(
                    out,
                    "{:<14} {:<14} {} elements",
                    template.id,
                    template.category,
                    template.elements.len()
                );
            }
            Ok(out)
        }
        Command::Template { name: Some(name) } => {
            let Some(template) = find_template(name) else {
                let known: Vec<_> = builtin_templates().iter().map(|t| t.id).collect();
                bail!("unknown template {name:?} (available: {})", known.join(", "));
            };
            let ids = workspace.insert_template(&template);
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            Ok(format!("inserted {} as {}", template.id, ids.join(", ")))
        }
        Command::Canvas(canvas) => Ok(apply_canvas(workspace, canvas)),
        Command::List { json } => list(workspace, *json),
        Command::Markup => Ok(generate_markup(workspace.store())),
        Command::Stylesheet { no_breakpoints } => Ok(generate_stylesheet(
            workspace.store(),
            workspace.canvas(),
            &StylesheetOptions {
                include_breakpoints: !no_breakpoints,
            },
        )),
        Command::Export {
            out,
            title,
            no_breakpoints,
        } => {
            let defaults = ExportConfig::default();
            let exporter = DocumentExporter::new(ExportConfig {
                title: title.clone().unwrap_or(defaults.title),
                stylesheet: StylesheetOptions {
                    include_breakpoints: !no_breakpoints,
                },
                ..defaults
            });
            exporter.write_to(workspace.store(), workspace.canvas(), out)?;
            Ok(format!("exported {}", out.display()))
        }
        Command::Clear => {
            workspace.clear();
            Ok("cleared workspace".to_string())
        }
    }
}

fn require(workspace: &Workspace, id: ElementId) -> anyhow::Result<()> {
    if workspace.store().contains(id) {
        Ok(())
    } else {
        bail!("no element with id {id}")
    }
}

fn snap_note(guides: usize) -> &'static str {
    if guides > 0 {
        " (snapped)"
    } else {
        ""
    }
}

fn describe(workspace: &Workspace, id: ElementId) -> String {
    match workspace.effective_element(id) {
        Some(e) => format!(
            "{} {} at ({}, {}) size {}x{} [{}]",
            e.kind,
            e.id,
            e.style.x,
            e.style.y,
            e.style.width,
            e.style.height,
            workspace.breakpoint()
        ),
        None => format!("element {id} not found"),
    }
}

fn apply_style(workspace: &mut Workspace, args: &StyleArgs) -> anyhow::Result<String> {
    let id = args.id;
    let current = workspace
        .effective_element(id)
        .with_context(|| format!("no element with id {id}"))?;

    let style = &current.style;
    let number = |input: Option<&str>, default: f32| {
        input.map(|text| parse_number(text, default))
    };
    let non_negative = |input: Option<&str>, default: f32| {
        number(input, default).map(|value| if value < 0.0 { default } else { value })
    };

    let patch = StylePatch {
        x: number(args.x.as_deref(), style.x),
        y: number(args.y.as_deref(), style.y),
        width: args
            .width
            .as_deref()
            .map(|w| canvas_core::parse_dimension(w, style.width)),
        height: args
            .height
            .as_deref()
            .map(|h| canvas_core::parse_dimension(h, style.height)),
        background_color: args.fill.clone(),
        color: args.color.clone(),
        border_color: args.border_color.clone(),
        border_width: non_negative(args.border_width.as_deref(), style.border_width),
        border_radius: non_negative(args.radius.as_deref(), style.border_radius),
        font_size: args
            .font_size
            .as_deref()
            .map(|size| canvas_core::parse_dimension(size, style.font_size)),
        rotation: number(args.rotation.as_deref(), style.rotation),
    };

    let mut edits = Vec::new();
    if !patch.is_empty() {
        edits.push(PropertyEdit::Style(patch));
    }
    if let Some(content) = &args.content {
        edits.push(PropertyEdit::Content(content.clone()));
    }
    if let Some(variant) = args.variant {
        edits.push(PropertyEdit::Variant(variant));
    }
    if let Some(on) = args.eight_joints {
        edits.push(PropertyEdit::EightJoints(on));
    }
    if edits.is_empty() {
        return Ok(describe(workspace, id));
    }

    for edit in edits {
        if !workspace.apply_edit(id, edit)? {
            tracing::warn!(%id, "style ignored on locked element");
            return Ok(format!("element {id} is locked; nothing changed"));
        }
    }
    Ok(describe(workspace, id))
}

fn apply_canvas(workspace: &mut Workspace, args: &CanvasArgs) -> String {
    if args.clear_size {
        workspace.canvas_mut().clear_custom_size();
    } else if args.width.is_some() || args.height.is_some() {
        let (width, height) = workspace.canvas().size();
        let width = args.width.clone().unwrap_or_else(|| width.to_string());
        let height = args.height.clone().unwrap_or_else(|| height.to_string());
        workspace.canvas_mut().set_custom_size_input(&width, &height);
    }
    if let Some(background) = &args.background {
        workspace.canvas_mut().background.clone_from(background);
    }
    if let Some(zoom) = &args.zoom {
        let current = workspace.canvas().zoom();
        workspace.canvas_mut().set_zoom(parse_number(zoom, current));
    }
    if let Some(assist) = args.assist {
        workspace.canvas_mut().alignment_assist = assist;
    }

    let canvas = workspace.canvas();
    let (width, height) = canvas.size();
    format!(
        "canvas {width}x{height} [{}] background {} zoom {} assist {}",
        canvas.breakpoint,
        canvas.background,
        canvas.zoom(),
        if canvas.alignment_assist { "on" } else { "off" }
    )
}

fn list(workspace: &Workspace, json: bool) -> anyhow::Result<String> {
    let elements: Vec<_> = workspace
        .store()
        .elements()
        .filter_map(|e| workspace.effective_element(e.id))
        .collect();
    if json {
        return Ok(serde_json::to_string_pretty(&elements)?);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<10} {:>8} {:>8} {:>8} {:>8}  flags",
        "id", "type", "x", "y", "width", "height"
    );
    for e in &elements {
        let mut flags = Vec::new();
        if e.locked {
            flags.push("locked");
        }
        if e.use_eight_joints {
            flags.push("8-joint");
        }
        if workspace.selected() == Some(e.id) {
            flags.push("selected");
        }
        let _ = writeln!(
            out,
            "{:>4}  {:<10} {:>8} {:>8} {:>8} {:>8}  {}",
            e.id.get(),
            e.kind.as_str(),
            e.style.x,
            e.style.y,
            e.style.width,
            e.style.height,
            flags.join(",")
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn test_parse_place() {
        let args = parse(&["dropcanvas", "place", "circle", "300", "140"]);
        assert!(matches!(
            args.command,
            Command::Place {
                shape: ElementKind::Circle,
                ..
            }
        ));
        assert_eq!(args.data_dir, PathBuf::from(".dropcanvas"));
    }

    #[test]
    fn test_parse_negative_move() {
        let args = parse(&["dropcanvas", "move", "2", "-40", "0"]);
        match args.command {
            Command::Move { id, dx, dy } => {
                assert_eq!(id, ElementId::new(2));
                assert_eq!(dx, "-40");
                assert_eq!(dy, "0");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_breakpoint_after_subcommand() {
        let args = parse(&["dropcanvas", "list", "--breakpoint", "tablet"]);
        assert_eq!(args.breakpoint, Some(Breakpoint::Tablet));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        assert!(CliArgs::try_parse_from(["dropcanvas", "place", "hexagon", "0", "0"]).is_err());
    }

    #[test]
    fn test_parse_number_fallback() {
        assert!((parse_number("12px", 0.0) - 12.0).abs() < f32::EPSILON);
        assert!((parse_number("-3", 0.0) + 3.0).abs() < f32::EPSILON);
        assert!((parse_number("abc", 7.0) - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_place_with_malformed_coordinates_uses_center() {
        let mut workspace = Workspace::new();
        execute(
            &mut workspace,
            &Command::Place {
                shape: ElementKind::Square,
                x: "left".to_string(),
                y: "top".to_string(),
            },
        )
        .expect("place");
        let element = workspace.store().get(ElementId::new(1)).expect("placed");
        assert!((element.style.x - 560.0).abs() < f32::EPSILON);
        assert!((element.style.y - 360.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_move_locked_reports_noop() {
        let mut workspace = Workspace::new();
        let id = workspace.drop_shape(ElementKind::Square, Point::new(100.0, 100.0));
        execute(&mut workspace, &Command::Lock { id }).expect("lock");
        let out = execute(
            &mut workspace,
            &Command::Move {
                id,
                dx: "50".to_string(),
                dy: "0".to_string(),
            },
        )
        .expect("move");
        assert!(out.contains("locked"));
        let element = workspace.store().get(id).expect("exists");
        assert!((element.style.x - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_style_unknown_element_errors() {
        let mut workspace = Workspace::new();
        let args = parse(&["dropcanvas", "style", "9", "--fill", "#000"]);
        assert!(execute(&mut workspace, &args.command).is_err());
    }

    #[test]
    fn test_style_width_fallback_keeps_current() {
        let mut workspace = Workspace::new();
        let id = workspace.drop_shape(ElementKind::Button, Point::new(100.0, 100.0));
        let args = parse(&["dropcanvas", "style", "1", "--width", "-5", "--height", "60"]);
        execute(&mut workspace, &args.command).expect("style");
        let element = workspace.store().get(id).expect("exists");
        assert!((element.style.width - 120.0).abs() < f32::EPSILON);
        assert!((element.style.height - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_malformed_style_numbers_keep_current_values() {
        let mut workspace = Workspace::new();
        let id = workspace.drop_shape(ElementKind::Paragraph, Point::new(200.0, 200.0));
        let args = parse(&[
            "dropcanvas",
            "style",
            "1",
            "--x",
            "left",
            "--y",
            "-20",
            "--font-size",
            "huge",
            "--border-width",
            "-3",
            "--radius",
            "6px",
            "--rotation",
            "abc",
        ]);
        execute(&mut workspace, &args.command).expect("style");
        let element = workspace.store().get(id).expect("exists");
        assert!((element.style.x - 100.0).abs() < f32::EPSILON);
        assert!((element.style.y + 20.0).abs() < f32::EPSILON);
        assert!((element.style.font_size - 16.0).abs() < f32::EPSILON);
        assert!(element.style.border_width.abs() < f32::EPSILON);
        assert!((element.style.border_radius - 6.0).abs() < f32::EPSILON);
        assert!(element.style.rotation.abs() < f32::EPSILON);
    }

    #[test]
    fn test_malformed_zoom_keeps_current() {
        let mut workspace = Workspace::new();
        let args = parse(&["dropcanvas", "canvas", "--zoom", "1.5"]);
        execute(&mut workspace, &args.command).expect("zoom");
        let args = parse(&["dropcanvas", "canvas", "--zoom", "wide"]);
        let out = execute(&mut workspace, &args.command).expect("zoom");
        assert!((workspace.canvas().zoom() - 1.5).abs() < f32::EPSILON);
        assert!(out.contains("zoom 1.5"));
    }

    #[test]
    fn test_unknown_template_lists_available() {
        let mut workspace = Workspace::new();
        let err = execute(
            &mut workspace,
            &Command::Template {
                name: Some("footer".to_string()),
            },
        )
        .expect_err("unknown template");
        assert!(err.to_string().contains("blue-night"));
    }
}
