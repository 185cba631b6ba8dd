//! # DropCanvas Codegen
//!
//! Turns a canvas-core element store into static HTML and CSS.
//!
//! ```text
//! ElementStore ──┬──▶ generate_markup     ──┐
//!                │                          ├──▶ DocumentExporter ──▶ design.html
//! CanvasConfig ──┴──▶ generate_stylesheet ──┘
//! ```
//!
//! Both generators are pure: the same store and canvas always produce
//! byte-identical text.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod markup;
pub mod stylesheet;

pub use error::{CodegenError, CodegenResult};
pub use export::{DocumentExporter, ExportConfig, DEFAULT_EXPORT_FILE};
pub use markup::{element_class, escape_html, generate_markup};
pub use stylesheet::{declarations, generate_stylesheet, StylesheetOptions};
