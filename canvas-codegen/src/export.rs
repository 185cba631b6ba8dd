//! Standalone document export.
//!
//! Embeds the generated stylesheet and markup in one static HTML document
//! with no external resource references.

use std::fmt::Write;
use std::path::Path;

use canvas_core::{CanvasConfig, ElementStore};
use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, CodegenResult};
use crate::markup::{escape_html, generate_markup};
use crate::stylesheet::{generate_stylesheet, StylesheetOptions};

/// Default file name for exported documents.
pub const DEFAULT_EXPORT_FILE: &str = "design.html";

/// Configuration for document export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Document title.
    pub title: String,
    /// Stylesheet options.
    pub stylesheet: StylesheetOptions,
    /// Prepend a small reset (`box-sizing`, zero body margin).
    pub include_reset: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Exported Design".to_string(),
            stylesheet: StylesheetOptions::default(),
            include_reset: true,
        }
    }
}

/// Builds standalone documents from a store and canvas.
#[derive(Debug, Clone, Default)]
pub struct DocumentExporter {
    config: ExportConfig,
}

impl DocumentExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter's configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render the full document.
    #[must_use]
    pub fn render(&self, store: &ElementStore, canvas: &CanvasConfig) -> String {
        let css = generate_stylesheet(store, canvas, &self.config.stylesheet);
        let html = generate_markup(store);

        let mut doc = String::with_capacity(css.len() + html.len() + 512);
        doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        doc.push_str("  <meta charset=\"UTF-8\">\n");
        doc.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(doc, "  <title>{}</title>", escape_html(&self.config.title));
        doc.push_str("  <style>\n");
        if self.config.include_reset {
            doc.push_str("* { box-sizing: border-box; }\nbody { margin: 0; }\n\n");
        }
        doc.push_str(&css);
        doc.push_str("  </style>\n</head>\n<body>\n");
        doc.push_str(&html);
        doc.push_str("\n</body>\n</html>\n");
        doc
    }

    /// Render the document and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Write`] if the file cannot be written.
    pub fn write_to(
        &self,
        store: &ElementStore,
        canvas: &CanvasConfig,
        path: &Path,
    ) -> CodegenResult<()> {
        let doc = self.render(store, canvas);
        std::fs::write(path, doc.as_bytes()).map_err(|source| CodegenError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), elements = store.len(), "exported document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_core::{ElementKind, Point, Workspace};

    #[test]
    fn test_document_embeds_both_parts() {
        let mut workspace = Workspace::new();
        workspace.drop_shape(ElementKind::Button, Point::new(100.0, 100.0));
        let doc = DocumentExporter::with_defaults().render(workspace.store(), workspace.canvas());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Exported Design</title>"));
        assert!(doc.contains(".element-1 {"));
        assert!(doc.contains("<button class=\"element-1 btn-primary\">Button</button>"));
        assert!(!doc.contains("<link"));
        assert!(!doc.contains("<script"));
        assert!(doc.ends_with("</html>\n"));
    }

    #[test]
    fn test_reset_optional() {
        let workspace = Workspace::new();
        let exporter = DocumentExporter::new(ExportConfig {
            include_reset: false,
            ..ExportConfig::default()
        });
        let doc = exporter.render(workspace.store(), workspace.canvas());
        assert!(!doc.contains("box-sizing"));
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let json = serde_json::to_string(&ExportConfig::default()).expect("serialize");
        assert!(json.contains("\"includeReset\":true"));
        assert!(json.contains("\"includeBreakpoints\":true"));
        let back: ExportConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ExportConfig::default());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let workspace = Workspace::new();
        let exporter = DocumentExporter::with_defaults();
        exporter
            .write_to(workspace.store(), workspace.canvas(), &path)
            .expect("write");
        let written = std::fs::read_to_string(&path).expect("read");
        assert_eq!(written, exporter.render(workspace.store(), workspace.canvas()));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.html");
        let workspace = Workspace::new();
        let err = DocumentExporter::with_defaults()
            .write_to(workspace.store(), workspace.canvas(), &path)
            .expect_err("should fail");
        assert!(matches!(err, CodegenError::Write { .. }));
    }
}
