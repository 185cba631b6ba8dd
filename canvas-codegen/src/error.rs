//! Code generation error types.

use thiserror::Error;

/// Result type for code generation operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors that can occur while exporting generated code.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Writing the exported document failed.
    #[error("Export write failed for {path}: {source}")]
    Write {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
