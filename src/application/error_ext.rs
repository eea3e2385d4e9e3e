//! Context helpers for document I/O errors

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the failed action and the document path to any error.
///
/// ```ignore
/// std::fs::read_to_string(path).with_document_context("read", path)?;
/// ```
pub trait DocumentResultExt<T> {
    fn with_document_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T, E> DocumentResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_document_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Document {
            context: format!("{action} {}", path.display()),
            source: Box::new(e),
        })
    }
}
