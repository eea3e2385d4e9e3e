//! JSON documents of domain data: `{ "orgs": [...], "members": [...] }`

use std::path::Path;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, DocumentResultExt};
use crate::domain::DomainData;

/// Read and decode a domain document.
pub fn read_document(path: &Path) -> ApplicationResult<DomainData> {
    let content = std::fs::read_to_string(path).with_document_context("read", path)?;
    let data: DomainData =
        serde_json::from_str(&content).with_document_context("parse", path)?;
    debug!(
        "read_document: {} orgs, {} members from {}",
        data.orgs.len(),
        data.members.len(),
        path.display()
    );
    Ok(data)
}

/// Encode domain data as pretty JSON.
pub fn to_json(data: &DomainData) -> ApplicationResult<String> {
    serde_json::to_string_pretty(data).map_err(|e| ApplicationError::Document {
        context: "encode".to_string(),
        source: Box::new(e),
    })
}
