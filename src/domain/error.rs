//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of the organization forest.
/// They abort the operation that found them; no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("parent not found: {parent} (referenced by {identifier})")]
    DanglingParent { identifier: String, parent: String },

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("member not found: {member} (listed by organization {organization})")]
    MissingMember { organization: String, member: String },
}
