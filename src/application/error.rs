//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::form::FieldErrors;

/// Failures of an editing session or of document I/O around it.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Edit addressed an organization row that does not exist
    #[error("no organization at index {0}")]
    UnknownOrganization(usize),

    /// Edit addressed a member row that does not exist
    #[error("no member at index {member} of organization {org}")]
    UnknownMember { org: usize, member: usize },

    /// Submission blocked by field errors
    #[error("form has {} validation error(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("config error: {message}")]
    Config { message: String },

    /// Reading, decoding or encoding a document failed
    #[error("document error: {context}")]
    Document {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
