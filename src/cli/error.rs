//! CLI-level errors and process exit codes

use thiserror::Error;

use crate::application::ApplicationError;

/// Exit codes, BSD sysexits.h compatible.
pub mod exit {
    /// Bad arguments or unknown organization/member index
    pub const USAGE: i32 = 64;
    /// Invalid document: structural error, field errors or a rejected move
    pub const DATAERR: i32 = 65;
    /// Document could not be read or decoded
    pub const NOINPUT: i32 = 66;
    /// Settings could not be loaded
    pub const CONFIG: i32 = 78;
}

/// Top-level error shown to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("move rejected: {0}")]
    MoveRejected(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exit::USAGE,
            CliError::MoveRejected(_) => exit::DATAERR,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::Invalid(_) => exit::DATAERR,
                ApplicationError::Config { .. } => exit::CONFIG,
                ApplicationError::Document { .. } => exit::NOINPUT,
                ApplicationError::UnknownOrganization(_)
                | ApplicationError::UnknownMember { .. } => exit::USAGE,
            },
        }
    }
}
