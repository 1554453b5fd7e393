//! CLI-level errors (wraps tree and settings errors)

use thiserror::Error;

use crate::errors::{SettingsError, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::Parse(_)
                | TreeError::MalformedEncoding { .. }
                | TreeError::TooDeep(_)
                | TreeError::Overflow => crate::exitcode::DATAERR,
                TreeError::InvalidPath { .. } | TreeError::NodeNotInTree(_) => {
                    crate::exitcode::USAGE
                }
                TreeError::SlotOccupied { .. }
                | TreeError::ParentNotFound(_)
                | TreeError::RootExists => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_parse_error_when_exit_code_then_dataerr() {
        let parse = serde_json::from_str::<Vec<i64>>("[").unwrap_err();
        assert_eq!(
            CliError::from(TreeError::from(parse)).exit_code(),
            crate::exitcode::DATAERR
        );
    }

    #[test]
    fn given_bad_path_when_exit_code_then_usage() {
        let err = CliError::from(TreeError::InvalidPath {
            path: "X".to_string(),
            reason: "unexpected step".to_string(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
