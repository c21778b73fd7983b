//! Error types for bridge operations.
//!
//! Every operation returns `Result<_, BridgeError>`; the dispatch layer
//! renders failures as user-facing dialogs so malformed script input can
//! never crash the host. [`ErrorKind`] groups the variants into the four
//! failure classes the bridge distinguishes: caller input, precondition,
//! external system, and local IO.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while handling a script-originated call.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("unknown operation '{name}' with {arity} argument(s)")]
    UnknownOperation { name: String, arity: usize },

    #[error("field '{field}' packs {got} value(s), expected {expected}")]
    CompositeArity {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("could not determine the project kind from the content of '{file_stem}'")]
    UnrecognizedContent { file_stem: String },

    #[error("{kind} descriptor is missing required parameter '{key}'")]
    IncompleteDescriptor {
        kind: &'static str,
        key: &'static str,
    },

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("could not add the {kind} layer '{name}' to the project{detail}")]
    RegistryRejected {
        kind: &'static str,
        name: String,
        detail: String,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] geopanel_config::SettingsError),
}

/// Recoverable preconditions; each one names its remediation in the
/// message shown to the user.
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("the download folder has not been selected or does not exist")]
    DownloadFolderUnavailable,

    #[error("the project has not been saved locally and cannot be exported (path: '{path}')")]
    ProjectNotSaved { path: String },

    #[error("the project has unsaved changes; save it locally before proceeding")]
    ProjectDirty,

    #[error("the project needs a title in its properties before proceeding")]
    ProjectUntitled,
}

/// Coarse failure classification, used for logging and by hosts that
/// want to route the four classes differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed script input (wrong arity, unknown operation,
    /// unrecognized content, incomplete descriptor).
    CallerInput,
    /// A remediable precondition was not met.
    Precondition,
    /// The registry or the network refused the operation.
    External,
    /// Local filesystem or settings failure.
    Io,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::UnknownOperation { .. }
            | BridgeError::CompositeArity { .. }
            | BridgeError::UnrecognizedContent { .. }
            | BridgeError::IncompleteDescriptor { .. } => ErrorKind::CallerInput,
            BridgeError::Precondition(_) => ErrorKind::Precondition,
            BridgeError::RegistryRejected { .. } | BridgeError::Fetch(_) => ErrorKind::External,
            BridgeError::Write { .. } | BridgeError::Io(_) | BridgeError::Settings(_) => {
                ErrorKind::Io
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_arity_renders_field_and_counts() {
        let err = BridgeError::CompositeArity {
            field: "port|sslmode",
            expected: 2,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "field 'port|sslmode' packs 3 value(s), expected 2"
        );
        assert_eq!(err.kind(), ErrorKind::CallerInput);
    }

    #[test]
    fn precondition_errors_classify_as_precondition() {
        let err = BridgeError::from(PreconditionError::ProjectDirty);
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn registry_rejection_classifies_as_external() {
        let err = BridgeError::RegistryRejected {
            kind: "WMS",
            name: "base-map".into(),
            detail: String::new(),
        };
        assert_eq!(err.kind(), ErrorKind::External);
    }
}
