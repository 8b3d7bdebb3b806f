//! Error types for wixgen

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a package descriptor
#[derive(Error, Debug)]
pub enum GenError {
    #[error("missing arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("\"{}\" does not exist or is not a directory", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("\"{}\" does not exist", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("executable \"{0}\" must be a relative path inside the input directory")]
    ExecutableOutsideInput(String),

    #[error("icon \"{}\" does not exist", .0.display())]
    IconNotFound(PathBuf),

    #[error("cannot resolve \"{}\": {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("component \"{0}\" is defined more than once")]
    DuplicateComponent(String),

    #[error("component \"{0}\" is not referenced by any feature")]
    UnreferencedComponent(String),

    #[error("feature references unknown component \"{0}\"")]
    DanglingReference(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::MissingArguments(_) | GenError::Config(_) => 1,
            GenError::InputDirNotFound(_)
            | GenError::ExecutableNotFound(_)
            | GenError::ExecutableOutsideInput(_)
            | GenError::IconNotFound(_)
            | GenError::Resolve { .. }
            | GenError::Walk(_) => 2,
            GenError::DuplicateComponent(_)
            | GenError::UnreferencedComponent(_)
            | GenError::DanglingReference(_) => 3,
            GenError::Json(_) | GenError::Io(_) => 4,
        }
    }

    /// Whether usage help should accompany the message
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            GenError::MissingArguments(_)
                | GenError::InputDirNotFound(_)
                | GenError::ExecutableNotFound(_)
                | GenError::ExecutableOutsideInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
