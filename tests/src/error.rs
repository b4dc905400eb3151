//! Error types for the scenario framework.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors raised while loading or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse operations in {file}: {message}")]
    OperationsParse { file: String, message: String },

    #[error("step '{0}' not found in operations")]
    StepNotFound(String),

    #[error("scenario has no operations")]
    NoOperations,

    #[error("engine setup failed: {0}")]
    EngineSetup(String),

    #[error("request of step '{step}' is malformed: {message}")]
    StepRequest { step: String, message: String },

    #[error("assertion failed at step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn file_read(path: &Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn operations_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OperationsParse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound(step.into())
    }

    pub fn step_request(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepRequest {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
