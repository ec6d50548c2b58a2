// error taxonomy shared by the stores, generation and the tui

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// every error a screen can surface through the error banner
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// rejected user input; the screen stays where it was
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("project name cannot be empty")]
    EmptyProjectName,

    #[error("project name '{0}' must not contain path separators")]
    InvalidProjectName(String),

    #[error("project with name '{0}' already exists")]
    DuplicateProjectName(String),

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("model name '{0}' must be unique")]
    DuplicateModelName(String),

    #[error("no output selected")]
    NoOutputSelected,

    #[error("output name cannot be empty")]
    EmptyOutputName,

    #[error("output name '{0}' must not contain path separators")]
    InvalidOutputName(String),

    #[error("a resume is still being generated for '{0}'")]
    GenerationInProgress(String),
}

/// i/o or parse failure on one of the config files
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// classified failure of a generation request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no LLM model selected")]
    NoModelSelected,

    #[error("invalid API key for {provider}")]
    InvalidCredential { provider: String },

    #[error("rate limit exceeded for {provider}")]
    RateLimit { provider: String },

    #[error("model {model} not found for {provider}")]
    ModelNotFound { provider: String, model: String },

    #[error("connection to {provider} failed - is the service running?")]
    ServiceUnavailable { provider: String },

    #[error("received empty response from LLM")]
    EmptyResponse,

    #[error("LLM error: {cause}")]
    Client { cause: String },
}
