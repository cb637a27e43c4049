use thiserror::Error;

/// Errors that abort a generation run. No partial output is ever returned alongside one.
#[derive(Error, Debug, Clone)]
pub enum GenerateError {
    #[error(
        "Cannot generate code from {0}: the root must be a single block or a workspace"
    )]
    UnrecognizedRoot(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur while loading a `GeneratorConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

/// Errors that can occur when converting a custom user format into a Tsumiki `Workspace`.
#[derive(Error, Debug, Clone)]
pub enum WorkspaceConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),

    #[error("Block '{block_id}' references unknown input '{input}'")]
    UnknownInput { block_id: String, input: String },
}
