use thiserror::Error;

/// Reasons a loop region cannot be armed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoopConfigError {
    #[error("set loop start [ and end ] points first (start is missing)")]
    MissingStart,
    #[error("set loop start [ and end ] points first (end is missing)")]
    MissingEnd,
    #[error("loop end ({end:.2}s) must be greater than start ({start:.2}s)")]
    Inverted { start: f64, end: f64 },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Json {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
