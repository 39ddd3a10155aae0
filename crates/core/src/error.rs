use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("config error: {0}")]
    Config(String),

    #[error("sampler error: {0}")]
    Sampler(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
