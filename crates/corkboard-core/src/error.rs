pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset has {count} tier-0 persons ({ids}); a board has at most one center")]
    MultipleCenters { count: usize, ids: String },

    #[error("invalid board config: {message}")]
    Config { message: String },
}
