/// Errors raised at the fallible edges of the crate: data files, config
/// files and terminal I/O.  The game core itself never fails.

#[derive(Debug, thiserror::Error)]
pub enum ArcadeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(String),
}
