use thiserror::Error;

/// Errors surfaced at the fallible edges of the crate (export, IO, configuration).
///
/// The rendering pipeline itself never fails; malformed data only degrades the picture.
#[derive(Debug, Error)]
pub enum Error {
    #[error("drawing backend error: {0}")]
    Draw(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("unknown series key: {0:?}")]
    UnknownSeries(String),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
