// In crates/tracker/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source was unreachable, answered with an error, or sent bars
    /// that do not form a valid series.
    #[error("Upstream data error: {0}")]
    UpstreamData(#[from] api_client::Error),

    #[error("Insufficient history: {required} bars required, {available} available")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<indicators::Error> for Error {
    fn from(e: indicators::Error) -> Self {
        match e {
            indicators::Error::InsufficientHistory { required, available } => {
                Error::InsufficientHistory { required, available }
            }
            other => Error::Config(other.to_string()),
        }
    }
}

impl From<signals::Error> for Error {
    fn from(e: signals::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
