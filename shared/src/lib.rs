// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("{context} - Status: {status}")]
    UpstreamStatus { context: String, status: u16 },
    #[error("invalid upstream payload: {0}")]
    InvalidPayload(String),
    #[error("no valid data returned for app {0}")]
    Unsuccessful(u32),
    #[error("configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
