use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
