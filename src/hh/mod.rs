pub mod scraper;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("request to '{url}' failed with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("file error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("csv error: '{0}'")]
    Csv(#[from] csv::Error),
}
