use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    /// No schedule table on the page. Expected for months with no games;
    /// callers skip the month instead of aborting.
    #[error("No schedule table found at {url}")]
    TableNotFound { url: String },

    #[error("Parse integrity error: {0}")]
    ParseIntegrity(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
