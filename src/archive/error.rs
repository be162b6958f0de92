use crate::analysis::error::AnalysisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid archive request: {0}")]
    InvalidRequest(String),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Open-Meteo answers bad requests with {"error": true, "reason": "..."}
    #[error("Archive API rejected the request ({status}): {reason}")]
    Api {
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Failed to parse JSON data")]
    JsonParse(#[from] serde_json::Error),

    #[error("Response is missing field '{0}'")]
    MissingField(String),

    #[error("Variable '{variable}' has {found} values but there are {expected} timestamps")]
    LengthMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse timestamp '{value}'")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Response has no hour with values for every requested variable")]
    NoCompleteRecords,

    #[error("Response does not form a valid time series")]
    InvalidTable(#[source] AnalysisError),
}
