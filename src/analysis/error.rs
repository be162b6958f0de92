use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Variable '{variable}' is missing from record {index}")]
    MissingVariable { variable: String, index: usize },

    #[error("Invalid band configuration: {0}")]
    InvalidBandConfig(String),

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    // Only reachable for NaN, every finite value lands in a validated band set.
    #[error("Value {value} at index {index} does not fall in any band")]
    Unclassifiable { index: usize, value: f64 },

    #[error("Record {index} has a timestamp earlier than the record before it")]
    UnorderedRecords { index: usize },
}
