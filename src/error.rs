use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadingError {
    #[error("Approach rate must be finite, got {0}")]
    NonFiniteApproachRate(f64),

    #[error("Object {index}: radius must be finite and positive, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Object {index}: {field} must be finite and non-negative, got {value}")]
    InvalidTime {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Object {index}: {field} must be finite and non-negative, got {value}")]
    InvalidDistance {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Object {index}: start time {current} precedes previous start time {previous}")]
    UnorderedStartTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Section length must be finite and positive, got {0}")]
    InvalidSectionLength(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReadingError>;
