//! Error types for index queries and user input validation.

use thiserror::Error;

/// Failure of a single backend or geocoder call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Backend answered 404: no imagery in the requested date range
    #[error("No imagery available for the selected date range")]
    NotFound,

    /// Any other non-success HTTP status
    #[error("Server responded with status {0}")]
    Status(u16),

    /// Request could not be sent or the connection failed
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Response decoded but lacked a field the caller needs
    #[error("Response is missing field `{0}`")]
    MissingField(String),
}

impl QueryError {
    /// Classify an HTTP status code returned by the backend.
    pub fn from_status(status: u16) -> Self {
        if status == 404 {
            QueryError::NotFound
        } else {
            QueryError::Status(status)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound)
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Decode(err.to_string())
    }
}

/// User input rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select both a start date and an end date")]
    MissingDates,

    #[error("End date must be after the start date")]
    EndNotAfterStart,

    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Please enter a place name")]
    EmptyPlace,

    #[error("Look up a place first so the bounding box is filled in")]
    IncompleteBoundingBox,

    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Unknown index `{0}`, expected one of NDVI, EVI, NDWI, MNDWI")]
    UnknownIndex(String),

    #[error("Invalid coordinate `{0}`")]
    InvalidCoordinate(String),
}

/// Type alias for Results using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;
