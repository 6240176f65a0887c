use thiserror::Error;

/// Errors from the external generation call.
///
/// A single failed call surfaces directly as one of these variants; the
/// core performs no retries.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to the generation API: {0}")]
    Request(reqwest::Error),
    #[error("Generation API returned an error: {0}")]
    Api(String),
    #[error("Failed to deserialize generation API response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Generation API returned no usable candidates")]
    EmptyResponse,
}

/// Errors raised when the model's reply cannot be turned into a valid
/// insight record.
///
/// Both variants carry the raw reply text so callers can log it for
/// diagnosis; the text is never coerced into a valid-looking record.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Model reply is not valid JSON: {source}")]
    Parse {
        source: serde_json::Error,
        raw: String,
    },
    #[error("Model reply does not match the insight schema: {}", problems.join("; "))]
    Invalid { problems: Vec<String>, raw: String },
}

impl SchemaError {
    /// The raw model reply that failed parsing or validation.
    pub fn raw_reply(&self) -> &str {
        match self {
            SchemaError::Parse { raw, .. } => raw,
            SchemaError::Invalid { raw, .. } => raw,
        }
    }
}

/// Errors from the persistence gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage connection error: {0}")]
    Connection(String),
    #[error("Storage operation failed: {0}")]
    Operation(String),
    #[error("Identifier already exists: {0}")]
    Conflict(String),
    #[error("No record found for identifier: {0}")]
    NotFound(String),
    #[error("Failed to serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The composite error for the insight-generation pipeline: either the
/// external call failed, or its output failed schema validation.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
