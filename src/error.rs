//! Error types for schema construction and customization

use semver::Version;
use thiserror::Error;

/// Errors raised by the schema DSL and the customization engine.
///
/// Every variant is a construction-time misuse detectable at the call site;
/// there are no data-dependent runtime failures.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema fragment was built from input the DSL cannot express
    #[error("Invalid schema fragment: {0}")]
    InvalidFragment(String),

    /// An operator document does not have the shape the engine expects
    #[error("Malformed operator document: {0}")]
    MalformedDocument(String),

    /// A customization layer's version threshold does not increase on the previous layer
    #[error("Customization layer at version {candidate} must come after {previous}")]
    UnorderedLayer {
        previous: Version,
        candidate: Version,
    },

    /// An operator schema was already published for this version
    #[error("Operator '{operator}' already published for version {version}")]
    AlreadyPublished { operator: String, version: Version },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SchemaError>;
