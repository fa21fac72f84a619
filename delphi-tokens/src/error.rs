//! Tenant token error types.

use thiserror::Error;

/// Errors that can occur while generating a tenant token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The requested expiry is not strictly in the future.
    #[error("Token expiry must be a date in the future")]
    ExpiryInThePast,

    /// The search rules are neither a list of index uids nor a rule map.
    #[error("Search rules must be an array of index uids or an object mapping index uids to rules")]
    InvalidSearchRules,

    /// No API key uid was provided.
    #[error("An API key uid is required to generate a tenant token")]
    MissingApiKeyUid,

    /// The API key uid is not a hyphenated version 4 UUID. The uid of a key
    /// can be fetched from the service with `get_key`.
    #[error("The API key uid is not a valid uuid4")]
    InvalidApiKeyUid,

    /// No usable signing key was provided.
    #[error("Cannot sign a tenant token with an empty key")]
    MissingSignKey,

    /// A token segment failed to serialize to JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl TokenError {
    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
