//! Client error types.
//!
//! This module defines the error type returned by every client operation.

use serde_json::Value;
use thiserror::Error;

use delphi_shared::ServiceError;
use delphi_tokens::TokenError;

/// Errors that can occur when talking to the service.
#[derive(Error, Debug)]
pub enum Error {
    /// The service rejected the request with an error payload.
    #[error("Service error (status {status}): {error}")]
    Api { status: u16, error: ServiceError },

    /// The service answered with a non-2xx status and an unrecognized body.
    #[error("Unexpected response from the service (status {status})")]
    UnexpectedResponse { status: u16, body: Value },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// A response body failed to decode.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The request is invalid and was not sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A task did not finish within the wait timeout.
    #[error("Timed out waiting for task {task_uid}")]
    TaskTimeout { task_uid: u32 },

    /// The operation needs an API key but the client has none.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Tenant token generation failed.
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Error {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a missing API key error.
    pub fn missing_api_key(msg: impl Into<String>) -> Self {
        Self::MissingApiKey(msg.into())
    }

    /// The service error code, when the service reported one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api { error, .. } => Some(&error.code),
            _ => None,
        }
    }
}
