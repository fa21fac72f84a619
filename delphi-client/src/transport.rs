//! Transport abstraction for the service HTTP API.
//!
//! This module defines the one seam between the client and the network. The
//! `HttpTransport` trait carries the base url and credentials; callers hand
//! over a route relative to the base url plus optional query parameters and
//! a JSON body. Swapping the implementation is how the tests drive the
//! client without a server.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use delphi_shared::ServiceError;

use crate::errors::Error;

/// HTTP method of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response from the transport: HTTP status and decoded JSON body.
///
/// Bodies that are empty on the wire decode to `Value::Null`.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body.
    pub body: Value,
}

/// Connection to the service HTTP API.
///
/// Implementations return non-2xx responses like any other; mapping them to
/// errors happens in the caller. An `Err` means the request itself failed,
/// not that the service rejected it.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one request against the service.
    async fn request(
        &self,
        method: Method,
        route: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<TransportResponse, Error>;
}

/// Issue a request and decode the response body into `T`.
///
/// Non-2xx responses become `Error::Api` when the body carries a service
/// error payload and `Error::UnexpectedResponse` otherwise.
pub(crate) async fn request_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    method: Method,
    route: &str,
    query: &[(String, String)],
    body: Option<Value>,
) -> Result<T, Error> {
    let response = transport.request(method, route, query, body).await?;
    if !(200..300).contains(&response.status) {
        return Err(
            match serde_json::from_value::<ServiceError>(response.body.clone()) {
                Ok(error) => Error::Api {
                    status: response.status,
                    error,
                },
                Err(_) => Error::UnexpectedResponse {
                    status: response.status,
                    body: response.body,
                },
            },
        );
    }
    serde_json::from_value(response.body).map_err(|e| Error::decode(e.to_string()))
}

/// Serialize a request body.
pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value)
        .map_err(|e| Error::invalid_request(format!("Failed to serialize request body: {e}")))
}
