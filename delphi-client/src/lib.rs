//! # Delphi Client
//!
//! Async client for the Delphi search service.
//!
//! This crate provides the `Client` entry point, per-index `Index` handles,
//! task polling and tenant token minting. Wire types live in
//! `delphi-shared`; token signing lives in `delphi-tokens`.
//!
//! ```no_run
//! use delphi_client::Client;
//! use delphi_shared::SearchQuery;
//! use serde_json::Value;
//!
//! # async fn run() -> Result<(), delphi_client::Error> {
//! let client = Client::new("http://localhost:7700", Some("masterKey"))?;
//!
//! let task = client.create_index("movies", Some("id")).await?;
//! client.wait_for_task(task.task_uid, None).await?;
//!
//! let results = client
//!     .index("movies")
//!     .search::<Value>(&SearchQuery::new().with_query("carol"))
//!     .await?;
//! println!("{} hits", results.hits.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod indexes;
mod tasks;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, WaitPolicy};
pub use errors::Error;
pub use http::ReqwestTransport;
pub use indexes::Index;
pub use transport::{HttpTransport, Method, TransportResponse};

pub use delphi_tokens::{SearchRules, TokenError};
