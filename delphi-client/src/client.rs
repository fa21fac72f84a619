//! Service client implementation.
//!
//! This module provides the main entry point to the Delphi search service.
//! Application code uses it to manage indexes, keys and tasks, and to mint
//! tenant tokens for restricted frontend searches.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use delphi_shared::{
    EnqueuedTask, Health, IndexMetadata, IndexSwap, IndexesQuery, IndexesResults, Key, KeyBuilder,
    KeyUpdate, KeysQuery, KeysResults, ServiceStats, Task, TasksQuery, TasksResults, Version,
};
use delphi_tokens::{self as tokens, SearchRules, TenantTokenOptions};

use crate::config::{ClientConfig, WaitPolicy};
use crate::errors::Error;
use crate::http::ReqwestTransport;
use crate::indexes::Index;
use crate::tasks;
use crate::transport::{request_json, to_body, HttpTransport, Method};

/// The main client for the Delphi search service.
///
/// A client is cheap to clone; clones share the underlying transport and
/// its connection pool.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn HttpTransport>,
    api_key: Option<String>,
    wait: WaitPolicy,
}

impl Client {
    /// Connect to the service at `host`.
    ///
    /// # Arguments
    ///
    /// * `host` - Base url of the service, e.g. `http://localhost:7700`.
    /// * `api_key` - Key authenticating every request. `None` for anonymous
    ///   access; most endpoints then answer 401.
    pub fn new(host: &str, api_key: Option<&str>) -> Result<Self, Error> {
        let mut config = ClientConfig::new(host);
        if let Some(api_key) = api_key {
            config = config.with_api_key(api_key);
        }
        Self::from_config(config)
    }

    /// Connect with explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::from_config(&config)?;
        info!(host = %config.host, "Created service client");
        Ok(Self {
            transport: Arc::new(transport),
            api_key: config.api_key,
            wait: config.wait,
        })
    }

    /// Build a client on an existing transport.
    ///
    /// This is the injection seam: anything implementing `HttpTransport`
    /// works, which is how the tests drive the client without a server.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        api_key: Option<String>,
        wait: WaitPolicy,
    ) -> Self {
        Self {
            transport,
            api_key,
            wait,
        }
    }

    /// Handle to the index named `uid`. Makes no request.
    pub fn index(&self, uid: impl Into<String>) -> Index {
        Index::new(uid, self.transport.clone(), self.wait)
    }

    /// List indexes.
    pub async fn list_indexes(&self, query: &IndexesQuery) -> Result<IndexesResults, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            "indexes",
            &query.as_query_pairs(),
            None,
        )
        .await
    }

    /// Fetch the record of one index.
    pub async fn get_index(&self, uid: &str) -> Result<IndexMetadata, Error> {
        if uid.is_empty() {
            return Err(Error::invalid_request("index uid is required"));
        }
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &format!("indexes/{uid}"),
            &[],
            None,
        )
        .await
    }

    /// Create an index.
    ///
    /// # Arguments
    ///
    /// * `uid` - Name of the index.
    /// * `primary_key` - Attribute holding the document id, or `None` to
    ///   let the service infer it from the first documents.
    pub async fn create_index(
        &self,
        uid: &str,
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, Error> {
        if uid.is_empty() {
            return Err(Error::invalid_request("index uid is required"));
        }
        request_json(
            self.transport.as_ref(),
            Method::Post,
            "indexes",
            &[],
            Some(json!({ "uid": uid, "primaryKey": primary_key })),
        )
        .await
    }

    /// Delete an index with everything in it.
    pub async fn delete_index(&self, uid: &str) -> Result<EnqueuedTask, Error> {
        if uid.is_empty() {
            return Err(Error::invalid_request("index uid is required"));
        }
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &format!("indexes/{uid}"),
            &[],
            None,
        )
        .await
    }

    /// Swap pairs of indexes atomically.
    ///
    /// The usual zero-downtime reindex: build `movies_new`, then swap it
    /// with `movies` and delete the leftover.
    pub async fn swap_indexes(&self, swaps: &[IndexSwap]) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            "swap-indexes",
            &[],
            Some(to_body(&swaps)?),
        )
        .await
    }

    /// Fetch one task by uid.
    pub async fn get_task(&self, task_uid: u32) -> Result<Task, Error> {
        tasks::get_task(self.transport.as_ref(), task_uid).await
    }

    /// List tasks matching a filter.
    pub async fn get_tasks(&self, query: &TasksQuery) -> Result<TasksResults, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            "tasks",
            &query.as_query_pairs(),
            None,
        )
        .await
    }

    /// Cancel every task matching the filter.
    pub async fn cancel_tasks(&self, filter: &TasksQuery) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            "tasks/cancel",
            &filter.as_query_pairs(),
            None,
        )
        .await
    }

    /// Delete the records of finished tasks matching the filter.
    pub async fn delete_tasks(&self, filter: &TasksQuery) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            "tasks",
            &filter.as_query_pairs(),
            None,
        )
        .await
    }

    /// Poll a task until it reaches a terminal state.
    ///
    /// `policy` overrides the client wait policy for this call.
    pub async fn wait_for_task(
        &self,
        task_uid: u32,
        policy: Option<WaitPolicy>,
    ) -> Result<Task, Error> {
        tasks::wait_for_task(
            self.transport.as_ref(),
            policy.unwrap_or(self.wait),
            task_uid,
        )
        .await
    }

    /// List API keys.
    pub async fn get_keys(&self, query: &KeysQuery) -> Result<KeysResults, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            "keys",
            &query.as_query_pairs(),
            None,
        )
        .await
    }

    /// Fetch one API key by its value or its uid.
    pub async fn get_key(&self, key_or_uid: &str) -> Result<Key, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &format!("keys/{key_or_uid}"),
            &[],
            None,
        )
        .await
    }

    /// Create an API key.
    pub async fn create_key(&self, key: &KeyBuilder) -> Result<Key, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            "keys",
            &[],
            Some(to_body(key)?),
        )
        .await
    }

    /// Update the name or description of an API key.
    pub async fn update_key(&self, key_or_uid: &str, update: &KeyUpdate) -> Result<Key, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Patch,
            &format!("keys/{key_or_uid}"),
            &[],
            Some(to_body(update)?),
        )
        .await
    }

    /// Delete an API key. Tenant tokens derived from it stop working.
    pub async fn delete_key(&self, key_or_uid: &str) -> Result<(), Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &format!("keys/{key_or_uid}"),
            &[],
            None,
        )
        .await
    }

    /// Check the service is up.
    pub async fn health(&self) -> Result<Health, Error> {
        request_json(self.transport.as_ref(), Method::Get, "health", &[], None).await
    }

    /// Whether the service reports itself available.
    pub async fn is_healthy(&self) -> bool {
        match self.health().await {
            Ok(health) => health.status == "available",
            Err(_) => false,
        }
    }

    /// Fetch the running service version.
    pub async fn version(&self) -> Result<Version, Error> {
        request_json(self.transport.as_ref(), Method::Get, "version", &[], None).await
    }

    /// Fetch whole-instance statistics.
    pub async fn stats(&self) -> Result<ServiceStats, Error> {
        request_json(self.transport.as_ref(), Method::Get, "stats", &[], None).await
    }

    /// Start a dump of the whole instance.
    pub async fn create_dump(&self) -> Result<EnqueuedTask, Error> {
        request_json(self.transport.as_ref(), Method::Post, "dumps", &[], None).await
    }

    /// Start a snapshot of the whole instance.
    pub async fn create_snapshot(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            "snapshots",
            &[],
            None,
        )
        .await
    }

    /// Generate a tenant token signed with the client API key.
    ///
    /// The token grants exactly `search_rules` and is verified server side
    /// against the key named by `api_key_uid`, so that key must be the one
    /// this client authenticates with. No request is made.
    ///
    /// # Arguments
    ///
    /// * `api_key_uid` - Uid of the API key the token derives from.
    /// * `search_rules` - The search permissions embedded in the token.
    /// * `expires_at` - When the token stops being accepted, or `None` for
    ///   no expiry.
    pub fn generate_tenant_token(
        &self,
        api_key_uid: &str,
        search_rules: &SearchRules,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, Error> {
        let secret_key = self.api_key.as_deref().ok_or_else(|| {
            Error::missing_api_key("tenant tokens are signed with the client API key")
        })?;

        let mut options = TenantTokenOptions::new(secret_key);
        if let Some(expires_at) = expires_at {
            options = options.with_expires_at(expires_at);
        }
        Ok(tokens::generate_tenant_token(
            api_key_uid,
            search_rules,
            &options,
        )?)
    }
}
