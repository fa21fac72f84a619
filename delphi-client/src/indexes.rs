//! Index handle and per-index operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use delphi_shared::{
    DocumentsQuery, DocumentsResults, EnqueuedTask, IndexMetadata, IndexStats, SearchQuery,
    SearchResults, Settings, Task, TypoTolerance,
};

use crate::config::WaitPolicy;
use crate::errors::Error;
use crate::tasks;
use crate::transport::{request_json, to_body, HttpTransport, Method};

/// Handle to one index of the service.
///
/// Creating a handle makes no request; the index may not even exist yet.
/// Handles are cheap to clone and share the transport of the client that
/// created them. Obtained from [`Client::index`](crate::Client::index).
#[derive(Clone)]
pub struct Index {
    uid: String,
    transport: Arc<dyn HttpTransport>,
    wait: WaitPolicy,
}

impl Index {
    pub(crate) fn new(
        uid: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        wait: WaitPolicy,
    ) -> Self {
        Self {
            uid: uid.into(),
            transport,
            wait,
        }
    }

    /// Uid of the index this handle points at.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    fn route(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("indexes/{}", self.uid)
        } else {
            format!("indexes/{}/{}", self.uid, suffix)
        }
    }

    /// Fetch the index record from the service.
    pub async fn fetch_metadata(&self) -> Result<IndexMetadata, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route(""),
            &[],
            None,
        )
        .await
    }

    /// Change the primary key of the index.
    ///
    /// The service only accepts this while the index contains no documents.
    pub async fn update_primary_key(&self, primary_key: &str) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Patch,
            &self.route(""),
            &[],
            Some(serde_json::json!({ "primaryKey": primary_key })),
        )
        .await
    }

    /// Delete the index with everything in it.
    pub async fn delete(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route(""),
            &[],
            None,
        )
        .await
    }

    /// Fetch document count and attribute distribution for the index.
    pub async fn stats(&self) -> Result<IndexStats, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route("stats"),
            &[],
            None,
        )
        .await
    }

    /// Search the index.
    ///
    /// # Arguments
    ///
    /// * `query` - Search text, filters and pagination. `SearchQuery::new()`
    ///   matches all documents.
    ///
    /// # Returns
    ///
    /// Hits deserialized into `T`, ordered by relevance.
    pub async fn search<T: DeserializeOwned>(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResults<T>, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            &self.route("search"),
            &[],
            Some(to_body(query)?),
        )
        .await
    }

    /// Add documents, replacing any existing document with the same id.
    ///
    /// # Arguments
    ///
    /// * `documents` - Documents to add.
    /// * `primary_key` - Attribute holding the document id. Only needed the
    ///   first time documents reach the index, and only if the service
    ///   cannot infer it.
    pub async fn add_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            &self.route("documents"),
            &primary_key_query(primary_key),
            Some(to_body(&documents)?),
        )
        .await
    }

    /// Add documents, merging attributes into existing documents with the
    /// same id instead of replacing them.
    pub async fn update_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Put,
            &self.route("documents"),
            &primary_key_query(primary_key),
            Some(to_body(&documents)?),
        )
        .await
    }

    /// Fetch one document by id.
    pub async fn get_document<T: DeserializeOwned>(&self, document_id: &str) -> Result<T, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route(&format!("documents/{document_id}")),
            &[],
            None,
        )
        .await
    }

    /// Browse documents in stored order, without ranking.
    pub async fn get_documents<T: DeserializeOwned>(
        &self,
        query: &DocumentsQuery,
    ) -> Result<DocumentsResults<T>, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route("documents"),
            &query.as_query_pairs(),
            None,
        )
        .await
    }

    /// Delete one document by id.
    pub async fn delete_document(&self, document_id: &str) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route(&format!("documents/{document_id}")),
            &[],
            None,
        )
        .await
    }

    /// Delete a batch of documents by id.
    pub async fn delete_documents<T: Serialize>(
        &self,
        document_ids: &[T],
    ) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Post,
            &self.route("documents/delete-batch"),
            &[],
            Some(to_body(&document_ids)?),
        )
        .await
    }

    /// Delete every document in the index, keeping its settings.
    pub async fn delete_all_documents(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route("documents"),
            &[],
            None,
        )
        .await
    }

    /// Fetch all settings of the index.
    pub async fn get_settings(&self) -> Result<Settings, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route("settings"),
            &[],
            None,
        )
        .await
    }

    /// Update settings. Only the fields set on `settings` change.
    pub async fn update_settings(&self, settings: &Settings) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Patch,
            &self.route("settings"),
            &[],
            Some(to_body(settings)?),
        )
        .await
    }

    /// Reset all settings to the service defaults.
    pub async fn reset_settings(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route("settings"),
            &[],
            None,
        )
        .await
    }

    /// Fetch the typo tolerance configuration.
    pub async fn get_typo_tolerance(&self) -> Result<TypoTolerance, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route("settings/typo-tolerance"),
            &[],
            None,
        )
        .await
    }

    /// Update typo tolerance. Only the fields set on `typo_tolerance` change.
    pub async fn update_typo_tolerance(
        &self,
        typo_tolerance: &TypoTolerance,
    ) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Patch,
            &self.route("settings/typo-tolerance"),
            &[],
            Some(to_body(typo_tolerance)?),
        )
        .await
    }

    /// Reset typo tolerance to the service defaults.
    pub async fn reset_typo_tolerance(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route("settings/typo-tolerance"),
            &[],
            None,
        )
        .await
    }

    /// Fetch the attributes usable in filter expressions.
    pub async fn get_filterable_attributes(&self) -> Result<Vec<String>, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Get,
            &self.route("settings/filterable-attributes"),
            &[],
            None,
        )
        .await
    }

    /// Replace the attributes usable in filter expressions.
    pub async fn update_filterable_attributes(
        &self,
        attributes: &[String],
    ) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Put,
            &self.route("settings/filterable-attributes"),
            &[],
            Some(to_body(&attributes)?),
        )
        .await
    }

    /// Reset the filterable attributes to the service default.
    pub async fn reset_filterable_attributes(&self) -> Result<EnqueuedTask, Error> {
        request_json(
            self.transport.as_ref(),
            Method::Delete,
            &self.route("settings/filterable-attributes"),
            &[],
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
}

fn primary_key_query(primary_key: Option<&str>) -> Vec<(String, String)> {
    match primary_key {
        Some(primary_key) => vec![("primaryKey".to_string(), primary_key.to_string())],
        None => Vec::new(),
    }
}
