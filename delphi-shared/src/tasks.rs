//! Asynchronous task types.
//!
//! Every write against the Delphi service is asynchronous: the service
//! acknowledges the request with an enqueued task summary and performs the
//! work in the background. These types model the task lifecycle and the
//! filters accepted by the task listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::ServiceError;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Accepted by the service, waiting to be processed.
    Enqueued,
    /// Currently being processed.
    Processing,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Canceled before completion.
    Canceled,
}

impl TaskStatus {
    /// Wire name of the status, as used in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Enqueued => "enqueued",
            TaskStatus::Processing => "processing",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Canceled => "canceled",
        }
    }

    /// Whether the task has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        !matches!(self, TaskStatus::Enqueued | TaskStatus::Processing)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of operation a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    DocumentAdditionOrUpdate,
    DocumentEdition,
    DocumentDeletion,
    SettingsUpdate,
    IndexCreation,
    IndexDeletion,
    IndexUpdate,
    IndexSwap,
    TaskCancelation,
    TaskDeletion,
    DumpCreation,
    SnapshotCreation,
    UpgradeDatabase,
}

impl TaskKind {
    /// Wire name of the kind, as used in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::DocumentAdditionOrUpdate => "documentAdditionOrUpdate",
            TaskKind::DocumentEdition => "documentEdition",
            TaskKind::DocumentDeletion => "documentDeletion",
            TaskKind::SettingsUpdate => "settingsUpdate",
            TaskKind::IndexCreation => "indexCreation",
            TaskKind::IndexDeletion => "indexDeletion",
            TaskKind::IndexUpdate => "indexUpdate",
            TaskKind::IndexSwap => "indexSwap",
            TaskKind::TaskCancelation => "taskCancelation",
            TaskKind::TaskDeletion => "taskDeletion",
            TaskKind::DumpCreation => "dumpCreation",
            TaskKind::SnapshotCreation => "snapshotCreation",
            TaskKind::UpgradeDatabase => "upgradeDatabase",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full task record as returned by `GET /tasks/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, monotonically increasing task identifier.
    pub uid: u32,
    /// Batch this task was processed in, if it has been batched.
    #[serde(default)]
    pub batch_uid: Option<u32>,
    /// Index the task operates on. `None` for global tasks such as dumps.
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Kind of operation.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Uid of the `taskCancelation` task that canceled this one.
    #[serde(default)]
    pub canceled_by: Option<u32>,
    /// Kind-specific progress details, e.g. received and indexed counts.
    #[serde(default)]
    pub details: Option<Value>,
    /// Error that failed the task, when `status` is `failed`.
    #[serde(default)]
    pub error: Option<ServiceError>,
    /// Processing duration in ISO 8601 form, once finished.
    #[serde(default)]
    pub duration: Option<String>,
    /// When the service accepted the task.
    pub enqueued_at: DateTime<Utc>,
    /// When processing started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When processing finished.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether the task has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}

/// Acknowledgement returned when a write is accepted.
///
/// The service answers every write with this summary before doing any work.
/// Poll `GET /tasks/{task_uid}` to observe the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueuedTask {
    /// Uid to poll for the task outcome.
    pub task_uid: u32,
    /// Index the task operates on, if any.
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Always `enqueued` at acknowledgement time.
    pub status: TaskStatus,
    /// Kind of operation.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// When the service accepted the task.
    pub enqueued_at: DateTime<Utc>,
}

/// Page of tasks returned by `GET /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResults {
    /// Tasks in this page, newest first.
    pub results: Vec<Task>,
    /// Total number of tasks matching the filter.
    pub total: u64,
    /// Page size that was applied.
    pub limit: u32,
    /// Uid of the first task in this page.
    #[serde(default)]
    pub from: Option<u32>,
    /// Uid to pass as `from` to fetch the next page, if there is one.
    #[serde(default)]
    pub next: Option<u32>,
}

/// Filters accepted by the task listing, cancelation and deletion endpoints.
///
/// All filters are optional and combine with AND semantics. List-valued
/// filters are serialized as comma separated query parameters.
#[derive(Debug, Clone, Default)]
pub struct TasksQuery {
    /// Restrict to these task uids.
    pub uids: Option<Vec<u32>>,
    /// Restrict to these lifecycle states.
    pub statuses: Option<Vec<TaskStatus>>,
    /// Restrict to these operation kinds.
    pub kinds: Option<Vec<TaskKind>>,
    /// Restrict to tasks touching these indexes.
    pub index_uids: Option<Vec<String>>,
    /// Maximum number of tasks to return.
    pub limit: Option<u32>,
    /// Return tasks with uid less than or equal to this value.
    pub from: Option<u32>,
}

impl TasksQuery {
    /// Create an empty filter matching every task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to these task uids.
    pub fn with_uids(mut self, uids: impl IntoIterator<Item = u32>) -> Self {
        self.uids = Some(uids.into_iter().collect());
        self
    }

    /// Restrict to these lifecycle states.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Restrict to these operation kinds.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = TaskKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Restrict to tasks touching these indexes.
    pub fn with_index_uids<S: Into<String>>(
        mut self,
        index_uids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.index_uids = Some(index_uids.into_iter().map(Into::into).collect());
        self
    }

    /// Limit the number of tasks returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Start the page at this task uid.
    pub fn with_from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    /// Render the filter as query parameters.
    pub fn as_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(uids) = &self.uids {
            pairs.push(("uids".to_string(), join(uids.iter())));
        }
        if let Some(statuses) = &self.statuses {
            pairs.push(("statuses".to_string(), join(statuses.iter())));
        }
        if let Some(kinds) = &self.kinds {
            pairs.push(("types".to_string(), join(kinds.iter())));
        }
        if let Some(index_uids) = &self.index_uids {
            pairs.push(("indexUids".to_string(), join(index_uids.iter())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        pairs
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
