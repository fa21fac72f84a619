//! # Delphi Shared
//!
//! Shared wire types for the Delphi search service. Every payload the service
//! sends or accepts is modelled here so the client crates can stay focused on
//! transport and orchestration.

pub mod documents;
pub mod errors;
pub mod indexes;
pub mod keys;
pub mod search;
pub mod settings;
pub mod stats;
pub mod tasks;

pub use documents::{DocumentsQuery, DocumentsResults};
pub use errors::ServiceError;
pub use indexes::{IndexMetadata, IndexSwap, IndexesQuery, IndexesResults};
pub use keys::{Key, KeyBuilder, KeyUpdate, KeysQuery, KeysResults};
pub use search::{SearchQuery, SearchResults};
pub use settings::{Faceting, MinWordSizeForTypos, Pagination, Settings, TypoTolerance};
pub use stats::{Health, IndexStats, ServiceStats, Version};
pub use tasks::{EnqueuedTask, Task, TaskKind, TaskStatus, TasksQuery, TasksResults};
