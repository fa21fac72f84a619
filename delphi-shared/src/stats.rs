//! Service status and statistics types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// `available` when the service can answer requests.
    pub status: String,
}

/// Response of `GET /version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Commit the running binary was built from.
    pub commit_sha: String,
    /// Commit date of the running binary.
    pub commit_date: String,
    /// Semantic version of the running binary.
    pub pkg_version: String,
}

/// Statistics for one index, `GET /indexes/{uid}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Number of documents in the index.
    pub number_of_documents: u64,
    /// Whether the index is currently processing documents.
    pub is_indexing: bool,
    /// How many documents contain each attribute.
    pub field_distribution: HashMap<String, u64>,
}

/// Whole-instance statistics, `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    /// Size of the database on disk, in bytes.
    pub database_size: u64,
    /// When the instance last finished processing a task.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    /// Per-index statistics, keyed by index uid.
    pub indexes: HashMap<String, IndexStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_instance_stats() {
        let raw = r#"{
            "databaseSize": 447819776,
            "lastUpdate": "2026-08-20T09:29:45.175Z",
            "indexes": {
                "movies": {
                    "numberOfDocuments": 19654,
                    "isIndexing": false,
                    "fieldDistribution": { "title": 19654, "genre": 19021 }
                }
            }
        }"#;

        let stats: ServiceStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.database_size, 447819776);
        let movies = &stats.indexes["movies"];
        assert_eq!(movies.number_of_documents, 19654);
        assert!(!movies.is_indexing);
        assert_eq!(movies.field_distribution["genre"], 19021);
    }

    #[test]
    fn deserializes_health_and_version() {
        let health: Health = serde_json::from_str(r#"{ "status": "available" }"#).unwrap();
        assert_eq!(health.status, "available");

        let version: Version = serde_json::from_str(
            r#"{
                "commitSha": "b46889b5f0f2f8b91438a08a358ba8f05fc09fc1",
                "commitDate": "2026-07-02T12:00:00Z",
                "pkgVersion": "1.8.0"
            }"#,
        )
        .unwrap();
        assert_eq!(version.pkg_version, "1.8.0");
    }
}
