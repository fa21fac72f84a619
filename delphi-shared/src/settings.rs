//! Index settings types.
//!
//! `Settings` mirrors the body of `GET /indexes/{uid}/settings`. For updates
//! the same struct is sent with only the fields to change set; `None` fields
//! are omitted so the service leaves them untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Full settings object of an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Attributes returned in search hits, `["*"]` for all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    /// Attributes searched for query terms, in priority order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    /// Attributes usable in `filter` expressions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    /// Attributes usable in `sort` directives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    /// Ranking rules, in application order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    /// Words ignored in queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    /// Query-time synonym groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<HashMap<String, Vec<String>>>,
    /// Attribute whose value must be unique across returned hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    /// Typo tolerance configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typo_tolerance: Option<TypoTolerance>,
    /// Search pagination limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Faceting limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faceting: Option<Faceting>,
}

/// Typo tolerance configuration, `GET /indexes/{uid}/settings/typo-tolerance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoTolerance {
    /// Whether typos are tolerated at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Word lengths from which one and two typos are tolerated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_typos: Option<MinWordSizeForTypos>,
    /// Words typos are never tolerated on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_on_words: Option<Vec<String>>,
    /// Attributes typos are never tolerated on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_on_attributes: Option<Vec<String>>,
}

/// Word length thresholds for typo tolerance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinWordSizeForTypos {
    /// Minimum word length to tolerate one typo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_typo: Option<u8>,
    /// Minimum word length to tolerate two typos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_typos: Option<u8>,
}

/// Pagination limits, `GET /indexes/{uid}/settings/pagination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Maximum number of hits reachable through `offset` plus `limit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_hits: Option<u32>,
}

/// Faceting limits, `GET /indexes/{uid}/settings/faceting`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faceting {
    /// Maximum number of values returned per facet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values_per_facet: Option<u32>,
}
