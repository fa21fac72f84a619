//! Search rules embedded in tenant tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TokenError;

/// The search permissions a tenant token grants.
///
/// Rules come in two shapes. A plain list of index uids grants unrestricted
/// search on those indexes. A rule map keys index uids (or `*` for all
/// indexes) to per-index restrictions such as a mandatory `filter`. The
/// service enforces whatever the map carries; this type only guarantees the
/// shape is one of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchRules {
    /// Index uids the token may search without restrictions.
    IndexList(Vec<String>),
    /// Per-index restrictions, keyed by index uid or `*`.
    RuleMap(Map<String, Value>),
}

impl SearchRules {
    /// Rules granting unrestricted search on every index.
    pub fn any() -> Self {
        SearchRules::IndexList(vec!["*".to_string()])
    }
}

impl From<Vec<String>> for SearchRules {
    fn from(indexes: Vec<String>) -> Self {
        SearchRules::IndexList(indexes)
    }
}

impl TryFrom<Value> for SearchRules {
    type Error = TokenError;

    /// Accept a JSON value as search rules.
    ///
    /// Arrays must contain only strings and become an index list; objects
    /// become a rule map. Every other JSON shape is rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(entries) => {
                let mut indexes = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        Value::String(uid) => indexes.push(uid),
                        _ => return Err(TokenError::InvalidSearchRules),
                    }
                }
                Ok(SearchRules::IndexList(indexes))
            }
            Value::Object(map) => Ok(SearchRules::RuleMap(map)),
            _ => Err(TokenError::InvalidSearchRules),
        }
    }
}
