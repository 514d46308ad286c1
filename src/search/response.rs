use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, SearchError};

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub took: u64,
    pub hits: Hits<T>,
    #[serde(default)]
    pub aggregations: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Hits<T> {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

/// ES 7+ reports `{ "value": n, "relation": "eq" }`; older clusters a bare number.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    pub fn value(self) -> u64 {
        match self {
            TotalHits::Object { value } | TotalHits::Count(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TermsAggregation {
    buckets: Vec<TermsBucket>,
}

#[derive(Debug, Deserialize)]
struct TermsBucket {
    key: Value,
    #[serde(default)]
    key_as_string: Option<String>,
}

impl<T: DeserializeOwned> SearchResponse<T> {
    pub fn decode(what: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| SearchError::Decode {
            what: what.to_string(),
            source,
        })
    }

    pub fn total(&self) -> Option<u64> {
        self.hits.total.map(TotalHits::value)
    }

    pub fn into_sources(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|h| h.source).collect()
    }

    /// Numeric keys of the named terms aggregation, in response order. Buckets
    /// whose key is not a run number are skipped with a warning.
    pub fn numeric_terms(&self, name: &str) -> Result<Vec<u64>> {
        let raw = self
            .aggregations
            .get(name)
            .ok_or_else(|| SearchError::MissingAggregation(name.to_string()))?;
        let agg: TermsAggregation =
            serde_json::from_value(raw.clone()).map_err(|source| SearchError::Decode {
                what: format!("{name} aggregation"),
                source,
            })?;
        let mut keys = Vec::with_capacity(agg.buckets.len());
        for bucket in &agg.buckets {
            match bucket_key(bucket) {
                Some(key) => keys.push(key),
                None => tracing::warn!(
                    aggregation = name,
                    key = %bucket.key,
                    "skipping bucket with non-numeric key"
                ),
            }
        }
        Ok(keys)
    }
}

fn bucket_key(bucket: &TermsBucket) -> Option<u64> {
    let key = match &bucket.key {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    key.or_else(|| bucket.key_as_string.as_deref()?.parse().ok())
}
