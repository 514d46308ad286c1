use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::response::SearchResponse;
use crate::config::Config;
use crate::error::{Result, SearchError};

/// Handle on a single search node. There is no node discovery: every request
/// goes to the configured URL.
pub struct EsClient {
    http: reqwest::Client,
    base: Url,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub version: ClusterVersion,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClusterVersion {
    #[serde(default)]
    pub number: String,
}

impl EsClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .user_agent(concat!("e2e_result/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SearchError::Connection {
                url: cfg.es_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base: cfg.es_url.clone(),
        })
    }

    /// Build a client and health-check the node before handing it out.
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let client = Self::new(cfg)?;
        let info = client.ping(cfg.health_check_timeout).await?;
        tracing::debug!(
            cluster = %info.cluster_name,
            version = %info.version.number,
            "connected"
        );
        Ok(client)
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn ping(&self, timeout: Duration) -> Result<ClusterInfo> {
        let url = self.endpoint(&[]);
        let resp = self
            .http
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| SearchError::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Unhealthy {
                url: url.to_string(),
                status,
            });
        }
        let bytes = resp.bytes().await.map_err(|source| SearchError::Connection {
            url: url.to_string(),
            source,
        })?;
        // Proxies in front of a cluster sometimes answer `/` with an empty body.
        if bytes.is_empty() {
            return Ok(ClusterInfo::default());
        }
        serde_json::from_slice(&bytes).map_err(|source| SearchError::Decode {
            what: url.to_string(),
            source,
        })
    }

    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        let url = self.endpoint(&[index]);
        let resp = self
            .http
            .head(url.clone())
            .send()
            .await
            .map_err(|source| SearchError::Connection {
                url: url.to_string(),
                source,
            })?;

        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SearchError::Query {
                index: index.to_string(),
                status,
                body: String::new(),
            }),
        }
    }

    /// Fail fast when the index has not been provisioned.
    pub async fn verify_index(&self, index: &str) -> Result<()> {
        if self.index_exists(index).await? {
            Ok(())
        } else {
            Err(SearchError::IndexMissing(index.to_string()))
        }
    }

    pub async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        body: &Value,
    ) -> Result<SearchResponse<T>> {
        let url = self.endpoint(&[index, "_search"]);
        tracing::debug!(%url, %body, "search");

        let resp = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| SearchError::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|source| SearchError::Connection {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(SearchError::Query {
                index: index.to_string(),
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let parsed = SearchResponse::<T>::decode(index, &bytes)?;
        tracing::info!(
            index,
            took_ms = parsed.took,
            total = ?parsed.total(),
            returned = parsed.hits.hits.len(),
            "query finished"
        );
        Ok(parsed)
    }
}
