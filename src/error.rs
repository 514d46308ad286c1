use thiserror::Error;

/// Failures talking to the search endpoint. None of these are retried.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot reach {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} is unhealthy: {status}")]
    Unhealthy {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{0} index does not exist")]
    IndexMissing(String),

    #[error("search on {index} returned {status}: {body}")]
    Query {
        index: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid response from {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to get {0} term aggregation results")]
    MissingAggregation(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
