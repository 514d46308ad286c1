mod client;
mod query;
mod response;

pub use client::EsClient;
pub use query::{ReportFilter, ResultFilter, UsageFilter};

use query::{runs_aggregation, SearchRequest, RUN_AGGREGATION};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Environment, Report, RunBucket, TestResult, UsageReport};

pub async fn results(
    client: &EsClient,
    cfg: &Config,
    filter: &ResultFilter,
    max: usize,
) -> Result<Vec<TestResult>> {
    client.verify_index(&cfg.results_index).await?;
    let body = SearchRequest::new(filter, max).body();
    let mut records = client.search(&cfg.results_index, &body).await?.into_sources();
    records.truncate(max);
    Ok(records)
}

pub async fn reports(
    client: &EsClient,
    cfg: &Config,
    filter: &ReportFilter,
    max: usize,
) -> Result<Vec<Report>> {
    client.verify_index(&cfg.reports_index).await?;
    let body = SearchRequest::new(filter, max).body();
    let mut records = client.search(&cfg.reports_index, &body).await?.into_sources();
    records.truncate(max);
    Ok(records)
}

/// Usage documents, most recent run first.
pub async fn usage(
    client: &EsClient,
    cfg: &Config,
    filter: &UsageFilter,
    max: usize,
) -> Result<Vec<UsageReport>> {
    client.verify_index(&cfg.usage_index).await?;
    let body = SearchRequest::new(filter, max).sort_desc("run").body();
    let mut records = client.search(&cfg.usage_index, &body).await?.into_sources();
    records.truncate(max);
    Ok(records)
}

/// Distinct runs per environment, newest first. Environments are listed in
/// the order given and the combined list is capped at `max`.
pub async fn runs(
    client: &EsClient,
    cfg: &Config,
    environments: &[Environment],
    max: usize,
) -> Result<Vec<RunBucket>> {
    client.verify_index(&cfg.results_index).await?;

    let mut out = Vec::new();
    for &environment in environments {
        if out.len() >= max {
            break;
        }
        let body = runs_aggregation(environment, max);
        let resp = client
            .search::<serde_json::Value>(&cfg.results_index, &body)
            .await?;
        out.extend(
            resp.numeric_terms(RUN_AGGREGATION)?
                .into_iter()
                .take(max)
                .map(|run| RunBucket { environment, run }),
        );
    }
    out.truncate(max);
    Ok(out)
}
