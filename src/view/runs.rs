use anyhow::{Context, Result};

use super::{emit, table::Table};
use crate::cli::RunsArgs;
use crate::config::Config;
use crate::models::RunBucket;
use crate::search::{self, EsClient};

pub async fn runs(client: &EsClient, cfg: &Config, args: &RunsArgs) -> Result<()> {
    let buckets = search::runs(client, cfg, &args.env.environments(), args.display.limit())
        .await
        .context("failed to list runs")?;
    emit(&buckets, args.display.output, runs_table)
}

pub(super) fn runs_table(buckets: &[RunBucket]) -> Table {
    let mut table = Table::new(&["ENVIRONMENT", "RUN"]);
    for b in buckets {
        table.push(vec![b.environment.to_string(), b.run.to_string()]);
    }
    table
}
