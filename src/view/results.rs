use anyhow::{Context, Result};

use super::{emit, table::Table};
use crate::cli::ResultsArgs;
use crate::config::Config;
use crate::models::{fmt_minutes, TestResult};
use crate::search::{self, EsClient};

pub async fn results(client: &EsClient, cfg: &Config, args: &ResultsArgs) -> Result<()> {
    let records = search::results(client, cfg, &args.filter(), args.display.limit())
        .await
        .context("failed to query test results")?;
    emit(&records, args.display.output, results_table)
}

pub(super) fn results_table(records: &[TestResult]) -> Table {
    let mut table = Table::new(&["ENVIRONMENT", "RUN", "TEST", "RESULT", "DURATION"]);
    for r in records {
        table.push(vec![
            r.environment.to_string(),
            r.run.to_string(),
            r.display_name(),
            r.result.to_string(),
            fmt_minutes(r.duration_in_minutes),
        ]);
    }
    table
}
