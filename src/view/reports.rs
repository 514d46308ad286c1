use anyhow::{Context, Result};

use super::{emit, table::Table};
use crate::cli::ReportsArgs;
use crate::config::Config;
use crate::models::{fmt_minutes, Report};
use crate::search::{self, EsClient};

pub async fn reports(client: &EsClient, cfg: &Config, args: &ReportsArgs) -> Result<()> {
    let records = search::reports(client, cfg, &args.filter(), args.display.limit())
        .await
        .context("failed to query reports")?;
    emit(&records, args.display.output, reports_table)
}

pub(super) fn reports_table(records: &[Report]) -> Table {
    let mut table = Table::new(&[
        "ENVIRONMENT",
        "RUN",
        "REPORT TYPE",
        "REPORT SUBTYPE",
        "NAME",
        "DURATION",
    ]);
    for r in records {
        table.push(vec![
            r.environment.to_string(),
            r.run.to_string(),
            r.kind.clone(),
            r.sub_type.clone().unwrap_or_default(),
            r.name.clone(),
            fmt_minutes(r.duration_in_minutes),
        ]);
    }
    table
}
