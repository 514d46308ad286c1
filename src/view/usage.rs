use anyhow::{Context, Result};

use super::{emit, table::Table};
use crate::cli::UsageArgs;
use crate::config::Config;
use crate::models::{UsageKind, UsageReport};
use crate::search::{self, EsClient};

pub async fn usage(client: &EsClient, cfg: &Config, args: &UsageArgs) -> Result<()> {
    let records = search::usage(client, cfg, &args.filter(), args.display.limit())
        .await
        .context("failed to query usage reports")?;
    emit(&records, args.display.output, |r| usage_table(r, args.kind))
}

/// One row per resource kind per record; `kind` narrows to a single row.
pub(super) fn usage_table(records: &[UsageReport], kind: Option<UsageKind>) -> Table {
    let mut table = Table::new(&["ENVIRONMENT", "RUN", "POD NAME", "TYPE", "MAX USED", "LIMIT"]);
    for r in records {
        if kind.is_none_or(|k| k == UsageKind::Memory) {
            table.push(vec![
                r.environment.to_string(),
                r.run.to_string(),
                r.name.clone(),
                "Memory".to_string(),
                format!("{}Ki", r.memory),
                format!("{}Ki", r.memory_limit),
            ]);
        }
        if kind.is_none_or(|k| k == UsageKind::Cpu) {
            table.push(vec![
                r.environment.to_string(),
                r.run.to_string(),
                r.name.clone(),
                "CPU".to_string(),
                format!("{}m", r.cpu),
                format!("{}m", r.cpu_limit),
            ]);
        }
    }
    table
}
