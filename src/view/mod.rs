pub(crate) mod fmt;
mod reports;
mod results;
mod runs;
mod table;
mod usage;

pub use reports::reports;
pub use results::results;
pub use runs::runs;
pub use usage::usage;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::cli::OutputFormat;
use table::Table;

/// Write records to stdout, either as a table or as a JSON array.
fn emit<T: Serialize>(
    records: &[T],
    output: OutputFormat,
    table: impl FnOnce(&[T]) -> Table,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, records, output, table)?;
    out.flush()?;
    Ok(())
}

fn write_records<W: Write, T: Serialize>(
    out: &mut W,
    records: &[T],
    output: OutputFormat,
    table: impl FnOnce(&[T]) -> Table,
) -> Result<()> {
    match output {
        OutputFormat::Table => {
            let table = table(records);
            tracing::debug!(rows = table.len(), "rendering table");
            table.render(out)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
