use std::io::{self, Write};

/// Bordered ASCII table with a separator line after every row.
///
/// ```text
/// +-------------+-----+
/// | ENVIRONMENT | RUN |
/// +-------------+-----+
/// | vcs         | 12  |
/// +-------------+-----+
/// ```
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped.
    pub fn push(&mut self, row: Vec<String>) {
        let mut row = row;
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.widths();
        let rule: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+";

        writeln!(out, "{rule}")?;
        write_row(out, &self.header, &widths)?;
        writeln!(out, "{rule}")?;
        for row in &self.rows {
            write_row(out, row, &widths)?;
            writeln!(out, "{rule}")?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w - cell.chars().count();
        write!(out, "| {cell}{} ", " ".repeat(pad))?;
    }
    writeln!(out, "|")
}
