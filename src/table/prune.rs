//! Column pruning against an allow-list

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::warn;

use super::io::Table;

/// What to do with allow-listed names the table does not have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownColumns {
    /// Refuse to prune, naming every unknown column.
    #[default]
    Fail,
    /// Warn and keep going with the names that do exist.
    Ignore,
}

/// Read an allow-list: one column name per line.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn read_allow_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read allow-list: {}", path.display()))?;
    Ok(parse_allow_list(&text))
}

/// Parse allow-list text, see [`read_allow_list`].
pub fn parse_allow_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Restrict `table` to the allow-listed columns.
///
/// Kept columns stay in the table's own order, not the allow-list's.
pub fn prune_columns(table: &Table, keep: &[String], unknown: UnknownColumns) -> Result<Table> {
    let Some(headers) = &table.headers else {
        bail!("Cannot prune columns of a table without headers");
    };

    let known: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let missing: Vec<&str> = keep
        .iter()
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect();

    if !missing.is_empty() {
        match unknown {
            UnknownColumns::Fail => bail!(
                "Allow-list names {} column(s) not found in table: {:?}",
                missing.len(),
                missing
            ),
            UnknownColumns::Ignore => {
                warn!("ignoring unknown column(s): {:?}", missing);
            }
        }
    }

    let wanted: HashSet<&str> = keep.iter().map(String::as_str).collect();
    let indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| wanted.contains(name.as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut rows = Vec::with_capacity(table.rows.len());

    for (n, row) in table.rows.iter().enumerate() {
        if row.len() != headers.len() {
            bail!(
                "Row {} has {} field(s), expected {}",
                n + 1,
                row.len(),
                headers.len()
            );
        }
        rows.push(indices.iter().map(|&i| row[i].clone()).collect());
    }

    Ok(Table {
        headers: Some(indices.iter().map(|&i| headers[i].clone()).collect()),
        rows,
    })
}
