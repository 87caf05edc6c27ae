//! Delimited-text tables backed by polars
//!
//! Every column is read as text. Rows and headers then go through decoding
//! strategies, [`Identity`] by default, so callers can turn a row into
//! whatever type suits them.

use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// A table as read from (or about to be written to) disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<R = Vec<String>, H = Vec<String>> {
    pub headers: Option<H>,
    pub rows: Vec<R>,
}

impl Table {
    /// Number of columns, taken from the headers or else the first row.
    pub fn width(&self) -> usize {
        self.headers
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.rows.first().map(Vec::len))
            .unwrap_or(0)
    }
}

/// Options for [`read_table`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
        }
    }
}

/// When fields get quoted on write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuotePolicy {
    /// Only fields containing the delimiter, quotes or line breaks.
    #[default]
    Minimal,
    All,
    NonNumeric,
    Never,
}

impl From<QuotePolicy> for QuoteStyle {
    fn from(policy: QuotePolicy) -> Self {
        match policy {
            QuotePolicy::Minimal => QuoteStyle::Necessary,
            QuotePolicy::All => QuoteStyle::Always,
            QuotePolicy::NonNumeric => QuoteStyle::NonNumeric,
            QuotePolicy::Never => QuoteStyle::Never,
        }
    }
}

/// Options for [`write_table`].
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub delimiter: u8,
    pub quote_style: QuotePolicy,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_style: QuotePolicy::Minimal,
        }
    }
}

/// Turns the fields of one record into a row value.
pub trait RowDecoder {
    type Row;
    fn decode_row(&self, fields: Vec<String>) -> Result<Self::Row>;
}

/// Turns the header record into a header value.
pub trait HeaderDecoder {
    type Headers;
    fn decode_headers(&self, names: Vec<String>) -> Result<Self::Headers>;
}

/// Turns a row value back into fields for writing.
pub trait RowEncoder {
    type Row;
    fn encode_row(&self, row: &Self::Row) -> Vec<String>;
}

/// Keeps records as ordered sequences of strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl RowDecoder for Identity {
    type Row = Vec<String>;

    fn decode_row(&self, fields: Vec<String>) -> Result<Self::Row> {
        Ok(fields)
    }
}

impl HeaderDecoder for Identity {
    type Headers = Vec<String>;

    fn decode_headers(&self, names: Vec<String>) -> Result<Self::Headers> {
        Ok(names)
    }
}

impl RowEncoder for Identity {
    type Row = Vec<String>;

    fn encode_row(&self, row: &Self::Row) -> Vec<String> {
        row.clone()
    }
}

/// Row decoder built from a closure.
pub struct MapRows<F>(pub F);

impl<F, T> RowDecoder for MapRows<F>
where
    F: Fn(Vec<String>) -> Result<T>,
{
    type Row = T;

    fn decode_row(&self, fields: Vec<String>) -> Result<T> {
        (self.0)(fields)
    }
}

/// Read a delimited file into a table of strings.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    read_table_with(path, options, &Identity, &Identity)
}

/// Read a delimited file, decoding rows and headers with the given strategies.
///
/// `headers` is `None` in the result unless `options.has_headers` is set. The
/// header record is taken verbatim from the first line, duplicates included.
/// A blank line inside the data reads as a row of empty strings, and a record
/// with more fields than the first line is an error.
pub fn read_table_with<RD, HD>(
    path: &Path,
    options: &ReadOptions,
    rows: &RD,
    headers: &HD,
) -> Result<Table<RD::Row, HD::Headers>>
where
    RD: RowDecoder,
    HD: HeaderDecoder,
{
    // Header names are never handed to polars, it would rename duplicates
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_separator(options.delimiter)
        .with_infer_schema_length(Some(0))
        .with_missing_is_null(false)
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let series = column.as_materialized_series();
            let values = series
                .str()
                .with_context(|| format!("Column '{}' is not text", column.name()))?;
            Ok(values
                .iter()
                .map(|value| value.unwrap_or_default().to_string())
                .collect::<Vec<String>>())
        })
        .collect::<Result<Vec<_>>>()?;

    let mut records = (0..df.height()).map(|i| {
        columns
            .iter()
            .map(|column| column[i].clone())
            .collect::<Vec<String>>()
    });

    let decoded_headers = if options.has_headers {
        let names = records.next().unwrap_or_default();
        Some(headers.decode_headers(names)?)
    } else {
        None
    };

    let mut decoded_rows = Vec::with_capacity(df.height());

    for (i, fields) in records.enumerate() {
        decoded_rows.push(
            rows.decode_row(fields)
                .with_context(|| format!("Failed to decode row {} of {}", i + 1, path.display()))?,
        );
    }

    Ok(Table {
        headers: decoded_headers,
        rows: decoded_rows,
    })
}

/// Write a table of strings, replacing any existing file.
pub fn write_table(path: &Path, table: &Table, options: &WriteOptions) -> Result<()> {
    write_rows_with(
        path,
        &table.rows,
        table.headers.as_deref(),
        options,
        &Identity,
    )
}

/// Write rows through an encoder. The header line is written only when
/// `headers` is given.
pub fn write_rows_with<E>(
    path: &Path,
    rows: &[E::Row],
    headers: Option<&[String]>,
    options: &WriteOptions,
    encoder: &E,
) -> Result<()>
where
    E: RowEncoder,
{
    let records: Vec<Vec<String>> = rows.iter().map(|row| encoder.encode_row(row)).collect();

    let width = headers
        .map(<[String]>::len)
        .or_else(|| records.first().map(Vec::len))
        .unwrap_or(0);

    for (i, record) in records.iter().enumerate() {
        if record.len() != width {
            bail!(
                "Row {} has {} field(s), expected {}",
                i + 1,
                record.len(),
                width
            );
        }
    }

    // The header line goes out as the first record under placeholder column
    // names, so duplicate names survive and get the same quoting as data.
    let lines: Vec<&[String]> = headers
        .into_iter()
        .chain(records.iter().map(Vec::as_slice))
        .collect();

    // Minimal and Never write empty fields bare instead of as ""
    let blank_as_null = matches!(
        options.quote_style,
        QuotePolicy::Minimal | QuotePolicy::Never
    );

    let columns: Vec<Column> = (0..width)
        .map(|j| {
            let values: Vec<Option<String>> = lines
                .iter()
                .map(|line| {
                    let field = &line[j];
                    (!(blank_as_null && field.is_empty())).then(|| field.clone())
                })
                .collect();
            Column::new(format!("column_{}", j + 1).into(), values)
        })
        .collect();

    let mut df = DataFrame::new(columns).context("Failed to assemble table for writing")?;

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(false)
        .with_separator(options.delimiter)
        .with_quote_style(options.quote_style.into())
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(())
}
