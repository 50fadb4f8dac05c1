//! Readers for triple files and label files.
//!
//! # Triple files
//!
//! One `head tail relation` row per line, three non-negative integers
//! separated per [`Delimiter`]. Blank lines and `#` comments are skipped.
//! If the first data line holds a single integer it is taken as a row-count
//! header (the `train2id.txt` convention) and checked against the rows that
//! follow; a mismatch is logged, not fatal.
//!
//! # Label files
//!
//! One `text<delim>id` row per line (or `id<delim>text`, per
//! [`LookupOrder`]). With whitespace delimiting the split happens at the
//! last (respectively first) whitespace run, so labels may contain spaces.
//! The same optional count header is accepted.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::config::{Delimiter, InputLayout, LookupOrder};
use crate::error::{Error, Result};
use crate::labels::LabelTable;
use crate::model::{Triple, TripleSet};

/// Parse a triple file from any reader. `source_name` is used in errors.
///
/// # Errors
///
/// Returns [`Error::InputFormat`] for a row with the wrong column count, a
/// field that is not a non-negative integer, or a file with no rows, and
/// [`Error::Io`] if reading fails.
pub fn parse_triples<R: BufRead>(
    reader: R,
    source_name: &str,
    layout: &InputLayout,
) -> Result<TripleSet> {
    let mut header: Option<(usize, u64)> = None;
    let mut rows = Vec::new();
    let mut last_line = 0;

    for (line_no, line) in data_lines(reader, source_name)? {
        last_line = line_no;
        let fields = split_fields(&line, layout.delimiter);

        if rows.is_empty() && header.is_none() && fields.len() == 1 {
            header = Some((line_no, parse_id(fields[0], source_name, line_no)?));
            continue;
        }

        let [head, tail, relation] = fields.as_slice() else {
            return Err(Error::input_format(
                source_name,
                line_no,
                format!("expected 3 columns (head tail relation), found {}", fields.len()),
            ));
        };

        rows.push(Triple::new(
            parse_id(head, source_name, line_no)?,
            parse_id(tail, source_name, line_no)?,
            parse_id(relation, source_name, line_no)?,
        ));
    }

    if rows.is_empty() {
        return Err(Error::input_format(source_name, last_line, "no triples found"));
    }

    check_header(header, rows.len(), source_name);

    let set: TripleSet = rows.into_iter().collect();
    if set.duplicates_collapsed() > 0 {
        warn!(
            source = source_name,
            duplicates = set.duplicates_collapsed(),
            "collapsed duplicate triple rows"
        );
    }
    debug!(source = source_name, triples = set.len(), "parsed triples");
    Ok(set)
}

/// Parse a label file from any reader. `source_name` is used in errors.
///
/// # Errors
///
/// Returns [`Error::InputFormat`] for a row without both an id and a
/// non-empty text, a non-integer id, or an id that appears twice, and
/// [`Error::Io`] if reading fails.
pub fn parse_labels<R: BufRead>(
    reader: R,
    source_name: &str,
    layout: &InputLayout,
) -> Result<LabelTable> {
    let mut header: Option<(usize, u64)> = None;
    let mut table = LabelTable::new();

    for (line_no, line) in data_lines(reader, source_name)? {
        let Some((id, text)) = split_label(&line, layout) else {
            if table.is_empty() && header.is_none() {
                header = Some((line_no, parse_id(line.trim(), source_name, line_no)?));
                continue;
            }
            return Err(Error::input_format(
                source_name,
                line_no,
                "expected a label and an id separated by the delimiter",
            ));
        };

        let id = parse_id(id, source_name, line_no)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::input_format(
                source_name,
                line_no,
                format!("empty label for id {id}"),
            ));
        }
        if table.insert(id, text).is_some() {
            return Err(Error::input_format(
                source_name,
                line_no,
                format!("duplicate id {id}"),
            ));
        }
    }

    check_header(header, table.len(), source_name);
    debug!(source = source_name, labels = table.len(), "parsed labels");
    Ok(table)
}

/// Read and parse a triple file from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, otherwise whatever
/// [`parse_triples`] returns.
#[instrument(skip(layout), fields(path = %path.display()))]
pub fn read_triples(path: &Path, layout: &InputLayout) -> Result<TripleSet> {
    parse_triples(open(path)?, &path.display().to_string(), layout)
}

/// Read and parse a label file from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, otherwise whatever
/// [`parse_labels`] returns.
#[instrument(skip(layout), fields(path = %path.display()))]
pub fn read_labels(path: &Path, layout: &InputLayout) -> Result<LabelTable> {
    parse_labels(open(path)?, &path.display().to_string(), layout)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Non-blank, non-comment lines with their 1-based line numbers.
fn data_lines<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<(usize, String)>> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| {
            if source.kind() == io::ErrorKind::InvalidData {
                Error::input_format(source_name, idx + 1, "invalid UTF-8")
            } else {
                Error::Io {
                    path: source_name.into(),
                    source,
                }
            }
        })?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
            continue;
        }
        out.push((idx + 1, trimmed.to_string()));
    }
    Ok(out)
}

fn split_fields(line: &str, delimiter: Delimiter) -> Vec<&str> {
    match delimiter {
        Delimiter::Whitespace => line.split_whitespace().collect(),
        Delimiter::Tab => line.split('\t').map(str::trim).collect(),
    }
}

/// Split a label row into `(id, text)` per the configured layout.
fn split_label<'a>(line: &'a str, layout: &InputLayout) -> Option<(&'a str, &'a str)> {
    let line = line.trim();
    let (left, right) = match (layout.delimiter, layout.lookup_order) {
        (Delimiter::Tab, LookupOrder::TextId) => line.rsplit_once('\t')?,
        (Delimiter::Tab, LookupOrder::IdText) => line.split_once('\t')?,
        (Delimiter::Whitespace, LookupOrder::TextId) => {
            let at = line.rfind(char::is_whitespace)?;
            (&line[..at], &line[at..])
        }
        (Delimiter::Whitespace, LookupOrder::IdText) => {
            let at = line.find(char::is_whitespace)?;
            (&line[..at], &line[at..])
        }
    };
    match layout.lookup_order {
        LookupOrder::TextId => Some((right.trim(), left)),
        LookupOrder::IdText => Some((left.trim(), right)),
    }
}

fn parse_id(field: &str, source_name: &str, line: usize) -> Result<u64> {
    field.parse::<u64>().map_err(|_| {
        Error::input_format(
            source_name,
            line,
            format!("'{field}' is not a non-negative integer"),
        )
    })
}

fn check_header(header: Option<(usize, u64)>, actual: usize, source_name: &str) {
    if let Some((line, declared)) = header {
        if usize::try_from(declared).ok() != Some(actual) {
            warn!(
                source = source_name,
                line,
                declared,
                actual,
                "count header disagrees with row count"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
