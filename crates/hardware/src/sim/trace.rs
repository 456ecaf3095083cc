//! Trace reader.
//!
//! A trace is a text stream with one memory access per line:
//!
//! ```text
//! r 0x7fff5a8487c8
//! w 7fff5a8487d0
//! ```
//!
//! The operation is `r` or `w` (either case); the address is hexadecimal with an
//! optional `0x` prefix. Blank lines and lines starting with `#` are skipped, and
//! fields after the address are ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::common::data::Operation;
use crate::common::error::{TraceError, UnknownOperation};

/// One replayable memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceEvent {
    /// Read or write.
    pub op: Operation,
    /// Byte address.
    pub address: u64,
}

impl TraceEvent {
    /// Creates a trace event.
    pub const fn new(op: Operation, address: u64) -> Self {
        Self { op, address }
    }
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - Raw line text.
/// * `line_no` - 1-based line number, used in error reports.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a [`TraceError`] naming the line if it is not `<r|w> <hex address>`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<TraceEvent>, TraceError> {
    let text = line.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut fields = text.split_whitespace();
    let (Some(op_field), Some(addr_field)) = (fields.next(), fields.next()) else {
        return Err(TraceError::MalformedLine {
            line: line_no,
            text: text.to_owned(),
        });
    };

    let op = op_field
        .parse::<Operation>()
        .map_err(|UnknownOperation(op)| TraceError::UnknownOperation { line: line_no, op })?;

    let digits = addr_field
        .strip_prefix("0x")
        .or_else(|| addr_field.strip_prefix("0X"))
        .unwrap_or(addr_field);
    let address = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
        line: line_no,
        text: addr_field.to_owned(),
    })?;

    Ok(Some(TraceEvent { op, address }))
}

/// Streaming iterator over the events of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line_no += 1;
            match parse_line(&line, self.line_no) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Reads every event of a trace into memory.
///
/// # Errors
///
/// Returns the first I/O or parse error.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceEvent>, TraceError> {
    TraceReader::new(reader).collect()
}

/// Reads every event of the trace file at `path`.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened, or the first parse error.
pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>, TraceError> {
    let file = File::open(path)?;
    read_trace(BufReader::new(file))
}
