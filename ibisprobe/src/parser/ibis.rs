//! IBIS (.ibs) component/pin parasitics reader
//!
//! Walks an IBIS file once, line by line, and pulls out two things:
//! - the component capacitance from the last `C_comp` line
//! - the `[Pin]` table, keyed by pin identifier
//!
//! Only the pieces needed for package parasitics are understood. Models,
//! waveform tables and every other keyword are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::schema::{ParsedIbis, PinRecord};

/// Error type for IBIS parsing
#[derive(Debug, thiserror::Error)]
pub enum IbisParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed [Pin] row at line {line_number}: expected at least 6 fields, found {fields}: '{line}'")]
    MalformedDataRow {
        line_number: usize,
        line: String,
        fields: usize,
    },
}

/// Where the reader currently is in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionState {
    /// Outside any pin table; data rows are ignored.
    #[default]
    Scanning,
    /// Between a `[Pin]` header and the next bracketed header.
    InsidePinSection,
}

impl SectionState {
    /// State after consuming a line of the given kind.
    pub fn next(self, kind: LineKind) -> Self {
        match kind {
            LineKind::PinHeader => SectionState::InsidePinSection,
            LineKind::SectionHeader => SectionState::Scanning,
            _ => self,
        }
    }
}

/// Classification of a single trimmed line. Exactly one kind applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ComponentCapacitance,
    PinHeader,
    SectionHeader,
    Blank,
    Comment,
    Data,
}

impl LineKind {
    /// Classify an already-trimmed line. Prefix checks run in priority order.
    pub fn classify(line: &str) -> Self {
        if line.starts_with("C_comp") {
            LineKind::ComponentCapacitance
        } else if line.starts_with("[Pin]") {
            LineKind::PinHeader
        } else if line.starts_with('[') {
            LineKind::SectionHeader
        } else if line.is_empty() {
            LineKind::Blank
        } else if line.starts_with('|') {
            LineKind::Comment
        } else {
            LineKind::Data
        }
    }
}

/// A `[Pin]` data row with its columns named.
///
/// Column layout: `pin signal_name model_name R_pin L_pin C_pin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRow<'a> {
    pub identifier: &'a str,
    pub signal_name: &'a str,
    pub model_name: &'a str,
    pub resistance: &'a str,
    pub inductance: &'a str,
    pub capacitance: &'a str,
}

impl<'a> PinRow<'a> {
    /// Split a trimmed row on whitespace and name its columns.
    ///
    /// Extra trailing columns are ignored; fewer than six is an error.
    pub fn parse(line: &'a str, line_number: usize) -> Result<Self, IbisParseError> {
        let fields: Vec<&'a str> = line.split_whitespace().collect();
        let &[identifier, signal_name, model_name, resistance, inductance, capacitance, ..] =
            fields.as_slice()
        else {
            return Err(IbisParseError::MalformedDataRow {
                line_number,
                line: line.to_string(),
                fields: fields.len(),
            });
        };

        Ok(PinRow {
            identifier,
            signal_name,
            model_name,
            resistance,
            inductance,
            capacitance,
        })
    }

    fn into_record(self, line_number: usize) -> PinRecord {
        PinRecord {
            signal_name: self.signal_name.to_string(),
            model_name: self.model_name.to_string(),
            resistance: self.resistance.to_string(),
            inductance: self.inductance.to_string(),
            capacitance: self.capacitance.to_string(),
            line_number,
        }
    }
}

/// Parser for the component/pin subset of IBIS files
pub struct IbisParser;

impl IbisParser {
    /// Read and parse an IBIS file from disk.
    pub fn parse_file(path: &Path) -> Result<ParsedIbis, IbisParseError> {
        let reader = BufReader::new(File::open(path)?);
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        Self::parse_lines(&lines)
    }

    /// Parse IBIS content already held in memory.
    pub fn parse_str(content: &str) -> Result<ParsedIbis, IbisParseError> {
        Self::parse_lines(content.lines())
    }

    /// Single pass over the lines of an IBIS file.
    ///
    /// A malformed pin row aborts the whole parse; no partial result is returned.
    pub fn parse_lines<I>(lines: I) -> Result<ParsedIbis, IbisParseError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut parsed = ParsedIbis::default();
        let mut state = SectionState::default();

        for (idx, raw) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            let line = raw.as_ref().trim();
            let kind = LineKind::classify(line);

            match kind {
                LineKind::ComponentCapacitance => {
                    if let Some(token) = line.split_whitespace().last() {
                        parsed.capacitance = Some(token.to_string());
                    }
                }
                LineKind::Data if state == SectionState::InsidePinSection => {
                    let row = PinRow::parse(line, line_number)?;
                    let identifier = row.identifier.to_string();
                    let record = row.into_record(line_number);
                    if let Some(previous) = parsed.pins.insert(identifier, record) {
                        tracing::warn!(
                            "Pin {} repeated at line {} (first seen at line {}); keeping the later row",
                            row.identifier,
                            line_number,
                            previous.line_number
                        );
                    }
                }
                _ => {}
            }

            let next = state.next(kind);
            if next != state {
                tracing::debug!("Line {}: {:?} -> {:?}", line_number, state, next);
            }
            state = next;
        }

        tracing::debug!(
            "Parsed {} pins, component capacitance {}",
            parsed.pins.len(),
            if parsed.capacitance.is_some() { "present" } else { "absent" }
        );

        Ok(parsed)
    }
}
