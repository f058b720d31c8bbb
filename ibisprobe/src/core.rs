//! Core inspection logic shared by the CLI and library users.
//! Reads one IBIS file and resolves a list of requested pins against it.

use std::path::{Path, PathBuf};

use crate::parser::ibis::{IbisParseError, IbisParser};
use crate::parser::schema::{ParsedIbis, PinRecord};
use crate::units::{format_engineering, UnitsError};

#[derive(Debug, thiserror::Error)]
pub enum IbisProbeError {
    #[error("Cannot read {}: {}", path.display(), source)]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] IbisParseError),
    #[error("No C_comp line found in {}", path.display())]
    MissingCapacitance { path: PathBuf },
    #[error("Non-numeric value for {field}: '{value}'")]
    NonNumericValue { field: String, value: String },
    #[error("{0}")]
    Prompt(String),
}

impl From<UnitsError> for IbisProbeError {
    fn from(e: UnitsError) -> Self {
        match e {
            UnitsError::NonNumericValue { field, value } => {
                IbisProbeError::NonNumericValue { field, value }
            }
        }
    }
}

/// Ordered list of pin identifiers requested by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinQuery {
    pub pins: Vec<String>,
}

impl PinQuery {
    /// Parse `"(M13, M19,A20)"` style text. Parentheses are optional,
    /// entries are trimmed and empty entries dropped.
    pub fn parse(text: &str) -> Self {
        let inner = text.trim().trim_start_matches('(').trim_end_matches(')');

        let pins = inner
            .split(',')
            .map(str::trim)
            .filter(|pin| !pin.is_empty())
            .map(str::to_string)
            .collect();

        Self { pins }
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }
}

impl<S: Into<String>> FromIterator<S> for PinQuery {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            pins: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of looking one requested pin up in the table.
#[derive(Debug, Clone, PartialEq)]
pub enum PinLookup {
    Found {
        pin: String,
        /// Formatted with unit, e.g. `"2.100 nH"`.
        inductance: String,
        /// Formatted with unit, e.g. `"1.500 pF"`.
        capacitance: String,
        record: PinRecord,
    },
    NotFound {
        pin: String,
    },
}

impl PinLookup {
    pub fn pin(&self) -> &str {
        match self {
            PinLookup::Found { pin, .. } | PinLookup::NotFound { pin } => pin,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PinLookup::Found { .. })
    }
}

/// Everything printed for one invocation.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub file: PathBuf,
    /// Formatted with unit, e.g. `"2.700 pF"`.
    pub component_capacitance: String,
    pub pins: Vec<PinLookup>,
}

impl InspectionReport {
    pub fn found_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_found()).count()
    }

    pub fn not_found_count(&self) -> usize {
        self.pins.len() - self.found_count()
    }
}

/// Core inspection API used by the CLI.
pub struct IbisProbeCore;

impl IbisProbeCore {
    /// Read, parse and resolve `query` against a file on disk.
    pub fn inspect(path: &Path, query: &PinQuery) -> Result<InspectionReport, IbisProbeError> {
        tracing::info!("Reading IBIS file: {}", path.display());
        let content =
            std::fs::read_to_string(path).map_err(|source| IbisProbeError::UnreadableFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::inspect_content(path, &content, query)
    }

    /// Same as [`IbisProbeCore::inspect`] for content already in memory.
    /// `path` is only used for reporting.
    pub fn inspect_content(
        path: &Path,
        content: &str,
        query: &PinQuery,
    ) -> Result<InspectionReport, IbisProbeError> {
        let parsed = IbisParser::parse_str(content)?;
        Self::resolve(path, &parsed, query)
    }

    /// Format the component capacitance and look up every requested pin.
    pub fn resolve(
        path: &Path,
        parsed: &ParsedIbis,
        query: &PinQuery,
    ) -> Result<InspectionReport, IbisProbeError> {
        let Some(raw_capacitance) = parsed.capacitance.as_deref() else {
            return Err(IbisProbeError::MissingCapacitance {
                path: path.to_path_buf(),
            });
        };
        let component_capacitance = format!("{}F", format_engineering("C_comp", raw_capacitance)?);

        let mut pins = Vec::with_capacity(query.len());
        for pin in &query.pins {
            pins.push(lookup_pin(parsed, pin)?);
        }

        let report = InspectionReport {
            file: path.to_path_buf(),
            component_capacitance,
            pins,
        };
        tracing::info!(
            "Resolved {} of {} requested pins",
            report.found_count(),
            report.pins.len()
        );
        Ok(report)
    }
}

fn lookup_pin(parsed: &ParsedIbis, pin: &str) -> Result<PinLookup, IbisProbeError> {
    let Some(record) = parsed.pin(pin) else {
        tracing::debug!("Pin {} not in [Pin] table", pin);
        return Ok(PinLookup::NotFound {
            pin: pin.to_string(),
        });
    };

    let inductance = format_engineering(&format!("L_pin of pin {pin}"), &record.inductance)?;
    let capacitance = format_engineering(&format!("C_pin of pin {pin}"), &record.capacitance)?;

    Ok(PinLookup::Found {
        pin: pin.to_string(),
        inductance: format!("{inductance}H"),
        capacitance: format!("{capacitance}F"),
        record: record.clone(),
    })
}
