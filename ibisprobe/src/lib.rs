//! ibisprobe - IBIS package parasitics reader
//!
//! This library reads the component capacitance (`C_comp`) and the `[Pin]`
//! table of an IBIS model file and renders the values in engineering
//! notation.
//!
//! # Quick Start
//!
//! ```no_run
//! use ibisprobe::{IbisProbeCore, PinLookup, PinQuery};
//! use std::path::Path;
//!
//! let query = PinQuery::parse("(A1,B7)");
//! let report = IbisProbeCore::inspect(Path::new("device.ibs"), &query).unwrap();
//!
//! println!("C_comp: {}", report.component_capacitance);
//! for pin in &report.pins {
//!     match pin {
//!         PinLookup::Found { pin, inductance, capacitance, .. } => {
//!             println!("{pin}: L={inductance} C={capacitance}")
//!         }
//!         PinLookup::NotFound { pin } => println!("{pin}: not found"),
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **Single-pass parser**: explicit section state, last-write-wins pin table
//! - **Engineering notation**: tera down to pico, IBIS scale suffixes understood
//! - **Reports**: plain or ANSI text, JSON

pub mod core;
pub mod parser;
pub mod report;
pub mod units;

// Re-export main types
pub use crate::core::{IbisProbeCore, IbisProbeError, InspectionReport, PinLookup, PinQuery};
pub use parser::ibis::{IbisParseError, IbisParser};
pub use parser::schema::{ParsedIbis, PinRecord};
pub use report::{render_json, render_text, OutputStyle, RenderOptions};
pub use units::{format_engineering, format_value, parse_value, EngineeringValue, SiPrefix, UnitsError};

/// Parse an IBIS file (convenience wrapper).
pub fn parse_ibis_file(path: &std::path::Path) -> Result<ParsedIbis, IbisProbeError> {
    IbisParser::parse_file(path).map_err(|e| match e {
        IbisParseError::Io(source) => IbisProbeError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        },
        other => IbisProbeError::Parse(other),
    })
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        IbisProbeCore, IbisProbeError, InspectionReport, OutputStyle, PinLookup, PinQuery,
        RenderOptions,
    };
}
