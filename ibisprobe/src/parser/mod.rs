pub mod ibis;
pub mod schema;

// Re-export for convenience
pub use ibis::{IbisParseError, IbisParser, LineKind, PinRow, SectionState};
pub use schema::*;
