use std::collections::HashMap;

/// Everything extracted from one IBIS file in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedIbis {
    /// Last `C_comp` token seen, verbatim (may carry a scale suffix like `2.7pF`).
    pub capacitance: Option<String>,
    /// Pin table keyed by pin identifier (case-sensitive).
    pub pins: HashMap<String, PinRecord>,
}

impl ParsedIbis {
    pub fn pin(&self, identifier: &str) -> Option<&PinRecord> {
        self.pins.get(identifier)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }
}

/// One row of the `[Pin]` table. Values are kept as raw tokens until formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub signal_name: String,
    pub model_name: String,
    pub resistance: String,
    pub inductance: String,
    pub capacitance: String,
    /// 1-based line number of the row in the source file.
    pub line_number: usize,
}
