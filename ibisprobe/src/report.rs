//! Rendering of inspection reports for the terminal and for tooling.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::core::{InspectionReport, PinLookup};

/// How text output is styled. Resolved once by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    #[default]
    Plain,
    Ansi,
}

/// Options for rendering a report (CLI or library callers).
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub style: OutputStyle,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            style: OutputStyle::Plain,
        }
    }

    pub fn ansi() -> Self {
        Self {
            style: OutputStyle::Ansi,
        }
    }

    fn pin_name(&self, pin: &str) -> String {
        match self.style {
            OutputStyle::Plain => pin.to_string(),
            OutputStyle::Ansi => pin.cyan().bold().to_string(),
        }
    }

    fn value(&self, value: &str) -> String {
        match self.style {
            OutputStyle::Plain => value.to_string(),
            OutputStyle::Ansi => value.green().to_string(),
        }
    }

    fn missing(&self, text: &str) -> String {
        match self.style {
            OutputStyle::Plain => text.to_string(),
            OutputStyle::Ansi => text.red().to_string(),
        }
    }
}

/// Human-readable report: one block for the component, one per requested pin.
pub fn render_text(report: &InspectionReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Component Capacitance: {}\n",
        options.value(&report.component_capacitance)
    );

    for lookup in &report.pins {
        match lookup {
            PinLookup::Found {
                pin,
                inductance,
                capacitance,
                ..
            } => {
                let _ = writeln!(out, "Pin: {}", options.pin_name(pin));
                let _ = writeln!(out, "    Inductance: {}", options.value(inductance));
                let _ = writeln!(out, "    Capacitance: {}\n", options.value(capacitance));
            }
            PinLookup::NotFound { pin } => {
                let _ = writeln!(
                    out,
                    "Pin: {} {}\n",
                    options.pin_name(pin),
                    options.missing("not found in IBIS file.")
                );
            }
        }
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    component_capacitance: &'a str,
    pins: Vec<JsonPin<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonPin<'a> {
    pin: &'a str,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    inductance: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacitance: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resistance: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    requested: usize,
    found: usize,
    not_found: usize,
}

impl<'a> From<&'a PinLookup> for JsonPin<'a> {
    fn from(lookup: &'a PinLookup) -> Self {
        match lookup {
            PinLookup::Found {
                pin,
                inductance,
                capacitance,
                record,
            } => JsonPin {
                pin: pin.as_str(),
                found: true,
                inductance: Some(inductance.as_str()),
                capacitance: Some(capacitance.as_str()),
                signal_name: Some(record.signal_name.as_str()),
                model_name: Some(record.model_name.as_str()),
                resistance: Some(record.resistance.as_str()),
            },
            PinLookup::NotFound { pin } => JsonPin {
                pin: pin.as_str(),
                found: false,
                inductance: None,
                capacitance: None,
                signal_name: None,
                model_name: None,
                resistance: None,
            },
        }
    }
}

/// Machine-readable report.
pub fn render_json(report: &InspectionReport) -> serde_json::Value {
    let json = JsonReport {
        file: report.file.display().to_string(),
        component_capacitance: &report.component_capacitance,
        pins: report.pins.iter().map(JsonPin::from).collect(),
        summary: JsonSummary {
            requested: report.pins.len(),
            found: report.found_count(),
            not_found: report.not_found_count(),
        },
    };
    // Plain structs of strings, bools and integers always serialize.
    serde_json::to_value(json).unwrap_or_default()
}
