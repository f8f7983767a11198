use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{CatalogError, ErrorCode, Result, StructuredError};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable report with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON envelope
    Json,
    /// Report text without colors
    Plain,
}

impl OutputFormat {
    /// Resolve the format from CLI flags, falling back to the configured one.
    ///
    /// `--machine` wins over everything, then an explicit `--output-format`.
    #[must_use]
    pub fn from_args(machine: bool, format: Option<OutputFormat>, configured: OutputFormat) -> Self {
        if machine {
            OutputFormat::Json
        } else {
            format.unwrap_or(configured)
        }
    }

    /// Check if this format should use colors
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, OutputFormat::Human)
    }

    /// Check if this format is machine-readable
    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl FromStr for OutputFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        <OutputFormat as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            CatalogError::Config(format!(
                "unknown output format '{s}' (expected human, json or plain)"
            ))
        })
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> RobotResponse<T> {
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    /// Rich error with structured information
    #[serde(rename = "error")]
    StructuredError {
        /// Error code enum value (e.g., "DUPLICATE_SKILL_ID")
        code: ErrorCode,
        /// Numeric error code (e.g., 101)
        numeric_code: u16,
        /// Human-readable error message
        message: String,
        /// Actionable suggestion for recovery
        suggestion: String,
        /// Additional context for debugging
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<serde_json::Value>,
        /// Whether this error is recoverable by the user
        recoverable: bool,
        /// Error category (e.g., "schema", "config")
        category: String,
    },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

/// Create a robot error response from a CatalogError with structured information.
pub fn robot_error_structured(err: &CatalogError) -> RobotResponse<serde_json::Value> {
    RobotResponse {
        status: RobotStatus::from(err.to_structured()),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data: serde_json::Value::Null,
        warnings: Vec::new(),
    }
}

impl From<StructuredError> for RobotStatus {
    fn from(err: StructuredError) -> Self {
        RobotStatus::StructuredError {
            code: err.code,
            numeric_code: err.numeric_code,
            message: err.message,
            suggestion: err.suggestion,
            context: err.context,
            recoverable: err.recoverable,
            category: err.category,
        }
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| CatalogError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 18,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let key_style = style(format!("{key:width$}", width = self.key_width))
            .dim()
            .to_string();
        self.lines.push(format!("{key_style} {value}"));
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

/// Emit a JSON-serializable value with format-aware output.
///
/// Json wraps the value in a [`RobotResponse`] envelope.
pub fn emit_formatted<T: Serialize>(
    value: &T,
    format: OutputFormat,
    human_fn: impl FnOnce(&T) -> String,
    plain_fn: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", human_fn(value)),
        OutputFormat::Json => emit_json(&robot_ok(value))?,
        OutputFormat::Plain => println!("{}", plain_fn(value)),
    }
    Ok(())
}

/// Colour a rendered plain-text report line by line.
///
/// Headings, marks and severities are styled; everything else is left alone.
#[must_use]
pub fn highlight(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if line.starts_with("===") || line.starts_with("AUDIT:") || line.starts_with("LINT:")
                || line.starts_with("RECONCILE:") || line.starts_with("REVIEW:")
            {
                style(line).bold().to_string()
            } else if trimmed.starts_with("CRITICAL") || line.contains("NOT FOUND") {
                style(line).red().to_string()
            } else if trimmed.starts_with("WARNING") {
                style(line).yellow().to_string()
            } else if trimmed.starts_with("No ") {
                style(line).green().to_string()
            } else if trimmed.starts_with('<') {
                style(line).red().to_string()
            } else if trimmed.starts_with('>') {
                style(line).green().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
