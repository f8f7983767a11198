//! Error handling for skillcat.
//!
//! This module provides:
//! - [`CatalogError`]: The main error enum for all catalogue operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//! - Suggestion helpers for context-aware error recovery hints
//!
//! Only schema violations stop a build. Parse gaps, unresolved references and
//! numeric disagreements are report entries, not errors.

mod codes;
mod suggestions;

use std::io;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::{suggest_for_error, suggest_similar_columns};

/// Main error type for catalogue operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate skill id: {0}")]
    DuplicateId(String),

    #[error("Duplicate skill ids: {}", .ids.join(", "))]
    DuplicateIds { ids: Vec<String> },

    #[error("Unknown column(s) for skill '{skill_id}': {}", .columns.join(", "))]
    UnknownColumns {
        skill_id: String,
        columns: Vec<String>,
    },

    #[error("Invalid value '{value}' in column '{column}' of skill '{skill_id}': {reason}")]
    InvalidValue {
        skill_id: String,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Registry already exported; refusing to register '{0}'")]
    RegistrySealed(String),

    /// Every violation found in one pass, in source order.
    #[error("{} schema violation(s): {}", .0.len(), join_messages(.0))]
    SchemaViolations(Vec<CatalogError>),

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("Malformed dataset: {0}")]
    Dataset(String),

    #[error("Header mismatch: {0}")]
    HeaderMismatch(String),

    #[error("Round-trip check failed: {0}")]
    RoundTripMismatch(String),

    #[error("Invalid authoring source: {0}")]
    Source(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("{0} finding(s) reported in strict mode")]
    Findings(usize),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateId(_) | Self::DuplicateIds { .. } => ErrorCode::DuplicateSkillId,
            Self::UnknownColumns { .. } => ErrorCode::UnknownColumn,
            Self::InvalidValue { .. } => ErrorCode::InvalidFieldValue,
            Self::RegistrySealed(_) => ErrorCode::RegistrySealed,
            Self::SchemaViolations(errors) => {
                match errors.iter().map(CatalogError::code).dedup().exactly_one() {
                    Ok(code) => code,
                    Err(_) => ErrorCode::SchemaViolations,
                }
            }
            Self::SkillNotFound(_) => ErrorCode::SkillNotFound,
            Self::Dataset(_) => ErrorCode::DatasetMalformed,
            Self::HeaderMismatch(_) => ErrorCode::HeaderMismatch,
            Self::RoundTripMismatch(_) => ErrorCode::RoundTripMismatch,
            Self::Source(_) => ErrorCode::SourceInvalid,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Findings(_) => ErrorCode::FindingsReported,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Fold the violations collected over a pass into one result.
    ///
    /// No violations is `Ok`; a single one is returned as is.
    pub fn from_violations(errors: Vec<CatalogError>) -> Result<()> {
        let mut errors: Vec<CatalogError> = errors
            .into_iter()
            .flat_map(|err| match err {
                Self::SchemaViolations(inner) => inner,
                other => vec![other],
            })
            .collect();
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::SchemaViolations(errors)),
        }
    }

    /// The skill an error is about, when it names one.
    #[must_use]
    pub fn skill_id(&self) -> Option<&str> {
        match self {
            Self::DuplicateId(id) | Self::RegistrySealed(id) | Self::SkillNotFound(id) => Some(id),
            Self::UnknownColumns { skill_id, .. } | Self::InvalidValue { skill_id, .. } => {
                Some(skill_id)
            }
            _ => None,
        }
    }

    /// Whether this error is a schema violation that must abort a build.
    #[must_use]
    pub fn is_schema_violation(&self) -> bool {
        self.code().category() == "schema"
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::DuplicateId(id) => Some(serde_json::json!({ "ids": [id] })),
            Self::DuplicateIds { ids } => Some(serde_json::json!({ "ids": ids })),
            Self::UnknownColumns { skill_id, columns } => {
                Some(serde_json::json!({ "skill_id": skill_id, "columns": columns }))
            }
            Self::InvalidValue {
                skill_id,
                column,
                value,
                ..
            } => Some(serde_json::json!({
                "skill_id": skill_id,
                "column": column,
                "value": value,
            })),
            Self::SchemaViolations(errors) => {
                let skill_ids: Vec<&str> = errors.iter().filter_map(Self::skill_id).unique().collect();
                let columns: Vec<&str> = errors
                    .iter()
                    .filter_map(|err| match err {
                        Self::UnknownColumns { columns, .. } => Some(columns),
                        _ => None,
                    })
                    .flatten()
                    .map(String::as_str)
                    .unique()
                    .collect();
                let violations: Vec<Value> = errors
                    .iter()
                    .map(|err| {
                        serde_json::json!({
                            "code": err.code(),
                            "message": err.to_string(),
                            "context": err.context(),
                        })
                    })
                    .collect();
                Some(serde_json::json!({
                    "skill_ids": skill_ids,
                    "columns": columns,
                    "violations": violations,
                }))
            }
            Self::SkillNotFound(id) => Some(serde_json::json!({ "skill_id": id })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_catalog_error(self)
    }
}

fn join_messages(errors: &[CatalogError]) -> String {
    errors.iter().join("; ")
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "DUPLICATE_SKILL_ID")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "schema", "dataset", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a CatalogError.
    #[must_use]
    pub fn from_catalog_error(err: &CatalogError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&CatalogError> for StructuredError {
    fn from(err: &CatalogError) -> Self {
        Self::from_catalog_error(err)
    }
}

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
