//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Schema violations (stop the build)
//! - 2xx: Dataset errors
//! - 3xx: Config errors
//! - 4xx: Lookup errors
//! - 5xx: Audit outcomes
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for machine output.
///
/// Each variant maps to a numeric code (e.g., `DuplicateSkillId` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Schema violations (1xx)
    // ========================================
    /// E101: Two records share one skill id
    DuplicateSkillId,
    /// E102: Override key is not a schema column
    UnknownColumn,
    /// E103: Column value cannot be parsed for its kind
    InvalidFieldValue,
    /// E104: Registration attempted after export
    RegistrySealed,
    /// E105: Several schema violations of different kinds
    SchemaViolations,

    // ========================================
    // Dataset errors (2xx)
    // ========================================
    /// E201: CSV text is malformed
    DatasetMalformed,
    /// E202: Header does not match expectations
    HeaderMismatch,
    /// E203: Exported data did not re-import identically
    RoundTripMismatch,
    /// E204: Authoring catalogue is invalid
    SourceInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Lookup errors (4xx)
    // ========================================
    /// E401: Requested skill is not in the registry
    SkillNotFound,

    // ========================================
    // Audit outcomes (5xx)
    // ========================================
    /// E501: Findings were reported and strict mode is on
    FindingsReported,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: IO operation failed
    IoError,
    /// E902: Serialization/deserialization failed
    SerializationError,
    /// E903: Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `DuplicateSkillId` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::DuplicateSkillId => 101,
            Self::UnknownColumn => 102,
            Self::InvalidFieldValue => 103,
            Self::RegistrySealed => 104,
            Self::SchemaViolations => 105,

            Self::DatasetMalformed => 201,
            Self::HeaderMismatch => 202,
            Self::RoundTripMismatch => 203,
            Self::SourceInvalid => 204,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::SkillNotFound => 401,

            Self::FindingsReported => 501,

            Self::IoError => 901,
            Self::SerializationError => 902,
            Self::InternalError => 903,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::DuplicateSkillId => "Each skill id must appear once across all role collections. Rename or remove the extra declarations",
            Self::UnknownColumn => "Check the field name against the schema columns; typos are rejected rather than dropped",
            Self::InvalidFieldValue => "Numeric columns take plain numbers, enum columns take a listed value, JSON columns take valid JSON",
            Self::RegistrySealed => "Register every skill before exporting; build a fresh registry to add more",
            Self::SchemaViolations => "Fix every listed skill; all violations found in one pass are reported together",

            Self::DatasetMalformed => "Check the CSV for unbalanced quotes or a missing header row",
            Self::HeaderMismatch => "The header must name schema columns. Re-export the dataset with `skillcat build`",
            Self::RoundTripMismatch => "Exported data did not read back identically. Check for values the CSV writer cannot preserve",
            Self::SourceInvalid => "The catalogue must contain arrays of tables named after roles, e.g. [[tanker]]",

            Self::ConfigInvalid => "Check TOML syntax in the config file and the SKILLCAT_* environment variables",
            Self::ConfigMissingRequired => "Pass the path on the command line or set it under [paths] in skillcat.toml",

            Self::SkillNotFound => "Run `skillcat link` to list which units reference unknown skill ids",

            Self::FindingsReported => "Review the report, or drop --strict to treat findings as advisory",

            Self::IoError => "File operation failed. Check path exists and permissions are correct",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::InternalError => "An unexpected error occurred. Please report this issue with full error output",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::DuplicateSkillId
            | Self::UnknownColumn
            | Self::InvalidFieldValue
            | Self::RegistrySealed
            | Self::SchemaViolations
            | Self::DatasetMalformed
            | Self::HeaderMismatch
            | Self::SourceInvalid
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::SkillNotFound
            | Self::FindingsReported
            | Self::IoError => true,

            Self::RoundTripMismatch | Self::SerializationError | Self::InternalError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "schema",
            2 => "dataset",
            3 => "config",
            4 => "lookup",
            5 => "audit",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::DuplicateSkillId,
            Self::UnknownColumn,
            Self::InvalidFieldValue,
            Self::RegistrySealed,
            Self::SchemaViolations,
            Self::DatasetMalformed,
            Self::HeaderMismatch,
            Self::RoundTripMismatch,
            Self::SourceInvalid,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::SkillNotFound,
            Self::FindingsReported,
            Self::IoError,
            Self::SerializationError,
            Self::InternalError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
