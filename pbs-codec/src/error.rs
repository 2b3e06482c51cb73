use pbs_core::{PrimitiveKind, SchemaError};

use crate::provenance::Provenance;

/// Why one raw field could not be converted to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("Field '{0}' is not an integer.")]
    NotInteger(String),

    #[error("Field '{0}' is not a positive integer or 0.")]
    NotUnsigned(String),

    #[error("Field '{0}' is not a positive integer.")]
    NotPositive(String),

    #[error("Field '{0}' is not a hexadecimal number.")]
    NotHex(String),

    #[error("Field '{0}' is not a number.")]
    NotNumber(String),

    #[error("Field '{0}' is not a Boolean value (true, false, 1, 0).")]
    NotBoolean(String),

    #[error("Field '{0}' is not a valid name.")]
    InvalidName(String),

    #[error("Field '{value}' is not a valid value for enumeration '{enumeration}'.")]
    UnknownMember { value: String, enumeration: String },

    #[error("Undefined value {value} in enumeration '{enumeration}'.")]
    UndefinedValue { value: i64, enumeration: String },

    #[error("Field '{value}' is not a known key of '{enumeration}'.")]
    UnknownKey { value: String, enumeration: String },

    #[error("Field '{value}' cannot be used as a key of '{enumeration}': {reason}")]
    BadKey {
        value: String,
        enumeration: String,
        reason: String,
    },

    #[error("Enumeration '{0}' is not registered.")]
    UnknownEnumeration(String),

    #[error("Enumeration not defined for field '{0}'.")]
    EnumerationNotDefined(String),

    #[error("Required {0} field is missing.")]
    MissingField(PrimitiveKind),
}

/// A [`CastError`] tagged with the 1-based position of the failing field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field {position}: {source}")]
pub struct FieldError {
    pub position: usize,
    #[source]
    pub source: CastError,
}

impl FieldError {
    pub fn new(position: usize, source: CastError) -> Self {
        Self { position, source }
    }
}

/// Errors surfaced by the codec facade.
///
/// Everything raised while reading a file carries the provenance of the
/// line (or section) it came from.
#[derive(Debug, thiserror::Error)]
pub enum PbsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File-level structure is broken; the rest of the file is not read.
    #[error("{message}\n{provenance}")]
    Format {
        message: String,
        provenance: Provenance,
    },

    /// One record failed to decode. Later records may still be read.
    #[error("{source}\n{provenance}")]
    Parse {
        source: FieldError,
        provenance: Provenance,
    },

    #[error("Required keys missing: {}\n{provenance}", keys.join(", "))]
    MissingRequired {
        keys: Vec<String>,
        provenance: Provenance,
    },

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Reading was cancelled")]
    Cancelled,
}

impl PbsError {
    pub fn format(message: impl Into<String>, provenance: Provenance) -> Self {
        Self::Format {
            message: message.into(),
            provenance,
        }
    }

    pub fn parse(source: FieldError, provenance: Provenance) -> Self {
        Self::Parse { source, provenance }
    }

    /// Whether the reader can keep going after this error.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::MissingRequired { .. })
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        match self {
            Self::Format { provenance, .. }
            | Self::Parse { provenance, .. }
            | Self::MissingRequired { provenance, .. } => Some(provenance),
            _ => None,
        }
    }
}
