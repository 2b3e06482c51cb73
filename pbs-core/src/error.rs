use thiserror::Error;

/// Errors raised when a schema is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema has no designated section-name entry
    #[error("Schema for '{0}' does not have a 'SectionName' field.")]
    MissingSectionName(String),

    /// A schema entry declares no fields at all
    #[error("Schema entry '{0}' has no fields.")]
    EmptyFields(String),

    /// An enumerable field has nothing to look its values up in
    #[error(
        "Schema entry '{key}' field {position} has an enumerable type but no enum type was specified."
    )]
    MissingEnumReference { key: String, position: usize },

    /// A required field comes after an optional one
    #[error("Schema entry '{key}' field {position} is required but follows an optional field.")]
    RequiredAfterOptional { key: String, position: usize },

    /// The same key is declared twice
    #[error("Schema for '{schema}' defines key '{key}' more than once.")]
    DuplicateKey { schema: String, key: String },

    /// The section-name entry was declared as a repeating key
    #[error("The section name entry of '{0}' cannot be a repeating key.")]
    RepeatingSectionName(String),

    /// A regular entry uses the key reserved for the section name
    #[error("Key '{0}' is reserved for the section name entry.")]
    ReservedKey(String),

    /// An enum reference names nothing registered
    #[error("Schema entry '{key}' references unknown enumeration '{name}'.")]
    UnknownEnumReference { key: String, name: String },

    /// A fixed-size group was declared with zero elements
    #[error("Fixed-size entry '{0}' must have a size of at least 1.")]
    InvalidFixedSize(String),
}
