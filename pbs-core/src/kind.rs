use serde::Deserialize;

/// The primitive type a single PBS field is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PrimitiveKind {
    /// Signed integer.
    Integer,
    /// Integer that is zero or greater.
    UnsignedInteger,
    /// Integer that is strictly greater than zero.
    PositiveInteger,
    /// Hexadecimal digits without prefix or sign.
    Hexadecimal,
    /// Decimal number.
    Float,
    /// `1/true/yes/y` or `0/false/no/n`, case-insensitive.
    Boolean,
    /// Identifier: word characters, not starting with a digit.
    Name,
    /// Free text, quoted on write when it contains a comma or quote.
    String,
    /// Takes the rest of the raw line, never quoted.
    UnformattedText,
    /// Like `Name`, but stored as an interned symbol downstream.
    Symbol,
    /// Member of a declared enum or key of a registered entity set.
    Enumerable,
    /// Like `Enumerable`, but integer literals map to enum values.
    EnumerableOrInteger,
}

impl PrimitiveKind {
    /// Whether this kind needs an enum reference to be cast.
    pub fn is_enumerable(self) -> bool {
        matches!(self, Self::Enumerable | Self::EnumerableOrInteger)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::UnsignedInteger => "UnsignedInteger",
            Self::PositiveInteger => "PositiveInteger",
            Self::Hexadecimal => "Hexadecimal",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Name => "Name",
            Self::String => "String",
            Self::UnformattedText => "UnformattedText",
            Self::Symbol => "Symbol",
            Self::Enumerable => "Enumerable",
            Self::EnumerableOrInteger => "EnumerableOrInteger",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How many value groups one key yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum FieldStructure {
    /// One scalar or tuple per key.
    #[default]
    Single,
    /// Zero or more tuples packed back-to-back on one line.
    Array,
    /// The key may appear several times in a section, one tuple per line.
    Repeating,
}

/// Name of an enum definition or entity set in an [`EnumRegistry`](crate::EnumRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct EnumRef(String);

impl EnumRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnumRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnumRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EnumRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}
