//! Decoded PBS values.

use std::fmt;

use serde::Serialize;

use crate::lookup::EntityKey;

/// One typed field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    Integer(i64),
    Unsigned(u64),
    Hex(u64),
    Float(f64),
    Boolean(bool),
    /// Text from `String` and `UnformattedText` fields.
    Text(String),
    Name(String),
    Symbol(String),
    /// A member of a declared enum, kept with its numeric value.
    Enum { member: String, value: i64 },
    /// A key of a keyed-entity set.
    Key(EntityKey),
}

impl Primitive {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn name(s: impl Into<String>) -> Self {
        Self::Name(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Name(s) | Self::Symbol(s) => Some(s),
            Self::Enum { member, .. } => Some(member),
            Self::Key(key) => key.as_str(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Unsigned(v) | Self::Hex(v) => i64::try_from(*v).ok(),
            Self::Enum { value, .. } => Some(*value),
            Self::Key(EntityKey::Integer(v)) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Hex(v) => write!(f, "{v:X}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(s) | Self::Name(s) | Self::Symbol(s) => f.write_str(s),
            Self::Enum { member, .. } => f.write_str(member),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

/// A decoded key value: a scalar, a fixed tuple, or a list of either.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// An absent optional field.
    #[default]
    Null,
    Primitive(Primitive),
    /// One value per schema field, in field order.
    Tuple(Vec<Value>),
    /// Repetitions of an `Array` line or occurrences of a `Repeating` key.
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Flatten into primitive slots in order, `None` standing for null.
    ///
    /// Tuples and lists are decomposed recursively, so a list of tuples
    /// becomes the tuples' members back to back.
    pub fn flatten(&self) -> Vec<Option<&Primitive>> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<Option<&'a Primitive>>) {
        match self {
            Self::Null => out.push(None),
            Self::Primitive(p) => out.push(Some(p)),
            Self::Tuple(items) | Self::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<Option<Primitive>> for Value {
    fn from(p: Option<Primitive>) -> Self {
        p.map_or(Self::Null, Self::Primitive)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Primitive(Primitive::Integer(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Primitive(Primitive::Boolean(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Primitive(Primitive::text(s))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                f.write_str(")")
            }
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
