//! Conversion of raw field text into typed primitives.

use std::sync::LazyLock;

use pbs_core::{
    EntityKey, EnumDefinition, EnumRef, EnumRegistry, EnumTarget, FieldDescriptor, KeyedLookup,
    Primitive, PrimitiveKind, Schema, SchemaError,
};
use regex::Regex;

use crate::error::CastError;

static TRUE_FORMATS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:1|true|yes|y)$").unwrap());
static FALSE_FORMATS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:0|false|no|n)$").unwrap());
// A word that does not start with a digit.
static NAME_FORMAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\W0-9]\w*$").unwrap());

/// Casts raw fields, resolving enumerable kinds against a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Caster<'a> {
    registry: Option<&'a EnumRegistry>,
}

impl<'a> Caster<'a> {
    pub fn new(registry: &'a EnumRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// A caster with no enums or entity sets; enumerable fields fail.
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Check that every enum or entity set named by `schema` is reachable.
    pub fn check_schema(&self, schema: &Schema) -> Result<(), SchemaError> {
        match self.registry {
            Some(registry) => schema.check_references(registry),
            None => schema.check_references(&EnumRegistry::new()),
        }
    }

    /// Convert one raw field according to `field`.
    pub fn cast(&self, raw: &str, field: &FieldDescriptor) -> Result<Primitive, CastError> {
        match field.kind {
            PrimitiveKind::Integer => parse_int(raw).map(Primitive::Integer),
            PrimitiveKind::UnsignedInteger => parse_unsigned(raw).map(Primitive::Unsigned),
            PrimitiveKind::PositiveInteger => parse_positive(raw).map(Primitive::Unsigned),
            PrimitiveKind::Hexadecimal => parse_hex(raw).map(Primitive::Hex),
            PrimitiveKind::Float => parse_float(raw).map(Primitive::Float),
            PrimitiveKind::Boolean => parse_boolean(raw).map(Primitive::Boolean),
            PrimitiveKind::Name => parse_name(raw).map(Primitive::name),
            PrimitiveKind::Symbol => parse_name(raw).map(|s| Primitive::Symbol(s.to_string())),
            PrimitiveKind::String | PrimitiveKind::UnformattedText => Ok(Primitive::text(raw)),
            PrimitiveKind::Enumerable => {
                let enum_ref = field
                    .enum_ref
                    .as_ref()
                    .ok_or_else(|| CastError::EnumerationNotDefined(raw.to_string()))?;
                self.cast_enum(raw, enum_ref, field.allow_none)
            }
            PrimitiveKind::EnumerableOrInteger => self.cast_enum_or_int(raw, field),
        }
    }

    fn resolve(&self, enum_ref: &EnumRef) -> Result<EnumTarget<'a>, CastError> {
        self.registry
            .and_then(|r| r.resolve(enum_ref))
            .ok_or_else(|| CastError::UnknownEnumeration(enum_ref.to_string()))
    }

    fn cast_enum(
        &self,
        raw: &str,
        enum_ref: &EnumRef,
        allow_none: bool,
    ) -> Result<Primitive, CastError> {
        match self.resolve(enum_ref)? {
            EnumTarget::Enum(def) => member_by_name(def, raw),
            EnumTarget::Entities(lookup) => entity_key(lookup, enum_ref, raw, allow_none),
        }
    }

    fn cast_enum_or_int(&self, raw: &str, field: &FieldDescriptor) -> Result<Primitive, CastError> {
        let number = raw.parse::<i64>().ok();
        let Some(enum_ref) = field.enum_ref.as_ref() else {
            return number
                .map(Primitive::Integer)
                .ok_or_else(|| CastError::EnumerationNotDefined(raw.to_string()));
        };

        match (self.resolve(enum_ref)?, number) {
            (EnumTarget::Enum(def), Some(value)) => def
                .by_value(value)
                .map(|m| Primitive::Enum {
                    member: m.name.clone(),
                    value: m.value,
                })
                .ok_or_else(|| CastError::UndefinedValue {
                    value,
                    enumeration: def.name().to_string(),
                }),
            (EnumTarget::Enum(def), None) => member_by_name(def, raw),
            (EnumTarget::Entities(lookup), _) => {
                entity_key(lookup, enum_ref, raw, field.allow_none)
            }
        }
    }
}

fn member_by_name(def: &EnumDefinition, raw: &str) -> Result<Primitive, CastError> {
    def.by_name(raw)
        .map(|m| Primitive::Enum {
            member: m.name.clone(),
            value: m.value,
        })
        .ok_or_else(|| CastError::UnknownMember {
            value: raw.to_string(),
            enumeration: def.name().to_string(),
        })
}

fn entity_key(
    lookup: &dyn KeyedLookup,
    enum_ref: &EnumRef,
    raw: &str,
    allow_none: bool,
) -> Result<Primitive, CastError> {
    let key: EntityKey = lookup
        .key_from_text(raw)
        .map_err(|reason| CastError::BadKey {
            value: raw.to_string(),
            enumeration: enum_ref.to_string(),
            reason,
        })?;
    if (allow_none && key.is_none()) || lookup.exists(&key) {
        Ok(Primitive::Key(key))
    } else {
        Err(CastError::UnknownKey {
            value: raw.to_string(),
            enumeration: enum_ref.to_string(),
        })
    }
}

pub fn parse_int(raw: &str) -> Result<i64, CastError> {
    raw.parse()
        .map_err(|_| CastError::NotInteger(raw.to_string()))
}

pub fn parse_unsigned(raw: &str) -> Result<u64, CastError> {
    raw.parse()
        .map_err(|_| CastError::NotUnsigned(raw.to_string()))
}

pub fn parse_positive(raw: &str) -> Result<u64, CastError> {
    match raw.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CastError::NotPositive(raw.to_string())),
    }
}

/// Bare hex digits; no sign and no `0x` prefix.
pub fn parse_hex(raw: &str) -> Result<u64, CastError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CastError::NotHex(raw.to_string()));
    }
    u64::from_str_radix(raw, 16).map_err(|_| CastError::NotHex(raw.to_string()))
}

pub fn parse_float(raw: &str) -> Result<f64, CastError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CastError::NotNumber(raw.to_string())),
    }
}

pub fn parse_boolean(raw: &str) -> Result<bool, CastError> {
    if TRUE_FORMATS.is_match(raw) {
        Ok(true)
    } else if FALSE_FORMATS.is_match(raw) {
        Ok(false)
    } else {
        Err(CastError::NotBoolean(raw.to_string()))
    }
}

pub fn parse_name(raw: &str) -> Result<&str, CastError> {
    if NAME_FORMAT.is_match(raw) {
        Ok(raw)
    } else {
        Err(CastError::InvalidName(raw.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/cast_tests.rs"]
mod tests;
