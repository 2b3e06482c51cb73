//! Schema value types consumed by the codec.
//!
//! A [`Schema`] is built once per record type and never mutated afterwards.
//! How a schema is derived from a record type is up to the caller; the
//! codec only needs the finished value.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::SchemaError;
use crate::kind::{EnumRef, FieldStructure, PrimitiveKind};
use crate::lookup::EnumRegistry;

/// Key of the designated entry that receives the section header text.
pub const SECTION_NAME_KEY: &str = "SectionName";

/// One typed field within a schema entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    pub kind: PrimitiveKind,

    /// Enum or entity set consulted by `Enumerable`/`EnumerableOrInteger`.
    #[serde(default, rename = "enum")]
    pub enum_ref: Option<EnumRef>,

    #[serde(default)]
    pub optional: bool,

    /// Accept the "none" sentinel for entity keys.
    #[serde(default)]
    pub allow_none: bool,

    /// Raw text used when an optional field has no token.
    #[serde(default)]
    pub default_value: Option<String>,

    /// Marks the final element of a field group. Set by [`SchemaEntry::new`].
    #[serde(skip)]
    pub is_last: bool,
}

impl FieldDescriptor {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            enum_ref: None,
            optional: false,
            allow_none: false,
            default_value: None,
            is_last: false,
        }
    }

    /// Shorthand for an `Enumerable` field backed by `enum_ref`.
    pub fn enumerable(enum_ref: impl Into<EnumRef>) -> Self {
        Self::new(PrimitiveKind::Enumerable).with_enum(enum_ref)
    }

    pub fn with_enum(mut self, enum_ref: impl Into<EnumRef>) -> Self {
        self.enum_ref = Some(enum_ref.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn allow_none(mut self) -> Self {
        self.allow_none = true;
        self
    }

    pub fn with_default(mut self, raw: impl Into<String>) -> Self {
        self.default_value = Some(raw.into());
        self
    }
}

impl From<PrimitiveKind> for FieldDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        Self::new(kind)
    }
}

/// One key of a PBS section and the fields its value is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    key: String,
    structure: FieldStructure,
    fields: Vec<FieldDescriptor>,
    required: bool,
}

impl SchemaEntry {
    /// Build an entry, checking the field list.
    ///
    /// Enumerable fields must name an enum, and once a field is optional
    /// every later field must be optional too.
    pub fn new(
        key: impl Into<String>,
        structure: FieldStructure,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        let key = key.into();
        if fields.is_empty() {
            return Err(SchemaError::EmptyFields(key));
        }

        let mut fields = fields;
        let mut seen_optional = false;
        for (index, field) in fields.iter_mut().enumerate() {
            let position = index + 1;
            if field.kind == PrimitiveKind::Enumerable && field.enum_ref.is_none() {
                return Err(SchemaError::MissingEnumReference { key, position });
            }
            if field.optional {
                seen_optional = true;
            } else if seen_optional {
                return Err(SchemaError::RequiredAfterOptional { key, position });
            }
            field.is_last = false;
        }
        if let Some(last) = fields.last_mut() {
            last.is_last = true;
        }

        Ok(Self {
            key,
            structure,
            fields,
            required: false,
        })
    }

    /// A `Single` entry with exactly one field.
    pub fn single(
        key: impl Into<String>,
        field: impl Into<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        Self::new(key, FieldStructure::Single, vec![field.into()])
    }

    /// A `Single` entry holding `count` copies of one field.
    ///
    /// With `count_is_max`, every copy after the first is optional so the
    /// line may hold anywhere from one to `count` values.
    pub fn fixed(
        key: impl Into<String>,
        field: impl Into<FieldDescriptor>,
        count: usize,
        count_is_max: bool,
    ) -> Result<Self, SchemaError> {
        let key = key.into();
        if count == 0 {
            return Err(SchemaError::InvalidFixedSize(key));
        }
        let field = field.into();
        let fields = (0..count)
            .map(|i| {
                let mut f = field.clone();
                f.optional = field.optional || (count_is_max && i > 0);
                f
            })
            .collect();
        Self::new(key, FieldStructure::Single, fields)
    }

    /// Mark this key as one every section must contain.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn structure(&self) -> FieldStructure {
        self.structure
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_repeating(&self) -> bool {
        self.structure == FieldStructure::Repeating
    }
}

/// The full schema of one PBS file: a section-name entry plus ordered keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    optional: bool,
    section_name: SchemaEntry,
    entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Record type name, also used as the base file name (`<name>.txt`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a missing file is acceptable.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn section_name(&self) -> &SchemaEntry {
        &self.section_name
    }

    /// Regular key entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn is_repeating(&self, key: &str) -> bool {
        self.get(key).is_some_and(SchemaEntry::is_repeating)
    }

    /// Check that every enum reference resolves in `registry`.
    pub fn check_references(&self, registry: &EnumRegistry) -> Result<(), SchemaError> {
        for entry in std::iter::once(&self.section_name).chain(&self.entries) {
            for field in &entry.fields {
                if let Some(enum_ref) = &field.enum_ref {
                    if registry.resolve(enum_ref).is_none() {
                        return Err(SchemaError::UnknownEnumReference {
                            key: entry.key.clone(),
                            name: enum_ref.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Collects entries for a [`Schema`] and validates them on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    optional: bool,
    section_name: Option<SchemaEntry>,
    entries: Vec<SchemaEntry>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            section_name: None,
            entries: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Set the entry that decodes the `[section]` header text.
    pub fn section_name(mut self, entry: SchemaEntry) -> Self {
        self.section_name = Some(entry);
        self
    }

    pub fn entry(mut self, entry: SchemaEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let section_name = self
            .section_name
            .ok_or_else(|| SchemaError::MissingSectionName(self.name.clone()))?;
        if section_name.is_repeating() {
            return Err(SchemaError::RepeatingSectionName(self.name));
        }

        let mut keys = HashSet::new();
        for entry in &self.entries {
            if entry.key == SECTION_NAME_KEY {
                return Err(SchemaError::ReservedKey(entry.key.clone()));
            }
            if !keys.insert(entry.key.as_str()) {
                return Err(SchemaError::DuplicateKey {
                    schema: self.name.clone(),
                    key: entry.key.clone(),
                });
            }
        }

        Ok(Schema {
            name: self.name,
            optional: self.optional,
            section_name,
            entries: self.entries,
        })
    }
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
