//! Enum definitions and keyed-entity lookups used by enumerable fields.
//!
//! This is the only place the codec reaches outside itself. Lookups are
//! read-only from the codec's side and must tolerate concurrent readers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::kind::EnumRef;

/// Key of a content entity (a move, a species, an item...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum EntityKey {
    Name(String),
    Integer(i64),
    Text(String),
}

impl EntityKey {
    /// The "none" sentinel: an empty name or `none` in any case.
    pub fn is_none(&self) -> bool {
        match self {
            Self::Name(name) => name.is_empty() || name.eq_ignore_ascii_case("none"),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Name(s) | Self::Text(s) => Some(s),
            Self::Integer(_) => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) | Self::Text(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// How raw field text becomes an [`EntityKey`] for one entity set.
///
/// Chosen once when the entity set is registered, never probed per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum KeyStrategy {
    #[default]
    Name,
    Text,
    Integer,
}

impl KeyStrategy {
    pub fn convert(self, text: &str) -> Result<EntityKey, String> {
        match self {
            Self::Name => Ok(EntityKey::Name(text.to_string())),
            Self::Text => Ok(EntityKey::Text(text.to_string())),
            Self::Integer => text
                .parse()
                .map(EntityKey::Integer)
                .map_err(|_| format!("'{text}' is not an integer key")),
        }
    }
}

/// Existence checks against a registry of content entities.
pub trait KeyedLookup: Send + Sync {
    /// Whether an entity with this key has been registered.
    fn exists(&self, key: &EntityKey) -> bool;

    /// Convert field text into this registry's key type.
    fn key_from_text(&self, text: &str) -> Result<EntityKey, String>;
}

/// A set of known entity keys, e.g. the section names of `moves.txt`.
#[derive(Debug, Clone)]
pub struct EntitySet {
    name: String,
    strategy: KeyStrategy,
    keys: HashSet<EntityKey>,
    unchecked: bool,
}

impl EntitySet {
    pub fn new(name: impl Into<String>, strategy: KeyStrategy) -> Self {
        Self {
            name: name.into(),
            strategy,
            keys: HashSet::new(),
            unchecked: false,
        }
    }

    /// A set that accepts any well-formed key.
    ///
    /// Used when the file defining the entities is not being compiled.
    pub fn unchecked(name: impl Into<String>, strategy: KeyStrategy) -> Self {
        Self {
            unchecked: true,
            ..Self::new(name, strategy)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    pub fn insert(&mut self, key: EntityKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<EntityKey> for EntitySet {
    fn extend<T: IntoIterator<Item = EntityKey>>(&mut self, iter: T) {
        self.keys.extend(iter);
    }
}

impl KeyedLookup for EntitySet {
    fn exists(&self, key: &EntityKey) -> bool {
        self.unchecked || self.keys.contains(key)
    }

    fn key_from_text(&self, text: &str) -> Result<EntityKey, String> {
        self.strategy.convert(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// A closed enum with symbolic members and their numeric values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Members numbered 0, 1, 2... in the given order.
    pub fn from_names<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut def = Self::new(name);
        for (value, member) in (0_i64..).zip(members) {
            def.members.push(EnumMember {
                name: member.into(),
                value,
            });
        }
        def
    }

    pub fn member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Case-insensitive member lookup.
    pub fn by_name(&self, name: &str) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn by_value(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }
}

/// What an [`EnumRef`] resolves to.
#[derive(Clone, Copy)]
pub enum EnumTarget<'a> {
    Enum(&'a EnumDefinition),
    Entities(&'a dyn KeyedLookup),
}

/// Everything enumerable fields can be checked against.
#[derive(Clone, Default)]
pub struct EnumRegistry {
    enums: HashMap<String, EnumDefinition>,
    entities: HashMap<String, Arc<dyn KeyedLookup>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_enum(&mut self, definition: EnumDefinition) -> &mut Self {
        self.enums.insert(definition.name.clone(), definition);
        self
    }

    /// Register (or replace) the entity set behind `name`.
    pub fn register_entities(
        &mut self,
        name: impl Into<String>,
        lookup: Arc<dyn KeyedLookup>,
    ) -> &mut Self {
        self.entities.insert(name.into(), lookup);
        self
    }

    /// Enums win over entity sets registered under the same name.
    pub fn resolve(&self, enum_ref: &EnumRef) -> Option<EnumTarget<'_>> {
        if let Some(def) = self.enums.get(enum_ref.as_str()) {
            return Some(EnumTarget::Enum(def));
        }
        self.entities
            .get(enum_ref.as_str())
            .map(|lookup| EnumTarget::Entities(lookup.as_ref()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name) || self.entities.contains_key(name)
    }

    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

impl fmt::Debug for EnumRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut enums: Vec<_> = self.enums.keys().collect();
        enums.sort();
        let mut entities: Vec<_> = self.entities.keys().collect();
        entities.sort();
        f.debug_struct("EnumRegistry")
            .field("enums", &enums)
            .field("entities", &entities)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
