//! TOML loading for schema definitions.
//!
//! A schema directory holds one `<name>.toml` per PBS file plus an optional
//! `enums.toml`. A schema file looks like:
//!
//! ```toml
//! name = "moves"
//! order = 10
//! entity = { name = "Move", key = "Name" }
//!
//! [section]
//! types = ["Name"]
//!
//! [[field]]
//! key = "Power"
//! types = ["UnsignedInteger"]
//!
//! [[field]]
//! key = "Type"
//! required = true
//! types = [{ kind = "Enumerable", enum = "Type" }]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use pbs_core::{
    EnumDefinition, FieldDescriptor, FieldStructure, KeyStrategy, PrimitiveKind, SECTION_NAME_KEY,
    Schema, SchemaEntry,
};
use serde::Deserialize;

use crate::error::CompileError;

/// File name of the enum declarations inside a schema directory.
pub const ENUMS_FILE: &str = "enums.toml";

/// One schema file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Record type name; the PBS file is `<name>.txt`.
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    /// Compilation order; lower runs first.
    #[serde(default)]
    pub order: i32,
    /// Entity set filled with this file's section names.
    #[serde(default)]
    pub entity: Option<EntityDecl>,
    pub section: FieldSpec,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDecl {
    pub name: String,
    #[serde(default)]
    pub key: KeyStrategy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub structure: FieldStructure,
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub required: bool,
    /// Repeat the single type this many times.
    #[serde(default)]
    pub fixed_size: Option<usize>,
    #[serde(default)]
    pub fixed_size_is_max: bool,
}

/// A bare kind name or a full descriptor table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Kind(PrimitiveKind),
    Full(FieldDescriptor),
}

impl From<TypeSpec> for FieldDescriptor {
    fn from(spec: TypeSpec) -> Self {
        match spec {
            TypeSpec::Kind(kind) => FieldDescriptor::new(kind),
            TypeSpec::Full(descriptor) => descriptor,
        }
    }
}

impl FieldSpec {
    fn into_entry(self, key: String, path: &str) -> Result<SchemaEntry, CompileError> {
        let mut descriptors: Vec<FieldDescriptor> =
            self.types.into_iter().map(FieldDescriptor::from).collect();

        let entry = match self.fixed_size {
            Some(count) => {
                if descriptors.len() != 1 {
                    return Err(CompileError::invalid_schema(
                        path,
                        format!("fixed-size key '{key}' must declare exactly one type"),
                    ));
                }
                if self.structure != FieldStructure::Single {
                    return Err(CompileError::invalid_schema(
                        path,
                        format!("fixed-size key '{key}' must use the Single structure"),
                    ));
                }
                let descriptor = descriptors.remove(0);
                SchemaEntry::fixed(key, descriptor, count, self.fixed_size_is_max)?
            }
            None => SchemaEntry::new(key, self.structure, descriptors)?,
        };

        Ok(if self.required { entry.required() } else { entry })
    }
}

impl SchemaFile {
    pub fn parse(contents: &str, path: &str) -> Result<Self, CompileError> {
        toml::from_str(contents).map_err(|source| CompileError::Toml {
            path: path.to_string(),
            source,
        })
    }

    /// Build the codec schema described by this file.
    pub fn to_schema(&self, path: &str) -> Result<Schema, CompileError> {
        let section = self
            .section
            .clone()
            .into_entry(SECTION_NAME_KEY.to_string(), path)?;
        let mut builder = Schema::builder(&self.name)
            .optional(self.optional)
            .section_name(section);

        for spec in &self.fields {
            if spec.key.is_empty() {
                return Err(CompileError::invalid_schema(path, "field without a key"));
            }
            let key = spec.key.clone();
            builder = builder.entry(spec.clone().into_entry(key, path)?);
        }

        Ok(builder.build()?)
    }
}

/// One `enums.toml` table: explicit values or names numbered from 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EnumSpec {
    Names(Vec<String>),
    Values(BTreeMap<String, i64>),
}

/// Parse `enums.toml` content into enum definitions, sorted by name.
pub fn parse_enums(contents: &str, path: &str) -> Result<Vec<EnumDefinition>, CompileError> {
    let tables: BTreeMap<String, EnumSpec> =
        toml::from_str(contents).map_err(|source| CompileError::Toml {
            path: path.to_string(),
            source,
        })?;

    Ok(tables
        .into_iter()
        .map(|(name, spec)| match spec {
            EnumSpec::Names(names) => EnumDefinition::from_names(name, names),
            EnumSpec::Values(values) => values
                .into_iter()
                .fold(EnumDefinition::new(name), |def, (member, value)| {
                    def.member(member, value)
                }),
        })
        .collect())
}

/// Everything loaded from one schema directory.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    pub files: Vec<(SchemaFile, Schema)>,
    pub enums: Vec<EnumDefinition>,
}

/// Load every `.toml` schema file (and `enums.toml`) in `dir`.
pub fn load_schema_dir(dir: &Path) -> Result<SchemaSet, CompileError> {
    if !dir.is_dir() {
        return Err(CompileError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    entries.sort();

    let mut set = SchemaSet::default();
    for path in entries {
        if path.file_name().is_some_and(|n| n == ENUMS_FILE) {
            let contents = std::fs::read_to_string(&path)?;
            set.enums = parse_enums(&contents, &path.display().to_string())?;
            continue;
        }
        let (file, schema) = load_schema_file(&path)?;
        log::debug!("Loaded schema {} from {}", schema.name(), path.display());
        set.files.push((file, schema));
    }

    Ok(set)
}

fn load_schema_file(path: &Path) -> Result<(SchemaFile, Schema), CompileError> {
    let label = path.display().to_string();
    let contents = std::fs::read_to_string(path)?;
    let file = SchemaFile::parse(&contents, &label)?;
    let schema = file.to_schema(&label)?;
    Ok((file, schema))
}

#[cfg(test)]
#[path = "tests/schema_file_tests.rs"]
mod tests;
