//! Whole-file reading and writing of typed records.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use pbs_core::{Schema, SchemaEntry, Value};

use crate::cast::Caster;
use crate::error::{FieldError, PbsError};
use crate::provenance::Provenance;
use crate::record::assemble;
use crate::section::{KeyValueLine, Section, SectionReader};
use crate::writer::format_record;

pub const FILE_HEADER: &str = "# See the documentation on the wiki to learn how to edit this file.";
pub const SECTION_SEPARATOR: &str = "#-------------------------------";

/// One decoded section.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The section header decoded through the schema's section-name entry.
    pub id: Value,
    /// The header text as written.
    pub section: String,
    /// Present keys in schema order.
    pub fields: Vec<(String, Value)>,
    /// Where the section header was read; `None` for built records.
    pub provenance: Option<Provenance>,
}

impl Record {
    pub fn new(id: Value, section: impl Into<String>) -> Self {
        Self {
            id,
            section: section.into(),
            fields: Vec::new(),
            provenance: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.push((key.into(), value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Decode one section against `schema`.
///
/// A record either decodes completely or not at all.
pub fn decode_section(
    section: &Section,
    schema: &Schema,
    caster: &Caster<'_>,
) -> Result<Record, PbsError> {
    let missing: Vec<String> = schema
        .entries()
        .iter()
        .filter(|e| e.is_required() && !section.contains_key(e.key()))
        .map(|e| e.key().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PbsError::MissingRequired {
            keys: missing,
            provenance: section.header.clone(),
        });
    }

    let id = assemble(&section.name, schema.section_name(), caster)
        .map_err(|e| located(e, &section.header))?;

    for entry in &section.entries {
        if schema.get(&entry.key).is_none() {
            log::warn!(
                "{}: section {}: key {} is not part of the {} schema",
                section.header.file(),
                section.name,
                entry.key,
                schema.name()
            );
        }
    }

    let mut fields = Vec::new();
    for schema_entry in schema.entries() {
        let Some(found) = section.get(schema_entry.key()) else {
            continue;
        };
        let value = if schema_entry.is_repeating() {
            let items = found
                .lines
                .iter()
                .map(|line| decode_line(line, schema_entry, caster))
                .collect::<Result<Vec<_>, _>>()?;
            Value::List(items)
        } else {
            match found.last() {
                Some(line) => decode_line(line, schema_entry, caster)?,
                None => continue,
            }
        };
        fields.push((schema_entry.key().to_string(), value));
    }

    Ok(Record {
        id,
        section: section.name.clone(),
        fields,
        provenance: Some(section.header.clone()),
    })
}

fn decode_line(
    line: &KeyValueLine,
    entry: &SchemaEntry,
    caster: &Caster<'_>,
) -> Result<Value, PbsError> {
    assemble(&line.value, entry, caster).map_err(|e| located(e, &line.provenance))
}

fn located(err: FieldError, at: &Provenance) -> PbsError {
    let provenance = at.with_field(err.position);
    PbsError::parse(err, provenance)
}

/// Lazily decodes records from a line source.
///
/// A record that fails to decode is reported and reading carries on with
/// the next section. Format and I/O errors end the stream.
pub struct RecordReader<'a, R> {
    sections: SectionReader<R>,
    schema: &'a Schema,
    caster: Caster<'a>,
}

impl<'a, R: BufRead> RecordReader<'a, R> {
    /// Fails with [`PbsError::Schema`] when `schema` names an enum the caster cannot resolve.
    pub fn new(
        reader: R,
        file: impl AsRef<str>,
        schema: &'a Schema,
        caster: Caster<'a>,
    ) -> Result<Self, PbsError> {
        caster.check_schema(schema)?;
        Ok(Self {
            sections: SectionReader::new(reader, file).with_schema(schema),
            schema,
            caster,
        })
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.sections = self.sections.with_cancel(flag);
        self
    }
}

impl<R: BufRead> Iterator for RecordReader<'_, R> {
    type Item = Result<Record, PbsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let section = match self.sections.next()? {
            Ok(section) => section,
            Err(e) => return Some(Err(e)),
        };
        Some(decode_section(&section, self.schema, &self.caster))
    }
}

/// Open `path` for record-by-record reading.
///
/// Returns `Ok(None)` when the file is missing and the schema is optional.
pub fn open_file<'a>(
    path: &Path,
    schema: &'a Schema,
    caster: Caster<'a>,
) -> Result<Option<RecordReader<'a, BufReader<File>>>, PbsError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound && schema.is_optional() => {
            log::debug!("Skipping missing optional file {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    log::debug!("Reading {} with the {} schema", path.display(), schema.name());
    RecordReader::new(BufReader::new(file), path.display().to_string(), schema, caster).map(Some)
}

/// Read every record of `path`, stopping at the first error.
pub fn read_file(path: &Path, schema: &Schema, caster: Caster<'_>) -> Result<Vec<Record>, PbsError> {
    match open_file(path, schema, caster)? {
        Some(reader) => reader.collect(),
        None => Ok(Vec::new()),
    }
}

/// Write `records` as a complete PBS file.
pub fn write_pbs<'r, W, I>(records: I, schema: &Schema, out: &mut W) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'r Record>,
{
    writeln!(out, "{FILE_HEADER}")?;
    for record in records {
        writeln!(out, "{SECTION_SEPARATOR}")?;
        writeln!(out, "[{}]", format_record(&record.id, schema.section_name()))?;
        for entry in schema.entries() {
            let Some(value) = record.get(entry.key()).filter(|v| !v.is_null()) else {
                continue;
            };
            match value.as_list().filter(|_| entry.is_repeating()) {
                Some(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        writeln!(out, "{} = {}", entry.key(), format_record(item, entry))?;
                    }
                }
                None => writeln!(out, "{} = {}", entry.key(), format_record(value, entry))?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/file_tests.rs"]
mod tests;
