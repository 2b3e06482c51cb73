use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value as Json, json};

use pbs_codec::{Caster, Record};

use super::Project;
use super::format::read_records;
use crate::CliError;

/// One record as a JSON object: section, header line, id and fields in
/// schema order.
fn record_json(record: &Record) -> Result<Json, serde_json::Error> {
    let mut fields = Map::new();
    for (key, value) in &record.fields {
        fields.insert(key.clone(), serde_json::to_value(value)?);
    }
    Ok(json!({
        "section": record.section,
        "line": record.provenance.as_ref().map(|p| p.line_number()),
        "id": serde_json::to_value(&record.id)?,
        "fields": fields,
    }))
}

/// Run the dump command.
pub(crate) fn run_dump(project: &Project, path: &Path, schema_name: &str) -> Result<(), CliError> {
    let service = project.service_for(schema_name)?;
    let schema = super::schema(&service, schema_name)?;
    let records = read_records(path, schema, Caster::new(service.registry()))?;

    let out: Vec<Json> = records
        .iter()
        .map(record_json)
        .collect::<Result<_, _>>()?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &out)?;
    writeln!(stdout)?;
    Ok(())
}
