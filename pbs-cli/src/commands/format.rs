use std::io::{self, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pbs_codec::{Caster, Record, read_file, write_pbs};
use pbs_compiler::backup::write_file;
use pbs_compiler::write_file_with_backup;
use pbs_core::Schema;

use super::Project;
use crate::CliError;

/// Decode a whole file, refusing to treat a missing file as empty.
pub(crate) fn read_records(
    path: &Path,
    schema: &Schema,
    caster: Caster<'_>,
) -> Result<Vec<Record>, CliError> {
    std::fs::metadata(path)?;
    Ok(read_file(path, schema, caster)?)
}

/// Run the format command.
pub(crate) fn run_format(
    project: &Project,
    path: &Path,
    schema_name: &str,
    write: bool,
) -> Result<(), CliError> {
    let service = project.service_for(schema_name)?;
    let schema = super::schema(&service, schema_name)?;
    let records = read_records(path, schema, Caster::new(service.registry()))?;

    if !write {
        let mut out = io::stdout().lock();
        write_pbs(&records, schema, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let action = |w: &mut io::BufWriter<std::fs::File>| write_pbs(&records, schema, w);
    if project.settings.write.backup {
        write_file_with_backup(path, action)?;
    } else {
        write_file(path, action)?;
    }

    log::info!(
        "{} {} ({} records)",
        "Formatted".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        records.len(),
    );
    Ok(())
}
