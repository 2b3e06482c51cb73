use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pbs_codec::{Caster, open_file};
use pbs_core::Schema;

use super::Project;
use crate::CliError;

/// Result of checking one file.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FileReport {
    pub records: usize,
    pub errors: usize,
    pub skipped: bool,
}

/// Decode `path` and log every problem found.
///
/// Without `keep_going` the first error ends the file. With it, bad
/// sections are reported and reading moves on; errors that break the file
/// structure still end it.
pub(crate) fn check_file(
    path: &Path,
    schema: &Schema,
    caster: Caster<'_>,
    keep_going: bool,
) -> FileReport {
    let mut report = FileReport::default();

    let reader = match open_file(path, schema, caster) {
        Ok(Some(reader)) => reader,
        Ok(None) => {
            report.skipped = true;
            return report;
        }
        Err(e) => {
            log::error!("{e}");
            report.errors += 1;
            return report;
        }
    };

    for result in reader {
        match result {
            Ok(_) => report.records += 1,
            Err(e) => {
                log::error!("{e}");
                report.errors += 1;
                if !(keep_going && e.is_record_level()) {
                    break;
                }
            }
        }
    }

    report
}

/// Run the check command.
pub(crate) fn run_check(
    project: &Project,
    files: &[PathBuf],
    schema_name: &str,
    keep_going: bool,
) -> Result<(), CliError> {
    let service = project.service_for(schema_name)?;
    let schema = super::schema(&service, schema_name)?;
    let caster = Caster::new(service.registry());

    let mut failed = 0;
    for path in files {
        let report = check_file(path, schema, caster, keep_going);
        if report.skipped {
            log::info!(
                "{} {} {}",
                "-".if_supports_color(Stdout, |t| t.dimmed()),
                path.display(),
                "(optional, not present)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else if report.errors == 0 {
            log::info!(
                "{} {}: {} records",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                path.display(),
                report.records,
            );
        } else {
            failed += 1;
            log::info!(
                "{} {}: {} records, {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                path.display(),
                report.records,
                format!("{} error(s)", report.errors).if_supports_color(Stdout, |t| t.red()),
            );
        }
    }

    if failed > 0 {
        return Err(CliError::check(format!(
            "{failed} of {} file(s) had errors",
            files.len()
        )));
    }
    Ok(())
}
