use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pbs_compiler::CompilerService;

use super::Project;
use crate::CliError;

/// Run the compile command.
pub(crate) fn run_compile(project: &Project, write: bool) -> Result<(), CliError> {
    log::info!(
        "Compiling PBS files in: {}",
        project.pbs_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "Schemas: {}",
        project.schema_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("");

    let mut service = CompilerService::from_schema_dir(&project.schema_dir)?;
    let summary = service.compile_all(&project.pbs_dir)?;

    let mut total = 0;
    for file in &summary {
        if file.skipped {
            log::info!(
                "  {:<20} {}",
                file.name,
                "skipped (optional, not present)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            total += file.records;
            log::info!("  {:<20} {:>6} records", file.name, file.records);
        }
    }
    log::info!("");
    log::info!(
        "{} {} records from {} file(s)",
        "Compiled".if_supports_color(Stdout, |t| t.green()),
        total,
        summary.iter().filter(|f| !f.skipped).count(),
    );

    if write {
        let written = service.write_all(&project.pbs_dir, project.settings.write.backup)?;
        log::info!(
            "{} {} file(s)",
            "Wrote".if_supports_color(Stdout, |t| t.green()),
            written.len(),
        );
    }

    Ok(())
}
