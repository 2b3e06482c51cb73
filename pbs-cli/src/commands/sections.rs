use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pbs_codec::SectionReader;

use crate::CliError;

/// Run the sections command: print the raw key lines of each section.
pub(crate) fn run_sections(path: &Path) -> Result<(), CliError> {
    let file = File::open(path)?;
    let reader = SectionReader::new(BufReader::new(file), path.display().to_string());

    let mut count = 0;
    for section in reader {
        let section = section?;
        count += 1;
        log::info!(
            "[{}] {}",
            section.name.if_supports_color(Stdout, |t| t.bold()),
            format!("line {}", section.header.line_number())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        for line in section.lines() {
            log::info!(
                "  {:>4}  {} = {}",
                line.provenance.line_number(),
                line.key.if_supports_color(Stdout, |t| t.cyan()),
                line.value,
            );
        }
    }

    log::info!("");
    log::info!("{} section(s) in {}", count, path.display());
    Ok(())
}
