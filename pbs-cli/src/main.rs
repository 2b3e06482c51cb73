//! pbs CLI
//!
//! Command-line interface for checking, formatting and compiling PBS data files.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Project;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let project = Project::resolve(cli.root, cli.schemas);

    let result = match cli.command {
        Commands::Check {
            files,
            schema,
            keep_going,
        } => commands::check::run_check(&project, &files, &schema.schema, keep_going),
        Commands::Format {
            file,
            schema,
            write,
        } => commands::format::run_format(&project, &file, &schema.schema, write),
        Commands::Sections { file } => commands::sections::run_sections(&file),
        Commands::Dump { file, schema } => commands::dump::run_dump(&project, &file, &schema.schema),
        Commands::Compile { write } => commands::compile::run_compile(&project, write),
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::run_config_show(&project),
                ConfigAction::Path => commands::config::run_config_path(),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
