use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pbs_compiler::{load_settings_string, settings_path};

use super::Project;

/// Show the settings file and the directories commands will use.
pub(crate) fn run_config_show(project: &Project) {
    let path = settings_path();

    log::info!(
        "{}",
        "PBS Tools Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    log::info!("  PBS directory:    {}", project.pbs_dir.display());
    log::info!("  Schema directory: {}", project.schema_dir.display());
    log::info!(
        "  Backups:          {}",
        if project.settings.write.backup {
            "on".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "off".if_supports_color(Stdout, |t| t.yellow()).to_string()
        },
    );

    if let Some(contents) = load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
