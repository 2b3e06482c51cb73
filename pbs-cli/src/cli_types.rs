//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pbs")]
#[command(about = "Read, check and rewrite PBS data files", long_about = None)]
pub(crate) struct Cli {
    /// Directory containing the PBS .txt files (defaults to ./PBS or the settings file)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory containing the .toml schema files (defaults to ./schemas or the settings file)
    #[arg(short, long, global = true)]
    pub schemas: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Selects the schema a single file is decoded with.
#[derive(Args, Clone)]
pub(crate) struct SchemaArgs {
    /// Schema name as declared in the schema directory (e.g. moves)
    #[arg(long)]
    pub schema: String,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Decode PBS files and report every problem found
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Report bad sections and carry on instead of stopping at the first
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Rewrite a PBS file in canonical form
    Format {
        file: PathBuf,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Replace the file instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },

    /// List the sections and key lines of a file without decoding values
    Sections { file: PathBuf },

    /// Decode a PBS file and print its records as JSON
    Dump {
        file: PathBuf,

        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Compile every PBS file described by the schema directory
    Compile {
        /// Regenerate the files after a successful compile
        #[arg(short, long)]
        write: bool,
    },

    /// Inspect the shared settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and the directories it resolves to
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pbs",
            "check",
            "PBS/moves.txt",
            "--schema",
            "moves",
            "--keep-going",
            "--root",
            "/game/PBS",
            "--quiet",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.root, Some(PathBuf::from("/game/PBS")));
        match cli.command {
            Commands::Check {
                files,
                schema,
                keep_going,
            } => {
                assert_eq!(files, vec![PathBuf::from("PBS/moves.txt")]);
                assert_eq!(schema.schema, "moves");
                assert!(keep_going);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_schema_is_required() {
        assert!(Cli::try_parse_from(["pbs", "dump", "moves.txt"]).is_err());
        assert!(Cli::try_parse_from(["pbs", "sections", "moves.txt"]).is_ok());
    }

    #[test]
    fn test_config_actions() {
        let cli = Cli::try_parse_from(["pbs", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
