pub(crate) mod check;
pub(crate) mod compile;
pub(crate) mod config;
pub(crate) mod dump;
pub(crate) mod format;
pub(crate) mod sections;

use std::path::PathBuf;

use pbs_compiler::{CompileError, CompilerService, Settings};
use pbs_core::Schema;

use crate::CliError;

/// Directories and settings every command resolves the same way.
pub(crate) struct Project {
    pub settings: Settings,
    pub pbs_dir: PathBuf,
    pub schema_dir: PathBuf,
}

impl Project {
    pub(crate) fn resolve(root: Option<PathBuf>, schemas: Option<PathBuf>) -> Self {
        let settings = Settings::load();
        let pbs_dir = settings.resolve_pbs_dir(root);
        let schema_dir = settings.resolve_schema_dir(schemas);
        Self {
            settings,
            pbs_dir,
            schema_dir,
        }
    }

    /// Load the schema directory and compile every file ordered before
    /// `schema`, so the entity sets it refers to are registered.
    pub(crate) fn service_for(&self, schema: &str) -> Result<CompilerService, CliError> {
        let mut service = CompilerService::from_schema_dir(&self.schema_dir)?;
        let compiled = service.compile_before(&self.pbs_dir, schema)?;
        log::debug!(
            "Compiled {} prerequisite file(s) for the {} schema",
            compiled.iter().filter(|f| !f.skipped).count(),
            schema
        );
        Ok(service)
    }
}

/// The schema called `name` in `service`.
pub(crate) fn schema<'a>(service: &'a CompilerService, name: &str) -> Result<&'a Schema, CliError> {
    service
        .schema(name)
        .ok_or_else(|| CompileError::UnknownSchema(name.to_string()).into())
}
