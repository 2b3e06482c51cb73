//! Ordered compilation of a whole PBS directory.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pbs_codec::{Caster, PbsError, Record, open_file, write_pbs};
use pbs_core::{EntitySet, EnumDefinition, EnumRegistry, KeyStrategy, Schema};

use crate::backup::{write_file, write_file_with_backup};
use crate::error::CompileError;
use crate::schema_file::{SchemaSet, load_schema_dir};

/// One PBS file's compiler.
///
/// Implementors supply the schema and may add validation on top of the
/// codec's own checks.
pub trait PbsCompiler: Send + Sync {
    fn schema(&self) -> &Schema;

    /// Lower orders compile first, so their entity sets exist for later files.
    fn order(&self) -> i32 {
        0
    }

    /// Entity set to fill with this file's section names, if any.
    fn entity(&self) -> Option<(&str, KeyStrategy)> {
        None
    }

    /// Check one decoded record.
    fn validate_record(&self, _record: &Record) -> Result<(), String> {
        Ok(())
    }

    /// Check all records of the file together.
    fn validate_all(&self, records: &[Record]) -> Result<(), String> {
        let mut seen = HashSet::new();
        for record in records {
            if !seen.insert(record.section.as_str()) {
                return Err(format!("Section {} is defined more than once.", record.section));
            }
        }
        Ok(())
    }

    fn file_name(&self) -> String {
        format!("{}.txt", self.schema().name())
    }
}

/// A compiler driven entirely by a loaded schema file.
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    schema: Schema,
    order: i32,
    entity: Option<(String, KeyStrategy)>,
}

impl SchemaCompiler {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            order: 0,
            entity: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_entity(mut self, name: impl Into<String>, strategy: KeyStrategy) -> Self {
        self.entity = Some((name.into(), strategy));
        self
    }
}

impl PbsCompiler for SchemaCompiler {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn entity(&self) -> Option<(&str, KeyStrategy)> {
        self.entity.as_ref().map(|(name, key)| (name.as_str(), *key))
    }
}

/// Per-file outcome of [`CompilerService::compile_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFile {
    pub name: String,
    pub path: PathBuf,
    pub records: usize,
    /// The file was optional and not present.
    pub skipped: bool,
}

/// Holds the registered compilers, the shared enum registry and the
/// compiled records.
pub struct CompilerService {
    compilers: Vec<Box<dyn PbsCompiler>>,
    registry: EnumRegistry,
    compiled: HashMap<String, Vec<Record>>,
    cancel: Arc<AtomicBool>,
}

impl Default for CompilerService {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerService {
    pub fn new() -> Self {
        Self {
            compilers: Vec::new(),
            registry: EnumRegistry::new(),
            compiled: HashMap::new(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A service with one [`SchemaCompiler`] per schema file in `dir`.
    pub fn from_schema_dir(dir: &Path) -> Result<Self, CompileError> {
        let set = load_schema_dir(dir)?;
        Ok(Self::from_schema_set(set))
    }

    pub fn from_schema_set(set: SchemaSet) -> Self {
        let mut service = Self::new();
        for definition in set.enums {
            service.register_enum(definition);
        }
        for (file, schema) in set.files {
            let mut compiler = SchemaCompiler::new(schema).with_order(file.order);
            if let Some(entity) = file.entity {
                compiler = compiler.with_entity(entity.name, entity.key);
            }
            service.register(compiler);
        }
        service
    }

    /// Register a compiler. Compilers with equal order keep registration order.
    pub fn register<C: PbsCompiler + 'static>(&mut self, compiler: C) -> &mut Self {
        self.compilers.push(Box::new(compiler));
        self.compilers.sort_by_key(|c| c.order());
        self
    }

    pub fn register_enum(&mut self, definition: EnumDefinition) -> &mut Self {
        self.registry.register_enum(definition);
        self
    }

    pub fn registry(&self) -> &EnumRegistry {
        &self.registry
    }

    pub fn compilers(&self) -> impl Iterator<Item = &dyn PbsCompiler> {
        self.compilers.iter().map(|c| c.as_ref())
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.compilers
            .iter()
            .map(|c| c.schema())
            .find(|s| s.name() == name)
    }

    /// Records compiled for the schema called `name`.
    pub fn records(&self, name: &str) -> Option<&[Record]> {
        self.compiled.get(name).map(Vec::as_slice)
    }

    /// Flag that stops compilation at the next line boundary once set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Compile every registered file under `pbs_dir`, in order.
    ///
    /// Each file's section names become an entity set in the registry
    /// before the next file is read. The first error stops compilation.
    pub fn compile_all(&mut self, pbs_dir: &Path) -> Result<Vec<CompiledFile>, CompileError> {
        self.compile_while(pbs_dir, |_| true)
    }

    /// Compile only the files ordered before the schema called `name`.
    ///
    /// Used to fill the registry with the entity sets a single file needs
    /// before that file is decoded on its own.
    pub fn compile_before(
        &mut self,
        pbs_dir: &Path,
        name: &str,
    ) -> Result<Vec<CompiledFile>, CompileError> {
        if self.schema(name).is_none() {
            return Err(CompileError::UnknownSchema(name.to_string()));
        }
        self.compile_while(pbs_dir, |schema| schema.name() != name)
    }

    fn compile_while<P>(
        &mut self,
        pbs_dir: &Path,
        mut keep_going: P,
    ) -> Result<Vec<CompiledFile>, CompileError>
    where
        P: FnMut(&Schema) -> bool,
    {
        let mut summary = Vec::with_capacity(self.compilers.len());

        for compiler in &self.compilers {
            if !keep_going(compiler.schema()) {
                break;
            }
            if self.cancel.load(Ordering::Relaxed) {
                return Err(CompileError::Cancelled);
            }

            let (file, records) =
                compile_file(compiler.as_ref(), &mut self.registry, &self.cancel, pbs_dir)?;
            if let Some(records) = records {
                self.compiled.insert(file.name.clone(), records);
            }
            summary.push(file);
        }

        Ok(summary)
    }

    /// Regenerate every compiled file under `pbs_dir`.
    ///
    /// Optional files that do not exist on disk are left alone.
    pub fn write_all(&self, pbs_dir: &Path, backup: bool) -> Result<Vec<PathBuf>, CompileError> {
        let mut written = Vec::new();
        for compiler in &self.compilers {
            let schema = compiler.schema();
            let Some(records) = self.compiled.get(schema.name()) else {
                continue;
            };
            let path = pbs_dir.join(compiler.file_name());
            if schema.is_optional() && !path.exists() {
                continue;
            }

            let action = |w: &mut std::io::BufWriter<std::fs::File>| write_pbs(records, schema, w);
            if backup {
                write_file_with_backup(&path, action)?;
            } else {
                write_file(&path, action)?;
            }
            log::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Read, validate and register one file.
fn compile_file(
    compiler: &dyn PbsCompiler,
    registry: &mut EnumRegistry,
    cancel: &Arc<AtomicBool>,
    pbs_dir: &Path,
) -> Result<(CompiledFile, Option<Vec<Record>>), CompileError> {
    let schema = compiler.schema();
    let path = pbs_dir.join(compiler.file_name());
    schema.check_references(registry)?;

    let records = {
        let caster = Caster::new(registry);
        match open_file(&path, schema, caster)? {
            Some(reader) => reader
                .with_cancel(Arc::clone(cancel))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| match e {
                    PbsError::Cancelled => CompileError::Cancelled,
                    other => other.into(),
                })?,
            None => {
                let file = CompiledFile {
                    name: schema.name().to_string(),
                    path,
                    records: 0,
                    skipped: true,
                };
                return Ok((file, None));
            }
        }
    };

    let label = path.display().to_string();
    for record in &records {
        compiler.validate_record(record).map_err(|message| {
            CompileError::validation(&label, format!("section {}: {message}", record.section))
        })?;
    }
    compiler
        .validate_all(&records)
        .map_err(|message| CompileError::validation(&label, message))?;

    if let Some((name, strategy)) = compiler.entity() {
        let mut set = EntitySet::new(name, strategy);
        for record in &records {
            let key = strategy.convert(&record.section).map_err(|message| {
                CompileError::validation(&label, format!("section {}: {message}", record.section))
            })?;
            set.insert(key);
        }
        log::debug!("Registered {} {} keys", set.len(), name);
        registry.register_entities(name, Arc::new(set));
    }

    log::info!("Compiled {} records from {}", records.len(), label);
    let file = CompiledFile {
        name: schema.name().to_string(),
        path,
        records: records.len(),
        skipped: false,
    };
    Ok((file, Some(records)))
}

#[cfg(test)]
#[path = "tests/compiler_tests.rs"]
mod tests;
