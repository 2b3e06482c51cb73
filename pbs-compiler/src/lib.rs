//! Multi-file compilation of PBS data: schema loading, ordered compilation
//! with entity registration, backup-safe rewriting and shared settings.

pub mod backup;
pub mod compiler;
pub mod error;
pub mod schema_file;
pub mod settings;

pub use backup::{backup_path, write_file_with_backup};
pub use compiler::{CompiledFile, CompilerService, PbsCompiler, SchemaCompiler};
pub use error::CompileError;
pub use schema_file::{SchemaFile, SchemaSet, load_schema_dir, parse_enums};
pub use settings::{Settings, load_settings_string, settings_path};
