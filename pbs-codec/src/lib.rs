//! Text codec for PBS files.
//!
//! Reading goes line source → [`SectionReader`] → [`assemble`] per key →
//! [`Record`]; writing goes back through [`write_fields`] and [`write_pbs`].
//! Everything is driven by a [`pbs_core::Schema`] supplied by the caller.

pub mod cast;
pub mod error;
pub mod file;
pub mod provenance;
pub mod record;
pub mod section;
pub mod text;
pub mod tokenizer;
pub mod writer;

pub use cast::Caster;
pub use error::{CastError, FieldError, PbsError};
pub use file::{
    FILE_HEADER, Record, RecordReader, SECTION_SEPARATOR, decode_section, open_file, read_file,
    write_pbs,
};
pub use provenance::Provenance;
pub use record::assemble;
pub use section::{KeyValueLine, Section, SectionEntry, SectionReader};
pub use text::{csv_quote, prep_line};
pub use tokenizer::{Token, tokenize, tokenize_spanned};
pub use writer::{format_record, write_fields};
