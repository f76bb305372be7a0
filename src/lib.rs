#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # marclint
//!
//! A Rust library for reading, writing, and validating MARC21 bibliographic
//! records in the ISO 2709 binary interchange format.
//!
//! ## Quick Start
//!
//! ### Reading MARC records
//!
//! ```no_run
//! use marclint::MarcReader;
//! use std::fs::File;
//!
//! # fn main() -> marclint::Result<()> {
//! let file = File::open("records.mrc")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(record) = reader.read_record()? {
//!     if let Some(title) = record.title() {
//!         println!("Title: {title}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Creating, validating, and writing records
//!
//! ```
//! use marclint::{DataField, Field, Leader, MarcWriter, Record, Tag};
//!
//! # fn main() -> marclint::Result<()> {
//! let mut record = Record::new(Leader::default());
//! record.add_control_field("001", "123456789");
//!
//! let mut field = DataField::new(Tag::new("245"), '1', '0');
//! field.add_subfield('a', "Test Title");
//! record.insert_field(Field::Data(field));
//!
//! if !record.validate() {
//!     for (category, diagnostic) in record.diagnostics().unwrap().iter() {
//!         println!("[{category}] {}: {}", diagnostic.tag, diagnostic.message);
//!     }
//! }
//!
//! let mut buffer = Vec::new();
//! let mut writer = MarcWriter::new(&mut buffer);
//! writer.write_record(&record)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] — Core record structures (`Record`, `Field`, `Subfield`)
//! - [`leader`] — The 24-byte record leader
//! - [`reader`] — Decoding ISO 2709 bytes and streaming records
//! - [`writer`] — Encoding records back to ISO 2709 bytes
//! - [`breaker`] — The two line-oriented text serializations
//! - [`schema`] — The static MARC21 rule catalogue
//! - [`validate`] — The validation engine and its diagnostics
//! - [`encoding`] — UTF-8 and MARC-8 character decoding
//! - [`sanitize`] — Free-text normalization
//! - [`error`] — Error types

pub mod breaker;
pub mod encoding;
pub mod error;
pub mod leader;
pub mod marc8;
pub mod reader;
/// Core record structures (`Record`, `Field`, `Subfield`, `Tag`).
pub mod record;
pub mod sanitize;
pub mod schema;
pub mod validate;
pub mod writer;

pub use encoding::MarcEncoding;
pub use error::{MarcError, Result};
pub use leader::Leader;
pub use reader::{count_records, decode_record, MarcReader};
pub use record::{
    ControlField, DataField, Field, Record, SourceFormat, Subfield, Tag, ALEPH_CONTROL_FIELDS,
};
pub use sanitize::{clean, unescape_entities};
pub use validate::{validate, Category, Diagnostic, DiagnosticSet, Severity};
pub use writer::{encode_record, MarcWriter};
