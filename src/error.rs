//! Error types for MARC operations.
//!
//! This module provides the [`MarcError`] type for all MARC library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all MARC library operations.
///
/// Fatal decode errors abort the record they occur in and are propagated to
/// the caller; recoverable conditions (directory mismatches, undecodable
/// subfields) are collected on the record as decode warnings instead.
#[derive(Error, Debug)]
pub enum MarcError {
    /// The 5-byte record length prefix is missing or non-numeric.
    #[error("Invalid record length: {0}")]
    RecordLength(String),

    /// The leader is not a well-formed 24-byte ASCII block.
    #[error("Invalid leader: {0}")]
    Leader(String),

    /// The base address of data is zero or non-numeric.
    #[error("Invalid base address: {0}")]
    BaseAddress(String),

    /// The base address of data lies at or beyond the record length.
    #[error("Base address out of range: {0}")]
    BaseAddressLength(String),

    /// Decoding finished without attaching a single field.
    #[error("Record contains no fields")]
    NoFields,

    /// A field removal named a tag that is not present.
    #[error("Field {0} not found")]
    FieldNotFound(String),

    /// A value could not be decoded with the configured character decoder.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A field body or offset exceeds the fixed-width directory arithmetic.
    #[error("Record too large: {0}")]
    Oversize(String),

    /// The writer was used after [`finish`](crate::writer::MarcWriter::finish).
    #[error("Writer is finished: {0}")]
    WriterFinished(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;
