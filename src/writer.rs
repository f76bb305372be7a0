//! Writing MARC records to binary format.
//!
//! [`encode_record`] serializes a [`Record`] to its ISO 2709 byte form;
//! [`MarcWriter`] writes records one at a time to any destination
//! implementing [`std::io::Write`].
//!
//! # Examples
//!
//! ```
//! use marclint::{Leader, MarcWriter, Record};
//!
//! let mut record = Record::new(Leader::default());
//! record.add_control_field("001", "12345");
//!
//! let mut buffer = Vec::new();
//! let mut writer = MarcWriter::new(&mut buffer);
//! writer.write_record(&record)?;
//! writer.finish()?;
//! # Ok::<(), marclint::MarcError>(())
//! ```

use crate::error::{MarcError, Result};
use crate::reader::{END_OF_FIELD, END_OF_RECORD, SUBFIELD_MARKER};
use crate::record::{Field, Record};
use std::io::Write;

/// Serialize a record to ISO 2709 bytes.
///
/// Field bodies are emitted in record order; the directory is rebuilt with
/// 4-digit lengths and 5-digit running offsets, and the leader is rewritten
/// with the recomputed record length and base address plus the fixed
/// `22` / `4500` positions. Everything else in the leader is preserved.
///
/// # Errors
///
/// Returns [`MarcError::Oversize`] when a field body exceeds 9999 bytes or
/// an offset or the total length exceeds 99999.
pub fn encode_record(record: &Record) -> Result<Vec<u8>> {
    let mut directory = Vec::new();
    let mut area = Vec::new();
    let mut offset = 0usize;

    for field in record.fields() {
        let body = field_body(field);
        let length = body.len() + 1;
        if length > 9999 {
            return Err(MarcError::Oversize(format!(
                "field {} body is {length} bytes",
                field.tag()
            )));
        }
        if offset > 99999 {
            return Err(MarcError::Oversize(format!(
                "field {} starts at offset {offset}",
                field.tag()
            )));
        }
        directory.extend_from_slice(field.tag().as_str().as_bytes());
        directory.extend_from_slice(format!("{length:04}{offset:05}").as_bytes());
        area.extend_from_slice(&body);
        area.push(END_OF_FIELD);
        offset += length;
    }
    directory.push(END_OF_FIELD);

    let base_address = 24 + directory.len();
    let record_length = base_address + area.len() + 1;
    if record_length > 99999 {
        return Err(MarcError::Oversize(format!(
            "record is {record_length} bytes"
        )));
    }

    #[allow(clippy::cast_possible_truncation)]
    let leader = record
        .leader
        .for_output(record_length as u32, base_address as u32);

    let mut bytes = Vec::with_capacity(record_length);
    bytes.extend_from_slice(&leader.as_bytes());
    bytes.extend_from_slice(&directory);
    bytes.extend_from_slice(&area);
    bytes.push(END_OF_RECORD);
    Ok(bytes)
}

fn field_body(field: &Field) -> Vec<u8> {
    match field {
        Field::Control(f) => f.data.as_bytes().to_vec(),
        Field::Data(f) => {
            let mut body = Vec::new();
            body.push(f.indicator1 as u8);
            body.push(f.indicator2 as u8);
            for subfield in &f.subfields {
                body.push(SUBFIELD_MARKER);
                body.push(subfield.code as u8);
                body.extend_from_slice(subfield.value.as_bytes());
            }
            body
        },
    }
}

/// Writer for ISO 2709 binary MARC format.
///
/// Records are written one at a time to any destination implementing
/// [`std::io::Write`]. After [`finish`](MarcWriter::finish) the writer is
/// sealed and refuses further records.
#[derive(Debug)]
pub struct MarcWriter<W: Write> {
    writer: W,
    records_written: usize,
    finished: bool,
}

impl<W: Write> MarcWriter<W> {
    /// Create a new MARC writer.
    pub fn new(writer: W) -> Self {
        MarcWriter {
            writer,
            records_written: 0,
            finished: false,
        }
    }

    /// Serialize one record and write it to the underlying destination.
    ///
    /// # Errors
    ///
    /// Returns an error when the record exceeds the directory arithmetic,
    /// the writer is already finished, or the underlying write fails.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.finished {
            return Err(MarcError::WriterFinished(
                "cannot write after finish".to_string(),
            ));
        }
        let bytes = encode_record(record)?;
        self.writer.write_all(&bytes)?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush the destination and seal the writer.
    ///
    /// # Errors
    ///
    /// Returns an error when flushing the underlying writer fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::MarcEncoding;
    use crate::leader::Leader;
    use crate::reader::{decode_record, MarcReader};
    use crate::record::{DataField, Tag};
    use std::io::Cursor;

    fn title_record() -> Record {
        let mut record = Record::new(Leader::default());
        record.add_control_field("001", "12345");
        let mut field = DataField::new(Tag::new("245"), '1', '0');
        field.add_subfield('a', "Test title");
        field.add_subfield('c', "Author");
        record.insert_field(Field::Data(field));
        record
    }

    #[test]
    fn leader_arithmetic_is_consistent() {
        let bytes = encode_record(&title_record()).unwrap();
        let total: usize = String::from_utf8_lossy(&bytes[0..5]).parse().unwrap();
        assert_eq!(total, bytes.len());
        let base: usize = String::from_utf8_lossy(&bytes[12..17]).parse().unwrap();
        // Two directory entries of 12 bytes plus the terminator.
        assert_eq!(base, 24 + 2 * 12 + 1);
        assert_eq!(bytes[base - 1], END_OF_FIELD);
        assert_eq!(*bytes.last().unwrap(), END_OF_RECORD);
    }

    #[test]
    fn directory_offsets_point_at_bodies() {
        let bytes = encode_record(&title_record()).unwrap();
        let base: usize = String::from_utf8_lossy(&bytes[12..17]).parse().unwrap();
        let mut pos = 24;
        while bytes[pos] != END_OF_FIELD {
            let length: usize = String::from_utf8_lossy(&bytes[pos + 3..pos + 7])
                .parse()
                .unwrap();
            let offset: usize = String::from_utf8_lossy(&bytes[pos + 7..pos + 12])
                .parse()
                .unwrap();
            assert_eq!(bytes[base + offset + length - 1], END_OF_FIELD);
            pos += 12;
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let record = title_record();
        let bytes = encode_record(&record).unwrap();
        let decoded = decode_record(&bytes, MarcEncoding::Utf8).unwrap();

        assert_eq!(decoded.control_number(), Some("12345"));
        let field = decoded.first("245").unwrap().as_data().unwrap();
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.indicator2, '0');
        assert_eq!(field.get_subfield('a'), Some("Test title"));
        assert_eq!(field.get_subfield('c'), Some("Author"));
    }

    #[test]
    fn reencoding_a_decoded_record_is_byte_identical() {
        let bytes = encode_record(&title_record()).unwrap();
        let decoded = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        let reencoded = encode_record(&decoded).unwrap();
        assert_eq!(bytes, reencoded);
    }

    #[test]
    fn oversized_field_is_rejected() {
        let mut record = Record::new(Leader::default());
        let mut field = DataField::new(Tag::new("500"), ' ', ' ');
        field.add_subfield('a', "x".repeat(10_000));
        record.insert_field(Field::Data(field));
        let err = encode_record(&record).unwrap_err();
        assert!(matches!(err, MarcError::Oversize(_)));
    }

    #[test]
    fn writer_counts_and_seals() {
        let record = title_record();
        let mut buffer = Vec::new();
        {
            let mut writer = MarcWriter::new(&mut buffer);
            writer.write_record(&record).unwrap();
            writer.write_record(&record).unwrap();
            assert_eq!(writer.records_written(), 2);
            writer.finish().unwrap();
            assert!(writer.write_record(&record).is_err());
        }

        let mut reader = MarcReader::new(Cursor::new(buffer));
        assert!(reader.read_record().unwrap().is_some());
        assert!(reader.read_record().unwrap().is_some());
        assert!(reader.read_record().unwrap().is_none());
    }
}
