//! Reading MARC records from binary streams.
//!
//! This module provides [`decode_record`] for parsing one ISO 2709 record
//! from bytes, and [`MarcReader`] for lazily stepping through a stream of
//! records from any source implementing [`std::io::Read`].
//!
//! # Examples
//!
//! Reading records from a file:
//!
//! ```no_run
//! use marclint::MarcReader;
//! use std::fs::File;
//!
//! let file = File::open("records.mrc")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("Title: {:?}", record.title());
//! }
//! # Ok::<(), marclint::MarcError>(())
//! ```

use crate::encoding::{decode_bytes, MarcEncoding};
use crate::error::{MarcError, Result};
use crate::record::{ControlField, DataField, Field, Record, Tag};
use crate::sanitize::unescape_entities;
use crate::Leader;
use std::io::Read;

pub(crate) const SUBFIELD_MARKER: u8 = 0x1F;
pub(crate) const END_OF_FIELD: u8 = 0x1E;
pub(crate) const END_OF_RECORD: u8 = 0x1D;

/// Position and size data for one directory entry.
///
/// Each entry is 12 bytes: a 3-byte tag, a 4-byte field length (including
/// the trailing end-of-field byte), and a 5-byte offset from the base
/// address.
#[derive(Debug)]
struct DirectoryEntry {
    tag: Tag,
    length: Option<usize>,
    offset: Option<usize>,
}

impl DirectoryEntry {
    fn new(bytes: &[u8]) -> Self {
        DirectoryEntry {
            tag: Tag::new(&String::from_utf8_lossy(&bytes[0..3])),
            length: parse_usize(&bytes[3..7]),
            offset: parse_usize(&bytes[7..12]),
        }
    }
}

/// Decode one record from its full byte representation.
///
/// Field bodies are located by splitting the field area on the end-of-field
/// byte; the directory is parsed alongside and cross-checked, with
/// disagreements collected as decode warnings on the record rather than
/// failing the decode.
///
/// # Errors
///
/// Fatal conditions per record: a missing or non-numeric length prefix, a
/// short leader, a zero or out-of-range base address, and a decode that
/// attaches no fields at all.
pub fn decode_record(bytes: &[u8], encoding: MarcEncoding) -> Result<Record> {
    let leader = Leader::from_bytes(bytes)?;
    let record_length = leader.record_length as usize;
    let base_address = leader.base_address as usize;

    if base_address >= record_length {
        return Err(MarcError::BaseAddressLength(format!(
            "base address {base_address} is not below record length {record_length}"
        )));
    }

    let mut record = Record::new(leader);

    // Directory occupies [24 .. base), with its final byte an end-of-field.
    let directory_end = (base_address - 1).min(bytes.len());
    let directory = if directory_end > 24 {
        &bytes[24..directory_end]
    } else {
        &[]
    };
    let mut entries: Vec<DirectoryEntry> = directory
        .chunks_exact(12)
        .map(DirectoryEntry::new)
        .collect();
    if !directory.chunks_exact(12).remainder().is_empty() {
        record.push_decode_warning(format!(
            "directory length {} is not a multiple of 12",
            directory.len()
        ));
    }

    // Field bodies sit in [base .. record_length - 2), separated by
    // end-of-field bytes; the byte at record_length - 2 is the final
    // end-of-field and record_length - 1 the end-of-record.
    let area_end = record_length.saturating_sub(2).min(bytes.len());
    let field_area = if area_end > base_address {
        &bytes[base_address..area_end]
    } else {
        &[]
    };
    let bodies: Vec<&[u8]> = field_area.split(|&b| b == END_OF_FIELD).collect();

    if bodies.len() != entries.len() {
        record.push_decode_warning(format!(
            "directory has {} entries but the field area holds {} fields",
            entries.len(),
            bodies.len()
        ));
    }

    for (entry, body) in entries.drain(..).zip(bodies) {
        if let Some(length) = entry.length {
            if length != body.len() + 1 {
                record.push_decode_warning(format!(
                    "field {} length {} does not match its body ({} bytes)",
                    entry.tag,
                    length,
                    body.len() + 1
                ));
            }
        }
        if entry.offset.is_none() {
            record.push_decode_warning(format!(
                "field {} has a non-numeric directory offset",
                entry.tag
            ));
        }

        match entry.tag.numeric_value() {
            Some(n) if n < 10 => {
                let data = String::from_utf8_lossy(body).to_string();
                record.insert_field(Field::Control(ControlField { tag: entry.tag, data }));
            },
            _ if entry.tag.is_control() => {
                // Aleph system tags carry no record content.
            },
            _ => {
                if let Some(field) = parse_data_field(entry.tag, body, encoding, &mut record) {
                    record.insert_field(Field::Data(field));
                }
            },
        }
    }

    if record.fields().is_empty() {
        return Err(MarcError::NoFields);
    }
    Ok(record)
}

/// Parse a data field body: two indicator bytes, then subfields split on the
/// subfield marker. The chunk before the first marker is the indicator
/// prefix and is discarded; empty chunks are skipped.
fn parse_data_field(
    tag: Tag,
    body: &[u8],
    encoding: MarcEncoding,
    record: &mut Record,
) -> Option<DataField> {
    if body.len() < 2 {
        record.push_decode_warning(format!("field {tag} is too short to hold indicators"));
        return None;
    }

    let mut field = DataField::new(tag, body[0] as char, body[1] as char);
    for chunk in body.split(|&b| b == SUBFIELD_MARKER).skip(1) {
        if chunk.is_empty() {
            continue;
        }
        let code_byte = chunk[0];
        if !code_byte.is_ascii() {
            record.push_decode_warning(format!(
                "field {} has a non-ASCII subfield code byte 0x{code_byte:02X}",
                field.tag
            ));
            continue;
        }
        match decode_bytes(&chunk[1..], encoding) {
            Ok(value) => field.add_subfield(code_byte as char, unescape_entities(&value)),
            Err(e) => {
                record.push_decode_warning(format!(
                    "field {} subfield {}: {e}",
                    field.tag, code_byte as char
                ));
            },
        }
    }
    Some(field)
}

fn parse_usize(bytes: &[u8]) -> Option<usize> {
    let mut result = 0usize;
    for &byte in bytes {
        if byte.is_ascii_digit() {
            result = result * 10 + (byte - b'0') as usize;
        } else {
            return None;
        }
    }
    Some(result)
}

/// Reader for ISO 2709 binary MARC format.
///
/// `MarcReader` reads one record at a time from any source implementing
/// [`std::io::Read`]. Each step reads the 5-byte length prefix, then the
/// remainder of the record, then decodes. End of stream is reached when the
/// prefix read returns no bytes.
///
/// # Examples
///
/// ```
/// use marclint::MarcReader;
/// use std::io::Cursor;
///
/// let mut reader = MarcReader::new(Cursor::new(Vec::new()));
/// assert!(reader.read_record().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct MarcReader<R: Read> {
    reader: R,
    encoding: MarcEncoding,
    records_read: usize,
}

impl<R: Read> MarcReader<R> {
    /// Create a new MARC reader decoding field bodies as UTF-8.
    pub fn new(reader: R) -> Self {
        MarcReader {
            reader,
            encoding: MarcEncoding::Utf8,
            records_read: 0,
        }
    }

    /// Use the given character decoder for subfield values.
    #[must_use]
    pub fn with_encoding(mut self, encoding: MarcEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Number of records read so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read a single record.
    ///
    /// Returns `Ok(Some(record))` on success and `Ok(None)` at end of
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the length prefix is malformed, the stream ends
    /// mid-record, or the record fails to decode.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let mut prefix = [0u8; 5];
        let mut filled = 0;
        while filled < prefix.len() {
            match self.reader.read(&mut prefix[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {},
                Err(e) => return Err(MarcError::Io(e)),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < prefix.len() {
            return Err(MarcError::RecordLength(format!(
                "stream ended after {filled} bytes of the length prefix"
            )));
        }

        let prefix_str = String::from_utf8_lossy(&prefix).to_string();
        let record_length: usize = prefix_str
            .parse()
            .map_err(|_| MarcError::RecordLength(prefix_str.clone()))?;
        if record_length < 24 {
            return Err(MarcError::RecordLength(format!(
                "declared length {record_length} is below the leader size"
            )));
        }

        let mut bytes = vec![0u8; record_length];
        bytes[..5].copy_from_slice(&prefix);
        self.reader.read_exact(&mut bytes[5..])?;

        let record = decode_record(&bytes, self.encoding)?;
        self.records_read += 1;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for MarcReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Count the records in a byte stream by counting end-of-record bytes.
///
/// # Errors
///
/// Returns an error when reading from the stream fails.
pub fn count_records<R: Read>(mut reader: R) -> Result<usize> {
    let mut buffer = [0u8; 8192];
    let mut count = 0;
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(count),
            Ok(n) => count += memchr::memchr_iter(END_OF_RECORD, &buffer[..n]).count(),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {},
            Err(e) => return Err(MarcError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Assemble a record from raw field bodies (without terminators).
    pub(crate) fn build_record_bytes(fields: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut directory = Vec::new();
        let mut area = Vec::new();
        let mut offset = 0usize;
        for (tag, body) in fields {
            let length = body.len() + 1;
            directory.extend_from_slice(format!("{tag:>3}{length:04}{offset:05}").as_bytes());
            area.extend_from_slice(body);
            area.push(END_OF_FIELD);
            offset += length;
        }
        directory.push(END_OF_FIELD);

        let base_address = 24 + directory.len();
        let record_length = base_address + area.len() + 1;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(format!("{record_length:05}").as_bytes());
        bytes.extend_from_slice(b"nam a22");
        bytes.extend_from_slice(format!("{base_address:05}").as_bytes());
        bytes.extend_from_slice(b" a 4500");
        bytes.extend_from_slice(&directory);
        bytes.extend_from_slice(&area);
        bytes.push(END_OF_RECORD);
        bytes
    }

    #[test]
    fn decodes_a_minimal_control_field_record() {
        let bytes = build_record_bytes(&[("001", b"ab12345".to_vec())]);
        let record = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        assert_eq!(record.fields().len(), 1);
        let field = record.first("001").unwrap().as_control().unwrap();
        assert_eq!(field.data, "ab12345");
        assert!(record.decode_warnings().is_empty());
    }

    #[test]
    fn decodes_indicators_and_subfields() {
        let mut body = b"10".to_vec();
        body.push(SUBFIELD_MARKER);
        body.extend_from_slice(b"aTitle");
        body.push(SUBFIELD_MARKER);
        body.extend_from_slice(b"bsubtitle");
        let bytes = build_record_bytes(&[("245", body)]);

        let record = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        let field = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.indicator2, '0');
        assert_eq!(field.get_subfield('a'), Some("Title"));
        assert_eq!(field.get_subfield('b'), Some("subtitle"));
    }

    #[test]
    fn bad_base_address_is_fatal() {
        let mut bytes = build_record_bytes(&[("001", b"x".to_vec())]);
        bytes[12..17].copy_from_slice(b"00000");
        let err = decode_record(&bytes, MarcEncoding::Utf8).unwrap_err();
        assert!(matches!(err, MarcError::BaseAddress(_)));
    }

    #[test]
    fn base_address_beyond_record_length_is_fatal() {
        let mut bytes = build_record_bytes(&[("001", b"x".to_vec())]);
        bytes[12..17].copy_from_slice(b"99999");
        let err = decode_record(&bytes, MarcEncoding::Utf8).unwrap_err();
        assert!(matches!(err, MarcError::BaseAddressLength(_)));
    }

    #[test]
    fn record_without_fields_is_fatal() {
        // Directory holds one Aleph system tag, which is dropped.
        let bytes = build_record_bytes(&[("FMT", b"BK".to_vec())]);
        let err = decode_record(&bytes, MarcEncoding::Utf8).unwrap_err();
        assert!(matches!(err, MarcError::NoFields));
    }

    #[test]
    fn directory_mismatch_is_a_warning_not_an_error() {
        let mut bytes = build_record_bytes(&[("001", b"ab12345".to_vec())]);
        // Graft a second directory entry without a matching body.
        let extra = b"00500080000";
        let insert_at = 24 + 12;
        for (i, b) in extra.iter().enumerate() {
            bytes.insert(insert_at + i, *b);
        }
        bytes.insert(insert_at + extra.len(), b'0');
        // Fix up base address and record length for the 12 added bytes.
        let record_length: usize =
            String::from_utf8_lossy(&bytes[0..5]).parse::<usize>().unwrap() + 12;
        let base: usize = String::from_utf8_lossy(&bytes[12..17]).parse::<usize>().unwrap() + 12;
        bytes.splice(0..5, format!("{record_length:05}").bytes());
        bytes.splice(12..17, format!("{base:05}").bytes());

        let record = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        assert!(!record.decode_warnings().is_empty());
        assert!(record.contains("001"));
    }

    #[test]
    fn undecodable_subfield_is_skipped_with_warning() {
        let mut body = b"10".to_vec();
        body.push(SUBFIELD_MARKER);
        body.extend_from_slice(b"aGood");
        body.push(SUBFIELD_MARKER);
        body.push(b'b');
        body.extend_from_slice(&[0xC3, 0x28]);
        let bytes = build_record_bytes(&[("245", body)]);

        let record = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        let field = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(field.get_subfield('a'), Some("Good"));
        assert_eq!(field.get_subfield('b'), None);
        assert!(record
            .decode_warnings()
            .iter()
            .any(|w| w.contains("subfield b")));
    }

    #[test]
    fn marc8_values_are_transliterated() {
        let mut body = b"10".to_vec();
        body.push(SUBFIELD_MARKER);
        body.push(b'a');
        body.extend_from_slice(&[b'd', 0xE2, b'e']);
        let bytes = build_record_bytes(&[("245", body)]);

        let record = decode_record(&bytes, MarcEncoding::Marc8).unwrap();
        let field = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(field.get_subfield('a'), Some("de\u{301}"));
    }

    #[test]
    fn entities_are_unescaped() {
        let mut body = b"10".to_vec();
        body.push(SUBFIELD_MARKER);
        body.extend_from_slice(b"aDombey &amp; Son");
        let bytes = build_record_bytes(&[("245", body)]);

        let record = decode_record(&bytes, MarcEncoding::Utf8).unwrap();
        let field = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(field.get_subfield('a'), Some("Dombey & Son"));
    }

    #[test]
    fn reader_yields_records_then_none() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&build_record_bytes(&[("001", b"first".to_vec())]));
        stream.extend_from_slice(&build_record_bytes(&[("001", b"second".to_vec())]));

        let mut reader = MarcReader::new(Cursor::new(stream));
        let first = reader.read_record().unwrap().unwrap();
        assert_eq!(first.control_number(), Some("first"));
        let second = reader.read_record().unwrap().unwrap();
        assert_eq!(second.control_number(), Some("second"));
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn reader_iterator_adapter() {
        let mut stream = Vec::new();
        for _ in 0..3 {
            stream.extend_from_slice(&build_record_bytes(&[("001", b"x".to_vec())]));
        }
        let reader = MarcReader::new(Cursor::new(stream));
        assert_eq!(reader.count(), 3);
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let mut stream = build_record_bytes(&[("001", b"ab12345".to_vec())]);
        stream.truncate(stream.len() - 4);
        let mut reader = MarcReader::new(Cursor::new(stream));
        assert!(reader.read_record().is_err());
    }

    #[test]
    fn count_records_counts_terminators() {
        let mut stream = Vec::new();
        for _ in 0..4 {
            stream.extend_from_slice(&build_record_bytes(&[("001", b"x".to_vec())]));
        }
        assert_eq!(count_records(Cursor::new(&stream)).unwrap(), 4);
        assert_eq!(count_records(Cursor::new(Vec::new())).unwrap(), 0);
    }
}
