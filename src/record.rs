//! MARC bibliographic record structures and operations.
//!
//! This module provides the core record types:
//! - [`Record`] — leader plus an ordered field list
//! - [`Field`] — either a [`ControlField`] (tags below `010`) or a
//!   [`DataField`] (indicators and subfields)
//! - [`Subfield`] — a `(code, value)` pair within a data field
//! - [`Tag`] — the 3-character field identifier
//!
//! Fields are held in a single ordered list. Inserting a numeric-tag field
//! places it before the first field whose tag is non-numeric or numerically
//! greater, so numeric tags stay in ascending order while non-numeric tags
//! accumulate at the tail in insertion order.
//!
//! # Examples
//!
//! ```
//! use marclint::{DataField, Field, Leader, Record, Tag};
//!
//! let mut record = Record::new(Leader::default());
//! record.add_control_field("001", "12345");
//!
//! let mut field = DataField::new(Tag::new("245"), '1', '0');
//! field.add_subfield('a', "Test Title");
//! record.insert_field(Field::Data(field));
//!
//! assert_eq!(record.title(), Some("Test Title"));
//! ```

use crate::leader::Leader;
use crate::validate::DiagnosticSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Alphabetic tags generated by the Aleph library system.
///
/// Fields carrying these tags are system bookkeeping rather than record
/// content: the binary decoder drops them and the line-form parsers ignore
/// them. Local alphabetic tags that *are* record content (`WII`, `CAT`, ...)
/// have schema entries instead and are kept.
pub const ALEPH_CONTROL_FIELDS: [&str; 3] = ["FMT", "SYS", "LDR"];

/// Indicator characters that stand in for a blank in various inputs.
const BLANK_SENTINELS: [char; 6] = ['#', '.', '^', '\u{1C}', '\u{1E}', '\u{1F}'];

/// A 3-character field tag, left-padded with spaces.
///
/// Comparison is lexicographic over the three characters. A tag is *numeric*
/// iff all three characters are decimal digits; numeric tags below `010`
/// identify control fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    /// Create a tag, left-padding to 3 characters with spaces.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Tag(format!("{tag:>3}"))
    }

    /// The tag as a 3-character string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff all three characters are decimal digits.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.0.len() == 3 && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// The numeric value of the tag, if it is numeric.
    #[must_use]
    pub fn numeric_value(&self) -> Option<u16> {
        if self.is_numeric() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// True for tags that name a control field: numeric tags below `010`
    /// and the Aleph alphabetic allow-list.
    #[must_use]
    pub fn is_control(&self) -> bool {
        match self.numeric_value() {
            Some(n) => n < 10,
            None => ALEPH_CONTROL_FIELDS.contains(&self.0.as_str()),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A subfield within a data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

/// A control field: raw text under a tag below `010`, no indicators or
/// subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlField {
    /// Field tag
    pub tag: Tag,
    /// Field content
    pub data: String,
}

impl ControlField {
    /// Create a control field.
    #[must_use]
    pub fn new(tag: Tag, data: &str) -> Self {
        ControlField {
            tag,
            data: data.to_string(),
        }
    }

    /// The field content with spaces displayed as `#`.
    #[must_use]
    pub fn text(&self) -> String {
        self.data.replace(' ', "#")
    }
}

/// A data field: two indicators followed by one or more subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataField {
    /// Field tag
    pub tag: Tag,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields in field order (`SmallVec` avoids allocation for typical
    /// fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

impl DataField {
    /// Create a data field. Indicator blank sentinels (`#`, `.`, `^` and the
    /// record delimiter bytes) are normalized to a space.
    #[must_use]
    pub fn new(tag: Tag, indicator1: char, indicator2: char) -> Self {
        DataField {
            tag,
            indicator1: normalize_indicator(indicator1),
            indicator2: normalize_indicator(indicator2),
            subfields: SmallVec::new(),
        }
    }

    /// Append a subfield.
    pub fn add_subfield(&mut self, code: char, value: impl Into<String>) {
        self.subfields.push(Subfield {
            code,
            value: value.into(),
        });
    }

    /// First value for the given code, if present.
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Values in subfield order. An empty `codes` string selects every
    /// subfield; otherwise only subfields whose code appears in `codes`.
    #[must_use]
    pub fn get_subfields(&self, codes: &str) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| codes.is_empty() || codes.contains(sf.code))
            .map(|sf| sf.value.as_str())
            .collect()
    }

    /// The subfield codes concatenated in field order.
    #[must_use]
    pub fn subfield_codes(&self) -> String {
        self.subfields.iter().map(|sf| sf.code).collect()
    }

    /// Space-joined subfield values, filtered by `codes` when non-empty.
    #[must_use]
    pub fn text(&self, codes: &str) -> String {
        self.get_subfields(codes).join(" ")
    }
}

/// Normalize an indicator character: blank sentinels become a space.
#[must_use]
pub fn normalize_indicator(c: char) -> char {
    if BLANK_SENTINELS.contains(&c) {
        ' '
    } else {
        c
    }
}

/// A field of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// Control field (tags 001-009 and the Aleph allow-list)
    Control(ControlField),
    /// Data field (tags 010 and up)
    Data(DataField),
}

impl Field {
    /// The field's tag.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        match self {
            Field::Control(f) => &f.tag,
            Field::Data(f) => &f.tag,
        }
    }

    /// Free-text rendering of the field content.
    ///
    /// For data fields this is the space-joined subfield values (all of them
    /// when `codes` is empty, else only matching codes). For control fields it
    /// is the raw data with spaces displayed as `#`.
    #[must_use]
    pub fn text(&self, codes: &str) -> String {
        match self {
            Field::Control(f) => f.text(),
            Field::Data(f) => f.text(codes),
        }
    }

    /// The data field, if this is one.
    #[must_use]
    pub fn as_data(&self) -> Option<&DataField> {
        match self {
            Field::Data(f) => Some(f),
            Field::Control(_) => None,
        }
    }

    /// The control field, if this is one.
    #[must_use]
    pub fn as_control(&self) -> Option<&ControlField> {
        match self {
            Field::Control(f) => Some(f),
            Field::Data(_) => None,
        }
    }
}

/// Which serialization a record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceFormat {
    /// ISO 2709 binary interchange format
    #[default]
    Binary,
    /// Standard line form (`=TAG  ...`)
    Line,
    /// Aleph MRC line form (`$$` subfield markers)
    Aleph,
}

/// A MARC bibliographic record: leader plus ordered field list.
///
/// The record owns its fields; fields own their subfields. Iteration order is
/// the insertion order subject to the tag-ordered insertion rule, and is
/// stable and deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 bytes)
    pub leader: Leader,
    fields: Vec<Field>,
    source: SourceFormat,
    #[serde(skip)]
    diagnostics: Option<DiagnosticSet>,
    decode_warnings: Vec<String>,
}

impl Record {
    /// Create an empty record with the given leader.
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            fields: Vec::new(),
            source: SourceFormat::Binary,
            diagnostics: None,
            decode_warnings: Vec::new(),
        }
    }

    /// The serialization this record was parsed from.
    #[must_use]
    pub fn source_format(&self) -> SourceFormat {
        self.source
    }

    /// Mark the serialization this record was parsed from.
    pub fn set_source_format(&mut self, source: SourceFormat) {
        self.source = source;
    }

    /// Insert a field at its tag-ordered position.
    ///
    /// A numeric-tag field is inserted before the first field whose tag is
    /// non-numeric or whose numeric tag is strictly greater; non-numeric tags
    /// append unconditionally.
    pub fn insert_field(&mut self, field: Field) {
        if let Some(n) = field.tag().numeric_value() {
            let position = self
                .fields
                .iter()
                .position(|existing| match existing.tag().numeric_value() {
                    None => true,
                    Some(m) => m > n,
                });
            match position {
                Some(i) => self.fields.insert(i, field),
                None => self.fields.push(field),
            }
        } else {
            self.fields.push(field);
        }
    }

    /// Add a control field at its tag-ordered position.
    pub fn add_control_field(&mut self, tag: &str, data: &str) {
        self.insert_field(Field::Control(ControlField::new(Tag::new(tag), data)));
    }

    /// All fields in record order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields whose tag matches any of `tags`, in record order.
    ///
    /// An empty `tags` slice selects every field. The leader is not a field;
    /// use [`Record::leader_text`] for the `LDR` pseudo-tag.
    #[must_use]
    pub fn get_fields(&self, tags: &[&str]) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| tags.is_empty() || tags.iter().any(|t| f.tag() == t))
            .collect()
    }

    /// First field with the given tag.
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag() == &tag)
    }

    /// True iff any field has the given tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.first(tag).is_some()
    }

    /// Remove and return the first field with the given tag.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::FieldNotFound`](crate::MarcError::FieldNotFound)
    /// when no field carries the tag.
    pub fn remove_first(&mut self, tag: &str) -> crate::Result<Field> {
        match self.fields.iter().position(|f| f.tag() == &tag) {
            Some(i) => Ok(self.fields.remove(i)),
            None => Err(crate::MarcError::FieldNotFound(tag.to_string())),
        }
    }

    /// The leader rendered as 24 characters, for the `LDR` pseudo-tag.
    #[must_use]
    pub fn leader_text(&self) -> String {
        self.leader.to_string()
    }

    /// Run the schema checks, store the diagnostic set on the record, and
    /// report whether it came back empty.
    pub fn validate(&mut self) -> bool {
        let diagnostics = crate::validate::validate(self);
        let valid = diagnostics.is_empty();
        self.diagnostics = Some(diagnostics);
        valid
    }

    /// The diagnostic set from the last [`validate`](Record::validate) call.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&DiagnosticSet> {
        self.diagnostics.as_ref()
    }

    /// Warnings collected while decoding (directory mismatches, skipped
    /// subfields). Empty for records built in memory.
    #[must_use]
    pub fn decode_warnings(&self) -> &[String] {
        &self.decode_warnings
    }

    /// Record a non-fatal decode condition.
    pub fn push_decode_warning(&mut self, warning: String) {
        self.decode_warnings.push(warning);
    }

    // ------------------------------------------------------------------
    // Convenience accessors for common bibliographic fields
    // ------------------------------------------------------------------

    /// The main title from field 245, subfield `a`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.first("245")
            .and_then(Field::as_data)
            .and_then(|f| f.get_subfield('a'))
    }

    /// The control number from field 001.
    #[must_use]
    pub fn control_number(&self) -> Option<&str> {
        self.first("001")
            .and_then(Field::as_control)
            .map(|f| f.data.as_str())
    }

    /// All ISBNs from field 020, subfield `a`.
    #[must_use]
    pub fn isbns(&self) -> Vec<&str> {
        self.get_fields(&["020"])
            .into_iter()
            .filter_map(Field::as_data)
            .filter_map(|f| f.get_subfield('a'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_field(tag: &str) -> Field {
        Field::Data(DataField::new(Tag::new(tag), ' ', ' '))
    }

    #[test]
    fn tag_padding_and_numeric() {
        assert_eq!(Tag::new("20").as_str(), " 20");
        assert!(!Tag::new("20").is_numeric());
        assert!(Tag::new("020").is_numeric());
        assert_eq!(Tag::new("245").numeric_value(), Some(245));
        assert!(Tag::new("001").is_control());
        assert!(Tag::new("FMT").is_control());
        assert!(!Tag::new("CAT").is_control());
        assert!(!Tag::new("010").is_control());
    }

    #[test]
    fn numeric_tags_insert_in_ascending_order() {
        let mut record = Record::new(Leader::default());
        for tag in ["650", "245", "100", "500", "020"] {
            record.insert_field(data_field(tag));
        }
        let tags: Vec<&str> = record.fields().iter().map(|f| f.tag().as_str()).collect();
        assert_eq!(tags, ["020", "100", "245", "500", "650"]);
    }

    #[test]
    fn non_numeric_tags_stay_at_the_tail() {
        let mut record = Record::new(Leader::default());
        record.insert_field(data_field("CAT"));
        record.insert_field(data_field("650"));
        record.insert_field(data_field("AQN"));
        record.insert_field(data_field("100"));
        let tags: Vec<&str> = record.fields().iter().map(|f| f.tag().as_str()).collect();
        assert_eq!(tags, ["100", "650", "CAT", "AQN"]);
    }

    #[test]
    fn duplicate_tags_keep_insertion_order() {
        let mut record = Record::new(Leader::default());
        let mut first = DataField::new(Tag::new("650"), ' ', '0');
        first.add_subfield('a', "First");
        let mut second = DataField::new(Tag::new("650"), ' ', '0');
        second.add_subfield('a', "Second");
        record.insert_field(Field::Data(first));
        record.insert_field(Field::Data(second));
        let values: Vec<String> = record
            .get_fields(&["650"])
            .iter()
            .map(|f| f.text("a"))
            .collect();
        assert_eq!(values, ["First", "Second"]);
    }

    #[test]
    fn indicator_sentinels_normalize_to_space() {
        let field = DataField::new(Tag::new("245"), '#', '^');
        assert_eq!(field.indicator1, ' ');
        assert_eq!(field.indicator2, ' ');
        let field = DataField::new(Tag::new("245"), '1', '\u{1F}');
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.indicator2, ' ');
    }

    #[test]
    fn subfield_queries_respect_order() {
        let mut field = DataField::new(Tag::new("245"), '1', '0');
        field.add_subfield('a', "Title");
        field.add_subfield('b', "subtitle");
        field.add_subfield('c', "author");
        assert_eq!(field.get_subfields(""), vec!["Title", "subtitle", "author"]);
        assert_eq!(field.get_subfields("ca"), vec!["Title", "author"]);
        assert_eq!(field.subfield_codes(), "abc");
        assert_eq!(field.text("ab"), "Title subtitle");
    }

    #[test]
    fn control_field_text_shows_blanks() {
        let field = ControlField::new(Tag::new("008"), "970110s1997    enk");
        assert_eq!(field.text(), "970110s1997####enk");
    }

    #[test]
    fn isbn_accessor_collects_020_values() {
        let mut record = Record::new(Leader::default());
        for isbn in ["9780140442113", "9780140449136"] {
            let mut field = DataField::new(Tag::new("020"), ' ', ' ');
            field.add_subfield('a', isbn);
            record.insert_field(Field::Data(field));
        }
        assert_eq!(record.isbns(), vec!["9780140442113", "9780140449136"]);
        assert_eq!(record.title(), None);
    }

    #[test]
    fn first_and_contains_and_remove() {
        let mut record = Record::new(Leader::default());
        record.add_control_field("001", "123456789");
        assert!(record.contains("001"));
        assert_eq!(record.control_number(), Some("123456789"));
        assert!(record.remove_first("001").is_ok());
        assert!(!record.contains("001"));
        assert!(record.remove_first("001").is_err());
    }
}
