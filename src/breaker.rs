//! Line-oriented text serializations.
//!
//! Two dialects round-trip records through plain text for editing:
//!
//! - **Standard line form** — one field per line, `=TAG  ...`, blanks shown
//!   as `#`, subfields introduced by a single `$`. Written by the record's
//!   [`Display`](std::fmt::Display) impl, parsed by
//!   [`Record::from_breaker_str`].
//! - **Aleph MRC form** — fixed column layout with `$$` subfield markers and
//!   `^` as the blank sentinel, parsed by [`Record::from_mrc_str`].
//!
//! Neither dialect is bit-exact with the binary form; both round-trip the
//! in-memory model modulo indicator and blank normalization.
//!
//! # Examples
//!
//! ```
//! use marclint::{Leader, Record};
//!
//! let text = "=LDR  00000nam#a2200000#a#4500\n\
//!             =001  12345\n\
//!             =245  10 $aTitle$bsubtitle";
//! let record = Record::from_breaker_str(text);
//! assert_eq!(record.title(), Some("Title"));
//! assert_eq!(record.to_string().lines().count(), 3);
//! ```

use crate::record::{
    ControlField, DataField, Field, Record, SourceFormat, Tag, ALEPH_CONTROL_FIELDS,
};
use crate::Leader;

fn restore_blanks(text: &str) -> String {
    text.replace(['#', '^'], " ")
}

fn show_indicator(c: char) -> char {
    if c == ' ' {
        '#'
    } else {
        c
    }
}

impl std::fmt::Display for Record {
    /// Standard line form: leader first, then one line per field in record
    /// order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "=LDR  {}", self.leader_text().replace(' ', "#"))?;
        for field in self.fields() {
            match field {
                Field::Control(cf) => write!(f, "\n={}  {}", cf.tag, cf.text())?,
                Field::Data(df) => {
                    write!(
                        f,
                        "\n={}  {}{} ",
                        df.tag,
                        show_indicator(df.indicator1),
                        show_indicator(df.indicator2)
                    )?;
                    for subfield in &df.subfields {
                        write!(f, "${}{}", subfield.code, subfield.value)?;
                    }
                },
            }
        }
        Ok(())
    }
}

impl Record {
    /// Parse a record from standard line form.
    ///
    /// Lines shorter than a tag, lines without the leading `=`, and Aleph
    /// system tags are ignored. `#` and `^` are restored to spaces in the
    /// leader and in control-field data.
    #[must_use]
    pub fn from_breaker_str(text: &str) -> Self {
        let mut record = Record::new(Leader::default());
        record.set_source_format(SourceFormat::Line);

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            let Some(rest) = line.strip_prefix('=') else {
                continue;
            };
            if rest.len() <= 3 {
                continue;
            }
            let Some(tag_str) = rest.get(0..3) else {
                continue;
            };
            let body = rest.get(5..).unwrap_or("");

            if tag_str == "LDR" {
                record.leader = Leader::from_display_str(&restore_blanks(body));
                continue;
            }
            if ALEPH_CONTROL_FIELDS.contains(&tag_str) {
                continue;
            }

            let tag = Tag::new(tag_str);
            if tag.is_control() {
                record.insert_field(Field::Control(ControlField::new(
                    tag,
                    &restore_blanks(body),
                )));
            } else if let Some(field) = parse_breaker_field(tag, body) {
                record.insert_field(Field::Data(field));
            }
        }
        record
    }

    /// Parse a record from Aleph MRC line form.
    ///
    /// The leader body begins at column 8 of the `LDR` line. Data field
    /// lines carry the tag in columns 0-2, indicators in columns 3-4, and
    /// the body from column 10 with `$$` subfield markers; control field
    /// bodies begin at column 8 with `^` restored to space.
    #[must_use]
    pub fn from_mrc_str(text: &str) -> Self {
        let mut record = Record::new(Leader::default());
        record.set_source_format(SourceFormat::Aleph);

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.len() < 3 {
                continue;
            }
            let Some(tag_str) = line.get(0..3) else {
                continue;
            };

            if tag_str == "LDR" {
                let body = line.get(8..).unwrap_or("");
                record.leader = Leader::from_display_str(&restore_blanks(body));
                continue;
            }
            if ALEPH_CONTROL_FIELDS.contains(&tag_str) {
                continue;
            }

            let tag = Tag::new(tag_str);
            if tag.is_control() {
                let body = line.get(8..).unwrap_or("");
                record.insert_field(Field::Control(ControlField::new(
                    tag,
                    &restore_blanks(body),
                )));
            } else {
                let chars: Vec<char> = line.chars().collect();
                let indicator1 = chars.get(3).copied().unwrap_or(' ');
                let indicator2 = chars.get(4).copied().unwrap_or(' ');
                let mut field = DataField::new(tag, indicator1, indicator2);
                for chunk in line.get(10..).unwrap_or("").split("$$") {
                    let mut chars = chunk.chars();
                    if let Some(code) = chars.next() {
                        field.add_subfield(code, chars.as_str());
                    }
                }
                if !field.subfields.is_empty() {
                    record.insert_field(Field::Data(field));
                }
            }
        }
        record
    }
}

/// Parse the body of a standard line-form data field: two indicators, a
/// space, then `$`-introduced subfields.
fn parse_breaker_field(tag: Tag, body: &str) -> Option<DataField> {
    let mut chars = body.chars();
    let indicator1 = chars.next().unwrap_or(' ');
    let indicator2 = chars.next().unwrap_or(' ');
    let mut field = DataField::new(tag, indicator1, indicator2);

    for chunk in body.split('$').skip(1) {
        let mut chars = chunk.chars();
        if let Some(code) = chars.next() {
            field.add_subfield(code, chars.as_str());
        }
    }
    if field.subfields.is_empty() {
        None
    } else {
        Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_standard_line_form() {
        let mut record = Record::new(Leader::default());
        record.add_control_field("008", "970110s1997    enk");
        let mut field = DataField::new(Tag::new("245"), '1', ' ');
        field.add_subfield('a', "Title");
        field.add_subfield('b', "subtitle");
        record.insert_field(Field::Data(field));

        let text = record.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("=LDR  00000nam#a22"));
        assert_eq!(lines[1], "=008  970110s1997####enk");
        assert_eq!(lines[2], "=245  1# $aTitle$bsubtitle");
    }

    #[test]
    fn breaker_roundtrip_preserves_fields() {
        let mut record = Record::new(Leader::default());
        record.add_control_field("001", "123456789");
        let mut field = DataField::new(Tag::new("650"), ' ', '0');
        field.add_subfield('a', "Ships");
        field.add_subfield('x', "History");
        record.insert_field(Field::Data(field));

        let parsed = Record::from_breaker_str(&record.to_string());
        assert_eq!(parsed.source_format(), SourceFormat::Line);
        assert_eq!(parsed.fields().len(), 2);
        let control = parsed.first("001").unwrap().as_control().unwrap();
        assert_eq!(control.data, "123456789");
        let data = parsed.first("650").unwrap().as_data().unwrap();
        assert_eq!(data.indicator1, ' ');
        assert_eq!(data.indicator2, '0');
        assert_eq!(data.get_subfields(""), vec!["Ships", "History"]);
        assert_eq!(parsed.leader.record_status, 'n');
    }

    #[test]
    fn breaker_parser_skips_junk_and_system_tags() {
        let text = "=LDR  00000nam#a2200000#a#4500\n\
                    not a field line\n\
                    =FMT  BK\n\
                    =24\n\
                    =245  10 $aKept";
        let record = Record::from_breaker_str(text);
        assert_eq!(record.fields().len(), 1);
        assert_eq!(record.title(), Some("Kept"));
    }

    #[test]
    fn breaker_restores_blanks_in_control_data_only() {
        let text = "=008  970110s1997####enk\n=245  ## $aHas # inside";
        let record = Record::from_breaker_str(text);
        let control = record.first("008").unwrap().as_control().unwrap();
        assert_eq!(control.data, "970110s1997    enk");
        let data = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(data.indicator1, ' ');
        assert_eq!(data.get_subfield('a'), Some("Has # inside"));
    }

    #[test]
    fn parses_aleph_mrc_lines() {
        let text = "LDR     00000nam^a2200000^a^4500\n\
                    008     970110s1997^^^^enk\n\
                    FMT     BK\n\
                    24510  L  $$aTitle$$bsubtitle\n\
                    650#0  L  $$aShips";
        let record = Record::from_mrc_str(text);
        assert_eq!(record.source_format(), SourceFormat::Aleph);
        let control = record.first("008").unwrap().as_control().unwrap();
        assert_eq!(control.data, "970110s1997    enk");
        let title = record.first("245").unwrap().as_data().unwrap();
        assert_eq!(title.indicator1, '1');
        assert_eq!(title.indicator2, '0');
        assert_eq!(title.get_subfield('a'), Some("Title"));
        assert_eq!(title.get_subfield('b'), Some("subtitle"));
        let subject = record.first("650").unwrap().as_data().unwrap();
        assert_eq!(subject.indicator1, ' ');
        assert_eq!(subject.indicator2, '0');
    }
}
