//! Schema validation of decoded records.
//!
//! [`validate`] runs the rule catalogue in [`crate::schema`] against a
//! [`Record`] and produces a [`DiagnosticSet`]: deduplicated
//! `(tag, severity, message)` triples grouped by category. Validation never
//! fails; a record is *valid* iff its diagnostic set is empty.
//!
//! # Examples
//!
//! ```
//! use marclint::{Leader, Record};
//!
//! let mut record = Record::new(Leader::default());
//! record.add_control_field("001", "123456789");
//! assert!(!record.validate());
//! let diagnostics = record.diagnostics().unwrap();
//! assert!(diagnostics.iter().any(|(_, d)| d.tag == "008"));
//! ```

use crate::record::{DataField, Field, Record};
use crate::schema::{DataFieldSpec, CONTROL_FIELDS, DATA_FIELDS, OBSOLETE_FIELDS, SUBFIELDS, UNDESIRABLE_FIELDS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Must be fixed before the record is fit for exchange.
    Serious,
    /// Should be reviewed.
    Moderate,
    /// Informational.
    Ignorable,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Serious => "Serious",
            Severity::Moderate => "Moderate",
            Severity::Ignorable => "Ignorable",
        })
    }
}

/// The aspect of the record a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Field structure: cardinality, indicators, subfield grammar.
    Structure,
    /// Desirable content that is missing.
    Completeness,
    /// Obsolete or discouraged coding.
    ObsoleteCoding,
    /// Abbreviations that should be spelled out.
    Abbreviations,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Structure => "structure",
            Category::Completeness => "completeness",
            Category::ObsoleteCoding => "obsolete coding",
            Category::Abbreviations => "abbreviations",
        })
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The tag the finding is about.
    pub tag: String,
    /// How serious it is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// The findings of one validation run, grouped by category.
///
/// Identical `(tag, severity, message)` triples within a category
/// deduplicate, and iteration order is deterministic, so repeated runs over
/// the same record produce identical sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticSet {
    groups: BTreeMap<Category, BTreeSet<Diagnostic>>,
}

impl DiagnosticSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        DiagnosticSet::default()
    }

    /// True when no findings were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeSet::is_empty)
    }

    /// Total number of findings across categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Record a finding.
    pub fn add(&mut self, category: Category, tag: &str, severity: Severity, message: String) {
        self.groups.entry(category).or_default().insert(Diagnostic {
            tag: tag.to_string(),
            severity,
            message,
        });
    }

    /// Findings in one category, in deterministic order.
    pub fn category(&self, category: Category) -> impl Iterator<Item = &Diagnostic> {
        self.groups.get(&category).into_iter().flatten()
    }

    /// All findings with their category, in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Diagnostic)> {
        self.groups
            .iter()
            .flat_map(|(category, set)| set.iter().map(move |d| (*category, d)))
    }
}

impl std::fmt::Display for DiagnosticSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (category, diagnostic) in self.iter() {
            writeln!(
                f,
                "[{category}] {}: {} ({})",
                diagnostic.tag, diagnostic.message, diagnostic.severity
            )?;
        }
        Ok(())
    }
}

/// Run every schema check against a record.
#[must_use]
pub fn validate(record: &Record) -> DiagnosticSet {
    let mut set = DiagnosticSet::new();

    // Record-scope cardinality for every tag the catalogue knows.
    for (&tag, spec) in CONTROL_FIELDS.iter() {
        let count = record.get_fields(&[tag]).len();
        if let Some(message) = spec.cardinality.check("Field", count) {
            set.add(Category::Structure, tag, Severity::Serious, message);
        }
    }
    for (&tag, spec) in DATA_FIELDS.iter() {
        let count = record.get_fields(&[tag]).len();
        if let Some(message) = spec.cardinality.check("Field", count) {
            set.add(Category::Structure, tag, Severity::Serious, message);
        }
    }

    // Per-field content and structure.
    for field in record.fields() {
        let tag = field.tag().as_str();
        match field {
            Field::Control(cf) => {
                if let Some(spec) = CONTROL_FIELDS.get(tag) {
                    if !spec.pattern.is_match(&cf.data) {
                        set.add(
                            Category::Structure,
                            tag,
                            Severity::Serious,
                            format!(
                                "Incorrect content: '{}' should follow pattern '{}'",
                                cf.data,
                                spec.pattern.as_str()
                            ),
                        );
                    }
                }
            },
            Field::Data(df) => {
                if let Some(spec) = DATA_FIELDS.get(tag) {
                    check_indicators(df, spec, &mut set);
                    check_subfields(df, spec, &mut set);
                }
            },
        }

        if OBSOLETE_FIELDS.contains(tag) {
            set.add(
                Category::ObsoleteCoding,
                tag,
                Severity::Serious,
                "Field is obsolete.".to_string(),
            );
        }
        if let Some(reason) = UNDESIRABLE_FIELDS.get(tag) {
            set.add(
                Category::ObsoleteCoding,
                tag,
                Severity::Moderate,
                (*reason).to_string(),
            );
        }
    }

    // TODO: wire up the ABBREVIATIONS pass over 300$a and the
    // DESIRABLE_FIELDS completeness pass once their diagnostic texts are
    // settled; both tables are already in the catalogue.

    set
}

/// Indicator membership against the spec's alphabets.
///
/// Blanks are displayed as `#` on both sides of the comparison, matching
/// how the alphabets read in cataloguing documentation.
fn check_indicators(field: &DataField, spec: &DataFieldSpec, set: &mut DiagnosticSet) {
    let tag = field.tag.as_str();
    for (position, (indicator, alphabet)) in [
        (field.indicator1, spec.indicators[0]),
        (field.indicator2, spec.indicators[1]),
    ]
    .into_iter()
    .enumerate()
    {
        let alphabet = alphabet.replace(' ', "#");
        let shown = if indicator == ' ' { '#' } else { indicator };
        if !alphabet.contains(shown) {
            let ordinal = if position == 0 { "1st" } else { "2nd" };
            let one_of = if alphabet.chars().count() > 1 {
                "one of: "
            } else {
                ""
            };
            set.add(
                Category::Structure,
                tag,
                Severity::Serious,
                format!("Incorrect {ordinal} indicator: {shown} should be {one_of}{alphabet}"),
            );
        }
    }
}

/// Subfield-code sequence against the tag's grammar.
///
/// On mismatch, each code outside the grammar's alphabet is reported, and
/// the per-subfield cardinality and ordering rules run when the catalogue
/// has them for this tag.
fn check_subfields(field: &DataField, spec: &DataFieldSpec, set: &mut DiagnosticSet) {
    let tag = field.tag.as_str();
    let codes = field.subfield_codes();
    if spec.subfields.is_match(&codes) {
        return;
    }

    let mut seen = BTreeSet::new();
    for code in codes.chars() {
        if seen.insert(code) && !spec.allowed_codes.contains(code) {
            set.add(
                Category::Structure,
                tag,
                Severity::Serious,
                format!("Subfield {code} is not valid for this field"),
            );
        }
    }

    if let Some(subfield_specs) = SUBFIELDS.get(tag) {
        for (code, sspec) in subfield_specs {
            let count = field.get_subfields(&code.to_string()).len();
            if let Some(message) = sspec.cardinality.check(&format!("Subfield {code}"), count) {
                set.add(Category::Structure, tag, Severity::Serious, message);
            }
            check_order(field, *code, sspec, set);
        }
    }
}

/// Neighbour checks for one subfield code: with the code sequence bracketed
/// by `^` and `$`, every occurrence must be preceded by a member of the
/// spec's `before` set and followed by a member of its `after` set.
fn check_order(
    field: &DataField,
    code: char,
    sspec: &crate::schema::SubfieldSpec,
    set: &mut DiagnosticSet,
) {
    let tag = field.tag.as_str();
    let mut bracketed: Vec<char> = vec!['^'];
    bracketed.extend(field.subfield_codes().chars());
    bracketed.push('$');

    for i in 1..bracketed.len() - 1 {
        if bracketed[i] != code {
            continue;
        }
        if !sspec.before.contains(bracketed[i - 1]) {
            set.add(
                Category::Structure,
                tag,
                Severity::Serious,
                format!("Subfield {code} {}", sspec.before_string().to_lowercase()),
            );
        }
        if !sspec.after.contains(bracketed[i + 1]) {
            set.add(
                Category::Structure,
                tag,
                Severity::Serious,
                format!("Subfield {code} {}", sspec.after_string().to_lowercase()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;
    use crate::record::{ControlField, DataField, Tag};

    /// A record that satisfies every mandatory-field rule.
    fn complete_record() -> Record {
        let mut record = Record::new(Leader::default());
        record.add_control_field("001", "123456789");
        record.add_control_field("003", "Uk");
        record.add_control_field("005", "20240101120000.0");
        record.add_control_field("008", "240101s2024    enk           000 0 eng d");
        let mut f040 = DataField::new(Tag::new("040"), ' ', ' ');
        f040.add_subfield('a', "Uk");
        f040.add_subfield('b', "eng");
        record.insert_field(Field::Data(f040));
        let mut f245 = DataField::new(Tag::new("245"), '0', '0');
        f245.add_subfield('a', "A title");
        record.insert_field(Field::Data(f245));
        record
    }

    #[test]
    fn complete_record_is_valid() {
        let mut record = complete_record();
        assert!(record.validate(), "{}", record.diagnostics().unwrap());
    }

    #[test]
    fn missing_mandatory_field_is_reported() {
        let mut record = complete_record();
        record.remove_first("008").unwrap();
        let set = validate(&record);
        let found = set.category(Category::Structure).any(|d| {
            d.tag == "008"
                && d.severity == Severity::Serious
                && d.message == "Field is not present, but should occur exactly once"
        });
        assert!(found, "{set}");
    }

    #[test]
    fn repeated_non_repeatable_field_is_reported() {
        let mut record = complete_record();
        let mut extra = DataField::new(Tag::new("245"), '0', '0');
        extra.add_subfield('a', "Another title");
        record.insert_field(Field::Data(extra));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "245"
            && d.message == "Field should occur exactly once, but occurs 2 times"));
    }

    #[test]
    fn bad_indicator_is_reported_with_blank_shown_as_hash() {
        let mut record = complete_record();
        let mut f020 = DataField::new(Tag::new("020"), 'X', ' ');
        f020.add_subfield('a', "9780000000002");
        record.insert_field(Field::Data(f020));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "020"
            && d.message == "Incorrect 1st indicator: X should be #"));
    }

    #[test]
    fn multi_character_alphabet_says_one_of() {
        let mut record = complete_record();
        let mut f650 = DataField::new(Tag::new("650"), 'X', '0');
        f650.add_subfield('a', "Ships");
        record.insert_field(Field::Data(f650));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "650"
            && d.message == "Incorrect 1st indicator: X should be one of: #012"));
    }

    #[test]
    fn control_field_content_is_checked() {
        let mut record = complete_record();
        record.remove_first("003").unwrap();
        record.insert_field(Field::Control(ControlField::new(Tag::new("003"), "DLC")));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "003"
            && d.message == "Incorrect content: 'DLC' should follow pattern '^Uk$'"));
    }

    #[test]
    fn invalid_subfield_code_is_reported() {
        let mut record = complete_record();
        let mut f011 = DataField::new(Tag::new("011"), ' ', ' ');
        f011.add_subfield('a', "73019002");
        f011.add_subfield('x', "oops");
        record.insert_field(Field::Data(f011));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "011"
            && d.message == "Subfield x is not valid for this field"));
    }

    #[test]
    fn subfield_order_violations_are_described() {
        // 020 grammar wants $a before $q; reversed order trips both the
        // grammar and the per-subfield neighbour rules.
        let mut record = complete_record();
        let mut f020 = DataField::new(Tag::new("020"), ' ', ' ');
        f020.add_subfield('q', "paperback");
        f020.add_subfield('a', "9780000000002");
        record.insert_field(Field::Data(f020));
        let set = validate(&record);
        let messages: Vec<&str> = set
            .category(Category::Structure)
            .filter(|d| d.tag == "020")
            .map(|d| d.message.as_str())
            .collect();
        assert!(
            messages
                .iter()
                .any(|m| m.starts_with("Subfield q should follow")),
            "{messages:?}"
        );
    }

    #[test]
    fn subfield_cardinality_within_field() {
        // 040$a is mandatory within the field; grammar mismatch triggers
        // the per-subfield checks.
        let mut record = complete_record();
        record.remove_first("040").unwrap();
        let mut f040 = DataField::new(Tag::new("040"), ' ', ' ');
        f040.add_subfield('b', "eng");
        f040.add_subfield('b', "fre");
        record.insert_field(Field::Data(f040));
        let set = validate(&record);
        let messages: Vec<&str> = set
            .category(Category::Structure)
            .filter(|d| d.tag == "040")
            .map(|d| d.message.as_str())
            .collect();
        assert!(messages
            .contains(&"Subfield a is not present, but should occur exactly once"));
        assert!(messages
            .contains(&"Subfield b should occur exactly once, but occurs 2 times"));
    }

    #[test]
    fn obsolete_field_is_reported() {
        let mut record = complete_record();
        let mut f440 = DataField::new(Tag::new("440"), ' ', '0');
        f440.add_subfield('a', "Some series");
        record.insert_field(Field::Data(f440));
        let set = validate(&record);
        assert!(set.category(Category::ObsoleteCoding).any(|d| d.tag == "440"
            && d.severity == Severity::Serious
            && d.message == "Field is obsolete."));
    }

    #[test]
    fn undesirable_field_is_reported_with_reason() {
        let mut record = complete_record();
        let mut f260 = DataField::new(Tag::new("260"), ' ', ' ');
        f260.add_subfield('a', "London :");
        f260.add_subfield('b', "Penguin,");
        f260.add_subfield('c', "2001.");
        record.insert_field(Field::Data(f260));
        let set = validate(&record);
        assert!(set.category(Category::ObsoleteCoding).any(|d| d.tag == "260"
            && d.severity == Severity::Moderate
            && d.message == "Prefer field 264"));
    }

    #[test]
    fn duplicate_findings_deduplicate() {
        let mut record = complete_record();
        for _ in 0..2 {
            let mut f440 = DataField::new(Tag::new("440"), ' ', '0');
            f440.add_subfield('a', "Series");
            record.insert_field(Field::Data(f440));
        }
        let set = validate(&record);
        let obsolete: Vec<_> = set
            .category(Category::ObsoleteCoding)
            .filter(|d| d.tag == "440")
            .collect();
        assert_eq!(obsolete.len(), 1);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut record = complete_record();
        let mut f020 = DataField::new(Tag::new("020"), 'X', ' ');
        f020.add_subfield('x', "bad");
        record.insert_field(Field::Data(f020));
        let first = validate(&record);
        let second = validate(&record);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn aleph_local_tags_reach_the_checker() {
        let mut record = complete_record();
        let mut cat = DataField::new(Tag::new("CAT"), ' ', ' ');
        cat.add_subfield('z', "nope");
        record.insert_field(Field::Data(cat));
        let set = validate(&record);
        assert!(set.category(Category::Structure).any(|d| d.tag == "CAT"
            && d.message == "Subfield z is not valid for this field"));
    }
}
