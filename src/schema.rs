//! The static MARC21 rule catalogue.
//!
//! Process-wide, read-only tables describing the fields a bibliographic
//! record may carry: per-tag cardinality, control-field content patterns,
//! data-field indicator alphabets and subfield-code grammars, per-subfield
//! ordering and cardinality rules, and the lists of obsolete and
//! undesirable tags. The registry is built once on first use; every
//! pattern is compiled up front and shared across threads.
//!
//! Patterns are start- and end-anchored. The subfield grammar for a data
//! field is a regular expression over the concatenated subfield codes, so
//! `^8*6?ab?$` reads "any number of $8, an optional $6, one $a, an optional
//! $b, in that order".

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Occurrence constraint on a field (record scope) or subfield (field
/// scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// `?` — optional, not repeatable
    Optional,
    /// `1` — mandatory, not repeatable
    Mandatory,
    /// `*` — optional, repeatable
    Repeatable,
    /// `+` — mandatory, repeatable
    MandatoryRepeatable,
}

impl Cardinality {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '?' => Cardinality::Optional,
            '1' => Cardinality::Mandatory,
            '*' => Cardinality::Repeatable,
            '+' => Cardinality::MandatoryRepeatable,
            other => panic!("invalid cardinality symbol {other:?}"),
        }
    }

    /// Human-readable summary of the constraint.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Cardinality::Optional => "Optional; not repeatable",
            Cardinality::Mandatory => "Mandatory; not repeatable",
            Cardinality::Repeatable => "Optional; repeatable",
            Cardinality::MandatoryRepeatable => "Mandatory; repeatable",
        }
    }

    /// Check an occurrence count, returning the violation message if any.
    ///
    /// `subject` is the diagnostic noun: `"Field"` or `"Subfield x"`.
    #[must_use]
    pub fn check(&self, subject: &str, count: usize) -> Option<String> {
        match self {
            Cardinality::Optional => (count > 1).then(|| {
                format!("{subject} is not repeatable, but occurs {count} times")
            }),
            Cardinality::Mandatory => {
                if count == 0 {
                    Some(format!(
                        "{subject} is not present, but should occur exactly once"
                    ))
                } else if count != 1 {
                    Some(format!(
                        "{subject} should occur exactly once, but occurs {count} times"
                    ))
                } else {
                    None
                }
            },
            Cardinality::Repeatable => None,
            Cardinality::MandatoryRepeatable => (count == 0).then(|| {
                format!("{subject} is not present, but should occur at least once")
            }),
        }
    }
}

/// Rules for one control field tag.
#[derive(Debug)]
pub struct ControlFieldSpec {
    /// How often the field may occur in a record.
    pub cardinality: Cardinality,
    /// Pattern the field content must match.
    pub pattern: Regex,
}

/// Rules for one data field tag.
#[derive(Debug)]
pub struct DataFieldSpec {
    /// How often the field may occur in a record.
    pub cardinality: Cardinality,
    /// Allowed characters for indicator 1 and indicator 2.
    pub indicators: [&'static str; 2],
    /// Grammar over the concatenated subfield codes.
    pub subfields: Regex,
    /// The subfield codes named anywhere in the grammar.
    pub allowed_codes: String,
}

/// Ordering and cardinality rules for one subfield of one tag.
#[derive(Debug)]
pub struct SubfieldSpec {
    /// How often the subfield may occur within the field.
    pub cardinality: Cardinality,
    /// Codes allowed immediately before this one (`^` = start of field).
    pub before: &'static str,
    /// Codes allowed immediately after this one (`$` = end of field).
    pub after: &'static str,
}

fn describe_neighbours(set: &str) -> &'static str {
    let stripped: String = set.chars().filter(|c| *c != '^' && *c != '$').collect();
    if stripped.len() > 1 {
        "one of these subfields:"
    } else {
        "subfield"
    }
}

impl SubfieldSpec {
    /// Sentence describing where the subfield may sit relative to what
    /// precedes it.
    #[must_use]
    pub fn before_string(&self) -> String {
        let codes: String = self.before.chars().filter(|c| *c != '^').collect();
        if self.before == "^" {
            "Should be the first subfield in the field".to_string()
        } else if self.before.contains('^') {
            format!(
                "Should occur either at the start of the field, or after {} {}",
                describe_neighbours(self.before),
                codes
            )
        } else {
            format!("Should follow {} {}", describe_neighbours(self.before), codes)
        }
    }

    /// Sentence describing where the subfield may sit relative to what
    /// follows it.
    #[must_use]
    pub fn after_string(&self) -> String {
        let codes: String = self.after.chars().filter(|c| *c != '$').collect();
        if self.after == "$" {
            "Should be the last subfield in the field".to_string()
        } else if self.after.contains('$') {
            format!(
                "Should occur either at the end of the field, or before {} {}",
                describe_neighbours(self.after),
                codes
            )
        } else {
            format!("Should occur before {} {}", describe_neighbours(self.after), codes)
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("bad schema pattern {pattern:?}: {e}"))
}

fn code_alphabet(pattern: &str) -> String {
    pattern
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

const CONTROL_FIELD_ROWS: &[(&str, char, &str)] = &[
    ("001", '1', r"^[0-9]{9}$"),
    ("003", '1', r"^Uk$"),
    ("005", '1', r"^.*$"),
    ("006", '*', r"^.*$"),
    ("007", '*', r"^.*$"),
    ("008", '1', r"^.*$"),
    ("WII", '*', r"^(ESTAR[12]|ETOC|ld:journal|ld:ebook|WW1|GOOGLEBOOKS|PLAYBILL|DCW|MSD|DISCOVERY)$"),
];

const DATA_FIELD_ROWS: &[(&str, char, &str, &str, &str)] = &[
    ("010", '?', " ", " ", r"^8*(a(b*|z*)|b+|z+)$"),
    ("011", '*', " ", " ", r"^a+$"),
    ("013", '*', " ", " ", r"^8*6?ab?c?(de?)*f*$"),
    ("015", '*', " ", " ", r"^8*6?(a+|z)z*q*2?$"),
    ("016", '*', " 7", " ", r"^8*[az]z*2?$"),
    ("017", '*', " ", " 8", r"^8*6?i?(a+|z)z*bd?2?$"),
    ("018", '?', " ", " ", r"^8*6?a$"),
    ("019", '*', "0123456789acdegmnoprstuxy", " ", r"^a$"),
    ("020", '*', " ", " ", r"^8*6?(a+|z)z*q*c?$"),
    ("022", '*', " 01", " ", r"^8*6?(((al?|l)m*|(m+|y))y*|z)z*2?0?1*$"),
    ("023", '*', "01", " ", r"^8*6?(a+2?|y|z)y*z*0?1*$"),
    ("024", '*', "0123478", " 01", r"^8*6?(ad?|zd?)(zd?)*q*c?2?$"),
    ("025", '*', " ", " ", r"^8*a+$"),
    ("026", '*', " ", " ", r"^8*6?(abc?d*|e)2?5*$"),
    ("027", '*', " ", " ", r"^8*6?[az]z*q*$"),
    ("028", '*', "0123456", "0123", r"^8*6?abq*$"),
    ("030", '*', " ", " ", r"^8*6?[az]z*$"),
    ("031", '*', " ", " ", r"^8*6?abcm?e?d*t*r?g?n?o?t*p?u*q*s*y*z*2?$"),
    ("032", '*', " ", " ", r"^8*6?ab$"),
    ("033", '*', " 012", " 012", r"^8*6?3?(a|(bc?)|p)+0*1*2?$"),
    ("034", '*', "013", " 01", r"^8*6?3?a(b*c*(defg)?|h(ikmn)?p?)r?s*t*x?y?z?0*1*2?$"),
    ("035", '*', " ", " ", r"^8*6?[az]z*$"),
    ("036", '?', " ", " ", r"^8*6?ab$"),
    ("037", '*', " 23", " ", r"^3?a?bn*5?$"),
    ("038", '?', " ", " ", r"^8*6?a$"),
    ("039", '?', "12", " ", r"^p?a$"),
    ("040", '1', " ", " ", r"^8*6?abc?d*e*$"),
    ("041", '*', " 01", " 7", r"^8*6?3?a+b*d*e*f*g*h*i*j*k*m*n*p*q*r*t*2?7*$"),
    ("042", '?', " ", " ", r"^a+$"),
    ("043", '*', " ", " ", r"^8*6?(a+b*c*|b+c*|c+)0*1*2?$"),
    ("044", '?', " ", " ", r"^8*6?(a+b*c*|b+c*|c+)2?$"),
    ("045", '?', " 012", " ", r"^8*6?a*(c+b*|c*b+)$"),
    ("046", '*', " 123", " ", r"^8*6?3?a[bckmo][delnp]x*z*2?$"),
    ("047", '*', " ", " 7", r"^8*a+2?$"),
    ("048", '*', " ", " 7", r"^8*[ab]+2?$"),
    ("050", '*', " 01", "04", r"^8*6?3?a+b?0?1?$"),
    ("051", '*', " ", " ", r"^8*ab?c?$"),
    ("052", '*', " 17", " ", r"^8*6?ab*d*0?1?2?$"),
    ("055", '*', " 01", "0123456789", r"^8*6?ab?0?1?2?$"),
    ("060", '*', " 01", "04", r"^8*a+b?0?1?$"),
    ("061", '*', " ", " ", r"^8*a+b?c?$"),
    ("066", '?', " ", " ", r"^[abc]c*$"),
    ("070", '*', " 01", " ", r"^8*a+b?0?1?$"),
    ("071", '*', " ", " ", r"^8*a+b?c*$"),
    ("072", '*', " ", "07", r"^8*6?ax*2?$"),
    ("074", '*', " ", " ", r"^8*[az]z*$"),
    ("080", '*', " 01", " ", r"^8*6?ab?x*0?1?2?$"),
    ("082", '*', "017", " 04", r"^8*6?a+b?2?m?q?7*$"),
    ("083", '*', "017", " ", r"^8*6?(az?y?)+c*m?2?q?7*$"),
    ("084", '*', " ", " ", r"^8*6?a+b?2?q?0?1?7*$"),
    ("085", '*', " ", " ", r"^8*6?k0?1?$"),
    ("086", '*', " 01", " ", r"^8*6?[az]z*2?0?1?$"),
    ("088", '*', " ", " ", r"^8*6?[az]z*$"),
    ("090", '*', " ", " ", r"^ab?$"),
    ("091", '?', " ", " ", r"^a$"),
    ("100", '?', "013", " ", r"^8*6?ab?q?c?q?d?c?j*u?t?[np]*[lf]*k?[lf]*e*4*0?1?2?7*$"),
    ("110", '?', "012", " ", r"^8*6?ab*u?t?[np]*d?c?[np]*g*[lf]*k?[lf]*[np]*e*4*0?1?2?7*$"),
    ("111", '?', "012", " ", r"^8*6?aq?e*u?t?[np]*d?c?[np]*g*[lk]*f?[lk]*[np]*e*j*4*0?1?2?7*$"),
    ("130", '?', "0123456789", " ", r"^8*6?a[np]*d*m*[np]*o?r?g*k*l?s*g*k*f?k*s*d*[np]*0?1?2?7*$"),
    ("210", '*', "01", " 0", r"^8*6?ab??2?7*$"),
    ("211", '*', "01", "0123456789", r"^6?a$"),
    ("212", '*', "01", " ", r"^6?a$"),
    ("214", '*', "01", "0123456789", r"^6?a$"),
    ("222", '*', " ", "0123456789", r"^8*6?ab?$"),
    ("240", '?', "01", "0123456789", r"^8*6?a[np]*h?d*m*[np]*o?r?g*k*l?s*g*k*f?k*s*d*[np]*2?0?1?7*$"),
    ("241", '?', "01", "0123456789", r"^ah?$"),
    ("242", '*', "01", "0123456789", r"^8*6?a[np]*h?b?[np]*c?y?$"),
    ("243", '?', "01", "0123456789", r"^8*6?a[np]*h?d*m*[np]*o?r?g*k*l?s*g*k*f?k*s*d*[np]*$"),
    ("245", '1', "01", "0123456789", r"^8*6?(a[np]*h?b?[np]*|k)k*f?g?k*[np]*s?c?7*$"),
    ("246", '*', "0123", " 012345678", r"^8*6?i*a[np]*h?b?[np]*f?g*[np]*5?7*$"),
    ("247", '*', "01", "01", r"^8*6?a[np]*h?b?[np]*f?g*[np]*x?7*$"),
    ("250", '*', " ", " ", r"^8*6?3?ab?7*$"),
    ("251", '*', " ", " ", r"^8*6?3?a+?2?0?1?$"),
    ("254", '?', " ", " ", r"^8*6?a$"),
    ("255", '*', " ", " ", r"^8*6?ab?([cd]?e?|f?g?)7*$"),
    ("256", '?', " ", " ", r"^8*6?a7*$"),
    ("257", '*', " ", " ", r"^8*6?a+2?0?1?$"),
    ("258", '*', " ", " ", r"^8*6?ab?$"),
    ("260", '*', " 23", " ", r"^8*6?3?(a+b+c*)+((ef)*g*)*$"),
    ("261", '?', " ", " ", r"^8*6?a*b*d*e*f*$"),
    ("262", '?', " ", " ", r"^8*6?a?b?c?k?l?$"),
    ("263", '?', " ", " ", r"^8*6?a$"),
    ("264", '*', " 23", "01234", r"^8*6?3?(a+b+c*)+7*$"),
    ("265", '?', " ", " ", r"^6?a+$"),
    ("270", '*', " 12", " 07", r"^8*6?i?f?g?h?(a+b?c?d?e?j*k*l*m*n*|j+k*l*m*n*|k+l*m*n*|l+m*n*|m+n*|n+)p*q*r*z*4*$"),
    ("300", '*', " ", " ", r"^8*6?3?a+b?c*e?(a*f*g*)*7*$"),
    ("301", '*', " ", " ", r"^ab?c?d?e?f?$"),
    ("302", '*', " ", " ", r"^a$"),
    ("303", '*', " ", " ", r"^a$"),
    ("304", '*', " ", " ", r"^a$"),
    ("305", '*', " ", " ", r"^6?ab?c?d?e?f?m?n?$"),
    ("306", '?', " ", " ", r"^8*6?a+$"),
    ("307", '*', " 8", " ", r"^8*6?ab?$"),
    ("308", '*', " ", " ", r"^6?ab?c?d?e?f?$"),
    ("310", '*', " ", " ", r"^8*6?ab?2?0?1?$"),
    ("315", '?', " ", " ", r"^6?a+b*$"),
    ("321", '*', " ", " ", r"^8*6?ab?2?0?1?$"),
    ("334", '*', " ", " ", r"^8*6?(ab?|b)2?0?1?$"),
    ("335", '*', " ", " ", r"^8*6?3?(ab?|b)2?0?1?7*$"),
    ("336", '*', " ", " ", r"^8*6?3?a*[ab]b*2?0?1?7*$"),
    ("337", '*', " ", " ", r"^8*6?3?a*[ab]b*2?0?1?$"),
    ("338", '*', " ", " ", r"^8*6?3?a*[ab]b*2?0?1?$"),
    ("340", '*', " ", " ", r"^8*6?3?[abcdefghijklmnopq]+2?0?1?$"),
    ("341", '*', " 01", " ", r"^8*6?3?ab*c*d*e*2?0?1?$"),
    ("342", '*', "01", "012345678", r"^8*6?([abcdghijklmnopqrstuvw]|[ef])+2?$"),
    ("343", '*', " ", " ", r"^8*6?([abcdefghi])+2?$"),
    ("344", '*', " ", " ", r"^8*6?3?a*b*c*d*e*f*g*h*i*j*2?0?1?$"),
    ("345", '*', " ", " ", r"^8*6?3?a*b*c*d*2?0?1?$"),
    ("346", '*', " ", " ", r"^8*6?3?[ab]*?2?0?1?$"),
    ("347", '*', " ", " ", r"^8*6?3?a*b*c*d*e*f*2?0?1?$"),
    ("348", '*', " ", " ", r"^8*6?3?(a*b*|c*d*)2?0?1?7*$"),
    ("350", '?', " ", " ", r"^6?a+b*$"),
    ("351", '*', " ", " ", r"^8*6?3?c?a*[ab]b*$"),
    ("352", '*', " ", " ", r"^8*6?a(bc?)*(def?)?g?i?q?$"),
    ("353", '*', " ", " ", r"^8*6?3?(ab?|a?b)*2?0?1?$"),
    ("355", '*', "0123458", " ", r"^8*6?ab*c*d?e?f?g?h?j*$"),
    ("357", '?', " ", " ", r"^8*6?ab*c*g*$"),
    ("359", '*', " ", " ", r"^a$"),
    ("361", '*', " 01", " ", r"^8*6?3?o*5?y?s?a0*1*f*7*k?l?x*z*u*$"),
    ("362", '*', " 01", " ", r"^8*6?az?$"),
    ("363", '*', " 01", " 01", r"^8*6?a(b(c(d(ef?)?)?)?)?(gh?)?(i(j(kl?)?)?)?m?u?v?x*z*$"),
    ("365", '*', " ", " ", r"^8*6?ab?c?d?e?f?g?m?j?(hi?)?k?2?$"),
    ("366", '*', " ", " ", r"^8*6?a?b?c?d?e?f?g?j?k?m?2?$"),
    ("370", '*', " ", " ", r"^8*6?3?i*[cfg]*(st?)?u*v*4*2?0?1?7*$"),
    ("377", '*', " ", " 7", r"^8*6?3?(a*[al]l*0?1?)+2?7*$"),
    ("380", '*', " ", " ", r"^8*6?3?a+?2?0*1*7*$"),
    ("381", '*', " ", " ", r"^8*6?3?a+u?v?2?0?1?7*$"),
    ("382", '*', " 0123", " 01", r"^8*6?3?([abdp][en]?)+r?s?t?v*2?0*1*7*$"),
    ("383", '*', " 01", " ", r"^8*6?3?a*b*c*d?e?2?$"),
    ("384", '*', " 012", " ", r"^8*6?3?a0*1*7*$"),
    ("385", '*', " ", " ", r"^8*6?3?m?n?a*[ab]b*2?0*1*7*$"),
    ("386", '*', " ", " ", r"^8*6?3?i*m?n?a*[ab]b*4*2?0*1*7*$"),
    ("387", '*', " ", " ", r"^8*6?3?a*b*c*d*e*f*g*h*i*j*k*l*m*2?0*1*7*$"),
    ("388", '*', " 12", " ", r"^8*6?3?a+2?0*1*7*$"),
    ("400", '*', "0123", "01", r"^8*6?ab?q?c?d?c?u?t?[np]*[lf]*k?[lf]*x*v*e*4*$"),
    ("410", '*', "012", "01", r"^8*6?ab*u?t?[np]*d?c?[np]*g?[lf]*k?[lf]*[np]*x*v*e*4*$"),
    ("411", '*', "012", "01", r"^8*6?aq?e*u?t?[np]*d?c?[np]*g*[lk]*f?[lk]*[np]*e*x*v*j*4*$"),
    ("440", '*', " ", "0123456789", r"^8*6?a[np]*x?v?w*0*$"),
    ("490", '*', "01", " ", r"^8*6?3?(a+[xyz]v*)+l?7*$"),
    ("500", '*', " ", " ", r"^8*6?3?a5?7*$"),
    ("501", '*', " ", " ", r"^8*6?3?a5?7*$"),
    ("502", '*', " ", " ", r"^8*6?3?(a|g*bc?d?g*)o*7*$"),
    ("503", '*', " ", " ", r"^6?a$"),
    ("504", '*', " ", " ", r"^8*6?ab?$"),
    ("505", '*', "0128", " 0", r"^8*6?(a|(g?tg?r?g?)+|u)u*7*$"),
    ("506", '*', " 01", " ", r"^8*6?3?(a?b*c*d*e*f*g*q?u*)2?5?$"),
    ("507", '?', " ", " ", r"^8*6?3?(a|b|ab)$"),
    ("508", '*', " ", " ", r"^8*6?a7*$"),
    ("509", '*', " ", " ", r"^a$"),
    ("510", '*', "01234", " ", r"^8*6?3?au?x?b?(cu?)?7*$"),
    ("511", '*', "01", " ", r"^8*6?a$"),
    ("512", '*', " ", " ", r"^6?a$"),
    ("513", '*', " ", " ", r"^8*6?ab?$"),
    ("514", '?', " ", " ", r"^8*6?z*a?b*c*d?e?f?g*h*i?j*k*m?u*$"),
    ("515", '*', " ", " ", r"^8*6?a7*$"),
    ("516", '*', " 8", " ", r"^8*6?a$"),
    ("517", '?', " 01", " ", r"^[ab]b*c*$"),
    ("518", '*', " ", " ", r"^8*6?3?(a|o*(o*d?(pd?2?0?1?)?)+)7*$"),
    ("520", '*', " 012348", " ", r"^8*6?3?(ab?c?|u)u*2?7*$"),
    ("521", '*', " 012348", " ", r"^8*6?3?a+b?$"),
    ("522", '*', " 8", " ", r"^8*6?a$"),
    ("523", '?', " ", " ", r"^6?ab?$"),
    ("524", '*', " 8", " ", r"^8*6?3?a2?$"),
    ("525", '*', " ", " ", r"^8*6?a$"),
    ("526", '*', "08", " ", r"^8*6?3?i?ab?c?d?x*z*5?$"),
    ("527", '?', " ", " ", r"^6?a$"),
    ("530", '*', " ", " ", r"^8*6?3?ab?d?c?u*$"),
    ("532", '*', "0128", " ", r"^8*6?3?a$"),
    ("533", '*', " ", " ", r"^8*6?3?am*b*c*d?e?f*7?n*5?y*$"),
    ("534", '*', " ", " ", r"^8*6?3?p?n*a?n*(t?c?|c?t?)b?f*k*l?e?m?n*o*x*z*$"),
    ("535", '*', "12", " ", r"^8*6?3?ab*c*d*g?$"),
    ("536", '*', " ", " ", r"^8*6?a?b*c*d*e*f*g*h*$"),
    ("537", '?', " 8", " ", r"^6?a$"),
    ("538", '*', " ", " ", r"^8*6?3?a(i?u+)?5?$"),
    ("539", '*', " ", " ", r"^a$"),
    ("540", '*', " ", " ", r"^8*6?3?ab?c?d?(f+2?)?g*q?u*5?$"),
    ("541", '*', " 01", " ", r"^8*6?3?([abcdefhno]|[no])+5?$"),
    ("542", '*', " 01", " ", r"^8*6?3?a?b?c?d*e*f*g?h*i?j?k*l?m?n*o?p*q?r?s?u*$"),
    ("543", '*', " ", " ", r"^6?a$"),
    ("544", '*', " 01", " ", r"^8*6?3?d*e*a*b*c*n*$"),
    ("545", '*', " 01", " ", r"^8*6?ab?u*$"),
    ("546", '*', " ", " ", r"^8*6?3?ab*7*$"),
    ("547", '*', " ", " ", r"^8*6?a$"),
    ("550", '*', " ", " ", r"^8*6?a7*$"),
    ("552", '*', " ", " ", r"^8*6?z*a?b?c?d?e*f*g?h?i?j?k?l?m?n?o*p*u*$"),
    ("555", '*', " 08", " ", r"^8*6?3?a?b*c?d?u*7*$"),
    ("556", '*', " 8", " ", r"^8*6?az*$"),
    ("561", '*', " 01", " ", r"^8*6?3?[au]u*5?$"),
    ("562", '*', " ", " ", r"^8*6?3?a*b*c*[de]*5?$"),
    ("563", '*', " ", " ", r"^8*6?3?[au]u*5?$"),
    ("565", '*', " 08", " ", r"^8*6?3?ab*c*d*e8$"),
    ("567", '*', " 8", " ", r"^8*6?(a|a?(b0?1?)+2)$"),
    ("570", '*', " ", " ", r"^6?az?$"),
    ("580", '*', " ", " ", r"^8*6?a5?$"),
    ("581", '*', " 8", " ", r"^8*6?3?az*$"),
    ("582", '*', " 8", " ", r"^6?a$"),
    ("583", '*', " 01", " ", r"^8*6?3?(no)*ab*c*d*e*f*h*i*j*k*l*u*x*z*2?5?7*$"),
    ("584", '*', " ", " ", r"^8*6?3?a*[ab]b*5?$"),
    ("585", '*', " ", " ", r"^8*6?3?a5?$"),
    ("586", '*', " 8", " ", r"^8*6?3?a$"),
    ("588", '*', " 01", " ", r"^8*6?a5?$"),
    ("590", '*', " ", " ", r"^a$"),
    ("591", '*', " ", " ", r"^a$"),
    ("592", '*', " ", " ", r"^a+$"),
    ("594", '*', " ", " ", r"^(ab?|a?b)$"),
    ("595", '*', " ", " ", r"^a$"),
    ("596", '*', " ", " ", r"^a$"),
    ("597", '*', " ", " ", r"^(ab?|a?b)$"),
    ("598", '*', " ", " ", r"^a$"),
    ("599", '*', " ", " ", r"^a$"),
    ("600", '*', "013", "01234567", r"^8*6?3?a([bdfhloqrtu]|[cgjkmnps])+[vxyz]*e*2?4*0?1?7*$"),
    ("610", '*', "012", "01234567", r"^8*6?3?ab*([fhloqrtu]|[cdgjkmnps])+[vxyz]*e*2?4*0?1?7*$"),
    ("611", '*', "012", "01234567", r"^8*6?3?a([fhlqtu]|[cdegkmnps])+[vxyz]*j*2?4*0?1?7*$"),
    ("630", '*', "0123456789", "01234567", r"^8*6?3?a([fhlort]|[dgkmnps])+[vxyz]*e*2?4*0?1?7*$"),
    ("647", '*', " ", "01234567", r"^8*6?3?ac*d?g*[vxyz]*e*2?4*0?1?7*$"),
    ("648", '*', " ", "01234567", r"^8*6?3?a[vxyz]*e*2?4*0?1?7*$"),
    ("650", '*', " 012", "01234567", r"^8*6?3?ab?c?d?g*[vxyz]*e*2?4*0?1?7*$"),
    ("651", '*', " ", "01234567", r"^8*6?3?ag*[vxyz]*e*2?4*0?1?7*$"),
    ("652", '*', " ", " ", r"^a[xyz]*$"),
    ("653", '*', " 012", " 0123456", r"^8*6?a+5?0?1?7*$"),
    ("654", '*', " 012", " ", r"^8*6?3?(c[ab])+[vyz]*e*2?0?1?$"),
    ("655", '*', " 0", "01234567", r"^8*6?3?c?a(c?b)*[vxyz]*2?5?0?1?7*$"),
    ("656", '*', " ", "7", r"^8*6?3?ak?[vxyz]*2?0?1?$"),
    ("657", '*', " ", "7", r"^8*6?3?a[vxyz]*2?0?1?$"),
    ("658", '*', " ", " ", r"^8*6?3?ab*c?d?2?0?1?$"),
    ("662", '*', " ", " ", r"^8*6?(a*b?c*d?f*g*|h+)e*2?4*0?1?$"),
    ("688", '*', " ", " 7", r"^8*6?3?ag*e*2?4*0?1?$"),
    ("690", '*', " 7", " ", r"^a2?$"),
    ("692", '*', " ", " ", r"^[abcefgi]p?$"),
    ("700", '*', "013", " 2", r"^8*6?3?a([bdfhloqrtux]|[cgijkmnps])+e*2?4*5?0?1?7*$"),
    ("705", '*', "0123", "012", r"^a([bdfhlort]|[cgkmnps])+e*$"),
    ("710", '*', "012", " 2", r"^8*6?3?ab*([fhlortux]|[cdgikmnp])+e*2?4*5?0?1?7*$"),
    ("711", '*', "012", " 2", r"^8*6?3?a([fhlqtux]|[cdegiknps])+j*2?4*5?0?1?7*$"),
    ("715", '*', "012", "012", r"^ab*([fhlorstu]|[gkmnp])+e*$"),
    ("720", '*', " 12", " ", r"^8*6?ae*2?4*5?0?1?7*$"),
    ("730", '*', "0123456789", " 2", r"^8*6?3?a([fhlortx]|[dgikmnps])+e*2?4*5?0?1?7*$"),
    ("740", '*', "0123456789", " 2", r"^8*6?ah?[np]*5?$"),
    ("751", '*', " ", " ", r"^8*6?3?ag*e*2?4*0?1?7*$"),
    ("752", '*', " ", " ", r"^8*6?(a*b?c*d?f*g*|h+)e*2?4*0?1?$"),
    ("753", '*', " ", " ", r"^8*6?a?b?c?2?0?1?$"),
    ("754", '*', " ", " ", r"^8*6?(ca)+d*x*z*2?0?1?$"),
    ("755", '*', " ", " ", r"^8*6?3?a[xyz]*2?$"),
    ("758", '*', " ", " ", r"^8*6?3?4*i*a2?0?1?$"),
    ("760", '*', "01", " 8", r"^8*6?a([bcdhlmstxy]|[gimow])+4*0?1?l*$"),
    ("762", '*', "01", " 8", r"^8*6?a([bcdhlmstxy]|[gimow])+4*0?1?l*$"),
    ("765", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("767", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("770", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("772", '*', "01", " 08", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("773", '*', "01", " 8", r"^8*6?3?a([bdhlmpqstuxy]|[gikmorwz])+4*5?0?1?l*$"),
    ("774", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*5?0?1?l*$"),
    ("775", '*', "01", " 8", r"^8*6?a([bcdefhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("776", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("777", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("780", '*', "01", "01234567", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("785", '*', "01", "012345678", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*0?1?l*$"),
    ("786", '*', "01", " 8", r"^8*6?a([bcdhlmpstuvxy]|[gijkmorwz])+4*0?1?l*$"),
    ("787", '*', "01", " 8", r"^8*6?a([bcdhlmstuxy]|[gikmorwz])+4*5?0?1?l*$"),
    ("788", '*', "01", " 8", r"^8*6?a([bdestx]|[inw])+4*5?l*$"),
    ("800", '*', "013", " ", r"^8*6?3?7?a([bdfhloqrtux]|[cgikmnps])+v?w*e*2?4*5?0?1?$"),
    ("810", '*', "012", " ", r"^8*6?3?ab*([fhlortux]|[cdgikmnp])+v?w*e*2?4*5?0?1?7*$"),
    ("811", '*', "012", " ", r"^8*6?3?a([fhlqtux]|[cdegiknps])+v?w*j*2?4*5?0?1?7*$"),
    ("830", '*', " ", "0123456789", r"^8*6?3?a([fhlortx]|[dgikmnps])+v?w*e*2?4*5?0?1?7*$"),
    ("840", '*', " ", "0123456789", r"^ah?v?$"),
    ("841", '?', "0", "0", r"^ab?e?$"),
    ("842", '?', "0", "0", r"^8*6?a$"),
    ("843", '*', "0", "0", r"^8*6?3?ab*c*d?e?f*m*n*7*5?$"),
    ("844", '?', "0", "0", r"^8*6?a$"),
    ("845", '*', "0", "0", r"^8*6?3?ab?c?d?f*g*q?u*2?5?$"),
    ("850", '*', " ", " ", r"^8*a+$"),
    ("851", '*', " ", " ", r"^6?3?a+b?c?d?e?fg?$"),
    ("852", '*', " 012345678", " 012", r"^8*6?3?(a[fg]?)(b[fg]?)*(c[fg]?)*d*e*h?i*j?k*l?m*n?p?q?s*t?u*x*z* 2?$"),
    ("853", '*', "0", "0", r"^8*6?ao?(bu?v?o?(cu?v?o?(du?v?o?(eu?v?o?(fu?v?o?)?)?)?)?)?(go?(hu?v?o?)?)?z*(io?(jo?(ko?(lo?)?)?)?)?m?z*(p?wz?)?y*n?x*t?$"),
    ("854", '*', "0", "0", r"^8*6?ao?(bu?v?o?(cu?v?o?(du?v?o?(eu?v?o?(fu?v?o?)?)?)?)?)?(go?(hu?v?o?)?)?z*(io?(jo?(ko?(lo?)?)?)?)?m?z*(p?wz?)?y*n?x*t?$"),
    ("855", '*', "0", "0", r"^8*6?ao?(bu?v?o?(cu?v?o?(du?v?o?(eu?v?o?(fu?v?o?)?)?)?)?)?(go?(hu?v?o?)?)?z*(io?(jo?(ko?(lo?)?)?)?)?m?z*(p?wz?)?y*n?x*t?$"),
    ("856", '*', " 012347", " 012348", r"^8*6?3?z*a+c*d*e*f*g*h*l*m*n*o?p?q*r*s*t*q*(uy?)*q*v*w*x*z* 2?7?$"),
    ("857", '*', " 147", " 012348", r"^8*6?3?z*b?c?d?f?g*h*l*m*n*q*r*s*t*q*(uy?)*q*x*z*2?7?5?e*$"),
    ("859", '*', " ", " ", r"^ab+$"),
    ("863", '*', "0", "0", r"^8*6?ao?(bo?(co?(do?(eo?(fo?)?)?)?)?)?(go?(ho?)?)?z*(i(j(k(l)?)?)?)?m?n?p?q?s*t?w?x*z*$"),
    ("864", '*', "0", "0", r"^8*6?ao?(bo?(co?(do?(eo?(fo?)?)?)?)?)?(go?(ho?)?)?z*(i(j(k(l)?)?)?)?m?n?p?q?s*t?w?x*z*$"),
    ("865", '*', "0", "0", r"^8*6?ao?(bo?(co?(do?(eo?(fo?)?)?)?)?)?(go?(ho?)?)?z*(i(j(kl?)?)?)?v*m?n?p?q?s*t?w?x*z*$"),
    ("866", '*', "0", "0", r"^8*6?ax*z*2?$"),
    ("867", '*', "0", "0", r"^8*6?ax*z*2?$"),
    ("868", '*', "0", "0", r"^8*6?ax*z*2?$"),
    ("870", '*', "0123", "012", r"^a([bdfhloqrtux]|[cgijkmnps])+e*2?4*5?$"),
    ("871", '*', "012", "012", r"^ab*([fhlortux]|[cdgikmnp])+e*2?4*5?$"),
    ("872", '*', "012", "012", r"^a([fhlqtux]|[cdegiknps])+j*2?4*5?$"),
    ("873", '*', "0123456789", "012", r"^a([fhlortx]|[dgikmnps])+e*2?4*5?$"),
    ("876", '*', "0", "0", r"^8*6?3?ab*c*d*e*h*j*l*p*r*tx*z*$"),
    ("877", '*', "0", "0", r"^8*6?3?ab*c*d*e*h*j*l*p*r*tx*z*$"),
    ("878", '*', "0", "0", r"^8*6?3?ab*c*d*e*h*j*l*p*r*tx*z*$"),
    ("880", '*', " 0123456789", " 0123456789", r"^8*63?[a-z]+[0-9]*$"),
    ("881", '*', " ", " ", r"^8*6?3?[abcdefghijklmn]+$"),
    ("882", '?', " ", " ", r"^8*6?i*a*i*w+$"),
    ("883", '*', " 012", " ", r"^8*(au?|a?u)d?x?q?c?w*0*1*$"),
    ("884", '*', " ", " ", r"^ag?k?q?u*$"),
    ("885", '*', " ", " ", r"^aw+bc?d?x*z*2?5?0*1*$"),
    ("886", '*', "012", " ", r"^2?ab[a-z0-9]+$"),
    ("887", '*', " ", " ", r"^2?a$"),
    ("909", '?', " ", " ", r"^(ab?|a?b)$"),
    ("916", '?', " ", " ", r"^a+$"),
    ("917", '?', " ", " ", r"^a$"),
    ("945", '*', " 1", " ", r"^a$"),
    ("950", '*', " ", " ", r"^(a+x*y*z*)(sa+x*y*z*)+$"),
    ("954", '?', " ", " ", r"^a$"),
    ("955", '*', " ", " ", r"^ab?$"),
    ("957", '*', " ", " ", r"^a+b*c*d*r?s*t?$"),
    ("958", '*', " ", " ", r"^ac?$"),
    ("959", '*', " ", " ", r"^f$"),
    ("960", '*', "01", " ", r"^a$"),
    ("961", '*', " ", " ", r"^ab?$"),
    ("962", '*', " ", " ", r"^acf$"),
    ("963", '*', " ", " ", r"^ab?c$"),
    ("964", '*', " ", " ", r"^acd?e?$"),
    ("966", '*', " ", " ", r"^ul$"),
    ("968", '*', " ", " ", r"^[abc]$"),
    ("970", '*', " ", " ", r"^a$"),
    ("975", '?', " ", " ", r"^(ab?|a?b)$"),
    ("976", '?', " ", " ", r"^a$"),
    ("979", '*', " ", " ", r"^.*$"),
    ("980", '?', " ", " ", r"^a$"),
    ("985", '*', " ", " ", r"^a$"),
    ("990", '*', " ", " ", r"^a+$"),
    ("992", '*', " ", " ", r"^a+$"),
    ("996", '?', " ", " ", r"^a$"),
    ("997", '*', " ", " ", r"^a+$"),
    ("A02", '*', " ", " ", r"^az?$"),
    ("ACF", '*', " ", " ", r"^8*6?3?ab?c?d?e?fg?h?i?u?5$"),
    ("AQN", '*', " ", " ", r"^a$"),
    ("BGT", '?', " ", " ", r"^a$"),
    ("BUF", '?', " 12", " ", r"^ad$"),
    ("CAT", '*', " ", " ", r"^abclh$"),
    ("CFI", '*', " 012", " ", r"^8*6?3?ab?c?d?e?fg?h?i?u?5$"),
    ("CNF", '?', " ", " ", r"^ae*n?d?c?e*$"),
    ("DEL", '?', " ", " ", r"^a$"),
    ("DGM", '?', " ", " ", r"^a$"),
    ("DRT", '*', " ", " ", r"^a$"),
    ("EST", '?', " ", " ", r"^a$"),
    ("EXP", '?', " ", " ", r"^ad?$"),
    ("FFP", '?', " ", " ", r"^ab?$"),
    ("FIN", '?', " 12", " ", r"^ad?$"),
    ("LAS", '?', " ", " ", r"^abclh$"),
    ("LCS", '*', "0", " ", r"^8*6?3?(a+[xyz]v*)+l?7*$"),
    ("LDO", '*', " ", " ", r"^ab?c?d?$"),
    ("LEO", '*', " ", " ", r"^a$"),
    ("LET", '?', " ", "0123456789", r"^a$"),
    ("LKR", '*', " ", " ", r"^ablrm?n?p?y?v?i?k?$"),
    ("MIS", '?', " ", " ", r"^a$"),
    ("MNI", '?', " ", " ", r"^a$"),
    ("MPX", '?', " ", " ", r"^a$"),
    ("NEG", '?', " ", " ", r"^a$"),
    ("NID", '?', " ", " ", r"^a$"),
    ("NLP", '?', " ", " ", r"^a$"),
    ("OBJ", '?', " ", " ", r"^a$"),
    ("OHC", '?', " ", " ", r"^a$"),
    ("ONS", '*', " ", " 7", r"^(a[xt]?|t)2?$"),
    ("ONX", '*', " ", " ", r"^(ab?c?|bc?|c)$"),
    ("PLR", '?', " ", " ", r"^ab?$"),
    ("RSC", '?', " ", " ", r"^a$"),
    ("SID", '?', " ", " ", r"^abc$"),
    ("SRC", '*', " ", " ", r"^(ab?|b)$"),
    ("SSD", '*', " ", " ", r"^a$"),
    ("STA", '?', " ", " ", r"^ab$"),
    ("TOC", '?', " ", " ", r"^a$"),
    ("UNO", '?', " ", " ", r"^a$"),
    ("VIT", '*', " ", " ", r"^bcdefg(ijk)?o?s?$"),
];

const SUBFIELD_ROWS: &[(&str, char, char, &str, &str)] = &[
    ("010", '8', '*', "^8", "8abz"),
    ("010", 'a', '?', "^8", "bz$"),
    ("010", 'b', '*', "^8ab", "b$"),
    ("010", 'z', '*', "^8az", "z$"),
    ("013", '8', '*', "^8", "86a"),
    ("013", '6', '?', "^8", "a"),
    ("013", 'a', '1', "^86", "bcdf$"),
    ("013", 'b', '?', "a", "cdf$"),
    ("013", 'c', '?', "ab", "df$"),
    ("013", 'd', '*', "abcde", "def$"),
    ("013", 'e', '*', "d", "df$"),
    ("013", 'f', '*', "abcde", "$"),
    ("015", '8', '*', "^8", "86az"),
    ("015", '6', '?', "^8", "az"),
    ("015", 'a', '*', "^86a", "azq2$"),
    ("015", 'z', '*', "^86az", "zq2$"),
    ("015", 'q', '*', "az", "q2$"),
    ("015", '2', '?', "azq", "$"),
    ("016", '8', '*', "^8", "8az"),
    ("016", 'a', '?', "^8", "z2$"),
    ("016", 'z', '*', "^8az", "z2$"),
    ("016", '2', '?', "^az", "$"),
    ("017", '8', '*', "^8", "86iaz"),
    ("017", '6', '?', "^8", "iaz"),
    ("017", 'i', '?', "^86", "az"),
    ("017", 'a', '*', "^86ia", "azb"),
    ("017", 'z', '*', "^86iaz", "zb"),
    ("017", 'b', '1', "az", "d2$"),
    ("017", 'd', '?', "b", "2$"),
    ("017", '2', '?', "bd", "$"),
    ("018", '8', '*', "^8", "86a"),
    ("018", '6', '?', "^8", "a"),
    ("018", 'a', '1', "^86", "$"),
    ("020", '8', '*', "^8", "86az"),
    ("020", '6', '?', "^8", "az"),
    ("020", 'a', '*', "^86a", "azqc$"),
    ("020", 'z', '*', "^86az", "zqc$"),
    ("020", 'q', '*', "azq", "qc$"),
    ("020", 'c', '?', "azq", "$"),
    ("022", '8', '*', "^8", "86almyz"),
    ("022", '6', '?', "^8", "almyz"),
    ("022", 'a', '?', "^86", "lmz2"),
    ("022", 'l', '?', "^86a", "mz2"),
    ("022", 'm', '*', "^86alm", "myz2"),
    ("022", 'y', '*', "^86my", "yz2"),
    ("022", 'z', '*', "^86almyz", "z2"),
    ("022", '2', '?', "^86almyz", "01$"),
    ("022", '0', '?', "^86almyz2", "1$"),
    ("022", '1', '*', "^86almyz201", "1$"),
    ("024", '8', '*', "^8", "86az"),
    ("024", '6', '?', "^8", "az"),
    ("024", 'a', '1', "^86", "zdqc2$"),
    ("024", 'd', '?', "^az", "zqc2$"),
    ("024", 'z', '1', "^86adz", "zdqc2$"),
    ("024", 'q', '*', "adzq", "*qc2$"),
    ("024", 'c', '?', "adzq", "2$"),
    ("024", '2', '?', "adzqc", "$"),
    ("025", '8', '*', "^8", "8a"),
    ("025", 'a', '+', "^8a", "a$"),
    ("026", '8', '*', "^8", "86ae"),
    ("026", '6', '?', "^8", "ae"),
    ("026", 'a', '?', "^86", "b"),
    ("026", 'b', '?', "a", "cd25$"),
    ("026", 'c', '?', "ab", "d25$"),
    ("026", 'd', '*', "bcd", "d25$"),
    ("026", 'e', '?', "^86", "25$"),
    ("026", '2', '?', "bcde", "5$"),
    ("026", '5', '*', "bcde25", "5$"),
    ("027", '8', '*', "^8", "86az"),
    ("027", '6', '?', "^8", "az"),
    ("027", 'a', '?', "^86", "zq$"),
    ("027", 'z', '*', "^86az", "zq$"),
    ("027", 'q', '*', "azq", "q$"),
    ("028", '8', '*', "^8", "86a"),
    ("028", '6', '?', "^8", "a"),
    ("028", 'a', '1', "^86", "b"),
    ("028", 'b', '1', "a", "q$"),
    ("028", 'q', '*', "b", "q$"),
    ("030", '8', '*', "^8", "86az"),
    ("030", '6', '?', "^8", "az"),
    ("030", 'a', '?', "^86", "z$"),
    ("030", 'z', '*', "^86az", "z$"),
    ("031", '8', '*', "^8", "86"),
    ("031", '6', '?', "^8", "a"),
    ("031", 'a', '1', "^86", "b"),
    ("031", 'b', '1', "a", "c"),
    ("031", 'c', '1', "b", "medtrgnopuqsyz2$"),
    ("031", 'm', '?', "c", "edtrgnopuqsyz2$"),
    ("031", 'e', '?', "cm", "dtrgnopuqsyz2$"),
    ("031", 'd', '*', "cmd", "dtrgnopuqsyz2$"),
    ("031", 't', '*', "cmdtrgno", "trgnopuqsyz2$"),
    ("031", 'r', '?', "cmdt", "gnotpuqsyz2$"),
    ("031", 'g', '?', "cmdtr", "notpuqsyz2$"),
    ("031", 'n', '?', "cmdtrg", "otpuqsyz2$"),
    ("031", 'o', '?', "cmdtrgn", "tpuqsyz2$"),
    ("031", 'p', '?', "cmdtrgno", "uqsyz2$"),
    ("031", 'u', '*', "cmdtrgnou", "uqsyz2$"),
    ("031", 'q', '*', "cmdtrgnouq", "qsyz2$"),
    ("031", 's', '*', "cmdtrgnouqs", "syz2$"),
    ("031", 'y', '*', "cmdtrgnouqsy", "yz2$"),
    ("031", 'z', '*', "cmdtrgnouqsyz", "z2$"),
    ("031", '2', '?', "cmdtrgnouqsyz", "$"),
    ("032", '8', '*', "^8", "86a"),
    ("032", '6', '?', "^8", "a"),
    ("032", 'a', '1', "^86", "b"),
    ("032", 'b', '1', "a", "$"),
    ("033", '8', '*', "^8", "863abp"),
    ("033", '6', '?', "^8", "3abp"),
    ("033", '3', '?', "^86", "abp"),
    ("033", 'a', '*', "^863abcp", "abp012$"),
    ("033", 'b', '*', "^863abcp", "abcp012$"),
    ("033", 'c', '*', "b", "abp012$"),
    ("033", 'p', '*', "^863abcp", "abp012$"),
    ("033", '0', '*', "abcp0", "012$"),
    ("033", '1', '*', "abcp01", "12$"),
    ("033", '2', '?', "abcp01", "$"),
    ("040", '8', '*', "^", "86a"),
    ("040", '6', '?', "^8", "a"),
    ("040", 'a', '1', "^86", "b"),
    ("040", 'b', '1', "a", "cde$"),
    ("040", 'c', '?', "b", "de$"),
    ("040", 'd', '*', "bcd", "de$"),
    ("040", 'e', '?', "bcde", "e$"),
];

const OBSOLETE_ROWS: &[&str] = &[
    "009", "011", "039", "090", "091", "211", "212", "214", "241", "265", "301", "302", "303", "304", "305", "308", "315", "350", "359", "440", "503", "512", "517", "523", "527", "537", "543", "570", "582", "590", "597", "599", "652", "692", "705", "715", "755", "840", "851", "870", "871", "872", "873", "917", "958", "962", "963", "964", "975", "976", "980", "992",
];

const UNDESIRABLE_ROWS: &[(&str, &str)] = &[
    ("260", "Prefer field 264"),
    ("720", "Prefer a controlled field in the 7xx block"),
    ("653", "Prefer a controlled subject term in the 6xx block"),
];

lazy_static! {
    /// Content rules for control fields, by tag.
    pub static ref CONTROL_FIELDS: BTreeMap<&'static str, ControlFieldSpec> =
        CONTROL_FIELD_ROWS
            .iter()
            .map(|&(tag, card, pattern)| {
                (tag, ControlFieldSpec {
                    cardinality: Cardinality::from_symbol(card),
                    pattern: compile(pattern),
                })
            })
            .collect();

    /// Indicator and subfield rules for data fields, by tag.
    pub static ref DATA_FIELDS: BTreeMap<&'static str, DataFieldSpec> =
        DATA_FIELD_ROWS
            .iter()
            .map(|&(tag, card, ind1, ind2, pattern)| {
                (tag, DataFieldSpec {
                    cardinality: Cardinality::from_symbol(card),
                    indicators: [ind1, ind2],
                    subfields: compile(pattern),
                    allowed_codes: code_alphabet(pattern),
                })
            })
            .collect();

    /// Per-subfield ordering and cardinality rules, by tag then code.
    pub static ref SUBFIELDS: BTreeMap<&'static str, BTreeMap<char, SubfieldSpec>> = {
        let mut map: BTreeMap<&'static str, BTreeMap<char, SubfieldSpec>> = BTreeMap::new();
        for &(tag, code, card, before, after) in SUBFIELD_ROWS {
            map.entry(tag).or_default().insert(code, SubfieldSpec {
                cardinality: Cardinality::from_symbol(card),
                before,
                after,
            });
        }
        map
    };

    /// Tags that are no longer part of the format.
    pub static ref OBSOLETE_FIELDS: BTreeSet<&'static str> =
        OBSOLETE_ROWS.iter().copied().collect();

    /// Tags that are valid but discouraged, with the preferred alternative.
    pub static ref UNDESIRABLE_FIELDS: BTreeMap<&'static str, &'static str> =
        UNDESIRABLE_ROWS.iter().copied().collect();

    /// Abbreviations that full-level cataloguing spells out, with their
    /// expansions. Not yet consulted by the checker.
    pub static ref ABBREVIATIONS: Vec<(Regex, &'static str)> = vec![
        (compile(r"\bpp*\b\.?"), "pages"),
        (compile(r"\bsh\b\.?"), "sheet(s)"),
        (compile(r"\billu?s?\b\.?"), "illustrations"),
        (compile(r"\bfacsi?m?s?\b\.?"), "facsimiles"),
        (compile(r"\bgeneal\b\.?"), "genealogical"),
        (compile(r"\bports?\b\.?"), "portraits"),
        (compile(r"\bcol\b\.?"), "colour or column(s)"),
        (compile(r"\bmins?\b\.?"), "minute(s) or miniature"),
    ];
}

/// Tag groups a full record is expected to carry. Not yet consulted by the
/// checker.
pub const DESIRABLE_FIELDS: &[&str] = &["1xx", "264", "300", "336", "337", "338"];
