//! Size-report wire format.
//!
//! A probe program prints one JSON array of 5-element arrays:
//!
//! ```text
//! [
//!   [ "C", "long", "signed", "integer", 8 ],
//!   [ "C", "float", "signed", "float", 4 ]
//! ]
//! ```
//!
//! Byte sizes are authoritative only for the compiler and platform the probe
//! ran on; records are build artifacts, regenerated per target, never
//! persisted as source of truth.

use serde::{Deserialize, Serialize};

use crate::descriptor::{Interpretation, NumericKind, Signage, TypeDescriptor};
use crate::error::Result;

/// One probed `(descriptor, interpretation)` pair with its native byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRecord {
    pub type_system: String,
    pub type_name: String,
    pub signage: Signage,
    pub numeric_kind: NumericKind,
    pub byte_size: u64,
}

impl SizeRecord {
    /// The descriptor half of this record.
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::new(self.type_system.clone(), self.type_name.clone())
    }

    /// The interpretation half of this record.
    pub fn interpretation(&self) -> Interpretation {
        Interpretation::new(self.signage, self.numeric_kind)
    }
}

/// The on-the-wire shape of one record.
type ReportRow = (String, String, Signage, NumericKind, u64);

impl From<SizeRecord> for ReportRow {
    fn from(r: SizeRecord) -> Self {
        (
            r.type_system,
            r.type_name,
            r.signage,
            r.numeric_kind,
            r.byte_size,
        )
    }
}

impl From<ReportRow> for SizeRecord {
    fn from((type_system, type_name, signage, numeric_kind, byte_size): ReportRow) -> Self {
        SizeRecord {
            type_system,
            type_name,
            signage,
            numeric_kind,
            byte_size,
        }
    }
}

impl Serialize for SizeRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (
            &self.type_system,
            &self.type_name,
            self.signage,
            self.numeric_kind,
            self.byte_size,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SizeRecord {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let row = ReportRow::deserialize(deserializer)?;
        Ok(row.into())
    }
}

/// Parse a probe program's stdout into ordered size records.
pub fn parse_report(input: &str) -> Result<Vec<SizeRecord>> {
    let records: Vec<SizeRecord> = serde_json::from_str(input)?;
    Ok(records)
}

/// Render records back to the wire format.
pub fn render_report(records: &[SizeRecord]) -> String {
    // Vec<SizeRecord> serialization is infallible.
    serde_json::to_string(records).expect("size records serialize")
}

/// Collapse records that describe the same underlying type.
///
/// Two records match when their type system, interpretation, and probed byte
/// size all agree; the earliest spelling wins, so registry order decides the
/// canonical name for each width.
pub fn preferred_spellings(records: &[SizeRecord]) -> Vec<&SizeRecord> {
    let mut chosen: Vec<&SizeRecord> = Vec::new();
    for record in records {
        let duplicate = chosen.iter().any(|c| {
            c.type_system == record.type_system
                && c.signage == record.signage
                && c.numeric_kind == record.numeric_kind
                && c.byte_size == record.byte_size
        });
        if !duplicate {
            chosen.push(record);
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SizeRecord> {
        vec![
            SizeRecord {
                type_system: "posix".to_string(),
                type_name: "long".to_string(),
                signage: Signage::Signed,
                numeric_kind: NumericKind::Integer,
                byte_size: 8,
            },
            SizeRecord {
                type_system: "C".to_string(),
                type_name: "float".to_string(),
                signage: Signage::Signed,
                numeric_kind: NumericKind::Floating,
                byte_size: 4,
            },
        ]
    }

    #[test]
    fn parse_report_shape() {
        let input = r#"[
            [ "posix", "long", "signed", "integer", 8 ],
            [ "C", "float", "signed", "float", 4 ]
        ]"#;
        let records = parse_report(input).unwrap();
        assert_eq!(records, sample());
    }

    #[test]
    fn report_round_trip_preserves_order() {
        let records = sample();
        let rendered = render_report(&records);
        let parsed = parse_report(&rendered).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn empty_report() {
        assert!(parse_report("[]").unwrap().is_empty());
        assert_eq!(render_report(&[]), "[]");
    }

    #[test]
    fn parse_rejects_short_rows() {
        assert!(parse_report(r#"[["C", "int", "signed", "integer"]]"#).is_err());
    }

    #[test]
    fn parse_rejects_negative_size() {
        assert!(parse_report(r#"[["C", "int", "signed", "integer", -1]]"#).is_err());
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert!(parse_report(r#"[["C", "int", "mystery", "integer", 4]]"#).is_err());
    }

    #[test]
    fn preferred_spellings_keeps_earliest_per_width() {
        let record = |system: &str, name: &str, size: u64| SizeRecord {
            type_system: system.to_string(),
            type_name: name.to_string(),
            signage: Signage::Signed,
            numeric_kind: NumericKind::Integer,
            byte_size: size,
        };

        // long and long long both probe to 8 bytes on LP64; the first
        // listed spelling is the canonical one.
        let records = vec![
            record("C", "int", 4),
            record("C", "long", 8),
            record("C", "long long", 8),
            record("posix", "ssize_t", 8),
        ];

        let preferred = preferred_spellings(&records);
        let names: Vec<&str> = preferred
            .iter()
            .map(|r| r.type_name.as_str())
            .collect();
        // posix 8-byte entry survives: widths collapse within one system only.
        assert_eq!(names, ["int", "long", "ssize_t"]);
    }

    #[test]
    fn descriptor_halves_recoverable() {
        let record = &sample()[0];
        assert_eq!(record.descriptor(), TypeDescriptor::new("posix", "long"));
        assert_eq!(
            record.interpretation(),
            Interpretation::new(Signage::Signed, NumericKind::Integer)
        );
    }
}
