//! Allow-listed, partial member field updates.
//!
//! Submitted fields are validated against `MUTABLE_FIELDS`. A value that is
//! JSON null, the string "null", or an empty string means "leave unchanged"
//! and is dropped before anything reaches the database.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::common::{CoreError, CoreResult};

/// Storage type of a mutable member column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Integer,
    Flag,
}

/// Member columns callers may set on create or update.
pub const MUTABLE_FIELDS: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("alias_name", FieldKind::Text),
    ("surname", FieldKind::Text),
    ("designation", FieldKind::Text),
    ("join_date", FieldKind::Date),
    ("birth_date", FieldKind::Date),
    ("occupation", FieldKind::Text),
    ("national_id", FieldKind::Text),
    ("tax_id", FieldKind::Text),
    ("staying_with", FieldKind::Text),
    ("guardian_name", FieldKind::Text),
    ("guardian_occupation", FieldKind::Text),
    ("nominee_name", FieldKind::Text),
    ("nominee_relation", FieldKind::Text),
    ("family_members", FieldKind::Integer),
    ("female_count", FieldKind::Integer),
    ("male_count", FieldKind::Integer),
    ("mobile1", FieldKind::Text),
    ("mobile2", FieldKind::Text),
    ("landline", FieldKind::Text),
    ("referrer_member_no", FieldKind::Text),
    ("owns_residence", FieldKind::Flag),
    ("temp_house_no", FieldKind::Text),
    ("temp_colony", FieldKind::Text),
    ("temp_mandal", FieldKind::Text),
    ("temp_district", FieldKind::Text),
    ("temp_landmark", FieldKind::Text),
    ("temp_pin", FieldKind::Text),
    ("perm_house_no", FieldKind::Text),
    ("perm_colony", FieldKind::Text),
    ("perm_mandal", FieldKind::Text),
    ("perm_district", FieldKind::Text),
    ("perm_landmark", FieldKind::Text),
    ("perm_pin", FieldKind::Text),
    ("account_no", FieldKind::Text),
    ("account_name", FieldKind::Text),
    ("ifsc_code", FieldKind::Text),
    ("bank_name", FieldKind::Text),
    ("is_suspended", FieldKind::Flag),
    ("withdrawal_status_date", FieldKind::Date),
    ("withdrawal_status", FieldKind::Text),
    ("withdrawal_reason_code", FieldKind::Text),
    ("withdrawal_reason", FieldKind::Text),
    ("withdrawal_approved_by", FieldKind::Text),
    ("withdrawal_applicant_name", FieldKind::Text),
    ("withdrawal_applicant_relation", FieldKind::Text),
    ("surety_member_no", FieldKind::Text),
    ("reason", FieldKind::Text),
    ("is_active", FieldKind::Flag),
];

/// Legacy "no date" marker sent by older clients
const ZERO_DATE: &str = "0000-00-00";

/// A validated column value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Integer(i32),
    Flag(bool),
}

/// Validated set of column assignments, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPatch {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl MemberPatch {
    /// Validate a submitted JSON object.
    ///
    /// Unknown fields and malformed values are rejected; blank values are dropped.
    pub fn from_json(input: &Map<String, Value>) -> CoreResult<Self> {
        let mut fields = BTreeMap::new();

        for (key, value) in input {
            let (column, kind) = MUTABLE_FIELDS
                .iter()
                .find(|(name, _)| *name == key.as_str())
                .copied()
                .ok_or_else(|| CoreError::Validation(format!("field '{}' cannot be set", key)))?;

            if is_blank(value) {
                continue;
            }

            if let Some(parsed) = parse_value(column, kind, value)? {
                fields.insert(column, parsed);
            }
        }

        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column assignments in a stable (alphabetical) order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(column, value)| (*column, value))
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.keys().copied().collect()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "null",
        _ => false,
    }
}

fn invalid(column: &str, expected: &str) -> CoreError {
    CoreError::Validation(format!("field '{}' must be {}", column, expected))
}

/// Returns `None` when the value means "no change" for its kind.
fn parse_value(column: &str, kind: FieldKind, value: &Value) -> CoreResult<Option<FieldValue>> {
    let parsed = match kind {
        FieldKind::Text => match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            _ => return Err(invalid(column, "text")),
        },
        FieldKind::Date => match value {
            Value::String(s) if s == ZERO_DATE => return Ok(None),
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| invalid(column, "a date (YYYY-MM-DD)"))?,
            _ => return Err(invalid(column, "a date (YYYY-MM-DD)")),
        },
        FieldKind::Integer => {
            let number = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            number
                .and_then(|n| i32::try_from(n).ok())
                .map(FieldValue::Integer)
                .ok_or_else(|| invalid(column, "an integer"))?
        }
        FieldKind::Flag => {
            let flag = match value {
                Value::Bool(b) => Some(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(0) => Some(false),
                    Some(1) => Some(true),
                    _ => None,
                },
                Value::String(s) => match s.as_str() {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                },
                _ => None,
            };
            flag.map(FieldValue::Flag)
                .ok_or_else(|| invalid(column, "a boolean"))?
        }
    };

    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> CoreResult<MemberPatch> {
        MemberPatch::from_json(value.as_object().unwrap())
    }

    #[test]
    fn test_blank_values_are_dropped() {
        let p = patch(json!({ "name": "", "mobile1": null, "surname": "X" })).unwrap();

        assert_eq!(p.columns(), vec!["surname"]);
        assert_eq!(p.get("surname"), Some(&FieldValue::Text("X".to_string())));
    }

    #[test]
    fn test_literal_null_string_is_dropped() {
        let p = patch(json!({ "bank_name": "null", "ifsc_code": "SBIN0001" })).unwrap();
        assert!(!p.contains("bank_name"));
        assert!(p.contains("ifsc_code"));
    }

    #[test]
    fn test_whitespace_is_kept_as_text() {
        let p = patch(json!({ "reason": " " })).unwrap();
        assert_eq!(p.get("reason"), Some(&FieldValue::Text(" ".to_string())));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = patch(json!({ "organization_id": 9 })).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("organization_id")));

        assert!(patch(json!({ "member_no": "3001" })).is_err());
        assert!(patch(json!({ "image": "x.png" })).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected_even_when_blank() {
        assert!(patch(json!({ "created_by": "" })).is_err());
    }

    #[test]
    fn test_dates() {
        let p = patch(json!({ "join_date": "2024-02-29" })).unwrap();
        assert_eq!(
            p.get("join_date"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );

        assert!(patch(json!({ "join_date": "29/02/2024" })).is_err());
        assert!(patch(json!({ "join_date": 20240229 })).is_err());
    }

    #[test]
    fn test_zero_date_means_no_change() {
        let p = patch(json!({ "withdrawal_status_date": "0000-00-00" })).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_integers_accept_numeric_strings() {
        let p = patch(json!({ "family_members": "4", "male_count": 2 })).unwrap();
        assert_eq!(p.get("family_members"), Some(&FieldValue::Integer(4)));
        assert_eq!(p.get("male_count"), Some(&FieldValue::Integer(2)));

        assert!(patch(json!({ "female_count": "two" })).is_err());
        assert!(patch(json!({ "female_count": 1.5 })).is_err());
        assert!(patch(json!({ "female_count": 99999999999i64 })).is_err());
    }

    #[test]
    fn test_flags() {
        let p = patch(json!({ "is_active": 0, "is_suspended": "1", "owns_residence": true }))
            .unwrap();
        assert_eq!(p.get("is_active"), Some(&FieldValue::Flag(false)));
        assert_eq!(p.get("is_suspended"), Some(&FieldValue::Flag(true)));
        assert_eq!(p.get("owns_residence"), Some(&FieldValue::Flag(true)));

        assert!(patch(json!({ "is_active": "yes" })).is_err());
        assert!(patch(json!({ "is_active": 2 })).is_err());
    }

    #[test]
    fn test_numbers_are_accepted_as_text() {
        let p = patch(json!({ "mobile1": 9876543210i64 })).unwrap();
        assert_eq!(
            p.get("mobile1"),
            Some(&FieldValue::Text("9876543210".to_string()))
        );
        assert!(patch(json!({ "mobile1": ["a"] })).is_err());
    }

    #[test]
    fn test_every_column_is_listed_once() {
        let mut names: Vec<&str> = MUTABLE_FIELDS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MUTABLE_FIELDS.len());
    }
}
