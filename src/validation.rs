//! Form sanitization and validation helpers
//!
//! Every submitted form goes through the same two steps: sanitize (trim and
//! escape) then validate. Validation runs against the sanitized value, which is
//! the one that gets stored; length limits count the characters as typed.

use std::borrow::Cow;

use quick_xml::escape::{escape, unescape};
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::utils::parse_date;

/// Upper bound on author name parts, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// A single failed rule, scoped to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Trim and escape a required text field. Missing fields become empty.
pub fn sanitize(raw: Option<String>) -> String {
    raw.map(|value| escape(value.trim()).into_owned())
        .unwrap_or_default()
}

/// Trim and escape an optional field. Empty input counts as absent.
pub fn sanitize_optional(raw: Option<String>) -> Option<String> {
    let value = sanitize(raw);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Split repeated and/or comma separated id values into a de-duplicated list.
pub fn split_ids(raw: Vec<String>) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw
        .iter()
        .flat_map(|value| value.split(','))
        .map(|id| escape(id.trim()).into_owned())
        .filter(|id| !id.is_empty())
    {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Flatten validator output into a list ordered by the form's field order.
pub fn collect_errors(result: Result<(), ValidationErrors>, order: &[&str]) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for field in order {
        for (name, list) in by_field.iter() {
            let name: &str = name.as_ref();
            if name != *field {
                continue;
            }
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(FieldError::new(*field, message));
            }
        }
    }
    out
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Character count of a sanitized value before escaping
fn typed_length(value: &str) -> usize {
    match unescape(value) {
        Ok(raw) => raw.chars().count(),
        Err(_) => value.chars().count(),
    }
}

/// Author first name: bounded length (emptiness is checked separately)
pub fn first_name_length(value: &str) -> Result<(), ValidationError> {
    if typed_length(value) > MAX_NAME_LENGTH {
        return Err(rule_error("length", "First name is too long."));
    }
    Ok(())
}

/// Author family name: letters only, bounded length
pub fn family_name_rules(value: &str) -> Result<(), ValidationError> {
    if !value.chars().all(char::is_alphabetic) {
        return Err(rule_error(
            "alpha",
            "Family name has non-alphanumeric characters.",
        ));
    }
    if typed_length(value) > MAX_NAME_LENGTH {
        return Err(rule_error("length", "Family name is too long."));
    }
    Ok(())
}

pub fn calendar_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(rule_error("date", "Invalid date")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(sanitize(Some("  Austen  ".into())), "Austen");
        assert_eq!(
            sanitize(Some("<b>Tom & Jerry</b>".into())),
            "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("   ".into())), "");
    }

    #[test]
    fn test_sanitize_optional() {
        assert_eq!(sanitize_optional(Some(" ".into())), None);
        assert_eq!(sanitize_optional(None), None);
        assert_eq!(
            sanitize_optional(Some(" 1775-12-16 ".into())),
            Some("1775-12-16".into())
        );
    }

    #[test]
    fn test_split_ids() {
        assert_eq!(
            split_ids(vec!["a,b".into(), "c".into(), " b ".into(), "".into()]),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_ids(Vec::new()).is_empty());
    }

    #[test]
    fn test_family_name_rules() {
        assert!(family_name_rules("Austen").is_ok());
        assert!(family_name_rules("Brontë").is_ok());
        assert!(family_name_rules("Austen2").is_err());
        assert!(family_name_rules("Le Guin").is_err());
        assert!(family_name_rules(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_name_length_counts_typed_characters() {
        let typed = format!("{}&", "a".repeat(MAX_NAME_LENGTH - 1));
        let stored = sanitize(Some(typed));
        assert!(stored.chars().count() > MAX_NAME_LENGTH);
        assert!(first_name_length(&stored).is_ok());

        let stored = sanitize(Some(format!("{}&", "a".repeat(MAX_NAME_LENGTH))));
        let err = first_name_length(&stored).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("First name is too long."));
    }

    #[test]
    fn test_calendar_date() {
        assert!(calendar_date("1817-07-18").is_ok());
        let err = calendar_date("18/07/1817").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid date"));
    }
}
