//! Person record, dialog input and filter types.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Column width of `records.name` (`VARCHAR(255)`).
pub const NAME_MAX_CHARS: usize = 255;

/// One row of the `records` table as shown in the table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i32,
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Raw text of the name/age dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordForm {
    pub name: String,
    pub age: String,
}

/// Parsed dialog input, ready to be bound to an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: Option<String>,
    pub age: i32,
}

impl RecordForm {
    /// Pre-filled form for editing an existing row.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            age: record.age.map(|a| a.to_string()).unwrap_or_default(),
        }
    }

    pub fn parse(&self) -> Result<NewRecord, AppError> {
        if self.name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_CHARS
            )));
        }
        let age = self
            .age
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(format!("age must be an integer, got '{}'", self.age)))?;
        Ok(NewRecord {
            name: Some(self.name.clone()),
            age,
        })
    }

    /// Like [`parse`](Self::parse), but a blank name over a NULL one stays NULL.
    pub fn parse_edit(&self, current: &Record) -> Result<NewRecord, AppError> {
        let mut input = self.parse()?;
        if current.name.is_none() && self.name.is_empty() {
            input.name = None;
        }
        Ok(input)
    }
}

/// Result of a modal form: either the entered value or a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FormOutcome<T> {
    Accepted(T),
    Cancelled,
}

/// Answer to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confirmation {
    Yes,
    No,
}

/// Narrows the visible rows. Every present criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Case-insensitive substring of `name`; `%` and `_` match literally.
    pub name_contains: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl RecordFilter {
    /// Drops blank criteria and checks the age range. `None` means "no filter".
    pub fn normalize(self) -> Result<Option<Self>, AppError> {
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_age ({}) is greater than max_age ({})",
                    min, max
                )));
            }
        }
        let name_contains = self
            .name_contains
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let filter = Self {
            name_contains,
            ..self
        };
        if filter == Self::default() {
            Ok(None)
        } else {
            Ok(Some(filter))
        }
    }

    /// LIKE pattern for `name_contains`, escaped with `\`.
    pub fn name_pattern(&self) -> Option<String> {
        self.name_contains.as_deref().map(|needle| {
            let mut pattern = String::with_capacity(needle.len() + 2);
            pattern.push('%');
            for c in needle.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str) -> RecordForm {
        RecordForm {
            name: name.to_string(),
            age: age.to_string(),
        }
    }

    #[test]
    fn parse_accepts_padded_age() {
        let rec = form("Alice", " 30 ").parse().unwrap();
        assert_eq!(rec.name.as_deref(), Some("Alice"));
        assert_eq!(rec.age, 30);
    }

    #[test]
    fn parse_rejects_non_integer_age() {
        for bad in ["", "thirty", "30.5", "99999999999"] {
            let err = form("Alice", bad).parse().unwrap_err();
            assert_eq!(err.code(), "VALIDATION_ERROR", "age {:?}", bad);
        }
    }

    #[test]
    fn parse_rejects_overlong_name() {
        let long = "x".repeat(NAME_MAX_CHARS + 1);
        assert!(form(&long, "1").parse().is_err());
        assert!(form(&"x".repeat(NAME_MAX_CHARS), "1").parse().is_ok());
    }

    #[test]
    fn from_record_prefills_text() {
        let f = RecordForm::from_record(&Record {
            id: 7,
            name: Some("Bob".into()),
            age: Some(41),
        });
        assert_eq!(f, form("Bob", "41"));

        let f = RecordForm::from_record(&Record {
            id: 8,
            name: None,
            age: None,
        });
        assert_eq!(f, form("", ""));
    }

    #[test]
    fn parse_edit_keeps_null_name_when_left_blank() {
        let nameless = Record {
            id: 3,
            name: None,
            age: Some(5),
        };
        assert_eq!(form("", "6").parse_edit(&nameless).unwrap().name, None);
        assert_eq!(
            form("Dana", "6").parse_edit(&nameless).unwrap().name.as_deref(),
            Some("Dana")
        );

        let named = Record {
            name: Some("Eve".into()),
            ..nameless
        };
        assert_eq!(form("", "6").parse_edit(&named).unwrap().name.as_deref(), Some(""));
    }

    #[test]
    fn form_outcome_wire_format() {
        let accepted: FormOutcome<RecordForm> =
            serde_json::from_str(r#"{"kind":"accepted","value":{"name":"A","age":"1"}}"#).unwrap();
        assert_eq!(accepted, FormOutcome::Accepted(form("A", "1")));

        let cancelled: FormOutcome<RecordForm> =
            serde_json::from_str(r#"{"kind":"cancelled"}"#).unwrap();
        assert_eq!(cancelled, FormOutcome::Cancelled);

        let yes: Confirmation = serde_json::from_str(r#""yes""#).unwrap();
        assert_eq!(yes, Confirmation::Yes);
    }

    #[test]
    fn normalize_blank_filter_is_none() {
        let f = RecordFilter {
            name_contains: Some("   ".into()),
            min_age: None,
            max_age: None,
        };
        assert_eq!(f.normalize().unwrap(), None);
    }

    #[test]
    fn normalize_rejects_inverted_age_range() {
        let f = RecordFilter {
            name_contains: None,
            min_age: Some(40),
            max_age: Some(30),
        };
        assert_eq!(f.normalize().unwrap_err().code(), "VALIDATION_ERROR");
    }

    #[test]
    fn name_pattern_escapes_wildcards() {
        let f = RecordFilter {
            name_contains: Some(r"50%_a\b".into()),
            ..Default::default()
        };
        assert_eq!(f.name_pattern().unwrap(), r"%50\%\_a\\b%");
        assert_eq!(RecordFilter::default().name_pattern(), None);
    }
}
