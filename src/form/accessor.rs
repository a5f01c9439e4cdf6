//! Typed reads over the raw text a user entered into a form.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel shown for a Yes/No group with no option picked.
pub const NOT_SELECTED: &str = "Not Selected";

/// Outcome of coercing raw input into a typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Value(T),
    Missing,
    Invalid(String),
}

impl<T: Copy> Parsed<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Parsed::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Parsed::Value(_))
    }
}

impl Parsed<i64> {
    /// Whether the field counts as filled in: present, numeric and non-zero.
    pub fn is_filled(&self) -> bool {
        matches!(self, Parsed::Value(value) if *value != 0)
    }
}

/// State of a radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(String),
    NotSelected,
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Selection::Selected(value) if value == super::field::YES)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::Selected(value) => value,
            Selection::NotSelected => NOT_SELECTED,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text values of one form keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    values: BTreeMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, raw: impl Into<String>) -> Self {
        self.set(id, raw);
        self
    }

    pub fn set(&mut self, id: &str, raw: impl Into<String>) {
        self.values.insert(id.to_string(), raw.into());
    }

    pub fn clear(&mut self, id: &str) {
        self.values.remove(id);
    }

    pub fn raw(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn integer(&self, id: &str) -> Parsed<i64> {
        match self.trimmed(id) {
            None => Parsed::Missing,
            Some(text) => text
                .parse::<i64>()
                .map(Parsed::Value)
                .unwrap_or_else(|_| Parsed::Invalid(format!("`{text}` is not a whole number"))),
        }
    }

    pub fn decimal(&self, id: &str) -> Parsed<f64> {
        match self.trimmed(id) {
            None => Parsed::Missing,
            Some(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Parsed::Value(value),
                _ => Parsed::Invalid(format!("`{text}` is not a number")),
            },
        }
    }

    /// Text of a select input; empty selections read as `None`.
    pub fn text(&self, id: &str) -> Option<String> {
        self.trimmed(id).map(str::to_string)
    }

    pub fn selection(&self, id: &str) -> Selection {
        self.trimmed(id)
            .map(|value| Selection::Selected(value.to_string()))
            .unwrap_or(Selection::NotSelected)
    }

    /// Selection with a fallback used when nothing was picked.
    pub fn selection_or(&self, id: &str, default: &str) -> String {
        self.trimmed(id).unwrap_or(default).to_string()
    }

    fn trimmed(&self, id: &str) -> Option<&str> {
        self.values
            .get(id)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}
