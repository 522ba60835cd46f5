use crate::error::{FieldViolation, ValidationError};
use std::{fmt::Display, ops::RangeInclusive};

/// Collects field-level violations so they can be reported together
#[derive(Debug, Default)]
pub struct Fields {
    violations: Vec<FieldViolation>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.violations.push(FieldViolation { field, message });
    }

    /// Records `message` against `field` unless `ok` holds
    pub fn check(&mut self, field: &'static str, ok: bool, message: impl FnOnce() -> String) {
        if !ok {
            self.push(field, message());
        }
    }

    pub fn required<T>(&mut self, field: &'static str, value: &Option<T>) {
        self.check(field, value.is_some(), || "is required".to_string());
    }

    /// Non-blank text of at most `max_len` characters
    pub fn text(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.push(field, "must not be blank".to_string());
        } else if value.chars().count() > max_len {
            self.push(field, format!("must be at most {max_len} characters"));
        }
    }

    pub fn in_range<T>(&mut self, field: &'static str, value: T, range: RangeInclusive<T>)
    where
        T: PartialOrd + Display,
    {
        if !range.contains(&value) {
            self.push(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Structural(self.violations))
        }
    }
}
