use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Field-scoped validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Removes the message for a field, if any.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Returns the message recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns whether a message is recorded for a field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{field}: {message}")?;
            first = false;
        }

        Ok(())
    }
}

/// Per-row validation failures of a batch, keyed by zero-based row index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowErrors(BTreeMap<usize, FieldErrors>);

impl RowErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the errors of one row. Empty error sets are not stored.
    pub fn insert(&mut self, row: usize, errors: FieldErrors) {
        if errors.is_empty() {
            self.0.remove(&row);
        } else {
            self.0.insert(row, errors);
        }
    }

    /// Returns the errors recorded for a row.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&FieldErrors> {
        self.0.get(&row)
    }

    /// Clears one field's message on one row.
    pub fn clear_field(&mut self, row: usize, field: &str) {
        if let Some(errors) = self.0.get_mut(&row) {
            errors.remove(field);
            if errors.is_empty() {
                self.0.remove(&row);
            }
        }
    }

    /// Drops a removed row's errors and shifts later rows down by one.
    pub fn remove_row(&mut self, row: usize) {
        let shifted = std::mem::take(&mut self.0)
            .into_iter()
            .filter(|(index, _)| *index != row)
            .map(|(index, errors)| {
                if index > row {
                    (index - 1, errors)
                } else {
                    (index, errors)
                }
            })
            .collect();
        self.0 = shifted;
    }

    /// Returns whether every row passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the failed row indexes in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// Iterates `(row, errors)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FieldErrors)> {
        self.0.iter().map(|(row, errors)| (*row, errors))
    }
}

impl Display for RowErrors {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (row, errors) in self.iter() {
            if !first {
                formatter.write_str(" | ")?;
            }
            write!(formatter, "row {}: {errors}", row + 1)?;
            first = false;
        }

        Ok(())
    }
}
