//! Static field tables mapping normalized raw keys onto output fields.
//!
//! Each output field is declared once as a [`FieldSpec`]: its own name plus
//! any raw aliases. [`FieldReader`] resolves a spec against a raw record and
//! converts the value to the field's type, reporting the record index and
//! field name when something doesn't fit.

use chrono::NaiveDate;
use serde_json::Value;

use super::types::RawRecord;
use crate::errors::FmpError;

/// Declaration of one output field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Output field name, matched against normalized raw keys first
    pub name: &'static str,

    /// Raw keys tried, in order, when `name` is absent
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str) -> Self {
        Self { name, aliases: &[] }
    }

    pub const fn aliased(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// All raw keys this field accepts, own name first.
    pub fn raw_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Typed access to one raw record through field specs.
pub struct FieldReader<'a> {
    record: &'a RawRecord,
    index: usize,
}

impl<'a> FieldReader<'a> {
    /// `index` is the record's position in the batch, used in error messages.
    pub fn new(record: &'a RawRecord, index: usize) -> Self {
        Self { record, index }
    }

    /// The first non-null value under the field's name or one of its aliases.
    pub fn value(&self, spec: &FieldSpec) -> Option<&'a Value> {
        spec.raw_keys()
            .filter_map(|key| self.record.get(key))
            .find(|value| !value.is_null())
    }

    pub fn required_string(&self, spec: &FieldSpec) -> Result<String, FmpError> {
        self.optional_string(spec)?
            .ok_or_else(|| self.error(spec, "missing required field"))
    }

    pub fn optional_string(&self, spec: &FieldSpec) -> Result<Option<String>, FmpError> {
        match self.value(spec) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.error(spec, &format!("expected a string, got {}", other))),
        }
    }

    /// Integers; floats are accepted when they have no fractional part.
    pub fn optional_i64(&self, spec: &FieldSpec) -> Result<Option<i64>, FmpError> {
        let Some(value) = self.value(spec) else {
            return Ok(None);
        };

        if let Some(n) = value.as_i64() {
            return Ok(Some(n));
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
            _ => Err(self.error(spec, &format!("expected an integer, got {}", value))),
        }
    }

    /// `YYYY-MM-DD`, optionally followed by a time part which is dropped.
    pub fn optional_date(&self, spec: &FieldSpec) -> Result<Option<NaiveDate>, FmpError> {
        let Some(raw) = self.optional_string(spec)? else {
            return Ok(None);
        };

        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| self.error(spec, &format!("expected a YYYY-MM-DD date, got '{}'", raw)))
    }

    fn error(&self, spec: &FieldSpec, detail: &str) -> FmpError {
        FmpError::validation(format!(
            "record {}: field '{}': {}",
            self.index, spec.name, detail
        ))
    }
}
