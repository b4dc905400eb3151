//! Assertion types and builders for verifying step results.

use trellis_core::{Attributes, Value};

use crate::error::{ScenarioError, ScenarioResult};

/// Expected fields of a record. Fields not named are not checked.
pub type Row = Attributes;

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Shape of the value
    pub null: Option<bool>,
    pub flag: Option<bool>,
    pub value: Option<Value>,

    // List results
    pub rows: Option<usize>,
    pub contains: Vec<Row>,
    pub excludes: Vec<Row>,
    pub first: Option<Row>,
    pub last: Option<Row>,

    // Record results
    pub record: Option<Row>,
    pub absent_fields: Vec<String>,
    pub relation_len: Option<(String, usize)>,

    // Error assertions
    pub error: Option<String>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Value) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("null", &self.null)
            .field("flag", &self.flag)
            .field("value", &self.value)
            .field("rows", &self.rows)
            .field("contains", &self.contains)
            .field("first", &self.first)
            .field("record", &self.record)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result.
    pub fn verify(&self, step: &str, result: &Result<Value, String>) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error.as_str()) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(value) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step returned {}",
                        expected_error, value
                    ),
                )),
            };
        }

        let value = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(value) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        self.verify_shape(step, value)?;
        if let Value::List(items) = value {
            self.verify_list(step, items)?;
        }
        self.verify_record(step, value)
    }

    fn verify_shape(&self, step: &str, value: &Value) -> ScenarioResult<()> {
        if let Some(expected) = self.null {
            if value.is_null() != expected {
                let wanted = if expected { "null" } else { "a value" };
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {}, got {}", wanted, value),
                ));
            }
        }

        if let Some(expected) = self.flag {
            if value.as_bool() != Some(expected) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {}, got {}", expected, value),
                ));
            }
        }

        if let Some(ref expected) = self.value {
            if value != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("value mismatch:\n  expected: {}\n  actual:   {}", expected, value),
                ));
            }
        }

        let wants_list = self.rows.is_some()
            || !self.contains.is_empty()
            || !self.excludes.is_empty()
            || self.first.is_some()
            || self.last.is_some();
        if wants_list && value.as_list().is_none() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected a list, got {}", value),
            ));
        }
        Ok(())
    }

    fn verify_list(&self, step: &str, items: &[Value]) -> ScenarioResult<()> {
        if let Some(expected) = self.rows {
            if items.len() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} rows, got {}", expected, items.len()),
                ));
            }
        }

        for expected in &self.contains {
            if !items.iter().any(|item| row_matches(item, expected)) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("no row matches {}", format_row(expected)),
                ));
            }
        }

        for unexpected in &self.excludes {
            if items.iter().any(|item| row_matches(item, unexpected)) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("a row unexpectedly matches {}", format_row(unexpected)),
                ));
            }
        }

        if let Some(ref expected) = self.first {
            match items.first() {
                Some(item) if row_matches(item, expected) => {}
                Some(item) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!(
                            "first() row mismatch:\n  expected: {}\n  actual:   {}",
                            format_row(expected),
                            item
                        ),
                    ))
                }
                None => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        "expected first row but result is empty",
                    ))
                }
            }
        }

        if let Some(ref expected) = self.last {
            match items.last() {
                Some(item) if row_matches(item, expected) => {}
                Some(item) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!(
                            "last() row mismatch:\n  expected: {}\n  actual:   {}",
                            format_row(expected),
                            item
                        ),
                    ))
                }
                None => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        "expected last row but result is empty",
                    ))
                }
            }
        }

        Ok(())
    }

    fn verify_record(&self, step: &str, value: &Value) -> ScenarioResult<()> {
        let needs_record =
            self.record.is_some() || !self.absent_fields.is_empty() || self.relation_len.is_some();
        if !needs_record {
            return Ok(());
        }
        let Some(record) = value.as_record() else {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected a record, got {}", value),
            ));
        };

        if let Some(ref expected) = self.record {
            if !row_matches(value, expected) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "record mismatch:\n  expected: {}\n  actual:   {}",
                        format_row(expected),
                        record
                    ),
                ));
            }
        }

        for field in &self.absent_fields {
            if record.has(field) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("field '{}' should be absent from {}", field, record),
                ));
            }
        }

        if let Some((ref field, expected)) = self.relation_len {
            let actual = record.get(field).and_then(Value::as_list).map(<[Value]>::len);
            if actual != Some(expected) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} items in '{}', got {:?}", expected, field, actual),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Shape ==========

    /// Assert that the field resolved to null.
    pub fn null(mut self) -> Self {
        self.assertion.null = Some(true);
        self
    }

    /// Assert that the field resolved to something other than null.
    pub fn found(mut self) -> Self {
        self.assertion.null = Some(false);
        self
    }

    /// Assert a boolean result.
    pub fn flag(mut self, expected: bool) -> Self {
        self.assertion.flag = Some(expected);
        self
    }

    /// Assert the exact value.
    pub fn value(mut self, expected: impl Into<Value>) -> Self {
        self.assertion.value = Some(expected.into());
        self
    }

    // ========== Lists ==========

    /// Assert the number of rows in a list result.
    pub fn rows(mut self, n: usize) -> Self {
        self.assertion.rows = Some(n);
        self
    }

    /// Assert that the list is empty.
    pub fn empty(self) -> Self {
        self.rows(0)
    }

    /// Assert that some row has these fields.
    pub fn contains(mut self, row: Row) -> Self {
        self.assertion.contains.push(row);
        self
    }

    /// Assert that no row has these fields.
    pub fn excludes(mut self, row: Row) -> Self {
        self.assertion.excludes.push(row);
        self
    }

    /// Assert the fields of the first row.
    pub fn first(mut self, row: Row) -> Self {
        self.assertion.first = Some(row);
        self
    }

    /// Assert the fields of the last row.
    pub fn last(mut self, row: Row) -> Self {
        self.assertion.last = Some(row);
        self
    }

    // ========== Records ==========

    /// Assert the fields of a record result.
    pub fn record(mut self, row: Row) -> Self {
        self.assertion.record = Some(row);
        self
    }

    /// Assert that a record result lacks a field.
    pub fn without(mut self, field: impl Into<String>) -> Self {
        self.assertion.absent_fields.push(field.into());
        self
    }

    /// Assert the length of a list-valued field of a record result.
    pub fn related(mut self, field: impl Into<String>, n: usize) -> Self {
        self.assertion.relation_len = Some((field.into(), n));
        self
    }

    // ========== Errors ==========

    /// Assert that the step fails with a message containing `contains`.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A value matches a row when it is a record holding every expected field.
fn row_matches(value: &Value, expected: &Row) -> bool {
    let Some(record) = value.as_record() else {
        return false;
    };
    expected
        .iter()
        .all(|(name, expected)| record.get(name).unwrap_or(&Value::Null) == expected)
}

fn format_row(row: &Row) -> String {
    let parts: Vec<String> = row.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{{ {} }}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{attrs, Record};

    fn team(id: i64, manager: &str) -> Value {
        Value::Record(Record::new(attrs! { "id" => id, "manager" => manager }))
    }

    #[test]
    fn test_list_assertions() {
        let result = Ok(Value::List(vec![team(1, "Mija"), team(2, "Dara")]));

        let passing = AssertionBuilder::new()
            .rows(2)
            .first(attrs! { "id" => 1i64 })
            .last(attrs! { "manager" => "Dara" })
            .contains(attrs! { "id" => 2i64, "manager" => "Dara" })
            .excludes(attrs! { "id" => 3i64 })
            .build();
        assert!(passing.verify("list", &result).is_ok());

        let failing = AssertionBuilder::new().rows(3).build();
        assert!(failing.verify("list", &result).is_err());
    }

    #[test]
    fn test_record_and_null_assertions() {
        let found = Ok(team(1, "Mija"));
        let assertion = AssertionBuilder::new()
            .found()
            .record(attrs! { "manager" => "Mija" })
            .without("supplies")
            .build();
        assert!(assertion.verify("get", &found).is_ok());

        let missing = Ok(Value::Null);
        assert!(AssertionBuilder::new().null().build().verify("get", &missing).is_ok());
        assert!(AssertionBuilder::new().found().build().verify("get", &missing).is_err());
    }

    #[test]
    fn test_error_assertions() {
        let failed: Result<Value, String> = Err("mutation error: Duplicate identity".into());
        assert!(AssertionBuilder::new()
            .error("Duplicate")
            .build()
            .verify("insert", &failed)
            .is_ok());
        assert!(AssertionBuilder::new().build().verify("insert", &failed).is_err());
        assert!(AssertionBuilder::new()
            .error("Duplicate")
            .build()
            .verify("insert", &Ok(Value::Null))
            .is_err());
    }
}
