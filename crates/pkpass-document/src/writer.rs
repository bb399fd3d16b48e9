//! # Streaming JSON Writer
//!
//! A push-style JSON writer that emits tokens straight to an `io::Write`
//! sink as they are produced. Key order is exactly call order, which the pass
//! format relies on.
//!
//! Token layout is delegated to `serde_json`'s [`Formatter`] trait, so the
//! same writer produces compact output ([`CompactFormatter`]) or indented
//! output ([`PrettyFormatter`]). String escaping and number rendering go
//! through `serde_json` itself.
//!
//! ## Structural Checks
//!
//! The writer tracks nesting and rejects call sequences that would produce
//! malformed JSON: a value inside an object without a preceding property
//! name, a property name outside an object, mismatched end calls, and a
//! second root value. Nothing already written is retracted when a check
//! fails.

use std::io;

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Number, Value};

use pkpass_core::{PassDate, PassError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object { first: bool, key_pending: bool },
    Array { first: bool },
}

/// Streaming JSON writer over an `io::Write` sink.
pub struct JsonWriter<W, F = CompactFormatter> {
    out: W,
    formatter: F,
    scopes: Vec<Scope>,
    root_written: bool,
}

impl<W: io::Write> JsonWriter<W> {
    /// Compact output, no insignificant whitespace.
    pub fn new(out: W) -> Self {
        Self::with_formatter(out, CompactFormatter)
    }
}

impl<W: io::Write> JsonWriter<W, PrettyFormatter<'static>> {
    /// Indented output, two spaces per level.
    pub fn pretty(out: W) -> Self {
        Self::with_formatter(out, PrettyFormatter::new())
    }
}

impl<W: io::Write, F: Formatter> JsonWriter<W, F> {
    /// Writer using an arbitrary `serde_json` formatter.
    pub fn with_formatter(out: W, formatter: F) -> Self {
        Self {
            out,
            formatter,
            scopes: Vec::new(),
            root_written: false,
        }
    }

    /// Current nesting depth. Zero outside the root value.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Open an object.
    pub fn start_object(&mut self) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.begin_object(&mut self.out)?;
        self.scopes.push(Scope::Object {
            first: true,
            key_pending: false,
        });
        Ok(())
    }

    /// Close the innermost object.
    pub fn end_object(&mut self) -> Result<(), PassError> {
        match self.scopes.pop() {
            Some(Scope::Object {
                key_pending: false, ..
            }) => {}
            Some(Scope::Object {
                key_pending: true, ..
            }) => {
                return Err(PassError::Writer(
                    "object closed after a property name with no value".to_string(),
                ))
            }
            Some(Scope::Array { .. }) => {
                return Err(PassError::Writer("end_object inside an array".to_string()))
            }
            None => return Err(PassError::Writer("end_object with no open object".to_string())),
        }
        self.formatter.end_object(&mut self.out)?;
        self.end_value()
    }

    /// Open an array.
    pub fn start_array(&mut self) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.begin_array(&mut self.out)?;
        self.scopes.push(Scope::Array { first: true });
        Ok(())
    }

    /// Close the innermost array.
    pub fn end_array(&mut self) -> Result<(), PassError> {
        match self.scopes.pop() {
            Some(Scope::Array { .. }) => {}
            Some(Scope::Object { .. }) => {
                return Err(PassError::Writer("end_array inside an object".to_string()))
            }
            None => return Err(PassError::Writer("end_array with no open array".to_string())),
        }
        self.formatter.end_array(&mut self.out)?;
        self.end_value()
    }

    /// Write an object key. The next call must write its value.
    pub fn property_name(&mut self, name: &str) -> Result<(), PassError> {
        match self.scopes.last_mut() {
            Some(Scope::Object { first, key_pending }) if !*key_pending => {
                self.formatter.begin_object_key(&mut self.out, *first)?;
                serde_json::to_writer(&mut self.out, name)?;
                self.formatter.end_object_key(&mut self.out)?;
                *key_pending = true;
                Ok(())
            }
            Some(Scope::Object { .. }) => Err(PassError::Writer(format!(
                "property {name:?} written while another property awaits its value"
            ))),
            _ => Err(PassError::Writer(format!(
                "property {name:?} written outside an object"
            ))),
        }
    }

    /// Write a string value.
    pub fn string(&mut self, value: &str) -> Result<(), PassError> {
        self.begin_value()?;
        serde_json::to_writer(&mut self.out, value)?;
        self.end_value()
    }

    /// Write a boolean value.
    pub fn bool(&mut self, value: bool) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.write_bool(&mut self.out, value)?;
        self.end_value()
    }

    /// Write a signed integer.
    pub fn i64(&mut self, value: i64) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.write_i64(&mut self.out, value)?;
        self.end_value()
    }

    /// Write an unsigned integer.
    pub fn u64(&mut self, value: u64) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.write_u64(&mut self.out, value)?;
        self.end_value()
    }

    /// Write a float. Non-finite values are written as `null`, the same
    /// way `serde_json` serializes them.
    pub fn f64(&mut self, value: f64) -> Result<(), PassError> {
        if !value.is_finite() {
            return self.null();
        }
        self.begin_value()?;
        self.formatter.write_f64(&mut self.out, value)?;
        self.end_value()
    }

    /// Write a `serde_json` number.
    pub fn number(&mut self, value: &Number) -> Result<(), PassError> {
        self.begin_value()?;
        serde_json::to_writer(&mut self.out, value)?;
        self.end_value()
    }

    /// Write `null`.
    pub fn null(&mut self) -> Result<(), PassError> {
        self.begin_value()?;
        self.formatter.write_null(&mut self.out)?;
        self.end_value()
    }

    /// Write a date-time in wire format.
    pub fn date_time(&mut self, value: &PassDate) -> Result<(), PassError> {
        self.string(&value.to_wire())
    }

    /// Write an arbitrary JSON value through this writer's formatter.
    pub fn value(&mut self, value: &Value) -> Result<(), PassError> {
        match value {
            Value::Null => self.null(),
            Value::Bool(b) => self.bool(*b),
            Value::Number(n) => self.number(n),
            Value::String(s) => self.string(s),
            Value::Array(items) => {
                self.start_array()?;
                for item in items {
                    self.value(item)?;
                }
                self.end_array()
            }
            Value::Object(map) => {
                self.start_object()?;
                for (key, item) in map {
                    self.property_name(key)?;
                    self.value(item)?;
                }
                self.end_object()
            }
        }
    }

    /// `"name": "value"`.
    pub fn string_property(&mut self, name: &str, value: &str) -> Result<(), PassError> {
        self.property_name(name)?;
        self.string(value)
    }

    /// `"name": true|false`.
    pub fn bool_property(&mut self, name: &str, value: bool) -> Result<(), PassError> {
        self.property_name(name)?;
        self.bool(value)
    }

    /// `"name": <date-time>`.
    pub fn date_property(&mut self, name: &str, value: &PassDate) -> Result<(), PassError> {
        self.property_name(name)?;
        self.date_time(value)
    }

    /// `"name": "value"` only when `value` is present and non-empty.
    pub fn optional_string_property(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), PassError> {
        match value {
            Some(v) if !v.is_empty() => self.string_property(name, v),
            _ => Ok(()),
        }
    }

    /// Verify the document is complete, flush, and return the sink.
    pub fn finish(mut self) -> Result<W, PassError> {
        if !self.scopes.is_empty() {
            return Err(PassError::Writer(format!(
                "{} unclosed container(s) at end of document",
                self.scopes.len()
            )));
        }
        if !self.root_written {
            return Err(PassError::Writer("empty document".to_string()));
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn begin_value(&mut self) -> Result<(), PassError> {
        match self.scopes.last_mut() {
            None if self.root_written => Err(PassError::Writer(
                "document already has a root value".to_string(),
            )),
            None => Ok(()),
            Some(Scope::Object {
                key_pending: false, ..
            }) => Err(PassError::Writer(
                "object value written without a property name".to_string(),
            )),
            Some(Scope::Object { .. }) => {
                self.formatter.begin_object_value(&mut self.out)?;
                Ok(())
            }
            Some(Scope::Array { first }) => {
                self.formatter.begin_array_value(&mut self.out, *first)?;
                Ok(())
            }
        }
    }

    fn end_value(&mut self) -> Result<(), PassError> {
        match self.scopes.last_mut() {
            None => {
                self.root_written = true;
            }
            Some(Scope::Object { first, key_pending }) => {
                self.formatter.end_object_value(&mut self.out)?;
                *first = false;
                *key_pending = false;
            }
            Some(Scope::Array { first }) => {
                self.formatter.end_array_value(&mut self.out)?;
                *first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compact(build: impl FnOnce(&mut JsonWriter<&mut Vec<u8>>) -> Result<(), PassError>) -> String {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        build(&mut w).unwrap();
        w.finish().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn keys_are_written_in_call_order() {
        let s = compact(|w| {
            w.start_object()?;
            w.string_property("z", "last-alphabetically")?;
            w.property_name("a")?;
            w.i64(1)?;
            w.end_object()
        });
        assert_eq!(s, r#"{"z":"last-alphabetically","a":1}"#);
    }

    #[test]
    fn nested_containers() {
        let s = compact(|w| {
            w.start_object()?;
            w.property_name("list")?;
            w.start_array()?;
            w.bool(true)?;
            w.start_object()?;
            w.end_object()?;
            w.null()?;
            w.end_array()?;
            w.end_object()
        });
        assert_eq!(s, r#"{"list":[true,{},null]}"#);
    }

    #[test]
    fn strings_are_escaped() {
        let s = compact(|w| w.string("quote \" slash \\ newline \n"));
        assert_eq!(s, r#""quote \" slash \\ newline \n""#);
    }

    #[test]
    fn non_finite_floats_become_null() {
        let s = compact(|w| {
            w.start_array()?;
            w.f64(f64::NAN)?;
            w.f64(1.5)?;
            w.end_array()
        });
        assert_eq!(s, "[null,1.5]");
    }

    #[test]
    fn value_passthrough_matches_serde_json() {
        let v = json!({"a": [1, "two", {"b": null}], "c": false});
        let s = compact(|w| w.value(&v));
        assert_eq!(s, serde_json::to_string(&v).unwrap());
    }

    #[test]
    fn pretty_output_matches_serde_json_pretty() {
        let v = json!({"a": [1, 2], "b": {"c": "d"}, "e": []});
        let mut buf = Vec::new();
        let mut w = JsonWriter::pretty(&mut buf);
        w.value(&v).unwrap();
        w.finish().unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serde_json::to_string_pretty(&v).unwrap());
    }

    #[test]
    fn value_without_key_rejected() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        w.start_object().unwrap();
        assert!(matches!(w.string("orphan"), Err(PassError::Writer(_))));
    }

    #[test]
    fn key_outside_object_rejected() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        assert!(w.property_name("k").is_err());
        w.start_array().unwrap();
        assert!(w.property_name("k").is_err());
    }

    #[test]
    fn double_key_rejected() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        w.start_object().unwrap();
        w.property_name("a").unwrap();
        assert!(w.property_name("b").is_err());
        assert!(w.end_object().is_err());
    }

    #[test]
    fn mismatched_end_rejected() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        w.start_object().unwrap();
        assert!(w.end_array().is_err());
    }

    #[test]
    fn second_root_rejected() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        w.bool(true).unwrap();
        assert!(w.bool(false).is_err());
    }

    #[test]
    fn finish_requires_closed_document() {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        w.start_object().unwrap();
        assert_eq!(w.depth(), 1);
        assert!(w.finish().is_err());

        let mut empty = Vec::new();
        assert!(JsonWriter::new(&mut empty).finish().is_err());
    }
}
