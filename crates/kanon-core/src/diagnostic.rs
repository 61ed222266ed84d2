//! Validation diagnostics
//!
//! A [`Diagnostic`] is a structured record of one validation failure: the
//! dotted path of the offending field, the kind of violation, a message, and
//! (where it helps the caller) the offending value and the allowed
//! set/pattern/range. Diagnostics are plain return values; the engine
//! aggregates every one found in a run and never fails fast.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The value's shape does not match the declared field type.
    TypeMismatch,
    /// A numeric value lies outside its declared bounds.
    OutOfRange,
    /// A string fails a required pattern (names, CIDRs, resource ids, ...).
    PatternMismatch,
    /// A value is not a member of a declared allowed set.
    EnumViolation,
    /// A field required by another field's value is absent.
    MissingRequiredField,
    /// Mutually exclusive or logically inconsistent fields are both set.
    ConflictingFields,
    /// An ordering or relational constraint between present fields is violated.
    CrossFieldConstraintViolation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::TypeMismatch => "TypeMismatch",
            DiagnosticKind::OutOfRange => "OutOfRange",
            DiagnosticKind::PatternMismatch => "PatternMismatch",
            DiagnosticKind::EnumViolation => "EnumViolation",
            DiagnosticKind::MissingRequiredField => "MissingRequiredField",
            DiagnosticKind::ConflictingFields => "ConflictingFields",
            DiagnosticKind::CrossFieldConstraintViolation => "CrossFieldConstraintViolation",
        };
        f.write_str(s)
    }
}

/// What the field would have accepted, for display alongside the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    OneOf(Vec<String>),
    Pattern(String),
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::OneOf(values) => write!(f, "one of [{}]", values.join(", ")),
            Expected::Pattern(p) => write!(f, "matching {p}"),
            Expected::Range { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => write!(f, "in [{lo}, {hi}]"),
                (Some(lo), None) => write!(f, ">= {lo}"),
                (None, Some(hi)) => write!(f, "<= {hi}"),
                (None, None) => write!(f, "any value"),
            },
        }
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Dotted path of the offending field, e.g. `node_pools.workload.min_count`.
    pub path: String,
    pub kind: DiagnosticKind,
    pub message: String,
    /// The offending value, when one was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    /// The allowed set, pattern, or range that was violated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Expected>,
    /// Fuzzy-match hint for enum violations ("did you mean ...").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
            value: None,
            expected: None,
            suggestion: None,
        }
    }

    pub fn with_value(mut self, value: JsonValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_expected(mut self, expected: Expected) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Top-level section this diagnostic belongs to (first path segment).
    pub fn section(&self) -> &str {
        self.path.split('.').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.message, self.path)?;
        if let Some(expected) = &self.expected {
            write!(f, " (expected {expected})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_is_first_path_segment() {
        let d = Diagnostic::new(
            "node_pools.workload.min_count",
            DiagnosticKind::OutOfRange,
            "out of range",
        );
        assert_eq!(d.section(), "node_pools");

        let root = Diagnostic::new("name", DiagnosticKind::PatternMismatch, "bad name");
        assert_eq!(root.section(), "name");
    }

    #[test]
    fn display_includes_kind_path_and_expected() {
        let d = Diagnostic::new("lock.kind", DiagnosticKind::EnumViolation, "unknown lock kind")
            .with_expected(Expected::OneOf(vec![
                "CanNotDelete".into(),
                "ReadOnly".into(),
            ]));
        let s = d.to_string();
        assert!(s.contains("EnumViolation"));
        assert!(s.contains("lock.kind"));
        assert!(s.contains("CanNotDelete"));
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let d = Diagnostic::new("name", DiagnosticKind::PatternMismatch, "bad name");
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("value").is_none());
        assert!(json.get("expected").is_none());
        assert!(json.get("suggestion").is_none());
    }
}
