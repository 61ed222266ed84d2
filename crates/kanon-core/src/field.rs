//! Generic field validator
//!
//! Interprets [`FieldRule`]s from the schema registry against raw JSON
//! values. Every check here is a pure function over one immutable value:
//! type shape first, then pattern, enum membership, and numeric bounds.
//! Checks never look at sibling fields; relationships between fields belong
//! to the cross-field validators.

use serde_json::Value as JsonValue;

use crate::diagnostic::{Diagnostic, DiagnosticKind, Expected};
use crate::registry::{FieldKind, FieldRule, SectionSchema};

/// Maximum Levenshtein distance to consider for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Validate one section object against its schema.
///
/// `section_path` is the dotted prefix for diagnostics (empty for the
/// document root). Fields are visited in schema declaration order so the
/// diagnostic list is stable. Explicit `null` is treated the same as an
/// absent field: nullable fields stay unset, required fields are reported
/// missing. Keys the schema does not declare are ignored.
pub fn validate_section(
    section_path: &str,
    schema: &SectionSchema,
    object: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (name, rule) in &schema.fields {
        let path = join_path(section_path, name);
        match object.get(*name) {
            None | Some(JsonValue::Null) => {
                if rule.required {
                    diagnostics.push(Diagnostic::new(
                        path,
                        DiagnosticKind::MissingRequiredField,
                        format!("required field '{name}' is missing"),
                    ));
                }
            }
            Some(value) => diagnostics.extend(validate_value(&path, rule, value)),
        }
    }

    diagnostics
}

/// Validate a single present value against its rule.
pub fn validate_value(path: &str, rule: &FieldRule, value: &JsonValue) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    match rule.kind {
        FieldKind::Str => match value.as_str() {
            Some(s) => diagnostics.extend(check_string(path, rule, s, value)),
            None => diagnostics.push(type_mismatch(path, "a string", value)),
        },
        FieldKind::Int => match integer_of(value) {
            Some(n) => {
                if let Some(d) = check_bounds(path, rule, n) {
                    diagnostics.push(d);
                }
            }
            None => diagnostics.push(type_mismatch(path, "an integer", value)),
        },
        FieldKind::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_mismatch(path, "a boolean", value));
            }
        }
        FieldKind::Object => {
            if !value.is_object() {
                diagnostics.push(type_mismatch(path, "a mapping", value));
            }
        }
        FieldKind::StrMap => match value.as_object() {
            Some(map) => {
                for (key, entry) in map {
                    if !entry.is_string() {
                        diagnostics.push(type_mismatch(
                            &join_path(path, key),
                            "a string value",
                            entry,
                        ));
                    }
                }
            }
            None => diagnostics.push(type_mismatch(path, "a mapping of strings", value)),
        },
        FieldKind::StrList => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.{index}");
                    match item.as_str() {
                        Some(_) => {
                            if let Some(element_rule) = &rule.element {
                                diagnostics.extend(validate_value(
                                    &item_path,
                                    element_rule,
                                    item,
                                ));
                            }
                        }
                        None => diagnostics.push(type_mismatch(&item_path, "a string", item)),
                    }
                }
            }
            None => diagnostics.push(type_mismatch(path, "a list of strings", value)),
        },
        FieldKind::ObjectList => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_object() {
                        diagnostics.push(type_mismatch(
                            &format!("{path}.{index}"),
                            "a mapping",
                            item,
                        ));
                    }
                }
            }
            None => diagnostics.push(type_mismatch(path, "a list of mappings", value)),
        },
    }

    diagnostics
}

fn check_string(path: &str, rule: &FieldRule, s: &str, raw: &JsonValue) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if let Some(pattern) = &rule.pattern {
        if !pattern.regex.is_match(s) {
            diagnostics.push(
                Diagnostic::new(
                    path,
                    DiagnosticKind::PatternMismatch,
                    format!("'{s}' is not {}", pattern.describe),
                )
                .with_value(raw.clone())
                .with_expected(Expected::Pattern(pattern.regex.as_str().to_string())),
            );
        }
    }

    if let Some(allowed) = rule.allowed {
        if !allowed.contains(&s) {
            let mut diagnostic = Diagnostic::new(
                path,
                DiagnosticKind::EnumViolation,
                format!("'{s}' is not an allowed value"),
            )
            .with_value(raw.clone())
            .with_expected(Expected::OneOf(
                allowed.iter().map(|v| v.to_string()).collect(),
            ));
            if let Some(candidate) = closest_match(s, allowed) {
                diagnostic = diagnostic.with_suggestion(format!("did you mean '{candidate}'?"));
            }
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

fn check_bounds(path: &str, rule: &FieldRule, n: i64) -> Option<Diagnostic> {
    let below = rule.min.map(|min| (n as f64) < min).unwrap_or(false);
    let above = rule.max.map(|max| (n as f64) > max).unwrap_or(false);
    if !below && !above {
        return None;
    }

    Some(
        Diagnostic::new(
            path,
            DiagnosticKind::OutOfRange,
            format!("{n} is outside the allowed range"),
        )
        .with_value(JsonValue::from(n))
        .with_expected(Expected::Range {
            min: rule.min,
            max: rule.max,
        }),
    )
}

/// Accept only whole numbers; floats and numeric strings are type mismatches.
fn integer_of(value: &JsonValue) -> Option<i64> {
    value.as_i64()
}

fn type_mismatch(path: &str, expected: &str, value: &JsonValue) -> Diagnostic {
    Diagnostic::new(
        path,
        DiagnosticKind::TypeMismatch,
        format!("expected {expected}, got {}", describe_value(value)),
    )
    .with_value(value.clone())
}

fn describe_value(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "a mapping",
    }
}

/// Closest allowed value by Levenshtein distance, if close enough to be a
/// plausible typo.
fn closest_match(input: &str, allowed: &[&str]) -> Option<String> {
    allowed
        .iter()
        .map(|candidate| (strsim::levenshtein(input, candidate), *candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use serde_json::json;

    fn section(value: JsonValue) -> serde_json::Map<String, JsonValue> {
        value.as_object().expect("test fixture must be a mapping").clone()
    }

    #[test]
    fn accepts_valid_lock_section() {
        let diags = validate_section(
            "lock",
            &registry::LOCK,
            &section(json!({"kind": "ReadOnly", "name": "keep"})),
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn reports_enum_violation_with_suggestion() {
        let diags = validate_section(
            "lock",
            &registry::LOCK,
            &section(json!({"kind": "ReadOnli"})),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::EnumViolation);
        assert_eq!(diags[0].path, "lock.kind");
        assert_eq!(
            diags[0].suggestion.as_deref(),
            Some("did you mean 'ReadOnly'?")
        );
    }

    #[test]
    fn missing_required_field_reported_once() {
        let diags = validate_section("lock", &registry::LOCK, &section(json!({})));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingRequiredField);
        assert_eq!(diags[0].path, "lock.kind");
    }

    #[test]
    fn explicit_null_counts_as_absent() {
        // kubernetes_version is nullable: null must not be a TypeMismatch
        let diags = validate_value(
            "kubernetes_version",
            registry::CLUSTER.field("kubernetes_version").unwrap(),
            &json!("1.28"),
        );
        assert!(diags.is_empty());

        let diags = validate_section(
            "lock",
            &registry::LOCK,
            &section(json!({"kind": null})),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingRequiredField);
    }

    #[test]
    fn integer_rejects_floats_and_strings() {
        let rule = registry::NODE_POOL.field("min_count").unwrap();
        assert_eq!(
            validate_value("p.min_count", rule, &json!(2.5))[0].kind,
            DiagnosticKind::TypeMismatch
        );
        assert_eq!(
            validate_value("p.min_count", rule, &json!("2"))[0].kind,
            DiagnosticKind::TypeMismatch
        );
        assert!(validate_value("p.min_count", rule, &json!(2)).is_empty());
    }

    #[test]
    fn out_of_range_carries_bounds() {
        let rule = registry::MAINTENANCE_NODE_OS.field("duration").unwrap();
        let diags = validate_value("maintenance_node_os.duration", rule, &json!(30));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::OutOfRange);
        assert_eq!(
            diags[0].expected,
            Some(Expected::Range {
                min: Some(4.0),
                max: Some(24.0)
            })
        );
    }

    #[test]
    fn list_elements_validated_individually() {
        let rule = registry::NODE_POOL.field("zones").unwrap();
        let diags = validate_value("node_pools.a.zones", rule, &json!(["1", "4", "2"]));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "node_pools.a.zones.1");
        assert_eq!(diags[0].kind, DiagnosticKind::EnumViolation);
    }

    #[test]
    fn str_map_values_must_be_strings() {
        let rule = registry::NODE_POOL.field("labels").unwrap();
        let diags = validate_value(
            "node_pools.a.labels",
            rule,
            &json!({"tier": "backend", "weight": 3}),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "node_pools.a.labels.weight");
        assert_eq!(diags[0].kind, DiagnosticKind::TypeMismatch);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let diags = validate_section(
            "lock",
            &registry::LOCK,
            &section(json!({"kind": "ReadOnly", "unexpected": 1})),
        );
        assert!(diags.is_empty());
    }
}
