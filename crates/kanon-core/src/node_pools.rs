//! Node pool policy checker
//!
//! Validates the node-pool map as a unit. The map key is part of a pool's
//! identity (separate from its `name` field), so key-level rules live here
//! too. Violations are collected across every entry; a bad pool never hides
//! the pools after it.

use serde_json::Value as JsonValue;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::field;
use crate::registry;

/// Validate the whole node-pool map.
///
/// Entries are visited in input key order. Per entry: map-key rules, the
/// per-field schema pass, then the min/max ordering constraint.
pub fn validate_pools(map: &serde_json::Map<String, JsonValue>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (key, entry) in map {
        if key.is_empty() {
            diagnostics.push(Diagnostic::new(
                "node_pools",
                DiagnosticKind::PatternMismatch,
                "node pool map keys must be non-empty strings",
            ));
            continue;
        }

        let path = format!("node_pools.{key}");
        let pool = match entry.as_object() {
            Some(pool) => pool,
            None => {
                diagnostics.push(
                    Diagnostic::new(
                        &path,
                        DiagnosticKind::TypeMismatch,
                        "each node pool must be a mapping",
                    )
                    .with_value(entry.clone()),
                );
                continue;
            }
        };

        let field_diags = field::validate_section(&path, &registry::NODE_POOL, pool);
        let fields_clean = field_diags.is_empty();
        diagnostics.extend(field_diags);

        // Ordering constraint only once both counts passed their own checks.
        if fields_clean {
            diagnostics.extend(check_scaling_bounds(&path, pool));
        }
    }

    diagnostics
}

fn check_scaling_bounds(
    path: &str,
    pool: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let min = pool.get("min_count").and_then(|v| v.as_i64());
    let max = pool.get("max_count").and_then(|v| v.as_i64());

    match (min, max) {
        (Some(min), Some(max)) if min > max => vec![
            Diagnostic::new(
                path,
                DiagnosticKind::CrossFieldConstraintViolation,
                format!("min_count ({min}) must not exceed max_count ({max})"),
            ),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pools(value: serde_json::Value) -> serde_json::Map<String, JsonValue> {
        value.as_object().expect("test fixture must be a mapping").clone()
    }

    fn valid_pool() -> serde_json::Value {
        json!({
            "name": "workload",
            "vm_size": "Standard_D2d_v5",
            "orchestrator_version": "1.28",
            "min_count": 1,
            "max_count": 5
        })
    }

    #[test]
    fn accepts_valid_map() {
        let diags = validate_pools(&pools(json!({
            "a": valid_pool(),
            "b": {"name": "system", "vm_size": "Standard_D4d_v5", "mode": "System"}
        })));
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
    }

    #[test]
    fn min_above_max_is_one_violation_at_the_pool() {
        let diags = validate_pools(&pools(json!({
            "a": {
                "name": "a",
                "vm_size": "Standard_D2d_v5",
                "orchestrator_version": "1.28",
                "min_count": 5,
                "max_count": 2,
                "os_sku": "AzureLinux"
            }
        })));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::CrossFieldConstraintViolation);
        assert_eq!(diags[0].path, "node_pools.a");
    }

    #[test]
    fn os_sku_violations_reported_per_key() {
        let diags = validate_pools(&pools(json!({
            "a": {"name": "a", "vm_size": "s", "os_sku": "Windows"},
            "b": {"name": "b", "vm_size": "s", "os_sku": "Ubuntu"},
            "c": {"name": "c", "vm_size": "s", "os_sku": "Windows"}
        })));
        let offenders: Vec<_> = diags
            .iter()
            .filter(|d| d.kind == DiagnosticKind::EnumViolation)
            .map(|d| d.path.as_str())
            .collect();
        assert_eq!(offenders, vec!["node_pools.a.os_sku", "node_pools.c.os_sku"]);
    }

    #[test]
    fn equal_min_and_max_is_allowed() {
        let diags = validate_pools(&pools(json!({
            "a": {"name": "a", "vm_size": "s", "min_count": 3, "max_count": 3}
        })));
        assert!(diags.is_empty());
    }

    #[test]
    fn empty_key_is_rejected() {
        let diags = validate_pools(&pools(json!({
            "": valid_pool()
        })));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "node_pools");
        assert_eq!(diags[0].kind, DiagnosticKind::PatternMismatch);
    }

    #[test]
    fn non_mapping_entry_is_a_type_mismatch() {
        let diags = validate_pools(&pools(json!({"a": "not a pool"})));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::TypeMismatch);
        assert_eq!(diags[0].path, "node_pools.a");
    }

    #[test]
    fn pool_name_pattern_enforced() {
        let diags = validate_pools(&pools(json!({
            "a": {"name": "Workload-1", "vm_size": "s"}
        })));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::PatternMismatch);
        assert_eq!(diags[0].path, "node_pools.a.name");
    }
}
