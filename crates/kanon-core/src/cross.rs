//! Cross-field validation
//!
//! Rules spanning multiple fields within one section. These run only after
//! the section's per-field checks pass, so every value they look at is
//! already known to have the right shape. Absent optional sections never
//! reach this module; the engine short-circuits them.

use serde_json::Value as JsonValue;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Relational rules for the network section.
///
/// `dns_service_ip` only makes sense inside a service CIDR, so setting it
/// without `service_cidr` is rejected.
pub fn validate_network(object: &serde_json::Map<String, JsonValue>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let has_dns_ip = is_set(object.get("dns_service_ip"));
    let has_service_cidr = is_set(object.get("service_cidr"));

    if has_dns_ip && !has_service_cidr {
        diagnostics.push(Diagnostic::new(
            "network.service_cidr",
            DiagnosticKind::MissingRequiredField,
            "dns_service_ip is set but service_cidr is missing",
        ));
    }

    diagnostics
}

/// Relational rules for API server access.
///
/// A private cluster has no public endpoint, so authorized IP ranges cannot
/// apply to it.
pub fn validate_api_server_access(
    object: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let private = object
        .get("enable_private_cluster")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let has_ranges = object
        .get("authorized_ip_ranges")
        .and_then(|v| v.as_array())
        .map(|a| !a.is_empty())
        .unwrap_or(false);

    if private && has_ranges {
        diagnostics.push(Diagnostic::new(
            "api_server_access",
            DiagnosticKind::ConflictingFields,
            "authorized_ip_ranges cannot be combined with enable_private_cluster",
        ));
    }

    diagnostics
}

fn is_set(value: Option<&JsonValue>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> serde_json::Map<String, JsonValue> {
        value.as_object().expect("test fixture must be a mapping").clone()
    }

    #[test]
    fn dns_service_ip_requires_service_cidr() {
        let diags = validate_network(&object(json!({
            "node_subnet_id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/nodes",
            "pod_cidr": "10.244.0.0/16",
            "dns_service_ip": "10.0.0.10"
        })));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingRequiredField);
        assert_eq!(diags[0].path, "network.service_cidr");

        let diags = validate_network(&object(json!({
            "pod_cidr": "10.244.0.0/16",
            "service_cidr": "10.0.0.0/16",
            "dns_service_ip": "10.0.0.10"
        })));
        assert!(diags.is_empty());
    }

    #[test]
    fn private_cluster_conflicts_with_authorized_ranges() {
        let diags = validate_api_server_access(&object(json!({
            "enable_private_cluster": true,
            "authorized_ip_ranges": ["203.0.113.0/24"]
        })));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::ConflictingFields);
        assert_eq!(diags[0].path, "api_server_access");
    }

    #[test]
    fn private_cluster_without_ranges_is_fine() {
        let diags = validate_api_server_access(&object(json!({
            "enable_private_cluster": true,
            "authorized_ip_ranges": []
        })));
        assert!(diags.is_empty());
    }
}
