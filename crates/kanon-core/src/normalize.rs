//! Normalizer: fill registry defaults into validated sections
//!
//! Defaults are applied strictly after validation accepts a section, never
//! before, so a default can never mask a genuine input error. User-supplied
//! values always win; explicit `null` counts as "not supplied" and is
//! replaced by the default (or dropped when the field has none).

use serde_json::{Map, Value as JsonValue};

use crate::registry::{self, SectionSchema};

/// Produce the fully normalized document from validated raw input.
///
/// The caller guarantees the input passed every validation stage; this
/// function only fills gaps and prunes explicit nulls.
pub fn normalize_document(input: &Map<String, JsonValue>) -> JsonValue {
    let mut root = apply_defaults(input, &registry::CLUSTER);

    normalize_nested(&mut root, "network", &registry::NETWORK);
    normalize_nested(&mut root, "api_server_access", &registry::API_SERVER_ACCESS);
    normalize_nested(&mut root, "lock", &registry::LOCK);
    normalize_nested(&mut root, "identity", &registry::IDENTITY);
    normalize_nested(&mut root, "acr", &registry::ACR);
    normalize_nested(&mut root, "monitor_metrics", &registry::MONITOR_METRICS);
    normalize_nested(&mut root, "safeguard", &registry::SAFEGUARD);
    normalize_nested(&mut root, "image_cleaner", &registry::IMAGE_CLEANER);
    normalize_nested(
        &mut root,
        "maintenance_auto_upgrade",
        &registry::MAINTENANCE_AUTO_UPGRADE,
    );
    normalize_nested(&mut root, "maintenance_node_os", &registry::MAINTENANCE_NODE_OS);

    // Ingress holds its own nested optional object.
    normalize_nested(&mut root, "ingress", &registry::INGRESS);
    if let Some(JsonValue::Object(ingress)) = root.get_mut("ingress") {
        if let Some(JsonValue::Object(nginx)) = ingress.get("nginx") {
            let normalized = apply_defaults(nginx, &registry::INGRESS_NGINX);
            ingress.insert("nginx".into(), JsonValue::Object(normalized));
        }
    }

    // Every node pool entry gets the pool defaults.
    if let Some(JsonValue::Object(pools)) = root.get_mut("node_pools") {
        let keys: Vec<String> = pools.keys().cloned().collect();
        for key in keys {
            if let Some(JsonValue::Object(pool)) = pools.get(&key) {
                let normalized = apply_defaults(pool, &registry::NODE_POOL);
                pools.insert(key, JsonValue::Object(normalized));
            }
        }
    }

    JsonValue::Object(root)
}

/// Apply one section's defaults: drop explicit nulls, then fill every
/// declared default the user left unset. Unknown keys are dropped so the
/// canonical form is exactly the schema's vocabulary.
pub fn apply_defaults(
    object: &Map<String, JsonValue>,
    schema: &SectionSchema,
) -> Map<String, JsonValue> {
    let mut normalized = Map::new();

    for (name, rule) in &schema.fields {
        match object.get(*name) {
            Some(value) if !value.is_null() => {
                normalized.insert((*name).to_string(), value.clone());
            }
            _ => {
                if let Some(default) = &rule.default {
                    normalized.insert((*name).to_string(), default.clone());
                }
            }
        }
    }

    normalized
}

fn normalize_nested(
    root: &mut Map<String, JsonValue>,
    name: &str,
    schema: &SectionSchema,
) {
    if let Some(JsonValue::Object(section)) = root.get(name) {
        let normalized = apply_defaults(section, schema);
        root.insert(name.to_string(), JsonValue::Object(normalized));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().expect("test fixture must be a mapping").clone()
    }

    #[test]
    fn fills_top_level_defaults() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "network": {"node_subnet_id": "x", "pod_cidr": "10.244.0.0/16"}
        }));

        let normalized = normalize_document(&input);

        assert_eq!(normalized["automatic_upgrade_channel"], "stable");
        assert_eq!(normalized["network"]["network_policy"], "cilium");
        assert_eq!(normalized["network"]["load_balancer_sku"], "standard");
        assert_eq!(normalized["node_pools"], json!({}));
        assert_eq!(normalized["tags"], json!({}));
        // Optional sections the user never mentioned stay absent.
        assert!(normalized.get("lock").is_none());
        assert!(normalized.get("maintenance_auto_upgrade").is_none());
    }

    #[test]
    fn user_values_beat_defaults() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "automatic_upgrade_channel": "rapid",
            "network": {
                "node_subnet_id": "x",
                "pod_cidr": "10.244.0.0/16",
                "network_policy": "calico"
            }
        }));

        let normalized = normalize_document(&input);

        assert_eq!(normalized["automatic_upgrade_channel"], "rapid");
        assert_eq!(normalized["network"]["network_policy"], "calico");
    }

    #[test]
    fn explicit_null_takes_the_default() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "automatic_upgrade_channel": null,
            "kubernetes_version": null,
            "network": {"node_subnet_id": "x", "pod_cidr": "10.244.0.0/16"}
        }));

        let normalized = normalize_document(&input);

        assert_eq!(normalized["automatic_upgrade_channel"], "stable");
        // No default declared: the null is simply dropped.
        assert!(normalized.get("kubernetes_version").is_none());
    }

    #[test]
    fn node_pool_entries_are_normalized() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "network": {"node_subnet_id": "x", "pod_cidr": "10.244.0.0/16"},
            "node_pools": {
                "workload": {"name": "workload", "vm_size": "Standard_D2d_v5"}
            }
        }));

        let normalized = normalize_document(&input);
        let pool = &normalized["node_pools"]["workload"];

        assert_eq!(pool["os_sku"], "AzureLinux");
        assert_eq!(pool["mode"], "User");
        assert_eq!(pool["max_count"], 9);
        assert_eq!(pool["zones"], json!(["1", "2", "3"]));
        assert_eq!(pool["tags"], json!({}));
        assert_eq!(pool["labels"], json!({}));
        assert!(pool.get("os_disk_size_gb").is_none());
        assert!(pool.get("min_count").is_none());
    }

    #[test]
    fn maintenance_window_numeric_defaults() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "network": {"node_subnet_id": "x", "pod_cidr": "10.244.0.0/16"},
            "maintenance_node_os": {"frequency": "Daily"}
        }));

        let normalized = normalize_document(&input);
        let window = &normalized["maintenance_node_os"];

        assert_eq!(window["interval"], 1);
        assert_eq!(window["duration"], 4);
        assert_eq!(window["blackouts"], json!([]));
    }

    #[test]
    fn unknown_keys_are_dropped_from_canonical_form() {
        let input = object(json!({
            "name": "aks-1",
            "location": "westeurope",
            "resource_group": "rg",
            "network": {"node_subnet_id": "x", "pod_cidr": "10.244.0.0/16"},
            "surprise": true
        }));

        let normalized = normalize_document(&input);
        assert!(normalized.get("surprise").is_none());
    }
}
