//! Canonical cluster configuration model
//!
//! These are the types the engine hands to the orchestrator: fully
//! validated, defaults applied, owned by value. They are built exactly once
//! per validation run by deserializing the normalized document, and the
//! engine guarantees a canonical config re-validates to itself.

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::RawDocument;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeChannel {
    Stable,
    Rapid,
    Patch,
    NodeImage,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
    Azure,
    Calico,
    Cilium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerSku {
    Basic,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsSku {
    Ubuntu,
    AzureLinux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolMode {
    System,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    AbsoluteMonthly,
    RelativeMonthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekIndex {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockKind {
    CanNotDelete,
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeguardLevel {
    Enforcement,
    Warning,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngressControllerType {
    AnnotationControlled,
    External,
    Internal,
    None,
}

/// The canonical, fully-resolved cluster configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    pub location: String,
    pub resource_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    pub automatic_upgrade_channel: UpgradeChannel,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
    pub network: NetworkConfig,
    #[serde(default)]
    pub node_pools: IndexMap<String, NodePool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_access: Option<ApiServerAccessConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_auto_upgrade: Option<MaintenanceWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_node_os: Option<MaintenanceWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<LockConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acr: Option<AcrConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_metrics: Option<MonitorMetricsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safeguard: Option<SafeguardConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_cleaner: Option<ImageCleanerConfig>,
}

impl ClusterConfig {
    /// Serialize the canonical form as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| CoreError::Canonicalize {
            message: e.to_string(),
        })
    }

    /// Serialize the canonical form as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Canonicalize {
            message: e.to_string(),
        })
    }

    /// Re-wrap the canonical form as a raw document, e.g. to feed it back
    /// through the engine.
    pub fn to_document(&self) -> Result<RawDocument> {
        let value = serde_json::to_value(self).map_err(|e| CoreError::Canonicalize {
            message: e.to_string(),
        })?;
        RawDocument::from_value(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub node_subnet_id: String,
    pub pod_cidr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_service_ip: Option<String>,
    pub network_policy: NetworkPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_dns_zone_id: Option<String>,
    pub load_balancer_sku: LoadBalancerSku,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiServerAccessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_dns_zone_id: Option<String>,
    #[serde(default)]
    pub enable_private_cluster: bool,
    #[serde(default)]
    pub authorized_ip_ranges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePool {
    pub name: String,
    pub vm_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<i64>,
    pub max_count: i64,
    pub os_sku: OsSku,
    pub mode: PoolMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk_size_gb: Option<i64>,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
    #[serde(default)]
    pub labels: IndexMap<String, String>,
    #[serde(default)]
    pub zones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub frequency: Frequency,
    pub interval: i64,
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_index: Option<WeekIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(default)]
    pub blackouts: Vec<BlackoutPeriod>,
}

/// A time range during which maintenance must not run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackoutPeriod {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockConfig {
    pub kind: LockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub system_assigned: bool,
    #[serde(default)]
    pub user_assigned_resource_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcrConfig {
    #[serde(default)]
    pub registry_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorMetricsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_allowlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations_allowlist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx: Option<NginxIngressConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NginxIngressConfig {
    pub default_ingress_controller_type: IngressControllerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeguardConfig {
    pub level: SafeguardLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub excluded_namespaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCleanerConfig {
    #[serde(default)]
    pub enabled: bool,
    pub interval_hours: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_channel_uses_kebab_case_wire_names() {
        assert_eq!(
            serde_json::to_value(UpgradeChannel::NodeImage).unwrap(),
            "node-image"
        );
        assert_eq!(serde_json::to_value(UpgradeChannel::None).unwrap(), "none");
        let parsed: UpgradeChannel = serde_json::from_value("stable".into()).unwrap();
        assert_eq!(parsed, UpgradeChannel::Stable);
    }

    #[test]
    fn network_policy_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(NetworkPolicy::Cilium).unwrap(), "cilium");
    }

    #[test]
    fn canonical_config_roundtrips_through_yaml() {
        let config = ClusterConfig {
            name: "aks-1".into(),
            location: "westeurope".into(),
            resource_group: "rg".into(),
            kubernetes_version: Some("1.28".into()),
            automatic_upgrade_channel: UpgradeChannel::Stable,
            tags: IndexMap::new(),
            network: NetworkConfig {
                node_subnet_id: "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/nodes".into(),
                pod_cidr: "10.244.0.0/16".into(),
                service_cidr: None,
                dns_service_ip: None,
                network_policy: NetworkPolicy::Cilium,
                private_dns_zone_id: None,
                load_balancer_sku: LoadBalancerSku::Standard,
            },
            node_pools: IndexMap::new(),
            api_server_access: None,
            maintenance_auto_upgrade: None,
            maintenance_node_os: None,
            lock: Some(LockConfig {
                kind: LockKind::CanNotDelete,
                name: None,
            }),
            identity: None,
            acr: None,
            monitor_metrics: None,
            ingress: None,
            safeguard: None,
            image_cleaner: None,
        };

        let yaml = config.to_yaml().unwrap();
        let back: ClusterConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
