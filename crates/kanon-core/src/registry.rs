//! Schema registry: declarative field rules for every configuration section
//!
//! The registry is pure data. Each section of the cluster document has a
//! [`SectionSchema`]: an ordered list of field names and their
//! [`FieldRule`]s (type, optionality, default, allowed set, pattern, numeric
//! bounds). The generic field validator interprets these rules; nothing in
//! this module executes checks itself.
//!
//! The registry is read-only after initialization (`Lazy` statics), so it can
//! be shared freely across validation runs without locking.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

/// Declared shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    /// Nested mapping validated by its own section schema.
    Object,
    /// List of strings, optionally rule-checked per element.
    StrList,
    /// Mapping from string keys to string values (tags, labels).
    StrMap,
    /// List of nested mappings (blackout periods).
    ObjectList,
}

/// A compiled pattern plus the short description used in diagnostics.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub describe: &'static str,
}

/// Validation rule for a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<JsonValue>,
    pub allowed: Option<&'static [&'static str]>,
    pub pattern: Option<PatternRule>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Rule applied to each element of a `StrList`.
    pub element: Option<Box<FieldRule>>,
}

impl FieldRule {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            allowed: None,
            pattern: None,
            min: None,
            max: None,
            element: None,
        }
    }

    pub fn str() -> Self {
        Self::new(FieldKind::Str)
    }

    pub fn int() -> Self {
        Self::new(FieldKind::Int)
    }

    pub fn bool() -> Self {
        Self::new(FieldKind::Bool)
    }

    pub fn object() -> Self {
        Self::new(FieldKind::Object)
    }

    pub fn str_list() -> Self {
        Self::new(FieldKind::StrList)
    }

    pub fn str_map() -> Self {
        Self::new(FieldKind::StrMap)
    }

    pub fn object_list() -> Self {
        Self::new(FieldKind::ObjectList)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: JsonValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    pub fn pattern(mut self, source: &Lazy<Regex>, describe: &'static str) -> Self {
        self.pattern = Some(PatternRule {
            regex: Regex::clone(source),
            describe,
        });
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn each(mut self, rule: FieldRule) -> Self {
        self.element = Some(Box::new(rule));
        self
    }
}

/// Ordered field rules for one configuration section.
#[derive(Debug, Clone)]
pub struct SectionSchema {
    pub fields: Vec<(&'static str, FieldRule)>,
}

impl SectionSchema {
    fn new(fields: Vec<(&'static str, FieldRule)>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }
}

// ---------------------------------------------------------------------------
// Allowed-value sets
// ---------------------------------------------------------------------------

pub const UPGRADE_CHANNELS: &[&str] = &["stable", "rapid", "patch", "node-image", "none"];
pub const NETWORK_POLICIES: &[&str] = &["azure", "calico", "cilium"];
pub const LOAD_BALANCER_SKUS: &[&str] = &["basic", "standard"];
pub const OS_SKUS: &[&str] = &["Ubuntu", "AzureLinux"];
pub const POOL_MODES: &[&str] = &["System", "User"];
pub const ZONES: &[&str] = &["1", "2", "3"];
pub const LOCK_KINDS: &[&str] = &["CanNotDelete", "ReadOnly"];
pub const SAFEGUARD_LEVELS: &[&str] = &["Enforcement", "Warning", "Off"];
pub const INGRESS_CONTROLLER_TYPES: &[&str] =
    &["AnnotationControlled", "External", "Internal", "None"];
pub const DAYS_OF_WEEK: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
pub const WEEK_INDEXES: &[&str] = &["First", "Second", "Third", "Fourth", "Last"];
/// Auto-upgrade maintenance never runs daily; the node-OS window may.
pub const AUTO_UPGRADE_FREQUENCIES: &[&str] = &["Weekly", "AbsoluteMonthly", "RelativeMonthly"];
pub const NODE_OS_FREQUENCIES: &[&str] = &["Daily", "Weekly", "AbsoluteMonthly", "RelativeMonthly"];

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

macro_rules! lazy_regex {
    ($name:ident, $re:expr) => {
        pub static $name: Lazy<Regex> = Lazy::new(|| {
            Regex::new($re).expect(concat!("static regex ", stringify!($name)))
        });
    };
}

lazy_regex!(
    CLUSTER_NAME_RE,
    r"^[a-zA-Z0-9]$|^[a-zA-Z0-9][-_a-zA-Z0-9]{0,61}[a-zA-Z0-9]$"
);
lazy_regex!(POOL_NAME_RE, r"^[a-z][a-z0-9]{0,11}$");
lazy_regex!(VERSION_RE, r"^\d+\.\d+(\.\d+)?$");
lazy_regex!(VM_SIZE_RE, r"^\S+$");
lazy_regex!(
    CIDR_RE,
    r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)/(3[0-2]|[12]?\d)$"
);
lazy_regex!(
    IPV4_RE,
    r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$"
);
lazy_regex!(
    SUBNET_ID_RE,
    r"^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.Network/virtualNetworks/[^/]+/subnets/[^/]+$"
);
lazy_regex!(
    PRIVATE_DNS_ZONE_ID_RE,
    r"^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.Network/privateDnsZones/[^/]+$"
);
lazy_regex!(
    USER_IDENTITY_ID_RE,
    r"^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.ManagedIdentity/userAssignedIdentities/[^/]+$"
);
lazy_regex!(
    REGISTRY_ID_RE,
    r"^/subscriptions/[^/]+/resourceGroups/[^/]+/providers/Microsoft\.ContainerRegistry/registries/[^/]+$"
);
lazy_regex!(TIME_RE, r"^([01]\d|2[0-3]):[0-5]\d$");
lazy_regex!(UTC_OFFSET_RE, r"^[+-]([01]\d|2[0-3]):[0-5]\d$");
lazy_regex!(DATE_RE, r"^\d{4}-\d{2}-\d{2}$");

// ---------------------------------------------------------------------------
// Section schemas
// ---------------------------------------------------------------------------

/// Root-level fields of the cluster document. Sub-sections appear here only
/// as shape declarations (`Object`); their own rules live in the dedicated
/// schemas below.
pub static CLUSTER: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        (
            "name",
            FieldRule::str()
                .required()
                .pattern(&CLUSTER_NAME_RE, "1-63 alphanumeric characters with internal '-' or '_'"),
        ),
        ("location", FieldRule::str().required()),
        ("resource_group", FieldRule::str().required()),
        (
            "kubernetes_version",
            FieldRule::str().pattern(&VERSION_RE, "a Kubernetes minor version like '1.28'"),
        ),
        (
            "automatic_upgrade_channel",
            FieldRule::str()
                .one_of(UPGRADE_CHANNELS)
                .default(json!("stable")),
        ),
        ("tags", FieldRule::str_map().default(json!({}))),
        ("network", FieldRule::object().required()),
        ("node_pools", FieldRule::object().default(json!({}))),
        ("api_server_access", FieldRule::object()),
        ("maintenance_auto_upgrade", FieldRule::object()),
        ("maintenance_node_os", FieldRule::object()),
        ("lock", FieldRule::object()),
        ("identity", FieldRule::object()),
        ("acr", FieldRule::object()),
        ("monitor_metrics", FieldRule::object()),
        ("ingress", FieldRule::object()),
        ("safeguard", FieldRule::object()),
        ("image_cleaner", FieldRule::object()),
    ])
});

pub static NETWORK: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        (
            "node_subnet_id",
            FieldRule::str()
                .required()
                .pattern(&SUBNET_ID_RE, "a virtual network subnet resource id"),
        ),
        (
            "pod_cidr",
            FieldRule::str()
                .required()
                .pattern(&CIDR_RE, "an IPv4 CIDR like '10.244.0.0/16'"),
        ),
        (
            "service_cidr",
            FieldRule::str().pattern(&CIDR_RE, "an IPv4 CIDR like '10.0.0.0/16'"),
        ),
        (
            "dns_service_ip",
            FieldRule::str().pattern(&IPV4_RE, "an IPv4 address"),
        ),
        (
            "network_policy",
            FieldRule::str()
                .one_of(NETWORK_POLICIES)
                .default(json!("cilium")),
        ),
        (
            "private_dns_zone_id",
            FieldRule::str().pattern(&PRIVATE_DNS_ZONE_ID_RE, "a private DNS zone resource id"),
        ),
        (
            "load_balancer_sku",
            FieldRule::str()
                .one_of(LOAD_BALANCER_SKUS)
                .default(json!("standard")),
        ),
    ])
});

pub static API_SERVER_ACCESS: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        (
            "subnet_id",
            FieldRule::str().pattern(&SUBNET_ID_RE, "a virtual network subnet resource id"),
        ),
        (
            "private_dns_zone_id",
            FieldRule::str().pattern(&PRIVATE_DNS_ZONE_ID_RE, "a private DNS zone resource id"),
        ),
        (
            "enable_private_cluster",
            FieldRule::bool().default(json!(false)),
        ),
        (
            "authorized_ip_ranges",
            FieldRule::str_list()
                .default(json!([]))
                .each(FieldRule::str().pattern(&CIDR_RE, "an IPv4 CIDR")),
        ),
    ])
});

pub static NODE_POOL: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        (
            "name",
            FieldRule::str()
                .required()
                .pattern(&POOL_NAME_RE, "1-12 lowercase alphanumerics starting with a letter"),
        ),
        (
            "vm_size",
            FieldRule::str()
                .required()
                .pattern(&VM_SIZE_RE, "a non-empty VM size like 'Standard_D2d_v5'"),
        ),
        (
            "orchestrator_version",
            FieldRule::str().pattern(&VERSION_RE, "a Kubernetes version like '1.28'"),
        ),
        ("min_count", FieldRule::int().min(0.0)),
        ("max_count", FieldRule::int().min(0.0).default(json!(9))),
        (
            "os_sku",
            FieldRule::str().one_of(OS_SKUS).default(json!("AzureLinux")),
        ),
        (
            "mode",
            FieldRule::str().one_of(POOL_MODES).default(json!("User")),
        ),
        ("os_disk_size_gb", FieldRule::int().min(30.0).max(2048.0)),
        ("tags", FieldRule::str_map().default(json!({}))),
        ("labels", FieldRule::str_map().default(json!({}))),
        (
            "zones",
            FieldRule::str_list()
                .default(json!(["1", "2", "3"]))
                .each(FieldRule::str().one_of(ZONES)),
        ),
    ])
});

/// Maintenance window rules, shared by both windows apart from the allowed
/// frequency set.
fn maintenance_schema(frequencies: &'static [&'static str]) -> SectionSchema {
    SectionSchema::new(vec![
        ("frequency", FieldRule::str().required().one_of(frequencies)),
        ("interval", FieldRule::int().min(1.0).default(json!(1))),
        (
            "duration",
            FieldRule::int().min(4.0).max(24.0).default(json!(4)),
        ),
        ("day_of_week", FieldRule::str().one_of(DAYS_OF_WEEK)),
        ("day_of_month", FieldRule::int().min(1.0).max(31.0)),
        ("week_index", FieldRule::str().one_of(WEEK_INDEXES)),
        (
            "start_date",
            FieldRule::str().pattern(&DATE_RE, "a date like '2026-01-31'"),
        ),
        (
            "start_time",
            FieldRule::str().pattern(&TIME_RE, "a time like '03:00'"),
        ),
        (
            "utc_offset",
            FieldRule::str().pattern(&UTC_OFFSET_RE, "an offset like '+02:00'"),
        ),
        ("blackouts", FieldRule::object_list().default(json!([]))),
    ])
}

pub static MAINTENANCE_AUTO_UPGRADE: Lazy<SectionSchema> =
    Lazy::new(|| maintenance_schema(AUTO_UPGRADE_FREQUENCIES));

pub static MAINTENANCE_NODE_OS: Lazy<SectionSchema> =
    Lazy::new(|| maintenance_schema(NODE_OS_FREQUENCIES));

pub static BLACKOUT: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("start", FieldRule::str().required()),
        ("end", FieldRule::str().required()),
    ])
});

pub static LOCK: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("kind", FieldRule::str().required().one_of(LOCK_KINDS)),
        ("name", FieldRule::str()),
    ])
});

pub static IDENTITY: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("system_assigned", FieldRule::bool().default(json!(false))),
        (
            "user_assigned_resource_ids",
            FieldRule::str_list()
                .default(json!([]))
                .each(FieldRule::str().pattern(
                    &USER_IDENTITY_ID_RE,
                    "a user-assigned managed identity resource id",
                )),
        ),
    ])
});

pub static ACR: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![(
        "registry_ids",
        FieldRule::str_list()
            .default(json!([]))
            .each(FieldRule::str().pattern(&REGISTRY_ID_RE, "a container registry resource id")),
    )])
});

pub static MONITOR_METRICS: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("labels_allowlist", FieldRule::str()),
        ("annotations_allowlist", FieldRule::str()),
    ])
});

pub static INGRESS: Lazy<SectionSchema> =
    Lazy::new(|| SectionSchema::new(vec![("nginx", FieldRule::object())]));

pub static INGRESS_NGINX: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![(
        "default_ingress_controller_type",
        FieldRule::str()
            .one_of(INGRESS_CONTROLLER_TYPES)
            .default(json!("AnnotationControlled")),
    )])
});

pub static SAFEGUARD: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("level", FieldRule::str().required().one_of(SAFEGUARD_LEVELS)),
        ("version", FieldRule::str()),
        (
            "excluded_namespaces",
            FieldRule::str_list().default(json!([])),
        ),
    ])
});

pub static IMAGE_CLEANER: Lazy<SectionSchema> = Lazy::new(|| {
    SectionSchema::new(vec![
        ("enabled", FieldRule::bool().default(json!(false))),
        (
            "interval_hours",
            FieldRule::int().min(24.0).default(json!(168)),
        ),
    ])
});

/// Serializable view of a field rule, for `show-schema` style dumps.
#[derive(Debug, Serialize)]
pub struct FieldRuleView {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl From<&FieldRule> for FieldRuleView {
    fn from(rule: &FieldRule) -> Self {
        Self {
            kind: rule.kind,
            required: rule.required,
            default: rule.default.clone(),
            allowed: rule
                .allowed
                .map(|a| a.iter().map(|s| s.to_string()).collect()),
            pattern: rule.pattern.as_ref().map(|p| p.regex.as_str().to_string()),
            min: rule.min,
            max: rule.max,
        }
    }
}

/// All named sections in display order, for schema dumps.
pub fn sections() -> Vec<(&'static str, &'static SectionSchema)> {
    vec![
        ("cluster", &CLUSTER),
        ("network", &NETWORK),
        ("api_server_access", &API_SERVER_ACCESS),
        ("node_pool", &NODE_POOL),
        ("maintenance_auto_upgrade", &MAINTENANCE_AUTO_UPGRADE),
        ("maintenance_node_os", &MAINTENANCE_NODE_OS),
        ("blackout", &BLACKOUT),
        ("lock", &LOCK),
        ("identity", &IDENTITY),
        ("acr", &ACR),
        ("monitor_metrics", &MONITOR_METRICS),
        ("ingress", &INGRESS),
        ("ingress_nginx", &INGRESS_NGINX),
        ("safeguard", &SAFEGUARD),
        ("image_cleaner", &IMAGE_CLEANER),
    ]
}
