//! Kanon Core - validation and normalization engine for managed Kubernetes
//! cluster configuration
//!
//! The engine accepts an untrusted, deeply nested configuration document and
//! produces either one canonical [`ClusterConfig`] or the complete set of
//! [`Diagnostic`]s — never a partially valid result. It sits between
//! user-authored input and whatever orchestration layer actually provisions
//! the cluster; provisioning, persistence, and transport are not its concern.
//!
//! - `registry`: declarative rule table for every configuration section
//! - `field`: generic per-field validator interpreting the registry
//! - `cross`: rules spanning multiple fields within one section
//! - `maintenance`: maintenance window resolver (both cluster windows)
//! - `node_pools`: whole-map policy checker for node pools
//! - `normalize`: default filling for validated sections
//! - `engine`: pipeline orchestration and output assembly

pub mod config;
pub mod cross;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod error;
pub mod field;
pub mod maintenance;
pub mod node_pools;
pub mod normalize;
pub mod registry;

pub use config::{
    AcrConfig, ApiServerAccessConfig, BlackoutPeriod, ClusterConfig, DayOfWeek, Frequency,
    IdentityConfig, ImageCleanerConfig, IngressConfig, IngressControllerType, LoadBalancerSku,
    LockConfig, LockKind, MaintenanceWindow, MonitorMetricsConfig, NetworkConfig, NetworkPolicy,
    NginxIngressConfig, NodePool, OsSku, PoolMode, SafeguardConfig, SafeguardLevel, UpgradeChannel,
    WeekIndex,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, Expected};
pub use document::{RawDocument, parse_set_overrides};
pub use engine::{Outcome, ValidationEngine};
pub use error::{CoreError, Result};
