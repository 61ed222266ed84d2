//! Validation engine and output assembler
//!
//! Orchestrates the pipeline: per-field checks over the document root, then
//! the section validators (cross-field, maintenance windows, node pools),
//! then normalization and assembly of the canonical config. The run is
//! fail-together: every violation found anywhere in the document is
//! collected before anything is returned, and a single diagnostic is enough
//! to suppress the canonical output entirely.

use serde_json::{Map, Value as JsonValue};

use crate::config::ClusterConfig;
use crate::cross;
use crate::diagnostic::Diagnostic;
use crate::document::RawDocument;
use crate::error::{CoreError, Result};
use crate::field;
use crate::maintenance::{self, WindowKind};
use crate::node_pools;
use crate::normalize;
use crate::registry;

/// Result of one validation run: the canonical config, or every diagnostic
/// found. Never both, never a partial config.
#[derive(Debug)]
pub enum Outcome {
    Valid(Box<ClusterConfig>),
    Invalid(Vec<Diagnostic>),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Outcome::Valid(_) => &[],
            Outcome::Invalid(diags) => diags,
        }
    }

    pub fn into_config(self) -> Option<ClusterConfig> {
        match self {
            Outcome::Valid(config) => Some(*config),
            Outcome::Invalid(_) => None,
        }
    }
}

/// The validation engine. Stateless: the only shared data is the read-only
/// schema registry, so one engine value can serve any number of runs.
#[derive(Debug, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over one raw document.
    ///
    /// `Err` is reserved for structural problems and internal canonicalize
    /// failures; semantic violations always come back as
    /// [`Outcome::Invalid`].
    pub fn validate(&self, document: &RawDocument) -> Result<Outcome> {
        let root = document.inner().as_object().ok_or_else(|| {
            CoreError::structural("the configuration document must be a mapping at its root")
        })?;

        let mut diagnostics = field::validate_section("", &registry::CLUSTER, root);

        // Section validators run only on sections that are present and have
        // the right shape; an absent optional section is skipped entirely,
        // and a malformed one was already reported by the root pass.
        if let Some(network) = object_section(root, "network") {
            let section_diags = field::validate_section("network", &registry::NETWORK, network);
            let clean = section_diags.is_empty();
            diagnostics.extend(section_diags);
            if clean {
                diagnostics.extend(cross::validate_network(network));
            }
        }

        if let Some(access) = object_section(root, "api_server_access") {
            let section_diags =
                field::validate_section("api_server_access", &registry::API_SERVER_ACCESS, access);
            let clean = section_diags.is_empty();
            diagnostics.extend(section_diags);
            if clean {
                diagnostics.extend(cross::validate_api_server_access(access));
            }
        }

        if let Some(pools) = object_section(root, "node_pools") {
            diagnostics.extend(node_pools::validate_pools(pools));
        }

        for kind in [WindowKind::AutoUpgrade, WindowKind::NodeOs] {
            if let Some(window) = object_section(root, kind.section_name()) {
                diagnostics.extend(maintenance::validate_window(kind, window));
            }
        }

        for (name, schema) in [
            ("lock", &registry::LOCK),
            ("identity", &registry::IDENTITY),
            ("acr", &registry::ACR),
            ("monitor_metrics", &registry::MONITOR_METRICS),
            ("safeguard", &registry::SAFEGUARD),
            ("image_cleaner", &registry::IMAGE_CLEANER),
        ] {
            if let Some(section) = object_section(root, name) {
                diagnostics.extend(field::validate_section(name, schema, section));
            }
        }

        if let Some(ingress) = object_section(root, "ingress") {
            diagnostics.extend(field::validate_section("ingress", &registry::INGRESS, ingress));
            if let Some(JsonValue::Object(nginx)) = ingress.get("nginx") {
                diagnostics.extend(field::validate_section(
                    "ingress.nginx",
                    &registry::INGRESS_NGINX,
                    nginx,
                ));
            }
        }

        if !diagnostics.is_empty() {
            return Ok(Outcome::Invalid(diagnostics));
        }

        let normalized = normalize::normalize_document(root);
        let config: ClusterConfig =
            serde_json::from_value(normalized).map_err(|e| CoreError::Canonicalize {
                message: e.to_string(),
            })?;

        Ok(Outcome::Valid(Box::new(config)))
    }
}

fn object_section<'a>(
    root: &'a Map<String, JsonValue>,
    name: &str,
) -> Option<&'a Map<String, JsonValue>> {
    match root.get(name) {
        Some(JsonValue::Object(section)) => Some(section),
        _ => None,
    }
}
