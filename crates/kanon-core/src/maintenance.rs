//! Maintenance window resolver
//!
//! Validates and normalizes the recurring-schedule objects. The same rule
//! set serves both windows; only the allowed frequency set differs (the
//! auto-upgrade window never runs daily). A null window is skipped entirely
//! by the engine and never reaches this module.

use chrono::{DateTime, NaiveDate};
use serde_json::Value as JsonValue;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::field::{self, join_path};
use crate::registry::{self, SectionSchema};

/// Which of the two cluster maintenance windows is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    AutoUpgrade,
    NodeOs,
}

impl WindowKind {
    pub fn section_name(self) -> &'static str {
        match self {
            WindowKind::AutoUpgrade => "maintenance_auto_upgrade",
            WindowKind::NodeOs => "maintenance_node_os",
        }
    }

    fn schema(self) -> &'static SectionSchema {
        match self {
            WindowKind::AutoUpgrade => &registry::MAINTENANCE_AUTO_UPGRADE,
            WindowKind::NodeOs => &registry::MAINTENANCE_NODE_OS,
        }
    }
}

/// Validate one maintenance window object.
///
/// Rule order: per-field checks (types, enums, bounds, time patterns), then
/// frequency-dependent companion requirements, then blackout periods. Every
/// blackout in the set is validated; one bad period does not hide the next.
pub fn validate_window(
    kind: WindowKind,
    object: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let section = kind.section_name();
    let mut diagnostics = field::validate_section(section, kind.schema(), object);

    // Companion requirements only make sense for a valid frequency value.
    if let Some(frequency) = object.get("frequency").and_then(|v| v.as_str()) {
        if diagnostics.iter().all(|d| d.path != join_path(section, "frequency")) {
            diagnostics.extend(check_companions(section, frequency, object));
        }
    }

    if let Some(start_date) = object.get("start_date").and_then(|v| v.as_str()) {
        if registry::DATE_RE.is_match(start_date)
            && NaiveDate::parse_from_str(start_date, "%Y-%m-%d").is_err()
        {
            diagnostics.push(
                Diagnostic::new(
                    join_path(section, "start_date"),
                    DiagnosticKind::PatternMismatch,
                    format!("'{start_date}' is not a valid calendar date"),
                )
                .with_value(JsonValue::String(start_date.to_string())),
            );
        }
    }

    if let Some(blackouts) = object.get("blackouts").and_then(|v| v.as_array()) {
        for (index, entry) in blackouts.iter().enumerate() {
            let path = format!("{section}.blackouts.{index}");
            match entry.as_object() {
                Some(period) => diagnostics.extend(validate_blackout(&path, period)),
                None => {
                    // Already reported as TypeMismatch by the field pass.
                }
            }
        }
    }

    diagnostics
}

fn check_companions(
    section: &str,
    frequency: &str,
    object: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let missing = |field: &str| {
        Diagnostic::new(
            join_path(section, field),
            DiagnosticKind::MissingRequiredField,
            format!("frequency '{frequency}' requires {field}"),
        )
    };
    let present = |field: &str| matches!(object.get(field), Some(v) if !v.is_null());

    match frequency {
        "Weekly" => {
            if !present("day_of_week") {
                diagnostics.push(missing("day_of_week"));
            }
        }
        "AbsoluteMonthly" => {
            if !present("day_of_month") {
                diagnostics.push(missing("day_of_month"));
            }
        }
        "RelativeMonthly" => {
            if !present("week_index") {
                diagnostics.push(missing("week_index"));
            }
            if !present("day_of_week") {
                diagnostics.push(missing("day_of_week"));
            }
        }
        _ => {}
    }

    diagnostics
}

/// Validate one blackout period: both bounds must parse as RFC 3339
/// timestamps and the end must come strictly after the start.
fn validate_blackout(
    path: &str,
    period: &serde_json::Map<String, JsonValue>,
) -> Vec<Diagnostic> {
    let mut diagnostics = field::validate_section(path, &registry::BLACKOUT, period);

    let mut parse = |name: &str| -> Option<DateTime<chrono::FixedOffset>> {
        let raw = period.get(name)?.as_str()?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Some(ts),
            Err(_) => {
                diagnostics.push(
                    Diagnostic::new(
                        join_path(path, name),
                        DiagnosticKind::PatternMismatch,
                        format!("'{raw}' is not an RFC 3339 timestamp"),
                    )
                    .with_value(JsonValue::String(raw.to_string())),
                );
                None
            }
        }
    };

    let start = parse("start");
    let end = parse("end");

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            diagnostics.push(Diagnostic::new(
                path,
                DiagnosticKind::CrossFieldConstraintViolation,
                "blackout end must be after its start",
            ));
        }
    }

    diagnostics
}
