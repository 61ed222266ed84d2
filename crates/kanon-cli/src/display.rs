//! Display formatting for CLI output
//!
//! Renders the engine's diagnostics grouped by configuration section, with
//! the offending value, the allowed set/pattern/range, and any fuzzy-match
//! hint the engine attached.

use console::style;
use indexmap::IndexMap;
use kanon_core::Diagnostic;

/// Grouped rendering of one validation run's diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Display diagnostics grouped by top-level section, preserving the
    /// engine's order within and across groups.
    pub fn display(&self) {
        let mut by_section: IndexMap<&str, Vec<&Diagnostic>> = IndexMap::new();
        for diagnostic in &self.diagnostics {
            by_section
                .entry(diagnostic.section())
                .or_default()
                .push(diagnostic);
        }

        for (section, diagnostics) in by_section {
            println!();
            println!("{}", style(section).cyan().bold());

            for diagnostic in diagnostics {
                println!(
                    "  {} [{}] {} at {}",
                    style("✗").red(),
                    style(diagnostic.kind.to_string()).magenta(),
                    diagnostic.message,
                    style(&diagnostic.path).dim()
                );

                if let Some(expected) = &diagnostic.expected {
                    println!("    {} expected {}", style("→").blue(), expected);
                }
                if let Some(suggestion) = &diagnostic.suggestion {
                    println!("    {} {}", style("hint:").blue(), suggestion);
                }
            }
        }
    }

    pub fn print_summary(&self) {
        if self.diagnostics.is_empty() {
            println!("{} Validation passed!", style("✓").green().bold());
        } else {
            println!();
            println!(
                "{} Validation failed: {} diagnostic(s)",
                style("✗").red().bold(),
                self.diagnostics.len()
            );
        }
    }

    /// Machine-readable form: a JSON object with the full diagnostic list.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.diagnostics.is_empty(),
            "diagnostics": self.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanon_core::DiagnosticKind;

    #[test]
    fn json_form_carries_validity_and_list() {
        let report = DiagnosticReport::new(vec![Diagnostic::new(
            "lock.kind",
            DiagnosticKind::EnumViolation,
            "bad kind",
        )]);
        let json = report.to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["diagnostics"][0]["path"], "lock.kind");

        let empty = DiagnosticReport::new(vec![]);
        assert_eq!(empty.to_json()["valid"], true);
    }
}
