//! Validate command - run the engine and report diagnostics

use console::style;
use kanon_core::{Outcome, ValidationEngine};
use std::path::{Path, PathBuf};

use crate::commands::load_document;
use crate::display::DiagnosticReport;
use crate::error::{CliError, Result};

pub fn run(
    file: &Path,
    values: &[PathBuf],
    set: &[String],
    json_output: bool,
    quiet: bool,
) -> Result<()> {
    let document = load_document(file, values, set)?;

    if !quiet && !json_output {
        println!(
            "{} Validating {}",
            style("→").blue(),
            file.display()
        );
    }

    let outcome = ValidationEngine::new().validate(&document)?;

    match outcome {
        Outcome::Valid(config) => {
            if json_output {
                let report = DiagnosticReport::new(vec![]);
                println!("{}", serde_json::to_string_pretty(&report.to_json())
                    .map_err(|e| CliError::other(e.to_string()))?);
            } else if !quiet {
                println!(
                    "{} Validation passed! Cluster '{}' is ready to provision.",
                    style("✓").green().bold(),
                    config.name
                );
            }
            Ok(())
        }
        Outcome::Invalid(diagnostics) => {
            let report = DiagnosticReport::new(diagnostics);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report.to_json())
                    .map_err(|e| CliError::other(e.to_string()))?);
            } else {
                report.display();
                report.print_summary();
            }
            Err(CliError::validation(report.len()))
        }
    }
}
