//! Normalize command - print the canonical configuration

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
    output: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let document = load_document(file, values, set)?;

    let outcome = ValidationEngine::new().validate(&document)?;

    let config = match outcome {
        Outcome::Valid(config) => config,
        Outcome::Invalid(diagnostics) => {
            let report = DiagnosticReport::new(diagnostics);
            report.display();
            report.print_summary();
            return Err(CliError::validation(report.len()));
        }
    };

    let rendered = if json_output {
        config.to_json()?
    } else {
        config.to_yaml()?
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!(
                "{} Wrote canonical configuration to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
