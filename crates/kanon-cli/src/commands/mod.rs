//! CLI commands

pub mod normalize;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use kanon_core::{RawDocument, parse_set_overrides};

use crate::error::Result;

/// Load the base document and fold in overlay files and `--set` overrides,
/// later sources winning.
pub fn load_document(file: &Path, values: &[PathBuf], set: &[String]) -> Result<RawDocument> {
    let mut document = RawDocument::from_file(file)?;

    for overlay_path in values {
        let overlay = RawDocument::from_file(overlay_path)?;
        document.merge(&overlay);
    }

    if !set.is_empty() {
        let overrides = parse_set_overrides(set)?;
        document.merge(&overrides);
    }

    Ok(document)
}
