//! Show-schema command - dump the registry's rule tables
//!
//! The registry is pure data, so auditing it is a serialization exercise.

use indexmap::IndexMap;
use kanon_core::registry::{self, FieldRuleView};

use crate::error::{CliError, Result};

pub fn run(section_filter: Option<&str>) -> Result<()> {
    let mut dump: IndexMap<&str, IndexMap<&str, FieldRuleView>> = IndexMap::new();

    for (name, schema) in registry::sections() {
        if let Some(filter) = section_filter {
            if name != filter {
                continue;
            }
        }
        let fields: IndexMap<&str, FieldRuleView> = schema
            .fields
            .iter()
            .map(|(field_name, rule)| (*field_name, FieldRuleView::from(rule)))
            .collect();
        dump.insert(name, fields);
    }

    if dump.is_empty() {
        let known: Vec<&str> = registry::sections().into_iter().map(|(n, _)| n).collect();
        return Err(CliError::other(format!(
            "unknown section '{}'; known sections: {}",
            section_filter.unwrap_or_default(),
            known.join(", ")
        )));
    }

    let yaml = serde_yaml::to_string(&dump).map_err(|e| CliError::other(e.to_string()))?;
    print!("{yaml}");
    Ok(())
}
