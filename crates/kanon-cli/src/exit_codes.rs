//! Exit codes for the CLI wrapper
//!
//! The contract is deliberately small: callers scripting around `kanon` can
//! branch on three values.

/// Validation succeeded; a canonical configuration was produced.
pub const SUCCESS: i32 = 0;

/// One or more validation diagnostics were produced.
pub const VALIDATION_ERROR: i32 = 1;

/// The input could not be parsed into the expected shape at all (structural
/// failure before any field-level validation).
pub const PARSE_ERROR: i32 = 2;
