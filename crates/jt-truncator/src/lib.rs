//! JSON Truncator — encode a value tree within a byte budget.
//!
//! Each attempt encodes the current tree; if it is too long the tree is
//! shrunk and the per-pass limits decay:
//! 1. Validate — merged configuration checked once up front
//! 2. Encode — serde_json, honouring format flags and the depth limit
//! 3. Shrink — cut strings and keys, drop trailing container entries
//! 4. Decay — tighten `max_items` / `max_item_length` for the next pass
//!
//! When the retry budget runs out the last encoding is hard-cut to the
//! byte budget and the report is flagged `gave_up`.

pub mod attempt;
pub mod decay;
pub mod encode;
pub mod report;
pub mod shrink;
pub mod truncator;
pub mod validate;

pub use jt_core::{ConfigOverrides, FormatFlags, Map, Number, Result, TruncateConfig, TruncateError, Value};
pub use report::Report;
pub use truncator::Truncator;

/// Encode `value` within the configured budget, returning only the text.
pub fn stringify(value: &Value, overrides: &ConfigOverrides) -> Result<String> {
    Ok(report(value, overrides)?.into_string())
}

/// Encode `value` within the configured budget, with diagnostics.
pub fn report(value: &Value, overrides: &ConfigOverrides) -> Result<Report> {
    Truncator::new(overrides)?.report(value)
}

/// Decode JSON text and re-encode it within the configured budget.
pub fn report_json_str(text: &str, overrides: &ConfigOverrides) -> Result<Report> {
    Truncator::new(overrides)?.report_json_str(text)
}
