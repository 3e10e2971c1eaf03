//! Outcome of a truncation call.

use jt_core::TruncateConfig;

/// Result of a truncation call with diagnostics.
///
/// When `gave_up` is set the bytes were hard-cut to exactly
/// `final_config.max_length` and may not be well-formed JSON, or even
/// valid UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    bytes: Vec<u8>,
    pub retry_count: usize,
    pub gave_up: bool,
    pub final_config: TruncateConfig,
}

impl Report {
    /// Output that fit the budget.
    pub(crate) fn fitted(bytes: Vec<u8>, retry_count: usize, final_config: TruncateConfig) -> Self {
        Self {
            bytes,
            retry_count,
            gave_up: false,
            final_config,
        }
    }

    /// Byte-level cut to `max_length`, possibly mid-character.
    pub(crate) fn hard_cut(mut bytes: Vec<u8>, retry_count: usize, final_config: TruncateConfig) -> Self {
        bytes.truncate(final_config.max_length);
        Self {
            bytes,
            retry_count,
            gave_up: true,
            final_config,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the output in bytes, never more than `final_config.max_length`.
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// The output up to its last complete character. Only a hard cut can
    /// leave a partial one behind, which is omitted here.
    pub fn text(&self) -> &str {
        let valid = match std::str::from_utf8(&self.bytes) {
            Ok(s) => return s,
            Err(e) => e.valid_up_to(),
        };
        // `valid_up_to` marks a char boundary, so this cannot fail.
        std::str::from_utf8(&self.bytes[..valid]).unwrap_or_default()
    }

    /// Owned form of [`Report::text`].
    pub fn into_string(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => {
                let valid = e.utf8_error().valid_up_to();
                let mut bytes = e.into_bytes();
                bytes.truncate(valid);
                String::from_utf8(bytes).unwrap_or_default()
            }
        }
    }

    /// Only output that was not hard-cut is guaranteed to be valid JSON.
    pub fn is_well_formed(&self) -> bool {
        !self.gave_up
    }
}
