//! Truncation configuration and caller overrides.

use crate::error::{Result, TruncateError};
use crate::flags::FormatFlags;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::trace;

/// Effective limits for one truncation call.
///
/// Never mutated during a call; each shrink pass supersedes it with a
/// decayed copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncateConfig {
    /// Maximum byte length of the encoded output.
    pub max_length: usize,
    /// Entries kept per container in one pass.
    pub max_items: usize,
    /// Character cap for strings and keys in one pass.
    pub max_item_length: usize,
    /// Shrink passes before giving up.
    pub max_retries: usize,
    /// Factor in (0, 1) applied to the per-pass limits.
    pub decay_rate: f64,
    /// Marker text; `%overage%` is replaced with the removed count. Empty disables markers.
    pub ellipsis_template: String,
    pub format_flags: FormatFlags,
    /// Maximum container nesting accepted by the encoder.
    pub depth_limit: usize,
}

impl Default for TruncateConfig {
    fn default() -> Self {
        Self {
            max_length: 40_000,
            max_items: 100,
            max_item_length: 8_000,
            max_retries: 5,
            decay_rate: 0.75,
            ellipsis_template: "...".into(),
            format_flags: FormatFlags::empty(),
            depth_limit: 512,
        }
    }
}

/// The process-wide default configuration.
pub static DEFAULT_CONFIG: LazyLock<TruncateConfig> = LazyLock::new(TruncateConfig::default);

/// Placeholder substituted with the removed count in `ellipsis_template`.
pub const OVERAGE_PLACEHOLDER: &str = "%overage%";

/// Caller-supplied overrides, merged onto [`DEFAULT_CONFIG`].
///
/// Integer knobs are signed so that out-of-range input reaches validation
/// instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub max_length: Option<i64>,
    pub max_items: Option<i64>,
    pub max_item_length: Option<i64>,
    pub max_retries: Option<i64>,
    pub decay_rate: Option<f64>,
    pub ellipsis_template: Option<String>,
    pub format_flags: Option<u32>,
    pub depth_limit: Option<i64>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_length(mut self, value: i64) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn max_items(mut self, value: i64) -> Self {
        self.max_items = Some(value);
        self
    }

    pub fn max_item_length(mut self, value: i64) -> Self {
        self.max_item_length = Some(value);
        self
    }

    pub fn max_retries(mut self, value: i64) -> Self {
        self.max_retries = Some(value);
        self
    }

    pub fn decay_rate(mut self, value: f64) -> Self {
        self.decay_rate = Some(value);
        self
    }

    pub fn ellipsis(mut self, template: impl Into<String>) -> Self {
        self.ellipsis_template = Some(template.into());
        self
    }

    pub fn format_flags(mut self, flags: FormatFlags) -> Self {
        self.format_flags = Some(flags.bits());
        self
    }

    /// Raw flag bits, checked when merged.
    pub fn format_bits(mut self, bits: u32) -> Self {
        self.format_flags = Some(bits);
        self
    }

    pub fn depth_limit(mut self, value: i64) -> Self {
        self.depth_limit = Some(value);
        self
    }

    /// Parse overrides from a JSON options object such as
    /// `{"maxLength": 200, "ellipsisTemplate": "..."}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| TruncateError::config(field, format!("must be non-negative, got {value}")))
}

impl TruncateConfig {
    /// Layer `overrides` on top of `self`.
    ///
    /// Only representation problems are reported here (negative counts,
    /// unknown flag bits); range checks belong to validation.
    pub fn merge(&self, overrides: &ConfigOverrides) -> Result<TruncateConfig> {
        trace!(?overrides, "merging configuration overrides");
        let mut config = self.clone();
        if let Some(v) = overrides.max_length {
            config.max_length = non_negative("maxLength", v)?;
        }
        if let Some(v) = overrides.max_items {
            config.max_items = non_negative("maxItems", v)?;
        }
        if let Some(v) = overrides.max_item_length {
            config.max_item_length = non_negative("maxItemLength", v)?;
        }
        if let Some(v) = overrides.max_retries {
            config.max_retries = non_negative("maxRetries", v)?;
        }
        if let Some(v) = overrides.decay_rate {
            config.decay_rate = v;
        }
        if let Some(template) = &overrides.ellipsis_template {
            config.ellipsis_template = template.clone();
        }
        if let Some(bits) = overrides.format_flags {
            config.format_flags = FormatFlags::try_from(bits).map_err(|reason| TruncateError::config("formatFlags", reason))?;
        }
        if let Some(v) = overrides.depth_limit {
            config.depth_limit = non_negative("depthLimit", v)?;
        }
        Ok(config)
    }

    /// Merge onto [`DEFAULT_CONFIG`].
    pub fn from_overrides(overrides: &ConfigOverrides) -> Result<TruncateConfig> {
        DEFAULT_CONFIG.merge(overrides)
    }

    /// Render the ellipsis marker for `overage` removed characters or entries.
    pub fn ellipsis(&self, overage: usize) -> String {
        self.ellipsis_template.replace(OVERAGE_PLACEHOLDER, &overage.to_string())
    }

    pub fn has_ellipsis(&self) -> bool {
        !self.ellipsis_template.is_empty()
    }
}
