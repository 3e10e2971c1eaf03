//! Pre-flight configuration checks.

use jt_core::{ConfigOverrides, Result, TruncateConfig, TruncateError, DEFAULT_CONFIG};

/// Smallest budget that can hold a quoted one-character string.
pub const MIN_LENGTH: usize = 3;

/// Hard ceiling on `depth_limit`; deeper input is rejected before any
/// recursive walk starts.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Check a merged configuration for internal consistency.
pub fn validate(config: &TruncateConfig) -> Result<()> {
    let rate = config.decay_rate;
    if !(rate > 0.0 && rate < 1.0) {
        return Err(TruncateError::config("decayRate", format!("must be strictly between 0 and 1, got {rate}")));
    }
    if config.max_length < MIN_LENGTH {
        return Err(TruncateError::config("maxLength", format!("must be at least {MIN_LENGTH}, got {}", config.max_length)));
    }
    if config.max_item_length < MIN_LENGTH {
        return Err(TruncateError::config(
            "maxItemLength",
            format!("must be at least {MIN_LENGTH}, got {}", config.max_item_length),
        ));
    }
    if config.max_length < config.max_item_length {
        return Err(TruncateError::config(
            "maxItemLength",
            format!("must not exceed maxLength ({} > {})", config.max_item_length, config.max_length),
        ));
    }
    if config.max_items < 1 {
        return Err(TruncateError::config("maxItems", "must be at least 1"));
    }
    if config.max_retries < 1 {
        return Err(TruncateError::config("maxRetries", "must be at least 1"));
    }
    if config.depth_limit < 1 || config.depth_limit > MAX_DEPTH_LIMIT {
        return Err(TruncateError::config(
            "depthLimit",
            format!("must be between 1 and {MAX_DEPTH_LIMIT}, got {}", config.depth_limit),
        ));
    }
    Ok(())
}

/// Merge `overrides` onto the defaults and validate the result.
pub fn resolve(overrides: &ConfigOverrides) -> Result<TruncateConfig> {
    let config = DEFAULT_CONFIG.merge(overrides)?;
    validate(&config)?;
    Ok(config)
}
