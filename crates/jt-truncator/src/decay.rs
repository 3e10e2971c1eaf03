//! Limit decay between shrink passes.

use jt_core::TruncateConfig;

pub const MIN_ITEMS: usize = 1;
pub const MIN_ITEM_LENGTH: usize = 3;

/// Tighten `max_items` and `max_item_length` by `decay_rate`, clamped to
/// their floors. Every other field is carried over unchanged.
pub fn decay(config: &TruncateConfig) -> TruncateConfig {
    TruncateConfig {
        max_items: scale(config.max_items, config.decay_rate).max(MIN_ITEMS),
        max_item_length: scale(config.max_item_length, config.decay_rate).max(MIN_ITEM_LENGTH),
        ..config.clone()
    }
}

fn scale(limit: usize, rate: f64) -> usize {
    (limit as f64 * rate).floor() as usize
}
