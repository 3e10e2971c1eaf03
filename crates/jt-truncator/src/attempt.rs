//! The encode / shrink / decay loop.

use crate::decay::decay;
use crate::encode::encode;
use crate::report::Report;
use crate::shrink::{Node, Shrinker};
use jt_core::{Result, TruncateConfig, Value};
use tracing::{debug, warn};

/// Encode `value` within `config.max_length` bytes, shrinking and decaying
/// the limits between attempts. `config` must already be validated.
///
/// Encoding errors are returned as-is; shrinking only fixes size.
pub fn run(value: &Value, config: &TruncateConfig) -> Result<Report> {
    let bytes = encode(value, config.format_flags, config.depth_limit)?;
    debug!(attempt = 0, bytes = bytes.len(), budget = config.max_length, "encoded");
    if bytes.len() <= config.max_length {
        return Ok(Report::fitted(bytes, 0, config.clone()));
    }

    let mut node = Node::from_value(value)?;
    let mut config = config.clone();
    let mut retry_count = 0;
    loop {
        retry_count += 1;
        let (shrunk, stats) = Shrinker::new(&config).shrink(node)?;
        node = shrunk;
        config = decay(&config);
        debug!(
            retry_count,
            ?stats,
            max_items = config.max_items,
            max_item_length = config.max_item_length,
            "shrink pass"
        );

        let bytes = encode(&node.render(&config), config.format_flags, config.depth_limit)?;
        debug!(attempt = retry_count, bytes = bytes.len(), budget = config.max_length, "encoded");
        if bytes.len() <= config.max_length {
            return Ok(Report::fitted(bytes, retry_count, config));
        }
        if retry_count >= config.max_retries {
            warn!(
                retry_count,
                bytes = bytes.len(),
                budget = config.max_length,
                "retry budget exhausted, hard-cutting output"
            );
            return Ok(Report::hard_cut(bytes, retry_count, config));
        }
    }
}
