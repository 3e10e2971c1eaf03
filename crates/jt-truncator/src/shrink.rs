//! Structural shrinking of a value tree under one pass's limits.
//!
//! The tree being shrunk is a [`Node`], a mirror of [`Value`] that carries
//! the cumulative count of characters or entries removed at each position.
//! Markers are rendered from those counts, never parsed back out of text.

use jt_core::{Map, Result, TruncateConfig, TruncateError, Value};
use std::collections::HashSet;
use tracing::trace;

/// Recursion ceiling for the shrinker, independent of the encoder's depth limit.
pub const MAX_SHRINK_DEPTH: usize = 1024;

/// Room left for the two quote characters around an encoded string.
const QUOTE_RESERVE: usize = 2;

/// Working tree threaded through successive shrink passes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Null, booleans and numbers. Never shrunk.
    Scalar(Value),
    /// A string prefix plus the number of characters cut from the original.
    Text { kept: String, overage: usize },
    /// Kept items plus the number of entries dropped from the original.
    Sequence { items: Vec<Node>, dropped: usize },
    /// Kept entries (keys possibly truncated) plus the number dropped.
    Mapping { entries: Vec<(String, Node)>, dropped: usize },
}

impl Node {
    /// Copy a caller value into a fresh working tree with zero overage.
    pub fn from_value(value: &Value) -> Result<Node> {
        Self::build(value, 0)
    }

    fn build(value: &Value, depth: usize) -> Result<Node> {
        check_depth(depth)?;
        Ok(match value {
            Value::String(s) => Node::Text { kept: s.clone(), overage: 0 },
            Value::Sequence(items) => Node::Sequence {
                items: items.iter().map(|v| Self::build(v, depth + 1)).collect::<Result<_>>()?,
                dropped: 0,
            },
            Value::Mapping(map) => Node::Mapping {
                entries: map
                    .iter()
                    .map(|(k, v)| Ok((k.to_string(), Self::build(v, depth + 1)?)))
                    .collect::<Result<_>>()?,
                dropped: 0,
            },
            scalar => Node::Scalar(scalar.clone()),
        })
    }

    /// Materialize the tree as a [`Value`], rendering ellipsis markers for
    /// every truncated string and every container that lost entries.
    pub fn render(&self, config: &TruncateConfig) -> Value {
        match self {
            Node::Scalar(v) => v.clone(),
            Node::Text { kept, overage } => {
                if *overage > 0 && config.has_ellipsis() {
                    Value::String(format!("{kept}{}", config.ellipsis(*overage)))
                } else {
                    Value::String(kept.clone())
                }
            }
            Node::Sequence { items, dropped } => {
                let mut out: Vec<Value> = items.iter().map(|n| n.render(config)).collect();
                if *dropped > 0 && config.has_ellipsis() {
                    out.push(Value::String(config.ellipsis(*dropped)));
                }
                Value::Sequence(out)
            }
            Node::Mapping { entries, dropped } => {
                let mut map = Map::with_capacity(entries.len() + 1);
                for (key, node) in entries {
                    map.insert(key.clone(), node.render(config));
                }
                if *dropped > 0 && config.has_ellipsis() {
                    // Keyed by the new size; skip ahead if a kept key already uses it.
                    let mut slot = entries.len();
                    while map.contains_key(&slot.to_string()) {
                        slot += 1;
                    }
                    map.insert(slot.to_string(), Value::String(config.ellipsis(*dropped)));
                }
                Value::Mapping(map)
            }
        }
    }

    /// Cumulative overage recorded at this position.
    pub fn overage(&self) -> usize {
        match self {
            Node::Scalar(_) => 0,
            Node::Text { overage, .. } => *overage,
            Node::Sequence { dropped, .. } | Node::Mapping { dropped, .. } => *dropped,
        }
    }
}

/// What one pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShrinkStats {
    pub strings_cut: usize,
    pub chars_removed: usize,
    pub entries_dropped: usize,
    pub keys_renamed: usize,
}

/// One shrink pass under a fixed configuration.
pub struct Shrinker<'a> {
    config: &'a TruncateConfig,
    cut: usize,
    stats: ShrinkStats,
}

impl<'a> Shrinker<'a> {
    pub fn new(config: &'a TruncateConfig) -> Self {
        let reserve = config.ellipsis_template.chars().count() + QUOTE_RESERVE;
        Self {
            config,
            cut: config.max_item_length.saturating_sub(reserve),
            stats: ShrinkStats::default(),
        }
    }

    /// Rewrite `node` into a new tree. The input tree is consumed.
    pub fn shrink(mut self, node: Node) -> Result<(Node, ShrinkStats)> {
        let node = self.visit(node, 0)?;
        Ok((node, self.stats))
    }

    fn visit(&mut self, node: Node, depth: usize) -> Result<Node> {
        check_depth(depth)?;
        match node {
            Node::Scalar(_) => Ok(node),
            Node::Text { kept, overage } => Ok(self.shrink_text(kept, overage)),
            Node::Sequence { mut items, dropped } => {
                let removed = items.len().saturating_sub(self.config.max_items);
                items.truncate(self.config.max_items);
                let items = items
                    .into_iter()
                    .map(|item| self.visit(item, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                self.record_dropped(removed);
                Ok(Node::Sequence { items, dropped: dropped + removed })
            }
            Node::Mapping { entries, dropped } => {
                let mut removed = entries.len().saturating_sub(self.config.max_items);
                let capacity = entries.len().min(self.config.max_items);
                let mut seen = HashSet::with_capacity(capacity);
                let mut kept = Vec::with_capacity(capacity);
                for (key, child) in entries.into_iter().take(self.config.max_items) {
                    let key = self.shrink_key(key);
                    if !seen.insert(key.clone()) {
                        // A truncated key landed on one already kept.
                        removed += 1;
                        continue;
                    }
                    kept.push((key, self.visit(child, depth + 1)?));
                }
                self.record_dropped(removed);
                Ok(Node::Mapping { entries: kept, dropped: dropped + removed })
            }
        }
    }

    fn shrink_text(&mut self, kept: String, overage: usize) -> Node {
        let len = kept.chars().count();
        if len <= self.cut {
            return Node::Text { kept, overage };
        }
        let removed = len - self.cut;
        self.stats.strings_cut += 1;
        self.stats.chars_removed += removed;
        trace!(len, cut = self.cut, overage = overage + removed, "cut string");
        Node::Text { kept: take_chars(kept, self.cut), overage: overage + removed }
    }

    // Keys get a fresh cut every pass; no overage is carried for them.
    fn shrink_key(&mut self, key: String) -> String {
        let len = key.chars().count();
        if len <= self.config.max_item_length.saturating_sub(QUOTE_RESERVE) {
            return key;
        }
        self.stats.keys_renamed += 1;
        let mut out = take_chars(key, self.cut);
        if self.config.has_ellipsis() {
            out.push_str(&self.config.ellipsis(len - self.cut));
        }
        out
    }

    fn record_dropped(&mut self, removed: usize) {
        if removed > 0 {
            trace!(removed, "dropped container entries");
            self.stats.entries_dropped += removed;
        }
    }
}

/// Run a single shrink pass over a caller value.
pub fn shrink_value(value: &Value, config: &TruncateConfig) -> Result<Value> {
    let (node, _) = Shrinker::new(config).shrink(Node::from_value(value)?)?;
    Ok(node.render(config))
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_SHRINK_DEPTH {
        return Err(TruncateError::DepthExceeded { limit: MAX_SHRINK_DEPTH });
    }
    Ok(())
}

fn take_chars(mut s: String, n: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(n) {
        s.truncate(idx);
    }
    s
}
