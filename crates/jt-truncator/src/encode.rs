//! Encoder adapter: serializes a [`Value`] to JSON bytes with serde_json.

use jt_core::{FormatFlags, Result, TruncateError, Value};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io::{self, Write};

/// Encode `value` as JSON.
///
/// Fails with [`TruncateError::Encoding`] when the value nests deeper than
/// `depth_limit` or holds a non-finite number.
pub fn encode(value: &Value, flags: FormatFlags, depth_limit: usize) -> Result<Vec<u8>> {
    inspect(value, depth_limit)?;
    if flags.contains(FormatFlags::PRETTY_PRINT) {
        write_with(value, FlagFormatter::new(PrettyFormatter::new(), flags))
    } else {
        write_with(value, FlagFormatter::new(CompactFormatter, flags))
    }
}

fn push_children<'a>(node: &'a Value, level: usize, stack: &mut Vec<(&'a Value, usize)>) {
    match node {
        Value::Sequence(items) => stack.extend(items.iter().map(|v| (v, level))),
        Value::Mapping(map) => stack.extend(map.iter().map(|(_, v)| (v, level))),
        _ => {}
    }
}

// Iterative so that adversarially deep input cannot exhaust the stack
// before the limit is enforced. `enclosing` counts the containers around
// a node, so `[]` sits at depth 1.
fn inspect(value: &Value, depth_limit: usize) -> Result<()> {
    let mut stack = vec![(value, 0usize)];
    while let Some((node, enclosing)) = stack.pop() {
        match node {
            Value::Number(n) if !n.is_finite() => {
                return Err(TruncateError::encoding("non-finite number cannot be encoded as JSON"));
            }
            Value::Sequence(_) | Value::Mapping(_) => {
                let level = enclosing + 1;
                if level > depth_limit {
                    return Err(TruncateError::encoding(format!("maximum depth of {depth_limit} exceeded")));
                }
                push_children(node, level, &mut stack);
            }
            _ => {}
        }
    }
    Ok(())
}

fn write_with<F: Formatter>(value: &Value, formatter: F) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser).map_err(|e| TruncateError::encoding(e.to_string()))?;
    Ok(out)
}

/// Wraps a serde_json formatter and applies the escaping flags to string
/// fragments. Layout calls are forwarded to the inner formatter.
struct FlagFormatter<F> {
    inner: F,
    flags: FormatFlags,
}

impl<F: Formatter> FlagFormatter<F> {
    fn new(inner: F, flags: FormatFlags) -> Self {
        Self { inner, flags }
    }
}

impl<F: Formatter> Formatter for FlagFormatter<F> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let slashes = self.flags.contains(FormatFlags::ESCAPE_SLASHES);
        let unicode = self.flags.contains(FormatFlags::ESCAPE_UNICODE);
        if !slashes && !unicode {
            return writer.write_all(fragment.as_bytes());
        }
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escape_slash = slashes && ch == '/';
            let escape_char = unicode && !ch.is_ascii();
            if !escape_slash && !escape_char {
                continue;
            }
            writer.write_all(&bytes[start..i])?;
            if escape_slash {
                writer.write_all(b"\\/")?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}
