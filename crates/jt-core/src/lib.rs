//! Core types for the JSON truncator: the canonical value tree,
//! configuration records and the shared error type.

pub mod config;
pub mod error;
pub mod flags;
pub mod value;

pub use config::{ConfigOverrides, TruncateConfig, DEFAULT_CONFIG};
pub use error::{Result, TruncateError};
pub use flags::FormatFlags;
pub use value::{Map, Number, Value};
