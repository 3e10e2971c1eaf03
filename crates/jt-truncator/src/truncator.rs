//! Reusable truncator holding a validated configuration.

use crate::attempt;
use crate::report::Report;
use crate::validate::{resolve, validate};
use jt_core::{ConfigOverrides, Result, TruncateConfig, Value, DEFAULT_CONFIG};

/// Resolves and validates a configuration once, then truncates any number
/// of values with it.
#[derive(Debug, Clone)]
pub struct Truncator {
    config: TruncateConfig,
}

impl Truncator {
    /// Merge `overrides` onto the defaults and validate.
    pub fn new(overrides: &ConfigOverrides) -> Result<Self> {
        Ok(Self { config: resolve(overrides)? })
    }

    /// Use a fully specified configuration.
    pub fn with_config(config: TruncateConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TruncateConfig {
        &self.config
    }

    pub fn report(&self, value: &Value) -> Result<Report> {
        attempt::run(value, &self.config)
    }

    pub fn stringify(&self, value: &Value) -> Result<String> {
        Ok(self.report(value)?.into_string())
    }

    /// Decode JSON text, then truncate it.
    pub fn report_json_str(&self, text: &str) -> Result<Report> {
        self.report(&Value::from_json_str(text)?)
    }
}

impl Default for Truncator {
    fn default() -> Self {
        Self { config: DEFAULT_CONFIG.clone() }
    }
}
