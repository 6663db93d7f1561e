#![forbid(unsafe_code)]

//! Environment overrides for default settings.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VINPUT_INITIAL_VALUE` | `initial_value` |
//! | `VINPUT_FOCUS` | `focus` |
//! | `VINPUT_FOCUS_ON_SET_VALUE` | `focus_on_set_value` |
//! | `VINPUT_TOUCHED_ON_CHANGE` | `touched_on_change` |
//! | `VINPUT_TRIM_ON_BLUR` | `trim_on_blur` |
//!
//! Booleans accept `1/0`, `true/false`, `yes/no` and `on/off`, case-insensitively.
//! Unset variables leave the field absent from the patch.

use std::fmt;

use crate::defaults::{self, DefaultsPatch};

pub const ENV_INITIAL_VALUE: &str = "VINPUT_INITIAL_VALUE";
pub const ENV_FOCUS: &str = "VINPUT_FOCUS";
pub const ENV_FOCUS_ON_SET_VALUE: &str = "VINPUT_FOCUS_ON_SET_VALUE";
pub const ENV_TOUCHED_ON_CHANGE: &str = "VINPUT_TOUCHED_ON_CHANGE";
pub const ENV_TRIM_ON_BLUR: &str = "VINPUT_TRIM_ON_BLUR";

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something that is not a boolean.
    InvalidBool {
        key: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "{key}: expected a boolean, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn parse_bool(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

impl DefaultsPatch {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flag = |key: &'static str| -> Result<Option<bool>> {
            lookup(key).map(|v| parse_bool(key, &v)).transpose()
        };
        Ok(Self {
            initial_value: lookup(ENV_INITIAL_VALUE),
            focus: flag(ENV_FOCUS)?,
            focus_on_set_value: flag(ENV_FOCUS_ON_SET_VALUE)?,
            touched_on_change: flag(ENV_TOUCHED_ON_CHANGE)?,
            trim_on_blur: flag(ENV_TRIM_ON_BLUR)?,
        })
    }
}

/// Apply environment overrides to the process-wide defaults.
///
/// Nothing is applied if any variable is malformed.
pub fn init_from_env() -> Result<()> {
    let patch = DefaultsPatch::from_env()?;
    if !patch.is_empty() {
        tracing::info!(?patch, "applying default settings from environment");
        defaults::init(patch);
    }
    Ok(())
}
