//! Storefront configuration parsed from environment variables.

use std::time::Duration;

use studio::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use studio::geom::Size;

pub const DEFAULT_LATENCY_MS: u64 = 0;
pub const DEFAULT_DESIGN_FEE: f64 = 5.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl crate::error::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreConfig {
    /// Artificial delay applied before every store operation.
    pub latency: Duration,
    /// Flat per-unit surcharge for a custom design.
    pub design_fee: f64,
    /// Mockup canvas dimensions in CSS pixels.
    pub canvas: Size,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            design_fee: DEFAULT_DESIGN_FEE,
            canvas: Size::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }
}

impl StoreConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PRINTSHOP_LATENCY_MS`: default 0; unparseable values fall back to the default
    /// - `PRINTSHOP_DESIGN_FEE`: default 5.0, must be finite and non-negative
    /// - `PRINTSHOP_CANVAS_WIDTH` / `PRINTSHOP_CANVAS_HEIGHT`: default 400 / 500, must be positive
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a malformed fee or canvas dimension.
    pub fn from_env() -> Result<Self, ConfigError> {
        let latency = Duration::from_millis(env_parse_u64("PRINTSHOP_LATENCY_MS", DEFAULT_LATENCY_MS));
        let design_fee = env_parse_f64("PRINTSHOP_DESIGN_FEE", DEFAULT_DESIGN_FEE, |v| v >= 0.0)?;
        let width = env_parse_f64("PRINTSHOP_CANVAS_WIDTH", CANVAS_WIDTH, |v| v > 0.0)?;
        let height = env_parse_f64("PRINTSHOP_CANVAS_HEIGHT", CANVAS_HEIGHT, |v| v > 0.0)?;

        Ok(Self { latency, design_fee, canvas: Size::new(width, height) })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_parse_f64(key: &'static str, default: f64, valid: impl Fn(f64) -> bool) -> Result<f64, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::Invalid { var: key, reason: format!("'{raw}': {e}") })?;
    if !value.is_finite() || !valid(value) {
        return Err(ConfigError::Invalid { var: key, reason: format!("'{raw}' is out of range") });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
