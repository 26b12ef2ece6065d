//! Layout engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{DEFAULT_CANVAS_WIDTH_PX, DEFAULT_TAB_NAME};
use crate::render::RoundingPolicy;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Name of the first tab in a freshly created document.
    pub default_tab_name: String,
    /// Canvas width assumed until the host reports a measured one.
    pub canvas_width_px: f64,
    /// Rounding applied to render geometry handed to the painter.
    pub rounding: RoundingPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_tab_name: DEFAULT_TAB_NAME.to_string(),
            canvas_width_px: DEFAULT_CANVAS_WIDTH_PX,
            rounding: RoundingPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `LAYOUT_DEFAULT_TAB_NAME`: default `"Layout 1"`
    /// - `LAYOUT_DEFAULT_CANVAS_WIDTH_PX`: default 800; unparsable or
    ///   non-positive values fall back to the default
    /// - `LAYOUT_DISPLAY_ROUNDING`: `whole` (default), `half`, or `exact`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown rounding policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build config from any key lookup. `from_env` uses the process
    /// environment; tests pass a map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown rounding policy.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_tab_name = lookup("LAYOUT_DEFAULT_TAB_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TAB_NAME.to_string());
        let canvas_width_px = lookup("LAYOUT_DEFAULT_CANVAS_WIDTH_PX")
            .and_then(|v| match v.trim().parse::<f64>() {
                Ok(width) => Some(width),
                Err(_) => None,
            })
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_CANVAS_WIDTH_PX);
        let rounding = parse_rounding(lookup("LAYOUT_DISPLAY_ROUNDING").as_deref())?;
        Ok(Self { default_tab_name, canvas_width_px, rounding })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

fn parse_rounding(raw: Option<&str>) -> Result<RoundingPolicy, ConfigError> {
    match raw.map_or("whole", str::trim) {
        "whole" => Ok(RoundingPolicy::WholePixel),
        "half" => Ok(RoundingPolicy::HalfPixel),
        "exact" => Ok(RoundingPolicy::Exact),
        other => Err(ConfigError::Parse(format!(
            "unknown LAYOUT_DISPLAY_ROUNDING '{other}' (expected 'whole', 'half', or 'exact')"
        ))),
    }
}
