#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Captures every tunable of the frame loop as a single [`RuntimeConfig`]
//! that can be loaded from TOML or JSON at startup and overridden field by
//! field in tests.
//!
//! # Loading
//!
//! ```toml
//! # hovertip.toml
//! measurement_timing = "post-paint"
//! render_latency_ms = 100
//!
//! [viewport]
//! width = 1024
//! height = 768
//!
//! [content]
//! line_height = 18
//! ```
//!
//! ```rust,ignore
//! let config = RuntimeConfig::from_toml_file("hovertip.toml")?;
//! ```
//!
//! # Defaults
//!
//! `RuntimeConfig::default()` measures pre-paint, adds no render latency,
//! and allows 16 render passes per frame.

use std::path::Path;

use hovertip_core::geometry::Size;
use hovertip_render::content::ContentMetrics;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::latency::RenderLatency;
use crate::schedule::MeasurementTiming;

/// Tunables for [`UiRuntime`](crate::UiRuntime) and the components it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Measurement timing for components that do not choose their own.
    pub measurement_timing: MeasurementTiming,

    /// Busy-wait per render pass, in milliseconds.
    pub render_latency_ms: u64,

    /// Cap on render / pre-paint effect passes within one frame.
    pub max_sync_passes: u32,

    /// Portal root viewport.
    pub viewport: Size,

    /// Content layout metrics.
    pub content: ContentMetrics,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            measurement_timing: MeasurementTiming::PrePaint,
            render_latency_ms: 0,
            max_sync_passes: 16,
            viewport: Size::new(1280, 720),
            content: ContentMetrics::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, choosing the format by extension (`.json` or TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_sync_passes == 0 {
            errors.push("max_sync_passes must be at least 1".to_owned());
        }
        if self.viewport.is_empty() {
            errors.push(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        if self.content.line_height <= 0 {
            errors.push(format!(
                "content.line_height must be positive, got {}",
                self.content.line_height
            ));
        }
        if self.content.char_width <= 0 {
            errors.push(format!(
                "content.char_width must be positive, got {}",
                self.content.char_width
            ));
        }
        if self.content.padding_y < 0 || self.content.padding_x < 0 {
            errors.push("content padding must not be negative".to_owned());
        }
        errors
    }

    /// Return `self` if valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn render_latency(&self) -> RenderLatency {
        RenderLatency::from_millis(self.render_latency_ms)
    }

    #[must_use]
    pub fn with_measurement_timing(mut self, timing: MeasurementTiming) -> Self {
        self.measurement_timing = timing;
        self
    }

    /// Set the render latency. Sub-millisecond remainders are dropped.
    #[must_use]
    pub fn with_render_latency(mut self, latency: Duration) -> Self {
        self.render_latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_max_sync_passes(mut self, passes: u32) -> Self {
        self.max_sync_passes = passes;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_content_metrics(mut self, metrics: ContentMetrics) -> Self {
        self.content = metrics;
        self
    }
}

/// Errors that can occur when loading a runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        assert!(RuntimeConfig::default().validate().is_empty());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            measurement_timing = "post-paint"
            render_latency_ms = 100

            [viewport]
            width = 640
            height = 480

            [content]
            line_height = 18
            "#,
        )
        .unwrap();
        assert_eq!(config.measurement_timing, MeasurementTiming::PostPaint);
        assert_eq!(config.render_latency().duration(), Duration::from_millis(100));
        assert_eq!(config.viewport, Size::new(640, 480));
        assert_eq!(config.content.line_height, 18);
        assert_eq!(config.content.padding_y, ContentMetrics::default().padding_y);
    }

    #[test]
    fn json_round_trips() {
        let config = RuntimeConfig::default()
            .with_measurement_timing(MeasurementTiming::PostPaint)
            .with_max_sync_passes(4);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RuntimeConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn unknown_timing_is_a_parse_error() {
        let err = RuntimeConfig::from_toml_str(r#"measurement_timing = "later""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn validation_collects_every_problem() {
        let err = RuntimeConfig::from_json_str(
            r#"{"max_sync_passes": 0, "viewport": {"width": 0, "height": 10}}"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"render_latency_ms": 7}}"#).unwrap();
        assert_eq!(RuntimeConfig::from_file(json.path()).unwrap().render_latency_ms, 7);

        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(toml_file, "render_latency_ms = 9").unwrap();
        assert_eq!(
            RuntimeConfig::from_file(toml_file.path()).unwrap().render_latency_ms,
            9
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RuntimeConfig::from_toml_file("/nonexistent/hovertip.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn with_render_latency_truncates_to_millis() {
        let config = RuntimeConfig::default().with_render_latency(Duration::from_micros(2500));
        assert_eq!(config.render_latency_ms, 2);
    }
}
