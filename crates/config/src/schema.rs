use graph_core::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `livegraph.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// HTTP listener and poll pacing.
    pub server: ServerConfig,
    /// Background sampling task.
    pub sampler: SamplerConfig,
    /// Chart geometry and styling.
    pub chart: ChartConfig,
}

impl GraphConfig {
    /// Reject settings that would make the chart or the sampler meaningless.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(GraphError::Config(msg.to_string()));

        if self.chart.width == 0 || self.chart.height == 0 {
            return bad("chart.width and chart.height must be non-zero");
        }
        if self.chart.render_window == 0 {
            return bad("chart.render_window must be at least 1");
        }
        if self.chart.initial_scale.is_nan() || self.chart.initial_scale <= 0.0 {
            return bad("chart.initial_scale must be a positive number");
        }
        if self.chart.colors.is_empty() {
            return bad("chart.colors must name at least one color");
        }
        if self.sampler.interval_ms == 0 {
            return bad("sampler.interval_ms must be non-zero");
        }
        if self.sampler.capacity == 0 {
            return bad("sampler.capacity must be at least 1");
        }
        Ok(())
    }
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind; local-only by default.
    pub bind: String,
    pub port: u16,
    /// How long each `/update.js` request is held before it is answered.
    pub poll_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind:          "127.0.0.1".to_string(),
            port:          8088,
            poll_delay_ms: 1_000,
        }
    }
}

/// Background sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Time between two samples.
    pub interval_ms: u64,
    /// Samples retained per series before the oldest are evicted.
    pub capacity: usize,
    /// Which memory counters to sample.
    pub source: SourceKind,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            capacity:    6_000,
            source:      SourceKind::System,
        }
    }
}

/// Memory counters fed into the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Machine-wide used / total RAM.
    #[default]
    System,
    /// Resident / virtual memory of this process.
    Process,
}

/// Chart geometry and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Page title.
    pub title: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Visible time window (seconds) until the viewer picks another one.
    pub initial_scale: f64,
    /// Most recent samples per series considered by each render.
    pub render_window: usize,
    /// Stroke width of the series lines.
    pub line_width: f64,
    /// CSS stroke colors, one per series; cycled if there are more series.
    pub colors: Vec<String>,
    /// Window widths offered as radio buttons on the page.
    pub scale_choices: Vec<u32>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title:         "livegraph".to_string(),
            width:         600,
            height:        400,
            initial_scale: 10.0,
            render_window: 100,
            line_width:    3.0,
            colors:        vec!["Red".to_string(), "Blue".to_string()],
            scale_choices: vec![1, 10, 100],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GraphConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.chart.width, 600);
        assert_eq!(config.chart.height, 400);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GraphConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [sampler]
            source = "process"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.sampler.source, SourceKind::Process);
        assert_eq!(config.sampler.interval_ms, 100);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn rejects_zero_geometry() {
        let mut config = GraphConfig::default();
        config.chart.height = 0;
        assert!(matches!(config.validate(), Err(GraphError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_scale() {
        let mut config = GraphConfig::default();
        config.chart.initial_scale = 0.0;
        assert!(config.validate().is_err());
        config.chart.initial_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_palette() {
        let mut config = GraphConfig::default();
        config.chart.colors.clear();
        assert!(config.validate().is_err());
    }
}
