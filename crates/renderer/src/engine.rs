//! Turns sample snapshots into canvas drawing scripts.

use crate::axis::{AxisMapper, CanvasGeometry, DataRange, ViewWindow};
use crate::page;
use graph_config::ChartConfig;
use graph_core::Series;

/// Vertical axis divisions (labels `0..=NUM_VLABEL`, label 0 at the bottom).
pub const NUM_VLABEL: u32 = 10;
/// Horizontal axis divisions (labels `0..=NUM_HLABEL`).
pub const NUM_HLABEL: u32 = 5;

const FALLBACK_COLOR: &str = "Black";

/// Renders the loaded series through an owned [`AxisMapper`].
#[derive(Debug, Clone)]
pub struct RenderEngine {
    mapper:        AxisMapper,
    series:        Vec<Series>,
    render_window: usize,
    colors:        Vec<String>,
    line_width:    f64,
    title:         String,
    scale_choices: Vec<u32>,
}

impl RenderEngine {
    pub fn new(geometry: CanvasGeometry, scale: f64) -> Self {
        Self::from_config(&ChartConfig {
            width: geometry.width,
            height: geometry.height,
            initial_scale: scale,
            ..ChartConfig::default()
        })
    }

    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            mapper:        AxisMapper::new(CanvasGeometry::new(cfg.width, cfg.height), cfg.initial_scale),
            series:        Vec::new(),
            render_window: cfg.render_window.max(1),
            colors:        cfg.colors.clone(),
            line_width:    cfg.line_width,
            title:         cfg.title.clone(),
            scale_choices: cfg.scale_choices.clone(),
        }
    }

    pub fn mapper(&self) -> &AxisMapper {
        &self.mapper
    }

    pub fn window(&self) -> ViewWindow {
        self.mapper.window()
    }

    /// Most recent samples per series considered by each render.
    pub fn render_window(&self) -> usize {
        self.render_window
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Change the visible time window.
    pub fn set_scale(&mut self, scale: f64) {
        self.mapper.set_scale(scale);
    }

    /// Load the latest series contents, keeping at most the configured number
    /// of most recent samples per series, and refit the data range.
    pub fn load_samples(&mut self, series: &[Series]) {
        self.series = series.iter().map(|s| s.tail(self.render_window)).collect();
        self.mapper.set_data_range(data_range(&self.series));
    }

    /// Complete HTML page for the first request.
    pub fn render_full(&self) -> String {
        page::full_page(&page::PageParams {
            title:         &self.title,
            geometry:      self.mapper.geometry(),
            window:        self.window(),
            scale_choices: &self.scale_choices,
        })
    }

    /// Script that redraws the chart and refreshes both axes' labels.
    pub fn render_incremental(&self) -> String {
        let mut script = self.graph_script();
        script.push_str(&self.vlabel_script());
        script.push_str(&self.hlabel_script());
        script
    }

    /// Clear the canvas and stroke every series, in order, as a polyline.
    ///
    /// Points outside the window are skipped; the next visible point starts a
    /// new sub-path so the gap is not bridged.
    pub fn graph_script(&self) -> String {
        let CanvasGeometry { width, height } = self.mapper.geometry();
        let mut res = String::from("var canctx = document.getElementById('graph').getContext('2d');\n");
        res.push_str(&format!("canctx.clearRect(0, 0, {width}, {height});\n"));

        for (i, series) in self.series.iter().enumerate() {
            res.push_str(&format!("canctx.strokeStyle = '{}';\n", js_escape(self.color(i))));
            res.push_str(&format!("canctx.lineWidth = {};\n", self.line_width));
            res.push_str("canctx.beginPath();\n");

            let mut pen_down = false;
            for sample in &series.samples {
                let Some(p) = self.mapper.project(sample.t, sample.v) else {
                    pen_down = false;
                    continue;
                };
                let op = if pen_down { "lineTo" } else { "moveTo" };
                res.push_str(&format!(
                    "canctx.{op}({:.2}, {:.2});\n",
                    p.x,
                    f64::from(height) - p.y
                ));
                pen_down = true;
            }

            res.push_str("canctx.stroke();\n");
        }

        res
    }

    pub fn vlabel_script(&self) -> String {
        label_script("vlabel", &vlabel_values(&self.window()))
    }

    pub fn hlabel_script(&self) -> String {
        label_script("hlabel", &hlabel_values(&self.window()))
    }

    fn color(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return FALLBACK_COLOR;
        }
        &self.colors[index % self.colors.len()]
    }
}

/// Extent of every finite sample, with `ymin` pulled down to at most zero.
pub fn data_range(series: &[Series]) -> DataRange {
    let mut points = series
        .iter()
        .flat_map(|s| s.samples.iter())
        .filter(|s| s.is_finite());

    let Some(first) = points.next() else {
        return DataRange::default();
    };

    let mut range = DataRange::new(first.t, first.t, first.v, first.v);
    for s in points {
        range.xmin = range.xmin.min(s.t);
        range.xmax = range.xmax.max(s.t);
        range.ymin = range.ymin.min(s.v);
        range.ymax = range.ymax.max(s.v);
    }
    range.ymin = range.ymin.min(0.0);
    range
}

/// Vertical label values, bottom (`miny`) first.
pub fn vlabel_values(window: &ViewWindow) -> Vec<f64> {
    let dy = window.height() / f64::from(NUM_VLABEL);
    (0..=NUM_VLABEL).map(|i| window.miny + dy * f64::from(i)).collect()
}

/// Horizontal label values, left (`minx`) first.
pub fn hlabel_values(window: &ViewWindow) -> Vec<f64> {
    let dx = window.width() / f64::from(NUM_HLABEL);
    (0..=NUM_HLABEL).map(|i| window.minx + dx * f64::from(i)).collect()
}

fn label_script(prefix: &str, values: &[f64]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("document.getElementById(\"{prefix}{i}\").innerHTML = \"{v:.2}\";\n"))
        .collect()
}

fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
