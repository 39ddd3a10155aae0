//! Data-space → pixel-space mapping with a sliding time window.

/// Fixed pixel size of the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub width:  u32,
    pub height: u32,
}

impl CanvasGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Full extent of the currently loaded data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataRange {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl DataRange {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }
}

/// The visible part of a [`DataRange`] after the time window is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub minx:  f64,
    pub maxx:  f64,
    pub miny:  f64,
    pub maxy:  f64,
    pub scale: f64,
}

impl ViewWindow {
    /// Clip `range` to its most recent `scale` time units.
    pub fn clip(range: DataRange, scale: f64) -> Self {
        let minx = if range.xmin + scale < range.xmax {
            range.xmax - scale
        } else {
            range.xmin
        };
        Self {
            minx,
            maxx: range.xmax,
            miny: range.ymin,
            maxy: range.ymax,
            scale,
        }
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }

    /// A window with no positive extent on either axis maps nothing.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.minx <= x && x <= self.maxx && self.miny <= y && y <= self.maxy
    }
}

/// A projected point in canvas pixels, `y` measured upward from the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Maps data coordinates onto a fixed canvas.
///
/// `scale` is the only state that survives between renders; the data range and
/// the derived window are replaced on every [`AxisMapper::set_data_range`].
#[derive(Debug, Clone)]
pub struct AxisMapper {
    geometry: CanvasGeometry,
    scale:    f64,
    range:    DataRange,
    window:   ViewWindow,
}

impl AxisMapper {
    pub fn new(geometry: CanvasGeometry, scale: f64) -> Self {
        let range = DataRange::default();
        Self {
            geometry,
            scale,
            range,
            window: ViewWindow::clip(range, scale),
        }
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn data_range(&self) -> DataRange {
        self.range
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    /// Store the full data extent and recompute the visible window.
    pub fn set_data_range(&mut self, range: DataRange) {
        self.range = range;
        self.window = ViewWindow::clip(range, self.scale);
    }

    /// Change the window width, re-clipping the last stored data range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.window = ViewWindow::clip(self.range, scale);
    }

    /// Map `(x, y)` to canvas pixels.
    ///
    /// Returns `None` when the point lies outside the current window, when
    /// either coordinate is not finite, or when the window is degenerate.
    pub fn project(&self, x: f64, y: f64) -> Option<PixelPoint> {
        let w = &self.window;
        if w.is_degenerate() || !x.is_finite() || !y.is_finite() || !w.contains(x, y) {
            return None;
        }
        Some(PixelPoint {
            x: (x - w.minx) / w.width() * f64::from(self.geometry.width),
            y: (y - w.miny) / w.height() * f64::from(self.geometry.height),
        })
    }
}
