// Chart renderer - pure mapping from chart data to a visual tree
use crate::application::scale::{extent, LinearScale};
use crate::domain::chart::{RawDatum, SeriesShape};
use crate::domain::visual::{
    Axis, AxisOrient, ChartBody, ChartView, Legend, LegendEntry, LinePath, Plot, Point, RenderError,
    Tick,
};

pub const DEFAULT_PALETTE: [&str; 10] = [
    "blue", "green", "red", "orange", "purple", "brown", "pink", "gray", "cyan", "magenta",
];

/// Used for multi-series lines when the palette is empty.
pub const FALLBACK_COLOR: &str = "steelblue";

const SINGLE_SERIES_COLOR: &str = "blue";
const SINGLE_SERIES_LABEL: &str = "Line Chart";
const STROKE_WIDTH: f64 = 1.5;
const TICK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and the margins reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 720,
            height: 300,
            margin: Margin {
                top: 20.0,
                right: 30.0,
                bottom: 30.0,
                left: 40.0,
            },
        }
    }
}

impl ChartLayout {
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width as f64 - self.margin.right)
    }

    /// Bottom to top, so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height as f64 - self.margin.bottom, self.margin.top)
    }
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    layout: ChartLayout,
    palette: Vec<String>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(
            ChartLayout::default(),
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        )
    }
}

impl ChartRenderer {
    pub fn new(layout: ChartLayout, palette: Vec<String>) -> Self {
        Self { layout, palette }
    }

    /// Colour of series `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }
        &self.palette[index % self.palette.len()]
    }

    /// Build the full visual tree for one chart. Every call starts from
    /// scratch, so re-rendering changed data never leaves stale elements.
    pub fn render(&self, title: &str, data: &[RawDatum]) -> ChartView {
        let body = if data.is_empty() {
            ChartBody::Empty
        } else if data.iter().any(|datum| !datum.timestamp.is_finite()) {
            tracing::debug!("Chart {:?} has an invalid timestamp", title);
            ChartBody::Error(RenderError::InvalidTimestamp)
        } else {
            ChartBody::Plot(self.plot(data))
        };

        ChartView {
            title: title.to_string(),
            body,
        }
    }

    fn plot(&self, data: &[RawDatum]) -> Plot {
        let shape = SeriesShape::detect(data);
        tracing::debug!("Plotting {} series over {} points", shape.series_count(), data.len());

        let x_domain = extent(data.iter().map(|datum| datum.timestamp)).unwrap_or((0.0, 0.0));
        let y_values: Vec<f64> = match shape {
            SeriesShape::Single => data.iter().filter_map(|d| d.value.series_value(0)).collect(),
            SeriesShape::Multi(_) => data.iter().flat_map(|d| d.value.present_values()).collect(),
        };
        // all-null charts collapse to a zero-span domain
        let y_domain = extent(y_values.into_iter().filter(|v| v.is_finite())).unwrap_or((0.0, 0.0));

        let x = LinearScale::new(x_domain, self.layout.x_range());
        let y = LinearScale::new(y_domain, self.layout.y_range());

        let lines = match shape {
            SeriesShape::Single => vec![self.line(
                data,
                0,
                &x,
                &y,
                SINGLE_SERIES_LABEL.to_string(),
                SINGLE_SERIES_COLOR.to_string(),
            )],
            SeriesShape::Multi(count) => (0..count)
                .map(|k| {
                    self.line(
                        data,
                        k,
                        &x,
                        &y,
                        format!("Line chart for series {}", k + 1),
                        self.series_color(k).to_string(),
                    )
                })
                .collect(),
        };

        let legend = match shape {
            SeriesShape::Single => None,
            SeriesShape::Multi(count) => Some(Legend {
                entries: (0..count)
                    .map(|k| LegendEntry {
                        label: format!("Series {}", k + 1),
                        color: self.series_color(k).to_string(),
                    })
                    .collect(),
            }),
        };

        Plot {
            width: self.layout.width,
            height: self.layout.height,
            x_axis: self.axis(AxisOrient::Bottom, &x),
            y_axis: self.axis(AxisOrient::Left, &y),
            lines,
            legend,
        }
    }

    fn line(
        &self,
        data: &[RawDatum],
        series: usize,
        x: &LinearScale,
        y: &LinearScale,
        label: String,
        color: String,
    ) -> LinePath {
        let points = data.iter().map(|datum| {
            datum
                .value
                .series_value(series)
                .filter(|value| value.is_finite())
                .map(|value| Point {
                    x: x.map(datum.timestamp),
                    y: y.map(value),
                })
        });
        LinePath::from_points(label, color, STROKE_WIDTH, points)
    }

    fn axis(&self, orient: AxisOrient, scale: &LinearScale) -> Axis {
        let offset = match orient {
            AxisOrient::Bottom => self.layout.height as f64 - self.layout.margin.bottom,
            AxisOrient::Left => self.layout.margin.left,
        };
        let ticks = scale
            .tick_labels(TICK_COUNT)
            .into_iter()
            .map(|(value, label)| Tick {
                value,
                position: scale.map(value),
                label,
            })
            .collect();

        Axis {
            orient,
            offset,
            range: scale.range,
            ticks,
        }
    }
}
