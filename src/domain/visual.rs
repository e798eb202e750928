// Declarative visual tree produced by the renderer

/// Errors that replace a chart's plot with an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid timestamp in data")]
    InvalidTimestamp,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// No data: the title is drawn on its own.
    Empty,
    Error(RenderError),
    Plot(Plot),
}

impl ChartView {
    pub fn plot(&self) -> Option<&Plot> {
        match &self.body {
            ChartBody::Plot(plot) => Some(plot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<RenderError> {
        match &self.body {
            ChartBody::Error(err) => Some(*err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub width: u32,
    pub height: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub lines: Vec<LinePath>,
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Translation of the axis line across its orientation, in pixels.
    pub offset: f64,
    /// Pixel extent of the axis line.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn transform(&self) -> String {
        match self.orient {
            AxisOrient::Bottom => format!("translate(0,{})", format_coord(self.offset)),
            AxisOrient::Left => format!("translate({},0)", format_coord(self.offset)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One stroked series. Each segment is a run of consecutive defined points;
/// the breaks between segments are the gaps left by null values.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub label: String,
    pub color: String,
    pub stroke_width: f64,
    pub segments: Vec<Vec<Point>>,
}

impl LinePath {
    /// Group `(x, y)` samples into segments, breaking at every undefined point.
    pub fn from_points(
        label: String,
        color: String,
        stroke_width: f64,
        points: impl IntoIterator<Item = Option<Point>>,
    ) -> Self {
        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for point in points {
            match point {
                Some(point) => current.push(point),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        Self {
            label,
            color,
            stroke_width,
            segments,
        }
    }

    #[cfg(test)]
    pub fn has_gaps(&self) -> bool {
        self.segments.len() > 1
    }

    /// SVG path data: `M x,y L x,y ...` per segment, `M x,y Z` for a lone point.
    pub fn path_data(&self) -> String {
        let mut d = String::new();
        for segment in &self.segments {
            for (i, point) in segment.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{command}{},{}", format_coord(point.x), format_coord(point.y)));
            }
            if segment.len() == 1 {
                d.push('Z');
            }
        }
        d
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Pixel coordinates keep at most two decimals.
pub fn format_coord(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}
