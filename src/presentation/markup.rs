// HTML/SVG serialization of chart views and the page around them
use crate::application::renderer::ChartRenderer;
use crate::domain::visual::{format_coord, Axis, AxisOrient, ChartView, Legend, LinePath, Plot};
use crate::presentation::view::ViewState;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

const STYLE: &str = ".error{color:#b00020}\
.multi-series-legend{display:flex;gap:12px;font:12px sans-serif;margin:4px 0 16px 40px}\
.multi-series-legend-item{display:inline-flex;align-items:center;gap:4px}\
.multi-series-legend-item-dot{display:inline-block;width:10px;height:10px;border-radius:50%}";

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
}

/// Complete HTML document for the current view state.
pub fn page_html(state: &ViewState, options: &PageOptions, renderer: &ChartRenderer) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_xml(&options.title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    match state {
        ViewState::Loading => html.push_str("<p>Loading...</p>\n"),
        ViewState::Failed(message) => {
            html.push_str(&format!("<p class=\"error\">Error: {}</p>\n", escape_xml(message)));
        }
        ViewState::Ready(charts) => {
            html.push_str("<div>\n");
            for chart in charts {
                html.push_str(&chart_html(&renderer.render(&chart.title, &chart.data)));
            }
            html.push_str("</div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// One chart: title heading, then the error message or the plot and legend.
pub fn chart_html(view: &ChartView) -> String {
    let mut html = String::from("<section class=\"chart\">\n");
    html.push_str(&format!("<h3>{}</h3>\n", escape_xml(&view.title)));

    // an empty chart keeps only its heading
    if let Some(err) = view.error() {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape_xml(&err.to_string())));
    } else if let Some(plot) = view.plot() {
        html.push_str(&plot_svg(plot));
        if let Some(legend) = &plot.legend {
            html.push_str(&legend_html(legend));
        }
    }

    html.push_str("</section>\n");
    html
}

fn plot_svg(plot: &Plot) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"presentation\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = plot.width,
        h = plot.height,
    );
    svg.push_str(&axis_svg(&plot.x_axis));
    svg.push_str(&axis_svg(&plot.y_axis));
    for line in &plot.lines {
        svg.push_str(&line_svg(line));
    }
    svg.push_str("</svg>\n");
    svg
}

fn axis_svg(axis: &Axis) -> String {
    let (class, domain_path) = match axis.orient {
        AxisOrient::Bottom => (
            "axis axis-bottom",
            format!(
                "M{},{}V0H{}V{}",
                format_coord(axis.range.0),
                TICK_SIZE,
                format_coord(axis.range.1),
                TICK_SIZE
            ),
        ),
        AxisOrient::Left => (
            "axis axis-left",
            format!(
                "M{},{}H0V{}H{}",
                -TICK_SIZE,
                format_coord(axis.range.0),
                format_coord(axis.range.1),
                -TICK_SIZE
            ),
        ),
    };

    let mut svg = format!(
        "<g class=\"{}\" transform=\"{}\" fill=\"none\" font-size=\"10\" font-family=\"sans-serif\">\n",
        class,
        axis.transform()
    );
    svg.push_str(&format!("<path class=\"domain\" stroke=\"currentColor\" d=\"{}\"/>\n", domain_path));

    for tick in &axis.ticks {
        let position = format_coord(tick.position);
        let label = escape_xml(&tick.label);
        let tick_svg = match axis.orient {
            AxisOrient::Bottom => format!(
                "<g class=\"tick\" transform=\"translate({position},0)\"><line stroke=\"currentColor\" y2=\"{TICK_SIZE}\"/><text fill=\"currentColor\" y=\"{}\" dy=\"0.71em\" text-anchor=\"middle\">{label}</text></g>\n",
                TICK_SIZE + TICK_PADDING
            ),
            AxisOrient::Left => format!(
                "<g class=\"tick\" transform=\"translate(0,{position})\"><line stroke=\"currentColor\" x2=\"-{TICK_SIZE}\"/><text fill=\"currentColor\" x=\"-{}\" dy=\"0.32em\" text-anchor=\"end\">{label}</text></g>\n",
                TICK_SIZE + TICK_PADDING
            ),
        };
        svg.push_str(&tick_svg);
    }

    svg.push_str("</g>\n");
    svg
}

fn line_svg(line: &LinePath) -> String {
    format!(
        "<path fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" d=\"{}\" aria-label=\"{}\"/>\n",
        escape_xml(&line.color),
        line.stroke_width,
        line.path_data(),
        escape_xml(&line.label)
    )
}

fn legend_html(legend: &Legend) -> String {
    let mut html = String::from("<div class=\"multi-series-legend\">\n");
    for entry in &legend.entries {
        html.push_str(&format!(
            "<span class=\"multi-series-legend-item\"><span class=\"multi-series-legend-item-dot\" style=\"background-color: {}\"></span>{}</span>\n",
            escape_xml(&entry.color),
            escape_xml(&entry.label)
        ));
    }
    html.push_str("</div>\n");
    html
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
