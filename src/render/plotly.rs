//! Plotly figure JSON and HTML page assembly.
//!
//! Each summary view kind maps to one figure shape: box traces per period
//! for distributions, a percentage line over a translucent total bar (on a
//! secondary axis) for threshold ratios, and stacked bars per price bracket
//! for the bracket views. Dashed reference lines mark 1% and 1.5% on the
//! ratio charts and 50% on the percentage chart.

use serde_json::{json, Value};

use crate::config;
use crate::error::Result;
use crate::models::{Granularity, PriceBracket};
use crate::views::{
    BracketCountRow, BracketShareRow, DistributionRow, SummaryView, ThresholdRatioRow,
};

/// Build the Plotly figure (`{"data": [...], "layout": {...}}`) for a view.
pub fn figure(view: &SummaryView, title: &str, granularity: Granularity) -> Value {
    match view {
        SummaryView::Distribution(rows) => box_figure(rows, title, granularity),
        SummaryView::ThresholdRatio(rows) => barline_figure(rows, title, granularity),
        SummaryView::BracketCount(rows) => count_figure(rows, title, granularity),
        SummaryView::BracketPercentage(rows) => share_figure(rows, title, granularity),
    }
}

// ---------------------------------------------------------------------------
// Figure builders
// ---------------------------------------------------------------------------

fn box_figure(rows: &[DistributionRow], title: &str, granularity: Granularity) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|row| {
            json!({
                "type": "box",
                "y": row.prices,
                "name": row.period.label(),
            })
        })
        .collect();

    json!({
        "data": data,
        "layout": {
            "title": title,
            "yaxis": {"title": "Home Prices"},
            "xaxis": {"title": granularity.axis_title()},
            "width": config::CHART_WIDTH,
            "height": config::CHART_HEIGHT,
            "showlegend": false,
        },
    })
}

fn barline_figure(rows: &[ThresholdRatioRow], title: &str, granularity: Granularity) -> Value {
    let x: Vec<String> = rows.iter().map(|r| r.period.label()).collect();
    let pct: Vec<f64> = rows.iter().map(|r| r.million_pct).collect();
    let totals: Vec<u64> = rows.iter().map(|r| r.total_count).collect();

    json!({
        "data": [
            {
                "type": "scatter",
                "x": x,
                "y": pct,
                "mode": "lines+markers",
                "name": "%",
            },
            {
                "type": "bar",
                "x": x,
                "y": totals,
                "opacity": 0.4,
                "name": "Total Sales",
                "yaxis": "y2",
            },
        ],
        "layout": {
            "title": title,
            "hovermode": "x unified",
            "xaxis": {"title": granularity.axis_title()},
            "yaxis": {"title": "% Million Dollar Homes to Overall Sales"},
            "yaxis2": {"title": "Total Sales", "overlaying": "y", "side": "right"},
            "width": config::CHART_WIDTH,
            "height": config::CHART_HEIGHT,
            "legend": horizontal_legend(),
            "shapes": [hline(1.0, "black"), hline(1.5, "red")],
        },
    })
}

fn count_figure(rows: &[BracketCountRow], title: &str, granularity: Granularity) -> Value {
    // Rows are period-major with every bracket present, so fixed-size
    // chunks split cleanly into one period each.
    let chunks: Vec<&[BracketCountRow]> = rows.chunks(PriceBracket::ALL.len()).collect();
    let x: Vec<String> = chunks.iter().map(|c| c[0].period.label()).collect();

    let data: Vec<Value> = PriceBracket::ALL
        .iter()
        .enumerate()
        .map(|(i, bracket)| {
            let y: Vec<u64> = chunks.iter().map(|c| c[i].count).collect();
            json!({
                "type": "bar",
                "name": bracket.label(),
                "x": x,
                "y": y,
            })
        })
        .collect();

    json!({
        "data": data,
        "layout": {
            "barmode": "stack",
            "title": title,
            "xaxis": {"title": granularity.axis_title()},
            "yaxis": {"title": "Count"},
            "hovermode": "x unified",
            "width": config::CHART_WIDTH,
            "height": config::CHART_HEIGHT,
            "legend": horizontal_legend(),
        },
    })
}

fn share_figure(rows: &[BracketShareRow], title: &str, granularity: Granularity) -> Value {
    let chunks: Vec<&[BracketShareRow]> = rows.chunks(PriceBracket::ALL.len()).collect();
    let x: Vec<String> = chunks.iter().map(|c| c[0].period.label()).collect();

    let data: Vec<Value> = PriceBracket::ALL
        .iter()
        .enumerate()
        .map(|(i, bracket)| {
            let y: Vec<f64> = chunks.iter().map(|c| c[i].pct).collect();
            json!({
                "type": "bar",
                "name": bracket.label(),
                "x": x,
                "y": y,
            })
        })
        .collect();

    json!({
        "data": data,
        "layout": {
            "barmode": "stack",
            "title": title,
            "xaxis": {"title": granularity.axis_title()},
            "yaxis": {"title": "%"},
            "hovermode": "x unified",
            "width": config::CHART_WIDTH,
            "height": config::CHART_HEIGHT,
            "legend": horizontal_legend(),
            "shapes": [hline(50.0, "purple")],
        },
    })
}

// ---------------------------------------------------------------------------
// Shared layout pieces
// ---------------------------------------------------------------------------

/// Dashed horizontal reference line spanning the full plot width.
fn hline(y: f64, color: &str) -> Value {
    json!({
        "type": "line",
        "xref": "paper",
        "x0": 0,
        "x1": 1,
        "yref": "y",
        "y0": y,
        "y1": y,
        "line": {"width": 1.5, "dash": "dash", "color": color},
    })
}

fn horizontal_legend() -> Value {
    json!({
        "orientation": "h",
        "yanchor": "bottom",
        "y": 1.02,
        "xanchor": "right",
        "x": 1,
    })
}

// ---------------------------------------------------------------------------
// HTML page
// ---------------------------------------------------------------------------

/// Wrap a figure in a self-contained HTML page that draws it with the CDN
/// Plotly bundle.
pub(crate) fn html_page(title: &str, figure: &Value) -> Result<String> {
    // "</" must not appear verbatim inside the inline script.
    let payload = serde_json::to_string(figure)?.replace("</", "<\\/");

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n\
         </head>\n\
         <body>\n\
         <div id=\"chart\"></div>\n\
         <script>\n\
         const figure = {payload};\n\
         Plotly.newPlot(\"chart\", figure.data, figure.layout, {{\"responsive\": true}});\n\
         </script>\n\
         </body>\n\
         </html>\n",
        title = html_escape(title),
        cdn = config::PLOTLY_CDN,
        payload = payload,
    ))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
