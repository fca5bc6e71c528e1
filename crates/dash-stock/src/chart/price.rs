//! Price history chart with max/min reference lines and the latest close

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::figure::{
    Annotation, Axis, Color, Figure, Font, Layout, Line, Marker, Scatter, Shape, Title, Trace,
};
use crate::format::format_currency;
use crate::series::PriceSeries;

const CHART_HEIGHT: u32 = 500;
const LINE_WIDTH: u32 = 2;
const LABEL_FONT_SIZE: u32 = 12;
const MARKER_SIZE: u32 = 10;

/// Where a reference line's label sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    TopRight,
    BottomRight,
}

/// Horizontal line at a notable price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: Color,
    pub position: LabelPosition,
}

impl ReferenceLine {
    fn shape(&self) -> Shape {
        Shape::horizontal_line(self.value, self.color, LINE_WIDTH)
    }

    fn annotation(&self) -> Annotation {
        let yanchor = match self.position {
            LabelPosition::TopRight => "bottom",
            LabelPosition::BottomRight => "top",
        };
        Annotation {
            text: self.label.clone(),
            xref: "paper".to_string(),
            yref: "y".to_string(),
            x: 1.0,
            y: self.value,
            xanchor: "right".to_string(),
            yanchor: yanchor.to_string(),
            showarrow: false,
            font: Font {
                size: LABEL_FONT_SIZE,
                color: Some(self.color),
            },
        }
    }
}

/// Highlighted most recent close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestMarker {
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
    pub color: Color,
    /// Whether the latest close is strictly above the previous one
    pub rising: bool,
}

/// Everything needed to draw one ticker's price chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChart {
    pub ticker: String,
    pub series: PriceSeries,
    pub max: ReferenceLine,
    pub min: ReferenceLine,
    pub latest: LatestMarker,
}

/// Build the chart for `series`
///
/// Returns `None` for an empty series; callers must not render anything then.
pub fn build_price_chart(series: &PriceSeries, ticker: &str) -> Option<PriceChart> {
    let max = series.max_close()?;
    let min = series.min_close()?;
    let latest = series.latest()?;
    let previous = series.previous()?;

    let rising = latest.close > previous.close;
    let latest_color = if rising { Color::Green } else { Color::Red };

    Some(PriceChart {
        ticker: ticker.to_string(),
        series: series.clone(),
        max: ReferenceLine {
            value: max,
            label: format!("Max: {}", format_currency(max)),
            color: Color::Green,
            position: LabelPosition::TopRight,
        },
        min: ReferenceLine {
            value: min,
            label: format!("Min: {}", format_currency(min)),
            color: Color::Red,
            position: LabelPosition::BottomRight,
        },
        latest: LatestMarker {
            date: latest.date,
            value: latest.close,
            label: format_currency(latest.close),
            color: latest_color,
            rising,
        },
    })
}

impl PriceChart {
    pub fn title(&self) -> String {
        format!("Price History - {}", self.ticker)
    }

    /// Plotly figure for this chart
    pub fn to_figure(&self) -> Figure {
        let close_line = Scatter {
            x: self.series.dates().map(|d| d.to_string()).collect(),
            y: self.series.closes().collect(),
            mode: "lines".to_string(),
            name: "Close".to_string(),
            line: Some(Line {
                color: Color::Blue,
                width: None,
            }),
            marker: None,
            text: Vec::new(),
            textposition: None,
            textfont: None,
        };

        let latest_point = Scatter {
            x: vec![self.latest.date.to_string()],
            y: vec![self.latest.value],
            mode: "markers+text".to_string(),
            name: "Latest Close".to_string(),
            line: None,
            marker: Some(Marker {
                color: self.latest.color,
                size: MARKER_SIZE,
            }),
            text: vec![self.latest.label.clone()],
            textposition: Some("top center".to_string()),
            textfont: Some(Font {
                size: LABEL_FONT_SIZE,
                color: Some(self.latest.color),
            }),
        };

        Figure {
            data: vec![Trace::Scatter(close_line), Trace::Scatter(latest_point)],
            layout: Layout {
                title: Some(Title::new(self.title())),
                xaxis: Some(Axis {
                    title: Title::new("Date"),
                }),
                yaxis: Some(Axis {
                    title: Title::new("Closing Price"),
                }),
                height: Some(CHART_HEIGHT),
                shapes: vec![self.max.shape(), self.min.shape()],
                annotations: vec![self.max.annotation(), self.min.annotation()],
                ..Layout::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series;
    use serde_json::json;

    #[test]
    fn test_extrema_and_falling_latest() {
        let chart = build_price_chart(&series(&[10.0, 12.0, 8.0, 15.0, 9.0]), "PETR4.SA").unwrap();

        assert_eq!(chart.max.value, 15.0);
        assert_eq!(chart.max.color, Color::Green);
        assert_eq!(chart.max.position, LabelPosition::TopRight);
        assert_eq!(chart.max.label, "Max: R$ 15,00");

        assert_eq!(chart.min.value, 8.0);
        assert_eq!(chart.min.color, Color::Red);
        assert_eq!(chart.min.position, LabelPosition::BottomRight);

        assert_eq!(chart.latest.value, 9.0);
        assert!(!chart.latest.rising);
        assert_eq!(chart.latest.color, Color::Red);
        assert_eq!(chart.latest.label, "R$ 9,00");
    }

    #[test]
    fn test_rising_latest_is_green() {
        let chart = build_price_chart(&series(&[10.0, 9.0, 11.0]), "VALE3.SA").unwrap();
        assert!(chart.latest.rising);
        assert_eq!(chart.latest.color, Color::Green);
    }

    #[test]
    fn test_flat_latest_is_not_rising() {
        let chart = build_price_chart(&series(&[10.0, 10.0]), "VALE3.SA").unwrap();
        assert_eq!(chart.latest.color, Color::Red);
    }

    #[test]
    fn test_single_point_series() {
        let chart = build_price_chart(&series(&[20.0]), "ITUB4.SA").unwrap();
        assert_eq!(chart.latest.value, 20.0);
        assert_eq!(chart.max.value, 20.0);
        assert_eq!(chart.min.value, 20.0);
        assert!(!chart.latest.rising);
        assert_eq!(chart.latest.color, Color::Red);
    }

    #[test]
    fn test_empty_series_has_no_chart() {
        assert!(build_price_chart(&PriceSeries::default(), "NONE").is_none());
    }

    #[test]
    fn test_figure_layout() {
        let chart = build_price_chart(&series(&[1.0, 2.0, 3.0]), "AAPL").unwrap();
        let figure = serde_json::to_value(chart.to_figure()).unwrap();

        assert_eq!(figure["data"].as_array().unwrap().len(), 2);
        assert_eq!(figure["data"][0]["type"], json!("scatter"));
        assert_eq!(figure["data"][0]["mode"], json!("lines"));
        assert_eq!(figure["data"][0]["x"][0], json!("2024-01-01"));
        assert_eq!(figure["data"][1]["mode"], json!("markers+text"));
        assert_eq!(figure["data"][1]["marker"]["color"], json!("green"));
        assert_eq!(figure["layout"]["title"]["text"], json!("Price History - AAPL"));
        assert_eq!(figure["layout"]["height"], json!(500));
        assert_eq!(figure["layout"]["shapes"][0]["y0"], json!(3.0));
        assert_eq!(figure["layout"]["shapes"][1]["y0"], json!(1.0));
        assert_eq!(figure["layout"]["annotations"][1]["text"], json!("Min: R$ 1,00"));
        assert_eq!(figure["layout"]["annotations"][1]["yanchor"], json!("top"));
    }
}
