//! Valuation radar chart

use serde::{Deserialize, Serialize};

use super::figure::{Figure, Layout, Polar, RadialAxis, ScatterPolar, Title, Trace};
use crate::valuation::ValuationSnapshot;

/// One closed polar trace over the valuation categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// Build the radar chart for `snapshot`, naming the trace after `label`
///
/// Values are used as given; percentage scaling happens when the snapshot
/// is extracted.
pub fn build_radar_chart(snapshot: &ValuationSnapshot, label: &str) -> RadarChart {
    let (categories, values) = snapshot
        .entries()
        .into_iter()
        .map(|(category, value)| (category.to_string(), value))
        .unzip();

    RadarChart {
        label: label.to_string(),
        categories,
        values,
    }
}

impl RadarChart {
    pub fn title(&self) -> String {
        format!("Valuation Radar - {}", self.label)
    }

    pub fn to_figure(&self) -> Figure {
        Figure {
            data: vec![Trace::ScatterPolar(ScatterPolar {
                r: self.values.clone(),
                theta: self.categories.clone(),
                fill: "toself".to_string(),
                name: self.label.clone(),
            })],
            layout: Layout {
                title: Some(Title::new(self.title())),
                polar: Some(Polar {
                    radialaxis: RadialAxis { visible: true },
                }),
                showlegend: Some(true),
                ..Layout::default()
            },
        }
    }
}
