//! Chart models built from fetched data

pub mod figure;
pub mod price;
pub mod radar;

pub use figure::{Color, Figure};
pub use price::{LabelPosition, LatestMarker, PriceChart, ReferenceLine, build_price_chart};
pub use radar::{RadarChart, build_radar_chart};
