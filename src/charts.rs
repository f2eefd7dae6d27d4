//! Scatter-chart series built from the raw catalog.

use serde::Serialize;

use crate::catalog::PlanetRecord;

/// One scatter point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Horizontal value.
    pub x: f64,
    /// Vertical value.
    pub y: f64,
    /// Planet name, for tooltips.
    pub planet_name: String,
}

/// A labelled, colored group of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Legend label.
    pub label: &'static str,
    /// Point color as `#rrggbb`.
    pub color: &'static str,
    /// Points in catalog order.
    pub data: Vec<ChartPoint>,
}

/// A scatter chart: axis titles plus series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    /// Horizontal axis title.
    pub x_title: &'static str,
    /// Vertical axis title.
    pub y_title: &'static str,
    /// Series, drawn in order.
    pub series: Vec<ChartSeries>,
}

impl ScatterChart {
    /// Total points across all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).sum()
    }
}

fn series(
    label: &'static str,
    color: &'static str,
    planets: &[PlanetRecord],
    x: impl Fn(&PlanetRecord) -> Option<f64>,
    y: impl Fn(&PlanetRecord) -> Option<f64>,
    keep: impl Fn(&PlanetRecord) -> bool,
) -> ChartSeries {
    let data = planets
        .iter()
        .filter(|p| keep(p))
        .filter_map(|p| {
            Some(ChartPoint {
                x: x(p)?,
                y: y(p)?,
                planet_name: p.name.clone(),
            })
        })
        .collect();
    ChartSeries { label, color, data }
}

/// Orbital period against planet radius, split into short-period,
/// medium-period and large-planet series. A planet can appear in more than
/// one series.
#[must_use]
pub fn orbital_period_vs_radius(planets: &[PlanetRecord]) -> ScatterChart {
    let period = |p: &PlanetRecord| p.orbital_period;
    let radius = |p: &PlanetRecord| p.planet_radius;
    ScatterChart {
        x_title: "Orbital Period (days)",
        y_title: "Planet Radius (ER)",
        series: vec![
            series(
                "Orbital Period vs Radius (<= 50 days)",
                "#82ca9d",
                planets,
                period,
                radius,
                |p| p.orbital_period.is_some_and(|d| d > 0.0 && d <= 50.0),
            ),
            series(
                "Orbital Period vs Radius (50 < days <= 100)",
                "#8884d8",
                planets,
                period,
                radius,
                |p| p.orbital_period.is_some_and(|d| d > 50.0 && d <= 100.0),
            ),
            series(
                "Large Planet Radius (> 2 ER)",
                "#ffc658",
                planets,
                period,
                radius,
                |p| p.planet_radius.is_some_and(|r| r > 2.0),
            ),
        ],
    }
}

/// System distance against planet radius.
#[must_use]
pub fn distance_vs_radius(planets: &[PlanetRecord]) -> ScatterChart {
    ScatterChart {
        x_title: "Distance (pc)",
        y_title: "Planet Radius (ER)",
        series: vec![series(
            "Distance vs Radius",
            "#8884d8",
            planets,
            |p| p.system_distance,
            |p| p.planet_radius,
            |_| true,
        )],
    }
}

/// Tooltip text for a point on the orbital period chart.
#[must_use]
pub fn period_tooltip(point: &ChartPoint) -> String {
    format!(
        "{}: Orbital Period: {} days, Radius: {} ER",
        point.planet_name, point.x, point.y
    )
}
