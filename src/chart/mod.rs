//! Chart series and ECharts option building.
//!
//! Aggregators produce plain series; a [`Chart`] wraps a series with the
//! presentation settings the page needs and turns it into an ECharts
//! option object.

pub mod page;

use serde::Serialize;
use serde_json::{json, Value};

pub use page::{write_index, Page, RenderError};

/// Opacity of the area drawn beneath line charts
const AREA_OPACITY: f64 = 0.2;

/// A parallel-coordinates axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParallelAxis {
    pub dim: usize,
    pub name: &'static str,
}

/// Axes of the RSSI/Speed chart
pub const RSSI_SPEED_AXES: [ParallelAxis; 2] = [
    ParallelAxis { dim: 0, name: "RSSI" },
    ParallelAxis { dim: 1, name: "Speed" },
];

/// Paired x-index / y-value sequence for a line chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub x_axis: Vec<usize>,
    pub values: Vec<f64>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a value at the next running index
    pub fn push(&mut self, value: f64) {
        self.x_axis.push(self.x_axis.len());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Unordered two-dimensional points for a parallel chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParallelSeries {
    pub name: String,
    pub points: Vec<[i64; 2]>,
}

/// Named bar series sharing a fixed set of x categories
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    pub categories: Vec<String>,
    pub series: Vec<(String, Vec<String>)>,
}

impl BarSeries {
    /// Values of the series with the given name
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.series
            .iter()
            .find(|(series_name, _)| series_name == name)
            .map(|(_, values)| values.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_name: String,
    pub y_name: String,
    pub series: LineSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelChart {
    pub title: String,
    pub axes: Vec<ParallelAxis>,
    pub series: ParallelSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub y_name: String,
    pub series: BarSeries,
}

/// A chart ready to be placed on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Line(LineChart),
    Parallel(ParallelChart),
    Bar(BarChart),
}

impl Chart {
    /// Line chart over a running count on the x axis
    pub fn line(title: &str, y_name: &str, series: LineSeries) -> Self {
        Chart::Line(LineChart {
            title: title.to_string(),
            x_name: "Count".to_string(),
            y_name: y_name.to_string(),
            series,
        })
    }

    /// Parallel chart over the RSSI/Speed axes
    pub fn rssi_speed(title: &str, series: ParallelSeries) -> Self {
        Chart::Parallel(ParallelChart {
            title: title.to_string(),
            axes: RSSI_SPEED_AXES.to_vec(),
            series,
        })
    }

    pub fn bar(title: &str, y_name: &str, series: BarSeries) -> Self {
        Chart::Bar(BarChart {
            title: title.to_string(),
            y_name: y_name.to_string(),
            series,
        })
    }

    pub fn title(&self) -> &str {
        match self {
            Chart::Line(chart) => &chart.title,
            Chart::Parallel(chart) => &chart.title,
            Chart::Bar(chart) => &chart.title,
        }
    }

    /// Number of data points plotted
    pub fn point_count(&self) -> usize {
        match self {
            Chart::Line(chart) => chart.series.len(),
            Chart::Parallel(chart) => chart.series.points.len(),
            Chart::Bar(chart) => chart.series.series.iter().map(|(_, v)| v.len()).sum(),
        }
    }

    /// Build the ECharts option object for this chart
    pub fn option(&self) -> Value {
        let mut option = json!({
            "title": { "text": self.title() },
            "tooltip": { "show": true },
            "legend": { "show": true, "right": "1%" },
        });

        let specific = match self {
            Chart::Line(chart) => json!({
                "xAxis": {
                    "type": "category",
                    "name": chart.x_name,
                    "data": chart.series.x_axis,
                },
                "yAxis": { "type": "value", "name": chart.y_name },
                "series": [{
                    "type": "line",
                    "name": chart.series.name,
                    "data": chart.series.values,
                    "smooth": true,
                    "areaStyle": { "opacity": AREA_OPACITY },
                }],
            }),
            Chart::Parallel(chart) => json!({
                "parallelAxis": chart.axes,
                "series": [{
                    "type": "parallel",
                    "name": chart.series.name,
                    "data": chart.series.points,
                }],
            }),
            Chart::Bar(chart) => {
                let series: Vec<Value> = chart
                    .series
                    .series
                    .iter()
                    .map(|(name, values)| {
                        json!({
                            "type": "bar",
                            "name": name,
                            "data": values.iter().map(String::as_str).map(bar_value).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                json!({
                    "xAxis": { "type": "category", "data": chart.series.categories },
                    "yAxis": { "type": "value", "name": chart.y_name },
                    "series": series,
                })
            }
        };

        if let (Value::Object(base), Value::Object(extra)) = (&mut option, specific) {
            base.extend(extra);
        }
        option
    }
}

/// Numeric bar value when the text parses, the raw text otherwise
fn bar_value(text: &str) -> Value {
    text.trim()
        .parse::<f64>()
        .ok()
        .and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
        .unwrap_or_else(|| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_series_running_index() {
        let mut series = LineSeries::new("BLE to Wifi");
        series.push(5.0);
        series.push(-2.0);
        assert_eq!(series.x_axis, vec![0, 1]);
        assert_eq!(series.values, vec![5.0, -2.0]);
    }

    #[test]
    fn test_line_option() {
        let mut series = LineSeries::new("BLE to IPFS");
        series.push(3.0);
        let option = Chart::line("Delays", "Seconds", series).option();

        assert_eq!(option["title"]["text"], "Delays");
        assert_eq!(option["xAxis"]["name"], "Count");
        assert_eq!(option["yAxis"]["name"], "Seconds");
        assert_eq!(option["xAxis"]["data"], json!([0]));
        assert_eq!(option["series"][0]["smooth"], true);
        assert_eq!(option["series"][0]["areaStyle"]["opacity"], 0.2);
        assert_eq!(option["tooltip"]["show"], true);
        assert_eq!(option["legend"]["right"], "1%");
    }

    #[test]
    fn test_parallel_option() {
        let series = ParallelSeries {
            name: "RSSI Speed".to_string(),
            points: vec![[-60, 72]],
        };
        let option = Chart::rssi_speed("RSSI Speed", series).option();

        assert_eq!(
            option["parallelAxis"],
            json!([{"dim": 0, "name": "RSSI"}, {"dim": 1, "name": "Speed"}])
        );
        assert_eq!(option["series"][0]["type"], "parallel");
        assert_eq!(option["series"][0]["data"], json!([[-60, 72]]));
    }

    #[test]
    fn test_bar_option_values() {
        let series = BarSeries {
            categories: vec!["40s".to_string(), "120s".to_string()],
            series: vec![("10Mb".to_string(), vec!["1.5".to_string(), "n/a".to_string()])],
        };
        let chart = Chart::bar("Battery", "Percent", series);
        let option = chart.option();

        assert_eq!(option["xAxis"]["data"], json!(["40s", "120s"]));
        assert_eq!(option["series"][0]["data"], json!([1.5, "n/a"]));
        assert_eq!(chart.point_count(), 2);
    }
}
