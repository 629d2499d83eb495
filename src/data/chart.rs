//! Traffic chart state.
//!
//! The chart holds exactly the most recently bound series. Binding swaps the
//! labels and values and leaves the presentation settings alone.

use super::model::TrafficPoint;

/// Presentation settings that survive every data refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub series_name: String,
    /// Y axis always includes zero.
    pub begin_at_zero: bool,
    /// Headroom added above the largest value, as a fraction of it.
    pub headroom: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Network Traffic".to_string(),
            series_name: "traffic".to_string(),
            begin_at_zero: true,
            headroom: 0.1,
        }
    }
}

/// Labels plus the single data series shown in the traffic chart.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub style: ChartStyle,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartData {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Replace labels and values with `points`. An empty slice clears the chart.
    pub fn bind(&mut self, points: &[TrafficPoint]) {
        self.labels = points.iter().map(|p| p.time.clone()).collect();
        self.values = points.iter().map(|p| p.traffic).collect();
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points as `(index, value)` pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
    }

    /// X bounds spanning every point (at least one unit wide).
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.values.len().saturating_sub(1) as f64).max(1.0)]
    }

    /// Y bounds honoring `begin_at_zero` and `headroom`.
    pub fn y_bounds(&self) -> [f64; 2] {
        let max = self.values.iter().copied().fold(f64::MIN, f64::max);
        let min = self.values.iter().copied().fold(f64::MAX, f64::min);
        if self.values.is_empty() {
            return [0.0, 1.0];
        }
        let low = if self.style.begin_at_zero { min.min(0.0) } else { min };
        let high = max + max.abs() * self.style.headroom;
        if high <= low {
            [low, low + 1.0]
        } else {
            [low, high]
        }
    }

    /// First, middle and last label, for a sparse x axis.
    pub fn axis_labels(&self) -> Vec<&str> {
        match self.labels.len() {
            0 => Vec::new(),
            1 => vec![self.labels[0].as_str()],
            2 => self.labels.iter().map(String::as_str).collect(),
            n => vec![
                self.labels[0].as_str(),
                self.labels[n / 2].as_str(),
                self.labels[n - 1].as_str(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: &str, traffic: f64) -> TrafficPoint {
        TrafficPoint {
            time: time.to_string(),
            traffic,
        }
    }

    #[test]
    fn test_bind_replaces_series_and_keeps_style() {
        let style = ChartStyle {
            title: "Custom".to_string(),
            headroom: 0.5,
            ..ChartStyle::default()
        };
        let mut chart = ChartData::new(style.clone());

        chart.bind(&[point("12:00:00", 10.0), point("12:00:05", 20.0)]);
        chart.bind(&[point("12:01:00", 55.0)]);

        assert_eq!(chart.labels(), ["12:01:00".to_string()]);
        assert_eq!(chart.values(), [55.0]);
        assert_eq!(chart.style, style);
    }

    #[test]
    fn test_empty_payload_clears_chart() {
        let mut chart = ChartData::default();
        chart.bind(&[point("12:00:00", 10.0)]);
        chart.bind(&[]);
        assert!(chart.is_empty());
        assert!(chart.labels().is_empty());
        assert!(chart.points().is_empty());
        assert_eq!(chart.y_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn test_y_bounds_begin_at_zero() {
        let mut chart = ChartData::default();
        chart.bind(&[point("a", 40.0), point("b", 100.0)]);
        let [low, high] = chart.y_bounds();
        assert_eq!(low, 0.0);
        assert!((high - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_labels_are_sparse() {
        let mut chart = ChartData::default();
        let points: Vec<_> = (0..10).map(|i| point(&format!("t{i}"), i as f64)).collect();
        chart.bind(&points);
        assert_eq!(chart.axis_labels(), vec!["t0", "t5", "t9"]);
        assert_eq!(chart.x_bounds(), [0.0, 9.0]);
    }
}
