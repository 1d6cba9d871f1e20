use carta_types::cartesian::Point;
use carta_types::num::format_num;
use serde::{Deserialize, Serialize};

use super::{Control, ControlOptions, ControlPosition};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::map::Map;
use crate::options::{impl_options, impl_options_projection, Options};

/// Feet in a meter.
pub const FEET_PER_METER: f64 = 3.2808399;
/// Feet in a mile.
pub const FEET_PER_MILE: f64 = 5280.0;

/// Default maximum width of the scale bars in pixels.
pub const DEFAULT_SCALE_MAX_WIDTH: f64 = 100.0;

/// Options of the scale control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScaleControlOptions {
    /// Corner of the control. Bottom left if not set.
    pub position: Option<ControlPosition>,
    /// Maximum width of the bars in pixels.
    pub max_width: Option<f64>,
    /// Whether the metric bar (m/km) is shown.
    pub metric: Option<bool>,
    /// Whether the imperial bar (ft/mi) is shown.
    pub imperial: Option<bool>,
    /// Whether the bars are updated only when the map stops moving.
    pub update_when_idle: Option<bool>,
}

impl_options!(ScaleControlOptions {
    position,
    max_width,
    metric,
    imperial,
    update_when_idle,
} validate = positive_width);
impl_options_projection!(ScaleControlOptions => ControlOptions { position });

fn positive_width(options: &ScaleControlOptions) -> Result<(), CartaError> {
    match options.max_width {
        Some(width) if width <= 0.0 => Err(CartaError::Configuration(format!(
            "scale maxWidth must be positive, got {width}"
        ))),
        _ => Ok(()),
    }
}

impl ScaleControlOptions {
    /// Options with every field set to the value the runtime uses when it is missing.
    pub fn with_defaults() -> Self {
        Self {
            position: Some(ControlPosition::BottomLeft),
            max_width: Some(DEFAULT_SCALE_MAX_WIDTH),
            metric: Some(true),
            imperial: Some(true),
            update_when_idle: Some(false),
        }
    }
}

/// One bar of the scale control.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLine {
    /// Text of the bar, e.g. `200 m`.
    pub label: String,
    /// Width of the bar in pixels.
    pub width: f64,
}

/// Largest "round" number not greater than `num`: 1, 2, 3 or 5 times a power of ten. Numbers
/// below one round to one.
///
/// ```
/// use carta::control::round_num;
///
/// assert_eq!(round_num(7384.0), 5000.0);
/// assert_eq!(round_num(0.4), 1.0);
/// ```
pub fn round_num(num: f64) -> f64 {
    let digits = format!("{}", num.floor().max(0.0)).len();
    let pow10 = 10f64.powi(digits as i32 - 1);
    let d = num / pow10;
    let d = if d >= 10.0 {
        10.0
    } else if d >= 5.0 {
        5.0
    } else if d >= 3.0 {
        3.0
    } else if d >= 2.0 {
        2.0
    } else {
        1.0
    };

    pow10 * d
}

fn line(label: String, ratio: f64, max_width: f64) -> ScaleLine {
    ScaleLine {
        label,
        width: format_num(max_width * ratio, Some(0)),
    }
}

/// Metric bar for a map where `max_width` pixels span `max_meters`.
pub fn metric_scale(max_meters: f64, max_width: f64) -> ScaleLine {
    let meters = round_num(max_meters);
    let label = if meters < 1000.0 {
        format!("{meters} m")
    } else {
        format!("{} km", meters / 1000.0)
    };

    line(label, meters / max_meters, max_width)
}

/// Imperial bar for a map where `max_width` pixels span `max_meters`.
pub fn imperial_scale(max_meters: f64, max_width: f64) -> ScaleLine {
    let max_feet = max_meters * FEET_PER_METER;
    if max_feet > FEET_PER_MILE {
        let max_miles = max_feet / FEET_PER_MILE;
        let miles = round_num(max_miles);
        line(format!("{miles} mi"), miles / max_miles, max_width)
    } else {
        let feet = round_num(max_feet);
        line(format!("{feet} ft"), feet / max_feet, max_width)
    }
}

/// Bars of the scale control for the current view of the map, metric first.
///
/// The distance is measured horizontally across the middle of the map.
pub fn scale_lines<B: Backend>(map: &B::Map, options: &ScaleControlOptions) -> Vec<ScaleLine> {
    let options = ScaleControlOptions::with_defaults().merged(options.clone());
    let max_width = options.max_width.unwrap_or(DEFAULT_SCALE_MAX_WIDTH);

    let y = map.size().y / 2.0;
    let max_meters = map.distance(
        map.container_point_to_lat_lng(Point::new(0.0, y)),
        map.container_point_to_lat_lng(Point::new(max_width, y)),
    );
    if max_meters <= 0.0 || !max_meters.is_finite() {
        log::debug!("Cannot measure scale at the current view ({max_meters} m)");
        return vec![];
    }

    let mut lines = vec![];
    if options.metric == Some(true) {
        lines.push(metric_scale(max_meters, max_width));
    }
    if options.imperial == Some(true) {
        lines.push(imperial_scale(max_meters, max_width));
    }

    lines
}

/// Control showing the distance scale of the map center.
pub trait ScaleControl<B: Backend>: Control<B> {
    /// Options of the control.
    fn options(&self) -> &ScaleControlOptions;
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::options::Options;

    #[test]
    fn round_numbers() {
        assert_eq!(round_num(1.0), 1.0);
        assert_eq!(round_num(2.9), 2.0);
        assert_eq!(round_num(4.0), 3.0);
        assert_eq!(round_num(99.0), 50.0);
        assert_eq!(round_num(100.0), 100.0);
        assert_eq!(round_num(250.0), 200.0);
    }

    #[test]
    fn metric_labels() {
        let line = metric_scale(740.0, 100.0);
        assert_eq!(line.label, "500 m");
        assert_eq!(line.width, 68.0);

        let line = metric_scale(3400.0, 100.0);
        assert_eq!(line.label, "3 km");
        assert_eq!(line.width, 88.0);
    }

    #[test]
    fn imperial_labels() {
        let line = imperial_scale(100.0, 100.0);
        assert_eq!(line.label, "300 ft");
        assert_abs_diff_eq!(line.width, 91.0);

        let line = imperial_scale(5000.0, 100.0);
        assert_eq!(line.label, "3 mi");
        assert_eq!(line.width, 97.0);
    }

    #[test]
    fn options() {
        let options = ScaleControlOptions::from_json(r#"{"imperial": false}"#).unwrap();
        let merged = ScaleControlOptions::with_defaults().merged(options);
        assert_eq!(merged.imperial, Some(false));
        assert_eq!(merged.metric, Some(true));
        assert_eq!(merged.max_width, Some(100.0));

        assert_matches!(
            ScaleControlOptions::from_json(r#"{"maxWidth": 0}"#),
            Err(CartaError::Configuration(_))
        );
    }
}
