use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::elevation::{ElevationTable, DEFAULT_LATITUDE};
use crate::core::orbit::OrbitEllipse;
use crate::core::season::DistanceMetric;

/// Errors from loading a diagram configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Layout and model parameters for the diagram, provided by the host.
/// Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Logical viewport width (the SVG viewBox width).
    pub viewport_width: f32,
    /// Logical viewport height.
    pub viewport_height: f32,
    /// Orbit ellipse center, where the sun is drawn.
    pub orbit_center: Vec2,
    /// Horizontal orbit semi-axis.
    pub orbit_rx: f32,
    /// Vertical orbit semi-axis.
    pub orbit_ry: f32,
    /// Body disc radius. Also the drag hit radius.
    pub body_radius: f32,
    /// Observer latitude in degrees north.
    pub latitude_deg: f32,
    /// Distance metric for the live season highlight during a drag.
    pub live_metric: DistanceMetric,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            viewport_width: 600.0,
            viewport_height: 300.0,
            orbit_center: Vec2::new(300.0, 150.0),
            orbit_rx: 220.0,
            orbit_ry: 100.0,
            body_radius: 30.0,
            latitude_deg: DEFAULT_LATITUDE,
            live_metric: DistanceMetric::Circular,
        }
    }
}

impl DiagramConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the geometry is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("orbit_rx", self.orbit_rx)?;
        positive("orbit_ry", self.orbit_ry)?;
        positive("body_radius", self.body_radius)?;
        if !self.orbit_center.is_finite() {
            return Err(ConfigError::Invalid {
                field: "orbit_center",
                reason: "must be finite",
            });
        }
        if !(self.latitude_deg.is_finite() && (-90.0..=90.0).contains(&self.latitude_deg)) {
            return Err(ConfigError::Invalid {
                field: "latitude_deg",
                reason: "must be within [-90, 90]",
            });
        }
        Ok(())
    }

    pub fn orbit(&self) -> OrbitEllipse {
        OrbitEllipse::new(self.orbit_center, self.orbit_rx, self.orbit_ry)
    }

    pub fn elevation_table(&self) -> ElevationTable {
        ElevationTable::for_latitude(self.latitude_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_diagram() {
        let c = DiagramConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.orbit().position_for_angle(0.0), Vec2::new(520.0, 150.0));
        assert_eq!(c.elevation_table(), ElevationTable::default());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let c = DiagramConfig::from_json(r#"{ "body_radius": 40, "live_metric": "linear" }"#).unwrap();
        assert_eq!(c.body_radius, 40.0);
        assert_eq!(c.live_metric, DistanceMetric::Linear);
        assert_eq!(c.orbit_rx, 220.0);
    }

    #[test]
    fn orbit_center_reads_as_a_pair() {
        let c = DiagramConfig::from_json(r#"{ "orbit_center": [10, 20] }"#).unwrap();
        assert_eq!(c.orbit_center, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DiagramConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let err = DiagramConfig::from_json(r#"{ "orbit_ry": 0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "orbit_ry"),
            other => panic!("unexpected error: {other}"),
        }
        let err = DiagramConfig::from_json(r#"{ "latitude_deg": 120 }"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid `latitude_deg`: must be within [-90, 90]");
    }
}
