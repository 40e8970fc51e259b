use glam::Vec2;
use serde::Serialize;

use crate::core::elevation::AxialTilt;
use crate::core::season::Season;

/// One of the four fixed season stations drawn on the orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonMarker {
    pub season: Season,
    /// Label drawn at the station and on its selector control.
    pub name: &'static str,
    /// Viewport position of the station.
    pub pos: Vec2,
    /// Whether this is the season currently shown.
    pub highlighted: bool,
}

/// Everything presentation needs to draw one frame of the diagram.
/// Built on demand from the simulation state; holds no state of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    /// Orbital angle in degrees, live during a drag.
    pub angle: f32,
    /// Body center in viewport space.
    pub body_pos: Vec2,
    /// Constant visual rotation of the body, in degrees (the axial tilt).
    pub body_rotation_deg: f32,
    /// Observation-site marker in viewport space.
    pub site_pos: Vec2,
    /// Sunlight indicator line: from the sun...
    pub indicator_start: Vec2,
    /// ...to the site marker.
    pub indicator_end: Vec2,
    /// Meridian solar elevation in degrees for the shown season.
    pub elevation: f32,
    /// Season shown right now (nearest to the live angle).
    pub season: Season,
    /// Season last committed by a selection or a snap.
    pub committed_season: Season,
    pub tilt: AxialTilt,
    pub dragging: bool,
    pub markers: [SeasonMarker; 4],
    /// Season selector controls only make sense with a tilted axis.
    pub seasons_selectable: bool,
    pub tilt_caption: &'static str,
    /// Season description; only shown with a tilted axis.
    pub season_caption: Option<&'static str>,
}

impl RenderModel {
    /// Elevation formatted with one decimal, e.g. `"83.5°"`.
    pub fn elevation_label(&self) -> String {
        format!("{:.1}°", self.elevation)
    }

    pub fn highlighted_marker(&self) -> Option<&SeasonMarker> {
        self.markers.iter().find(|m| m.highlighted)
    }
}
