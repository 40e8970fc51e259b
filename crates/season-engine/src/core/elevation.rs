/// Elevation model: meridian (local noon) solar elevation per tilt and season.
///
/// The table is built once from the observer latitude and only indexed
/// afterwards, so values like "all seasons equal at tilt 0" are exact.

use serde::{Deserialize, Serialize};

use crate::core::season::Season;

/// Observer latitude used by the stock diagram, in degrees north.
pub const DEFAULT_LATITUDE: f32 = 30.0;

/// Supported axial tilt magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxialTilt {
    /// No tilt: every season sees the same noon sun.
    #[serde(rename = "0")]
    Upright,
    /// Earth's present-day tilt.
    #[serde(rename = "23.5")]
    Tilted,
}

impl AxialTilt {
    pub const ALL: [AxialTilt; 2] = [AxialTilt::Upright, AxialTilt::Tilted];

    pub const fn degrees(self) -> f32 {
        match self {
            AxialTilt::Upright => 0.0,
            AxialTilt::Tilted => 23.5,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            AxialTilt::Upright => 0,
            AxialTilt::Tilted => 1,
        }
    }

    /// Map a degree value from a host control onto a supported tilt.
    /// Anything other than 0 or 23.5 is rejected.
    pub fn from_degrees(deg: f32) -> Option<AxialTilt> {
        Self::ALL.into_iter().find(|t| t.degrees() == deg)
    }

    /// Explanation text for this tilt.
    pub fn explanation(self) -> &'static str {
        match self {
            AxialTilt::Upright => {
                "Without a tilted axis the sun's noon height barely changes all year, so there are no seasons."
            }
            AxialTilt::Tilted => {
                "Because the axis is tilted 23.5°, the sun's noon height changes with orbital position, and that makes the seasons."
            }
        }
    }
}

/// Precomputed elevation for every (tilt, season) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationTable {
    entries: [[f32; 4]; 2],
}

impl ElevationTable {
    /// Build the table for an observer at `latitude` degrees.
    ///
    /// Solstices use `90 - (lat ∓ tilt)`, equinoxes `90 - lat`.
    pub fn for_latitude(latitude: f32) -> Self {
        let mut entries = [[0.0; 4]; 2];
        for tilt in AxialTilt::ALL {
            let t = tilt.degrees();
            for season in Season::ALL {
                entries[tilt.index()][season.index()] = match season {
                    Season::Summer => 90.0 - (latitude - t),
                    Season::Winter => 90.0 - (latitude + t),
                    Season::Spring | Season::Autumn => 90.0 - latitude,
                };
            }
        }
        Self { entries }
    }

    /// Meridian elevation in degrees.
    pub fn elevation(&self, tilt: AxialTilt, season: Season) -> f32 {
        self.entries[tilt.index()][season.index()]
    }
}

impl Default for ElevationTable {
    fn default() -> Self {
        Self::for_latitude(DEFAULT_LATITUDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_table_values() {
        let table = ElevationTable::default();
        assert_eq!(table.elevation(AxialTilt::Tilted, Season::Summer), 83.5);
        assert_eq!(table.elevation(AxialTilt::Tilted, Season::Winter), 36.5);
        assert_eq!(table.elevation(AxialTilt::Tilted, Season::Spring), 60.0);
        assert_eq!(table.elevation(AxialTilt::Tilted, Season::Autumn), 60.0);
    }

    #[test]
    fn upright_tilt_collapses_all_seasons() {
        let table = ElevationTable::default();
        let first = table.elevation(AxialTilt::Upright, Season::Winter);
        for s in Season::ALL {
            assert_eq!(table.elevation(AxialTilt::Upright, s), first);
        }
        assert_eq!(first, 60.0);
    }

    #[test]
    fn tilted_ordering() {
        let table = ElevationTable::for_latitude(37.5);
        let e = |s| table.elevation(AxialTilt::Tilted, s);
        assert!(e(Season::Summer) > e(Season::Spring));
        assert_eq!(e(Season::Spring), e(Season::Autumn));
        assert!(e(Season::Autumn) > e(Season::Winter));
    }

    #[test]
    fn tilt_from_degrees_accepts_only_supported_values() {
        assert_eq!(AxialTilt::from_degrees(0.0), Some(AxialTilt::Upright));
        assert_eq!(AxialTilt::from_degrees(23.5), Some(AxialTilt::Tilted));
        assert_eq!(AxialTilt::from_degrees(12.0), None);
    }

    #[test]
    fn tilt_serializes_as_its_degree_label() {
        let json = serde_json::to_string(&AxialTilt::Tilted).unwrap();
        assert_eq!(json, "\"23.5\"");
    }
}
