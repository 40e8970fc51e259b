/// Season table: the four discrete orbital stations of the diagram.
///
/// Canonical angles sit a quarter turn apart. Declaration order matters:
/// it is the tie-break order for both nearest-season queries.

use serde::{Deserialize, Serialize};

use crate::core::orbit::{angular_distance, normalize_degrees};

/// A season, identified by its solstice/equinox position on the orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

/// Static descriptive data for a season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonInfo {
    /// Short label, e.g. for a selector button.
    pub name: &'static str,
    /// Canonical orbital angle in degrees.
    pub angle: f32,
    /// One-line explanation shown next to the diagram.
    pub description: &'static str,
}

const SEASON_INFO: [SeasonInfo; 4] = [
    SeasonInfo {
        name: "Winter (winter solstice)",
        angle: 0.0,
        description: "In winter the sun stays low in the sky, so days are short and it is coldest.",
    },
    SeasonInfo {
        name: "Spring (vernal equinox)",
        angle: 90.0,
        description: "In spring the sun climbs to a middle height. Day and night become about equal.",
    },
    SeasonInfo {
        name: "Summer (summer solstice)",
        angle: 180.0,
        description: "In summer the sun rides high in the sky, so days are long and it is hottest.",
    },
    SeasonInfo {
        name: "Autumn (autumnal equinox)",
        angle: 270.0,
        description: "Autumn is like spring: the sun is at a middle height and the weather cools.",
    },
];

impl Season {
    /// All seasons in declaration (tie-break) order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Position in [`Season::ALL`]. Also the wire value in the frame protocol.
    pub const fn index(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Season> {
        Self::ALL.get(idx).copied()
    }

    pub fn info(self) -> &'static SeasonInfo {
        &SEASON_INFO[self.index()]
    }

    /// Canonical orbital angle in degrees.
    pub fn canonical_angle(self) -> f32 {
        self.info().angle
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }
}

/// How the live (in-drag) season display measures distance to a canonical angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Shortest arc around the circle. Agrees with the release snap everywhere.
    #[default]
    Circular,
    /// Plain `|a - b|`. Disagrees with the snap just below 360°, where it
    /// picks Autumn instead of Winter.
    Linear,
}

impl DistanceMetric {
    pub fn distance(self, a: f32, b: f32) -> f32 {
        match self {
            DistanceMetric::Circular => angular_distance(a, b),
            DistanceMetric::Linear => (a - b).abs(),
        }
    }
}

fn closest_by(angle: f32, metric: DistanceMetric) -> Season {
    let angle = normalize_degrees(angle);
    let mut best = Season::ALL[0];
    let mut best_dist = metric.distance(angle, best.canonical_angle());
    for season in &Season::ALL[1..] {
        let d = metric.distance(angle, season.canonical_angle());
        // Strict: exact ties keep the earlier season
        if d < best_dist {
            best = *season;
            best_dist = d;
        }
    }
    best
}

/// Season to commit when a drag ends at `angle`: shortest-arc nearest,
/// ties resolved in declaration order.
pub fn snap_to_season(angle: f32) -> Season {
    closest_by(angle, DistanceMetric::Circular)
}

/// Season to highlight while the angle is moving. Pure query, never commits.
pub fn nearest_season(angle: f32, metric: DistanceMetric) -> Season {
    closest_by(angle, metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_angles_are_distinct_quarter_turns() {
        let angles: Vec<f32> = Season::ALL.iter().map(|s| s.canonical_angle()).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn index_round_trips() {
        for s in Season::ALL {
            assert_eq!(Season::from_index(s.index()), Some(s));
        }
        assert_eq!(Season::from_index(4), None);
    }

    #[test]
    fn snapping_a_canonical_angle_is_a_no_op() {
        for s in Season::ALL {
            assert_eq!(snap_to_season(s.canonical_angle()), s);
        }
    }

    #[test]
    fn snap_picks_the_nearer_neighbour() {
        // 44° from Spring, 46° from Summer
        assert_eq!(snap_to_season(134.0), Season::Spring);
        // 46° from Spring, 44° from Summer
        assert_eq!(snap_to_season(136.0), Season::Summer);
    }

    #[test]
    fn exact_ties_go_to_the_first_declared_season() {
        assert_eq!(snap_to_season(45.0), Season::Winter);
        assert_eq!(snap_to_season(135.0), Season::Spring);
        assert_eq!(snap_to_season(225.0), Season::Summer);
        // Autumn (270) and Winter (360) are both 45° away
        assert_eq!(snap_to_season(315.0), Season::Winter);
    }

    #[test]
    fn snap_wraps_around_zero() {
        assert_eq!(snap_to_season(359.0), Season::Winter);
        assert_eq!(snap_to_season(-10.0), Season::Winter);
    }

    #[test]
    fn linear_metric_diverges_only_near_the_wrap() {
        assert_eq!(nearest_season(359.0, DistanceMetric::Linear), Season::Autumn);
        assert_eq!(nearest_season(359.0, DistanceMetric::Circular), Season::Winter);
        for deg in [10.0, 80.0, 170.0, 200.0, 290.0] {
            assert_eq!(
                nearest_season(deg, DistanceMetric::Linear),
                nearest_season(deg, DistanceMetric::Circular),
            );
        }
    }

    #[test]
    fn metric_deserializes_from_lowercase() {
        let m: DistanceMetric = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(m, DistanceMetric::Linear);
    }
}
