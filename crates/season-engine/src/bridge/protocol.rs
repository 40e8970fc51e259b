/// Frame record layout shared with the JS side.
/// Must stay in sync with the TypeScript reader.
///
/// One flat record of f32s, rewritten after every state change:
/// ```text
/// [0]      protocol version
/// [1]      orbital angle (deg)
/// [2..4]   body x, y
/// [4]      body rotation (deg)
/// [5..7]   site marker x, y
/// [7..9]   indicator start x, y
/// [9..11]  indicator end x, y
/// [11]     elevation (deg)
/// [12]     shown season index
/// [13]     committed season index
/// [14]     tilt (deg)
/// [15]     dragging (0 / 1)
/// [16..24] season marker x, y × 4, in season order
/// ```

use bytemuck::{Pod, Zeroable};

use crate::api::types::RenderModel;

/// Protocol version written into every frame.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Field indices into the flat float view.
pub const FRAME_VERSION: usize = 0;
pub const FRAME_ANGLE: usize = 1;
pub const FRAME_BODY: usize = 2;
pub const FRAME_ROTATION: usize = 4;
pub const FRAME_SITE: usize = 5;
pub const FRAME_INDICATOR_START: usize = 7;
pub const FRAME_INDICATOR_END: usize = 9;
pub const FRAME_ELEVATION: usize = 11;
pub const FRAME_SEASON: usize = 12;
pub const FRAME_COMMITTED_SEASON: usize = 13;
pub const FRAME_TILT: usize = 14;
pub const FRAME_DRAGGING: usize = 15;
pub const FRAME_MARKERS: usize = 16;

/// Total floats in a frame record.
pub const FRAME_FLOATS: usize = std::mem::size_of::<FrameData>() / 4;

/// The frame record as laid out in memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameData {
    pub version: f32,
    pub angle: f32,
    pub body: [f32; 2],
    pub rotation: f32,
    pub site: [f32; 2],
    pub indicator_start: [f32; 2],
    pub indicator_end: [f32; 2],
    pub elevation: f32,
    pub season: f32,
    pub committed_season: f32,
    pub tilt: f32,
    pub dragging: f32,
    pub markers: [[f32; 2]; 4],
}

impl FrameData {
    pub fn from_model(model: &RenderModel) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            angle: model.angle,
            body: model.body_pos.to_array(),
            rotation: model.body_rotation_deg,
            site: model.site_pos.to_array(),
            indicator_start: model.indicator_start.to_array(),
            indicator_end: model.indicator_end.to_array(),
            elevation: model.elevation,
            season: model.season.index() as f32,
            committed_season: model.committed_season.index() as f32,
            tilt: model.tilt.degrees(),
            dragging: if model.dragging { 1.0 } else { 0.0 },
            markers: model.markers.map(|m| m.pos.to_array()),
        }
    }

    /// Flat float view, indexable with the `FRAME_*` constants.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::simulation::Simulation;
    use crate::core::season::Season;

    #[test]
    fn layout_is_24_floats() {
        assert_eq!(FRAME_FLOATS, 24);
        assert_eq!(FRAME_MARKERS + 8, FRAME_FLOATS);
    }

    #[test]
    fn indices_line_up_with_fields() {
        let mut sim = Simulation::default();
        sim.select_season(Season::Summer);
        let model = sim.model();
        let frame = FrameData::from_model(&model);
        let f = frame.as_floats();

        assert_eq!(f.len(), FRAME_FLOATS);
        assert_eq!(f[FRAME_VERSION], PROTOCOL_VERSION);
        assert_eq!(f[FRAME_ANGLE], 180.0);
        assert_eq!(f[FRAME_BODY], model.body_pos.x);
        assert_eq!(f[FRAME_ROTATION], 23.5);
        assert_eq!(f[FRAME_SITE + 1], model.site_pos.y);
        assert_eq!(f[FRAME_INDICATOR_START], 300.0);
        assert_eq!(f[FRAME_INDICATOR_END], model.site_pos.x);
        assert_eq!(f[FRAME_ELEVATION], 83.5);
        assert_eq!(f[FRAME_SEASON], 2.0);
        assert_eq!(f[FRAME_COMMITTED_SEASON], 2.0);
        assert_eq!(f[FRAME_TILT], 23.5);
        assert_eq!(f[FRAME_DRAGGING], 0.0);
        // Winter marker first
        assert_eq!(f[FRAME_MARKERS], 520.0);
        assert_eq!(f[FRAME_MARKERS + 1], 150.0);
    }
}
