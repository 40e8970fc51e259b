pub mod api;
pub mod bridge;
pub mod core;
pub mod extensions;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, DiagramConfig};
pub use api::simulation::{RenderCallback, Simulation, SimulationState};
pub use api::types::{RenderModel, SeasonMarker};
pub use bridge::protocol::{FrameData, FRAME_FLOATS, PROTOCOL_VERSION};
pub use crate::core::elevation::{AxialTilt, ElevationTable, DEFAULT_LATITUDE};
pub use crate::core::orbit::{angular_distance, normalize_degrees, OrbitEllipse};
pub use crate::core::season::{nearest_season, snap_to_season, DistanceMetric, Season, SeasonInfo};
pub use extensions::{compose, site_offset, LocalTransform};
pub use input::capture::{CaptureGuard, CountingCapture, NoCapture, PointerCapture};
pub use input::drag::{hit_test, DragMachine, DragPhase};
pub use input::event::InputEvent;
pub use input::viewport::{scale_offset, SurfaceTransform, Unmounted};
