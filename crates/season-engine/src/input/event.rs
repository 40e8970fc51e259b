use crate::core::elevation::AxialTilt;
use crate::core::season::Season;

/// Input events the diagram understands.
/// Pointer coordinates are absolute screen coordinates; the simulation maps
/// them into viewport space itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press on the drawing surface.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved (anywhere on the page while a drag is live).
    PointerMove { x: f32, y: f32 },
    /// Pointer released (anywhere on the page while a drag is live).
    PointerUp { x: f32, y: f32 },
    /// A season selector control was clicked.
    SelectSeason(Season),
    /// A tilt selector control was clicked.
    SelectTilt(AxialTilt),
}
