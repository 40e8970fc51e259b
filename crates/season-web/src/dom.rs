//! Browser implementations of the engine's host hooks.

use glam::Affine2;
use season_engine::{CaptureGuard, PointerCapture, SurfaceTransform};
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, SvgGraphicsElement};

/// An `<svg>` element the diagram is drawn into.
/// Its screen CTM maps viewBox units to client pixels.
#[derive(Clone)]
pub struct SvgSurface {
    element: SvgGraphicsElement,
}

impl SvgSurface {
    /// Look up the SVG element by id in the current document.
    pub fn find(document: &Document, id: &str) -> Option<Self> {
        let element = document
            .get_element_by_id(id)?
            .dyn_into::<SvgGraphicsElement>()
            .ok()?;
        Some(Self { element })
    }

    pub fn event_target(&self) -> &EventTarget {
        self.element.as_ref()
    }
}

impl SurfaceTransform for SvgSurface {
    fn screen_matrix(&self) -> Option<Affine2> {
        // null while the element is detached or not laid out
        let m = self.element.get_screen_ctm()?;
        Some(Affine2::from_cols_array(&[
            m.a(),
            m.b(),
            m.c(),
            m.d(),
            m.e(),
            m.f(),
        ]))
    }
}

/// Registers the drag's `mousemove`/`mouseup` listeners on the whole document,
/// so a drag keeps tracking after the pointer leaves the SVG.
///
/// The listener functions are created once per mount and reused for every
/// drag episode; only the registration is per episode.
pub struct DocumentCapture {
    target: EventTarget,
    on_move: js_sys::Function,
    on_up: js_sys::Function,
}

impl DocumentCapture {
    pub fn new(document: &Document, on_move: js_sys::Function, on_up: js_sys::Function) -> Self {
        Self {
            target: document.clone().into(),
            on_move,
            on_up,
        }
    }
}

impl PointerCapture for DocumentCapture {
    fn attach(&mut self) -> CaptureGuard {
        if let Err(err) = self
            .target
            .add_event_listener_with_callback("mousemove", &self.on_move)
        {
            log::warn!("could not register mousemove: {:?}", err);
            return CaptureGuard::detached();
        }
        if let Err(err) = self
            .target
            .add_event_listener_with_callback("mouseup", &self.on_up)
        {
            log::warn!("could not register mouseup: {:?}", err);
            let _ = self
                .target
                .remove_event_listener_with_callback("mousemove", &self.on_move);
            return CaptureGuard::detached();
        }

        let target = self.target.clone();
        let on_move = self.on_move.clone();
        let on_up = self.on_up.clone();
        CaptureGuard::new(move || {
            let _ = target.remove_event_listener_with_callback("mousemove", &on_move);
            let _ = target.remove_event_listener_with_callback("mouseup", &on_up);
        })
    }
}
