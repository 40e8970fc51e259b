use std::cell::RefCell;
use std::rc::Rc;

use season_engine::{FrameData, InputEvent, RenderModel, Simulation, FRAME_FLOATS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{EventTarget, MouseEvent};

/// Latest model not yet delivered to JS.
pub type PendingModel = Rc<RefCell<Option<RenderModel>>>;

/// Empty the slot and serialize what was in it. The slot borrow ends before
/// this returns, so the caller can hand the JSON to JS freely.
pub fn take_pending_json(pending: &PendingModel) -> Option<String> {
    let model = pending.borrow_mut().take()?;
    match serde_json::to_string(&model) {
        Ok(json) => Some(json),
        Err(err) => {
            log::warn!("could not serialize model: {}", err);
            None
        }
    }
}

/// DOM listener closures for one mount.
///
/// `mousedown` stays registered on the SVG for the whole mount; the
/// move/up functions are only registered by the engine's capture while a
/// drag is live.
pub struct Listeners {
    svg: EventTarget,
    on_down: Closure<dyn FnMut(MouseEvent)>,
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
}

impl Listeners {
    pub fn new(
        svg: EventTarget,
        on_down: Closure<dyn FnMut(MouseEvent)>,
        on_move: Closure<dyn FnMut(MouseEvent)>,
        on_up: Closure<dyn FnMut(MouseEvent)>,
    ) -> Self {
        Self {
            svg,
            on_down,
            on_move,
            on_up,
        }
    }

    pub fn move_fn(&self) -> js_sys::Function {
        self.on_move.as_ref().unchecked_ref::<js_sys::Function>().clone()
    }

    pub fn up_fn(&self) -> js_sys::Function {
        self.on_up.as_ref().unchecked_ref::<js_sys::Function>().clone()
    }

    pub fn attach_press(&self) -> Result<(), JsValue> {
        self.svg
            .add_event_listener_with_callback("mousedown", self.on_down.as_ref().unchecked_ref())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let _ = self
            .svg
            .remove_event_listener_with_callback("mousedown", self.on_down.as_ref().unchecked_ref());
    }
}

/// Owns one mounted diagram: the simulation, the frame record JS reads,
/// and the listener closures.
///
/// Field order matters: the simulation (and any live capture guard) drops
/// before the closures its guard refers to.
pub struct SeasonRunner {
    sim: Simulation,
    frame: Box<FrameData>,
    listeners: Listeners,
}

impl SeasonRunner {
    /// Wire up a simulation. Every state change lands in `pending` for the
    /// bridge to flush to JS outside the runner borrow.
    pub fn new(mut sim: Simulation, listeners: Listeners, pending: PendingModel) -> Self {
        sim.subscribe(move |model| {
            *pending.borrow_mut() = Some(model.clone());
        });
        let frame = Box::new(FrameData::from_model(&sim.model()));
        Self {
            sim,
            frame,
            listeners,
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Dispatch an input event and refresh the frame record if it mattered.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        let changed = self.sim.handle(event);
        if changed {
            *self.frame = FrameData::from_model(&self.sim.model());
        }
        changed
    }

    /// Release listeners and stop notifying. Called before the runner drops.
    pub fn teardown(&mut self) {
        self.sim.teardown();
        *self.frame = FrameData::from_model(&self.sim.model());
    }

    // ---- Accessors for JS reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_floats(&self) -> u32 {
        FRAME_FLOATS as u32
    }

    pub fn model_json(&self) -> String {
        serde_json::to_string(&self.sim.model()).unwrap_or_default()
    }

    pub fn elevation_label(&self) -> String {
        self.sim.model().elevation_label()
    }
}
