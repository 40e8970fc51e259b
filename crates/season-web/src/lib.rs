//! WASM bridge for the seasons diagram.
//!
//! JS side usage:
//!
//! ```ignore
//! season_mount("orbit-svg", null, (json) => render(JSON.parse(json)));
//! season_select_season(2);   // Summer
//! season_select_tilt(0);
//! const frame = new Float32Array(memory.buffer, get_frame_ptr(), get_frame_floats());
//! season_unmount();
//! ```
//!
//! `mousedown` on the SVG starts a drag; document-level `mousemove`/`mouseup`
//! listeners exist only while the drag is live.
//!
//! The change callback may call any export. `season_unmount` from inside it
//! takes effect once the triggering event has been handled; `season_mount`
//! from inside it is refused.

pub mod dom;
pub mod reentry;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use season_engine::{AxialTilt, DiagramConfig, InputEvent, Season, Simulation};
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

pub use dom::{DocumentCapture, SvgSurface};
pub use reentry::DispatchScope;
pub use runner::{take_pending_json, Listeners, PendingModel, SeasonRunner};

thread_local! {
    static RUNNER: RefCell<Option<SeasonRunner>> = RefCell::new(None);
    static NOTIFIER: RefCell<Option<Notifier>> = RefCell::new(None);
    static SCOPE: DispatchScope = const { DispatchScope::new() };
}

/// Delivers pending models to the JS change callback.
#[derive(Clone)]
struct Notifier {
    callback: js_sys::Function,
    pending: PendingModel,
}

impl Notifier {
    fn flush(&self) {
        let Some(json) = take_pending_json(&self.pending) else {
            return;
        };
        if let Err(err) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::warn!("change callback threw: {:?}", err);
        }
    }
}

fn with_runner<R>(f: impl FnOnce(&mut SeasonRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("diagram not mounted. Call season_mount() first.");
                None
            }
        }
    })
}

/// Hand any pending model to JS. No bridge state is borrowed while the
/// callback runs.
fn flush() {
    let notifier = NOTIFIER.with(|cell| cell.borrow().clone());
    if let Some(notifier) = notifier {
        notifier.flush();
    }
}

fn dispatch(event: InputEvent) {
    SCOPE.with(|s| s.enter());
    with_runner(|r| r.handle(event));
    flush();
    if SCOPE.with(|s| s.exit()) {
        unmount_now();
    }
}

/// Detach everything. A drag still live is snapped and the resulting
/// at-rest model is delivered before the callback is dropped.
fn unmount_now() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    let notifier = NOTIFIER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = runner {
        runner.teardown();
        if let Some(notifier) = &notifier {
            notifier.flush();
        }
        log::info!("season diagram: unmounted");
    }
}

fn client_point(e: &MouseEvent) -> (f32, f32) {
    (e.client_x() as f32, e.client_y() as f32)
}

/// Mount the diagram on the `<svg>` with id `svg_id`.
///
/// `config_json` may be `null` for the stock layout. `on_change` receives a
/// JSON snapshot of the render model after every state change.
#[wasm_bindgen]
pub fn season_mount(
    svg_id: &str,
    config_json: Option<String>,
    on_change: js_sys::Function,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if SCOPE.with(|s| s.in_dispatch()) {
        return Err(JsValue::from_str(
            "season_mount() cannot be called from the change callback",
        ));
    }
    unmount_now();
    SCOPE.with(|s| s.clear());

    let config = match config_json {
        Some(json) => DiagramConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => DiagramConfig::default(),
    };

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let surface = SvgSurface::find(&document, svg_id)
        .ok_or_else(|| JsValue::from_str(&format!("no <svg> element with id `{svg_id}`")))?;

    let on_down = Closure::<dyn FnMut(MouseEvent)>::new(|e: MouseEvent| {
        let (x, y) = client_point(&e);
        dispatch(InputEvent::PointerDown { x, y });
    });
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(|e: MouseEvent| {
        let (x, y) = client_point(&e);
        dispatch(InputEvent::PointerMove { x, y });
    });
    let on_up = Closure::<dyn FnMut(MouseEvent)>::new(|e: MouseEvent| {
        let (x, y) = client_point(&e);
        dispatch(InputEvent::PointerUp { x, y });
    });
    let listeners = Listeners::new(surface.event_target().clone(), on_down, on_move, on_up);

    let capture = DocumentCapture::new(&document, listeners.move_fn(), listeners.up_fn());
    let sim = Simulation::new(config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .with_surface(surface)
        .with_capture(capture);

    let pending: PendingModel = Rc::new(RefCell::new(None));
    let runner = SeasonRunner::new(sim, listeners, Rc::clone(&pending));
    runner.listeners().attach_press()?;
    *pending.borrow_mut() = Some(runner.simulation().model());

    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    NOTIFIER.with(|cell| {
        *cell.borrow_mut() = Some(Notifier {
            callback: on_change,
            pending,
        })
    });

    log::info!("season diagram: mounted on #{}", svg_id);
    flush();
    Ok(())
}

/// Tear the diagram down. Any live drag is snapped and its listeners released.
/// Called from the change callback, it runs once the current event is done.
#[wasm_bindgen]
pub fn season_unmount() {
    if SCOPE.with(|s| s.defer_unmount()) {
        log::debug!("unmount deferred until the current event is handled");
        return;
    }
    unmount_now();
}

/// Select a season by index: 0 Winter, 1 Spring, 2 Summer, 3 Autumn.
#[wasm_bindgen]
pub fn season_select_season(index: u32) {
    match Season::from_index(index as usize) {
        Some(season) => dispatch(InputEvent::SelectSeason(season)),
        None => log::warn!("unknown season index {}", index),
    }
}

/// Select the axial tilt in degrees (0 or 23.5).
#[wasm_bindgen]
pub fn season_select_tilt(degrees: f32) {
    match AxialTilt::from_degrees(degrees) {
        Some(tilt) => dispatch(InputEvent::SelectTilt(tilt)),
        None => log::warn!("unsupported tilt {}°", degrees),
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_floats() -> u32 {
    with_runner(|r| r.frame_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn season_model_json() -> String {
    with_runner(|r| r.model_json()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn season_elevation_label() -> String {
    with_runner(|r| r.elevation_label()).unwrap_or_default()
}
