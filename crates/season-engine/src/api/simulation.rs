//! Simulation controller: owns the diagram state and is its only writer.
//!
//! Reads never mutate: the season shown during a drag comes from the pure
//! [`nearest_season`] query, and the committed season only changes through
//! [`Simulation::select_season`] or [`Simulation::commit_snap`].

use glam::{Affine2, Vec2};

use crate::api::config::{ConfigError, DiagramConfig};
use crate::api::types::{RenderModel, SeasonMarker};
use crate::core::elevation::{AxialTilt, ElevationTable};
use crate::core::orbit::OrbitEllipse;
use crate::core::season::{nearest_season, snap_to_season, Season};
use crate::extensions::transform::{compose, site_offset};
use crate::input::capture::{NoCapture, PointerCapture};
use crate::input::drag::{DragMachine, DragPhase};
use crate::input::event::InputEvent;
use crate::input::viewport::{SurfaceTransform, Unmounted};

/// Render observer, called after every state change.
pub type RenderCallback = Box<dyn FnMut(&RenderModel)>;

/// The mutable parameters of the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub tilt: AxialTilt,
    /// Committed season. Not touched while a drag is live.
    pub season: Season,
    /// Orbital angle in [0, 360). At rest it equals `season`'s canonical angle.
    pub angle: f32,
    pub dragging: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            tilt: AxialTilt::Tilted,
            season: Season::Spring,
            angle: Season::Spring.canonical_angle(),
            dragging: false,
        }
    }
}

/// The diagram controller.
pub struct Simulation {
    config: DiagramConfig,
    orbit: OrbitEllipse,
    elevations: ElevationTable,
    state: SimulationState,
    drag: DragMachine,
    surface: Box<dyn SurfaceTransform>,
    capture: Box<dyn PointerCapture>,
    observer: Option<RenderCallback>,
}

impl Simulation {
    /// New session in the default state. Screen and viewport coordinates are
    /// taken to coincide until a surface is supplied, and no listeners are
    /// registered on drag until a capture is supplied.
    ///
    /// Fails if `config` does not pass [`DiagramConfig::validate`].
    pub fn new(config: DiagramConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: DiagramConfig) -> Self {
        Self {
            orbit: config.orbit(),
            elevations: config.elevation_table(),
            config,
            state: SimulationState::default(),
            drag: DragMachine::new(),
            surface: Box::new(Affine2::IDENTITY),
            capture: Box::new(NoCapture),
            observer: None,
        }
    }

    pub fn with_surface(mut self, surface: impl SurfaceTransform + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    pub fn set_surface(&mut self, surface: impl SurfaceTransform + 'static) {
        self.surface = Box::new(surface);
    }

    /// Install the render observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: impl FnMut(&RenderModel) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn unsubscribe(&mut self) {
        self.observer = None;
    }

    // -- Read model --

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn orbit(&self) -> &OrbitEllipse {
        &self.orbit
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Season nearest the current angle, for display. Pure.
    pub fn display_season(&self) -> Season {
        nearest_season(self.state.angle, self.config.live_metric)
    }

    /// Meridian elevation for the displayed season and current tilt.
    pub fn elevation(&self) -> f32 {
        self.elevations.elevation(self.state.tilt, self.display_season())
    }

    /// Body center in viewport space.
    pub fn body_position(&self) -> Vec2 {
        self.orbit.position_for_angle(self.state.angle)
    }

    /// Observation-site marker in viewport space.
    pub fn site_position(&self) -> Vec2 {
        let local = site_offset(
            self.display_season(),
            self.config.body_radius,
            self.config.latitude_deg,
        );
        compose(local, self.body_position(), self.state.tilt.degrees())
    }

    /// Snapshot of everything presentation needs.
    pub fn model(&self) -> RenderModel {
        let season = self.display_season();
        let tilted = self.state.tilt == AxialTilt::Tilted;
        let site_pos = self.site_position();
        RenderModel {
            angle: self.state.angle,
            body_pos: self.body_position(),
            body_rotation_deg: self.state.tilt.degrees(),
            site_pos,
            indicator_start: self.orbit.center,
            indicator_end: site_pos,
            elevation: self.elevations.elevation(self.state.tilt, season),
            season,
            committed_season: self.state.season,
            tilt: self.state.tilt,
            dragging: self.state.dragging,
            markers: Season::ALL.map(|s| SeasonMarker {
                season: s,
                name: s.name(),
                pos: self.orbit.position_for_angle(s.canonical_angle()),
                highlighted: s == season,
            }),
            seasons_selectable: tilted,
            tilt_caption: self.state.tilt.explanation(),
            season_caption: tilted.then(|| season.description()),
        }
    }

    // -- Controls --

    /// Commit a season directly: season and canonical angle change together.
    /// A live drag is ended first and the selection wins.
    pub fn select_season(&mut self, season: Season) {
        if self.drag.cancel() {
            log::debug!("drag abandoned by season selection");
        }
        self.commit(season);
        log::debug!("season selected: {:?}", season);
        self.notify();
    }

    pub fn select_tilt(&mut self, tilt: AxialTilt) {
        self.state.tilt = tilt;
        log::debug!("tilt selected: {}°", tilt.degrees());
        self.notify();
    }

    // -- Pointer input --

    /// Press at a screen point. Starts a drag if it lands on the body.
    pub fn pointer_down(&mut self, screen: Vec2) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(local) = self.local_point(screen) else {
            return false;
        };
        let body = self.body_position();
        if !self
            .drag
            .press(local, body, self.config.body_radius, self.capture.as_mut())
        {
            return false;
        }
        self.state.dragging = true;
        log::debug!("drag started at {:.1}°", self.state.angle);
        self.notify();
        true
    }

    /// Pointer moved to a screen point. While dragging, the angle follows it.
    pub fn pointer_move(&mut self, screen: Vec2) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }
        let Some(local) = self.local_point(screen) else {
            return false;
        };
        let Some(angle) = self.drag.track(local, &self.orbit) else {
            return false;
        };
        self.state.angle = angle;
        self.notify();
        true
    }

    /// Pointer released. Ends a live drag and commits the snap. The release
    /// position itself is not used: the last tracked angle is what snaps.
    pub fn pointer_up(&mut self) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }
        self.commit_snap();
        true
    }

    /// Dispatch a host input event. Returns whether the state changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::SelectSeason(season) => {
                self.select_season(season);
                true
            }
            InputEvent::SelectTilt(tilt) => {
                self.select_tilt(tilt);
                true
            }
        }
    }

    /// End any live drag and commit the current angle to the nearest season
    /// by shortest arc.
    pub fn commit_snap(&mut self) -> Season {
        let live = self.state.angle;
        let season = self
            .drag
            .release(live)
            .unwrap_or_else(|| snap_to_season(live));
        self.commit(season);
        log::debug!("snapped {:.1}° to {:?}", live, season);
        self.notify();
        season
    }

    /// The host surface is going away. Releases listeners (committing a snap
    /// if a drag was live), detaches the surface and drops the observer.
    pub fn teardown(&mut self) {
        if self.drag.is_dragging() {
            self.commit_snap();
        }
        self.surface = Box::new(Unmounted);
        self.observer = None;
    }

    // -- Internals --

    fn commit(&mut self, season: Season) {
        self.state.season = season;
        self.state.angle = season.canonical_angle();
        self.state.dragging = self.drag.is_dragging();
    }

    fn local_point(&self, screen: Vec2) -> Option<Vec2> {
        let local = self.surface.to_local(screen);
        if local.is_none() {
            log::warn!("surface transform unavailable; pointer event at {screen} ignored");
        }
        local
    }

    fn notify(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let model = self.model();
        if let Some(observer) = self.observer.as_mut() {
            observer(&model);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        // stock layout always validates
        Self::with_valid_config(DiagramConfig::default())
    }
}
