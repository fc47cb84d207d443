//! A single play session: pick the stone, tilt it, throw it, read the result.
//!
//! The session owns one `Stone` and is the only caller of the physics driver.
//! Input handlers call `hover`/`press`/`drag_to`/`release`; the render loop
//! calls `advance` once per frame and consumes the returned events.

use serde::{Deserialize, Serialize};
use skipstone_core::StoneId;
use skipstone_physics::{PhysicsConfig, Simulation, Stone};

use crate::config::SessionConfig;
use crate::hud::{self, clamp};
use crate::state::RockState;

/// Where a renderer should place the stone mesh, in scene coordinates.
///
/// The scene's depth axis is the throw axis and its height is offset by the
/// water plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPlacement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    StateChanged { from: RockState, to: RockState },
    /// The stone crossed the water plane going down.
    Splash { at: RenderPlacement },
    /// A skip succeeded; `count` is the new bounce total.
    Bounce { count: u32 },
    /// The throw ended (stone on the lake floor or out of range).
    Finished {
        bounces: u32,
        distance: f64,
        skipped: bool,
    },
    /// The stone is back at its launch parameters.
    Reset,
}

/// Serializable session state mirrored to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub rock_state: RockState,
    pub stone: Stone,
    /// Pointer y where the current drag started.
    pub drag_origin_y: Option<f64>,
    /// Time spent in `SimulationDone` so far.
    pub done_timer: f64,
    /// Physics time simulated for the current throw.
    pub flight_time: f64,
}

pub struct SkipSession {
    id: StoneId,
    simulation: Simulation,
    config: SessionConfig,
    state: SessionState,
}

impl SkipSession {
    pub fn new(simulation: Simulation, config: SessionConfig) -> Self {
        let stone = simulation.new_stone();
        Self {
            id: StoneId::new(),
            simulation,
            config,
            state: SessionState {
                rock_state: RockState::Start,
                stone,
                drag_origin_y: None,
                done_timer: 0.0,
                flight_time: 0.0,
            },
        }
    }

    /// Session built from the TOML config files, falling back to defaults.
    pub fn from_config_files() -> Self {
        Self::new(
            Simulation::new(PhysicsConfig::load()),
            SessionConfig::load(),
        )
    }

    pub fn id(&self) -> StoneId {
        self.id
    }

    /// Whether a picked entity is this session's stone.
    pub fn is_stone(&self, id: StoneId) -> bool {
        self.id == id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rock_state(&self) -> RockState {
        self.state.rock_state
    }

    pub fn stone(&self) -> &Stone {
        &self.state.stone
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Pointer moved over `target` (or over nothing).
    pub fn hover(&mut self, target: Option<StoneId>) -> Vec<SessionEvent> {
        let on_stone = target.is_some_and(|id| self.is_stone(id));
        match (self.state.rock_state, on_stone) {
            (RockState::Start, true) => self.transition(RockState::Selected),
            (RockState::Selected, false) => self.transition(RockState::Start),
            _ => Vec::new(),
        }
    }

    /// Pointer pressed at screen height `pointer_y`. Starts tilting if the
    /// stone is selected; a repeated press while tilting re-anchors the drag.
    pub fn press(&mut self, pointer_y: f64) -> Vec<SessionEvent> {
        match self.state.rock_state {
            RockState::Selected => {
                self.state.drag_origin_y = Some(pointer_y);
                self.transition(RockState::Configuring)
            },
            RockState::Configuring => {
                self.state.drag_origin_y = Some(pointer_y);
                Vec::new()
            },
            _ => {
                self.state.drag_origin_y = None;
                Vec::new()
            },
        }
    }

    /// Pointer dragged to `pointer_y` while configuring. Each event past the
    /// threshold tilts the stone by a clamped step. Returns the new tilt.
    pub fn drag_to(&mut self, pointer_y: f64) -> Option<f64> {
        if self.state.rock_state != RockState::Configuring {
            return None;
        }
        let origin = self.state.drag_origin_y?;
        let travel = (pointer_y - origin).abs();
        if travel > self.config.tilt_drag_threshold_px {
            let step = clamp(
                travel * self.config.tilt_per_px,
                -self.config.max_tilt_step,
                self.config.max_tilt_step,
            );
            self.state.stone.theta += step;
        }
        Some(self.state.stone.theta)
    }

    /// Pointer released: throw the stone if it was being tilted.
    pub fn release(&mut self) -> Vec<SessionEvent> {
        if self.state.rock_state != RockState::Configuring {
            return Vec::new();
        }
        self.state.drag_origin_y = None;
        self.state.flight_time = 0.0;
        tracing::info!(theta = self.state.stone.theta, "Stone thrown");
        self.transition(RockState::Simulation)
    }

    /// Put the stone back at its launch parameters and return to `Start`.
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        self.simulation.reset(&mut self.state.stone);
        self.state.drag_origin_y = None;
        self.state.done_timer = 0.0;
        self.state.flight_time = 0.0;
        let mut events = self.transition(RockState::Start);
        events.push(SessionEvent::Reset);
        events
    }

    /// One render frame of `frame_dt` seconds.
    ///
    /// While simulating, steps the physics once with `frame_dt` clamped to
    /// `max_dt` and declares the throw finished when the stone reaches the
    /// floor threshold or `max_distance`. While finished, counts down to the
    /// auto-reset. Other states ignore frames.
    pub fn advance(&mut self, frame_dt: f64) -> Vec<SessionEvent> {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            return Vec::new();
        }
        match self.state.rock_state {
            RockState::Simulation => self.advance_flight(frame_dt.min(self.config.max_dt)),
            RockState::SimulationDone => {
                self.state.done_timer += frame_dt;
                if self.state.done_timer >= self.config.reset_delay_secs {
                    self.reset()
                } else {
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    fn advance_flight(&mut self, dt: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let was_above = self.state.stone.position.y > 0.0;
        let bounces_before = self.state.stone.bounce_count;

        self.simulation
            .step(&mut self.state.stone, dt, true, self.config.min_height);
        self.state.flight_time += dt;

        let placement = self.placement();
        if was_above && self.state.stone.position.y <= 0.0 {
            events.push(SessionEvent::Splash { at: placement });
        }
        if self.state.stone.bounce_count > bounces_before {
            events.push(SessionEvent::Bounce {
                count: self.state.stone.bounce_count,
            });
        }

        let on_floor = placement.y <= self.config.floor_threshold()
            || self.state.stone.position.y <= self.config.min_height;
        let out_of_range = self.state.stone.position.x > self.config.max_distance;
        if on_floor || out_of_range {
            let stone = &self.state.stone;
            tracing::info!(
                bounces = stone.bounce_count,
                distance = stone.distance_traveled,
                flight_time = self.state.flight_time,
                out_of_range,
                "Throw finished"
            );
            events.push(SessionEvent::Finished {
                bounces: stone.bounce_count,
                distance: stone.distance_traveled,
                skipped: stone.bounce_count > 0,
            });
            self.state.done_timer = 0.0;
            events.extend(self.transition(RockState::SimulationDone));
        }
        events
    }

    fn transition(&mut self, to: RockState) -> Vec<SessionEvent> {
        let from = self.state.rock_state;
        if from == to {
            return Vec::new();
        }
        tracing::info!(%from, %to, "Rock state changed");
        self.state.rock_state = to;
        vec![SessionEvent::StateChanged { from, to }]
    }

    /// Scene placement of the stone mesh.
    pub fn placement(&self) -> RenderPlacement {
        let p = self.state.stone.position;
        RenderPlacement {
            x: p.z,
            y: p.y + self.config.water_height,
            z: p.x,
        }
    }

    /// HUD label for the current state.
    pub fn label(&self) -> String {
        hud::label_text(self.state.rock_state, &self.state.stone)
    }

    /// MessagePack snapshot of the session state.
    pub fn serialize_state(&self) -> Vec<u8> {
        rmp_serde::to_vec(&self.state).unwrap_or_default()
    }

    /// Replace the session state with a snapshot. Malformed bytes are dropped.
    pub fn apply_state(&mut self, bytes: &[u8]) {
        match rmp_serde::from_slice::<SessionState>(bytes) {
            Ok(state) => self.state = state,
            Err(e) => tracing::debug!(error = %e, "Dropped malformed session state"),
        }
    }
}

impl Default for SkipSession {
    fn default() -> Self {
        Self::new(Simulation::default(), SessionConfig::default())
    }
}
