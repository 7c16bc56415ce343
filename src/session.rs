//! Frame driver: intents, then movement, then projection, once per tick.
use tracing::{info, trace, warn};

use crate::config::ViewerConfig;
use crate::core::maze::{Map, MapError};
use crate::core::movement::MovementController;
use crate::core::player::KinematicState;
use crate::core::process_events::InputEvent;
use crate::render::framebuffer::{Color, PixelSink};
use crate::render::minimap::draw_minimap;
use crate::render::render3d::{ColumnSlice, Projector, Viewport};
use crate::tuning::{CasterTuning, MovementTuning};

/// What the outer loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Quit,
}

pub struct Session {
    map: Map,
    state: KinematicState,
    movement: MovementController,
    caster: CasterTuning,
    viewport: Viewport,
    frame: u64,
}

impl Session {
    pub fn new(map: Map, viewport: Viewport, movement: MovementTuning, caster: CasterTuning) -> Self {
        let state = KinematicState::spawn();
        if !map.spawn_is_open(state.pos) {
            warn!(x = state.pos.x, y = state.pos.y, "spawn point is inside a wall");
        }
        info!(
            width = map.width(),
            height = map.height(),
            columns = viewport.width,
            fov = viewport.fov,
            "session started"
        );
        Self {
            map,
            state,
            movement: MovementController::new(movement),
            caster,
            viewport,
            frame: 0,
        }
    }

    /// Loads the configured map file, or the reference maze when none is set.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, MapError> {
        let map = match &config.map_file {
            Some(path) => Map::load(path)?,
            None => Map::reference(),
        };
        let movement = MovementTuning {
            collision: config.collision,
            ..MovementTuning::default()
        };
        Ok(Self::new(map, config.viewport, movement, CasterTuning::default()))
    }

    pub fn with_state(mut self, state: KinematicState) -> Self {
        self.state = state;
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Applies this frame's input, then integrates movement. A quit event
    /// stops the tick before anything moves.
    pub fn tick(&mut self, events: impl IntoIterator<Item = InputEvent>) -> LoopSignal {
        for event in events {
            match event {
                InputEvent::Quit => {
                    info!(frames = self.frame, "quit requested");
                    return LoopSignal::Quit;
                }
                InputEvent::Move(intent) => {
                    trace!(?intent, "intent");
                    intent.apply(&mut self.state, &self.movement.tuning);
                }
            }
        }

        self.movement.advance(&mut self.state, &self.map);
        self.frame += 1;
        LoopSignal::Continue
    }

    fn projector(&self) -> Projector<'_> {
        Projector::new(&self.map, self.caster, self.viewport)
    }

    pub fn render(&self) -> Vec<ColumnSlice> {
        self.projector().render_frame(&self.state)
    }

    /// Draws the 3D view and, when `minimap_cell > 0`, the minimap over it.
    pub fn render_into(&self, sink: &mut impl PixelSink, background: Color, minimap_cell: u32) {
        self.projector().draw_frame(&self.state, sink, background);
        draw_minimap(sink, &self.map, &self.state, minimap_cell);
    }
}
