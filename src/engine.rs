//! Host-facing orchestrator
//!
//! The engine owns one simulation and multiplexes nothing at runtime: the
//! mode picks a concrete [`Simulation`] at construction and the tick path is
//! identical from then on. The host drives `tick(dt)` at its own cadence;
//! there is no internal scheduler, so pausing, resuming, and disposal are all
//! plain control flow on the host side.
//!
//! Input is recorded at any time via the `handle_*` methods and consumed at
//! the start of the next tick; nothing mutates the simulation mid-tick.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::consts::TICKS_PER_SECOND;
use crate::settings::{GameSpeed, Settings};
use crate::sim::{
    Direction, Frame, GameMode, MazeChaseSim, SideScrollerSim, Simulation, TickInput, TickOutcome,
};

/// Engine lifecycle. `LevelComplete` is internal to the maze sim; the engine
/// stays `Running` across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Terminal result reported to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Outcome {
    pub score: u64,
    /// Obstacles passed (side-scroller) or pellets eaten (maze)
    pub secondary: u32,
    pub duration_seconds: u64,
}

/// Pure consumer of per-tick snapshots. Pixel drawing happens elsewhere.
pub trait Renderer {
    /// Acquire the drawing surface. Called once during engine construction;
    /// failure aborts construction.
    fn acquire(&mut self, mode: GameMode) -> Result<(), String>;

    /// Present one frame.
    fn render(&mut self, frame: &Frame<'_>);
}

#[derive(Debug, Clone)]
pub enum EngineError {
    /// The renderer could not acquire its surface
    SurfaceUnavailable(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::SurfaceUnavailable(reason) => {
                write!(f, "rendering surface unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for EngineError {}

type CompletionCallback = Box<dyn FnMut(Outcome)>;
type ScoreCallback = Box<dyn FnMut(u64)>;

/// Owns all simulation state and is its only writer.
pub struct GameEngine {
    mode: GameMode,
    sim: Box<dyn Simulation>,
    renderer: Box<dyn Renderer>,
    settings: Settings,
    phase: EnginePhase,
    run_ticks: u64,
    queued_direction: Option<Direction>,
    queued_flap: bool,
    on_complete: CompletionCallback,
    on_score: ScoreCallback,
}

impl GameEngine {
    /// Build an engine for `mode`. Fails if the renderer cannot acquire its
    /// surface; no partial engine is ever returned.
    pub fn new(
        mode: GameMode,
        settings: Settings,
        mut renderer: Box<dyn Renderer>,
        on_complete: CompletionCallback,
        on_score: ScoreCallback,
    ) -> Result<Self, EngineError> {
        renderer
            .acquire(mode)
            .map_err(EngineError::SurfaceUnavailable)?;

        let sim: Box<dyn Simulation> = match mode {
            GameMode::SideScroller => Box::new(SideScrollerSim::new(&settings)),
            GameMode::MazeChase => Box::new(MazeChaseSim::new(&settings)),
        };

        let mut engine = Self {
            mode,
            sim,
            renderer,
            settings,
            phase: EnginePhase::Idle,
            run_ticks: 0,
            queued_direction: None,
            queued_flap: false,
            on_complete,
            on_score,
        };
        log::info!("engine initialized for {:?}", mode);
        engine.render_frame();
        Ok(engine)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.sim.score()
    }

    /// Reinitialize mode state and show one idle frame. Keeps the engine
    /// reusable after a game over.
    pub fn reset(&mut self, settings: Settings) {
        log::info!("engine reset for {:?}", self.mode);
        self.settings = settings;
        self.sim.reset(&self.settings);
        self.phase = EnginePhase::Idle;
        self.run_ticks = 0;
        self.queued_direction = None;
        self.queued_flap = false;
        self.render_frame();
    }

    /// Begin a run. Only valid from Idle; call `reset` first after a game
    /// over.
    pub fn start(&mut self) {
        if self.phase != EnginePhase::Idle {
            log::warn!("start ignored in phase {:?}", self.phase);
            return;
        }
        log::info!(
            "run starting at {} speed",
            self.settings.speed.as_str()
        );
        self.run_ticks = 0;
        self.phase = EnginePhase::Running;
    }

    /// Stop ticking without touching any counter.
    pub fn pause(&mut self) {
        if self.phase == EnginePhase::Running {
            self.phase = EnginePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == EnginePhase::Paused {
            self.phase = EnginePhase::Running;
        }
    }

    /// Change the speed tier, effective immediately.
    pub fn set_speed(&mut self, speed: GameSpeed) {
        log::debug!("speed tier set to {}", speed.as_str());
        self.settings.speed = speed;
        self.sim.set_speed(speed.multiplier());
    }

    /// Replace the shield budget (side-scroller only).
    pub fn set_shields(&mut self, shields: u32) {
        self.settings.starting_shields = shields;
        if !self.sim.set_shields(shields) {
            log::warn!("set_shields ignored in {:?}", self.mode);
        }
    }

    /// Record a directional intent; consumed at the start of the next tick.
    pub fn handle_directional_input(&mut self, direction: Direction) {
        self.queued_direction = Some(direction);
    }

    /// Record a flap request; consumed at the start of the next tick.
    pub fn handle_flap_input(&mut self) {
        self.queued_flap = true;
    }

    /// Advance one step. The host calls this at its own cadence, normally
    /// with [`crate::consts::SIM_DT`].
    ///
    /// A panic inside the simulation is caught here, logged, and converted
    /// into a clean game over so a corrupted half-updated state never keeps
    /// running.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != EnginePhase::Running {
            return;
        }

        let input = TickInput {
            flap: std::mem::take(&mut self.queued_flap),
            direction: self.queued_direction.take(),
        };

        let score_before = self.sim.score();
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.sim.tick(&input, dt)));
        self.run_ticks += 1;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(_) => {
                // The state may be half-updated; end the run without
                // rendering it
                log::error!("error in game tick, ending run");
                self.finish();
                return;
            }
        };

        if self.sim.score() != score_before {
            (self.on_score)(self.sim.score());
        }

        match outcome {
            TickOutcome::Running => {}
            TickOutcome::LevelComplete => {
                log::info!("level complete, run continues");
            }
            TickOutcome::GameOver => self.finish(),
        }

        self.render_frame();
    }

    /// Consume the engine. Ownership guarantees no further ticks, renders,
    /// or callbacks can happen after this returns.
    pub fn dispose(self) {
        log::info!("engine disposed");
    }

    fn finish(&mut self) {
        self.phase = EnginePhase::GameOver;
        let outcome = Outcome {
            score: self.sim.score(),
            secondary: self.sim.secondary_count(),
            duration_seconds: self.run_ticks / TICKS_PER_SECOND,
        };
        log::info!(
            "run over: score {} after {}s",
            outcome.score,
            outcome.duration_seconds
        );
        (self.on_complete)(outcome);
    }

    fn render_frame(&mut self) {
        self.renderer.render(&self.sim.frame());
    }
}
