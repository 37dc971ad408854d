//! The game's state machine, driven in real time.
//!
//! Each life goes Countdown → Warmup → Running → end sequence → reset. All
//! waiting is done with literal sleeps between board updates, and every
//! update is presented before the next sleep starts.

mod end_sequence;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

use crate::game::{CollisionType, Direction, GameConfig, GameEngine, GameState, TickOutcome};
use crate::input::Controls;
use crate::metrics::GameMetrics;
use crate::render::Surface;

/// How a life ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Lost(CollisionType),
    LevelComplete,
    /// No room left for food; counts as a win
    BoardFull,
}

impl LifeOutcome {
    pub fn is_win(&self) -> bool {
        !matches!(self, LifeOutcome::Lost(_))
    }

    fn from_tick(outcome: TickOutcome) -> Option<Self> {
        match outcome {
            TickOutcome::Crashed(collision) => Some(LifeOutcome::Lost(collision)),
            TickOutcome::LevelComplete => Some(LifeOutcome::LevelComplete),
            TickOutcome::BoardFull => Some(LifeOutcome::BoardFull),
            TickOutcome::Moved | TickOutcome::Ate => None,
        }
    }
}

pub struct GameLoop<S: Surface> {
    config: GameConfig,
    engine: GameEngine,
    state: GameState,
    controls: Arc<Controls>,
    surface: S,
    metrics: GameMetrics,
    rng: StdRng,
    status: String,
}

impl<S: Surface> GameLoop<S> {
    pub fn new(config: GameConfig, controls: Arc<Controls>, surface: S) -> Self {
        let engine = GameEngine::new(&config);
        Self::with_engine(config, engine, controls, surface)
    }

    pub fn with_engine(
        config: GameConfig,
        engine: GameEngine,
        controls: Arc<Controls>,
        surface: S,
    ) -> Self {
        let state = GameState::new(&config);
        controls.reset(state.direction, state.tick_interval);

        Self {
            config,
            engine,
            state,
            controls,
            surface,
            metrics: GameMetrics::new(),
            rng: StdRng::from_entropy(),
            status: String::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Play lives forever
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;
        loop {
            self.play_life().await?;
        }
    }

    /// Levels mode opens on level 1
    pub async fn start(&mut self) -> Result<()> {
        if self.state.levels {
            self.level_up().await?;
            self.state.reset_life(self.config.initial_snake_length);
        }
        self.present()
    }

    /// One full life, from countdown to the reset that follows it
    pub async fn play_life(&mut self) -> Result<LifeOutcome> {
        log::debug!(
            "New life on a {}x{} board, level {}",
            self.state.board_size(),
            self.state.board_size(),
            self.state.level
        );

        self.countdown().await?;

        let outcome = match self.warmup().await? {
            Some(outcome) => outcome,
            None => self.run_until_over().await?,
        };

        match outcome {
            LifeOutcome::Lost(collision) => {
                log::info!("Lost ({collision:?}) with score {}", self.state.score)
            }
            LifeOutcome::LevelComplete => log::info!("Level {} complete", self.state.level),
            LifeOutcome::BoardFull => log::warn!("Board full with score {}", self.state.score),
        }

        self.finish_life(outcome).await?;
        Ok(outcome)
    }

    async fn countdown(&mut self) -> Result<()> {
        let step = Duration::from_millis(self.config.countdown_step_ms);
        for n in (1..=3).rev() {
            self.set_status(n.to_string())?;
            sleep(step).await;
        }
        self.status = "GO!".to_string();

        if !self.engine.place_food(&mut self.state) {
            log::warn!("No room for food at the start of a life");
        }
        self.present()
    }

    /// The forced opening moves; returns early if they already end the life
    async fn warmup(&mut self) -> Result<Option<LifeOutcome>> {
        for _ in 0..self.config.warmup_ticks {
            if let Some(outcome) = LifeOutcome::from_tick(self.tick().await?) {
                return Ok(Some(outcome));
            }
        }
        self.set_status(self.score_text())?;
        Ok(None)
    }

    async fn run_until_over(&mut self) -> Result<LifeOutcome> {
        loop {
            if let Some(outcome) = LifeOutcome::from_tick(self.tick().await?) {
                return Ok(outcome);
            }
        }
    }

    async fn tick(&mut self) -> Result<TickOutcome> {
        sleep(self.controls.tick_interval()).await;

        let outcome = self
            .engine
            .step(&mut self.state, self.controls.direction());

        if matches!(outcome, TickOutcome::Ate | TickOutcome::LevelComplete) {
            self.status = self.score_text();
        }
        self.present()?;

        Ok(outcome)
    }

    async fn finish_life(&mut self, outcome: LifeOutcome) -> Result<()> {
        self.metrics
            .on_life_over(self.state.score, self.state.level);
        self.metrics.update();

        self.end_sequence(outcome).await?;

        if self.state.levels {
            if !outcome.is_win() {
                self.engine.levels().restart(&mut self.state);
            }
            self.level_up().await?;
        }

        self.state.reset_life(self.config.initial_snake_length);
        self.controls
            .reset(Direction::Up, self.state.tick_interval);
        self.set_status(String::new())
    }

    async fn level_up(&mut self) -> Result<()> {
        let up = self.engine.levels().level_up(&mut self.state);
        self.controls
            .reset(self.state.direction, self.state.tick_interval);

        let banner = Duration::from_millis(self.config.level_banner_ms);
        self.set_status(format!("Level {}", up.level))?;
        sleep(banner).await;
        self.set_status(format!("Get {}", up.threshold))?;
        sleep(banner).await;
        Ok(())
    }

    fn score_text(&self) -> String {
        format!("Score: {}", self.state.score)
    }

    fn set_status(&mut self, status: String) -> Result<()> {
        self.status = status;
        self.present()
    }

    fn present(&mut self) -> Result<()> {
        self.surface.present(&self.state.board, &self.status)
    }
}
