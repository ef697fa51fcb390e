use crate::{Grid, engine};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Time between generations while running
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);
/// Share of cells made alive by [`Driver::randomize`]
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    pub interval: Duration,
    pub live_probability: f64,
}
impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            live_probability: DEFAULT_LIVE_PROBABILITY,
        }
    }
}

/// Owner of the current generation and of the schedule that advances it
///
/// Direct edits go through [`Driver::grid_mut`], which needs exclusive access,
/// so an edit can never land in the middle of a step.
#[derive(Debug)]
pub struct Driver {
    grid: Grid,
    scratch: Grid,
    config: DriverConfig,
    state: RunState,
    next_due: Option<Instant>,
    generation: u64,
}

impl Driver {
    pub fn new(grid: Grid, config: DriverConfig) -> Self {
        Self {
            scratch: grid.clone(),
            grid,
            config,
            state: RunState::Stopped,
            next_due: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
    #[inline]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn population(&self) -> usize {
        self.grid.alive_count()
    }

    /// Begins stepping, with the first generation due immediately
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        debug!(generation = self.generation, "simulation started");
        self.state = RunState::Running;
        self.next_due = Some(now);
    }

    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        debug!(generation = self.generation, "simulation paused");
        self.state = RunState::Stopped;
        self.next_due = None;
    }

    /// Steps once if running and a generation is due
    ///
    /// Only a single generation is computed per call; intervals missed
    /// because the caller ticked late are dropped rather than caught up.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if self.is_running() && now >= due => {
                self.step_once();
                self.next_due = Some(now + self.config.interval);
                true
            }
            _ => false,
        }
    }

    /// How long until [`Driver::tick`] will step again, [`None`] when stopped
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .filter(|_| self.is_running())
            .map(|due| due.saturating_duration_since(now))
    }

    /// Advances exactly one generation regardless of the run state
    pub fn step_once(&mut self) {
        engine::step_into(&self.grid, &mut self.scratch);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        trace!(
            generation = self.generation,
            alive = self.grid.alive_count(),
            "stepped"
        );
    }

    /// Stops the simulation and kills every cell
    pub fn clear(&mut self) {
        self.pause();
        self.grid.clear();
        self.generation = 0;
        debug!("grid cleared");
    }

    /// Stops the simulation and reseeds the grid with random live cells
    pub fn randomize<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        self.grid.randomize(rng, self.config.live_probability);
        debug!(
            live_probability = self.config.live_probability,
            alive = self.grid.alive_count(),
            "grid randomized"
        );
    }
}
