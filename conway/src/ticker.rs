// ticker.rs - Self-rescheduling tick loop and its stop signal

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, trace};

use crate::engine::next_generation;
use crate::grid::Grid;

/// Delay between two ticks while running.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Called after each published generation.
pub type TickHook = Arc<dyn Fn() + Send + Sync>;

/// The current grid plus the number of generations computed since the
/// last reset.
#[derive(Debug, Clone)]
pub struct Board {
    pub grid: Grid,
    pub generation: u64,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self { grid, generation: 0 }
    }

    /// Replaces the grid and restarts the generation count.
    pub fn reset(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }

    pub fn advance(&mut self) {
        self.grid = next_generation(&self.grid);
        self.generation += 1;
    }
}

pub type SharedBoard = Arc<Mutex<Board>>;

/// Locks the board. A panic elsewhere cannot leave a half-written grid
/// behind (grids are replaced whole), so poisoning is ignored.
pub fn lock(board: &SharedBoard) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Running flag shared between the controller and the tick loop.
///
/// Running and the run epoch share one word: the low bit is the flag and
/// the rest counts stops. Every start therefore produces a distinct odd
/// state, and a loop keeps going only while the word still equals the
/// state it was started with, so a quick stop/start never leaves two
/// loops ticking the same board.
#[derive(Debug, Clone, Default)]
pub struct RunFlag {
    state: Arc<AtomicU64>,
}

const RUNNING: u64 = 1;

impl RunFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) & RUNNING != 0
    }

    /// Sets the flag. Returns a token for the new loop, or `None` if
    /// already running.
    pub fn start(&self) -> Option<RunToken> {
        let stopped = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s & RUNNING == 0).then_some(s | RUNNING)
            })
            .ok()?;
        Some(RunToken {
            flag: self.clone(),
            state: stopped | RUNNING,
        })
    }

    /// Clears the flag and moves to the next epoch. Returns whether it
    /// was set.
    pub fn stop(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s & RUNNING != 0).then_some(s.wrapping_add(1))
            })
            .is_ok()
    }
}

/// Handed to one tick loop; live until the flag is cleared or a newer
/// loop is started.
#[derive(Debug, Clone)]
pub struct RunToken {
    flag: RunFlag,
    state: u64,
}

impl RunToken {
    pub fn is_live(&self) -> bool {
        self.flag.state.load(Ordering::Acquire) == self.state
    }

    pub fn epoch(&self) -> u64 {
        self.state >> 1
    }
}

/// Runs one generation per tick until `token` goes dead.
///
/// The flag is checked at the top of every tick, and the board is read
/// fresh each time, so edits made between ticks are picked up by the
/// next one.
pub async fn run_simulation(
    board: SharedBoard,
    token: RunToken,
    interval: Duration,
    on_tick: Option<TickHook>,
) {
    loop {
        if !token.is_live() {
            debug!(epoch = token.epoch(), "tick loop stopped");
            return;
        }

        {
            let mut board = lock(&board);
            board.advance();
            trace!(
                generation = board.generation,
                population = board.grid.population(),
                "tick"
            );
        }

        if let Some(hook) = &on_tick {
            hook();
        }

        tokio::time::sleep(interval).await;
    }
}
