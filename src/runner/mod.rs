//! Drives a [`Board`] forward on a fixed clock and hands every generation to
//! a set of listeners.
//!
//! One background thread per run. Each iteration first sends a clone of the
//! current board to every listener (a blocking send, a listener that never
//! reads stalls everyone), then computes the successor and waits for the next
//! tick or for cancellation.

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{after, select, tick, Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::board::{Board, BoardError};

mod cancel;
mod config;
mod error;
mod state;

pub use cancel::CancelToken;
pub use config::{InitFn, RunnerConfig};
pub use error::RunnerError;
pub use state::State;

type Step = fn(&Board) -> Result<Board, BoardError>;

pub struct Runner {
    shared: Arc<Mutex<Shared>>,
}

struct Shared {
    config: RunnerConfig,
    state: State,
    board: Arc<Board>,
    loop_error: Option<BoardError>,
    run: Option<Run>,
    step: Step,
}

/// Handles for the loop of the current run.
struct Run {
    token: CancelToken,
    // disconnects when the loop thread returns
    stopped: Receiver<()>,
}

impl Shared {
    fn initial_board(&mut self) -> Result<Board, Vec<RunnerError>> {
        if let Some(board) = &self.config.init_board {
            self.config.rows = board.rows();
            self.config.columns = board.columns();
            return Ok(board.clone());
        }
        let mut board = Board::new(self.config.rows, self.config.columns)
            .map_err(|err| vec![RunnerError::from(err)])?;
        let mut errs: Vec<RunnerError> = vec![];
        if let Some(init) = &self.config.init_fn {
            for p in board.points() {
                if let Err(err) = board.set(p, init(p)) {
                    errs.push(err.into());
                }
            }
        }
        if errs.is_empty() {
            Ok(board)
        } else {
            Err(errs)
        }
    }

    fn record_error(&mut self, err: BoardError) {
        self.loop_error = Some(err);
        self.state = State::Errored;
    }
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        if config.clock_interval.is_zero() {
            return Err(RunnerError::InvalidConfig(
                "clock interval must be greater than zero",
            ));
        }
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                config,
                state: State::Stopped,
                board: Arc::default(),
                loop_error: None,
                run: None,
                step: Board::next_board,
            })),
        })
    }

    #[cfg(test)]
    fn with_step(self, step: Step) -> Self {
        self.shared.lock().step = step;
        self
    }

    pub fn board_size(&self) -> (usize, usize) {
        let shared = self.shared.lock();
        (shared.config.rows, shared.config.columns)
    }

    pub fn clock_interval(&self) -> Duration {
        self.shared.lock().config.clock_interval
    }

    pub fn state(&self) -> State {
        self.shared.lock().state
    }

    /// The error that stopped the loop, if any.
    pub fn loop_error(&self) -> Option<BoardError> {
        self.shared.lock().loop_error.clone()
    }

    /// A copy of the generation the loop will broadcast next.
    pub fn current_board(&self) -> Board {
        Board::clone(&self.shared.lock().board)
    }

    pub fn add_listener(&self, listener: Sender<Board>) {
        self.shared.lock().config.listeners.push(listener);
    }

    /// Removes every registered sender feeding the same channel as `listener`.
    pub fn remove_listener(&self, listener: &Sender<Board>) {
        self.shared
            .lock()
            .config
            .listeners
            .retain(|l| !l.same_channel(listener));
    }

    /// Builds the initial board and spawns the clock loop. Fails without side
    /// effects unless the runner is `Stopped`.
    pub fn start(&self) -> Result<(), RunnerError> {
        let mut shared = self.shared.lock();
        if shared.state != State::Stopped {
            return Err(RunnerError::StateConflict {
                op: "start",
                state: shared.state,
            });
        }
        shared.state = State::Starting;

        let board = match shared.initial_board() {
            Ok(board) => board,
            Err(errs) => {
                shared.state = State::Stopped;
                return Err(RunnerError::Aggregate(errs));
            }
        };
        let token = shared.config.base_token.child();
        let ticker = tick(shared.config.clock_interval);
        let (stopped_tx, stopped) = crossbeam_channel::bounded(0);
        info!(
            rows = board.rows(),
            columns = board.columns(),
            alive = board.alive(),
            interval = ?shared.config.clock_interval,
            "starting runner"
        );
        shared.board = Arc::new(board);
        shared.loop_error = None;

        let spawned = thread::Builder::new().name("life-runner".into()).spawn({
            let shared = Arc::clone(&self.shared);
            let token = token.clone();
            move || run_loop(shared, token, ticker, stopped_tx)
        });
        if let Err(err) = spawned {
            token.cancel();
            shared.state = State::Stopped;
            return Err(RunnerError::Spawn(err));
        }

        shared.run = Some(Run { token, stopped });
        shared.state = State::Running;
        Ok(())
    }

    /// Cancels the loop and waits up to the grace period for it to exit.
    /// On timeout the runner is left `Errored` and the loop is abandoned.
    pub fn close(&self) -> Result<(), RunnerError> {
        let (run, grace) = {
            let mut shared = self.shared.lock();
            if shared.state != State::Running {
                return Err(RunnerError::StateConflict {
                    op: "close",
                    state: shared.state,
                });
            }
            shared.state = State::Stopping;
            let Some(run) = shared.run.take() else {
                shared.state = State::Stopped;
                return Ok(());
            };
            (run, shared.config.close_grace_period)
        };

        run.token.cancel();
        select! {
            recv(run.stopped) -> _ => {
                let mut shared = self.shared.lock();
                if shared.state == State::Stopping {
                    shared.state = State::Stopped;
                }
                info!("runner stopped");
                Ok(())
            }
            recv(after(grace)) -> _ => {
                self.shared.lock().state = State::Errored;
                warn!(?grace, "runner did not stop within the grace period");
                Err(RunnerError::CloseTimeout { grace })
            }
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if let Some(run) = &self.shared.lock().run {
            run.token.cancel();
        }
    }
}

fn run_loop(
    shared: Arc<Mutex<Shared>>,
    token: CancelToken,
    ticker: Receiver<Instant>,
    _stopped: Sender<()>,
) {
    let step = shared.lock().step;
    let mut generation: u64 = 0;
    loop {
        let board = broadcast(&shared);
        match step(&board) {
            Ok(next) => {
                shared.lock().board = Arc::new(next);
                generation += 1;
                debug!(generation, "advanced board");
            }
            Err(err) => {
                error!(error = %err, generation, "failed to compute next board");
                shared.lock().record_error(err);
                // one last wake-up before leaving
                wait(&token, &ticker);
                return;
            }
        }
        if !wait(&token, &ticker) {
            debug!(generation, "runner loop cancelled");
            return;
        }
    }
}

/// Sends a clone of the current board to every listener. The listener set is
/// snapshotted first so that the lock is not held across blocking sends.
fn broadcast(shared: &Mutex<Shared>) -> Arc<Board> {
    let (board, listeners) = {
        let shared = shared.lock();
        (Arc::clone(&shared.board), shared.config.listeners.clone())
    };
    let mut gone = vec![];
    for listener in listeners {
        if listener.send(Board::clone(&board)).is_err() {
            gone.push(listener);
        }
    }
    if !gone.is_empty() {
        warn!(count = gone.len(), "dropping disconnected listeners");
        shared
            .lock()
            .config
            .listeners
            .retain(|l| !gone.iter().any(|g| g.same_channel(l)));
    }
    board
}

/// Blocks until the next tick. Returns false once the token is cancelled.
fn wait(token: &CancelToken, ticker: &Receiver<Instant>) -> bool {
    select! {
        recv(token.cancelled()) -> _ => false,
        recv(ticker) -> _ => !token.is_cancelled(),
    }
}
