use std::{fmt::Debug, sync::Arc, time::Duration};

use crossbeam_channel::Sender;

use super::CancelToken;
use crate::board::{Board, Point};

pub type InitFn = Arc<dyn Fn(Point) -> bool + Send + Sync>;

/// Settings for a [`Runner`](super::Runner).
///
/// An explicit `init_board` wins over `rows`/`columns` and `init_fn`.
#[derive(Clone)]
pub struct RunnerConfig {
    pub clock_interval: Duration,
    pub base_token: CancelToken,
    pub close_grace_period: Duration,
    pub rows: usize,
    pub columns: usize,
    pub listeners: Vec<Sender<Board>>,
    pub init_fn: Option<InitFn>,
    pub init_board: Option<Board>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            clock_interval: Duration::from_millis(300),
            base_token: CancelToken::new(),
            close_grace_period: Duration::from_secs(60),
            rows: 100,
            columns: 100,
            listeners: vec![],
            init_fn: None,
            init_board: None,
        }
    }
}

impl RunnerConfig {
    pub fn with_clock_interval(mut self, interval: Duration) -> Self {
        self.clock_interval = interval;
        self
    }

    pub fn with_base_token(mut self, token: CancelToken) -> Self {
        self.base_token = token;
        self
    }

    pub fn with_close_grace_period(mut self, grace: Duration) -> Self {
        self.close_grace_period = grace;
        self
    }

    pub fn with_board_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_listener(mut self, listener: Sender<Board>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn with_init_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Point) -> bool + Send + Sync + 'static,
    {
        self.init_fn = Some(Arc::new(f));
        self
    }

    pub fn with_init_board(mut self, board: Board) -> Self {
        self.init_board = Some(board);
        self
    }
}

impl Debug for RunnerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("clock_interval", &self.clock_interval)
            .field("close_grace_period", &self.close_grace_period)
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("listeners", &self.listeners.len())
            .field("init_fn", &self.init_fn.is_some())
            .field("init_board", &self.init_board.is_some())
            .finish_non_exhaustive()
    }
}
