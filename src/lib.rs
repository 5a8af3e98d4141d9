pub mod board;
pub mod render;
pub mod runner;

pub use board::{BitMap, Board, BoardError, Point};
pub use runner::{CancelToken, Runner, RunnerConfig, RunnerError, State};
