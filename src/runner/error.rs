use std::{fmt::Display, time::Duration};

use thiserror::Error;

use super::State;
use crate::board::BoardError;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("cannot {op} runner in state {state}")]
    StateConflict { op: &'static str, state: State },
    #[error("the runner took longer than {grace:?} to stop after close")]
    CloseTimeout { grace: Duration },
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("{}", Joined(.0))]
    Aggregate(Vec<RunnerError>),
    #[error("invalid runner config: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to spawn runner thread")]
    Spawn(#[source] std::io::Error),
}

impl RunnerError {
    /// The individual failures of an aggregate, or the error itself.
    pub fn errors(&self) -> &[RunnerError] {
        match self {
            RunnerError::Aggregate(errs) => errs,
            other => std::slice::from_ref(other),
        }
    }
}

struct Joined<'a>(&'a [RunnerError]);

impl Display for Joined<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} errors: [", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", err)?;
            if let Some(source) = std::error::Error::source(err) {
                write!(f, ": {}", source)?;
            }
        }
        f.write_str("]")
    }
}
