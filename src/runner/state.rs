use std::fmt::Display;

/// Lifecycle of a [`Runner`](super::Runner).
///
/// ```text
/// Stopped -> Starting -> Running -> Stopping -> Stopped
///                           |           |
///                           +-> Errored <-+ (grace period elapsed)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
    Errored,
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            State::Stopped => "Stopped",
            State::Starting => "Starting",
            State::Running => "Running",
            State::Stopping => "Stopping",
            State::Errored => "Errored",
        };
        f.write_str(name)
    }
}
