use clap::{Parser, ValueEnum};
use life_stream::render::{BlockRenderer, DotRenderer, Renderer};

/// Runs Conway's Game of Life and prints every generation.
#[derive(Parser, Debug)]
#[command(name = "life-stream")]
pub struct Args {
    #[arg(short, long, default_value_t = 10)]
    pub rows: usize,
    /// Defaults to the number of rows.
    #[arg(short, long)]
    pub columns: Option<usize>,
    #[arg(short, long, default_value_t = 1000)]
    pub interval_ms: u64,
    #[arg(long, default_value_t = 5000)]
    pub grace_ms: u64,
    /// Initial cells as a string of 0s and 1s, row-major.
    #[arg(long, conflicts_with = "seed")]
    pub init_state: Option<String>,
    /// Seed for the random initial fill.
    #[arg(short, long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = RenderKind::Dots)]
    pub renderer: RenderKind,
    /// Stop after printing this many generations.
    #[arg(short, long)]
    pub generations: Option<u64>,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderKind {
    Dots,
    Blocks,
}

impl RenderKind {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderKind::Dots => Box::new(DotRenderer),
            RenderKind::Blocks => Box::new(BlockRenderer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["life-stream"]);
        assert_eq!(args.rows, 10);
        assert_eq!(args.columns, None);
        assert_eq!(args.interval_ms, 1000);
        assert_eq!(args.renderer, RenderKind::Dots);
    }

    #[test]
    fn test_init_state_conflicts_with_seed() {
        let res = Args::try_parse_from(["life-stream", "--init-state", "0101", "--seed", "3"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
