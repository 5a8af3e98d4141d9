use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::select;
use life_stream::{BitMap, Board, CancelToken, Runner, RunnerConfig};
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

mod args;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn configure(args: &Args) -> Result<RunnerConfig> {
    let columns = args.columns.unwrap_or(args.rows);
    let config = RunnerConfig::default()
        .with_board_size(args.rows, columns)
        .with_clock_interval(Duration::from_millis(args.interval_ms))
        .with_close_grace_period(Duration::from_millis(args.grace_ms));

    if let Some(state) = &args.init_state {
        let data: BitMap = state.parse().context("failed to parse init state")?;
        let board = Board::from_data(args.rows, data).context("failed to build init board")?;
        return Ok(config.with_init_board(board));
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding random board");
    let rng = Mutex::new(StdRng::seed_from_u64(seed));
    Ok(config.with_init_fn(move |_| rng.lock().gen::<f32>() > 0.5))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let shutdown = CancelToken::new();
    let on_signal = shutdown.clone();
    ctrlc::set_handler(move || on_signal.cancel()).context("failed to install signal handler")?;

    let (board_tx, board_rx) = crossbeam_channel::bounded::<Board>(0);
    let config = configure(&args)?
        .with_base_token(shutdown.clone())
        .with_listener(board_tx);
    let runner = Runner::new(config)?;
    runner.start().context("failed to start runner")?;
    let runner = scopeguard::guard(runner, |runner| {
        if let Err(err) = runner.close() {
            warn!(error = %err, "failed to close runner");
        }
    });
    // declared after the guard so it is dropped first, a send the loop is
    // blocked on then fails instead of holding up close
    let board_rx = board_rx;

    let renderer = args.renderer.renderer();
    let health = crossbeam_channel::tick(Duration::from_secs(1));
    let mut stdout = io::stdout().lock();
    let mut shown = 0;
    loop {
        select! {
            recv(board_rx) -> board => {
                let board = board.context("runner hung up")?;
                stdout.write_all(renderer.render(&board).as_bytes())?;
                stdout.flush()?;
                shown += 1;
                if args.generations.is_some_and(|limit| shown >= limit) {
                    break;
                }
            }
            recv(health) -> _ => {
                if let Some(err) = runner.loop_error() {
                    return Err(anyhow::Error::new(err).context("runner loop failed"));
                }
            }
            recv(shutdown.cancelled()) -> _ => {
                info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}
