use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{GeometryPolicy, MineBound};
use sweeper_store::{GameService, MemoryStore, ServiceConfig};

use session::{Command, Session};

mod logging;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper games from the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Owner of the games created in this session
    #[arg(short, long, default_value = "player")]
    user: String,

    /// Largest number of rows a new game may have
    #[arg(long, default_value_t = 30)]
    max_rows: u8,

    /// Largest number of columns a new game may have
    #[arg(long, default_value_t = 30)]
    max_columns: u8,

    /// Require fewer than `rows + columns - 1` mines
    #[arg(long)]
    classic_bound: bool,

    /// Print responses as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn policy(&self) -> GeometryPolicy {
        let mine_bound = if self.classic_bound {
            MineBound::Classic
        } else {
            MineBound::Engine
        };
        GeometryPolicy::new(self.max_rows, self.max_columns, mine_bound)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter());
    log::debug!("{:?}", args);

    let policy = args.policy();
    let service = GameService::new(
        MemoryStore::new(),
        ServiceConfig {
            policy,
            seed: args.seed,
        },
    );
    let session = Session::new(service, policy, args.user, args.json);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let output = Command::parse(&line).and_then(|command| {
            if command == Command::Quit {
                Ok(None)
            } else {
                session.execute(command).map(Some)
            }
        });
        let written = match output {
            Ok(None) => break,
            Ok(Some(text)) => writeln!(stdout, "{text}"),
            Err(err) => writeln!(stdout, "{}", session::describe_error(&err)),
        };
        written.context("failed to write output")?;
    }

    Ok(())
}
