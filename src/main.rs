// Sortty: step-by-step sorting visualizer for the terminal

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortty::catalog::catalog;
use sortty::driver::{self, Player};
use sortty::ui::App;
use sortty::{run_seeded, AlgorithmId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Step-by-step sorting algorithm visualizer")]
struct Args {
    /// Algorithm id (see --list)
    #[arg(short, long, default_value = "bubble")]
    algorithm: AlgorithmId,

    /// Comma-separated input values; random when omitted
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<i64>>,

    /// Number of random values to generate
    #[arg(long, default_value_t = driver::DEFAULT_ARRAY_SIZE)]
    size: usize,

    /// Seed for random input and for bogo sort's shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between automatic steps
    #[arg(long, default_value_t = driver::DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Print every snapshot to stdout instead of starting the TUI
    #[arg(long)]
    headless: bool,

    /// With --headless, print JSON lines
    #[arg(long, requires = "headless")]
    json: bool,

    /// List the available algorithms and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; keep them quiet by default so the TUI is not disturbed
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if args.list {
        print_catalog()?;
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let input = match args.values {
        Some(values) => values,
        None => driver::random_array(args.size, &mut StdRng::seed_from_u64(seed)),
    };
    info!(algorithm = %args.algorithm, len = input.len(), seed, "input ready");

    if args.headless {
        return print_headless(args.algorithm, &input, seed, args.json);
    }

    let player = Player::new(args.algorithm, input, seed)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(player, Duration::from_millis(args.delay_ms));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_catalog() -> io::Result<()> {
    let mut out = io::stdout().lock();
    for entry in catalog() {
        writeln!(
            out,
            "{:<10} {:<22} {:<12} {:<9} {}",
            entry.id.id(),
            entry.name(),
            entry.time_complexity,
            entry.space_complexity,
            entry.description
        )?;
    }
    Ok(())
}

fn print_headless(
    algorithm: AlgorithmId,
    input: &[i64],
    seed: u64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    for (step, snapshot) in run_seeded(algorithm, input, seed)?.enumerate() {
        if json {
            writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
        } else {
            let kind = snapshot.kind().map_or("", |k| k.as_str());
            writeln!(
                out,
                "{:>5} {:<8} {:?} {}",
                step + 1,
                kind,
                snapshot.array,
                snapshot.description()
            )?;
        }
    }
    Ok(())
}
