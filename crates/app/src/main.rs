mod term;

use std::fmt;
use std::path::PathBuf;

use quiz_core::{Clock, QuizSettings, SettingsError};
use services::{QuizContext, ShuffleSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

use crate::term::{Command, print_commands, render_loop};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app --bin quiz -- [--settle-ms <ms>] [--drag-threshold <px>]");
    eprintln!("                                 [--seed <n>] [--catalog <file.json>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --settle-ms 240, --drag-threshold 120, built-in catalog, random shuffle");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SETTLE_MS, QUIZ_DRAG_THRESHOLD, QUIZ_SEED, QUIZ_CATALOG, RUST_LOG");
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    settle_ms: Option<u64>,
    drag_threshold: Option<f64>,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    json: bool,
}

#[derive(Debug, PartialEq)]
enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Environment first, then flags on top.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut parsed = Args::default();
        if let Some(raw) = env("QUIZ_SETTLE_MS") {
            parsed.settle_ms = Some(parse_number("QUIZ_SETTLE_MS", &raw)?);
        }
        if let Some(raw) = env("QUIZ_DRAG_THRESHOLD") {
            parsed.drag_threshold = Some(parse_number("QUIZ_DRAG_THRESHOLD", &raw)?);
        }
        if let Some(raw) = env("QUIZ_SEED") {
            parsed.seed = Some(parse_number("QUIZ_SEED", &raw)?);
        }
        parsed.catalog = env("QUIZ_CATALOG")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settle-ms" => {
                    let value = require_value(args, "--settle-ms")?;
                    parsed.settle_ms = Some(parse_number("--settle-ms", &value)?);
                }
                "--drag-threshold" => {
                    let value = require_value(args, "--drag-threshold")?;
                    parsed.drag_threshold = Some(parse_number("--drag-threshold", &value)?);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(parse_number("--seed", &value)?);
                }
                "--catalog" => {
                    parsed.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--json" => parsed.json = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(parsed))
    }

    fn settings(&self) -> Result<QuizSettings, SettingsError> {
        let mut settings = QuizSettings::default_arcade();
        if let Some(ms) = self.settle_ms {
            settings = settings.with_settle_delay_ms(ms)?;
        }
        if let Some(px) = self.drag_threshold {
            settings = settings.with_drag_threshold_px(px)?;
        }
        Ok(settings)
    }

    fn shuffle(&self) -> ShuffleSource {
        self.seed.map_or(ShuffleSource::Entropy, ShuffleSource::Seeded)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed =
        Args::parse(&mut argv, |key| std::env::var(key).ok()).inspect_err(|_| print_usage())?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    // Everything the arena depends on is assembled here, once.
    let settings = args.settings()?;
    let clock = Clock::system();
    let ctx = match &args.catalog {
        Some(path) => QuizContext::from_catalog_path(settings, path, clock, args.shuffle())?,
        None => QuizContext::builtin(settings, clock, args.shuffle()),
    };

    let (tx, driver) = ctx.driver(32);
    let views = driver.arena().subscribe();
    let renderer = tokio::spawn(render_loop(views, args.json));
    let game = tokio::spawn(driver.run());

    print_commands();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    'input: while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Events(events) => {
                for event in events {
                    if tx.send(event).await.is_err() {
                        break 'input;
                    }
                }
            }
            Command::Help => print_commands(),
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(raw) => eprintln!("unknown command: {raw} (type `help`)"),
        }
    }

    drop(tx);
    let arena = game.await?;
    renderer.abort();
    tracing::info!(
        session_id = %arena.session().id(),
        score = arena.session().score(),
        best_streak = arena.session().best_streak(),
        "quiz.exit"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
