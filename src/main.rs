use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::{style, Color, Stylize};
use ssvlog::Outcome;
use ssvlog_core::{Config, Dispatcher, OutputSink, Pipeline};
use ssvlog_feeds::LineFeed;

#[derive(Parser)]
#[command(name = "ssvlog", version, about = "Readable, coloured SSV node logs")]
struct Cli {
    /// Hide high-frequency events and every DEBUG record.
    #[arg(short = 'n', long)]
    no_spam: bool,

    /// Append the node's full error traceback to error lines.
    #[arg(short = 't', long)]
    traceback: bool,

    /// Input comes from journalctl rather than docker logs.
    #[arg(short = 'j', long)]
    journal: bool,

    /// Print without ANSI colours (also honoured: NO_COLOR).
    #[arg(long)]
    no_color: bool,

    /// Theme TOML file layered over the built-in palette.
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,

    /// Read from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Configuration file (default: ~/.config/ssvlog/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the rule table in precedence order and exit.
    #[arg(long)]
    list_rules: bool,

    /// Write debug logs to /tmp/ssvlog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("ssvlog error: {err:#}");
            if no_color_env() {
                eprintln!("{message}");
            } else {
                eprintln!("{}", style(message).with(Color::DarkRed));
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    if cli.debug {
        init_tracing()?;
    }

    let config = Config::load(cli.config.as_deref())?;
    let options = config
        .options()
        .merge(cli.no_spam, cli.traceback, cli.journal);
    let dispatcher = Dispatcher::standard(options);

    if cli.list_rules {
        ssvlog::list_rules(dispatcher.rules(), &mut io::stdout().lock())?;
        return Ok(());
    }

    let color = config.output.color && !cli.no_color && !no_color_env();
    let theme = cli.theme.or_else(|| config.theme_path());
    let painter = ssvlog::painter(color, theme.as_deref())?;
    let pipeline = Pipeline::new(dispatcher, painter);
    tracing::debug!(?options, color, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(async {
        let mut feed = match &cli.file {
            Some(path) => LineFeed::file(path).await?,
            None => LineFeed::stdin(),
        };
        let mut sink = OutputSink::new(io::stdout().lock());
        ssvlog::run(&mut feed, &pipeline, &mut sink, ssvlog::interrupted()).await
    });
    // A stdin read parked on the blocking pool cannot be cancelled, so the
    // runtime must not wait for it.
    runtime.shutdown_background();

    if outcome? == Outcome::Interrupted {
        println!("\nExiting...");
    }
    Ok(())
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

fn init_tracing() -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/ssvlog-debug.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!("ssvlog debug log started, tail -f /tmp/ssvlog-debug.log");
    Ok(())
}
