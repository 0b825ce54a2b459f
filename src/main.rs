// src/main.rs
mod app;
mod config;
mod error;
mod layout;
mod logging;
mod menu;
mod models;
mod navigator;
mod pointer;
mod regions;
mod scroll;
mod theme;
mod timing;
mod tracker;
mod ui;
mod visibility;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{prelude::*, Terminal};
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::Settings;
use crate::models::{DEFAULT_PORTFOLIO, Portfolio};
use crate::regions::RegionId;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "A personal portfolio that scrolls in your terminal")]
struct Cli {
    /// Extra config file layered over the defaults and ~/.config/folio/folio.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Portfolio content file (TOML); defaults to the built-in content
    #[arg(long)]
    content: Option<PathBuf>,
    /// Section to open at: home, about, skills, projects, content or contact
    #[arg(long, value_parser = |s: &str| s.parse::<RegionId>())]
    section: Option<RegionId>,
    /// Jump instead of animating and show all content at once
    #[arg(long)]
    reduced_motion: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::new(cli.config.as_deref()).context("loading settings")?;
    if cli.reduced_motion {
        settings.motion.reduced = true;
    }
    settings.validate()?;

    if let Some(path) = settings.log_file() {
        let level = logging::level_from(&settings.log.level, cli.verbose);
        if let Err(err) = logging::init_logging(&path, level) {
            eprintln!("folio: logging disabled: {err:#}");
        }
    }

    let content_path = cli.content.clone().or_else(|| settings.content_path());
    let portfolio = match content_path {
        Some(path) => Portfolio::load(&path).with_context(|| format!("reading content from {}", path.display()))?,
        None => DEFAULT_PORTFOLIO.clone(),
    };
    tracing::info!(name = %portfolio.profile.name, projects = portfolio.projects.len(), "starting folio");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, settings, portfolio, cli.section).await;
    restore_terminal(&mut terminal)?;
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> anyhow::Result<Term> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> anyhow::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run(
    terminal: &mut Term,
    settings: Settings,
    portfolio: Portfolio,
    section: Option<RegionId>,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let tick_every = settings.tick();
    let now = Instant::now();
    let mut app = App::new(settings, portfolio, Rect::new(0, 0, size.width, size.height), now)?;
    if let Some(id) = section {
        app.start_at(id, now);
    }

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(tick_every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| ui::render(f, &app))?;
            dirty = false;
        }

        let wake = app.next_deadline().map(tokio::time::Instant::from_std);
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                dirty |= app.tick(Instant::now());
            }
            _ = sleep_until(wake) => {
                dirty |= app.tick(Instant::now());
            }
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                let now = Instant::now();
                match event.context("reading terminal event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if !app.handle_key(key, now) {
                            shutdown.cancel();
                        }
                    }
                    Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                    Event::Resize(width, height) => app.handle_resize(width, height, now),
                    _ => {}
                }
                dirty = true;
            }
        }
    }

    app.shutdown();
    tracing::info!("bye");
    Ok(())
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
