mod action;
mod app;
mod catalog;
mod config;
mod error;
mod gacha;
mod layout;
mod loader;
mod ticker;
mod ui;
mod ui_state;

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use action::{Action, AppEvent};
use app::App;
use config::{Config, Invocation, USAGE};
use ui::draw;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let config = match Config::from_args(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    init_logging(&config)?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("chat-gacha requires a terminal (TTY)");
    }

    // Restore the terminal before a panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_gacha=info")))
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let size = terminal.size()?;
    let mut frames = tokio::time::interval(config.frame_interval());
    let mut app = App::new(config, tx, (size.width, size.height));

    tracing::info!(source = %app.config.themes, "session started");
    app.spawn_load();

    let mut events = EventStream::new();

    while app.running {
        terminal.draw(|frame| draw(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(action) = Action::from_key(key) {
                        app.handle_action(action);
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    app.handle_action(Action::Resize(width, height));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("terminal event error: {}", e);
                    break;
                }
                None => break,
            },
            Some(event) = rx.recv() => app.handle_event(event),
            _ = frames.tick() => app.tick(),
        }
    }

    app.shutdown();
    tracing::info!("session ended");
    Ok(())
}
