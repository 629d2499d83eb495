use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use firewall_console::config::{Overrides, Settings};
use firewall_console::source::{Backend, DemoBackend, HttpBackend};
use firewall_console::ui::{self, Theme};
use firewall_console::{events, logging, App};

/// How long one frame waits for input.
const FRAME_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "firewall-console")]
#[command(about = "Terminal console for monitoring firewall traffic, logs and threats")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (e.g. http://127.0.0.1:8000)
    #[arg(short, long, conflicts_with = "demo")]
    url: Option<String>,

    /// Refresh interval (e.g. "5s", "500ms")
    #[arg(short, long)]
    interval: Option<String>,

    /// Run against an in-process demo backend
    #[arg(long)]
    demo: bool,

    /// Write diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep a fixed refresh cadence even when fetches fail
    #[arg(long)]
    no_backoff: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        url: args.url,
        interval: args.interval,
        demo: args.demo,
        log_file: args.log_file,
        no_backoff: args.no_backoff,
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;

    logging::init_file_logging(&settings.log.file, &settings.log.level)?;

    // Requests run on the runtime; the TUI keeps the main thread
    let runtime = tokio::runtime::Runtime::new()?;

    let backend: Arc<dyn Backend> = if settings.backend.demo {
        Arc::new(DemoBackend::new())
    } else {
        Arc::new(HttpBackend::new(&settings.backend.url)?)
    };
    tracing::info!(
        backend = backend.description(),
        interval = ?settings.polling.interval,
        backoff = settings.polling.backoff,
        "starting console"
    );

    let app = App::new(backend, runtime.handle().clone(), settings.app_options())
        .with_theme(Theme::auto_detect());

    let result = run_tui(app);

    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}

/// Run the TUI until the operator quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Start due fetches and fold in whatever has completed
        app.tick(Instant::now());
        app.pump();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(FRAME_POLL)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    events::handle_mouse_event(app, mouse, ui::CONTENT_START_ROW)
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    tracing::info!("console closed");
    Ok(())
}
