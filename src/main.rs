//! A terminal portfolio whose content blocks react to scrolling.
//!
//! Run the binary to open the home page, or pass `/about` to start on the
//! About page.  Scroll with the mouse wheel or keys; blocks near the middle
//! of the screen rise and shrink slightly, and every block fades as it
//! scrolls away from where it started.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{next_step, spawn_event_reader, AppEvent, Step},
    handler,
    state::AppState,
};
use crate::core::{route::Route, tracker::SignalHooks};
use crate::ui::{
    nav::NavWidget,
    page_widget::{NameView, PageWidget},
    theme::Theme,
};

/// Frame interval for animations (≈30 fps).
const FRAME: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-reactive terminal portfolio")]
struct Cli {
    /// Page to open: `/` or `/about`.
    #[arg(default_value = "/")]
    route: String,

    /// Dot-grid background: subtle, medium, bold, animated or none.
    #[arg(long)]
    dots: Option<String>,

    /// Virtual pixels per terminal row (scales every scroll effect).
    #[arg(long, value_parser = config::parse_finite)]
    row_px: Option<f64>,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── scroll signal ─────

/// Mouse reporting is the terminal's scroll signal: it is switched on while
/// at least one block listens and off again when the last one leaves.
struct MouseCapture;

impl SignalHooks for MouseCapture {
    fn attach(&mut self) {
        if let Err(err) = execute!(stderr(), EnableMouseCapture) {
            tracing::warn!("cannot enable mouse capture: {err}");
        }
    }

    fn detach(&mut self) {
        if let Err(err) = execute!(stderr(), DisableMouseCapture) {
            tracing::warn!("cannot disable mouse capture: {err}");
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();

    frame.render_widget(
        NavWidget {
            nav: &state.page.nav,
            hovered: state.hovered_nav,
        },
        layout.nav_area,
    );

    if let Some(ref page_layout) = state.page_layout {
        let name = NameView {
            label: state.rotator.label(),
            fading: state.rotator.is_fading(),
        };
        let page = PageWidget::new(
            &state.page,
            page_layout,
            &state.blocks,
            state.scroll.position(),
            name,
        )
        .gradients(&state.gradients, state.hovered_block, state.config.col_px)
        .dots(state.dots, state.config.col_px, state.dot_phase);
        frame.render_widget(page, layout.content_area);
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.status_message {
        Some(ref msg) => msg.clone(),
        None => {
            let max = state
                .page_layout
                .as_ref()
                .map_or(0, |l| l.max_scroll(state.viewport_rows()));
            let pct = if max == 0 {
                100
            } else {
                ((state.scroll.position() / f64::from(max)) * 100.0).round() as u32
            };
            format!(" {} {pct:>3}% | {hint}", state.route)
        }
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let route = Route::from_path(&cli.route)?;
    let mut user_config = config::AppConfig::load();
    if let Some(ref dots) = cli.dots {
        user_config.dot_preset = config::parse_dot_preset(dots)?;
    }
    if let Some(row_px) = cli.row_px {
        user_config.row_px = row_px.clamp(4.0, 64.0);
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // Mounting the first page's blocks attaches the mouse listener.
    let mut state = AppState::new(route, user_config, MouseCapture);
    let size = terminal.size()?;
    state.resize(Rect::new(0, 0, size.width, size.height));

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut ticker = tokio::time::interval(FRAME);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &state))?;
        // Blocks take their one-time measurement once they have been laid
        // out and drawn.
        state.measure_blocks();

        match next_step(&mut events, &mut ticker).await {
            Step::Tick => {
                let now = Instant::now();
                state.tick(now - last_frame);
                last_frame = now;
            }
            Step::Event(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Step::Event(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
            Step::Event(AppEvent::Resize(w, h)) => state.resize(Rect::new(0, 0, w, h)),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    // Dropping the blocks releases the mouse listener.
    state.unmount();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
