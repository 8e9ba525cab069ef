//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Frame
//! ticks come from a separate timer; [`next_step`] checks it before the
//! channel, so a flood of mouse motion cannot hold back a due frame.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::Interval;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// What the main loop should do next.
#[derive(Debug)]
pub enum Step {
    Event(AppEvent),
    /// The frame timer fired.
    Tick,
}

/// Wait for the next frame tick or terminal event, preferring the tick when
/// both are ready.  Once the reader is gone only ticks arrive.
pub async fn next_step(events: &mut mpsc::UnboundedReceiver<AppEvent>, ticker: &mut Interval) -> Step {
    tokio::select! {
        biased;

        _ = ticker.tick() => Step::Tick,
        Some(event) = events.recv() => Step::Event(event),
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  `poll_timeout` bounds how long the reader
/// waits before checking whether the receiver is gone.
pub fn spawn_event_reader(poll_timeout: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // crossterm's poll/read block, so keep them off the async workers.
    tokio::task::spawn_blocking(move || {
        loop {
            if tx.is_closed() {
                break; // receiver dropped
            }
            if !event::poll(poll_timeout).unwrap_or(false) {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            let app_event = match ev {
                // Ignore key-release events on terminals that report them.
                CtEvent::Key(k) if k.kind == KeyEventKind::Release => continue,
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break;
            }
        }
    });

    rx
}
