use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event for periodic updates (busy indicator animation)
    Tick,
    /// The terminal input stream ended
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;

/// Merges terminal input with a periodic tick
pub struct EventReader {
    stream: EventStream,
    tick: tokio::time::Interval,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            tick,
        }
    }

    /// Wait for the next event worth handling
    pub async fn next(&mut self) -> EventResult<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Ok(Event::Tick),
                maybe_event = self.stream.next() => match maybe_event {
                    // Windows reports key releases too.
                    Some(Ok(TerminalEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Event::Key(key));
                    }
                    Some(Ok(TerminalEvent::Resize(width, height))) => {
                        return Ok(Event::Resize(width, height));
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(Event::Quit),
                },
            }
        }
    }
}
