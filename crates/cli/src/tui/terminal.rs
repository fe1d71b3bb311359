//! Terminal setup, teardown and the event pump.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ragview_client::QueryResponse;
use ragview_core::AppResult;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{self, Duration},
};

/// Ticks per second, drives the spinner and notice expiry.
const TICK_RATE: f64 = 10.0;

#[derive(Debug)]
pub enum Event {
    /// Key, mouse or resize event from crossterm
    Crossterm(CrosstermEvent),
    Tick,
    /// A spawned query finished
    QuerySettled(AppResult<QueryResponse>),
}

pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    task: JoinHandle<()>,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    entered: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = {
            let event_tx = event_tx.clone();
            let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE);

            tokio::spawn(async move {
                let mut reader = EventStream::new();
                let mut tick_interval = time::interval(tick_duration);

                loop {
                    tokio::select! {
                        maybe_event = reader.next() => {
                            match maybe_event {
                                Some(Ok(evt)) => {
                                    if event_tx.send(Event::Crossterm(evt)).is_err() {
                                        break;
                                    }
                                }
                                Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                                None => break,
                            }
                        }
                        _ = tick_interval.tick() => {
                            if event_tx.send(Event::Tick).is_err() {
                                break;
                            }
                        }
                    }
                }
            })
        };

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            task,
            event_rx,
            event_tx,
            entered: false,
        })
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        // From here on, exit() must undo whatever did succeed
        self.entered = true;
        io::stdout().execute(EnterAlternateScreen)?;
        io::stdout().execute(EnableMouseCapture)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave the alternate screen and disable raw mode
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        // Every step runs even if an earlier one failed
        first_error([
            self.terminal.show_cursor(),
            io::stdout().execute(DisableMouseCapture).map(|_| ()),
            io::stdout().execute(LeaveAlternateScreen).map(|_| ()),
            disable_raw_mode(),
        ])?;
        Ok(())
    }

    /// Sender for events produced outside the terminal, such as query results.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.task.abort();
        let _ = self.exit();
    }
}
