//! Full-screen terminal UI for the query view.
//!
//! The loop owns the [`App`] and is the only place it is mutated. Accepted
//! submits are sent on a spawned task whose outcome comes back through the
//! event channel, so the screen keeps redrawing while a request is out.

pub mod app;
pub mod keys;
pub mod spinner;
pub mod terminal;
pub mod ui;

use anyhow::Result;
use app::App;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ragview_client::{QueryRequest, QueryService};
use ragview_core::config::NoticeConfig;
use std::sync::Arc;
use std::time::Instant;
use terminal::{Event, Tui};
use tokio::sync::mpsc::UnboundedSender;

/// Run the terminal UI until the user quits.
pub async fn run(
    service: Arc<dyn QueryService>,
    notices: NoticeConfig,
    initial_query: Option<String>,
) -> Result<()> {
    let mut app = App::new(notices);
    if let Some(query) = initial_query {
        app.view.query_mut().set(query);
    }

    let mut tui = Tui::new()?;
    tui.enter()?;
    tracing::info!("Terminal UI started against {}", service.endpoint());

    let result = event_loop(&mut tui, &mut app, service).await;

    tui.exit()?;
    tracing::info!("Terminal UI closed");
    result
}

async fn event_loop(tui: &mut Tui, app: &mut App, service: Arc<dyn QueryService>) -> Result<()> {
    let events = tui.sender();
    tui.terminal
        .draw(|frame| ui::draw(frame, app, Instant::now()))?;

    while let Some(event) = tui.next().await {
        let now = Instant::now();
        let request = match event {
            Event::Crossterm(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                app.handle_key(key, now)
            }
            Event::Crossterm(CrosstermEvent::Mouse(mouse)) => app.handle_mouse(mouse, now),
            Event::Crossterm(_) => None,
            Event::Tick => {
                app.tick(now);
                None
            }
            Event::QuerySettled(outcome) => {
                app.settle(outcome, now);
                None
            }
        };

        if let Some(request) = request {
            spawn_query(Arc::clone(&service), request, events.clone());
        }

        if app.should_quit {
            break;
        }

        tui.terminal
            .draw(|frame| ui::draw(frame, app, Instant::now()))?;
    }

    Ok(())
}

/// Send `request` in the background and report the outcome on `events`.
///
/// Overlapping requests are not serialized; whichever settles last is shown.
fn spawn_query(
    service: Arc<dyn QueryService>,
    request: QueryRequest,
    events: UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let outcome = service.query(&request).await;
        if events.send(Event::QuerySettled(outcome)).is_err() {
            tracing::debug!("Query settled after the terminal UI closed");
        }
    });
}
