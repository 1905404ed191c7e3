use super::App;
use crate::event_handler::EventHandler;
use helpai_core::QueryResolution;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};
use tokio::sync::mpsc;

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
        crossterm::event::EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    terminal.clear()?;
    app.draw(&mut terminal)?;

    let cancel = app.cancel_token.clone();
    let mut resolutions = app.take_resolutions();

    while !app.should_exit {
        let tui_poll = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            EventHandler::read()
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("event loop cancelled");
                app.should_exit = true;
            }
            maybe_event = tui_poll => {
                match maybe_event {
                    Some(event) => {
                        app.handle_event(event);
                        app.draw(&mut terminal)?;
                    }
                    None if app.widget().is_loading() => {
                        app.tick();
                        app.draw(&mut terminal)?;
                    }
                    None => {}
                }
            }
            maybe_resolution = next_resolution(&mut resolutions) => {
                match maybe_resolution {
                    Some(resolution) => {
                        app.handle_resolution(resolution);
                        app.draw(&mut terminal)?;
                    }
                    None => resolutions = None,
                }
            }
        }
    }

    app.cancel_token.cancel();

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;

    Ok(())
}

async fn next_resolution(rx: &mut Option<mpsc::UnboundedReceiver<QueryResolution>>) -> Option<QueryResolution> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn restore_terminal() {
    let backend = CrosstermBackend::new(std::io::stdout());
    if let Ok(mut terminal) = Terminal::new(backend) {
        let _ = terminal.show_cursor();
    }
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    );
}
