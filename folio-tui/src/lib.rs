//! Folio TUI - terminal reader for folio articles
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state management
//! - Event loop and input handling
//! - Rendering (article blocks, outline, status bar)
//! - Theme system

pub mod app;
pub mod input;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod ui;

#[cfg(feature = "watch")]
pub mod watcher;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use std::time::Duration;

// Re-export main types
pub use app::App;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(100)).context("Failed to poll events")? {
            match crossterm::event::read().context("Failed to read event")? {
                // Only handle key press events, ignore release
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse);
                }
                _ => {}
            }
        }

        #[cfg(feature = "watch")]
        check_watcher(app);
    }

    Ok(())
}

#[cfg(feature = "watch")]
fn check_watcher(app: &mut App) {
    let changed = match app.watcher.as_mut() {
        Some(watcher) => watcher.settled_change(watcher::DEBOUNCE),
        None => false,
    };
    if !changed {
        return;
    }

    if app.config.watch.auto_reload {
        if let Err(e) = app.reload_article() {
            log::warn!("failed to reload article: {e:#}");
            app.set_status_message(format!("Reload failed: {e}"));
        }
    } else {
        app.article.dirty_on_disk = true;
        app.set_status_message("Changed on disk, press R to reload");
    }
}
