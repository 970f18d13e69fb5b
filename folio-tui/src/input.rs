//! Input handling and keybindings

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key press
pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if !matches!(key.code, KeyCode::Modifier(_)) {
        app.clear_status_message();
    }

    if matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    ) {
        app.quit();
        return Action::Quit;
    }

    // Help overlay swallows everything but its own close keys
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return Action::Continue;
    }

    if app.outline_focus && handle_outline_key(app, key) {
        return Action::Continue;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.quit();
            return Action::Quit;
        }
        (KeyCode::Char('?'), _) => app.toggle_help(),

        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.scroll_half_page_down(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.scroll_half_page_up(),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => app.scroll_down(1),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => app.scroll_up(1),
        (KeyCode::PageDown, _) => app.scroll_down(app.view.viewport_height.max(1)),
        (KeyCode::PageUp, _) => app.scroll_up(app.view.viewport_height.max(1)),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => app.scroll_to_top(),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => app.scroll_to_bottom(),

        (KeyCode::Char('t'), _) => app.toggle_outline(),
        (KeyCode::Tab, _) => app.toggle_outline_focus(),
        (KeyCode::Char('M'), _) => app.toggle_theme(),
        (KeyCode::Char('R'), _) => {
            if let Err(e) = app.reload_article() {
                log::warn!("reload failed: {e:#}");
                app.set_status_message(format!("Reload failed: {e}"));
            }
        }
        _ => {}
    }

    Action::Continue
}

/// Keys that mean something different while the outline has focus.
/// Returns false to fall through to the article bindings.
fn handle_outline_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.outline_move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.outline_move_up(),
        KeyCode::Enter => {
            app.activate_selected();
        }
        KeyCode::Esc => app.outline_focus = false,
        _ => return false,
    }
    true
}

/// Handle a mouse event against the layout from the last draw
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Action {
    let MouseEvent { kind, column, row, .. } = mouse;

    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(area) = app.layout.outline {
                if let Some(list_row) = outline_row(area, column, row) {
                    app.outline_focus = true;
                    app.activate_outline_row(list_row);
                    return Action::Continue;
                }
            }
            if contains(app.layout.body, column, row) {
                app.outline_focus = false;
            }
        }
        MouseEventKind::ScrollDown => app.scroll_down(WHEEL_LINES),
        MouseEventKind::ScrollUp => app.scroll_up(WHEEL_LINES),
        _ => {}
    }

    Action::Continue
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Row inside the bordered outline list, if the point hits an entry row.
fn outline_row(area: Rect, x: u16, y: u16) -> Option<usize> {
    if !contains(area, x, y) {
        return None;
    }
    // Skip the border on each side
    let top = area.y + 1;
    let bottom = (area.y + area.height).saturating_sub(1);
    if y < top || y >= bottom {
        return None;
    }
    Some(usize::from(y - top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_row_skips_borders() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(outline_row(area, 5, 0), None);
        assert_eq!(outline_row(area, 5, 1), Some(0));
        assert_eq!(outline_row(area, 5, 8), Some(7));
        assert_eq!(outline_row(area, 5, 9), None);
        assert_eq!(outline_row(area, 25, 3), None);
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(10, 2, 5, 5);
        assert!(contains(area, 10, 2));
        assert!(contains(area, 14, 6));
        assert!(!contains(area, 15, 6));
        assert!(!contains(area, 9, 3));
    }
}
