//! Integration tests for folio-tui
//!
//! These tests drive the application through its key, mouse and draw entry
//! points without a real terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use folio_core::config::ThemeVariant;
use folio_core::{Article, Config, ParseOptions};
use folio_tui::input::{handle_key, handle_mouse, Action};
use folio_tui::{ui, App};
use ratatui::style::{Modifier, Style};
use ratatui::{backend::TestBackend, Terminal};
use std::io::Write as _;
use tempfile::NamedTempFile;

const LONG_ARTICLE: &str = "# Guide\n\nIntro paragraph.\n\n## Setup\n\nFirst.\n\nSecond.\n\nThird.\n\n## Usage\n\nFourth.\n\nFifth.\n\n## Faq\n\nSixth.";

fn create_test_app(content: &str) -> App {
    let article = Article::from_text(content, &ParseOptions::default()).expect("parse article");
    App::new(Config::default(), article)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn draw(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(|frame| ui::draw(frame, app)).expect("draw");
    terminal
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn integration_app_initialization() {
    let app = create_test_app(LONG_ARTICLE);

    assert!(!app.should_quit);
    assert!(!app.show_help);
    assert!(app.show_outline);
    assert_eq!(app.outline.len(), 4);
    assert_eq!(app.outline.active_index(), None);
    assert_eq!(app.view.scroll, 0);
}

#[test]
fn integration_quit_key() {
    let mut app = create_test_app(LONG_ARTICLE);
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Action::Quit);
    assert!(app.should_quit);
}

#[test]
fn integration_scroll_keys() {
    let mut app = create_test_app(LONG_ARTICLE);
    app.relayout(40, 5);

    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Down));
    assert_eq!(app.view.scroll, 2);

    handle_key(&mut app, key(KeyCode::Char('k')));
    assert_eq!(app.view.scroll, 1);

    handle_key(&mut app, key(KeyCode::Char('G')));
    assert_eq!(app.view.scroll, app.view.max_scroll());

    handle_key(&mut app, key(KeyCode::Char('g')));
    assert_eq!(app.view.scroll, 0);
}

#[test]
fn integration_scroll_is_clamped() {
    let mut app = create_test_app(LONG_ARTICLE);
    app.relayout(40, 5);

    app.scroll_up(10);
    assert_eq!(app.view.scroll, 0);

    app.scroll_down(10_000);
    assert_eq!(app.view.scroll, app.view.max_scroll());
}

#[test]
fn integration_outline_activation_scrolls_to_heading() {
    let mut app = create_test_app(LONG_ARTICLE);
    app.relayout(40, 3);

    handle_key(&mut app, key(KeyCode::Tab));
    assert!(app.outline_focus);

    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Char('j')));
    assert_eq!(app.outline_selected, 2);

    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.outline.active_anchor(), Some("usage"));
    let usage_line = app.view.heading_line(2).expect("usage heading line");
    assert_eq!(app.view.scroll, usage_line.min(app.view.max_scroll()));
}

#[test]
fn integration_activate_anchor_single_active() {
    let mut app = create_test_app(LONG_ARTICLE);

    assert!(app.activate_anchor("setup"));
    assert!(app.activate_anchor("faq"));
    let active: Vec<bool> = app.outline.render().iter().map(|e| e.active).collect();
    assert_eq!(active, vec![false, false, false, true]);

    assert!(!app.activate_anchor("missing"));
    assert_eq!(app.outline.active_anchor(), Some("faq"));
}

#[test]
fn integration_scroll_does_not_activate_without_follow() {
    let mut app = create_test_app(LONG_ARTICLE);
    app.relayout(40, 3);

    app.scroll_to_bottom();
    assert_eq!(app.outline.active_index(), None);
}

#[test]
fn integration_follow_scroll_tracks_viewport() {
    let mut config = Config::default();
    config.outline.follow_scroll = true;
    let article = Article::from_text(LONG_ARTICLE, &ParseOptions::default()).expect("parse");
    let mut app = App::new(config, article);
    app.relayout(40, 3);

    app.scroll_to_top();
    assert_eq!(app.outline.active_anchor(), Some("guide"));

    let setup_line = app.view.heading_line(1).expect("setup line");
    app.scroll_down(setup_line);
    assert_eq!(app.outline.active_anchor(), Some("setup"));
}

#[test]
fn integration_toggle_outline_and_theme() {
    let mut app = create_test_app(LONG_ARTICLE);

    handle_key(&mut app, key(KeyCode::Char('t')));
    assert!(!app.show_outline);

    // Focus cannot move to a hidden outline
    handle_key(&mut app, key(KeyCode::Tab));
    assert!(!app.outline_focus);

    handle_key(&mut app, key(KeyCode::Char('M')));
    assert_eq!(app.theme_variant, ThemeVariant::Light);
}

#[test]
fn integration_help_swallows_keys() {
    let mut app = create_test_app(LONG_ARTICLE);

    handle_key(&mut app, key(KeyCode::Char('?')));
    assert!(app.show_help);

    assert_eq!(handle_key(&mut app, key(KeyCode::Char('j'))), Action::Continue);
    assert_eq!(app.view.scroll, 0);

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(!app.show_help);
}

#[test]
fn integration_draw_shows_outline_and_meta() {
    let text = "+++\ntitle = \"Field Notes\"\nauthor = \"Ada\"\n+++\n# Notes\n\nHello there.";
    let article = Article::from_text(text, &ParseOptions::default()).expect("parse");
    let mut app = App::new(Config::default(), article);

    let terminal = draw(&mut app, 80, 20);
    let screen = screen_text(&terminal);

    assert!(screen.contains("Outline"));
    assert!(screen.contains("Field Notes"));
    assert!(screen.contains("By Ada"));
    assert!(screen.contains("General"));
    assert!(screen.contains("Hello there."));
    assert!(app.layout.outline.is_some());
}

#[test]
fn integration_mouse_click_activates_outline_entry() {
    let mut app = create_test_app(LONG_ARTICLE);
    draw(&mut app, 80, 12);

    let area = app.layout.outline.expect("outline drawn");
    // Second entry sits one row below the first, inside the border
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: area.x + 2,
        row: area.y + 2,
        modifiers: KeyModifiers::NONE,
    };
    handle_mouse(&mut app, click);

    assert_eq!(app.outline.active_anchor(), Some("setup"));
    assert!(app.outline_focus);
}

#[test]
fn integration_mouse_wheel_scrolls() {
    let mut app = create_test_app(LONG_ARTICLE);
    draw(&mut app, 80, 8);

    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 50,
        row: 3,
        modifiers: KeyModifiers::NONE,
    };
    handle_mouse(&mut app, wheel);
    assert_eq!(app.view.scroll, 3usize.min(app.view.max_scroll()));
}

#[test]
fn integration_empty_body_shows_sample() {
    let mut app = create_test_app("");
    assert!(app.article.uses_sample_body());
    assert_eq!(app.outline.len(), 10);

    let terminal = draw(&mut app, 100, 30);
    assert!(screen_text(&terminal).contains("Outline"));
}

#[test]
fn integration_reload_resets_outline() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "# One\n\n## Two").expect("write");
    file.flush().expect("flush");

    let mut config = Config::default();
    config.watch.enabled = false;
    let article = Article::load(file.path(), &ParseOptions::default()).expect("load");
    let mut app = App::new(config, article);
    assert!(app.activate_anchor("two"));

    std::fs::write(file.path(), "# One\n\n## Two\n\n## Three").expect("rewrite");
    handle_key(&mut app, key(KeyCode::Char('R')));

    assert_eq!(app.outline.len(), 3);
    assert_eq!(app.outline.active_index(), None);
    assert_eq!(app.article.rev, 2);
    assert!(app.status_message.is_some());
}

fn outline_rows_with_style(terminal: &Terminal<TestBackend>, app: &App, style: Style) -> Vec<u16> {
    let area = app.layout.outline.expect("outline drawn");
    let buffer = terminal.backend().buffer();
    (area.y + 1..area.y + area.height.saturating_sub(1))
        .filter(|&y| {
            let cell = &buffer[(area.x + 1, y)];
            cell.fg == style.fg.unwrap_or_default() && cell.modifier.contains(Modifier::BOLD)
        })
        .collect()
}

#[test]
fn integration_fresh_outline_has_no_active_row() {
    let mut app = create_test_app("# Guide\n\nIntro.\n\n## Setup\n\nText.");
    let terminal = draw(&mut app, 80, 20);

    assert_eq!(app.outline.active_index(), None);
    let active_style = app.theme.outline_active;
    assert!(outline_rows_with_style(&terminal, &app, active_style).is_empty());
}

#[test]
fn integration_scrolling_does_not_highlight_without_follow() {
    let mut app = create_test_app(LONG_ARTICLE);
    draw(&mut app, 80, 8);
    app.scroll_to_bottom();

    let terminal = draw(&mut app, 80, 8);
    let active_style = app.theme.outline_active;
    assert!(outline_rows_with_style(&terminal, &app, active_style).is_empty());
}

#[test]
fn integration_activated_entry_is_drawn_active() {
    let mut app = create_test_app("# Guide\n\nIntro.\n\n## Setup\n\nText.");
    assert!(app.activate_anchor("setup"));

    let terminal = draw(&mut app, 80, 20);
    let area = app.layout.outline.expect("outline drawn");
    let active_style = app.theme.outline_active;
    // Second entry, one row below the first inside the border
    assert_eq!(outline_rows_with_style(&terminal, &app, active_style), vec![area.y + 2]);
}
