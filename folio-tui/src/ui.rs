//! UI rendering

use crate::app::App;
use folio_core::config::{OutlineSide, ThemeVariant};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the info header above the article body.
const HEADER_ROWS: u16 = 2;

const HELP_LINES: &[(&str, &str)] = &[
    ("j / k, ↓ / ↑", "Scroll one line"),
    ("Ctrl-d / Ctrl-u", "Scroll half a page"),
    ("g / G", "Top / bottom"),
    ("t", "Toggle outline"),
    ("Tab", "Focus outline"),
    ("Enter", "Jump to selected heading"),
    ("M", "Toggle theme"),
    ("R", "Reload article"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Outline + article
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let article_area = if app.show_outline {
        let width = app.config.outline.width;
        let (constraints, outline_idx, article_idx) = match app.config.outline.side {
            OutlineSide::Left => ([Constraint::Length(width), Constraint::Min(1)], 0, 1),
            OutlineSide::Right => ([Constraint::Min(1), Constraint::Length(width)], 1, 0),
        };
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(chunks[0]);

        render_outline(frame, app, main[outline_idx]);
        main[article_idx]
    } else {
        app.layout.outline = None;
        chunks[0]
    };

    render_article(frame, app, article_area);
    render_status_bar(frame, app, chunks[1]);

    if app.show_help {
        render_help(frame, app);
    }
}

fn render_article(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.outline_focus {
        app.theme.outline_border
    } else {
        app.theme.focus_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", app.article.display_title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_ROWS), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(info_header(app, rows[0].width)), rows[0]);

    let body = rows[1];
    app.layout.body = body;
    app.relayout(body.width, usize::from(body.height));

    let start = app.view.scroll;
    let end = (start + usize::from(body.height)).min(app.rendered.lines.len());
    let visible: Vec<Line> = app.rendered.lines[start.min(end)..end].to_vec();
    frame.render_widget(Paragraph::new(visible).style(app.theme.base), body);
}

/// Author, date and category line with a dim rule under it.
fn info_header(app: &App, width: u16) -> Vec<Line<'static>> {
    let meta = &app.article.meta;
    let mut spans = vec![Span::styled(
        format!("By {}", meta.author_or_default()),
        app.theme.meta.add_modifier(Modifier::BOLD),
    )];
    if let Some(date) = &meta.published_date {
        spans.push(Span::styled(format!(" · {date}"), app.theme.meta));
    }
    spans.push(Span::styled(
        format!(" · {}", meta.category_or_default()),
        app.theme.meta,
    ));
    if let Some(url) = &meta.image_url {
        spans.push(Span::styled("  ", app.theme.meta));
        spans.push(Span::styled(url.clone(), app.theme.link));
    }

    vec![
        Line::from(spans),
        Line::styled("─".repeat(usize::from(width)), app.theme.table_border),
    ]
}

fn render_outline(frame: &mut Frame, app: &mut App, area: Rect) {
    let highlighted = app.outline.active_index();
    let visible_rows = usize::from(area.height.saturating_sub(2));

    // Keep the selection in view while focused, otherwise the highlighted entry
    let anchor_row = if app.outline_focus {
        Some(app.outline_selected)
    } else {
        highlighted
    };
    let mut offset = app.layout.outline_offset;
    if let Some(row) = anchor_row {
        if row < offset {
            offset = row;
        } else if visible_rows > 0 && row >= offset + visible_rows {
            offset = row + 1 - visible_rows;
        }
    }
    offset = offset.min(app.outline.len().saturating_sub(1));
    app.layout.outline = Some(area);
    app.layout.outline_offset = offset;

    let lines: Vec<Line> = app
        .outline
        .render()
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(idx, entry)| {
            let text = format!("{}{}", "  ".repeat(entry.indent), entry.text);
            let style = if app.outline_focus && idx == app.outline_selected {
                app.theme.outline_selected
            } else if Some(idx) == highlighted {
                app.theme.outline_active
            } else {
                app.theme.base
            };
            Line::styled(text, style)
        })
        .collect();

    let (title, border) = if app.outline_focus {
        ("Outline [focused]", app.theme.focus_border)
    } else {
        ("Outline", app.theme.outline_border)
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .style(app.theme.base);

    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let source = match &app.article.path {
        Some(path) => path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string(),
        None => "sample".to_string(),
    };

    let total = app.view.total_lines.max(1);
    let percent = if app.view.max_scroll() == 0 {
        100
    } else {
        app.view.scroll * 100 / app.view.max_scroll()
    };

    let outline_indicator = match (app.show_outline, app.outline_focus) {
        (true, true) => " [OUTLINE*]",
        (true, false) => " [OUTLINE]",
        (false, _) => "",
    };

    let theme_str = match app.theme_variant {
        ThemeVariant::Dark => "DARK",
        ThemeVariant::Light => "LIGHT",
    };

    #[cfg(feature = "watch")]
    let watch_str = if app.watcher.is_some() {
        if app.article.dirty_on_disk {
            "  [DIRTY]"
        } else {
            "  [WATCH]"
        }
    } else {
        ""
    };
    #[cfg(not(feature = "watch"))]
    let watch_str = "";

    let status_text = match &app.status_message {
        Some(message) => format!(" folio  {source}  {message}"),
        None => format!(
            " folio  {}  {} blocks  {} headings  {} lines  {}%{}  [{}]{}",
            source,
            app.article.content.blocks.len(),
            app.outline.len(),
            total,
            percent,
            outline_indicator,
            theme_str,
            watch_str
        ),
    };

    let status = Paragraph::new(Line::from(vec![Span::styled(
        status_text,
        Style::default()
            .fg(app.theme.status_bar_fg)
            .bg(app.theme.status_bar_bg)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(app.theme.status_bar_bg));

    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame, app: &App) {
    let width = 44u16.min(frame.area().width);
    let height = (HELP_LINES.len() as u16 + 2).min(frame.area().height);
    let area = centered(frame.area(), width, height);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<17}"), app.theme.table_header),
                Span::styled(*what, app.theme.base),
            ])
        })
        .collect();

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.focus_border))
                .title("Help"),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: outer.x + outer.width.saturating_sub(width) / 2,
        y: outer.y + outer.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
