//! Block rendering and the render cache

use folio_core::config::ThemeVariant;
use folio_core::{Content, ContentBlock};
use lru::LruCache;
use ratatui::text::{Line, Span};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(n) => n,
    None => unreachable!(),
};

/// Key for render cache
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct RenderKey {
    pub body_hash: u64,
    pub width: u16,
    pub theme: ThemeVariant,
}

impl RenderKey {
    pub fn new(body: &str, width: u16, theme: ThemeVariant) -> Self {
        let mut hasher = DefaultHasher::new();
        body.hash(&mut hasher);
        Self {
            body_hash: hasher.finish(),
            width,
            theme,
        }
    }
}

/// Rendered article body
#[derive(Clone, Debug, Default)]
pub struct RenderedArticle {
    pub lines: Vec<Line<'static>>,
    /// First rendered line of each heading, in outline order.
    pub heading_lines: Vec<usize>,
}

/// LRU cache for rendered articles
pub struct RendererCache {
    cache: LruCache<RenderKey, Arc<RenderedArticle>>,
}

impl RendererCache {
    pub fn new() -> Self {
        Self {
            cache: LruCache::new(CACHE_CAPACITY),
        }
    }

    /// Cached rendering for `key`, rendering with `render` on a miss.
    pub fn get_or_render(
        &mut self,
        key: RenderKey,
        render: impl FnOnce() -> RenderedArticle,
    ) -> Arc<RenderedArticle> {
        self.cache.get_or_insert(key, || Arc::new(render())).clone()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for RendererCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Render every block to styled lines no wider than `width` where wrapping
/// applies. Blocks are separated by one blank line.
pub fn render_content(content: &Content, theme: &Theme, width: u16) -> RenderedArticle {
    let width = usize::from(width.max(8));
    let mut out = RenderedArticle::default();

    for (idx, block) in content.blocks.iter().enumerate() {
        if idx > 0 {
            out.lines.push(Line::default());
        }
        if block.is_heading() {
            out.heading_lines.push(out.lines.len());
        }
        render_block(block, theme, width, &mut out.lines);
    }

    out
}

fn render_block(block: &ContentBlock, theme: &Theme, width: usize, lines: &mut Vec<Line<'static>>) {
    match block {
        ContentBlock::Heading { level, text, .. } => {
            let style = theme.heading_style(*level);
            let marker = "#".repeat(usize::from(*level));
            for line in wrap(&format!("{marker} {text}"), width) {
                lines.push(Line::styled(line, style));
            }
            if *level == 1 {
                let rule = "═".repeat(text.width().min(width.saturating_sub(2)) + 2);
                lines.push(Line::styled(rule, style));
            }
        }
        ContentBlock::Image { alt, url } => {
            let label = if alt.is_empty() {
                "[image]".to_string()
            } else {
                format!("[image: {alt}]")
            };
            lines.push(Line::from(vec![
                Span::styled(label, theme.list_marker),
                Span::raw(" "),
                Span::styled(url.clone(), theme.link),
            ]));
        }
        ContentBlock::Table { header, rows } => render_table(header, rows, theme, lines),
        ContentBlock::List { items, ordered } => {
            for (n, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}. ", n + 1)
                } else {
                    "• ".to_string()
                };
                push_hanging(lines, &marker, theme.list_marker, item, theme.base, width);
            }
        }
        ContentBlock::Rating { rating, qualifier } => {
            let mut spans = vec![Span::styled(format!(" ★ {rating} "), theme.rating)];
            if let Some(q) = qualifier {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!(" {q} "), theme.qualifier));
            }
            lines.push(Line::from(spans));
        }
        ContentBlock::Pros { items } => {
            lines.push(Line::styled("Pros", theme.pros.add_modifier(ratatui::style::Modifier::BOLD)));
            for item in items {
                push_hanging(lines, "✓ ", theme.pros, item, theme.base, width);
            }
        }
        ContentBlock::Cons { items } => {
            lines.push(Line::styled("Cons", theme.cons.add_modifier(ratatui::style::Modifier::BOLD)));
            for item in items {
                push_hanging(lines, "✗ ", theme.cons, item, theme.base, width);
            }
        }
        ContentBlock::Quote { text } => {
            for raw in text.lines() {
                for line in wrap(raw, width.saturating_sub(2)) {
                    lines.push(Line::from(vec![
                        Span::styled("│ ", theme.list_marker),
                        Span::styled(line, theme.quote),
                    ]));
                }
            }
        }
        ContentBlock::Paragraph { text } => {
            for raw in text.lines() {
                for line in wrap(raw, width) {
                    lines.push(Line::styled(line, theme.base));
                }
            }
        }
    }
}

/// `marker` on the first line, continuation lines indented to match.
fn push_hanging(
    lines: &mut Vec<Line<'static>>,
    marker: &str,
    marker_style: ratatui::style::Style,
    text: &str,
    style: ratatui::style::Style,
    width: usize,
) {
    let indent = marker.width();
    for (i, line) in wrap(text, width.saturating_sub(indent)).into_iter().enumerate() {
        let prefix = if i == 0 {
            Span::styled(marker.to_string(), marker_style)
        } else {
            Span::raw(" ".repeat(indent))
        };
        lines.push(Line::from(vec![prefix, Span::styled(line, style)]));
    }
}

fn render_table(header: &[String], rows: &[Vec<String>], theme: &Theme, lines: &mut Vec<Line<'static>>) {
    let columns = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
    if columns == 0 {
        return;
    }

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let row_line = |cells: &[String], style: ratatui::style::Style| {
        let mut spans = Vec::with_capacity(columns * 2);
        for (col, width) in widths.iter().enumerate() {
            if col > 0 {
                spans.push(Span::styled(" │ ", theme.table_border));
            }
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
        }
        Line::from(spans)
    };

    lines.push(row_line(header, theme.table_header));
    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::styled(rule, theme.table_border));
    for row in rows {
        lines.push(row_line(row, theme.base));
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for c in word.chars() {
                let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}
