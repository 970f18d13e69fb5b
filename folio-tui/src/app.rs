//! Application state

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use folio_core::config::ThemeVariant;
use folio_core::{Article, Config, NavEvent, OutlineNavigator, ScrollSurface};
use ratatui::layout::Rect;

use crate::render::{render_content, RenderKey, RenderedArticle, RendererCache};
use crate::theme::Theme;

#[cfg(feature = "watch")]
use crate::watcher::ArticleWatcher;

/// Width used for layout before the first frame is drawn.
const INITIAL_WIDTH: u16 = 80;
const INITIAL_HEIGHT: usize = 24;

/// Scroll position of the article pane and where its headings sit.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub scroll: usize,
    pub viewport_height: usize,
    pub total_lines: usize,
    heading_lines: Vec<usize>,
    anchor_lines: HashMap<String, usize>,
}

impl ViewState {
    fn set_layout(&mut self, rendered: &RenderedArticle, anchors: &[String]) {
        self.total_lines = rendered.lines.len();
        self.heading_lines = rendered.heading_lines.clone();
        self.anchor_lines.clear();
        for (anchor, line) in anchors.iter().zip(&rendered.heading_lines) {
            // First heading wins for duplicate anchors
            self.anchor_lines.entry(anchor.clone()).or_insert(*line);
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height.max(1))
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn heading_line(&self, idx: usize) -> Option<usize> {
        self.heading_lines.get(idx).copied()
    }

    /// Index of the last heading at or above the top of the viewport.
    pub fn current_heading(&self) -> Option<usize> {
        self.heading_lines
            .iter()
            .rposition(|&line| line <= self.scroll)
    }
}

impl ScrollSurface for ViewState {
    fn scroll_to_anchor(&mut self, anchor: &str) {
        if let Some(&line) = self.anchor_lines.get(anchor) {
            self.scroll = line.min(self.max_scroll());
        }
    }
}

/// Screen areas from the last draw, used for mouse hit testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutInfo {
    pub outline: Option<Rect>,
    pub body: Rect,
    pub outline_offset: usize,
}

/// Main application state
pub struct App {
    pub config: Config,
    pub article: Article,
    pub outline: OutlineNavigator,
    pub view: ViewState,
    pub theme: Theme,
    pub theme_variant: ThemeVariant,
    pub show_outline: bool,
    pub outline_focus: bool,
    pub outline_selected: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub layout: LayoutInfo,
    pub rendered: Arc<RenderedArticle>,
    render_cache: RendererCache,
    render_width: u16,
    #[cfg(feature = "watch")]
    pub watcher: Option<ArticleWatcher>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, article: Article) -> Self {
        let theme_variant = config.theme;
        let outline = OutlineNavigator::new(article.content.headings.clone())
            .with_follow_scroll(config.outline.follow_scroll);

        #[cfg(feature = "watch")]
        let watcher = match (&article.path, config.watch.enabled) {
            (Some(path), true) => match ArticleWatcher::new(path) {
                Ok(w) => Some(w),
                Err(e) => {
                    log::warn!("file watching disabled: {e:#}");
                    None
                }
            },
            _ => None,
        };

        let mut app = Self {
            show_outline: config.outline.enabled,
            config,
            article,
            outline,
            view: ViewState {
                viewport_height: INITIAL_HEIGHT,
                ..Default::default()
            },
            theme: Theme::for_variant(theme_variant),
            theme_variant,
            outline_focus: false,
            outline_selected: 0,
            show_help: false,
            should_quit: false,
            status_message: None,
            layout: LayoutInfo::default(),
            rendered: Arc::new(RenderedArticle::default()),
            render_cache: RendererCache::new(),
            render_width: 0,
            #[cfg(feature = "watch")]
            watcher,
        };
        app.relayout(INITIAL_WIDTH, INITIAL_HEIGHT);
        app
    }

    /// Re-render for the given body size if anything changed.
    pub fn relayout(&mut self, width: u16, height: usize) {
        self.view.viewport_height = height.max(1);
        let key = RenderKey::new(&self.article.body, width, self.theme_variant);
        let content = &self.article.content;
        let theme = &self.theme;
        let rendered = self
            .render_cache
            .get_or_render(key, || render_content(content, theme, width));

        if self.render_width != width || !Arc::ptr_eq(&rendered, &self.rendered) {
            let anchors: Vec<String> = content.headings.iter().map(|h| h.anchor.clone()).collect();
            self.view.set_layout(&rendered, &anchors);
            self.rendered = rendered;
            self.render_width = width;
        }
        self.view.scroll = self.view.scroll.min(self.view.max_scroll());
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_outline(&mut self) {
        self.show_outline = !self.show_outline;
        if !self.show_outline {
            self.outline_focus = false;
        }
    }

    /// Move keyboard focus between the article and the outline.
    pub fn toggle_outline_focus(&mut self) {
        if !self.show_outline || self.outline.is_empty() {
            self.outline_focus = false;
            return;
        }
        self.outline_focus = !self.outline_focus;
        if self.outline_focus {
            self.outline_selected = self
                .outline
                .active_index()
                .or_else(|| self.view.current_heading())
                .unwrap_or(0);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_variant = self.theme_variant.toggled();
        self.theme = Theme::for_variant(self.theme_variant);
        let (width, height) = (self.render_width, self.view.viewport_height);
        self.relayout(width, height);
    }

    pub fn outline_move_down(&mut self) {
        if self.outline_selected + 1 < self.outline.len() {
            self.outline_selected += 1;
        }
    }

    pub fn outline_move_up(&mut self) {
        self.outline_selected = self.outline_selected.saturating_sub(1);
    }

    /// Activate the selected outline entry and scroll the article to it.
    pub fn activate_selected(&mut self) -> bool {
        self.outline.activate_index(self.outline_selected, &mut self.view)
    }

    /// Activate the outline entry shown on screen row `row` of the outline
    /// list (0 = first visible entry).
    pub fn activate_outline_row(&mut self, row: usize) -> bool {
        let idx = self.layout.outline_offset + row;
        if idx >= self.outline.len() {
            return false;
        }
        self.outline_selected = idx;
        self.outline.activate_index(idx, &mut self.view)
    }

    /// Activate a heading by anchor.
    pub fn activate_anchor(&mut self, anchor: &str) -> bool {
        let activated = self.outline.activate(anchor, &mut self.view);
        if let Some(idx) = self.outline.active_index() {
            self.outline_selected = idx;
        }
        activated
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.view.scroll_down(lines);
        self.sync_outline_to_viewport();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.view.scroll_up(lines);
        self.sync_outline_to_viewport();
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_down((self.view.viewport_height / 2).max(1));
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_up((self.view.viewport_height / 2).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.view.scroll = 0;
        self.sync_outline_to_viewport();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.view.scroll = self.view.max_scroll();
        self.sync_outline_to_viewport();
    }

    /// Feed the heading under the top of the viewport to the outline.
    fn sync_outline_to_viewport(&mut self) {
        if !self.outline.follow_scroll() {
            return;
        }
        let Some(idx) = self.view.current_heading() else {
            return;
        };
        let Some(anchor) = self.outline.headings().get(idx).map(|h| h.anchor.clone()) else {
            return;
        };
        self.outline.handle(NavEvent::ViewportEntered(anchor), &mut self.view);
    }

    /// Re-read the article from disk, re-parse, and reset the outline.
    pub fn reload_article(&mut self) -> Result<()> {
        self.article.reload()?;
        self.outline.reset(self.article.content.headings.clone());
        self.outline_selected = 0;
        let (width, height) = (self.render_width, self.view.viewport_height);
        self.relayout(width, height);
        self.set_status_message(format!("Reloaded (rev {})", self.article.rev));
        Ok(())
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }
}
