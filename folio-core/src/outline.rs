//! Outline navigator
//!
//! Presents the heading list as an indented outline and tracks which entry
//! is active. Scrolling the article is left to a [`ScrollSurface`].

use std::fmt;

use crate::block::HeadingEntry;

/// Something that can bring a heading into view.
pub trait ScrollSurface {
    fn scroll_to_anchor(&mut self, anchor: &str);
}

/// Input to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The user picked an outline entry.
    Clicked(String),
    /// The viewport moved so that this heading is now the current section.
    ViewportEntered(String),
}

/// One rendered line of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub anchor: String,
    pub text: String,
    pub level: u8,
    /// Indent units; level 1 has none.
    pub indent: usize,
    pub active: bool,
}

/// Outline plus the active-entry state for one document view.
#[derive(Debug, Clone, Default)]
pub struct OutlineNavigator {
    headings: Vec<HeadingEntry>,
    active: Option<usize>,
    follow_scroll: bool,
}

impl OutlineNavigator {
    pub fn new(headings: Vec<HeadingEntry>) -> Self {
        Self {
            headings,
            active: None,
            follow_scroll: false,
        }
    }

    /// Accept [`NavEvent::ViewportEntered`] events.
    pub fn with_follow_scroll(mut self, follow: bool) -> Self {
        self.follow_scroll = follow;
        self
    }

    pub fn follow_scroll(&self) -> bool {
        self.follow_scroll
    }

    /// Replace the headings for a freshly rendered document. Clears the
    /// active entry.
    pub fn reset(&mut self, headings: Vec<HeadingEntry>) {
        self.headings = headings;
        self.active = None;
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_anchor(&self) -> Option<&str> {
        self.active
            .and_then(|idx| self.headings.get(idx))
            .map(|h| h.anchor.as_str())
    }

    pub fn is_active(&self, anchor: &str) -> bool {
        self.active_anchor() == Some(anchor)
    }

    /// Entries ready for display, indented by level.
    pub fn render(&self) -> Vec<OutlineEntry> {
        self.headings
            .iter()
            .enumerate()
            .map(|(idx, heading)| OutlineEntry {
                anchor: heading.anchor.clone(),
                text: heading.text.clone(),
                level: heading.level,
                indent: usize::from(heading.level.saturating_sub(1)),
                active: self.active == Some(idx),
            })
            .collect()
    }

    /// Make the first entry with `anchor` active and ask `surface` to scroll
    /// to it. Unknown anchors leave the state untouched.
    pub fn activate<S: ScrollSurface + ?Sized>(&mut self, anchor: &str, surface: &mut S) -> bool {
        match self.headings.iter().position(|h| h.anchor == anchor) {
            Some(idx) => self.activate_index(idx, surface),
            None => {
                log::debug!("ignoring activation of unknown anchor {anchor:?}");
                false
            }
        }
    }

    /// Activate the entry at `idx`. Used when the caller already knows the
    /// position, which keeps duplicate anchors distinguishable.
    pub fn activate_index<S: ScrollSurface + ?Sized>(&mut self, idx: usize, surface: &mut S) -> bool {
        let Some(heading) = self.headings.get(idx) else {
            return false;
        };
        log::debug!("activating outline entry {idx} ({})", heading.anchor);
        self.active = Some(idx);
        surface.scroll_to_anchor(&heading.anchor);
        true
    }

    /// Apply an event. Viewport events never scroll; they only move the
    /// highlight, and only when following is enabled.
    pub fn handle<S: ScrollSurface + ?Sized>(&mut self, event: NavEvent, surface: &mut S) -> bool {
        match event {
            NavEvent::Clicked(anchor) => self.activate(&anchor, surface),
            NavEvent::ViewportEntered(anchor) => {
                if !self.follow_scroll {
                    return false;
                }
                match self.headings.iter().position(|h| h.anchor == anchor) {
                    Some(idx) if self.active != Some(idx) => {
                        self.active = Some(idx);
                        true
                    }
                    _ => false,
                }
            }
        }
    }
}

impl fmt::Display for OutlineNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.render() {
            let marker = if entry.active { '>' } else { ' ' };
            writeln!(f, "{marker} {}{}", "  ".repeat(entry.indent), entry.text)?;
        }
        Ok(())
    }
}
