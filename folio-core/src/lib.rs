//! Folio Core - article parsing, outline navigation, and configuration
//!
//! This crate contains the core logic for folio, independent of terminal UI concerns:
//! - Slug generation for heading anchors
//! - Block classification and content building
//! - Outline navigation with active-heading state
//! - Article model with front matter
//! - Configuration management

pub mod article;
pub mod block;
pub mod classify;
pub mod config;
pub mod content;
pub mod export;
pub mod front_matter;
pub mod outline;
pub mod slug;

// Re-export commonly used types
pub use article::{Article, ArticleMeta};
pub use block::{ContentBlock, HeadingEntry};
pub use classify::{classify, classify_with, BlockRule, MalformedImage, ParseOptions};
pub use config::Config;
pub use content::{build, build_with, Content};
pub use outline::{NavEvent, OutlineEntry, OutlineNavigator, ScrollSurface};
pub use slug::slugify;
