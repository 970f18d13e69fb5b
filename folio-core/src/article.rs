//! Article model: metadata, raw body and its parsed content

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::classify::ParseOptions;
use crate::content::{build_with, Content};
use crate::front_matter::split_front_matter;

/// Body shown when an article has no content of its own.
pub const SAMPLE_ARTICLE: &str = include_str!("../assets/sample_article.md");

/// Descriptive fields from an article's front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub published_date: Option<String>,
}

impl ArticleMeta {
    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or("Anonymous")
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("General")
    }
}

/// An article and the blocks/headings derived from it.
#[derive(Clone, Debug)]
pub struct Article {
    pub path: Option<PathBuf>,
    pub meta: ArticleMeta,
    pub body: String,
    pub content: Content,
    pub options: ParseOptions,
    pub loaded_mtime: Option<SystemTime>,
    pub dirty_on_disk: bool,
    pub rev: u64,
}

impl Article {
    /// Build an article from in-memory text.
    pub fn from_text(text: &str, options: &ParseOptions) -> Result<Self> {
        let (meta, body) = parse_article_text(text)?;
        let content = parse_body(&body, options);

        Ok(Self {
            path: None,
            meta,
            body,
            content,
            options: *options,
            loaded_mtime: None,
            dirty_on_disk: false,
            rev: 1,
        })
    }

    /// The built-in sample article.
    pub fn sample(options: &ParseOptions) -> Self {
        Self {
            path: None,
            meta: ArticleMeta {
                title: Some("Sample article".to_string()),
                ..Default::default()
            },
            body: SAMPLE_ARTICLE.to_string(),
            content: build_with(SAMPLE_ARTICLE, options),
            options: *options,
            loaded_mtime: None,
            dirty_on_disk: false,
            rev: 1,
        }
    }

    /// Load an article from a file path
    pub fn load(path: &Path, options: &ParseOptions) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let text = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;

        let mut article = Self::from_text(&text, options)
            .with_context(|| format!("Failed to parse article: {}", abs_path.display()))?;

        article.loaded_mtime = fs::metadata(&abs_path).and_then(|m| m.modified()).ok();
        log::info!(
            "loaded {} ({} blocks, {} headings)",
            abs_path.display(),
            article.content.blocks.len(),
            article.content.headings.len()
        );
        article.path = Some(abs_path);

        Ok(article)
    }

    /// Re-read the article from disk and re-parse it.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to reload file: {}", path.display()))?;
        let (meta, body) = parse_article_text(&text)
            .with_context(|| format!("Failed to parse article: {}", path.display()))?;

        self.content = parse_body(&body, &self.options);
        self.meta = meta;
        self.body = body;
        self.loaded_mtime = fs::metadata(&path).and_then(|m| m.modified()).ok();
        self.dirty_on_disk = false;
        self.rev += 1;

        Ok(())
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Title for display: front matter title, else the first heading, else
    /// the file name.
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.meta.title {
            return title.clone();
        }
        if let Some(first) = self.content.headings.first() {
            return first.text.clone();
        }
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string()
    }

    /// True when the body was empty and the sample article is shown instead.
    pub fn uses_sample_body(&self) -> bool {
        self.body.trim().is_empty()
    }
}

fn parse_article_text(text: &str) -> Result<(ArticleMeta, String)> {
    let split = split_front_matter(text);
    let meta = match split.front_matter {
        Some(raw) => toml::from_str(raw).context("Invalid article front matter")?,
        None => ArticleMeta::default(),
    };
    Ok((meta, split.body.to_string()))
}

fn parse_body(body: &str, options: &ParseOptions) -> Content {
    if body.trim().is_empty() {
        build_with(SAMPLE_ARTICLE, options)
    } else {
        build_with(body, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_text_without_front_matter() -> Result<()> {
        let article = Article::from_text("# Hello\n\nWorld", &ParseOptions::default())?;
        assert_eq!(article.meta, ArticleMeta::default());
        assert_eq!(article.content.blocks.len(), 2);
        assert_eq!(article.display_title(), "Hello");
        Ok(())
    }

    #[test]
    fn test_front_matter_fields() -> Result<()> {
        let text = "+++\ntitle = \"VR for all\"\nauthor = \"Sam\"\npublished_date = \"2024-05-01\"\n+++\n## Intro\n";
        let article = Article::from_text(text, &ParseOptions::default())?;
        assert_eq!(article.meta.title.as_deref(), Some("VR for all"));
        assert_eq!(article.meta.author_or_default(), "Sam");
        assert_eq!(article.meta.category_or_default(), "General");
        assert_eq!(article.display_title(), "VR for all");
        assert_eq!(article.content.headings[0].anchor, "intro");
        Ok(())
    }

    #[test]
    fn test_invalid_front_matter_is_error() {
        let text = "+++\ntitle = \n+++\nBody";
        assert!(Article::from_text(text, &ParseOptions::default()).is_err());
    }

    #[test]
    fn test_empty_body_uses_sample() -> Result<()> {
        let article = Article::from_text("+++\ntitle = \"Empty\"\n+++\n   \n", &ParseOptions::default())?;
        assert!(article.uses_sample_body());
        assert_eq!(article.content, build_with(SAMPLE_ARTICLE, &ParseOptions::default()));
        Ok(())
    }

    #[test]
    fn test_sample_article_parses() {
        let article = Article::sample(&ParseOptions::default());
        assert_eq!(article.content.blocks.len(), 27);
        assert_eq!(article.content.headings.len(), 10);
        assert_eq!(article.meta.author_or_default(), "Anonymous");
    }

    #[test]
    fn test_load_and_reload() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"# First\n")?;
        file.flush()?;

        let mut article = Article::load(file.path(), &ParseOptions::default())?;
        assert_eq!(article.rev, 1);
        assert_eq!(article.content.headings[0].text, "First");

        file.as_file().set_len(0)?;
        std::fs::write(file.path(), "# Second\n\n## More\n")?;

        article.reload()?;
        assert_eq!(article.rev, 2);
        assert_eq!(article.content.headings.len(), 2);
        assert_eq!(article.content.headings[0].text, "Second");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Article::load(Path::new("/definitely/not/here.md"), &ParseOptions::default());
        assert!(result.is_err());
    }
}
