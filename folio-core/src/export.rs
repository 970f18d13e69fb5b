//! Dump parsed content as JSON or plain text.

use anyhow::{Context, Result};

use crate::block::ContentBlock;
use crate::content::Content;
use crate::outline::OutlineNavigator;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// `{"blocks": [...], "headings": [...]}`
pub fn to_json(content: &Content, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(content),
        JsonFormat::Compact => serde_json::to_string(content),
    };
    result.context("JSON serialization error")
}

/// The heading outline, one indented entry per line.
pub fn to_outline_text(content: &Content) -> String {
    OutlineNavigator::new(content.headings.clone()).to_string()
}

/// One summary line per block: index, kind and a short preview.
pub fn to_block_summary(content: &Content) -> String {
    let mut out = String::new();
    for (idx, block) in content.blocks.iter().enumerate() {
        out.push_str(&format!("{idx:>3} {:<9} {}\n", block.kind(), preview(block)));
    }
    out
}

fn preview(block: &ContentBlock) -> String {
    let text = match block {
        ContentBlock::Heading { level, text, anchor } => format!("h{level} {text} #{anchor}"),
        ContentBlock::Image { alt, url } => format!("{alt} <{url}>"),
        ContentBlock::Table { header, rows } => {
            format!("{} columns, {} rows", header.len(), rows.len())
        }
        ContentBlock::List { items, ordered } => {
            let style = if *ordered { "ordered" } else { "bulleted" };
            format!("{} items, {style}", items.len())
        }
        ContentBlock::Rating { rating, qualifier } => match qualifier {
            Some(q) => format!("{rating} | {q}"),
            None => rating.clone(),
        },
        ContentBlock::Pros { items } | ContentBlock::Cons { items } => items.join(", "),
        ContentBlock::Quote { text } | ContentBlock::Paragraph { text } => text.clone(),
    };

    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > 60 {
        let cut: String = first_line.chars().take(59).collect();
        format!("{cut}…")
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::build;

    #[test]
    fn test_to_json_pretty() -> Result<()> {
        let content = build("# Title\n\nBody");
        let json = to_json(&content, JsonFormat::Pretty)?;
        assert!(json.contains("\"blocks\""));
        assert!(json.contains("\"headings\""));
        assert!(json.contains("\"kind\": \"heading\""));
        assert!(json.contains('\n'));
        Ok(())
    }

    #[test]
    fn test_to_json_compact() -> Result<()> {
        let json = to_json(&build("Body"), JsonFormat::Compact)?;
        assert_eq!(
            json,
            r#"{"blocks":[{"kind":"paragraph","text":"Body"}],"headings":[]}"#
        );
        Ok(())
    }

    #[test]
    fn test_outline_text() {
        let content = build("# A\n\n## B\n\n### C");
        assert_eq!(to_outline_text(&content), "  A\n    B\n      C\n");
    }

    #[test]
    fn test_block_summary() {
        let content = build("## Intro\n\n* a\n* b");
        let summary = to_block_summary(&content);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "  0 heading   h2 Intro #intro");
        assert_eq!(lines[1], "  1 list      2 items, bulleted");
    }

    #[test]
    fn test_long_preview_is_cut() {
        let long = "x".repeat(100);
        let summary = to_block_summary(&build(&long));
        assert!(summary.trim_end().ends_with('…'));
    }
}
