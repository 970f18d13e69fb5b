//! Content blocks produced by the classifier

use serde::Serialize;

/// One classified, renderable unit of an article body.
///
/// Every non-empty chunk of the source text maps to at most one block.
/// Blocks carry no identity beyond their position in the output sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// `#`, `##` or `###` heading. `level` is always 1, 2 or 3.
    Heading {
        level: u8,
        text: String,
        anchor: String,
    },
    /// `![alt](url)`
    Image { alt: String, url: String },
    /// Pipe table. Row widths are not checked against the header.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Bulleted (`* `) or numbered (`1. `) list.
    List { items: Vec<String>, ordered: bool },
    /// `Rating: 4.5/5 | Editor's choice`
    Rating {
        rating: String,
        qualifier: Option<String>,
    },
    /// `**Pros:** a, b, c`
    Pros { items: Vec<String> },
    /// `**Cons:** a, b, c`
    Cons { items: Vec<String> },
    /// `> quoted text`
    Quote { text: String },
    /// Anything else, passed through verbatim.
    Paragraph { text: String },
}

impl ContentBlock {
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Image { .. } => "image",
            ContentBlock::Table { .. } => "table",
            ContentBlock::List { .. } => "list",
            ContentBlock::Rating { .. } => "rating",
            ContentBlock::Pros { .. } => "pros",
            ContentBlock::Cons { .. } => "cons",
            ContentBlock::Quote { .. } => "quote",
            ContentBlock::Paragraph { .. } => "paragraph",
        }
    }

    /// The outline entry for this block, if it is a heading.
    pub fn heading_entry(&self) -> Option<HeadingEntry> {
        match self {
            ContentBlock::Heading {
                level,
                text,
                anchor,
            } => Some(HeadingEntry {
                anchor: anchor.clone(),
                text: text.clone(),
                level: *level,
            }),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading { .. })
    }
}

/// A heading as seen by the outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub anchor: String,
    pub text: String,
    pub level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_entry_from_heading() {
        let block = ContentBlock::Heading {
            level: 2,
            text: "Getting Started".to_string(),
            anchor: "getting-started".to_string(),
        };
        assert_eq!(
            block.heading_entry(),
            Some(HeadingEntry {
                anchor: "getting-started".to_string(),
                text: "Getting Started".to_string(),
                level: 2,
            })
        );
        assert!(block.is_heading());
    }

    #[test]
    fn test_non_heading_has_no_entry() {
        let block = ContentBlock::Quote {
            text: "hi".to_string(),
        };
        assert_eq!(block.heading_entry(), None);
        assert_eq!(block.kind(), "quote");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let block = ContentBlock::Pros {
            items: vec!["Fast".to_string()],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"kind":"pros","items":["Fast"]}"#);
    }
}
