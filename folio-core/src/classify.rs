//! Block classifier
//!
//! A chunk is tried against [`BlockRule::ORDER`] top to bottom and the first
//! rule whose predicate matches decides the block. A chunk starting with `#`
//! is therefore always a heading, even when it also contains `|`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::block::ContentBlock;
use crate::slug::slugify;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image pattern"));

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("valid numbered list pattern"));

static DELIMITER_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?(\s*:?-+:?\s*\|)*\s*:?-+:?\s*\|?$").expect("valid delimiter pattern")
});

const PROS_MARKER: &str = "**Pros:**";
const CONS_MARKER: &str = "**Cons:**";

/// What to do with a chunk that starts with `![` but is not a valid image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedImage {
    /// Produce no block at all.
    #[default]
    Drop,
    /// Keep the chunk as a plain paragraph.
    Paragraph,
}

/// Knobs that alter classification. The defaults give the reference behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub malformed_images: MalformedImage,
    /// Drop `|---|---|` alignment rows from table bodies.
    pub skip_delimiter_rows: bool,
    /// Turn `\r\n` into `\n` before splitting into chunks.
    pub normalize_crlf: bool,
}

/// One entry of the ordered rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    Heading1,
    Heading2,
    Heading3,
    Image,
    Table,
    List,
    Rating,
    Pros,
    Cons,
    Quote,
    Paragraph,
}

impl BlockRule {
    /// Evaluation order. `Paragraph` always matches, so the table is total.
    pub const ORDER: [BlockRule; 11] = [
        BlockRule::Heading1,
        BlockRule::Heading2,
        BlockRule::Heading3,
        BlockRule::Image,
        BlockRule::Table,
        BlockRule::List,
        BlockRule::Rating,
        BlockRule::Pros,
        BlockRule::Cons,
        BlockRule::Quote,
        BlockRule::Paragraph,
    ];

    /// The first rule that claims `chunk`.
    pub fn for_chunk(chunk: &str) -> BlockRule {
        Self::ORDER
            .into_iter()
            .find(|rule| rule.matches(chunk))
            .unwrap_or(BlockRule::Paragraph)
    }

    /// Predicate half of the rule.
    pub fn matches(self, chunk: &str) -> bool {
        match self {
            BlockRule::Heading1 => chunk.starts_with("# "),
            BlockRule::Heading2 => chunk.starts_with("## "),
            BlockRule::Heading3 => chunk.starts_with("### "),
            BlockRule::Image => chunk.starts_with("!["),
            BlockRule::Table => chunk.contains('|') && non_blank_lines(chunk).nth(1).is_some(),
            BlockRule::List => chunk.lines().any(|line| list_item(line).is_some()),
            BlockRule::Rating => chunk.contains("Rating:") && chunk.contains("/5"),
            BlockRule::Pros => chunk.starts_with(PROS_MARKER),
            BlockRule::Cons => chunk.starts_with(CONS_MARKER),
            BlockRule::Quote => chunk.starts_with('>'),
            BlockRule::Paragraph => true,
        }
    }

    /// Extractor half of the rule. `None` means the chunk is dropped.
    pub fn extract(self, chunk: &str, options: &ParseOptions) -> Option<ContentBlock> {
        let block = match self {
            BlockRule::Heading1 => prefixed(chunk, "# ", |rest| heading(1, rest)),
            BlockRule::Heading2 => prefixed(chunk, "## ", |rest| heading(2, rest)),
            BlockRule::Heading3 => prefixed(chunk, "### ", |rest| heading(3, rest)),
            BlockRule::Image => match IMAGE_RE.captures(chunk) {
                Some(caps) => ContentBlock::Image {
                    alt: caps[1].to_string(),
                    url: caps[2].to_string(),
                },
                None => match options.malformed_images {
                    MalformedImage::Drop => return None,
                    MalformedImage::Paragraph => paragraph(chunk),
                },
            },
            BlockRule::Table => table(chunk, options),
            BlockRule::List => list(chunk),
            BlockRule::Rating => {
                let mut parts = chunk.split('|');
                let rating = parts.next().unwrap_or_default().trim().to_string();
                let qualifier = parts
                    .next()
                    .map(str::trim)
                    .filter(|q| !q.is_empty())
                    .map(str::to_string);
                ContentBlock::Rating { rating, qualifier }
            }
            BlockRule::Pros => prefixed(chunk, PROS_MARKER, |rest| ContentBlock::Pros {
                items: comma_items(rest),
            }),
            BlockRule::Cons => prefixed(chunk, CONS_MARKER, |rest| ContentBlock::Cons {
                items: comma_items(rest),
            }),
            BlockRule::Quote => prefixed(chunk, ">", |rest| ContentBlock::Quote {
                text: rest.trim().to_string(),
            }),
            BlockRule::Paragraph => paragraph(chunk),
        };
        Some(block)
    }
}

/// Classify a single trimmed, non-empty chunk with default options.
pub fn classify(chunk: &str) -> Option<ContentBlock> {
    classify_with(chunk, &ParseOptions::default())
}

/// Classify a single trimmed, non-empty chunk.
pub fn classify_with(chunk: &str, options: &ParseOptions) -> Option<ContentBlock> {
    BlockRule::for_chunk(chunk).extract(chunk, options)
}

fn heading(level: u8, rest: &str) -> ContentBlock {
    let text = rest.trim().to_string();
    let anchor = slugify(&text);
    ContentBlock::Heading {
        level,
        text,
        anchor,
    }
}

/// Build from the text after `marker`. A chunk without the marker was not
/// claimed by the rule and stays a paragraph.
fn prefixed(chunk: &str, marker: &str, build: impl FnOnce(&str) -> ContentBlock) -> ContentBlock {
    match chunk.strip_prefix(marker) {
        Some(rest) => build(rest),
        None => paragraph(chunk),
    }
}

fn paragraph(chunk: &str) -> ContentBlock {
    ContentBlock::Paragraph {
        text: chunk.to_string(),
    }
}

fn non_blank_lines(chunk: &str) -> impl Iterator<Item = &str> {
    chunk.lines().filter(|line| !line.trim().is_empty())
}

fn table(chunk: &str, options: &ParseOptions) -> ContentBlock {
    let mut lines = non_blank_lines(chunk);
    let header = lines.next().map(table_cells).unwrap_or_default();
    let rows = lines
        .filter(|line| !(options.skip_delimiter_rows && DELIMITER_ROW_RE.is_match(line.trim())))
        .map(table_cells)
        .collect();
    ContentBlock::Table { header, rows }
}

/// Cells of one table line. The first and last `|` segments are split
/// artifacts and are always discarded.
fn table_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() <= 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Item text and whether the marker was numbered.
fn list_item(line: &str) -> Option<(&str, bool)> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("* ") {
        return Some((rest.trim_start(), false));
    }
    NUMBERED_RE
        .find(line)
        .map(|marker| (line[marker.end()..].trim_start(), true))
}

fn list(chunk: &str) -> ContentBlock {
    let mut items = Vec::new();
    let mut ordered = true;
    for (item, numbered) in chunk.lines().filter_map(list_item) {
        ordered &= numbered;
        items.push(item.to_string());
    }
    ContentBlock::List { items, ordered }
}

fn comma_items(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
