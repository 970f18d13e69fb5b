//! Content builder: raw article text to blocks and headings

use std::borrow::Cow;

use serde::Serialize;

use crate::block::{ContentBlock, HeadingEntry};
use crate::classify::{classify_with, ParseOptions};

/// Chunks are separated by one blank line.
pub const CHUNK_DELIMITER: &str = "\n\n";

/// Parsed article body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    pub blocks: Vec<ContentBlock>,
    pub headings: Vec<HeadingEntry>,
}

impl Content {
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Heading blocks in document order.
    pub fn heading_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().filter(|block| block.is_heading())
    }
}

/// Parse `document` with the default options.
pub fn build(document: &str) -> Content {
    build_with(document, &ParseOptions::default())
}

/// Parse `document` into blocks and the heading list in one linear pass.
pub fn build_with(document: &str, options: &ParseOptions) -> Content {
    let document = if options.normalize_crlf {
        normalize_newlines(document)
    } else {
        Cow::Borrowed(document)
    };
    let mut content = Content::default();

    for (index, chunk) in chunks(&document).enumerate() {
        match classify_with(chunk, options) {
            Some(block) => {
                if let Some(entry) = block.heading_entry() {
                    content.headings.push(entry);
                }
                content.blocks.push(block);
            }
            None => log::debug!("dropped chunk {index}: {chunk:?}"),
        }
    }

    content
}

/// Non-empty, trimmed chunks in document order.
pub fn chunks(document: &str) -> impl Iterator<Item = &str> {
    document
        .split(CHUNK_DELIMITER)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
}

fn normalize_newlines(document: &str) -> Cow<'_, str> {
    if document.contains('\r') {
        Cow::Owned(document.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(document)
    }
}
