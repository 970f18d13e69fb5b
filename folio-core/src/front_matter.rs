//! Front matter splitting.

/// Fence line that opens and closes a TOML front matter block.
pub const FENCE: &str = "+++";

/// Article text split into its front matter (without fences) and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub front_matter: Option<&'a str>,
    pub body: &'a str,
    /// Number of source lines taken by the front matter, fences included.
    pub lines: usize,
}

/// Separate a leading `+++` fenced block from the article body.
///
/// Without a closing fence the whole text is body.
pub fn split_front_matter(text: &str) -> Split<'_> {
    let no_front_matter = Split {
        front_matter: None,
        body: text,
        lines: 0,
    };

    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return no_front_matter;
    };
    if normalize_line(first) != FENCE {
        return no_front_matter;
    }
    offset += first.len();
    let start = offset;

    for (idx, line) in lines.enumerate() {
        if normalize_line(line) == FENCE {
            return Split {
                front_matter: Some(&text[start..offset]),
                body: &text[offset + line.len()..],
                lines: idx + 2,
            };
        }
        offset += line.len();
    }

    no_front_matter
}

fn normalize_line(line: &str) -> &str {
    line.trim().trim_start_matches('\u{feff}')
}
