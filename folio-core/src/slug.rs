//! Anchor identifiers for headings

/// Turn heading text into a URL-safe anchor.
///
/// Lower-cases the text, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and strips hyphens from both ends.
/// Distinct texts may collide; no uniqueness suffix is added.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World!", "hello-world")]
    #[case("Why This VR Console Is Different", "why-this-vr-console-is-different")]
    #[case("1. Education & Training", "1-education-training")]
    #[case("Pros & Cons Snapshot", "pros-cons-snapshot")]
    #[case("  --Leading and trailing--  ", "leading-and-trailing")]
    #[case("Multiple   Spaces", "multiple-spaces")]
    #[case("Café déjà vu", "caf-d-j-vu")]
    #[case("", "")]
    #[case("!!!", "")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn test_slugify_is_case_insensitive() {
        assert_eq!(slugify("HELLO world"), slugify("hello WORLD"));
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for text in ["Hello World!", "a--b", "Quick Comparison Table", "x_y_z", "Ünïcode"] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_multiline_text_collapses() {
        assert_eq!(slugify("Title\nsecond line"), "title-second-line");
    }
}
