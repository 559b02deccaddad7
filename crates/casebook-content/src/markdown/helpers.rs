//! Content extraction helper utilities.
//!
//! Case-study bodies are semi-structured markdown written by hand or
//! converted from DOCX uploads. These helpers pull named blocks and images
//! out of them with regex heuristics; none of them fail, they return
//! `None` or the input unchanged when nothing matches.
//!
//! # Key Functions
//!
//! - [`extract_section`]: Get the text under a `## Name` heading
//! - [`first_image_url`]: URL of the first markdown image
//! - [`strip_images`]: Remove images and link definitions from a body
//! - [`unescape`]: Drop markdown backslash escapes
//!
//! # Example
//!
//! ```rust
//! use casebook_content::markdown::helpers::extract_section;
//!
//! let content = "## Challenge\nLegacy VPN.\n## Solution\nZero trust.";
//!
//! assert_eq!(extract_section(content, "Challenge").as_deref(), Some("Legacy VPN."));
//! assert_eq!(extract_section(content, "Solution").as_deref(), Some("Zero trust."));
//! assert!(extract_section(content, "Results").is_none());
//! ```

use std::sync::LazyLock;

use regex::Regex;

static NEXT_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*##[ \t]").expect("Invalid next-section regex"));

static MARKDOWN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid image regex"));

static HTML_IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img[^>]*>").expect("Invalid img tag regex"));

static LINK_DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]:\s*[^\s]+").expect("Invalid link definition regex")
});

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("Invalid blank-run regex"));

static ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(.)").expect("Invalid escape regex"));

/// Build the matcher for a `## <name>` heading line.
///
/// The name is matched case-insensitively and must end on a word boundary,
/// so `Challenge` matches `## Challenge:` but not `## Challenges`.
pub fn heading_matcher(name: &str) -> Option<Regex> {
    let name = name.trim();
    let boundary = if name.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let pattern = format!(
        r"(?im)^[ \t]*##[ \t]+{}{boundary}[^\n]*",
        regex::escape(name)
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Unusable section name {name:?}: {e}");
            None
        }
    }
}

/// Extract the block under a heading using a prebuilt matcher.
///
/// Captures everything after the first matching heading line up to the
/// next `## ` line or the end of the text, trimmed. An empty capture is
/// reported as `None`.
pub fn extract_with_matcher(content: &str, heading: &Regex) -> Option<String> {
    let found = heading.find(content)?;
    let rest = &content[found.end()..];

    let block = match NEXT_SECTION_RE.find(rest) {
        Some(next) => &rest[..next.start()],
        None => rest,
    };

    let block = block.trim();
    if block.is_empty() {
        None
    } else {
        Some(block.to_string())
    }
}

/// Extract the text under the first `## <name>` heading.
///
/// # Arguments
///
/// * `content` - Markdown content to search
/// * `name` - The heading text to find (without the `##` prefix)
///
/// # Returns
///
/// The trimmed block, or `None` when the heading is missing or has no
/// text under it.
///
/// # Example
///
/// ```rust
/// use casebook_content::markdown::helpers::extract_section;
///
/// let content = "## The Results\n\n40% fewer incidents.\n\n### Detail\n\nMore.\n\n## Next\n";
/// let results = extract_section(content, "the results").unwrap();
/// assert!(results.starts_with("40% fewer incidents."));
/// assert!(results.contains("### Detail"));
/// assert!(!results.contains("Next"));
/// ```
pub fn extract_section(content: &str, name: &str) -> Option<String> {
    let heading = heading_matcher(name)?;
    extract_with_matcher(content, &heading)
}

/// Return the URL of the first markdown image (`![alt](url)`).
///
/// # Example
///
/// ```rust
/// use casebook_content::markdown::helpers::first_image_url;
///
/// let body = "Intro\n\n![logo](https://cdn.example.com/logo.png)\n";
/// assert_eq!(first_image_url(body).as_deref(), Some("https://cdn.example.com/logo.png"));
/// ```
pub fn first_image_url(content: &str) -> Option<String> {
    MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Remove images from markdown content.
///
/// Strips markdown images, HTML `<img>` tags and reference-style link
/// definitions (`[label]: url`), then collapses the blank-line runs left
/// behind.
pub fn strip_images(content: &str) -> String {
    let cleaned = MARKDOWN_IMAGE_RE.replace_all(content, "");
    let cleaned = HTML_IMG_RE.replace_all(&cleaned, "");
    let cleaned = LINK_DEFINITION_RE.replace_all(&cleaned, "");
    let cleaned = BLANK_RUN_RE.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}

/// Drop backslash escapes: `\"` becomes `"`, `\*` becomes `*`.
pub fn unescape(text: &str) -> String {
    ESCAPE_RE.replace_all(text, "$1").into_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // extract_section tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_section_basic() {
        let content = "## Challenge\nText A\n## Solution\nText B\n## Results\nText C";
        assert_eq!(extract_section(content, "Challenge").as_deref(), Some("Text A"));
        assert_eq!(extract_section(content, "Solution").as_deref(), Some("Text B"));
        assert_eq!(extract_section(content, "Results").as_deref(), Some("Text C"));
    }

    #[test]
    fn test_extract_section_case_insensitive() {
        let content = "## THE CHALLENGE\n\nOutdated tooling.\n";
        assert_eq!(
            extract_section(content, "The Challenge").as_deref(),
            Some("Outdated tooling.")
        );
    }

    #[test]
    fn test_extract_section_word_boundary() {
        let content = "## Challenges Ahead\n\nNot this one.\n";
        assert!(extract_section(content, "Challenge").is_none());
    }

    #[test]
    fn test_extract_section_heading_suffix_dropped() {
        let content = "## Results: Year One\n\nRevenue doubled.\n";
        assert_eq!(
            extract_section(content, "Results").as_deref(),
            Some("Revenue doubled.")
        );
    }

    #[test]
    fn test_extract_section_keeps_subsections() {
        let content = "## Solution\n\nPhase one.\n\n### Tooling\n\nTerraform.\n\n## Results\n\nDone.";
        let solution = extract_section(content, "Solution").unwrap();
        assert!(solution.contains("Phase one."));
        assert!(solution.contains("### Tooling"));
        assert!(solution.contains("Terraform."));
        assert!(!solution.contains("Done."));
    }

    #[test]
    fn test_extract_section_not_line_anchored_mid_text() {
        let content = "Intro mentions ## Challenge inline.\n";
        assert!(extract_section(content, "Challenge").is_none());
    }

    #[test]
    fn test_extract_section_empty_block_is_none() {
        let content = "## Challenge\n\n## Solution\nText";
        assert!(extract_section(content, "Challenge").is_none());
    }

    #[test]
    fn test_extract_section_first_occurrence_wins() {
        let content = "## Results\nFirst\n## Challenge\nC\n## Results\nSecond";
        assert_eq!(extract_section(content, "Results").as_deref(), Some("First"));
    }

    #[test]
    fn test_extract_section_crlf() {
        let content = "## Challenge\r\nWindows text\r\n## Solution\r\nMore";
        assert_eq!(
            extract_section(content, "Challenge").as_deref(),
            Some("Windows text")
        );
    }

    #[test]
    fn test_extract_section_special_characters_escaped() {
        let content = "## Q&A (FAQ)\nAnswers";
        assert_eq!(extract_section(content, "Q&A (FAQ)").as_deref(), Some("Answers"));
    }

    // ------------------------------------------------------------------------
    // image helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_first_image_url() {
        let body = "![a](one.png) text ![b](two.png)";
        assert_eq!(first_image_url(body).as_deref(), Some("one.png"));
    }

    #[test]
    fn test_first_image_url_none() {
        assert!(first_image_url("no images [link](x.html)").is_none());
    }

    #[test]
    fn test_strip_images_all_forms() {
        let body = "Intro\n\n![logo](a.png)\n\n<img src=\"b.png\" alt=\"x\">\n\n\n\n[ref]: https://x.test/c.png\n\nOutro";
        let cleaned = strip_images(body);
        assert!(!cleaned.contains("a.png"));
        assert!(!cleaned.contains("<img"));
        assert!(!cleaned.contains("c.png"));
        assert!(cleaned.starts_with("Intro"));
        assert!(cleaned.ends_with("Outro"));
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn test_strip_images_keeps_links() {
        let body = "See [the report](https://x.test/report).";
        assert_eq!(strip_images(body), body);
    }

    // ------------------------------------------------------------------------
    // unescape tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"It\'s \*great\*"), "It's *great*");
        assert_eq!(unescape("plain"), "plain");
    }
}
