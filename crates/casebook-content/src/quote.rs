//! Pull-quote extraction.
//!
//! A case study's testimonial is rarely in a dedicated column; it is usually
//! somewhere in the body. Candidates are tried in order and the first match
//! wins:
//!
//! 1. a line opened by a blockquote marker and a quoted string (`> "..."`)
//! 2. the first quoted string after a `## Quote` heading
//! 3. any double-quoted span of at least 20 characters
//!
//! Callers fall back to the record's own `quote` field when none match.

use std::sync::LazyLock;

use regex::Regex;

use crate::markdown::helpers::unescape;

/// Minimum length of a free-standing quoted span to count as a quote.
pub const MIN_QUOTE_SPAN: usize = 20;

static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*>[ \t]*"([^"]+)""#).expect("Invalid blockquote regex")
});

static QUOTE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)##[ \t]*quote\b.*?"([^"]+)""#).expect("Invalid quote heading regex")
});

static LONG_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#""([^"]{{{MIN_QUOTE_SPAN},}})""#)).expect("Invalid quoted span regex")
});

/// Which rule produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    /// `> "..."` line
    Blockquote,
    /// Quoted string under a `## Quote` heading
    QuoteHeading,
    /// Any long quoted span
    QuotedSpan,
}

/// Find the pull-quote in a body, with backslash escapes removed.
///
/// # Example
///
/// ```rust
/// use casebook_content::quote::{QuoteSource, extract_quote};
///
/// let body = "Intro.\n\n> \"They cut our audit time in half.\"\n";
/// let (quote, source) = extract_quote(body).unwrap();
/// assert_eq!(quote, "They cut our audit time in half.");
/// assert_eq!(source, QuoteSource::Blockquote);
/// ```
pub fn extract_quote(body: &str) -> Option<(String, QuoteSource)> {
    let rules: [(&Regex, QuoteSource); 3] = [
        (&BLOCKQUOTE_RE, QuoteSource::Blockquote),
        (&QUOTE_HEADING_RE, QuoteSource::QuoteHeading),
        (&LONG_SPAN_RE, QuoteSource::QuotedSpan),
    ];

    rules.into_iter().find_map(|(re, source)| {
        re.captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| unescape(m.as_str().trim()))
            .filter(|q| !q.is_empty())
            .map(|q| (q, source))
    })
}
