//! Case-study content extraction.
//!
//! [`CaseStudyContentExtractor`] turns one [`CaseStudyRecord`] into one
//! [`CaseStudyViewModel`]. It is a total function: any record, including an
//! entirely empty one, yields a fully populated view model. Absence in the
//! source degrades to an empty block or a fallback label.
//!
//! Sections are found by an ordered list of [`SectionRule`]s evaluated
//! against the record body. Each rule tries its heading aliases in order,
//! then the record's structured field. When no rule produced anything the
//! whole body is surfaced as [`CaseStudyViewModel::full_body`].
//!
//! # Example
//!
//! ```rust
//! use casebook_content::extract::extract;
//! use casebook_core::CaseStudyRecord;
//!
//! let mut record = CaseStudyRecord::new("cs-1", "Zero Trust Rollout");
//! record.content = Some("## Challenge\nText A\n## Solution\nText B\n## Results\nText C".into());
//!
//! let view = extract(&record);
//! assert_eq!(view.challenge, "Text A");
//! assert_eq!(view.solution, "Text B");
//! assert_eq!(view.results, "Text C");
//! assert_eq!(view.tags, vec!["Case Study"]);
//! assert!(view.full_body.is_empty());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use casebook_core::CaseStudyRecord;
use casebook_core::record::non_empty;

use crate::markdown::helpers::{extract_with_matcher, heading_matcher};
use crate::quote::extract_quote;

/// Tag used when a record has neither tags nor a category.
pub const DEFAULT_TAG: &str = "Case Study";

/// Author name used when a record has none.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

static DEFAULT_EXTRACTOR: LazyLock<CaseStudyContentExtractor> =
    LazyLock::new(CaseStudyContentExtractor::default);

/// Extract a view model with the standard section rules.
pub fn extract(record: &CaseStudyRecord) -> CaseStudyViewModel {
    DEFAULT_EXTRACTOR.extract(record)
}

// ============================================================================
// Section rules
// ============================================================================

/// The three named blocks of a case study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// What the client was up against
    Challenge,
    /// What was built
    Solution,
    /// What changed
    Results,
}

impl SectionKind {
    /// All kinds in display order.
    pub const ALL: [SectionKind; 3] = [Self::Challenge, Self::Solution, Self::Results];

    /// Heading aliases tried in order; the short form wins when both exist.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Challenge => &["Challenge", "The Challenge"],
            Self::Solution => &["Solution", "Our Solution"],
            Self::Results => &["Results", "The Results"],
        }
    }

    /// The record's structured fallback field for this section.
    pub fn field(self, record: &CaseStudyRecord) -> Option<&str> {
        match self {
            Self::Challenge => non_empty(&record.challenge),
            Self::Solution => non_empty(&record.solution),
            Self::Results => non_empty(&record.results),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Challenge => write!(f, "challenge"),
            Self::Solution => write!(f, "solution"),
            Self::Results => write!(f, "results"),
        }
    }
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionMatch {
    /// Found under a heading in the body.
    Heading(String),
    /// Taken from the record's structured field.
    Field(String),
    /// Nothing matched.
    Unmatched,
}

impl SectionMatch {
    /// The matched text, or `""`.
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(text) | Self::Field(text) => text,
            Self::Unmatched => "",
        }
    }

    /// Consume into the matched text, or `""`.
    pub fn into_text(self) -> String {
        match self {
            Self::Heading(text) | Self::Field(text) => text,
            Self::Unmatched => String::new(),
        }
    }

    /// Returns `true` unless [`SectionMatch::Unmatched`].
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// A labelled section with its compiled heading matchers.
#[derive(Debug, Clone)]
pub struct SectionRule {
    kind: SectionKind,
    matchers: Vec<Regex>,
}

impl SectionRule {
    /// Build the rule for a section kind from its standard aliases.
    pub fn new(kind: SectionKind) -> Self {
        Self::with_aliases(kind, kind.aliases())
    }

    /// Build a rule with custom heading aliases, tried in order.
    pub fn with_aliases(kind: SectionKind, aliases: &[&str]) -> Self {
        let matchers = aliases
            .iter()
            .filter_map(|alias| heading_matcher(alias))
            .collect();
        Self { kind, matchers }
    }

    /// The section this rule fills.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Evaluate against a body, falling back to the record's field.
    pub fn evaluate(&self, body: &str, record: &CaseStudyRecord) -> SectionMatch {
        if let Some(text) = self
            .matchers
            .iter()
            .find_map(|m| extract_with_matcher(body, m))
        {
            return SectionMatch::Heading(text);
        }

        match self.kind.field(record) {
            Some(text) => SectionMatch::Field(text.trim().to_string()),
            None => SectionMatch::Unmatched,
        }
    }
}

// ============================================================================
// View model
// ============================================================================

/// Normalized, always-complete structure handed to rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaseStudyViewModel {
    /// Record identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Challenge block, possibly empty
    pub challenge: String,
    /// Solution block, possibly empty
    pub solution: String,
    /// Results block, possibly empty
    pub results: String,
    /// Whole body, set only when no section matched anything
    pub full_body: String,
    /// Pull quote, possibly empty
    pub quote: String,
    /// Tag labels, never empty
    pub tags: Vec<String>,
    /// Author name, `"Anonymous"` when absent
    pub author_name: String,
    /// Author role, possibly empty
    pub author_role: String,
    /// Upper-cased first character of the author name
    pub author_initial: String,
    /// Author profile URL, possibly empty
    pub author_profile_url: String,
}

impl CaseStudyViewModel {
    /// Returns `true` when the body is shown as one undifferentiated block.
    pub fn is_unstructured(&self) -> bool {
        self.challenge.is_empty() && self.solution.is_empty() && self.results.is_empty()
    }

    /// The text for a section kind.
    pub fn section(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Challenge => &self.challenge,
            SectionKind::Solution => &self.solution,
            SectionKind::Results => &self.results,
        }
    }

    /// Returns `true` when a real author is attached to the quote.
    pub fn has_named_author(&self) -> bool {
        self.author_name != ANONYMOUS_AUTHOR
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Best-effort structured extraction from a case-study record.
#[derive(Debug, Clone)]
pub struct CaseStudyContentExtractor {
    rules: Vec<SectionRule>,
}

impl Default for CaseStudyContentExtractor {
    fn default() -> Self {
        Self::with_rules(SectionKind::ALL.into_iter().map(SectionRule::new).collect())
    }
}

impl CaseStudyContentExtractor {
    /// Create an extractor with the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom rule list.
    ///
    /// A kind without a rule always comes out empty.
    pub fn with_rules(rules: Vec<SectionRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule against the record.
    pub fn sections(&self, record: &CaseStudyRecord) -> Vec<(SectionKind, SectionMatch)> {
        let body = record.body();
        self.rules
            .iter()
            .map(|rule| (rule.kind(), rule.evaluate(body, record)))
            .collect()
    }

    /// Transform one record into one view model. Never fails.
    pub fn extract(&self, record: &CaseStudyRecord) -> CaseStudyViewModel {
        let body = record.body();
        let mut view = CaseStudyViewModel {
            id: record.id.clone(),
            title: record.title().to_string(),
            ..CaseStudyViewModel::default()
        };

        let mut matched_any = false;
        for (kind, found) in self.sections(record) {
            matched_any |= found.is_matched();
            let slot = match kind {
                SectionKind::Challenge => &mut view.challenge,
                SectionKind::Solution => &mut view.solution,
                SectionKind::Results => &mut view.results,
            };
            if slot.is_empty() {
                *slot = found.into_text();
            }
        }

        if !matched_any {
            log::debug!(
                "No sections found in case study '{}', showing full body",
                record.id
            );
            view.full_body = body.to_string();
        }

        view.quote = match extract_quote(body) {
            Some((quote, _)) => quote,
            None => non_empty(&record.quote)
                .map(|q| q.trim().to_string())
                .unwrap_or_default(),
        };

        view.tags = resolve_tags(record);

        let author = non_empty(&record.author)
            .map(str::trim)
            .unwrap_or(ANONYMOUS_AUTHOR);
        view.author_name = author.to_string();
        view.author_initial = initial_of(author);
        view.author_role = non_empty(&record.author_desc)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        view.author_profile_url = non_empty(&record.author_profile_url)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        view
    }
}

/// Record tags trimmed, with blank labels dropped.
pub fn record_tags(record: &CaseStudyRecord) -> Vec<String> {
    record
        .tags()
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record tags if any, else the category, else [`DEFAULT_TAG`].
pub fn resolve_tags(record: &CaseStudyRecord) -> Vec<String> {
    let tags = record_tags(record);
    if !tags.is_empty() {
        return tags;
    }

    vec![record.category().unwrap_or(DEFAULT_TAG).trim().to_string()]
}

/// Upper-cased first character of a name.
fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
