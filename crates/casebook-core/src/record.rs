//! The case-study record as stored in the remote `case_studies` table.
//!
//! Field names on the wire are kept exactly as the store exposes them
//! (`cstitle`, `csAuthor`, `readTime`, ...). Legacy camel-case spellings
//! that older rows still carry are accepted through serde aliases.
//!
//! Every field except `id` is optional: a missing or `null` column never
//! fails deserialization.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A raw case study fetched from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyRecord {
    /// Opaque unique identifier. Numeric ids are carried as strings.
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Display title.
    #[serde(
        default,
        rename = "cstitle",
        alias = "csTitle",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Raw body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Pre-rendered markdown body; preferred over `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,

    /// Short listing blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Cover image URL.
    #[serde(default, rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Category label.
    #[serde(
        default,
        rename = "cscategory",
        alias = "csCategory",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    /// Author (usually the quoted client contact).
    #[serde(default, rename = "csAuthor", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Author role / description.
    #[serde(
        default,
        rename = "csauthor_desc",
        alias = "csAuthor_desc",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_desc: Option<String>,

    /// Author profile URL.
    #[serde(
        default,
        rename = "csauthor_profile_url",
        alias = "csAuthor_profile_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_profile_url: Option<String>,

    /// Creation timestamp as stored (RFC 3339 in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Pre-formatted read time, e.g. `"6 min read"`.
    #[serde(default, rename = "readTime", skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,

    /// Read time in whole minutes.
    #[serde(default, rename = "readtime", skip_serializing_if = "Option::is_none")]
    pub read_minutes: Option<u32>,

    /// URL slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Pre-structured challenge text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,

    /// Pre-structured solution text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    /// Pre-structured results text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,

    /// Pre-structured quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,

    /// Ordered tag labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Publication flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    /// Publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl CaseStudyRecord {
    /// Create a record with an id and title; every other field is empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// The display title, or `""`.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// The body text: `markdown_content` when non-empty, else `content`,
    /// else `""`.
    pub fn body(&self) -> &str {
        non_empty(&self.markdown_content)
            .or_else(|| non_empty(&self.content))
            .unwrap_or("")
    }

    /// The category when present and non-blank.
    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    /// The tag list; `null` reads as empty.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Parse `created_at` into a UTC timestamp.
    ///
    /// Accepts RFC 3339 and the zone-less `YYYY-MM-DDTHH:MM:SS[.f]` form,
    /// which is read as UTC.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref()?)
    }
}

/// Returns the trimmed-non-empty contents of an optional field.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Parse a store timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Integer(n)) => n.to_string(),
        Some(RawId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

// ============================================================================
// Tests
// ============================================================================
