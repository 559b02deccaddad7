//! Listing summaries and filters.
//!
//! A [`CaseStudySummary`] is the listing-row projection of a record, with
//! every display fallback already applied. [`CaseStudyFilter`] narrows a
//! set of summaries the way the listing page's category tabs, search box,
//! tag chips and date-range picker do.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use casebook_core::record::non_empty;
use casebook_core::{CaseStudyRecord, generate_slug};

use crate::extract::{ANONYMOUS_AUTHOR, record_tags};
use crate::markdown::helpers::first_image_url;

/// Category used when a record has none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Category filter value that passes everything.
pub const ALL_CATEGORIES: &str = "All";

/// Shown when `created_at` is missing or unparsable.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Reading speed used for computed read times.
pub const WORDS_PER_MINUTE: usize = 200;

/// Listing-row projection of a [`CaseStudyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStudySummary {
    /// Record identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Listing blurb
    pub excerpt: String,
    /// Cover image URL (may be a placeholder)
    pub cover_image: String,
    /// Category label
    pub category: String,
    /// Author name
    pub author: String,
    /// Author role, possibly empty
    pub author_role: String,
    /// Author profile URL, possibly empty
    pub author_profile_url: String,
    /// `"<Month> <Year>"` or [`UNKNOWN_DATE`]
    pub publish_date: String,
    /// Parsed creation time
    pub created_at: Option<DateTime<Utc>>,
    /// e.g. `"4 min read"`
    pub read_time: String,
    /// URL slug
    pub slug: String,
    /// Tag labels, never empty
    pub tags: Vec<String>,
}

impl CaseStudySummary {
    /// Project a record into a listing row.
    ///
    /// `company` fills the generated excerpt when the record has none.
    ///
    /// # Example
    ///
    /// ```rust
    /// use casebook_content::listing::CaseStudySummary;
    /// use casebook_core::CaseStudyRecord;
    ///
    /// let record = CaseStudyRecord::new("cs-1", "Acme Corp");
    /// let summary = CaseStudySummary::from_record(&record, "Northwind Consulting");
    /// assert_eq!(
    ///     summary.excerpt,
    ///     "Discover how Acme Corp transformed their business with Northwind Consulting."
    /// );
    /// assert_eq!(summary.slug, "acme-corp");
    /// assert_eq!(summary.category, "General");
    /// assert_eq!(summary.read_time, "1 min read");
    /// ```
    pub fn from_record(record: &CaseStudyRecord, company: &str) -> Self {
        let title = record.title().to_string();
        let category = record.category().unwrap_or(DEFAULT_CATEGORY).to_string();

        let excerpt = match non_empty(&record.excerpt) {
            Some(excerpt) => excerpt.to_string(),
            None => format!("Discover how {title} transformed their business with {company}."),
        };

        let slug = match non_empty(&record.slug) {
            Some(slug) => slug.to_string(),
            None => generate_slug(&title),
        };

        let mut tags = record_tags(record);
        if tags.is_empty() {
            tags.push(category.clone());
        }

        let created_at = record.created_at();

        Self {
            id: record.id.clone(),
            excerpt,
            cover_image: cover_image(record),
            author: non_empty(&record.author)
                .unwrap_or(ANONYMOUS_AUTHOR)
                .to_string(),
            author_role: non_empty(&record.author_desc).unwrap_or("").to_string(),
            author_profile_url: non_empty(&record.author_profile_url)
                .unwrap_or("")
                .to_string(),
            publish_date: created_at
                .map(|dt| dt.format("%B %Y").to_string())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            created_at,
            read_time: read_time(record),
            slug,
            tags,
            category,
            title,
        }
    }
}

/// Pre-formatted `readTime`, else `readtime` minutes, else computed from
/// the raw content.
pub fn read_time(record: &CaseStudyRecord) -> String {
    if let Some(formatted) = non_empty(&record.read_time) {
        return formatted.to_string();
    }
    if let Some(minutes) = record.read_minutes.filter(|m| *m > 0) {
        return format!("{minutes} min read");
    }
    estimate_read_time(record.content.as_deref().unwrap_or(""))
}

/// `max(1, ceil(words / 200))` minutes.
pub fn estimate_read_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// `coverImage`, else the first image in the body, else a placeholder.
pub fn cover_image(record: &CaseStudyRecord) -> String {
    if let Some(url) = non_empty(&record.cover_image) {
        return url.to_string();
    }
    if let Some(url) = first_image_url(record.body()) {
        return url;
    }
    let text = match record.title() {
        "" => "Case Study",
        title => title,
    };
    format!(
        "/api/placeholder/800/400?text={}",
        urlencoding::encode(text)
    )
}

// ============================================================================
// Filtering
// ============================================================================

/// Listing filter; the default passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseStudyFilter {
    /// Exact category, or `None`/`"All"` for every category
    pub category: Option<String>,
    /// Case-insensitive substring over title, excerpt, author, category
    pub search: Option<String>,
    /// Keep entries carrying any of these tags
    pub tags: Vec<String>,
    /// Keep entries created within this many days
    pub within_days: Option<u32>,
}

impl CaseStudyFilter {
    /// Returns `true` if the summary passes every active criterion.
    pub fn matches(&self, summary: &CaseStudySummary, now: DateTime<Utc>) -> bool {
        if let Some(category) = self.category.as_deref()
            && category != ALL_CATEGORIES
            && summary.category != category
        {
            return false;
        }

        if let Some(query) = self.search.as_deref().map(str::trim)
            && !query.is_empty()
        {
            let query = query.to_lowercase();
            let hit = [
                &summary.title,
                &summary.excerpt,
                &summary.author,
                &summary.category,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|t| summary.tags.contains(t)) {
            return false;
        }

        // A range reaching past the earliest representable date has no cutoff
        if let Some(cutoff) = self
            .within_days
            .and_then(|days| Duration::try_days(i64::from(days)))
            .and_then(|range| now.checked_sub_signed(range))
        {
            match summary.created_at {
                Some(created) if created > cutoff => {}
                _ => return false,
            }
        }

        true
    }
}

/// Apply a filter and sort newest first. Undated entries sort last.
pub fn filter_summaries(
    summaries: &[CaseStudySummary],
    filter: &CaseStudyFilter,
    now: DateTime<Utc>,
) -> Vec<CaseStudySummary> {
    let mut result: Vec<CaseStudySummary> = summaries
        .iter()
        .filter(|s| filter.matches(s, now))
        .cloned()
        .collect();
    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    result
}

/// Unique categories in first-seen order.
pub fn available_categories(summaries: &[CaseStudySummary]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for summary in summaries {
        if !categories.contains(&summary.category) {
            categories.push(summary.category.clone());
        }
    }
    categories
}

// ============================================================================
// Tests
// ============================================================================
