//! Detail-page lookup.
//!
//! A detail page is addressed by a URL key that may be a stored slug, a
//! record id, or a slug generated from the title of a record that has no
//! stored slug. [`resolve_detail`] tries them in that order.

use serde::Serialize;

use casebook_client::CaseStudySource;
use casebook_content::listing::{self, CaseStudySummary};
use casebook_content::markdown::strip_images;
use casebook_content::{CaseStudyViewModel, KeyMetric, extract, extract_key_metrics};
use casebook_core::{CaseStudyRecord, Error, Result, generate_slug};

/// Related case studies shown under a detail page.
pub const RELATED_LIMIT: usize = 3;

/// Everything the detail page shows for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// The resolved record
    pub record: CaseStudyRecord,
    /// Extracted sections with images removed
    pub view: CaseStudyViewModel,
    /// e.g. `"5 min read"`
    pub read_time: String,
    /// Headline figures from the metrics section
    pub metrics: Vec<KeyMetric>,
    /// Other case studies in the same category
    pub related: Vec<CaseStudySummary>,
}

impl DetailView {
    /// Build the page for a record with its related summaries.
    pub fn new(record: CaseStudyRecord, related: Vec<CaseStudySummary>) -> Self {
        let body = record.body();
        let mut view = extract(&record);
        for block in [
            &mut view.challenge,
            &mut view.solution,
            &mut view.results,
            &mut view.full_body,
        ] {
            if !block.is_empty() {
                *block = strip_images(block);
            }
        }

        let read_time = match (
            casebook_core::record::non_empty(&record.read_time),
            record.read_minutes.filter(|m| *m > 0),
        ) {
            (Some(formatted), _) => formatted.to_string(),
            (None, Some(minutes)) => format!("{minutes} min read"),
            (None, None) => listing::estimate_read_time(body),
        };

        Self {
            metrics: extract_key_metrics(body),
            read_time,
            view,
            related,
            record,
        }
    }
}

/// Find the record a detail URL key refers to.
///
/// Tries the stored slug, then the id, then the slug generated from each
/// record's title. Only the last step lists the whole table.
pub async fn resolve_detail<S>(source: &S, key: &str) -> Result<CaseStudyRecord>
where
    S: CaseStudySource + ?Sized,
{
    if let Some(record) = source.fetch_by_slug(key).await? {
        return Ok(record);
    }

    match source.fetch_by_id(key).await {
        Ok(record) => return Ok(record),
        Err(e) if e.is_not_found() => {}
        // Typed id columns reject slugs; fall through to the title scan
        Err(e) => log::debug!("Id lookup for '{key}' failed: {e}"),
    }

    source
        .list_all()
        .await?
        .into_iter()
        .find(|r| generate_slug(r.title()) == key)
        .ok_or_else(|| Error::not_found(key))
}

/// Up to `limit` other case studies in the record's category.
///
/// Records without a category have no related entries.
pub async fn related<S>(
    source: &S,
    record: &CaseStudyRecord,
    limit: usize,
) -> Result<Vec<CaseStudyRecord>>
where
    S: CaseStudySource + ?Sized,
{
    match record.category() {
        Some(category) => source.list_by_category(category, &record.id, limit).await,
        None => Ok(Vec::new()),
    }
}

/// Resolve a key and assemble its [`DetailView`].
///
/// A failure loading related entries is logged and leaves the list empty.
pub async fn load_detail<S>(source: &S, key: &str, company: &str) -> Result<DetailView>
where
    S: CaseStudySource + ?Sized,
{
    let record = resolve_detail(source, key).await?;

    let related = match related(source, &record, RELATED_LIMIT).await {
        Ok(records) => records
            .iter()
            .map(|r| CaseStudySummary::from_record(r, company))
            .collect(),
        Err(e) => {
            log::warn!("Error fetching related case studies: {e}");
            Vec::new()
        }
    };

    Ok(DetailView::new(record, related))
}

// ============================================================================
// Tests
// ============================================================================
