//! The read interface over a case-study store.

use std::sync::Arc;

use async_trait::async_trait;

use casebook_core::{CaseStudyRecord, Result};

/// Read-only access to case-study records.
///
/// Implementations must be shareable across tasks; the viewer spawns each
/// fetch on the runtime.
#[async_trait]
pub trait CaseStudySource: Send + Sync {
    /// Fetch exactly one record by id.
    ///
    /// Returns [`casebook_core::Error::NotFound`] when no record has the id.
    async fn fetch_by_id(&self, id: &str) -> Result<CaseStudyRecord>;

    /// Fetch the record whose stored `slug` equals `slug`, if any.
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudyRecord>>;

    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<CaseStudyRecord>>;

    /// Up to `limit` records in `category`, excluding `exclude_id`.
    async fn list_by_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<CaseStudyRecord>>;
}

#[async_trait]
impl<T: CaseStudySource + ?Sized> CaseStudySource for Arc<T> {
    async fn fetch_by_id(&self, id: &str) -> Result<CaseStudyRecord> {
        (**self).fetch_by_id(id).await
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudyRecord>> {
        (**self).fetch_by_slug(slug).await
    }

    async fn list_all(&self) -> Result<Vec<CaseStudyRecord>> {
        (**self).list_all().await
    }

    async fn list_by_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<CaseStudyRecord>> {
        (**self).list_by_category(category, exclude_id, limit).await
    }
}
