//! In-memory case-study source.

use std::path::Path;

use async_trait::async_trait;

use casebook_core::{CaseStudyRecord, Error, Result};

use crate::source::CaseStudySource;

/// A fixed set of records served without I/O.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<CaseStudyRecord>,
}

impl MemorySource {
    /// Create a source over the given records.
    pub fn new(records: Vec<CaseStudyRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records, as the store returns them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CaseStudyRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Load a JSON array of records from a file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path))?;
        let source = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded {} case studies from {}",
            source.records.len(),
            path.display()
        );
        Ok(source)
    }

    /// The records, in insertion order.
    pub fn records(&self) -> &[CaseStudyRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CaseStudySource for MemorySource {
    async fn fetch_by_id(&self, id: &str) -> Result<CaseStudyRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CaseStudyRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<CaseStudyRecord>> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(records)
    }

    async fn list_by_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<CaseStudyRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.category.as_deref() == Some(category) && r.id != exclude_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
