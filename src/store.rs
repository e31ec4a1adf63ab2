//! Report persistence boundary
//!
//! The engine only produces reports; it never reads or writes a store. This
//! trait is the contract a persistence backend implements, with an
//! in-memory implementation for embedding and tests. Reports are append-only
//! from the engine's perspective.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::report::ForensicReport;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Stores a report, optionally filing it under an association key
    /// (e.g. a matter or case identifier).
    async fn put(&self, association: Option<&str>, report: ForensicReport) -> Result<()>;

    async fn get(&self, id: &Uuid) -> Option<ForensicReport>;

    /// Reports filed under the given association key, in insertion order.
    async fn list_by_association(&self, key: &str) -> Vec<ForensicReport>;
}

/// Concurrent in-memory store
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: DashMap<Uuid, ForensicReport>,
    associations: DashMap<String, Vec<Uuid>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn put(&self, association: Option<&str>, report: ForensicReport) -> Result<()> {
        if let Some(key) = association {
            self.associations
                .entry(key.to_string())
                .or_default()
                .push(report.id);
        }
        self.reports.insert(report.id, report);
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Option<ForensicReport> {
        self.reports.get(id).map(|entry| entry.clone())
    }

    async fn list_by_association(&self, key: &str) -> Vec<ForensicReport> {
        let Some(ids) = self.associations.get(key) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.reports.get(id).map(|entry| entry.clone()))
            .collect()
    }
}
