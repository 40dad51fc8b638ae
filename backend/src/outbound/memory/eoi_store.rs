//! In-memory `EoiRepository`.
//!
//! Numbers are handed out sequentially from 1 and never reused, matching a
//! database serial column.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::eoi::{Eoi, EoiId, EoiQuery, EoiStatus, NewEoi};
use crate::domain::ports::{EoiRepository, EoiRepositoryError};

use super::lock;

#[derive(Debug, Default)]
struct EoiTable {
    next_id: i32,
    rows: BTreeMap<i32, Eoi>,
}

/// Applications held in a process-local table.
#[derive(Debug, Default)]
pub struct InMemoryEoiRepository {
    table: Mutex<EoiTable>,
}

impl InMemoryEoiRepository {
    /// Start with no applications.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored applications.
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EoiRepository for InMemoryEoiRepository {
    async fn insert(
        &self,
        eoi: &NewEoi,
        submitted_at: DateTime<Utc>,
    ) -> Result<EoiId, EoiRepositoryError> {
        let mut table = lock(&self.table);
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| EoiRepositoryError::query("eoi number sequence exhausted"))?;
        let id = EoiId::new(table.next_id);
        table
            .rows
            .insert(id.get(), Eoi::from_new(id, eoi.clone(), submitted_at));
        Ok(id)
    }

    async fn list(&self, query: &EoiQuery) -> Result<Vec<Eoi>, EoiRepositoryError> {
        let table = lock(&self.table);
        Ok(query.apply(table.rows.values().cloned()))
    }

    async fn job_references(&self) -> Result<Vec<String>, EoiRepositoryError> {
        let table = lock(&self.table);
        let mut references: Vec<String> = table
            .rows
            .values()
            .map(|eoi| eoi.job_reference.clone())
            .collect();
        references.sort();
        references.dedup();
        Ok(references)
    }

    async fn update_status(
        &self,
        id: EoiId,
        status: EoiStatus,
    ) -> Result<bool, EoiRepositoryError> {
        let mut table = lock(&self.table);
        Ok(table
            .rows
            .get_mut(&id.get())
            .map(|eoi| eoi.status = status)
            .is_some())
    }

    async fn delete(&self, id: EoiId) -> Result<bool, EoiRepositoryError> {
        Ok(lock(&self.table).rows.remove(&id.get()).is_some())
    }

    async fn delete_by_job(&self, job_reference: &str) -> Result<usize, EoiRepositoryError> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|_, eoi| eoi.job_reference != job_reference);
        Ok(before - table.rows.len())
    }
}
