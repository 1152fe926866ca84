use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::domain::{Leader, LeaderSlug, ProfileSection};
use super::evaluation::ScoreBreakdown;

/// Repository record: the leader plus the most recent evaluation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub leader: Leader,
    pub evaluation: Option<ScoreBreakdown>,
    pub evaluations_received: u32,
}

impl LeaderRecord {
    pub fn new(leader: Leader) -> Self {
        Self {
            leader,
            evaluation: None,
            evaluations_received: 0,
        }
    }

    /// Sanitized published view of the leader's accountability attributes.
    pub fn accountability_view(&self) -> AccountabilityView {
        AccountabilityView {
            slug: self.leader.slug.clone(),
            full_name: self.leader.full_name.clone(),
            office_held: self.leader.office_held.clone(),
            accountability_score: self.leader.accountability_score,
            completion_percent: self.leader.completion_percent(),
            completion_status: self.leader.completion_status.clone(),
            disputed_fields: self.leader.disputed_fields.clone(),
            evaluations_received: self.evaluations_received,
        }
    }
}

/// What citizens see for a tracked leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountabilityView {
    pub slug: LeaderSlug,
    pub full_name: String,
    pub office_held: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountability_score: Option<f64>,
    pub completion_percent: u8,
    pub completion_status: BTreeMap<ProfileSection, bool>,
    pub disputed_fields: BTreeSet<String>,
    pub evaluations_received: u32,
}

/// Storage abstraction so the service module can be exercised in
/// isolation; durable persistence lives outside this crate.
pub trait LeaderRepository: Send + Sync {
    fn insert(&self, record: LeaderRecord) -> Result<LeaderRecord, RepositoryError>;
    fn update(&self, record: LeaderRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, slug: &LeaderSlug) -> Result<Option<LeaderRecord>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<LeaderRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("leader already registered")]
    Conflict,
    #[error("leader not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded map store backing the demo binary and tests.
#[derive(Default, Clone)]
pub struct InMemoryLeaderRepository {
    records: Arc<Mutex<HashMap<LeaderSlug, LeaderRecord>>>,
}

impl LeaderRepository for InMemoryLeaderRepository {
    fn insert(&self, record: LeaderRecord) -> Result<LeaderRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.leader.slug) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.leader.slug.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeaderRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.leader.slug) {
            guard.insert(record.leader.slug.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, slug: &LeaderSlug) -> Result<Option<LeaderRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(slug).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<LeaderRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<LeaderRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.leader.slug.cmp(&b.leader.slug));
        records.truncate(limit);
        Ok(records)
    }
}
