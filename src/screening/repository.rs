use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::answers::ScreeningAnswers;
use super::classifier::{ClassificationOutcome, SymptomClassifier};
use super::domain::SymptomGroup;

pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;
pub const DEFAULT_SESSION_TTL_SECS: u32 = 1_800;

/// Identifier wrapper for screening sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored session: the answers so far and the classification they currently yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSessionRecord {
    pub session_id: SessionId,
    pub answers: ScreeningAnswers,
    pub outcome: ClassificationOutcome,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScreeningSessionRecord {
    pub fn new(session_id: SessionId, started_at: DateTime<Utc>) -> Self {
        let answers = ScreeningAnswers::default();
        let outcome = SymptomClassifier.evaluate(&answers);

        Self {
            session_id,
            answers,
            outcome,
            started_at,
            updated_at: started_at,
        }
    }

    pub fn symptom_group(&self) -> SymptomGroup {
        self.outcome.symptom_group
    }

    /// Untouched for longer than `idle_ttl` as of `now`.
    pub fn is_idle(&self, now: DateTime<Utc>, idle_ttl: Duration) -> bool {
        now - self.updated_at > idle_ttl
    }
}

/// Session storage. One session is never shared with another; `modify` must run the
/// change and the write under the same lock so a reader always sees the latest update.
pub trait SessionRepository: Send + Sync {
    fn insert(
        &self,
        record: ScreeningSessionRecord,
    ) -> Result<ScreeningSessionRecord, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<ScreeningSessionRecord>, RepositoryError>;
    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut ScreeningSessionRecord),
    ) -> Result<ScreeningSessionRecord, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<ScreeningSessionRecord, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session capacity of {0} reached")]
    CapacityExceeded(usize),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded session map bounded by a capacity. Sessions idle for longer than
/// `idle_ttl` are evicted when a new session needs room.
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, ScreeningSessionRecord>>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl InMemorySessionRepository {
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limits(
            capacity,
            Duration::seconds(i64::from(DEFAULT_SESSION_TTL_SECS)),
        )
    }

    pub fn with_limits(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            capacity,
            idle_ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<SessionId, ScreeningSessionRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store lock poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(
        &self,
        record: ScreeningSessionRecord,
    ) -> Result<ScreeningSessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        let now = record.started_at;
        guard.retain(|_, existing| !existing.is_idle(now, self.idle_ttl));
        if guard.len() >= self.capacity {
            return Err(RepositoryError::CapacityExceeded(self.capacity));
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ScreeningSessionRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut ScreeningSessionRecord),
    ) -> Result<ScreeningSessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        change(record);
        Ok(record.clone())
    }

    fn remove(&self, id: &SessionId) -> Result<ScreeningSessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}
