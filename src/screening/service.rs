use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::answers::{
    AnswerAccumulator, AnswerUpdate, AnswerUpdateRequest, RawAnswers, ScreeningAnswers,
};
use super::classifier::{ClassificationOutcome, SymptomClassifier};
use super::domain::{InvalidInput, SymptomGroup};
use super::guidance::{Guidance, GuidanceCatalog, GuidanceNamespace};
use super::repository::{RepositoryError, ScreeningSessionRecord, SessionId, SessionRepository};

/// Service composing session storage, the classifier, and the guidance catalog.
pub struct ScreeningService<R> {
    repository: Arc<R>,
    classifier: SymptomClassifier,
    guidance: GuidanceCatalog,
}

/// Random v4 ids; one session id must not reveal another.
fn next_session_id() -> SessionId {
    SessionId(format!("screening-{}", Uuid::new_v4()))
}

impl<R> ScreeningService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, namespace: GuidanceNamespace) -> Self {
        Self {
            repository,
            classifier: SymptomClassifier::new(),
            guidance: GuidanceCatalog::new(namespace),
        }
    }

    pub fn guidance(&self) -> &GuidanceCatalog {
        &self.guidance
    }

    /// Open an empty session.
    pub fn start(&self) -> Result<ScreeningView, ScreeningServiceError> {
        let record = ScreeningSessionRecord::new(next_session_id(), Utc::now());
        let stored = self.repository.insert(record)?;
        info!(session_id = %stored.session_id, "screening session started");
        Ok(self.view(&stored))
    }

    /// Apply one update and reclassify before the stored record is released.
    pub fn apply(
        &self,
        session_id: &SessionId,
        update: AnswerUpdate,
    ) -> Result<ScreeningView, ScreeningServiceError> {
        let classifier = self.classifier;
        let mut change = |record: &mut ScreeningSessionRecord| {
            let mut accumulator =
                AnswerAccumulator::from_answers(std::mem::take(&mut record.answers));
            accumulator.apply(update);
            record.answers = accumulator.into_answers();
            record.outcome = classifier.evaluate(&record.answers);
            record.updated_at = Utc::now();
        };

        let record = self.repository.modify(session_id, &mut change)?;
        debug!(
            session_id = %record.session_id,
            ?update,
            symptom_group = %record.symptom_group(),
            "screening answers updated"
        );
        Ok(self.view(&record))
    }

    /// Validate an untyped update, then apply it. Rejected input leaves the session unchanged.
    pub fn apply_request(
        &self,
        session_id: &SessionId,
        request: &AnswerUpdateRequest,
    ) -> Result<ScreeningView, ScreeningServiceError> {
        let update = AnswerUpdate::try_from(request).map_err(|error| {
            warn!(%session_id, %error, "rejected screening answer");
            error
        })?;
        self.apply(session_id, update)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<ScreeningView, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(self.view(&record))
    }

    /// Restart the session with no answers.
    pub fn reset(&self, session_id: &SessionId) -> Result<ScreeningView, ScreeningServiceError> {
        let view = self.apply(session_id, AnswerUpdate::Clear)?;
        info!(%session_id, "screening session reset");
        Ok(view)
    }

    /// Discard the session and its answers.
    pub fn end(&self, session_id: &SessionId) -> Result<(), ScreeningServiceError> {
        let record = self.repository.remove(session_id)?;
        info!(
            %session_id,
            symptom_group = %record.symptom_group(),
            "screening session ended"
        );
        Ok(())
    }

    /// Classify a snapshot without touching any session.
    pub fn classify(&self, answers: &ScreeningAnswers) -> ClassificationView {
        let outcome = self.classifier.evaluate(answers);
        self.classification_view(outcome)
    }

    pub fn classify_raw(
        &self,
        raw: RawAnswers,
    ) -> Result<ClassificationView, ScreeningServiceError> {
        let answers = ScreeningAnswers::try_from(raw).map_err(|error| {
            warn!(%error, "rejected answers for classification");
            error
        })?;
        Ok(self.classify(&answers))
    }

    fn view(&self, record: &ScreeningSessionRecord) -> ScreeningView {
        ScreeningView {
            session_id: record.session_id.clone(),
            answers: record.answers.clone(),
            symptom_group: record.outcome.symptom_group,
            rationale: record.outcome.rationale.clone(),
            guidance: self.guidance.guidance_for(record.outcome.symptom_group),
        }
    }

    fn classification_view(&self, outcome: ClassificationOutcome) -> ClassificationView {
        ClassificationView {
            symptom_group: outcome.symptom_group,
            guidance: self.guidance.guidance_for(outcome.symptom_group),
            rationale: outcome.rationale,
        }
    }
}

/// Session state exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningView {
    pub session_id: SessionId,
    pub answers: ScreeningAnswers,
    pub symptom_group: SymptomGroup,
    pub rationale: String,
    pub guidance: Guidance,
}

/// Result of a stateless classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationView {
    pub symptom_group: SymptomGroup,
    pub rationale: String,
    pub guidance: Guidance,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
