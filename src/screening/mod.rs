//! Symptom self-screening: answer accumulation, triage classification, and guidance.
//!
//! Callers build up [`ScreeningAnswers`] through an [`AnswerAccumulator`] (directly or via
//! a stored session in [`ScreeningService`]) and hand snapshots to the
//! [`SymptomClassifier`]. The resulting [`SymptomGroup`] selects the guidance keys and care
//! directive from a [`GuidanceCatalog`].

pub mod answers;
pub mod classifier;
pub mod domain;
pub mod guidance;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use answers::{
    AnswerAccumulator, AnswerUpdate, AnswerUpdateRequest, RawAnswers, ScreeningAnswers,
};
pub use classifier::{classify, ClassificationOutcome, SymptomClassifier};
pub use domain::{
    AgeRange, AnswerKind, EmergencySymptom, InvalidInput, OtherSymptom, PrimarySymptom,
    ScreeningOption, SecondarySymptom, Symptom, SymptomCategory, SymptomGroup,
    UnderlyingCondition,
};
pub use guidance::{CareDirective, Guidance, GuidanceCatalog, GuidanceNamespace, UnknownNamespace};
pub use repository::{
    InMemorySessionRepository, RepositoryError, ScreeningSessionRecord, SessionId,
    SessionRepository, DEFAULT_SESSION_CAPACITY, DEFAULT_SESSION_TTL_SECS,
};
pub use router::screening_router;
pub use service::{ClassificationView, ScreeningService, ScreeningServiceError, ScreeningView};
