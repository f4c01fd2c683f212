use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::screening::answers::{AnswerAccumulator, ScreeningAnswers};
use crate::screening::domain::{AgeRange, Symptom, UnderlyingCondition};
use crate::screening::guidance::GuidanceNamespace;
use crate::screening::repository::{
    InMemorySessionRepository, RepositoryError, ScreeningSessionRecord, SessionId,
    SessionRepository,
};
use crate::screening::{screening_router, ScreeningService};

/// Build a snapshot by replaying toggles the way a UI would.
pub(super) fn answers_from(
    symptoms: &[Symptom],
    conditions: &[UnderlyingCondition],
    age_range: Option<AgeRange>,
) -> ScreeningAnswers {
    let mut accumulator = AnswerAccumulator::new();
    for symptom in symptoms {
        accumulator.toggle_symptom(*symptom);
    }
    for condition in conditions {
        accumulator.toggle_underlying_condition(*condition);
    }
    accumulator.set_age_range(age_range);
    accumulator.snapshot()
}

/// Every age answer, including "not answered yet".
pub(super) fn age_answers() -> [Option<AgeRange>; 3] {
    [
        None,
        Some(AgeRange::EighteenToSixtyFour),
        Some(AgeRange::SixtyFiveAndOver),
    ]
}

pub(super) fn build_service() -> (
    ScreeningService<InMemorySessionRepository>,
    Arc<InMemorySessionRepository>,
) {
    let repository = Arc::new(InMemorySessionRepository::default());
    let service = ScreeningService::new(repository.clone(), GuidanceNamespace::SelfScreener);
    (service, repository)
}

pub(super) fn screening_router_with_service(
    service: ScreeningService<InMemorySessionRepository>,
) -> axum::Router {
    screening_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: ScreeningSessionRecord,
    ) -> Result<ScreeningSessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<ScreeningSessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn modify(
        &self,
        _id: &SessionId,
        _change: &mut dyn FnMut(&mut ScreeningSessionRecord),
    ) -> Result<ScreeningSessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<ScreeningSessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).expect("serialize body")))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
