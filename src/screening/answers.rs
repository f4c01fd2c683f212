use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{
    AgeRange, AnswerKind, EmergencySymptom, InvalidInput, OtherSymptom, PrimarySymptom,
    ScreeningOption, SecondarySymptom, Symptom, UnderlyingCondition,
};

/// Immutable view of everything a user has answered so far.
///
/// Every set holds unique members and ordering carries no meaning. An absent
/// `age_range` means the question has not been answered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningAnswers {
    #[serde(default)]
    pub emergency_symptoms: BTreeSet<EmergencySymptom>,
    #[serde(default)]
    pub primary_symptoms: BTreeSet<PrimarySymptom>,
    #[serde(default)]
    pub secondary_symptoms: BTreeSet<SecondarySymptom>,
    #[serde(default)]
    pub other_symptoms: BTreeSet<OtherSymptom>,
    #[serde(default)]
    pub underlying_conditions: BTreeSet<UnderlyingCondition>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
}

impl ScreeningAnswers {
    pub fn has_emergency_symptom(&self) -> bool {
        !self.emergency_symptoms.is_empty()
    }

    pub fn has_primary_symptom(&self) -> bool {
        !self.primary_symptoms.is_empty()
    }

    pub fn has_secondary_symptom(&self) -> bool {
        !self.secondary_symptoms.is_empty()
    }

    pub fn has_other_symptom(&self) -> bool {
        !self.other_symptoms.is_empty()
    }

    pub fn has_underlying_condition(&self) -> bool {
        !self.underlying_conditions.is_empty()
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Emergency(symptom) => self.emergency_symptoms.contains(&symptom),
            Symptom::Primary(symptom) => self.primary_symptoms.contains(&symptom),
            Symptom::Secondary(symptom) => self.secondary_symptoms.contains(&symptom),
            Symptom::Other(symptom) => self.other_symptoms.contains(&symptom),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ScreeningAnswers::default()
    }
}

/// Session-owned answer state with toggle semantics per item.
///
/// Each toggle touches exactly one category; toggling the same member twice restores
/// the previous state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerAccumulator {
    answers: ScreeningAnswers,
}

impl AnswerAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(answers: ScreeningAnswers) -> Self {
        Self { answers }
    }

    /// Returns `true` when the symptom is selected after the toggle.
    pub fn toggle_emergency_symptom(&mut self, symptom: EmergencySymptom) -> bool {
        toggle(&mut self.answers.emergency_symptoms, symptom)
    }

    pub fn toggle_primary_symptom(&mut self, symptom: PrimarySymptom) -> bool {
        toggle(&mut self.answers.primary_symptoms, symptom)
    }

    pub fn toggle_secondary_symptom(&mut self, symptom: SecondarySymptom) -> bool {
        toggle(&mut self.answers.secondary_symptoms, symptom)
    }

    pub fn toggle_other_symptom(&mut self, symptom: OtherSymptom) -> bool {
        toggle(&mut self.answers.other_symptoms, symptom)
    }

    pub fn toggle_underlying_condition(&mut self, condition: UnderlyingCondition) -> bool {
        toggle(&mut self.answers.underlying_conditions, condition)
    }

    /// Toggle a symptom of any category, routing it to the set it belongs to.
    pub fn toggle_symptom(&mut self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Emergency(symptom) => self.toggle_emergency_symptom(symptom),
            Symptom::Primary(symptom) => self.toggle_primary_symptom(symptom),
            Symptom::Secondary(symptom) => self.toggle_secondary_symptom(symptom),
            Symptom::Other(symptom) => self.toggle_other_symptom(symptom),
        }
    }

    /// Last write wins; `None` marks the question as unanswered.
    pub fn set_age_range(&mut self, range: Option<AgeRange>) {
        self.answers.age_range = range;
    }

    pub fn clear(&mut self) {
        self.answers = ScreeningAnswers::default();
    }

    pub fn apply(&mut self, update: AnswerUpdate) {
        match update {
            AnswerUpdate::ToggleSymptom(symptom) => {
                self.toggle_symptom(symptom);
            }
            AnswerUpdate::ToggleUnderlyingCondition(condition) => {
                self.toggle_underlying_condition(condition);
            }
            AnswerUpdate::SetAgeRange(range) => self.set_age_range(range),
            AnswerUpdate::Clear => self.clear(),
        }
    }

    pub fn answers(&self) -> &ScreeningAnswers {
        &self.answers
    }

    /// Detached copy for classification; later mutations never reach it.
    pub fn snapshot(&self) -> ScreeningAnswers {
        self.answers.clone()
    }

    pub fn into_answers(self) -> ScreeningAnswers {
        self.answers
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, item: T) -> bool {
    if set.remove(&item) {
        false
    } else {
        set.insert(item);
        true
    }
}

/// Typed mutation applied to an [`AnswerAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerUpdate {
    ToggleSymptom(Symptom),
    ToggleUnderlyingCondition(UnderlyingCondition),
    SetAgeRange(Option<AgeRange>),
    Clear,
}

/// Untyped update as received from outer layers, e.g. `{"kind": "symptom", "value": "COUGH"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerUpdateRequest {
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl AnswerUpdateRequest {
    pub fn new(kind: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            value: value.map(str::to_string),
        }
    }
}

impl TryFrom<&AnswerUpdateRequest> for AnswerUpdate {
    type Error = InvalidInput;

    fn try_from(request: &AnswerUpdateRequest) -> Result<Self, Self::Error> {
        let value = request.value.as_deref().map(str::trim);
        let required = |kind: AnswerKind| value.ok_or(InvalidInput::MissingValue { kind });

        match request.kind.trim().to_ascii_lowercase().as_str() {
            "symptom" => {
                let raw = required(AnswerKind::Symptom)?;
                Ok(AnswerUpdate::ToggleSymptom(raw.parse()?))
            }
            "emergency_symptom" => {
                let raw = required(AnswerKind::EmergencySymptom)?;
                Ok(AnswerUpdate::ToggleSymptom(
                    EmergencySymptom::parse_option(raw)?.into(),
                ))
            }
            "primary_symptom" => {
                let raw = required(AnswerKind::PrimarySymptom)?;
                Ok(AnswerUpdate::ToggleSymptom(
                    PrimarySymptom::parse_option(raw)?.into(),
                ))
            }
            "secondary_symptom" => {
                let raw = required(AnswerKind::SecondarySymptom)?;
                Ok(AnswerUpdate::ToggleSymptom(
                    SecondarySymptom::parse_option(raw)?.into(),
                ))
            }
            "other_symptom" => {
                let raw = required(AnswerKind::OtherSymptom)?;
                Ok(AnswerUpdate::ToggleSymptom(
                    OtherSymptom::parse_option(raw)?.into(),
                ))
            }
            "underlying_condition" => {
                let raw = required(AnswerKind::UnderlyingCondition)?;
                Ok(AnswerUpdate::ToggleUnderlyingCondition(
                    UnderlyingCondition::parse_option(raw)?,
                ))
            }
            "age_range" => match value {
                None | Some("") => Ok(AnswerUpdate::SetAgeRange(None)),
                Some(raw) => Ok(AnswerUpdate::SetAgeRange(Some(AgeRange::parse_option(
                    raw,
                )?))),
            },
            "clear" => Ok(AnswerUpdate::Clear),
            _ => Err(InvalidInput::UnknownUpdate(request.kind.clone())),
        }
    }
}

/// Answers as plain strings, validated into [`ScreeningAnswers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswers {
    #[serde(default)]
    pub emergency_symptoms: Vec<String>,
    #[serde(default)]
    pub primary_symptoms: Vec<String>,
    #[serde(default)]
    pub secondary_symptoms: Vec<String>,
    #[serde(default)]
    pub other_symptoms: Vec<String>,
    #[serde(default)]
    pub underlying_conditions: Vec<String>,
    #[serde(default)]
    pub age_range: Option<String>,
}

impl TryFrom<RawAnswers> for ScreeningAnswers {
    type Error = InvalidInput;

    fn try_from(raw: RawAnswers) -> Result<Self, Self::Error> {
        let age_range = match raw.age_range.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(AgeRange::parse_option(value)?),
        };

        Ok(ScreeningAnswers {
            emergency_symptoms: parse_set(&raw.emergency_symptoms)?,
            primary_symptoms: parse_set(&raw.primary_symptoms)?,
            secondary_symptoms: parse_set(&raw.secondary_symptoms)?,
            other_symptoms: parse_set(&raw.other_symptoms)?,
            underlying_conditions: parse_set(&raw.underlying_conditions)?,
            age_range,
        })
    }
}

fn parse_set<T: ScreeningOption>(values: &[String]) -> Result<BTreeSet<T>, InvalidInput> {
    values.iter().map(|value| T::parse_option(value)).collect()
}
