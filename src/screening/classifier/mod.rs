mod policy;
mod rules;

use super::answers::ScreeningAnswers;
use super::domain::SymptomGroup;
use policy::decide_group;
use serde::{Deserialize, Serialize};

/// Stateless triage classifier.
///
/// Pure and total: every well-formed snapshot maps to exactly one [`SymptomGroup`],
/// falling back to [`SymptomGroup::Asymptomatic`] when no rule applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomClassifier;

impl SymptomClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, answers: &ScreeningAnswers) -> SymptomGroup {
        self.evaluate(answers).symptom_group
    }

    /// Classify and keep the rationale of the rule that fired.
    pub fn evaluate(&self, answers: &ScreeningAnswers) -> ClassificationOutcome {
        let signals = rules::collect_signals(answers);
        let (symptom_group, rationale) = decide_group(&signals);

        ClassificationOutcome {
            symptom_group,
            rationale: rationale.to_string(),
        }
    }
}

/// Shorthand for [`SymptomClassifier::classify`].
pub fn classify(answers: &ScreeningAnswers) -> SymptomGroup {
    SymptomClassifier.classify(answers)
}

/// Classifier output with the reason the group was chosen, for audit and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub symptom_group: SymptomGroup,
    pub rationale: String,
}
