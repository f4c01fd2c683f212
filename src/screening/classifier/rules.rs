use super::super::answers::ScreeningAnswers;
use super::super::domain::AgeRange;

/// Age as the triage rules see it. An unanswered age counts as under 65.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgeBand {
    UnderSixtyFive,
    SixtyFiveAndOver,
}

impl AgeBand {
    pub(crate) fn from_answer(age_range: Option<AgeRange>) -> Self {
        match age_range {
            Some(AgeRange::SixtyFiveAndOver) => AgeBand::SixtyFiveAndOver,
            Some(AgeRange::EighteenToSixtyFour) | None => AgeBand::UnderSixtyFive,
        }
    }
}

/// Boolean facts about a snapshot that the triage policy branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreeningSignals {
    pub emergency: bool,
    pub primary: bool,
    pub secondary: bool,
    pub other: bool,
    pub underlying_condition: bool,
    pub age: AgeBand,
}

impl ScreeningSignals {
    pub(crate) fn sixty_five_and_over(&self) -> bool {
        self.age == AgeBand::SixtyFiveAndOver
    }

    pub(crate) fn under_sixty_five(&self) -> bool {
        self.age == AgeBand::UnderSixtyFive
    }
}

pub(crate) fn collect_signals(answers: &ScreeningAnswers) -> ScreeningSignals {
    ScreeningSignals {
        emergency: answers.has_emergency_symptom(),
        primary: answers.has_primary_symptom(),
        secondary: answers.has_secondary_symptom(),
        other: answers.has_other_symptom(),
        underlying_condition: answers.has_underlying_condition(),
        age: AgeBand::from_answer(answers.age_range),
    }
}
