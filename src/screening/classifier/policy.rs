use super::super::domain::SymptomGroup;
use super::rules::ScreeningSignals;

/// One step of the triage chain.
pub(crate) struct TriageRule {
    pub group: SymptomGroup,
    pub rationale: &'static str,
    pub applies: fn(&ScreeningSignals) -> bool,
}

/// Ordered by clinical priority. Predicates overlap, so the first match wins.
pub(crate) const TRIAGE_RULES: [TriageRule; 8] = [
    TriageRule {
        group: SymptomGroup::Emergency,
        rationale: "emergency symptom reported",
        applies: emergency,
    },
    TriageRule {
        group: SymptomGroup::Primary1,
        rationale: "primary symptoms with an underlying condition",
        applies: primary_with_condition,
    },
    TriageRule {
        group: SymptomGroup::Primary2,
        rationale: "primary symptoms, aged 65 or over, no underlying condition",
        applies: primary_sixty_five_and_over,
    },
    TriageRule {
        group: SymptomGroup::Primary3,
        rationale: "primary symptoms, under 65 or age unanswered, no underlying condition",
        applies: primary_under_sixty_five,
    },
    TriageRule {
        group: SymptomGroup::Secondary1,
        rationale: "secondary symptoms with elevated risk (65 or over, or an underlying condition)",
        applies: secondary_elevated_risk,
    },
    TriageRule {
        group: SymptomGroup::Secondary2,
        rationale: "secondary symptoms, under 65 or age unanswered, no underlying condition",
        applies: secondary_low_risk,
    },
    TriageRule {
        group: SymptomGroup::NonCovid,
        rationale: "only symptoms unrelated to COVID-19 reported",
        applies: non_covid,
    },
    TriageRule {
        group: SymptomGroup::Asymptomatic,
        rationale: "no symptoms reported",
        applies: asymptomatic,
    },
];

pub(crate) const FALLBACK_RATIONALE: &str = "no triage rule matched";

pub(crate) fn decide_group(signals: &ScreeningSignals) -> (SymptomGroup, &'static str) {
    TRIAGE_RULES
        .iter()
        .find(|rule| (rule.applies)(signals))
        .map(|rule| (rule.group, rule.rationale))
        .unwrap_or((SymptomGroup::Asymptomatic, FALLBACK_RATIONALE))
}

fn emergency(signals: &ScreeningSignals) -> bool {
    signals.emergency
}

fn primary_with_condition(signals: &ScreeningSignals) -> bool {
    signals.primary && signals.underlying_condition
}

fn primary_sixty_five_and_over(signals: &ScreeningSignals) -> bool {
    signals.primary && signals.sixty_five_and_over() && !signals.underlying_condition
}

fn primary_under_sixty_five(signals: &ScreeningSignals) -> bool {
    signals.primary && signals.under_sixty_five() && !signals.underlying_condition
}

fn secondary_elevated_risk(signals: &ScreeningSignals) -> bool {
    let under_sixty_five_with_condition =
        signals.under_sixty_five() && signals.underlying_condition;
    !signals.primary
        && signals.secondary
        && (under_sixty_five_with_condition || signals.sixty_five_and_over())
}

fn secondary_low_risk(signals: &ScreeningSignals) -> bool {
    !signals.primary
        && signals.secondary
        && signals.under_sixty_five()
        && !signals.underlying_condition
}

fn non_covid(signals: &ScreeningSignals) -> bool {
    !signals.primary && !signals.secondary && signals.other
}

fn asymptomatic(signals: &ScreeningSignals) -> bool {
    !signals.primary && !signals.secondary && !signals.other
}

#[cfg(test)]
mod tests {
    use super::super::rules::AgeBand;
    use super::*;

    fn every_signal_combination() -> Vec<ScreeningSignals> {
        let mut combinations = Vec::new();
        for bits in 0u8..32 {
            for age in [AgeBand::UnderSixtyFive, AgeBand::SixtyFiveAndOver] {
                combinations.push(ScreeningSignals {
                    emergency: bits & 0b00001 != 0,
                    primary: bits & 0b00010 != 0,
                    secondary: bits & 0b00100 != 0,
                    other: bits & 0b01000 != 0,
                    underlying_condition: bits & 0b10000 != 0,
                    age,
                });
            }
        }
        combinations
    }

    #[test]
    fn rules_are_listed_in_priority_order() {
        let order: Vec<SymptomGroup> = TRIAGE_RULES.iter().map(|rule| rule.group).collect();
        assert_eq!(order, SymptomGroup::ALL.to_vec());
    }

    #[test]
    fn chain_covers_every_signal_combination() {
        for signals in every_signal_combination() {
            let matched = TRIAGE_RULES.iter().any(|rule| (rule.applies)(&signals));
            assert!(matched, "no rule matched {signals:?}");
            let (_, rationale) = decide_group(&signals);
            assert_ne!(rationale, FALLBACK_RATIONALE);
        }
    }

    #[test]
    fn emergency_wins_over_every_other_signal() {
        for signals in every_signal_combination()
            .into_iter()
            .filter(|signals| signals.emergency)
        {
            assert_eq!(decide_group(&signals).0, SymptomGroup::Emergency);
        }
    }

    #[test]
    fn unanswered_age_is_treated_as_under_sixty_five() {
        assert_eq!(AgeBand::from_answer(None), AgeBand::UnderSixtyFive);
    }
}
