use super::common::*;
use crate::screening::answers::ScreeningAnswers;
use crate::screening::classifier::{classify, SymptomClassifier};
use crate::screening::domain::{
    AgeRange, EmergencySymptom, OtherSymptom, PrimarySymptom, ScreeningOption,
    SecondarySymptom, Symptom, SymptomGroup, UnderlyingCondition,
};

#[test]
fn emergency_symptom_outranks_primary_symptoms() {
    let answers = answers_from(
        &[EmergencySymptom::ChestPain.into(), PrimarySymptom::Cough.into()],
        &[],
        None,
    );

    assert_eq!(classify(&answers), SymptomGroup::Emergency);
}

#[test]
fn primary_symptom_with_condition_and_unanswered_age_is_primary_1() {
    let answers = answers_from(
        &[PrimarySymptom::FeverOrChills.into()],
        &[UnderlyingCondition::Diabetes],
        None,
    );

    assert_eq!(classify(&answers), SymptomGroup::Primary1);
}

#[test]
fn primary_symptom_with_condition_is_primary_1_at_any_age() {
    for age_range in age_answers() {
        let answers = answers_from(
            &[PrimarySymptom::FeverOrChills.into()],
            &[UnderlyingCondition::Smoking],
            age_range,
        );
        assert_eq!(classify(&answers), SymptomGroup::Primary1, "{age_range:?}");
    }
}

#[test]
fn primary_symptom_sixty_five_and_over_without_condition_is_primary_2() {
    let answers = answers_from(
        &[PrimarySymptom::Cough.into()],
        &[],
        Some(AgeRange::SixtyFiveAndOver),
    );

    assert_eq!(classify(&answers), SymptomGroup::Primary2);
}

#[test]
fn primary_symptom_under_sixty_five_without_condition_is_primary_3() {
    let under = answers_from(
        &[PrimarySymptom::Cough.into()],
        &[],
        Some(AgeRange::EighteenToSixtyFour),
    );
    let unanswered = answers_from(&[PrimarySymptom::Cough.into()], &[], None);

    assert_eq!(classify(&under), SymptomGroup::Primary3);
    assert_eq!(classify(&unanswered), SymptomGroup::Primary3);
}

#[test]
fn primary_symptoms_take_precedence_over_secondary_and_other() {
    let answers = answers_from(
        &[
            PrimarySymptom::ModerateDifficultyBreathing.into(),
            SecondarySymptom::Aching.into(),
            OtherSymptom::VomitingOrDiarrhea.into(),
        ],
        &[],
        Some(AgeRange::EighteenToSixtyFour),
    );

    assert_eq!(classify(&answers), SymptomGroup::Primary3);
}

#[test]
fn secondary_symptom_sixty_five_and_over_is_secondary_1() {
    let answers = answers_from(
        &[SecondarySymptom::Aching.into()],
        &[],
        Some(AgeRange::SixtyFiveAndOver),
    );

    assert_eq!(classify(&answers), SymptomGroup::Secondary1);
}

#[test]
fn secondary_symptom_sixty_five_and_over_with_condition_is_secondary_1() {
    let answers = answers_from(
        &[SecondarySymptom::Aching.into()],
        &[UnderlyingCondition::HeartCondition],
        Some(AgeRange::SixtyFiveAndOver),
    );

    assert_eq!(classify(&answers), SymptomGroup::Secondary1);
}

#[test]
fn secondary_symptom_under_sixty_five_with_condition_is_secondary_1() {
    let answers = answers_from(
        &[SecondarySymptom::LossOfSmellTasteAppetite.into()],
        &[UnderlyingCondition::HighBloodPressure],
        Some(AgeRange::EighteenToSixtyFour),
    );
    let unanswered = answers_from(
        &[SecondarySymptom::LossOfSmellTasteAppetite.into()],
        &[UnderlyingCondition::HighBloodPressure],
        None,
    );

    assert_eq!(classify(&answers), SymptomGroup::Secondary1);
    assert_eq!(classify(&unanswered), SymptomGroup::Secondary1);
}

#[test]
fn secondary_symptom_under_sixty_five_without_condition_is_secondary_2() {
    for age_range in [None, Some(AgeRange::EighteenToSixtyFour)] {
        let answers = answers_from(&[SecondarySymptom::Aching.into()], &[], age_range);
        assert_eq!(classify(&answers), SymptomGroup::Secondary2, "{age_range:?}");
    }
}

#[test]
fn other_symptoms_alone_are_non_covid_regardless_of_conditions_or_age() {
    for age_range in age_answers() {
        let answers = answers_from(
            &[OtherSymptom::Other.into()],
            &[UnderlyingCondition::Smoking],
            age_range,
        );
        assert_eq!(classify(&answers), SymptomGroup::NonCovid, "{age_range:?}");
    }
}

#[test]
fn no_answers_is_asymptomatic() {
    assert_eq!(
        classify(&ScreeningAnswers::default()),
        SymptomGroup::Asymptomatic
    );
}

#[test]
fn conditions_and_age_alone_stay_asymptomatic() {
    for age_range in age_answers() {
        let answers = answers_from(&[], UnderlyingCondition::ALL, age_range);
        assert_eq!(classify(&answers), SymptomGroup::Asymptomatic);
    }
}

#[test]
fn any_emergency_symptom_forces_emergency() {
    let backgrounds: Vec<Vec<Symptom>> = vec![
        Vec::new(),
        vec![PrimarySymptom::Cough.into()],
        vec![SecondarySymptom::Aching.into()],
        vec![OtherSymptom::Other.into()],
        vec![
            PrimarySymptom::FeverOrChills.into(),
            SecondarySymptom::LossOfSmellTasteAppetite.into(),
            OtherSymptom::VomitingOrDiarrhea.into(),
        ],
    ];

    for emergency in EmergencySymptom::ALL.iter().copied() {
        for background in &backgrounds {
            for conditions in [&[][..], &[UnderlyingCondition::Obesity][..]] {
                for age_range in age_answers() {
                    let mut symptoms = background.clone();
                    symptoms.push(emergency.into());
                    let answers = answers_from(&symptoms, conditions, age_range);
                    assert_eq!(classify(&answers), SymptomGroup::Emergency);
                }
            }
        }
    }
}

#[test]
fn evaluate_reports_the_rule_that_fired() {
    let classifier = SymptomClassifier::new();
    let answers = answers_from(&[OtherSymptom::VomitingOrDiarrhea.into()], &[], None);

    let outcome = classifier.evaluate(&answers);

    assert_eq!(outcome.symptom_group, SymptomGroup::NonCovid);
    assert!(outcome.rationale.contains("unrelated to COVID-19"));
    assert_eq!(classifier.classify(&answers), outcome.symptom_group);
}

#[test]
fn classification_is_deterministic() {
    let answers = answers_from(
        &[SecondarySymptom::Aching.into()],
        &[UnderlyingCondition::KidneyDisease],
        Some(AgeRange::EighteenToSixtyFour),
    );

    let first = SymptomClassifier.evaluate(&answers);
    let second = SymptomClassifier.evaluate(&answers.clone());
    assert_eq!(first, second);
}
