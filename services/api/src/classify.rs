use clap::Args;
use self_screener::error::AppError;
use self_screener::screening::{
    AgeRange, AnswerAccumulator, ClassificationView, GuidanceCatalog, GuidanceNamespace,
    ScreeningOption, Symptom, SymptomClassifier, UnderlyingCondition,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// Reported symptom, e.g. COUGH or CHEST_PAIN. Repeat for several.
    #[arg(long = "symptom", value_name = "NAME")]
    pub(crate) symptoms: Vec<String>,
    /// Underlying condition, e.g. DIABETES. Repeat for several.
    #[arg(long = "condition", value_name = "NAME")]
    pub(crate) conditions: Vec<String>,
    /// EIGHTEEN_TO_SIXTY_FOUR or SIXTY_FIVE_AND_OVER. Omit when unanswered.
    #[arg(long, value_name = "NAME")]
    pub(crate) age_range: Option<String>,
    /// Guidance namespace (self_assessment or self_screener)
    #[arg(long, default_value_t = GuidanceNamespace::SelfAssessment)]
    pub(crate) namespace: GuidanceNamespace,
    /// Print the classification as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let view = evaluate(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Symptom group: {}", view.symptom_group);
    println!("  Rationale: {}", view.rationale);
    println!("  Directive: {}", view.guidance.directive.label());
    if let Some(summary_key) = &view.guidance.summary_key {
        println!("  Summary key: {summary_key}");
    }
    println!("  Intro key: {}", view.guidance.intro_key);
    println!("  Instructions:");
    for key in &view.guidance.instruction_keys {
        println!("    - {key}");
    }
    Ok(())
}

pub(crate) fn evaluate(args: &ClassifyArgs) -> Result<ClassificationView, AppError> {
    let mut accumulator = AnswerAccumulator::new();
    for raw in &args.symptoms {
        let symptom: Symptom = raw.parse()?;
        accumulator.toggle_symptom(symptom);
    }
    for raw in &args.conditions {
        let condition = UnderlyingCondition::parse_option(raw)?;
        accumulator.toggle_underlying_condition(condition);
    }
    if let Some(raw) = args.age_range.as_deref() {
        accumulator.set_age_range(Some(AgeRange::parse_option(raw)?));
    }

    let answers = accumulator.into_answers();
    let outcome = SymptomClassifier::new().evaluate(&answers);
    let guidance = GuidanceCatalog::new(args.namespace).guidance_for(outcome.symptom_group);

    Ok(ClassificationView {
        symptom_group: outcome.symptom_group,
        rationale: outcome.rationale,
        guidance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use self_screener::screening::{CareDirective, SymptomGroup};

    fn args(symptoms: &[&str], conditions: &[&str], age_range: Option<&str>) -> ClassifyArgs {
        ClassifyArgs {
            symptoms: symptoms.iter().map(|value| value.to_string()).collect(),
            conditions: conditions.iter().map(|value| value.to_string()).collect(),
            age_range: age_range.map(str::to_string),
            ..ClassifyArgs::default()
        }
    }

    #[test]
    fn classifies_flags_across_categories() {
        let view =
            evaluate(&args(&["cough"], &[], Some("SIXTY_FIVE_AND_OVER"))).expect("valid answers");

        assert_eq!(view.symptom_group, SymptomGroup::Primary2);
        assert_eq!(view.guidance.directive, CareDirective::CallHealthcareProvider);
        assert_eq!(view.guidance.summary_key, None);
        assert!(view.guidance.intro_key.starts_with("self_assessment."));
    }

    #[test]
    fn repeated_symptom_flags_toggle_back_off() {
        let view = evaluate(&args(&["CHEST_PAIN", "CHEST_PAIN"], &[], None)).expect("valid");

        assert_eq!(view.symptom_group, SymptomGroup::Asymptomatic);
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let error = evaluate(&args(&[], &["ASTHMA"], None)).unwrap_err();

        assert!(error.to_string().contains("ASTHMA"));
    }

    #[test]
    fn namespace_selects_key_prefix() {
        let view = evaluate(&ClassifyArgs {
            namespace: GuidanceNamespace::SelfScreener,
            ..args(&["OTHER"], &[], None)
        })
        .expect("valid");

        assert_eq!(view.symptom_group, SymptomGroup::NonCovid);
        assert!(view.guidance.intro_key.starts_with("self_screener."));
    }
}
