use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::SymptomGroup;

/// Translation namespace the guidance keys are issued under.
///
/// Both screening flows share one classifier; only the key prefix differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceNamespace {
    #[default]
    SelfAssessment,
    SelfScreener,
}

impl GuidanceNamespace {
    pub const fn prefix(self) -> &'static str {
        match self {
            GuidanceNamespace::SelfAssessment => "self_assessment",
            GuidanceNamespace::SelfScreener => "self_screener",
        }
    }
}

impl fmt::Display for GuidanceNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a guidance namespace (expected self_assessment or self_screener)")]
pub struct UnknownNamespace(pub String);

impl FromStr for GuidanceNamespace {
    type Err = UnknownNamespace;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "self_assessment" | "assessment" => Ok(GuidanceNamespace::SelfAssessment),
            "self_screener" | "screener" => Ok(GuidanceNamespace::SelfScreener),
            _ => Err(UnknownNamespace(raw.to_string())),
        }
    }
}

/// What the user is told to do next, one per instruction block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareDirective {
    CallEmergencyServices,
    CallHealthcareProvider,
    StayHomeExceptForMedicalCare,
    WatchForSymptoms,
    Quarantine,
}

impl CareDirective {
    pub const fn for_group(group: SymptomGroup) -> Self {
        match group {
            SymptomGroup::Emergency => CareDirective::CallEmergencyServices,
            SymptomGroup::Primary1 | SymptomGroup::Primary2 | SymptomGroup::Secondary2 => {
                CareDirective::CallHealthcareProvider
            }
            SymptomGroup::Primary3 | SymptomGroup::Secondary1 => {
                CareDirective::StayHomeExceptForMedicalCare
            }
            SymptomGroup::NonCovid => CareDirective::WatchForSymptoms,
            SymptomGroup::Asymptomatic => CareDirective::Quarantine,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CareDirective::CallEmergencyServices => "Call emergency services",
            CareDirective::CallHealthcareProvider => "Call your healthcare provider",
            CareDirective::StayHomeExceptForMedicalCare => "Stay home except to get medical care",
            CareDirective::WatchForSymptoms => "Watch for symptoms",
            CareDirective::Quarantine => "Quarantine",
        }
    }

    /// Instruction keys relative to the namespace, in display order.
    const fn instruction_keys(self, namespace: GuidanceNamespace) -> &'static [&'static str] {
        match self {
            CareDirective::CallEmergencyServices => match namespace {
                GuidanceNamespace::SelfAssessment => &[
                    "call_emergency_services.seek_medical_attention",
                    "call_emergency_services.call_emergencies",
                ],
                GuidanceNamespace::SelfScreener => &[
                    "call911.seek_medical_attention",
                    "call_emergency_services.call_emergency_services",
                ],
            },
            CareDirective::CallHealthcareProvider => &[
                "guidance.call_your_healthcare_provider",
                "guidance.stay_at_home",
                "guidance.dont_go_to_work",
                "guidance.dont_use_public_transport",
                "guidance.seek_medical_care",
                "guidance.find_telehealth",
                "guidance.take_care_of_yourself",
                "guidance.protect_others",
            ],
            CareDirective::StayHomeExceptForMedicalCare => &[
                "guidance.stay_at_home",
                "guidance.dont_go_to_work",
                "guidance.dont_use_public_transport",
                "guidance.seek_medical_care",
            ],
            CareDirective::WatchForSymptoms => &[
                "guidance.watch_for_covid_symptoms",
                "guidance.if_symptoms_develop",
                "guidance.may_help_you_feel_better",
                "guidance.rest",
                "guidance.drink_water",
                "guidance.cover_coughs",
                "guidance.clean_hands",
            ],
            CareDirective::Quarantine => &[
                "guidance.stay_home_14_days",
                "guidance.take_temperature",
                "guidance.practice_social_distancing",
                "guidance.stay_6_feet_away",
                "guidance.stay_away_from_higher_risk_people",
                "guidance.follow_cdc_guidance",
            ],
        }
    }
}

impl fmt::Display for CareDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Only the screener flow has a summary screen.
fn summary_key(namespace: GuidanceNamespace, group: SymptomGroup) -> Option<&'static str> {
    if namespace == GuidanceNamespace::SelfAssessment {
        return None;
    }

    Some(match group {
        SymptomGroup::Emergency => "call911.urgent_medical_attention_needed",
        SymptomGroup::Primary1 => "summary.primary_symptom_group_1",
        SymptomGroup::Primary2 => "summary.primary_symptom_group_2",
        SymptomGroup::Primary3 => "summary.primary_symptom_group_3",
        SymptomGroup::Secondary1 => "summary.secondary_symptom_group_1",
        SymptomGroup::Secondary2 => "summary.secondary_symptom_group_2",
        SymptomGroup::NonCovid => "summary.non_covid_symptom_group",
        SymptomGroup::Asymptomatic => "summary.asymptomatic_group",
    })
}

fn intro_key(namespace: GuidanceNamespace, group: SymptomGroup) -> &'static str {
    match group {
        SymptomGroup::Emergency => match namespace {
            GuidanceNamespace::SelfAssessment => {
                "call_emergency_services.urgent_medical_attention_needed"
            }
            GuidanceNamespace::SelfScreener => "call911.based_on_your_symptoms",
        },
        SymptomGroup::Primary1 => "guidance.you_have_underlying_conditions",
        SymptomGroup::Primary2
        | SymptomGroup::Primary3
        | SymptomGroup::Secondary1
        | SymptomGroup::Secondary2 => "guidance.your_symptoms_might_be_related",
        SymptomGroup::NonCovid => "guidance.monitor_your_symptoms",
        SymptomGroup::Asymptomatic => "guidance.feeling_fine",
    }
}

/// Text keys and directive a caller renders for one symptom group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub symptom_group: SymptomGroup,
    pub directive: CareDirective,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary_key: Option<String>,
    pub intro_key: String,
    pub instruction_keys: Vec<String>,
}

/// Total mapping from [`SymptomGroup`] to [`Guidance`] under a fixed namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuidanceCatalog {
    namespace: GuidanceNamespace,
}

impl GuidanceCatalog {
    pub fn new(namespace: GuidanceNamespace) -> Self {
        Self { namespace }
    }

    pub fn namespace(&self) -> GuidanceNamespace {
        self.namespace
    }

    pub fn guidance_for(&self, group: SymptomGroup) -> Guidance {
        let directive = CareDirective::for_group(group);

        Guidance {
            symptom_group: group,
            directive,
            summary_key: summary_key(self.namespace, group).map(|suffix| self.key(suffix)),
            intro_key: self.key(intro_key(self.namespace, group)),
            instruction_keys: directive
                .instruction_keys(self.namespace)
                .iter()
                .map(|suffix| self.key(suffix))
                .collect(),
        }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}.{}", self.namespace.prefix(), suffix)
    }
}
