use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Answer categories a screening session collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Symptom,
    EmergencySymptom,
    PrimarySymptom,
    SecondarySymptom,
    OtherSymptom,
    UnderlyingCondition,
    AgeRange,
}

impl AnswerKind {
    pub const fn label(self) -> &'static str {
        match self {
            AnswerKind::Symptom => "symptom",
            AnswerKind::EmergencySymptom => "emergency_symptom",
            AnswerKind::PrimarySymptom => "primary_symptom",
            AnswerKind::SecondarySymptom => "secondary_symptom",
            AnswerKind::OtherSymptom => "other_symptom",
            AnswerKind::UnderlyingCondition => "underlying_condition",
            AnswerKind::AgeRange => "age_range",
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejection for untyped input that does not name a known answer.
///
/// Typed callers can never produce this; it only surfaces where answers arrive as
/// strings (HTTP payloads, CLI flags). The accumulator is left untouched when it occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("'{value}' is not a valid {kind} option")]
    UnknownMember { kind: AnswerKind, value: String },
    #[error("a {kind} update requires a value")]
    MissingValue { kind: AnswerKind },
    #[error("'{0}' is not a supported answer update")]
    UnknownUpdate(String),
}

/// Closed set of answer options with a stable wire name per member.
pub trait ScreeningOption: Copy + Ord + 'static {
    const KIND: AnswerKind;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Resolve a wire name (case-insensitive) to a member of this set.
    fn parse_option(raw: &str) -> Result<Self, InvalidInput> {
        let wanted = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidInput::UnknownMember {
                kind: Self::KIND,
                value: raw.to_string(),
            })
    }
}

macro_rules! option_text {
    ($($option:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $option {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $option {
                type Err = InvalidInput;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    <$option as ScreeningOption>::parse_option(raw)
                }
            }
        )+
    };
}

/// Symptoms that short-circuit the screening into emergency care.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencySymptom {
    ChestPain,
    SevereDifficultyBreathing,
    Lightheadedness,
    Disorientation,
}

impl ScreeningOption for EmergencySymptom {
    const KIND: AnswerKind = AnswerKind::EmergencySymptom;
    const ALL: &'static [Self] = &[
        EmergencySymptom::ChestPain,
        EmergencySymptom::SevereDifficultyBreathing,
        EmergencySymptom::Lightheadedness,
        EmergencySymptom::Disorientation,
    ];

    fn as_str(self) -> &'static str {
        match self {
            EmergencySymptom::ChestPain => "CHEST_PAIN",
            EmergencySymptom::SevereDifficultyBreathing => "SEVERE_DIFFICULTY_BREATHING",
            EmergencySymptom::Lightheadedness => "LIGHTHEADEDNESS",
            EmergencySymptom::Disorientation => "DISORIENTATION",
        }
    }
}

/// COVID-like symptoms that drive the primary groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimarySymptom {
    FeverOrChills,
    Cough,
    ModerateDifficultyBreathing,
}

impl ScreeningOption for PrimarySymptom {
    const KIND: AnswerKind = AnswerKind::PrimarySymptom;
    const ALL: &'static [Self] = &[
        PrimarySymptom::FeverOrChills,
        PrimarySymptom::Cough,
        PrimarySymptom::ModerateDifficultyBreathing,
    ];

    fn as_str(self) -> &'static str {
        match self {
            PrimarySymptom::FeverOrChills => "FEVER_OR_CHILLS",
            PrimarySymptom::Cough => "COUGH",
            PrimarySymptom::ModerateDifficultyBreathing => "MODERATE_DIFFICULTY_BREATHING",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecondarySymptom {
    Aching,
    LossOfSmellTasteAppetite,
}

impl ScreeningOption for SecondarySymptom {
    const KIND: AnswerKind = AnswerKind::SecondarySymptom;
    const ALL: &'static [Self] = &[
        SecondarySymptom::Aching,
        SecondarySymptom::LossOfSmellTasteAppetite,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SecondarySymptom::Aching => "ACHING",
            SecondarySymptom::LossOfSmellTasteAppetite => "LOSS_OF_SMELL_TASTE_APPETITE",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtherSymptom {
    VomitingOrDiarrhea,
    Other,
}

impl ScreeningOption for OtherSymptom {
    const KIND: AnswerKind = AnswerKind::OtherSymptom;
    const ALL: &'static [Self] = &[OtherSymptom::VomitingOrDiarrhea, OtherSymptom::Other];

    fn as_str(self) -> &'static str {
        match self {
            OtherSymptom::VomitingOrDiarrhea => "VOMITING_OR_DIARRHEA",
            OtherSymptom::Other => "OTHER",
        }
    }
}

/// Pre-existing conditions that elevate risk for symptomatic users.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnderlyingCondition {
    LungDisease,
    HeartCondition,
    WeakenedImmuneSystem,
    Obesity,
    KidneyDisease,
    Diabetes,
    LiverDisease,
    HighBloodPressure,
    BloodDisorder,
    CerebrovascularDisease,
    Smoking,
    Pregnancy,
}

impl ScreeningOption for UnderlyingCondition {
    const KIND: AnswerKind = AnswerKind::UnderlyingCondition;
    const ALL: &'static [Self] = &[
        UnderlyingCondition::LungDisease,
        UnderlyingCondition::HeartCondition,
        UnderlyingCondition::WeakenedImmuneSystem,
        UnderlyingCondition::Obesity,
        UnderlyingCondition::KidneyDisease,
        UnderlyingCondition::Diabetes,
        UnderlyingCondition::LiverDisease,
        UnderlyingCondition::HighBloodPressure,
        UnderlyingCondition::BloodDisorder,
        UnderlyingCondition::CerebrovascularDisease,
        UnderlyingCondition::Smoking,
        UnderlyingCondition::Pregnancy,
    ];

    fn as_str(self) -> &'static str {
        match self {
            UnderlyingCondition::LungDisease => "LUNG_DISEASE",
            UnderlyingCondition::HeartCondition => "HEART_CONDITION",
            UnderlyingCondition::WeakenedImmuneSystem => "WEAKENED_IMMUNE_SYSTEM",
            UnderlyingCondition::Obesity => "OBESITY",
            UnderlyingCondition::KidneyDisease => "KIDNEY_DISEASE",
            UnderlyingCondition::Diabetes => "DIABETES",
            UnderlyingCondition::LiverDisease => "LIVER_DISEASE",
            UnderlyingCondition::HighBloodPressure => "HIGH_BLOOD_PRESSURE",
            UnderlyingCondition::BloodDisorder => "BLOOD_DISORDER",
            UnderlyingCondition::CerebrovascularDisease => "CEREBROVASCULAR_DISEASE",
            UnderlyingCondition::Smoking => "SMOKING",
            UnderlyingCondition::Pregnancy => "PREGNANCY",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRange {
    EighteenToSixtyFour,
    SixtyFiveAndOver,
}

impl ScreeningOption for AgeRange {
    const KIND: AnswerKind = AnswerKind::AgeRange;
    const ALL: &'static [Self] = &[AgeRange::EighteenToSixtyFour, AgeRange::SixtyFiveAndOver];

    fn as_str(self) -> &'static str {
        match self {
            AgeRange::EighteenToSixtyFour => "EIGHTEEN_TO_SIXTY_FOUR",
            AgeRange::SixtyFiveAndOver => "SIXTY_FIVE_AND_OVER",
        }
    }
}

option_text!(
    EmergencySymptom,
    PrimarySymptom,
    SecondarySymptom,
    OtherSymptom,
    UnderlyingCondition,
    AgeRange,
);

/// The four symptom categories; membership never overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Emergency,
    Primary,
    Secondary,
    Other,
}

/// Any reportable symptom, tagged with the category it belongs to.
///
/// Serialized as the bare member name; wire names are unique across categories, so the
/// category is recovered on the way back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symptom {
    Emergency(EmergencySymptom),
    Primary(PrimarySymptom),
    Secondary(SecondarySymptom),
    Other(OtherSymptom),
}

impl Symptom {
    pub const fn category(self) -> SymptomCategory {
        match self {
            Symptom::Emergency(_) => SymptomCategory::Emergency,
            Symptom::Primary(_) => SymptomCategory::Primary,
            Symptom::Secondary(_) => SymptomCategory::Secondary,
            Symptom::Other(_) => SymptomCategory::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symptom::Emergency(symptom) => symptom.as_str(),
            Symptom::Primary(symptom) => symptom.as_str(),
            Symptom::Secondary(symptom) => symptom.as_str(),
            Symptom::Other(symptom) => symptom.as_str(),
        }
    }

    /// Every symptom across all categories, emergency first.
    pub fn all() -> impl Iterator<Item = Symptom> {
        EmergencySymptom::ALL
            .iter()
            .copied()
            .map(Symptom::Emergency)
            .chain(PrimarySymptom::ALL.iter().copied().map(Symptom::Primary))
            .chain(SecondarySymptom::ALL.iter().copied().map(Symptom::Secondary))
            .chain(OtherSymptom::ALL.iter().copied().map(Symptom::Other))
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symptom {
    type Err = InvalidInput;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Symptom::all()
            .find(|symptom| symptom.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidInput::UnknownMember {
                kind: AnswerKind::Symptom,
                value: raw.to_string(),
            })
    }
}

impl From<EmergencySymptom> for Symptom {
    fn from(value: EmergencySymptom) -> Self {
        Symptom::Emergency(value)
    }
}

impl From<PrimarySymptom> for Symptom {
    fn from(value: PrimarySymptom) -> Self {
        Symptom::Primary(value)
    }
}

impl From<SecondarySymptom> for Symptom {
    fn from(value: SecondarySymptom) -> Self {
        Symptom::Secondary(value)
    }
}

impl From<OtherSymptom> for Symptom {
    fn from(value: OtherSymptom) -> Self {
        Symptom::Other(value)
    }
}

/// Clinical-guidance category assigned to a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomGroup {
    #[serde(rename = "EMERGENCY")]
    Emergency,
    #[serde(rename = "PRIMARY_1")]
    Primary1,
    #[serde(rename = "PRIMARY_2")]
    Primary2,
    #[serde(rename = "PRIMARY_3")]
    Primary3,
    #[serde(rename = "SECONDARY_1")]
    Secondary1,
    #[serde(rename = "SECONDARY_2")]
    Secondary2,
    #[serde(rename = "NON_COVID")]
    NonCovid,
    #[serde(rename = "ASYMPTOMATIC")]
    Asymptomatic,
}

impl SymptomGroup {
    pub const ALL: [SymptomGroup; 8] = [
        SymptomGroup::Emergency,
        SymptomGroup::Primary1,
        SymptomGroup::Primary2,
        SymptomGroup::Primary3,
        SymptomGroup::Secondary1,
        SymptomGroup::Secondary2,
        SymptomGroup::NonCovid,
        SymptomGroup::Asymptomatic,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SymptomGroup::Emergency => "EMERGENCY",
            SymptomGroup::Primary1 => "PRIMARY_1",
            SymptomGroup::Primary2 => "PRIMARY_2",
            SymptomGroup::Primary3 => "PRIMARY_3",
            SymptomGroup::Secondary1 => "SECONDARY_1",
            SymptomGroup::Secondary2 => "SECONDARY_2",
            SymptomGroup::NonCovid => "NON_COVID",
            SymptomGroup::Asymptomatic => "ASYMPTOMATIC",
        }
    }
}

impl fmt::Display for SymptomGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
