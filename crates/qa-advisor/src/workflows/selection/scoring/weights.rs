use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::super::domain::{
    AnswerSet, BudgetTier, MaintenanceTeamSize, ProjectDuration, ProjectType, RunFrequency,
    ScriptingSkill, TestingApproach,
};
use super::config::ScoringConfig;
use super::criteria::CriterionKey;
use super::round2;

/// Caller-supplied replacement weights keyed by criterion name.
pub type WeightOverrides = BTreeMap<String, f64>;

/// One positive weight per criterion, held in criterion order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct WeightProfile {
    values: [f64; CriterionKey::COUNT],
}

impl WeightProfile {
    pub const fn from_values(values: [f64; CriterionKey::COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, key: CriterionKey) -> f64 {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: CriterionKey, value: f64) {
        self.values[key.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (CriterionKey, f64)> + '_ {
        CriterionKey::ordered()
            .into_iter()
            .map(|key| (key, self.get(key)))
    }

    /// Highest weighted total a tool could reach under this profile.
    pub fn max_possible(&self) -> f64 {
        self.values.iter().map(|weight| 5.0 * weight).sum()
    }

    /// Rescale so the mean weight is 1.0, keeping relative emphasis.
    pub fn normalised(&self) -> Self {
        let sum: f64 = self.values.iter().sum();
        if sum == 0.0 {
            return *self;
        }
        let factor = CriterionKey::COUNT as f64 / sum;
        Self {
            values: self.values.map(|weight| round2(weight * factor)),
        }
    }

    /// Replace weights named in `overrides`, floored at `floor`. Unknown names are skipped, as
    /// are values that are non-finite or would push the maximum total past `f64::MAX`.
    pub fn with_overrides(&self, overrides: &WeightOverrides, floor: f64) -> Self {
        let mut profile = *self;
        for (name, value) in overrides {
            let Some(key) = CriterionKey::parse(name) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            let previous = profile.get(key);
            profile.set(key, round2(value.max(floor)));
            if !profile.max_possible().is_finite() {
                profile.set(key, previous);
            }
        }
        profile
    }

    fn add(&mut self, key: CriterionKey, delta: f64) {
        self.values[key.index()] += delta;
    }
}

impl Serialize for WeightProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CriterionKey::COUNT))?;
        for (key, weight) in self.iter() {
            map.serialize_entry(key.as_str(), &weight)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightProfile {
    type Error = String;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; CriterionKey::COUNT];
        for key in CriterionKey::ordered() {
            values[key.index()] = *raw
                .get(key.as_str())
                .ok_or_else(|| format!("weight profile missing '{}'", key.as_str()))?;
        }
        Ok(Self { values })
    }
}

type Adjustment = &'static [(CriterionKey, f64)];

/// Additive rules, each keyed off a single answer.
const ADJUSTMENT_RULES: [fn(&AnswerSet) -> Adjustment; 11] = [
    project_type_rule,
    scripting_skill_rule,
    ci_cd_rule,
    cross_browser_rule,
    ai_preference_rule,
    reporting_rule,
    budget_rule,
    run_frequency_rule,
    team_size_rule,
    approach_rule,
    duration_rule,
];

/// Derive the weight profile for a questionnaire response.
pub fn derive_weights(answers: &AnswerSet, config: &ScoringConfig) -> WeightProfile {
    let mut profile = config.base_weights;

    for rule in ADJUSTMENT_RULES {
        for &(key, delta) in rule(answers) {
            profile.add(key, delta);
        }
    }

    for weight in profile.values.iter_mut() {
        *weight = round2(weight.max(config.derivation_floor));
    }

    profile
}

fn project_type_rule(answers: &AnswerSet) -> Adjustment {
    match answers.project_type {
        ProjectType::Web => &[
            (CriterionKey::CrossBrowser, 0.4),
            (CriterionKey::Execution, 0.2),
        ],
        ProjectType::Mobile => &[
            (CriterionKey::CrossBrowser, 0.2),
            (CriterionKey::AiAssistance, 0.2),
        ],
        ProjectType::Api => &[
            (CriterionKey::Execution, 0.3),
            (CriterionKey::Maintenance, 0.2),
        ],
        ProjectType::Other => &[],
    }
}

fn scripting_skill_rule(answers: &AnswerSet) -> Adjustment {
    match answers.team_scripting_skill {
        ScriptingSkill::Low => &[
            (CriterionKey::AiAssistance, 0.6),
            (CriterionKey::Maintenance, 0.4),
        ],
        ScriptingSkill::Medium => &[(CriterionKey::Maintenance, 0.2)],
        ScriptingSkill::High => &[
            (CriterionKey::TeamSkillFit, 0.3),
            (CriterionKey::LanguageFit, 0.2),
        ],
    }
}

fn ci_cd_rule(answers: &AnswerSet) -> Adjustment {
    if answers.ci_cd_required {
        &[(CriterionKey::CiCd, 0.6)]
    } else {
        &[]
    }
}

fn cross_browser_rule(answers: &AnswerSet) -> Adjustment {
    if answers.cross_browser_required {
        &[(CriterionKey::CrossBrowser, 0.6)]
    } else {
        &[]
    }
}

fn ai_preference_rule(answers: &AnswerSet) -> Adjustment {
    match answers.ai_automation_preference {
        70..=u8::MAX => &[(CriterionKey::AiAssistance, 0.6)],
        40..=69 => &[(CriterionKey::AiAssistance, 0.3)],
        _ => &[],
    }
}

fn reporting_rule(answers: &AnswerSet) -> Adjustment {
    match answers.reporting_importance {
        70..=u8::MAX => &[
            (CriterionKey::Reporting, 0.6),
            (CriterionKey::Analytics, 0.2),
        ],
        40..=69 => &[(CriterionKey::Reporting, 0.3)],
        _ => &[],
    }
}

fn budget_rule(answers: &AnswerSet) -> Adjustment {
    match answers.budget {
        BudgetTier::Free => &[(CriterionKey::BudgetFit, 0.6)],
        BudgetTier::UnderFiveHundred => &[(CriterionKey::BudgetFit, 0.3)],
        BudgetTier::OverFiveHundred | BudgetTier::Enterprise => &[],
    }
}

fn run_frequency_rule(answers: &AnswerSet) -> Adjustment {
    match answers.test_run_frequency {
        RunFrequency::Daily => &[
            (CriterionKey::Execution, 0.5),
            (CriterionKey::Maintenance, 0.3),
        ],
        RunFrequency::Weekly => &[(CriterionKey::Execution, 0.2)],
        RunFrequency::Other => &[],
    }
}

fn team_size_rule(answers: &AnswerSet) -> Adjustment {
    match answers.maintenance_team_size {
        MaintenanceTeamSize::OverTen => &[(CriterionKey::Maintenance, -0.2)],
        MaintenanceTeamSize::OneToThree => &[(CriterionKey::Maintenance, 0.4)],
        MaintenanceTeamSize::FourToTen => &[],
    }
}

fn approach_rule(answers: &AnswerSet) -> Adjustment {
    match answers.preferred_approach {
        TestingApproach::Scriptless => &[
            (CriterionKey::AiAssistance, 0.4),
            (CriterionKey::Maintenance, 0.3),
        ],
        TestingApproach::KeywordDriven => &[(CriterionKey::TeamSkillFit, 0.2)],
        TestingApproach::Hybrid => &[
            (CriterionKey::TeamSkillFit, 0.3),
            (CriterionKey::Maintenance, 0.2),
        ],
    }
}

fn duration_rule(answers: &AnswerSet) -> Adjustment {
    match answers.expected_duration {
        ProjectDuration::OverOneYear => &[
            (CriterionKey::Maintenance, 0.4),
            (CriterionKey::Community, 0.2),
        ],
        ProjectDuration::UnderSixMonths => &[(CriterionKey::Execution, 0.2)],
        ProjectDuration::SixToTwelveMonths => &[],
    }
}
