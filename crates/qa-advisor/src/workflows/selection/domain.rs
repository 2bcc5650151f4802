use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier wrapper for catalogue entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolId(pub u32);

/// Identifier wrapper for stored evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Serde glue for questionnaire enums that travel as free-form strings.
macro_rules! questionnaire_string {
    ($ty:ty, $field:literal) => {
        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value).ok_or_else(|| format!("unsupported {} '{}'", $field, value))
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Kind of product under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectType {
    Web,
    Mobile,
    Api,
    Other,
}

impl ProjectType {
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match compact(raw).as_str() {
            "web" => Self::Web,
            "mobile" => Self::Mobile,
            "api" => Self::Api,
            _ => Self::Other,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Api => "api",
            Self::Other => "other",
        }
    }
}

questionnaire_string!(ProjectType, "project type");

/// Self-assessed comfort with code-first frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScriptingSkill {
    Low,
    Medium,
    High,
}

impl ScriptingSkill {
    pub fn parse(raw: &str) -> Option<Self> {
        match compact(raw).as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

questionnaire_string!(ScriptingSkill, "scripting skill");

/// Annual tooling budget. Also used to read a tool's pricing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BudgetTier {
    Free,
    UnderFiveHundred,
    OverFiveHundred,
    Enterprise,
}

impl BudgetTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match compact(raw).as_str() {
            "free" => Some(Self::Free),
            "<$500" => Some(Self::UnderFiveHundred),
            ">$500" => Some(Self::OverFiveHundred),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::UnderFiveHundred => "< $500",
            Self::OverFiveHundred => "> $500",
            Self::Enterprise => "enterprise",
        }
    }
}

questionnaire_string!(BudgetTier, "budget");

/// How often the suites are expected to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RunFrequency {
    Daily,
    Weekly,
    Other,
}

impl RunFrequency {
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match compact(raw).as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            _ => Self::Other,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Other => "other",
        }
    }
}

questionnaire_string!(RunFrequency, "test run frequency");

/// Headcount maintaining the automated suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MaintenanceTeamSize {
    OneToThree,
    FourToTen,
    OverTen,
}

impl MaintenanceTeamSize {
    pub fn parse(raw: &str) -> Option<Self> {
        match compact(raw).as_str() {
            "1-3" => Some(Self::OneToThree),
            "4-10" => Some(Self::FourToTen),
            ">10" => Some(Self::OverTen),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToThree => "1-3",
            Self::FourToTen => "4-10",
            Self::OverTen => ">10",
        }
    }
}

questionnaire_string!(MaintenanceTeamSize, "maintenance team size");

/// Authoring style the team prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TestingApproach {
    Scriptless,
    KeywordDriven,
    Hybrid,
}

impl TestingApproach {
    pub fn parse(raw: &str) -> Option<Self> {
        match compact(raw).as_str() {
            "scriptless" => Some(Self::Scriptless),
            "keyword-driven" | "keyworddriven" => Some(Self::KeywordDriven),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scriptless => "scriptless",
            Self::KeywordDriven => "keyword-driven",
            Self::Hybrid => "hybrid",
        }
    }
}

questionnaire_string!(TestingApproach, "preferred approach");

/// Expected lifetime of the automation effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectDuration {
    UnderSixMonths,
    SixToTwelveMonths,
    OverOneYear,
}

impl ProjectDuration {
    pub fn parse(raw: &str) -> Option<Self> {
        match compact(raw).as_str() {
            "<6months" => Some(Self::UnderSixMonths),
            "6-12months" => Some(Self::SixToTwelveMonths),
            ">1year" => Some(Self::OverOneYear),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderSixMonths => "<6 months",
            Self::SixToTwelveMonths => "6-12 months",
            Self::OverOneYear => ">1 year",
        }
    }
}

questionnaire_string!(ProjectDuration, "expected duration");

/// Complete questionnaire response. Built once per evaluation request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub project_type: ProjectType,
    pub team_scripting_skill: ScriptingSkill,
    pub primary_language: String,
    pub budget: BudgetTier,
    pub test_run_frequency: RunFrequency,
    pub ci_cd_required: bool,
    pub ai_automation_preference: u8,
    pub maintenance_team_size: MaintenanceTeamSize,
    pub cross_browser_required: bool,
    pub reporting_importance: u8,
    pub preferred_approach: TestingApproach,
    pub expected_duration: ProjectDuration,
}

impl AnswerSet {
    pub fn prefers_other_language(&self) -> bool {
        self.primary_language.trim().eq_ignore_ascii_case("other")
    }
}

/// Catalogue entry as stored, identity plus descriptive profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: ToolId,
    #[serde(flatten)]
    pub profile: ToolProfile,
}

/// Intrinsic attributes of an automation tool. Read-only to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default = "default_pricing_tier")]
    pub pricing_tier: String,
    #[serde(default = "default_rating")]
    pub ai_capability: u8,
    #[serde(default = "default_true")]
    pub ci_cd_support: bool,
    #[serde(default = "default_true")]
    pub supports_cross_browser: bool,
    #[serde(default)]
    pub has_mobile_support: bool,
    #[serde(default = "default_true")]
    pub supports_api: bool,
    #[serde(default = "default_rating")]
    pub maintenance_effort: u8,
    #[serde(default = "default_rating")]
    pub reporting_quality: u8,
    #[serde(default = "default_rating")]
    pub execution_speed: u8,
    #[serde(default = "default_rating")]
    pub analytics_depth: u8,
    #[serde(default = "default_rating")]
    pub community_strength: u8,
    #[serde(default)]
    pub onboarding_time_minutes: Option<u32>,
    #[serde(default)]
    pub avg_dev_steps: Option<u32>,
    #[serde(default)]
    pub avg_execution_seconds: Option<f64>,
    #[serde(default = "default_skill")]
    pub learning_curve: String,
    #[serde(default = "default_skill")]
    pub recommended_team_skill: String,
    #[serde(default)]
    pub preferred_project_types: BTreeMap<String, f64>,
    #[serde(default)]
    pub languages_supported: Vec<String>,
    #[serde(default)]
    pub criteria_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub additional_metadata: Map<String, Value>,
}

fn default_pricing_tier() -> String {
    "free".to_string()
}

const fn default_rating() -> u8 {
    3
}

const fn default_true() -> bool {
    true
}

fn default_skill() -> String {
    "medium".to_string()
}

impl ToolProfile {
    /// Profile with catalogue defaults for every optional attribute.
    pub fn named(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            tagline: None,
            summary: None,
            overall_score: 0.0,
            pricing_tier: default_pricing_tier(),
            ai_capability: default_rating(),
            ci_cd_support: true,
            supports_cross_browser: true,
            has_mobile_support: false,
            supports_api: true,
            maintenance_effort: default_rating(),
            reporting_quality: default_rating(),
            execution_speed: default_rating(),
            analytics_depth: default_rating(),
            community_strength: default_rating(),
            onboarding_time_minutes: None,
            avg_dev_steps: None,
            avg_execution_seconds: None,
            learning_curve: default_skill(),
            recommended_team_skill: default_skill(),
            preferred_project_types: BTreeMap::new(),
            languages_supported: Vec::new(),
            criteria_scores: BTreeMap::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            additional_metadata: Map::new(),
        }
    }

    /// Tool-level replacement for a criterion's derived value, when the catalogue carries one.
    pub fn criterion_override(&self, name: &str) -> Option<f64> {
        self.criteria_scores
            .get(name)
            .copied()
            .filter(|value| value.is_finite())
    }

    pub fn supports_language(&self, language: &str) -> bool {
        let wanted = language.trim();
        self.languages_supported
            .iter()
            .any(|supported| supported.trim().eq_ignore_ascii_case(wanted))
    }

    /// Use cases listed under the `best_for` metadata key.
    pub fn best_for(&self) -> Vec<String> {
        match self.additional_metadata.get("best_for") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Partial update for a catalogue entry; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub tagline: Option<String>,
    pub summary: Option<String>,
    pub overall_score: Option<f64>,
    pub pricing_tier: Option<String>,
    pub ai_capability: Option<u8>,
    pub ci_cd_support: Option<bool>,
    pub supports_cross_browser: Option<bool>,
    pub has_mobile_support: Option<bool>,
    pub supports_api: Option<bool>,
    pub maintenance_effort: Option<u8>,
    pub reporting_quality: Option<u8>,
    pub execution_speed: Option<u8>,
    pub analytics_depth: Option<u8>,
    pub community_strength: Option<u8>,
    pub onboarding_time_minutes: Option<u32>,
    pub avg_dev_steps: Option<u32>,
    pub avg_execution_seconds: Option<f64>,
    pub learning_curve: Option<String>,
    pub recommended_team_skill: Option<String>,
    pub preferred_project_types: Option<BTreeMap<String, f64>>,
    pub languages_supported: Option<Vec<String>>,
    pub criteria_scores: Option<BTreeMap<String, f64>>,
    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
    pub additional_metadata: Option<Map<String, Value>>,
}

impl ToolPatch {
    pub fn apply(self, profile: &mut ToolProfile) {
        if let Some(value) = self.name {
            profile.name = value;
        }
        if let Some(value) = self.slug {
            profile.slug = value;
        }
        if let Some(value) = self.tagline {
            profile.tagline = Some(value);
        }
        if let Some(value) = self.summary {
            profile.summary = Some(value);
        }
        if let Some(value) = self.overall_score {
            profile.overall_score = value;
        }
        if let Some(value) = self.pricing_tier {
            profile.pricing_tier = value;
        }
        if let Some(value) = self.ai_capability {
            profile.ai_capability = value;
        }
        if let Some(value) = self.ci_cd_support {
            profile.ci_cd_support = value;
        }
        if let Some(value) = self.supports_cross_browser {
            profile.supports_cross_browser = value;
        }
        if let Some(value) = self.has_mobile_support {
            profile.has_mobile_support = value;
        }
        if let Some(value) = self.supports_api {
            profile.supports_api = value;
        }
        if let Some(value) = self.maintenance_effort {
            profile.maintenance_effort = value;
        }
        if let Some(value) = self.reporting_quality {
            profile.reporting_quality = value;
        }
        if let Some(value) = self.execution_speed {
            profile.execution_speed = value;
        }
        if let Some(value) = self.analytics_depth {
            profile.analytics_depth = value;
        }
        if let Some(value) = self.community_strength {
            profile.community_strength = value;
        }
        if let Some(value) = self.onboarding_time_minutes {
            profile.onboarding_time_minutes = Some(value);
        }
        if let Some(value) = self.avg_dev_steps {
            profile.avg_dev_steps = Some(value);
        }
        if let Some(value) = self.avg_execution_seconds {
            profile.avg_execution_seconds = Some(value);
        }
        if let Some(value) = self.learning_curve {
            profile.learning_curve = value;
        }
        if let Some(value) = self.recommended_team_skill {
            profile.recommended_team_skill = value;
        }
        if let Some(value) = self.preferred_project_types {
            profile.preferred_project_types = value;
        }
        if let Some(value) = self.languages_supported {
            profile.languages_supported = value;
        }
        if let Some(value) = self.criteria_scores {
            profile.criteria_scores = value;
        }
        if let Some(value) = self.pros {
            profile.pros = value;
        }
        if let Some(value) = self.cons {
            profile.cons = value;
        }
        if let Some(value) = self.additional_metadata {
            profile.additional_metadata = value;
        }
    }
}
