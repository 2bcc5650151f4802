use serde::{Deserialize, Serialize};

use super::super::domain::{AnswerSet, Tool};
use super::rules;

/// The fixed scoring dimensions. Declaration order is the display and chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKey {
    AiAssistance,
    Reporting,
    Maintenance,
    Execution,
    CrossBrowser,
    CiCd,
    BudgetFit,
    TeamSkillFit,
    LanguageFit,
    Analytics,
    Community,
}

impl CriterionKey {
    pub const COUNT: usize = 11;

    pub fn ordered() -> [Self; Self::COUNT] {
        std::array::from_fn(|index| CRITERIA[index].key)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        CRITERIA[self.index()].name
    }

    pub fn label(self) -> &'static str {
        CRITERIA[self.index()].label
    }

    pub fn parse(raw: &str) -> Option<Self> {
        CRITERIA
            .iter()
            .find(|rule| rule.name == raw)
            .map(|rule| rule.key)
    }
}

/// One row of the criterion table: identity, chart label, and how a tool is measured.
pub(crate) struct CriterionRule {
    pub key: CriterionKey,
    pub name: &'static str,
    pub label: &'static str,
    pub rationale: &'static str,
    pub resolve: fn(&Tool, &AnswerSet) -> f64,
}

/// Single source of truth for scoring order, labels, and resolvers.
pub(crate) const CRITERIA: [CriterionRule; CriterionKey::COUNT] = [
    CriterionRule {
        key: CriterionKey::AiAssistance,
        name: "ai_assistance",
        label: "AI Assistance",
        rationale: "AI-driven authoring and maintenance support",
        resolve: rules::ai_assistance,
    },
    CriterionRule {
        key: CriterionKey::Reporting,
        name: "reporting",
        label: "Reporting",
        rationale: "Depth of reporting, analytics, and insights",
        resolve: rules::reporting,
    },
    CriterionRule {
        key: CriterionKey::Maintenance,
        name: "maintenance",
        label: "Maintenance",
        rationale: "Expected maintenance effort from seed data",
        resolve: rules::maintenance,
    },
    CriterionRule {
        key: CriterionKey::Execution,
        name: "execution",
        label: "Execution",
        rationale: "Execution speed benchmarks",
        resolve: rules::execution,
    },
    CriterionRule {
        key: CriterionKey::CrossBrowser,
        name: "cross_browser",
        label: "Cross Browser",
        rationale: "Cross-browser/device coverage capabilities",
        resolve: rules::cross_browser,
    },
    CriterionRule {
        key: CriterionKey::CiCd,
        name: "ci_cd",
        label: "CI/CD",
        rationale: "Strength of CI/CD integrations",
        resolve: rules::ci_cd,
    },
    CriterionRule {
        key: CriterionKey::BudgetFit,
        name: "budget_fit",
        label: "Budget Fit",
        rationale: "Alignment with stated budget",
        resolve: rules::budget_fit,
    },
    CriterionRule {
        key: CriterionKey::TeamSkillFit,
        name: "team_skill_fit",
        label: "Team Fit",
        rationale: "Fit for team scripting proficiency",
        resolve: rules::team_skill_fit,
    },
    CriterionRule {
        key: CriterionKey::LanguageFit,
        name: "language_fit",
        label: "Language Fit",
        rationale: "Support for preferred language",
        resolve: rules::language_fit,
    },
    CriterionRule {
        key: CriterionKey::Analytics,
        name: "analytics",
        label: "Analytics",
        rationale: "Analytics depth and dashboards",
        resolve: rules::analytics,
    },
    CriterionRule {
        key: CriterionKey::Community,
        name: "community",
        label: "Community",
        rationale: "Ecosystem maturity and community strength",
        resolve: rules::community,
    },
];

/// Radar chart categories, positionally aligned with [`CriterionKey::ordered`].
pub fn radar_labels() -> Vec<String> {
    CRITERIA.iter().map(|rule| rule.label.to_string()).collect()
}
