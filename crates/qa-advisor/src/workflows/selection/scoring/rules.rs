use super::super::domain::{AnswerSet, BudgetTier, ScriptingSkill, Tool};
use super::round2;

pub(crate) const MAX_CRITERION_VALUE: f64 = 5.0;

/// Clamp into `[0, 5]` and round to two decimals.
pub(crate) fn scale(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    round2(value.clamp(0.0, MAX_CRITERION_VALUE))
}

fn tool_value(tool: &Tool, override_key: &str, fallback: f64) -> f64 {
    tool.profile
        .criterion_override(override_key)
        .unwrap_or(fallback)
}

pub(crate) fn ai_assistance(tool: &Tool, _answers: &AnswerSet) -> f64 {
    tool_value(tool, "ai_assistance", f64::from(tool.profile.ai_capability))
}

pub(crate) fn reporting(tool: &Tool, _answers: &AnswerSet) -> f64 {
    tool_value(
        tool,
        "reporting_quality",
        f64::from(tool.profile.reporting_quality),
    )
}

/// Inverts effort so that lighter upkeep scores higher.
pub(crate) fn maintenance(tool: &Tool, _answers: &AnswerSet) -> f64 {
    let inverted = 6.0 - f64::from(tool.profile.maintenance_effort);
    tool_value(tool, "maintenance", inverted)
}

pub(crate) fn execution(tool: &Tool, _answers: &AnswerSet) -> f64 {
    tool_value(tool, "execution_speed", f64::from(tool.profile.execution_speed))
}

pub(crate) fn cross_browser(tool: &Tool, _answers: &AnswerSet) -> f64 {
    let fallback = if tool.profile.supports_cross_browser {
        5.0
    } else {
        3.0
    };
    tool_value(tool, "cross_browser_support", fallback)
}

pub(crate) fn ci_cd(tool: &Tool, _answers: &AnswerSet) -> f64 {
    let fallback = if tool.profile.ci_cd_support { 5.0 } else { 3.0 };
    tool_value(tool, "ci_cd", fallback)
}

pub(crate) fn budget_fit(tool: &Tool, answers: &AnswerSet) -> f64 {
    let requested = budget_rank(Some(answers.budget));
    let offered = budget_rank(BudgetTier::parse(&tool.profile.pricing_tier));
    distance_score(requested, offered)
}

pub(crate) fn team_skill_fit(tool: &Tool, answers: &AnswerSet) -> f64 {
    let requested = match answers.team_scripting_skill {
        ScriptingSkill::Low => 1,
        ScriptingSkill::Medium => 3,
        ScriptingSkill::High => 5,
    };
    let recommended = match ScriptingSkill::parse(&tool.profile.recommended_team_skill) {
        Some(ScriptingSkill::Low) => 2,
        Some(ScriptingSkill::Medium) | None => 3,
        Some(ScriptingSkill::High) => 4,
    };
    distance_score(requested, recommended)
}

pub(crate) fn language_fit(tool: &Tool, answers: &AnswerSet) -> f64 {
    let membership = if answers.prefers_other_language() {
        3.0
    } else if tool.profile.supports_language(&answers.primary_language) {
        5.0
    } else {
        2.5
    };
    tool_value(tool, "language_fit", membership)
}

pub(crate) fn analytics(tool: &Tool, _answers: &AnswerSet) -> f64 {
    tool_value(tool, "analytics_depth", f64::from(tool.profile.analytics_depth))
}

pub(crate) fn community(tool: &Tool, _answers: &AnswerSet) -> f64 {
    tool_value(
        tool,
        "community_strength",
        f64::from(tool.profile.community_strength),
    )
}

/// Ordinal rank of a budget tier; unknown tiers sit in the middle.
fn budget_rank(tier: Option<BudgetTier>) -> i32 {
    match tier {
        Some(BudgetTier::Free) => 5,
        Some(BudgetTier::UnderFiveHundred) => 4,
        Some(BudgetTier::OverFiveHundred) => 2,
        Some(BudgetTier::Enterprise) => 1,
        None => 3,
    }
}

fn distance_score(requested: i32, offered: i32) -> f64 {
    scale(f64::from(5 - (requested - offered).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_clamps_and_rounds() {
        assert_eq!(scale(-1.0), 0.0);
        assert_eq!(scale(7.5), 5.0);
        assert_eq!(scale(3.456), 3.46);
        assert_eq!(scale(f64::NAN), 0.0);
    }

    #[test]
    fn distance_score_drops_one_point_per_step() {
        assert_eq!(distance_score(5, 5), 5.0);
        assert_eq!(distance_score(5, 1), 1.0);
        assert_eq!(distance_score(1, 4), 2.0);
    }

    #[test]
    fn unknown_pricing_tier_ranks_mid_table() {
        assert_eq!(budget_rank(BudgetTier::parse("usage based")), 3);
        assert_eq!(budget_rank(BudgetTier::parse("< $500")), 4);
    }
}
