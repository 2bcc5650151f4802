use super::domain::{AnswerSet, ToolProfile};

const MAX_SLIDER_VALUE: u8 = 100;
const MAX_TITLE_LENGTH: usize = 150;
const MAX_TOOL_NAME_LENGTH: usize = 100;
pub(crate) const DEFAULT_TITLE: &str = "Untitled Evaluation";

/// Validation errors raised before input reaches the scoring engine or the catalogue.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireViolation {
    #[error("{field} must be between 0 and 100 (found {found})")]
    SliderOutOfRange { field: &'static str, found: u8 },
    #[error("primary language is required")]
    MissingPrimaryLanguage,
    #[error("evaluation title exceeds 150 characters")]
    TitleTooLong,
    #[error("tool name exceeds 100 characters")]
    ToolNameTooLong,
}

/// Guard that turns caller-provided questionnaire data into engine input.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireGuard;

impl QuestionnaireGuard {
    pub fn accept(&self, answers: AnswerSet) -> Result<AnswerSet, QuestionnaireViolation> {
        check_slider("ai_automation_preference", answers.ai_automation_preference)?;
        check_slider("reporting_importance", answers.reporting_importance)?;

        if answers.primary_language.trim().is_empty() {
            return Err(QuestionnaireViolation::MissingPrimaryLanguage);
        }

        Ok(AnswerSet {
            primary_language: answers.primary_language.trim().to_string(),
            ..answers
        })
    }

    /// Trimmed title, or `None` when the caller left it blank.
    pub fn title(
        &self,
        requested: Option<&str>,
    ) -> Result<Option<String>, QuestionnaireViolation> {
        let Some(title) = requested.map(str::trim).filter(|title| !title.is_empty()) else {
            return Ok(None);
        };
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(QuestionnaireViolation::TitleTooLong);
        }
        Ok(Some(title.to_string()))
    }

    pub fn tool_name(&self, profile: &ToolProfile) -> Result<(), QuestionnaireViolation> {
        if profile.name.chars().count() > MAX_TOOL_NAME_LENGTH {
            return Err(QuestionnaireViolation::ToolNameTooLong);
        }
        Ok(())
    }
}

fn check_slider(field: &'static str, found: u8) -> Result<(), QuestionnaireViolation> {
    if found > MAX_SLIDER_VALUE {
        return Err(QuestionnaireViolation::SliderOutOfRange { field, found });
    }
    Ok(())
}
