use serde_json::Value;

use super::types::StageKind;

/// Results of the build stages that completed. A failed build keeps the
/// outputs of the stages that ran before the failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutputs {
    pub research: Option<Value>,
    pub product: Option<Value>,
    pub marketing: Option<Value>,
    pub outreach_plan: Option<Value>,
    pub initial_leads: Option<Value>,
}

impl BuildOutputs {
    pub fn completed_stages(&self) -> usize {
        [
            &self.research,
            &self.product,
            &self.marketing,
            &self.outreach_plan,
            &self.initial_leads,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }
}

/// Terminal result of a build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Completed,
    Failed { stage: StageKind, error: String },
}

impl BuildOutcome {
    pub fn failed(stage: StageKind, error: impl Into<String>) -> Self {
        Self::Failed {
            stage,
            error: error.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, BuildOutcome::Completed)
    }
}
