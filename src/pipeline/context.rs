use serde_json::Value;

use super::operations::DEFAULT_LEAD_COUNT;
use super::outcome::{BuildOutcome, BuildOutputs};
use super::types::StageKind;

/// Immutable request passed into the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub niche: String,
    pub lead_count: u32,
}

impl BuildRequest {
    pub fn new(niche: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            lead_count: DEFAULT_LEAD_COUNT,
        }
    }

    pub fn with_lead_count(mut self, lead_count: u32) -> Self {
        self.lead_count = lead_count;
        self
    }
}

/// Per-build working state threaded through the stages. Nothing here is
/// shared; the owner merges the outputs once the build ends.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub request: BuildRequest,
    pub outputs: BuildOutputs,
    events: Vec<BuildEvent>,
}

impl BuildContext {
    pub fn new(request: BuildRequest) -> Self {
        Self {
            request,
            outputs: BuildOutputs::default(),
            events: Vec::new(),
        }
    }

    pub fn record_event(&mut self, event: BuildEvent) {
        self.events.push(event);
    }

    pub fn record_stage_start(&mut self, stage: StageKind) {
        tracing::info!(%stage, niche = %self.request.niche, "stage started");
        self.record_event(BuildEvent::StageStarted(stage));
    }

    pub fn record_stage_end(&mut self, stage: StageKind) {
        tracing::info!(%stage, "stage completed");
        self.record_event(BuildEvent::StageCompleted(stage));
    }

    pub fn record_stage_failure(&mut self, stage: StageKind, error: impl Into<String>) {
        let error = error.into();
        tracing::error!(%stage, %error, "stage failed");
        self.record_event(BuildEvent::StageFailed { stage, error });
    }

    pub fn record_research(&mut self, research: Value) {
        self.outputs.research = Some(research);
    }

    pub fn record_product(&mut self, product: Value) {
        self.outputs.product = Some(product);
    }

    pub fn record_marketing(&mut self, marketing: Value) {
        self.outputs.marketing = Some(marketing);
    }

    pub fn record_outreach_plan(&mut self, plan: Value) {
        self.outputs.outreach_plan = Some(plan);
    }

    pub fn record_initial_leads(&mut self, leads: Value) {
        self.outputs.initial_leads = Some(leads);
    }

    pub fn into_run(self) -> BuildRun {
        self.into_run_with_outcome(BuildOutcome::Completed)
    }

    pub fn into_run_with_outcome(self, outcome: BuildOutcome) -> BuildRun {
        let BuildContext {
            request,
            outputs,
            events,
        } = self;
        BuildRun {
            request,
            outcome,
            outputs,
            events,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildRun {
    pub request: BuildRequest,
    pub outcome: BuildOutcome,
    pub outputs: BuildOutputs,
    pub events: Vec<BuildEvent>,
}

/// Audit events emitted while progressing through the build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageFailed { stage: StageKind, error: String },
}
