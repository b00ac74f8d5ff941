use std::sync::Arc;

use async_trait::async_trait;

use super::context::{BuildContext, BuildRequest, BuildRun};
use super::operations::Pipeline;
use super::outcome::{BuildOutcome, BuildOutputs};
use super::types::StageKind;
use super::stages::{
    BuildStage, LeadDiscoveryStage, MarketingStage, OutreachPlanStage, ProductStage,
    ResearchStage,
};

/// Told about every stage that completes, with all outputs produced so far.
#[async_trait]
pub trait BuildObserver: Send + Sync {
    async fn stage_completed(&self, stage: StageKind, outputs: &BuildOutputs);
}

struct Unobserved;

#[async_trait]
impl BuildObserver for Unobserved {
    async fn stage_completed(&self, _stage: StageKind, _outputs: &BuildOutputs) {}
}

/// Runs build stages strictly in order; the first failure ends the build.
pub struct BuildOrchestrator {
    stages: Vec<Box<dyn BuildStage>>,
}

impl BuildOrchestrator {
    pub fn new(stages: Vec<Box<dyn BuildStage>>) -> Self {
        Self { stages }
    }

    pub fn builder() -> BuildPipelineBuilder {
        BuildPipelineBuilder::new()
    }

    /// Research, product, marketing, outreach plan, lead discovery.
    pub fn standard(pipeline: Arc<Pipeline>) -> Self {
        Self::builder().with_standard_stages(pipeline).build()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub async fn run(&self, request: BuildRequest) -> BuildRun {
        self.run_observed(request, &Unobserved).await
    }

    pub async fn run_observed(
        &self,
        request: BuildRequest,
        observer: &dyn BuildObserver,
    ) -> BuildRun {
        let mut context = BuildContext::new(request);

        for stage in &self.stages {
            let kind = stage.kind();
            context.record_stage_start(kind);
            if let Err(error) = stage.execute(&mut context).await {
                let message = format!("{error:#}");
                context.record_stage_failure(kind, &message);
                return context.into_run_with_outcome(BuildOutcome::failed(kind, message));
            }
            context.record_stage_end(kind);
            observer.stage_completed(kind, &context.outputs).await;
        }

        context.into_run()
    }
}

pub struct BuildPipelineBuilder {
    stages: Vec<Box<dyn BuildStage>>,
}

impl BuildPipelineBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn add_stage<S>(mut self, stage: S) -> Self
    where
        S: BuildStage + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn with_standard_stages(self, pipeline: Arc<Pipeline>) -> Self {
        self.add_stage(ResearchStage::new(pipeline.clone()))
            .add_stage(ProductStage::new(pipeline.clone()))
            .add_stage(MarketingStage::new(pipeline.clone()))
            .add_stage(OutreachPlanStage::new(pipeline.clone()))
            .add_stage(LeadDiscoveryStage::new(pipeline))
    }

    pub fn build(self) -> BuildOrchestrator {
        BuildOrchestrator::new(self.stages)
    }
}

impl Default for BuildPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
