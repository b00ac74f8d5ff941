use std::sync::Arc;

use anyhow::{Result, anyhow};
use serde_json::Value;
use async_trait::async_trait;

use super::context::BuildContext;
use super::operations::Pipeline;
use super::types::StageKind;

#[async_trait]
pub trait BuildStage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn execute(&self, context: &mut BuildContext) -> Result<()>;
}

pub struct ResearchStage {
    pipeline: Arc<Pipeline>,
}

impl ResearchStage {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl BuildStage for ResearchStage {
    fn kind(&self) -> StageKind {
        StageKind::Research
    }

    async fn execute(&self, context: &mut BuildContext) -> Result<()> {
        let research = self.pipeline.research(&context.request.niche).await?;
        context.record_research(research);
        Ok(())
    }
}

pub struct ProductStage {
    pipeline: Arc<Pipeline>,
}

impl ProductStage {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl BuildStage for ProductStage {
    fn kind(&self) -> StageKind {
        StageKind::Product
    }

    async fn execute(&self, context: &mut BuildContext) -> Result<()> {
        let research = upstream(context.outputs.research.as_ref(), StageKind::Research)?;

        let product = self
            .pipeline
            .product(&context.request.niche, &research)
            .await?;
        context.record_product(product);
        Ok(())
    }
}

pub struct MarketingStage {
    pipeline: Arc<Pipeline>,
}

impl MarketingStage {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl BuildStage for MarketingStage {
    fn kind(&self) -> StageKind {
        StageKind::Marketing
    }

    async fn execute(&self, context: &mut BuildContext) -> Result<()> {
        let product = upstream(context.outputs.product.as_ref(), StageKind::Product)?;
        let research = upstream(context.outputs.research.as_ref(), StageKind::Research)?;

        let marketing = self.pipeline.marketing(&product, &research).await?;
        context.record_marketing(marketing);
        Ok(())
    }
}

pub struct OutreachPlanStage {
    pipeline: Arc<Pipeline>,
}

impl OutreachPlanStage {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl BuildStage for OutreachPlanStage {
    fn kind(&self) -> StageKind {
        StageKind::OutreachPlan
    }

    async fn execute(&self, context: &mut BuildContext) -> Result<()> {
        let research = upstream(context.outputs.research.as_ref(), StageKind::Research)?;

        let plan = self
            .pipeline
            .outreach_plan(&context.request.niche, &research)
            .await?;
        context.record_outreach_plan(plan);
        Ok(())
    }
}

pub struct LeadDiscoveryStage {
    pipeline: Arc<Pipeline>,
}

impl LeadDiscoveryStage {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl BuildStage for LeadDiscoveryStage {
    fn kind(&self) -> StageKind {
        StageKind::LeadDiscovery
    }

    async fn execute(&self, context: &mut BuildContext) -> Result<()> {
        let leads = self
            .pipeline
            .lead_discovery(&context.request.niche, context.request.lead_count)
            .await?;
        context.record_initial_leads(leads);
        Ok(())
    }
}

fn upstream(output: Option<&Value>, stage: StageKind) -> Result<Value> {
    output
        .cloned()
        .ok_or_else(|| anyhow!("{stage} output is missing"))
}
