use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::agent::{AgentRole, AgentRoster};
use crate::structured::{scalar_text, section};

use super::templates;

/// Launch price quoted in the email sequence when pricing came back without one.
pub const FALLBACK_LAUNCH_PRICE: &str = "27";
pub const DEFAULT_LEAD_COUNT: u32 = 10;

/// The business pipeline operations. Every call is a pure composition of
/// agent calls: nothing here touches the business state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    roster: AgentRoster,
}

impl Pipeline {
    pub fn new(roster: AgentRoster) -> Self {
        Self { roster }
    }

    async fn ask(&self, role: AgentRole, task: String) -> Result<Value> {
        self.roster.agent(role).run_json(&task, "").await
    }

    /// Market, competitor and audience research for a niche. The three calls
    /// share no data and run concurrently.
    pub async fn research(&self, niche: &str) -> Result<Value> {
        let (market, competitors, audience) = tokio::try_join!(
            self.ask(AgentRole::Researcher, templates::market_research(niche)),
            self.ask(
                AgentRole::CompetitorAnalyst,
                templates::competitor_analysis(niche)
            ),
            self.ask(AgentRole::AudienceProfiler, templates::buyer_persona(niche)),
        )?;

        Ok(stage_output([
            ("market", market),
            ("competitors", competitors),
            ("audience", audience),
        ]))
    }

    /// Product definition, then sales copy and pricing derived from it.
    pub async fn product(&self, niche: &str, research: &Value) -> Result<Value> {
        let product = self
            .ask(
                AgentRole::ProductCreator,
                templates::product_design(niche, research),
            )
            .await?;

        let (copy, pricing) = tokio::try_join!(
            self.ask(
                AgentRole::Copywriter,
                templates::sales_copy(&product, &section(research, "audience")),
            ),
            self.ask(
                AgentRole::Researcher,
                templates::pricing(&product, &section(research, "competitors")),
            ),
        )?;

        Ok(stage_output([
            ("product", product),
            ("copy", copy),
            ("pricing", pricing),
        ]))
    }

    /// Lead magnet, the welcome emails that deliver it, and a social calendar.
    pub async fn marketing(&self, product: &Value, research: &Value) -> Result<Value> {
        let details = section(product, "product");
        let lead_magnet = self
            .ask(AgentRole::LeadGenerator, templates::lead_magnet(&details))
            .await?;

        let launch_price = scalar_text(
            product
                .get("pricing")
                .and_then(|pricing| pricing.get("launch_price")),
            FALLBACK_LAUNCH_PRICE,
        );

        let (emails, social) = tokio::try_join!(
            self.ask(
                AgentRole::EmailWriter,
                templates::welcome_emails(&lead_magnet, &details, &launch_price),
            ),
            self.ask(
                AgentRole::ContentCreator,
                templates::social_calendar(&details, &section(research, "audience")),
            ),
        )?;

        Ok(stage_output([
            ("lead_magnet", lead_magnet),
            ("emails", emails),
            ("social", social),
        ]))
    }

    pub async fn outreach_plan(&self, niche: &str, research: &Value) -> Result<Value> {
        self.ask(
            AgentRole::OutreachAgent,
            templates::outreach_plan(niche, &section(research, "audience")),
        )
        .await
    }

    pub async fn lead_discovery(&self, niche: &str, count: u32) -> Result<Value> {
        self.ask(
            AgentRole::OutreachAgent,
            templates::lead_discovery(niche, count),
        )
        .await
    }

    pub async fn qualify_lead(&self, lead: &Value, product: &Value) -> Result<Value> {
        self.ask(
            AgentRole::LeadQualifier,
            templates::lead_qualification(lead, product),
        )
        .await
    }

    pub async fn handle_inquiry(&self, message: &str, product: &Value) -> Result<Value> {
        self.ask(
            AgentRole::SalesCloser,
            templates::sales_inquiry(message, product),
        )
        .await
    }

    pub async fn handle_support(&self, message: &str, customer: Option<&Value>) -> Result<Value> {
        let customer = customer
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| json!({}));
        self.ask(
            AgentRole::SupportAgent,
            templates::support_request(message, &customer),
        )
        .await
    }
}

fn stage_output<const N: usize>(parts: [(&str, Value); N]) -> Value {
    let map: Map<String, Value> = parts
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    Value::Object(map)
}
