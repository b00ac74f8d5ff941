use std::fmt;
use std::sync::Arc;

use crate::client::DynCompletionClient;

use super::runner::Agent;
use super::prompts::*;

/// The fixed set of agents the pipelines call on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Researcher,
    CompetitorAnalyst,
    AudienceProfiler,
    ProductCreator,
    Copywriter,
    ContentCreator,
    EmailWriter,
    LeadGenerator,
    LeadQualifier,
    SalesCloser,
    SupportAgent,
    OutreachAgent,
}

impl AgentRole {
    pub const ALL: [AgentRole; 12] = [
        AgentRole::Researcher,
        AgentRole::CompetitorAnalyst,
        AgentRole::AudienceProfiler,
        AgentRole::ProductCreator,
        AgentRole::Copywriter,
        AgentRole::ContentCreator,
        AgentRole::EmailWriter,
        AgentRole::LeadGenerator,
        AgentRole::LeadQualifier,
        AgentRole::SalesCloser,
        AgentRole::SupportAgent,
        AgentRole::OutreachAgent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentRole::Researcher => "Researcher",
            AgentRole::CompetitorAnalyst => "CompetitorAnalyst",
            AgentRole::AudienceProfiler => "AudienceProfiler",
            AgentRole::ProductCreator => "ProductCreator",
            AgentRole::Copywriter => "Copywriter",
            AgentRole::ContentCreator => "ContentCreator",
            AgentRole::EmailWriter => "EmailWriter",
            AgentRole::LeadGenerator => "LeadGenerator",
            AgentRole::LeadQualifier => "LeadQualifier",
            AgentRole::SalesCloser => "SalesCloser",
            AgentRole::SupportAgent => "SupportAgent",
            AgentRole::OutreachAgent => "OutreachAgent",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            AgentRole::Researcher => RESEARCHER_PROMPT,
            AgentRole::CompetitorAnalyst => COMPETITOR_ANALYST_PROMPT,
            AgentRole::AudienceProfiler => AUDIENCE_PROFILER_PROMPT,
            AgentRole::ProductCreator => PRODUCT_CREATOR_PROMPT,
            AgentRole::Copywriter => COPYWRITER_PROMPT,
            AgentRole::ContentCreator => CONTENT_CREATOR_PROMPT,
            AgentRole::EmailWriter => EMAIL_WRITER_PROMPT,
            AgentRole::LeadGenerator => LEAD_GENERATOR_PROMPT,
            AgentRole::LeadQualifier => LEAD_QUALIFIER_PROMPT,
            AgentRole::SalesCloser => SALES_CLOSER_PROMPT,
            AgentRole::SupportAgent => SUPPORT_AGENT_PROMPT,
            AgentRole::OutreachAgent => OUTREACH_AGENT_PROMPT,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `Agent` per role, all sharing a single completion client. Built once
/// at start-up and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AgentRoster {
    agents: Vec<Agent>,
}

impl AgentRoster {
    pub fn new(client: Arc<DynCompletionClient>) -> Self {
        let agents = AgentRole::ALL
            .iter()
            .map(|role| Agent::new(role.name(), role.system_prompt(), client.clone()))
            .collect();
        Self { agents }
    }

    pub fn agent(&self, role: AgentRole) -> &Agent {
        // `agents` is built in `AgentRole::ALL` order.
        &self.agents[role as usize]
    }
}
