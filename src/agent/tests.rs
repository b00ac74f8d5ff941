use std::sync::Arc;

use serde_json::json;

use crate::testing::ScriptedClient;

use super::{Agent, AgentRole, AgentRoster, JSON_ONLY_INSTRUCTION};

fn agent_with(client: Arc<ScriptedClient>) -> Agent {
    Agent::new("Tester", "You test things.", client)
}

#[tokio::test]
async fn run_without_context_sends_task_alone() {
    let client = Arc::new(ScriptedClient::constant("done"));
    let agent = agent_with(client.clone());

    let text = agent.run("List three ideas", "").await.unwrap();

    assert_eq!(text, "done");
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].system, "You test things.");
    assert_eq!(calls[0].prompt, "List three ideas");
}

#[tokio::test]
async fn run_with_context_prefixes_it() {
    let client = Arc::new(ScriptedClient::constant("done"));
    let agent = agent_with(client.clone());

    agent.run("Summarise", "Niche: desk toys").await.unwrap();

    assert_eq!(client.calls()[0].prompt, "Niche: desk toys\n\nSummarise");
}

#[tokio::test]
async fn run_returns_text_verbatim() {
    let client = Arc::new(ScriptedClient::constant("  spaced\n output  "));
    let agent = agent_with(client);

    assert_eq!(agent.run("task", "").await.unwrap(), "  spaced\n output  ");
}

#[tokio::test]
async fn run_json_appends_instruction_and_recovers() {
    let client = Arc::new(ScriptedClient::constant(
        "Sure! ```json\n{\"score\": 9, \"intent\": \"hot\"}\n```",
    ));
    let agent = agent_with(client.clone());

    let value = agent.run_json("Qualify", "").await.unwrap();

    assert_eq!(value, json!({"score": 9, "intent": "hot"}));
    assert_eq!(
        client.calls()[0].prompt,
        format!("Qualify{JSON_ONLY_INSTRUCTION}")
    );
}

#[tokio::test]
async fn run_json_wraps_prose_instead_of_failing() {
    let client = Arc::new(ScriptedClient::constant("no json here"));
    let agent = agent_with(client);

    let value = agent.run_json("Qualify", "").await.unwrap();

    assert_eq!(value, json!({"raw": "no json here"}));
}

#[tokio::test]
async fn transport_failure_propagates_with_agent_name() {
    let client = Arc::new(ScriptedClient::new(|_, _| {
        Err(anyhow::anyhow!("connection reset"))
    }));
    let agent = agent_with(client);

    let err = agent.run_json("Qualify", "").await.unwrap_err();

    assert!(err.to_string().contains("Tester completion failed"));
    assert!(format!("{err:#}").contains("connection reset"));
}

#[tokio::test]
async fn roster_binds_each_role_to_its_prompt() {
    let client = Arc::new(ScriptedClient::constant("ok"));
    let roster = AgentRoster::new(client.clone());

    for role in AgentRole::ALL {
        roster.agent(role).run("task", "").await.unwrap();
        let calls = client.calls_for(role);
        assert_eq!(calls.len(), 1, "role: {role}");
        assert_eq!(calls[0].system, role.system_prompt());
    }
}

#[test]
fn role_prompts_are_distinct() {
    let mut prompts: Vec<&str> = AgentRole::ALL.iter().map(|r| r.system_prompt()).collect();
    prompts.sort();
    prompts.dedup();
    assert_eq!(prompts.len(), AgentRole::ALL.len());
}
