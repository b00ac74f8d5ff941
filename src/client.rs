use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{ANTHROPIC_API_VERSION, LlmProvider, LlmSettings, ModelSettings};

/// Anything that can turn a system prompt plus a user prompt into model text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

pub type DynCompletionClient = dyn CompletionClient;

#[derive(Debug, Clone)]
pub struct AIClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    provider: LlmProvider,
    model: String,
    max_tokens: u32,
}

impl AIClient {
    pub fn new(llm: &LlmSettings, models: &ModelSettings) -> Result<Self> {
        let timeout = Duration::from_secs(llm.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            api_key: llm.api_key.clone(),
            user_agent: llm.user_agent.clone(),
            provider: llm.provider,
            model: models.model.clone(),
            max_tokens: models.max_tokens,
        })
    }

    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/messages", self.base_url);

        let request = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("User-Agent", &self.user_agent)
            .json(&request);

        let response = send(request, "messages").await?;
        response
            .json::<MessagesResponse>()
            .await
            .context("Failed to parse messages response JSON")
    }

    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut request = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(&request);

        // OpenRouter attribution headers
        if matches!(self.provider, LlmProvider::OpenRouter) {
            request = request.header("X-Title", "bizforge");
        }

        let response = send(request, "chat completions").await?;
        response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat completion response JSON")
    }
}

#[async_trait]
impl CompletionClient for AIClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let text = match self.provider {
            LlmProvider::Anthropic => {
                let response = self
                    .messages(MessagesRequest {
                        model: self.model.clone(),
                        max_tokens: self.max_tokens,
                        system: system.to_string(),
                        messages: vec![ChatMessage {
                            role: ChatMessageRole::User,
                            content: prompt.to_string(),
                        }],
                    })
                    .await?;
                response
                    .first_text()
                    .ok_or_else(|| anyhow!("Messages response contained no text block"))?
            }
            LlmProvider::OpenRouter => {
                let response = self
                    .chat_completion(ChatCompletionRequest {
                        model: self.model.clone(),
                        messages: vec![
                            ChatMessage {
                                role: ChatMessageRole::System,
                                content: system.to_string(),
                            },
                            ChatMessage {
                                role: ChatMessageRole::User,
                                content: prompt.to_string(),
                            },
                        ],
                        max_tokens: Some(self.max_tokens),
                        temperature: None,
                    })
                    .await?;
                response
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| anyhow!("Chat completion returned no choices"))?
            }
        };

        tracing::debug!(response_chars = text.len(), "completion received");
        Ok(text)
    }
}

async fn send(request: RequestBuilder, endpoint: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to send request to {endpoint} endpoint"))?;

    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::TOO_MANY_REQUESTS => {
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Rate limit exceeded. Please wait before trying again. (API response: {error_text})"
            ))
        }
        StatusCode::UNAUTHORIZED => Err(anyhow!(
            "Invalid API key. Please check your API key configuration."
        )),
        StatusCode::BAD_REQUEST => {
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!("Invalid request: {error_text}"))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => Err(anyhow!(
            "Service is temporarily unavailable. Please try again later."
        )),
        status => {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(anyhow!("API error (status {status}): {error_text}"))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

impl MessagesResponse {
    pub fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::config::Config;

    fn client_for(server: &MockServer, provider: LlmProvider) -> AIClient {
        let mut config = Config::builder().with_provider(provider).build().unwrap();
        config.llm.api_key = "test-key".to_string();
        config.llm.base_url = server.url("/v1");
        config.models.max_tokens = 512;
        AIClient::new(&config.llm, &config.models).unwrap()
    }

    #[tokio::test]
    async fn anthropic_complete_sends_system_and_user_prompt() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "test-key")
                    .header("anthropic-version", ANTHROPIC_API_VERSION)
                    .json_body(json!({
                        "model": "claude-3-haiku-20240307",
                        "max_tokens": 512,
                        "system": "You are terse.",
                        "messages": [{ "role": "user", "content": "Say hi" }]
                    }));

                then.status(200).json_body(json!({
                    "id": "msg_1",
                    "type": "message",
                    "role": "assistant",
                    "content": [{ "type": "text", "text": "hi" }],
                    "stop_reason": "end_turn"
                }));
            })
            .await;

        let client = client_for(&server, LlmProvider::Anthropic);
        let text = client.complete("You are terse.", "Say hi").await.unwrap();

        assert_eq!(text, "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn openrouter_complete_uses_chat_completions() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("Authorization", "Bearer test-key")
                    .json_body(json!({
                        "model": "anthropic/claude-3-haiku",
                        "messages": [
                            { "role": "system", "content": "You are terse." },
                            { "role": "user", "content": "Say hi" }
                        ],
                        "max_tokens": 512
                    }));

                then.status(200).json_body(json!({
                    "choices": [{
                        "index": 0,
                        "finish_reason": "stop",
                        "message": { "role": "assistant", "content": "{\"ok\":true}" }
                    }]
                }));
            })
            .await;

        let client = client_for(&server, LlmProvider::OpenRouter);
        let text = client.complete("You are terse.", "Say hi").await.unwrap();

        assert_eq!(text, "{\"ok\":true}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_api_key_error() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(401).body("{\"error\":\"bad key\"}");
            })
            .await;

        let client = client_for(&server, LlmProvider::Anthropic);
        let err = client.complete("system", "prompt").await.unwrap_err();

        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn response_without_text_block_is_an_error() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(200).json_body(json!({ "content": [] }));
            })
            .await;

        let client = client_for(&server, LlmProvider::Anthropic);
        let err = client.complete("system", "prompt").await.unwrap_err();

        assert!(err.to_string().contains("no text block"));
    }
}
