use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::pipeline::{BuildOutcome, BuildRequest, DEFAULT_LEAD_COUNT};
use crate::render;
use crate::store::{BusinessState, Stats};
use crate::structured::section;

use super::{ApiError, AppState};

const DEFAULT_NICHE: &str = "AI prompts for solopreneurs";
const BUILD_FIRST_COPY: &str = "Build first: POST /build with {\"niche\": \"your niche\"}";
const BUILD_FIRST: &str = "Build first";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildBody {
    niche: Option<String>,
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NicheBody {
    niche: Option<String>,
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageBody {
    message: String,
    customer: Option<Value>,
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "status": "running",
        "endpoints": {
            "POST /build": "Build complete business",
            "GET /research": "View market research",
            "POST /research": "Re-run market research",
            "GET /payhip-copy": "Get product description",
            "GET /gumroad-copy": "Get product description",
            "GET /email-sequence": "Get email sequence",
            "GET /social-posts": "Get all social posts",
            "GET /daily-post": "Get today's post",
            "POST /find-leads": "Find leads to contact",
            "GET /outreach-plan": "Get outreach strategy",
            "POST /process-lead": "Qualify a lead",
            "POST /inquiry": "Handle sales question",
            "POST /support": "Handle support request",
            "POST /webhook/payhip": "Payhip sales webhook",
            "POST /webhook/stripe": "Stripe webhook",
            "POST /webhook/gumroad": "Gumroad sales webhook",
            "GET /stats": "View statistics",
            "GET /assets": "View all data",
            "GET /leads": "View processed leads and outreach history",
            "GET /customers": "View customers and revenue"
        }
    }))
}

pub async fn build(
    State(state): State<AppState>,
    body: Option<Json<BuildBody>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let niche = body.niche.unwrap_or_else(|| DEFAULT_NICHE.to_string());
    let request =
        BuildRequest::new(&niche).with_lead_count(body.count.unwrap_or(DEFAULT_LEAD_COUNT));

    let Some(guard) = state.store.try_begin_build() else {
        return Err(ApiError::BuildInProgress);
    };

    tracing::info!(%niche, "building");
    // The build runs detached so a dropped connection cannot cancel it
    // between stages; each finished stage is merged as it lands.
    let store = state.store.clone();
    let orchestrator = state.orchestrator.clone();
    let build_niche = niche.clone();
    let task = tokio::spawn(async move {
        let _guard = guard;
        let run = orchestrator.run_observed(request, &*store).await;
        let completed = run.outcome.is_completed();
        let completed_stages = run.outputs.completed_stages();
        let summary = store
            .update(|business| {
                business.apply_build(&build_niche, &run.outputs, completed);
                (
                    business.product_name(),
                    business.launch_price().cloned(),
                    business.initial_lead_count(),
                )
            })
            .await;
        (run.outcome, completed_stages, summary)
    });

    let (outcome, completed_stages, summary) = task
        .await
        .map_err(|error| ApiError::Internal(anyhow::Error::new(error).context("build task")))?;
    let (product, price, leads_found) = summary?;

    if let BuildOutcome::Failed { stage, error } = outcome {
        return Err(ApiError::BuildFailed {
            stage,
            error,
            completed_stages,
        });
    }

    tracing::info!(%niche, "build complete");
    Ok(Json(json!({
        "status": "complete",
        "product": product,
        "price": price,
        "leads_found": leads_found,
        "next_steps": [
            "GET /payhip-copy - Copy to your store",
            "POST /find-leads - Contact these people",
            "GET /daily-post - Post this today",
            "GET /outreach-plan - Follow this daily"
        ]
    })))
}

pub async fn get_research(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read(|business| business.research.clone()).await)
}

pub async fn run_research(
    State(state): State<AppState>,
    body: Option<Json<NicheBody>>,
) -> Result<Json<Value>, ApiError> {
    let niche = body
        .and_then(|Json(body)| body.niche)
        .unwrap_or_default();

    let research = state
        .pipeline
        .research(&niche)
        .await
        .map_err(ApiError::provider("research"))?;

    state
        .store
        .update(|business| business.research = research.clone())
        .await?;
    Ok(Json(research))
}

pub async fn find_leads(
    State(state): State<AppState>,
    body: Option<Json<NicheBody>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let niche = match body.niche {
        Some(niche) => niche,
        None => state
            .store
            .read(|business| business.niche().unwrap_or_default().to_string())
            .await,
    };
    let count = body.count.unwrap_or(DEFAULT_LEAD_COUNT);

    let leads = state
        .pipeline
        .lead_discovery(&niche, count)
        .await
        .map_err(ApiError::provider("lead discovery"))?;

    state
        .store
        .update(|business| business.record_outreach(leads.clone()))
        .await?;
    Ok(Json(leads))
}

pub async fn outreach_plan(State(state): State<AppState>) -> Json<Value> {
    Json(state.store.read(|business| business.outreach_plan.clone()).await)
}

pub async fn process_lead(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let lead = body
        .map(|Json(lead)| lead)
        .unwrap_or_else(|| Value::Object(Map::new()));
    let product = state.store.read(|business| business.product.clone()).await;

    let qualification = state
        .pipeline
        .qualify_lead(&lead, &product)
        .await
        .map_err(ApiError::provider("lead qualification"))?;

    state
        .store
        .update(|business| business.record_processed_lead(&lead, &qualification))
        .await?;
    Ok(Json(qualification))
}

pub async fn inquiry(
    State(state): State<AppState>,
    body: Option<Json<MessageBody>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let product = state.store.read(|business| business.product.clone()).await;

    let reply = state
        .pipeline
        .handle_inquiry(&body.message, &product)
        .await
        .map_err(ApiError::provider("sales inquiry"))?;
    Ok(Json(reply))
}

pub async fn support(
    State(state): State<AppState>,
    body: Option<Json<MessageBody>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();

    let reply = state
        .pipeline
        .handle_support(&body.message, body.customer.as_ref())
        .await
        .map_err(ApiError::provider("support"))?;
    Ok(Json(reply))
}

pub async fn product_copy(State(state): State<AppState>) -> Response {
    let text = state
        .store
        .read(|business| {
            render::product_copy(
                &section(&business.product, "copy"),
                &section(&business.product, "pricing"),
            )
        })
        .await;

    plain_text(text, BUILD_FIRST_COPY)
}

pub async fn email_sequence(State(state): State<AppState>) -> Response {
    let text = state
        .store
        .read(|business| render::email_sequence(business.emails()))
        .await;
    plain_text(text, BUILD_FIRST)
}

pub async fn social_posts(State(state): State<AppState>) -> Response {
    let text = state
        .store
        .read(|business| render::social_posts(business.social_posts()))
        .await;
    plain_text(text, BUILD_FIRST)
}

pub async fn daily_post(State(state): State<AppState>) -> Json<Value> {
    let body = state
        .store
        .read(|business| {
            let created = business.config.as_ref().map(|config| config.created);
            match render::daily_post(business.social_posts(), created, Utc::now()) {
                Some(today) => json!({ "day": today.day, "post": today.post }),
                None => json!({ "error": BUILD_FIRST }),
            }
        })
        .await;
    Json(body)
}

pub async fn stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.store.read(BusinessState::stats).await)
}

pub async fn assets(State(state): State<AppState>) -> Json<BusinessState> {
    Json(state.store.snapshot().await)
}

pub async fn leads(State(state): State<AppState>) -> Json<Value> {
    let body = state
        .store
        .read(|business| {
            json!({
                "leads": business.leads,
                "initial_leads": business.initial_leads.clone(),
                "outreach_history": business.outreach,
            })
        })
        .await;
    Json(body)
}

pub async fn customers(State(state): State<AppState>) -> Json<Value> {
    let body = state
        .store
        .read(|business| {
            json!({
                "customers": business.customers,
                "count": business.customers.len(),
                "revenue": business.revenue,
            })
        })
        .await;
    Json(body)
}

fn plain_text(text: Option<String>, missing: &'static str) -> Response {
    match text {
        Some(text) => text.into_response(),
        None => (StatusCode::BAD_REQUEST, missing).into_response(),
    }
}
