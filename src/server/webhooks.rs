//! Storefront sale notifications. Each one becomes a customer record; the
//! revenue counter only moves when the sale carries a readable price.

use std::collections::HashMap;

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde_json::{Map, Value, json};

use crate::store::{Customer, SaleSource};
use crate::structured::is_blank;

use super::{ApiError, AppState};

const STRIPE_CHECKOUT_COMPLETED: &str = "checkout.session.completed";

pub async fn payhip(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let sale = body.map(|Json(sale)| sale).unwrap_or(Value::Null);

    let customer = Customer::new(
        first_email(&sale, &["buyer_email", "email"]),
        first_present(&sale, &["total", "price"])
            .cloned()
            .unwrap_or(Value::Null),
        SaleSource::Payhip,
    );
    let recorded = customer.clone();
    state
        .store
        .update(|business| business.record_sale(customer))
        .await?;

    Ok(Json(json!({ "status": "processed", "customer": recorded })))
}

pub async fn stripe(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let event = body.map(|Json(event)| event).unwrap_or(Value::Null);

    if event.get("type").and_then(Value::as_str) == Some(STRIPE_CHECKOUT_COMPLETED) {
        let session = event
            .get("data")
            .and_then(|data| data.get("object"))
            .unwrap_or(&Value::Null);
        let cents = session
            .get("amount_total")
            .and_then(Value::as_f64)
            .unwrap_or_default();

        let customer = Customer::new(
            first_email(session, &["customer_email"]),
            json!(cents / 100.0),
            SaleSource::Stripe,
        );
        state
            .store
            .update(|business| business.record_sale(customer))
            .await?;
    } else {
        let event_type = event
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        tracing::debug!(%event_type, "ignoring stripe event");
    }

    Ok(Json(json!({ "status": "processed" })))
}

/// Gumroad pings arrive form-encoded; JSON is accepted too.
pub async fn gumroad(State(state): State<AppState>, request: Request) -> Response {
    let sale = match form_or_json(request).await {
        Ok(sale) => sale,
        Err(rejection) => return rejection,
    };

    let customer = Customer::new(
        first_email(&sale, &["email"]),
        sale.get("price").cloned().unwrap_or(Value::Null),
        SaleSource::Gumroad,
    );
    match state
        .store
        .update(|business| business.record_sale(customer))
        .await
    {
        Ok(()) => Json(json!({ "status": "processed" })).into_response(),
        Err(error) => ApiError::Internal(error).into_response(),
    }
}

async fn form_or_json(request: Request) -> Result<Value, Response> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        let map: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        return Ok(Value::Object(map));
    }

    if content_type.starts_with("application/json") {
        let Json(sale) = Json::<Value>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(sale);
    }

    Ok(Value::Object(Map::new()))
}

fn first_present<'a>(sale: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .map(|key| sale.get(*key))
        .find(|value| !is_blank(*value))
        .flatten()
}

fn first_email(sale: &Value, keys: &[&str]) -> Option<String> {
    first_present(sale, keys)
        .and_then(Value::as_str)
        .map(str::to_string)
}
