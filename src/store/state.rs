use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::pipeline::BuildOutputs;
use crate::structured::amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub niche: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleSource {
    Payhip,
    Stripe,
    Gumroad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub email: Option<String>,
    /// Price exactly as the storefront sent it; `null` when absent.
    pub price: Value,
    pub source: SaleSource,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachRecord {
    pub time: DateTime<Utc>,
    pub leads: Value,
}

/// Everything the service knows about the business. Stage slots are
/// replaced on every build; `leads`, `customers` and `outreach` only grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessState {
    #[serde(default)]
    pub config: Option<BusinessConfig>,
    #[serde(default = "empty_slot")]
    pub research: Value,
    #[serde(default = "empty_slot")]
    pub product: Value,
    #[serde(default = "empty_slot")]
    pub marketing: Value,
    #[serde(default = "empty_slot")]
    pub outreach_plan: Value,
    #[serde(default = "empty_slot")]
    pub initial_leads: Value,
    #[serde(default)]
    pub leads: Vec<Value>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub outreach: Vec<OutreachRecord>,
}

/// Stage slots that were never built read as `{}`.
fn empty_slot() -> Value {
    Value::Object(Map::new())
}

impl Default for BusinessState {
    fn default() -> Self {
        Self {
            config: None,
            research: empty_slot(),
            product: empty_slot(),
            marketing: empty_slot(),
            outreach_plan: empty_slot(),
            initial_leads: empty_slot(),
            leads: Vec::new(),
            customers: Vec::new(),
            revenue: 0.0,
            outreach: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub product: String,
    pub price: Value,
    pub leads: usize,
    pub customers: usize,
    pub revenue: f64,
    pub created: String,
}

impl BusinessState {
    /// Overwrites the slots of every stage that completed. Config is only
    /// stamped when the whole build went through.
    pub fn apply_build(&mut self, niche: &str, outputs: &BuildOutputs, completed: bool) {
        self.merge_outputs(outputs);

        if completed {
            self.config = Some(BusinessConfig {
                niche: niche.to_string(),
                created: Utc::now(),
            });
        }
    }

    /// Copies every completed stage output into its slot.
    pub fn merge_outputs(&mut self, outputs: &BuildOutputs) {
        let slots = [
            (&mut self.research, &outputs.research),
            (&mut self.product, &outputs.product),
            (&mut self.marketing, &outputs.marketing),
            (&mut self.outreach_plan, &outputs.outreach_plan),
            (&mut self.initial_leads, &outputs.initial_leads),
        ];
        for (slot, output) in slots {
            if let Some(output) = output {
                *slot = output.clone();
            }
        }
    }

    pub fn niche(&self) -> Option<&str> {
        self.config.as_ref().map(|config| config.niche.as_str())
    }

    pub fn product_name(&self) -> Option<String> {
        self.product
            .get("product")
            .and_then(|product| product.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn launch_price(&self) -> Option<&Value> {
        self.product
            .get("pricing")
            .and_then(|pricing| pricing.get("launch_price"))
    }

    pub fn initial_lead_count(&self) -> usize {
        self.initial_leads
            .get("leads")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn emails(&self) -> &[Value] {
        self.marketing
            .get("emails")
            .and_then(|emails| emails.get("emails"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn social_posts(&self) -> &[Value] {
        self.marketing
            .get("social")
            .and_then(|social| social.get("posts"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stores a qualified lead: the submitted record plus its score.
    pub fn record_processed_lead(&mut self, lead: &Value, qualification: &Value) {
        let mut record = match lead {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("lead".to_string(), other.clone());
                map
            }
        };
        record.insert(
            "score".to_string(),
            qualification.get("score").cloned().unwrap_or(json!(0)),
        );
        record.insert("processed".to_string(), json!(Utc::now()));
        self.leads.push(Value::Object(record));
    }

    pub fn record_outreach(&mut self, leads: Value) {
        self.outreach.push(OutreachRecord {
            time: Utc::now(),
            leads,
        });
    }

    /// Stores the customer. Revenue only grows when the price parses.
    pub fn record_sale(&mut self, customer: Customer) {
        let amount = customer.amount();
        if let Some(amount) = amount {
            self.revenue += amount;
        }
        tracing::info!(
            email = customer.email.as_deref().unwrap_or("unknown"),
            price = %customer.price,
            counted = amount.is_some(),
            source = ?customer.source,
            "sale recorded"
        );
        self.customers.push(customer);
    }

    pub fn stats(&self) -> Stats {
        Stats {
            product: self.product_name().unwrap_or_else(|| "Not built".to_string()),
            price: self.launch_price().cloned().unwrap_or(json!(0)),
            leads: self.leads.len(),
            customers: self.customers.len(),
            revenue: self.revenue,
            created: self
                .config
                .as_ref()
                .map(|config| config.created.to_rfc3339())
                .unwrap_or_else(|| "Not built yet".to_string()),
        }
    }
}

impl Customer {
    pub fn new(email: Option<String>, price: Value, source: SaleSource) -> Self {
        Self {
            email,
            price,
            source,
            time: Utc::now(),
        }
    }

    pub fn amount(&self) -> Option<f64> {
        amount(Some(&self.price))
    }
}
