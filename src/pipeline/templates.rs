//! Task prompts for every pipeline call.
//!
//! Each template is a pure function of its inputs. Upstream results are
//! embedded as two-space indented JSON; the response shape each prompt asks
//! for is a request to the model, not something later stages can rely on.

use serde_json::Value;

use crate::structured::pretty;

pub fn market_research(niche: &str) -> String {
    format!(
        r#"Research market for: {niche}

Return JSON:
{{
    "market_size": "demand level",
    "platforms": [{{"name": "where buyers are", "activity": "high/medium/low"}}],
    "communities": [{{"name": "subreddit/group", "pain_points": ["problems"]}}],
    "pricing": {{"low": "$X", "mid": "$X", "high": "$X", "sweet_spot": "$X"}},
    "demand_signals": ["evidence"],
    "buyer_urgency": "why buy now"
}}"#
    )
}

pub fn competitor_analysis(niche: &str) -> String {
    format!(
        r#"Analyze competitors in: {niche}

Return JSON:
{{
    "top_products": [{{"name": "product", "price": "$X", "strengths": [], "weaknesses": [], "sales_level": "high/medium/low"}}],
    "gaps": [{{"gap": "unmet need", "opportunity": "how to fill"}}],
    "differentiation": ["ways to stand out"]
}}"#
    )
}

pub fn buyer_persona(niche: &str) -> String {
    format!(
        r#"Create buyer persona for: {niche}

Return JSON:
{{
    "persona": {{
        "name": "fictional name",
        "occupation": "job",
        "biggest_problem": "main frustration",
        "desired_outcome": "what they want",
        "fears": ["concerns"],
        "buying_triggers": ["what makes them buy"],
        "objections": ["hesitations"],
        "hangouts": ["where online"],
        "language": ["phrases they use"]
    }}
}}"#
    )
}

pub fn product_design(niche: &str, research: &Value) -> String {
    let research = pretty(research);
    format!(
        r#"Create product for: {niche}
Research: {research}

Return JSON:
{{
    "name": "product name",
    "tagline": "one-line hook",
    "format": "PDF/Notion/etc",
    "promise": "main transformation",
    "sections": [{{"title": "section", "contents": ["items"], "result": "outcome"}}],
    "bonuses": [{{"name": "bonus", "value": "$X", "description": "what"}}],
    "time_to_result": "how fast"
}}"#
    )
}

pub fn sales_copy(product: &Value, audience: &Value) -> String {
    let product = pretty(product);
    let audience = pretty(audience);
    format!(
        r#"Write sales copy for: {product}
Audience: {audience}

Return JSON:
{{
    "headline": "main headline",
    "subheadline": "supporting line",
    "hook": "opening paragraph",
    "problem": "pain paragraphs",
    "solution": "product intro",
    "included": [{{"item": "feature", "benefit": "why matters"}}],
    "bonuses": [{{"name": "bonus", "value": "$X"}}],
    "faq": [{{"q": "question", "a": "answer"}}],
    "guarantee": "risk reversal",
    "cta": "call to action"
}}"#
    )
}

pub fn pricing(product: &Value, competitors: &Value) -> String {
    let product = pretty(product);
    let competitors = pretty(competitors);
    format!(
        r#"Set pricing for: {product}
Competitors: {competitors}

Return JSON:
{{
    "price": 37,
    "launch_price": 27,
    "value_stack": [{{"item": "included", "value": "$X"}}],
    "total_value": "$XXX"
}}"#
    )
}

pub fn lead_magnet(product: &Value) -> String {
    let product = pretty(product);
    format!(
        r#"Create lead magnet for: {product}

Return JSON:
{{
    "name": "lead magnet name",
    "format": "checklist/template/guide",
    "promise": "what they get",
    "contents": ["whats inside"],
    "landing_page": {{
        "headline": "main headline",
        "bullets": ["benefits"],
        "cta": "button text"
    }}
}}"#
    )
}

pub fn welcome_emails(lead_magnet: &Value, product: &Value, launch_price: &str) -> String {
    let lead_magnet = pretty(lead_magnet);
    let product = pretty(product);
    format!(
        r#"Write 5-email welcome sequence.
Lead magnet: {lead_magnet}
Product: {product}
Price: ${launch_price}

Return JSON:
{{
    "emails": [
        {{
            "number": 1,
            "send": "immediately",
            "purpose": "deliver lead magnet",
            "subject": "subject line",
            "body": "full email body",
            "cta": "call to action"
        }}
    ]
}}"#
    )
}

pub fn social_calendar(product: &Value, audience: &Value) -> String {
    let product = pretty(product);
    let audience = pretty(audience);
    format!(
        r#"Create 14 days of social content.
Product: {product}
Audience: {audience}

Mix: 60% value, 20% story/engagement, 20% promo

Return JSON:
{{
    "posts": [
        {{
            "day": 1,
            "platform": "twitter",
            "type": "value",
            "hook": "first line",
            "body": "full post",
            "cta": "call to action",
            "hashtags": ["tags"]
        }}
    ]
}}"#
    )
}

pub fn outreach_plan(niche: &str, audience: &Value) -> String {
    let audience = pretty(audience);
    format!(
        r#"Create outreach plan for: {niche}
Target: {audience}

Return JSON:
{{
    "daily_actions": [
        {{
            "platform": "twitter/linkedin/reddit",
            "action": "what to do",
            "time": "minutes needed",
            "script": "what to say"
        }}
    ],
    "communities": [
        {{
            "name": "specific place",
            "rules": "how to engage",
            "value_post": "example post",
            "soft_pitch": "how to mention product"
        }}
    ],
    "dm_templates": [
        {{
            "context": "when to use",
            "message": "template",
            "follow_up": "if no response"
        }}
    ],
    "cold_outreach": [
        {{
            "target": "who to reach",
            "where": "how to find them",
            "approach": "first message",
            "value_offer": "free thing to give"
        }}
    ]
}}"#
    )
}

pub fn lead_discovery(niche: &str, count: u32) -> String {
    format!(
        r#"Find {count} specific leads for: {niche}

Look for people who:
- Are discussing this problem
- Asked for help recently
- Showed frustration with current solutions

Return JSON:
{{
    "leads": [
        {{
            "type": "twitter/reddit/linkedin",
            "identifier": "username or post description",
            "signal": "why theyre a lead",
            "pain_point": "their specific problem",
            "approach": "personalized message",
            "urgency": "hot/warm/cold"
        }}
    ],
    "search_queries": [
        {{
            "platform": "where to search",
            "query": "exact search terms",
            "why": "what this finds"
        }}
    ]
}}"#
    )
}

pub fn lead_qualification(lead: &Value, product: &Value) -> String {
    let lead = pretty(lead);
    let product = pretty(product);
    format!(
        r#"Qualify this lead: {lead}
Product: {product}

Return JSON:
{{
    "score": 8,
    "intent": "hot/warm/cold",
    "response": "personalized message to send",
    "follow_up": [{{"when": "timing", "action": "what to do"}}],
    "notes": "observations"
}}"#
    )
}

pub fn sales_inquiry(message: &str, product: &Value) -> String {
    let product = pretty(product);
    format!(
        r#"Handle this sales inquiry: "{message}"
Product: {product}

Return JSON:
{{
    "intent": "buy/question/objection",
    "response": "your reply",
    "objections": ["detected concerns"],
    "next_action": "what to do next",
    "close_ready": false
}}"#
    )
}

pub fn support_request(message: &str, customer: &Value) -> String {
    let customer = pretty(customer);
    format!(
        r#"Handle support request: "{message}"
Customer: {customer}

Return JSON:
{{
    "category": "question/issue/refund",
    "response": "helpful reply",
    "resolution": "how this resolves it",
    "follow_up": false
}}"#
    )
}
