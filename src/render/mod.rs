//! Plain-text renderings of stored marketing assets.
//!
//! Each renderer returns `None` when the asset it needs is missing, so the
//! caller can answer "build first" instead of an empty page.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::structured::{is_blank, scalar_text};

const DEFAULT_GUARANTEE: &str = "30-day no questions asked refund";
const DEFAULT_CTA: &str = "Get Instant Access";

/// Sales page for a storefront listing, built from the `copy` and `pricing`
/// sections of the product stage.
pub fn product_copy(copy: &Value, pricing: &Value) -> Option<String> {
    if is_blank(Some(copy)) {
        return None;
    }

    let field = |key: &str, default: &str| scalar_text(copy.get(key), default);

    let mut text = format!(
        "# {headline}\n\n## {subheadline}\n\n{hook}\n\n---\n\n## The Problem\n\n{problem}\n\n---\n\n## The Solution\n\n{solution}\n\n---\n\n## What You Get:\n\n",
        headline = field("headline", "Product"),
        subheadline = field("subheadline", ""),
        hook = field("hook", ""),
        problem = field("problem", ""),
        solution = field("solution", ""),
    );

    for item in items(copy, "included") {
        text.push_str(&format!(
            "✅ **{}** - {}\n\n",
            scalar_text(item.get("item"), ""),
            scalar_text(item.get("benefit"), "")
        ));
    }

    text.push_str("\n## BONUSES:\n\n");
    for bonus in items(copy, "bonuses") {
        text.push_str(&format!(
            "🎁 **{}** ({})\n\n",
            scalar_text(bonus.get("name"), ""),
            scalar_text(bonus.get("value"), "")
        ));
    }

    text.push_str(&format!(
        "\n---\n\n## 100% Money-Back Guarantee\n\n{}\n\n---\n\n## FAQ\n\n",
        field("guarantee", DEFAULT_GUARANTEE)
    ));
    for faq in items(copy, "faq") {
        text.push_str(&format!(
            "**Q: {}**\nA: {}\n\n",
            scalar_text(faq.get("q"), ""),
            scalar_text(faq.get("a"), "")
        ));
    }

    text.push_str(&format!(
        "\n---\n\n**Launch Price: ${}** (Regular ${})\n\n{}\n",
        scalar_text(pricing.get("launch_price"), "27"),
        scalar_text(pricing.get("price"), "37"),
        field("cta", DEFAULT_CTA)
    ));

    Some(text)
}

pub fn email_sequence(emails: &[Value]) -> Option<String> {
    if emails.is_empty() {
        return None;
    }

    let mut text = String::from("# Email Sequence\n\n");
    for email in emails {
        let field = |key: &str| scalar_text(email.get(key), "");
        text.push_str(&format!(
            "## Email {}\n**Send:** {}\n**Purpose:** {}\n**Subject:** {}\n\n{}\n\n**CTA:** {}\n\n---\n\n",
            field("number"),
            field("send"),
            field("purpose"),
            field("subject"),
            field("body"),
            field("cta"),
        ));
    }
    Some(text)
}

pub fn social_posts(posts: &[Value]) -> Option<String> {
    if posts.is_empty() {
        return None;
    }

    let mut text = String::from("# Social Content Calendar\n\n");
    for post in posts {
        let field = |key: &str| scalar_text(post.get(key), "");
        text.push_str(&format!(
            "## Day {} - {}\n**Type:** {}\n\n**Hook:** {}\n\n{}\n\n",
            field("day"),
            field("platform").to_uppercase(),
            field("type"),
            field("hook"),
            field("body"),
        ));

        if !is_blank(post.get("cta")) {
            text.push_str(&format!("**CTA:** {}\n", field("cta")));
        }
        if !is_blank(post.get("hashtags")) {
            let tags: Vec<String> = items(post, "hashtags")
                .map(|tag| scalar_text(Some(tag), ""))
                .collect();
            text.push_str(&format!("**Tags:** {}\n", tags.join(" ")));
        }
        text.push_str("\n---\n\n");
    }
    Some(text)
}

/// Today's post from the calendar, rotating through it one post per day
/// since the business was created.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPost<'a> {
    pub day: i64,
    pub post: &'a Value,
}

pub fn daily_post<'a>(
    posts: &'a [Value],
    created: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DailyPost<'a>> {
    if posts.is_empty() {
        return None;
    }

    let days = created
        .map(|created| (now - created).num_days().max(0))
        .unwrap_or(0);
    let len = i64::try_from(posts.len()).ok()?;
    let index = usize::try_from(days % len).ok()?;

    Some(DailyPost {
        day: days + 1,
        post: &posts[index],
    })
}

fn items<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> + use<'a> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
