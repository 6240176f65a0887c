//! # Insight Generation Pipeline
//!
//! The core request/response flow: resolve the location's context line,
//! build the search-grounded prompt, call the configured AI provider,
//! normalize the reply (code fences off, whitespace trimmed), parse it
//! strictly as JSON and validate it against the fixed insight schema.
//! The caller gets a fully valid [`InsightRecord`] or an error; partially
//! filled records are never produced.

use crate::{
    catalog,
    errors::{InsightError, SchemaError},
    prompts::{build_insight_prompt, PROMPT_DATE_FORMAT},
    providers::ai::AiProvider,
    types::{InsightFields, InsightRecord},
};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

/// Required length of the `quick_wins` list.
const QUICK_WINS_LEN: usize = 3;

/// The insight generation client.
///
/// Holds the AI provider the pipeline calls; one client can serve any
/// number of `generate_insights` calls concurrently.
#[derive(Debug, Clone)]
pub struct InsightClient {
    ai_provider: Box<dyn AiProvider>,
}

impl InsightClient {
    /// Creates a new client around the given provider.
    pub fn new(ai_provider: Box<dyn AiProvider>) -> Self {
        Self { ai_provider }
    }

    /// Generates a validated insight record for a business type and place.
    ///
    /// An unrecognized location is not an error: the prompt falls back to
    /// a generic Lagos context line. A failed provider call surfaces as
    /// [`InsightError::Generation`]; a reply that is not valid JSON or
    /// does not match the schema surfaces as [`InsightError::Schema`].
    pub async fn generate_insights(
        &self,
        business_type: &str,
        location: &str,
        area: Option<&str>,
    ) -> Result<InsightRecord, InsightError> {
        // The prompt template qualifies the place as "<name>, Lagos,
        // Nigeria", so it gets the most specific single name we have.
        let place = area.filter(|a| !a.trim().is_empty()).unwrap_or(location);
        let area_context = catalog::area_context(place);
        let current_date = Utc::now().format(PROMPT_DATE_FORMAT).to_string();

        let prompt = build_insight_prompt(business_type, place, area_context, &current_date);
        info!("Generating insights for '{business_type}' in '{place}'");
        debug!("Insight prompt:\n{prompt}");

        let raw_reply = self.ai_provider.generate(&prompt, true).await?;
        debug!("Raw model reply: {raw_reply}");

        let fields = parse_insight_reply(&raw_reply)?;
        Ok(InsightRecord {
            fields,
            generated_at: Utc::now(),
        })
    }
}

/// Turns a raw model reply into validated insight fields.
///
/// Fences are stripped first; the remainder must parse as a JSON object
/// and satisfy the schema. All schema problems are collected into a
/// single error rather than failing on the first one.
pub fn parse_insight_reply(raw_reply: &str) -> Result<InsightFields, SchemaError> {
    let cleaned = strip_code_fences(raw_reply);

    let value: Value = serde_json::from_str(cleaned).map_err(|source| {
        error!("Model reply failed JSON parsing: {raw_reply}");
        SchemaError::Parse {
            source,
            raw: raw_reply.to_string(),
        }
    })?;

    validate_insight_fields(&value).map_err(|problems| {
        error!(
            "Model reply failed schema validation ({}): {raw_reply}",
            problems.join("; ")
        );
        SchemaError::Invalid {
            problems,
            raw: raw_reply.to_string(),
        }
    })
}

/// Strips a leading ```` ```json ```` or ```` ``` ```` fence and a
/// trailing ```` ``` ```` fence, then trims. Already-clean text passes
/// through unchanged, so the function is idempotent.
fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Validates a parsed reply against the insight schema in one pass,
/// collecting every problem instead of stopping at the first.
fn validate_insight_fields(value: &Value) -> Result<InsightFields, Vec<String>> {
    let Some(map) = value.as_object() else {
        return Err(vec!["reply is not a JSON object".to_string()]);
    };

    let mut problems = Vec::new();

    let customer_profile = required_string(map, "customer_profile", &mut problems);
    let peak_hours = required_string(map, "peak_hours", &mut problems);
    let pricing_strategy = required_string(map, "pricing_strategy", &mut problems);
    let quick_wins = required_quick_wins(map, &mut problems);
    let competition_insight = required_string(map, "competition_insight", &mut problems);
    let growth_opportunity = required_string(map, "growth_opportunity", &mut problems);
    let data_sources = optional_string(map, "data_sources", &mut problems);
    let data_note = optional_string(map, "data_note", &mut problems);

    if !problems.is_empty() {
        return Err(problems);
    }

    Ok(InsightFields {
        customer_profile,
        peak_hours,
        pricing_strategy,
        quick_wins,
        competition_insight,
        growth_opportunity,
        data_sources,
        data_note,
    })
}

fn required_string(map: &Map<String, Value>, key: &str, problems: &mut Vec<String>) -> String {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => {
            problems.push(format!("field `{key}` is empty"));
            String::new()
        }
        Some(_) => {
            problems.push(format!("field `{key}` is not a string"));
            String::new()
        }
        None => {
            problems.push(format!("missing required field `{key}`"));
            String::new()
        }
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    problems: &mut Vec<String>,
) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            problems.push(format!("field `{key}` is not a string"));
            None
        }
    }
}

fn required_quick_wins(map: &Map<String, Value>, problems: &mut Vec<String>) -> Vec<String> {
    match map.get("quick_wins") {
        Some(Value::Array(items)) => {
            let mut wins = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) if !s.trim().is_empty() => wins.push(s.clone()),
                    _ => problems.push(format!("`quick_wins[{i}]` is not a non-empty string")),
                }
            }
            if items.len() != QUICK_WINS_LEN {
                problems.push(format!(
                    "`quick_wins` must contain exactly {QUICK_WINS_LEN} entries, got {}",
                    items.len()
                ));
            }
            wins
        }
        Some(_) => {
            problems.push("`quick_wins` is not a list".to_string());
            Vec::new()
        }
        None => {
            problems.push("missing required field `quick_wins`".to_string());
            Vec::new()
        }
    }
}
