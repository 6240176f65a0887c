//! # Insight Generation Prompt
//!
//! The template that turns a business type and a Lagos location into a
//! search-grounded generation request. The model is told to consult live
//! Google Search results and to answer with a bare JSON object matching
//! the fixed insight schema.

/// The insight generation prompt template.
///
/// The JSON skeleton embedded here is the contract the response validator
/// enforces: six required fields plus an optional `data_sources` note.
/// `quick_wins` must come back with exactly three entries.
///
/// Placeholders: `{business_type}`, `{location}`, `{area_context}`,
/// `{current_date}`
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"You are a Lagos business intelligence consultant operating on {current_date}. Use Google Search to find CURRENT, REAL information about {location}, Lagos, Nigeria.

Business Type: {business_type}
Location: {location}, Lagos, Nigeria
Area Context: {area_context}
Current Date: {current_date}

IMPORTANT: Search Google for:
1. Recent news and developments in {location}, Lagos (up to {current_date})
2. Current businesses and competition in {location}
3. Demographics and economic activity in {location}
4. Traffic patterns and busy areas in {location}
5. Recent trends affecting {business_type} businesses in Lagos

Based on your Google search findings and Lagos market knowledge, generate hyper-specific, actionable customer insights.

Return ONLY a valid JSON object (no markdown, no code blocks):
{
    "customer_profile": "2-3 sentences describing typical customers based on REAL current data about {location}",
    "peak_hours": "Specific times based on actual traffic and activity patterns in {location}",
    "pricing_strategy": "Price sensitivity based on real economic data about the area",
    "quick_wins": [
        "Actionable tip 1 based on current trends you found",
        "Actionable tip 2 based on actual competition you discovered",
        "Actionable tip 3 based on real demographic insights"
    ],
    "competition_insight": "REAL information about actual businesses and competition in {location}",
    "growth_opportunity": "Specific opportunity based on current market gaps you found",
    "data_sources": "Brief note on what real data you found (e.g., 'Based on recent traffic data and business listings in {location}')"
}

Use REAL, CURRENT information from your searches as of {current_date}. Be specific and cite what you found."#;

/// Builds the full insight generation prompt.
///
/// Deterministic for fixed inputs: the caller formats and passes the
/// current date (`%B %d, %Y`, e.g. "August 24, 2026") rather than this
/// function reading the clock.
pub fn build_insight_prompt(
    business_type: &str,
    location_label: &str,
    area_context: &str,
    current_date: &str,
) -> String {
    INSIGHT_PROMPT_TEMPLATE
        .replace("{business_type}", business_type)
        .replace("{location}", location_label)
        .replace("{area_context}", area_context)
        .replace("{current_date}", current_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_placeholder() {
        let prompt = build_insight_prompt(
            "Shoe store",
            "Ikeja",
            "Commercial hub with heavy foot traffic",
            "August 24, 2026",
        );
        assert!(!prompt.contains("{business_type}"));
        assert!(!prompt.contains("{location}"));
        assert!(!prompt.contains("{area_context}"));
        assert!(!prompt.contains("{current_date}"));
        assert!(prompt.contains("Business Type: Shoe store"));
        assert!(prompt.contains("Location: Ikeja, Lagos, Nigeria"));
        assert!(prompt.contains("Area Context: Commercial hub with heavy foot traffic"));
    }

    #[test]
    fn keeps_the_json_skeleton_braces() {
        let prompt = build_insight_prompt("Salon", "Yaba", "context", "May 01, 2026");
        assert!(prompt.contains("\"quick_wins\": ["));
        assert!(prompt.contains("Return ONLY a valid JSON object (no markdown, no code blocks):"));
    }
}
