use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered business's identity and metadata.
///
/// Created once at registration. The identifier is immutable and records
/// are never deleted in the normal flow; `last_active` is touched on each
/// lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub business_id: String,
    pub business_name: String,
    pub business_type: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

/// The fixed insight schema the model is instructed to fill.
///
/// Every required field must be a non-empty string and `quick_wins` must
/// hold exactly three entries; a value of this type always satisfies that
/// invariant because it is only constructed by schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightFields {
    pub customer_profile: String,
    pub peak_hours: String,
    pub pricing_strategy: String,
    pub quick_wins: Vec<String>,
    pub competition_insight: String,
    pub growth_opportunity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_note: Option<String>,
}

/// A validated insight result with its generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRecord {
    #[serde(flatten)]
    pub fields: InsightFields,
    pub generated_at: DateTime<Utc>,
}

/// An insight row as persisted: the validated fields plus the request
/// that produced them. History is ordered by `generated_at`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredInsight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub business_type: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(flatten)]
    pub fields: InsightFields,
    pub generated_at: DateTime<Utc>,
}

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

/// One message in a chat session. Append-only, grouped by `session_id`,
/// ordered by `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Builds a turn with a fresh uuid and the current time.
    pub fn new(session_id: &str, role: ChatRole, content: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// High-level usage totals for the public analytics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_insights_generated: u64,
    pub total_businesses_saved: u64,
    pub total_chat_messages: u64,
    pub popular_locations: Vec<LocationCount>,
}

/// Insight count for one location, used in the popularity ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: u64,
}
