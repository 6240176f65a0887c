//! # SQLite Persistence Gateway
//!
//! All durable state lives here: registered businesses, generated insight
//! history, chat transcripts and best-effort analytics events, in a local
//! SQLite database managed through Turso.

use crate::{
    errors::StoreError,
    types::{
        AnalyticsSummary, BusinessRecord, ChatRole, ChatTurn, InsightRecord, LocationCount,
        StoredInsight,
    },
};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::fmt::{self, Debug};
use tracing::{debug, warn};
use turso::{params, Connection, Database, Value as TursoValue};

pub mod sql;

/// A store for interacting with a local SQLite database using Turso.
///
/// The store holds a `Database` instance, which manages a connection pool.
/// When cloned, it shares the same underlying database, allowing for
/// concurrent and shared access to the same database file or in-memory
/// instance. Every operation takes a fresh connection.
#[derive(Clone)]
pub struct SqliteStore {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteStore {
    /// Creates a new `SqliteStore` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:"
    ///   for a unique, isolated in-memory database. To share an in-memory
    ///   database across handles (e.g., in tests), create one store and
    ///   then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // WAL improves concurrency for file-backed databases and is a
        // no-op for in-memory ones. PRAGMA returns a row, so `query`.
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Ensures that all required application tables and indexes exist.
    /// Idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| StoreError::Operation(e.to_string()))?;
        }
        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        self.db
            .connect()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }

    /// Saves a newly registered business.
    ///
    /// Returns [`StoreError::Conflict`] when the identifier is already
    /// taken; the caller is expected to regenerate the id and retry.
    pub async fn put_business(&self, record: &BusinessRecord) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let params_vec: Vec<TursoValue> = vec![
            text(&record.business_id),
            text(&record.business_name),
            text(&record.business_type),
            text(&record.location),
            opt_text(record.area.as_deref()),
            opt_text(record.contact.as_deref()),
            text(&record.created_at.to_rfc3339()),
            opt_text(record.last_active.map(|t| t.to_rfc3339()).as_deref()),
        ];
        conn.execute(sql::INSERT_BUSINESS, params_vec)
            .await
            .map_err(|e| map_constraint_error(e, &record.business_id))?;
        debug!("Saved business '{}'", record.business_id);
        Ok(())
    }

    /// Fetches a business by identifier and touches its `last_active`
    /// timestamp. The returned record carries the values as they were
    /// before the touch.
    pub async fn get_business(&self, business_id: &str) -> Result<BusinessRecord, StoreError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_BUSINESS, params![business_id])
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        let Some(row) = next_row(&mut rows).await? else {
            return Err(StoreError::NotFound(business_id.to_string()));
        };

        let record = BusinessRecord {
            business_id: text_at(&row, 0)?,
            business_name: text_at(&row, 1)?,
            business_type: text_at(&row, 2)?,
            location: text_at(&row, 3)?,
            area: opt_text_at(&row, 4)?,
            contact: opt_text_at(&row, 5)?,
            created_at: parse_timestamp(&text_at(&row, 6)?)?,
            last_active: opt_text_at(&row, 7)?
                .map(|raw| parse_timestamp(&raw))
                .transpose()?,
        };

        conn.execute(
            sql::TOUCH_BUSINESS_LAST_ACTIVE,
            params![Utc::now().to_rfc3339(), business_id],
        )
        .await
        .map_err(|e| StoreError::Operation(e.to_string()))?;

        Ok(record)
    }

    /// Appends a generated insight to the history, optionally attributed
    /// to a registered business.
    pub async fn append_insight(
        &self,
        owner_id: Option<&str>,
        business_type: &str,
        location: &str,
        area: Option<&str>,
        record: &InsightRecord,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let insight_data = serde_json::to_string(&record.fields)?;
        let params_vec: Vec<TursoValue> = vec![
            opt_text(owner_id),
            text(business_type),
            text(location),
            opt_text(area),
            text(&insight_data),
            text(&record.generated_at.to_rfc3339()),
        ];
        conn.execute(sql::INSERT_INSIGHT, params_vec)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }

    /// The insight history for one business, most recent first.
    pub async fn list_insights(
        &self,
        owner_id: &str,
        limit: u32,
    ) -> Result<Vec<StoredInsight>, StoreError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(
                sql::SELECT_INSIGHTS_FOR_OWNER,
                params![owner_id, limit as i64],
            )
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        let mut insights = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            let insight_data = text_at(&row, 4)?;
            insights.push(StoredInsight {
                owner_id: opt_text_at(&row, 0)?,
                business_type: text_at(&row, 1)?,
                location: text_at(&row, 2)?,
                area: opt_text_at(&row, 3)?,
                fields: serde_json::from_str(&insight_data)?,
                generated_at: parse_timestamp(&text_at(&row, 5)?)?,
            });
        }
        Ok(insights)
    }

    /// Persists a user turn and its assistant reply in one transaction:
    /// either both land or the transcript is left unchanged.
    pub async fn append_chat_exchange(
        &self,
        user_turn: &ChatTurn,
        assistant_turn: &ChatTurn,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute("BEGIN TRANSACTION", ())
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        for turn in [user_turn, assistant_turn] {
            if let Err(e) = insert_turn(&conn, turn).await {
                conn.execute("ROLLBACK", ())
                    .await
                    .map_err(|e| StoreError::Operation(e.to_string()))?;
                return Err(map_constraint_error(e, &turn.id));
            }
        }

        conn.execute("COMMIT", ())
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }

    /// The full transcript of a session, oldest first.
    pub async fn list_chat_turns(&self, session_id: &str) -> Result<Vec<ChatTurn>, StoreError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_CHAT_TURNS, params![session_id])
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        let mut turns = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            turns.push(chat_turn_from_row(&row)?);
        }
        Ok(turns)
    }

    /// The `n` most recent turns of a session, returned oldest first so
    /// they can be embedded in a prompt as-is.
    pub async fn recent_chat_turns(
        &self,
        session_id: &str,
        n: u32,
    ) -> Result<Vec<ChatTurn>, StoreError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_RECENT_CHAT_TURNS, params![session_id, n as i64])
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        let mut turns = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            turns.push(chat_turn_from_row(&row)?);
        }
        turns.reverse();
        Ok(turns)
    }

    /// Records a usage event. Best-effort: failures are logged and
    /// swallowed so analytics can never break a user-facing flow.
    pub async fn track_event(
        &self,
        event_type: &str,
        business_id: Option<&str>,
        metadata: Option<&JsonValue>,
    ) {
        if let Err(e) = self.try_track_event(event_type, business_id, metadata).await {
            warn!("Failed to record analytics event '{event_type}': {e}");
        }
    }

    async fn try_track_event(
        &self,
        event_type: &str,
        business_id: Option<&str>,
        metadata: Option<&JsonValue>,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let params_vec: Vec<TursoValue> = vec![
            text(event_type),
            opt_text(business_id),
            opt_text(metadata.map(|m| m.to_string()).as_deref()),
            text(&Utc::now().to_rfc3339()),
        ];
        conn.execute(sql::INSERT_ANALYTICS_EVENT, params_vec)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }

    /// High-level usage totals: insight, business and user-message counts
    /// plus the five locations with the most generated insights.
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, StoreError> {
        let conn = self.connect()?;

        let total_insights_generated = count(&conn, sql::COUNT_INSIGHTS).await?;
        let total_businesses_saved = count(&conn, sql::COUNT_BUSINESSES).await?;
        let total_chat_messages = count(&conn, sql::COUNT_USER_CHAT_MESSAGES).await?;

        let mut rows = conn
            .query(sql::POPULAR_LOCATIONS, ())
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        let mut popular_locations = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            popular_locations.push(LocationCount {
                location: text_at(&row, 0)?,
                count: int_at(&row, 1)? as u64,
            });
        }

        Ok(AnalyticsSummary {
            total_insights_generated,
            total_businesses_saved,
            total_chat_messages,
            popular_locations,
        })
    }
}

impl Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteStore {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

async fn insert_turn(conn: &Connection, turn: &ChatTurn) -> Result<(), turso::Error> {
    conn.execute(
        sql::INSERT_CHAT_TURN,
        params![
            turn.id.clone(),
            turn.session_id.clone(),
            turn.role.as_str(),
            turn.content.clone(),
            turn.timestamp.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

fn chat_turn_from_row(row: &turso::Row) -> Result<ChatTurn, StoreError> {
    let role_raw = text_at(row, 2)?;
    let role = ChatRole::parse(&role_raw)
        .ok_or_else(|| StoreError::Operation(format!("unknown chat role '{role_raw}'")))?;
    Ok(ChatTurn {
        id: text_at(row, 0)?,
        session_id: text_at(row, 1)?,
        role,
        content: text_at(row, 3)?,
        timestamp: parse_timestamp(&text_at(row, 4)?)?,
    })
}

async fn count(conn: &Connection, query: &str) -> Result<u64, StoreError> {
    let mut rows = conn
        .query(query, ())
        .await
        .map_err(|e| StoreError::Operation(e.to_string()))?;
    match next_row(&mut rows).await? {
        Some(row) => Ok(int_at(&row, 0)? as u64),
        None => Ok(0),
    }
}

async fn next_row(rows: &mut turso::Rows) -> Result<Option<turso::Row>, StoreError> {
    rows.next()
        .await
        .map_err(|e| StoreError::Operation(e.to_string()))
}

/// Maps a UNIQUE-constraint failure to [`StoreError::Conflict`] carrying
/// the offending identifier; anything else stays an operation error.
fn map_constraint_error(e: turso::Error, identifier: &str) -> StoreError {
    match e {
        turso::Error::Constraint(msg) if msg.contains("UNIQUE constraint failed") => {
            StoreError::Conflict(identifier.to_string())
        }
        other => StoreError::Operation(other.to_string()),
    }
}

fn text(s: &str) -> TursoValue {
    TursoValue::Text(s.to_string())
}

fn opt_text(s: Option<&str>) -> TursoValue {
    match s {
        Some(s) => TursoValue::Text(s.to_string()),
        None => TursoValue::Null,
    }
}

fn text_at(row: &turso::Row, idx: usize) -> Result<String, StoreError> {
    match row
        .get_value(idx)
        .map_err(|e| StoreError::Operation(e.to_string()))?
    {
        TursoValue::Text(s) => Ok(s),
        other => Err(StoreError::Operation(format!(
            "expected TEXT at column {idx}, got {other:?}"
        ))),
    }
}

fn opt_text_at(row: &turso::Row, idx: usize) -> Result<Option<String>, StoreError> {
    match row
        .get_value(idx)
        .map_err(|e| StoreError::Operation(e.to_string()))?
    {
        TursoValue::Text(s) => Ok(Some(s)),
        TursoValue::Null => Ok(None),
        other => Err(StoreError::Operation(format!(
            "expected TEXT or NULL at column {idx}, got {other:?}"
        ))),
    }
}

fn int_at(row: &turso::Row, idx: usize) -> Result<i64, StoreError> {
    match row
        .get_value(idx)
        .map_err(|e| StoreError::Operation(e.to_string()))?
    {
        TursoValue::Integer(i) => Ok(i),
        other => Err(StoreError::Operation(format!(
            "expected INTEGER at column {idx}, got {other:?}"
        ))),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Operation(format!("invalid stored timestamp '{raw}': {e}")))
}
