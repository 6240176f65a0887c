//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL statements for the SQLite store. This keeps
//! the store logic cleaner and isolates database-specific syntax.
//!
//! Timestamps are stored as RFC 3339 TEXT; with a uniform UTC offset the
//! lexicographic order of the column matches chronological order, so
//! `ORDER BY` on these columns needs no date parsing.

/// Every table and index the application needs. Statements are idempotent
/// and safe to run on every startup.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS businesses (
        business_id TEXT PRIMARY KEY,
        business_name TEXT NOT NULL,
        business_type TEXT NOT NULL,
        location TEXT NOT NULL,
        area TEXT,
        contact TEXT,
        created_at TEXT NOT NULL,
        last_active TEXT
    );",
    "CREATE TABLE IF NOT EXISTS insights (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        business_id TEXT,
        business_type TEXT NOT NULL,
        location TEXT NOT NULL,
        area TEXT,
        insight_data TEXT NOT NULL,
        generated_at TEXT NOT NULL,
        FOREIGN KEY (business_id) REFERENCES businesses(business_id)
    );",
    "CREATE TABLE IF NOT EXISTS chat_turns (
        id TEXT PRIMARY KEY,
        session_id TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_type TEXT NOT NULL,
        business_id TEXT,
        metadata TEXT,
        timestamp TEXT NOT NULL
    );",
    "CREATE INDEX IF NOT EXISTS idx_chat_turns_session ON chat_turns (session_id, timestamp);",
    "CREATE INDEX IF NOT EXISTS idx_insights_business ON insights (business_id, generated_at);",
];

pub const INSERT_BUSINESS: &str = "INSERT INTO businesses
    (business_id, business_name, business_type, location, area, contact, created_at, last_active)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?);";

pub const SELECT_BUSINESS: &str = "SELECT business_id, business_name, business_type, location,
    area, contact, created_at, last_active
    FROM businesses WHERE business_id = ?;";

pub const TOUCH_BUSINESS_LAST_ACTIVE: &str =
    "UPDATE businesses SET last_active = ? WHERE business_id = ?;";

pub const INSERT_INSIGHT: &str = "INSERT INTO insights
    (business_id, business_type, location, area, insight_data, generated_at)
    VALUES (?, ?, ?, ?, ?, ?);";

pub const SELECT_INSIGHTS_FOR_OWNER: &str = "SELECT business_id, business_type, location, area,
    insight_data, generated_at
    FROM insights WHERE business_id = ?
    ORDER BY generated_at DESC LIMIT ?;";

pub const INSERT_CHAT_TURN: &str = "INSERT INTO chat_turns
    (id, session_id, role, content, timestamp)
    VALUES (?, ?, ?, ?, ?);";

pub const SELECT_CHAT_TURNS: &str = "SELECT id, session_id, role, content, timestamp
    FROM chat_turns WHERE session_id = ?
    ORDER BY timestamp ASC;";

pub const SELECT_RECENT_CHAT_TURNS: &str = "SELECT id, session_id, role, content, timestamp
    FROM chat_turns WHERE session_id = ?
    ORDER BY timestamp DESC LIMIT ?;";

pub const INSERT_ANALYTICS_EVENT: &str = "INSERT INTO analytics
    (event_type, business_id, metadata, timestamp)
    VALUES (?, ?, ?, ?);";

pub const COUNT_INSIGHTS: &str = "SELECT COUNT(*) FROM insights;";

pub const COUNT_BUSINESSES: &str = "SELECT COUNT(*) FROM businesses;";

pub const COUNT_USER_CHAT_MESSAGES: &str =
    "SELECT COUNT(*) FROM chat_turns WHERE role = 'user';";

pub const POPULAR_LOCATIONS: &str = "SELECT location, COUNT(*) as count
    FROM insights GROUP BY location
    ORDER BY count DESC LIMIT 5;";
