// src/store/store.rs — SQLite operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

/// A stored conversation turn.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

/// Low-level SQLite operations for sessions, messages, and extracted data.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Test-only access to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // -- Sessions --

    /// Create the session if it does not exist yet. Sessions are created on
    /// the first message carrying a given id and are never destroyed.
    pub fn ensure_session(&self, id: &str, user_id: &str) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO chat_sessions (id, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(id) DO UPDATE SET updated_at = ?3",
            params![id, user_id, now],
        )?;
        Ok(())
    }

    pub fn session_exists(&self, id: &str) -> anyhow::Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM chat_sessions WHERE id = ?1",
                params![id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        id: &str,
        session_id: &str,
        role: &str,
        content: &str,
    ) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO chat_messages (id, session_id, role, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, session_id, role, content, now],
        )?;
        Ok(())
    }

    /// All turns for a session, in submission order. Ordered by rowid rather
    /// than created_at so turns landing in the same millisecond keep their
    /// insertion order.
    pub fn query_messages(&self, session_id: &str) -> anyhow::Result<Vec<MessageRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, role, content, created_at FROM chat_messages
             WHERE session_id = ?1 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map(params![session_id], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                role: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    // -- Project data --

    pub fn insert_project_data(
        &self,
        id: &str,
        session_id: &str,
        payload: &str,
    ) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO project_data (id, session_id, payload, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![id, session_id, payload, now],
        )?;
        Ok(())
    }

    /// The most recently stored payload for a session, if any.
    pub fn latest_project_data(&self, session_id: &str) -> anyhow::Result<Option<String>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM project_data WHERE session_id = ?1
                 ORDER BY rowid DESC LIMIT 1",
                params![session_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(payload)
    }
}
