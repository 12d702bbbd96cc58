use super::SimStore;
use crate::error::SimResult;
use rusqlite::{params, OptionalExtension};

impl SimStore {
    // ── Identifier counters ───────────────────────────────────────

    pub fn load_counter(&self, category: &str) -> SimResult<Option<u64>> {
        let value = self
            .conn
            .query_row(
                "SELECT next_value FROM id_counter WHERE category = ?1",
                params![category],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(value.map(|v| v.max(0) as u64))
    }

    pub fn save_counter(&self, category: &str, next_value: u64) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO id_counter (category, next_value) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET next_value = excluded.next_value",
            params![category, next_value as i64],
        )?;
        Ok(())
    }
}
