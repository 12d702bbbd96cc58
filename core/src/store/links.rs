use super::SimStore;
use crate::{error::SimResult, links::{LinkPair, LinkSpec}};
use rusqlite::params;

impl SimStore {
    // ── Link registry ─────────────────────────────────────────────

    /// Plain insert: the registry keeps duplicates and append order.
    pub fn append_link(&self, spec: &LinkSpec, pair: &LinkPair) -> SimResult<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO {} (\"{}\", \"{}\") VALUES (?1, ?2)",
                spec.table, spec.column_a, spec.column_b
            ),
            params![pair.a, pair.b],
        )?;
        Ok(())
    }

    pub fn append_links(&self, spec: &LinkSpec, pairs: &[LinkPair]) -> SimResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (\"{}\", \"{}\") VALUES (?1, ?2)",
                spec.table, spec.column_a, spec.column_b
            ))?;
            for pair in pairs {
                stmt.execute(params![pair.a, pair.b])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_links(&self, spec: &LinkSpec) -> SimResult<Vec<LinkPair>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT \"{}\", \"{}\" FROM {} ORDER BY rowid ASC",
            spec.column_a, spec.column_b, spec.table
        ))?;
        let pairs = stmt
            .query_map([], |row| {
                Ok(LinkPair {
                    a: row.get(0)?,
                    b: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pairs)
    }
}
