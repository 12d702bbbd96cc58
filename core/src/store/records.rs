use super::SimStore;
use crate::{error::SimResult, record::Record};
use rusqlite::{
    params_from_iter,
    types::{Value as SqlValue, ValueRef},
};
use serde_json::{Map, Value};

/// One table row, keyed by column name.
pub type Row = Map<String, Value>;

impl SimStore {
    // ── Generic rows ──────────────────────────────────────────────

    /// Every row of `table`, in insertion order.
    pub fn fetch_all(&self, table: &str) -> SimResult<Vec<Row>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {table} ORDER BY rowid ASC"))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let rows = stmt
            .query_map([], |row| {
                let mut out = Row::new();
                for (i, name) in columns.iter().enumerate() {
                    out.insert(name.clone(), json_from_sql(row.get_ref(i)?));
                }
                Ok(out)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Insert or replace one row keyed by the table's primary key.
    /// Calling it again with the same key overwrites in place.
    pub fn upsert(&self, table: &str, row: &Row) -> SimResult<()> {
        self.conn
            .execute(&upsert_sql(table, row), params_from_iter(row.values().map(sql_from_json)))?;
        Ok(())
    }

    /// Upsert many rows in one transaction.
    pub fn upsert_many(&self, table: &str, rows: &[Row]) -> SimResult<()> {
        let Some(first) = rows.first() else {
            return Ok(());
        };
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(&upsert_sql(table, first))?;
            for row in rows {
                stmt.execute(params_from_iter(row.values().map(sql_from_json)))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // ── Typed records ─────────────────────────────────────────────

    pub fn upsert_record<R: Record>(&self, record: &R) -> SimResult<()> {
        self.upsert(R::TABLE, &record_row(record)?)
    }

    pub fn upsert_records<R: Record>(&self, records: &[R]) -> SimResult<()> {
        let rows = records.iter().map(record_row).collect::<SimResult<Vec<_>>>()?;
        self.upsert_many(R::TABLE, &rows)
    }

    /// Primary identifiers of every `R` row, in insertion order.
    pub fn load_ids<R: Record>(&self) -> SimResult<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT \"{}\" FROM {} ORDER BY rowid ASC",
            R::KEY,
            R::TABLE
        ))?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    /// All rows of `R::TABLE`, decoded.
    pub fn load_records<R: Record>(&self) -> SimResult<Vec<R>> {
        self.fetch_all(R::TABLE)?
            .into_iter()
            .map(|row| Ok(serde_json::from_value(Value::Object(row))?))
            .collect()
    }
}

fn record_row<R: Record>(record: &R) -> SimResult<Row> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!("record for {} is not an object: {other}", R::TABLE).into()),
    }
}

fn upsert_sql(table: &str, row: &Row) -> String {
    let columns = row
        .keys()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=row.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT OR REPLACE INTO {table} ({columns}) VALUES ({placeholders})")
}

fn sql_from_json(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => SqlValue::Integer(i),
            (None, Some(f)) => SqlValue::Real(f),
            _ => SqlValue::Text(n.to_string()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn json_from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            Value::String(String::from_utf8_lossy(t).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> SimStore {
        let store = SimStore::in_memory().unwrap();
        store.migrate().unwrap();
        store
    }

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn upsert_is_idempotent_by_key() {
        let store = store();
        let r = row(json!({"sid": "STR001", "name": "CityMart", "location": "Pune",
                           "manager": "Ann Lee", "stype": "Small"}));
        store.upsert("retail_stores", &r).unwrap();
        store.upsert("retail_stores", &r).unwrap();
        assert_eq!(store.row_count("retail_stores").unwrap(), 1);

        let r2 = row(json!({"sid": "STR001", "name": "CityMart", "location": "Mumbai",
                            "manager": "Ann Lee", "stype": "Small"}));
        store.upsert("retail_stores", &r2).unwrap();
        let rows = store.fetch_all("retail_stores").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["location"], json!("Mumbai"));
    }

    #[test]
    fn fetch_all_preserves_value_types() {
        let store = store();
        let r = row(json!({"pid": "P0001", "name": "Tea_1", "category": "Beverages",
                           "subcat": "Tea", "brand": "EcoFoods", "cost": 20.5,
                           "selling": 210.0, "shelf_life": 90}));
        store.upsert("retail_products", &r).unwrap();
        let rows = store.fetch_all("retail_products").unwrap();
        assert_eq!(rows[0]["cost"], json!(20.5));
        assert_eq!(rows[0]["shelf_life"], json!(90));
    }

    #[test]
    fn upsert_many_with_no_rows_is_noop() {
        let store = store();
        store.upsert_many("retail_products", &[]).unwrap();
        assert_eq!(store.row_count("retail_products").unwrap(), 0);
    }
}
