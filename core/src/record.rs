//! The record contract shared by master entities and dependent records.

use crate::{error::SimResult, ids::IdFormat, types::SheetRow};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A row type that lives in one durable store table and one remote stream.
///
/// Struct field order is the column order of the stream, so serializing a
/// record yields its sheet row directly.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Durable store table.
    const TABLE: &'static str;
    /// Primary identifier column.
    const KEY: &'static str;
    /// Stream key, used to look up the worksheet name in config.
    const STREAM: &'static str;
    const ID_FORMAT: IdFormat;

    fn id(&self) -> &str;
}

/// Flatten a record into stringified values in column order.
pub fn sheet_row<R: Record>(record: &R) -> SimResult<SheetRow> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map.into_iter().map(|(_, v)| cell_text(v)).collect()),
        other => Ok(vec![cell_text(other)]),
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Serialize, Deserialize)]
    struct Widget {
        wid:   String,
        label: String,
        price: f64,
        count: i64,
    }

    impl Record for Widget {
        const TABLE: &'static str = "widgets";
        const KEY: &'static str = "wid";
        const STREAM: &'static str = "widget";
        const ID_FORMAT: IdFormat = IdFormat::new("W", 2);

        fn id(&self) -> &str {
            &self.wid
        }
    }

    #[test]
    fn sheet_row_keeps_field_order_and_plain_strings() {
        let w = Widget {
            wid:   "W01".into(),
            label: "bolt".into(),
            price: 12.5,
            count: 3,
        };
        assert_eq!(sheet_row(&w).unwrap(), vec!["W01", "bolt", "12.5", "3"]);
    }
}
