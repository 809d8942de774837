//! Dining Table Model

use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Table status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// Free for new guests
    #[default]
    Available,
    /// Guests seated, order running
    Occupied,
    /// Bill printed, waiting for payment
    AwaitingPayment,
}

impl TableStatus {
    /// Parse a status string, tolerating case and `-`/`_`/space separators.
    ///
    /// Returns `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "available" | "free" | "vacant" => Some(Self::Available),
            "occupied" | "busy" => Some(Self::Occupied),
            "awaitingpayment" | "billed" => Some(Self::AwaitingPayment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::AwaitingPayment => "awaiting_payment",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TableStatus {
    /// Unknown or non-string statuses decode as `Available`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(TableStatus::parse)
            .unwrap_or_default())
    }
}

/// One row of the backend table listing (桌台行)
///
/// The backend emits one row per active order, so several rows may share a
/// `table_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(deserialize_with = "lenient::id")]
    pub table_id: String,
    /// Number shown on the table card ("7", "12A")
    #[serde(default, deserialize_with = "lenient::label")]
    pub table_number: String,
    /// Block / zone label (大厅、露台、包厢)
    #[serde(default, deserialize_with = "lenient::label")]
    pub block: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub running_order_id: Option<String>,
    /// Running amount of the order behind this row
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
}

/// Update table status payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse_variants() {
        assert_eq!(TableStatus::parse("occupied"), Some(TableStatus::Occupied));
        assert_eq!(TableStatus::parse("OCCUPIED"), Some(TableStatus::Occupied));
        assert_eq!(
            TableStatus::parse("awaiting-payment"),
            Some(TableStatus::AwaitingPayment)
        );
        assert_eq!(
            TableStatus::parse("awaiting_payment"),
            Some(TableStatus::AwaitingPayment)
        );
        assert_eq!(TableStatus::parse(" Available "), Some(TableStatus::Available));
        assert_eq!(TableStatus::parse("reserved"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TableStatus::AwaitingPayment).unwrap();
        assert_eq!(json, "\"awaiting_payment\"");
        assert_eq!(TableStatus::AwaitingPayment.to_string(), "awaiting_payment");
    }

    #[test]
    fn test_unknown_status_decodes_as_available() {
        let status: TableStatus = serde_json::from_value(json!("closed")).unwrap();
        assert_eq!(status, TableStatus::Available);
        let status: TableStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(status, TableStatus::Available);
    }

    #[test]
    fn test_table_row_full() {
        let row: TableRow = serde_json::from_value(json!({
            "table_id": 5,
            "table_number": "5",
            "block": "Garden",
            "capacity": 4,
            "status": "occupied",
            "running_order_id": "ord-9",
            "amount": "250.00"
        }))
        .unwrap();

        assert_eq!(row.table_id, "5");
        assert_eq!(row.block, "Garden");
        assert_eq!(row.capacity, 4);
        assert_eq!(row.status, TableStatus::Occupied);
        assert_eq!(row.running_order_id.as_deref(), Some("ord-9"));
        assert_eq!(row.amount, 250.0);
    }

    #[test]
    fn test_table_row_minimal() {
        let row: TableRow = serde_json::from_value(json!({"table_id": "t1"})).unwrap();
        assert_eq!(row.table_number, "");
        assert_eq!(row.capacity, 0);
        assert_eq!(row.status, TableStatus::Available);
        assert_eq!(row.running_order_id, None);
        assert_eq!(row.amount, 0.0);
    }

    #[test]
    fn test_table_row_requires_id() {
        assert!(serde_json::from_value::<TableRow>(json!({"table_number": "3"})).is_err());
    }
}
