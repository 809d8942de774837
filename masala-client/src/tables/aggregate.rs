//! Multi-row table aggregation (桌台汇总)
//!
//! The backend lists one row per active order, so a table with two running
//! orders shows up twice. [`aggregate`] folds those rows into one entry per
//! table, summing the amounts.

use crate::money;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use shared::models::{TableRow, TableStatus};

/// Reconciled view of one physical table
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    pub table_id: String,
    pub table_number: String,
    pub block: String,
    pub capacity: u32,
    /// `Occupied` if any row reported it
    pub status: TableStatus,
    /// First non-null running order id seen
    pub running_order_id: Option<String>,
    /// Balance per running order, in first-seen order. Rows without an order
    /// id count towards `total_amount` only.
    pub orders: IndexMap<String, Decimal>,
    /// Sum of all row amounts
    pub total_amount: Decimal,
    /// Number of backend rows folded into this entry
    pub row_count: usize,
}

impl AggregatedTable {
    fn seed(row: &TableRow) -> Self {
        let mut orders = IndexMap::new();
        if let Some(id) = &row.running_order_id {
            orders.insert(id.clone(), money::to_decimal(row.amount));
        }
        Self {
            table_id: row.table_id.clone(),
            table_number: row.table_number.clone(),
            block: row.block.clone(),
            capacity: row.capacity,
            status: row.status,
            running_order_id: row.running_order_id.clone(),
            orders,
            total_amount: money::to_decimal(row.amount),
            row_count: 1,
        }
    }

    fn merge(&mut self, row: &TableRow) {
        self.total_amount += money::to_decimal(row.amount);
        self.row_count += 1;

        if row.status == TableStatus::Occupied {
            self.status = TableStatus::Occupied;
        }
        if self.running_order_id.is_none() {
            self.running_order_id = row.running_order_id.clone();
        }
        if let Some(id) = &row.running_order_id {
            *self.orders.entry(id.clone()).or_default() += money::to_decimal(row.amount);
        }

        // Later rows must describe the same physical table; keep the seed.
        if row.table_number != self.table_number {
            self.warn_mismatch("table_number", &self.table_number, &row.table_number);
        }
        if row.block != self.block {
            self.warn_mismatch("block", &self.block, &row.block);
        }
        if row.capacity != self.capacity {
            self.warn_mismatch("capacity", &self.capacity, &row.capacity);
        }
    }

    fn warn_mismatch(&self, field: &str, kept: &dyn std::fmt::Display, seen: &dyn std::fmt::Display) {
        tracing::warn!(
            table_id = %self.table_id,
            field,
            kept = %kept,
            seen = %seen,
            "Table rows disagree; keeping first row"
        );
    }

    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }

    /// Every running order id on this table
    pub fn order_ids(&self) -> impl Iterator<Item = &str> {
        self.orders.keys().map(String::as_str)
    }
}

/// Fold table rows into one entry per table id, in first-seen order.
///
/// Never fails: malformed amounts were already coerced to zero when the rows
/// were decoded.
pub fn aggregate(rows: &[TableRow]) -> IndexMap<String, AggregatedTable> {
    let mut tables: IndexMap<String, AggregatedTable> = IndexMap::with_capacity(rows.len());

    for row in rows {
        match tables.get_mut(&row.table_id) {
            Some(existing) => existing.merge(row),
            None => {
                tables.insert(row.table_id.clone(), AggregatedTable::seed(row));
            }
        }
    }

    tables
}
