//! Table board: latest aggregated projection with request sequencing
//!
//! Every refresh takes a ticket from a monotonic counter before it goes out.
//! When a response comes back it is applied only if its ticket is newer than
//! the one behind the current projection, so a slow response can never
//! overwrite a faster, later one.

use super::{AggregatedTable, aggregate, extract_table_rows, group_by_block};
use crate::ClientResult;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::TableRow;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Anything that can produce a raw table listing payload
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_tables(&self) -> ClientResult<Value>;
}

/// Sequence number taken before a refresh is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct BoardState {
    applied_seq: u64,
    tables: IndexMap<String, AggregatedTable>,
    refreshed_at: Option<i64>,
}

/// Shared table projection (通常以 `Arc<TableBoard>` 共享)
#[derive(Debug, Default)]
pub struct TableBoard {
    issued: AtomicU64,
    state: Mutex<BoardState>,
}

impl TableBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket. Call before issuing the request.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply decoded rows fetched under `ticket`.
    ///
    /// Returns `false` (and leaves the board untouched) if a newer response
    /// has already been applied.
    pub fn apply(&self, ticket: RefreshTicket, rows: &[TableRow]) -> bool {
        let tables = aggregate(rows);

        let mut state = self.state.lock();
        if ticket.0 <= state.applied_seq {
            tracing::debug!(
                ticket = ticket.0,
                applied = state.applied_seq,
                "Dropping stale table listing"
            );
            return false;
        }
        state.applied_seq = ticket.0;
        state.tables = tables;
        state.refreshed_at = Some(shared::util::now_millis());
        tracing::debug!(ticket = ticket.0, tables = state.tables.len(), "Table board updated");
        true
    }

    /// Normalize a raw payload and apply it
    pub fn apply_payload(&self, ticket: RefreshTicket, payload: &Value) -> bool {
        self.apply(ticket, &extract_table_rows(payload))
    }

    /// Fetch from `source` and apply the result if it is still current.
    ///
    /// On fetch failure the previous projection is kept and the error is
    /// returned to the caller.
    pub async fn refresh<S>(&self, source: &S) -> ClientResult<bool>
    where
        S: TableSource + ?Sized,
    {
        let ticket = self.begin_refresh();
        match source.fetch_tables().await {
            Ok(payload) => Ok(self.apply_payload(ticket, &payload)),
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "Table refresh failed");
                Err(e)
            }
        }
    }

    /// Snapshot of all tables in first-seen order
    pub fn tables(&self) -> Vec<AggregatedTable> {
        self.state.lock().tables.values().cloned().collect()
    }

    pub fn get(&self, table_id: &str) -> Option<AggregatedTable> {
        self.state.lock().tables.get(table_id).cloned()
    }

    /// Tables grouped by block for display
    pub fn grouped(&self) -> BTreeMap<String, Vec<AggregatedTable>> {
        let state = self.state.lock();
        group_by_block(state.tables.values())
    }

    /// Ticket behind the current projection (0 = never refreshed)
    pub fn last_applied(&self) -> u64 {
        self.state.lock().applied_seq
    }

    /// When the current projection was applied (unix millis)
    pub fn refreshed_at(&self) -> Option<i64> {
        self.state.lock().refreshed_at
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stale_ticket_dropped() {
        let board = TableBoard::new();
        let first = board.begin_refresh();
        let second = board.begin_refresh();
        assert!(second > first);

        assert!(board.apply_payload(second, &json!([{ "table_id": "2", "amount": 5 }])));
        assert!(!board.apply_payload(first, &json!([{ "table_id": "1", "amount": 9 }])));

        assert_eq!(board.last_applied(), second.seq());
        assert!(board.get("1").is_none());
        assert!(board.get("2").is_some());
    }

    #[test]
    fn test_in_order_applies() {
        let board = TableBoard::new();
        assert!(board.is_empty());
        assert!(board.refreshed_at().is_none());

        let t1 = board.begin_refresh();
        assert!(board.apply_payload(t1, &json!({ "tables": [{ "table_id": "1" }] })));
        let t2 = board.begin_refresh();
        assert!(board.apply_payload(t2, &json!({ "data": [] })));

        assert!(board.is_empty());
        assert!(board.refreshed_at().is_some());
    }

    #[test]
    fn test_same_ticket_applies_once() {
        let board = TableBoard::new();
        let t = board.begin_refresh();
        assert!(board.apply(t, &[]));
        assert!(!board.apply(t, &[]));
    }
}
