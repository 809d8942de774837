//! Real-time event routing
//!
//! Server-pushed [`BusMessage`]s never patch the table board directly. A sync
//! signal for anything that affects tables triggers a full re-fetch, and the
//! board's ticketing discards whichever responses come back stale.

use crate::tables::{TableBoard, TableSource};
use shared::message::{BusMessage, EventType, NotificationPayload, SyncPayload, resource};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;

/// Resources whose changes invalidate the table listing
const TABLE_RESOURCES: [&str; 3] = [resource::DINING_TABLE, resource::ORDER, resource::PAYMENT];

/// Routing decision for a BusMessage
#[derive(Debug, Clone, PartialEq)]
pub enum EventRoute {
    /// Re-fetch the table listing
    RefreshTables { resource: String, id: String },
    /// Show a transient notification to staff
    Notify(NotificationPayload),
    /// Nothing for the client to do
    Ignore,
}

impl EventRoute {
    /// Analyze a BusMessage and determine how it should be handled
    pub fn from_bus_message(msg: &BusMessage) -> Self {
        match msg.event_type {
            EventType::Sync => match msg.parse_payload::<SyncPayload>() {
                Ok(sync) if TABLE_RESOURCES.contains(&sync.resource.as_str()) => {
                    EventRoute::RefreshTables {
                        resource: sync.resource,
                        id: sync.id,
                    }
                }
                Ok(_) => EventRoute::Ignore,
                Err(e) => {
                    tracing::debug!(request_id = %msg.request_id, error = %e, "Unparseable sync payload");
                    EventRoute::Ignore
                }
            },
            EventType::Notification => match msg.parse_payload::<NotificationPayload>() {
                Ok(payload) => EventRoute::Notify(payload),
                Err(e) => {
                    tracing::debug!(request_id = %msg.request_id, error = %e, "Unparseable notification payload");
                    EventRoute::Ignore
                }
            },
            EventType::Handshake => EventRoute::Ignore,
        }
    }
}

fn spawn_refresh<S>(inflight: &mut JoinSet<()>, board: &Arc<TableBoard>, source: &Arc<S>)
where
    S: TableSource + 'static,
{
    let board = Arc::clone(board);
    let source = Arc::clone(source);
    inflight.spawn(async move {
        // Failures are logged by the board; the last good projection stays.
        let _ = board.refresh(source.as_ref()).await;
    });
}

/// Keep `board` in sync with server events until the channel closes.
///
/// Each table-affecting sync event starts a full refresh. Refreshes may
/// overlap; only the newest completed one is kept. When the receiver lags,
/// one refresh covers all missed events. On close, in-flight refreshes are
/// awaited before returning.
pub async fn run_table_sync<S>(
    board: Arc<TableBoard>,
    source: Arc<S>,
    mut rx: broadcast::Receiver<BusMessage>,
) where
    S: TableSource + 'static,
{
    let mut inflight: JoinSet<()> = JoinSet::new();

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(msg) => match EventRoute::from_bus_message(&msg) {
                    EventRoute::RefreshTables { resource, id } => {
                        tracing::debug!(%resource, %id, "Sync signal, refreshing tables");
                        spawn_refresh(&mut inflight, &board, &source);
                    }
                    EventRoute::Notify(payload) => {
                        tracing::info!(
                            title = %payload.title,
                            level = %payload.level,
                            "{}",
                            payload.message
                        );
                    }
                    EventRoute::Ignore => {}
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event receiver lagged, refreshing tables");
                    spawn_refresh(&mut inflight, &board, &source);
                }
                Err(RecvError::Closed) => break,
            },
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "Table refresh task panicked");
                }
            }
        }
    }

    while let Some(joined) = inflight.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Table refresh task panicked");
        }
    }
    tracing::info!("Event channel closed, table sync stopped");
}
