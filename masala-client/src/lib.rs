//! Masala Client - POS client core for the Masala backend
//!
//! Cart and billing arithmetic, table aggregation and the HTTP API client
//! used by the order-taking terminals.
//!
//! # 模块
//!
//! - [`cart`]: 购物车 (cart engine)
//! - [`tables`]: 桌台列表归一化、汇总、分组与实时看板
//! - [`order`]: KOT payloads
//! - [`billing`]: bills and payment validation
//! - [`events`]: real-time event routing
//! - [`session`]: session context (no globals)

pub mod billing;
pub mod cart;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod logger;
pub mod money;
pub mod order;
pub mod session;
pub mod tables;

pub use billing::{Bill, PaymentForm, ValidatedPayment};
pub use cart::{Cart, CartLine};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use events::{EventRoute, run_table_sync};
pub use http::HttpClient;
pub use order::{KitchenTicket, KotLine, OrderSubmission, prepare_submission};
pub use session::{KotReceipt, OrderSession, PosSession, Settlement};
pub use tables::{AggregatedTable, TableBoard, TableSource, aggregate, group_by_block};

// Re-export shared types for convenience
pub use shared::client::{CurrentUserResponse, LoginResponse, UserInfo};
pub use shared::error::{ApiResponse, AppError, ErrorCode};
pub use shared::message::{BusMessage, EventType};
