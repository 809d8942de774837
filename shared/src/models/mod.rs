//! Data models shared with the backend

pub mod dining_table;
pub mod menu_item;

pub use dining_table::{TableRow, TableStatus, TableStatusUpdate};
pub use menu_item::{MenuItem, SpiceLevel};
