//! Table listing: normalization, aggregation, grouping and the live board

mod aggregate;
mod board;
mod grouping;
mod normalize;

pub use aggregate::{AggregatedTable, aggregate};
pub use board::{RefreshTicket, TableBoard, TableSource};
pub use grouping::{group_by_block, natural_cmp};
pub use normalize::extract_table_rows;
