//! masala - print the table board of a Masala POS backend
//!
//! Usage: `masala [username password]`
//!
//! Without credentials the token from `MASALA_TOKEN` is used.

use anyhow::Context;
use masala_client::money::format_amount;
use masala_client::{ClientConfig, PosSession, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    logger::init_from_config(&config)?;

    tracing::info!(base_url = %config.base_url, "Starting masala client");

    let mut session = PosSession::new(&config)?;
    let mut args = std::env::args().skip(1);
    match (args.next(), args.next()) {
        (Some(username), Some(password)) => {
            session
                .login(&username, &password)
                .await
                .context("login failed")?;
        }
        _ => {
            session
                .restore()
                .await
                .context("no credentials given and MASALA_TOKEN is not usable")?;
        }
    }

    session
        .refresh_tables()
        .await
        .context("failed to fetch tables")?;

    for (block, tables) in session.board().grouped() {
        let label = if block.is_empty() { "(no block)" } else { block.as_str() };
        println!("== {label} ==");
        for table in tables {
            println!(
                "  #{:<5} {:<16} seats {:<2} {:>10}{}",
                table.table_number,
                table.status.as_str(),
                table.capacity,
                format_amount(table.total_amount),
                table
                    .running_order_id
                    .as_deref()
                    .map(|id| format!("  order {id}"))
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}
