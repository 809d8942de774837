//! Session context
//!
//! [`PosSession`] holds everything that belongs to one logged-in terminal:
//! the HTTP client, the user, the tax rate and the shared table board.
//! Each order-taking screen gets its own [`OrderSession`] with a private cart.

use crate::billing::{Bill, PaymentForm};
use crate::cart::Cart;
use crate::order::{KitchenTicket, OrderSubmission, prepare_submission};
use crate::tables::{AggregatedTable, TableBoard};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use rust_decimal::Decimal;
use shared::client::UserInfo;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, TableStatus};
use shared::order::{OrderAck, PaymentAck};
use std::sync::Arc;

/// One logged-in POS terminal
#[derive(Debug)]
pub struct PosSession {
    http: HttpClient,
    user: Option<UserInfo>,
    tax_rate: Decimal,
    board: Arc<TableBoard>,
}

impl PosSession {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_http(config.build_http_client()?, config.tax_rate))
    }

    pub fn with_http(http: HttpClient, tax_rate: Decimal) -> Self {
        Self {
            http,
            user: None,
            tax_rate,
            board: Arc::new(TableBoard::new()),
        }
    }

    // ========== Auth ==========

    /// Log in and keep the issued token for subsequent calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<&UserInfo> {
        let response = self.http.login(username, password).await?;
        self.http.set_token(Some(response.token));
        tracing::info!(username = %response.user.username, role = %response.user.role, "Logged in");
        Ok(self.user.insert(response.user))
    }

    /// Resume with a pre-issued token (from config)
    pub async fn restore(&mut self) -> ClientResult<&UserInfo> {
        if self.http.token().is_none() {
            return Err(ClientError::Unauthorized);
        }
        let me = self.http.me().await?;
        Ok(self.user.insert(me.into()))
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        self.http.logout().await?;
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "Logged out");
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    // ========== Accessors ==========

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Shared handle to the table board (for event sync tasks)
    pub fn board(&self) -> Arc<TableBoard> {
        Arc::clone(&self.board)
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    // ========== Tables & Menu ==========

    /// Re-fetch the table listing into the board
    pub async fn refresh_tables(&self) -> ClientResult<bool> {
        self.board.refresh(&self.http).await
    }

    pub async fn menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.http.menu().await
    }

    /// Open an order-taking session for `table` with an empty cart
    pub fn start_order(&self, table: &AggregatedTable) -> OrderSession {
        tracing::debug!(table_id = %table.table_id, "Starting order session");
        OrderSession {
            table: table.clone(),
            cart: Cart::for_table(&table.table_id).with_tax_rate(self.tax_rate),
        }
    }

    // ========== Billing ==========

    /// Collect payment for a table's running balance.
    ///
    /// The form is validated against the whole table before anything is
    /// sent. Every running order gets its own payment; the table is released
    /// only after all of them are recorded. A failed refresh afterwards is
    /// logged but does not fail the settlement.
    pub async fn settle(
        &self,
        table: &AggregatedTable,
        form: &PaymentForm,
    ) -> ClientResult<Settlement> {
        if table.orders.is_empty() {
            return Err(ClientError::Validation(
                AppError::with_message(ErrorCode::OrderNotFound, "Table has no running order")
                    .with_detail("table_id", table.table_id.clone()),
            ));
        }

        let bill = Bill::for_table(table, self.tax_rate);
        let payment = form.validate(bill.amount_due())?;
        let change_due = payment.change_due;

        let mut payments = Vec::with_capacity(table.orders.len());
        for input in payment.split_across(&table.orders) {
            let ack = self.http.process_payment(&input).await?;
            tracing::info!(
                table_id = %table.table_id,
                order_id = %ack.order_id,
                payment_id = %ack.payment_id,
                method = %form.method,
                amount = input.amount,
                "Payment recorded"
            );
            payments.push(ack);
        }

        self.http
            .update_table_status(&table.table_id, TableStatus::Available)
            .await?;

        if let Err(e) = self.refresh_tables().await {
            tracing::warn!(error = %e, "Table refresh after settlement failed");
        }

        Ok(Settlement {
            payments,
            bill,
            change_due,
        })
    }
}

/// Outcome of [`PosSession::settle`]
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// One acknowledgement per running order, in table order
    pub payments: Vec<PaymentAck>,
    pub bill: Bill,
    /// Cash to hand back
    pub change_due: Decimal,
}

/// Outcome of a successful KOT submission
#[derive(Debug, Clone, PartialEq)]
pub struct KotReceipt {
    pub ack: OrderAck,
    /// Ticket for the kitchen printer, with order id and KOT number filled in
    pub ticket: KitchenTicket,
    /// Whether this KOT opened a new order
    pub opened_order: bool,
}

/// Order-taking for one table (点单)
#[derive(Debug)]
pub struct OrderSession {
    table: AggregatedTable,
    cart: Cart,
}

impl OrderSession {
    pub fn table(&self) -> &AggregatedTable {
        &self.table
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn running_order_id(&self) -> Option<&str> {
        self.table.running_order_id.as_deref()
    }

    /// Add one unit of a menu item, refusing items marked unavailable
    pub fn add_item(&mut self, item: &MenuItem) -> Result<(), AppError> {
        if !item.is_available {
            return Err(AppError::new(ErrorCode::MenuItemUnavailable)
                .with_detail("menu_item_id", item.id.clone()));
        }
        self.cart.add(item);
        Ok(())
    }

    /// Ticket for the items currently in the cart
    pub fn kitchen_ticket(&self) -> KitchenTicket {
        KitchenTicket::from_cart(&self.cart, &self.table.table_number)
    }

    /// Send the cart to the kitchen.
    ///
    /// Opens a new order if the table has none, otherwise appends to the
    /// running one. The cart is emptied only when the backend accepts it.
    pub async fn submit_kot(&mut self, http: &HttpClient) -> ClientResult<KotReceipt> {
        let submission = prepare_submission(&self.cart, self.running_order_id())?;
        let mut ticket = self.kitchen_ticket();

        let (ack, opened_order) = match &submission {
            OrderSubmission::Create(payload) => (http.create_order(payload).await?, true),
            OrderSubmission::AddItems(payload) => (http.add_items(payload).await?, false),
        };

        tracing::info!(
            table_id = %self.table.table_id,
            order_id = %ack.order_id,
            items = ticket.item_count(),
            opened_order,
            "KOT submitted"
        );

        ticket.order_id = Some(ack.order_id.clone());
        ticket.kot_number = ack.kot_number.clone();
        self.table.running_order_id = Some(ack.order_id.clone());
        self.table.orders.entry(ack.order_id.clone()).or_default();
        self.table.status = TableStatus::Occupied;
        self.reset_cart();

        Ok(KotReceipt {
            ack,
            ticket,
            opened_order,
        })
    }

    /// Navigate away: discard the cart
    pub fn close(mut self) {
        self.cart.clear();
        tracing::debug!(table_id = %self.table.table_id, "Order session closed");
    }

    fn reset_cart(&mut self) {
        let rate = self.cart.tax_rate();
        self.cart = Cart::for_table(&self.table.table_id).with_tax_rate(rate);
    }
}
