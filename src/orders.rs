//! Order records and the order-store collaborator interface
//!
//! The dialogue core never owns order storage. It talks to an
//! [`OrderTracker`], and the composing application decides what backs it.
//! [`MemoryOrderStore`] is the bundled in-process implementation used by
//! the CLI and tests.

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Lifecycle of an order. Only Pending and Processing orders can be
/// cancelled; every other transition is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One customer order. Ids match case-insensitively everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub delivery_date: NaiveDate,
}

/// External collaborator owning order records.
pub trait OrderTracker: Send + Sync {
    /// Find an order by id, case-insensitive.
    fn lookup(&self, order_id: &str) -> Option<Order>;

    /// Cancel an order. Succeeds only while the order is still pending
    /// or processing; otherwise the record is left untouched.
    fn cancel(&self, order_id: &str) -> bool;

    /// All orders belonging to one customer, in store order.
    fn orders_for_customer(&self, customer_id: &str) -> Vec<Order>;
}

impl<T: OrderTracker + ?Sized> OrderTracker for Arc<T> {
    fn lookup(&self, order_id: &str) -> Option<Order> {
        (**self).lookup(order_id)
    }

    fn cancel(&self, order_id: &str) -> bool {
        (**self).cancel(order_id)
    }

    fn orders_for_customer(&self, customer_id: &str) -> Vec<Order> {
        (**self).orders_for_customer(customer_id)
    }
}

/// In-memory order store.
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
        }
    }
}

impl OrderTracker for MemoryOrderStore {
    fn lookup(&self, order_id: &str) -> Option<Order> {
        self.orders
            .lock()
            .iter()
            .find(|order| order.id.eq_ignore_ascii_case(order_id))
            .cloned()
    }

    fn cancel(&self, order_id: &str) -> bool {
        let mut orders = self.orders.lock();
        match orders
            .iter_mut()
            .find(|order| order.id.eq_ignore_ascii_case(order_id))
        {
            Some(order) if order.status.cancellable() => {
                order.status = OrderStatus::Cancelled;
                true
            }
            _ => false,
        }
    }

    fn orders_for_customer(&self, customer_id: &str) -> Vec<Order> {
        self.orders
            .lock()
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect()
    }
}
