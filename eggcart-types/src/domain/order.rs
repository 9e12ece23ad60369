//! Local order record and its payment state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a local order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random OrderId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OrderId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Payment leg of the order state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfilment leg of the order state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown order status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item on an order. `price` is per unit, in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: i64,
}

/// Converts a major-unit amount (rupees) to minor units (paise).
///
/// Rejects non-finite, zero, and negative amounts.
pub fn to_minor_units(amount: f64) -> Result<i64, DomainError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::InvalidAmount);
    }
    Ok((amount * 100.0).round() as i64)
}

/// The locally persisted order record.
///
/// Created in `(pending, pending)`; the only transition this core performs
/// is to `(paid, confirmed)` after the gateway signature verifies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocalOrder {
    pub id: OrderId,
    /// Gateway payment id, recorded once the order is paid.
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    /// Total in minor currency units.
    pub total_amount: i64,
    /// Caller-supplied receipt reference, if any.
    pub receipt: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalOrder {
    /// Creates a new pending order.
    pub fn new(total_amount: i64, receipt: Option<String>, items: Vec<OrderItem>) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            payment_id: None,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            total_amount,
            receipt,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a verified payment: stores the gateway payment id and moves
    /// the order to `(paid, confirmed)`. Idempotent field overwrites.
    pub fn mark_paid(&mut self, payment_id: &str) {
        self.payment_id = Some(payment_id.to_string());
        self.payment_status = PaymentStatus::Paid;
        self.order_status = OrderStatus::Confirmed;
        self.updated_at = Utc::now();
    }
}
