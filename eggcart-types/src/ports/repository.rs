//! Record-store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) will implement this trait.

use crate::domain::{EmailAddress, LocalOrder, OrderId, OtpRecord};
use crate::error::RepoError;

/// The record-store port for OTP records and local orders.
///
/// Concurrency correctness relies on the store's own atomicity for
/// upsert/delete/update; implementations must not add in-process state.
#[async_trait::async_trait]
pub trait CheckoutRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────
    // OTP records
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores the record for a just-issued code, replacing any prior
    /// record for the same email (last upsert wins).
    async fn upsert_otp(&self, record: OtpRecord) -> Result<(), RepoError>;

    /// Fetches the live record for an email, if any.
    async fn find_otp(&self, email: &EmailAddress) -> Result<Option<OtpRecord>, RepoError>;

    /// Removes the record for an email. Removing an absent record is not
    /// an error.
    async fn delete_otp(&self, email: &EmailAddress) -> Result<(), RepoError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────

    /// Persists a new pending order.
    async fn insert_order(&self, order: LocalOrder) -> Result<(), RepoError>;

    /// Gets an order by ID.
    async fn get_order(&self, id: OrderId) -> Result<Option<LocalOrder>, RepoError>;

    /// Records a verified payment on an order: stores the gateway payment
    /// id and sets `(paid, confirmed)`. Returns the updated order, or
    /// `RepoError::NotFound` if no such order exists.
    async fn mark_order_paid(
        &self,
        id: OrderId,
        payment_id: &str,
    ) -> Result<LocalOrder, RepoError>;
}
