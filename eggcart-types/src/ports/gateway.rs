//! Payment gateway port.

use crate::error::GatewayError;

/// An order as created at the gateway.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    /// Gateway-issued order id.
    pub id: String,
    /// Amount in minor currency units, as echoed by the gateway.
    pub amount: i64,
    pub currency: String,
}

/// The external payment gateway.
///
/// Signature verification lives behind this port so the key secret never
/// leaves the adapter.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates a gateway order for the given minor-unit amount.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;

    /// Recomputes the checkout callback signature over
    /// `{order_id}|{payment_id}` and compares it to the submitted one.
    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError>;

    /// The public key id needed by the client-side checkout widget.
    fn key_id(&self) -> Result<String, GatewayError>;
}
