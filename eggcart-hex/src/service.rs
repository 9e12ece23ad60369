//! Checkout Application Service
//!
//! Orchestrates the OTP and payment flows through the four ports.
//! Contains NO infrastructure logic - pure business orchestration.

use chrono::Utc;

use eggcart_repo::security;
use eggcart_types::{
    CheckoutRepository, CreateOrderRequest, CreatePaymentOrderRequest,
    CreatePaymentOrderResponse, EmailAddress, IdentityProvider, LocalOrder, Mailer, NewUser,
    OrderId, OtpCode, OtpError, OtpRecord, PaymentError, PaymentGateway, SendOtpRequest,
    VerifyOtpRequest, VerifyPaymentRequest, VerifyPaymentResponse, domain::to_minor_units,
};

use crate::notify;

/// Minimum accepted password length for account creation.
pub const MIN_PASSWORD_LEN: usize = 6;

const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_ADMIN_PHONE: &str = "919999900000";

/// Application service for the checkout core.
///
/// Generic over the four ports - adapters are injected at compile time.
/// This enables:
/// - Swapping adapters without code changes
/// - Testing with mock ports
/// - Compile-time checks for port implementation
pub struct CheckoutService<R, M, I, G> {
    repo: R,
    mailer: M,
    identity: I,
    gateway: G,
    admin_phone: String,
}

impl<R, M, I, G> CheckoutService<R, M, I, G>
where
    R: CheckoutRepository,
    M: Mailer,
    I: IdentityProvider,
    G: PaymentGateway,
{
    /// Creates a new checkout service with the given port adapters.
    pub fn new(repo: R, mailer: M, identity: I, gateway: G) -> Self {
        Self {
            repo,
            mailer,
            identity,
            gateway,
            admin_phone: DEFAULT_ADMIN_PHONE.to_string(),
        }
    }

    /// Overrides the operator WhatsApp number used in notifications.
    pub fn with_admin_phone(mut self, phone: impl Into<String>) -> Self {
        self.admin_phone = phone.into();
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OTP Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issues a fresh 6-digit code for the email and mails it.
    ///
    /// Only the SHA-256 digest is stored, replacing any prior record for
    /// the email. If delivery fails, the record is rolled back so a
    /// stored, unexpired record always implies the user was sent that
    /// code.
    #[tracing::instrument(skip(self, req))]
    pub async fn send_otp(&self, req: SendOtpRequest) -> Result<(), OtpError> {
        let email = EmailAddress::parse(&req.email)
            .map_err(|e| OtpError::Validation(e.to_string()))?;

        let code = security::generate_otp();
        let record = OtpRecord::issue(email.clone(), security::hash_otp(&code));

        // Store first; abort before sending if the write fails.
        self.repo.upsert_otp(record).await?;

        if let Err(delivery_err) = self.mailer.send_otp_email(&email, &code).await {
            // No valid code may exist for an email that never received it.
            if let Err(cleanup_err) = self.repo.delete_otp(&email).await {
                tracing::error!(
                    email = %email,
                    error = %cleanup_err,
                    "Failed to roll back OTP record after delivery failure"
                );
            }
            tracing::warn!(email = %email, error = %delivery_err, "OTP delivery failed");
            return Err(delivery_err.into());
        }

        tracing::info!(email = %email, "OTP issued");
        Ok(())
    }

    /// Redeems a code, creating the account on first success.
    ///
    /// Returns the account id. A wrong guess keeps the record so the user
    /// can retry within the expiry window; a correct guess consumes it
    /// before anything else happens.
    #[tracing::instrument(skip(self, req))]
    pub async fn verify_otp(&self, req: VerifyOtpRequest) -> Result<String, OtpError> {
        let email = EmailAddress::parse(&req.email)
            .map_err(|e| OtpError::Validation(e.to_string()))?;
        let code = OtpCode::parse(&req.otp)
            .map_err(|e| OtpError::Validation(e.to_string()))?;

        let record = self
            .repo
            .find_otp(&email)
            .await?
            .ok_or(OtpError::NotFound)?;

        if record.is_expired(Utc::now()) {
            self.repo.delete_otp(&email).await?;
            return Err(OtpError::Expired);
        }

        if !security::verify_otp_hash(&code, &record.otp_hash) {
            // Record deliberately kept: the 10-minute window and the code
            // space are the rate limit, not an attempt counter.
            return Err(OtpError::InvalidCode);
        }

        // One-time use. If the delete fails the code could be replayed,
        // so the failure aborts the redemption.
        self.repo.delete_otp(&email).await?;

        // Idempotent signup retry: an existing account wins over creation.
        if let Some(user_id) = self.identity.find_user_by_email(&email).await? {
            tracing::info!(email = %email, "OTP verified for existing account");
            return Ok(user_id);
        }

        let password = req.password.unwrap_or_default();
        if password.len() < MIN_PASSWORD_LEN {
            return Err(OtpError::MissingPassword);
        }

        let user_id = self
            .identity
            .create_user(NewUser {
                email: email.clone(),
                password,
                full_name: req.full_name,
            })
            .await?;

        tracing::info!(email = %email, user_id = %user_id, "Account created");
        Ok(user_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a gateway order for a major-unit amount.
    ///
    /// Returns everything the client-side checkout widget needs; the key
    /// secret stays server-side.
    #[tracing::instrument(skip(self, req), fields(amount = req.amount))]
    pub async fn create_payment_order(
        &self,
        req: CreatePaymentOrderRequest,
    ) -> Result<CreatePaymentOrderResponse, PaymentError> {
        let amount = to_minor_units(req.amount)
            .map_err(|e| PaymentError::Validation(e.to_string()))?;
        let currency = req
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let receipt = req
            .receipt
            .unwrap_or_else(|| format!("rcpt_{}", Utc::now().timestamp_millis()));

        let order = self.gateway.create_order(amount, &currency, &receipt).await?;
        let key_id = self.gateway.key_id()?;

        tracing::info!(order_id = %order.id, amount, "Gateway order created");
        Ok(CreatePaymentOrderResponse {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id,
        })
    }

    /// Verifies a completed checkout and finalizes the local order.
    ///
    /// The signature check is the only path to `paid`: on mismatch the
    /// operation fails hard and the order is untouched. After a valid
    /// signature the order update is best-effort - an update failure is
    /// logged for out-of-band reconciliation but the customer still gets
    /// a success response.
    #[tracing::instrument(skip(self, req), fields(order_id = %req.order_id))]
    pub async fn verify_payment(
        &self,
        req: VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, PaymentError> {
        let order_id: OrderId = req
            .order_id
            .parse()
            .map_err(|_| PaymentError::Validation("Invalid order ID".into()))?;

        let valid = self.gateway.verify_signature(
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        )?;
        if !valid {
            tracing::warn!(order_id = %order_id, "Payment signature mismatch");
            return Err(PaymentError::SignatureMismatch);
        }

        match self
            .repo
            .mark_order_paid(order_id, &req.razorpay_payment_id)
            .await
        {
            Ok(order) => {
                tracing::info!(order_id = %order.id, "Order confirmed");
            }
            Err(e) => {
                // Payment is confirmed at the gateway; failing the customer
                // here would be worse than the reconciliation gap.
                tracing::error!(
                    order_id = %order_id,
                    error = %e,
                    "Order update failed after verified payment"
                );
            }
        }

        let message = notify::order_notification(&req);
        let whatsapp_url = notify::whatsapp_link(&self.admin_phone, &message);

        Ok(VerifyPaymentResponse {
            success: true,
            whatsapp_url,
            admin_phone: self.admin_phone.clone(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Order intake
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates the pending local order that checkout later finalizes.
    #[tracing::instrument(skip(self, req), fields(total = req.total_amount))]
    pub async fn create_order(
        &self,
        req: CreateOrderRequest,
    ) -> Result<LocalOrder, PaymentError> {
        let total = to_minor_units(req.total_amount)
            .map_err(|e| PaymentError::Validation(e.to_string()))?;

        let order = LocalOrder::new(total, req.receipt, req.items);
        self.repo.insert_order(order.clone()).await?;
        Ok(order)
    }

    /// Gets a local order by ID.
    pub async fn get_order(&self, id: OrderId) -> Result<LocalOrder, PaymentError> {
        self.repo
            .get_order(id)
            .await?
            .ok_or(PaymentError::OrderNotFound(id))
    }
}
