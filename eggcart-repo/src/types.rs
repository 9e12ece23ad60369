//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use eggcart_types::{
    EmailAddress, LocalOrder, OrderId, OrderStatus, OtpRecord, PaymentStatus, RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

#[cfg(feature = "sqlite")]
fn parse_timestamp(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| RepoError::Database(format!("Invalid timestamp {}: {}", raw, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// OTP record row from database.
#[derive(FromRow)]
pub struct DbOtpRecord {
    pub email: String,
    pub otp_hash: String,

    #[cfg(not(feature = "sqlite"))]
    pub expires_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub expires_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

impl DbOtpRecord {
    pub fn into_domain(self) -> Result<OtpRecord, RepoError> {
        let email = EmailAddress::parse(&self.email).map_err(RepoError::Domain)?;

        #[cfg(not(feature = "sqlite"))]
        let (expires_at, created_at, updated_at) =
            (self.expires_at, self.created_at, self.updated_at);

        #[cfg(feature = "sqlite")]
        let (expires_at, created_at, updated_at) = (
            parse_timestamp(&self.expires_at)?,
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        );

        Ok(OtpRecord::from_parts(
            email,
            self.otp_hash,
            expires_at,
            created_at,
            updated_at,
        ))
    }
}

/// Order row from database.
#[derive(FromRow)]
pub struct DbOrder {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub payment_id: Option<String>,
    pub payment_status: String,
    pub order_status: String,
    pub total_amount: i64,
    pub receipt: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub items: serde_json::Value,
    #[cfg(feature = "sqlite")]
    pub items: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

impl DbOrder {
    pub fn into_domain(self) -> Result<LocalOrder, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let id = OrderId::from_uuid(self.id);
        #[cfg(feature = "sqlite")]
        let id: OrderId = self
            .id
            .parse()
            .map_err(|e| RepoError::Database(format!("Invalid order id: {}", e)))?;

        let payment_status =
            PaymentStatus::parse(&self.payment_status).map_err(RepoError::Domain)?;
        let order_status = OrderStatus::parse(&self.order_status).map_err(RepoError::Domain)?;

        #[cfg(not(feature = "sqlite"))]
        let items = serde_json::from_value(self.items)
            .map_err(|e| RepoError::Database(format!("Invalid items json: {}", e)))?;
        #[cfg(feature = "sqlite")]
        let items = serde_json::from_str(&self.items)
            .map_err(|e| RepoError::Database(format!("Invalid items json: {}", e)))?;

        #[cfg(not(feature = "sqlite"))]
        let (created_at, updated_at) = (self.created_at, self.updated_at);
        #[cfg(feature = "sqlite")]
        let (created_at, updated_at) = (
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        );

        Ok(LocalOrder {
            id,
            payment_id: self.payment_id,
            payment_status,
            order_status,
            total_amount: self.total_amount,
            receipt: self.receipt,
            items,
            created_at,
            updated_at,
        })
    }
}
