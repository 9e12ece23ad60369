//! SQLite record-store adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use eggcart_types::{
    CheckoutRepository, EmailAddress, LocalOrder, OrderId, OtpRecord, RepoError,
};

use crate::types::{DbOrder, DbOtpRecord};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_email_otps.sql");
        sqlx::query(ddl).execute(&pool).await?;

        let ddl_orders = include_str!("../migrations/0002_create_orders.sql");
        sqlx::query(ddl_orders).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CheckoutRepository for SqliteRepo {
    async fn upsert_otp(&self, record: OtpRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO email_otps (email, otp_hash, expires_at, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(email) DO UPDATE SET
                   otp_hash = excluded.otp_hash,
                   expires_at = excluded.expires_at,
                   updated_at = excluded.updated_at"#,
        )
        .bind(record.email.as_str())
        .bind(&record.otp_hash)
        .bind(record.expires_at.to_rfc3339())
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_otp(&self, email: &EmailAddress) -> Result<Option<OtpRecord>, RepoError> {
        let row: Option<DbOtpRecord> = sqlx::query_as(
            r#"SELECT email, otp_hash, expires_at, created_at, updated_at
               FROM email_otps WHERE email = ?"#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOtpRecord::into_domain).transpose()
    }

    async fn delete_otp(&self, email: &EmailAddress) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM email_otps WHERE email = ?"#)
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn insert_order(&self, order: LocalOrder) -> Result<(), RepoError> {
        let items_json = serde_json::to_string(&order.items)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO orders
               (id, payment_id, payment_status, order_status, total_amount, receipt, items, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(order.id.to_string())
        .bind(&order.payment_id)
        .bind(order.payment_status.as_str())
        .bind(order.order_status.as_str())
        .bind(order.total_amount)
        .bind(&order.receipt)
        .bind(&items_json)
        .bind(order.created_at.to_rfc3339())
        .bind(order.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<LocalOrder>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            r#"SELECT id, payment_id, payment_status, order_status, total_amount, receipt, items, created_at, updated_at
               FROM orders WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOrder::into_domain).transpose()
    }

    async fn mark_order_paid(
        &self,
        id: OrderId,
        payment_id: &str,
    ) -> Result<LocalOrder, RepoError> {
        let now = chrono::Utc::now().to_rfc3339();
        let id_str = id.to_string();

        let result = sqlx::query(
            r#"UPDATE orders
               SET payment_id = ?, payment_status = 'paid', order_status = 'confirmed', updated_at = ?
               WHERE id = ?"#,
        )
        .bind(payment_id)
        .bind(&now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.get_order(id).await?.ok_or(RepoError::NotFound)
    }
}
