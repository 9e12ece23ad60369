//! PostgreSQL record-store adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use eggcart_types::{
    CheckoutRepository, EmailAddress, LocalOrder, OrderId, OtpRecord, RepoError,
};

use crate::types::{DbOrder, DbOtpRecord};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_email_otps_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_orders_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CheckoutRepository for PostgresRepo {
    async fn upsert_otp(&self, record: OtpRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO email_otps (email, otp_hash, expires_at, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (email) DO UPDATE SET
                   otp_hash = excluded.otp_hash,
                   expires_at = excluded.expires_at,
                   updated_at = excluded.updated_at"#,
        )
        .bind(record.email.as_str())
        .bind(&record.otp_hash)
        .bind(record.expires_at)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_otp(&self, email: &EmailAddress) -> Result<Option<OtpRecord>, RepoError> {
        let row: Option<DbOtpRecord> = sqlx::query_as(
            r#"SELECT email, otp_hash, expires_at, created_at, updated_at
               FROM email_otps WHERE email = $1"#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOtpRecord::into_domain).transpose()
    }

    async fn delete_otp(&self, email: &EmailAddress) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM email_otps WHERE email = $1"#)
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn insert_order(&self, order: LocalOrder) -> Result<(), RepoError> {
        let items_json = serde_json::to_value(&order.items)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO orders
               (id, payment_id, payment_status, order_status, total_amount, receipt, items, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.payment_id)
        .bind(order.payment_status.as_str())
        .bind(order.order_status.as_str())
        .bind(order.total_amount)
        .bind(&order.receipt)
        .bind(&items_json)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<LocalOrder>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            r#"SELECT id, payment_id, payment_status, order_status, total_amount, receipt, items, created_at, updated_at
               FROM orders WHERE id = $1"#,
        )
        .bind(id.as_uuid())
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
        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"UPDATE orders
               SET payment_id = $1, payment_status = 'paid', order_status = 'confirmed', updated_at = $2
               WHERE id = $3"#,
        )
        .bind(payment_id)
        .bind(now)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.get_order(id).await?.ok_or(RepoError::NotFound)
    }
}
