use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

use crate::{error::ApiError, transactions::dto::NewTransaction};

/// Income or expense. Stored as the `transaction_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Transaction record in the database. Owned by exactly one user, fixed at
/// creation. `user_id` is not part of the serialized representation; clients
/// only ever see their own rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: Date,
    #[serde(skip_serializing)]
    pub user_id: i64,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct TransactionStore {
    db: PgPool,
}

impl TransactionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All transactions owned by `user_id`, in insertion order.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Transaction>, ApiError> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, description, amount, kind, date, user_id, created_at, updated_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        &self,
        user_id: i64,
        new: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (description, amount, kind, date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, description, amount, kind, date, user_id, created_at, updated_at
            "#,
        )
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.kind)
        .bind(new.date)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    /// Fetch by primary key regardless of owner. The caller decides between
    /// not-found and not-owner; the two must stay distinguishable.
    pub async fn find(&self, id: i64) -> Result<Option<Transaction>, ApiError> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, description, amount, kind, date, user_id, created_at, updated_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
