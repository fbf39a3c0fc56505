use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    state::AppState,
    transactions::{
        dto::{CreateTransactionRequest, MessageResponse},
        repo::Transaction,
    },
};

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/:id", delete(delete_transaction))
}

#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let rows = state.transactions.list_by_user(caller.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_transaction(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let new = payload.validate()?;
    let tx = state.transactions.create(caller.id, &new).await?;
    info!(user_id = caller.id, transaction_id = tx.id, "transaction added");
    Ok((StatusCode::CREATED, Json(tx)))
}

#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let tx = state
        .transactions
        .find(id)
        .await?
        .ok_or(ApiError::TransactionNotFound)?;

    // Ownership check before the mutation. The row must survive a foreign
    // caller's attempt untouched.
    if tx.user_id != caller.id {
        warn!(
            user_id = caller.id,
            transaction_id = id,
            owner_id = tx.user_id,
            "refused to delete another user's transaction"
        );
        return Err(ApiError::Forbidden);
    }

    state.transactions.delete(id).await?;
    info!(user_id = caller.id, transaction_id = id, "transaction deleted");
    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully".into(),
    }))
}
