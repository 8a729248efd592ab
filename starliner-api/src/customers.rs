use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use starliner_booking::{Customer, CustomerStatus, NewCustomer};
use starliner_core::{empty_as_none, Envelope};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/{id}", get(get_customer))
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<CustomerStatus>,
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Json<Envelope<Vec<Customer>>> {
    let customers = state.customers.read().await.list(query.status);
    Json(Envelope::ok(customers))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Envelope<Customer>>), AppError> {
    let customer = state.customers.write().await.create(input, Utc::now())?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::created(customer.id.clone(), customer)),
    ))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Customer>>, AppError> {
    let customer = state
        .customers
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError("Customer not found".to_string()))?;
    Ok(Json(Envelope::ok(customer)))
}
