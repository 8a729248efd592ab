use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use starliner_booking::BookingFilter;
use starliner_core::{Booking, BookingRequest, BookingStatus, Envelope};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}/status", post(update_status))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(filter): Query<BookingFilter>,
) -> Json<Envelope<Vec<Booking>>> {
    let bookings = state.ledger.read().await.list(&filter);
    Json(Envelope::ok(bookings))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Envelope<Booking>>), AppError> {
    let booking = state.ledger.write().await.record(&request, Utc::now())?;

    Ok((
        StatusCode::CREATED,
        Json(
            Envelope::created(booking.id.clone(), booking)
                .with_message("Booking created successfully"),
        ),
    ))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Booking>>, AppError> {
    let ledger = state.ledger.read().await;
    let booking = ledger
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;
    Ok(Json(Envelope::ok(booking)))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Envelope<Booking>>, AppError> {
    let booking = state.ledger.write().await.update_status(&id, update.status)?;
    Ok(Json(Envelope::ok(booking)))
}
