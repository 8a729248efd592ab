use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use starliner_booking::wizard::check_gate;
use starliner_booking::{submit, BookingForm, BookingWizard, Confirmation, Stage};
use starliner_catalog::{compute_available_dates, NewTour, TimeSlot, Tour};
use starliner_core::Envelope;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tours", get(list_tours).post(create_tour))
        .route("/api/tours/{id}", get(get_tour))
        .route("/api/tours/{id}/availability", get(get_availability))
        .route("/api/tours/{id}/checkout", post(checkout))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub tour_id: String,
    pub dates: Vec<NaiveDate>,
    pub time_slots: Vec<TimeSlot>,
}

async fn list_tours(State(state): State<AppState>) -> Json<Envelope<Vec<Tour>>> {
    Json(Envelope::ok(state.catalog.list_tours().await))
}

async fn create_tour(
    State(state): State<AppState>,
    Json(input): Json<NewTour>,
) -> Result<(StatusCode, Json<Envelope<Tour>>), AppError> {
    let tour = input.into_tour(Utc::now())?;
    state.catalog.add_tour(tour.clone()).await?;

    tracing::info!(tour_id = %tour.id, "Tour created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::created(tour.id.clone(), tour).with_message("Tour created successfully")),
    ))
}

async fn find_tour(state: &AppState, id: &str) -> Result<Tour, AppError> {
    state
        .catalog
        .get_tour_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFoundError("Tour not found".to_string()))
}

async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Tour>>, AppError> {
    Ok(Json(Envelope::ok(find_tour(&state, &id).await?)))
}

async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Availability>>, AppError> {
    let tour = find_tour(&state, &id).await?;
    let dates = compute_available_dates(&tour, Utc::now());

    Ok(Json(Envelope::ok(Availability {
        tour_id: tour.id.clone(),
        dates: dates.into_iter().collect(),
        time_slots: tour.schedule.map(|s| s.time_slots).unwrap_or_default(),
    })))
}

/// Run a filled-in booking form through the wizard and submit it.
async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Envelope<Confirmation>>), AppError> {
    let tour = find_tour(&state, &id).await?;
    let wizard = BookingWizard::new(form).advance_to_payment()?;
    check_gate(Stage::Payment, &wizard.form)?;

    let available = compute_available_dates(&tour, Utc::now());
    if !wizard
        .form
        .selected_date
        .is_some_and(|date| available.contains(&date))
    {
        return Err(AppError::ValidationError(
            "Selected date is not available".to_string(),
        ));
    }

    let confirmation = submit(&wizard, &tour, state.gateway.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            Envelope::created(confirmation.reference.clone(), confirmation)
                .with_message("Booking created successfully"),
        ),
    ))
}
