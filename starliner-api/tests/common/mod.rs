#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use starliner_api::{app, AppState};
use starliner_catalog::{compute_available_dates, InMemoryTourCatalog, TourCatalog};
use tower::ServiceExt;

/// Router over a fresh in-memory state: seeded tours and customers, no bookings.
pub fn build_test_app() -> Router {
    app(AppState::in_memory())
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// First date the seeded tour can be booked on, as of now.
pub async fn first_open_date(tour_id: &str) -> NaiveDate {
    let tour = InMemoryTourCatalog::default()
        .get_tour_by_id(tour_id)
        .await
        .unwrap();
    compute_available_dates(&tour, Utc::now())
        .into_iter()
        .next()
        .unwrap()
}

/// A booking form that passes every wizard step.
pub fn checkout_form(date: NaiveDate) -> Value {
    json!({
        "selectedDate": date,
        "timeSlot": "14:00",
        "travelers": { "adults": 2, "children812": 1, "children37": 0, "infants": 0 },
        "customer": {
            "name": "Sarah Smith",
            "email": "sarah.smith@example.com",
            "phone": "+1 (555) 234-5678",
            "postalCode": "94102",
            "country": "United States"
        },
        "payment": {
            "cardNumber": "4111111111111111",
            "cardName": "Sarah Smith",
            "expiryDate": "12/27",
            "cvv": "123"
        }
    })
}
