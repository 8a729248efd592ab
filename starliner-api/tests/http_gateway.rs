//! The HTTP booking gateway against a live in-process server.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, checkout_form, first_open_date, post_json};
use starliner_api::{app, AppState};
use starliner_booking::{submit, BookingForm, BookingWizard, SubmissionError};
use starliner_catalog::{InMemoryTourCatalog, TourCatalog};
use starliner_core::{BookingGateway, BookingRequest, GatewayError};
use starliner_store::HttpBookingGateway;

/// Serve `state` on an ephemeral local port.
async fn spawn_server(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    addr
}

fn gateway_for(addr: SocketAddr) -> HttpBookingGateway {
    HttpBookingGateway::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn submit_over_http_records_remotely() {
    let remote = AppState::in_memory();
    let addr = spawn_server(remote.clone()).await;

    let tour = InMemoryTourCatalog::default()
        .get_tour_by_id("wine-country")
        .await
        .unwrap();
    let form: BookingForm =
        serde_json::from_value(checkout_form(first_open_date("wine-country").await)).unwrap();
    let wizard = BookingWizard::new(form).advance_to_payment().unwrap();

    let confirmation = submit(&wizard, &tour, &gateway_for(addr)).await.unwrap();
    assert!(confirmation.reference.starts_with("BK"));

    let ledger = remote.ledger.read().await;
    let booking = ledger.get(&confirmation.reference).unwrap();
    assert_eq!(booking.total_price, 477);
    assert_eq!(booking.total_members, 3);
}

#[tokio::test]
async fn remote_rejection_message_is_passed_through() {
    let addr = spawn_server(AppState::in_memory()).await;

    let err = gateway_for(addr)
        .create_booking(&BookingRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Rejected(ref m) if m == "Missing required fields"));
    assert_eq!(
        SubmissionError::from(err).to_string(),
        "Missing required fields"
    );
}

#[tokio::test]
async fn checkout_forwards_to_remote_service() {
    let remote = AppState::in_memory();
    let addr = spawn_server(remote.clone()).await;

    let front = AppState::in_memory().with_gateway(Arc::new(gateway_for(addr)));
    let date = first_open_date("city-walk").await;

    let response = post_json(
        app(front.clone()),
        "/api/tours/city-walk/checkout",
        checkout_form(date),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let reference = body_json(response).await["id"].as_str().unwrap().to_string();
    assert!(remote.ledger.read().await.get(&reference).is_some());
    assert!(front.ledger.read().await.is_empty());
}

#[tokio::test]
async fn unreachable_service_surfaces_as_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let front = AppState::in_memory().with_gateway(Arc::new(gateway_for(addr)));
    let date = first_open_date("city-walk").await;

    let response = post_json(
        app(front),
        "/api/tours/city-walk/checkout",
        checkout_form(date),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["success"], false);
}
