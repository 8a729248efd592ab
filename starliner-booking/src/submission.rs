use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use starliner_catalog::Tour;
use starliner_core::{BookingGateway, BookingRequest, GatewayError};

use crate::wizard::{check_all_gates, BookingWizard, GateError, Stage, Violation};

/// What the thank-you view shows after a successful submission
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub reference: String,
    pub tour_id: String,
    pub tour_title: String,
    pub date: NaiveDate,
    pub time: String,
    pub members: u32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Booking can only be submitted from the payment step (currently on {0})")]
    NotAtPayment(Stage),

    #[error(transparent)]
    Incomplete(#[from] GateError),

    /// Refused by the booking service; message passed through unchanged
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(String),
}

impl From<GatewayError> for SubmissionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(message) => SubmissionError::Rejected(message),
            GatewayError::Transport(message) => SubmissionError::Transport(message),
            other @ GatewayError::InvalidResponse(_) => {
                SubmissionError::Transport(other.to_string())
            }
        }
    }
}

/// Assemble the booking payload from a wizard that has passed every gate.
///
/// `totalPrice` is the flat per-person price times the whole party.
pub fn build_request(
    wizard: &BookingWizard,
    tour: &Tour,
) -> Result<BookingRequest, SubmissionError> {
    assemble(wizard, tour).map(|(_, request)| request)
}

fn assemble(
    wizard: &BookingWizard,
    tour: &Tour,
) -> Result<(NaiveDate, BookingRequest), SubmissionError> {
    if wizard.stage != Stage::Payment {
        return Err(SubmissionError::NotAtPayment(wizard.stage));
    }
    check_all_gates(&wizard.form)?;

    let form = &wizard.form;
    let date = form.selected_date.ok_or_else(|| GateError {
        stage: Stage::Schedule,
        violations: vec![Violation::MissingDate],
    })?;
    let total_travelers = form.travelers.total();
    let quote = tour.quote(total_travelers);

    let request = BookingRequest {
        tour_id: tour.id.clone(),
        tour_name: tour.title.clone(),
        date: Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
        time: form.time_slot.trim().to_string(),
        adults: form.travelers.adults,
        children_812: form.travelers.children_812,
        children_37: form.travelers.children_37,
        infants: form.travelers.infants,
        total_travelers,
        total_price: quote.total_price,
        name: form.customer.name.trim().to_string(),
        email: form.customer.email.trim().to_string(),
        phone: form.customer.phone.trim().to_string(),
        postal_code: form.customer.postal_code.trim().to_string(),
        country: form.customer.country.trim().to_string(),
        card_number: form.payment.card_number.clone(),
        card_name: form.payment.card_name.clone(),
        expiry_date: form.payment.expiry_date.clone(),
        cvv: form.payment.cvv.clone(),
    };
    Ok((date, request))
}

/// Submit a completed wizard to the booking service.
///
/// Exactly one gateway call per attempt and no retry. On error the caller keeps
/// the wizard on the payment step; resubmitting sends the same state again.
pub async fn submit(
    wizard: &BookingWizard,
    tour: &Tour,
    gateway: &dyn BookingGateway,
) -> Result<Confirmation, SubmissionError> {
    let (date, request) = assemble(wizard, tour)?;

    tracing::info!(
        tour_id = %request.tour_id,
        time = %request.time,
        travelers = request.total_travelers,
        total_price = request.total_price,
        "Submitting booking"
    );

    let receipt = gateway.create_booking(&request).await.map_err(|e| {
        tracing::warn!(tour_id = %request.tour_id, error = %e, "Booking submission failed");
        SubmissionError::from(e)
    })?;

    tracing::info!(booking_id = %receipt.booking_id, "Booking submitted");

    Ok(Confirmation {
        reference: receipt.booking_id,
        tour_id: tour.id.clone(),
        tour_title: tour.title.clone(),
        date,
        time: request.time,
        members: request.total_travelers,
        name: request.name,
        email: request.email,
    })
}
