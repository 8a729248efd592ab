use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{BookingForm, MAX_TRAVELERS, MIN_TRAVELERS};

/// Basic `local@domain.tld` shape. Does not prove deliverability.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

/// Wizard steps in the order they are completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Schedule,
    Travelers,
    Customer,
    Payment,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Schedule,
        Stage::Travelers,
        Stage::Customer,
        Stage::Payment,
    ];

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Schedule => Some(Stage::Travelers),
            Stage::Travelers => Some(Stage::Customer),
            Stage::Customer => Some(Stage::Payment),
            Stage::Payment => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Schedule => None,
            Stage::Travelers => Some(Stage::Schedule),
            Stage::Customer => Some(Stage::Travelers),
            Stage::Payment => Some(Stage::Customer),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Schedule => "schedule",
            Stage::Travelers => "travelers",
            Stage::Customer => "customer",
            Stage::Payment => "payment",
        };
        f.write_str(s)
    }
}

/// A single failed gate predicate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("Select a date")]
    MissingDate,
    #[error("Select a time slot")]
    MissingTimeSlot,
    #[error("Between 1 and 10 travelers are required, got {0}")]
    TravelerCount(u32),
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Phone number must be at least 7 characters")]
    PhoneTooShort,
    #[error("Postal code is required")]
    MissingPostalCode,
    #[error("Country is required")]
    MissingCountry,
    #[error("Card number must be at least 15 digits")]
    CardNumberTooShort,
    #[error("Cardholder name must be at least 2 characters")]
    CardholderNameTooShort,
    #[error("Expiry must be in MM/YY format")]
    ExpiryMalformed,
    #[error("CVV must be at least 3 digits")]
    CvvTooShort,
}

impl Violation {
    /// Form field the violation belongs to, by its wire name
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingDate => "selectedDate",
            Violation::MissingTimeSlot => "timeSlot",
            Violation::TravelerCount(_) => "travelers",
            Violation::NameTooShort => "name",
            Violation::InvalidEmail => "email",
            Violation::PhoneTooShort => "phone",
            Violation::MissingPostalCode => "postalCode",
            Violation::MissingCountry => "country",
            Violation::CardNumberTooShort => "cardNumber",
            Violation::CardholderNameTooShort => "cardName",
            Violation::ExpiryMalformed => "expiryDate",
            Violation::CvvTooShort => "cvv",
        }
    }
}

/// A stage gate refused to let the wizard move on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The {stage} step is incomplete ({} problem(s))", .violations.len())]
pub struct GateError {
    pub stage: Stage,
    pub violations: Vec<Violation>,
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Every predicate of `stage`'s gate that `form` fails, in field order
pub fn violations(stage: Stage, form: &BookingForm) -> Vec<Violation> {
    let mut found = Vec::new();
    match stage {
        Stage::Schedule => {
            if form.selected_date.is_none() {
                found.push(Violation::MissingDate);
            }
            if form.time_slot.trim().is_empty() {
                found.push(Violation::MissingTimeSlot);
            }
        }
        Stage::Travelers => {
            let total = form.travelers.total();
            if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&total) {
                found.push(Violation::TravelerCount(total));
            }
        }
        Stage::Customer => {
            let customer = &form.customer;
            if trimmed_len(&customer.name) <= 1 {
                found.push(Violation::NameTooShort);
            }
            if !EMAIL_SHAPE.is_match(customer.email.trim()) {
                found.push(Violation::InvalidEmail);
            }
            if trimmed_len(&customer.phone) < 7 {
                found.push(Violation::PhoneTooShort);
            }
            if customer.postal_code.trim().is_empty() {
                found.push(Violation::MissingPostalCode);
            }
            if customer.country.trim().is_empty() {
                found.push(Violation::MissingCountry);
            }
        }
        Stage::Payment => {
            let payment = &form.payment;
            if trimmed_len(payment.card_number.expose()) < 15 {
                found.push(Violation::CardNumberTooShort);
            }
            if trimmed_len(&payment.card_name) <= 1 {
                found.push(Violation::CardholderNameTooShort);
            }
            if trimmed_len(payment.expiry_date.expose()) != 5 {
                found.push(Violation::ExpiryMalformed);
            }
            if trimmed_len(payment.cvv.expose()) < 3 {
                found.push(Violation::CvvTooShort);
            }
        }
    }
    found
}

/// Run a single stage gate
pub fn check_gate(stage: Stage, form: &BookingForm) -> Result<(), GateError> {
    let violations = violations(stage, form);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(GateError { stage, violations })
    }
}

/// Run every gate in order, stopping at the first stage that fails
pub fn check_all_gates(form: &BookingForm) -> Result<(), GateError> {
    Stage::ALL.iter().try_for_each(|stage| check_gate(*stage, form))
}

/// Result of a successful [`BookingWizard::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Gate passed and the next stage is now current and unlocked
    Moved(BookingWizard),
    /// The payment gate passed; the caller should submit the booking
    ReadyToSubmit,
}

/// Serializable state of the four-step booking flow.
///
/// Transitions never mutate in place: each returns the next state, so the
/// whole flow can be driven and asserted without a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWizard {
    pub stage: Stage,
    /// Stages reachable by direct navigation. Only ever grows.
    pub unlocked: BTreeSet<Stage>,
    pub form: BookingForm,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new(BookingForm::default())
    }
}

impl BookingWizard {
    pub fn new(form: BookingForm) -> Self {
        Self {
            stage: Stage::Schedule,
            unlocked: BTreeSet::from([Stage::Schedule]),
            form,
        }
    }

    pub fn is_unlocked(&self, stage: Stage) -> bool {
        self.unlocked.contains(&stage)
    }

    /// Replace the collected fields; stage and unlocked set are kept.
    pub fn with_form(&self, form: BookingForm) -> Self {
        Self {
            form,
            ..self.clone()
        }
    }

    /// Whether the current stage's gate would let the wizard move on
    pub fn can_proceed(&self) -> bool {
        check_gate(self.stage, &self.form).is_ok()
    }

    /// Forward transition guarded by the current stage's gate.
    ///
    /// A refused transition leaves the state untouched; the error names every
    /// failing predicate.
    pub fn advance(&self) -> Result<Advance, GateError> {
        check_gate(self.stage, &self.form)?;

        match self.stage.next() {
            Some(next) => {
                let mut moved = self.clone();
                moved.unlocked.insert(next);
                moved.stage = next;
                tracing::debug!(from = %self.stage, to = %next, "Booking wizard advanced");
                Ok(Advance::Moved(moved))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Step back one stage. Always allowed, never touches the unlocked set.
    pub fn back(&self) -> Self {
        match self.stage.previous() {
            Some(previous) => Self {
                stage: previous,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Jump to an unlocked stage. Locked stages are ignored without error.
    pub fn go_to(&self, stage: Stage) -> Self {
        if !self.is_unlocked(stage) {
            tracing::debug!(
                requested = %stage,
                current = %self.stage,
                "Ignoring navigation to locked stage"
            );
            return self.clone();
        }
        Self {
            stage,
            ..self.clone()
        }
    }

    /// Drive the wizard forward until it reaches payment or a gate refuses.
    pub fn advance_to_payment(&self) -> Result<Self, GateError> {
        let mut wizard = self.clone();
        while wizard.stage != Stage::Payment {
            match wizard.advance()? {
                Advance::Moved(next) => wizard = next,
                Advance::ReadyToSubmit => break,
            }
        }
        Ok(wizard)
    }
}
