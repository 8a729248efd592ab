pub mod customers;
pub mod ledger;
pub mod models;
pub mod submission;
pub mod wizard;

pub use customers::{Customer, CustomerDirectory, CustomerStatus, NewCustomer};
pub use ledger::{BookingFilter, BookingLedger, LedgerGateway};
pub use models::{BookingForm, CustomerDetails, PaymentDetails, Travelers};
pub use submission::{build_request, submit, Confirmation, SubmissionError};
pub use wizard::{Advance, BookingWizard, GateError, Stage, Violation};
