// ============================================================================
// Submission - sending an order and turning the echo into a confirmation
// ============================================================================

mod checkout;
mod client;
mod confirmation;
mod errors;

pub use checkout::{Checkout, SubmissionState};
pub use client::{OrderGateway, SubmissionClient};
pub use confirmation::{Confirmation, EchoedOrder};
pub use errors::{CheckoutError, SubmissionError};
