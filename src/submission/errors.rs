use crate::domain::order::OrderError;

// ============================================================================
// Submission Errors
// ============================================================================

/// Anything that went wrong after the order passed validation. None of these
/// are retried.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Order endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed order payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("An order submission is already in flight")]
    InFlight,

    #[error("Order has already been confirmed")]
    AlreadyConfirmed,

    #[error("Order submission was cancelled")]
    Cancelled,
}

/// Error returned by a checkout: either the order was not ready to send, or
/// sending it failed.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] OrderError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl CheckoutError {
    /// Short message suitable for showing to the customer.
    pub fn user_notice(&self) -> &'static str {
        match self {
            CheckoutError::Validation(_) => "Please fill in all delivery details before checking out.",
            CheckoutError::Submission(SubmissionError::InFlight) => "Your order is already being placed.",
            CheckoutError::Submission(SubmissionError::AlreadyConfirmed) => "This order has already been placed.",
            CheckoutError::Submission(SubmissionError::Cancelled) => "Checkout was cancelled.",
            CheckoutError::Submission(_) => "Sorry, checkout failed. Please try again.",
        }
    }
}
