use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::watch;

use super::client::OrderGateway;
use super::confirmation::Confirmation;
use super::errors::{CheckoutError, SubmissionError};
use crate::domain::order::Order;
use crate::metrics::Metrics;

// ============================================================================
// Checkout - single in-flight order submission
// ============================================================================
//
// States:
// - Idle: nothing sent yet, or the last attempt was cancelled or abandoned
// - Submitting: one request in flight; further submissions are refused
// - Confirmed: endpoint accepted the order; terminal
// - Failed: last attempt failed; the customer may try again
//
// The state lock is never held across an await.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Confirmed(Confirmation),
    Failed(String),
}

pub struct Checkout<G> {
    gateway: G,
    state: Mutex<SubmissionState>,
    cancel: watch::Sender<bool>,
    metrics: Option<Arc<Metrics>>,
}

impl<G: OrderGateway> Checkout<G> {
    pub fn new(gateway: G) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            gateway,
            state: Mutex::new(SubmissionState::Idle),
            cancel,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    /// Validate and submit the order.
    ///
    /// Validation failures return before anything is sent and leave the
    /// state untouched. Dropping the returned future mid-flight puts the
    /// checkout back to `Idle`.
    pub async fn place_order(&self, order: &Order) -> Result<Confirmation, CheckoutError> {
        order.validate()?;

        {
            let mut state = lock(&self.state);
            match *state {
                SubmissionState::Submitting => return Err(SubmissionError::InFlight.into()),
                SubmissionState::Confirmed(_) => return Err(SubmissionError::AlreadyConfirmed.into()),
                SubmissionState::Idle | SubmissionState::Failed(_) => {}
            }
            *state = SubmissionState::Submitting;
            self.cancel.send_replace(false);
        }
        let guard = InFlight::new(&self.state);

        tracing::info!(
            cake_type = %order.cake_type(),
            quantity = order.quantity(),
            cost = order.cost(),
            "Submitting order"
        );

        let started = Instant::now();
        let cancelled = self.cancel.subscribe();

        // Dropping the gateway future abandons the request
        let outcome = tokio::select! {
            result = self.gateway.place_order(order) => result,
            _ = cancellation(cancelled) => Err(SubmissionError::Cancelled),
        };

        let elapsed = started.elapsed();

        match outcome {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = ?confirmation.order_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Order confirmed"
                );
                self.record("confirmed", elapsed);
                guard.finish(SubmissionState::Confirmed(confirmation.clone()));
                Ok(confirmation)
            }
            Err(SubmissionError::Cancelled) => {
                tracing::info!("Order submission cancelled");
                self.record("cancelled", elapsed);
                guard.finish(SubmissionState::Idle);
                Err(SubmissionError::Cancelled.into())
            }
            Err(error) => {
                tracing::error!(error = %error, "Checkout failed");
                self.record("failed", elapsed);
                guard.finish(SubmissionState::Failed(error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Abandon the in-flight submission, if there is one. Returns whether a
    /// submission was in flight.
    pub fn cancel(&self) -> bool {
        let state = lock(&self.state);
        if *state == SubmissionState::Submitting {
            self.cancel.send_replace(true);
            true
        } else {
            false
        }
    }

    fn record(&self, outcome: &str, elapsed: std::time::Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record_submission(outcome, elapsed);
        }
    }
}

/// Holds the checkout in `Submitting`. If dropped before `finish`, for
/// example because the caller dropped the `place_order` future, the state
/// goes back to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<SubmissionState>) -> Self {
        Self { state, armed: true }
    }

    fn finish(mut self, next: SubmissionState) {
        self.armed = false;
        *lock(self.state) = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::info!("Order submission abandoned");
            *lock(self.state) = SubmissionState::Idle;
        }
    }
}

/// The state is always left consistent, so a poisoned lock is still usable.
fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resolves once `cancel` flips the flag. Also resolves if the current
/// value is already set when subscribing.
async fn cancellation(mut cancelled: watch::Receiver<bool>) {
    let _ = cancelled.wait_for(|cancelled| *cancelled).await;
}

// ============================================================================
// Unit Tests
// ============================================================================
