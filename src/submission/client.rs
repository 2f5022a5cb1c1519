use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::time::Duration;

use super::confirmation::{Confirmation, EchoedOrder};
use super::errors::SubmissionError;
use crate::app_config::AppConfig;
use crate::domain::order::Order;

/// Anything that can place an order and return the endpoint's confirmation.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, order: &Order) -> Result<Confirmation, SubmissionError>;
}

/// HTTP client for the order endpoint.
///
/// One attempt per call: no retry, no backoff. The request is bounded by the
/// timeout given at construction.
pub struct SubmissionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SubmissionClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.endpoint_url()?, config.timeout())?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderGateway for SubmissionClient {
    async fn place_order(&self, order: &Order) -> Result<Confirmation, SubmissionError> {
        let payload = serde_json::to_vec(order)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            cake_type = %order.cake_type(),
            quantity = order.quantity(),
            bytes = payload.len(),
            "Posting order"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = %status, "Order endpoint rejected order");
            return Err(SubmissionError::Status(status));
        }

        let body = response.bytes().await?;
        let echoed: EchoedOrder = serde_json::from_slice(&body)?;

        Ok(Confirmation::from(echoed))
    }
}
