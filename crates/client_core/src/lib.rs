use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::OrderRejection,
    protocol::{CreateOrderRequest, OrderConfirmation},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod form;

pub use error::SubmitError;
pub use form::{
    FormError, ItemRow, OrderForm, OutcomePanel, PanelTone, QuantityError, SubmissionOutcome,
};

/// The remote order-creation service.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderConfirmation, SubmitError>;
}

/// Posts orders as JSON to a fixed endpoint. Requests carry no timeout; a
/// submission waits until the service answers or the connection fails.
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    http: Client,
    endpoint: Url,
}

impl HttpOrderClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_http_client(Client::new(), endpoint)
    }

    pub fn with_http_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderService for HttpOrderClient {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderConfirmation, SubmitError> {
        debug!(endpoint = %self.endpoint, items = request.items.len(), "posting order");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Rejection bodies are best effort; anything unreadable has no reason.
            let rejection = serde_json::from_slice::<OrderRejection>(&body).unwrap_or_default();
            warn!(
                status = status.as_u16(),
                reason = rejection.reason.as_deref().unwrap_or(""),
                "order service rejected order"
            );
            return Err(SubmitError::rejected(status.as_u16(), rejection));
        }

        serde_json::from_slice::<OrderConfirmation>(&body)
            .map_err(|err| SubmitError::MalformedResponse(err.to_string()))
    }
}

/// Runs one full submission against `service`: validate, mark pending, send,
/// and settle the outcome. Validation and in-flight errors leave the outcome
/// untouched.
pub async fn submit_order<S>(form: &mut OrderForm, service: &S) -> Result<(), FormError>
where
    S: OrderService + ?Sized,
{
    let request = form.begin_submission()?;
    let result = service.create_order(&request).await;
    form.complete_submission(result);
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
