use serde::{Deserialize, Serialize};

use crate::domain::repository::PaymentPort;
use crate::domain::types::PaymentLineItem;
use crate::error::StoreError;

/// Payment session upstream over HTTP. The session id it returns is opaque;
/// the client completes payment out of band.
#[derive(Clone)]
pub struct HttpPaymentClient {
    pub http: reqwest::Client,
    pub session_url: String,
}

#[derive(Serialize)]
struct SessionRequest<'a> {
    line_items: Vec<SessionLineItem<'a>>,
}

#[derive(Serialize)]
struct SessionLineItem<'a> {
    name: &'a str,
    image_url: &'a str,
    unit_price: i64,
    quantity: i32,
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
}

impl PaymentPort for HttpPaymentClient {
    async fn create_session(&self, items: &[PaymentLineItem]) -> Result<String, StoreError> {
        let body = SessionRequest {
            line_items: items
                .iter()
                .map(|item| SessionLineItem {
                    name: &item.name,
                    image_url: &item.image_url,
                    unit_price: item.price_cents,
                    quantity: item.quantity,
                })
                .collect(),
        };
        let response = self
            .http
            .post(&self.session_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "payment session request failed");
                StoreError::PaymentUpstream
            })?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "payment session rejected");
            return Err(StoreError::PaymentUpstream);
        }
        let session: SessionResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "payment session response malformed");
            StoreError::PaymentUpstream
        })?;
        Ok(session.id)
    }
}
