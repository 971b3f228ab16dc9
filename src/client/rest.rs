//! REST client for the rental backend HTTP endpoints.
//!
//! Wraps the backend HTTP API (directories, availability, order
//! submission) using [`reqwest`]. Failure statuses are decoded into the
//! crate error taxonomy: a 422 with a structured error list becomes
//! [`Error::Rejected`], a 500 becomes [`Error::Server`] with whatever
//! diagnostic text the backend included, and anything else surfaces as
//! [`Error::Api`] with the raw body.

use crate::client::Backend;
use crate::config::api::ApiConfig;
use crate::errors::{Error, Result};
use crate::models::{
    Company, DateRange, Employee, EquipmentAvailability, LocationSuggestion, OrderPayload,
    OrderRecord, SavedOrder, SavedOrderEnvelope, ScreenAvailability, ScreenInventoryItem,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;

/// HTTP client for one rental backend instance.
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Body the backend returns with a 422 validation rejection.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    errors: Vec<String>,
}

/// Body the backend returns with a 500 unhandled exception.
#[derive(Debug, Deserialize)]
struct ExceptionBody {
    exception: String,
}

impl RestBackend {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across backends).
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Starts a request to `path` under the base URL, attaching the bearer
    /// token when one is configured.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Starts an availability request with the period (and optional order
    /// exclusion) as query parameters.
    fn availability_request(
        &self,
        path: &str,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self.request(Method::GET, path).query(&[
            ("start_date", range.start.to_string()),
            ("end_date", range.end.to_string()),
        ]);
        if let Some(order_id) = exclude_order_id {
            builder = builder.query(&[("exclude_order_id", order_id.to_string())]);
        }
        builder
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or the decoded failure otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(decode_failure(status.as_u16(), &body))
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Decodes a failure status and body into the crate error taxonomy.
fn decode_failure(status: u16, body: &str) -> Error {
    match status {
        422 => match serde_json::from_str::<RejectionBody>(body) {
            Ok(rejection) => Error::Rejected {
                errors: rejection.errors,
            },
            Err(_) => Error::Api {
                status,
                body: body.to_string(),
            },
        },
        500 => {
            let detail = serde_json::from_str::<ExceptionBody>(body)
                .map_or_else(|_| body.to_string(), |exception| exception.exception);
            Error::Server { detail }
        }
        _ => Error::Api {
            status,
            body: body.to_string(),
        },
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let response = self
            .request(Method::GET, "employees")
            .query(&[("active_only", "true")])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let response = self
            .request(Method::GET, "companies")
            .query(&[("active_only", "true")])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_screen_inventory(&self) -> Result<Vec<ScreenInventoryItem>> {
        let response = self
            .request(Method::GET, "screen_inventory")
            .query(&[("active_only", "true")])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn screen_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<Vec<ScreenAvailability>> {
        let response = self
            .availability_request("screen_availability", range, exclude_order_id)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn equipment_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<EquipmentAvailability> {
        let response = self
            .availability_request("equipment_availability", range, exclude_order_id)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn location_suggestions(&self, query: &str) -> Result<Vec<LocationSuggestion>> {
        let response = self
            .request(Method::GET, "location_suggestions")
            .query(&[("query", query)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn fetch_order(&self, id: i64) -> Result<OrderRecord> {
        let response = self
            .request(Method::GET, &format!("orders/{id}"))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::OrderNotFound { id });
        }
        Self::parse_response(response).await
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<SavedOrder> {
        let response = self
            .request(Method::POST, "orders")
            .json(payload)
            .send()
            .await?;
        let envelope: SavedOrderEnvelope = Self::parse_response(response).await?;
        Ok(envelope.order)
    }

    async fn update_order(&self, id: i64, payload: &OrderPayload) -> Result<SavedOrder> {
        let response = self
            .request(Method::PUT, &format!("orders/{id}"))
            .json(payload)
            .send()
            .await?;
        let envelope: SavedOrderEnvelope = Self::parse_response(response).await?;
        Ok(envelope.order)
    }
}
