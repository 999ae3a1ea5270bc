//! Transport to a remote payment service.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;

use super::messages::{ErrorBody, PaymentRequest, ProcessRequest, ProcessResponse};
use super::uri::PaymentUri;
use crate::{WalletConfig, WalletError};

/// The two calls a payment negotiation makes. Each is a single request with
/// no retry.
pub trait PaymentService: Send + Sync {
    /// `GET` the payment request document.
    fn fetch_request<'a>(
        &'a self,
        uri: &'a PaymentUri,
    ) -> BoxFuture<'a, Result<PaymentRequest, WalletError>>;

    /// `POST` one process message.
    fn process<'a>(
        &'a self,
        uri: &'a PaymentUri,
        message: &'a ProcessRequest,
    ) -> BoxFuture<'a, Result<ProcessResponse, WalletError>>;
}

/// JSON-over-HTTP payment service client.
pub struct HttpPaymentService {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    scheme: String,
}

impl HttpPaymentService {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_connect_timeout())
            .build()
            .map_err(|e| WalletError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            scheme: config.cwpp_scheme.clone(),
        })
    }

    async fn get_request(&self, uri: &PaymentUri) -> Result<PaymentRequest, WalletError> {
        let url = uri.request_url(&self.scheme);
        tracing::debug!(%url, "fetching payment request");
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;
        read_json(response).await
    }

    async fn post_process(
        &self,
        uri: &PaymentUri,
        message: &ProcessRequest,
    ) -> Result<ProcessResponse, WalletError> {
        let url = uri.process_url(&self.scheme);
        tracing::debug!(%url, "posting process message");
        let response = self
            .http_client
            .post(&url)
            .json(message)
            .send()
            .await
            .map_err(request_error)?;
        read_json(response).await
    }
}

impl PaymentService for HttpPaymentService {
    fn fetch_request<'a>(
        &'a self,
        uri: &'a PaymentUri,
    ) -> BoxFuture<'a, Result<PaymentRequest, WalletError>> {
        self.get_request(uri).boxed()
    }

    fn process<'a>(
        &'a self,
        uri: &'a PaymentUri,
        message: &'a ProcessRequest,
    ) -> BoxFuture<'a, Result<ProcessResponse, WalletError>> {
        self.post_process(uri, message).boxed()
    }
}

fn request_error(e: reqwest::Error) -> WalletError {
    if e.is_timeout() {
        WalletError::RequestError(format!("request timed out: {e}"))
    } else if e.is_connect() {
        WalletError::RequestError(format!("connection failed: {e}"))
    } else {
        WalletError::RequestError(e.to_string())
    }
}

/// Decode a 200 body, or turn any other status into `RequestError`
/// carrying the service's `error` string when it sent one.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WalletError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            });
        tracing::warn!(%status, error = %message, "payment service rejected request");
        return Err(WalletError::RequestError(message));
    }
    response
        .json()
        .await
        .map_err(|e| WalletError::RequestError(format!("invalid response body: {e}")))
}
