//! Nullable payment service — scripted responses, recorded messages.

use ccwallet_core::cwpp::{
    PaymentRequest, PaymentService, PaymentUri, ProcessRequest, ProcessResponse,
};
use ccwallet_core::WalletError;
use futures_util::future::{self, BoxFuture, FutureExt};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A payment service that replays queued answers.
///
/// `process` answers are consumed in order; once the queue is empty every
/// further call fails with `RequestError`.
pub struct NullPaymentService {
    request: Mutex<Option<Result<PaymentRequest, String>>>,
    responses: Mutex<VecDeque<Result<ProcessResponse, String>>>,
    received: Mutex<Vec<ProcessRequest>>,
    fetches: Mutex<Vec<PaymentUri>>,
}

impl NullPaymentService {
    pub fn new() -> Self {
        Self {
            request: Mutex::new(None),
            responses: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn set_request(&self, request: PaymentRequest) {
        *self.request.lock().unwrap() = Some(Ok(request));
    }

    /// Make `fetch_request` fail with the given service error.
    pub fn fail_request(&self, error: &str) {
        *self.request.lock().unwrap() = Some(Err(error.to_string()));
    }

    /// Queue a `tx_data` answer for the next `process` call.
    pub fn push_tx(&self, tx_hex: String) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ProcessResponse { tx_data: tx_hex }));
    }

    /// Queue a failure for the next `process` call.
    pub fn push_error(&self, error: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
    }

    /// Process messages received so far (for assertions).
    pub fn received(&self) -> Vec<ProcessRequest> {
        self.received.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

impl Default for NullPaymentService {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentService for NullPaymentService {
    fn fetch_request<'a>(
        &'a self,
        uri: &'a PaymentUri,
    ) -> BoxFuture<'a, Result<PaymentRequest, WalletError>> {
        self.fetches.lock().unwrap().push(uri.clone());
        let result = match self.request.lock().unwrap().clone() {
            Some(Ok(request)) => Ok(request),
            Some(Err(error)) => Err(WalletError::RequestError(error)),
            None => Err(WalletError::RequestError("Not Found".into())),
        };
        future::ready(result).boxed()
    }

    fn process<'a>(
        &'a self,
        _uri: &'a PaymentUri,
        message: &'a ProcessRequest,
    ) -> BoxFuture<'a, Result<ProcessResponse, WalletError>> {
        self.received.lock().unwrap().push(message.clone());
        let result = match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(error)) => Err(WalletError::RequestError(error)),
            None => Err(WalletError::RequestError("no response queued".into())),
        };
        future::ready(result).boxed()
    }
}
