//! CWPP: negotiating a jointly built transaction with a payment service.

pub mod client;
pub mod messages;
pub mod payment;
pub mod uri;
mod verify;

pub use client::{HttpPaymentService, PaymentService};
pub use messages::{ChangeOutput, PaymentRequest, ProcessRequest, ProcessResponse};
pub use payment::{CwppContext, CwppPayment, CwppSelection, CwppState};
pub use uri::{is_cwpp_uri, process_url, request_url, PaymentUri};
