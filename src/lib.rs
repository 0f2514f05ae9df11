//! Typed Rust client for the Bold payments API.
//!
//! The crate has three layers: a domain layer of strong types, a transport layer for
//! request assembly, the HTTP exchange and response decoding, and a small client layer
//! that sends every operation through one dispatcher.
//!
//! ```rust,no_run
//! use boldco::{Amount, ApiKey, BoldClient, CreatePaymentLink, PaymentMethod, Tax};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), boldco::BoldError> {
//!     let client = BoldClient::new(ApiKey::new("...")?)?;
//!     let amount = Amount::cop(10000.0).with_tax(Tax::vat(8403.0, 1597.0));
//!     let request = CreatePaymentLink::close(amount).payment_methods(vec![PaymentMethod::Pse]);
//!     let link = client.create_payment_link(&request).await?;
//!     println!("{}", link.url);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{BoldClient, BoldClientBuilder, BoldError, DEFAULT_BASE_URL, ErrorKind};
pub use domain::{
    Amount, AmountType, ApiKey, BoundTerminals, CreateIntegrationPayment, CreatePaymentLink,
    Currency, Description, DocumentNumber, DocumentType, Email, HttpsUrl, ImageUrl,
    IntegrationPayment, IntegrationPaymentMethod, IntegrationPaymentMethods, Nullable, Payer,
    PayerDocument, PaymentLink, PaymentLinkDetails, PaymentLinkId, PaymentLinkMethods,
    PaymentLinkStatus, PaymentMethod, PaymentMethodLimits, PhoneNumber, Response, Tax, TaxType,
    Terminal, TerminalInfo, TerminalStatus, UnixNanos, ValidationError,
};
pub use transport::{BuildError, DEFAULT_TIMEOUT, DecodeError, ErrorEntry, FieldErrors};
