//! Domain layer: strong types with validation and invariants (no I/O).

mod common;
mod request;
mod response;
mod validation;
mod value;

pub use common::{
    Amount, AmountType, Currency, DocumentType, PaymentLinkStatus, PaymentMethod, Tax, TaxType,
    TerminalStatus,
};
pub use request::{CreateIntegrationPayment, CreatePaymentLink, Payer, PayerDocument, Terminal};
pub use response::{
    BoundTerminals, IntegrationPayment, IntegrationPaymentMethod, IntegrationPaymentMethods,
    Nullable, PaymentLink, PaymentLinkDetails, PaymentLinkMethods, PaymentMethodLimits, Response,
    TerminalInfo,
};
pub use validation::ValidationError;

pub(crate) use response::null_as_default;
pub use value::{
    ApiKey, Description, DocumentNumber, Email, HttpsUrl, ImageUrl, PaymentLinkId, PhoneNumber,
    UnixNanos,
};
