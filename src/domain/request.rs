use serde::{Deserialize, Serialize};

use crate::domain::common::{Amount, AmountType, DocumentType, PaymentMethod};
use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Description, DocumentNumber, Email, HttpsUrl, ImageUrl, PhoneNumber, UnixNanos,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCreatePaymentLink")]
/// Body of `POST /online/link/v1`.
///
/// Construct with [`CreatePaymentLink::open`] or [`CreatePaymentLink::close`]; a `CLOSE` link
/// always carries an amount, also when decoded from JSON.
pub struct CreatePaymentLink {
    amount_type: AmountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiration_date: Option<UnixNanos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callback_url: Option<HttpsUrl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    payment_methods: Vec<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payer_email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<ImageUrl>,
}

impl CreatePaymentLink {
    /// A link where the payer chooses the amount.
    pub fn open() -> Self {
        Self::with_amount_type(AmountType::Open, None)
    }

    /// A link with a merchant-fixed amount.
    pub fn close(amount: Amount) -> Self {
        Self::with_amount_type(AmountType::Close, Some(amount))
    }

    /// Build from an explicit amount type; `CLOSE` without an amount is rejected.
    pub fn new(amount_type: AmountType, amount: Option<Amount>) -> Result<Self, ValidationError> {
        if amount_type == AmountType::Close && amount.is_none() {
            return Err(ValidationError::MissingAmount);
        }
        Ok(Self::with_amount_type(amount_type, amount))
    }

    fn with_amount_type(amount_type: AmountType, amount: Option<Amount>) -> Self {
        Self {
            amount_type,
            amount,
            description: None,
            expiration_date: None,
            callback_url: None,
            payment_methods: Vec::new(),
            payer_email: None,
            image_url: None,
        }
    }

    pub fn description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn expiration_date(mut self, expiration_date: UnixNanos) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Where the payer is redirected after the transaction.
    pub fn callback_url(mut self, callback_url: HttpsUrl) -> Self {
        self.callback_url = Some(callback_url);
        self
    }

    /// Restrict the checkout to these methods. An empty list shows every method.
    pub fn payment_methods(mut self, payment_methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods = payment_methods;
        self
    }

    /// Send the link to this address.
    pub fn payer_email(mut self, payer_email: Email) -> Self {
        self.payer_email = Some(payer_email);
        self
    }

    pub fn image_url(mut self, image_url: ImageUrl) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn amount_type(&self) -> &AmountType {
        &self.amount_type
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.amount.as_ref()
    }

    pub fn methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }
}

/// Unchecked wire form of [`CreatePaymentLink`].
#[derive(Deserialize)]
struct RawCreatePaymentLink {
    amount_type: AmountType,
    #[serde(default)]
    amount: Option<Amount>,
    #[serde(default)]
    description: Option<Description>,
    #[serde(default)]
    expiration_date: Option<UnixNanos>,
    #[serde(default)]
    callback_url: Option<HttpsUrl>,
    #[serde(default)]
    payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    payer_email: Option<Email>,
    #[serde(default)]
    image_url: Option<ImageUrl>,
}

impl TryFrom<RawCreatePaymentLink> for CreatePaymentLink {
    type Error = ValidationError;

    fn try_from(raw: RawCreatePaymentLink) -> Result<Self, Self::Error> {
        Ok(Self {
            description: raw.description,
            expiration_date: raw.expiration_date,
            callback_url: raw.callback_url,
            payment_methods: raw.payment_methods,
            payer_email: raw.payer_email,
            image_url: raw.image_url,
            ..Self::new(raw.amount_type, raw.amount)?
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerDocument {
    pub document_type: DocumentType,
    pub document_number: DocumentNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// The person paying at the terminal.
pub struct Payer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PayerDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Terminal that should process an integration payment.
///
/// Invariant: model and serial are non-empty after trimming.
pub struct Terminal {
    model: String,
    serial: String,
}

impl Terminal {
    pub fn new(
        model: impl Into<String>,
        serial: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            model: non_empty("terminal_model", model.into())?,
            serial: non_empty("terminal_serial", serial.into())?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `POST /payments/app-checkout`.
pub struct CreateIntegrationPayment {
    amount: Amount,
    user_email: Email,
    #[serde(default, with = "optional_payment_method")]
    payment_method: Option<PaymentMethod>,
    terminal_model: String,
    terminal_serial: String,
    reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payer: Option<Payer>,
}

impl CreateIntegrationPayment {
    /// `user_email` identifies the seller; `reference` is echoed back in the webhook.
    pub fn new(
        amount: Amount,
        user_email: Email,
        terminal: Terminal,
        reference: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount,
            user_email,
            payment_method: None,
            terminal_model: terminal.model,
            terminal_serial: terminal.serial,
            reference: non_empty("reference", reference.into())?,
            description: None,
            payer: None,
        })
    }

    /// Preselect the method on the terminal. Without one the payer picks on the device.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    pub fn description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn payer(mut self, payer: Payer) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// An unset method is sent as `""`, which the API reads as "let the payer choose".
mod optional_payment_method {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::common::PaymentMethod;

    pub fn serialize<S>(value: &Option<PaymentMethod>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_ref().map_or("", PaymentMethod::as_str))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PaymentMethod>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|value| !value.is_empty())
            .map(PaymentMethod::from))
    }
}
