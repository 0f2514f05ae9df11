use serde::{Deserialize, Serialize};

use crate::domain::response::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Whether the payer or the merchant decides the amount of a payment link.
pub enum AmountType {
    /// The payer chooses the amount.
    #[default]
    Open,
    /// The merchant fixes the amount.
    Close,
    Other(String),
}

impl AmountType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for AmountType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OPEN" => Self::Open,
            "CLOSE" => Self::Close,
            _ => Self::Other(value),
        }
    }
}

impl From<AmountType> for String {
    fn from(value: AmountType) -> Self {
        match value {
            AmountType::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Transaction currency. Bold settles in COP; other codes are kept verbatim.
pub enum Currency {
    #[default]
    Cop,
    Other(String),
}

impl From<String> for Currency {
    fn from(value: String) -> Self {
        if value == "COP" {
            Self::Cop
        } else {
            Self::Other(value)
        }
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        match value {
            Currency::Cop => "COP".to_owned(),
            Currency::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaxType {
    /// Value added tax (IVA).
    #[default]
    Vat,
    Other(String),
}

impl From<String> for TaxType {
    fn from(value: String) -> Self {
        if value == "VAT" {
            Self::Vat
        } else {
            Self::Other(value)
        }
    }
}

impl From<TaxType> for String {
    fn from(value: TaxType) -> Self {
        match value {
            TaxType::Vat => "VAT".to_owned(),
            TaxType::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Colombian identity document kinds accepted for payers.
pub enum DocumentType {
    Cedula,
    Nit,
    CedulaExtranjeria,
    Pep,
    Pasaporte,
    Nuip,
    RegistroCivil,
    DocumentoExtranjeria,
    TarjetaIdentidad,
    Ppt,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Payment method identifier.
///
/// Values unknown to this crate are preserved in [`PaymentMethod::Other`].
pub enum PaymentMethod {
    CreditCard,
    Pse,
    BotonBancolombia,
    Nequi,
    Pos,
    Daviplata,
    PayByLink,
    Other(String),
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl PaymentMethod {
    /// Wire representation, e.g. `CREDIT_CARD`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::Pse => "PSE",
            Self::BotonBancolombia => "BOTON_BANCOLOMBIA",
            Self::Nequi => "NEQUI",
            Self::Pos => "POS",
            Self::Daviplata => "DAVIPLATA",
            Self::PayByLink => "PAY_BY_LINK",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CREDIT_CARD" => Self::CreditCard,
            "PSE" => Self::Pse,
            "BOTON_BANCOLOMBIA" => Self::BotonBancolombia,
            "NEQUI" => Self::Nequi,
            "POS" => Self::Pos,
            "DAVIPLATA" => Self::Daviplata,
            "PAY_BY_LINK" => Self::PayByLink,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Lifecycle state of a payment link.
pub enum PaymentLinkStatus {
    #[default]
    Active,
    Processing,
    Paid,
    Rejected,
    Expired,
    Canceled,
    Other(String),
}

impl PaymentLinkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Processing => "PROCESSING",
            Self::Paid => "PAID",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Canceled => "CANCELED",
            Self::Other(other) => other,
        }
    }

    /// `true` once the link can no longer change state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Paid | Self::Rejected | Self::Expired | Self::Canceled
        )
    }
}

impl From<String> for PaymentLinkStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ACTIVE" => Self::Active,
            "PROCESSING" => Self::Processing,
            "PAID" => Self::Paid,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            "CANCELED" => Self::Canceled,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentLinkStatus> for String {
    fn from(value: PaymentLinkStatus) -> Self {
        match value {
            PaymentLinkStatus::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Binding state of a card terminal.
pub enum TerminalStatus {
    #[default]
    Binded,
    Other(String),
}

impl From<String> for TerminalStatus {
    fn from(value: String) -> Self {
        if value == "BINDED" {
            Self::Binded
        } else {
            Self::Other(value)
        }
    }
}

impl From<TerminalStatus> for String {
    fn from(value: TerminalStatus) -> Self {
        match value {
            TerminalStatus::Binded => "BINDED".to_owned(),
            TerminalStatus::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Tax applied to a payment.
pub struct Tax {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: TaxType,
    #[serde(deserialize_with = "null_as_default")]
    pub base: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

impl Tax {
    pub fn vat(base: f64, value: f64) -> Self {
        Self {
            kind: TaxType::Vat,
            base,
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Amount breakdown shared by payment links and integration payments.
///
/// `total_amount` includes taxes and tip.
pub struct Amount {
    pub currency: Currency,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub taxes: Vec<Tax>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tip_amount: f64,
    pub total_amount: f64,
}

impl Amount {
    /// Amount in COP with no taxes and no tip.
    pub fn cop(total_amount: f64) -> Self {
        Self {
            currency: Currency::Cop,
            taxes: Vec::new(),
            tip_amount: 0.0,
            total_amount,
        }
    }

    pub fn with_tax(mut self, tax: Tax) -> Self {
        self.taxes.push(tax);
        self
    }

    pub fn with_tip(mut self, tip_amount: f64) -> Self {
        self.tip_amount = tip_amount;
        self
    }
}
