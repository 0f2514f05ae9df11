use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::common::{AmountType, PaymentLinkStatus, PaymentMethod, Tax, TerminalStatus};
use crate::domain::validation::ValidationError;
use crate::domain::value::{PaymentLinkId, UnixNanos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Optional response field that keeps "absent" apart from an explicit `null`.
///
/// Pair with `#[serde(default)]` so a missing key decodes to [`Nullable::Absent`].
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T> Serialize for Nullable<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => serializer.serialize_some(value),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

/// Read `null` as the type's default, the way an absent key is read under `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// A created payment link. This is the one shape used wherever the API returns a link.
pub struct PaymentLink {
    #[serde(deserialize_with = "null_as_default")]
    pub payment_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl PaymentLink {
    /// The link id, validated for use with [`crate::BoldClient::get_payment_link`].
    pub fn id(&self) -> Result<PaymentLinkId, ValidationError> {
        PaymentLinkId::new(self.payment_link.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Full state of a payment link (`GET /online/link/v1/{id}`).
pub struct PaymentLinkDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub api_version: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub subtotal: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tip_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub taxes: Vec<Tax>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PaymentLinkStatus,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub expiration_date: Nullable<UnixNanos>,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_date: UnixNanos,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub payment_method: Nullable<PaymentMethod>,
    /// Set once the link has been paid.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub transaction_id: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub amount_type: AmountType,
    #[serde(deserialize_with = "null_as_default")]
    pub is_sandbox: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodLimits {
    #[serde(deserialize_with = "null_as_default")]
    pub min: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub max: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Methods usable in payment links, with their amount limits.
pub struct PaymentLinkMethods {
    #[serde(deserialize_with = "null_as_default")]
    pub payment_methods: BTreeMap<PaymentMethod, PaymentMethodLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationPayment {
    #[serde(deserialize_with = "null_as_default")]
    pub integration_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub terminal_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub terminal_serial: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: TerminalStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Terminals bound to the integrations API.
pub struct BoundTerminals {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub available_terminals: Nullable<Vec<TerminalInfo>>,
}

impl BoundTerminals {
    /// Terminals as a slice; absent and `null` both read as empty.
    pub fn terminals(&self) -> &[TerminalInfo] {
        self.available_terminals
            .as_option()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationPaymentMethod {
    #[serde(deserialize_with = "null_as_default")]
    pub name: PaymentMethod,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Methods available to the integrations API.
pub struct IntegrationPaymentMethods {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub payment_methods: Nullable<Vec<IntegrationPaymentMethod>>,
}

impl IntegrationPaymentMethods {
    pub fn enabled(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.payment_methods
            .as_option()
            .into_iter()
            .flatten()
            .filter(|method| method.enabled)
            .map(|method| &method.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Any decoded result shape, carried by [`crate::BoldError::Validation`].
pub enum Response {
    PaymentLink(PaymentLink),
    PaymentLinkDetails(PaymentLinkDetails),
    PaymentLinkMethods(PaymentLinkMethods),
    IntegrationPayment(IntegrationPayment),
    BoundTerminals(BoundTerminals),
    IntegrationPaymentMethods(IntegrationPaymentMethods),
}

impl From<PaymentLink> for Response {
    fn from(value: PaymentLink) -> Self {
        Self::PaymentLink(value)
    }
}

impl From<PaymentLinkDetails> for Response {
    fn from(value: PaymentLinkDetails) -> Self {
        Self::PaymentLinkDetails(value)
    }
}

impl From<PaymentLinkMethods> for Response {
    fn from(value: PaymentLinkMethods) -> Self {
        Self::PaymentLinkMethods(value)
    }
}

impl From<IntegrationPayment> for Response {
    fn from(value: IntegrationPayment) -> Self {
        Self::IntegrationPayment(value)
    }
}

impl From<BoundTerminals> for Response {
    fn from(value: BoundTerminals) -> Self {
        Self::BoundTerminals(value)
    }
}

impl From<IntegrationPaymentMethods> for Response {
    fn from(value: IntegrationPaymentMethods) -> Self {
        Self::IntegrationPaymentMethods(value)
    }
}
