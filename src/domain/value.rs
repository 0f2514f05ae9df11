use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use phonenumber::country;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bold API key (`x-api-key` credential).
///
/// Invariant: non-empty after trimming. `Debug` never prints the secret.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Payment link identifier (`payment_link`), e.g. `LNK_H7S4I8NC9G`.
///
/// Invariant: non-empty after trimming and usable as a single URL path segment.
pub struct PaymentLinkId(String);

impl PaymentLinkId {
    /// Wire field name (`payment_link`).
    pub const FIELD: &'static str = "payment_link";

    /// Create a validated [`PaymentLinkId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
        {
            return Err(ValidationError::InvalidPathSegment {
                field: Self::FIELD,
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PaymentLinkId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaymentLinkId> for String {
    fn from(value: PaymentLinkId) -> Self {
        value.0
    }
}

impl fmt::Display for PaymentLinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Free-text transaction description (`description`).
///
/// Invariant: `2..=100` characters after trimming.
pub struct Description(String);

impl Description {
    /// Wire field name (`description`).
    pub const FIELD: &'static str = "description";

    pub const MIN_CHARS: usize = 2;
    pub const MAX_CHARS: usize = 100;

    /// Create a validated [`Description`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let actual = trimmed.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&actual) {
            return Err(ValidationError::LengthOutOfRange {
                field: Self::FIELD,
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the description.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Absolute `https://` URL, used for the post-payment redirect (`callback_url`).
pub struct HttpsUrl(String);

impl HttpsUrl {
    /// Wire field name (`callback_url`).
    pub const FIELD: &'static str = "callback_url";

    /// Create a validated [`HttpsUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(parse_https(Self::FIELD, value.into())?))
    }

    /// Borrow the URL as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HttpsUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HttpsUrl> for String {
    fn from(value: HttpsUrl) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Product image shown on the checkout page (`image_url`).
///
/// Invariant: absolute `https://` URL whose path ends in `.png`, `.jpg` or `.jpeg`.
pub struct ImageUrl(String);

impl ImageUrl {
    /// Wire field name (`image_url`).
    pub const FIELD: &'static str = "image_url";

    /// Create a validated [`ImageUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = parse_https(Self::FIELD, value.into())?;
        let path = url::Url::parse(&raw)
            .map(|parsed| parsed.path().to_ascii_lowercase())
            .unwrap_or_default();
        if ![".png", ".jpg", ".jpeg"]
            .iter()
            .any(|ext| path.ends_with(ext))
        {
            return Err(ValidationError::InvalidUrl {
                field: Self::FIELD,
                input: raw,
                reason: "path must end with .png or .jpg",
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the URL as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

fn parse_https(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field,
        input: trimmed.to_owned(),
        reason: "not an absolute URL",
    })?;
    if parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl {
            field,
            input: trimmed.to_owned(),
            reason: "scheme must be https",
        });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Email address (`payer_email`, `user_email`, `email`).
///
/// Only a shape check is done: non-empty with a local part and a domain around `@`.
pub struct Email(String);

impl Email {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "email";

    /// Create a validated [`Email`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(ValidationError::InvalidEmail {
                input: trimmed.to_owned(),
            }),
        }
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Identity document number (`document_number`).
///
/// Invariant: `4..=15` characters after trimming.
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Wire field name (`document_number`).
    pub const FIELD: &'static str = "document_number";

    pub const MIN_CHARS: usize = 4;
    pub const MAX_CHARS: usize = 15;

    /// Create a validated [`DocumentNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let actual = trimmed.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&actual) {
            return Err(ValidationError::LengthOutOfRange {
                field: Self::FIELD,
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the document number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentNumber> for String {
    fn from(value: DocumentNumber) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Parsed phone number (`phone_number`).
///
/// Numbers without a country prefix are read as Colombian. Colombian numbers go on the wire
/// in national form (`3100000000`), anything else in E.164. Equality, ordering, and hashing
/// are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Wire field name (`phone_number`).
    pub const FIELD: &'static str = "phone_number";

    /// Region applied when the input carries no country prefix.
    pub const DEFAULT_REGION: country::Id = country::Id::CO;

    const COLOMBIA_CALLING_CODE: u16 = 57;

    /// Parse a phone number, falling back to [`PhoneNumber::DEFAULT_REGION`].
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(Self::DEFAULT_REGION), input)
    }

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The form sent to Bold.
    pub fn wire(&self) -> String {
        if self.parsed.code().value() == Self::COLOMBIA_CALLING_CODE {
            self.parsed.national().to_string()
        } else {
            self.e164.clone()
        }
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.wire()
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
/// Unix timestamp in nanoseconds, as used by `expiration_date` and `creation_date`.
pub struct UnixNanos(i64);

impl UnixNanos {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert a [`SystemTime`], saturating at the `i64` range.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_nanos()).unwrap_or(i64::MAX)),
            Err(before) => Self(
                i64::try_from(before.duration().as_nanos())
                    .map(|nanos| -nanos)
                    .unwrap_or(i64::MIN),
            ),
        }
    }

    /// Get the underlying nanoseconds since the epoch.
    pub fn value(self) -> i64 {
        self.0
    }
}
