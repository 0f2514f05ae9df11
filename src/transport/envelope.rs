use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::domain::{Response, null_as_default};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("response body is empty")]
    EmptyBody,

    /// Not JSON, or the `errors` array itself is malformed.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON whose body does not fit the expected shape. Any field errors the body
    /// listed are kept.
    #[error("unexpected response shape: {source}")]
    Shape {
        #[source]
        source: serde_json::Error,
        errors: FieldErrors,
    },
}

impl DecodeError {
    /// Field errors listed by a body that failed to decode.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Shape { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One object of the `errors` array: field name to message.
///
/// Non-string messages are kept as their JSON text.
pub struct ErrorEntry(BTreeMap<String, String>);

impl ErrorEntry {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ErrorEntry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for ErrorEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(field, message)| match message {
                serde_json::Value::String(text) => (field, text),
                other => (field, other.to_string()),
            })
            .collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Every structured error entry of a response, in the order the API listed them.
pub struct FieldErrors(Vec<ErrorEntry>);

impl FieldErrors {
    pub fn new(entries: Vec<ErrorEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every field name mentioned by any entry.
    pub fn fields(&self) -> BTreeSet<&str> {
        self.0
            .iter()
            .flat_map(ErrorEntry::iter)
            .map(|(field, _)| field)
            .collect()
    }

    /// Merged view: field name to message.
    ///
    /// When several entries name the same field, the entry listed last wins.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .flat_map(ErrorEntry::iter)
            .map(|(field, message)| (field.to_owned(), message.to_owned()))
            .collect()
    }

    /// Message for `field` under the same last-wins rule as [`FieldErrors::field_messages`].
    pub fn message(&self, field: &str) -> Option<&str> {
        self.0.iter().rev().find_map(|entry| entry.get(field))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.0.iter().flat_map(ErrorEntry::iter) {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Response shape wrapped in a top-level `payload` object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Payload<P> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: P,
}

impl<P> Payload<P> {
    pub fn into_inner(self) -> P {
        self.payload
    }
}

impl<P> From<Payload<P>> for Response
where
    P: Into<Response>,
{
    fn from(value: Payload<P>) -> Self {
        value.payload.into()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorList {
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq)]
/// A decoded body together with the structured errors it carried.
pub struct Decoded<T> {
    pub value: T,
    pub errors: FieldErrors,
}

/// Decode a response body into `T`, collecting the `errors` array alongside it.
///
/// Unknown fields are ignored. A missing or `null` `errors` key yields no errors.
///
/// The `errors` array is read before the body so that a body of the wrong shape still
/// reports them through [`DecodeError::Shape`].
pub fn decode_envelope<T>(body: &[u8]) -> Result<Decoded<T>, DecodeError>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    let errors = FieldErrors(serde_json::from_slice::<ErrorList>(body)?.errors);
    match serde_json::from_slice::<T>(body) {
        Ok(value) => Ok(Decoded { value, errors }),
        Err(source) => Err(DecodeError::Shape { source, errors }),
    }
}
