use reqwest::header::HeaderMap;

use crate::domain::{Response, ValidationError};
use crate::transport::{BuildError, DecodeError, FieldErrors, TransportError};

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`crate::BoldClient`].
///
/// Each call ends in exactly one of these or in a decoded result:
/// - the request could not be assembled ([`BoldError::Build`]),
/// - the exchange itself failed ([`BoldError::Network`]),
/// - Bold answered with a non-2xx status ([`BoldError::RemoteRejected`]),
/// - a 2xx body did not decode ([`BoldError::MalformedResponse`]),
/// - a 2xx body reported field errors ([`BoldError::Validation`]).
pub enum BoldError {
    /// One of the domain constructors rejected an invalid value.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Bad base URL, header, or a body with no JSON representation.
    #[error("failed to build request: {0}")]
    Build(#[from] BuildError),

    /// DNS, connect, TLS, read/write failure, or timeout.
    #[error("network error: {0}")]
    Network(#[source] TransportError),

    /// Non-2xx status. `body` holds the exact bytes received; no decoding is attempted.
    #[error(
        "bold API error - status code: {status}, response: {}",
        String::from_utf8_lossy(.body)
    )]
    RemoteRejected {
        status: u16,
        body: Vec<u8>,
        headers: HeaderMap,
    },

    /// 2xx status with a body that does not match the expected shape. Field errors listed
    /// in the body are still reachable through [`BoldError::field_errors`].
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),

    /// 2xx status whose body lists field errors. The decoded body is kept in `partial`.
    #[error("validation error(s): {errors}")]
    Validation {
        errors: FieldErrors,
        partial: Box<Response>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Flat classification of [`BoldError`].
pub enum ErrorKind {
    InvalidInput,
    Build,
    Network,
    RemoteRejected,
    MalformedResponse,
    Validation,
}

impl BoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Build(_) => ErrorKind::Build,
            Self::Network(_) => ErrorKind::Network,
            Self::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Only network failures are worth retrying; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status of a rejected call.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a rejected call, byte for byte.
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            Self::RemoteRejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Field errors reported by the body, also when the rest of it failed to decode.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            Self::MalformedResponse(err) => err.field_errors(),
            _ => None,
        }
    }

    /// The decoded body that came with field errors.
    pub fn partial(&self) -> Option<&Response> {
        match self {
            Self::Validation { partial, .. } => Some(partial),
            _ => None,
        }
    }

    pub fn into_partial(self) -> Option<Response> {
        match self {
            Self::Validation { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentLink;
    use crate::transport::ErrorEntry;

    #[test]
    fn remote_rejection_message_includes_status_and_body() {
        let err = BoldError::RemoteRejected {
            status: 404,
            body: br#"{"message":"not found"}"#.to_vec(),
            headers: HeaderMap::new(),
        };
        assert_eq!(
            err.to_string(),
            r#"bold API error - status code: 404, response: {"message":"not found"}"#
        );
        assert_eq!(err.kind(), ErrorKind::RemoteRejected);
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_retryable());
    }

    #[test]
    fn validation_error_exposes_fields_and_partial_result() {
        let entry: ErrorEntry = [("amount_type".to_owned(), "bad".to_owned())]
            .into_iter()
            .collect();
        let err = BoldError::Validation {
            errors: FieldErrors::new(vec![entry]),
            partial: Box::new(PaymentLink::default().into()),
        };

        assert_eq!(err.to_string(), "validation error(s): amount_type: bad");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.field_errors().and_then(|errors| errors.message("amount_type")),
            Some("bad")
        );
        assert_eq!(
            err.into_partial(),
            Some(Response::PaymentLink(PaymentLink::default()))
        );
    }

    #[test]
    fn only_network_errors_are_retryable() {
        let err = BoldError::Network("connection reset".into());
        assert!(err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Network);

        let err = BoldError::from(ValidationError::MissingAmount);
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
