//! Transport layer: request assembly, the HTTP exchange, and response envelope decoding.

mod envelope;
mod http;
mod request;

pub use envelope::{DecodeError, ErrorEntry, FieldErrors, Payload, decode_envelope};
pub use http::{DEFAULT_TIMEOUT, HttpTransport, ReqwestTransport, TransportError};
pub use request::{BuildError, RequestOptions, build_request};

#[cfg(test)]
pub use http::{BoxFuture, RawResponse};
#[cfg(test)]
pub use request::PreparedRequest;
