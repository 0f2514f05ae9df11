use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidEmail {
        input: String,
    },
    InvalidUrl {
        field: &'static str,
        input: String,
        reason: &'static str,
    },
    InvalidPathSegment {
        field: &'static str,
        input: String,
    },
    MissingAmount,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::LengthOutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} length out of range: {actual} (expected {min}..={max})"
            ),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidEmail { input } => write!(f, "invalid email address: {input}"),
            Self::InvalidUrl {
                field,
                input,
                reason,
            } => write!(f, "invalid {field}: {input} ({reason})"),
            Self::InvalidPathSegment { field, input } => {
                write!(f, "{field} is not a valid path segment: {input}")
            }
            Self::MissingAmount => write!(f, "amount is required when amount_type is CLOSE"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "api_key" };
        assert_eq!(err.to_string(), "api_key must not be empty");

        let err = ValidationError::LengthOutOfRange {
            field: "description",
            min: 2,
            max: 100,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "description length out of range: 1 (expected 2..=100)"
        );

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidUrl {
            field: "callback_url",
            input: "http://example.com".to_owned(),
            reason: "scheme must be https",
        };
        assert_eq!(
            err.to_string(),
            "invalid callback_url: http://example.com (scheme must be https)"
        );

        assert_eq!(
            ValidationError::MissingAmount.to_string(),
            "amount is required when amount_type is CLOSE"
        );
    }
}
