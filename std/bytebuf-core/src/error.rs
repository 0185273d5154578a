///
/// Buffer Error Types
///
/// Every fallible buffer operation reports through `BufferError`. Variants are
/// grouped into a small set of kinds (see `ErrorKind`) so callers can match on
/// the category without caring about the exact message:
///
/// - InvalidSize: allocation size is negative, non-finite or too large
/// - OutOfRange: an offset, length or value falls outside the accepted range
/// - TypeMismatch: an argument has a type that cannot be coerced
/// - UnknownEncoding: an encoding name did not resolve to a known tag
/// - InvalidEncodedInput: malformed text for encoders that refuse to be lenient
/// - Config: the configuration could not be loaded or installed
///
/// Errors integrate with miette for diagnostic codes.
///

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BufferError {
    #[error("The argument 'size' is invalid. Received {received}")]
    #[diagnostic(
        code(bytebuf::invalid_size),
        help("sizes must be finite, non-negative and no larger than the configured max_length")
    )]
    InvalidSize { received: String },

    #[error("The value of \"{name}\" is out of range. It must be {range}. Received {received}")]
    #[diagnostic(code(bytebuf::out_of_range))]
    OutOfRange {
        name: String,
        range: String,
        received: String,
    },

    #[error("{}", bounds_message(name.as_deref()))]
    #[diagnostic(code(bytebuf::out_of_bounds))]
    OutOfBounds { name: Option<String> },

    #[error("The \"{name}\" argument must be {expected}. Received {received}")]
    #[diagnostic(code(bytebuf::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: String,
        received: String,
    },

    #[error("Unknown encoding: {encoding}")]
    #[diagnostic(
        code(bytebuf::unknown_encoding),
        help("expected one of utf8, utf16le, latin1, ascii, hex, base64, base64url or an alias")
    )]
    UnknownEncoding { encoding: String },

    #[error("Invalid {encoding} input: {reason}")]
    #[diagnostic(code(bytebuf::invalid_encoded_input))]
    InvalidEncodedInput { encoding: String, reason: String },

    #[error("Invalid buffer configuration: {0}")]
    #[diagnostic(code(bytebuf::config))]
    Config(String),
}

/// Coarse error category, stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSize,
    OutOfRange,
    TypeMismatch,
    UnknownEncoding,
    InvalidEncodedInput,
    Config,
}

fn bounds_message(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("\"{}\" is outside of buffer bounds", name),
        None => "Attempt to access memory outside buffer bounds".to_string(),
    }
}

impl BufferError {
    pub fn invalid_size(received: impl std::fmt::Display) -> Self {
        BufferError::InvalidSize {
            received: received.to_string(),
        }
    }

    pub fn out_of_range(
        name: impl Into<String>,
        range: impl Into<String>,
        received: impl std::fmt::Display,
    ) -> Self {
        BufferError::OutOfRange {
            name: name.into(),
            range: range.into(),
            received: received.to_string(),
        }
    }

    pub fn out_of_bounds(name: Option<&str>) -> Self {
        BufferError::OutOfBounds {
            name: name.map(str::to_string),
        }
    }

    pub fn type_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        received: impl std::fmt::Display,
    ) -> Self {
        BufferError::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
            received: received.to_string(),
        }
    }

    pub fn unknown_encoding(encoding: impl Into<String>) -> Self {
        BufferError::UnknownEncoding {
            encoding: encoding.into(),
        }
    }

    pub fn invalid_input(encoding: impl Into<String>, reason: impl Into<String>) -> Self {
        BufferError::InvalidEncodedInput {
            encoding: encoding.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BufferError::InvalidSize { .. } => ErrorKind::InvalidSize,
            BufferError::OutOfRange { .. } => ErrorKind::OutOfRange,
            BufferError::OutOfBounds { .. } => ErrorKind::OutOfRange,
            BufferError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BufferError::UnknownEncoding { .. } => ErrorKind::UnknownEncoding,
            BufferError::InvalidEncodedInput { .. } => ErrorKind::InvalidEncodedInput,
            BufferError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, BufferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = BufferError::out_of_range("offset", ">= 0 and <= 6", 7);
        assert_eq!(
            err.to_string(),
            "The value of \"offset\" is out of range. It must be >= 0 and <= 6. Received 7"
        );
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = BufferError::out_of_bounds(None);
        assert_eq!(err.to_string(), "Attempt to access memory outside buffer bounds");
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = BufferError::out_of_bounds(Some("length"));
        assert_eq!(err.to_string(), "\"length\" is outside of buffer bounds");

        let err = BufferError::type_mismatch("offset", "of type number", "type string ('1')");
        assert!(err.to_string().contains("\"offset\" argument must be of type number"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err = BufferError::unknown_encoding("utf9");
        assert_eq!(err.to_string(), "Unknown encoding: utf9");
        assert_eq!(err.kind(), ErrorKind::UnknownEncoding);

        let err = BufferError::invalid_size(-1);
        assert!(err.to_string().contains("Received -1"));
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = BufferError::unknown_encoding("utf9");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bytebuf::unknown_encoding"));
        assert!(err.help().is_some());
    }

    #[test]
    fn test_all_codes_snapshot() {
        let errors = [
            BufferError::invalid_size("NaN"),
            BufferError::out_of_range("value", ">= 0 and <= 255", 256),
            BufferError::out_of_bounds(Some("offset")),
            BufferError::type_mismatch("offset", "an integer", "type number (1.5)"),
            BufferError::unknown_encoding("utf-9"),
            BufferError::invalid_input("hex", "fill value encodes to zero bytes"),
            BufferError::Config("configuration already installed".to_string()),
        ];
        let rendered: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.code().map(|c| c.to_string()).unwrap_or_default(), e))
            .collect();
        insta::assert_snapshot!(rendered.join("\n"), @r#"
        bytebuf::invalid_size: The argument 'size' is invalid. Received NaN
        bytebuf::out_of_range: The value of "value" is out of range. It must be >= 0 and <= 255. Received 256
        bytebuf::out_of_bounds: "offset" is outside of buffer bounds
        bytebuf::type_mismatch: The "offset" argument must be an integer. Received type number (1.5)
        bytebuf::unknown_encoding: Unknown encoding: utf-9
        bytebuf::invalid_encoded_input: Invalid hex input: fill value encodes to zero bytes
        bytebuf::config: Invalid buffer configuration: configuration already installed
        "#);
    }
}
