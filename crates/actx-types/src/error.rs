use std::fmt;

use uuid::Uuid;

/// Result type used throughout the canonical model.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by every layer of the conversion core.
///
/// Kinds map 1:1 to the error taxonomy of the format-translation core: each
/// carries a short stable code (for post-mortem), a human message, and
/// (where applicable) the offending message id.
#[derive(Debug)]
pub enum Error {
    UnsupportedFormat { code: &'static str, message: String },
    InvalidRole { code: &'static str, message: String },
    InvalidShape { code: &'static str, message: String, message_id: Option<Uuid> },
    MissingToolCallID { code: &'static str, message: String, message_id: Option<Uuid> },
    MalformedArguments { code: &'static str, message: String, message_id: Option<Uuid> },
    AssetUnresolved { code: &'static str, message: String, message_id: Option<Uuid> },
    Cancelled { code: &'static str },
    Internal { code: &'static str, message: String },
}

/// The error kind, independent of its payload. Matches §7 of the
/// specification this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    InvalidRole,
    InvalidShape,
    MissingToolCallID,
    MalformedArguments,
    AssetUnresolved,
    Cancelled,
    Internal,
}

impl Error {
    pub fn unsupported_format(format: impl AsRef<str>) -> Self {
        Error::UnsupportedFormat {
            code: "unsupported_format",
            message: format!("unsupported or empty format identifier: {:?}", format.as_ref()),
        }
    }

    pub fn invalid_role(role: impl AsRef<str>, provider: &'static str) -> Self {
        Error::InvalidRole {
            code: "invalid_role",
            message: format!("role {:?} is not accepted by the {} normalizer", role.as_ref(), provider),
        }
    }

    pub fn invalid_shape(message: impl Into<String>, message_id: Option<Uuid>) -> Self {
        Error::InvalidShape {
            code: "invalid_shape",
            message: message.into(),
            message_id,
        }
    }

    pub fn missing_tool_call_id(message_id: Option<Uuid>) -> Self {
        Error::MissingToolCallID {
            code: "missing_tool_call_id",
            message: "tool-result part has no tool_call_id after normalization".to_string(),
            message_id,
        }
    }

    pub fn malformed_arguments(message: impl Into<String>, message_id: Option<Uuid>) -> Self {
        Error::MalformedArguments {
            code: "malformed_arguments",
            message: message.into(),
            message_id,
        }
    }

    pub fn asset_unresolved(message_id: Option<Uuid>) -> Self {
        Error::AssetUnresolved {
            code: "asset_unresolved",
            message: "image part has no asset, no inline data, and no url".to_string(),
            message_id,
        }
    }

    pub fn cancelled() -> Self {
        Error::Cancelled { code: "cancelled" }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Error::Internal { code, message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::InvalidRole { .. } => ErrorKind::InvalidRole,
            Error::InvalidShape { .. } => ErrorKind::InvalidShape,
            Error::MissingToolCallID { .. } => ErrorKind::MissingToolCallID,
            Error::MalformedArguments { .. } => ErrorKind::MalformedArguments,
            Error::AssetUnresolved { .. } => ErrorKind::AssetUnresolved,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat { code, .. }
            | Error::InvalidRole { code, .. }
            | Error::InvalidShape { code, .. }
            | Error::MissingToolCallID { code, .. }
            | Error::MalformedArguments { code, .. }
            | Error::AssetUnresolved { code, .. }
            | Error::Cancelled { code }
            | Error::Internal { code, .. } => code,
        }
    }

    /// The offending message id, when the error kind carries one.
    pub fn message_id(&self) -> Option<Uuid> {
        match self {
            Error::InvalidShape { message_id, .. }
            | Error::MissingToolCallID { message_id, .. }
            | Error::MalformedArguments { message_id, .. }
            | Error::AssetUnresolved { message_id, .. } => *message_id,
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFormat { message, .. } => write!(f, "unsupported format: {}", message),
            Error::InvalidRole { message, .. } => write!(f, "invalid role: {}", message),
            Error::InvalidShape { message, .. } => write!(f, "invalid shape: {}", message),
            Error::MissingToolCallID { message, .. } => write!(f, "missing tool_call_id: {}", message),
            Error::MalformedArguments { message, .. } => write!(f, "malformed arguments: {}", message),
            Error::AssetUnresolved { message, .. } => write!(f, "asset unresolved: {}", message),
            Error::Cancelled { .. } => write!(f, "conversion cancelled"),
            Error::Internal { code, message } => write!(f, "internal error [{}]: {}", code, message),
        }
    }
}

impl std::error::Error for Error {}
