use std::borrow::Cow;
use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The raw argument payload could not be decoded as structured data.
    ArgumentDecode,
    /// The requested tool is not registered.
    UnknownTool,
    /// The decoded arguments did not match the tool's declared parameters.
    BadArguments,
    /// Error occurred while executing the tool.
    Execution,
}

impl ErrorKind {
    /// Returns the identifier used for this kind in serialized payloads.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ArgumentDecode => "argument_decode_error",
            ErrorKind::UnknownTool => "unknown_tool",
            ErrorKind::BadArguments => "bad_arguments",
            ErrorKind::Execution => "tool_execution_error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ArgumentDecode => write!(f, "Malformed arguments"),
            ErrorKind::UnknownTool => write!(f, "Unknown tool"),
            ErrorKind::BadArguments => write!(f, "Bad arguments"),
            ErrorKind::Execution => write!(f, "Execution error"),
        }
    }
}

/// Describes a tool call error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    /// Creates a new error with the `ArgumentDecode` kind.
    #[inline]
    pub fn argument_decode() -> Self {
        Self {
            kind: ErrorKind::ArgumentDecode,
            reason: None,
        }
    }

    /// Creates a new error with the `UnknownTool` kind.
    #[inline]
    pub fn unknown_tool() -> Self {
        Self {
            kind: ErrorKind::UnknownTool,
            reason: None,
        }
    }

    /// Creates a new error with the `BadArguments` kind.
    #[inline]
    pub fn bad_arguments() -> Self {
        Self {
            kind: ErrorKind::BadArguments,
            reason: None,
        }
    }

    /// Creates a new error with the `Execution` kind.
    #[inline]
    pub fn execution_error() -> Self {
        Self {
            kind: ErrorKind::Execution,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}
