use core::fmt;

/// Represents an error while strictly converting sysex payloads to or from ASCII text.
///
/// The stream decoder itself never fails: noisy input is recovered from locally and reported
/// through [`StreamEvent`](enum.StreamEvent.html) values instead.
/// Errors only come out of the strict text functions of the 7-bit codec,
/// [`encode_ascii`](fn.encode_ascii.html) and [`decode_ascii`](fn.decode_ascii.html).
///
/// This type is a thin pointer to a static `ErrorKind`.
/// It implements `core::error::Error`, and therefore `std::error::Error` when `std` is linked.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{inner}")]
pub struct Error {
    inner: &'static ErrorKind,
}
impl Error {
    /// Create a new error with the given `ErrorKind`.
    #[inline]
    pub fn new(kind: &'static ErrorKind) -> Error {
        Error { inner: kind }
    }

    /// More information about the error itself.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        *self.inner
    }
}
impl From<&'static ErrorKind> for Error {
    #[inline]
    fn from(kind: &'static ErrorKind) -> Error {
        Error::new(kind)
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// The type of error that occurred.
///
/// Errors are broadly categorized into 2 classes, and specific error info is provided as a
/// non-normative string literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The input handed to an encoder cannot be represented.
    /// For example, text containing non-ASCII characters.
    #[error("invalid input: {0}")]
    Invalid(&'static str),

    /// Decoded data does not have the expected shape.
    /// For example, a decoded sysex payload that is not ASCII text.
    #[error("malformed data: {0}")]
    Malformed(&'static str),
}
impl ErrorKind {
    /// Get the informative message on what exactly went wrong.
    #[inline]
    pub fn message(&self) -> &'static str {
        match *self {
            ErrorKind::Invalid(msg) => msg,
            ErrorKind::Malformed(msg) => msg,
        }
    }
}

macro_rules! err_invalid {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Invalid($msg);
        ERR_KIND
    }};
}
macro_rules! err_malformed {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Malformed($msg);
        ERR_KIND
    }};
}

/// The result type used by the codec.
pub type Result<T> = core::result::Result<T, Error>;
