use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ColormapError {
    UnknownLanguage(String),
    UnknownOrder(String),
    InvalidName(String),
    SizeMismatch { expected: usize, actual: usize },
    Io(String),
}

impl fmt::Display for ColormapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColormapError::UnknownLanguage(lang) => {
                write!(f, "unknown output language '{lang}' (expected c or rust)")
            }
            ColormapError::UnknownOrder(order) => {
                write!(f, "unknown channel order '{order}' (expected bgr or rgb)")
            }
            ColormapError::InvalidName(name) => write!(f, "'{name}' is not a valid identifier"),
            ColormapError::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} depth samples, got {actual}")
            }
            ColormapError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for ColormapError {}

impl From<std::io::Error> for ColormapError {
    fn from(err: std::io::Error) -> Self {
        ColormapError::Io(err.to_string())
    }
}
