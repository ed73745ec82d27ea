use std::fmt::Display;

/// Result returning Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Ordered index errors. Lookups never fail, absence is reported as None, so these only cover
/// construction and structural checking.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The index configuration is invalid, e.g. a minimum degree below 2.
    Config(String),
    /// A structural invariant of the tree does not hold.
    Internal(String),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(s) => write!(f, "Invalid configuration: {}", s),
            Error::Internal(s) => write!(f, "Internal error: {}", s),
        }
    }
}
