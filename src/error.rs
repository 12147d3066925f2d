use std::fmt;

/// The error type of the fallible [`List`](crate::List) operations.
///
/// Errors are detected before the list is touched, so a list is never left
/// half-modified when an `Err` is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The operation needs at least one element, but the list is empty.
    EmptyList,
    /// The anchor or target value is not in the list.
    DataNotFound,
}

/// A specialized [`Result`](std::result::Result) for list operations.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyList => f.write_str("list is empty"),
            Error::DataNotFound => f.write_str("data not found in list"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display() {
        assert_eq!(Error::EmptyList.to_string(), "list is empty");
        assert_eq!(Error::DataNotFound.to_string(), "data not found in list");
    }
}
