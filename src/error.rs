//! Errors raised at the toolkit's I/O and configuration boundary.
//!
//! Geometry and focus negotiation never produce errors: a refused resize or
//! focus change is an ordinary `false`. Only terminal I/O and configuration
//! parsing surface through this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown window manager policy `{0}` (expected `default` or `classic`)")]
    UnknownPolicy(String),
    #[error("invalid workspace configuration: {0}")]
    InvalidWorkspace(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_display() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "terminal I/O error: boom");
    }

    #[test]
    fn unknown_policy_names_the_value() {
        let err = Error::UnknownPolicy("tiling".into());
        assert!(err.to_string().contains("`tiling`"));
    }
}
