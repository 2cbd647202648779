use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropCraftError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{address} address is not eligible")]
    NotEligible { address: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External query failed: {0}")]
    ExternalQuery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DropCraftError {
    /// Wrap an external collaborator failure, keeping it as the error source.
    pub fn external<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ExternalQuery(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DropCraftError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_configuration() {
        let err = DropCraftError::Configuration("3 allocation lists, 2 alias lists".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: 3 allocation lists, 2 alias lists"
        );
    }

    #[test]
    fn test_error_display_not_eligible_keeps_supplied_form() {
        let err = DropCraftError::NotEligible {
            address: "0xAbCd000000000000000000000000000000000001".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "0xAbCd000000000000000000000000000000000001 address is not eligible"
        );
    }

    #[test]
    fn test_error_display_validation() {
        let err = DropCraftError::Validation("negative amount".to_string());
        assert_eq!(err.to_string(), "Validation error: negative amount");
    }

    #[test]
    fn test_external_query_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "rpc timed out");
        let err = DropCraftError::external(io);
        assert_eq!(err.to_string(), "External query failed: rpc timed out");
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "rpc timed out");
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(DropCraftError::Validation("x".into()));
        assert!(result.is_err());
    }
}
