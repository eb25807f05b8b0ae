use thiserror::Error;

/// Errors that can occur when naming or looking up a category type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryTypeError {
    #[error("Unknown category type: {0}")]
    UnknownName(String),
    #[error("Unknown category type identity: {0}")]
    UnknownIdentity(String),
}

/// Errors that can occur when parsing an upstream payload into domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Malformed payload: {0}")]
    Malformed(String),
    #[error(transparent)]
    CategoryType(#[from] CategoryTypeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_error_display() {
        assert_eq!(
            CategoryTypeError::UnknownName("clubs".to_string()).to_string(),
            "Unknown category type: clubs"
        );
        assert_eq!(
            CategoryTypeError::UnknownIdentity("abc".to_string()).to_string(),
            "Unknown category type identity: abc"
        );
    }

    #[test]
    fn test_payload_error_display() {
        assert_eq!(
            PayloadError::Malformed("missing field `Count`".to_string()).to_string(),
            "Malformed payload: missing field `Count`"
        );
        let wrapped: PayloadError = CategoryTypeError::UnknownIdentity("x".to_string()).into();
        assert_eq!(wrapped.to_string(), "Unknown category type identity: x");
    }
}
