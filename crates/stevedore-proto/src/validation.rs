//! Input validation for stevedore protocol types.

use crate::error::ProtoError;

/// Validation error naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ProtoError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Validate a container image reference.
///
/// Accepts `name`, `name:tag`, `registry/name:tag`, `registry:port/name:tag`
/// and `name@sha256:digest` forms.
///
/// # Errors
///
/// Returns an error if the image reference is malformed.
pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() {
        return Err(ValidationError::new("image", "image cannot be empty"));
    }

    if image.contains(char::is_whitespace) {
        return Err(ValidationError::new(
            "image",
            "image cannot contain whitespace",
        ));
    }

    if image.starts_with(':') || image.starts_with('@') {
        return Err(ValidationError::new(
            "image",
            "image cannot start with ':' or '@'",
        ));
    }

    if image.ends_with(':') || image.ends_with('/') {
        return Err(ValidationError::new(
            "image",
            "image cannot end with ':' or '/'",
        ));
    }

    Ok(())
}

/// Validate an environment variable name.
///
/// # Errors
///
/// Returns an error if the name is empty, starts with a digit, or contains
/// characters outside `[A-Za-z0-9_]`.
pub fn validate_env_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::new(
            "env",
            "environment variable name cannot be empty",
        ));
    }

    let first = key.chars().next().unwrap_or('0');
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(ValidationError::new(
            "env",
            format!("environment variable name '{key}' must start with a letter or underscore"),
        ));
    }

    for c in key.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(ValidationError::new(
                "env",
                format!("environment variable name '{key}' contains invalid character '{c}'"),
            ));
        }
    }

    Ok(())
}
