use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("storage error: {0}")]
    StorageError(String),
    #[error("could not encode or decode leads: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("lead delivery failed: {0}")]
    TransportError(String),
}

/// Form input that failed its check. Nothing is submitted when one occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is too short")]
    NameTooShort,
    #[error("phone number is incomplete")]
    PhoneIncomplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::NameTooShort => FormField::Name,
            ValidationError::PhoneIncomplete => FormField::Phone,
        }
    }
}
