use crate::core::ports::ServiceError;
use crate::core::watcher::descriptor::DescriptorError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid watcher descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("watcher {name} is already registered")]
    DuplicateName { name: String },

    #[error("invalid event filter: {0}")]
    InvalidFilter(String),

    #[error("event service unavailable: {0}")]
    ExternalUnavailable(String),

    #[error("watcher {name} is not registered")]
    NotFound { name: String },
}

impl From<DescriptorError> for RegistrationError {
    fn from(error: DescriptorError) -> Self {
        if error.is_filter_error() {
            RegistrationError::InvalidFilter(error.to_string())
        } else {
            RegistrationError::InvalidDescriptor(error.to_string())
        }
    }
}

impl From<ServiceError> for RegistrationError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::DuplicateName { name } => RegistrationError::DuplicateName { name },
            ServiceError::NotFound { name } => RegistrationError::NotFound { name },
            ServiceError::Unavailable(reason) => RegistrationError::ExternalUnavailable(reason),
        }
    }
}
