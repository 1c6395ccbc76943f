//! Use-case level errors.

use issuedraft_domain::DomainError;
use thiserror::Error;

use crate::application::services::StoreError;

/// Failure of an application service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input or payload rejected by domain rules
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The record store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::Validation(msg)) | Self::Domain(DomainError::Parse(msg)) => {
                msg.clone()
            }
            Self::Domain(DomainError::Duplicate { entity_type, key }) => {
                format!("{entity_type} {key} is already registered")
            }
            Self::Domain(DomainError::NotFound { entity_type, .. }) => {
                format!("{entity_type} not found")
            }
            Self::Store(err) => format!("Could not save changes: {err}"),
        }
    }

    /// Whether the failure was caused by user input rather than the platform.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_record() {
        let err = ServiceError::from(DomainError::duplicate("Repository", "octo/hello"));
        assert_eq!(err.user_message(), "Repository octo/hello is already registered");
        assert!(err.is_user_error());
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = ServiceError::from(DomainError::validation("Owner cannot be empty"));
        assert_eq!(err.user_message(), "Owner cannot be empty");
    }
}
