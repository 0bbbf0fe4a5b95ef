// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use geodir_domain::DomainError;
use geodir_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires the {permission} permission")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        permission: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract. Every variant is local to the operation that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor lacks the required permission.
    #[error("Unauthorized: '{action}' requires the {permission} permission")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        permission: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A delete was refused because the record is still referenced.
    ///
    /// Recoverable: the message is meant to be shown to the user.
    #[error("{message}")]
    IntegrityViolation {
        /// The type of resource that could not be deleted.
        resource_type: String,
        /// A human-readable, localized explanation.
        message: String,
    },
    /// Uploaded CSV content could not be parsed.
    #[error("Invalid CSV format at line {line}: {reason}")]
    InvalidCsvFormat {
        /// The 1-based line the problem was found on.
        line: u64,
        /// What was wrong with the line.
        reason: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, permission } => {
                Self::Unauthorized { action, permission }
            }
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidIsoCode { field, reason } => ApiError::InvalidInput {
            field: field.to_string(),
            message: reason,
        },
        DomainError::InvalidNumericIsoCode(code) => ApiError::InvalidInput {
            field: String::from("numeric_iso_code"),
            message: format!("Numeric ISO code {code} must be between 0 and 999"),
        },
        DomainError::InvalidAbbreviation(msg) => ApiError::InvalidInput {
            field: String::from("abbreviation"),
            message: msg,
        },
        DomainError::InvalidLocale(msg) => ApiError::InvalidInput {
            field: String::from("locales"),
            message: msg,
        },
        err @ DomainError::DuplicateStateProvinceName { .. } => ApiError::InvalidInput {
            field: String::from("name"),
            message: err.to_string(),
        },
        DomainError::CountryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Country"),
            message: format!("Country with ID {id} does not exist"),
        },
        DomainError::StateProvinceNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("State/province"),
            message: format!("State/province with ID {id} does not exist"),
        },
        err @ DomainError::CountryInUse { .. } => ApiError::IntegrityViolation {
            resource_type: String::from("Country"),
            message: err.to_string(),
        },
        err @ DomainError::StateProvinceInUse { .. } => ApiError::IntegrityViolation {
            resource_type: String::from("State/province"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Anything other than a missing record is an unexpected fault and becomes
/// [`ApiError::Internal`].
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => {
            error!("Persistence failure: {other}");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
