// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Domain, core, and persistence errors are translated explicitly so
//! internal error shapes are not leaked across the boundary.

use thiserror::Error;

use enrolink::CoreError;
use enrolink_domain::DomainError;
use enrolink_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor does not have permission for the action.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request conflicts with the application's current state.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A storage operation failed. The caller may retry the whole
    /// operation; no partial state was committed.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatus(label) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status label '{label}'"),
        },
        DomainError::InvalidDecision(label) => ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("'{label}' is not a decision; expected APPROVED or REJECTED"),
        },
        DomainError::InvalidNotificationKind(label) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown notification kind '{label}'"),
        },
        DomainError::InvalidTransition { .. } | DomainError::ProfileLocked { .. } => {
            ApiError::Conflict {
                message: err.to_string(),
            }
        }
        DomainError::InvalidIdentifier { .. } => ApiError::InvalidInput {
            field: String::from("account_identifier"),
            message: err.to_string(),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidEventTitle | DomainError::InvalidEventDates { .. } => {
            ApiError::InvalidInput {
                field: String::from("event"),
                message: err.to_string(),
            }
        }
        DomainError::ApplicationNotFound(id) => ApiError::ResourceNotFound {
            resource: String::from("Application"),
            message: format!("id {id}"),
        },
    }
}

/// Translates a core error into an API error.
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Storage(store_err) => ApiError::Storage {
            message: store_err.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ApplicationNotFound(id) => Self::ResourceNotFound {
                resource: String::from("Application"),
                message: format!("id {id}"),
            },
            _ => Self::Storage {
                message: err.to_string(),
            },
        }
    }
}
