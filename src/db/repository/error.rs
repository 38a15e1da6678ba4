//! Error types for repository operations.
//!
//! Repository errors carry structured context for debugging and monitoring
//! instead of bare message strings.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
///
/// Provides additional information about where and why an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "try_reserve", "get_salon")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "booking", "stylist")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// The requested reservation conflicts with an existing active booking.
    /// Raised by `try_reserve` when the slot was taken between the admission
    /// check and the insert.
    #[error("Conflict: {message} {context}")]
    Conflict {
        message: String,
        context: ErrorContext,
    },

    /// Data validation failed before or after a repository operation.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a conflict error with context.
    pub fn conflict_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Conflict {
            message: message.into(),
            context,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// True when the error is a [`RepositoryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error is a [`RepositoryError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
