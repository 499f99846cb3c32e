//! Result and error types for SmartTable.
//!
//! Only configuration defects are errors. "Nothing changed" and "no more
//! data" are ordinary outcomes and travel as `Ok(false)`.

use thiserror::Error;

/// Result type for SmartTable operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur in SmartTable
#[derive(Debug, Error)]
pub enum TableError {
    /// A navigation primitive needed for the requested direction is absent
    #[error("Navigation primitive `{primitive}` is required to reach position {target} but was not provided")]
    MissingPrimitive {
        /// Name of the missing primitive
        primitive: &'static str,
        /// Target position of the navigation
        target: usize,
    },

    /// A navigation primitive explicitly reported failure
    #[error("Navigation primitive `{primitive}` failed while navigating to position {target} (at {position})")]
    PrimitiveFailed {
        /// Name of the failing primitive
        primitive: &'static str,
        /// Target position of the navigation
        target: usize,
        /// Cursor position when the primitive failed
        position: usize,
    },

    /// The go-to-page retry loop did not converge
    #[error("`goToPage` did not reach position {target} within {retries} retries (stopped at {position})")]
    RetryLimitExceeded {
        /// Target position of the navigation
        target: usize,
        /// Retry bound that was exceeded
        retries: usize,
        /// Cursor position when the loop gave up
        position: usize,
    },

    /// The automation driver reported an error
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// An element the operation depends on does not exist
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// A column name did not match any header
    #[error("Column not found: {name}")]
    ColumnNotFound {
        /// Requested column name
        name: String,
    },

    /// Configuration could not be parsed or is invalid
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Create a driver error from any displayable message
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error is a configuration defect in the navigation setup
    #[must_use]
    pub const fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::MissingPrimitive { .. }
                | Self::PrimitiveFailed { .. }
                | Self::RetryLimitExceeded { .. }
        )
    }
}
