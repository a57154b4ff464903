//! Common error infrastructure for stalker-core.
//!
//! Domain-specific errors (`ConfigError`, `DifficultyError`, `OracleError`)
//! live next to the code that raises them. This module holds the shared
//! severity classification they all report through [`StalkerError`].
//!
//! Nothing raised while ticking is fatal: a missing collaborator or a failed
//! navigation sample degrades to "skip that concern this tick". Validation
//! errors only surface from construction and difficulty binding.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the concern is skipped this tick and retried on the next
/// - **Validation**: invalid input that should be rejected without retry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - skipped now, retried on a later tick.
    ///
    /// Examples: target reference unavailable, nav-mesh slot empty
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative sight distance, difficulty applied twice
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all stalker-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable upper-case code from `error_code` for logs and tests
pub trait StalkerError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
