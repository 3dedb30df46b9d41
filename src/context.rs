//! Host framework boundary.
//!
//! The authentication framework that invokes this module owns the login
//! conversation: it knows the user being authenticated, holds the secret it
//! collected, can consult the local system user database, and provides the
//! diagnostic sink that ends up in the system log. This module consumes all
//! of that through [`HostContext`].

use secrecy::SecretString;

/// Severity of a diagnostic record emitted through the host sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operational errors such as unrecognized options.
    Error,
    /// Audit records for authentication decisions.
    Notice,
}

/// Capabilities supplied by the host authentication framework for one
/// authentication attempt.
///
/// Accessors return `None` when the framework cannot supply the value; the
/// orchestrator converts that into the appropriate [`Outcome`].
///
/// [`Outcome`]: crate::Outcome
#[cfg_attr(test, mockall::automock)]
pub trait HostContext: Send + Sync {
    /// Username being authenticated.
    fn username(&self) -> Option<String>;

    /// Secret collected by the framework. May be empty.
    fn secret(&self) -> Option<SecretString>;

    /// Uid of the local system account for `username`, if one exists.
    fn system_uid(&self, username: &str) -> Option<u32>;

    /// Writes a diagnostic record. Implementations must never receive the
    /// secret through this sink.
    fn log(&self, severity: Severity, message: &str);
}
