//! Protocol status codes and the authentication result taxonomy.
//!
//! The caller understands exactly five results, identified by stable
//! numeric codes. Directory-protocol statuses collapse into this taxonomy
//! through a deliberately coarse two-bucket mapping: a fixed set of
//! transient infrastructure statuses becomes [`Outcome::ServiceUnavailable`]
//! and every other non-success status becomes
//! [`Outcome::CredentialsRejected`], so the caller cannot distinguish a
//! wrong password from, say, a missing directory entry. Callers depend on
//! that contract.

/// Outcome of a directory connect or bind operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    /// The operation completed successfully.
    Success,
    /// Server reported `operationsError` (1).
    OperationsError,
    /// Server reported `timeLimitExceeded` (3).
    TimeLimitExceeded,
    /// Server reported `busy` (51).
    Busy,
    /// Server reported `unavailable` (52).
    Unavailable,
    /// Server reported `loopDetect` (54).
    LoopDetected,
    /// The connection dropped mid-operation.
    ServerDown,
    /// The operation did not complete within the operation timeout.
    Timeout,
    /// The connection to the endpoint could not be established.
    ConnectError,
    /// The server closed the operation without returning a result.
    NoResultsReturned,
    /// Any other server-reported result code.
    Other(u32),
}

impl DirectoryStatus {
    /// Classifies a server-reported LDAP result code.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::OperationsError,
            3 => Self::TimeLimitExceeded,
            51 => Self::Busy,
            52 => Self::Unavailable,
            54 => Self::LoopDetected,
            other => Self::Other(other),
        }
    }
}

/// Result of one authentication attempt, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The credentials were accepted.
    Success,
    /// The directory could not be reached or answered with a transient
    /// infrastructure failure; the caller may retry at its discretion.
    ServiceUnavailable,
    /// The credentials were rejected.
    CredentialsRejected,
    /// The module is missing its directory URI or bind template.
    ConfigurationError,
    /// The host framework could not supply the username or secret.
    InternalError,
}

impl Outcome {
    /// Maps a directory-protocol status onto the result taxonomy.
    ///
    /// Total over [`DirectoryStatus`]: success maps to success, the
    /// transient set maps to [`Outcome::ServiceUnavailable`], and every
    /// remaining status is a rejection.
    #[must_use]
    pub fn from_status(status: DirectoryStatus) -> Self {
        match status {
            DirectoryStatus::Success => Self::Success,
            DirectoryStatus::OperationsError
            | DirectoryStatus::TimeLimitExceeded
            | DirectoryStatus::Busy
            | DirectoryStatus::Unavailable
            | DirectoryStatus::LoopDetected
            | DirectoryStatus::ServerDown
            | DirectoryStatus::Timeout
            | DirectoryStatus::ConnectError
            | DirectoryStatus::NoResultsReturned => Self::ServiceUnavailable,
            DirectoryStatus::Other(_) => Self::CredentialsRejected,
        }
    }

    /// Stable numeric code understood by the host framework.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ConfigurationError => 3,
            Self::InternalError => 4,
            Self::CredentialsRejected => 7,
            Self::ServiceUnavailable => 9,
        }
    }
}
