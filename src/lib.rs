//! LDAP simple-bind authentication for PAM-style host frameworks.
//!
//! This crate authenticates a named user against a directory server by
//! expanding a configurable bind-identity template (`binddn=`) and
//! performing a simple bind against the configured endpoint (`uri=`) with
//! the user-supplied secret. Every attempt is self-contained and reports
//! one of five fixed outcomes to the caller.

#![deny(missing_docs)]

mod auth;
mod client;
mod context;
mod options;
mod outcome;
mod template;

pub use auth::Authenticator;
pub use client::{DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_OPERATION_TIMEOUT_SECS};
pub use context::{HostContext, Severity};
pub use options::ModuleOptions;
pub use outcome::{DirectoryStatus, Outcome};
pub use template::{expand_template, TemplateError, MAX_IDENTITY_SIZE};

// Re-export the secret type the host context trait speaks in.
pub use secrecy::SecretString;
