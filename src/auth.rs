//! Authentication orchestration.

use crate::client::{verify_bind, LdapConnector, RealLdapConnector};
use crate::context::{HostContext, Severity};
use crate::options::ModuleOptions;
use crate::outcome::Outcome;
use crate::template::expand_template;
use secrecy::ExposeSecret;
use tracing::debug;

/// Authenticates users against a directory server by expanding the
/// configured bind identity template and performing a simple bind with the
/// user-supplied secret.
///
/// Each call to [`Authenticator::authenticate`] is fully self-contained: it
/// parses its options, opens one directory connection, performs one bind
/// and releases the connection before returning. No state is shared across
/// attempts.
pub struct Authenticator {
    connector: Box<dyn LdapConnector>,
}

impl Authenticator {
    /// Creates an authenticator backed by real LDAP connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: Box::new(RealLdapConnector::default()),
        }
    }

    #[cfg(test)]
    fn with_connector(connector: Box<dyn LdapConnector>) -> Self {
        Self { connector }
    }

    /// Runs one authentication attempt.
    ///
    /// `args` are the host framework's `key=value` configuration tokens;
    /// `binddn=` and `uri=` are recognized. The steps form a strict chain
    /// of early returns: missing username or secret is an internal error,
    /// missing configuration a configuration error, and an unknown local
    /// user or an empty secret is rejected before the directory is ever
    /// contacted. Empty secrets are rejected outright because a simple bind
    /// with an empty secret is an unauthenticated bind that many servers
    /// accept unconditionally.
    pub async fn authenticate<S: AsRef<str>>(
        &self,
        ctx: &dyn HostContext,
        args: &[S],
    ) -> Outcome {
        let options = ModuleOptions::parse(args, ctx);

        let Some(username) = ctx.username() else {
            return Outcome::InternalError;
        };
        let Some(secret) = ctx.secret() else {
            return Outcome::InternalError;
        };

        if options.uri().is_empty() || options.bind_template().is_empty() {
            ctx.log(Severity::Notice, "unable to find URI and/or BINDDN");
            return Outcome::ConfigurationError;
        }

        if ctx.system_uid(&username).is_none() {
            ctx.log(
                Severity::Notice,
                &format!("unable to get uid for user {username}"),
            );
            return Outcome::CredentialsRejected;
        }

        if secret.expose_secret().is_empty() {
            ctx.log(
                Severity::Notice,
                &format!("ldap authentication failure: empty password for user {username}"),
            );
            return Outcome::CredentialsRejected;
        }

        let bind_dn = match expand_template(options.bind_template(), || ctx.username()) {
            Ok(bind_dn) => bind_dn,
            Err(err) => {
                ctx.log(
                    Severity::Notice,
                    &format!("cannot expand bind template for user {username}: {err}"),
                );
                return Outcome::CredentialsRejected;
            }
        };

        ctx.log(Severity::Notice, &format!("using binddn={bind_dn}"));

        let status = verify_bind(self.connector.as_ref(), options.uri(), &bind_dn, &secret).await;
        debug!("directory bind finished with status {status:?}");

        let outcome = Outcome::from_status(status);
        if outcome != Outcome::Success {
            ctx.log(
                Severity::Notice,
                &format!(
                    "ldap authentication failure: user=<{username}> uri=<{uri}> binddn=<{bind_dn}>",
                    uri = options.uri()
                ),
            );
        }
        outcome
    }

    /// Companion entry point for the host framework's credential lifecycle.
    ///
    /// The module keeps no credential material, so there is nothing to
    /// prepare; this always succeeds.
    pub fn prepare_credentials<S: AsRef<str>>(
        &self,
        _ctx: &dyn HostContext,
        _args: &[S],
    ) -> Outcome {
        Outcome::Success
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
