//! Directory verifier backed by `ldap3`.
//!
//! One authentication attempt performs exactly one connect and one simple
//! bind; the connection never outlives the attempt and is released on every
//! exit path. The verifier must not be called with an empty secret, since a
//! simple bind with an empty secret is an unauthenticated bind that many
//! servers accept regardless of the identity; the orchestrator enforces
//! that precondition before calling in.

use crate::outcome::DirectoryStatus;
use async_trait::async_trait;
use ldap3::{LdapConnAsync, LdapConnSettings};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Default connection timeout (seconds).
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;
/// Default operation timeout (seconds).
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait LdapSession: Send {
    async fn simple_bind(&mut self, bind_dn: &str, secret: &str) -> DirectoryStatus;
    async fn unbind(&mut self);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait LdapConnector: Send + Sync {
    async fn connect(&self, uri: &str) -> Result<Box<dyn LdapSession>, DirectoryStatus>;
}

/// Attempts one connection-and-bind sequence against `uri`.
///
/// A connect failure surfaces as its own status without a bind being
/// attempted. The session is unbound before returning regardless of the
/// bind result.
pub(crate) async fn verify_bind(
    connector: &dyn LdapConnector,
    uri: &str,
    bind_dn: &str,
    secret: &SecretString,
) -> DirectoryStatus {
    let mut session = match connector.connect(uri).await {
        Ok(session) => session,
        Err(status) => return status,
    };

    let status = session.simple_bind(bind_dn, secret.expose_secret()).await;
    session.unbind().await;
    status
}

/// Connector that opens real LDAP connections.
pub(crate) struct RealLdapConnector {
    connection_timeout: Duration,
    operation_timeout: Duration,
}

impl Default for RealLdapConnector {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS),
            operation_timeout: Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS),
        }
    }
}

#[async_trait]
impl LdapConnector for RealLdapConnector {
    async fn connect(&self, uri: &str) -> Result<Box<dyn LdapSession>, DirectoryStatus> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.connection_timeout);
        let (conn, ldap) = match LdapConnAsync::with_settings(settings, uri).await {
            Ok(pair) => pair,
            Err(err) => {
                debug!("directory connect to {uri} failed: {err}");
                return Err(DirectoryStatus::ConnectError);
            }
        };
        ldap3::drive!(conn);
        Ok(Box::new(RealLdapSession {
            inner: ldap,
            operation_timeout: self.operation_timeout,
        }))
    }
}

struct RealLdapSession {
    inner: ldap3::Ldap,
    operation_timeout: Duration,
}

#[async_trait]
impl LdapSession for RealLdapSession {
    async fn simple_bind(&mut self, bind_dn: &str, secret: &str) -> DirectoryStatus {
        match timeout(self.operation_timeout, self.inner.simple_bind(bind_dn, secret)).await {
            Err(_) => DirectoryStatus::Timeout,
            Ok(Err(err)) => {
                debug!("simple bind failed before a result was returned: {err}");
                DirectoryStatus::ServerDown
            }
            Ok(Ok(result)) => DirectoryStatus::from_code(result.rc),
        }
    }

    async fn unbind(&mut self) {
        // Best effort; the connection is dropped either way.
        let _ = timeout(self.operation_timeout, self.inner.unbind()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn bind_status_is_returned_and_session_unbound() {
        let mut session = MockLdapSession::new();
        session
            .expect_simple_bind()
            .withf(|bind_dn, secret| {
                bind_dn == "uid=alice,dc=example,dc=com" && secret == "hunter2"
            })
            .times(1)
            .returning(|_, _| DirectoryStatus::Success);
        session.expect_unbind().times(1).return_const(());

        let mut connector = MockLdapConnector::new();
        connector
            .expect_connect()
            .withf(|uri| uri == "ldap://ldap.example.com")
            .times(1)
            .return_once(move |_| Ok(Box::new(session) as Box<dyn LdapSession>));

        let status = verify_bind(
            &connector,
            "ldap://ldap.example.com",
            "uid=alice,dc=example,dc=com",
            &secret("hunter2"),
        )
        .await;
        assert_eq!(status, DirectoryStatus::Success);
    }

    #[tokio::test]
    async fn session_is_unbound_even_when_bind_fails() {
        let mut session = MockLdapSession::new();
        session
            .expect_simple_bind()
            .times(1)
            .returning(|_, _| DirectoryStatus::Other(49));
        session.expect_unbind().times(1).return_const(());

        let mut connector = MockLdapConnector::new();
        connector
            .expect_connect()
            .return_once(move |_| Ok(Box::new(session) as Box<dyn LdapSession>));

        let status = verify_bind(
            &connector,
            "ldap://ldap.example.com",
            "uid=alice,dc=example,dc=com",
            &secret("wrong"),
        )
        .await;
        assert_eq!(status, DirectoryStatus::Other(49));
    }

    #[tokio::test]
    async fn connect_failure_short_circuits_the_bind() {
        let mut connector = MockLdapConnector::new();
        connector
            .expect_connect()
            .times(1)
            .returning(|_| Err(DirectoryStatus::ConnectError));

        let status = verify_bind(
            &connector,
            "ldap://unreachable.example.com",
            "uid=alice,dc=example,dc=com",
            &secret("hunter2"),
        )
        .await;
        assert_eq!(status, DirectoryStatus::ConnectError);
    }
}
